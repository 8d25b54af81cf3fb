//! Program Loader
//!
//! Parses comma-separated Intcode program text into a program image.
//! Every token must be a decimal integer; nothing is executed here.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{IntcodeError, IntcodeResult};

/// Initial memory image of a process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    words: Vec<i64>,
}

impl Program {
    pub fn words(&self) -> &[i64] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Overwrite `address` before any process is created from the image,
    /// extending the image with zeros if needed.
    pub fn patch(&mut self, address: usize, value: i64) {
        if address >= self.words.len() {
            self.words.resize(address + 1, 0);
        }
        self.words[address] = value;
    }
}

impl From<Vec<i64>> for Program {
    fn from(words: Vec<i64>) -> Self {
        Program { words }
    }
}

impl std::str::FromStr for Program {
    type Err = IntcodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProgramLoader::parse(s)
    }
}

/// Program loader
pub struct ProgramLoader;

impl ProgramLoader {
    /// Parse program text such as `"1,0,0,3,99\n"`
    pub fn parse(text: &str) -> IntcodeResult<Program> {
        let words = text
            .split(',')
            .enumerate()
            .map(|(index, token)| {
                let token = token.trim();
                token.parse::<i64>().map_err(|_| IntcodeError::InvalidToken {
                    index,
                    token: token.to_string(),
                })
            })
            .collect::<IntcodeResult<Vec<_>>>()?;
        Ok(Program { words })
    }

    /// Read and parse a program file
    pub fn load_file(path: &Path) -> IntcodeResult<Program> {
        let text = fs::read_to_string(path)?;
        let program = Self::parse(&text)?;
        debug!(path = %path.display(), words = program.len(), "program loaded");
        Ok(program)
    }
}
