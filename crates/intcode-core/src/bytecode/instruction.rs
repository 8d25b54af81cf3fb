//! Instruction Decoder
//!
//! Splits a raw instruction word into its opcode and parameter modes.
//! This layer contains no execution semantics and never fails: unknown
//! opcodes and mode digits are reported by the engine.

/// How a parameter word is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamMode {
    /// The word is an address to dereference
    Position,
    /// The word is the operand itself
    Immediate,
    /// The word is an address offset by the relative base
    Relative,
}

impl ParamMode {
    pub fn from_digit(digit: i64) -> Option<Self> {
        match digit {
            0 => Some(ParamMode::Position),
            1 => Some(ParamMode::Immediate),
            2 => Some(ParamMode::Relative),
            _ => None,
        }
    }
}

/// Decoded instruction word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: i64,
    /// Mode digits, least significant first
    modes: i64,
}

impl Instruction {
    /// Decode a word as `opcode = word % 100`, modes from `word / 100`.
    ///
    /// Non-positive words carry no mode digits.
    pub fn decode(word: i64) -> Self {
        Instruction {
            opcode: word % 100,
            modes: if word > 0 { word / 100 } else { 0 },
        }
    }

    /// Decode a word with no mode digits: the whole word is the opcode.
    pub fn decode_plain(word: i64) -> Self {
        Instruction {
            opcode: word,
            modes: 0,
        }
    }

    /// Raw mode digit for parameter `index`; `0` past the encoded digits.
    pub fn mode_digit(&self, index: usize) -> i64 {
        let mut rest = self.modes;
        for _ in 0..index {
            if rest == 0 {
                return 0;
            }
            rest /= 10;
        }
        rest % 10
    }

    /// Mode for parameter `index`, or `None` if the digit is not a mode.
    pub fn mode(&self, index: usize) -> Option<ParamMode> {
        ParamMode::from_digit(self.mode_digit(index))
    }
}
