//! Intcode Runtime - CLI
//!
//! Command-line interface to run Intcode programs through each topology.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use intcode_core::{
    run_patched_pipe, run_ring, InstructionSet, IntcodeConfig, IntcodeError, IntcodeResult, Process,
    Program, ProgramLoader,
};
use intcode_host::{paint_hull, play_arcade};

#[derive(Parser)]
#[command(name = "intcode")]
#[command(about = "Run Intcode programs")]
struct Cli {
    /// Machine variant: basic, alu or full
    #[arg(long, global = true, default_value = "full")]
    instruction_set: InstructionSet,

    /// Upper bound on memory growth, in cells
    #[arg(long, global = true)]
    max_memory: Option<usize>,

    /// Read 0 instead of faulting when input runs out
    #[arg(long, global = true)]
    tolerate_exhausted_input: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one process with fixed inputs and print its outputs
    Run {
        program: PathBuf,
        /// Input value, may be repeated
        #[arg(short, long = "input", allow_hyphen_values = true)]
        inputs: Vec<i64>,
        /// Overwrite a memory cell before running, as ADDR=VALUE
        #[arg(long = "set", value_parser = parse_assignment)]
        sets: Vec<(usize, i64)>,
        /// Print a memory cell after the run
        #[arg(long = "dump")]
        dumps: Vec<usize>,
    },
    /// Run a feedback ring, one process per phase
    Ring {
        program: PathBuf,
        #[arg(long, value_delimiter = ',', required = true, allow_hyphen_values = true)]
        phases: Vec<i64>,
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        seed: i64,
    },
    /// Drive the hull painting robot
    Paint {
        program: PathBuf,
        /// Color of the starting panel (0 black, 1 white)
        #[arg(long, default_value_t = 0)]
        start_color: i64,
    },
    /// Play the breakout game on autopilot
    Arcade {
        program: PathBuf,
        /// Insert quarters before starting; without it the game runs as shipped
        #[arg(long)]
        free_play: bool,
    },
}

fn parse_assignment(s: &str) -> Result<(usize, i64), String> {
    let (addr, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ADDR=VALUE, got {}", s))?;
    let addr = addr.trim().parse().map_err(|e| format!("bad address {:?}: {}", addr, e))?;
    let value = value.trim().parse().map_err(|e| format!("bad value {:?}: {}", value, e))?;
    Ok((addr, value))
}

/// Overwrite memory cells before the run; an address past the limit is an error.
fn apply_sets(process: &mut Process, sets: &[(usize, i64)]) -> IntcodeResult<()> {
    for &(addr, value) in sets {
        process.memory_mut().store(addr, value).map_err(|fault| IntcodeError::Fault {
            process: process.name().to_string(),
            pc: process.pc(),
            fault,
        })?;
    }
    Ok(())
}

fn load(path: &Path) -> Result<Program> {
    ProgramLoader::load_file(path).with_context(|| format!("failed to load {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = IntcodeConfig::new().with_instruction_set(cli.instruction_set);
    if let Some(limit) = cli.max_memory {
        config.max_memory_cells = limit;
    }
    config.tolerate_exhausted_input = cli.tolerate_exhausted_input;

    match cli.command {
        Commands::Run { program, inputs, sets, dumps } => {
            let program = load(&program)?;
            let run =
                run_patched_pipe(&program, &config, &inputs, |process| apply_sets(process, &sets))?;
            info!(steps = run.process.summary().steps, "run finished");
            for value in run.outputs {
                println!("{}", value);
            }
            for addr in dumps {
                match run.process.memory().get(addr) {
                    Some(value) => println!("[{}] = {}", addr, value),
                    None => println!("[{}] = 0", addr),
                }
            }
        }

        Commands::Ring { program, phases, seed } => {
            let program = load(&program)?;
            let result = run_ring(&program, &config, &phases, seed)?;
            println!("{}", result);
        }

        Commands::Paint { program, start_color } => {
            if start_color != 0 && start_color != 1 {
                bail!("start color must be 0 or 1, got {}", start_color);
            }
            let program = load(&program)?;
            let robot = paint_hull(&program, &config, start_color)?;
            println!("painted panels: {}", robot.painted_panels());
            println!("{}", robot.render());
        }

        Commands::Arcade { program, free_play } => {
            let program = load(&program)?;
            let pilot = play_arcade(&program, &config, free_play)?;
            println!("score: {}", pilot.score());
            println!("blocks left: {}", pilot.blocks());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use intcode_core::Fault;

    #[test]
    fn assignment_parses() {
        assert_eq!(parse_assignment("1=12"), Ok((1, 12)));
        assert_eq!(parse_assignment(" 2 = -7 "), Ok((2, -7)));
        assert!(parse_assignment("12").is_err());
        assert!(parse_assignment("-1=3").is_err());
    }

    #[test]
    fn cli_accepts_ring_phases() {
        let cli = Cli::try_parse_from([
            "intcode", "ring", "amp.txt", "--phases", "9,8,7,6,5", "--instruction-set", "alu",
        ])
        .expect("parse failed");
        assert_eq!(cli.instruction_set, InstructionSet::Alu);
        match cli.command {
            Commands::Ring { phases, seed, .. } => {
                assert_eq!(phases, vec![9, 8, 7, 6, 5]);
                assert_eq!(seed, 0);
            }
            _ => panic!("expected ring command"),
        }
    }

    #[test]
    fn cli_accepts_run_options() {
        let cli = Cli::try_parse_from([
            "intcode", "run", "diag.txt", "-i", "5", "--input", "-2", "--set", "1=12", "--dump", "0",
        ])
        .expect("parse failed");
        match cli.command {
            Commands::Run { inputs, sets, dumps, .. } => {
                assert_eq!(inputs, vec![5, -2]);
                assert_eq!(sets, vec![(1, 12)]);
                assert_eq!(dumps, vec![0]);
            }
            _ => panic!("expected run command"),
        }
    }

    #[test]
    fn cli_accepts_arcade_free_play() {
        let cli = Cli::try_parse_from(["intcode", "arcade", "game.txt", "--free-play"])
            .expect("parse failed");
        assert!(matches!(cli.command, Commands::Arcade { free_play: true, .. }));

        let cli = Cli::try_parse_from(["intcode", "arcade", "game.txt"]).expect("parse failed");
        assert!(matches!(cli.command, Commands::Arcade { free_play: false, .. }));
    }

    #[test]
    fn sets_past_memory_limit_are_rejected() {
        let mut config = IntcodeConfig::new();
        config.max_memory_cells = 4;
        let program = Program::from(vec![99]);

        let mut process = Process::new("pipe", config.clone(), &program);
        apply_sets(&mut process, &[(2, 7)]).unwrap();
        assert_eq!(process.memory().get(2), Some(7));

        let mut process = Process::new("pipe", config, &program);
        let err = apply_sets(&mut process, &[(0, 1), (4, 1)]).unwrap_err();
        assert_eq!(err.fault(), Some(&Fault::MemoryLimit { address: 4, limit: 4 }));
    }
}
