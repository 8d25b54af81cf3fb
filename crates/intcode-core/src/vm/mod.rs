pub mod memory;
pub mod process;

pub use memory::Memory;
pub use process::{Process, RunSummary, StopHandle};
