#[allow(clippy::module_inception)]
pub mod loader;

pub use loader::{Program, ProgramLoader};
