//! Command implementations for tile-inspect
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod layers;
mod passage;
mod probe;

pub use layers::Layers;
pub use passage::Passage;
pub use probe::Probe;
