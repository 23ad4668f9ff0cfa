pub mod control;
pub mod core;
pub mod simulation;
pub mod ui;

// Re-export key items
pub use control::*;
pub use core::*;
pub use simulation::*;
