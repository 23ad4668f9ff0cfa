pub mod motor;
pub mod runner;

pub use motor::*;
pub use runner::*;
