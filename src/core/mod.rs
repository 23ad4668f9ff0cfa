pub mod history;
pub mod math;
pub mod param;

pub use history::*;
pub use math::*;
pub use param::*;
