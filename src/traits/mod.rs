pub mod gui;
pub mod sink;

pub use gui::*;
pub use sink::*;
