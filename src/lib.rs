pub mod cli;
pub mod config;
pub mod core;
pub mod demo;
pub mod error;
pub mod sink;
pub mod traits;

pub use crate::config::SessionConfig;
pub use crate::core::{Frame, GpuContext, GuiSession, RemoteEvent};
pub use crate::error::{ConfigError, EventError, RenderError, Result};
pub use crate::traits::{FrameSink, Gui};
