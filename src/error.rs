use thiserror::Error;

/// Errors raised by the offscreen render pipeline.
///
/// Every variant is fatal for the frame (or session) that produced it; nothing
/// in the pipeline retries.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to find appropriate adapter: {0}")]
    Adapter(String),

    #[error("Failed to create device: {0}")]
    Device(String),

    #[error("Framebuffer is not complete ({width}x{height}): {reason}")]
    IncompleteFramebuffer {
        width: u32,
        height: u32,
        reason: String,
    },

    #[error("A framebuffer target is already live; destroy it before creating another")]
    TargetAlreadyLive,

    #[error("No live framebuffer target to render into")]
    NoLiveTarget,

    #[error("GPU error: {0}")]
    Gpu(String),

    #[error("Readback failed: {0}")]
    Readback(String),
}

/// Errors raised while decoding an inbound event payload.
#[derive(Debug, Error)]
pub enum EventError {
    #[error("Malformed event payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Errors raised while loading a session configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;
