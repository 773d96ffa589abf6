// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

use crate::config::SessionConfig;
use crate::error::ConfigError;
use crate::sink::ImageFormat;

#[derive(Parser, Debug, Clone)]
#[command(name = "offscreen-gui")]
#[command(about = "Render an egui panel offscreen and write the frames to disk", long_about = None)]
pub struct Cli {
    /// Session configuration file (JSON)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Logical canvas width
    #[arg(long)]
    pub width: Option<f32>,

    /// Logical canvas height
    #[arg(long)]
    pub height: Option<f32>,

    /// Force the pixel ratio, ignoring ratios reported by resize events
    #[arg(long = "pixel-ratio")]
    pub pixel_ratio: Option<f32>,

    /// Style scale factor
    #[arg(long)]
    pub scale: Option<f32>,

    /// MSAA sample count
    #[arg(long)]
    pub samples: Option<u32>,

    /// Remote events to replay, one JSON object per line
    #[arg(long)]
    pub events: Option<PathBuf>,

    /// Frames to render after the events are replayed
    #[arg(long, default_value_t = 1)]
    pub frames: u32,

    /// Directory the frames are written to
    #[arg(long, default_value = "frames")]
    pub output: PathBuf,

    /// Image format of written frames
    #[arg(long, value_enum, default_value_t = ImageFormat::Png)]
    pub format: ImageFormat,
}

impl Cli {
    /// Configuration file (or defaults) with command-line overrides applied
    pub fn session_config(&self) -> Result<SessionConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => SessionConfig::from_json_file(path)?,
            None => SessionConfig::default(),
        };

        if let Some(width) = self.width {
            config.logical_width = width;
        }
        if let Some(height) = self.height {
            config.logical_height = height;
        }
        if let Some(ratio) = self.pixel_ratio {
            config.pixel_ratio_override = Some(ratio);
        }
        if let Some(scale) = self.scale {
            config.scale = scale;
        }
        if let Some(samples) = self.samples {
            config.samples = samples;
        }

        Ok(config)
    }
}
