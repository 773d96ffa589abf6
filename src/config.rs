use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{DisplayGeometry, TargetConfig};
use crate::error::ConfigError;

/// Encoder quality for lossy frame formats; always maximum
pub const FRAME_QUALITY: u8 = 100;

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Initial canvas width in logical pixels
    pub logical_width: f32,
    /// Initial canvas height in logical pixels
    pub logical_height: f32,
    /// MSAA sample count of the offscreen target
    pub samples: u32,
    /// Attach a depth buffer to the offscreen target
    pub depth_buffer: bool,
    /// Clear color (r, g, b, a) in 0..=1
    pub clear_color: [f64; 4],
    /// Forced pixel ratio applied from the first frame
    pub pixel_ratio_override: Option<f32>,
    /// Initial style scale
    pub scale: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            logical_width: 1280.0,
            logical_height: 1024.0,
            samples: 4,
            depth_buffer: true,
            clear_color: [0.0, 0.0, 0.0, 1.0],
            pixel_ratio_override: None,
            scale: 1.0,
        }
    }
}

impl SessionConfig {
    /// Load from a JSON file; missing fields take defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn quality(&self) -> u8 {
        FRAME_QUALITY
    }

    pub fn target_config(&self) -> TargetConfig {
        TargetConfig {
            sample_count: self.samples.max(1),
            depth_format: self
                .depth_buffer
                .then_some(wgpu::TextureFormat::Depth24Plus),
            ..TargetConfig::default()
        }
    }

    /// Geometry at session start: configured size, override or 1.0 ratio
    pub fn initial_geometry(&self) -> DisplayGeometry {
        DisplayGeometry::new(
            self.logical_width,
            self.logical_height,
            self.pixel_ratio_override.unwrap_or(1.0),
        )
    }

    pub fn clear_color(&self) -> wgpu::Color {
        let [r, g, b, a] = self.clear_color;
        wgpu::Color { r, g, b, a }
    }
}
