use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::FRAME_QUALITY;
use crate::core::Frame;
use crate::traits::FrameSink;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Frame {0} has an invalid pixel buffer")]
    InvalidFrame(u64),

    #[error("Failed to create {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to encode frame: {0}")]
    Encode(#[from] image::ImageError),
}

/// Encoding of written frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ImageFormat {
    #[default]
    Png,
    Jpeg,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
        }
    }
}

/// Writes every frame to `<dir>/frame_<number>.<ext>`
pub struct ImageFileSink {
    dir: PathBuf,
    format: ImageFormat,
    written: Vec<PathBuf>,
}

impl ImageFileSink {
    /// Create the sink, making `dir` if needed
    pub fn new(dir: impl Into<PathBuf>, format: ImageFormat) -> Result<Self, SinkError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| SinkError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self {
            dir,
            format,
            written: Vec::new(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths written so far, oldest first
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn path_for(&self, frame: &Frame) -> PathBuf {
        self.dir
            .join(format!("frame_{:05}.{}", frame.number, self.format.extension()))
    }
}

impl FrameSink for ImageFileSink {
    type Error = SinkError;

    fn present(&mut self, frame: &Frame) -> Result<(), SinkError> {
        let image = frame
            .clone()
            .into_image()
            .ok_or(SinkError::InvalidFrame(frame.number))?;
        let path = self.path_for(frame);

        match self.format {
            ImageFormat::Png => image.save_with_format(&path, image::ImageFormat::Png)?,
            ImageFormat::Jpeg => {
                let file = std::fs::File::create(&path).map_err(|source| SinkError::Io {
                    path: path.clone(),
                    source,
                })?;
                let mut writer = std::io::BufWriter::new(file);
                let encoder =
                    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut writer, FRAME_QUALITY);
                image.write_with_encoder(encoder)?;
            }
        }

        log::debug!("Wrote {}", path.display());
        self.written.push(path);
        Ok(())
    }
}
