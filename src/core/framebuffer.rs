use wgpu::{Buffer, Texture, TextureView};

use super::gpu_context::{GpuContext, TargetConfig};
use super::readback::{padded_bytes_per_row, RGBA_BYTES_PER_PIXEL};
use crate::error::{RenderError, Result};

/// Viewport rectangle in physical pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Offscreen render destination sized to the physical display
///
/// GPU textures are immutable in size, so a target is never resized: it is
/// destroyed and a new one allocated.
pub struct FramebufferTarget {
    /// Single-sample color attachment; also the copy source for readback
    color: Texture,
    color_view: TextureView,
    /// Multisampled color attachment resolved into `color`
    msaa: Option<(Texture, TextureView)>,
    depth: Option<(Texture, TextureView)>,
    /// Staging buffer with rows padded to the copy alignment
    staging: Buffer,
    padded_row: u32,
    size: (u32, u32),
    viewport: Viewport,
}

impl FramebufferTarget {
    /// Physical size as (width, height)
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn padded_bytes_per_row(&self) -> u32 {
        self.padded_row
    }

    pub fn color_texture(&self) -> &Texture {
        &self.color
    }

    pub fn staging_buffer(&self) -> &Buffer {
        &self.staging
    }

    /// View to render into and, when multisampled, the view it resolves to
    pub fn attachment_views(&self) -> (&TextureView, Option<&TextureView>) {
        match &self.msaa {
            Some((_, msaa_view)) => (msaa_view, Some(&self.color_view)),
            None => (&self.color_view, None),
        }
    }

    pub fn depth_view(&self) -> Option<&TextureView> {
        self.depth.as_ref().map(|(_, view)| view)
    }

    fn release(self) {
        self.color.destroy();
        if let Some((texture, _)) = self.msaa {
            texture.destroy();
        }
        if let Some((texture, _)) = self.depth {
            texture.destroy();
        }
        self.staging.destroy();
    }
}

/// Owns the single live framebuffer target of a session
pub struct FramebufferManager {
    gpu: GpuContext,
    config: TargetConfig,
    target: Option<FramebufferTarget>,
    /// Number of targets allocated over the manager's lifetime
    allocations: u64,
}

impl FramebufferManager {
    /// Create a manager; the sample count is clamped to what the device supports
    pub fn new(gpu: GpuContext, config: TargetConfig) -> Self {
        let sample_count = gpu.supported_sample_count(config.color_format, config.sample_count);
        if sample_count != config.sample_count {
            log::warn!(
                "{}x multisampling unsupported for {:?}, using {}x",
                config.sample_count,
                config.color_format,
                sample_count
            );
        }

        Self {
            gpu,
            config: TargetConfig {
                sample_count,
                ..config
            },
            target: None,
            allocations: 0,
        }
    }

    /// Effective configuration (after sample count clamping)
    pub fn config(&self) -> TargetConfig {
        self.config
    }

    pub fn target(&self) -> Option<&FramebufferTarget> {
        self.target.as_ref()
    }

    /// Live target or `NoLiveTarget`
    pub fn live_target(&self) -> Result<&FramebufferTarget> {
        self.target.as_ref().ok_or_else(|| {
            log::error!("Render requested without a live framebuffer target");
            RenderError::NoLiveTarget
        })
    }

    pub fn is_live(&self) -> bool {
        self.target.is_some()
    }

    pub fn allocations(&self) -> u64 {
        self.allocations
    }

    /// Allocate a target of `physical_size`
    pub fn create(&mut self, physical_size: (u32, u32)) -> Result<()> {
        if self.target.is_some() {
            log::error!("Refusing to create a framebuffer target while one is live");
            return Err(RenderError::TargetAlreadyLive);
        }

        let (width, height) = physical_size;
        let max_side = self.gpu.max_texture_side();
        if width == 0 || height == 0 || width > max_side || height > max_side {
            return Err(RenderError::IncompleteFramebuffer {
                width,
                height,
                reason: format!("size must be within 1..={} per side", max_side),
            });
        }

        let config = self.config;
        let allocated = self
            .gpu
            .validated(|device| allocate(device, &config, width, height));

        let target = allocated.map_err(|reason| RenderError::IncompleteFramebuffer {
            width,
            height,
            reason,
        })?;

        log::info!(
            "Framebuffer target created: {}x{} ({}x MSAA, depth: {})",
            width,
            height,
            config.sample_count,
            config.depth_format.is_some()
        );

        self.target = Some(target);
        self.allocations += 1;
        Ok(())
    }

    /// Release the live target, if any
    pub fn destroy(&mut self) {
        if let Some(target) = self.target.take() {
            log::debug!("Framebuffer target destroyed: {:?}", target.size);
            target.release();
        }
    }

    /// Replace the live target with one of `physical_size`
    pub fn recreate(&mut self, physical_size: (u32, u32)) -> Result<()> {
        self.destroy();
        self.create(physical_size)
    }
}

impl Drop for FramebufferManager {
    fn drop(&mut self) {
        self.destroy();
    }
}

fn allocate(
    device: &wgpu::Device,
    config: &TargetConfig,
    width: u32,
    height: u32,
) -> FramebufferTarget {
    let size = wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    };

    let color = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Framebuffer Color Texture"),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: config.color_format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
        view_formats: &[],
    });
    let color_view = color.create_view(&wgpu::TextureViewDescriptor::default());

    let msaa = (config.sample_count > 1).then(|| {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Framebuffer MSAA Texture"),
            size,
            mip_level_count: 1,
            sample_count: config.sample_count,
            dimension: wgpu::TextureDimension::D2,
            format: config.color_format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        (texture, view)
    });

    let depth = config.depth_format.map(|format| {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Framebuffer Depth Texture"),
            size,
            mip_level_count: 1,
            sample_count: config.sample_count,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        (texture, view)
    });

    let padded_row = padded_bytes_per_row(width);
    let staging = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Framebuffer Readback Buffer"),
        size: padded_row as u64 * height as u64,
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    debug_assert!(padded_row >= width * RGBA_BYTES_PER_PIXEL);

    FramebufferTarget {
        color,
        color_view,
        msaa,
        depth,
        staging,
        padded_row,
        size: (width, height),
        viewport: Viewport {
            x: 0,
            y: 0,
            width,
            height,
        },
    }
}
