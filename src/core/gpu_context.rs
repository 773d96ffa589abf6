use std::sync::Arc;
use wgpu::{Adapter, Buffer, Device, DeviceDescriptor, Features, Instance, Limits, Queue};

use super::readback::ReadbackOrigin;
use crate::error::{RenderError, Result};

/// Multisample/depth configuration of the hidden render surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetConfig {
    /// MSAA sample count (1 disables multisampling)
    pub sample_count: u32,
    /// Depth attachment, if any
    pub depth_format: Option<wgpu::TextureFormat>,
    /// Color format of the offscreen target
    pub color_format: wgpu::TextureFormat,
    /// Row order of the backend's texture readback
    pub readback_origin: ReadbackOrigin,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            sample_count: 4,
            depth_format: Some(wgpu::TextureFormat::Depth24Plus),
            color_format: wgpu::TextureFormat::Rgba8Unorm,
            // wgpu copies texture rows top first on every backend
            readback_origin: ReadbackOrigin::TopLeft,
        }
    }
}

/// Shared headless GPU context
///
/// Device and Queue are behind Arc so a context can be cloned cheaply and
/// handed to several sessions.
#[derive(Clone)]
pub struct GpuContext {
    adapter: Arc<Adapter>,
    device: Arc<Device>,
    queue: Arc<Queue>,
}

impl GpuContext {
    /// Create a new GPU context without a surface (for offscreen rendering)
    pub async fn new() -> Result<Self> {
        let instance = Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let adapter = Self::request_adapter_headless(&instance).await?;
        let info = adapter.get_info();
        log::info!("Using adapter {} ({:?})", info.name, info.backend);

        let (device, queue) = Self::request_device(&adapter).await?;

        Ok(Self {
            adapter: Arc::new(adapter),
            device: Arc::new(device),
            queue: Arc::new(queue),
        })
    }

    /// Blocking constructor for non-async callers
    pub fn new_blocking() -> Result<Self> {
        pollster::block_on(Self::new())
    }

    /// Get reference to the device
    pub fn device(&self) -> &Device {
        &self.device
    }

    /// Get reference to the queue
    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    /// Largest texture edge the device accepts
    pub fn max_texture_side(&self) -> u32 {
        self.device.limits().max_texture_dimension_2d
    }

    /// Clamp a requested sample count to one the device supports for `format`
    pub fn supported_sample_count(&self, format: wgpu::TextureFormat, requested: u32) -> u32 {
        if requested <= 1 {
            return 1;
        }
        let flags = self.adapter.get_texture_format_features(format).flags;
        // Without the adapter-specific feature only 1 and 4 are guaranteed.
        let adapter_specific = self
            .device
            .features()
            .contains(Features::TEXTURE_ADAPTER_SPECIFIC_FORMAT_FEATURES);

        [16, 8, 4, 2]
            .into_iter()
            .filter(|&count| count <= requested)
            .find(|&count| {
                flags.sample_count_supported(count) && (adapter_specific || count == 4)
            })
            .unwrap_or(1)
    }

    /// Synchronously read data from a mapped buffer
    ///
    /// Blocks the current thread until the device has finished all submitted
    /// work, then copies the whole buffer out and unmaps it.
    pub fn read_buffer_sync(&self, buffer: &Buffer) -> Result<Vec<u8>> {
        let buffer_slice = buffer.slice(..);

        let (sender, receiver) = std::sync::mpsc::channel();
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            sender.send(result).ok();
        });

        self.device
            .poll(wgpu::PollType::Wait {
                submission_index: None,
                timeout: None,
            })
            .map_err(|e| RenderError::Readback(format!("Device poll failed: {:?}", e)))?;

        match receiver.recv() {
            Ok(Ok(())) => {
                let data = buffer_slice.get_mapped_range();
                let result = data.to_vec();
                drop(data);
                buffer.unmap();
                Ok(result)
            }
            Ok(Err(e)) => Err(RenderError::Readback(format!("Buffer mapping failed: {:?}", e))),
            Err(_) => Err(RenderError::Readback(
                "Channel closed before receiving result".into(),
            )),
        }
    }

    /// Run `f` inside a validation error scope, turning a reported error into `Err`
    pub fn validated<T>(&self, f: impl FnOnce(&Device) -> T) -> std::result::Result<T, String> {
        self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let value = f(&self.device);
        match pollster::block_on(self.device.pop_error_scope()) {
            Some(error) => Err(error.to_string()),
            None => Ok(value),
        }
    }

    /// Request adapter without surface (headless)
    async fn request_adapter_headless(instance: &Instance) -> Result<Adapter> {
        instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| RenderError::Adapter(format!("{:?}", e)))
    }

    /// Request device and queue
    async fn request_device(adapter: &Adapter) -> Result<(Device, Queue)> {
        let supported_features = adapter.features();
        let mut requested_features = Features::empty();

        // Needed for sample counts other than 1 and 4
        if supported_features.contains(Features::TEXTURE_ADAPTER_SPECIFIC_FORMAT_FEATURES) {
            requested_features |= Features::TEXTURE_ADAPTER_SPECIFIC_FORMAT_FEATURES;
        }

        let limits = Limits::downlevel_defaults().using_resolution(adapter.limits());

        adapter
            .request_device(&DeviceDescriptor {
                label: Some("Offscreen GUI Device"),
                required_features: requested_features,
                required_limits: limits,
                memory_hints: Default::default(),
                experimental_features: Default::default(),
                trace: Default::default(),
            })
            .await
            .map_err(|e| RenderError::Device(format!("{:?}", e)))
    }
}
