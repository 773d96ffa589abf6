use super::clock::FrameClock;
use super::event::RemoteEvent;
use super::frame::Frame;
use super::framebuffer::FramebufferManager;
use super::geometry::{sanitize_ratio, DisplayGeometry};
use super::gpu_context::GpuContext;
use super::gui_driver::GuiDriver;
use super::input::InputState;
use super::readback::{pack_rgb, to_top_left, ChannelOrder};
use super::translator::{resolve_pixel_ratio, translate, Transition};
use crate::config::SessionConfig;
use crate::error::{RenderError, Result};
use crate::traits::Gui;

/// One remote GUI: hidden render target, egui state and input, driven by
/// events and rendered on demand
pub struct GuiSession<G: Gui> {
    gpu: GpuContext,
    geometry: DisplayGeometry,
    framebuffer: FramebufferManager,
    driver: GuiDriver,
    input: InputState,
    clock: FrameClock,
    gui: G,
    ratio_override: Option<f32>,
    last_reported_ratio: Option<f32>,
    needs_redraw: bool,
    clear_color: wgpu::Color,
    frames_rendered: u64,
}

impl<G: Gui> GuiSession<G> {
    /// Create the session and its target at the configured initial size
    pub fn new(gpu: GpuContext, config: &SessionConfig, gui: G) -> Result<Self> {
        let geometry = config.initial_geometry();

        let mut framebuffer = FramebufferManager::new(gpu.clone(), config.target_config());
        framebuffer.create(geometry.physical_size())?;

        let mut driver = GuiDriver::new(gpu.device(), &framebuffer.config(), geometry);
        driver.set_scale(config.scale);

        Ok(Self {
            gpu,
            geometry,
            framebuffer,
            driver,
            input: InputState::new(),
            clock: FrameClock::new(),
            gui,
            ratio_override: config.pixel_ratio_override.map(sanitize_ratio),
            last_reported_ratio: None,
            needs_redraw: true,
            clear_color: config.clear_color(),
            frames_rendered: 0,
        })
    }

    /// Apply one inbound event
    ///
    /// Only a resize can fail, when the new target cannot be allocated.
    pub fn handle_event(&mut self, event: &RemoteEvent) -> Result<Transition> {
        let transition = translate(&mut self.input, event, self.ratio_override);
        match transition {
            Transition::Ignored => {}
            Transition::Redraw => self.needs_redraw = true,
            Transition::Resize {
                geometry,
                reported_ratio,
            } => {
                self.last_reported_ratio = reported_ratio;
                self.apply_geometry(geometry)?;
            }
        }
        Ok(transition)
    }

    /// Pin the pixel ratio, replaying the current logical size
    pub fn force_pixel_ratio(&mut self, ratio: f32) -> Result<()> {
        self.ratio_override = Some(sanitize_ratio(ratio));
        self.replay_resize()
    }

    /// Drop the override and fall back to the client's last reported ratio
    pub fn clear_pixel_ratio_override(&mut self) -> Result<()> {
        self.ratio_override = None;
        self.replay_resize()
    }

    pub fn pixel_ratio_override(&self) -> Option<f32> {
        self.ratio_override
    }

    fn replay_resize(&mut self) -> Result<()> {
        let (width, height) = self.geometry.logical_size();
        let ratio = resolve_pixel_ratio(self.ratio_override, self.last_reported_ratio);
        self.apply_geometry(DisplayGeometry::new(width, height, ratio))
    }

    fn apply_geometry(&mut self, geometry: DisplayGeometry) -> Result<()> {
        let current = self.framebuffer.target().map(|target| target.size());

        if let Some(physical_size) = reallocation_size(current, &geometry) {
            let (width, height) = geometry.logical_size();
            log::info!(
                "Resize to {}x{} logical @ {} -> {}x{} physical",
                width,
                height,
                geometry.pixel_ratio,
                physical_size.0,
                physical_size.1
            );
            self.framebuffer.recreate(physical_size)?;
        }

        self.geometry = geometry;
        self.driver.set_display(geometry);
        self.needs_redraw = true;
        Ok(())
    }

    /// Scale every size-valued style attribute and font from the base style
    ///
    /// A factor that is not finite and positive leaves the style unchanged.
    pub fn set_scale(&mut self, factor: f32) {
        if self.driver.set_scale(factor) {
            self.needs_redraw = true;
        }
    }

    pub fn scale(&self) -> f32 {
        self.driver.scale()
    }

    /// Render one frame and read it back as packed RGB, top-left origin
    pub fn render_frame(&mut self) -> Result<Frame> {
        let gpu = &self.gpu;
        let target = self.framebuffer.live_target()?;

        let delta = self.clock.tick();
        self.input.set_delta_time(delta);
        let time = self.clock.elapsed();

        let draw_list = self.driver.run_frame(
            &self.input,
            time,
            gpu.max_texture_side() as usize,
            &mut self.gui,
        );

        let (width, height) = target.size();
        let driver = &mut self.driver;
        let clear_color = self.clear_color;

        gpu.validated(|device| {
            let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Offscreen Frame Encoder"),
            });

            let user_buffers = driver.paint(
                device,
                gpu.queue(),
                &mut encoder,
                target,
                &draw_list,
                clear_color,
            );

            encoder.copy_texture_to_buffer(
                wgpu::TexelCopyTextureInfo {
                    texture: target.color_texture(),
                    mip_level: 0,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                wgpu::TexelCopyBufferInfo {
                    buffer: target.staging_buffer(),
                    layout: wgpu::TexelCopyBufferLayout {
                        offset: 0,
                        bytes_per_row: Some(target.padded_bytes_per_row()),
                        rows_per_image: Some(height),
                    },
                },
                wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
            );

            gpu.queue().submit(
                user_buffers
                    .into_iter()
                    .chain(std::iter::once(encoder.finish())),
            );
        })
        .map_err(RenderError::Gpu)?;

        let raw = gpu.read_buffer_sync(target.staging_buffer())?;
        let order = ChannelOrder::of(self.framebuffer.config().color_format);
        let mut pixels = pack_rgb(&raw, width, height, target.padded_bytes_per_row(), order);
        to_top_left(
            &mut pixels,
            width,
            height,
            self.framebuffer.config().readback_origin,
        );

        let frame = Frame::new(self.frames_rendered, time, delta, width, height, pixels);
        self.frames_rendered += 1;
        self.needs_redraw = false;
        Ok(frame)
    }

    /// Whether an event since the last frame asked for a redraw; clears the flag
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    pub fn geometry(&self) -> DisplayGeometry {
        self.geometry
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Size of the live target, if any
    pub fn target_size(&self) -> Option<(u32, u32)> {
        self.framebuffer.target().map(|target| target.size())
    }

    /// Targets allocated over the session's lifetime
    pub fn framebuffer_allocations(&self) -> u64 {
        self.framebuffer.allocations()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    pub fn context(&self) -> &egui::Context {
        self.driver.context()
    }

    pub fn gui(&self) -> &G {
        &self.gui
    }

    pub fn gui_mut(&mut self) -> &mut G {
        &mut self.gui
    }

    /// Release the target; the session is unusable afterwards
    pub fn close(mut self) {
        self.framebuffer.destroy();
        log::info!("Session closed after {} frames", self.frames_rendered);
    }
}

/// Physical size to allocate for `geometry`, or None when the live target
/// already has it
pub fn reallocation_size(
    current: Option<(u32, u32)>,
    geometry: &DisplayGeometry,
) -> Option<(u32, u32)> {
    let physical_size = geometry.physical_size();
    (current != Some(physical_size)).then_some(physical_size)
}
