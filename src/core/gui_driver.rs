use super::framebuffer::FramebufferTarget;
use super::geometry::DisplayGeometry;
use super::gpu_context::TargetConfig;
use super::input::{InputState, RawInputBuilder};
use super::style::StyleScaler;
use crate::traits::Gui;

/// Tessellated output of one GUI pass
pub struct DrawList {
    pub primitives: Vec<egui::ClippedPrimitive>,
    pub textures_delta: egui::TexturesDelta,
    pub pixels_per_point: f32,
}

impl DrawList {
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}

/// egui context plus its wgpu renderer, owned per session
pub struct GuiDriver {
    ctx: egui::Context,
    renderer: egui_wgpu::Renderer,
    input: RawInputBuilder,
    style: StyleScaler,
    geometry: DisplayGeometry,
}

impl GuiDriver {
    pub fn new(device: &wgpu::Device, target: &TargetConfig, geometry: DisplayGeometry) -> Self {
        let ctx = egui::Context::default();
        let style = StyleScaler::capture(&ctx);
        let renderer = egui_wgpu::Renderer::new(
            device,
            target.color_format,
            egui_wgpu::RendererOptions {
                msaa_samples: target.sample_count,
                depth_stencil_format: target.depth_format,
                ..Default::default()
            },
        );

        Self {
            ctx,
            renderer,
            input: RawInputBuilder::new(),
            style,
            geometry,
        }
    }

    pub fn context(&self) -> &egui::Context {
        &self.ctx
    }

    pub fn geometry(&self) -> DisplayGeometry {
        self.geometry
    }

    /// New logical size and ratio take effect on the next frame
    pub fn set_display(&mut self, geometry: DisplayGeometry) {
        self.geometry = geometry;
    }

    /// Returns false when the factor was rejected
    pub fn set_scale(&mut self, factor: f32) -> bool {
        self.style.apply(&self.ctx, factor)
    }

    pub fn scale(&self) -> f32 {
        self.style.scale()
    }

    /// Start a pass with the current input, geometry and frame time
    pub fn begin_frame(&mut self, input: &InputState, time: f64, max_texture_side: usize) {
        let raw_input = self
            .input
            .build(input, &self.geometry, time, max_texture_side);
        self.ctx.begin_pass(raw_input);
    }

    /// Finish the pass and tessellate its shapes
    pub fn end_frame(&mut self) -> DrawList {
        let full_output = self.ctx.end_pass();

        let pixels_per_point = full_output.pixels_per_point;
        let primitives = self.ctx.tessellate(full_output.shapes, pixels_per_point);

        DrawList {
            primitives,
            textures_delta: full_output.textures_delta,
            pixels_per_point,
        }
    }

    /// begin_frame, widget callback, end_frame
    pub fn run_frame(
        &mut self,
        input: &InputState,
        time: f64,
        max_texture_side: usize,
        gui: &mut dyn Gui,
    ) -> DrawList {
        self.begin_frame(input, time, max_texture_side);
        gui.draw(&self.ctx);
        self.end_frame()
    }

    /// Record the draw list into `target`, clearing it first
    ///
    /// Returns command buffers produced by paint callbacks; they must be
    /// submitted before `encoder`.
    pub fn paint(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        target: &FramebufferTarget,
        draw_list: &DrawList,
        clear_color: wgpu::Color,
    ) -> Vec<wgpu::CommandBuffer> {
        for (id, image_delta) in &draw_list.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, image_delta);
        }

        let (width, height) = target.size();
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [width, height],
            pixels_per_point: draw_list.pixels_per_point,
        };

        let user_buffers = self.renderer.update_buffers(
            device,
            queue,
            encoder,
            &draw_list.primitives,
            &screen_descriptor,
        );

        {
            let (view, resolve_target) = target.attachment_views();
            let depth_stencil_attachment =
                target
                    .depth_view()
                    .map(|view| wgpu::RenderPassDepthStencilAttachment {
                        view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Discard,
                        }),
                        stencil_ops: None,
                    });

            let mut render_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui Offscreen Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
                        resolve_target,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(clear_color),
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment,
                    occlusion_query_set: None,
                    timestamp_writes: None,
                })
                .forget_lifetime();

            let viewport = target.viewport();
            render_pass.set_viewport(
                viewport.x as f32,
                viewport.y as f32,
                viewport.width as f32,
                viewport.height as f32,
                0.0,
                1.0,
            );

            self.renderer
                .render(&mut render_pass, &draw_list.primitives, &screen_descriptor);
        }

        for id in &draw_list.textures_delta.free {
            self.renderer.free_texture(id);
        }

        user_buffers
    }
}
