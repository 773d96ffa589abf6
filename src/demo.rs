use crate::traits::Gui;

/// Small widget panel used by the binary to exercise input and scaling
#[derive(Debug, Clone)]
pub struct DemoPanel {
    pub clicks: u32,
    pub value: f32,
    pub enabled: bool,
    pub text: String,
}

impl Default for DemoPanel {
    fn default() -> Self {
        Self {
            clicks: 0,
            value: 0.5,
            enabled: true,
            text: String::from("offscreen"),
        }
    }
}

impl Gui for DemoPanel {
    fn draw(&mut self, ctx: &egui::Context) {
        egui::Window::new("Offscreen GUI")
            .default_pos(egui::pos2(20.0, 20.0))
            .show(ctx, |ui| {
                ui.heading("Remote panel");
                ui.label(
                    egui::RichText::new(format!("{:.2} px/pt", ctx.pixels_per_point()))
                        .color(egui::Color32::from_rgb(74, 158, 255)),
                );

                match ctx.pointer_hover_pos() {
                    Some(pos) => ui.label(format!("Pointer: ({:.0}, {:.0})", pos.x, pos.y)),
                    None => ui.label("Pointer: -"),
                };

                ui.separator();
                ui.add(egui::Slider::new(&mut self.value, 0.0..=1.0).text("value"));
                if ui.button(format!("Clicked {} times", self.clicks)).clicked() {
                    self.clicks += 1;
                }
                ui.checkbox(&mut self.enabled, "enabled");
                ui.text_edit_singleline(&mut self.text);
            });
    }
}
