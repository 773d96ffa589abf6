//! Uniform scaling of egui's size-valued style attributes.
//!
//! egui has no `ScaleAllSizes`; this walks the spacing, visuals and interaction
//! sizes explicitly. Scaling always starts from the style captured when the
//! scaler was created, so applying a factor is idempotent.

use std::sync::Arc;

/// Base style/fonts plus the currently applied factor
#[derive(Clone)]
pub struct StyleScaler {
    base_style: Arc<egui::Style>,
    base_fonts: egui::FontDefinitions,
    scale: f32,
}

impl StyleScaler {
    /// Capture the context's current style as the base
    pub fn capture(ctx: &egui::Context) -> Self {
        Self::from_base(ctx.style(), egui::FontDefinitions::default())
    }

    pub fn from_base(base_style: Arc<egui::Style>, base_fonts: egui::FontDefinitions) -> Self {
        Self {
            base_style,
            base_fonts,
            scale: 1.0,
        }
    }

    pub fn base_style(&self) -> &egui::Style {
        &self.base_style
    }

    /// Factor of the last `apply`
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Base style scaled by `factor`
    pub fn scaled_style(&self, factor: f32) -> egui::Style {
        let mut style = (*self.base_style).clone();
        scale_all_sizes(&mut style, factor, factor);
        scale_fonts(&mut style, factor);
        style
    }

    /// Font definitions installed for `factor`
    ///
    /// Any factor other than 1.0 carries a marker family named after it, so
    /// the definitions differ per factor and egui rebuilds the atlas.
    pub fn font_definitions(&self, factor: f32) -> egui::FontDefinitions {
        let mut fonts = self.base_fonts.clone();
        if factor != 1.0 {
            let proportional = fonts
                .families
                .get(&egui::FontFamily::Proportional)
                .cloned()
                .unwrap_or_default();
            fonts.families.insert(
                egui::FontFamily::Name(format!("{}{}", SCALE_FAMILY_PREFIX, factor).into()),
                proportional,
            );
        }
        fonts
    }

    /// Install the scaled style on `ctx` and rebuild the font atlas
    ///
    /// Factors that are not finite and positive are ignored; returns whether
    /// the factor was applied.
    pub fn apply(&mut self, ctx: &egui::Context, factor: f32) -> bool {
        if !is_valid_scale(factor) {
            log::debug!("Ignoring style scale {}", factor);
            return false;
        }

        ctx.set_style(self.scaled_style(factor));
        ctx.set_fonts(self.font_definitions(factor));
        self.scale = factor;
        log::info!("Style scale set to {}", factor);
        true
    }
}

/// Prefix of the marker font family carrying the applied scale
const SCALE_FAMILY_PREFIX: &str = "scale@";

/// Scales must be finite and positive; anything else breaks glyph layout
pub fn is_valid_scale(factor: f32) -> bool {
    factor.is_finite() && factor > 0.0
}

fn scale_all_sizes(style: &mut egui::Style, hscale: f32, vscale: f32) {
    let scale = hscale.max(vscale);
    let scalar = |value: &mut f32| *value = (*value * scale).trunc();
    let vec2 = |value: &mut egui::Vec2| {
        value.x = (value.x * hscale).trunc();
        value.y = (value.y * vscale).trunc();
    };
    let margin = |value: &mut egui::Margin| {
        value.left = (value.left as f32 * hscale).trunc() as i8;
        value.right = (value.right as f32 * hscale).trunc() as i8;
        value.top = (value.top as f32 * vscale).trunc() as i8;
        value.bottom = (value.bottom as f32 * vscale).trunc() as i8;
    };
    let corner = |value: &mut egui::CornerRadius| {
        for radius in [&mut value.nw, &mut value.ne, &mut value.sw, &mut value.se] {
            *radius = (*radius as f32 * scale).trunc() as u8;
        }
    };

    let spacing = &mut style.spacing;
    vec2(&mut spacing.item_spacing);
    margin(&mut spacing.window_margin);
    vec2(&mut spacing.button_padding);
    margin(&mut spacing.menu_margin);
    scalar(&mut spacing.indent);
    vec2(&mut spacing.interact_size);
    scalar(&mut spacing.slider_width);
    scalar(&mut spacing.combo_width);
    scalar(&mut spacing.text_edit_width);
    scalar(&mut spacing.icon_width);
    scalar(&mut spacing.icon_width_inner);
    scalar(&mut spacing.icon_spacing);
    scalar(&mut spacing.tooltip_width);
    scalar(&mut spacing.combo_height);
    vec2(&mut spacing.default_area_size);
    scalar(&mut spacing.menu_width);
    scalar(&mut spacing.menu_spacing);
    scalar(&mut spacing.scroll.bar_width);
    scalar(&mut spacing.scroll.handle_min_length);
    scalar(&mut spacing.scroll.bar_inner_margin);
    scalar(&mut spacing.scroll.bar_outer_margin);
    scalar(&mut spacing.scroll.floating_width);
    scalar(&mut spacing.scroll.floating_allocated_width);

    let visuals = &mut style.visuals;
    corner(&mut visuals.window_corner_radius);
    corner(&mut visuals.menu_corner_radius);
    scalar(&mut visuals.resize_corner_size);
    scalar(&mut visuals.clip_rect_margin);
    for widget in [
        &mut visuals.widgets.noninteractive,
        &mut visuals.widgets.inactive,
        &mut visuals.widgets.hovered,
        &mut visuals.widgets.active,
        &mut visuals.widgets.open,
    ] {
        corner(&mut widget.corner_radius);
    }

    scalar(&mut style.interaction.interact_radius);
    scalar(&mut style.interaction.resize_grab_radius_side);
    scalar(&mut style.interaction.resize_grab_radius_corner);
}

fn scale_fonts(style: &mut egui::Style, factor: f32) {
    for font_id in style.text_styles.values_mut() {
        font_id.size *= factor;
    }
}

/// Named size attributes of a style, flattened to scalars
///
/// Two-dimensional attributes contribute one entry per axis.
pub fn size_attributes(style: &egui::Style) -> Vec<(&'static str, f32)> {
    let spacing = &style.spacing;
    let visuals = &style.visuals;
    vec![
        ("item_spacing.x", spacing.item_spacing.x),
        ("item_spacing.y", spacing.item_spacing.y),
        ("window_margin.left", spacing.window_margin.left as f32),
        ("window_margin.top", spacing.window_margin.top as f32),
        ("button_padding.x", spacing.button_padding.x),
        ("button_padding.y", spacing.button_padding.y),
        ("menu_margin.left", spacing.menu_margin.left as f32),
        ("indent", spacing.indent),
        ("interact_size.x", spacing.interact_size.x),
        ("interact_size.y", spacing.interact_size.y),
        ("slider_width", spacing.slider_width),
        ("combo_width", spacing.combo_width),
        ("text_edit_width", spacing.text_edit_width),
        ("icon_width", spacing.icon_width),
        ("icon_width_inner", spacing.icon_width_inner),
        ("icon_spacing", spacing.icon_spacing),
        ("tooltip_width", spacing.tooltip_width),
        ("combo_height", spacing.combo_height),
        ("default_area_size.x", spacing.default_area_size.x),
        ("default_area_size.y", spacing.default_area_size.y),
        ("menu_width", spacing.menu_width),
        ("menu_spacing", spacing.menu_spacing),
        ("scroll.bar_width", spacing.scroll.bar_width),
        ("scroll.floating_width", spacing.scroll.floating_width),
        (
            "scroll.floating_allocated_width",
            spacing.scroll.floating_allocated_width,
        ),
        ("window_corner_radius.nw", visuals.window_corner_radius.nw as f32),
        ("menu_corner_radius.nw", visuals.menu_corner_radius.nw as f32),
        ("resize_corner_size", visuals.resize_corner_size),
        ("clip_rect_margin", visuals.clip_rect_margin),
        ("interact_radius", style.interaction.interact_radius),
        (
            "resize_grab_radius_side",
            style.interaction.resize_grab_radius_side,
        ),
        (
            "resize_grab_radius_corner",
            style.interaction.resize_grab_radius_corner,
        ),
    ]
}
