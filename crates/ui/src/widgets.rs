use meshview_common::{Color, ColorError};

/// A button that latches: each click flips the referenced bool.
pub struct ToggleButton<'a> {
    label: &'a str,
    on: &'a mut bool,
}

impl<'a> ToggleButton<'a> {
    pub fn new(label: &'a str, on: &'a mut bool) -> Self {
        Self { label, on }
    }
}

impl egui::Widget for ToggleButton<'_> {
    fn ui(self, ui: &mut egui::Ui) -> egui::Response {
        let mut response = ui.selectable_label(*self.on, self.label);
        if response.clicked() {
            *self.on = !*self.on;
            response.mark_changed();
        }
        response
    }
}

/// An integer slider over one 8-bit color channel.
pub struct ChannelSlider<'a> {
    label: &'a str,
    value: &'a mut i64,
}

impl<'a> ChannelSlider<'a> {
    pub fn new(label: &'a str, value: &'a mut i64) -> Self {
        Self { label, value }
    }
}

impl egui::Widget for ChannelSlider<'_> {
    fn ui(self, ui: &mut egui::Ui) -> egui::Response {
        ui.add(egui::Slider::new(self.value, 0..=255).text(self.label))
    }
}

/// Three channel sliders plus a preview swatch.
///
/// Channels are wide integers; `color()` runs them through the validating
/// constructor, so any out-of-range state surfaces as a `ColorError` instead
/// of silently wrapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorMixer {
    pub r: i64,
    pub g: i64,
    pub b: i64,
}

impl ColorMixer {
    pub fn from_color(color: Color) -> Self {
        Self {
            r: color.r as i64,
            g: color.g as i64,
            b: color.b as i64,
        }
    }

    /// The mixed color, or the first out-of-range component.
    pub fn color(&self) -> Result<Color, ColorError> {
        Color::new(self.r, self.g, self.b)
    }

    /// Draw the mixer. Returns the new color when any channel changed.
    pub fn show(&mut self, ui: &mut egui::Ui) -> Option<Color> {
        let mut changed = false;
        changed |= ui.add(ChannelSlider::new("R", &mut self.r)).changed();
        changed |= ui.add(ChannelSlider::new("G", &mut self.g)).changed();
        changed |= ui.add(ChannelSlider::new("B", &mut self.b)).changed();

        match self.color() {
            Ok(color) => {
                let preview = egui::Color32::from_rgb(color.r, color.g, color.b);
                let (rect, _) = ui.allocate_exact_size(
                    egui::vec2(ui.available_width(), 16.0),
                    egui::Sense::hover(),
                );
                ui.painter()
                    .rect_filled(rect, egui::CornerRadius::same(2), preview);
                changed.then_some(color)
            }
            Err(e) => {
                ui.colored_label(egui::Color32::RED, e.to_string());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixer_round_trips_a_color() {
        let color = Color::new(10, 20, 30).unwrap();
        let mixer = ColorMixer::from_color(color);
        assert_eq!(mixer.color().unwrap(), color);
    }

    #[test]
    fn mixer_rejects_out_of_range_channels() {
        let mixer = ColorMixer { r: 300, g: 0, b: 0 };
        assert_eq!(
            mixer.color(),
            Err(ColorError::OutOfRange { value: 300 })
        );
    }
}
