//! Small 2D widget kit for the viewer's panels.
//!
//! Wraps egui with the handful of widgets the viewer needs: a latching
//! toggle button, an 8-bit channel slider, and a color mixer that funnels its
//! channels through the validating `Color` constructor.

mod widgets;

pub use widgets::{ChannelSlider, ColorMixer, ToggleButton};

pub fn crate_info() -> &'static str {
    "meshview-ui v0.1.0"
}
