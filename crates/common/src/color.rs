use serde::{Deserialize, Serialize};

/// Errors from color construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("color component {value} out of range (0-255)")]
    OutOfRange { value: i64 },
}

/// An 8-bit RGB color.
///
/// Channels are `u8`, so a constructed `Color` is always in range; the
/// validating constructor exists for the UI and config paths that hand us
/// wider integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };
    pub const WHITE: Self = Self {
        r: 255,
        g: 255,
        b: 255,
    };

    /// Build a color from wide integers, rejecting components outside 0..=255.
    pub fn new(r: i64, g: i64, b: i64) -> Result<Self, ColorError> {
        Ok(Self {
            r: Self::check(r)?,
            g: Self::check(g)?,
            b: Self::check(b)?,
        })
    }

    fn check(value: i64) -> Result<u8, ColorError> {
        u8::try_from(value).map_err(|_| ColorError::OutOfRange { value })
    }

    /// RGBA in 0..=1 floats, alpha fixed at 1, for GPU submission.
    pub fn as_rgba_f32(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            1.0,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_range_components_accepted() {
        let c = Color::new(12, 0, 255).unwrap();
        assert_eq!((c.r, c.g, c.b), (12, 0, 255));
    }

    #[test]
    fn each_component_is_validated() {
        assert_eq!(
            Color::new(256, 0, 0),
            Err(ColorError::OutOfRange { value: 256 })
        );
        assert_eq!(
            Color::new(0, -1, 0),
            Err(ColorError::OutOfRange { value: -1 })
        );
        assert_eq!(
            Color::new(0, 0, 999),
            Err(ColorError::OutOfRange { value: 999 })
        );
    }

    #[test]
    fn rgba_conversion_normalizes() {
        let c = Color::WHITE.as_rgba_f32();
        assert_eq!(c, [1.0, 1.0, 1.0, 1.0]);
        let c = Color::BLACK.as_rgba_f32();
        assert_eq!(c, [0.0, 0.0, 0.0, 1.0]);
    }
}
