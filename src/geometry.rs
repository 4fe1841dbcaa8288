//! Shared geometric and color primitives used by the taxonomy, matcher and badge layout.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Measured size of one badge, as reported by the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BadgeSize {
    pub width: f64,
    pub height: f64,
}

impl BadgeSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BadgePosition {
    pub x: f64,
    pub y: f64,
}

impl BadgePosition {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_hex_is_lowercase_and_zero_padded() {
        assert_eq!(Color::new(0, 10, 255).to_hex(), "#000aff");
        assert_eq!(Color::new(229, 57, 53).to_string(), "#e53935");
    }
}
