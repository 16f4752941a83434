// Simple color struct, created from an unsigned 32 representing RRGGBBAA
// Formats itself as a CSS rgba() string for canvas fill/stroke styles
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn from_u32(num: u32) -> Color {
        let r = (num >> 24) as u8;
        let g = (num >> 16) as u8;
        let b = (num >> 8) as u8;
        let a = (num >> 0) as u8;

        Color { r, g, b, a }
    }

    // CSS string using this color's own alpha channel
    pub fn css(&self) -> String {
        self.css_with_alpha(self.a as f64 / 255.0)
    }

    // CSS string with the alpha channel overridden, e.g. for distance-faded
    // connection lines
    pub fn css_with_alpha(&self, alpha: f64) -> String {
        format!(
            "rgba({}, {}, {}, {:.3})",
            self.r,
            self.g,
            self.b,
            alpha.max(0.0).min(1.0)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_u32_unpacks_channels() {
        let color = Color::from_u32(0x7c3aedb3);
        assert_eq!(color.r, 0x7c);
        assert_eq!(color.g, 0x3a);
        assert_eq!(color.b, 0xed);
        assert_eq!(color.a, 0xb3);
    }

    #[test]
    fn css_with_alpha_clamps() {
        let color = Color::from_u32(0x36d7b7ff);
        assert_eq!(color.css_with_alpha(0.5), "rgba(54, 215, 183, 0.500)");
        assert_eq!(color.css_with_alpha(1.7), "rgba(54, 215, 183, 1.000)");
        assert_eq!(color.css_with_alpha(-0.2), "rgba(54, 215, 183, 0.000)");
    }
}
