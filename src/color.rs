// Simple color struct, created from an unsigned 32 representing RRGGBBAA

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn from_u32(num: u32) -> Color {
        let r = (num >> 24) as u8;
        let g = (num >> 16) as u8;
        let b = (num >> 8) as u8;
        let a = num as u8;

        Color { r, g, b, a }
    }

    // Canvas fill style for an opaque color, e.g. "#3b82f6"
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    // Canvas style with an explicit alpha, ignoring the stored alpha byte
    pub fn to_rgba(&self, alpha: f64) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }
}

/// Particle colors, picked uniformly at creation.
pub const PALETTE: [Color; 5] = [
    Color::from_u32(0x3b82f6ff),
    Color::from_u32(0xa78bfaff),
    Color::from_u32(0xec4899ff),
    Color::from_u32(0x06b6d4ff),
    Color::from_u32(0x8b5cf6ff),
];

/// Page background, painted translucently each frame to leave trails.
pub const BACKGROUND: Color = Color::from_u32(0x0f172aff);

/// Connection line color.
pub const CONNECTION: Color = Color::from_u32(0xa855f7ff);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpacks_rrggbbaa() {
        let c = Color::from_u32(0x11223344);
        assert_eq!((c.r, c.g, c.b, c.a), (0x11, 0x22, 0x33, 0x44));
    }

    #[test]
    fn formats_canvas_styles() {
        assert_eq!(PALETTE[0].to_hex(), "#3b82f6");
        assert_eq!(PALETTE[3].to_hex(), "#06b6d4");
        assert_eq!(BACKGROUND.to_rgba(0.05), "rgba(15, 23, 42, 0.05)");
        assert_eq!(CONNECTION.to_rgba(0.15), "rgba(168, 85, 247, 0.15)");
    }
}
