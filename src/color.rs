use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Lighten, Srgb};

/// Default bar fill.
pub const DEFAULT_BAR_HEX: &str = "#0083B8";

const DEFAULT_BAR_RGB: (u8, u8, u8) = (0x00, 0x83, 0xB8);

// ---------------------------------------------------------------------------
// Chart colours
// ---------------------------------------------------------------------------

/// Fill colours for the bar charts.
///
/// Bars whose category is part of the current selection use `highlight`,
/// a lighter shade of `bar`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartColors {
    pub bar: Color32,
    pub highlight: Color32,
}

impl ChartColors {
    /// Build from a `#rrggbb` string.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let rgb: Srgb<u8> = hex.trim().parse().ok()?;
        Some(Self::from_rgb(rgb))
    }

    fn from_rgb(rgb: Srgb<u8>) -> Self {
        let base: Srgb = rgb.into_format();
        let hsl: Hsl = base.into_color();
        let light: Srgb = hsl.lighten(0.35).into_color();
        ChartColors {
            bar: to_color32(base),
            highlight: to_color32(light),
        }
    }
}

impl Default for ChartColors {
    fn default() -> Self {
        let (r, g, b) = DEFAULT_BAR_RGB;
        Self::from_rgb(Srgb::new(r, g, b))
    }
}

fn to_color32(rgb: Srgb) -> Color32 {
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_default_hex() {
        assert_eq!(ChartColors::from_hex(DEFAULT_BAR_HEX), Some(ChartColors::default()));
        assert_eq!(ChartColors::default().bar, Color32::from_rgb(0x00, 0x83, 0xB8));
    }

    #[test]
    fn highlight_is_lighter() {
        let colors = ChartColors::default();
        let sum = |c: Color32| c.r() as u32 + c.g() as u32 + c.b() as u32;
        assert!(sum(colors.highlight) > sum(colors.bar));
    }

    #[test]
    fn rejects_malformed_hex() {
        assert_eq!(ChartColors::from_hex("not a colour"), None);
    }
}
