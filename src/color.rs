use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Series colours: header → Color32
// ---------------------------------------------------------------------------

/// One colour per selectable series, fixed for the lifetime of a loaded log
/// so a series keeps its colour across redraws.
#[derive(Debug, Clone, Default)]
pub struct SeriesColors {
    mapping: BTreeMap<String, Color32>,
}

impl SeriesColors {
    pub fn new(headers: &[String]) -> Self {
        let palette = generate_palette(headers.len());
        let mapping = headers.iter().cloned().zip(palette).collect();
        SeriesColors { mapping }
    }

    pub fn color_for(&self, header: &str) -> Color32 {
        self.mapping.get(header).copied().unwrap_or(Color32::GRAY)
    }
}
