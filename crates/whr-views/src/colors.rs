//! Color utilities for the views

use egui::Color32;

/// Fill for countries and bubbles without a value
pub const NULL_GRAY: Color32 = Color32::from_rgb(204, 204, 204);

/// Fill for bubbles outside an active selection
pub const DIMMED_GRAY: Color32 = Color32::from_rgb(179, 179, 179);

/// Outline of selected items
pub const SELECTED_RED: Color32 = Color32::from_rgb(220, 30, 30);

/// Outline of the hovered item
pub const HOVER_DARK: Color32 = Color32::from_rgb(20, 20, 20);

/// Accent used for active buttons
pub const ACTIVE_ORANGE: Color32 = Color32::from_rgb(255, 165, 0);

/// Bubble fill opacity
pub const BUBBLE_ALPHA: u8 = 153;

/// Viridis color map
pub fn viridis_color(t: f64) -> Color32 {
    let c = colorous::VIRIDIS.eval_continuous(t.clamp(0.0, 1.0));
    Color32::from_rgb(c.r, c.g, c.b)
}

/// Same color with a new alpha
pub fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

/// Maps field values onto viridis over a fixed domain
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    pub min: f64,
    pub max: f64,
}

impl ColorScale {
    /// Domain from the non-missing values; None when every value is missing
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut values = values.into_iter().filter(|v| v.is_finite());
        let first = values.next()?;
        let (min, max) = values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Some(Self { min, max })
    }

    /// Position of a value in the domain, in [0, 1]
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span <= f64::EPSILON {
            0.5
        } else {
            ((value - self.min) / span).clamp(0.0, 1.0)
        }
    }

    /// Color of a value; missing values are gray
    pub fn color(&self, value: Option<f64>) -> Color32 {
        match value {
            Some(v) if v.is_finite() => viridis_color(self.normalize(v)),
            _ => NULL_GRAY,
        }
    }
}
