//! Bubble sizing
//!
//! Bubble area, not radius, is proportional to the size value, so radius
//! grows with the square root of the value.

/// Radius of the largest bubble at the default size scale, in points
pub const MAX_RADIUS: f32 = 28.0;

/// Smallest radius drawn, so every bubble stays visible and clickable
pub const MIN_RADIUS: f32 = 2.5;

/// Default value of the size slider
pub const DEFAULT_SIZE_SCALE: f32 = 50.0;

/// Maps size values to bubble radii
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BubbleSizer {
    /// Smallest value of the size field
    pub min: f64,
    /// Largest value of the size field
    pub max: f64,
    /// Slider value in 1..=100; area scales linearly with it
    pub scale: f32,
}

impl BubbleSizer {
    pub fn new(min: f64, max: f64, scale: f32) -> Self {
        Self {
            min,
            max,
            scale: scale.clamp(1.0, 100.0),
        }
    }

    /// Fraction of the largest bubble's area
    ///
    /// Non-negative fields are sized relative to zero. Fields that go
    /// negative are shifted so their minimum gets the smallest bubble.
    fn area_fraction(&self, value: f64) -> f64 {
        let fraction = if self.min >= 0.0 {
            if self.max > 0.0 {
                value / self.max
            } else {
                0.0
            }
        } else {
            let span = self.max - self.min;
            if span > 0.0 {
                (value - self.min) / span
            } else {
                0.0
            }
        };
        fraction.clamp(0.0, 1.0)
    }

    /// Radius of a bubble; missing values get the floor radius
    pub fn radius(&self, value: Option<f64>) -> f32 {
        let Some(value) = value.filter(|v| v.is_finite()) else {
            return MIN_RADIUS;
        };
        let area = self.area_fraction(value) * (self.scale / DEFAULT_SIZE_SCALE) as f64;
        let radius = MAX_RADIUS * area.sqrt() as f32;
        radius.max(MIN_RADIUS)
    }

    /// Three ascending legend values spread over the size range
    pub fn legend_steps(&self) -> Vec<f64> {
        let mut steps: Vec<f64> = (0..3)
            .map(|i| self.min + (self.max - self.min) * i as f64 / 2.0)
            .filter(|v| v.is_finite())
            .collect();
        steps.dedup();
        steps
    }
}
