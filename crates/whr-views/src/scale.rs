//! Linear scales, tick generation and axis decorations

use whr_core::Field;

/// Fraction of the data span added on each side of a plot domain
const DOMAIN_PADDING: f64 = 0.05;

/// Linear domain of one plot axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub min: f64,
    pub max: f64,
}

impl LinearScale {
    /// Padded domain around a data range
    pub fn padded(min: f64, max: f64) -> Self {
        let span = max - min;
        if span.abs() <= f64::EPSILON {
            let pad = if min.abs() > 1.0 { min.abs() * 0.1 } else { 1.0 };
            return Self {
                min: min - pad,
                max: max + pad,
            };
        }
        Self {
            min: min - span * DOMAIN_PADDING,
            max: max + span * DOMAIN_PADDING,
        }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Position of a value in the domain, 0 at min and 1 at max
    pub fn to_unit(&self, value: f64) -> f64 {
        (value - self.min) / self.span()
    }

    pub fn from_unit(&self, t: f64) -> f64 {
        self.min + t * self.span()
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// One labelled tick
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub label: String,
}

/// Round a raw step to 1, 2, 5 or 10 times a power of ten
fn nice_step(raw: f64) -> f64 {
    let magnitude = 10f64.powf(raw.log10().floor());
    let fraction = raw / magnitude;
    let nice = if fraction < 1.5 {
        1.0
    } else if fraction < 3.0 {
        2.0
    } else if fraction < 7.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Evenly spaced round tick values inside the scale
pub fn nice_ticks(scale: &LinearScale, target: usize) -> Vec<f64> {
    let span = scale.span();
    if !span.is_finite() || span <= 0.0 || target == 0 {
        return Vec::new();
    }

    let step = nice_step(span / target as f64);
    let first = (scale.min / step).ceil() as i64;
    let last = (scale.max / step).floor() as i64;

    (first..=last)
        .map(|i| i as f64 * step)
        // Avoid "-0.0" labels
        .map(|v| if v.abs() < step * 1e-9 { 0.0 } else { v })
        .collect()
}

/// Format a tick value so neighbouring ticks stay distinguishable
pub fn format_tick(value: f64, step: f64) -> String {
    let abs = value.abs();
    if abs >= 1e9 {
        format!("{}B", trim_zeros(value / 1e9, step / 1e9))
    } else if abs >= 1e6 {
        format!("{}M", trim_zeros(value / 1e6, step / 1e6))
    } else if abs >= 1e4 {
        format!("{}k", trim_zeros(value / 1e3, step / 1e3))
    } else {
        trim_zeros(value, step)
    }
}

fn trim_zeros(value: f64, step: f64) -> String {
    let decimals = if step > 0.0 && step < 1.0 {
        (-step.log10().floor()) as usize
    } else {
        0
    };
    format!("{:.*}", decimals.min(6), value)
}

/// Everything drawn along one axis, derived from its field
///
/// Built from scratch whenever the field or the domain changes; nothing from
/// the previous decoration is reused.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisDecoration {
    pub field: Field,
    pub title: String,
    pub ticks: Vec<Tick>,
    pub low_label: &'static str,
    pub high_label: &'static str,
}

impl AxisDecoration {
    pub const TARGET_TICKS: usize = 6;

    pub fn build(field: Field, scale: &LinearScale) -> Self {
        let values = nice_ticks(scale, Self::TARGET_TICKS);
        let step = match values.as_slice() {
            [a, b, ..] => b - a,
            _ => scale.span(),
        };
        let ticks = values
            .into_iter()
            .map(|value| Tick {
                value,
                label: format_tick(value, step),
            })
            .collect();
        let (low_label, high_label) = field.extremes();

        Self {
            field,
            title: field.axis_title(),
            ticks,
            low_label,
            high_label,
        }
    }
}
