//! Bubble positions, sizes and colors for one set of field choices

use egui::{Color32, Pos2, Rect};
use itertools::{Itertools, MinMaxResult};
use whr_core::{CountryId, ViewFields};
use whr_data::Dataset;

use crate::colors::ColorScale;
use crate::scale::{AxisDecoration, LinearScale};
use crate::sizing::BubbleSizer;

/// Drags smaller than this in both directions count as a click
pub const MIN_BRUSH_SPAN: f32 = 5.0;

/// One plotted country
#[derive(Debug, Clone, PartialEq)]
pub struct Bubble {
    /// Index into [`Dataset::records`]
    pub record: usize,
    pub id: CountryId,
    pub x: f64,
    pub y: f64,
    pub radius: f32,
    pub color: Color32,
}

/// Everything needed to draw one bubble chart
#[derive(Debug, Clone)]
pub struct BubbleLayout {
    pub fields: ViewFields,
    /// Largest first, so later bubbles are drawn on top
    pub bubbles: Vec<Bubble>,
    pub x_scale: LinearScale,
    pub y_scale: LinearScale,
    pub x_axis: AxisDecoration,
    pub y_axis: AxisDecoration,
    pub color_scale: Option<ColorScale>,
    pub sizer: BubbleSizer,
}

impl BubbleLayout {
    /// Lay out every record that has both an x and a y value
    pub fn build(dataset: &Dataset, fields: ViewFields, size_scale: f32) -> Self {
        let color_scale = dataset
            .value_range(fields.color)
            .map(|(min, max)| ColorScale { min, max });
        let (size_min, size_max) = dataset.value_range(fields.size).unwrap_or((0.0, 0.0));
        let sizer = BubbleSizer::new(size_min, size_max, size_scale);

        let mut bubbles: Vec<Bubble> = dataset
            .records()
            .iter()
            .enumerate()
            .filter_map(|(idx, record)| {
                let x = record.value(fields.x)?;
                let y = record.value(fields.y)?;
                let color = match &color_scale {
                    Some(scale) => scale.color(record.value(fields.color)),
                    None => crate::colors::NULL_GRAY,
                };
                Some(Bubble {
                    record: idx,
                    id: record.id.clone(),
                    x,
                    y,
                    radius: sizer.radius(record.value(fields.size)),
                    color,
                })
            })
            .collect();

        bubbles.sort_by(|a, b| b.radius.total_cmp(&a.radius));

        let x_scale = padded_scale(bubbles.iter().map(|b| b.x));
        let y_scale = padded_scale(bubbles.iter().map(|b| b.y));

        Self {
            fields,
            x_axis: AxisDecoration::build(fields.x, &x_scale),
            y_axis: AxisDecoration::build(fields.y, &y_scale),
            bubbles,
            x_scale,
            y_scale,
            color_scale,
            sizer,
        }
    }

    pub fn bubble(&self, id: &CountryId) -> Option<&Bubble> {
        self.bubbles.iter().find(|b| &b.id == id)
    }

    /// Topmost bubble whose disc contains the screen position
    pub fn hit_test(&self, frame: &PlotFrame, pos: Pos2) -> Option<&Bubble> {
        self.bubbles
            .iter()
            .rev()
            .find(|b| frame.to_screen(b.x, b.y).distance(pos) <= b.radius)
    }

    /// Countries whose bubble center lies inside a screen region
    pub fn brush(&self, frame: &PlotFrame, region: Rect) -> Vec<CountryId> {
        let (x0, y0) = frame.to_data(region.min);
        let (x1, y1) = frame.to_data(region.max);
        let (x_lo, x_hi) = (x0.min(x1), x0.max(x1));
        let (y_lo, y_hi) = (y0.min(y1), y0.max(y1));

        self.bubbles
            .iter()
            .filter(|b| b.x >= x_lo && b.x <= x_hi && b.y >= y_lo && b.y <= y_hi)
            .map(|b| b.id.clone())
            .collect()
    }
}

fn padded_scale(values: impl Iterator<Item = f64>) -> LinearScale {
    match values.minmax() {
        MinMaxResult::NoElements => LinearScale::padded(0.0, 1.0),
        MinMaxResult::OneElement(v) => LinearScale::padded(v, v),
        MinMaxResult::MinMax(min, max) => LinearScale::padded(min, max),
    }
}

/// Whether a drag region is too small to be a brush
pub fn is_click(region: Rect) -> bool {
    region.width() < MIN_BRUSH_SPAN && region.height() < MIN_BRUSH_SPAN
}

/// Maps between data space and the screen rectangle of a plot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotFrame {
    pub rect: Rect,
    pub x: LinearScale,
    pub y: LinearScale,
}

impl PlotFrame {
    pub fn new(rect: Rect, layout: &BubbleLayout) -> Self {
        Self {
            rect,
            x: layout.x_scale,
            y: layout.y_scale,
        }
    }

    pub fn to_screen(&self, x: f64, y: f64) -> Pos2 {
        Pos2::new(
            self.rect.left() + self.x.to_unit(x) as f32 * self.rect.width(),
            self.rect.bottom() - self.y.to_unit(y) as f32 * self.rect.height(),
        )
    }

    pub fn to_data(&self, pos: Pos2) -> (f64, f64) {
        let tx = ((pos.x - self.rect.left()) / self.rect.width()) as f64;
        let ty = ((self.rect.bottom() - pos.y) / self.rect.height()) as f64;
        (self.x.from_unit(tx), self.y.from_unit(ty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};
    use whr_core::Field;
    use whr_data::CountryRecord;

    fn record(code: &str, gdp: Option<f64>, score: f64, population: f64) -> CountryRecord {
        let mut values: ahash::AHashMap<Field, f64> = [
            (Field::LadderScore, score),
            (Field::Population, population),
            (Field::SocialSupport, score / 10.0),
        ]
        .into_iter()
        .collect();
        if let Some(gdp) = gdp {
            values.insert(Field::LoggedGdpPerCapita, gdp);
        }
        CountryRecord {
            id: CountryId::new(code),
            name: code.to_string(),
            geometry: None,
            values,
        }
    }

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            record("CHN", Some(9.7), 5.8, 1_400_000_000.0),
            record("FIN", Some(10.8), 7.8, 5_500_000.0),
            record("AFG", Some(7.3), 1.9, 39_000_000.0),
            record("VEN", None, 5.2, 28_000_000.0),
        ])
    }

    fn frame(layout: &BubbleLayout) -> PlotFrame {
        PlotFrame::new(Rect::from_min_size(pos2(0.0, 0.0), vec2(500.0, 400.0)), layout)
    }

    #[test]
    fn test_records_without_x_are_not_plotted() {
        let layout = BubbleLayout::build(&dataset(), ViewFields::default(), 50.0);
        assert_eq!(layout.bubbles.len(), 3);
        assert!(layout.bubble(&CountryId::new("VEN")).is_none());
    }

    #[test]
    fn test_bubbles_are_ordered_largest_first() {
        let layout = BubbleLayout::build(&dataset(), ViewFields::default(), 50.0);
        assert_eq!(layout.bubbles[0].id, CountryId::new("CHN"));
        assert!(layout.bubbles.windows(2).all(|w| w[0].radius >= w[1].radius));
    }

    #[test]
    fn test_frame_round_trip() {
        let layout = BubbleLayout::build(&dataset(), ViewFields::default(), 50.0);
        let frame = frame(&layout);
        let pos = frame.to_screen(8.0, 4.0);
        let (x, y) = frame.to_data(pos);
        assert!((x - 8.0).abs() < 1e-4 && (y - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_hit_test_prefers_topmost_bubble() {
        let layout = BubbleLayout::build(&dataset(), ViewFields::default(), 50.0);
        let frame = frame(&layout);
        let fin = layout.bubble(&CountryId::new("FIN")).unwrap();
        let center = frame.to_screen(fin.x, fin.y);

        assert_eq!(layout.hit_test(&frame, center).map(|b| &b.id), Some(&fin.id));
        assert!(layout.hit_test(&frame, pos2(499.0, 399.0)).is_none());
    }

    #[test]
    fn test_brush_selects_centers_in_region() {
        let layout = BubbleLayout::build(&dataset(), ViewFields::default(), 50.0);
        let frame = frame(&layout);
        let a = frame.to_screen(9.0, 9.0);
        let b = frame.to_screen(11.0, 5.0);

        let mut ids = layout.brush(&frame, Rect::from_two_pos(a, b));
        ids.sort();
        assert_eq!(ids, vec![CountryId::new("CHN"), CountryId::new("FIN")]);
    }

    #[test]
    fn test_small_drag_is_a_click() {
        assert!(is_click(Rect::from_two_pos(pos2(10.0, 10.0), pos2(13.0, 12.0))));
        assert!(!is_click(Rect::from_two_pos(pos2(10.0, 10.0), pos2(30.0, 12.0))));
    }

    #[test]
    fn test_changing_x_regenerates_axis_for_every_field() {
        let dataset = dataset();
        for field in Field::ALL {
            let fields = ViewFields {
                x: field,
                ..ViewFields::default()
            };
            let layout = BubbleLayout::build(&dataset, fields, 50.0);
            assert_eq!(layout.x_axis.field, field);
            assert_eq!(layout.x_axis.title, field.axis_title());
            let expected = AxisDecoration::build(field, &layout.x_scale);
            assert_eq!(layout.x_axis, expected);
            assert!(layout.bubbles.iter().all(|b| {
                dataset.records()[b.record].value(field) == Some(b.x)
            }));
        }
    }
}
