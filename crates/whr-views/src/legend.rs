//! Color bar and size legend drawing

use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Rounding, Stroke, Vec2};
use whr_core::Field;

use crate::colors::{viridis_color, with_alpha, ColorScale, BUBBLE_ALPHA};
use crate::sizing::BubbleSizer;

const BAR_BANDS: usize = 48;

/// Vertical viridis bar with the field's value range and descriptive ends
pub fn draw_color_bar(
    painter: &Painter,
    rect: Rect,
    field: Field,
    scale: Option<&ColorScale>,
    text_color: Color32,
) {
    let font = FontId::proportional(11.0);
    painter.text(
        rect.center_top() - Vec2::new(0.0, 4.0),
        Align2::CENTER_BOTTOM,
        field.label(),
        FontId::proportional(12.0),
        text_color,
    );

    let band_height = rect.height() / BAR_BANDS as f32;
    for i in 0..BAR_BANDS {
        let t = (i as f64 + 0.5) / BAR_BANDS as f64;
        let bottom = rect.bottom() - i as f32 * band_height;
        let band = Rect::from_min_max(
            Pos2::new(rect.left(), bottom - band_height - 0.5),
            Pos2::new(rect.right(), bottom),
        );
        painter.rect_filled(band, Rounding::ZERO, viridis_color(t));
    }
    painter.rect_stroke(rect, Rounding::ZERO, Stroke::new(1.0, text_color));

    let (low, high) = field.extremes();
    let label_x = rect.right() + 6.0;
    painter.text(Pos2::new(label_x, rect.top()), Align2::LEFT_TOP, high, font.clone(), text_color);
    painter.text(Pos2::new(label_x, rect.bottom()), Align2::LEFT_BOTTOM, low, font.clone(), text_color);

    if let Some(scale) = scale {
        painter.text(
            Pos2::new(label_x, rect.top() + 14.0),
            Align2::LEFT_TOP,
            field.format_value(scale.max),
            font.clone(),
            text_color,
        );
        painter.text(
            Pos2::new(label_x, rect.bottom() - 14.0),
            Align2::LEFT_BOTTOM,
            field.format_value(scale.min),
            font,
            text_color,
        );
    }
}

/// Three reference bubbles for the size field
pub fn draw_size_legend(painter: &Painter, rect: Rect, field: Field, sizer: &BubbleSizer, text_color: Color32) {
    let font = FontId::proportional(11.0);
    painter.text(
        rect.center_top(),
        Align2::CENTER_TOP,
        format!("{} Size", field.label()),
        FontId::proportional(12.0),
        text_color,
    );

    let steps = sizer.legend_steps();
    if steps.is_empty() {
        return;
    }
    let slot = rect.width() / steps.len() as f32;
    let baseline = rect.bottom() - 16.0;

    for (i, value) in steps.iter().enumerate() {
        let radius = sizer.radius(Some(*value));
        let center = Pos2::new(rect.left() + slot * (i as f32 + 0.5), baseline - radius);
        painter.circle(
            center,
            radius,
            with_alpha(Color32::GRAY, BUBBLE_ALPHA),
            Stroke::new(1.0, Color32::BLACK),
        );
        painter.text(
            Pos2::new(center.x, baseline + 2.0),
            Align2::CENTER_TOP,
            crate::scale::format_tick(*value, value.abs().max(1.0) / 10.0),
            font.clone(),
            text_color,
        );
    }
}
