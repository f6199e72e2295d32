//! Bubble chart space view

use std::sync::Arc;

use egui::{Align2, Color32, ComboBox, FontId, Painter, Pos2, Rect, Rounding, Sense, Slider, Stroke, Ui, Vec2};
use tracing::debug;
use whr_core::{AxisKind, CountryId, Field, Selection, SelectionState, ViewId, ViewInvalidation};
use whr_data::CountryRecord;

use super::layout::{is_click, BubbleLayout, PlotFrame};
use crate::colors::{with_alpha, ACTIVE_ORANGE, BUBBLE_ALPHA, DIMMED_GRAY, HOVER_DARK, SELECTED_RED};
use crate::legend::{draw_color_bar, draw_size_legend};
use crate::sizing::DEFAULT_SIZE_SCALE;
use crate::tooltip::tooltip_text;
use crate::widgets::toggle_button;
use crate::{SpaceView, ViewerContext};

const MARGIN_LEFT: f32 = 56.0;
const MARGIN_RIGHT: f32 = 16.0;
const MARGIN_TOP: f32 = 28.0;
const MARGIN_BOTTOM: f32 = 56.0;
const LEGEND_WIDTH: f32 = 170.0;

/// How a bubble is drawn relative to the current selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    Normal,
    Hovered,
    Selected,
    /// Another country is selected and this one is grayed out
    Dimmed,
}

/// Which controls and behaviours a bubble chart has
#[derive(Debug, Clone, PartialEq)]
pub struct BubbleOptions {
    /// Six factor buttons choosing the x axis
    pub axis_buttons: bool,
    /// Dropdowns for all four channels, size slider and legend toggle
    pub field_pickers: bool,
    /// Drag a rectangle to select every bubble inside it
    pub brushing: bool,
    /// Gray out unselected bubbles while something is selected
    pub dim_unselected: bool,
    pub show_legend: bool,
    /// Size slider value, 1..=100
    pub size_scale: f32,
}

impl BubbleOptions {
    /// The single bubble chart: x chosen by buttons, everything else fixed
    pub fn standalone() -> Self {
        Self {
            axis_buttons: true,
            field_pickers: false,
            brushing: false,
            dim_unselected: false,
            show_legend: true,
            size_scale: DEFAULT_SIZE_SCALE,
        }
    }

    /// One panel of the linked brushing view
    pub fn brushing_panel() -> Self {
        Self {
            axis_buttons: false,
            field_pickers: true,
            brushing: true,
            dim_unselected: true,
            show_legend: true,
            size_scale: DEFAULT_SIZE_SCALE,
        }
    }
}

/// Scatter of countries with area-proportional bubbles
pub struct BubbleChartView {
    id: ViewId,
    title: String,
    options: BubbleOptions,
    invalidation: Arc<ViewInvalidation>,
    layout: Option<BubbleLayout>,
    selection: Selection,
    hovered: Option<CountryId>,
    brush_origin: Option<Pos2>,
}

impl BubbleChartView {
    /// Create a view and subscribe it to the selection state
    pub fn new(id: ViewId, selection: &SelectionState, options: BubbleOptions) -> Self {
        let invalidation = ViewInvalidation::new();
        selection.subscribe(id, invalidation.clone());

        Self {
            id,
            title: id.label().to_string(),
            options,
            invalidation,
            layout: None,
            selection: Selection::None,
            hovered: None,
            brush_origin: None,
        }
    }

    pub fn options(&self) -> &BubbleOptions {
        &self.options
    }

    pub fn layout(&self) -> Option<&BubbleLayout> {
        self.layout.as_ref()
    }

    /// Apply pending notifications: rebuild the layout after a field change,
    /// re-read the selection after a selection change
    pub fn refresh(&mut self, ctx: &ViewerContext) {
        if self.invalidation.take_layout() || self.layout.is_none() {
            let fields = ctx.selection.view_fields(self.id);
            debug!(view = ?self.id, ?fields, "Rebuilding bubble layout");
            self.layout = Some(BubbleLayout::build(&ctx.dataset, fields, self.options.size_scale));
        }
        if self.invalidation.take_highlight() {
            self.selection = ctx.selection.selection();
        }
    }

    /// Choose the x-axis factor
    pub fn on_axis_button_click(&self, ctx: &ViewerContext, field: Field) {
        self.set_field(ctx, AxisKind::X, field);
    }

    /// Change one of this view's own channels; the shared selection is untouched
    pub fn set_field(&self, ctx: &ViewerContext, kind: AxisKind, field: Field) {
        ctx.selection.set_view_field_typed(self.id, kind, field);
    }

    pub fn set_size_scale(&mut self, scale: f32) {
        let scale = scale.clamp(1.0, 100.0);
        if scale != self.options.size_scale {
            self.options.size_scale = scale;
            self.invalidation.mark_layout();
        }
    }

    /// Record under the cursor, if any
    pub fn on_hover<'a>(
        &mut self,
        ctx: &'a ViewerContext,
        frame: &PlotFrame,
        pos: Pos2,
    ) -> Option<&'a CountryRecord> {
        let hit = self
            .layout
            .as_ref()
            .and_then(|layout| layout.hit_test(frame, pos))
            .map(|bubble| (bubble.record, bubble.id.clone()));

        self.hovered = hit.as_ref().map(|(_, id)| id.clone());
        hit.and_then(|(idx, _)| ctx.dataset.records().get(idx))
    }

    /// Toggle the bubble under the cursor; clicking empty space clears
    pub fn on_click(&mut self, ctx: &ViewerContext, frame: &PlotFrame, pos: Pos2) {
        let hit = self
            .layout
            .as_ref()
            .and_then(|layout| layout.hit_test(frame, pos))
            .map(|bubble| bubble.id.clone());

        match hit {
            Some(id) => ctx.selection.toggle(id),
            None => ctx.selection.clear(),
        }
    }

    /// Select every bubble whose center lies in a screen region
    pub fn on_brush(&mut self, ctx: &ViewerContext, frame: &PlotFrame, region: Rect) {
        if is_click(region) {
            self.on_click(ctx, frame, region.center());
            return;
        }
        let Some(layout) = self.layout.as_ref() else {
            return;
        };
        let ids = layout.brush(frame, region);
        debug!(view = ?self.id, count = ids.len(), "Brushed region");
        ctx.selection.brush(ids);
    }

    pub fn highlight(&self, id: &CountryId) -> Highlight {
        if self.selection.contains(id) {
            Highlight::Selected
        } else if self.hovered.as_ref() == Some(id) {
            Highlight::Hovered
        } else if self.options.dim_unselected && !self.selection.is_empty() {
            Highlight::Dimmed
        } else {
            Highlight::Normal
        }
    }

    fn controls_ui(&mut self, ctx: &ViewerContext, ui: &mut Ui) {
        let fields = ctx.selection.view_fields(self.id);

        if self.options.axis_buttons {
            let mut clicked = None;
            ui.horizontal_wrapped(|ui| {
                for field in Field::BUBBLE_AXES {
                    let (low, high) = field.extremes();
                    let mut button = egui::Button::new(field.label());
                    if fields.x == field {
                        button = button.fill(ACTIVE_ORANGE);
                    }
                    if ui
                        .add(button)
                        .on_hover_text(format!("{low} / {high}"))
                        .clicked()
                    {
                        clicked = Some(field);
                    }
                }
            });
            if let Some(field) = clicked {
                self.on_axis_button_click(ctx, field);
            }
        }

        if self.options.field_pickers {
            let mut changes = Vec::new();
            let mut size_scale = self.options.size_scale;
            let mut show_legend = self.options.show_legend;
            let icons = ctx.toggle_icons();

            ui.horizontal_wrapped(|ui| {
                for kind in [AxisKind::X, AxisKind::Y, AxisKind::Size, AxisKind::Color] {
                    let current = fields.get(kind);
                    let mut chosen = current;
                    ui.label(kind.label());
                    ComboBox::from_id_source((self.id, kind))
                        .selected_text(chosen.label())
                        .show_ui(ui, |ui| {
                            for field in Field::ALL {
                                ui.selectable_value(&mut chosen, field, field.label());
                            }
                        });
                    if chosen != current {
                        changes.push((kind, chosen));
                    }
                }
            });
            ui.horizontal(|ui| {
                ui.add(Slider::new(&mut size_scale, 1.0..=100.0).text("Size"));
                toggle_button(ui, &mut show_legend, &format!("Legend ({})", self.title), icons.as_ref());
            });

            for (kind, field) in changes {
                self.set_field(ctx, kind, field);
            }
            self.set_size_scale(size_scale);
            self.options.show_legend = show_legend;
        }
    }

    fn paint(&self, painter: &Painter, frame: &PlotFrame, legend_rect: Option<Rect>, text_color: Color32) {
        let Some(layout) = self.layout.as_ref() else {
            return;
        };
        let plot = frame.rect;
        let font = FontId::proportional(11.0);
        let grid = Stroke::new(0.5, text_color.gamma_multiply(0.2));
        let axis = Stroke::new(1.0, text_color);

        painter.rect_filled(plot, Rounding::ZERO, text_color.gamma_multiply(0.03));

        // X axis
        for tick in &layout.x_axis.ticks {
            let x = frame.to_screen(tick.value, layout.y_scale.min).x;
            painter.line_segment([Pos2::new(x, plot.top()), Pos2::new(x, plot.bottom())], grid);
            painter.line_segment([Pos2::new(x, plot.bottom()), Pos2::new(x, plot.bottom() + 4.0)], axis);
            painter.text(Pos2::new(x, plot.bottom() + 6.0), Align2::CENTER_TOP, &tick.label, font.clone(), text_color);
        }
        painter.line_segment([plot.left_bottom(), plot.right_bottom()], axis);
        painter.text(
            Pos2::new(plot.center().x, plot.bottom() + 24.0),
            Align2::CENTER_TOP,
            &layout.x_axis.title,
            FontId::proportional(13.0),
            text_color,
        );
        painter.text(
            Pos2::new(plot.left(), plot.bottom() + 40.0),
            Align2::LEFT_TOP,
            format!("← {}", layout.x_axis.low_label),
            font.clone(),
            text_color,
        );
        painter.text(
            Pos2::new(plot.right(), plot.bottom() + 40.0),
            Align2::RIGHT_TOP,
            format!("{} →", layout.x_axis.high_label),
            font.clone(),
            text_color,
        );

        // Y axis
        for tick in &layout.y_axis.ticks {
            let y = frame.to_screen(layout.x_scale.min, tick.value).y;
            painter.line_segment([Pos2::new(plot.left(), y), Pos2::new(plot.right(), y)], grid);
            painter.line_segment([Pos2::new(plot.left() - 4.0, y), Pos2::new(plot.left(), y)], axis);
            painter.text(Pos2::new(plot.left() - 6.0, y), Align2::RIGHT_CENTER, &tick.label, font.clone(), text_color);
        }
        painter.line_segment([plot.left_top(), plot.left_bottom()], axis);
        painter.text(
            Pos2::new(plot.left() - MARGIN_LEFT + 4.0, plot.top() - 6.0),
            Align2::LEFT_BOTTOM,
            format!(
                "{}  ({} ↓ / ↑ {})",
                layout.y_axis.title, layout.y_axis.low_label, layout.y_axis.high_label
            ),
            FontId::proportional(13.0),
            text_color,
        );

        // Bubbles, largest first
        let clipped = painter.with_clip_rect(plot);
        for bubble in &layout.bubbles {
            let center = frame.to_screen(bubble.x, bubble.y);
            let (fill, stroke) = match self.highlight(&bubble.id) {
                Highlight::Normal => (with_alpha(bubble.color, BUBBLE_ALPHA), Stroke::new(0.8, Color32::WHITE)),
                Highlight::Hovered => (with_alpha(bubble.color, BUBBLE_ALPHA), Stroke::new(1.5, HOVER_DARK)),
                Highlight::Selected => (with_alpha(bubble.color, 220), Stroke::new(2.0, SELECTED_RED)),
                Highlight::Dimmed => (with_alpha(DIMMED_GRAY, BUBBLE_ALPHA), Stroke::new(0.5, Color32::WHITE)),
            };
            clipped.circle(center, bubble.radius, fill, stroke);
        }

        if let Some(rect) = legend_rect {
            let bar = Rect::from_min_size(rect.min + Vec2::new(16.0, 20.0), Vec2::new(16.0, rect.height() * 0.45));
            draw_color_bar(painter, bar, layout.fields.color, layout.color_scale.as_ref(), text_color);

            let sizes = Rect::from_min_max(Pos2::new(rect.left(), bar.bottom() + 24.0), rect.max);
            draw_size_legend(painter, sizes, layout.fields.size, &layout.sizer, text_color);
        }
    }
}

impl SpaceView for BubbleChartView {
    fn id(&self) -> ViewId {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui) {
        self.refresh(ctx);
        self.controls_ui(ctx, ui);
        self.refresh(ctx);

        let (outer, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let legend_width = if self.options.show_legend { LEGEND_WIDTH } else { 0.0 };
        let plot_rect = Rect::from_min_max(
            outer.min + Vec2::new(MARGIN_LEFT, MARGIN_TOP),
            outer.max - Vec2::new(MARGIN_RIGHT + legend_width, MARGIN_BOTTOM),
        );
        if plot_rect.width() < 20.0 || plot_rect.height() < 20.0 {
            return;
        }
        let Some(frame) = self.layout.as_ref().map(|layout| PlotFrame::new(plot_rect, layout)) else {
            return;
        };

        let hovered_record = match response.hover_pos() {
            Some(pos) if plot_rect.contains(pos) => self.on_hover(ctx, &frame, pos),
            _ => {
                self.hovered = None;
                None
            }
        };

        let pointer = ui.input(|i| i.pointer.latest_pos());
        if self.options.brushing && response.drag_started() {
            self.brush_origin = ui.input(|i| i.pointer.press_origin());
        }
        if self.options.brushing && response.drag_released() {
            if let (Some(origin), Some(end)) = (self.brush_origin.take(), pointer) {
                self.on_brush(ctx, &frame, Rect::from_two_pos(origin, end));
            }
        } else if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.on_click(ctx, &frame, pos);
            }
        }

        // Our own clicks notify us too; pick them up before painting
        self.refresh(ctx);

        let text_color = ui.visuals().text_color();
        let painter = ui.painter_at(outer);
        let legend_rect = self.options.show_legend.then(|| {
            Rect::from_min_max(
                Pos2::new(outer.right() - LEGEND_WIDTH, outer.top() + MARGIN_TOP),
                Pos2::new(outer.right(), outer.bottom() - MARGIN_BOTTOM),
            )
        });
        self.paint(&painter, &frame, legend_rect, text_color);

        if let (Some(origin), Some(end)) = (self.brush_origin, pointer) {
            if response.dragged() {
                let region = Rect::from_two_pos(origin, end).intersect(plot_rect);
                painter.rect_filled(region, Rounding::ZERO, Color32::from_rgba_unmultiplied(30, 120, 220, 40));
                painter.rect_stroke(region, Rounding::ZERO, Stroke::new(1.0, Color32::from_rgb(30, 120, 220)));
            }
        }

        if ctx.tooltips_enabled() {
            if let Some(record) = hovered_record {
                response.on_hover_text(tooltip_text(record));
            }
        }
    }
}
