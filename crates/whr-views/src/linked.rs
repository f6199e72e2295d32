//! Linked brushing: two bubble charts sharing one selection

use egui::{Rect, Ui};
use whr_core::{SelectionState, ViewId};

use crate::bubble::{BubbleChartView, BubbleOptions, PlotFrame};
use crate::widgets::toggle_button;
use crate::{SpaceView, ViewerContext};

/// Which of the two panels an interaction happened in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Left,
    Right,
}

/// Two independently configured bubble charts side by side
///
/// Each panel owns its fields; the selection is shared, so brushing one
/// panel highlights the same countries in the other.
pub struct LinkedBrushingView {
    left: BubbleChartView,
    right: BubbleChartView,
}

impl LinkedBrushingView {
    pub fn new(selection: &SelectionState) -> Self {
        Self {
            left: BubbleChartView::new(ViewId::BrushLeft, selection, BubbleOptions::brushing_panel()),
            right: BubbleChartView::new(ViewId::BrushRight, selection, BubbleOptions::brushing_panel()),
        }
    }

    pub fn panel(&self, panel: Panel) -> &BubbleChartView {
        match panel {
            Panel::Left => &self.left,
            Panel::Right => &self.right,
        }
    }

    pub fn panel_mut(&mut self, panel: Panel) -> &mut BubbleChartView {
        match panel {
            Panel::Left => &mut self.left,
            Panel::Right => &mut self.right,
        }
    }

    pub fn refresh(&mut self, ctx: &ViewerContext) {
        self.left.refresh(ctx);
        self.right.refresh(ctx);
    }

    /// Brush a screen region of one panel
    pub fn on_brush(&mut self, ctx: &ViewerContext, panel: Panel, frame: &PlotFrame, region: Rect) {
        self.panel_mut(panel).on_brush(ctx, frame, region);
    }

    fn tooltip_toggle_ui(ctx: &ViewerContext, ui: &mut Ui) {
        let mut enabled = ctx.tooltips_enabled();
        let icons = ctx.toggle_icons();
        ui.horizontal(|ui| {
            toggle_button(ui, &mut enabled, "Tooltips", icons.as_ref());
        });
        if enabled != ctx.tooltips_enabled() {
            tracing::debug!(enabled, "Tooltips toggled");
            ctx.options.write().tooltips_enabled = enabled;
        }
    }
}

impl SpaceView for LinkedBrushingView {
    fn id(&self) -> ViewId {
        ViewId::BrushLeft
    }

    fn title(&self) -> &str {
        "Brushing Chart"
    }

    fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui) {
        Self::tooltip_toggle_ui(ctx, ui);
        ui.separator();

        ui.columns(2, |columns| {
            columns[0].heading(self.left.title());
            self.left.ui(ctx, &mut columns[0]);
            columns[1].heading(self.right.title());
            self.right.ui(ctx, &mut columns[1]);
        });

        // A brush in the right panel lands after the left one painted
        self.refresh(ctx);
    }
}
