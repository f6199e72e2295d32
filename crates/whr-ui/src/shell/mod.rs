//! Application shell: view switching and the top-level panels

use egui::{Button, CentralPanel, Context, Key, RichText, TopBottomPanel, ViewportCommand};
use tracing::info;
use whr_core::{ViewId, ViewMode};
use whr_views::bubble::BubbleOptions;
use whr_views::{BubbleChartView, LinkedBrushingView, MapView, SpaceView, ViewerContext};

use crate::theme::ACTIVE_NAV;

/// Owns every view for the lifetime of the app
///
/// Views are built once and kept while hidden, so switching back finds
/// them as they were left.
pub struct AppShell {
    mode: ViewMode,
    map: MapView,
    bubble: BubbleChartView,
    linked: LinkedBrushingView,
}

impl AppShell {
    pub fn new(ctx: &ViewerContext, initial: ViewMode) -> Self {
        Self {
            mode: initial,
            map: MapView::new(&ctx.selection),
            bubble: BubbleChartView::new(ViewId::Bubble, &ctx.selection, BubbleOptions::standalone()),
            linked: LinkedBrushingView::new(&ctx.selection),
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Mount another view; selection and field choices are left alone
    pub fn switch_to(&mut self, mode: ViewMode) {
        if mode != self.mode {
            info!("Switching to {}", mode.label());
            self.mode = mode;
        }
    }

    pub fn active_view(&self) -> &dyn SpaceView {
        match self.mode {
            ViewMode::Map => &self.map,
            ViewMode::Bubble => &self.bubble,
            ViewMode::LinkedBrushing => &self.linked,
        }
    }

    pub fn active_view_mut(&mut self) -> &mut dyn SpaceView {
        match self.mode {
            ViewMode::Map => &mut self.map,
            ViewMode::Bubble => &mut self.bubble,
            ViewMode::LinkedBrushing => &mut self.linked,
        }
    }
}

/// Navigation bar with one button per view
pub fn nav_bar(ctx: &Context, shell: &mut AppShell, viewer: &ViewerContext) {
    TopBottomPanel::top("nav_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let mut target = None;
            for mode in ViewMode::ALL {
                let mut button = Button::new(RichText::new(mode.label()).size(15.0));
                if mode == shell.mode() {
                    button = button.fill(ACTIVE_NAV);
                }
                if ui.add(button).clicked() {
                    target = Some(mode);
                }
            }
            if let Some(mode) = target {
                shell.switch_to(mode);
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!(
                    "{} countries, {} on the map",
                    viewer.dataset.len(),
                    viewer.dataset.mapped_count()
                ));
                if let Some(id) = viewer.selection.current() {
                    ui.separator();
                    ui.label(format!("Selected: {id}"));
                }
            });
        });
    });

    if ctx.input(|i| i.key_pressed(Key::Escape)) {
        ctx.send_viewport_cmd(ViewportCommand::Fullscreen(false));
    }
}

/// Render the active view
pub fn central_panel(ctx: &Context, shell: &mut AppShell, viewer: &ViewerContext) {
    CentralPanel::default().show(ctx, |ui| {
        shell.active_view_mut().ui(viewer, ui);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use whr_core::{AxisKind, CountryId, Field, SelectionState};
    use whr_data::Dataset;

    fn context() -> ViewerContext {
        ViewerContext::new(Arc::new(Dataset::default()), Arc::new(SelectionState::new()))
    }

    #[test]
    fn test_starts_in_initial_mode() {
        let ctx = context();
        let shell = AppShell::new(&ctx, ViewMode::Bubble);
        assert_eq!(shell.mode(), ViewMode::Bubble);
        assert_eq!(shell.active_view().id(), ViewId::Bubble);
    }

    #[test]
    fn test_switching_keeps_selection_and_fields() {
        let ctx = context();
        let mut shell = AppShell::new(&ctx, ViewMode::Map);

        ctx.selection.select(CountryId::new("FIN"));
        ctx.selection.set_view_field_typed(ViewId::Bubble, AxisKind::X, Field::Generosity);

        shell.switch_to(ViewMode::Bubble);
        assert_eq!(shell.active_view().id(), ViewId::Bubble);
        shell.switch_to(ViewMode::LinkedBrushing);
        assert_eq!(shell.active_view().title(), "Brushing Chart");
        shell.switch_to(ViewMode::Map);

        assert_eq!(ctx.selection.current(), Some(CountryId::new("FIN")));
        assert_eq!(ctx.selection.view_fields(ViewId::Bubble).x, Field::Generosity);
    }
}
