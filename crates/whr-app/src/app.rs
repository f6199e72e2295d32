//! eframe application

use eframe::egui::Context;
use whr_core::ViewMode;
use whr_ui::{apply_theme, central_panel, nav_bar, AppShell};
use whr_views::ViewerContext;

/// Main application state
pub struct ExplorerApp {
    /// Dataset, selection and display options shared by the views
    viewer: ViewerContext,

    shell: AppShell,
}

impl ExplorerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, viewer: ViewerContext, initial: ViewMode) -> Self {
        apply_theme(&cc.egui_ctx);
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let shell = AppShell::new(&viewer, initial);
        Self { viewer, shell }
    }
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        nav_bar(ctx, &mut self.shell, &self.viewer);
        central_panel(ctx, &mut self.shell, &self.viewer);
    }
}
