//! Space view abstraction - base trait for the mountable views

use egui::Ui;
use whr_core::ViewId;

use crate::ViewerContext;

/// Base trait for every view the shell can mount
pub trait SpaceView {
    /// Primary view id; field choices are stored under it
    fn id(&self) -> ViewId;

    /// Get the title of this view
    fn title(&self) -> &str;

    /// Draw the UI
    fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui);
}
