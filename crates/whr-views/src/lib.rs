//! View system for the happiness report explorer
//!
//! Every view draws straight onto an egui painter from the shared
//! [`Dataset`] and talks to the other views only through the shared
//! [`SelectionState`].

mod space_view;
pub mod bubble;
pub mod colors;
pub mod legend;
pub mod linked;
pub mod map;
pub mod scale;
pub mod sizing;
pub mod tooltip;
pub mod widgets;

pub use bubble::{BubbleChartView, BubbleLayout, Highlight, PlotFrame};
pub use linked::{LinkedBrushingView, Panel};
pub use map::{GeoTransform, MapLayer, MapView};
pub use space_view::SpaceView;
pub use widgets::ToggleIcons;

use std::sync::Arc;

use parking_lot::RwLock;
use whr_core::SelectionState;
use whr_data::Dataset;

/// Display options shared by every view
#[derive(Debug, Clone)]
pub struct ViewOptions {
    pub tooltips_enabled: bool,

    /// Icons for toggle buttons; None falls back to plain toggles
    pub toggle_icons: Option<ToggleIcons>,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            tooltips_enabled: true,
            toggle_icons: None,
        }
    }
}

/// Context passed to views during rendering
#[derive(Clone)]
pub struct ViewerContext {
    /// Joined country table, read-only
    pub dataset: Arc<Dataset>,

    /// Shared selection and per-view field choices
    pub selection: Arc<SelectionState>,

    /// Display options
    pub options: Arc<RwLock<ViewOptions>>,
}

impl ViewerContext {
    pub fn new(dataset: Arc<Dataset>, selection: Arc<SelectionState>) -> Self {
        Self {
            dataset,
            selection,
            options: Arc::new(RwLock::new(ViewOptions::default())),
        }
    }

    pub fn tooltips_enabled(&self) -> bool {
        self.options.read().tooltips_enabled
    }

    pub fn toggle_icons(&self) -> Option<ToggleIcons> {
        self.options.read().toggle_icons.clone()
    }
}
