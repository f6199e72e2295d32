//! Bubble chart view

mod layout;
mod view;

pub use layout::{is_click, Bubble, BubbleLayout, PlotFrame, MIN_BRUSH_SPAN};
pub use view::{BubbleChartView, BubbleOptions, Highlight};
