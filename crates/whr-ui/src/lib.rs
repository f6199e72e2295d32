//! User interface shell for the happiness report explorer
//!
//! Owns the three views, the navigation bar that switches between them and
//! the application theme.

pub mod shell;
pub mod theme;

pub use shell::{central_panel, nav_bar, AppShell};
pub use theme::apply_theme;
