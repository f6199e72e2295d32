//! Toggle button icons

use std::path::Path;

use tracing::{debug, warn};
use whr_views::ToggleIcons;

pub const TOGGLE_ON: &str = "ToggleButtonOn.png";
pub const TOGGLE_OFF: &str = "ToggleButtonOff.png";

/// Locate the toggle icons in `dir`
///
/// Returns None, and the views fall back to plain toggles, when either
/// image is missing.
pub fn find_toggle_icons(dir: &Path) -> Option<ToggleIcons> {
    let on = dir.join(TOGGLE_ON);
    let off = dir.join(TOGGLE_OFF);

    for path in [&on, &off] {
        if !path.is_file() {
            warn!("Icon {} not found, using plain toggle buttons", path.display());
            return None;
        }
    }

    debug!("Using toggle icons from {}", dir.display());
    Some(ToggleIcons {
        on: file_uri(&on),
        off: file_uri(&off),
    })
}

fn file_uri(path: &Path) -> String {
    let absolute = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    format!("file://{}", absolute.display())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_icons_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        assert!(find_toggle_icons(dir.path()).is_none());

        std::fs::write(dir.path().join(TOGGLE_ON), b"png").unwrap();
        assert!(find_toggle_icons(dir.path()).is_none());
    }

    #[test]
    fn test_icons_resolve_to_file_uris() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(TOGGLE_ON), b"png").unwrap();
        std::fs::write(dir.path().join(TOGGLE_OFF), b"png").unwrap();

        let icons = find_toggle_icons(dir.path()).unwrap();
        assert!(icons.on.starts_with("file://"));
        assert!(icons.on.ends_with(TOGGLE_ON));
        assert!(icons.off.ends_with(TOGGLE_OFF));
    }
}
