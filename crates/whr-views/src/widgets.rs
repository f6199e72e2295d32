//! Small widgets shared by the views

use egui::{Button, Image, Response, SelectableLabel, Ui, Vec2};

/// Image URIs for the on and off states of a toggle button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleIcons {
    pub on: String,
    pub off: String,
}

const ICON_SIZE: Vec2 = Vec2::new(40.0, 20.0);

/// A button that flips `value` when clicked
///
/// Shows the toggle icons when they are available, otherwise a plain
/// selectable label.
pub fn toggle_button(ui: &mut Ui, value: &mut bool, label: &str, icons: Option<&ToggleIcons>) -> Response {
    let response = match icons {
        Some(icons) => {
            let uri = if *value { &icons.on } else { &icons.off };
            let image = Image::from_uri(uri.clone()).fit_to_exact_size(ICON_SIZE);
            ui.add(Button::image_and_text(image, label))
        }
        None => ui.add(SelectableLabel::new(*value, label)),
    };
    if response.clicked() {
        *value = !*value;
    }
    response
}
