use egui::{Response, Ui};

use crate::state::AppThemeManager;

/// Button that flips between light and dark and persists the choice.
pub fn theme_toggle(ui: &mut Ui, theme: &mut AppThemeManager) -> Response {
    let (text, hover) = if theme.is_dark() {
        ("☀ Light", "Switch to the light theme")
    } else {
        ("🌙 Dark", "Switch to the dark theme")
    };

    let response = ui.button(text).on_hover_text(hover);
    if response.clicked() {
        theme.toggle();
    }
    response
}
