//! Applies the business-level theme to egui (and the page root on the web).

use log::debug;
use roster_business::{Theme, ThemeRoot};

/// Theme root backed by an `egui::Context`.
pub struct EguiThemeRoot {
    ctx: egui::Context,
}

impl EguiThemeRoot {
    pub fn new(ctx: egui::Context) -> Self {
        Self { ctx }
    }
}

impl ThemeRoot for EguiThemeRoot {
    fn apply(&mut self, theme: Theme) {
        debug!("Applying theme {theme}");
        self.ctx.set_theme(to_egui(theme));

        #[cfg(target_arch = "wasm32")]
        set_data_theme(theme);
    }
}

pub fn to_egui(theme: Theme) -> egui::Theme {
    match theme {
        Theme::Light => egui::Theme::Light,
        Theme::Dark => egui::Theme::Dark,
    }
}

/// The host's color scheme, when the platform reports one.
pub fn system_prefers_dark(ctx: &egui::Context) -> Option<bool> {
    ctx.system_theme().map(|theme| theme == egui::Theme::Dark)
}

/// Mirrors the theme onto `<html data-theme="...">` so page CSS can follow it.
#[cfg(target_arch = "wasm32")]
fn set_data_theme(theme: Theme) {
    let Some(root) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.document_element())
    else {
        return;
    };

    if let Err(err) = root.set_attribute("data-theme", theme.as_str()) {
        log::warn!("Failed to set data-theme: {err:?}");
    }
}
