use egui::{Align, Layout, Response, Ui, UiBuilder};

pub const DEFAULT_LOADING_MESSAGE: &str = "Loading...";

/// Spinner with an optional message.
///
/// An empty message shows the spinner alone. With `overlay` set, the spinner is centered over
/// a dimmed copy of the space the parent has left.
#[derive(Debug, Clone, Copy)]
pub struct LoadingSpinner<'a> {
    message: &'a str,
    overlay: bool,
}

impl Default for LoadingSpinner<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> LoadingSpinner<'a> {
    pub fn new() -> Self {
        Self {
            message: DEFAULT_LOADING_MESSAGE,
            overlay: false,
        }
    }

    pub fn message(mut self, message: &'a str) -> Self {
        self.message = message;
        self
    }

    pub fn overlay(mut self, overlay: bool) -> Self {
        self.overlay = overlay;
        self
    }

    pub fn show(self, ui: &mut Ui) -> Response {
        if !self.overlay {
            return self.contents(ui);
        }

        let rect = ui.available_rect_before_wrap();
        let dim = ui.visuals().panel_fill.gamma_multiply(0.7);
        ui.painter().rect_filled(rect, 0.0, dim);

        ui.scope_builder(
            UiBuilder::new()
                .max_rect(rect)
                .layout(Layout::top_down(Align::Center)),
            |ui| {
                ui.add_space((rect.height() / 2.0 - 12.0).max(0.0));
                self.contents(ui);
            },
        )
        .response
    }

    fn contents(self, ui: &mut Ui) -> Response {
        ui.horizontal(|ui| {
            ui.spinner();
            if !self.message.is_empty() {
                ui.label(self.message);
            }
        })
        .response
    }
}
