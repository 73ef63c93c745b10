use egui::{Response, Ui};
use roster_business::{Route, navigate};

use crate::state::State;

/// Shown for paths that match no page.
pub fn not_found_page(state: &mut State, ui: &mut Ui) -> Response {
    ui.vertical_centered(|ui| {
        ui.add_space(32.0);
        ui.heading("404 Not Found");
        ui.label("There is nothing at this address.");
        ui.add_space(8.0);
        if ui.button("Go to the dashboard").clicked() {
            navigate(&mut state.ctx, Route::Dashboard);
        }
    })
    .response
}
