//! Details for a single user, reached from the dashboard or a `/user/{id}` path.

use egui::{Grid, Response, RichText, Ui};
use roster_business::{Route, UserDetailCompute, UserRecord, navigate};

use crate::state::State;
use crate::widgets::{self, AlertKind, LoadingSpinner};

/// Renders the page for the raw `user_id` taken from the route.
pub fn user_details_page(state: &mut State, ui: &mut Ui, user_id: &str) -> Response {
    ui.vertical(|ui| {
        if ui.button("⬅ Back to users").clicked() {
            navigate(&mut state.ctx, Route::Dashboard);
            return;
        }
        ui.add_space(8.0);
        ui.heading("User Details");
        ui.add_space(8.0);

        let Some(detail) = state.ctx.cached::<UserDetailCompute>() else {
            return;
        };

        match detail {
            UserDetailCompute::Loading(_) => {
                LoadingSpinner::new().message("Loading user...").show(ui);
            }
            UserDetailCompute::Loaded(user) => user_fields(ui, user),
            UserDetailCompute::Failed(error) => {
                let (message, kind) = if error.is_not_found() {
                    (format!("User {user_id} was not found."), AlertKind::Warning)
                } else {
                    (error.to_string(), AlertKind::Error)
                };
                if widgets::error_alert(ui, &message, kind, true) {
                    if let Some(detail) = state.ctx.cached_mut::<UserDetailCompute>() {
                        detail.dismiss_error();
                    }
                }
            }
            UserDetailCompute::Idle => {
                if ui.button("Retry").clicked() {
                    navigate(&mut state.ctx, Route::UserDetails(user_id.to_owned()));
                }
            }
        }
    })
    .response
}

fn user_fields(ui: &mut Ui, user: &UserRecord) {
    ui.label(RichText::new(&user.name).size(20.0).strong());
    ui.weak(format!("@{}", user.username));
    ui.add_space(8.0);

    Grid::new("user_details")
        .num_columns(2)
        .spacing([16.0, 6.0])
        .striped(true)
        .show(ui, |ui| {
            let mut row = |label: &str, value: &str| {
                ui.strong(label);
                ui.label(value);
                ui.end_row();
            };
            row("ID", &user.id.to_string());
            row("Email", &user.email);
            row("Phone", &user.phone);
            row("Website", &user.website);
            row("Address", &user.address.one_line());
            row("Company", &user.company.name);
            row("Catch phrase", &user.company.catch_phrase);
        });
}
