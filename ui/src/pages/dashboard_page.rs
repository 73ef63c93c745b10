//! Dashboard: filters, the users table and pagination.

use chrono::Utc;
use egui::{Response, Ui};
use roster_business::{Route, UserPipeline, UsersCompute, navigate};

use crate::state::State;
use crate::widgets::{self, AlertKind, LoadingSpinner, PageAction, TableAction};

/// Renders the dashboard and applies whatever the user clicked.
pub fn dashboard_page(state: &mut State, ui: &mut Ui) -> Response {
    ui.vertical(|ui| {
        ui.heading("User Dashboard");
        ui.add_space(8.0);

        widgets::filter_panel(ui, &mut state.filters, &mut state.ctx, Utc::now());
        ui.add_space(8.0);

        let (loading, has_data, error) = match state.ctx.cached::<UsersCompute>() {
            Some(cache) => (
                cache.is_loading(),
                cache.has_data(),
                cache.error().map(ToString::to_string),
            ),
            None => (false, false, None),
        };

        if let Some(error) = error {
            // Stale data stays on screen, so a failed refresh is only a warning.
            let (message, kind) = if has_data {
                (
                    format!("{error}. Showing the last loaded users."),
                    AlertKind::Warning,
                )
            } else {
                (error, AlertKind::Error)
            };
            if widgets::error_alert(ui, &message, kind, true) {
                if let Some(cache) = state.ctx.cached_mut::<UsersCompute>() {
                    cache.dismiss_error();
                }
            }
            ui.add_space(8.0);
        }

        if loading && !has_data {
            LoadingSpinner::new().message("Loading users...").show(ui);
            return;
        }

        let pipeline = state.ctx.state::<UserPipeline>();
        let table_action = widgets::users_table(ui, pipeline);
        let page_action = if pipeline.users().is_empty() {
            None
        } else {
            ui.add_space(8.0);
            widgets::pagination(ui, pipeline.pagination(), pipeline.page_range())
        };

        match table_action {
            Some(TableAction::Sort(field)) => state.ctx.state_mut::<UserPipeline>().set_sort(field),
            Some(TableAction::Open(id)) => navigate(&mut state.ctx, Route::UserDetails(id.to_string())),
            None => {}
        }

        if let Some(action) = page_action {
            let pipeline = state.ctx.state_mut::<UserPipeline>();
            match action {
                PageAction::Prev => pipeline.prev_page(),
                PageAction::Next => pipeline.next_page(),
                PageAction::GoTo(page) => pipeline.go_to_page(page),
                PageAction::PageSize(size) => pipeline.set_page_size(size),
            }
        }
    })
    .response
}
