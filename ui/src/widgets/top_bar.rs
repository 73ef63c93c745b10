use egui::{Align, Layout, Ui};
use roster_business::{RefreshUsersCommand, UsersCompute};

use crate::state::State;
use crate::widgets::{env_version, theme_toggle};

/// App title, refresh, theme toggle and the version label.
pub fn top_bar(ui: &mut Ui, state: &mut State) {
    let loading = state
        .ctx
        .cached::<UsersCompute>()
        .is_some_and(UsersCompute::is_loading);

    egui::MenuBar::new().ui(ui, |ui| {
        ui.strong("Roster");
        ui.separator();

        if ui
            .button("🔄 Refresh")
            .on_hover_text("Fetch the user list again")
            .clicked()
        {
            state.ctx.dispatch::<RefreshUsersCommand>();
        }
        if loading {
            ui.spinner();
        }

        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            env_version(ui);
            theme_toggle(ui, &mut state.theme);
        });
    });
}
