use egui::{Response, RichText, Ui};
use roster_utils::version_info;

use crate::utils::colors::COLOR_MUTED;

/// Displays the build version, e.g. `v0.1.0 (abc1234, 2026-10-19)`.
pub fn env_version(ui: &mut Ui) -> Response {
    ui.label(
        RichText::new(version_info::format_version())
            .small()
            .color(COLOR_MUTED),
    )
}

#[cfg(test)]
mod env_version_widget_test {
    use egui_kittest::Harness;
    use kittest::Queryable;

    #[test]
    fn test_env_version_widget() {
        let mut harness = Harness::new_ui(|ui| {
            super::env_version(ui);
        });
        harness.step();

        assert!(
            harness
                .query_by_label_contains(roster_utils::version_info::build_version())
                .is_some(),
            "env_version widget should display the crate version"
        );
    }
}
