//! Users table with sortable headers.
//!
//! Uses a striped `Grid` with framed header and data cells.

use egui::{Button, Color32, Frame, InnerResponse, Margin, RichText, ScrollArea, Stroke, Ui};
use roster_business::{SortCriteria, SortDirection, SortField, UserPipeline};

/// Border color for the table frame.
const TABLE_BORDER_COLOR: Color32 = Color32::from_rgb(200, 200, 200);

/// Columns in display order.
pub const TABLE_COLUMNS: [SortField; 5] = [
    SortField::Id,
    SortField::Name,
    SortField::Username,
    SortField::Email,
    SortField::Company,
];

/// What the user asked for while the table was drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableAction {
    Sort(SortField),
    Open(u64),
}

fn header_cell<R>(ui: &mut Ui, add_contents: impl FnOnce(&mut Ui) -> R) -> InnerResponse<R> {
    Frame::NONE
        .fill(ui.visuals().faint_bg_color)
        .inner_margin(Margin::symmetric(8, 8))
        .show(ui, add_contents)
}

fn data_cell<R>(ui: &mut Ui, add_contents: impl FnOnce(&mut Ui) -> R) -> InnerResponse<R> {
    Frame::NONE
        .inner_margin(Margin::symmetric(8, 6))
        .show(ui, add_contents)
}

/// Header text, with an arrow on the active sort column.
pub fn header_text(field: SortField, sort: SortCriteria) -> String {
    if sort.field != field {
        return field.label().to_owned();
    }
    match sort.direction {
        SortDirection::Ascending => format!("{} ⬆", field.label()),
        SortDirection::Descending => format!("{} ⬇", field.label()),
    }
}

/// Draws the current page. Shows an empty-state message when nothing matches.
pub fn users_table(ui: &mut Ui, pipeline: &UserPipeline) -> Option<TableAction> {
    if pipeline.page().len() == 0 {
        let message = if pipeline.is_filtered() {
            "No users match the current filters."
        } else {
            "No users to show."
        };
        ui.add_space(8.0);
        ui.weak(message);
        return None;
    }

    let sort = pipeline.sort();
    let mut action = None;

    Frame::NONE
        .stroke(Stroke::new(1.0, TABLE_BORDER_COLOR))
        .inner_margin(Margin::ZERO)
        .show(ui, |ui| {
            ScrollArea::both().auto_shrink([false, true]).show(ui, |ui| {
                egui::Grid::new("users_table")
                    .num_columns(TABLE_COLUMNS.len())
                    .striped(true)
                    .spacing([12.0, 0.0])
                    .min_col_width(48.0)
                    .show(ui, |ui| {
                        for field in TABLE_COLUMNS {
                            header_cell(ui, |ui| {
                                let text = RichText::new(header_text(field, sort)).strong();
                                let clicked = ui
                                    .add(Button::new(text).frame(false))
                                    .on_hover_text(format!("Sort by {}", field.label()))
                                    .clicked();
                                if clicked {
                                    action = Some(TableAction::Sort(field));
                                }
                            });
                        }
                        ui.end_row();

                        for user in pipeline.page() {
                            data_cell(ui, |ui| {
                                ui.label(RichText::new(user.id.to_string()).monospace());
                            });
                            data_cell(ui, |ui| {
                                if ui.link(&user.name).on_hover_text("View details").clicked() {
                                    action = Some(TableAction::Open(user.id));
                                }
                            });
                            data_cell(ui, |ui| {
                                ui.label(&user.username);
                            });
                            data_cell(ui, |ui| {
                                ui.label(&user.email);
                            });
                            data_cell(ui, |ui| {
                                ui.label(user.company_name());
                            });
                            ui.end_row();
                        }
                    });
            });
        });

    action
}

#[cfg(test)]
mod tests {
    use egui_kittest::Harness;
    use kittest::Queryable;
    use roster_business::{Company, UserRecord};

    use super::*;

    fn pipeline() -> UserPipeline {
        let users = ["Leanne Graham", "Ervin Howell", "Clementine Bauch"]
            .iter()
            .enumerate()
            .map(|(index, name)| UserRecord {
                id: index as u64 + 1,
                name: (*name).to_owned(),
                username: format!("user{}", index + 1),
                email: format!("user{}@example.com", index + 1),
                company: Company {
                    name: format!("Company {}", index + 1),
                    ..Company::default()
                },
                ..UserRecord::default()
            })
            .collect::<Vec<_>>();

        let mut pipeline = UserPipeline::new(2);
        pipeline.set_source(users);
        pipeline
    }

    #[test]
    fn test_header_text_marks_active_column() {
        let mut sort = SortCriteria::default();
        assert_eq!(header_text(SortField::Id, sort), "ID ⬆");
        assert_eq!(header_text(SortField::Name, sort), "Name");

        sort.direction = SortDirection::Descending;
        assert_eq!(header_text(SortField::Id, sort), "ID ⬇");
    }

    #[test]
    fn test_table_shows_current_page_only() {
        let mut harness = Harness::new_ui_state(
            |ui, pipeline: &mut UserPipeline| {
                users_table(ui, pipeline);
            },
            pipeline(),
        );
        harness.step();

        assert!(harness.query_by_label("Leanne Graham").is_some());
        assert!(harness.query_by_label("user2@example.com").is_some());
        assert!(harness.query_by_label("Clementine Bauch").is_none());
    }

    #[test]
    fn test_header_click_sorts() {
        let mut harness = Harness::new_ui_state(
            |ui, pipeline: &mut UserPipeline| {
                if let Some(TableAction::Sort(field)) = users_table(ui, pipeline) {
                    pipeline.set_sort(field);
                }
            },
            pipeline(),
        );
        harness.step();

        harness.get_by_label("Name").click();
        harness.step();
        harness.step();

        assert_eq!(harness.state().sort().field, SortField::Name);
        assert!(harness.query_by_label("Name ⬆").is_some());
    }

    #[test]
    fn test_empty_state_when_filtered_out() {
        let mut empty = pipeline();
        empty.set_filter(roster_business::FilterField::Name, "zzz");
        let mut harness = Harness::new_ui_state(
            |ui, pipeline: &mut UserPipeline| {
                users_table(ui, pipeline);
            },
            empty,
        );
        harness.step();

        assert!(
            harness
                .query_by_label_contains("No users match")
                .is_some()
        );
    }
}
