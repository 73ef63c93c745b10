//! Page controls under the users table.

use egui::{ComboBox, Ui};
use roster_business::{PageRange, Pagination};

/// Choices offered by the page-size selector.
pub const PAGE_SIZES: [usize; 4] = [5, 10, 20, 50];

/// Page numbers shown on either side of the current one before collapsing into a gap.
const PAGE_WINDOW: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    Prev,
    Next,
    GoTo(usize),
    PageSize(usize),
}

/// Page numbers to render, with `None` standing for a collapsed gap.
///
/// Always includes the first and last page plus a window around `current`.
fn page_numbers(current: usize, total: usize) -> Vec<Option<usize>> {
    let mut numbers = Vec::new();
    let mut last_shown = 0;

    for page in 1..=total {
        let near = page.abs_diff(current) <= PAGE_WINDOW;
        if page == 1 || page == total || near {
            if page > last_shown + 1 {
                numbers.push(None);
            }
            numbers.push(Some(page));
            last_shown = page;
        }
    }
    numbers
}

/// Draws prev / numbered pages / next, the page-size selector and the shown range.
pub fn pagination(ui: &mut Ui, pagination: &Pagination, range: Option<PageRange>) -> Option<PageAction> {
    let mut action = None;

    ui.horizontal_wrapped(|ui| {
        if ui
            .add_enabled(pagination.has_prev(), egui::Button::new("◀ Prev"))
            .clicked()
        {
            action = Some(PageAction::Prev);
        }

        for number in page_numbers(pagination.current_page(), pagination.total_pages()) {
            match number {
                Some(page) => {
                    let selected = page == pagination.current_page();
                    if ui.selectable_label(selected, page.to_string()).clicked() && !selected {
                        action = Some(PageAction::GoTo(page));
                    }
                }
                None => {
                    ui.weak("…");
                }
            }
        }

        if ui
            .add_enabled(pagination.has_next(), egui::Button::new("Next ▶"))
            .clicked()
        {
            action = Some(PageAction::Next);
        }

        ui.separator();

        let mut page_size = pagination.page_size();
        ComboBox::from_label("per page")
            .selected_text(page_size.to_string())
            .show_ui(ui, |ui| {
                for size in PAGE_SIZES {
                    ui.selectable_value(&mut page_size, size, size.to_string());
                }
            });
        if page_size != pagination.page_size() {
            action = Some(PageAction::PageSize(page_size));
        }

        ui.separator();

        match range {
            Some(range) => ui.label(format!("Showing {range}")),
            None => ui.weak("No results"),
        };
    });

    action
}

#[cfg(test)]
mod tests {
    use egui_kittest::Harness;
    use kittest::Queryable;
    use roster_business::{UserPipeline, UserRecord};

    use super::*;

    #[test]
    fn test_page_numbers_collapse_long_ranges() {
        assert_eq!(page_numbers(1, 0), Vec::<Option<usize>>::new());
        assert_eq!(page_numbers(1, 3), vec![Some(1), Some(2), Some(3)]);
        assert_eq!(
            page_numbers(5, 10),
            vec![
                Some(1),
                None,
                Some(3),
                Some(4),
                Some(5),
                Some(6),
                Some(7),
                None,
                Some(10)
            ]
        );
        assert_eq!(
            page_numbers(1, 10),
            vec![Some(1), Some(2), Some(3), None, Some(10)]
        );
    }

    fn pipeline(count: u64, page_size: usize) -> UserPipeline {
        let users = (1..=count)
            .map(|id| UserRecord {
                id,
                name: format!("User {id}"),
                ..UserRecord::default()
            })
            .collect::<Vec<_>>();
        let mut pipeline = UserPipeline::new(page_size);
        pipeline.set_source(users);
        pipeline
    }

    fn harness<'a>(pipeline: UserPipeline) -> Harness<'a, UserPipeline> {
        Harness::new_ui_state(
            |ui, pipeline: &mut UserPipeline| {
                let range = pipeline.page_range();
                match super::pagination(ui, pipeline.pagination(), range) {
                    Some(PageAction::Prev) => pipeline.prev_page(),
                    Some(PageAction::Next) => pipeline.next_page(),
                    Some(PageAction::GoTo(page)) => pipeline.go_to_page(page),
                    Some(PageAction::PageSize(size)) => pipeline.set_page_size(size),
                    None => {}
                }
            },
            pipeline,
        )
    }

    #[test]
    fn test_shows_range() {
        let mut harness = harness(pipeline(12, 5));
        harness.step();

        assert!(harness.query_by_label("Showing 1–5 of 12").is_some());
    }

    #[test]
    fn test_next_advances_page() {
        let mut harness = harness(pipeline(12, 5));
        harness.step();

        harness.get_by_label("Next ▶").click();
        harness.step();
        harness.step();

        assert_eq!(harness.state().pagination().current_page(), 2);
        assert!(harness.query_by_label("Showing 6–10 of 12").is_some());
    }

    #[test]
    fn test_no_results_label() {
        let mut harness = harness(pipeline(0, 5));
        harness.step();

        assert!(harness.query_by_label("No results").is_some());
    }
}
