//! Filter inputs for the users table.

use std::time::Duration;

use chrono::{DateTime, Utc};
use egui::{TextEdit, Ui};
use log::debug;
use roster_business::{Debouncer, FilterCriteria, FilterField, UserPipeline};
use roster_states::StateCtx;

/// Filter inputs as typed.
///
/// Edits reach the pipeline once the debounce wait has passed, or straight away when no wait
/// is configured.
#[derive(Debug, Clone, Default)]
pub struct FilterPanelState {
    draft: FilterCriteria,
    debouncer: Option<Debouncer<FilterCriteria>>,
}

impl FilterPanelState {
    pub fn new(wait: Option<Duration>) -> Self {
        Self {
            draft: FilterCriteria::default(),
            debouncer: wait.map(Debouncer::new),
        }
    }

    pub fn draft(&self) -> &FilterCriteria {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut FilterCriteria {
        &mut self.draft
    }

    /// Records that the draft changed. Returns the criteria to apply now, if any.
    pub fn edited(&mut self, now: DateTime<Utc>) -> Option<FilterCriteria> {
        match self.debouncer.as_mut() {
            Some(debouncer) => {
                debouncer.call(self.draft.clone(), now);
                None
            }
            None => Some(self.draft.clone()),
        }
    }

    /// Debounced criteria that are now due.
    pub fn poll(&mut self, now: DateTime<Utc>) -> Option<FilterCriteria> {
        self.debouncer.as_mut()?.poll(now)
    }

    pub fn remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.debouncer.as_ref()?.remaining(now)
    }

    /// Empties the inputs and drops any edit still waiting.
    pub fn clear(&mut self) {
        self.draft = FilterCriteria::default();
        if let Some(debouncer) = self.debouncer.as_mut() {
            debouncer.cancel();
        }
    }
}

/// Renders the name/email/company inputs and applies edits to the [`UserPipeline`].
pub fn filter_panel(ui: &mut Ui, panel: &mut FilterPanelState, ctx: &mut StateCtx, now: DateTime<Utc>) {
    let mut changed = false;

    ui.horizontal_wrapped(|ui| {
        for field in FilterField::ALL {
            let label = ui.label(format!("{}:", field.label()));
            let hint = format!("Filter by {}", field.label().to_lowercase());
            let edit = TextEdit::singleline(panel.draft.get_mut(field))
                .hint_text(hint)
                .desired_width(160.0);
            changed |= ui.add(edit).labelled_by(label.id).changed();
        }
    });

    if changed {
        if let Some(criteria) = panel.edited(now) {
            debug!("Applying filters: {criteria:?}");
            ctx.state_mut::<UserPipeline>().set_filters(criteria);
        }
    }

    // Shown while either the applied or the typed criteria are non-empty.
    let filtered = ctx.state::<UserPipeline>().is_filtered() || panel.draft.is_filtered();
    if filtered && ui.button("Clear filters").clicked() {
        panel.clear();
        ctx.state_mut::<UserPipeline>().clear_filters();
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeDelta;

    use super::*;

    fn at(ms: i64) -> DateTime<Utc> {
        DateTime::<Utc>::UNIX_EPOCH + TimeDelta::milliseconds(ms)
    }

    #[test]
    fn test_undebounced_edits_apply_at_once() {
        let mut panel = FilterPanelState::new(None);
        panel.draft_mut().name = "le".to_owned();

        let applied = panel.edited(at(0)).expect("should apply immediately");
        assert_eq!(applied.name, "le");
        assert_eq!(panel.poll(at(1_000)), None);
    }

    #[test]
    fn test_debounced_edits_apply_latest_after_wait() {
        let mut panel = FilterPanelState::new(Some(Duration::from_millis(300)));

        panel.draft_mut().name = "l".to_owned();
        assert_eq!(panel.edited(at(0)), None);
        panel.draft_mut().name = "le".to_owned();
        assert_eq!(panel.edited(at(100)), None);

        assert_eq!(panel.poll(at(350)), None);
        assert_eq!(panel.remaining(at(350)), Some(Duration::from_millis(50)));
        assert_eq!(panel.poll(at(400)).map(|criteria| criteria.name), Some("le".to_owned()));
    }

    #[test]
    fn test_clear_drops_pending_edit() {
        let mut panel = FilterPanelState::new(Some(Duration::from_millis(300)));
        panel.draft_mut().email = "biz".to_owned();
        panel.edited(at(0));

        panel.clear();

        assert!(!panel.draft().is_filtered());
        assert_eq!(panel.poll(at(1_000)), None);
    }
}
