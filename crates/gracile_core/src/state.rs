use std::collections::BTreeSet;

use crate::view_model::{AppViewModel, StatusRegionView};
use crate::{FormKind, SubmissionOutcome};

pub type SubmissionId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct StatusRegion {
    text: String,
    visible: bool,
}

impl StatusRegion {
    fn show(&mut self, text: String) {
        self.text = text;
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
    }

    fn view(&self) -> StatusRegionView {
        StatusRegionView {
            text: self.text.clone(),
            visible: self.visible,
        }
    }
}

/// The two status regions. Only `show_error`/`show_success` make a region
/// visible and each hides the other one, so they are never both shown.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct StatusDisplay {
    error: StatusRegion,
    success: StatusRegion,
}

impl StatusDisplay {
    fn show_error(&mut self, text: String) {
        self.error.show(text);
        self.success.hide();
    }

    fn show_success(&mut self, text: String) {
        self.success.show(text);
        self.error.hide();
    }

    fn reset(&mut self) {
        self.error.hide();
        self.success.hide();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    form: FormKind,
    next_submission_id: SubmissionId,
    in_flight: BTreeSet<SubmissionId>,
    status: StatusDisplay,
    last_applied: Option<SubmissionId>,
    dirty: bool,
}

impl AppState {
    pub fn new(form: FormKind) -> Self {
        Self {
            form,
            next_submission_id: 1,
            ..Self::default()
        }
    }

    pub fn form(&self) -> FormKind {
        self.form
    }

    pub fn phase(&self) -> Phase {
        if self.in_flight.is_empty() {
            Phase::Idle
        } else {
            Phase::Submitting
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            form: self.form,
            phase: self.phase(),
            in_flight: self.in_flight.len(),
            error_region: self.status.error.view(),
            success_region: self.status.success.view(),
            last_applied: self.last_applied,
            dirty: self.dirty,
        }
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn reset_status(&mut self) {
        self.status.reset();
        self.mark_dirty();
    }

    /// Allocates an id for a new submission and tracks it as in flight.
    pub(crate) fn begin_submission(&mut self) -> SubmissionId {
        // `Default` leaves the counter at zero; ids start at 1 either way.
        let id = self.next_submission_id.max(1);
        self.next_submission_id = id + 1;
        self.in_flight.insert(id);
        self.mark_dirty();
        id
    }

    /// Applies a reply in arrival order; the latest arrival always wins.
    pub(crate) fn apply_outcome(&mut self, submission_id: SubmissionId, outcome: SubmissionOutcome) {
        self.in_flight.remove(&submission_id);
        match outcome {
            SubmissionOutcome::Accepted { rss_url } => self.status.show_success(rss_url),
            SubmissionOutcome::Rejected { message } => self.status.show_error(message),
            SubmissionOutcome::Failed { reason } => {
                self.status.show_error(format!("Request failed: {reason}"))
            }
        }
        self.last_applied = Some(submission_id);
        self.mark_dirty();
    }
}
