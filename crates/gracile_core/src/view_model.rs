use crate::{FormKind, Phase, SubmissionId};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub form: FormKind,
    pub phase: Phase,
    pub in_flight: usize,
    pub error_region: StatusRegionView,
    pub success_region: StatusRegionView,
    /// Submission whose reply is currently on screen.
    pub last_applied: Option<SubmissionId>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusRegionView {
    pub text: String,
    pub visible: bool,
}
