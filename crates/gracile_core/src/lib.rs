//! Gracile core: pure submit/reply state machine and view-model helpers.
mod effect;
mod form;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use form::{FieldName, FormInputSet, FormKind};
pub use msg::{Msg, SubmissionOutcome};
pub use state::{AppState, Phase, SubmissionId};
pub use update::update;
pub use view_model::{AppViewModel, StatusRegionView};
