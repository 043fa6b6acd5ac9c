//! Gracile engine: form submission IO and reply classification.
mod engine;
mod reply;
mod submit;
mod types;

pub use engine::EngineHandle;
pub use reply::parse_reply;
pub use submit::{encode_form, FormPairs, ReqwestSubmitter, SubmitSettings, Submitter};
pub use types::{EngineEvent, FailureKind, ServerReply, SubmissionId, SubmitError};
