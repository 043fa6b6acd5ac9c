use crate::{FormInputSet, FormKind, SubmissionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// POST the fields to the endpoint of `form`; the reply comes back as
    /// `Msg::ReplyReceived` carrying the same `submission_id`.
    PostForm {
        submission_id: SubmissionId,
        form: FormKind,
        fields: FormInputSet,
    },
}
