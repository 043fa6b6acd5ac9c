use crate::{FormInputSet, SubmissionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Document finished loading; both status regions start hidden.
    PageLoaded,
    /// Submit was intercepted and the inputs were read from the document.
    FormSubmitted(FormInputSet),
    /// Engine finished a submission, in whatever order replies arrive.
    ReplyReceived {
        submission_id: SubmissionId,
        outcome: SubmissionOutcome,
    },
}

/// What a finished submission means for the status regions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Server accepted the subscription and echoed the feed url.
    Accepted { rss_url: String },
    /// Server answered with a truthy `error` field.
    Rejected { message: String },
    /// No usable reply: network, status code or body problems.
    Failed { reason: String },
}
