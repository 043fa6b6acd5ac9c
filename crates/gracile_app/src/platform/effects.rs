use std::collections::VecDeque;
use std::time::Duration;

use gracile_core::{Effect, Msg, SubmissionOutcome};
use gracile_engine::{EngineEvent, EngineHandle, ServerReply, SubmitError, SubmitSettings};
use gracile_logging::{gracile_info, gracile_warn};

/// Runs core effects on the engine and turns engine events back into
/// messages for the update loop.
pub struct EffectRunner {
    engine: EngineHandle,
    pending: usize,
    // Submissions the engine refused; reported as failed replies.
    undelivered: VecDeque<Msg>,
}

impl EffectRunner {
    pub fn new(settings: SubmitSettings) -> Result<Self, SubmitError> {
        Ok(Self::with_engine(EngineHandle::new(settings)?))
    }

    pub fn with_engine(engine: EngineHandle) -> Self {
        Self {
            engine,
            pending: 0,
            undelivered: VecDeque::new(),
        }
    }

    pub fn enqueue(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::PostForm {
                    submission_id,
                    form,
                    fields,
                } => {
                    gracile_info!(
                        "PostForm submission_id={} endpoint={} fields={}",
                        submission_id,
                        form.endpoint(),
                        fields.len()
                    );
                    let pairs = fields
                        .pairs()
                        .into_iter()
                        .map(|(key, value)| (key.to_string(), value.to_string()))
                        .collect();
                    match self.engine.submit(submission_id, form.endpoint(), pairs) {
                        Ok(()) => self.pending += 1,
                        Err(err) => {
                            gracile_warn!("Submission {} not started: {}", submission_id, err);
                            self.undelivered.push_back(Msg::ReplyReceived {
                                submission_id,
                                outcome: SubmissionOutcome::Failed {
                                    reason: err.kind.to_string(),
                                },
                            });
                        }
                    }
                }
            }
        }
    }

    /// Submissions that have not reported back yet, including ones the
    /// engine refused whose failure is still queued.
    pub fn pending(&self) -> usize {
        self.pending + self.undelivered.len()
    }

    pub fn try_recv(&mut self) -> Option<Msg> {
        if let Some(msg) = self.undelivered.pop_front() {
            return Some(msg);
        }
        let event = self.engine.try_recv()?;
        Some(self.map_event(event))
    }

    pub fn recv_timeout(&mut self, timeout: Duration) -> Option<Msg> {
        if let Some(msg) = self.undelivered.pop_front() {
            return Some(msg);
        }
        let event = self.engine.recv_timeout(timeout)?;
        Some(self.map_event(event))
    }

    fn map_event(&mut self, event: EngineEvent) -> Msg {
        match event {
            EngineEvent::SubmissionCompleted {
                submission_id,
                result,
            } => {
                self.pending = self.pending.saturating_sub(1);
                Msg::ReplyReceived {
                    submission_id,
                    outcome: map_result(submission_id, result),
                }
            }
        }
    }
}

fn map_result(submission_id: u64, result: Result<ServerReply, SubmitError>) -> SubmissionOutcome {
    match result {
        Ok(ServerReply::Accepted { rss_url }) => SubmissionOutcome::Accepted { rss_url },
        Ok(ServerReply::Rejected { error }) => SubmissionOutcome::Rejected { message: error },
        Err(err) => {
            gracile_warn!("Submission {} failed: {}", submission_id, err);
            SubmissionOutcome::Failed {
                reason: err.kind.to_string(),
            }
        }
    }
}
