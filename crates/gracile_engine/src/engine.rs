use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use gracile_logging::{gracile_info, gracile_warn};

use crate::submit::{FormPairs, ReqwestSubmitter, SubmitSettings, Submitter};
use crate::{EngineEvent, FailureKind, ServerReply, SubmissionId, SubmitError};

enum EngineCommand {
    Submit {
        submission_id: SubmissionId,
        endpoint: String,
        fields: FormPairs,
    },
}

/// Handle to the background runtime that runs submissions.
///
/// Every submission runs as its own task, so nothing blocks or cancels
/// another one; completions come back in the order they finish.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: SubmitSettings) -> Result<Self, SubmitError> {
        let submitter = ReqwestSubmitter::new(settings)?;
        Ok(Self::with_submitter(Arc::new(submitter)))
    }

    pub fn with_submitter(submitter: Arc<dyn Submitter>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let submitter = submitter.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(submitter.as_ref(), command, event_tx).await;
                });
            }
            // Let in-flight submissions report before the runtime drops.
            runtime.shutdown_timeout(Duration::from_secs(5));
        });

        Self { cmd_tx, event_rx }
    }

    /// Hands a submission to the runtime. Fails only when the engine thread
    /// has exited, in which case no completion event will follow.
    pub fn submit(
        &self,
        submission_id: SubmissionId,
        endpoint: impl Into<String>,
        fields: FormPairs,
    ) -> Result<(), SubmitError> {
        self.cmd_tx
            .send(EngineCommand::Submit {
                submission_id,
                endpoint: endpoint.into(),
                fields,
            })
            .map_err(|_| {
                SubmitError::new(
                    FailureKind::EngineStopped,
                    format!("submission {submission_id} not started"),
                )
            })
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    submitter: &dyn Submitter,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Submit {
            submission_id,
            endpoint,
            fields,
        } => {
            let result: Result<ServerReply, SubmitError> =
                submitter.submit(submission_id, &endpoint, &fields).await;
            match &result {
                Ok(reply) => gracile_info!("Submission {} completed: {:?}", submission_id, reply),
                Err(err) => gracile_warn!("Submission {} failed: {}", submission_id, err),
            }
            let _ = event_tx.send(EngineEvent::SubmissionCompleted {
                submission_id,
                result,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_reports_stopped_engine() {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (_event_tx, event_rx) = mpsc::channel();
        drop(cmd_rx);
        let engine = EngineHandle { cmd_tx, event_rx };

        let err = engine
            .submit(7, "/process", Vec::new())
            .expect_err("send to a closed channel");

        assert_eq!(err.kind, FailureKind::EngineStopped);
        assert!(engine.try_recv().is_none());
    }
}
