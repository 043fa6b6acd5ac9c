use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::PageLoaded => {
            state.reset_status();
            Vec::new()
        }
        Msg::FormSubmitted(fields) => {
            // No guard on in-flight submissions: every submit posts.
            let submission_id = state.begin_submission();
            vec![Effect::PostForm {
                submission_id,
                form: state.form(),
                fields,
            }]
        }
        Msg::ReplyReceived {
            submission_id,
            outcome,
        } => {
            state.apply_outcome(submission_id, outcome);
            Vec::new()
        }
    };

    (state, effects)
}
