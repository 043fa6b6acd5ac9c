use std::sync::Once;

use gracile_core::{
    update, AppState, Effect, FieldName, FormInputSet, FormKind, Msg, Phase, SubmissionOutcome,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(gracile_logging::initialize_for_tests);
}

fn fields(user_id: &str, rss_url: &str, daily_amount: &str) -> FormInputSet {
    FormInputSet::new()
        .with(FieldName::UserId, user_id)
        .with(FieldName::RssUrl, rss_url)
        .with(FieldName::DailyAmount, daily_amount)
}

fn loaded(form: FormKind) -> AppState {
    let (mut state, _) = update(AppState::new(form), Msg::PageLoaded);
    state.consume_dirty();
    state
}

#[test]
fn page_load_hides_both_regions() {
    init_logging();
    let (mut state, effects) = update(AppState::new(FormKind::Process), Msg::PageLoaded);
    let view = state.view();

    assert!(effects.is_empty());
    assert!(!view.error_region.visible);
    assert!(!view.success_region.visible);
    assert_eq!(view.phase, Phase::Idle);
    assert!(state.consume_dirty());
}

#[test]
fn submit_emits_post_with_exact_fields() {
    init_logging();
    let state = loaded(FormKind::AddSubscription);
    let input = fields("7", "http://example.com/feed", "3");

    let (mut next, effects) = update(state, Msg::FormSubmitted(input.clone()));

    assert_eq!(
        effects,
        vec![Effect::PostForm {
            submission_id: 1,
            form: FormKind::AddSubscription,
            fields: input,
        }]
    );
    assert_eq!(next.view().phase, Phase::Submitting);
    assert_eq!(next.view().in_flight, 1);
    assert!(next.consume_dirty());
}

#[test]
fn submit_uses_configured_form() {
    init_logging();
    let state = loaded(FormKind::Process);
    let (_, effects) = update(state, Msg::FormSubmitted(fields("1", "u", "2")));

    match effects.as_slice() {
        [Effect::PostForm { form, .. }] => assert_eq!(form.endpoint(), "/process"),
        other => panic!("unexpected effects: {other:?}"),
    }
}

#[test]
fn submissions_while_in_flight_are_not_blocked() {
    init_logging();
    let state = loaded(FormKind::AddSubscription);
    let (state, first) = update(state, Msg::FormSubmitted(fields("1", "a", "1")));
    let (state, second) = update(state, Msg::FormSubmitted(fields("1", "b", "1")));

    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
    let ids: Vec<_> = first
        .iter()
        .chain(second.iter())
        .map(|effect| match effect {
            Effect::PostForm { submission_id, .. } => *submission_id,
        })
        .collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(state.view().in_flight, 2);
}

#[test]
fn error_reply_shows_error_and_hides_success() {
    init_logging();
    let state = loaded(FormKind::AddSubscription);
    let (state, _) = update(state, Msg::FormSubmitted(fields("1", "bad", "1")));
    let (mut state, effects) = update(
        state,
        Msg::ReplyReceived {
            submission_id: 1,
            outcome: SubmissionOutcome::Rejected {
                message: "bad url".to_string(),
            },
        },
    );
    let view = state.view();

    assert!(effects.is_empty());
    assert_eq!(view.error_region.text, "bad url");
    assert!(view.error_region.visible);
    assert!(!view.success_region.visible);
    assert_eq!(view.phase, Phase::Idle);
    assert_eq!(view.last_applied, Some(1));
    assert!(state.consume_dirty());
}

#[test]
fn accepted_reply_shows_success_and_hides_error() {
    init_logging();
    let state = loaded(FormKind::AddSubscription);
    let (state, _) = update(state, Msg::FormSubmitted(fields("1", "bad", "1")));
    let (state, _) = update(
        state,
        Msg::ReplyReceived {
            submission_id: 1,
            outcome: SubmissionOutcome::Rejected {
                message: "bad url".to_string(),
            },
        },
    );
    let (state, _) = update(state, Msg::FormSubmitted(fields("1", "good", "1")));
    let (state, _) = update(
        state,
        Msg::ReplyReceived {
            submission_id: 2,
            outcome: SubmissionOutcome::Accepted {
                rss_url: "http://example.com/feed".to_string(),
            },
        },
    );
    let view = state.view();

    assert_eq!(view.success_region.text, "http://example.com/feed");
    assert!(view.success_region.visible);
    assert!(!view.error_region.visible);
    // Hidden regions keep their last text.
    assert_eq!(view.error_region.text, "bad url");
}

#[test]
fn transport_failure_is_visible_as_error() {
    init_logging();
    let state = loaded(FormKind::AddSubscription);
    let (state, _) = update(state, Msg::FormSubmitted(fields("1", "a", "1")));
    let (state, _) = update(
        state,
        Msg::ReplyReceived {
            submission_id: 1,
            outcome: SubmissionOutcome::Failed {
                reason: "http status 500".to_string(),
            },
        },
    );
    let view = state.view();

    assert!(view.error_region.visible);
    assert_eq!(view.error_region.text, "Request failed: http status 500");
    assert!(!view.success_region.visible);
}
