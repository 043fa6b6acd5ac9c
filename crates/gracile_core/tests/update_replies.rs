use gracile_core::{
    update, AppState, FieldName, FormInputSet, FormKind, Msg, Phase, SubmissionOutcome,
};

fn submit(state: AppState, rss_url: &str) -> AppState {
    let input = FormInputSet::new()
        .with(FieldName::UserId, "1")
        .with(FieldName::RssUrl, rss_url)
        .with(FieldName::DailyAmount, "5");
    update(state, Msg::FormSubmitted(input)).0
}

fn reply(state: AppState, submission_id: u64, outcome: SubmissionOutcome) -> AppState {
    update(
        state,
        Msg::ReplyReceived {
            submission_id,
            outcome,
        },
    )
    .0
}

#[test]
fn out_of_order_replies_last_arrival_wins() {
    let state = update(AppState::new(FormKind::Process), Msg::PageLoaded).0;
    let state = submit(state, "http://first.example.com/rss");
    let state = submit(state, "http://second.example.com/rss");

    // Second submission answers first, first submission answers last.
    let state = reply(
        state,
        2,
        SubmissionOutcome::Accepted {
            rss_url: "http://second.example.com/rss".to_string(),
        },
    );
    assert_eq!(state.view().phase, Phase::Submitting);

    let state = reply(
        state,
        1,
        SubmissionOutcome::Rejected {
            message: "Error! first".to_string(),
        },
    );
    let view = state.view();

    assert_eq!(view.phase, Phase::Idle);
    assert_eq!(view.last_applied, Some(1));
    assert!(view.error_region.visible);
    assert_eq!(view.error_region.text, "Error! first");
    assert!(!view.success_region.visible);
}

#[test]
fn at_most_one_region_visible_after_every_reply() {
    let mut state = update(AppState::new(FormKind::AddSubscription), Msg::PageLoaded).0;
    let outcomes = [
        SubmissionOutcome::Accepted {
            rss_url: "a".to_string(),
        },
        SubmissionOutcome::Rejected {
            message: "b".to_string(),
        },
        SubmissionOutcome::Failed {
            reason: "timeout".to_string(),
        },
        SubmissionOutcome::Accepted {
            rss_url: "c".to_string(),
        },
    ];

    for (index, outcome) in outcomes.into_iter().enumerate() {
        state = submit(state, "x");
        state = reply(state, index as u64 + 1, outcome);
        let view = state.view();
        assert!(view.error_region.visible != view.success_region.visible);
    }
    assert_eq!(state.view().success_region.text, "c");
}

#[test]
fn page_reload_hides_previous_result() {
    let state = update(AppState::new(FormKind::AddSubscription), Msg::PageLoaded).0;
    let state = submit(state, "x");
    let state = reply(
        state,
        1,
        SubmissionOutcome::Accepted {
            rss_url: "x".to_string(),
        },
    );
    let (state, _) = update(state, Msg::PageLoaded);
    let view = state.view();

    assert!(!view.error_region.visible);
    assert!(!view.success_region.visible);
}

#[test]
fn form_input_set_keeps_first_insert_order_and_replaces_values() {
    let mut input = FormInputSet::new();
    input.insert(FieldName::RssUrl, "a");
    input.insert(FieldName::UserId, "1");
    input.insert(FieldName::RssUrl, "b");

    assert_eq!(input.len(), 2);
    assert_eq!(input.pairs(), vec![("rss_url", "b"), ("user_id", "1")]);
    assert_eq!(input.get(FieldName::DailyAmount), None);
    assert_eq!(FieldName::parse("daily_amount"), Some(FieldName::DailyAmount));
    assert_eq!(FieldName::parse("email"), None);
}
