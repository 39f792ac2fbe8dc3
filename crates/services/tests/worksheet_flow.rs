use std::sync::Arc;

use services::{
    targets, MessageKind, RecordingView, UiEvent, WorksheetService, WorksheetState,
};
use storage::repository::{InMemoryRepository, ProgressRepository};
use worksheet_core::time::fixed_clock;
use worksheet_core::{Completion, ShapeKind, WorksheetPath};

fn classroom_view() -> RecordingView {
    RecordingView::new()
        .with_shape("circle-1", ShapeKind::Circle, Some("1/2"), None)
        .with_shape("circle-2", ShapeKind::Circle, Some("3/4"), None)
        .with_shape("square-1", ShapeKind::Rectangle, None, Some("1/4"))
}

fn service_on(repo: &InMemoryRepository) -> WorksheetService {
    WorksheetService::new(Arc::new(repo.clone())).with_clock(fixed_clock())
}

#[tokio::test]
async fn a_full_session_round_trips_through_storage() {
    let repo = InMemoryRepository::new();
    let mut service = service_on(&repo);
    let mut view = classroom_view();

    let mut state = service.startup(&mut view).await;
    assert_eq!(view.active_worksheet, Some(WorksheetPath::C));
    assert_eq!(view.game_fraction_input, "4/8");

    // Color a circle, pick the most colored shape, answer the comparison.
    service
        .dispatch(
            &mut state,
            &mut view,
            UiEvent::ApplyFraction {
                input: "1/2".into(),
                shape: "circle-1".into(),
            },
        )
        .await;
    service
        .dispatch(
            &mut state,
            &mut view,
            UiEvent::SelectMostColored {
                shape: "circle-2".into(),
            },
        )
        .await;
    service
        .dispatch(
            &mut state,
            &mut view,
            UiEvent::CheckComparison {
                selection: Some("1/4".into()),
            },
        )
        .await;

    // Match a fraction card to the square.
    service
        .dispatch(
            &mut state,
            &mut view,
            UiEvent::ConnectFraction {
                fraction: "1/4".into(),
                shape: "square-1".into(),
            },
        )
        .await;
    assert_eq!(view.match_statuses.get("square-1"), Some(&true));

    // Play the counting game and tick a self-assessment.
    service
        .dispatch(&mut state, &mut view, UiEvent::AddPerson)
        .await;
    service
        .dispatch(
            &mut state,
            &mut view,
            UiEvent::CheckGameFraction {
                input: "5/8".into(),
            },
        )
        .await;
    assert_eq!(view.message_kind(targets::GAME), Some(MessageKind::Success));
    service
        .dispatch(
            &mut state,
            &mut view,
            UiEvent::SetAssessment {
                key: "assessment-1".into(),
                checked: true,
            },
        )
        .await;

    service.shutdown(&state).await;

    // A new session over the same store resumes everything.
    let mut second = service_on(&repo);
    let mut fresh_view = classroom_view();
    let resumed = second.startup(&mut fresh_view).await;

    assert_eq!(
        resumed.progress.completion("circle-1-1/2"),
        Some(&Completion::Flag(true))
    );
    assert_eq!(
        resumed.progress.completion("most-colored-circle-2"),
        Some(&Completion::Flag(true))
    );
    assert_eq!(
        resumed.progress.completion("comparison-c"),
        Some(&Completion::Answer("1/4".into()))
    );
    assert_eq!(
        resumed.progress.completion("match-square-1"),
        Some(&Completion::Flag(true))
    );
    assert_eq!(
        resumed.progress.completion("game-fraction"),
        Some(&Completion::Answer("5/8".into()))
    );
    assert!(resumed.progress.assessment("assessment-1"));
}

#[tokio::test]
async fn game_check_is_exact_string_match_not_value_equality() {
    let repo = InMemoryRepository::new();
    let mut service = service_on(&repo);
    let mut view = classroom_view();
    let mut state = service.startup(&mut view).await;

    // The game shows 4/8; 2/4 is equal in value but matches neither the
    // raw nor the simplified spelling.
    service
        .dispatch(
            &mut state,
            &mut view,
            UiEvent::CheckGameFraction {
                input: "2/4".into(),
            },
        )
        .await;
    assert_eq!(view.message_kind(targets::GAME), Some(MessageKind::Error));

    service
        .dispatch(
            &mut state,
            &mut view,
            UiEvent::CheckGameFraction {
                input: "1/2".into(),
            },
        )
        .await;
    assert_eq!(view.message_kind(targets::GAME), Some(MessageKind::Success));
}

#[tokio::test]
async fn reset_wipes_the_store_and_the_next_session_starts_fresh() {
    let repo = InMemoryRepository::new();
    let mut service = service_on(&repo);
    let mut view = classroom_view();
    let mut state = service.startup(&mut view).await;

    service
        .dispatch(
            &mut state,
            &mut view,
            UiEvent::ApplyFraction {
                input: "3/4".into(),
                shape: "circle-2".into(),
            },
        )
        .await;
    assert!(repo.get_progress().await.unwrap().is_some());

    service
        .dispatch(&mut state, &mut view, UiEvent::ResetAll)
        .await;
    assert!(view.reload_requested);
    assert!(repo.get_progress().await.unwrap().is_none());

    let mut next = service_on(&repo);
    let mut next_view = classroom_view();
    let fresh = next.startup(&mut next_view).await;
    assert_eq!(fresh, WorksheetState::default());
}

#[tokio::test]
async fn live_input_feedback_flows_through_dispatch() {
    let repo = InMemoryRepository::new();
    let mut service = service_on(&repo);
    let mut view = classroom_view();
    let mut state = service.startup(&mut view).await;

    service
        .dispatch(
            &mut state,
            &mut view,
            UiEvent::FractionInputChanged {
                input_id: "fraction-input-1".into(),
                value: "3/".into(),
            },
        )
        .await;
    assert_eq!(
        view.input_feedback["fraction-input-1"],
        services::InputFeedback::Invalid
    );
}
