use crate::messages::targets;
use crate::state::WorksheetState;
use crate::view::{MessageKind, WorksheetView};
use crate::worksheet::WorksheetService;

pub(crate) const GAME_KEY: &str = "game-fraction";

impl WorksheetService {
    /// Redraw the people grid and the current game fraction.
    pub fn refresh_game_display(&mut self, state: &WorksheetState, view: &mut dyn WorksheetView) {
        let now = self.now();
        let raw = state.game.fraction();
        let simplified = state.game.simplified();

        view.render_people(state.game.total_people(), state.game.front_people());
        view.set_game_fraction_input(&raw);

        if raw == simplified {
            self.messages.post(
                view,
                targets::GAME,
                format!("Nice! {raw} is already in simplest form."),
                MessageKind::Success,
                now,
            );
        } else {
            self.messages.post(
                view,
                targets::GAME,
                format!("{raw} equals {simplified} in simplest form."),
                MessageKind::Info,
                now,
            );
        }
    }

    /// Send one more person to the front (clamped at the class size).
    pub fn add_person(&mut self, state: &mut WorksheetState, view: &mut dyn WorksheetView) {
        state.game.add_person();
        self.refresh_game_display(state, view);
    }

    /// Send one person back (clamped at zero).
    pub fn remove_person(&mut self, state: &mut WorksheetState, view: &mut dyn WorksheetView) {
        state.game.remove_person();
        self.refresh_game_display(state, view);
    }

    /// Grade the typed game fraction.
    ///
    /// Correct iff the trimmed input equals the raw or simplified current
    /// fraction, character for character; value-equal spellings like `2/4`
    /// for `4/8` are wrong. The entered text is recorded either way.
    pub async fn check_game_fraction(
        &mut self,
        state: &mut WorksheetState,
        view: &mut dyn WorksheetView,
        input: &str,
    ) {
        let now = self.now();
        let entered = input.trim();
        let raw = state.game.fraction();
        let simplified = state.game.simplified();

        let correct = entered == raw || entered == simplified;
        let (text, kind) = if correct {
            (
                format!("Well done! The fraction is {raw} (simplified: {simplified})."),
                MessageKind::Success,
            )
        } else {
            (
                format!("The correct fraction is {raw} (simplified: {simplified})."),
                MessageKind::Error,
            )
        };
        self.messages.post(view, targets::GAME, text, kind, now);

        self.progress
            .record_exercise(&mut state.progress, GAME_KEY, entered)
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::RecordingView;
    use crate::worksheet::test_support::fixed_service;
    use worksheet_core::Completion;

    #[test]
    fn adding_people_redraws_the_grid() {
        let mut service = fixed_service();
        let mut state = WorksheetState::default();
        let mut view = RecordingView::new();

        // 5/8 is already in simplest form
        service.add_person(&mut state, &mut view);

        assert_eq!(view.people, Some((8, 5)));
        assert_eq!(view.game_fraction_input, "5/8");
        assert_eq!(view.message_kind(targets::GAME), Some(MessageKind::Success));
    }

    #[test]
    fn reducible_fractions_get_the_simplified_hint() {
        let mut service = fixed_service();
        let mut state = WorksheetState::default();
        let mut view = RecordingView::new();

        // 4/8 -> 6/8, which reduces to 3/4
        service.add_person(&mut state, &mut view);
        service.add_person(&mut state, &mut view);

        assert_eq!(view.game_fraction_input, "6/8");
        assert_eq!(view.message_kind(targets::GAME), Some(MessageKind::Info));
        let text = view.message_text(targets::GAME).unwrap();
        assert!(text.contains("3/4"), "{text}");
    }

    #[test]
    fn removal_clamps_at_zero() {
        let mut service = fixed_service();
        let mut state = WorksheetState::default();
        let mut view = RecordingView::new();

        for _ in 0..10 {
            service.remove_person(&mut state, &mut view);
        }

        assert_eq!(view.people, Some((8, 0)));
        assert_eq!(view.game_fraction_input, "0/8");
    }

    #[tokio::test]
    async fn raw_and_simplified_spellings_are_both_accepted() {
        let mut service = fixed_service();
        let mut state = WorksheetState::default();
        let mut view = RecordingView::new();

        service
            .check_game_fraction(&mut state, &mut view, "4/8")
            .await;
        assert_eq!(view.message_kind(targets::GAME), Some(MessageKind::Success));

        service
            .check_game_fraction(&mut state, &mut view, " 1/2 ")
            .await;
        assert_eq!(view.message_kind(targets::GAME), Some(MessageKind::Success));
    }

    #[tokio::test]
    async fn value_equal_spellings_are_rejected() {
        let mut service = fixed_service();
        let mut state = WorksheetState::default();
        let mut view = RecordingView::new();

        // 2/4 == 4/8 in value, but neither literal form matches.
        service
            .check_game_fraction(&mut state, &mut view, "2/4")
            .await;

        assert_eq!(view.message_kind(targets::GAME), Some(MessageKind::Error));
        assert_eq!(
            state.progress.completion(GAME_KEY),
            Some(&Completion::Answer("2/4".into()))
        );
    }

    #[tokio::test]
    async fn wrong_answers_are_recorded_verbatim() {
        let mut service = fixed_service();
        let mut state = WorksheetState::default();
        let mut view = RecordingView::new();

        service
            .check_game_fraction(&mut state, &mut view, "7/8")
            .await;

        assert_eq!(
            state.progress.completion(GAME_KEY),
            Some(&Completion::Answer("7/8".into()))
        );
    }
}
