use crate::error::ExerciseError;
use crate::messages::targets;
use crate::state::WorksheetState;
use crate::view::{MessageKind, WorksheetView};
use crate::worksheet::WorksheetService;

use super::coloring::render_if_colorable;

fn match_key(shape: &str) -> String {
    format!("match-{shape}")
}

impl WorksheetService {
    /// Connect a fraction card to a shape.
    ///
    /// Correctness is exact string equality against the shape's expected
    /// fraction; the shape is colored with the supplied fraction on a
    /// best-effort basis either way, and the boolean outcome is recorded.
    pub async fn connect_fraction(
        &mut self,
        state: &mut WorksheetState,
        view: &mut dyn WorksheetView,
        fraction: &str,
        shape: &str,
    ) {
        let now = self.now();

        let Some(expected) = view.expected_fraction(shape) else {
            let err = ExerciseError::TargetNotFound {
                shape: shape.to_owned(),
            };
            self.messages
                .post(view, targets::MATCHING, err.to_string(), MessageKind::Error, now);
            return;
        };

        render_if_colorable(view, shape, fraction);

        let correct = fraction == expected;
        view.set_match_status(shape, correct);

        let (text, kind) = if correct {
            (
                format!("Correct! {fraction} matches the shape."),
                MessageKind::Success,
            )
        } else {
            (
                format!("{fraction} does not match the shape. The right answer is {expected}."),
                MessageKind::Error,
            )
        };
        self.messages.post(view, targets::MATCHING, text, kind, now);

        self.progress
            .record_exercise(&mut state.progress, match_key(shape), correct)
            .await;
    }
}
