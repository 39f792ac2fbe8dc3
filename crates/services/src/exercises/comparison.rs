use worksheet_core::fraction;

use crate::error::ExerciseError;
use crate::messages::targets;
use crate::state::WorksheetState;
use crate::view::{MessageKind, WorksheetView};
use crate::worksheet::WorksheetService;

/// The fixed question: which of these is smaller?
pub const COMPARISON_OPTIONS: [&str; 2] = ["1/4", "1/2"];
pub const COMPARISON_ANSWER: &str = "1/4";

pub(crate) const COMPARISON_KEY: &str = "comparison-c";

fn most_colored_key(shape: &str) -> String {
    format!("most-colored-{shape}")
}

impl WorksheetService {
    /// Grade the multiple-choice comparison question.
    ///
    /// The raw selection is recorded whether or not it is correct; only a
    /// missing selection records nothing.
    pub async fn check_comparison(
        &mut self,
        state: &mut WorksheetState,
        view: &mut dyn WorksheetView,
        selection: Option<&str>,
    ) {
        let now = self.now();

        let Some(selected) = selection else {
            self.messages.post(
                view,
                targets::COMPARISON,
                ExerciseError::NoSelection.to_string(),
                MessageKind::Error,
                now,
            );
            return;
        };

        let [smaller, larger] = COMPARISON_OPTIONS;
        let (text, kind) = if selected == COMPARISON_ANSWER {
            (
                format!("Correct! {smaller} is smaller than {larger}."),
                MessageKind::Success,
            )
        } else {
            // Explain with the decimal values; the options are known-good.
            let explanation = match (fraction::to_decimal(smaller), fraction::to_decimal(larger)) {
                (Some(dec_s), Some(dec_l)) => {
                    format!(" {smaller} is {dec_s} while {larger} is {dec_l}.")
                }
                _ => String::new(),
            };
            (
                format!("The correct answer is {COMPARISON_ANSWER}.{explanation}"),
                MessageKind::Error,
            )
        };
        self.messages
            .post(view, targets::COMPARISON, text, kind, now);

        self.progress
            .record_exercise(&mut state.progress, COMPARISON_KEY, selected)
            .await;
    }

    /// Record which shape the learner picked as the most colored one.
    pub async fn select_most_colored(
        &mut self,
        state: &mut WorksheetState,
        view: &mut dyn WorksheetView,
        shape: &str,
    ) {
        let now = self.now();
        view.mark_selected(shape);

        if let Some(displayed) = view.catalogue_fraction(shape) {
            self.messages.post(
                view,
                targets::COLORING,
                format!("Selected the shape showing {displayed}."),
                MessageKind::Success,
                now,
            );
        }

        self.progress
            .record_exercise(&mut state.progress, most_colored_key(shape), true)
            .await;
    }
}
