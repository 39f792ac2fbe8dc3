use worksheet_core::fraction;

use crate::error::ExerciseError;
use crate::messages::targets;
use crate::state::WorksheetState;
use crate::view::{FillStyle, InputFeedback, MessageKind, WorksheetView};
use crate::worksheet::WorksheetService;

/// A fraction validated for coloring: two integer parts, nonzero
/// denominator, and a value of at most one whole (a fill cannot exceed
/// 100%).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProperFraction {
    numerator: u64,
    denominator: u64,
}

impl ProperFraction {
    /// Validate an already-trimmed input string.
    ///
    /// # Errors
    ///
    /// - `Empty` for an empty string
    /// - `InvalidFormat` unless the input is `<digits>/<digits>`
    /// - `OutOfRange` when the denominator is zero or the numerator exceeds
    ///   the denominator
    pub fn parse(input: &str) -> Result<Self, ExerciseError> {
        if input.is_empty() {
            return Err(ExerciseError::Empty);
        }
        if !fraction::is_valid_format(input) {
            return Err(ExerciseError::InvalidFormat {
                input: input.to_owned(),
            });
        }

        let mut parts = input.split('/');
        let invalid = || ExerciseError::InvalidFormat {
            input: input.to_owned(),
        };
        let numerator: u64 = parts
            .next()
            .and_then(|part| part.parse().ok())
            .ok_or_else(invalid)?;
        let denominator: u64 = parts
            .next()
            .and_then(|part| part.parse().ok())
            .ok_or_else(invalid)?;

        if denominator == 0 || numerator > denominator {
            return Err(ExerciseError::OutOfRange {
                fraction: input.to_owned(),
            });
        }

        Ok(Self {
            numerator,
            denominator,
        })
    }

    #[must_use]
    pub fn numerator(&self) -> u64 {
        self.numerator
    }

    #[must_use]
    pub fn denominator(&self) -> u64 {
        self.denominator
    }

    /// Share of the shape to fill, in percent.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percentage(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64 * 100.0
    }
}

pub(crate) fn exercise_key(shape: &str, fraction: &str) -> String {
    format!("{shape}-{fraction}")
}

/// Color `shape` with `fraction` when both are valid; reports whether a
/// fill was rendered. Shared with the matching exercise, which colors on a
/// best-effort basis.
pub(crate) fn render_if_colorable(
    view: &mut dyn WorksheetView,
    shape: &str,
    fraction: &str,
) -> bool {
    let Ok(parsed) = ProperFraction::parse(fraction) else {
        return false;
    };
    let Some(kind) = view.shape_kind(shape) else {
        return false;
    };
    view.render_fill(shape, FillStyle::from(kind), parsed.percentage());
    true
}

impl WorksheetService {
    /// Color a shape from a typed fraction.
    ///
    /// Validation failures become a transient error message and nothing is
    /// recorded; on success the fill is rendered and
    /// `"<shape>-<fraction>"` is marked completed.
    pub async fn apply_fraction(
        &mut self,
        state: &mut WorksheetState,
        view: &mut dyn WorksheetView,
        input: &str,
        shape: &str,
    ) {
        let now = self.now();
        let trimmed = input.trim();

        let parsed = match ProperFraction::parse(trimmed) {
            Ok(parsed) => parsed,
            Err(err) => {
                self.messages
                    .post(view, targets::COLORING, err.to_string(), MessageKind::Error, now);
                return;
            }
        };

        let Some(kind) = view.shape_kind(shape) else {
            let err = ExerciseError::TargetNotFound {
                shape: shape.to_owned(),
            };
            self.messages
                .post(view, targets::COLORING, err.to_string(), MessageKind::Error, now);
            return;
        };

        view.render_fill(shape, FillStyle::from(kind), parsed.percentage());
        self.messages.post(
            view,
            targets::COLORING,
            format!("Colored the shape with {trimmed}."),
            MessageKind::Success,
            now,
        );
        self.progress
            .record_exercise(&mut state.progress, exercise_key(shape, trimmed), true)
            .await;
    }

    /// Reset a shape's fill. Silent when the target does not exist.
    pub fn clear_shape(&mut self, view: &mut dyn WorksheetView, shape: &str) {
        let now = self.now();
        if view.clear_fill(shape) {
            self.messages.post(
                view,
                targets::COLORING,
                "Cleared the shape's coloring.",
                MessageKind::Info,
                now,
            );
        }
    }

    /// As-you-type feedback on a fraction input field.
    pub fn fraction_input_changed(
        &self,
        view: &mut dyn WorksheetView,
        input_id: &str,
        value: &str,
    ) {
        let trimmed = value.trim();
        let feedback = if trimmed.is_empty() {
            InputFeedback::Neutral
        } else if fraction::is_valid_format(trimmed) {
            InputFeedback::Valid
        } else {
            InputFeedback::Invalid
        };
        view.set_input_feedback(input_id, feedback);
    }
}
