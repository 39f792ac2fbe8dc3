use std::collections::HashMap;

use worksheet_core::{ShapeKind, WorksheetPath};

//
// ─── PRESENTATION VOCABULARY ───────────────────────────────────────────────────
//

/// Visual tone of a transient result message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
    Info,
}

/// As-you-type border feedback for a fraction input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFeedback {
    Neutral,
    Valid,
    Invalid,
}

/// How a shape's filled region is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillStyle {
    /// Full circular sweep, for round shapes.
    ConicSweep,
    /// Left-to-right proportional fill, for rectangular shapes.
    LinearBar,
}

impl From<ShapeKind> for FillStyle {
    fn from(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Circle => FillStyle::ConicSweep,
            ShapeKind::Rectangle => FillStyle::LinearBar,
        }
    }
}

//
// ─── VIEW BOUNDARY ─────────────────────────────────────────────────────────────
//

/// The presentation layer as the handlers see it.
///
/// Handlers read shape attributes through this trait and emit every visual
/// effect through it; they never hold presentation state of their own, so a
/// front-end is a pure renderer driven by the worksheet state.
pub trait WorksheetView {
    /// Geometry of a shape, `None` when the shape (or its fill region) is
    /// missing.
    fn shape_kind(&self, shape: &str) -> Option<ShapeKind>;

    /// The fraction a shape displays in the selection exercise.
    fn catalogue_fraction(&self, shape: &str) -> Option<String>;

    /// The fraction a shape expects in the matching exercise.
    fn expected_fraction(&self, shape: &str) -> Option<String>;

    fn render_fill(&mut self, shape: &str, style: FillStyle, percentage: f64);

    /// Reset a shape's fill. Returns whether the target existed.
    fn clear_fill(&mut self, shape: &str) -> bool;

    fn mark_selected(&mut self, shape: &str);

    fn set_match_status(&mut self, shape: &str, correct: bool);

    fn render_people(&mut self, total: u32, front: u32);

    fn set_game_fraction_input(&mut self, fraction: &str);

    fn set_input_feedback(&mut self, input_id: &str, feedback: InputFeedback);

    fn show_message(&mut self, target: &str, text: &str, kind: MessageKind);

    fn clear_message(&mut self, target: &str);

    fn show_worksheet(&mut self, path: WorksheetPath);

    /// Modal confirmation prompt; `true` means the learner accepted.
    fn confirm(&mut self, prompt: &str) -> bool;

    /// Modal notification (the explicit-save acknowledgement).
    fn alert(&mut self, text: &str);

    /// Ask the host to restart the worksheet from persisted state.
    fn request_reload(&mut self);
}

//
// ─── RECORDING VIEW ────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
struct ShapeEntry {
    kind: ShapeKind,
    catalogue: Option<String>,
    expected: Option<String>,
}

/// A `WorksheetView` that records every effect, for tests and prototyping.
#[derive(Debug, Clone, Default)]
pub struct RecordingView {
    shapes: HashMap<String, ShapeEntry>,
    pub fills: HashMap<String, (FillStyle, f64)>,
    pub selected: Option<String>,
    pub match_statuses: HashMap<String, bool>,
    pub people: Option<(u32, u32)>,
    pub game_fraction_input: String,
    pub input_feedback: HashMap<String, InputFeedback>,
    pub messages: HashMap<String, (String, MessageKind)>,
    pub active_worksheet: Option<WorksheetPath>,
    pub confirmations: Vec<String>,
    pub alerts: Vec<String>,
    pub reload_requested: bool,
    accept_confirmations: bool,
}

impl RecordingView {
    #[must_use]
    pub fn new() -> Self {
        Self {
            accept_confirmations: true,
            ..Self::default()
        }
    }

    /// Register a shape with its catalogue and expected fractions.
    #[must_use]
    pub fn with_shape(
        mut self,
        shape: &str,
        kind: ShapeKind,
        catalogue: Option<&str>,
        expected: Option<&str>,
    ) -> Self {
        self.shapes.insert(
            shape.to_owned(),
            ShapeEntry {
                kind,
                catalogue: catalogue.map(str::to_owned),
                expected: expected.map(str::to_owned),
            },
        );
        self
    }

    /// Make every confirmation prompt come back declined.
    #[must_use]
    pub fn refusing_confirmations(mut self) -> Self {
        self.accept_confirmations = false;
        self
    }

    #[must_use]
    pub fn message_text(&self, target: &str) -> Option<&str> {
        self.messages.get(target).map(|(text, _)| text.as_str())
    }

    #[must_use]
    pub fn message_kind(&self, target: &str) -> Option<MessageKind> {
        self.messages.get(target).map(|(_, kind)| *kind)
    }
}

impl WorksheetView for RecordingView {
    fn shape_kind(&self, shape: &str) -> Option<ShapeKind> {
        self.shapes.get(shape).map(|entry| entry.kind)
    }

    fn catalogue_fraction(&self, shape: &str) -> Option<String> {
        self.shapes.get(shape).and_then(|entry| entry.catalogue.clone())
    }

    fn expected_fraction(&self, shape: &str) -> Option<String> {
        self.shapes.get(shape).and_then(|entry| entry.expected.clone())
    }

    fn render_fill(&mut self, shape: &str, style: FillStyle, percentage: f64) {
        self.fills.insert(shape.to_owned(), (style, percentage));
    }

    fn clear_fill(&mut self, shape: &str) -> bool {
        if !self.shapes.contains_key(shape) {
            return false;
        }
        self.fills.remove(shape);
        true
    }

    fn mark_selected(&mut self, shape: &str) {
        if self.shapes.contains_key(shape) {
            self.selected = Some(shape.to_owned());
        }
    }

    fn set_match_status(&mut self, shape: &str, correct: bool) {
        self.match_statuses.insert(shape.to_owned(), correct);
    }

    fn render_people(&mut self, total: u32, front: u32) {
        self.people = Some((total, front));
    }

    fn set_game_fraction_input(&mut self, fraction: &str) {
        self.game_fraction_input = fraction.to_owned();
    }

    fn set_input_feedback(&mut self, input_id: &str, feedback: InputFeedback) {
        self.input_feedback.insert(input_id.to_owned(), feedback);
    }

    fn show_message(&mut self, target: &str, text: &str, kind: MessageKind) {
        self.messages.insert(target.to_owned(), (text.to_owned(), kind));
    }

    fn clear_message(&mut self, target: &str) {
        self.messages.remove(target);
    }

    fn show_worksheet(&mut self, path: WorksheetPath) {
        self.active_worksheet = Some(path);
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        self.confirmations.push(prompt.to_owned());
        self.accept_confirmations
    }

    fn alert(&mut self, text: &str) {
        self.alerts.push(text.to_owned());
    }

    fn request_reload(&mut self) {
        self.reload_requested = true;
    }
}
