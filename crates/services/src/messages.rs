use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::view::{MessageKind, WorksheetView};

/// Result-message areas, one per exercise.
pub mod targets {
    pub const COLORING: &str = "most-colored-result";
    pub const COMPARISON: &str = "comparison-result";
    pub const MATCHING: &str = "matching-result";
    pub const GAME: &str = "game-result";
}

/// How long a transient message stays on screen.
pub const DISMISS_AFTER_SECS: i64 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub kind: MessageKind,
}

/// Owns every transient message together with its dismissal deadline.
///
/// Posting to a target replaces its pending message and cancels the prior
/// deadline before scheduling a fresh one, so a fast second message can
/// never be wiped early by the first message's timer.
#[derive(Debug, Clone, Default)]
pub struct MessageCenter {
    pending: HashMap<String, (Message, DateTime<Utc>)>,
}

impl MessageCenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a message and schedule its dismissal at `now + DISMISS_AFTER_SECS`.
    pub fn post(
        &mut self,
        view: &mut dyn WorksheetView,
        target: &str,
        text: impl Into<String>,
        kind: MessageKind,
        now: DateTime<Utc>,
    ) {
        let text = text.into();
        view.show_message(target, &text, kind);
        let deadline = now + Duration::seconds(DISMISS_AFTER_SECS);
        self.pending
            .insert(target.to_owned(), (Message { text, kind }, deadline));
    }

    /// Clear every message whose deadline has passed.
    pub fn sweep(&mut self, view: &mut dyn WorksheetView, now: DateTime<Utc>) {
        let expired: Vec<String> = self
            .pending
            .iter()
            .filter(|(_, (_, deadline))| *deadline <= now)
            .map(|(target, _)| target.clone())
            .collect();
        for target in expired {
            self.pending.remove(&target);
            view.clear_message(&target);
        }
    }

    /// The message currently pending for a target, if any.
    #[must_use]
    pub fn active(&self, target: &str) -> Option<&Message> {
        self.pending.get(target).map(|(message, _)| message)
    }
}
