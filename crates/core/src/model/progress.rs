use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::WorksheetPath;

/// What gets recorded when an exercise is attempted: either a plain done
/// marker or the learner's submitted answer, verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Completion {
    Flag(bool),
    Answer(String),
}

impl From<bool> for Completion {
    fn from(done: bool) -> Self {
        Completion::Flag(done)
    }
}

impl From<String> for Completion {
    fn from(answer: String) -> Self {
        Completion::Answer(answer)
    }
}

impl From<&str> for Completion {
    fn from(answer: &str) -> Self {
        Completion::Answer(answer.to_owned())
    }
}

/// The learner's whole progress record: the active worksheet path plus
/// per-exercise completion markers and self-assessment checkboxes.
///
/// Serialized as one blob under a single storage key, with camelCase field
/// names in the persisted form.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProgress {
    #[serde(default)]
    pub path: WorksheetPath,
    #[serde(default)]
    pub completed_exercises: HashMap<String, Completion>,
    #[serde(default)]
    pub assessments: HashMap<String, bool>,
    // Reserved in the persisted format; nothing reads or writes it.
    #[serde(default)]
    pub scores: HashMap<String, u32>,
}

impl UserProgress {
    /// Record an exercise attempt. Retries overwrite; nothing locks.
    pub fn record_exercise(&mut self, key: impl Into<String>, completion: impl Into<Completion>) {
        self.completed_exercises
            .insert(key.into(), completion.into());
    }

    /// Record a self-assessment checkbox.
    pub fn record_assessment(&mut self, key: impl Into<String>, checked: bool) {
        self.assessments.insert(key.into(), checked);
    }

    pub fn set_path(&mut self, path: WorksheetPath) {
        self.path = path;
    }

    #[must_use]
    pub fn completion(&self, key: &str) -> Option<&Completion> {
        self.completed_exercises.get(key)
    }

    #[must_use]
    pub fn assessment(&self, key: &str) -> bool {
        self.assessments.get(key).copied().unwrap_or(false)
    }
}
