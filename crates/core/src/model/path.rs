use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of one of the three printed worksheets.
///
/// `C` is the starting path; `A` and `B` are the transfer targets a learner
/// can move to after a confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorksheetPath {
    A,
    B,
    #[default]
    C,
}

impl WorksheetPath {
    /// All paths, in display order.
    pub const ALL: [WorksheetPath; 3] = [WorksheetPath::A, WorksheetPath::B, WorksheetPath::C];

    /// True for the paths a learner can transfer to explicitly.
    #[must_use]
    pub fn is_transfer_target(self) -> bool {
        matches!(self, WorksheetPath::A | WorksheetPath::B)
    }
}

impl fmt::Display for WorksheetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            WorksheetPath::A => "a",
            WorksheetPath::B => "b",
            WorksheetPath::C => "c",
        };
        write!(f, "{letter}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown worksheet path: {raw}")]
pub struct ParsePathError {
    pub raw: String,
}

impl FromStr for WorksheetPath {
    type Err = ParsePathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "a" | "A" => Ok(WorksheetPath::A),
            "b" | "B" => Ok(WorksheetPath::B),
            "c" | "C" => Ok(WorksheetPath::C),
            _ => Err(ParsePathError { raw: s.to_owned() }),
        }
    }
}
