#![forbid(unsafe_code)]

pub mod fraction;
pub mod model;
pub mod time;

pub use time::Clock;

pub use model::{Completion, PeopleGame, ShapeKind, UserProgress, WorksheetPath};
