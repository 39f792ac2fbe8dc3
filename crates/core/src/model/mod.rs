mod game;
mod path;
mod progress;
mod shape;

pub use game::PeopleGame;
pub use path::{ParsePathError, WorksheetPath};
pub use progress::{Completion, UserProgress};
pub use shape::ShapeKind;
