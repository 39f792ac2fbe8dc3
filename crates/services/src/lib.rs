#![forbid(unsafe_code)]

pub mod error;
pub mod exercises;
pub mod messages;
pub mod progress_service;
pub mod state;
pub mod view;
pub mod worksheet;

pub use worksheet_core::Clock;

pub use error::{ExerciseError, ProgressError};
pub use exercises::ProperFraction;
pub use messages::{targets, Message, MessageCenter, DISMISS_AFTER_SECS};
pub use progress_service::ProgressService;
pub use state::WorksheetState;
pub use view::{FillStyle, InputFeedback, MessageKind, RecordingView, WorksheetView};
pub use worksheet::{UiEvent, WorksheetService};
