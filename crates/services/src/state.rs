use worksheet_core::{PeopleGame, UserProgress};

/// The whole application state, passed explicitly to every handler.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorksheetState {
    pub progress: UserProgress,
    pub game: PeopleGame,
}

impl WorksheetState {
    #[must_use]
    pub fn new(progress: UserProgress) -> Self {
        Self {
            progress,
            game: PeopleGame::default(),
        }
    }
}
