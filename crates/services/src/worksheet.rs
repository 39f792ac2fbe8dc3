use std::sync::Arc;

use chrono::{DateTime, Utc};

use storage::repository::ProgressRepository;
use worksheet_core::{Clock, PeopleGame, WorksheetPath};

use crate::messages::MessageCenter;
use crate::progress_service::ProgressService;
use crate::state::WorksheetState;
use crate::view::WorksheetView;

//
// ─── EVENTS ────────────────────────────────────────────────────────────────────
//

/// Every user action the worksheet reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    ApplyFraction { input: String, shape: String },
    ClearShape { shape: String },
    FractionInputChanged { input_id: String, value: String },
    SelectMostColored { shape: String },
    CheckComparison { selection: Option<String> },
    ConnectFraction { fraction: String, shape: String },
    AddPerson,
    RemovePerson,
    CheckGameFraction { input: String },
    SetAssessment { key: String, checked: bool },
    ShowWorksheet { path: WorksheetPath },
    TransferToPath { path: WorksheetPath },
    RequestSave,
    ResetAll,
}

//
// ─── SERVICE ───────────────────────────────────────────────────────────────────
//

/// Dispatches user actions to their handlers.
///
/// Holds the store and the message center; all worksheet state lives in the
/// `WorksheetState` passed to each call, and every visual effect goes
/// through the `WorksheetView` boundary.
pub struct WorksheetService {
    pub(crate) progress: ProgressService,
    pub(crate) messages: MessageCenter,
    clock: Clock,
}

impl WorksheetService {
    #[must_use]
    pub fn new(repo: Arc<dyn ProgressRepository>) -> Self {
        Self {
            progress: ProgressService::new(repo),
            messages: MessageCenter::new(),
            clock: Clock::default(),
        }
    }

    /// Use a specific clock (fixed in tests, wall clock in the app).
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    #[must_use]
    pub fn messages(&self) -> &MessageCenter {
        &self.messages
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Load persisted progress and bring the view to its initial state.
    pub async fn startup(&mut self, view: &mut dyn WorksheetView) -> WorksheetState {
        let (progress, resumed) = self.progress.load().await;
        tracing::info!(resumed, path = %progress.path, "worksheet starting");

        let state = WorksheetState::new(progress);
        view.show_worksheet(state.progress.path);
        self.refresh_game_display(&state, view);
        state
    }

    /// Persist on the way out, so closing the worksheet never loses work.
    pub async fn shutdown(&self, state: &WorksheetState) {
        self.progress.save_or_warn(&state.progress).await;
    }

    /// The event-to-handler table.
    pub async fn dispatch(
        &mut self,
        state: &mut WorksheetState,
        view: &mut dyn WorksheetView,
        event: UiEvent,
    ) {
        match event {
            UiEvent::ApplyFraction { input, shape } => {
                self.apply_fraction(state, view, &input, &shape).await;
            }
            UiEvent::ClearShape { shape } => self.clear_shape(view, &shape),
            UiEvent::FractionInputChanged { input_id, value } => {
                self.fraction_input_changed(view, &input_id, &value);
            }
            UiEvent::SelectMostColored { shape } => {
                self.select_most_colored(state, view, &shape).await;
            }
            UiEvent::CheckComparison { selection } => {
                self.check_comparison(state, view, selection.as_deref())
                    .await;
            }
            UiEvent::ConnectFraction { fraction, shape } => {
                self.connect_fraction(state, view, &fraction, &shape).await;
            }
            UiEvent::AddPerson => self.add_person(state, view),
            UiEvent::RemovePerson => self.remove_person(state, view),
            UiEvent::CheckGameFraction { input } => {
                self.check_game_fraction(state, view, &input).await;
            }
            UiEvent::SetAssessment { key, checked } => {
                self.set_assessment(state, &key, checked).await;
            }
            UiEvent::ShowWorksheet { path } => self.show_worksheet(state, view, path),
            UiEvent::TransferToPath { path } => {
                self.transfer_to_path(state, view, path).await;
            }
            UiEvent::RequestSave => self.request_save(state, view).await,
            UiEvent::ResetAll => self.reset_all(state, view).await,
        }
    }

    /// Clear any messages whose dismissal deadline has passed. Call this
    /// periodically from the host loop.
    pub fn tick(&mut self, view: &mut dyn WorksheetView) {
        let now = self.now();
        self.messages.sweep(view, now);
    }

    //
    // ─── NAVIGATION & LIFECYCLE HANDLERS ───────────────────────────────────────
    //

    /// Make a worksheet active. Only mutates in memory; the explicit
    /// transfer flow is what persists a path switch.
    pub fn show_worksheet(
        &mut self,
        state: &mut WorksheetState,
        view: &mut dyn WorksheetView,
        path: WorksheetPath,
    ) {
        view.show_worksheet(path);
        state.progress.set_path(path);
    }

    /// Move to another path after a confirmation prompt.
    pub async fn transfer_to_path(
        &mut self,
        state: &mut WorksheetState,
        view: &mut dyn WorksheetView,
        path: WorksheetPath,
    ) {
        if !path.is_transfer_target() {
            return;
        }
        let prompt = format!(
            "Are you sure you want to transfer to path {}?",
            path.to_string().to_uppercase()
        );
        if !view.confirm(&prompt) {
            return;
        }

        view.show_worksheet(path);
        self.progress.set_path(&mut state.progress, path).await;
    }

    /// Toggle a self-assessment checkbox. The store is the source of
    /// truth; the view never gets read back.
    pub async fn set_assessment(&mut self, state: &mut WorksheetState, key: &str, checked: bool) {
        self.progress
            .record_assessment(&mut state.progress, key, checked)
            .await;
        tracing::debug!(key, checked, "assessment updated");
    }

    /// The explicit save button.
    pub async fn request_save(&mut self, state: &WorksheetState, view: &mut dyn WorksheetView) {
        match self.progress.save(&state.progress).await {
            Ok(()) => view.alert("Your progress has been saved."),
            Err(err) => {
                tracing::warn!(error = %err, "explicit save failed");
                view.alert("Saving failed; your progress is kept for this session only.");
            }
        }
    }

    /// Wipe everything after a confirmation prompt and ask the host to
    /// restart from the (now empty) persisted state.
    pub async fn reset_all(&mut self, state: &mut WorksheetState, view: &mut dyn WorksheetView) {
        if !view.confirm("Are you sure you want to erase all progress? This cannot be undone.") {
            return;
        }
        state.progress = self.progress.reset().await;
        state.game = PeopleGame::default();
        view.request_reload();
    }
}

//
// ─── TEST SUPPORT ──────────────────────────────────────────────────────────────
//
