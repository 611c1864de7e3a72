//! Caller-owned state of a form submission.

use models::RecordId;

use crate::errors::ServiceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Submitting,
    Done,
}

impl SubmissionState {
    pub fn is_busy(self) -> bool {
        matches!(self, SubmissionState::Validating | SubmissionState::Submitting)
    }

    /// Enter `Validating`; refused while another submission is in progress.
    pub fn begin(&mut self) -> Result<(), ServiceError> {
        if self.is_busy() {
            return Err(ServiceError::Busy);
        }
        *self = SubmissionState::Validating;
        Ok(())
    }

    pub fn submitting(&mut self) { *self = SubmissionState::Submitting; }

    pub fn finish(&mut self) { *self = SubmissionState::Done; }

    /// Back to `Idle`, e.g. after a failure or an abandoned submission.
    pub fn reset(&mut self) { *self = SubmissionState::Idle; }
}

/// Which save button was used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveIntent {
    #[default]
    Save,
    SaveAndNew,
    SaveAndClose,
}

/// Where the caller goes after a successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AfterSave {
    /// Stay on (or switch to) the detail view of the saved record.
    Stay(RecordId),
    /// Open an empty form for a new record.
    OpenBlank,
    ReturnToList,
}

impl SaveIntent {
    pub fn after(self, saved: RecordId) -> AfterSave {
        match self {
            SaveIntent::Save => AfterSave::Stay(saved),
            SaveIntent::SaveAndNew => AfterSave::OpenBlank,
            SaveIntent::SaveAndClose => AfterSave::ReturnToList,
        }
    }
}
