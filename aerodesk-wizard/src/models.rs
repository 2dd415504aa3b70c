use aerodesk_shared::DraftRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where a wizard is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WizardState {
    Closed,
    Creating { step: usize },
    Editing { step: usize },
}

/// The open (or closed) wizard a view renders from
#[derive(Debug, Clone, PartialEq)]
pub struct WizardSession {
    pub id: Option<Uuid>,
    pub step_index: usize,
    pub step_count: usize,
    pub draft: DraftRecord,
    pub is_editing: bool,
    pub visible: bool,
    pub opened_at: Option<DateTime<Utc>>,
}

impl WizardSession {
    pub fn closed() -> Self {
        Self {
            id: None,
            step_index: 0,
            step_count: 1,
            draft: DraftRecord::new(),
            is_editing: false,
            visible: false,
            opened_at: None,
        }
    }

    pub fn opened(draft: DraftRecord, step_count: usize, is_editing: bool) -> Self {
        Self {
            id: Some(Uuid::new_v4()),
            step_index: 0,
            step_count,
            draft,
            is_editing,
            visible: true,
            opened_at: Some(Utc::now()),
        }
    }

    pub fn state(&self) -> WizardState {
        match (self.visible, self.is_editing) {
            (false, _) => WizardState::Closed,
            (true, true) => WizardState::Editing { step: self.step_index },
            (true, false) => WizardState::Creating { step: self.step_index },
        }
    }

    pub fn last_step(&self) -> usize {
        self.step_count.saturating_sub(1)
    }

    /// Clamp a requested step into `0..step_count`
    pub fn clamp_step(&self, step: usize) -> usize {
        step.min(self.last_step())
    }
}

impl Default for WizardSession {
    fn default() -> Self {
        Self::closed()
    }
}
