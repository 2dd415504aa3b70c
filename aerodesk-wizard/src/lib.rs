pub mod controller;
pub mod definition;
pub mod models;
pub mod rehydrate;

pub use controller::WizardDraftController;
pub use definition::{StepDefinition, WizardDefinition, WizardDomain};
pub use models::{WizardSession, WizardState};
pub use rehydrate::{DateRehydration, DATE_FIELDS};

use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("Wizard needs at least one step, got {0}")]
    InvalidStepCount(usize),

    #[error("Wizard is not open")]
    NotOpen,
}

pub type WizardResult<T> = Result<T, WizardError>;

/// `[wizard]` section of the console configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WizardConfig {
    #[serde(default)]
    pub date_rehydration: DateRehydration,
}
