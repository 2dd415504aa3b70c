use aerodesk_shared::DraftRecord;
use tracing::{debug, info};

use crate::definition::WizardDefinition;
use crate::models::{WizardSession, WizardState};
use crate::rehydrate::{rehydrate, DateRehydration};
use crate::{WizardConfig, WizardError, WizardResult};

/// Drives a multi-step modal: step navigation, draft accumulation and
/// open/close lifecycle.
///
/// Navigation never fails on range; requests past either end are clamped.
/// Calls that need an open wizard return [`WizardError::NotOpen`] when it is
/// closed.
pub struct WizardDraftController {
    session: WizardSession,
    definition: Option<WizardDefinition>,
    rehydration: DateRehydration,
}

impl WizardDraftController {
    pub fn new(rehydration: DateRehydration) -> Self {
        Self {
            session: WizardSession::closed(),
            definition: None,
            rehydration,
        }
    }

    pub fn from_config(config: &WizardConfig) -> Self {
        Self::new(config.date_rehydration)
    }

    /// Open with a bare step count. A non-empty `editing` record seeds the
    /// draft; an empty one is treated as create mode.
    pub fn open(&mut self, editing: Option<&DraftRecord>, step_count: usize) -> WizardResult<()> {
        if step_count < 1 {
            return Err(WizardError::InvalidStepCount(step_count));
        }
        self.definition = None;
        self.start(editing, step_count);
        Ok(())
    }

    /// Open using a definition's step count and keep it for field lookups
    pub fn open_definition(
        &mut self,
        definition: &WizardDefinition,
        editing: Option<&DraftRecord>,
    ) -> WizardResult<()> {
        self.open(editing, definition.step_count())?;
        self.definition = Some(definition.clone());
        Ok(())
    }

    fn start(&mut self, editing: Option<&DraftRecord>, step_count: usize) {
        if self.session.visible {
            debug!("Reopening wizard that was still visible; previous draft dropped");
        }

        let (draft, is_editing) = match editing {
            Some(record) if !record.is_empty() => (rehydrate(record, self.rehydration), true),
            _ => (DraftRecord::new(), false),
        };

        self.session = WizardSession::opened(draft, step_count, is_editing);
        info!(
            session_id = ?self.session.id,
            step_count,
            is_editing,
            "Wizard opened"
        );
    }

    /// Merge the current step's values, then move forward one step (clamped
    /// at the last step). Returns the new step index.
    pub fn advance(&mut self, values: DraftRecord) -> WizardResult<usize> {
        let session = self.open_session_mut()?;
        session.draft.merge(values);
        session.step_index = session.clamp_step(session.step_index + 1);
        debug!(step = session.step_index, "Wizard advanced");
        Ok(session.step_index)
    }

    /// Move back one step, clamped at the first. The draft is untouched.
    pub fn retreat(&mut self) -> WizardResult<usize> {
        let session = self.open_session_mut()?;
        session.step_index = session.step_index.saturating_sub(1);
        debug!(step = session.step_index, "Wizard retreated");
        Ok(session.step_index)
    }

    /// Capture values without moving, e.g. ahead of a validation gate
    pub fn merge_without_advancing(&mut self, values: DraftRecord) -> WizardResult<()> {
        let session = self.open_session_mut()?;
        session.draft.merge(values);
        Ok(())
    }

    /// Jump straight to a step (stepper clicks). Out-of-range requests clamp.
    pub fn jump_to(&mut self, step: usize) -> WizardResult<usize> {
        let session = self.open_session_mut()?;
        session.step_index = session.clamp_step(step);
        Ok(session.step_index)
    }

    /// Merge the terminal step's values, hand back the finished draft and
    /// close the wizard.
    pub fn submit(&mut self, values: DraftRecord) -> WizardResult<DraftRecord> {
        let session = self.open_session_mut()?;
        session.draft.merge(values);
        let draft = std::mem::take(&mut session.draft);
        info!(session_id = ?session.id, fields = draft.len(), "Wizard submitted");
        self.close();
        Ok(draft)
    }

    /// Hide the wizard and discard its draft. Safe to call in any state.
    pub fn close(&mut self) {
        if self.session.visible {
            info!(session_id = ?self.session.id, "Wizard closed");
        }
        self.session = WizardSession::closed();
        self.definition = None;
    }

    pub fn current_draft(&self) -> &DraftRecord {
        &self.session.draft
    }

    pub fn session(&self) -> &WizardSession {
        &self.session
    }

    pub fn definition(&self) -> Option<&WizardDefinition> {
        self.definition.as_ref()
    }

    pub fn state(&self) -> WizardState {
        self.session.state()
    }

    pub fn step_index(&self) -> usize {
        self.session.step_index
    }

    pub fn step_count(&self) -> usize {
        self.session.step_count
    }

    pub fn is_visible(&self) -> bool {
        self.session.visible
    }

    pub fn is_editing(&self) -> bool {
        self.session.visible && self.session.is_editing
    }

    pub fn is_first_step(&self) -> bool {
        self.session.step_index == 0
    }

    pub fn is_last_step(&self) -> bool {
        self.session.step_index == self.session.last_step()
    }

    /// Fields of the current step, when opened from a definition
    pub fn current_step_fields(&self) -> &[String] {
        self.definition
            .as_ref()
            .map(|d| d.fields_for(self.session.step_index))
            .unwrap_or(&[])
    }

    /// Draft values to pre-fill the current step's form with
    pub fn current_step_defaults(&self) -> DraftRecord {
        self.session.draft.subset(self.current_step_fields())
    }

    fn open_session_mut(&mut self) -> WizardResult<&mut WizardSession> {
        if !self.session.visible {
            return Err(WizardError::NotOpen);
        }
        Ok(&mut self.session)
    }
}

impl Default for WizardDraftController {
    fn default() -> Self {
        Self::new(DateRehydration::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::WizardDomain;
    use crate::rehydrate::DATE_FIELDS;
    use aerodesk_shared::{DateValue, DraftValue};

    fn step(field: &str, value: impl Into<DraftValue>) -> DraftRecord {
        DraftRecord::new().with(field, value)
    }

    #[test]
    fn test_create_lifecycle() {
        let mut wizard = WizardDraftController::default();
        assert_eq!(wizard.state(), WizardState::Closed);

        wizard.open(None, 3).unwrap();
        assert_eq!(wizard.state(), WizardState::Creating { step: 0 });
        assert!(wizard.current_draft().is_empty());

        // Step 0 → 1 → 2
        assert_eq!(wizard.advance(step("name", "Family Saver")).unwrap(), 1);
        assert_eq!(wizard.advance(step("value", 12.5)).unwrap(), 2);
        assert_eq!(wizard.state(), WizardState::Creating { step: 2 });
        assert!(wizard.is_last_step());

        let draft = wizard.submit(step("startDate", "2024-07-01")).unwrap();
        assert_eq!(draft.len(), 3);
        assert_eq!(draft.text("name"), Some("Family Saver"));
        assert_eq!(wizard.state(), WizardState::Closed);
        assert!(wizard.current_draft().is_empty());
    }

    #[test]
    fn test_advance_then_advance_is_union() {
        let mut wizard = WizardDraftController::default();
        wizard.open(None, 4).unwrap();

        let a = DraftRecord::new().with("name", "Promo").with("value", 10);
        let b = DraftRecord::new().with("value", 20).with("code", "SUN20");

        wizard.advance(a).unwrap();
        wizard.advance(b).unwrap();

        let expected = DraftRecord::new()
            .with("name", "Promo")
            .with("value", 20)
            .with("code", "SUN20");
        assert_eq!(wizard.current_draft(), &expected);
    }

    #[test]
    fn test_advance_clamps_at_last_step() {
        let mut wizard = WizardDraftController::default();
        wizard.open(None, 2).unwrap();

        assert_eq!(wizard.advance(DraftRecord::new()).unwrap(), 1);
        assert_eq!(wizard.advance(step("late", true)).unwrap(), 1);

        // Values are still merged even though the index cannot move
        assert_eq!(wizard.current_draft().get("late"), Some(&DraftValue::Bool(true)));
    }

    #[test]
    fn test_single_step_wizard() {
        let mut wizard = WizardDraftController::default();
        wizard.open(None, 1).unwrap();

        assert!(wizard.is_first_step() && wizard.is_last_step());
        assert_eq!(wizard.advance(DraftRecord::new()).unwrap(), 0);
        assert_eq!(wizard.retreat().unwrap(), 0);
    }

    #[test]
    fn test_retreat_clamps_and_keeps_draft() {
        let mut wizard = WizardDraftController::default();
        wizard.open(None, 3).unwrap();
        wizard.advance(step("name", "Bags")).unwrap();

        assert_eq!(wizard.retreat().unwrap(), 0);
        assert_eq!(wizard.retreat().unwrap(), 0);
        assert_eq!(wizard.current_draft().text("name"), Some("Bags"));
    }

    #[test]
    fn test_advance_twice_same_values() {
        let values = DraftRecord::new()
            .with("code", "GROUP10")
            .with("channels", DraftValue::selection(["web"]));

        let mut once = WizardDraftController::default();
        once.open(None, 5).unwrap();
        once.advance(values.clone()).unwrap();

        let mut twice = WizardDraftController::default();
        twice.open(None, 5).unwrap();
        twice.merge_without_advancing(values.clone()).unwrap();
        twice.advance(values).unwrap();

        assert_eq!(once.current_draft(), twice.current_draft());
    }

    #[test]
    fn test_merge_without_advancing() {
        let mut wizard = WizardDraftController::default();
        wizard.open(None, 3).unwrap();
        wizard.jump_to(1).unwrap();

        wizard.merge_without_advancing(step("cabins", DraftValue::selection(["economy"]))).unwrap();

        assert_eq!(wizard.step_index(), 1);
        assert!(wizard.current_draft().contains_key("cabins"));
    }

    #[test]
    fn test_jump_to_clamps() {
        let mut wizard = WizardDraftController::default();
        wizard.open(None, 3).unwrap();

        assert_eq!(wizard.jump_to(2).unwrap(), 2);
        assert_eq!(wizard.jump_to(50).unwrap(), 2);
        assert_eq!(wizard.jump_to(0).unwrap(), 0);
    }

    #[test]
    fn test_zero_step_count_rejected() {
        let mut wizard = WizardDraftController::default();
        let result = wizard.open(None, 0);

        assert!(matches!(result, Err(WizardError::InvalidStepCount(0))));
        assert!(!wizard.is_visible());
    }

    #[test]
    fn test_closed_wizard_rejects_navigation() {
        let mut wizard = WizardDraftController::default();

        assert!(matches!(wizard.advance(DraftRecord::new()), Err(WizardError::NotOpen)));
        assert!(matches!(wizard.retreat(), Err(WizardError::NotOpen)));
        assert!(matches!(wizard.jump_to(1), Err(WizardError::NotOpen)));
        assert!(matches!(wizard.submit(DraftRecord::new()), Err(WizardError::NotOpen)));
        assert!(wizard.merge_without_advancing(DraftRecord::new()).is_err());
    }

    #[test]
    fn test_close_is_idempotent_and_resets() {
        let mut wizard = WizardDraftController::default();
        wizard.open(None, 3).unwrap();
        wizard.advance(step("name", "Lounge")).unwrap();

        wizard.close();
        wizard.close();
        assert_eq!(wizard.state(), WizardState::Closed);
        assert_eq!(wizard.step_index(), 0);

        wizard.open(None, 3).unwrap();
        assert!(wizard.current_draft().is_empty());
        assert_eq!(wizard.step_index(), 0);
    }

    #[test]
    fn test_open_editing_record() {
        let record = DraftRecord::new()
            .with("name", "Legacy promo")
            .with("validFrom", "2024-01-15");

        let mut wizard = WizardDraftController::default();
        wizard.open(Some(&record), 3).unwrap();

        assert_eq!(wizard.state(), WizardState::Editing { step: 0 });
        assert!(wizard.is_editing());
        assert_eq!(wizard.current_draft().text("name"), Some("Legacy promo"));
        assert!(wizard.current_draft().date("validFrom").is_some_and(|d| d.is_valid()));
        assert!(!wizard.current_draft().contains_key("validTo"));

        wizard.advance(step("name", "Renamed promo")).unwrap();
        assert_eq!(wizard.state(), WizardState::Editing { step: 1 });
        assert!(wizard.current_draft().contains_key("validFrom"));
    }

    #[test]
    fn test_unconditional_rehydration_marks_missing_dates_invalid() {
        let record = DraftRecord::new().with("name", "Legacy promo");

        let mut wizard = WizardDraftController::new(DateRehydration::Unconditional);
        wizard.open(Some(&record), 2).unwrap();

        for field in DATE_FIELDS {
            assert_eq!(wizard.current_draft().date(field), Some(DateValue::Invalid));
        }
    }

    #[test]
    fn test_empty_editing_record_is_create_mode() {
        for policy in [DateRehydration::PresentOnly, DateRehydration::Unconditional] {
            let mut with_empty = WizardDraftController::new(policy);
            with_empty.open(Some(&DraftRecord::new()), 3).unwrap();

            let mut without = WizardDraftController::new(policy);
            without.open(None, 3).unwrap();

            assert_eq!(with_empty.state(), without.state());
            assert_eq!(with_empty.current_draft(), without.current_draft());
            assert!(with_empty.current_draft().is_empty());
        }
    }

    #[test]
    fn test_reopen_after_edit_starts_clean() {
        let record = DraftRecord::new().with("name", "Old").with("endDate", "2024-01-01");

        let mut wizard = WizardDraftController::default();
        wizard.open(Some(&record), 3).unwrap();
        wizard.advance(step("value", 5)).unwrap();
        wizard.close();

        wizard.open(None, 3).unwrap();
        assert_eq!(wizard.state(), WizardState::Creating { step: 0 });
        assert!(wizard.current_draft().is_empty());
    }

    #[test]
    fn test_definition_step_defaults() {
        let definition = WizardDefinition::builtin(WizardDomain::Discount);
        let record = DraftRecord::new()
            .with("name", "Student fare")
            .with("discountType", "PERCENTAGE")
            .with("cabins", DraftValue::selection(["economy"]))
            .with("startDate", "2024-09-01");

        let mut wizard = WizardDraftController::default();
        wizard.open_definition(&definition, Some(&record)).unwrap();

        assert_eq!(wizard.step_count(), definition.step_count());
        assert_eq!(wizard.current_step_fields(), ["name", "discountType", "value"]);

        let defaults = wizard.current_step_defaults();
        assert_eq!(defaults.len(), 2);
        assert_eq!(defaults.text("discountType"), Some("PERCENTAGE"));

        wizard.advance(DraftRecord::new()).unwrap();
        assert_eq!(wizard.current_step_defaults().len(), 1);

        wizard.close();
        assert!(wizard.definition().is_none());
        assert!(wizard.current_step_fields().is_empty());
    }
}
