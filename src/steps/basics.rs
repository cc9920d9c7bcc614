//! Step 1 — account basics controller.

use std::sync::Arc;

use crate::config::WizardConfig;
use crate::validate::{ValidationReport, validate_step1};
use crate::wizard::WizardStore;
use crate::wizard::model::{Step1Data, Step1Patch};

use super::autosave::AutoSave;

/// Controller for the account-basics screen. Holds the editable working
/// copy and auto-saves it into the store after the debounce window.
pub struct BasicsController {
    store: Arc<WizardStore>,
    working: Step1Data,
    errors: ValidationReport,
    autosave: AutoSave,
}

impl BasicsController {
    /// Activate the step: the stored partition becomes the working copy.
    pub async fn activate(store: Arc<WizardStore>, config: &WizardConfig) -> Self {
        let working = store.state().await.form_data.step1;
        Self {
            store,
            working,
            errors: ValidationReport::default(),
            autosave: AutoSave::new(config.autosave_debounce),
        }
    }

    pub fn working(&self) -> &Step1Data {
        &self.working
    }

    pub fn errors(&self) -> &ValidationReport {
        &self.errors
    }

    /// Apply an edit immediately and reschedule the auto-save commit.
    /// Auto-save never validates, so invalid in-progress input persists too.
    pub fn edit(&mut self, patch: Step1Patch) {
        self.working.apply(patch);
        let store = Arc::clone(&self.store);
        let snapshot = self.working.to_patch();
        self.autosave
            .schedule(async move { store.update_step1(snapshot).await });
    }

    /// Validate the working copy; commit and advance only when clean.
    pub async fn advance(&mut self) -> bool {
        self.errors = validate_step1(&self.working);
        if !self.errors.is_valid() {
            return false;
        }
        self.autosave.cancel();
        self.store.update_step1(self.working.to_patch()).await;
        self.store.next_step().await;
        true
    }

    /// Cancel the timer and flush any pending edit so nothing typed is lost.
    pub async fn deactivate(&mut self) {
        if self.autosave.has_pending() {
            self.autosave.cancel();
            self.store.update_step1(self.working.to_patch()).await;
        }
    }
}
