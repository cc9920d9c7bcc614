//! Step 2 — account setup controller.

use std::sync::Arc;

use crate::config::WizardConfig;
use crate::validate::{ValidationReport, validate_step2};
use crate::wizard::WizardStore;
use crate::wizard::model::{Step2Data, Step2Patch};

use super::autosave::AutoSave;

/// Controller for the account-setup screen (account type, product goal,
/// expected monthly volume).
pub struct SetupController {
    store: Arc<WizardStore>,
    working: Step2Data,
    errors: ValidationReport,
    autosave: AutoSave,
}

impl SetupController {
    pub async fn activate(store: Arc<WizardStore>, config: &WizardConfig) -> Self {
        let working = store.state().await.form_data.step2;
        Self {
            store,
            working,
            errors: ValidationReport::default(),
            autosave: AutoSave::new(config.autosave_debounce),
        }
    }

    pub fn working(&self) -> &Step2Data {
        &self.working
    }

    pub fn errors(&self) -> &ValidationReport {
        &self.errors
    }

    pub fn edit(&mut self, patch: Step2Patch) {
        self.working.apply(patch);
        let store = Arc::clone(&self.store);
        let snapshot = self.working.to_patch();
        self.autosave
            .schedule(async move { store.update_step2(snapshot).await });
    }

    pub async fn advance(&mut self) -> bool {
        self.errors = validate_step2(&self.working);
        if !self.errors.is_valid() {
            return false;
        }
        self.autosave.cancel();
        self.store.update_step2(self.working.to_patch()).await;
        self.store.next_step().await;
        true
    }

    /// Backward navigation never validates; the working copy is flushed
    /// first so in-progress edits survive.
    pub async fn back(&mut self) {
        self.deactivate().await;
        self.store.prev_step().await;
    }

    pub async fn deactivate(&mut self) {
        if self.autosave.has_pending() {
            self.autosave.cancel();
            self.store.update_step2(self.working.to_patch()).await;
        }
    }
}
