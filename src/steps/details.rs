//! Step 3 — details controller with a shape derived from earlier answers.

use std::sync::Arc;

use crate::config::WizardConfig;
use crate::validate::{Step3Schema, ValidationReport, resolve_step3_schema};
use crate::wizard::WizardStore;
use crate::wizard::model::{Step3Data, Step3Patch};

use super::autosave::AutoSave;

/// Controller for the details screen. The required shape is a pure function
/// of the stored account type and country; the controller resolves it on
/// activation and again on [`refresh`] when those answers changed
/// mid-session.
///
/// [`refresh`]: Self::refresh
pub struct DetailsController {
    store: Arc<WizardStore>,
    schema: Step3Schema,
    working: Step3Data,
    errors: ValidationReport,
    autosave: AutoSave,
}

impl DetailsController {
    pub async fn activate(store: Arc<WizardStore>, config: &WizardConfig) -> Self {
        let state = store.state().await;
        let schema = resolve_step3_schema(
            state.form_data.step2.account_type,
            state.form_data.step1.country,
        );
        let working = schema.default_shape(&state.form_data.step3);
        Self {
            store,
            schema,
            working,
            errors: ValidationReport::default(),
            autosave: AutoSave::new(config.autosave_debounce),
        }
    }

    pub fn schema(&self) -> &Step3Schema {
        &self.schema
    }

    pub fn working(&self) -> &Step3Data {
        &self.working
    }

    pub fn errors(&self) -> &ValidationReport {
        &self.errors
    }

    /// Re-resolve the schema after the user went back and changed account
    /// type or country. The working copy is rebuilt from stored data for
    /// the new shape; records for no-longer-active sections stay in the
    /// store untouched.
    pub async fn refresh(&mut self) {
        let state = self.store.state().await;
        let schema = resolve_step3_schema(
            state.form_data.step2.account_type,
            state.form_data.step1.country,
        );
        if schema != self.schema {
            self.autosave.cancel();
            self.working = schema.default_shape(&state.form_data.step3);
            self.schema = schema;
            self.errors = ValidationReport::default();
        }
    }

    pub fn edit(&mut self, patch: Step3Patch) {
        self.working.apply(patch);
        let store = Arc::clone(&self.store);
        let snapshot = self.working.to_patch();
        self.autosave
            .schedule(async move { store.update_step3(snapshot).await });
    }

    /// File-selection callback: only the filename is captured, and it
    /// commits immediately, outside the debounced section working copy.
    pub async fn set_document_file_name(&self, name: impl Into<String>) {
        self.store
            .update_step3(Step3Patch {
                document_file_name: Some(name.into()),
                ..Default::default()
            })
            .await;
    }

    pub async fn advance(&mut self) -> bool {
        self.errors = self.schema.validate(&self.working);
        if !self.errors.is_valid() {
            return false;
        }
        self.autosave.cancel();
        self.store.update_step3(self.working.to_patch()).await;
        self.store.next_step().await;
        true
    }

    pub async fn back(&mut self) {
        self.deactivate().await;
        self.store.prev_step().await;
    }

    pub async fn deactivate(&mut self) {
        if self.autosave.has_pending() {
            self.autosave.cancel();
            self.store.update_step3(self.working.to_patch()).await;
        }
    }
}
