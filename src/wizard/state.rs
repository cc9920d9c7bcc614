//! Wizard state root — current step, accumulated form data, terminal flag.

use serde::{Deserialize, Serialize};

use super::model::WizardFormData;

/// Number of wizard screens, review included.
pub const TOTAL_STEPS: u8 = 4;

/// The complete wizard state. Owned exclusively by [`WizardStore`]; callers
/// only ever see clones.
///
/// [`WizardStore`]: super::WizardStore
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WizardState {
    /// Active step, always within `1..=TOTAL_STEPS`.
    pub current_step: u8,
    pub form_data: WizardFormData,
    /// Terminal flag; once set, only a reset leaves the submitted screen.
    pub is_submitted: bool,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            current_step: 1,
            form_data: WizardFormData::default(),
            is_submitted: false,
        }
    }
}

impl WizardState {
    /// Advance one step, clamped at the last screen.
    pub fn next_step(&mut self) {
        self.current_step = (self.current_step + 1).min(TOTAL_STEPS);
    }

    /// Go back one step, clamped at the first screen.
    pub fn prev_step(&mut self) {
        self.current_step = self.current_step.saturating_sub(1).max(1);
    }
}
