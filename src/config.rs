//! Configuration types.

use std::time::Duration;

/// Wizard runtime configuration.
#[derive(Debug, Clone)]
pub struct WizardConfig {
    /// Debounce window for auto-saving in-progress edits.
    pub autosave_debounce: Duration,
    /// Simulated processing delay for the acceptance call.
    pub submit_delay: Duration,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            autosave_debounce: Duration::from_millis(400),
            submit_delay: Duration::from_millis(1500),
        }
    }
}
