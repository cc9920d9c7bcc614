//! Field validation — fixed rule sets for steps 1–2 and the dynamic
//! step-3 schema derived from the earlier answers.
//!
//! Validation never mutates anything and never blocks auto-save: invalid
//! in-progress data still persists so typed input is not lost. A failed
//! report only blocks the forward navigation that requested it.

mod step3;
mod steps;

pub use step3::{Step3Schema, Step3Section, resolve_step3_schema};
pub use steps::{validate_step1, validate_step2};

/// A single field-scoped validation failure. Nested step-3 fields use
/// dotted paths ("individual.dob", "usFields.ssnLast4").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Accumulated validation outcome for one step's working copy.
///
/// All failing fields are reported together; per field, the first failing
/// rule in declaration order wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<FieldError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    /// Message for a field, if it failed.
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}
