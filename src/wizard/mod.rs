//! Wizard state — data model, state root, and the observable store.

pub mod model;
pub mod state;
pub mod store;

pub use state::{TOTAL_STEPS, WizardState};
pub use store::WizardStore;
