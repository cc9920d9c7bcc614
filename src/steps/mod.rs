//! Step controllers — one per wizard screen, binding a validator to the
//! store: load defaults, accept live edits, auto-persist, and gate forward
//! navigation on validation.

pub mod autosave;
pub mod basics;
pub mod details;
pub mod review;
pub mod setup;

pub use autosave::AutoSave;
pub use basics::BasicsController;
pub use details::DetailsController;
pub use review::{
    AcceptanceService, FixedDelayAcceptance, ReviewSummary, SubmitController, product_features,
};
pub use setup::SetupController;
