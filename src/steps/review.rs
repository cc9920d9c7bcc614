//! Step 4 — review projection and the terminal submission transition.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::SubmitError;
use crate::wizard::WizardStore;
use crate::wizard::model::{AccountType, Country, ProductGoal, WizardFormData};
use crate::wizard::state::WizardState;

/// Feature bullets shown in the account preview, per product goal.
pub fn product_features(goal: ProductGoal) -> &'static [&'static str] {
    match goal {
        ProductGoal::Spend => &[
            "Instant spending notifications",
            "Budgeting tools included",
            "No monthly fees",
        ],
        ProductGoal::Save => &[
            "High-yield savings account",
            "Automated savings rules",
            "Goal tracking",
        ],
        ProductGoal::Invest => &[
            "Commission-free trading",
            "Fractional shares",
            "Portfolio insights",
        ],
    }
}

/// One labeled line in a review section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewItem {
    pub label: &'static str,
    pub value: String,
}

/// A titled group of review lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSection {
    pub title: &'static str,
    pub items: Vec<ReviewItem>,
}

/// The product card shown alongside the review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountPreview {
    pub product_name: String,
    pub features: Vec<&'static str>,
}

/// Read-only projection of all three step partitions.
///
/// No re-validation happens here: a step cannot have been left without
/// passing its own validator, so the data is displayed as committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSummary {
    pub sections: Vec<ReviewSection>,
    pub preview: Option<AccountPreview>,
}

impl ReviewSummary {
    pub fn project(state: &WizardState) -> Self {
        let step1 = &state.form_data.step1;
        let step2 = &state.form_data.step2;
        let step3 = &state.form_data.step3;

        let basics = ReviewSection {
            title: "Account basics",
            items: vec![
                ReviewItem {
                    label: "Name",
                    value: step1.full_name.clone(),
                },
                ReviewItem {
                    label: "Email",
                    value: step1.email.clone(),
                },
                ReviewItem {
                    label: "Phone",
                    value: step1.phone.clone(),
                },
                ReviewItem {
                    label: "Country",
                    value: step1.country.map(|c| c.label().to_string()).unwrap_or_default(),
                },
            ],
        };

        let setup = ReviewSection {
            title: "Account setup",
            items: vec![
                ReviewItem {
                    label: "Type",
                    value: step2
                        .account_type
                        .map(|t| t.label().to_string())
                        .unwrap_or_default(),
                },
                ReviewItem {
                    label: "Goal",
                    value: step2
                        .product_goal
                        .map(|g| g.label().to_string())
                        .unwrap_or_default(),
                },
                ReviewItem {
                    label: "Monthly volume",
                    value: format!("{:.0}", step2.monthly_volume),
                },
            ],
        };

        // Detail lines follow the discriminants, not whatever stale records
        // happen to remain in storage.
        let mut detail_items = Vec::new();
        match step2.account_type {
            Some(AccountType::Individual) => {
                if let Some(ref individual) = step3.individual {
                    detail_items.push(ReviewItem {
                        label: "DOB",
                        value: individual.dob.clone(),
                    });
                    detail_items.push(ReviewItem {
                        label: "City",
                        value: individual.city.clone(),
                    });
                }
            }
            Some(AccountType::Business) => {
                if let Some(ref business) = step3.business {
                    detail_items.push(ReviewItem {
                        label: "Business",
                        value: business.business_legal_name.clone(),
                    });
                    detail_items.push(ReviewItem {
                        label: "Role",
                        value: business.role.clone(),
                    });
                }
            }
            None => {}
        }
        if step1.country == Some(Country::Us) {
            if let Some(ref us) = step3.us_fields {
                detail_items.push(ReviewItem {
                    label: "State",
                    value: us.state.clone(),
                });
            }
        }
        let details = ReviewSection {
            title: "Details",
            items: detail_items,
        };

        let preview = step2.product_goal.map(|goal| AccountPreview {
            product_name: format!(
                "CoolPockett {} ({})",
                goal.label(),
                step2
                    .account_type
                    .map(|t| t.label())
                    .unwrap_or("Individual"),
            ),
            features: product_features(goal).to_vec(),
        });

        Self {
            sections: vec![basics, setup, details],
            preview,
        }
    }
}

/// External acceptance call for the final submission.
///
/// The real service would define failure, timeout, and retry semantics;
/// the default stub resolves successfully after a fixed delay.
#[async_trait]
pub trait AcceptanceService: Send + Sync {
    async fn accept(&self, form: &WizardFormData) -> Result<(), SubmitError>;
}

/// Default acceptance stub — fixed delay, always succeeds.
pub struct FixedDelayAcceptance {
    delay: Duration,
}

impl FixedDelayAcceptance {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl AcceptanceService for FixedDelayAcceptance {
    async fn accept(&self, _form: &WizardFormData) -> Result<(), SubmitError> {
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}

/// Drives the terminal submission transition for the review screen.
pub struct SubmitController {
    store: Arc<WizardStore>,
    acceptance: Arc<dyn AcceptanceService>,
    submitting: AtomicBool,
}

impl SubmitController {
    pub fn new(store: Arc<WizardStore>, acceptance: Arc<dyn AcceptanceService>) -> Self {
        Self {
            store,
            acceptance,
            submitting: AtomicBool::new(false),
        }
    }

    /// Whether a submission is currently in flight.
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    /// Whether the renderer should enable the submit action.
    pub async fn can_submit(&self) -> bool {
        !self.is_submitting() && !self.store.state().await.is_submitted
    }

    /// Run the acceptance call and mark the wizard submitted on completion.
    ///
    /// Returns false without doing anything when a submission is already in
    /// flight or the wizard is already in its terminal state; at most one
    /// acceptance call runs per wizard instance at a time.
    pub async fn submit(&self) -> bool {
        if self.store.state().await.is_submitted {
            return false;
        }
        if self
            .submitting
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return false;
        }

        let form = self.store.state().await.form_data;
        if let Err(e) = self.acceptance.accept(&form).await {
            // Failure semantics are the acceptance service's open problem;
            // the wizard still completes its terminal transition.
            tracing::warn!("Acceptance call reported an error: {e}");
        }
        self.store.set_submitted(true).await;
        self.submitting.store(false, Ordering::SeqCst);
        true
    }

    /// Backward navigation from the review screen.
    pub async fn back(&self) {
        self.store.prev_step().await;
    }

    /// The only way out of the submitted terminal state.
    pub async fn reset(&self) {
        self.store.reset().await;
    }
}
