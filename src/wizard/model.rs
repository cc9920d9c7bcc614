//! Form data model — per-step partitions and their shallow-merge patches.

use serde::{Deserialize, Serialize};

/// Kind of account being opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Individual,
    Business,
}

impl AccountType {
    /// Parse a wire code ("individual" / "business").
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "individual" => Some(Self::Individual),
            "business" => Some(Self::Business),
            _ => None,
        }
    }

    /// Human-readable label for review screens.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Individual => "Individual",
            Self::Business => "Business",
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Individual => write!(f, "individual"),
            Self::Business => write!(f, "business"),
        }
    }
}

/// What the user primarily wants the product for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductGoal {
    Spend,
    Save,
    Invest,
}

impl ProductGoal {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "spend" => Some(Self::Spend),
            "save" => Some(Self::Save),
            "invest" => Some(Self::Invest),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Spend => "Spend",
            Self::Save => "Save",
            Self::Invest => "Invest",
        }
    }
}

impl std::fmt::Display for ProductGoal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Spend => write!(f, "spend"),
            Self::Save => write!(f, "save"),
            Self::Invest => write!(f, "invest"),
        }
    }
}

/// Supported residency countries.
///
/// The selected country drives which identification fields step 3 requires:
/// US gets state + SSN suffix, IN gets a PAN, everything else gets a
/// free-form national ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Country {
    Us,
    In,
    Uk,
    Ca,
    Au,
    De,
    Fr,
    Other,
}

impl Country {
    /// Parse a wire code ("US", "IN", ...).
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "US" => Some(Self::Us),
            "IN" => Some(Self::In),
            "UK" => Some(Self::Uk),
            "CA" => Some(Self::Ca),
            "AU" => Some(Self::Au),
            "DE" => Some(Self::De),
            "FR" => Some(Self::Fr),
            "OTHER" => Some(Self::Other),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Us => "US",
            Self::In => "IN",
            Self::Uk => "UK",
            Self::Ca => "CA",
            Self::Au => "AU",
            Self::De => "DE",
            Self::Fr => "FR",
            Self::Other => "OTHER",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Us => "United States",
            Self::In => "India",
            Self::Uk => "United Kingdom",
            Self::Ca => "Canada",
            Self::Au => "Australia",
            Self::De => "Germany",
            Self::Fr => "France",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ── Step partitions ─────────────────────────────────────────────────

/// Step 1 — account basics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Step1Data {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub country: Option<Country>,
    /// Kept as typed; hashing at rest is the enrollment backend's concern.
    pub password: String,
}

/// Step 2 — account setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Step2Data {
    pub account_type: Option<AccountType>,
    pub product_goal: Option<ProductGoal>,
    /// Expected monthly volume, 0–100 slider value.
    pub monthly_volume: f64,
}

impl Default for Step2Data {
    fn default() -> Self {
        Self {
            account_type: None,
            product_goal: None,
            monthly_volume: 50.0,
        }
    }
}

/// Individual applicant details (required when account type is individual).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IndividualDetails {
    pub dob: String,
    pub address_line1: String,
    pub city: String,
    pub postal_code: String,
}

/// Business applicant details (required when account type is business).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BusinessDetails {
    pub business_legal_name: String,
    pub registration_country: Option<Country>,
    pub role: String,
}

/// US-specific identification (required when country is US).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UsFields {
    pub state: String,
    pub ssn_last4: String,
}

/// India-specific identification (required when country is IN).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InFields {
    pub pan: String,
}

/// Identification for any other selected country.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OtherCountryFields {
    pub national_id: String,
}

/// Step 3 — a sparse union of sub-records selected by the earlier answers.
///
/// Sub-records for shapes that are no longer selected (the user went back
/// and flipped account type or country) stay here as leftover data. They are
/// neither required nor validated once their selector stops matching.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Step3Data {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub individual: Option<IndividualDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business: Option<BusinessDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub us_fields: Option<UsFields>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_fields: Option<InFields>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_fields: Option<OtherCountryFields>,
    /// Captured upload filename only; file bytes never enter the core.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_file_name: Option<String>,
}

/// All accumulated form data, partitioned per step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WizardFormData {
    pub step1: Step1Data,
    pub step2: Step2Data,
    pub step3: Step3Data,
}

// ── Patches ─────────────────────────────────────────────────────────
//
// A patch field of `None` means "leave as-is"; selection fields use a
// nested Option so a patch can also clear them.

/// Partial update for step 1.
#[derive(Debug, Clone, Default)]
pub struct Step1Patch {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub country: Option<Option<Country>>,
    pub password: Option<String>,
}

impl Step1Data {
    /// Shallow-merge `patch` into this partition.
    pub fn apply(&mut self, patch: Step1Patch) {
        if let Some(v) = patch.full_name {
            self.full_name = v;
        }
        if let Some(v) = patch.email {
            self.email = v;
        }
        if let Some(v) = patch.phone {
            self.phone = v;
        }
        if let Some(v) = patch.country {
            self.country = v;
        }
        if let Some(v) = patch.password {
            self.password = v;
        }
    }

    /// A patch carrying every field, for committing a full working copy.
    pub fn to_patch(&self) -> Step1Patch {
        Step1Patch {
            full_name: Some(self.full_name.clone()),
            email: Some(self.email.clone()),
            phone: Some(self.phone.clone()),
            country: Some(self.country),
            password: Some(self.password.clone()),
        }
    }
}

/// Partial update for step 2.
#[derive(Debug, Clone, Default)]
pub struct Step2Patch {
    pub account_type: Option<Option<AccountType>>,
    pub product_goal: Option<Option<ProductGoal>>,
    pub monthly_volume: Option<f64>,
}

impl Step2Data {
    pub fn apply(&mut self, patch: Step2Patch) {
        if let Some(v) = patch.account_type {
            self.account_type = v;
        }
        if let Some(v) = patch.product_goal {
            self.product_goal = v;
        }
        if let Some(v) = patch.monthly_volume {
            self.monthly_volume = v;
        }
    }

    pub fn to_patch(&self) -> Step2Patch {
        Step2Patch {
            account_type: Some(self.account_type),
            product_goal: Some(self.product_goal),
            monthly_volume: Some(self.monthly_volume),
        }
    }
}

/// Partial update for step 3. Sub-records replace wholesale; there is no
/// per-field merge inside a sub-record.
#[derive(Debug, Clone, Default)]
pub struct Step3Patch {
    pub individual: Option<IndividualDetails>,
    pub business: Option<BusinessDetails>,
    pub us_fields: Option<UsFields>,
    pub in_fields: Option<InFields>,
    pub other_fields: Option<OtherCountryFields>,
    pub document_file_name: Option<String>,
}

impl Step3Data {
    pub fn apply(&mut self, patch: Step3Patch) {
        if let Some(v) = patch.individual {
            self.individual = Some(v);
        }
        if let Some(v) = patch.business {
            self.business = Some(v);
        }
        if let Some(v) = patch.us_fields {
            self.us_fields = Some(v);
        }
        if let Some(v) = patch.in_fields {
            self.in_fields = Some(v);
        }
        if let Some(v) = patch.other_fields {
            self.other_fields = Some(v);
        }
        if let Some(v) = patch.document_file_name {
            self.document_file_name = Some(v);
        }
    }

    /// A patch carrying every present sub-record. Absent sub-records (and an
    /// absent document filename) are left out so the merge cannot clobber
    /// data this copy never held.
    pub fn to_patch(&self) -> Step3Patch {
        Step3Patch {
            individual: self.individual.clone(),
            business: self.business.clone(),
            us_fields: self.us_fields.clone(),
            in_fields: self.in_fields.clone(),
            other_fields: self.other_fields.clone(),
            document_file_name: self.document_file_name.clone(),
        }
    }
}

/// Snapshot keys used for wizard persistence.
pub mod snapshot_keys {
    /// Key for the serialized wizard state in the snapshot store.
    pub const WIZARD_STATE: &str = "coolpockett-wizard";
}
