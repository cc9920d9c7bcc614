//! Dynamic step-3 schema — composed from the step-1/step-2 answers.
//!
//! The schema is a pure value: same discriminants, same accept/reject
//! behavior. It starts empty and requires named sections; sub-records
//! outside the required set are ignored entirely, so stale data from an
//! earlier account-type or country choice never fails validation.

use std::sync::LazyLock;

use regex::Regex;

use crate::wizard::model::{
    AccountType, BusinessDetails, Country, IndividualDetails, InFields, OtherCountryFields,
    Step3Data, UsFields,
};

use super::ValidationReport;

/// Syntax-only date check; calendar validity is not enforced, so an
/// impossible date like 02/31/2024 passes.
static DOB_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{2}/\d{2}/\d{4}$").unwrap());

static SSN_LAST4_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}$").unwrap());

static PAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]{1}$").unwrap());

/// A named step-3 sub-schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step3Section {
    Individual,
    Business,
    UsFields,
    InFields,
    OtherFields,
}

/// The set of sections step 3 currently requires.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Step3Schema {
    sections: Vec<Step3Section>,
}

/// Derive the step-3 schema from the discriminants. Unset discriminants
/// contribute nothing; with both unset the schema accepts any shape.
pub fn resolve_step3_schema(
    account_type: Option<AccountType>,
    country: Option<Country>,
) -> Step3Schema {
    let mut schema = Step3Schema::default();

    match account_type {
        Some(AccountType::Individual) => schema.require(Step3Section::Individual),
        Some(AccountType::Business) => schema.require(Step3Section::Business),
        None => {}
    }

    match country {
        Some(Country::Us) => schema.require(Step3Section::UsFields),
        Some(Country::In) => schema.require(Step3Section::InFields),
        Some(_) => schema.require(Step3Section::OtherFields),
        None => {}
    }

    schema
}

impl Step3Schema {
    fn require(&mut self, section: Step3Section) {
        if !self.sections.contains(&section) {
            self.sections.push(section);
        }
    }

    pub fn requires(&self, section: Step3Section) -> bool {
        self.sections.contains(&section)
    }

    pub fn sections(&self) -> &[Step3Section] {
        &self.sections
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Validate only the required sections; everything else is tolerated.
    pub fn validate(&self, data: &Step3Data) -> ValidationReport {
        let mut report = ValidationReport::default();
        for section in &self.sections {
            match section {
                Step3Section::Individual => validate_individual(&mut report, data.individual.as_ref()),
                Step3Section::Business => validate_business(&mut report, data.business.as_ref()),
                Step3Section::UsFields => validate_us(&mut report, data.us_fields.as_ref()),
                Step3Section::InFields => validate_in(&mut report, data.in_fields.as_ref()),
                Step3Section::OtherFields => validate_other(&mut report, data.other_fields.as_ref()),
            }
        }
        report
    }

    /// Build the editable working copy for this schema: required sections
    /// come from `existing` where present, otherwise start empty. Inactive
    /// sections and the document filename stay out of the working copy.
    pub fn default_shape(&self, existing: &Step3Data) -> Step3Data {
        let mut shape = Step3Data::default();
        for section in &self.sections {
            match section {
                Step3Section::Individual => {
                    shape.individual = Some(existing.individual.clone().unwrap_or_default());
                }
                Step3Section::Business => {
                    shape.business = Some(existing.business.clone().unwrap_or_default());
                }
                Step3Section::UsFields => {
                    shape.us_fields = Some(existing.us_fields.clone().unwrap_or_default());
                }
                Step3Section::InFields => {
                    shape.in_fields = Some(existing.in_fields.clone().unwrap_or_default());
                }
                Step3Section::OtherFields => {
                    shape.other_fields = Some(existing.other_fields.clone().unwrap_or_default());
                }
            }
        }
        shape
    }
}

fn validate_individual(report: &mut ValidationReport, record: Option<&IndividualDetails>) {
    let Some(rec) = record else {
        report.push("individual.dob", "Date of birth is required");
        report.push("individual.addressLine1", "Address is required");
        report.push("individual.city", "City is required");
        report.push("individual.postalCode", "Postal code is required");
        return;
    };

    if rec.dob.is_empty() {
        report.push("individual.dob", "Date of birth is required");
    } else if !DOB_RE.is_match(&rec.dob) {
        report.push("individual.dob", "Please use MM/DD/YYYY format");
    }

    if rec.address_line1.is_empty() {
        report.push("individual.addressLine1", "Address is required");
    } else if rec.address_line1.chars().count() > 200 {
        report.push(
            "individual.addressLine1",
            "Address must be less than 200 characters",
        );
    }

    if rec.city.is_empty() {
        report.push("individual.city", "City is required");
    } else if rec.city.chars().count() > 100 {
        report.push("individual.city", "City must be less than 100 characters");
    }

    if rec.postal_code.is_empty() {
        report.push("individual.postalCode", "Postal code is required");
    } else if rec.postal_code.chars().count() > 20 {
        report.push(
            "individual.postalCode",
            "Postal code must be less than 20 characters",
        );
    }
}

fn validate_business(report: &mut ValidationReport, record: Option<&BusinessDetails>) {
    let Some(rec) = record else {
        report.push(
            "business.businessLegalName",
            "Business legal name is required",
        );
        report.push(
            "business.registrationCountry",
            "Please select a registration country",
        );
        report.push("business.role", "Role is required");
        return;
    };

    if rec.business_legal_name.is_empty() {
        report.push(
            "business.businessLegalName",
            "Business legal name is required",
        );
    } else if rec.business_legal_name.chars().count() > 200 {
        report.push(
            "business.businessLegalName",
            "Business name must be less than 200 characters",
        );
    }

    if rec.registration_country.is_none() {
        report.push(
            "business.registrationCountry",
            "Please select a registration country",
        );
    }

    if rec.role.is_empty() {
        report.push("business.role", "Role is required");
    } else if rec.role.chars().count() > 100 {
        report.push("business.role", "Role must be less than 100 characters");
    }
}

fn validate_us(report: &mut ValidationReport, record: Option<&UsFields>) {
    let Some(rec) = record else {
        report.push("usFields.state", "Please select a state");
        report.push("usFields.ssnLast4", "SSN last 4 must be exactly 4 digits");
        return;
    };

    if rec.state.is_empty() {
        report.push("usFields.state", "Please select a state");
    }

    if rec.ssn_last4.chars().count() != 4 {
        report.push("usFields.ssnLast4", "SSN last 4 must be exactly 4 digits");
    } else if !SSN_LAST4_RE.is_match(&rec.ssn_last4) {
        report.push("usFields.ssnLast4", "SSN last 4 must be 4 digits");
    }
}

fn validate_in(report: &mut ValidationReport, record: Option<&InFields>) {
    let Some(rec) = record else {
        report.push("inFields.pan", "PAN must be exactly 10 characters");
        return;
    };

    if rec.pan.chars().count() != 10 {
        report.push("inFields.pan", "PAN must be exactly 10 characters");
    } else if !PAN_RE.is_match(&rec.pan) {
        report.push("inFields.pan", "Please enter a valid PAN format");
    }
}

fn validate_other(report: &mut ValidationReport, record: Option<&OtherCountryFields>) {
    let Some(rec) = record else {
        report.push("otherFields.nationalId", "National ID is required");
        return;
    };

    if rec.national_id.is_empty() {
        report.push("otherFields.nationalId", "National ID is required");
    } else if rec.national_id.chars().count() > 50 {
        report.push(
            "otherFields.nationalId",
            "National ID must be less than 50 characters",
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_individual() -> IndividualDetails {
        IndividualDetails {
            dob: "04/12/1990".into(),
            address_line1: "1 Main St".into(),
            city: "Springfield".into(),
            postal_code: "12345".into(),
        }
    }

    #[test]
    fn individual_us_requires_both_sections() {
        let schema = resolve_step3_schema(Some(AccountType::Individual), Some(Country::Us));
        assert!(schema.requires(Step3Section::Individual));
        assert!(schema.requires(Step3Section::UsFields));
        assert!(!schema.requires(Step3Section::Business));
        assert!(!schema.requires(Step3Section::InFields));
        assert!(!schema.requires(Step3Section::OtherFields));
    }

    #[test]
    fn business_other_country_sections() {
        let schema = resolve_step3_schema(Some(AccountType::Business), Some(Country::De));
        assert!(schema.requires(Step3Section::Business));
        assert!(schema.requires(Step3Section::OtherFields));
        assert!(!schema.requires(Step3Section::Individual));
        assert!(!schema.requires(Step3Section::UsFields));
    }

    #[test]
    fn unset_discriminants_yield_empty_schema() {
        let schema = resolve_step3_schema(None, None);
        assert!(schema.is_empty());
        // An empty schema validates any shape.
        let stale = Step3Data {
            business: Some(BusinessDetails::default()),
            ..Default::default()
        };
        assert!(schema.validate(&stale).is_valid());
    }

    #[test]
    fn resolver_is_deterministic() {
        let pairs = [
            (None, None),
            (Some(AccountType::Individual), None),
            (Some(AccountType::Business), Some(Country::Us)),
            (Some(AccountType::Individual), Some(Country::In)),
            (Some(AccountType::Business), Some(Country::Fr)),
        ];
        let samples = [
            Step3Data::default(),
            Step3Data {
                individual: Some(filled_individual()),
                us_fields: Some(UsFields {
                    state: "CA".into(),
                    ssn_last4: "1234".into(),
                }),
                ..Default::default()
            },
            Step3Data {
                business: Some(BusinessDetails {
                    business_legal_name: "Acme".into(),
                    registration_country: Some(Country::Fr),
                    role: "CEO".into(),
                }),
                ..Default::default()
            },
        ];

        for (account_type, country) in pairs {
            let a = resolve_step3_schema(account_type, country);
            let b = resolve_step3_schema(account_type, country);
            assert_eq!(a, b);
            for sample in &samples {
                assert_eq!(a.validate(sample), b.validate(sample));
            }
        }
    }

    #[test]
    fn missing_required_section_reports_every_field() {
        let schema = resolve_step3_schema(Some(AccountType::Individual), Some(Country::Us));
        let report = schema.validate(&Step3Data::default());
        for field in [
            "individual.dob",
            "individual.addressLine1",
            "individual.city",
            "individual.postalCode",
            "usFields.state",
            "usFields.ssnLast4",
        ] {
            assert!(report.message_for(field).is_some(), "{field} should fail");
        }
    }

    #[test]
    fn stale_sections_are_not_validated() {
        // Account type flipped to individual; the old business record stays
        // behind but must not produce errors.
        let schema = resolve_step3_schema(Some(AccountType::Individual), None);
        let data = Step3Data {
            individual: Some(filled_individual()),
            business: Some(BusinessDetails::default()),
            ..Default::default()
        };
        assert!(schema.validate(&data).is_valid());
    }

    #[test]
    fn pan_format_battery() {
        let schema = resolve_step3_schema(None, Some(Country::In));

        let mut data = Step3Data {
            in_fields: Some(InFields {
                pan: "ABCDE1234F".into(),
            }),
            ..Default::default()
        };
        assert!(schema.validate(&data).is_valid());

        data.in_fields = Some(InFields {
            pan: "abcde1234f".into(),
        });
        assert_eq!(
            schema.validate(&data).message_for("inFields.pan"),
            Some("Please enter a valid PAN format")
        );

        data.in_fields = Some(InFields {
            pan: "ABCDE123".into(),
        });
        assert_eq!(
            schema.validate(&data).message_for("inFields.pan"),
            Some("PAN must be exactly 10 characters")
        );

        data.in_fields = Some(InFields {
            pan: "1BCDE1234F".into(),
        });
        assert_eq!(
            schema.validate(&data).message_for("inFields.pan"),
            Some("Please enter a valid PAN format")
        );
    }

    #[test]
    fn ssn_last4_must_be_digits() {
        let schema = resolve_step3_schema(None, Some(Country::Us));
        let mut data = Step3Data {
            us_fields: Some(UsFields {
                state: "NY".into(),
                ssn_last4: "12a4".into(),
            }),
            ..Default::default()
        };
        assert_eq!(
            schema.validate(&data).message_for("usFields.ssnLast4"),
            Some("SSN last 4 must be 4 digits")
        );

        data.us_fields = Some(UsFields {
            state: "NY".into(),
            ssn_last4: "123".into(),
        });
        assert_eq!(
            schema.validate(&data).message_for("usFields.ssnLast4"),
            Some("SSN last 4 must be exactly 4 digits")
        );

        data.us_fields = Some(UsFields {
            state: "NY".into(),
            ssn_last4: "1234".into(),
        });
        assert!(schema.validate(&data).is_valid());
    }

    #[test]
    fn dob_is_syntax_only_and_accepts_impossible_dates() {
        // Known gap: the pattern checks shape, not the calendar, so
        // 02/31/2024 passes. Kept intentionally.
        let schema = resolve_step3_schema(Some(AccountType::Individual), None);
        let mut rec = filled_individual();
        rec.dob = "02/31/2024".into();
        let data = Step3Data {
            individual: Some(rec),
            ..Default::default()
        };
        assert!(schema.validate(&data).is_valid());

        let mut rec = filled_individual();
        rec.dob = "1990-04-12".into();
        let data = Step3Data {
            individual: Some(rec),
            ..Default::default()
        };
        assert_eq!(
            schema.validate(&data).message_for("individual.dob"),
            Some("Please use MM/DD/YYYY format")
        );
    }

    #[test]
    fn length_caps() {
        let schema = resolve_step3_schema(Some(AccountType::Business), Some(Country::Uk));
        let data = Step3Data {
            business: Some(BusinessDetails {
                business_legal_name: "x".repeat(201),
                registration_country: Some(Country::Uk),
                role: "y".repeat(101),
            }),
            other_fields: Some(OtherCountryFields {
                national_id: "z".repeat(51),
            }),
            ..Default::default()
        };
        let report = schema.validate(&data);
        assert_eq!(
            report.message_for("business.businessLegalName"),
            Some("Business name must be less than 200 characters")
        );
        assert_eq!(
            report.message_for("business.role"),
            Some("Role must be less than 100 characters")
        );
        assert_eq!(
            report.message_for("otherFields.nationalId"),
            Some("National ID must be less than 50 characters")
        );
    }

    #[test]
    fn default_shape_materializes_required_sections() {
        let schema = resolve_step3_schema(Some(AccountType::Individual), Some(Country::Us));
        let existing = Step3Data {
            individual: Some(filled_individual()),
            business: Some(BusinessDetails::default()),
            document_file_name: Some("doc.pdf".into()),
            ..Default::default()
        };

        let shape = schema.default_shape(&existing);
        // Stored individual data carries over; US fields start empty.
        assert_eq!(shape.individual, Some(filled_individual()));
        assert_eq!(shape.us_fields, Some(UsFields::default()));
        // Inactive sections and the filename stay out of the working copy.
        assert!(shape.business.is_none());
        assert!(shape.document_file_name.is_none());
    }
}
