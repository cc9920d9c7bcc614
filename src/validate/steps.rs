//! Fixed validators for steps 1 and 2.

use std::sync::LazyLock;

use regex::Regex;

use crate::wizard::model::{Step1Data, Step2Data};

use super::ValidationReport;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)+$").unwrap()
});

/// At least 10 characters drawn from digits, spaces, parens, and hyphens,
/// with an optional leading plus.
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[+]?[\d\s()-]{10,}$").unwrap());

/// Validate the step-1 working copy. All failing fields are reported.
pub fn validate_step1(data: &Step1Data) -> ValidationReport {
    let mut report = ValidationReport::default();

    let name_len = data.full_name.chars().count();
    if name_len < 2 {
        report.push("fullName", "Full name must be at least 2 characters");
    } else if name_len > 100 {
        report.push("fullName", "Full name must be less than 100 characters");
    }

    if data.email.is_empty() {
        report.push("email", "Email is required");
    } else if !EMAIL_RE.is_match(&data.email) {
        report.push("email", "Please enter a valid email address");
    }

    if data.phone.is_empty() {
        report.push("phone", "Phone number is required");
    } else if !PHONE_RE.is_match(&data.phone) {
        report.push("phone", "Please enter a valid phone number");
    }

    if data.country.is_none() {
        report.push("country", "Please select a country");
    }

    let password = &data.password;
    if password.chars().count() < 8 {
        report.push("password", "Password must be at least 8 characters");
    } else if !password.chars().any(|c| c.is_ascii_uppercase()) {
        report.push(
            "password",
            "Password must contain at least one uppercase letter",
        );
    } else if !password.chars().any(|c| c.is_ascii_lowercase()) {
        report.push(
            "password",
            "Password must contain at least one lowercase letter",
        );
    } else if !password.chars().any(|c| c.is_ascii_digit()) {
        report.push("password", "Password must contain at least one number");
    }

    report
}

/// Validate the step-2 working copy.
pub fn validate_step2(data: &Step2Data) -> ValidationReport {
    let mut report = ValidationReport::default();

    if data.account_type.is_none() {
        report.push("accountType", "Please select an account type");
    }
    if data.product_goal.is_none() {
        report.push("productGoal", "Please select a product goal");
    }
    if !(0.0..=100.0).contains(&data.monthly_volume) {
        report.push("monthlyVolume", "Monthly volume must be between 0 and 100");
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::model::{AccountType, Country, ProductGoal};

    fn valid_step1() -> Step1Data {
        Step1Data {
            full_name: "Jane Doe".into(),
            email: "jane@x.com".into(),
            phone: "1234567890".into(),
            country: Some(Country::Us),
            password: "Abcdef12".into(),
        }
    }

    #[test]
    fn accepts_complete_step1() {
        assert!(validate_step1(&valid_step1()).is_valid());
    }

    #[test]
    fn full_name_length_bounds() {
        let mut data = valid_step1();

        data.full_name = "J".into();
        let report = validate_step1(&data);
        assert_eq!(
            report.message_for("fullName"),
            Some("Full name must be at least 2 characters")
        );

        data.full_name = "x".repeat(101);
        let report = validate_step1(&data);
        assert_eq!(
            report.message_for("fullName"),
            Some("Full name must be less than 100 characters")
        );

        data.full_name = "Jo".into();
        assert!(validate_step1(&data).is_valid());
        data.full_name = "x".repeat(100);
        assert!(validate_step1(&data).is_valid());
    }

    #[test]
    fn email_syntax() {
        let mut data = valid_step1();

        data.email = String::new();
        assert_eq!(
            validate_step1(&data).message_for("email"),
            Some("Email is required")
        );

        for bad in ["plainaddress", "no@tld", "spaces in@x.com", "@x.com"] {
            data.email = bad.into();
            assert_eq!(
                validate_step1(&data).message_for("email"),
                Some("Please enter a valid email address"),
                "{bad} should be rejected"
            );
        }

        for good in ["jane@x.com", "jane.doe+tag@sub.example.co.uk"] {
            data.email = good.into();
            assert!(validate_step1(&data).is_valid(), "{good} should pass");
        }
    }

    #[test]
    fn phone_pattern() {
        let mut data = valid_step1();

        for good in ["1234567890", "+1 (555) 123-4567", "00 11 22 33 44"] {
            data.phone = good.into();
            assert!(validate_step1(&data).is_valid(), "{good} should pass");
        }

        for bad in ["12345", "abcdefghij", "+12-34"] {
            data.phone = bad.into();
            assert!(
                validate_step1(&data).message_for("phone").is_some(),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn password_rules_in_order() {
        let mut data = valid_step1();

        data.password = "Ab1".into();
        assert_eq!(
            validate_step1(&data).message_for("password"),
            Some("Password must be at least 8 characters")
        );

        data.password = "abcdef12".into();
        assert_eq!(
            validate_step1(&data).message_for("password"),
            Some("Password must contain at least one uppercase letter")
        );

        data.password = "ABCDEF12".into();
        assert_eq!(
            validate_step1(&data).message_for("password"),
            Some("Password must contain at least one lowercase letter")
        );

        data.password = "Abcdefgh".into();
        assert_eq!(
            validate_step1(&data).message_for("password"),
            Some("Password must contain at least one number")
        );
    }

    #[test]
    fn all_failing_fields_reported_together() {
        let report = validate_step1(&Step1Data::default());
        for field in ["fullName", "email", "phone", "country", "password"] {
            assert!(report.message_for(field).is_some(), "{field} should fail");
        }
    }

    #[test]
    fn step2_requires_selections() {
        let report = validate_step2(&Step2Data::default());
        assert_eq!(
            report.message_for("accountType"),
            Some("Please select an account type")
        );
        assert_eq!(
            report.message_for("productGoal"),
            Some("Please select a product goal")
        );
        // Default volume of 50 is in range.
        assert!(report.message_for("monthlyVolume").is_none());
    }

    #[test]
    fn step2_volume_bounds() {
        let mut data = Step2Data {
            account_type: Some(AccountType::Individual),
            product_goal: Some(ProductGoal::Save),
            monthly_volume: 0.0,
        };
        assert!(validate_step2(&data).is_valid());

        data.monthly_volume = 100.0;
        assert!(validate_step2(&data).is_valid());

        data.monthly_volume = -0.5;
        assert!(validate_step2(&data).message_for("monthlyVolume").is_some());

        data.monthly_volume = 100.5;
        assert!(validate_step2(&data).message_for("monthlyVolume").is_some());
    }
}
