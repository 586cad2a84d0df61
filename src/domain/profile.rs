use std::{fmt, str::FromStr, sync::OnceLock};

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// The kind of trade a business conducts.
///
/// Determines which VAT registration turnover threshold applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BusinessType {
    /// Sells physical goods.
    #[default]
    PhysicalGoods,
    /// Provides services.
    ServiceBased,
    /// Both goods and services.
    Combined,
}

impl BusinessType {
    /// The kebab-case form used in persisted records and on the command
    /// line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PhysicalGoods => "physical-goods",
            Self::ServiceBased => "service-based",
            Self::Combined => "combined",
        }
    }
}

impl fmt::Display for BusinessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BusinessType {
    type Err = ParseBusinessTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "physical-goods" => Ok(Self::PhysicalGoods),
            "service-based" => Ok(Self::ServiceBased),
            "combined" => Ok(Self::Combined),
            other => Err(ParseBusinessTypeError(other.to_string())),
        }
    }
}

/// Error returned when a string is not a recognised business type.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown business type '{0}': expected physical-goods, service-based or combined")]
pub struct ParseBusinessTypeError(String);

/// The onboarded business's identity and attributes.
///
/// This is the sole input (together with the current date) to deadline
/// derivation. The serialized field names match the records the app has
/// always written, so existing installations load unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessProfile {
    /// Registered business name.
    #[serde(default)]
    pub name: String,

    /// Contact email, used as the reminder recipient.
    #[serde(default)]
    pub email: String,

    /// Contact phone number.
    #[serde(default)]
    pub phone: String,

    /// Kind of trade conducted.
    #[serde(rename = "type", default)]
    pub business_type: BusinessType,

    /// Company registration date. `None` until onboarding provides it;
    /// without it no statutory deadlines can be derived.
    #[serde(default)]
    pub registration_date: Option<NaiveDate>,

    /// Declared annual turnover in rupees.
    #[serde(default)]
    pub turnover: u64,

    /// Whether the business declares itself VAT-registered.
    #[serde(rename = "hasVAT", default)]
    pub has_vat: bool,
}

impl BusinessProfile {
    /// Whether the profile carries everything onboarding asks for: a name,
    /// contact details and a registration date.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty()
            && !self.email.is_empty()
            && !self.phone.is_empty()
            && self.registration_date.is_some()
    }
}

/// Error returned when a profile field fails validation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InvalidField {
    /// The string is not a plausible email address.
    #[error("'{0}' is not a valid email address")]
    Email(String),
    /// The string is not a Nepali mobile number.
    #[error("'{0}' is not a valid Nepali mobile number (expected 98xxxxxxxx or 97xxxxxxxx)")]
    Phone(String),
}

/// Validates an email address.
///
/// # Errors
///
/// Returns [`InvalidField::Email`] if the string does not look like an
/// email address.
pub fn validate_email(email: &str) -> Result<(), InvalidField> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("the email pattern is valid")
    });
    if re.is_match(email) {
        Ok(())
    } else {
        Err(InvalidField::Email(email.to_string()))
    }
}

/// Validates a Nepali mobile number: ten digits starting `98` or `97`,
/// with an optional `+977` country prefix.
///
/// # Errors
///
/// Returns [`InvalidField::Phone`] if the string does not match.
pub fn validate_phone(phone: &str) -> Result<(), InvalidField> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"^(\+977[- ]?)?9[78]\d{8}$").expect("the phone pattern is valid")
    });
    if re.is_match(phone) {
        Ok(())
    } else {
        Err(InvalidField::Phone(phone.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_is_incomplete() {
        let profile = BusinessProfile::default();
        assert!(!profile.is_complete());
        assert_eq!(profile.business_type, BusinessType::PhysicalGoods);
        assert_eq!(profile.turnover, 0);
        assert!(!profile.has_vat);
    }

    #[test]
    fn profile_with_all_fields_is_complete() {
        let profile = BusinessProfile {
            name: "Himalayan Traders".to_string(),
            email: "info@himalayan.example".to_string(),
            phone: "9812345678".to_string(),
            registration_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            ..BusinessProfile::default()
        };
        assert!(profile.is_complete());
    }

    #[test]
    fn serializes_with_legacy_field_names() {
        let profile = BusinessProfile {
            business_type: BusinessType::ServiceBased,
            has_vat: true,
            registration_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            ..BusinessProfile::default()
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["type"], "service-based");
        assert_eq!(json["hasVAT"], true);
        assert_eq!(json["registrationDate"], "2024-01-01");
    }

    #[test]
    fn deserializes_partial_records() {
        let profile: BusinessProfile = serde_json::from_str(r#"{"name": "Shop"}"#).unwrap();
        assert_eq!(profile.name, "Shop");
        assert_eq!(profile.registration_date, None);
    }

    #[test]
    fn business_type_round_trips_through_strings() {
        for business_type in [
            BusinessType::PhysicalGoods,
            BusinessType::ServiceBased,
            BusinessType::Combined,
        ] {
            assert_eq!(business_type.as_str().parse(), Ok(business_type));
        }
        assert!("retail".parse::<BusinessType>().is_err());
    }

    #[test]
    fn accepts_plausible_emails_and_rejects_junk() {
        assert!(validate_email("shop@example.com").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("a b@example.com").is_err());
    }

    #[test]
    fn accepts_nepali_mobile_numbers() {
        assert!(validate_phone("9812345678").is_ok());
        assert!(validate_phone("9712345678").is_ok());
        assert!(validate_phone("+977-9812345678").is_ok());
        assert!(validate_phone("+977 9812345678").is_ok());
        assert!(validate_phone("012345678").is_err());
        assert!(validate_phone("98123").is_err());
    }
}
