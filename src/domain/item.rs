use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The catalog identity of a statutory compliance item.
///
/// Identity is the rule that produced the item, not a generated key, so the
/// set of ids is closed. The kebab-case string forms are the keys of the
/// persisted status map and the names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemId {
    /// Permanent Account Number registration with the IRD.
    PanRegistration,
    /// Value Added Tax registration with the IRD.
    VatRegistration,
    /// Formation of the Board of Directors.
    BoardFormation,
    /// Appointment of an auditor.
    AuditorAppointment,
    /// Share allotment and share lagat submission.
    ShareAllotment,
    /// Director's disclosure submission.
    DirectorDisclosure,
    /// Registered office address submission.
    OfficeAddress,
    /// Company bank account opening.
    BankAccount,
    /// Registration with the local ward office.
    WardRegistration,
    /// Quarterly VAT return filing.
    VatReturns,
}

impl ItemId {
    /// The kebab-case string form, as persisted and displayed.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PanRegistration => "pan-registration",
            Self::VatRegistration => "vat-registration",
            Self::BoardFormation => "board-formation",
            Self::AuditorAppointment => "auditor-appointment",
            Self::ShareAllotment => "share-allotment",
            Self::DirectorDisclosure => "director-disclosure",
            Self::OfficeAddress => "office-address",
            Self::BankAccount => "bank-account",
            Self::WardRegistration => "ward-registration",
            Self::VatReturns => "vat-returns",
        }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemId {
    type Err = ParseItemIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pan-registration" => Ok(Self::PanRegistration),
            "vat-registration" => Ok(Self::VatRegistration),
            "board-formation" => Ok(Self::BoardFormation),
            "auditor-appointment" => Ok(Self::AuditorAppointment),
            "share-allotment" => Ok(Self::ShareAllotment),
            "director-disclosure" => Ok(Self::DirectorDisclosure),
            "office-address" => Ok(Self::OfficeAddress),
            "bank-account" => Ok(Self::BankAccount),
            "ward-registration" => Ok(Self::WardRegistration),
            "vat-returns" => Ok(Self::VatReturns),
            other => Err(ParseItemIdError(other.to_string())),
        }
    }
}

/// Error returned when a string is not a catalog item id.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown compliance item id '{0}'")]
pub struct ParseItemIdError(String);

/// Completion status of an obligation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Not yet done.
    #[default]
    Pending,
    /// Marked done by the user.
    Completed,
}

/// Priority classification frozen onto an item when the item set is derived.
///
/// This is a snapshot of the canonical urgency classification taken at
/// derivation time; display surfaces re-classify against the live date
/// instead of reading it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// No attention needed yet.
    Normal,
    /// Due within the soon window.
    Soon,
    /// Overdue, or inherently immediate.
    Urgent,
}

/// A derived statutory obligation.
///
/// The full item set is regenerated from scratch whenever its inputs change;
/// only the per-id completion status survives regeneration, merged back in
/// from the persisted status map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplianceItem {
    /// Catalog identity.
    pub id: ItemId,
    /// Display grouping, e.g. `Companies Act Compliance`.
    pub category: &'static str,
    /// Display title.
    pub title: &'static str,
    /// Display description.
    pub description: &'static str,
    /// Computed due date.
    pub due_date: NaiveDate,
    /// Completion status, merged from the persisted status map.
    pub status: Status,
    /// Priority snapshot taken at derivation time.
    pub priority: Priority,
    /// Marks items that only apply to VAT-registered businesses.
    pub requires_vat: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_ids_round_trip_through_strings() {
        for id in [
            ItemId::PanRegistration,
            ItemId::VatRegistration,
            ItemId::BoardFormation,
            ItemId::AuditorAppointment,
            ItemId::ShareAllotment,
            ItemId::DirectorDisclosure,
            ItemId::OfficeAddress,
            ItemId::BankAccount,
            ItemId::WardRegistration,
            ItemId::VatReturns,
        ] {
            assert_eq!(id.as_str().parse(), Ok(id));
        }
    }

    #[test]
    fn unknown_id_fails_to_parse() {
        assert!("firm-renewal".parse::<ItemId>().is_err());
    }

    #[test]
    fn item_id_serializes_as_kebab_case() {
        let json = serde_json::to_string(&ItemId::PanRegistration).unwrap();
        assert_eq!(json, "\"pan-registration\"");
    }

    #[test]
    fn status_matches_persisted_form() {
        assert_eq!(serde_json::to_string(&Status::Completed).unwrap(), "\"completed\"");
        let parsed: Status = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(parsed, Status::Pending);
    }
}
