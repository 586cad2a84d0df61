//! The statutory deadline catalog.
//!
//! [`derive_compliance_items`] is pure: the same profile snapshot, date and
//! status map always produce the same item set. The registry rebuilds the
//! whole set on every relevant input change rather than patching items in
//! place.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, Months, NaiveDate};

use super::{
    item::{ComplianceItem, ItemId, Priority, Status},
    profile::{BusinessProfile, BusinessType},
    urgency::{Urgency, classify},
};

/// Annual turnover above which a goods business must register for VAT.
pub const VAT_THRESHOLD_GOODS: u64 = 5_000_000;

/// Annual turnover above which a service or combined business must register
/// for VAT.
pub const VAT_THRESHOLD_SERVICES: u64 = 2_000_000;

/// Day of the month on which quarterly VAT returns fall due.
const VAT_RETURN_DAY: u32 = 25;

/// How a rule maps the canonical urgency onto the frozen priority snapshot.
#[derive(Debug, Clone, Copy)]
enum PriorityRule {
    /// Urgent from day one, e.g. PAN registration.
    AlwaysUrgent,
    /// Urgent once strictly overdue, no soon tier (short windows).
    OverdueOnly,
    /// The full three-tier ladder (three-month filings).
    OverdueOrSoon,
    /// Never urgent, only soon as the date approaches (recurring returns).
    SoonOnly,
}

impl PriorityRule {
    fn apply(self, due: NaiveDate, today: NaiveDate) -> Priority {
        let urgency = classify(due, today);
        match self {
            Self::AlwaysUrgent => Priority::Urgent,
            Self::OverdueOnly => match urgency {
                Urgency::Overdue => Priority::Urgent,
                _ => Priority::Normal,
            },
            Self::OverdueOrSoon => match urgency {
                Urgency::Overdue => Priority::Urgent,
                Urgency::DueToday | Urgency::Soon => Priority::Soon,
                Urgency::Normal => Priority::Normal,
            },
            Self::SoonOnly => match urgency {
                Urgency::Overdue | Urgency::DueToday | Urgency::Soon => Priority::Soon,
                Urgency::Normal => Priority::Normal,
            },
        }
    }
}

/// Derives the full statutory item set from a profile snapshot.
///
/// Returns an empty set when the profile has no registration date. Saved
/// statuses override the default `Pending` per id; everything else is
/// recomputed from scratch.
#[must_use]
pub fn derive_compliance_items(
    profile: &BusinessProfile,
    today: NaiveDate,
    saved: &BTreeMap<ItemId, Status>,
) -> Vec<ComplianceItem> {
    let Some(registered) = profile.registration_date else {
        return Vec::new();
    };

    let item = |id: ItemId,
                category: &'static str,
                title: &'static str,
                description: &'static str,
                due: NaiveDate,
                rule: PriorityRule,
                requires_vat: bool| {
        ComplianceItem {
            id,
            category,
            title,
            description,
            due_date: due,
            status: saved.get(&id).copied().unwrap_or_default(),
            priority: rule.apply(due, today),
            requires_vat,
        }
    };

    let mut items = Vec::with_capacity(10);

    items.push(item(
        ItemId::PanRegistration,
        "Registration",
        "PAN Registration",
        "Register your business with the Inland Revenue Department to obtain a Permanent \
         Account Number (PAN).",
        registered,
        PriorityRule::AlwaysUrgent,
        false,
    ));

    if vat_registration_required(profile) {
        items.push(item(
            ItemId::VatRegistration,
            "Registration",
            "VAT Registration",
            "Register for Value Added Tax (VAT) with the IRD.",
            registered + Days::new(30),
            PriorityRule::OverdueOnly,
            true,
        ));
    }

    items.push(item(
        ItemId::BoardFormation,
        "Companies Act Compliance",
        "Formation of Board of Directors",
        "Form the Board of Directors and submit meeting minutes confirming appointments to OCR.",
        registered + Months::new(3),
        PriorityRule::OverdueOrSoon,
        false,
    ));

    items.push(item(
        ItemId::AuditorAppointment,
        "Companies Act Compliance",
        "Appointment of Auditor",
        "Appoint an auditor within 15 days and submit details to OCR.",
        registered + Months::new(3),
        PriorityRule::OverdueOrSoon,
        false,
    ));

    items.push(item(
        ItemId::ShareAllotment,
        "Companies Act Compliance",
        "Share Allotment and Share Lagat",
        "Complete share allotment and submit details to OCR.",
        registered + Months::new(3),
        PriorityRule::OverdueOrSoon,
        false,
    ));

    items.push(item(
        ItemId::DirectorDisclosure,
        "Companies Act Compliance",
        "Director's Disclosure",
        "Submit director disclosures to OCR within seven days of assuming office.",
        registered + Days::new(7),
        PriorityRule::OverdueOnly,
        false,
    ));

    items.push(item(
        ItemId::OfficeAddress,
        "Companies Act Compliance",
        "Registered Office Address",
        "Submit registered office address details to OCR.",
        registered + Months::new(3),
        PriorityRule::OverdueOrSoon,
        false,
    ));

    items.push(item(
        ItemId::BankAccount,
        "Banking",
        "Company Bank Account Opening",
        "Open a company bank account immediately after registration.",
        registered,
        PriorityRule::OverdueOnly,
        false,
    ));

    items.push(item(
        ItemId::WardRegistration,
        "Registration",
        "Ward Office Registration",
        "Register your business with the local ward office.",
        registered + Days::new(15),
        PriorityRule::OverdueOnly,
        false,
    ));

    if profile.has_vat {
        items.push(item(
            ItemId::VatReturns,
            "Tax Compliance",
            "Quarterly VAT Returns",
            "File quarterly VAT returns (Purchase and Sale Register) by the 25th of the month \
             following each quarter.",
            next_vat_return_due(today),
            PriorityRule::SoonOnly,
            true,
        ));
    }

    items
}

/// Whether the profile's trade type and turnover (or a standing VAT
/// declaration) require VAT registration.
#[must_use]
pub const fn vat_registration_required(profile: &BusinessProfile) -> bool {
    let over_threshold = match profile.business_type {
        BusinessType::PhysicalGoods => profile.turnover >= VAT_THRESHOLD_GOODS,
        BusinessType::ServiceBased | BusinessType::Combined => {
            profile.turnover >= VAT_THRESHOLD_SERVICES
        }
    };
    over_threshold || profile.has_vat
}

/// The due date of the next quarterly VAT return as seen from `today`.
///
/// Fiscal quarters end with the 25th of the months at 0-based Gregorian
/// indices 3, 7 and 11. The quarter-end month is selected by strict
/// comparison, so on the exact 25th of a quarter-end month the next
/// quarter's date is returned; a computed date equal to `today` is kept.
fn next_vat_return_due(today: NaiveDate) -> NaiveDate {
    let month0 = today.month0();
    let quarter_end_month0 = if month0 < 3 {
        3
    } else if month0 < 7 {
        7
    } else if month0 < 11 {
        11
    } else {
        3
    };

    let due = NaiveDate::from_ymd_opt(today.year(), quarter_end_month0 + 1, VAT_RETURN_DAY)
        .expect("the 25th exists in every month");
    if due < today {
        NaiveDate::from_ymd_opt(due.year() + 1, due.month(), VAT_RETURN_DAY)
            .expect("the 25th exists in every month")
    } else {
        due
    }
}
