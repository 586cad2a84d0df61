use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use super::{
    item::{ComplianceItem, ItemId, Status},
    loan::LoanRepayment,
    vehicle::VehicleRenewal,
};

/// Which obligation a deadline came from.
///
/// Carrying the origin as a tagged variant lets completion actions be routed
/// without parsing anything back out of a display string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum DeadlineSource {
    /// A statutory compliance item.
    Compliance(ItemId),
    /// A loan repayment schedule.
    Loan(Uuid),
    /// A vehicle renewal schedule.
    Vehicle(Uuid),
}

/// One entry in the merged upcoming-deadline feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Deadline {
    /// The obligation this deadline belongs to.
    pub source: DeadlineSource,
    /// Display title.
    pub title: String,
    /// Display grouping.
    pub category: String,
    /// When the obligation falls due.
    pub due_date: NaiveDate,
}

/// Merges the three obligation collections into one feed.
///
/// Only pending obligations that fall due strictly after `today` qualify:
/// overdue and due-today entries belong to the attention surfaces, not the
/// upcoming feed. The result is sorted by due date (ascending, stable) and
/// capped at `window` entries.
#[must_use]
pub fn upcoming_deadlines(
    items: &[ComplianceItem],
    loans: &[LoanRepayment],
    vehicles: &[VehicleRenewal],
    today: NaiveDate,
    window: usize,
) -> Vec<Deadline> {
    let mut feed: Vec<Deadline> = items
        .iter()
        .filter(|item| item.status == Status::Pending && item.due_date > today)
        .map(|item| Deadline {
            source: DeadlineSource::Compliance(item.id),
            title: item.title.to_string(),
            category: item.category.to_string(),
            due_date: item.due_date,
        })
        .collect();

    feed.extend(
        loans
            .iter()
            .filter(|loan| loan.status == Status::Pending && loan.next_due_date > today)
            .map(|loan| Deadline {
                source: DeadlineSource::Loan(loan.id),
                title: loan.loan_name.clone(),
                category: "Loan Repayment".to_string(),
                due_date: loan.next_due_date,
            }),
    );

    feed.extend(
        vehicles
            .iter()
            .filter(|vehicle| {
                vehicle.status == Status::Pending && vehicle.next_renewal_date > today
            })
            .map(|vehicle| Deadline {
                source: DeadlineSource::Vehicle(vehicle.id),
                title: vehicle.vehicle_name.clone(),
                category: "Vehicle Renewal".to_string(),
                due_date: vehicle.next_renewal_date,
            }),
    );

    feed.sort_by_key(|deadline| deadline.due_date);
    feed.truncate(window);
    feed
}
