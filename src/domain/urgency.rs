use chrono::NaiveDate;

/// Days ahead of a due date at which an obligation counts as due soon.
///
/// The window is exclusive: a deadline exactly `SOON_WINDOW_DAYS` away is
/// still [`Urgency::Normal`].
pub const SOON_WINDOW_DAYS: i64 = 14;

/// Time-based urgency of a pending obligation, relative to a given day.
///
/// This is the single classification used everywhere: the frozen
/// [`Priority`](super::Priority) snapshot on derived items is produced from
/// it, and display surfaces call [`classify`] against the live date.
/// Completed obligations are handled by callers before classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    /// The due date is strictly in the past.
    Overdue,
    /// Due this very day.
    DueToday,
    /// Due within the soon window.
    Soon,
    /// Nothing to worry about yet.
    Normal,
}

/// Classifies how urgent a due date is as seen from `today`.
#[must_use]
pub fn classify(due: NaiveDate, today: NaiveDate) -> Urgency {
    if due < today {
        Urgency::Overdue
    } else if due == today {
        Urgency::DueToday
    } else if (due - today).num_days() < SOON_WINDOW_DAYS {
        Urgency::Soon
    } else {
        Urgency::Normal
    }
}
