//! Compliance deadline tracking for small enterprises in Nepal.
//!
//! Derives statutory deadlines (tax registration, Companies Act filings,
//! VAT returns) from a business profile and tracks them alongside
//! user-authored recurring obligations (loan repayments, vehicle renewals)
//! in a single local key-value store.

/// Bikram Sambat calendar conversion.
pub mod calendar;
pub use calendar::{BsDate, CalendarError};

mod config;
pub use config::{Config, DisplayCalendar};

/// Domain models and the deadline derivation rules.
pub mod domain;
pub use domain::{
    BusinessProfile, BusinessType, ComplianceItem, Deadline, DeadlineSource, Frequency, ItemId,
    LoanRepayment, Priority, Status, Urgency, VehicleRenewal, classify, derive_compliance_items,
    upcoming_deadlines,
};

/// Key-value persistence and the obligation registry.
pub mod storage;
pub use storage::{
    Channel, FileStore, MemoryStore, NullSink, ObligationRegistry, ProfileStore, ReminderService,
    ReminderSink, Store,
};
