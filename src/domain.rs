//! Domain models for compliance tracking.
//!
//! This module contains the business profile, the three obligation types
//! (statutory compliance items, loan repayments, vehicle renewals), the
//! deadline derivation rules and the urgency classifier.

/// The unified upcoming-deadline feed.
pub mod deadline;
pub use deadline::{Deadline, DeadlineSource, upcoming_deadlines};

/// Statutory compliance items and their catalog identities.
pub mod item;
pub use item::{ComplianceItem, ItemId, Priority, Status};

/// User-authored loan repayment schedules.
pub mod loan;
pub use loan::{Frequency, LoanRepayment, NewLoan};

/// The onboarded business profile.
pub mod profile;
pub use profile::{BusinessProfile, BusinessType};

/// Derivation of statutory deadlines from a profile snapshot.
pub mod rules;
pub use rules::derive_compliance_items;

/// Time-based urgency classification.
pub mod urgency;
pub use urgency::{Urgency, classify};

/// User-authored vehicle renewal schedules.
pub mod vehicle;
pub use vehicle::{NewVehicle, VehicleRenewal};
