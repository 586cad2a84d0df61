//! The obligation registry.
//!
//! Owns the three obligation collections and their persisted mirrors. The
//! statutory item set is disposable: it is rebuilt from scratch from the
//! profile snapshot on every relevant change, with only the persisted
//! status map surviving. Every mutating operation writes its collection
//! back to the store before returning, then recomputes the upcoming feed.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::{
    BusinessProfile, ComplianceItem, Deadline, ItemId, LoanRepayment, Status, VehicleRenewal,
    derive_compliance_items,
    loan::NewLoan,
    upcoming_deadlines,
    vehicle::NewVehicle,
};

use super::store::{Store, StoreError, get_json, keys, set_json};

/// Default cap on the upcoming-deadline feed.
pub const DEFAULT_UPCOMING_WINDOW: usize = 5;

/// Orchestrates derivation, persistence and mutation of all obligations.
#[derive(Debug)]
pub struct ObligationRegistry<S> {
    store: S,
    items: Vec<ComplianceItem>,
    loans: Vec<LoanRepayment>,
    vehicles: Vec<VehicleRenewal>,
    statuses: BTreeMap<ItemId, Status>,
    upcoming: Vec<Deadline>,
    window: usize,
}

impl<S: Store> ObligationRegistry<S> {
    /// Loads persisted collections and derives the statutory item set from
    /// the given profile snapshot.
    ///
    /// Malformed persisted records load as empty collections; a profile
    /// without a registration date yields an empty item set.
    pub fn load(store: S, profile: &BusinessProfile, today: NaiveDate) -> Self {
        let loans = get_json(&store, keys::LOAN_REPAYMENTS).unwrap_or_default();
        let vehicles = get_json(&store, keys::VEHICLE_RENEWALS).unwrap_or_default();
        let statuses = get_json(&store, keys::COMPLIANCE_STATUSES).unwrap_or_default();

        let mut registry = Self {
            store,
            items: Vec::new(),
            loans,
            vehicles,
            statuses,
            upcoming: Vec::new(),
            window: DEFAULT_UPCOMING_WINDOW,
        };
        registry.refresh(profile, today);
        registry
    }

    /// Sets the upcoming-feed cap. Takes effect at the next recompute.
    #[must_use]
    pub const fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Rebuilds the statutory item set from the profile snapshot and
    /// recomputes the upcoming feed.
    pub fn refresh(&mut self, profile: &BusinessProfile, today: NaiveDate) {
        self.items = derive_compliance_items(profile, today, &self.statuses);
        self.recompute_upcoming(today);
    }

    /// The current statutory item set.
    #[must_use]
    pub fn items(&self) -> &[ComplianceItem] {
        &self.items
    }

    /// The loan repayment schedules.
    #[must_use]
    pub fn loans(&self) -> &[LoanRepayment] {
        &self.loans
    }

    /// The vehicle renewal schedules.
    #[must_use]
    pub fn vehicles(&self) -> &[VehicleRenewal] {
        &self.vehicles
    }

    /// The merged, sorted, capped upcoming-deadline feed.
    #[must_use]
    pub fn upcoming(&self) -> &[Deadline] {
        &self.upcoming
    }

    /// Sets a statutory item's completion status.
    ///
    /// Unknown ids are a silent no-op; setting the same status twice is
    /// idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if the status map cannot be persisted.
    pub fn set_item_status(
        &mut self,
        id: ItemId,
        status: Status,
        today: NaiveDate,
    ) -> Result<(), StoreError> {
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            tracing::debug!("Ignoring status change for absent item '{id}'");
            return Ok(());
        };
        item.status = status;
        self.statuses.insert(id, status);
        set_json(&mut self.store, keys::COMPLIANCE_STATUSES, &self.statuses)?;
        tracing::info!("Marked {id} as {status:?}");
        self.recompute_upcoming(today);
        Ok(())
    }

    /// Adds a loan repayment schedule, assigning a fresh id.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be persisted.
    pub fn add_loan(&mut self, new: NewLoan, today: NaiveDate) -> Result<Uuid, StoreError> {
        let loan = LoanRepayment::new(new);
        let id = loan.id;
        self.loans.push(loan);
        self.persist_loans()?;
        tracing::info!("Added loan repayment {id}");
        self.recompute_upcoming(today);
        Ok(id)
    }

    /// Replaces a loan by id. Unknown ids are a silent no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be persisted.
    pub fn update_loan(&mut self, loan: LoanRepayment, today: NaiveDate) -> Result<(), StoreError> {
        let Some(existing) = self.loans.iter_mut().find(|l| l.id == loan.id) else {
            return Ok(());
        };
        *existing = loan;
        self.persist_loans()?;
        self.recompute_upcoming(today);
        Ok(())
    }

    /// Removes a loan by id. Unknown ids are a silent no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be persisted.
    pub fn remove_loan(&mut self, id: Uuid, today: NaiveDate) -> Result<(), StoreError> {
        let before = self.loans.len();
        self.loans.retain(|loan| loan.id != id);
        if self.loans.len() == before {
            return Ok(());
        }
        self.persist_loans()?;
        self.recompute_upcoming(today);
        Ok(())
    }

    /// Records the current instalment of a loan as paid: the due date
    /// advances one period and the schedule stays pending. Unknown ids are
    /// a silent no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be persisted.
    pub fn complete_loan(&mut self, id: Uuid, today: NaiveDate) -> Result<(), StoreError> {
        let Some(loan) = self.loans.iter_mut().find(|loan| loan.id == id) else {
            return Ok(());
        };
        loan.advance();
        tracing::info!("Advanced loan {id} to {}", loan.next_due_date);
        self.persist_loans()?;
        self.recompute_upcoming(today);
        Ok(())
    }

    /// Adds a vehicle renewal schedule, assigning a fresh id.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be persisted.
    pub fn add_vehicle(&mut self, new: NewVehicle, today: NaiveDate) -> Result<Uuid, StoreError> {
        let vehicle = VehicleRenewal::new(new);
        let id = vehicle.id;
        self.vehicles.push(vehicle);
        self.persist_vehicles()?;
        tracing::info!("Added vehicle renewal {id}");
        self.recompute_upcoming(today);
        Ok(id)
    }

    /// Replaces a vehicle by id. Unknown ids are a silent no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be persisted.
    pub fn update_vehicle(
        &mut self,
        vehicle: VehicleRenewal,
        today: NaiveDate,
    ) -> Result<(), StoreError> {
        let Some(existing) = self.vehicles.iter_mut().find(|v| v.id == vehicle.id) else {
            return Ok(());
        };
        *existing = vehicle;
        self.persist_vehicles()?;
        self.recompute_upcoming(today);
        Ok(())
    }

    /// Removes a vehicle by id. Unknown ids are a silent no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be persisted.
    pub fn remove_vehicle(&mut self, id: Uuid, today: NaiveDate) -> Result<(), StoreError> {
        let before = self.vehicles.len();
        self.vehicles.retain(|vehicle| vehicle.id != id);
        if self.vehicles.len() == before {
            return Ok(());
        }
        self.persist_vehicles()?;
        self.recompute_upcoming(today);
        Ok(())
    }

    /// Records a completed renewal: both dates re-anchor to `today` and the
    /// schedule stays pending. Unknown ids are a silent no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be persisted.
    pub fn complete_vehicle(&mut self, id: Uuid, today: NaiveDate) -> Result<(), StoreError> {
        let Some(vehicle) = self.vehicles.iter_mut().find(|vehicle| vehicle.id == id) else {
            return Ok(());
        };
        vehicle.renew(today);
        tracing::info!("Renewed vehicle {id} until {}", vehicle.next_renewal_date);
        self.persist_vehicles()?;
        self.recompute_upcoming(today);
        Ok(())
    }

    fn persist_loans(&mut self) -> Result<(), StoreError> {
        set_json(&mut self.store, keys::LOAN_REPAYMENTS, &self.loans)
    }

    fn persist_vehicles(&mut self) -> Result<(), StoreError> {
        set_json(&mut self.store, keys::VEHICLE_RENEWALS, &self.vehicles)
    }

    fn recompute_upcoming(&mut self, today: NaiveDate) {
        self.upcoming = upcoming_deadlines(
            &self.items,
            &self.loans,
            &self.vehicles,
            today,
            self.window,
        );
    }
}

#[cfg(test)]
mod tests {
    use chrono::Days;

    use super::*;
    use crate::{
        domain::{BusinessType, DeadlineSource, Frequency},
        storage::store::MemoryStore,
    };

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn onboarded_profile() -> BusinessProfile {
        BusinessProfile {
            name: "Patan Hardware".to_string(),
            email: "patan@example.com".to_string(),
            phone: "9812345678".to_string(),
            business_type: BusinessType::PhysicalGoods,
            registration_date: Some(date(2024, 1, 1)),
            turnover: 6_000_000,
            has_vat: false,
        }
    }

    fn new_loan(first_due: NaiveDate) -> NewLoan {
        NewLoan {
            loan_name: "Working capital".to_string(),
            start_date: first_due - Days::new(30),
            amount: 15_000,
            frequency: Frequency::Monthly,
            first_due_date: Some(first_due),
        }
    }

    fn new_vehicle(next_due: NaiveDate) -> NewVehicle {
        NewVehicle {
            vehicle_name: "Delivery van".to_string(),
            registration_number: "BA 1 KHA 5678".to_string(),
            last_renewal_date: next_due - Days::new(365),
            next_renewal_date: Some(next_due),
        }
    }

    #[test]
    fn loads_empty_without_a_registration_date() {
        let registry = ObligationRegistry::load(
            MemoryStore::new(),
            &BusinessProfile::default(),
            date(2024, 2, 1),
        );
        assert!(registry.items().is_empty());
        assert!(registry.upcoming().is_empty());
    }

    #[test]
    fn derives_items_for_an_onboarded_profile() {
        let registry = ObligationRegistry::load(
            MemoryStore::new(),
            &onboarded_profile(),
            date(2024, 2, 1),
        );
        assert_eq!(registry.items().len(), 10);
    }

    #[test]
    fn marking_completed_twice_is_idempotent() {
        let today = date(2024, 2, 1);
        let mut registry =
            ObligationRegistry::load(MemoryStore::new(), &onboarded_profile(), today);

        registry
            .set_item_status(ItemId::PanRegistration, Status::Completed, today)
            .unwrap();
        registry
            .set_item_status(ItemId::PanRegistration, Status::Completed, today)
            .unwrap();

        let pan = registry
            .items()
            .iter()
            .find(|item| item.id == ItemId::PanRegistration)
            .unwrap();
        assert_eq!(pan.status, Status::Completed);
    }

    #[test]
    fn completion_survives_a_rebuild() {
        let today = date(2024, 2, 1);
        let profile = onboarded_profile();
        let mut registry = ObligationRegistry::load(MemoryStore::new(), &profile, today);

        registry
            .set_item_status(ItemId::BankAccount, Status::Completed, today)
            .unwrap();
        registry.refresh(&profile, today);

        let bank = registry
            .items()
            .iter()
            .find(|item| item.id == ItemId::BankAccount)
            .unwrap();
        assert_eq!(bank.status, Status::Completed);
    }

    #[test]
    fn status_changes_persist_across_reloads() {
        let today = date(2024, 2, 1);
        let profile = onboarded_profile();
        let mut registry = ObligationRegistry::load(MemoryStore::new(), &profile, today);

        registry
            .set_item_status(ItemId::WardRegistration, Status::Completed, today)
            .unwrap();
        let store = registry.store;

        let reloaded = ObligationRegistry::load(store, &profile, today);
        let ward = reloaded
            .items()
            .iter()
            .find(|item| item.id == ItemId::WardRegistration)
            .unwrap();
        assert_eq!(ward.status, Status::Completed);
    }

    #[test]
    fn status_change_for_an_absent_item_is_a_no_op() {
        let today = date(2024, 2, 1);
        let profile = BusinessProfile {
            has_vat: false,
            ..onboarded_profile()
        };
        let mut registry = ObligationRegistry::load(MemoryStore::new(), &profile, today);

        // vat-returns is not derived for this profile.
        registry
            .set_item_status(ItemId::VatReturns, Status::Completed, today)
            .unwrap();
        assert!(!registry.statuses.contains_key(&ItemId::VatReturns));
    }

    #[test]
    fn loan_collections_round_trip_through_the_store() {
        let today = date(2024, 2, 1);
        let profile = BusinessProfile::default();
        let mut registry = ObligationRegistry::load(MemoryStore::new(), &profile, today);

        let id = registry.add_loan(new_loan(date(2024, 3, 1)), today).unwrap();
        let original = registry.loans()[0].clone();
        let store = registry.store;

        let reloaded = ObligationRegistry::load(store, &profile, today);
        assert_eq!(reloaded.loans().len(), 1);
        assert_eq!(reloaded.loans()[0].id, id);
        assert_eq!(reloaded.loans()[0].next_due_date, original.next_due_date);
        assert_eq!(reloaded.loans()[0].start_date, original.start_date);
    }

    #[test]
    fn completing_a_loan_advances_one_period_and_stays_pending() {
        let today = date(2024, 2, 1);
        let mut registry =
            ObligationRegistry::load(MemoryStore::new(), &BusinessProfile::default(), today);

        let id = registry.add_loan(new_loan(date(2024, 3, 1)), today).unwrap();
        registry.complete_loan(id, today).unwrap();

        let loan = &registry.loans()[0];
        assert_eq!(loan.next_due_date, date(2024, 4, 1));
        assert_eq!(loan.status, Status::Pending);
    }

    #[test]
    fn completing_a_vehicle_re_anchors_to_today() {
        let today = date(2024, 6, 2);
        let mut registry =
            ObligationRegistry::load(MemoryStore::new(), &BusinessProfile::default(), today);

        let id = registry
            .add_vehicle(new_vehicle(date(2024, 5, 10)), today)
            .unwrap();
        registry.complete_vehicle(id, today).unwrap();

        let vehicle = &registry.vehicles()[0];
        assert_eq!(vehicle.last_renewal_date, today);
        assert_eq!(vehicle.next_renewal_date, date(2025, 6, 2));
        assert_eq!(vehicle.status, Status::Pending);
    }

    #[test]
    fn mutations_on_unknown_ids_are_no_ops() {
        let today = date(2024, 2, 1);
        let mut registry =
            ObligationRegistry::load(MemoryStore::new(), &BusinessProfile::default(), today);

        let ghost = Uuid::new_v4();
        registry.complete_loan(ghost, today).unwrap();
        registry.remove_loan(ghost, today).unwrap();
        registry.complete_vehicle(ghost, today).unwrap();
        registry.remove_vehicle(ghost, today).unwrap();
        assert!(registry.loans().is_empty());
        assert!(registry.vehicles().is_empty());
    }

    #[test]
    fn removing_a_loan_shrinks_the_collection_and_persists() {
        let today = date(2024, 2, 1);
        let profile = BusinessProfile::default();
        let mut registry = ObligationRegistry::load(MemoryStore::new(), &profile, today);

        let id = registry.add_loan(new_loan(date(2024, 3, 1)), today).unwrap();
        registry.remove_loan(id, today).unwrap();
        let store = registry.store;

        assert!(ObligationRegistry::load(store, &profile, today).loans().is_empty());
    }

    #[test]
    fn updating_a_loan_replaces_it_by_id() {
        let today = date(2024, 2, 1);
        let mut registry =
            ObligationRegistry::load(MemoryStore::new(), &BusinessProfile::default(), today);

        registry.add_loan(new_loan(date(2024, 3, 1)), today).unwrap();
        let mut changed = registry.loans()[0].clone();
        changed.amount = 99_000;
        registry.update_loan(changed, today).unwrap();

        assert_eq!(registry.loans()[0].amount, 99_000);
    }

    #[test]
    fn upcoming_merges_all_three_collections() {
        let today = date(2024, 2, 1);
        let profile = onboarded_profile();
        let mut registry = ObligationRegistry::load(MemoryStore::new(), &profile, today);

        // Compliance item due in 2 days, loan in 10, vehicle due yesterday.
        registry.refresh(
            &BusinessProfile {
                registration_date: Some(date(2023, 11, 3)),
                ..profile
            },
            today,
        );
        let board_due = registry
            .items()
            .iter()
            .find(|item| item.id == ItemId::BoardFormation)
            .unwrap()
            .due_date;
        assert_eq!(board_due, date(2024, 2, 3));

        registry.add_loan(new_loan(date(2024, 2, 11)), today).unwrap();
        registry
            .add_vehicle(new_vehicle(date(2024, 1, 31)), today)
            .unwrap();

        let upcoming = registry.upcoming();
        assert_eq!(
            upcoming[0].source,
            DeadlineSource::Compliance(ItemId::BoardFormation)
        );
        assert!(upcoming.iter().any(|d| matches!(d.source, DeadlineSource::Loan(_))));
        assert!(
            !upcoming
                .iter()
                .any(|d| matches!(d.source, DeadlineSource::Vehicle(_)))
        );
    }

    #[test]
    fn recompute_happens_after_every_mutation() {
        let today = date(2024, 2, 1);
        let mut registry =
            ObligationRegistry::load(MemoryStore::new(), &BusinessProfile::default(), today);

        let id = registry.add_loan(new_loan(date(2024, 2, 5)), today).unwrap();
        assert_eq!(registry.upcoming().len(), 1);

        registry.remove_loan(id, today).unwrap();
        assert!(registry.upcoming().is_empty());
    }

    #[test]
    fn corrupt_collections_load_as_empty() {
        let mut store = MemoryStore::new();
        store.set(keys::LOAN_REPAYMENTS, "not json at all").unwrap();
        store.set(keys::VEHICLE_RENEWALS, "[{\"broken\": }").unwrap();

        let registry =
            ObligationRegistry::load(store, &BusinessProfile::default(), date(2024, 2, 1));
        assert!(registry.loans().is_empty());
        assert!(registry.vehicles().is_empty());
    }
}
