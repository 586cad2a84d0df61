//! This bench test simulates a full dashboard refresh: deriving the
//! statutory item set and recomputing the upcoming feed over a registry
//! seeded with loan and vehicle schedules.

#![allow(missing_docs)]

use anupalan::{
    BusinessProfile, BusinessType, Frequency, MemoryStore, ObligationRegistry,
    domain::{loan::NewLoan, vehicle::NewVehicle},
};
use chrono::{Days, NaiveDate};
use criterion::{BatchSize, Criterion, criterion_group, criterion_main};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn profile() -> BusinessProfile {
    BusinessProfile {
        name: "Bench Traders".to_string(),
        email: "bench@example.com".to_string(),
        phone: "9812345678".to_string(),
        business_type: BusinessType::Combined,
        registration_date: Some(date(2024, 1, 1)),
        turnover: 6_000_000,
        has_vat: true,
    }
}

/// Seeds a registry with a spread of recurring obligations.
fn preseed_registry(today: NaiveDate) -> ObligationRegistry<MemoryStore> {
    let mut registry = ObligationRegistry::load(MemoryStore::new(), &profile(), today);
    for i in 1..=50 {
        registry
            .add_loan(
                NewLoan {
                    loan_name: format!("Loan {i}"),
                    start_date: today,
                    amount: 10_000 + i,
                    frequency: Frequency::Monthly,
                    first_due_date: Some(today + Days::new(i)),
                },
                today,
            )
            .unwrap();
        registry
            .add_vehicle(
                NewVehicle {
                    vehicle_name: format!("Vehicle {i}"),
                    registration_number: format!("BA 1 KHA {i:04}"),
                    last_renewal_date: today,
                    next_renewal_date: Some(today + Days::new(300 + i)),
                },
                today,
            )
            .unwrap();
    }
    registry
}

fn refresh_dashboard(c: &mut Criterion) {
    let today = date(2024, 2, 1);
    c.bench_function("refresh dashboard", |b| {
        b.iter_batched(
            || preseed_registry(today),
            |mut registry| {
                registry.refresh(&profile(), today);
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, refresh_dashboard);
criterion_main!(benches);
