use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::item::Status;

/// Input for creating a vehicle renewal schedule.
///
/// The registry assigns the id. When no explicit next renewal date is given
/// the renewal falls one year after the last one.
#[derive(Debug, Clone)]
pub struct NewVehicle {
    /// Name the user knows the vehicle by.
    pub vehicle_name: String,
    /// Plate or bluebook registration number.
    pub registration_number: String,
    /// When the registration was last renewed.
    pub last_renewal_date: NaiveDate,
    /// Explicit next renewal date, if known.
    pub next_renewal_date: Option<NaiveDate>,
}

/// An annual vehicle registration renewal.
///
/// Renewal recurs forever: completing one moves the window forward a year
/// and the status returns to pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRenewal {
    /// Generated unique id.
    pub id: Uuid,
    /// Name the user knows the vehicle by.
    pub vehicle_name: String,
    /// Plate or bluebook registration number.
    pub registration_number: String,
    /// When the registration was last renewed.
    pub last_renewal_date: NaiveDate,
    /// When the next renewal falls due.
    pub next_renewal_date: NaiveDate,
    /// Completion status of the current cycle.
    pub status: Status,
}

impl VehicleRenewal {
    /// Creates a renewal schedule from user input, assigning a fresh id.
    #[must_use]
    pub fn new(new: NewVehicle) -> Self {
        let next_renewal_date = new
            .next_renewal_date
            .unwrap_or_else(|| new.last_renewal_date + Months::new(12));
        Self {
            id: Uuid::new_v4(),
            vehicle_name: new.vehicle_name,
            registration_number: new.registration_number,
            last_renewal_date: new.last_renewal_date,
            next_renewal_date,
            status: Status::Pending,
        }
    }

    /// Records a completed renewal on `today`: the last-renewed date becomes
    /// today, the next renewal falls exactly one year out, and the cycle
    /// starts over as pending.
    pub fn renew(&mut self, today: NaiveDate) {
        self.last_renewal_date = today;
        self.next_renewal_date = today + Months::new(12);
        self.status = Status::Pending;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn scooter() -> VehicleRenewal {
        VehicleRenewal::new(NewVehicle {
            vehicle_name: "Delivery scooter".to_string(),
            registration_number: "BA 2 PA 1234".to_string(),
            last_renewal_date: date(2023, 5, 10),
            next_renewal_date: None,
        })
    }

    #[test]
    fn default_next_renewal_is_a_year_after_the_last() {
        assert_eq!(scooter().next_renewal_date, date(2024, 5, 10));
    }

    #[test]
    fn renewing_anchors_both_dates_to_today() {
        let mut vehicle = scooter();
        let today = date(2024, 6, 2);
        vehicle.renew(today);
        assert_eq!(vehicle.last_renewal_date, today);
        assert_eq!(vehicle.next_renewal_date, date(2025, 6, 2));
        assert_eq!(vehicle.status, Status::Pending);
    }

    #[test]
    fn renewing_on_leap_day_clamps() {
        let mut vehicle = scooter();
        vehicle.renew(date(2024, 2, 29));
        assert_eq!(vehicle.next_renewal_date, date(2025, 2, 28));
    }

    #[test]
    fn persisted_dates_round_trip() {
        let vehicle = scooter();
        let json = serde_json::to_string(&vehicle).unwrap();
        let reloaded: VehicleRenewal = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded, vehicle);
    }
}
