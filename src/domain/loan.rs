use std::{fmt, str::FromStr};

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::item::Status;

/// How often a loan repayment falls due.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Frequency {
    /// Every month.
    Monthly,
    /// Every three months.
    Quarterly,
    /// Every six months.
    HalfYearly,
    /// Every year.
    Annually,
}

impl Frequency {
    /// Length of one repayment period in months.
    #[must_use]
    pub const fn period_months(self) -> u32 {
        match self {
            Self::Monthly => 1,
            Self::Quarterly => 3,
            Self::HalfYearly => 6,
            Self::Annually => 12,
        }
    }

    /// The kebab-case form used in persisted records and on the command
    /// line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::HalfYearly => "half-yearly",
            Self::Annually => "annually",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = ParseFrequencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "half-yearly" => Ok(Self::HalfYearly),
            "annually" => Ok(Self::Annually),
            other => Err(ParseFrequencyError(other.to_string())),
        }
    }
}

/// Error returned when a string is not a repayment frequency.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown frequency '{0}': expected monthly, quarterly, half-yearly or annually")]
pub struct ParseFrequencyError(String);

/// Input for creating a loan repayment schedule.
///
/// The registry assigns the id. When no first due date is given the
/// schedule starts one period after the start date.
#[derive(Debug, Clone)]
pub struct NewLoan {
    /// Name the user knows the loan by.
    pub loan_name: String,
    /// When the loan was taken out.
    pub start_date: NaiveDate,
    /// Instalment amount in rupees.
    pub amount: u64,
    /// Repayment cadence.
    pub frequency: Frequency,
    /// Explicit first due date, if the schedule is already running.
    pub first_due_date: Option<NaiveDate>,
}

/// A perpetual loan repayment schedule.
///
/// Completing a repayment never terminates the schedule: the due date
/// advances one period and the status returns to pending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanRepayment {
    /// Generated unique id.
    pub id: Uuid,
    /// Name the user knows the loan by.
    pub loan_name: String,
    /// When the loan was taken out.
    pub start_date: NaiveDate,
    /// Instalment amount in rupees.
    pub amount: u64,
    /// Repayment cadence.
    pub frequency: Frequency,
    /// Next instalment due date.
    pub next_due_date: NaiveDate,
    /// Completion status of the current cycle.
    pub status: Status,
}

impl LoanRepayment {
    /// Creates a schedule from user input, assigning a fresh id.
    #[must_use]
    pub fn new(new: NewLoan) -> Self {
        let next_due_date = new
            .first_due_date
            .unwrap_or_else(|| new.start_date + Months::new(new.frequency.period_months()));
        Self {
            id: Uuid::new_v4(),
            loan_name: new.loan_name,
            start_date: new.start_date,
            amount: new.amount,
            frequency: new.frequency,
            next_due_date,
            status: Status::Pending,
        }
    }

    /// Records the current instalment as paid: the due date moves forward
    /// one period and the cycle starts over as pending.
    pub fn advance(&mut self) {
        self.next_due_date = self.next_due_date + Months::new(self.frequency.period_months());
        self.status = Status::Pending;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn monthly_loan(next_due: NaiveDate) -> LoanRepayment {
        LoanRepayment::new(NewLoan {
            loan_name: "Equipment loan".to_string(),
            start_date: date(2024, 1, 15),
            amount: 25_000,
            frequency: Frequency::Monthly,
            first_due_date: Some(next_due),
        })
    }

    #[test]
    fn advancing_a_monthly_loan_moves_one_month_and_stays_pending() {
        let mut loan = monthly_loan(date(2024, 3, 15));
        loan.advance();
        assert_eq!(loan.next_due_date, date(2024, 4, 15));
        assert_eq!(loan.status, Status::Pending);
    }

    #[test]
    fn advancing_clamps_to_shorter_months() {
        let mut loan = monthly_loan(date(2024, 1, 31));
        loan.advance();
        assert_eq!(loan.next_due_date, date(2024, 2, 29));
    }

    #[test]
    fn period_lengths() {
        assert_eq!(Frequency::Monthly.period_months(), 1);
        assert_eq!(Frequency::Quarterly.period_months(), 3);
        assert_eq!(Frequency::HalfYearly.period_months(), 6);
        assert_eq!(Frequency::Annually.period_months(), 12);
    }

    #[test]
    fn default_first_due_date_is_one_period_out() {
        let loan = LoanRepayment::new(NewLoan {
            loan_name: "Vehicle loan".to_string(),
            start_date: date(2024, 1, 15),
            amount: 40_000,
            frequency: Frequency::Quarterly,
            first_due_date: None,
        });
        assert_eq!(loan.next_due_date, date(2024, 4, 15));
    }

    #[test]
    fn persisted_dates_round_trip() {
        let loan = monthly_loan(date(2024, 3, 15));
        let json = serde_json::to_string(&loan).unwrap();
        let reloaded: LoanRepayment = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded.next_due_date, loan.next_due_date);
        assert_eq!(reloaded.start_date, loan.start_date);
        assert_eq!(reloaded, loan);
    }

    #[test]
    fn frequency_round_trips_through_strings() {
        for frequency in [
            Frequency::Monthly,
            Frequency::Quarterly,
            Frequency::HalfYearly,
            Frequency::Annually,
        ] {
            assert_eq!(frequency.as_str().parse(), Ok(frequency));
        }
        assert!("weekly".parse::<Frequency>().is_err());
    }
}
