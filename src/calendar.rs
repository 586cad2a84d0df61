//! Conversion between the Gregorian calendar and Bikram Sambat (BS), the
//! Nepali calendar used for all user-facing dates.
//!
//! The conversion is table-driven: month lengths are tabulated for BS years
//! 2000 through 2090, anchored at 2000-01-01 BS = 1943-04-14 AD. All domain
//! computation uses Gregorian dates; BS appears only at the display and
//! input boundary.

use std::fmt;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// First BS year covered by the conversion table.
const FIRST_BS_YEAR: i32 = 2000;

/// Gregorian date corresponding to 2000-01-01 BS.
const fn epoch() -> NaiveDate {
    match NaiveDate::from_ymd_opt(1943, 4, 14) {
        Some(date) => date,
        None => unreachable!(),
    }
}

/// Days in each BS month for years 2000..=2090.
const BS_MONTH_DAYS: [[u8; 12]; 91] = [
    [30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31],
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30],
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30],
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31],
    [30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31],
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30],
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30],
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31],
    [31, 31, 31, 32, 31, 31, 29, 30, 30, 29, 29, 31],
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30],
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30],
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31],
    [31, 31, 31, 32, 31, 31, 29, 30, 30, 29, 30, 30],
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30],
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30],
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31],
    [31, 31, 31, 32, 31, 31, 29, 30, 30, 29, 30, 30],
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30],
    [31, 32, 31, 32, 31, 30, 30, 29, 30, 29, 30, 30],
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31],
    [31, 31, 31, 32, 31, 31, 30, 29, 30, 29, 30, 30],
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30],
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 30],
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31],
    [31, 31, 31, 32, 31, 31, 30, 29, 30, 29, 30, 30],
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30],
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31],
    [30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31],
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30],
    [31, 31, 32, 31, 32, 30, 30, 29, 30, 29, 30, 30],
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31],
    [30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31],
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30],
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30],
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31],
    [30, 32, 31, 32, 31, 31, 29, 30, 30, 29, 29, 31],
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30],
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30],
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31],
    [31, 31, 31, 32, 31, 31, 29, 30, 30, 29, 30, 30],
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30],
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30],
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31],
    [31, 31, 31, 32, 31, 31, 29, 30, 30, 29, 30, 30],
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30],
    [31, 32, 31, 32, 31, 30, 30, 29, 30, 29, 30, 30],
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31],
    [31, 31, 31, 32, 31, 31, 30, 29, 30, 29, 30, 30],
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30],
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 30],
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31],
    [31, 31, 31, 32, 31, 31, 30, 29, 30, 29, 30, 30],
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30],
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 30],
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31],
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 30, 29, 30],
    [31, 31, 32, 31, 32, 30, 30, 29, 30, 29, 30, 30],
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31],
    [30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31],
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30],
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30],
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31],
    [30, 32, 31, 32, 31, 31, 29, 30, 29, 30, 29, 31],
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30],
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30],
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31],
    [31, 31, 31, 32, 31, 31, 29, 30, 30, 29, 29, 31],
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30],
    [31, 31, 32, 32, 31, 30, 30, 29, 30, 29, 30, 30],
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31],
    [31, 31, 31, 32, 31, 31, 29, 30, 30, 29, 30, 30],
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30],
    [31, 32, 31, 32, 31, 30, 30, 29, 30, 29, 30, 30],
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 31],
    [31, 31, 31, 32, 31, 31, 30, 29, 30, 29, 30, 30],
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30],
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 30],
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 30, 29, 31],
    [31, 31, 31, 32, 31, 31, 30, 29, 30, 29, 30, 30],
    [31, 31, 32, 31, 31, 31, 30, 29, 30, 29, 30, 30],
    [31, 32, 31, 32, 31, 30, 30, 30, 29, 29, 30, 30],
    [31, 31, 32, 32, 31, 30, 30, 30, 29, 30, 30, 30],
    [30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 30, 30],
    [31, 31, 32, 31, 31, 30, 30, 30, 29, 30, 30, 30],
    [31, 31, 32, 31, 31, 30, 30, 30, 29, 30, 30, 30],
    [31, 32, 31, 32, 30, 31, 30, 30, 29, 30, 30, 30],
    [30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 30, 30],
    [31, 31, 32, 31, 31, 31, 30, 30, 29, 30, 30, 30],
    [30, 31, 32, 32, 30, 31, 30, 30, 29, 30, 30, 30],
    [30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 30, 30],
    [30, 32, 31, 32, 31, 30, 30, 30, 29, 30, 30, 30],
];

/// BS month names, Baishakh through Chaitra.
pub const MONTH_NAMES: [&str; 12] = [
    "Baishakh", "Jestha", "Ashadh", "Shrawan", "Bhadra", "Ashwin", "Kartik", "Mangsir", "Poush",
    "Magh", "Falgun", "Chaitra",
];

/// A date in the Bikram Sambat calendar.
///
/// `month` and `day` are 1-based. Construction through [`BsDate::new`]
/// validates against the conversion table, so a `BsDate` obtained from this
/// module always names a real calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BsDate {
    /// BS year (2000..=2090).
    pub year: i32,
    /// BS month, 1 (Baishakh) through 12 (Chaitra).
    pub month: u32,
    /// Day of the month, starting at 1.
    pub day: u32,
}

impl BsDate {
    /// Creates a BS date, validating it against the conversion table.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::OutOfRange`] if the year is not covered by
    /// the table, or [`CalendarError::InvalidDate`] if the month or day does
    /// not exist in that year.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, CalendarError> {
        let days = month_days(year, month)?;
        if day == 0 || day > u32::from(days) {
            return Err(CalendarError::InvalidDate { year, month, day });
        }
        Ok(Self { year, month, day })
    }

    /// The BS month name (`Baishakh` for month 1, and so on).
    #[must_use]
    pub fn month_name(self) -> &'static str {
        MONTH_NAMES[self.month as usize - 1]
    }

    /// Long display form, e.g. `2080 Baishakh 15`.
    #[must_use]
    pub fn format_long(self) -> String {
        format!("{} {} {}", self.year, self.month_name(), self.day)
    }

    /// BS date alongside its Gregorian rendering, e.g.
    /// `2080 Baishakh 15 (Apr 27, 2023)`.
    #[must_use]
    pub fn format_with_gregorian(self, date: NaiveDate) -> String {
        format!("{} ({})", self.format_long(), date.format("%b %-d, %Y"))
    }
}

impl fmt::Display for BsDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Errors produced by calendar conversion.
///
/// Unconvertible input fails explicitly rather than being silently
/// substituted with a fallback date; callers choose their own degradation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CalendarError {
    /// The date falls outside the tabulated BS years (2000..=2090).
    #[error("date is outside the supported Bikram Sambat range (2000..=2090 BS)")]
    OutOfRange,
    /// The BS year/month/day triple does not name a real day.
    #[error("invalid Bikram Sambat date {year}-{month:02}-{day:02}")]
    InvalidDate {
        /// BS year of the rejected date.
        year: i32,
        /// BS month of the rejected date.
        month: u32,
        /// Day of the rejected date.
        day: u32,
    },
}

fn month_days(year: i32, month: u32) -> Result<u8, CalendarError> {
    let year_index = usize::try_from(year - FIRST_BS_YEAR).map_err(|_| CalendarError::OutOfRange)?;
    let months = BS_MONTH_DAYS.get(year_index).ok_or(CalendarError::OutOfRange)?;
    if month == 0 || month > 12 {
        return Err(CalendarError::InvalidDate { year, month, day: 0 });
    }
    Ok(months[month as usize - 1])
}

fn year_days(year_index: usize) -> i64 {
    BS_MONTH_DAYS[year_index].iter().map(|&d| i64::from(d)).sum()
}

/// Converts a Gregorian date to Bikram Sambat.
///
/// # Errors
///
/// Returns [`CalendarError::OutOfRange`] when the date falls before
/// 1943-04-14 AD or beyond the end of the tabulated range.
pub fn to_bs(date: NaiveDate) -> Result<BsDate, CalendarError> {
    let mut remaining = (date - epoch()).num_days();
    if remaining < 0 {
        return Err(CalendarError::OutOfRange);
    }

    for (year_index, months) in BS_MONTH_DAYS.iter().enumerate() {
        let in_year = year_days(year_index);
        if remaining >= in_year {
            remaining -= in_year;
            continue;
        }
        for (month_index, &days) in months.iter().enumerate() {
            let in_month = i64::from(days);
            if remaining >= in_month {
                remaining -= in_month;
                continue;
            }
            return Ok(BsDate {
                year: FIRST_BS_YEAR + i32::try_from(year_index).unwrap_or(0),
                month: u32::try_from(month_index).unwrap_or(0) + 1,
                day: u32::try_from(remaining).unwrap_or(0) + 1,
            });
        }
    }

    Err(CalendarError::OutOfRange)
}

/// Converts a Bikram Sambat date to Gregorian.
///
/// # Errors
///
/// Returns an error when the BS date is invalid or outside the tabulated
/// range (see [`BsDate::new`]).
pub fn to_gregorian(bs: BsDate) -> Result<NaiveDate, CalendarError> {
    // Re-validate so arbitrary struct literals cannot slip through.
    let bs = BsDate::new(bs.year, bs.month, bs.day)?;

    let year_index = usize::try_from(bs.year - FIRST_BS_YEAR).map_err(|_| CalendarError::OutOfRange)?;
    let mut days: u64 = 0;
    for index in 0..year_index {
        days += u64::try_from(year_days(index)).unwrap_or(0);
    }
    for month in 1..bs.month {
        days += u64::from(BS_MONTH_DAYS[year_index][month as usize - 1]);
    }
    days += u64::from(bs.day) - 1;

    epoch()
        .checked_add_days(Days::new(days))
        .ok_or(CalendarError::OutOfRange)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ad(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn epoch_maps_to_first_tabulated_day() {
        let bs = to_bs(ad(1943, 4, 14)).unwrap();
        assert_eq!(bs, BsDate { year: 2000, month: 1, day: 1 });
    }

    #[test]
    fn day_after_epoch() {
        let bs = to_bs(ad(1943, 4, 15)).unwrap();
        assert_eq!(bs, BsDate { year: 2000, month: 1, day: 2 });
    }

    #[test]
    fn round_trips_through_bs() {
        for date in [
            ad(1943, 4, 14),
            ad(1960, 1, 1),
            ad(1999, 12, 31),
            ad(2024, 1, 1),
            ad(2024, 2, 29),
        ] {
            let bs = to_bs(date).unwrap();
            assert_eq!(to_gregorian(bs).unwrap(), date, "round trip failed for {date}");
        }
    }

    #[test]
    fn round_trips_through_gregorian() {
        for (year, month, day) in [(2000, 1, 1), (2042, 6, 15), (2080, 1, 1), (2080, 12, 30)] {
            let bs = BsDate::new(year, month, day).unwrap();
            let date = to_gregorian(bs).unwrap();
            assert_eq!(to_bs(date).unwrap(), bs);
        }
    }

    #[test]
    fn conversion_preserves_ordering() {
        let earlier = to_bs(ad(2023, 4, 1)).unwrap();
        let later = to_bs(ad(2023, 7, 1)).unwrap();
        assert!(earlier < later);
    }

    #[test]
    fn rejects_dates_before_the_epoch() {
        assert_eq!(to_bs(ad(1943, 4, 13)), Err(CalendarError::OutOfRange));
    }

    #[test]
    fn rejects_years_outside_the_table() {
        assert_eq!(BsDate::new(1999, 1, 1), Err(CalendarError::OutOfRange));
        assert_eq!(BsDate::new(2091, 1, 1), Err(CalendarError::OutOfRange));
    }

    #[test]
    fn rejects_invalid_month_and_day() {
        assert!(matches!(
            BsDate::new(2080, 13, 1),
            Err(CalendarError::InvalidDate { .. })
        ));
        assert!(matches!(
            BsDate::new(2080, 1, 0),
            Err(CalendarError::InvalidDate { .. })
        ));
        assert!(matches!(
            BsDate::new(2080, 1, 33),
            Err(CalendarError::InvalidDate { .. })
        ));
    }

    #[test]
    fn to_gregorian_revalidates_struct_literals() {
        let forged = BsDate { year: 2080, month: 2, day: 40 };
        assert!(to_gregorian(forged).is_err());
    }

    #[test]
    fn month_names_line_up() {
        let bs = BsDate::new(2080, 1, 15).unwrap();
        assert_eq!(bs.month_name(), "Baishakh");
        assert_eq!(bs.format_long(), "2080 Baishakh 15");
        assert_eq!(bs.to_string(), "2080-01-15");
    }
}
