//! age.rs
//!
//! Calendar-aware age in the format:
//!     "X years, Y months, Z days"
//!
//! Chrono does not provide a built-in year/month/day diff, so the
//! breakdown anchors on whole months added to the birth date and counts
//! the remaining days from there.
//!
//! This logic correctly handles:
//!   • a month anniversary still ahead of `today` (one month fewer)
//!   • birth days past the end of a shorter month (clamped anchor)
//!   • leap years
//!   • varying month lengths

use std::fmt;

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

use crate::error::CalendarError;

/// Elapsed time between a birth date and a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgeBreakdown {
    pub years: u32,
    pub months: u32,
    pub days: u32,
}

impl fmt::Display for AgeBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} year{}, {} month{}, {} day{}",
            self.years,
            plural(self.years),
            self.months,
            plural(self.months),
            self.days,
            plural(self.days)
        )
    }
}

/// Returns the age of someone born on `birth_date` as of `today`.
pub fn age_breakdown(birth_date: NaiveDate, today: NaiveDate) -> Result<AgeBreakdown, CalendarError> {
    if birth_date > today {
        return Err(CalendarError::BirthDateInFuture { birth_date, today });
    }

    let mut total_months = (today.year() - birth_date.year()) * 12 + today.month() as i32
        - birth_date.month() as i32;

    let mut anchor = add_months(birth_date, total_months)?;

    // Day underflow: the last month anniversary has not happened yet
    if anchor > today {
        total_months -= 1;
        anchor = add_months(birth_date, total_months)?;
    }

    let days = (today - anchor).num_days();

    Ok(AgeBreakdown {
        years: (total_months / 12) as u32,
        months: (total_months % 12) as u32,
        days: days as u32,
    })
}

/// Adds whole months, clamping the day to the end of shorter months
/// (Jan 31 + 1 month = Feb 28/29).
fn add_months(date: NaiveDate, months: i32) -> Result<NaiveDate, CalendarError> {
    let months = u32::try_from(months).map_err(|_| CalendarError::OutOfRange)?;
    date.checked_add_months(Months::new(months))
        .ok_or(CalendarError::OutOfRange)
}

fn plural(n: u32) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Leap-year rule (Gregorian):
///   - divisible by 4 → leap year
///   - except divisible by 100 → not leap year
///   - except divisible by 400 → leap year
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}
