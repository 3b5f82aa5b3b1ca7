//! Countdown to the next occurrence of a birth date's month/day.

use chrono::{Datelike, NaiveDate};

use crate::age::is_leap_year;
use crate::error::CalendarError;

/// Returns the first anniversary of `birth_date` on or after `today`.
///
/// A Feb 29 birth date only ever lands on Feb 29: in common years the
/// anniversary moves forward to the next leap year rather than onto
/// Feb 28 or Mar 1.
pub fn next_birthday(birth_date: NaiveDate, today: NaiveDate) -> Result<NaiveDate, CalendarError> {
    let candidate = anniversary_from(birth_date, today.year())?;
    if candidate >= today {
        return Ok(candidate);
    }
    let next_year = today.year().checked_add(1).ok_or(CalendarError::OutOfRange)?;
    anniversary_from(birth_date, next_year)
}

/// Whole days from `today` until the next birthday; 0 on the birthday.
pub fn days_until_next_birthday(birth_date: NaiveDate, today: NaiveDate) -> Result<u32, CalendarError> {
    let next = next_birthday(birth_date, today)?;
    let days = (next - today).num_days();
    u32::try_from(days).map_err(|_| CalendarError::OutOfRange)
}

/// Anniversary in `year`, or in the next leap year when the birth date is
/// Feb 29 and `year` is a common year.
fn anniversary_from(birth_date: NaiveDate, year: i32) -> Result<NaiveDate, CalendarError> {
    let mut year = year;
    if is_leap_day(birth_date) {
        // Leap years recur at most every 8 years (e.g. 2096 -> 2104)
        while !is_leap_year(year) {
            year = year.checked_add(1).ok_or(CalendarError::OutOfRange)?;
        }
    }
    NaiveDate::from_ymd_opt(year, birth_date.month(), birth_date.day())
        .ok_or(CalendarError::OutOfRange)
}

fn is_leap_day(date: NaiveDate) -> bool {
    date.month() == 2 && date.day() == 29
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn birthday_today_is_zero() {
        assert_eq!(days_until_next_birthday(date(2000, 3, 15), date(2024, 3, 15)), Ok(0));
        assert_eq!(days_until_next_birthday(date(2004, 2, 29), date(2024, 2, 29)), Ok(0));
    }

    #[test]
    fn day_after_birthday_counts_to_next_year() {
        assert_eq!(next_birthday(date(2000, 3, 15), date(2024, 3, 16)), Ok(date(2025, 3, 15)));
        assert_eq!(days_until_next_birthday(date(2000, 3, 15), date(2024, 3, 16)), Ok(364));
    }

    #[test]
    fn countdown_crosses_leap_day() {
        // Next birthday 2024-03-01 crosses 2024-02-29
        assert_eq!(days_until_next_birthday(date(1990, 3, 1), date(2023, 3, 2)), Ok(365));
    }

    #[test]
    fn later_this_year() {
        assert_eq!(days_until_next_birthday(date(1992, 6, 14), date(2025, 6, 1)), Ok(13));
    }

    #[test]
    fn wraps_over_new_year() {
        assert_eq!(next_birthday(date(1990, 1, 2), date(2024, 12, 31)), Ok(date(2025, 1, 2)));
        assert_eq!(days_until_next_birthday(date(1990, 1, 2), date(2024, 12, 31)), Ok(2));
    }

    #[test]
    fn leap_day_after_anniversary_passed_in_common_year() {
        assert_eq!(next_birthday(date(2004, 2, 29), date(2025, 3, 1)), Ok(date(2028, 2, 29)));
        assert_eq!(days_until_next_birthday(date(2004, 2, 29), date(2025, 3, 1)), Ok(1095));
    }

    #[test]
    fn leap_day_before_feb_in_common_year() {
        assert_eq!(next_birthday(date(2004, 2, 29), date(2025, 1, 10)), Ok(date(2028, 2, 29)));
    }

    #[test]
    fn leap_day_in_leap_year_before_and_after() {
        assert_eq!(next_birthday(date(2004, 2, 29), date(2024, 2, 1)), Ok(date(2024, 2, 29)));
        assert_eq!(next_birthday(date(2004, 2, 29), date(2024, 3, 1)), Ok(date(2028, 2, 29)));
    }

    #[test]
    fn leap_day_skips_century_common_year() {
        assert_eq!(next_birthday(date(2000, 2, 29), date(2097, 1, 1)), Ok(date(2104, 2, 29)));
    }

    #[test]
    fn never_negative_and_idempotent() {
        let birth = date(1984, 10, 19);
        let mut today = date(2023, 1, 1);
        while today < date(2025, 1, 1) {
            let first = days_until_next_birthday(birth, today).unwrap();
            let second = days_until_next_birthday(birth, today).unwrap();
            assert_eq!(first, second);
            assert!(next_birthday(birth, today).unwrap() >= today);
            assert!(first <= 366);
            today = today.succ_opt().unwrap();
        }
    }
}
