use chrono::NaiveDate;

/// Errors raised by the date core.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("birth date {birth_date} is after the reference date {today}")]
    BirthDateInFuture { birth_date: NaiveDate, today: NaiveDate },

    #[error("date is outside the supported calendar range")]
    OutOfRange,
}

/// Parses a `YYYY-MM-DD` date, rejecting days that do not exist in the month.
pub fn parse_date(input: &str) -> Result<NaiveDate, CalendarError> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| CalendarError::InvalidDate(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_dates() {
        assert_eq!(
            parse_date(" 2004-02-29 "),
            Ok(NaiveDate::from_ymd_opt(2004, 2, 29).unwrap())
        );
    }

    #[test]
    fn rejects_impossible_days() {
        assert_eq!(
            parse_date("2023-02-29"),
            Err(CalendarError::InvalidDate("2023-02-29".into()))
        );
        assert!(parse_date("2024-04-31").is_err());
        assert!(parse_date("15/03/2000").is_err());
    }
}
