use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::age::{AgeBreakdown, age_breakdown};
use crate::birthday::{days_until_next_birthday, next_birthday};
use crate::error::CalendarError;

/// One evaluation of age and countdown for a birth date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reading {
    pub birth_date: NaiveDate,
    pub today: NaiveDate,
    pub age: AgeBreakdown,
    pub next_birthday: NaiveDate,
    pub days_until_next_birthday: u32,
}

impl Reading {
    pub fn evaluate(birth_date: NaiveDate, today: NaiveDate) -> Result<Self, CalendarError> {
        let age = age_breakdown(birth_date, today)?;

        Ok(Self {
            birth_date,
            today,
            age,
            next_birthday: next_birthday(birth_date, today)?,
            days_until_next_birthday: days_until_next_birthday(birth_date, today)?,
        })
    }

    pub fn is_birthday(&self) -> bool {
        self.days_until_next_birthday == 0
    }

    /// "March 15, 2000"
    pub fn formatted_birth_date(&self) -> String {
        self.birth_date.format("%B %d, %Y").to_string()
    }

    pub fn months_label(&self) -> String {
        format!("{} months", self.age.months)
    }

    pub fn days_label(&self) -> String {
        format!("{} days", self.age.days)
    }

    pub fn countdown_label(&self) -> String {
        if self.is_birthday() {
            "0 days — Happy Birthday! 🎉".to_string()
        } else {
            format!("{} days", self.days_until_next_birthday)
        }
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.formatted_birth_date())?;
        writeln!(f, "AGE: {}", self.age)?;
        write!(f, "Days until next birthday: {}", self.countdown_label())
    }
}
