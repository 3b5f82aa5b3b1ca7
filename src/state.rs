//! Application state and the pure transition function driving the UI.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::CalendarError;
use crate::reading::Reading;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AppState {
    /// `None` until a birth date has been picked.
    pub reading: Option<Reading>,
    pub celebration_visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    DatePicked { birth_date: NaiveDate, today: NaiveDate },
    CelebrationExpired,
}

/// What the controller must do with the hide-celebration timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    ScheduleHide,
    CancelHide,
}

/// Applies `event` to `state`. On error the caller keeps its previous state.
pub fn update(state: AppState, event: Event) -> Result<(AppState, Effect), CalendarError> {
    match event {
        Event::DatePicked { birth_date, today } => {
            let reading = Reading::evaluate(birth_date, today)?;
            let celebrate = reading.is_birthday();
            let next = AppState {
                reading: Some(reading),
                celebration_visible: celebrate,
            };
            let effect = if celebrate { Effect::ScheduleHide } else { Effect::CancelHide };
            Ok((next, effect))
        }
        Event::CelebrationExpired => Ok((
            AppState {
                celebration_visible: false,
                ..state
            },
            Effect::None,
        )),
    }
}

impl fmt::Display for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reading {
            None => {
                writeln!(f, "Select your birth date")?;
                writeln!(f, "AGE: --")?;
                write!(f, "Days until next birthday: --")?;
            }
            Some(reading) => write!(f, "{reading}")?,
        }
        if self.celebration_visible {
            write!(f, "\n🎉 🎉 🎉")?;
        }
        Ok(())
    }
}
