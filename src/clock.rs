//! Sources of "today" for a tracker session.
//!
//! The delay engine never reads the wall clock. A session asks its
//! [`Clock`] for the date once per evaluation and passes it in.

use chrono::{Local, NaiveDate};
use tracing::info;

use crate::config::schema::ClockConfig;
use crate::error::InputError;

/// Provides the current calendar date.
pub trait Clock: std::fmt::Debug {
    /// The date to evaluate against.
    fn today(&self) -> NaiveDate;

    /// Moves the clock to `date`.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::ClockFixed`] if the clock follows real time.
    fn set_today(&mut self, date: NaiveDate) -> Result<(), InputError>;

    /// Whether the date can be changed.
    fn is_simulated(&self) -> bool;
}

/// Today's local date, re-read on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn set_today(&mut self, _date: NaiveDate) -> Result<(), InputError> {
        Err(InputError::ClockFixed)
    }

    fn is_simulated(&self) -> bool {
        false
    }
}

/// A user-controlled date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedClock {
    today: NaiveDate,
}

impl SimulatedClock {
    /// Starts the simulation at `today`.
    #[must_use]
    pub const fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl Clock for SimulatedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }

    fn set_today(&mut self, date: NaiveDate) -> Result<(), InputError> {
        info!(from = %self.today, to = %date, "simulated date changed");
        self.today = date;
        Ok(())
    }

    fn is_simulated(&self) -> bool {
        true
    }
}

/// Builds the clock a plan asks for.
#[must_use]
pub fn from_config(config: &ClockConfig) -> Box<dyn Clock> {
    match config {
        ClockConfig::System => Box::new(SystemClock),
        ClockConfig::Simulated { start } => Box::new(SimulatedClock::new(*start)),
    }
}

/// Parses a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns [`InputError::InvalidDate`] for anything that is not a real
/// calendar date in that format.
pub fn parse_date(value: &str) -> Result<NaiveDate, InputError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| InputError::InvalidDate {
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulated_clock_moves() {
        let start = NaiveDate::from_ymd_opt(2024, 12, 5).unwrap();
        let later = NaiveDate::from_ymd_opt(2024, 12, 15).unwrap();
        let mut clock = SimulatedClock::new(start);

        assert_eq!(clock.today(), start);
        clock.set_today(later).unwrap();
        assert_eq!(clock.today(), later);
        assert!(clock.is_simulated());
    }

    #[test]
    fn system_clock_cannot_be_set() {
        let mut clock = SystemClock;
        let date = NaiveDate::from_ymd_opt(2024, 12, 5).unwrap();
        assert_eq!(clock.set_today(date), Err(InputError::ClockFixed));
        assert!(!clock.is_simulated());
    }

    #[test]
    fn from_config_picks_clock() {
        let start = NaiveDate::from_ymd_opt(2024, 12, 5).unwrap();
        let simulated = from_config(&ClockConfig::Simulated { start });
        assert!(simulated.is_simulated());
        assert_eq!(simulated.today(), start);

        assert!(!from_config(&ClockConfig::System).is_simulated());
    }

    #[test]
    fn parse_date_accepts_iso_dates() {
        assert_eq!(
            parse_date(" 2024-12-15 "),
            Ok(NaiveDate::from_ymd_opt(2024, 12, 15).unwrap())
        );
    }

    #[test]
    fn parse_date_rejects_garbage() {
        for value in ["", "2024-13-01", "2024-02-30", "15/12/2024", "tomorrow"] {
            assert_eq!(
                parse_date(value),
                Err(InputError::InvalidDate {
                    value: value.to_string()
                }),
                "expected rejection for {value:?}"
            );
        }
    }
}
