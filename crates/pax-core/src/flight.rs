//! Flights.

use crate::{CoreError, CoreResult};

/// Minutes before departure at which boarding closes unless a flight says
/// otherwise.
pub const DEFAULT_BOARDING_CLOSE_MINUTES: u32 = 20;

/// A scheduled departure.  Immutable once handed to the engine.
///
/// `departure_minute` is minutes after the schedule's reference midnight; use
/// [`parse_clock`] to build it from an `HH:MM` string.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Flight {
    pub number:                 String,
    pub departure_minute:       u32,
    pub seats:                  u32,
    /// Fraction of seats sold, in `[0, 1]`.
    pub fill:                   f64,
    #[cfg_attr(feature = "serde", serde(default = "default_boarding_close"))]
    pub boarding_close_minutes: u32,
}

#[cfg(feature = "serde")]
fn default_boarding_close() -> u32 {
    DEFAULT_BOARDING_CLOSE_MINUTES
}

impl Flight {
    /// Create a flight with the default 20-minute boarding close.
    ///
    /// The flight number is trimmed; an empty number is rejected because
    /// allow-lists match flights by number.
    pub fn new(
        number: impl Into<String>,
        departure_minute: u32,
        seats: u32,
        fill: f64,
    ) -> CoreResult<Self> {
        let number = number.into().trim().to_owned();
        if number.is_empty() {
            return Err(CoreError::InvalidFlight("flight number is empty".into()));
        }
        Ok(Self {
            number,
            departure_minute,
            seats,
            fill,
            boarding_close_minutes: DEFAULT_BOARDING_CLOSE_MINUTES,
        })
    }

    pub fn with_boarding_close(mut self, minutes_before_departure: u32) -> Self {
        self.boarding_close_minutes = minutes_before_departure;
        self
    }

    /// `round(seats × fill)`, with `fill` clamped to `[0, 1]`.
    pub fn total_passengers(&self) -> u32 {
        let fill = if self.fill.is_finite() { self.fill.clamp(0.0, 1.0) } else { 0.0 };
        (self.seats as f64 * fill).round() as u32
    }

    /// Minute (same reference as `departure_minute`) at which boarding closes.
    pub fn boarding_close_minute(&self) -> u32 {
        self.departure_minute.saturating_sub(self.boarding_close_minutes)
    }

    /// `true` if `number` names this flight (whitespace-insensitive).
    pub fn matches(&self, number: &str) -> bool {
        self.number == number.trim()
    }
}

/// Parse `HH:MM` (24-hour clock) into minutes after midnight.
pub fn parse_clock(s: &str) -> CoreResult<u32> {
    let invalid = || CoreError::InvalidClock(s.to_owned());
    let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
    let hours: u32 = h.parse().map_err(|_| invalid())?;
    let minutes: u32 = m.parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }
    Ok(hours * 60 + minutes)
}
