//! Engine configuration.
//!
//! One explicit struct per concern, all plain data.  Nothing here rejects
//! input: out-of-range values are clamped where they are consumed (see
//! [`ServiceRate::per_interval`], [`ArrivalCurveConfig::validated`]) so a bad
//! value degrades throughput instead of halting a run.

use crate::{Flight, IntervalLength, DEFAULT_BOARDING_CLOSE_MINUTES};

// ── Service rates ─────────────────────────────────────────────────────────────

/// How fast one server processes passengers.
///
/// Ticket counters are usually quoted per minute and security lanes per hour;
/// both convert to the same per-interval value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ServiceRate {
    PerMinute(f64),
    PerHour(f64),
}

impl ServiceRate {
    /// Passengers per interval; negative or non-finite rates become `0.0`.
    pub fn per_interval(self, length: IntervalLength) -> f64 {
        match self {
            ServiceRate::PerMinute(r) => length.per_interval_from_per_minute(r),
            ServiceRate::PerHour(r) => length.per_interval_from_per_hour(r),
        }
    }

    /// `true` if the configured value would have to be clamped.
    pub fn is_degenerate(self) -> bool {
        let v = match self {
            ServiceRate::PerMinute(r) | ServiceRate::PerHour(r) => r,
        };
        !v.is_finite() || v < 0.0
    }
}

// ── Servers ───────────────────────────────────────────────────────────────────

/// A ticket counter or a security checkpoint lane.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ServerConfig {
    pub id:              u32,
    pub rate:            ServiceRate,
    /// Flight numbers this server accepts.  Empty means every flight.
    /// Only ticket counters route on it; checkpoints serve every flight.
    #[cfg_attr(feature = "serde", serde(default))]
    pub allowed_flights: Vec<String>,
}

pub type TicketCounterConfig = ServerConfig;
pub type CheckpointConfig = ServerConfig;

impl ServerConfig {
    pub fn new(id: u32, rate: ServiceRate) -> Self {
        Self { id, rate, allowed_flights: Vec::new() }
    }

    /// Ticket counter serving `per_minute` passengers per minute.
    pub fn ticket_counter(id: u32, per_minute: f64) -> Self {
        Self::new(id, ServiceRate::PerMinute(per_minute))
    }

    /// Checkpoint lane screening `per_hour` passengers per hour.
    pub fn checkpoint(id: u32, per_hour: f64) -> Self {
        Self::new(id, ServiceRate::PerHour(per_hour))
    }

    pub fn with_allowed_flights<I, S>(mut self, numbers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allowed_flights = normalize_numbers(numbers);
        self
    }

    pub fn accepts_all(&self) -> bool {
        self.allowed_flights.is_empty()
    }

    pub fn accepts(&self, flight: &Flight) -> bool {
        self.accepts_all() || self.allowed_flights.iter().any(|n| flight.matches(n))
    }
}

// ── Hold rooms ────────────────────────────────────────────────────────────────

/// A gate hold room.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HoldRoomConfig {
    pub id:              u32,
    /// Flight numbers this room accepts.  Empty means every flight.
    #[cfg_attr(feature = "serde", serde(default))]
    pub allowed_flights: Vec<String>,
    /// Walk time from the checkpoint, used when no travel-time provider is set.
    #[cfg_attr(feature = "serde", serde(default))]
    pub walk_seconds:    u32,
}

impl HoldRoomConfig {
    pub fn new(id: u32) -> Self {
        Self { id, allowed_flights: Vec::new(), walk_seconds: 0 }
    }

    pub fn with_walk_seconds(mut self, seconds: u32) -> Self {
        self.walk_seconds = seconds;
        self
    }

    /// Walk time as minutes + seconds; seconds are clamped to `0..=59`.
    pub fn with_walk_time(self, minutes: u32, seconds: u32) -> Self {
        self.with_walk_seconds(minutes * 60 + seconds.min(59))
    }

    pub fn with_allowed_flights<I, S>(mut self, numbers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allowed_flights = normalize_numbers(numbers);
        self
    }

    pub fn accepts_all(&self) -> bool {
        self.allowed_flights.is_empty()
    }

    pub fn accepts(&self, flight: &Flight) -> bool {
        self.accepts_all() || self.allowed_flights.iter().any(|n| flight.matches(n))
    }
}

fn normalize_numbers<I, S>(numbers: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for n in numbers {
        let n = n.as_ref().trim();
        if !n.is_empty() && !out.iter().any(|o| o == n) {
            out.push(n.to_owned());
        }
    }
    out
}

// ── Arrival curve ─────────────────────────────────────────────────────────────

/// Shape of the per-minute arrival curve handed to the arrival model.
///
/// All offsets are minutes before departure.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ArrivalCurveConfig {
    /// `true` spreads passengers evenly; `false` uses the split-Gaussian curve.
    pub legacy_mode:            bool,
    /// Earliest arrival (opening of the arrival window).
    pub window_start_minutes:   u32,
    pub peak_minutes:           u32,
    /// Spread on the early side of the peak.
    pub left_sigma_minutes:     f64,
    /// Spread on the late side of the peak.
    pub right_sigma_minutes:    f64,
    pub late_clamp_enabled:     bool,
    /// No arrivals later than this when the clamp is enabled.
    pub late_clamp_minutes:     u32,
    pub boarding_close_minutes: u32,
}

impl Default for ArrivalCurveConfig {
    fn default() -> Self {
        Self::legacy_default()
    }
}

impl ArrivalCurveConfig {
    pub const MIN_SIGMA_MINUTES: f64 = 1.0;

    pub fn legacy_default() -> Self {
        Self {
            legacy_mode:            true,
            window_start_minutes:   120,
            peak_minutes:           70,
            left_sigma_minutes:     20.0,
            right_sigma_minutes:    12.0,
            late_clamp_enabled:     true,
            late_clamp_minutes:     DEFAULT_BOARDING_CLOSE_MINUTES,
            boarding_close_minutes: DEFAULT_BOARDING_CLOSE_MINUTES,
        }
    }

    /// Same shape with the split-Gaussian curve switched on.
    pub fn curve_default() -> Self {
        Self { legacy_mode: false, ..Self::legacy_default() }
    }

    /// Clamp every field into a usable range:
    ///
    /// - window start ≥ 1 minute;
    /// - boarding close, peak and late clamp inside `[0, window start]`;
    /// - peak no later than boarding close;
    /// - both sigmas finite and ≥ [`Self::MIN_SIGMA_MINUTES`].
    pub fn validated(mut self) -> Self {
        self.window_start_minutes = self.window_start_minutes.max(1);
        let window = self.window_start_minutes;

        self.boarding_close_minutes = self.boarding_close_minutes.min(window);
        self.late_clamp_minutes = self.late_clamp_minutes.min(window);
        self.peak_minutes = self.peak_minutes.clamp(self.boarding_close_minutes, window);
        self.left_sigma_minutes = clamp_sigma(self.left_sigma_minutes);
        self.right_sigma_minutes = clamp_sigma(self.right_sigma_minutes);
        self
    }
}

fn clamp_sigma(v: f64) -> f64 {
    if v.is_finite() {
        v.max(ArrivalCurveConfig::MIN_SIGMA_MINUTES)
    } else {
        ArrivalCurveConfig::MIN_SIGMA_MINUTES
    }
}

// ── Engine ────────────────────────────────────────────────────────────────────

/// Construction parameters for the engine (everything except the flights).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Share of each arrival batch that checks in at a ticket counter, `[0, 1]`.
    pub percent_in_person:     f64,
    pub ticket_counters:       Vec<TicketCounterConfig>,
    /// An empty list is replaced by one zero-rate fallback checkpoint.
    pub checkpoints:           Vec<CheckpointConfig>,
    /// Minutes before departure that a flight's arrival window opens.
    pub arrival_span_minutes:  u32,
    pub interval_minutes:      u32,
    /// Ticket→checkpoint walk used when no provider is set (or it answers ≤0).
    pub transit_delay_minutes: u32,
    /// Checkpoint→hold walk for default rooms and provider fallback.
    pub hold_delay_minutes:    u32,
    /// Empty means one room per flight, accepting only that flight.
    pub hold_rooms:            Vec<HoldRoomConfig>,
    /// Seed for hold-room tie-breaking.
    pub seed:                  u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            percent_in_person:     0.5,
            ticket_counters:       Vec::new(),
            checkpoints:           Vec::new(),
            arrival_span_minutes:  120,
            interval_minutes:      1,
            transit_delay_minutes: 1,
            hold_delay_minutes:    1,
            hold_rooms:            Vec::new(),
            seed:                  0,
        }
    }
}

impl EngineConfig {
    pub fn interval_length(&self) -> IntervalLength {
        IntervalLength::new(self.interval_minutes)
    }
}
