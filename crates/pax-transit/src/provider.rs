//! Travel-time provider trait and the two stock implementations.
//!
//! # Units
//!
//! Providers answer in whole real-world **minutes**.  Any value `<= 0` means
//! "unknown" and makes the [`TransitRouter`][crate::TransitRouter] fall back
//! to its legacy fixed delay; it is not an error.

use crate::{TransitError, TransitResult};

// ── TravelTimeProvider trait ──────────────────────────────────────────────────

/// Pluggable source of walking times between terminal stations.
///
/// Indices are positions in the engine's ticket-counter, checkpoint and
/// hold-room lists.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so an engine holding one can be moved
/// to another thread.
pub trait TravelTimeProvider: Send + Sync {
    fn minutes_ticket_to_checkpoint(&self, ticket: usize, checkpoint: usize) -> i32;

    fn minutes_checkpoint_to_hold(&self, checkpoint: usize, hold_room: usize) -> i32;
}

// ── TravelTimeMatrix ──────────────────────────────────────────────────────────

/// Precomputed minutes, `ticket_to_checkpoint[t][c]` and
/// `checkpoint_to_hold[c][h]`.  Lookups outside the tables answer `0`
/// (unknown).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TravelTimeMatrix {
    ticket_to_checkpoint: Vec<Vec<i32>>,
    checkpoint_to_hold:   Vec<Vec<i32>>,
}

impl TravelTimeMatrix {
    /// Both tables must be rectangular.  When both are non-empty the hold
    /// table needs exactly one row per checkpoint column of the ticket table.
    pub fn new(
        ticket_to_checkpoint: Vec<Vec<i32>>,
        checkpoint_to_hold:   Vec<Vec<i32>>,
    ) -> TransitResult<Self> {
        check_tables(&ticket_to_checkpoint, &checkpoint_to_hold)?;
        Ok(Self { ticket_to_checkpoint, checkpoint_to_hold })
    }
}

impl TravelTimeProvider for TravelTimeMatrix {
    fn minutes_ticket_to_checkpoint(&self, ticket: usize, checkpoint: usize) -> i32 {
        lookup(&self.ticket_to_checkpoint, ticket, checkpoint).unwrap_or(0)
    }

    fn minutes_checkpoint_to_hold(&self, checkpoint: usize, hold_room: usize) -> i32 {
        lookup(&self.checkpoint_to_hold, checkpoint, hold_room).unwrap_or(0)
    }
}

// ── WalkingTravelTimes ────────────────────────────────────────────────────────

/// Converts walking path lengths (metres) into minutes at a fixed pace.
///
///   minutes = max(1, min_minutes, ceil(metres / walk_speed_mps / 60))
///
/// A pair with no known path (outside the tables, or a negative/non-finite
/// length) answers `max(1, min_minutes)` rather than "unknown": the floorplan
/// knows the stations exist, it just has no route between them.
#[derive(Debug, Clone, PartialEq)]
pub struct WalkingTravelTimes {
    ticket_to_checkpoint_m: Vec<Vec<f64>>,
    checkpoint_to_hold_m:   Vec<Vec<f64>>,
    walk_speed_mps:         f64,
    min_minutes:            u32,
}

impl WalkingTravelTimes {
    pub const DEFAULT_WALK_SPEED_MPS: f64 = 1.34;
    pub const MIN_WALK_SPEED_MPS: f64 = 0.1;

    pub fn new(
        ticket_to_checkpoint_m: Vec<Vec<f64>>,
        checkpoint_to_hold_m:   Vec<Vec<f64>>,
    ) -> TransitResult<Self> {
        check_tables(&ticket_to_checkpoint_m, &checkpoint_to_hold_m)?;
        Ok(Self {
            ticket_to_checkpoint_m,
            checkpoint_to_hold_m,
            walk_speed_mps: Self::DEFAULT_WALK_SPEED_MPS,
            min_minutes: 0,
        })
    }

    /// Speeds below [`Self::MIN_WALK_SPEED_MPS`] (or non-finite) are clamped.
    pub fn with_walk_speed(mut self, mps: f64) -> Self {
        self.walk_speed_mps = if mps.is_finite() {
            mps.max(Self::MIN_WALK_SPEED_MPS)
        } else {
            Self::DEFAULT_WALK_SPEED_MPS
        };
        self
    }

    pub fn with_min_minutes(mut self, minutes: u32) -> Self {
        self.min_minutes = minutes;
        self
    }

    pub fn walk_speed_mps(&self) -> f64 {
        self.walk_speed_mps
    }

    fn minutes_for(&self, metres: Option<f64>) -> i32 {
        let floor = self.min_minutes.max(1);
        let minutes = match metres {
            Some(m) if m.is_finite() && m >= 0.0 => {
                let raw = (m / self.walk_speed_mps / 60.0).ceil();
                (raw.min(i32::MAX as f64) as u32).max(floor)
            }
            _ => floor,
        };
        i32::try_from(minutes).unwrap_or(i32::MAX)
    }
}

impl TravelTimeProvider for WalkingTravelTimes {
    fn minutes_ticket_to_checkpoint(&self, ticket: usize, checkpoint: usize) -> i32 {
        self.minutes_for(lookup(&self.ticket_to_checkpoint_m, ticket, checkpoint))
    }

    fn minutes_checkpoint_to_hold(&self, checkpoint: usize, hold_room: usize) -> i32 {
        self.minutes_for(lookup(&self.checkpoint_to_hold_m, checkpoint, hold_room))
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn lookup<T: Copy>(table: &[Vec<T>], row: usize, col: usize) -> Option<T> {
    table.get(row).and_then(|r| r.get(col)).copied()
}

fn check_rectangular<T>(table: &'static str, rows: &[Vec<T>]) -> TransitResult<Option<usize>> {
    let Some(first) = rows.first() else {
        return Ok(None);
    };
    let expected = first.len();
    for (row, r) in rows.iter().enumerate() {
        if r.len() != expected {
            return Err(TransitError::MatrixShape { table, row, expected, found: r.len() });
        }
    }
    Ok(Some(expected))
}

fn check_tables<T>(ticket_to_checkpoint: &[Vec<T>], checkpoint_to_hold: &[Vec<T>]) -> TransitResult<()> {
    let checkpoints = check_rectangular("ticket_to_checkpoint", ticket_to_checkpoint)?;
    check_rectangular("checkpoint_to_hold", checkpoint_to_hold)?;
    if let Some(expected) = checkpoints {
        if !checkpoint_to_hold.is_empty() && checkpoint_to_hold.len() != expected {
            return Err(TransitError::RowCount {
                table: "checkpoint_to_hold",
                expected,
                found: checkpoint_to_hold.len(),
            });
        }
    }
    Ok(())
}
