//! The `ArrivalModel` trait — how many passengers show up, minute by minute.

use pax_core::{ArrivalCurveConfig, Flight};

/// Pluggable arrival-count generator.
///
/// Called once per flight whenever the engine (re)builds its arrival table:
/// at construction and on every curve-config change.  Implementations must be
/// pure; the engine relies on repeated calls giving the same table.
///
/// The returned vector should have `span_minutes` entries summing to at most
/// `total`.  Anything else is clipped by the engine.
///
/// Closures with the same signature implement the trait, which keeps test
/// scenarios exact:
///
/// ```rust,ignore
/// let five_per_minute = |_: &Flight, _: u32, _: &ArrivalCurveConfig, span: u32| {
///     (0..span).map(|m| if m < 20 { 5 } else { 0 }).collect::<Vec<u32>>()
/// };
/// ```
pub trait ArrivalModel: Send + Sync + 'static {
    fn arrivals_per_minute(
        &self,
        flight:       &Flight,
        total:        u32,
        curve:        &ArrivalCurveConfig,
        span_minutes: u32,
    ) -> Vec<u32>;
}

impl<F> ArrivalModel for F
where
    F: Fn(&Flight, u32, &ArrivalCurveConfig, u32) -> Vec<u32> + Send + Sync + 'static,
{
    fn arrivals_per_minute(
        &self,
        flight:       &Flight,
        total:        u32,
        curve:        &ArrivalCurveConfig,
        span_minutes: u32,
    ) -> Vec<u32> {
        self(flight, total, curve, span_minutes)
    }
}
