//! Even spread from the opening of the arrival span to boarding close.

use pax_core::{ArrivalCurveConfig, Flight};

use crate::ArrivalModel;

/// Spreads a flight's passengers evenly over the minutes between the start of
/// the arrival span and the flight's boarding close.
///
/// With `n` passengers over `w` minutes every minute gets `n / w`, and the
/// first `n % w` minutes get one extra.  A window of zero minutes (boarding
/// closes before the span even opens) puts everybody in the first minute.
#[derive(Debug, Default, Clone, Copy)]
pub struct UniformArrivals;

impl ArrivalModel for UniformArrivals {
    fn arrivals_per_minute(
        &self,
        flight:       &Flight,
        total:        u32,
        _curve:       &ArrivalCurveConfig,
        span_minutes: u32,
    ) -> Vec<u32> {
        spread_evenly(total, span_minutes, span_minutes.saturating_sub(flight.boarding_close_minutes))
    }
}

/// `total` passengers over the first `window` of `span` minutes.
pub(crate) fn spread_evenly(total: u32, span: u32, window: u32) -> Vec<u32> {
    let mut out = vec![0u32; span as usize];
    if out.is_empty() {
        return out;
    }
    if window == 0 {
        out[0] = total;
        return out;
    }
    let window = window.min(span) as usize;
    let base = total / window as u32;
    let extra = (total % window as u32) as usize;
    for (m, slot) in out.iter_mut().take(window).enumerate() {
        *slot = base + u32::from(m < extra);
    }
    out
}
