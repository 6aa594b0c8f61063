//! Asymmetric Gaussian arrival curve.
//!
//! Passengers cluster around `peak_minutes` before departure.  Early arrivals
//! (further from departure than the peak) fall off with `left_sigma_minutes`,
//! late ones with `right_sigma_minutes`.  Nobody arrives before the window
//! opens, and with the late clamp enabled nobody arrives closer to departure
//! than `late_clamp_minutes`.
//!
//! Weights are turned into whole passengers with largest-remainder rounding,
//! so the counts always sum to exactly `total` (when at least one minute has
//! positive weight).  Ties in the fractional part go to the earlier minute.

use pax_core::{ArrivalCurveConfig, Flight};

use crate::uniform::spread_evenly;
use crate::ArrivalModel;

#[derive(Debug, Default, Clone, Copy)]
pub struct SplitGaussianArrivals;

impl ArrivalModel for SplitGaussianArrivals {
    fn arrivals_per_minute(
        &self,
        flight:       &Flight,
        total:        u32,
        curve:        &ArrivalCurveConfig,
        span_minutes: u32,
    ) -> Vec<u32> {
        let curve = curve.clone().validated();
        let weights = weights(&curve, span_minutes);
        let sum: f64 = weights.iter().sum();
        if sum <= 0.0 {
            // Every minute was clamped away; fall back to an even spread.
            let window = span_minutes.saturating_sub(flight.boarding_close_minutes);
            return spread_evenly(total, span_minutes, window);
        }
        apportion(total, &weights, sum)
    }
}

/// Unnormalised weight per minute of the span.
fn weights(curve: &ArrivalCurveConfig, span: u32) -> Vec<f64> {
    let peak = curve.peak_minutes as f64;
    (0..span)
        .map(|m| {
            let before = span - m;
            if before > curve.window_start_minutes {
                return 0.0;
            }
            if curve.late_clamp_enabled && before < curve.late_clamp_minutes {
                return 0.0;
            }
            let t = before as f64;
            let sigma = if t > peak { curve.left_sigma_minutes } else { curve.right_sigma_minutes };
            let z = (t - peak) / sigma;
            (-0.5 * z * z).exp()
        })
        .collect()
}

/// Largest-remainder apportionment of `total` over `weights`.
fn apportion(total: u32, weights: &[f64], sum: f64) -> Vec<u32> {
    let exact: Vec<f64> = weights.iter().map(|w| total as f64 * w / sum).collect();
    let mut out: Vec<u32> = exact.iter().map(|x| x.floor() as u32).collect();

    let assigned: u32 = out.iter().sum();
    let mut leftover = total.saturating_sub(assigned) as usize;

    let mut order: Vec<usize> = (0..exact.len()).filter(|&i| weights[i] > 0.0).collect();
    order.sort_by(|&a, &b| {
        let fa = exact[a] - exact[a].floor();
        let fb = exact[b] - exact[b].floor();
        fb.total_cmp(&fa).then(a.cmp(&b))
    });
    for i in order {
        if leftover == 0 {
            break;
        }
        out[i] += 1;
        leftover -= 1;
    }
    out
}
