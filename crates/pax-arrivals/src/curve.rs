//! Default arrival model: legacy even spread or the split-Gaussian curve.

use pax_core::{ArrivalCurveConfig, Flight};

use crate::{ArrivalModel, SplitGaussianArrivals, UniformArrivals};

/// Dispatches on [`ArrivalCurveConfig::legacy_mode`].
#[derive(Debug, Default, Clone, Copy)]
pub struct CurveArrivals {
    legacy: UniformArrivals,
    curve:  SplitGaussianArrivals,
}

impl CurveArrivals {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ArrivalModel for CurveArrivals {
    fn arrivals_per_minute(
        &self,
        flight:       &Flight,
        total:        u32,
        curve:        &ArrivalCurveConfig,
        span_minutes: u32,
    ) -> Vec<u32> {
        if curve.legacy_mode {
            self.legacy.arrivals_per_minute(flight, total, curve, span_minutes)
        } else {
            self.curve.arrivals_per_minute(flight, total, curve, span_minutes)
        }
    }
}
