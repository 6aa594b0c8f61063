//! TOML scenario files.
//!
//! ```toml
//! [engine]            # pax_core::EngineConfig, every key optional
//! [curve]             # optional pax_core::ArrivalCurveConfig
//! [walking]           # optional path lengths in metres
//! [[flights]]         # number, departure = "HH:MM", seats, fill, boarding_close_minutes
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use pax_core::{ArrivalCurveConfig, EngineConfig, Flight, parse_clock};
use pax_sim::{Engine, EngineBuilder};
use pax_transit::WalkingTravelTimes;
use serde::Deserialize;

const BUILTIN: &str = include_str!("../scenario.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub engine:  EngineConfig,
    #[serde(default)]
    pub curve:   Option<ArrivalCurveConfig>,
    #[serde(default)]
    pub walking: Option<WalkingConfig>,
    pub flights: Vec<FlightEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FlightEntry {
    pub number:                 String,
    /// `HH:MM`, 24-hour clock.
    pub departure:              String,
    pub seats:                  u32,
    #[serde(default = "full")]
    pub fill:                   f64,
    #[serde(default)]
    pub boarding_close_minutes: Option<u32>,
}

fn full() -> f64 {
    1.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct WalkingConfig {
    pub ticket_to_checkpoint_m: Vec<Vec<f64>>,
    pub checkpoint_to_hold_m:   Vec<Vec<f64>>,
    #[serde(default)]
    pub speed_mps:              Option<f64>,
    #[serde(default)]
    pub min_minutes:            u32,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing scenario {}", path.display()))
    }

    /// The morning bank shipped next to this crate.
    pub fn builtin() -> Result<Self> {
        toml::from_str(BUILTIN).context("parsing built-in scenario")
    }

    pub fn flights(&self) -> Result<Vec<Flight>> {
        self.flights
            .iter()
            .map(|f| {
                let departure = parse_clock(&f.departure)
                    .with_context(|| format!("flight {}: bad departure time", f.number))?;
                let flight = Flight::new(f.number.as_str(), departure, f.seats, f.fill)?;
                Ok(match f.boarding_close_minutes {
                    Some(close) => flight.with_boarding_close(close),
                    None => flight,
                })
            })
            .collect()
    }

    pub fn build(&self) -> Result<Engine> {
        let mut builder = EngineBuilder::new(self.engine.clone(), self.flights()?);
        if let Some(curve) = &self.curve {
            builder = builder.arrival_curve(curve.clone());
        }
        if let Some(walking) = &self.walking {
            let mut provider = WalkingTravelTimes::new(
                walking.ticket_to_checkpoint_m.clone(),
                walking.checkpoint_to_hold_m.clone(),
            )
            .context("walking distances")?
            .with_min_minutes(walking.min_minutes);
            if let Some(speed) = walking.speed_mps {
                provider = provider.with_walk_speed(speed);
            }
            builder = builder.travel_time_provider(provider);
        }
        Ok(builder.build())
    }
}
