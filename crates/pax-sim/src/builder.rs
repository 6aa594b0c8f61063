//! Fluent builder for constructing an [`Engine`].

use pax_arrivals::{ArrivalModel, CurveArrivals};
use pax_core::{ArrivalCurveConfig, EngineConfig, Flight, ServerConfig, SimRng};
use pax_transit::{TransitRouter, TravelTimeProvider};
use tracing::{info, warn};

use crate::arrivals::ArrivalTable;
use crate::engine::measure;
use crate::{
    BoardingCloseMonitor, Engine, EngineState, HoldRoomAssignment, MetricsLog, SnapshotManager,
    Timeline,
};

/// Fluent builder for [`Engine`].
///
/// # Required inputs
///
/// - [`EngineConfig`] — servers, rates, span, interval length, delays, seed
/// - the flight list
///
/// # Optional inputs (have defaults)
///
/// | Method                       | Default                              |
/// |------------------------------|--------------------------------------|
/// | `.arrival_model(m)`          | [`CurveArrivals`]                    |
/// | `.arrival_curve(c)`          | `ArrivalCurveConfig::legacy_default()` |
/// | `.travel_time_provider(p)`   | none (fixed delays)                  |
///
/// # Normalisation
///
/// `build` never fails.  Out-of-range configuration is clamped and logged at
/// `warn`: an empty checkpoint list gets one zero-rate checkpoint, a
/// percent-in-person outside `[0, 1]` is clamped, negative or non-finite rates
/// serve nobody, and a zero interval length becomes one minute.
///
/// # Example
///
/// ```rust,ignore
/// let mut engine = EngineBuilder::new(config, flights)
///     .arrival_curve(ArrivalCurveConfig::curve_default())
///     .travel_time_provider(matrix)
///     .build();
/// engine.run_all_intervals();
/// ```
pub struct EngineBuilder {
    config:        EngineConfig,
    flights:       Vec<Flight>,
    arrival_model: Option<Box<dyn ArrivalModel>>,
    curve:         ArrivalCurveConfig,
    provider:      Option<Box<dyn TravelTimeProvider>>,
}

impl EngineBuilder {
    pub fn new(config: EngineConfig, flights: Vec<Flight>) -> Self {
        Self {
            config,
            flights,
            arrival_model: None,
            curve:         ArrivalCurveConfig::legacy_default(),
            provider:      None,
        }
    }

    pub fn arrival_model<M: ArrivalModel>(mut self, model: M) -> Self {
        self.arrival_model = Some(Box::new(model));
        self
    }

    pub fn arrival_curve(mut self, curve: ArrivalCurveConfig) -> Self {
        self.curve = curve;
        self
    }

    pub fn travel_time_provider<P: TravelTimeProvider + 'static>(mut self, provider: P) -> Self {
        self.provider = Some(Box::new(provider));
        self
    }

    /// Normalise the configuration, bind flights to hold rooms, build the
    /// arrival tables and capture the interval-0 snapshot.
    pub fn build(self) -> Engine {
        let flights = self.flights;
        let mut config = normalize(self.config);
        let length = config.interval_length();
        let span = config.arrival_span_minutes;

        // ── Servers ───────────────────────────────────────────────────────
        let ticket_rates = rates(&config.ticket_counters, length, "ticket counter");
        let checkpoint_rates = rates(&config.checkpoints, length, "checkpoint");
        let ticket_lines = eligible(&flights, &config.ticket_counters);
        if config.checkpoints.iter().any(|c| !c.accepts_all()) {
            warn!("checkpoint allow-lists are ignored; every checkpoint serves every flight");
        }

        // ── Schedule and hold rooms ───────────────────────────────────────
        let timeline = Timeline::new(&flights, span, length);
        let monitor = BoardingCloseMonitor::new(&timeline);
        let mut rng = SimRng::new(config.seed);
        let hold = HoldRoomAssignment::assign(
            &flights,
            std::mem::take(&mut config.hold_rooms),
            config.hold_delay_minutes,
            &mut rng,
        );
        config.hold_rooms = hold.rooms().to_vec();

        let mut router =
            TransitRouter::new(length, config.transit_delay_minutes, config.hold_delay_minutes);
        if let Some(provider) = self.provider {
            router = router.with_provider(provider);
        }

        // ── Arrivals ──────────────────────────────────────────────────────
        let arrival_model = self.arrival_model.unwrap_or_else(|| Box::new(CurveArrivals::new()));
        let curve = self.curve.validated();
        let arrivals = ArrivalTable::build(&flights, arrival_model.as_ref(), &curve, span);

        // ── Interval 0 ────────────────────────────────────────────────────
        let state = EngineState::initial(
            ticket_rates.len(),
            checkpoint_rates.len(),
            hold.room_count(),
            flights.len(),
        );
        let snapshots = SnapshotManager::new(&state);
        let metrics = MetricsLog::new(measure(&state));

        info!(
            flights = flights.len(),
            ticket_counters = ticket_rates.len(),
            checkpoints = checkpoint_rates.len(),
            hold_rooms = hold.room_count(),
            travel_times = router.has_provider(),
            interval_minutes = length.minutes(),
            total_intervals = timeline.total_intervals(),
            "engine built"
        );

        Engine {
            percent_in_person: config.percent_in_person,
            flights,
            config,
            ticket_rates,
            checkpoint_rates,
            ticket_lines,
            timeline,
            monitor,
            hold,
            router,
            arrival_model,
            curve,
            arrivals,
            state,
            snapshots,
            metrics,
        }
    }
}

fn normalize(mut config: EngineConfig) -> EngineConfig {
    if config.interval_minutes == 0 {
        warn!("interval length of 0 minutes; using 1");
        config.interval_minutes = 1;
    }

    let pct = config.percent_in_person;
    let clamped = if pct.is_finite() { pct.clamp(0.0, 1.0) } else { 0.0 };
    if clamped != pct {
        warn!(percent_in_person = pct, clamped, "percent in person outside [0, 1]");
        config.percent_in_person = clamped;
    }

    if config.checkpoints.is_empty() {
        warn!("no checkpoints configured; adding a fallback checkpoint with rate 0");
        config.checkpoints.push(ServerConfig::checkpoint(1, 0.0));
    }
    config
}

/// Per-interval rate of each server, logging any that had to be clamped.
fn rates(servers: &[ServerConfig], length: pax_core::IntervalLength, kind: &str) -> Vec<f64> {
    servers
        .iter()
        .map(|s| {
            if s.rate.is_degenerate() {
                warn!(kind, id = s.id, rate = ?s.rate, "negative or non-finite service rate; using 0");
            }
            s.rate.per_interval(length)
        })
        .collect()
}

/// For each flight, the ticket counters that accept it; all counters if none
/// do.
fn eligible(flights: &[Flight], servers: &[ServerConfig]) -> Vec<Vec<usize>> {
    flights
        .iter()
        .map(|f| {
            let accepting: Vec<usize> = (0..servers.len()).filter(|&s| servers[s].accepts(f)).collect();
            if accepting.is_empty() { (0..servers.len()).collect() } else { accepting }
        })
        .collect()
}
