//! terminal — runs a morning of departures through the passenger-flow engine
//! and reports what happened to each flight.
//!
//! ```text
//! cargo run -p terminal                                  # built-in scenario
//! cargo run -p terminal -- --config my.toml --every 5
//! RUST_LOG=debug cargo run -p terminal -- --inspect 90   # closes, departures
//! ```

mod scenario;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use pax_core::{Flight, FlightId, Interval};
use pax_sim::{CloseOutcome, Engine, EngineObserver, IntervalMetrics};
use tracing::info;
use tracing_subscriber::EnvFilter;

use scenario::Scenario;

/// Terminal passenger-flow demo
#[derive(Parser, Debug)]
#[command(name = "terminal", version, about)]
struct Args {
    /// TOML scenario file; the built-in scenario runs when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the scenario's RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Print queue totals every N intervals (0 = never)
    #[arg(long, default_value_t = 15)]
    every: u32,

    /// After the run, rewind to this interval and print the state there
    #[arg(long)]
    inspect: Option<u32>,
}

// ── Observer ──────────────────────────────────────────────────────────────────

struct Progress {
    every:     u32,
    peak:      usize,
    peak_at:   Interval,
    intervals: u32,
}

impl EngineObserver for Progress {
    fn on_interval_end(&mut self, interval: Interval, metrics: &IntervalMetrics) {
        self.intervals += 1;
        if metrics.held_ups > self.peak {
            self.peak = metrics.held_ups;
            self.peak_at = metrics.interval;
        }
        if self.every > 0 && interval.0 % self.every == 0 {
            println!(
                "  {:>5}  ticket {:>4}  checkpoint {:>4}  hold {:>4}",
                metrics.interval.0, metrics.ticket_queued, metrics.checkpoint_queued, metrics.hold_room_total,
            );
        }
    }

    fn on_boarding_closed(&mut self, flight: &Flight, interval: Interval, outcome: CloseOutcome) {
        println!(
            "  {:>5}  boarding closed for {}: {} in the hold room, {} missed",
            interval.0, flight.number, outcome.safe, outcome.missed,
        );
    }
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    let args = Args::parse();
    let mut scenario = match &args.config {
        Some(path) => Scenario::load(path)?,
        None => Scenario::builtin()?,
    };
    if let Some(seed) = args.seed {
        scenario.engine.seed = seed;
    }

    let mut engine = scenario.build()?;
    info!(
        flights = engine.flights().len(),
        total_intervals = engine.total_intervals(),
        interval_minutes = engine.interval_length().minutes(),
        "scenario loaded"
    );

    let mut progress = Progress { every: args.every, peak: 0, peak_at: Interval::ZERO, intervals: 0 };
    let t0 = Instant::now();
    engine.run_all_intervals_with(&mut progress);
    let elapsed = t0.elapsed();

    print_summary(&engine);
    println!(
        "\npeak held-ups {} at interval {}; {} intervals in {:.2?}",
        progress.peak, progress.peak_at, progress.intervals, elapsed,
    );

    if let Some(target) = args.inspect {
        let at = engine.go_to_interval(Interval(target));
        print_state(&engine, at);
    }
    Ok(())
}

fn print_summary(engine: &Engine) {
    println!("\n{:<8} {:>5} {:>6} {:>8} {:>6} {:>7} {:>7}", "flight", "dep", "gate", "arrived", "online", "boarded", "missed");
    for (i, flight) in engine.flights().iter().enumerate() {
        let id = FlightId(i as u32);
        let census = engine.census(id);
        let tally = engine.state().tally(id);
        let room = engine.chosen_hold_room(id);
        println!(
            "{:<8} {:>5} {:>6} {:>8} {:>6} {:>7} {:>7}",
            flight.number,
            clock(flight.departure_minute),
            engine.hold_room_configs()[room].id,
            census.arrived,
            tally.online,
            census.boarded,
            census.missed,
        );
    }
}

fn print_state(engine: &Engine, at: Interval) {
    let minute = engine.timeline().global_start_minute() + i64::from(at.0 * engine.interval_length().minutes());
    println!("\nstate at interval {at} ({})", clock(minute.max(0) as u32));
    for (i, q) in engine.ticket_queues().iter().enumerate() {
        println!("  ticket counter {i}: {} waiting", q.len());
    }
    for (i, q) in engine.checkpoint_queues().iter().enumerate() {
        println!("  checkpoint {i}: {} waiting", q.len());
    }
    for (room, cfg) in engine.hold_rooms().iter().zip(engine.hold_room_configs()) {
        println!("  hold room {}: {} seated", cfg.id, room.len());
    }
    println!(
        "  walking: {} to checkpoints, {} to hold rooms",
        engine.pending_to_checkpoint().len(),
        engine.pending_to_hold().len(),
    );
}

fn clock(minute: u32) -> String {
    format!("{:02}:{:02}", (minute / 60) % 24, minute % 60)
}
