//! Unit and scenario tests for pax-sim.

#[cfg(test)]
mod helpers {
    use pax_core::{ArrivalCurveConfig, EngineConfig, Flight, Interval, ServerConfig};

    use crate::{Engine, EngineBuilder};

    pub fn flight(number: &str, departure_minute: u32, seats: u32) -> Flight {
        Flight::new(number, departure_minute, seats, 1.0).unwrap()
    }

    /// 5 passengers a minute for the first 20 minutes of the span.
    pub fn five_per_minute(_: &Flight, _: u32, _: &ArrivalCurveConfig, span: u32) -> Vec<u32> {
        (0..span).map(|m| if m < 20 { 5 } else { 0 }).collect()
    }

    /// Everybody in the first minute of the span.
    pub fn all_at_once(_: &Flight, total: u32, _: &ArrivalCurveConfig, span: u32) -> Vec<u32> {
        let mut v = vec![0; span as usize];
        if let Some(first) = v.first_mut() {
            *first = total;
        }
        v
    }

    pub fn base_config() -> EngineConfig {
        EngineConfig {
            percent_in_person:     1.0,
            ticket_counters:       vec![ServerConfig::ticket_counter(1, 5.0)],
            checkpoints:           vec![ServerConfig::checkpoint(1, 300.0)],
            arrival_span_minutes:  60,
            interval_minutes:      1,
            transit_delay_minutes: 1,
            hold_delay_minutes:    1,
            hold_rooms:            Vec::new(),
            seed:                  7,
        }
    }

    /// One flight departing at minute 600 (relative minute 60), closing at
    /// relative minute 40, 100 passengers at 5/min over minutes 0–19.
    pub fn scenario(checkpoint_per_hour: f64) -> Engine {
        let config = EngineConfig {
            checkpoints: vec![ServerConfig::checkpoint(1, checkpoint_per_hour)],
            ..base_config()
        };
        EngineBuilder::new(config, vec![flight("UA1", 600, 100)])
            .arrival_model(five_per_minute)
            .build()
    }

    pub fn step_to(engine: &mut Engine, target: u32) {
        while engine.current_interval() < Interval(target) {
            assert!(engine.compute_next_interval());
        }
    }
}

#[cfg(test)]
mod stage {
    use pax_core::{FlightId, Interval, PassengerStore};

    use crate::ServiceStage;

    fn filled(n: usize) -> (ServiceStage, PassengerStore) {
        let mut store = PassengerStore::new();
        let mut stage = ServiceStage::new(1);
        for _ in 0..n {
            let p = store.spawn(FlightId(0), Interval(0), true);
            stage.enqueue(0, p);
        }
        (stage, store)
    }

    #[test]
    fn fractional_rate_carries_over() {
        let (mut stage, store) = filled(20);
        let mut served = 0;
        for _ in 0..10 {
            served += stage.serve(0, 0.75, &store).len();
            let p = stage.progress()[0];
            assert!((0.0..1.0).contains(&p), "progress {p}");
        }
        // 10 × 0.75 = 7.5 → 7 whole services.
        assert_eq!(served, 7);
        assert_eq!(stage.progress()[0], 0.5);
    }

    #[test]
    fn missed_head_is_dropped_not_served() {
        let (mut stage, mut store) = filled(3);
        let first = stage.queues()[0][0];
        store.get_mut(first).mark_missed();

        let served = stage.serve(0, 1.0, &store);
        assert_eq!(served.len(), 1);
        assert_ne!(served[0], first);
        assert_eq!(stage.queues()[0].len(), 1);
        assert_eq!(stage.serving()[0], Some(served[0]));
        assert_eq!(stage.staging()[0], served);
    }

    #[test]
    fn idle_capacity_is_not_banked() {
        let (mut stage, store) = filled(0);
        assert!(stage.serve(0, 2.0, &store).is_empty());
        assert_eq!(stage.progress()[0], 0.0);
    }

    #[test]
    fn shortest_queue_prefers_lowest_index() {
        let mut store = PassengerStore::new();
        let mut stage = ServiceStage::new(3);
        let p = store.spawn(FlightId(0), Interval(0), true);
        stage.enqueue(0, p);
        assert_eq!(stage.shortest_queue(&[0, 1, 2]), Some(1));
        assert_eq!(stage.shortest_queue(&[0]), Some(0));
        assert_eq!(stage.shortest_queue(&[]), None);
    }

    #[test]
    fn purge_clears_every_container() {
        let (mut stage, mut store) = filled(3);
        let served = stage.serve(0, 1.0, &store);
        for p in store.iter().map(|p| p.id).collect::<Vec<_>>() {
            store.get_mut(p).mark_missed();
        }
        assert_eq!(stage.purge_missed(&store), 2);
        assert!(stage.queues()[0].is_empty());
        assert!(stage.staging()[0].is_empty());
        assert_eq!(stage.serving()[0], None);
        assert_eq!(served.len(), 1);
    }
}

#[cfg(test)]
mod pending {
    use pax_core::{Interval, PassengerId};

    use crate::PendingTransit;

    #[test]
    fn push_and_drain() {
        let mut pt = PendingTransit::new();
        pt.push(Interval(3), PassengerId(0));
        pt.push(Interval(3), PassengerId(1));
        pt.push(Interval(5), PassengerId(2));
        assert_eq!(pt.len(), 3);
        assert_eq!(pt.interval_count(), 2);
        assert_eq!(pt.drain(Interval(3)), vec![PassengerId(0), PassengerId(1)]);
        assert!(pt.drain(Interval(4)).is_empty());
        assert_eq!(pt.len(), 1);
    }

    #[test]
    fn remove_where_prunes_empty_intervals() {
        let mut pt = PendingTransit::new();
        pt.push(Interval(1), PassengerId(0));
        pt.push(Interval(2), PassengerId(1));
        pt.push(Interval(2), PassengerId(2));
        let removed = pt.remove_where(|p| p.0 < 2);
        assert_eq!(removed, vec![PassengerId(0), PassengerId(1)]);
        assert_eq!(pt.interval_count(), 1);
        assert_eq!(pt.len(), 1);
        assert_eq!(pt.iter().next(), Some((Interval(2), &[PassengerId(2)][..])));
    }
}

#[cfg(test)]
mod timeline {
    use pax_core::{FlightId, Interval, IntervalLength};

    use super::helpers::flight;
    use crate::{BoardingCloseMonitor, Timeline};

    #[test]
    fn offsets_from_global_start() {
        let flights = vec![flight("A", 600, 10), flight("B", 660, 10).with_boarding_close(30)];
        let t = Timeline::new(&flights, 60, IntervalLength::new(1));
        assert_eq!(t.global_start_minute(), 540);
        assert_eq!(t.window_start_offset(FlightId(1)), 60);
        assert_eq!(t.close_interval(FlightId(0)), Interval(40));
        assert_eq!(t.close_interval(FlightId(1)), Interval(90));
        assert_eq!(t.departure_interval(FlightId(1)), Interval(120));
        assert_eq!(t.total_intervals(), 121);
    }

    #[test]
    fn longer_intervals_round_down_to_containing_interval() {
        let flights = vec![flight("A", 600, 10)];
        let t = Timeline::new(&flights, 60, IntervalLength::new(7));
        assert_eq!(t.close_interval(FlightId(0)), Interval(5)); // minute 40
        assert_eq!(t.departure_interval(FlightId(0)), Interval(8)); // minute 60
        assert_eq!(t.total_intervals(), 9);
    }

    #[test]
    fn no_flights_is_one_interval() {
        let t = Timeline::new(&[], 60, IntervalLength::new(1));
        assert_eq!(t.total_intervals(), 1);
    }

    #[test]
    fn monitor_fires_once_per_flight() {
        let flights = vec![flight("A", 600, 10), flight("B", 600, 10)];
        let t = Timeline::new(&flights, 60, IntervalLength::new(1));
        let m = BoardingCloseMonitor::new(&t);
        assert_eq!(m.closing_at(Interval(40)), &[FlightId(0), FlightId(1)]);
        assert!(m.closing_at(Interval(41)).is_empty());
        assert_eq!(m.departing_at(Interval(60)).len(), 2);
    }
}

#[cfg(test)]
mod hold {
    use pax_core::{FlightId, HoldRoomConfig, SimRng};

    use super::helpers::flight;
    use crate::HoldRoomAssignment;

    #[test]
    fn default_rooms_are_one_per_flight() {
        let flights = vec![flight("A", 600, 10), flight("B", 620, 10)];
        let h = HoldRoomAssignment::assign(&flights, Vec::new(), 3, &mut SimRng::new(0));
        assert_eq!(h.room_count(), 2);
        assert_eq!(h.room_for(FlightId(0)), 0);
        assert_eq!(h.room_for(FlightId(1)), 1);
        assert_eq!(h.walk_seconds(1), 180);
        assert_eq!(h.rooms()[1].allowed_flights, vec!["B".to_owned()]);
    }

    #[test]
    fn nearest_accepting_room_wins() {
        let flights = vec![flight("A", 600, 10)];
        let rooms = vec![
            HoldRoomConfig::new(1).with_walk_seconds(30).with_allowed_flights(["Z"]),
            HoldRoomConfig::new(2).with_walk_seconds(300),
            HoldRoomConfig::new(3).with_walk_seconds(120).with_allowed_flights(["A"]),
        ];
        let h = HoldRoomAssignment::assign(&flights, rooms, 1, &mut SimRng::new(0));
        assert_eq!(h.room_for(FlightId(0)), 2);
    }

    #[test]
    fn no_accepting_room_falls_back() {
        let flights = vec![flight("A", 600, 10)];
        let rooms = vec![HoldRoomConfig::new(1).with_allowed_flights(["Z"])];
        let h = HoldRoomAssignment::assign(&flights, rooms, 1, &mut SimRng::new(0));
        assert_eq!(h.room_for(FlightId(0)), 0);
    }

    #[test]
    fn ties_follow_the_seed() {
        let flights = vec![flight("A", 600, 10)];
        let rooms = || vec![HoldRoomConfig::new(1).with_walk_seconds(60), HoldRoomConfig::new(2).with_walk_seconds(60)];
        let pick = |seed| HoldRoomAssignment::assign(&flights, rooms(), 1, &mut SimRng::new(seed)).room_for(FlightId(0));

        assert_eq!(pick(11), pick(11));
        let picks: Vec<usize> = (0..32).map(pick).collect();
        assert!(picks.contains(&0) && picks.contains(&1), "{picks:?}");
    }
}

#[cfg(test)]
mod snapshot {
    use pax_core::{FlightId, Interval};

    use crate::{EngineState, SnapshotManager};

    fn at(i: u32) -> EngineState {
        let mut s = EngineState::initial(1, 1, 1, 1);
        s.interval = Interval(i);
        s.passengers.spawn(FlightId(0), Interval(i), true);
        s
    }

    #[test]
    fn record_overwrites_the_future() {
        let mut snaps = SnapshotManager::new(&at(0));
        for i in 1..=5 {
            snaps.record(&at(i));
        }
        assert_eq!(snaps.max_computed(), Interval(5));

        snaps.record(&at(3));
        assert_eq!(snaps.max_computed(), Interval(3));
        assert_eq!(snaps.len(), 4);
    }

    #[test]
    fn restore_clamps_and_copies() {
        let mut snaps = SnapshotManager::new(&at(0));
        snaps.record(&at(1));
        snaps.record(&at(2));

        let mut live = at(0);
        assert_eq!(snaps.restore_into(Interval(9), &mut live), Interval(2));
        assert_eq!(&live, snaps.get(Interval(2)).unwrap());

        // Mutating the live state leaves the stored copy alone.
        live.passengers.spawn(FlightId(0), Interval(2), false);
        assert_eq!(snaps.get(Interval(2)).unwrap().passengers().len(), 1);
    }

    #[test]
    fn truncate_keeps_the_prefix() {
        let mut snaps = SnapshotManager::new(&at(0));
        for i in 1..=4 {
            snaps.record(&at(i));
        }
        snaps.truncate_after(Interval(1));
        assert_eq!(snaps.max_computed(), Interval(1));
        assert!(snaps.get(Interval(2)).is_none());
    }
}

#[cfg(test)]
mod scenarios {
    use pax_core::{FlightId, Interval};

    use super::helpers::{scenario, step_to};

    #[test]
    fn ample_capacity_gets_everyone_aboard() {
        let mut engine = scenario(300.0);
        assert_eq!(engine.total_intervals(), 61);

        step_to(&mut engine, 22);
        assert_eq!(engine.metrics_at(Interval(21)).unwrap().hold_room_total, 95);
        assert_eq!(engine.metrics_at(Interval(22)).unwrap().hold_room_total, 100);
        assert_eq!(engine.census(FlightId(0)).missed, 0);

        engine.run_all_intervals();
        assert_eq!(engine.current_interval(), Interval(61));
        let census = engine.census(FlightId(0));
        assert_eq!(census.arrived, 100);
        assert_eq!(census.boarded, 100);
        assert_eq!(census.missed, 0);
        assert_eq!(engine.metrics_at(Interval(61)).unwrap().hold_room_total, 0);
    }

    #[test]
    fn slow_checkpoint_strands_passengers() {
        let mut engine = scenario(60.0);

        step_to(&mut engine, 20);
        let m10 = *engine.metrics_at(Interval(10)).unwrap();
        let m20 = *engine.metrics_at(Interval(20)).unwrap();
        assert_eq!(m10.checkpoint_queued, 36);
        assert_eq!(m20.checkpoint_queued, 76);
        assert_eq!(m20.held_ups, m20.ticket_queued + m20.checkpoint_queued);

        step_to(&mut engine, 41);
        assert_eq!(engine.flights_just_closed(), &[FlightId(0)]);
        assert!(engine.pending_to_hold().is_empty());
        assert_eq!(engine.metrics_at(Interval(41)).unwrap().checkpoint_queued, 0);

        engine.run_all_intervals();
        let census = engine.census(FlightId(0));
        assert_eq!(census.boarded, 38);
        assert_eq!(census.missed, 62);
    }

    #[test]
    fn hold_room_order_and_room_are_recorded() {
        let mut engine = scenario(300.0);
        step_to(&mut engine, 3);
        let room = engine.chosen_hold_room(FlightId(0));
        let first = engine.hold_rooms()[room][0];
        let p = engine.passenger(first);
        assert_eq!(p.hold_room_sequence, Some(1));
        assert_eq!(p.hold_room(), Some(room));
        assert_eq!(p.hold_room_entered, Some(Interval(2)));
        assert_eq!(p.checkpoint_completed, Some(Interval(1)));
        assert_eq!(p.ticket_completed, Some(Interval(0)));
    }
}

#[cfg(test)]
mod close_sweep {
    use pax_core::{EngineConfig, FlightId, ServerConfig};

    use super::helpers::{base_config, five_per_minute, flight, step_to};
    use crate::{Engine, EngineBuilder};

    /// Ticket counter at 1/min and a 5-minute walk to a fast checkpoint: at
    /// the close (interval 40) passengers sit in every pre-hold container.
    fn slow_ticketing() -> Engine {
        let config = EngineConfig {
            ticket_counters:       vec![ServerConfig::ticket_counter(1, 1.0)],
            checkpoints:           vec![ServerConfig::checkpoint(1, 6000.0)],
            transit_delay_minutes: 5,
            ..base_config()
        };
        EngineBuilder::new(config, vec![flight("UA1", 600, 100)])
            .arrival_model(five_per_minute)
            .build()
    }

    #[test]
    fn every_container_is_populated_before_close() {
        let mut engine = slow_ticketing();
        step_to(&mut engine, 40);
        assert_eq!(engine.ticket_queues()[0].len(), 60);
        assert_eq!(engine.ticket_staging()[0].len(), 5);
        assert_eq!(engine.pending_to_checkpoint().interval_count(), 5);
        assert_eq!(engine.pending_to_hold().len(), 1);
        assert_eq!(engine.census(FlightId(0)).in_hold_room, 34);
    }

    #[test]
    fn close_marks_ticket_side_passengers_missed() {
        let mut engine = slow_ticketing();
        step_to(&mut engine, 41);

        let census = engine.census(FlightId(0));
        assert_eq!(census.in_hold_room, 34);
        assert_eq!(census.missed, 66);
        assert!(census.is_conserved());

        assert_eq!(engine.pending_to_checkpoint().interval_count(), 0);
        assert!(engine.pending_to_checkpoint().is_empty());
        assert!(engine.pending_to_hold().is_empty());
        assert!(engine.ticket_queues().iter().all(|q| q.is_empty()));
        assert!(engine.ticket_staging().iter().all(|s| s.is_empty()));
        assert!(engine.ticket_serving().iter().all(Option::is_none));
        assert!(engine.checkpoint_staging().iter().all(|s| s.is_empty()));

        let missed = engine.passengers().iter().filter(|p| p.is_missed()).count();
        assert_eq!(missed, 66);
        assert!(engine.passengers().iter().filter(|p| p.is_missed()).all(|p| p.hold_room_entered.is_none()));
    }
}

#[cfg(test)]
mod invariants {
    use pax_core::{FlightId, Interval};

    use super::helpers::scenario;

    #[test]
    fn census_is_conserved_every_interval() {
        for rate in [300.0, 60.0, 0.0] {
            let mut engine = scenario(rate);
            loop {
                let census = engine.census(FlightId(0));
                assert!(census.is_conserved(), "rate {rate} at {}: {census:?}", engine.current_interval());
                if !engine.compute_next_interval() {
                    break;
                }
            }
        }
    }

    #[test]
    fn missed_passengers_leave_every_container() {
        let mut engine = scenario(60.0);
        while engine.compute_next_interval() {
            let store = engine.passengers();
            let live = engine
                .ticket_queues()
                .iter()
                .flatten()
                .chain(engine.checkpoint_queues().iter().flatten())
                .chain(engine.ticket_staging().iter().flatten())
                .chain(engine.checkpoint_staging().iter().flatten())
                .chain(engine.hold_rooms().iter().flatten())
                .copied()
                .chain(engine.pending_to_checkpoint().passengers())
                .chain(engine.pending_to_hold().passengers());
            for p in live {
                assert!(!store.is_missed(p), "{p} still live at {}", engine.current_interval());
            }
        }
        assert!(engine.passengers().iter().filter(|p| p.is_missed()).count() > 0);
        assert_eq!(engine.current_interval(), Interval(engine.total_intervals()));
    }

    #[test]
    fn progress_stays_below_one() {
        let mut engine = scenario(97.0);
        while engine.compute_next_interval() {
            for &p in engine.state().checkpoint().progress() {
                assert!((0.0..1.0).contains(&p));
            }
        }
    }
}

#[cfg(test)]
mod navigation {
    use pax_core::Interval;

    use super::helpers::{scenario, step_to};

    #[test]
    fn go_to_is_idempotent() {
        let mut engine = scenario(60.0);
        step_to(&mut engine, 30);

        engine.go_to_interval(Interval(12));
        let first = engine.state().clone();
        engine.go_to_interval(Interval(12));
        assert_eq!(engine.state(), &first);
        assert_eq!(engine.max_computed_interval(), Interval(30));
        assert_eq!(engine.metrics().len(), 13);
    }

    #[test]
    fn restore_matches_original_state() {
        let mut engine = scenario(60.0);
        step_to(&mut engine, 15);
        let at_15 = engine.state().clone();
        step_to(&mut engine, 25);
        engine.go_to_interval(Interval(15));
        assert_eq!(engine.state(), &at_15);
    }

    #[test]
    fn out_of_range_targets_are_clamped() {
        let mut engine = scenario(60.0);
        step_to(&mut engine, 10);
        assert_eq!(engine.go_to_interval(Interval(1_000)), Interval(10));
        assert_eq!(engine.go_to_interval(Interval::ZERO), Interval::ZERO);
        assert!(!engine.can_rewind());
        assert!(!engine.rewind_one_interval());
    }

    #[test]
    fn rewind_and_fast_forward() {
        let mut engine = scenario(60.0);
        step_to(&mut engine, 5);
        assert!(engine.rewind_one_interval());
        assert_eq!(engine.current_interval(), Interval(4));
        assert!(engine.can_fast_forward());
        assert!(engine.fast_forward_one_interval());
        assert_eq!(engine.current_interval(), Interval(5));
        // Nothing restorable ahead: computes instead.
        assert!(!engine.can_fast_forward());
        assert!(engine.fast_forward_one_interval());
        assert_eq!(engine.max_computed_interval(), Interval(6));
    }

    #[test]
    fn simulating_from_the_past_discards_the_future() {
        let mut engine = scenario(60.0);
        step_to(&mut engine, 10);
        engine.go_to_interval(Interval(5));
        assert!(engine.simulate_interval());
        assert_eq!(engine.current_interval(), Interval(6));
        assert_eq!(engine.max_computed_interval(), Interval(6));
        assert_eq!(engine.metrics().len(), 7);
        assert_eq!(engine.arrival_history().len(), 6);
    }

    #[test]
    fn stepping_stops_at_the_end() {
        let mut engine = scenario(300.0);
        engine.run_all_intervals();
        assert!(!engine.compute_next_interval());
        assert!(!engine.simulate_interval());
        assert!(!engine.fast_forward_one_interval());
        assert_eq!(engine.max_computed_interval(), Interval(engine.total_intervals()));
    }

    #[test]
    fn run_all_matches_incremental_steps() {
        let mut batch = scenario(60.0);
        batch.run_all_intervals();

        let mut stepped = scenario(60.0);
        while stepped.compute_next_interval() {}

        assert_eq!(batch.metrics(), stepped.metrics());
        assert_eq!(batch.arrival_history(), stepped.arrival_history());
        assert_eq!(batch.state(), stepped.state());
    }

    #[test]
    fn run_all_resets_first() {
        let mut engine = scenario(60.0);
        step_to(&mut engine, 20);
        engine.go_to_interval(Interval(3));
        engine.run_all_intervals();
        let mut fresh = scenario(60.0);
        fresh.run_all_intervals();
        assert_eq!(engine.metrics(), fresh.metrics());
    }
}

#[cfg(test)]
mod arrivals {
    use pax_core::{ArrivalCurveConfig, EngineConfig, Flight, FlightId, Interval, PassengerId};

    use super::helpers::{base_config, flight, step_to};
    use crate::{EngineBuilder, FlightThroughput};

    #[test]
    fn no_ticket_counters_sends_everyone_online() {
        let config = EngineConfig { ticket_counters: Vec::new(), ..base_config() };
        let mut engine = EngineBuilder::new(config, vec![flight("UA1", 600, 100)])
            .arrival_model(super::helpers::five_per_minute)
            .build();
        engine.simulate_interval();
        let row = engine.arrival_history()[0][0];
        assert_eq!(row.in_person, 0);
        assert_eq!(row.online, 5);
        let p = engine.passenger(PassengerId(0));
        assert!(!p.in_person);
        assert_eq!(p.checkpoint_entered, Some(Interval(0)));
        assert_eq!(p.ticket_completed, None);
    }

    #[test]
    fn split_rounds_in_person_share() {
        let config = EngineConfig { percent_in_person: 0.5, ..base_config() };
        let mut engine = EngineBuilder::new(config, vec![flight("UA1", 600, 100)])
            .arrival_model(super::helpers::five_per_minute)
            .build();
        engine.simulate_interval();
        let row = engine.arrival_history()[0][0];
        // round(5 × 0.5) = 3
        assert_eq!((row.in_person, row.online), (3, 2));
        assert_eq!(engine.total_arrivals_at_interval(Interval(0)), 5);
        assert_eq!(engine.total_arrivals_at_interval(Interval(9)), 0);
    }

    #[test]
    fn longer_intervals_sum_their_minutes() {
        let config = EngineConfig { interval_minutes: 5, ..base_config() };
        let mut engine = EngineBuilder::new(config, vec![flight("UA1", 600, 100)])
            .arrival_model(super::helpers::five_per_minute)
            .build();
        assert_eq!(engine.total_intervals(), 13);
        engine.simulate_interval();
        assert_eq!(engine.total_arrivals_at_interval(Interval(0)), 25);
    }

    #[test]
    fn model_output_is_clipped() {
        let greedy = |_: &Flight, _: u32, _: &ArrivalCurveConfig, _: u32| vec![40u32; 100];
        let engine = EngineBuilder::new(base_config(), vec![flight("UA1", 600, 100)])
            .arrival_model(greedy)
            .build();
        let table = engine.minute_arrivals(FlightId(0));
        assert_eq!(table.len(), 60);
        assert_eq!(&table[..4], &[40, 40, 20, 0]);
        assert_eq!(table.iter().sum::<u32>(), 100);
    }

    #[test]
    fn arrivals_after_close_are_missed_on_arrival() {
        let late = |_: &Flight, _: u32, _: &ArrivalCurveConfig, span: u32| {
            (0..span).map(|m| if m == 50 { 10 } else { 0 }).collect::<Vec<u32>>()
        };
        let mut engine = EngineBuilder::new(base_config(), vec![flight("UA1", 600, 100)])
            .arrival_model(late)
            .build();
        step_to(&mut engine, 51);
        let census = engine.census(FlightId(0));
        assert_eq!(census.arrived, 10);
        assert_eq!(census.missed, 10);
        assert!(census.is_conserved());
        assert!(engine.ticket_queues()[0].is_empty());
    }

    #[test]
    fn stage_throughput_is_recorded_per_flight() {
        let mut engine = super::helpers::scenario(300.0);
        engine.run_all_intervals();

        let history = engine.throughput_history();
        assert_eq!(history.len(), engine.total_intervals() as usize);
        assert_eq!(
            history[0][0],
            FlightThroughput { enqueued_ticket: 5, ticketed: 5, arrived_to_checkpoint: 0, passed_checkpoint: 0 }
        );
        assert_eq!(
            history[1][0],
            FlightThroughput { enqueued_ticket: 5, ticketed: 5, arrived_to_checkpoint: 5, passed_checkpoint: 5 }
        );
        let passed: u32 = history.iter().map(|row| row[0].passed_checkpoint).sum();
        assert_eq!(passed, 100);

        let lines = engine.checkpoint_arrival_history();
        assert!(lines[0][0].from_ticket.is_empty());
        assert_eq!(lines[1][0].from_ticket.len(), 5);
        assert_eq!(lines[1][0].total(), 5);
    }

    #[test]
    fn online_arrivals_are_recorded_per_checkpoint() {
        let config = EngineConfig { percent_in_person: 0.5, ..base_config() };
        let mut engine = EngineBuilder::new(config, vec![flight("UA1", 600, 100)])
            .arrival_model(super::helpers::five_per_minute)
            .build();
        engine.simulate_interval();
        let line = &engine.checkpoint_arrival_history()[0][0];
        assert_eq!(line.online.len(), 2);
        assert!(line.online.iter().all(|&p| !engine.passenger(p).in_person));
        assert_eq!(engine.throughput_history()[0][0].enqueued_ticket, 3);
        assert_eq!(engine.throughput_history()[0][0].arrived_to_checkpoint, 2);
    }

    #[test]
    fn arrivals_by_minute_come_from_the_tables() {
        let flights = vec![flight("UA1", 600, 100), flight("DL2", 610, 100)];
        let engine = EngineBuilder::new(base_config(), flights)
            .arrival_model(super::helpers::five_per_minute)
            .build();
        // DL2's window opens 10 minutes after the global start.
        assert_eq!(engine.total_arrivals_at_minute(0), 5);
        assert_eq!(engine.total_arrivals_at_minute(10), 10);
        assert_eq!(engine.total_arrivals_at_minute(25), 5);
        assert_eq!(engine.total_arrivals_at_minute(30), 0);
        assert_eq!(engine.total_arrivals_at_minute(10_000), 0);
    }

    #[test]
    fn curve_change_rebuilds_the_table() {
        let mut engine = EngineBuilder::new(base_config(), vec![flight("UA1", 600, 100)]).build();
        let legacy = engine.minute_arrivals(FlightId(0)).to_vec();
        engine.set_arrival_curve_config(ArrivalCurveConfig::curve_default());
        assert!(!engine.arrival_curve().legacy_mode);
        assert_ne!(engine.minute_arrivals(FlightId(0)), legacy.as_slice());
        assert_eq!(engine.minute_arrivals(FlightId(0)).iter().sum::<u32>(), 100);
    }
}

#[cfg(test)]
mod configuration {
    use pax_core::{ArrivalCurveConfig, EngineConfig, Flight, FlightId, Interval, ServerConfig};

    use super::helpers::{all_at_once, base_config, five_per_minute, flight, step_to};
    use crate::EngineBuilder;

    #[test]
    fn empty_checkpoint_list_gets_a_fallback() {
        let config = EngineConfig { checkpoints: Vec::new(), ..base_config() };
        let mut engine = EngineBuilder::new(config, vec![flight("UA1", 600, 100)])
            .arrival_model(five_per_minute)
            .build();
        assert_eq!(engine.config().checkpoints.len(), 1);
        engine.run_all_intervals();
        let census = engine.census(FlightId(0));
        assert_eq!(census.boarded, 0);
        assert_eq!(census.missed, 100);
    }

    #[test]
    fn percent_in_person_is_clamped() {
        let config = EngineConfig { percent_in_person: 1.7, ..base_config() };
        let engine = EngineBuilder::new(config, vec![flight("UA1", 600, 100)]).build();
        assert_eq!(engine.config().percent_in_person, 1.0);
    }

    #[test]
    fn negative_rates_serve_nobody() {
        let config = EngineConfig {
            ticket_counters: vec![ServerConfig::ticket_counter(1, -5.0)],
            ..base_config()
        };
        let mut engine = EngineBuilder::new(config, vec![flight("UA1", 600, 100)])
            .arrival_model(five_per_minute)
            .build();
        engine.simulate_interval();
        engine.simulate_interval();
        assert_eq!(engine.ticket_queues()[0].len(), 10);
    }

    fn allow_listed_checkpoints() -> EngineConfig {
        EngineConfig {
            checkpoints: vec![
                ServerConfig::checkpoint(1, 0.0).with_allowed_flights(["OTHER"]),
                ServerConfig::checkpoint(2, 0.0).with_allowed_flights(["UA1"]),
            ],
            ..base_config()
        }
    }

    #[test]
    fn online_passengers_spread_over_every_checkpoint() {
        let ten_now = |_: &Flight, _: u32, _: &ArrivalCurveConfig, span: u32| {
            (0..span).map(|m| if m == 0 { 10 } else { 0 }).collect::<Vec<u32>>()
        };
        let config = EngineConfig { ticket_counters: Vec::new(), ..allow_listed_checkpoints() };
        let mut engine = EngineBuilder::new(config, vec![flight("UA1", 600, 100)])
            .arrival_model(ten_now)
            .build();
        engine.simulate_interval();
        let lens: Vec<usize> = engine.checkpoint_queues().iter().map(|q| q.len()).collect();
        assert_eq!(lens, vec![5, 5]);
    }

    #[test]
    fn ticketed_passengers_ignore_checkpoint_allow_lists() {
        let config = EngineConfig {
            ticket_counters: vec![ServerConfig::ticket_counter(1, 100.0)],
            ..allow_listed_checkpoints()
        };
        let mut engine = EngineBuilder::new(config, vec![flight("UA1", 600, 10)])
            .arrival_model(all_at_once)
            .build();
        step_to(&mut engine, 2);
        // Lines are picked at ticket completion, before anyone has joined one.
        let lens: Vec<usize> = engine.checkpoint_queues().iter().map(|q| q.len()).collect();
        assert_eq!(lens, vec![10, 0]);
    }

    #[test]
    fn huge_delays_saturate_instead_of_wrapping() {
        let config = EngineConfig {
            transit_delay_minutes: u32::MAX,
            hold_delay_minutes:    u32::MAX,
            ..base_config()
        };
        let mut engine = EngineBuilder::new(config, vec![flight("UA1", 600, 100)])
            .arrival_model(five_per_minute)
            .build();
        engine.simulate_interval();
        let (at, _) = engine.pending_to_checkpoint().iter().next().unwrap();
        assert_eq!(at, Interval(u32::MAX));

        engine.run_all_intervals();
        let census = engine.census(FlightId(0));
        assert!(census.is_conserved());
        assert_eq!(census.missed, 100);
        assert!(engine.pending_to_checkpoint().is_empty());
    }

    #[test]
    fn same_seed_same_run() {
        let run = || {
            let mut e = EngineBuilder::new(base_config(), vec![flight("UA1", 600, 100)])
                .arrival_model(five_per_minute)
                .build();
            e.run_all_intervals();
            e.metrics().to_vec()
        };
        assert_eq!(run(), run());
    }
}

#[cfg(test)]
mod transit {
    use pax_core::{EngineConfig, Interval, ServerConfig};
    use pax_transit::TravelTimeMatrix;

    use super::helpers::{all_at_once, base_config, flight, step_to};
    use crate::EngineBuilder;

    fn config() -> EngineConfig {
        EngineConfig {
            interval_minutes: 2,
            ticket_counters: vec![ServerConfig::ticket_counter(1, 100.0)],
            checkpoints: vec![ServerConfig::checkpoint(1, 6000.0)],
            ..base_config()
        }
    }

    #[test]
    fn provider_minutes_become_whole_intervals() {
        let matrix = TravelTimeMatrix::new(vec![vec![3]], vec![vec![5]]).unwrap();
        let mut engine = EngineBuilder::new(config(), vec![flight("UA1", 600, 10)])
            .arrival_model(all_at_once)
            .travel_time_provider(matrix)
            .build();

        engine.simulate_interval();
        // 3 minutes at 2 minutes per interval → 2 intervals.
        let (at, who) = engine.pending_to_checkpoint().iter().next().unwrap();
        assert_eq!(at, Interval(2));
        assert_eq!(who.len(), 10);
        assert_eq!(engine.ticket_staging()[0].len(), 10);

        step_to(&mut engine, 3);
        assert!(engine.ticket_staging()[0].is_empty());
        // 5 minutes → 3 intervals after checkpoint service at interval 2.
        let (at, _) = engine.pending_to_hold().iter().next().unwrap();
        assert_eq!(at, Interval(5));
    }

    #[test]
    fn unknown_provider_answers_use_fixed_delays() {
        let matrix = TravelTimeMatrix::new(vec![vec![0]], vec![vec![-1]]).unwrap();
        let cfg = EngineConfig { transit_delay_minutes: 5, hold_delay_minutes: 1, ..config() };
        let mut engine = EngineBuilder::new(cfg, vec![flight("UA1", 600, 10)])
            .arrival_model(all_at_once)
            .travel_time_provider(matrix)
            .build();
        engine.simulate_interval();
        let (at, _) = engine.pending_to_checkpoint().iter().next().unwrap();
        assert_eq!(at, Interval(3));
    }

    #[test]
    fn provider_can_be_removed_mid_run() {
        let matrix = TravelTimeMatrix::new(vec![vec![9]], vec![vec![9]]).unwrap();
        let mut engine = EngineBuilder::new(config(), vec![flight("UA1", 600, 10)])
            .arrival_model(all_at_once)
            .travel_time_provider(matrix)
            .build();
        engine.set_travel_time_provider(None);
        engine.simulate_interval();
        let (at, _) = engine.pending_to_checkpoint().iter().next().unwrap();
        assert_eq!(at, Interval(1));
    }
}

#[cfg(test)]
mod observer {
    use pax_core::{Flight, Interval};

    use super::helpers::scenario;
    use crate::{CloseOutcome, EngineObserver, IntervalMetrics};

    #[derive(Default)]
    struct Recorder {
        intervals: u32,
        closes:    Vec<(String, Interval, CloseOutcome)>,
        ended_at:  Option<Interval>,
    }

    impl EngineObserver for Recorder {
        fn on_interval_end(&mut self, interval: Interval, metrics: &IntervalMetrics) {
            assert_eq!(metrics.interval, interval.next());
            self.intervals += 1;
        }

        fn on_boarding_closed(&mut self, flight: &Flight, interval: Interval, outcome: CloseOutcome) {
            self.closes.push((flight.number.clone(), interval, outcome));
        }

        fn on_run_end(&mut self, final_interval: Interval) {
            self.ended_at = Some(final_interval);
        }
    }

    #[test]
    fn hooks_fire_in_a_full_run() {
        let mut engine = scenario(60.0);
        let mut rec = Recorder::default();
        engine.run_all_intervals_with(&mut rec);

        assert_eq!(rec.intervals, engine.total_intervals());
        assert_eq!(rec.ended_at, Some(Interval(engine.total_intervals())));
        assert_eq!(rec.closes.len(), 1);
        let (number, at, outcome) = &rec.closes[0];
        assert_eq!(number, "UA1");
        assert_eq!(*at, Interval(40));
        assert_eq!(*outcome, CloseOutcome { safe: 38, missed: 62 });
    }
}
