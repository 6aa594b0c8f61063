//! Unit tests for pax-transit.

#[cfg(test)]
mod matrix {
    use crate::{TransitError, TravelTimeMatrix, TravelTimeProvider};

    #[test]
    fn lookup_and_out_of_range() {
        let m = TravelTimeMatrix::new(vec![vec![3, 0]], vec![vec![4], vec![-1]]).unwrap();
        assert_eq!(m.minutes_ticket_to_checkpoint(0, 0), 3);
        assert_eq!(m.minutes_ticket_to_checkpoint(0, 1), 0);
        assert_eq!(m.minutes_checkpoint_to_hold(1, 0), -1);
        assert_eq!(m.minutes_checkpoint_to_hold(5, 5), 0);
    }

    #[test]
    fn ragged_table_rejected() {
        let err = TravelTimeMatrix::new(vec![vec![1, 2], vec![3]], vec![]).unwrap_err();
        assert_eq!(
            err,
            TransitError::MatrixShape { table: "ticket_to_checkpoint", row: 1, expected: 2, found: 1 }
        );
    }

    #[test]
    fn hold_table_needs_row_per_checkpoint() {
        let err = TravelTimeMatrix::new(vec![vec![1, 2]], vec![vec![5]]).unwrap_err();
        assert!(matches!(err, TransitError::RowCount { expected: 2, found: 1, .. }));
    }
}

#[cfg(test)]
mod walking {
    use crate::{TravelTimeProvider, WalkingTravelTimes};

    #[test]
    fn metres_to_ceiling_minutes() {
        // 161 m at 1.34 m/s ≈ 120.1 s → 3 minutes.
        let w = WalkingTravelTimes::new(vec![vec![161.0]], vec![vec![40.0]]).unwrap();
        assert_eq!(w.minutes_ticket_to_checkpoint(0, 0), 3);
        assert_eq!(w.minutes_checkpoint_to_hold(0, 0), 1);
    }

    #[test]
    fn min_minutes_and_missing_paths() {
        let w = WalkingTravelTimes::new(vec![vec![10.0, f64::NAN]], vec![])
            .unwrap()
            .with_min_minutes(4);
        assert_eq!(w.minutes_ticket_to_checkpoint(0, 0), 4);
        assert_eq!(w.minutes_ticket_to_checkpoint(0, 1), 4);
        assert_eq!(w.minutes_checkpoint_to_hold(3, 3), 4);
    }

    #[test]
    fn walk_speed_is_clamped() {
        let w = WalkingTravelTimes::new(vec![], vec![]).unwrap().with_walk_speed(0.0);
        assert_eq!(w.walk_speed_mps(), WalkingTravelTimes::MIN_WALK_SPEED_MPS);
        let w = w.with_walk_speed(f64::NAN);
        assert_eq!(w.walk_speed_mps(), WalkingTravelTimes::DEFAULT_WALK_SPEED_MPS);
    }
}

#[cfg(test)]
mod router {
    use pax_core::IntervalLength;

    use crate::{TransitRouter, TravelTimeMatrix};

    fn matrix() -> Box<TravelTimeMatrix> {
        Box::new(TravelTimeMatrix::new(vec![vec![3, 0]], vec![vec![5, -2], vec![1, 1]]).unwrap())
    }

    #[test]
    fn legacy_delays() {
        let r = TransitRouter::new(IntervalLength::new(1), 2, 4);
        assert_eq!(r.ticket_to_checkpoint(0, 0), 2);
        // 90 s walk → 2 minutes.
        assert_eq!(r.checkpoint_to_hold(0, 0, 90), 2);
        // A zero walk still takes one interval.
        assert_eq!(r.checkpoint_to_hold(0, 0, 0), 1);
    }

    #[test]
    fn provider_minutes_convert_with_ceiling() {
        let r = TransitRouter::new(IntervalLength::new(2), 1, 1).with_provider(matrix());
        assert_eq!(r.ticket_to_checkpoint(0, 0), 2); // 3 min / 2 → 2
        assert_eq!(r.checkpoint_to_hold(0, 0, 0), 3); // 5 min / 2 → 3
        assert_eq!(r.checkpoint_to_hold(1, 0, 0), 1); // 1 min / 2 → 1
    }

    #[test]
    fn unknown_answers_fall_back() {
        let r = TransitRouter::new(IntervalLength::new(1), 6, 7).with_provider(matrix());
        assert_eq!(r.ticket_to_checkpoint(0, 1), 6);
        // Provider set: hold fallback is the fixed hold delay, not walk seconds.
        assert_eq!(r.checkpoint_to_hold(0, 1, 600), 7);
    }

    #[test]
    fn provider_can_be_removed() {
        let mut r = TransitRouter::new(IntervalLength::new(1), 2, 2).with_provider(matrix());
        assert!(r.has_provider());
        r.set_provider(None);
        assert!(!r.has_provider());
        assert_eq!(r.ticket_to_checkpoint(0, 0), 2);
    }
}
