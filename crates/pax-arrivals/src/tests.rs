//! Unit tests for pax-arrivals.

#[cfg(test)]
mod uniform {
    use pax_core::{ArrivalCurveConfig, Flight};

    use crate::{ArrivalModel, UniformArrivals};

    fn flight(close: u32) -> Flight {
        Flight::new("UA1", 600, 100, 1.0).unwrap().with_boarding_close(close)
    }

    #[test]
    fn spreads_until_boarding_close() {
        let counts = UniformArrivals.arrivals_per_minute(&flight(20), 100, &ArrivalCurveConfig::default(), 60);
        assert_eq!(counts.len(), 60);
        assert_eq!(counts.iter().sum::<u32>(), 100);
        assert!(counts[..20].iter().all(|&c| c == 3));
        assert!(counts[20..40].iter().all(|&c| c == 2));
        assert!(counts[40..].iter().all(|&c| c == 0));
    }

    #[test]
    fn zero_window_puts_everyone_first() {
        let counts = UniformArrivals.arrivals_per_minute(&flight(30), 7, &ArrivalCurveConfig::default(), 20);
        assert_eq!(counts[0], 7);
        assert_eq!(counts.iter().sum::<u32>(), 7);
    }

    #[test]
    fn zero_span_is_empty() {
        let counts = UniformArrivals.arrivals_per_minute(&flight(20), 7, &ArrivalCurveConfig::default(), 0);
        assert!(counts.is_empty());
    }
}

#[cfg(test)]
mod split_gaussian {
    use pax_core::{ArrivalCurveConfig, Flight};

    use crate::{ArrivalModel, SplitGaussianArrivals};

    fn flight() -> Flight {
        Flight::new("DL9", 900, 180, 1.0).unwrap()
    }

    #[test]
    fn sums_exactly_to_total() {
        let cfg = ArrivalCurveConfig::curve_default();
        for total in [0, 1, 17, 150, 181] {
            let counts = SplitGaussianArrivals.arrivals_per_minute(&flight(), total, &cfg, 120);
            assert_eq!(counts.len(), 120);
            assert_eq!(counts.iter().sum::<u32>(), total, "total {total}");
        }
    }

    #[test]
    fn late_clamp_zeroes_last_minutes() {
        let cfg = ArrivalCurveConfig::curve_default();
        let counts = SplitGaussianArrivals.arrivals_per_minute(&flight(), 150, &cfg, 120);
        // Index m is (120 - m) minutes before departure.
        assert!(counts[101..].iter().all(|&c| c == 0));
    }

    #[test]
    fn peak_holds_the_most_passengers() {
        let cfg = ArrivalCurveConfig::curve_default();
        let counts = SplitGaussianArrivals.arrivals_per_minute(&flight(), 1000, &cfg, 120);
        let peak_idx = 120 - cfg.peak_minutes as usize;
        let max = *counts.iter().max().unwrap();
        // Rounding may hand a neighbour one extra passenger.
        assert!(counts[peak_idx] + 1 >= max);
        assert!(counts[peak_idx] > counts[10]);
        assert!(counts[peak_idx] > counts[95]);
    }

    #[test]
    fn nothing_before_window_opens() {
        let cfg = ArrivalCurveConfig { window_start_minutes: 60, ..ArrivalCurveConfig::curve_default() };
        let counts = SplitGaussianArrivals.arrivals_per_minute(&flight(), 150, &cfg, 120);
        assert!(counts[..60].iter().all(|&c| c == 0));
        assert_eq!(counts.iter().sum::<u32>(), 150);
    }

    #[test]
    fn fully_clamped_curve_falls_back_to_even_spread() {
        // Span of 10 minutes sits entirely inside the 20-minute late clamp.
        let f = flight().with_boarding_close(5);
        let cfg = ArrivalCurveConfig::curve_default();
        let counts = SplitGaussianArrivals.arrivals_per_minute(&f, 10, &cfg, 10);
        assert_eq!(counts, vec![2, 2, 2, 2, 2, 0, 0, 0, 0, 0]);
    }
}

#[cfg(test)]
mod dispatch {
    use pax_core::{ArrivalCurveConfig, Flight};

    use crate::{ArrivalModel, CurveArrivals, SplitGaussianArrivals, UniformArrivals};

    #[test]
    fn legacy_flag_selects_model() {
        let f = Flight::new("AA3", 700, 120, 0.9).unwrap();
        let legacy = ArrivalCurveConfig::legacy_default();
        let curve = ArrivalCurveConfig::curve_default();
        let model = CurveArrivals::new();
        assert_eq!(
            model.arrivals_per_minute(&f, 108, &legacy, 120),
            UniformArrivals.arrivals_per_minute(&f, 108, &legacy, 120),
        );
        assert_eq!(
            model.arrivals_per_minute(&f, 108, &curve, 120),
            SplitGaussianArrivals.arrivals_per_minute(&f, 108, &curve, 120),
        );
    }

    #[test]
    fn closures_are_models() {
        let model = |_: &Flight, total: u32, _: &ArrivalCurveConfig, span: u32| {
            let mut v = vec![0; span as usize];
            v[0] = total;
            v
        };
        let f = Flight::new("X", 60, 10, 1.0).unwrap();
        let boxed: Box<dyn ArrivalModel> = Box::new(model);
        assert_eq!(boxed.arrivals_per_minute(&f, 10, &ArrivalCurveConfig::default(), 3), vec![10, 0, 0]);
    }
}
