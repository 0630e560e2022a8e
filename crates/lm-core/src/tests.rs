//! Unit tests for lm-core primitives.

#[cfg(test)]
mod ids {
    use crate::{CourierId, OrderId, WarehouseId};

    #[test]
    fn index_roundtrip() {
        let id = OrderId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(OrderId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(CourierId(0) < CourierId(1));
        assert!(WarehouseId(3) > WarehouseId(2));
    }

    #[test]
    fn display() {
        assert_eq!(WarehouseId(7).to_string(), "WarehouseId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::GeoPoint;

    #[test]
    fn planar_distance_scales_by_100() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.03, 0.04);
        assert!((a.planar_distance(b) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn haversine_one_degree_latitude() {
        let a = GeoPoint::new(52.0, 4.0);
        let b = GeoPoint::new(53.0, 4.0);
        let d = a.distance_m(b);
        assert!((d - 111_195.0).abs() < 500.0, "got {d}");
    }
}

#[cfg(test)]
mod time {
    use crate::{SECS_PER_HOUR, SimTime};

    #[test]
    fn arithmetic() {
        let t = SimTime(10);
        assert_eq!(t + 5, SimTime(15));
        assert_eq!(SimTime(15) - SimTime(10), 5);
        assert_eq!(SimTime(3).saturating_since(SimTime(10)), 0);
    }

    #[test]
    fn hours() {
        assert_eq!(SimTime::from_hours(4), SimTime(4 * SECS_PER_HOUR));
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn same_stream_same_draws() {
        let mut a = SimRng::for_stream(7, 3);
        let mut b = SimRng::for_stream(7, 3);
        for _ in 0..100 {
            assert_eq!(a.exponential_secs(25.0), b.exponential_secs(25.0));
            assert_eq!(a.index(50), b.index(50));
        }
    }

    #[test]
    fn different_streams_diverge() {
        let mut a = SimRng::for_stream(7, 0);
        let mut b = SimRng::for_stream(7, 1);
        let xs: Vec<u64> = (0..8).map(|_| a.random()).collect();
        let ys: Vec<u64> = (0..8).map(|_| b.random()).collect();
        assert_ne!(xs, ys);
    }

    #[test]
    fn exponential_mean_is_close() {
        let mut rng = SimRng::new(1);
        let n = 20_000;
        let total: u64 = (0..n).map(|_| rng.exponential_secs(300.0)).sum();
        let mean = total as f64 / n as f64;
        assert!((mean - 300.0).abs() < 15.0, "mean {mean}");
    }

    #[test]
    fn zero_mean_draws_nothing() {
        let mut a = SimRng::new(5);
        let mut b = SimRng::new(5);
        assert_eq!(a.exponential_secs(0.0), 0);
        // `a` consumed no state, so both streams stay aligned.
        assert_eq!(a.index(1000), b.index(1000));
    }

    #[test]
    fn weighted_index_respects_zero_weights() {
        let mut rng = SimRng::new(3);
        for _ in 0..200 {
            assert_eq!(rng.weighted_index(&[0.0, 1.0, 0.0]), Some(1));
        }
        assert_eq!(rng.weighted_index(&[0.0, 0.0]), None);
    }
}

#[cfg(test)]
mod config {
    use crate::{DispatchConfig, SimTime};

    #[test]
    fn default_is_valid() {
        assert!(DispatchConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_horizon_rejected() {
        let cfg = DispatchConfig { horizon: SimTime::ZERO, ..DispatchConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn default_override_is_four_hours() {
        let o = DispatchConfig::default().rate_override.unwrap();
        assert_eq!(o.after, SimTime::from_hours(4));
        assert_eq!(o.mean_inter_arrival_secs, 15.0);
    }
}
