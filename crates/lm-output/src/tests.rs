//! Unit tests for lm-output.

#[cfg(test)]
mod format_tests {
    use crate::fmt_g;

    #[test]
    fn fixed_range() {
        assert_eq!(fmt_g(0.0), "0");
        assert_eq!(fmt_g(42.0), "42");
        assert_eq!(fmt_g(-3.5), "-3.5");
        assert_eq!(fmt_g(11.575), "11.575");
        assert_eq!(fmt_g(48.137154), "48.1372");
        assert_eq!(fmt_g(123456.0), "123456");
        assert_eq!(fmt_g(0.0001), "0.0001");
        assert_eq!(fmt_g(1.0 / 3.0), "0.333333");
    }

    #[test]
    fn scientific_range() {
        assert_eq!(fmt_g(1234567.0), "1.23457e+06");
        assert_eq!(fmt_g(999999.7), "1e+06");
        assert_eq!(fmt_g(0.00001234), "1.234e-05");
        assert_eq!(fmt_g(2.5e-10), "2.5e-10");
    }

    #[test]
    fn non_finite() {
        assert_eq!(fmt_g(f64::NAN), "nan");
        assert_eq!(fmt_g(f64::INFINITY), "inf");
        assert_eq!(fmt_g(f64::NEG_INFINITY), "-inf");
    }
}

#[cfg(test)]
mod text_tests {
    use tempfile::TempDir;

    use crate::writer::OutputWriter;
    use crate::{OrderRow, RouteRow, TextWriter};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn files_created() {
        let dir = tmp();
        let _w = TextWriter::in_dir(dir.path()).unwrap();
        assert!(dir.path().join("routes.txt").exists());
        assert!(dir.path().join("orders.txt").exists());
    }

    #[test]
    fn exact_bytes() {
        let dir = tmp();
        let mut w = TextWriter::in_dir(dir.path()).unwrap();
        w.write_routes(&[RouteRow {
            start: 0, arrival: 5, from_lat: 48.1, from_lon: 11.5, to_lat: 48.137154, to_lon: 11.575,
        }])
        .unwrap();
        w.write_orders(&[
            OrderRow { ordered_at: 0, shown_until: 5, lat: 48.137154, lon: 11.575, accepted: true },
            OrderRow { ordered_at: 7, shown_until: 187, lat: 48.2, lon: 11.6, accepted: false },
        ])
        .unwrap();
        w.finish().unwrap();
        w.finish().unwrap();

        let routes = std::fs::read_to_string(dir.path().join("routes.txt")).unwrap();
        assert_eq!(routes, "0 5 48.1 11.5 48.1372 11.575\n");
        let orders = std::fs::read_to_string(dir.path().join("orders.txt")).unwrap();
        assert_eq!(orders, "0 5 48.1372 11.575 1\n7 187 48.2 11.6 0\n");
    }

    #[test]
    fn missing_dir_is_an_error() {
        let dir = tmp();
        assert!(TextWriter::in_dir(&dir.path().join("nope")).is_err());
    }
}

#[cfg(test)]
mod stats_tests {
    use crate::{CostsRow, StatsRow, costs_file_name, stats_file_name, write_costs, write_stats};

    #[test]
    fn stats_header_has_trailing_space() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.txt");
        write_stats(&path, &[
            StatsRow { total_costs: 45231.0, rejection_rate: 0.125, mean_waiting_secs: 812, max_waiting_secs: 2400 },
            StatsRow { total_costs: 1234567.0, rejection_rate: 0.0, mean_waiting_secs: 0, max_waiting_secs: 0 },
        ])
        .unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "TotalCosts RejectionRate MeanWaitingTime MaxWaitingTime \n45231 0.125 812 2400\n1.23457e+06 0 0 0\n"
        );
    }

    #[test]
    fn costs_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("costs.txt");
        write_costs(&path, &[CostsRow { total_costs: 5000.5, rejection_rate: 0.2 }]).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "TotalCosts RejectionRate \n5000.5 0.2\n");
    }

    #[test]
    fn file_names() {
        assert_eq!(stats_file_name(1800, 25.0, "NearestWarehousePolicy"), "statsData_1800_25.000000_NearestWarehousePolicy.txt");
        assert_eq!(costs_file_name(1800, 25.0, 0.9, 0.5), "averageCosts_1800_25.000000_0.900000_0.500000.txt");
    }
}

#[cfg(test)]
mod observer_tests {
    use lm_core::{ClientId, DispatchConfig, GeoPoint, SimRng, SimTime, WarehouseId};
    use lm_demand::{ArrivalRecord, ArrivalTape};
    use lm_network::{ConstantTravel, WarehouseSite};
    use lm_policy::{Decision, DecisionPolicy, PolicyContext, PolicyResult};
    use lm_sim::SimBuilder;

    use crate::{OutputObserver, TextWriter};

    /// Accepts the first order and rejects the rest.
    struct FirstOnly;

    impl DecisionPolicy for FirstOnly {
        fn name(&self) -> &str {
            "FirstOnly"
        }

        fn choose(&self, ctx: &PolicyContext<'_>, _rng: &mut SimRng) -> PolicyResult<Decision> {
            Ok(if ctx.order.id.index() == 0 { Decision::Warehouse(WarehouseId(0)) } else { Decision::Reject })
        }
    }

    #[test]
    fn writes_run_logs() {
        let dir = tempfile::tempdir().unwrap();
        let config = DispatchConfig { horizon: SimTime(100), epochs: 1, ..DispatchConfig::default() };
        let sites = [WarehouseSite::new(GeoPoint::new(48.1, 11.5), 1, 1)];
        let clients = [GeoPoint::new(48.2, 11.6)];
        let tape = ArrivalTape::from_records(vec![
            ArrivalRecord::new(SimTime(0), ClientId(0), 0, 0),
            ArrivalRecord::new(SimTime(3), ClientId(0), 0, 0),
        ])
        .unwrap();

        let mut sim = SimBuilder::new(
            config.clone(), &sites, &clients, ConstantTravel::new(5, 1, 1), FirstOnly, tape, SimRng::new(0),
        )
        .build()
        .unwrap();
        let mut obs = OutputObserver::new(TextWriter::in_dir(dir.path()).unwrap(), &config);
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());

        let routes = std::fs::read_to_string(dir.path().join("routes.txt")).unwrap();
        assert_eq!(routes, "0 5 48.1 11.5 48.2 11.6\n5 10 48.2 11.6 48.1 11.5\n");
        let orders = std::fs::read_to_string(dir.path().join("orders.txt")).unwrap();
        assert_eq!(orders, "0 5 48.2 11.6 1\n3 183 48.2 11.6 0\n");
    }
}
