//! Unit tests for lm-demand.

#[cfg(test)]
mod tape_tests {
    use lm_core::{ClientId, RateOverride, SimRng, SimTime};

    use crate::{ArrivalRecord, ArrivalTape, DemandError, TapeParams};

    fn params(hours: u64) -> TapeParams {
        TapeParams {
            horizon:                 SimTime::from_hours(hours),
            client_count:            5,
            mean_inter_arrival_secs: 25.0,
            rate_override:           Some(RateOverride::default()),
            mean_commission_secs:    300.0,
            mean_service_secs:       60.0,
        }
    }

    #[test]
    fn same_seed_same_tape() {
        let a = ArrivalTape::generate(&params(2), &mut SimRng::new(7)).unwrap();
        let b = ArrivalTape::generate(&params(2), &mut SimRng::new(7)).unwrap();
        assert_eq!(a, b);
        let c = ArrivalTape::generate(&params(2), &mut SimRng::new(8)).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn sorted_and_inside_horizon() {
        let p = params(8);
        let tape = ArrivalTape::generate(&p, &mut SimRng::new(1)).unwrap();
        assert!(!tape.is_empty());
        assert!(tape.records().windows(2).all(|w| w[0].at <= w[1].at));
        assert!(tape.records().iter().all(|r| r.at < p.horizon));
        assert!(tape.records().iter().all(|r| r.client.index() < p.client_count));
    }

    #[test]
    fn override_raises_density() {
        // Mean gap 25s for 4h then 15s: expect roughly 576 + 960 arrivals.
        let tape = ArrivalTape::generate(&params(8), &mut SimRng::new(3)).unwrap();
        let split = SimTime::from_hours(4);
        let early = tape.records().iter().filter(|r| r.at <= split).count();
        let late = tape.len() - early;
        assert!(late > early, "early={early} late={late}");
    }

    #[test]
    fn zero_horizon_is_empty() {
        let tape = ArrivalTape::generate(&params(0), &mut SimRng::new(3)).unwrap();
        assert!(tape.is_empty());
    }

    #[test]
    fn rejects_empty_instance() {
        let mut p = params(1);
        p.client_count = 0;
        assert!(matches!(
            ArrivalTape::generate(&p, &mut SimRng::new(3)),
            Err(DemandError::Params(_))
        ));
    }

    #[test]
    fn from_records_requires_order() {
        let r = |t| ArrivalRecord::new(SimTime(t), ClientId(0), 1, 1);
        assert!(ArrivalTape::from_records(vec![r(0), r(0), r(5)]).is_ok());
        let err = ArrivalTape::from_records(vec![r(0), r(9), r(5)]).unwrap_err();
        assert!(matches!(err, DemandError::Unsorted { index: 2, at: 5, prev: 9 }));
    }

    #[test]
    fn truncate_keeps_horizon_inclusive() {
        let r = |t| ArrivalRecord::new(SimTime(t), ClientId(0), 1, 1);
        let mut tape = ArrivalTape::from_records(vec![r(1), r(10), r(11), r(40)]).unwrap();
        assert_eq!(tape.truncate_after(SimTime(10)), 2);
        assert_eq!(tape.len(), 2);
        assert_eq!(tape.max_client(), Some(ClientId(0)));
    }
}

#[cfg(test)]
mod in_flight_tests {
    use lm_core::{OrderId, SimTime};

    use crate::InFlightQueue;

    #[test]
    fn head_is_earliest() {
        let mut q = InFlightQueue::new();
        q.insert(SimTime(30), OrderId(0));
        q.insert(SimTime(10), OrderId(1));
        q.insert(SimTime(20), OrderId(2));
        assert_eq!(q.head(), Some((SimTime(10), OrderId(1))));
        assert_eq!(q.next_time(), Some(SimTime(10)));
        assert!(q.is_sorted());
    }

    #[test]
    fn new_entry_precedes_equal_times() {
        let mut q = InFlightQueue::new();
        q.insert(SimTime(10), OrderId(0));
        q.insert(SimTime(10), OrderId(1));
        let order: Vec<OrderId> = q.iter().map(|&(_, o)| o).collect();
        assert_eq!(order, vec![OrderId(1), OrderId(0)]);
    }

    #[test]
    fn remove_and_empty() {
        let mut q = InFlightQueue::new();
        assert_eq!(q.next_time(), None);
        q.insert(SimTime(5), OrderId(3));
        assert!(!q.remove(OrderId(9)));
        assert!(q.remove(OrderId(3)));
        assert!(q.is_empty());
    }
}

#[cfg(test)]
mod loader_tests {
    use lm_core::{ClientId, SimTime};

    use crate::{DemandError, load_tape_csv, load_tape_reader};

    #[test]
    fn reads_rows() {
        let csv = "order_time,client_id,commission_secs,service_secs\n0,3,120,45\n12,1,300,60\n";
        let tape = load_tape_reader(csv.as_bytes()).unwrap();
        assert_eq!(tape.len(), 2);
        let second = tape.get(1).unwrap();
        assert_eq!(second.at, SimTime(12));
        assert_eq!(second.client, ClientId(1));
        assert_eq!(second.commission_secs, 300);
    }

    #[test]
    fn unsorted_rows_fail() {
        let csv = "order_time,client_id,commission_secs,service_secs\n9,0,1,1\n3,0,1,1\n";
        assert!(matches!(load_tape_reader(csv.as_bytes()), Err(DemandError::Unsorted { .. })));
    }

    #[test]
    fn from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tape.csv");
        std::fs::write(&path, "order_time,client_id,commission_secs,service_secs\n4,0,2,3\n").unwrap();
        let tape = load_tape_csv(&path).unwrap();
        assert_eq!(tape.len(), 1);
    }
}
