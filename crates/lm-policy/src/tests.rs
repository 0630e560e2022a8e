//! Unit tests for lm-policy.

#[cfg(test)]
mod fixtures {
    use lm_core::{ClientId, GeoPoint, OrderId, SimTime};
    use lm_fleet::Registry;
    use lm_network::WarehouseSite;

    /// Two warehouses: W0 with 1 courier / 2 pickers, W1 with 0 couriers / 1 picker.
    pub fn registry_with_order() -> (Registry, OrderId) {
        let mut reg = Registry::provision(&[
            WarehouseSite::new(GeoPoint::new(0.0, 0.0), 1, 2),
            WarehouseSite::new(GeoPoint::new(0.1, 0.1), 0, 1),
        ]);
        let id = reg.create_order(ClientId(0), GeoPoint::new(0.05, 0.0), SimTime(100), 30, 10);
        (reg, id)
    }
}

#[cfg(test)]
mod decision_tests {
    use lm_core::WarehouseId;

    use crate::Decision;

    #[test]
    fn action_encoding() {
        assert_eq!(Decision::Warehouse(WarehouseId(2)).action(3), 2);
        assert_eq!(Decision::Reject.action(3), 3);
        assert_eq!(Decision::from_action(1, 3), Decision::Warehouse(WarehouseId(1)));
        assert_eq!(Decision::from_action(3, 3), Decision::Reject);
        assert_eq!(Decision::from_action(7, 3), Decision::Reject);
    }
}

#[cfg(test)]
mod context_tests {
    use lm_core::SimTime;

    use super::fixtures::registry_with_order;
    use crate::{PolicyContext, feature_len};

    #[test]
    fn feature_layout() {
        let (mut reg, id) = registry_with_order();
        reg.pickers[0].available_at = SimTime(160);
        reg.pickers[1].available_at = SimTime(130);
        reg.couriers[0].available_at = SimTime(90);

        let order = reg.orders[id.index()].clone();
        let ctx = PolicyContext::new(SimTime(100), &order, &reg, vec![40, 70]);
        let f = ctx.features().unwrap();
        assert_eq!(f.len(), feature_len(2));
        assert_eq!(&f[..2], &[40.0, 70.0]);
        // W0: one courier, no free picker, picker slack 30, courier slack 0.
        assert_eq!(&f[2..6], &[1.0, 0.0, 30.0, 0.0]);
        // W1: no courier, one free picker, no slack.
        assert_eq!(&f[6..10], &[0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn features_are_cached() {
        let (reg, id) = registry_with_order();
        let order = reg.orders[id.index()].clone();
        let ctx = PolicyContext::new(SimTime(100), &order, &reg, vec![1, 2]);
        let a = ctx.features().unwrap().as_ptr();
        let b = ctx.features().unwrap().as_ptr();
        assert_eq!(a, b);
    }
}

#[cfg(test)]
mod nearest_tests {
    use lm_core::{SimRng, SimTime, WarehouseId};

    use super::fixtures::registry_with_order;
    use crate::{Decision, DecisionPolicy, NearestWarehouse, PolicyContext};

    fn decide(reg: &lm_fleet::Registry, row: Vec<u64>) -> Decision {
        let order = reg.orders[0].clone();
        let ctx = PolicyContext::new(SimTime(100), &order, reg, row);
        NearestWarehouse.choose(&ctx, &mut SimRng::new(0)).unwrap()
    }

    #[test]
    fn picks_nearest_when_staffed() {
        let (reg, _) = registry_with_order();
        assert_eq!(decide(&reg, vec![10, 50]), Decision::Warehouse(WarehouseId(0)));
    }

    #[test]
    fn ties_go_to_lowest_index() {
        let (reg, _) = registry_with_order();
        assert_eq!(decide(&reg, vec![10, 10]), Decision::Warehouse(WarehouseId(0)));
    }

    #[test]
    fn rejects_when_nearest_has_no_courier() {
        let (reg, _) = registry_with_order();
        assert_eq!(decide(&reg, vec![50, 10]), Decision::Reject);
    }

    #[test]
    fn rejects_when_all_pickers_busy() {
        let (mut reg, _) = registry_with_order();
        reg.pickers[0].available_at = SimTime(101);
        reg.pickers[1].available_at = SimTime(200);
        assert_eq!(decide(&reg, vec![10, 50]), Decision::Reject);
        // A picker that frees up exactly now counts as free.
        reg.pickers[1].available_at = SimTime(100);
        assert_eq!(decide(&reg, vec![10, 50]), Decision::Warehouse(WarehouseId(0)));
    }

    #[test]
    fn empty_row_rejects() {
        let (reg, _) = registry_with_order();
        assert_eq!(decide(&reg, vec![]), Decision::Reject);
    }
}

#[cfg(test)]
mod softmax_tests {
    use lm_core::{OrderId, SimRng, SimTime};

    use super::fixtures::registry_with_order;
    use crate::softmax::{argmax, layer_norm, softmax};
    use crate::{
        DecisionPolicy, DecisionRecord, PolicyContext, PolicyError, Sampling, SoftmaxPolicy,
        TrainablePolicy, feature_len,
    };

    #[test]
    fn numerics() {
        let x = layer_norm(&[1.0, 2.0, 3.0, 4.0]);
        let mean: f64 = x.iter().sum::<f64>() / 4.0;
        assert!(mean.abs() < 1e-12);
        let p = softmax(&[0.0, 0.0, 1000.0]);
        assert!((p.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!(p[2] > 0.999);
        assert_eq!(argmax(&[0.2, 0.4, 0.4]), 1);
    }

    #[test]
    fn probabilities_shape() {
        let policy = SoftmaxPolicy::new(2, 0.01, &mut SimRng::new(1));
        let p = policy.probabilities(&vec![1.0; feature_len(2)]).unwrap();
        assert_eq!(p.len(), 3);
        assert!(matches!(
            policy.probabilities(&[1.0]),
            Err(PolicyError::FeatureLength { expected: 10, got: 1 })
        ));
    }

    #[test]
    fn greedy_choice_is_deterministic() {
        let (reg, id) = registry_with_order();
        let order = reg.orders[id.index()].clone();
        let policy = SoftmaxPolicy::new(2, 0.01, &mut SimRng::new(5));
        assert_eq!(policy.sampling(), Sampling::Greedy);
        let ctx = PolicyContext::new(SimTime(100), &order, &reg, vec![10, 20]);
        let a = policy.choose(&ctx, &mut SimRng::new(1)).unwrap();
        let b = policy.choose(&ctx, &mut SimRng::new(2)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn training_lowers_probability_of_costly_action() {
        let mut policy = SoftmaxPolicy::new(2, 0.05, &mut SimRng::new(9));
        policy.set_training(true);
        let features: Vec<f64> = (0..feature_len(2)).map(|i| i as f64).collect();
        let before = policy.probabilities(&features).unwrap()[0];
        let records = vec![DecisionRecord { order: OrderId(0), features: features.clone(), action: 0 }];
        for _ in 0..50 {
            policy.update(&records, &[100.0]).unwrap();
        }
        let after = policy.probabilities(&features).unwrap()[0];
        assert!(after < before, "before={before} after={after}");
    }

    #[test]
    fn update_validates_episode() {
        let mut policy = SoftmaxPolicy::new(1, 0.01, &mut SimRng::new(0));
        let rec = DecisionRecord { order: OrderId(0), features: vec![0.0; feature_len(1)], action: 5 };
        assert!(matches!(policy.update(&[rec.clone()], &[]), Err(PolicyError::EpisodeLength { .. })));
        assert!(matches!(policy.update(&[rec], &[1.0]), Err(PolicyError::ActionOutOfRange { .. })));
        assert_eq!(policy.update(&[], &[]).unwrap(), 0.0);
    }

    #[test]
    fn json_round_trip_starts_greedy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("policy.json");
        let mut policy = SoftmaxPolicy::new(2, 0.01, &mut SimRng::new(3));
        policy.set_training(true);
        policy.save_json(&path).unwrap();

        let loaded = SoftmaxPolicy::load_json(&path).unwrap();
        assert_eq!(loaded.sampling(), Sampling::Greedy);
        let f = vec![0.5; feature_len(2)];
        assert_eq!(loaded.probabilities(&f).unwrap(), policy.probabilities(&f).unwrap());
    }
}
