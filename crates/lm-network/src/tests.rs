//! Unit tests for lm-network.

#[cfg(test)]
mod travel_tests {
    use lm_core::{ClientId, GeoPoint, WarehouseId};

    use crate::{ConstantTravel, TravelModel, TravelTable};

    fn table() -> TravelTable {
        TravelTable::from_rows(vec![vec![30, 10, 20], vec![5, 5, 7]]).unwrap()
    }

    #[test]
    fn lookup_is_row_major() {
        let t = table();
        assert_eq!(t.warehouse_count(), 3);
        assert_eq!(t.client_count(), 2);
        assert_eq!(t.travel_secs(ClientId(0), WarehouseId(1)), 10);
        assert_eq!(t.travel_secs(ClientId(1), WarehouseId(2)), 7);
        assert_eq!(t.travel_row(ClientId(1)), vec![5, 5, 7]);
    }

    #[test]
    fn nearest_picks_minimum() {
        assert_eq!(table().nearest_warehouse(ClientId(0)), Some(WarehouseId(1)));
    }

    #[test]
    fn nearest_tie_goes_to_lowest_index() {
        assert_eq!(table().nearest_warehouse(ClientId(1)), Some(WarehouseId(0)));
    }

    #[test]
    fn ragged_rows_rejected() {
        assert!(TravelTable::from_rows(vec![vec![1, 2], vec![3]]).is_err());
    }

    #[test]
    fn constant_travel() {
        let t = ConstantTravel::new(5, 2, 4);
        assert_eq!(t.travel_row(ClientId(3)), vec![5, 5]);
        assert_eq!(t.nearest_warehouse(ClientId(0)), Some(WarehouseId(0)));
    }

    #[test]
    fn no_warehouses_no_nearest() {
        assert_eq!(ConstantTravel::new(5, 0, 1).nearest_warehouse(ClientId(0)), None);
    }

    #[test]
    fn distances_at_speed() {
        let clients = [GeoPoint::new(52.0, 4.0)];
        let sites = [GeoPoint::new(52.0, 4.0), GeoPoint::new(53.0, 4.0)];
        let t = TravelTable::from_distances(&clients, &sites, 10.0).unwrap();
        assert_eq!(t.travel_secs(ClientId(0), WarehouseId(0)), 0);
        let far = t.travel_secs(ClientId(0), WarehouseId(1));
        assert!((11_000..11_200).contains(&far), "got {far}");
    }
}

#[cfg(test)]
mod loader_tests {
    use std::io::Cursor;

    use lm_core::{ClientId, WarehouseId};

    use crate::{TravelModel, load_instance_json, load_instance_reader, load_travel_csv_reader};

    const INLINE: &str = r#"{
        "warehouses": [
            { "location": { "lat": 52.37, "lon": 4.89 }, "couriers": 3, "pickers": 2 },
            { "location": { "lat": 52.35, "lon": 4.91 }, "couriers": 0, "pickers": 1 }
        ],
        "clients": [ { "lat": 52.36, "lon": 4.90 } ],
        "travel_secs": [ [ 412, 300 ] ]
    }"#;

    #[test]
    fn inline_matrix() {
        let inst = load_instance_reader(Cursor::new(INLINE)).unwrap();
        assert_eq!(inst.warehouse_count(), 2);
        assert_eq!(inst.client_count(), 1);
        assert_eq!(inst.warehouses[0].couriers, 3);
        assert_eq!(inst.travel.travel_secs(ClientId(0), WarehouseId(1)), 300);
    }

    #[test]
    fn dimension_mismatch_rejected() {
        let bad = INLINE.replace("[ [ 412, 300 ] ]", "[ [ 412 ] ]");
        assert!(load_instance_reader(Cursor::new(bad)).is_err());
    }

    #[test]
    fn missing_travel_source_rejected() {
        let bad = INLINE.replace(r#""travel_secs": [ [ 412, 300 ] ]"#, r#""unused": 0"#);
        assert!(load_instance_reader(Cursor::new(bad)).is_err());
    }

    #[test]
    fn travel_csv_complete() {
        let csv = "client_id,warehouse_id,travel_secs\n0,0,10\n0,1,20\n1,0,30\n1,1,40\n";
        let t = load_travel_csv_reader(Cursor::new(csv), 2, 2).unwrap();
        assert_eq!(t.travel_secs(ClientId(1), WarehouseId(0)), 30);
    }

    #[test]
    fn travel_csv_missing_cell() {
        let csv = "client_id,warehouse_id,travel_secs\n0,0,10\n";
        assert!(load_travel_csv_reader(Cursor::new(csv), 1, 2).is_err());
    }

    #[test]
    fn travel_csv_out_of_range() {
        let csv = "client_id,warehouse_id,travel_secs\n0,5,10\n";
        assert!(load_travel_csv_reader(Cursor::new(csv), 1, 1).is_err());
    }

    #[test]
    fn json_with_relative_csv() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("travel.csv"),
            "client_id,warehouse_id,travel_secs\n0,0,99\n",
        )
        .unwrap();
        let json = r#"{
            "warehouses": [ { "location": { "lat": 0.0, "lon": 0.0 }, "couriers": 1, "pickers": 1 } ],
            "clients": [ { "lat": 0.1, "lon": 0.1 } ],
            "travel_csv": "travel.csv"
        }"#;
        let path = dir.path().join("instance.json");
        std::fs::write(&path, json).unwrap();

        let inst = load_instance_json(&path).unwrap();
        assert_eq!(inst.travel.travel_secs(ClientId(0), WarehouseId(0)), 99);
    }
}
