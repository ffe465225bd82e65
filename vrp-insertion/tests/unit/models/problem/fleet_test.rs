use super::*;
use crate::helpers::models::problem::*;

fn create_fleet(vehicles: Vec<Vehicle>) -> Fleet {
    Fleet::new(Arc::new(Driver::empty()), vehicles.into_iter().map(Arc::new).collect())
}

#[test]
fn can_pool_vehicles_by_type_key() {
    let fleet = create_fleet(vec![
        test_vehicle("v1"),
        test_vehicle("v2"),
        VehicleBuilder::default().id("v3").location(5).build(),
        VehicleBuilder::default().id("v4").time(0., 100.).build(),
        test_vehicle_with_capacity("v5", 20),
    ]);

    let slots = fleet.actors.iter().map(|actor| actor.slot).collect::<Vec<_>>();

    assert_eq!(slots, vec![0, 0, 1, 2, 3]);
    assert_eq!(fleet.type_keys.len(), 4);
    assert_eq!(fleet.representatives.len(), 4);
    assert_eq!(fleet.representatives[0].vehicle.id, "v1");
}

#[test]
fn can_compare_actors_by_identity() {
    let fleet = create_fleet(vec![test_vehicle("v1"), test_vehicle("v2")]);

    assert_eq!(fleet.actors[0], fleet.actors[0]);
    assert_ne!(fleet.actors[0], fleet.actors[1]);
    assert_eq!(fleet.actors[0].type_key, fleet.actors[1].type_key);
}

#[test]
fn can_create_penalty_actors_with_scaled_costs() {
    let fleet = create_fleet(vec![
        VehicleBuilder::default().id("v1").costs(fixed_costs(10.)).build(),
        test_vehicle_with_capacity("v2", 5),
    ]);

    let penalties = fleet.create_penalty_actors(100.);

    assert_eq!(penalties.len(), 2);
    assert!(penalties.iter().all(|actor| actor.is_penalty));
    assert_eq!(penalties[0].slot, 0);
    assert_eq!(penalties[0].fixed_cost(), 1000.);
    assert_eq!(penalties[0].vehicle.costs().per_distance, 100.);
    assert_eq!(penalties[1].capacity(), 5);
    assert_eq!(penalties[1].type_key, fleet.actors[1].type_key);
}

#[test]
fn can_sum_fixed_costs_of_driver_and_vehicle() {
    let driver = Driver { id: "d1".to_string(), costs: Costs { fixed: 5., ..Costs::default() } };
    let vehicle = VehicleBuilder::default().costs(fixed_costs(10.)).build();

    let fleet = Fleet::new(Arc::new(driver), vec![Arc::new(vehicle)]);

    assert_eq!(fleet.actors[0].fixed_cost(), 15.);
}
