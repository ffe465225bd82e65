use super::*;
use crate::helpers::models::problem::*;
use crate::models::problem::{Driver, Vehicle};

fn create_fleet(vehicles: Vec<Vehicle>) -> Fleet {
    Fleet::new(Arc::new(Driver::empty()), vehicles.into_iter().map(Arc::new).collect())
}

fn get_available_ids(manager: &FleetManager) -> Vec<String> {
    manager.available().map(|actor| actor.vehicle.id.clone()).collect()
}

#[test]
fn can_lock_and_unlock_actors_of_finite_fleet() {
    let fleet = create_fleet(vec![test_vehicle("v1"), test_vehicle("v2"), test_vehicle_with_capacity("v3", 5)]);
    let mut manager = FleetManager::new(&fleet, FleetSize::Finite, None);
    assert_eq!(get_available_ids(&manager), vec!["v1", "v3"]);

    manager.lock(&fleet.actors[0]);
    assert!(manager.is_locked(&fleet.actors[0]));
    assert_eq!(get_available_ids(&manager), vec!["v2", "v3"]);

    manager.lock(&fleet.actors[1]);
    assert_eq!(get_available_ids(&manager), vec!["v3"]);

    manager.unlock(&fleet.actors[0]);
    assert!(!manager.is_locked(&fleet.actors[0]));
    assert_eq!(get_available_ids(&manager), vec!["v1", "v3"]);
    assert_eq!(manager.locked().count(), 1);
}

#[test]
#[should_panic(expected = "is already locked")]
fn can_detect_double_lock() {
    let fleet = create_fleet(vec![test_vehicle("v1")]);
    let mut manager = FleetManager::new(&fleet, FleetSize::Finite, None);

    manager.lock(&fleet.actors[0]);
    manager.lock(&fleet.actors[0]);
}

#[test]
fn can_offer_representatives_for_infinite_fleet() {
    let fleet = create_fleet(vec![test_vehicle("v1"), test_vehicle_with_capacity("v2", 5)]);
    let mut manager = FleetManager::new(&fleet, FleetSize::Infinite, None);

    manager.lock(&fleet.actors[0]);
    manager.lock(&fleet.actors[0]);

    assert!(!manager.is_locked(&fleet.actors[0]));
    assert_eq!(get_available_ids(&manager), vec!["v1", "v2"]);
}

#[test]
fn can_offer_penalty_actor_when_pool_is_exhausted() {
    let fleet = create_fleet(vec![test_vehicle("v1")]);
    let mut manager = FleetManager::new(&fleet, FleetSize::Finite, Some(10.));

    manager.lock(&fleet.actors[0]);
    let penalty = manager.available().next().expect("penalty actor should be available");
    manager.lock(&penalty);

    assert!(penalty.is_penalty);
    assert!(!manager.is_locked(&penalty));
    assert_eq!(manager.available().next().map(|actor| actor.is_penalty), Some(true));
}

#[test]
fn can_exclude_type_key() {
    let fleet = create_fleet(vec![test_vehicle("v1"), test_vehicle_with_capacity("v2", 5)]);
    let manager = FleetManager::new(&fleet, FleetSize::Finite, None);

    let ids =
        manager.available_except(&fleet.actors[0].type_key).map(|actor| actor.vehicle.id.clone()).collect::<Vec<_>>();

    assert_eq!(ids, vec!["v2"]);
}
