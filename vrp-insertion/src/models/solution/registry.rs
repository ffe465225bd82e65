#[cfg(test)]
#[path = "../../../tests/unit/models/solution/registry_test.rs"]
mod registry_test;

use crate::models::problem::{Actor, Fleet, FleetSize, TypeKey};
use rustc_hash::FxHashSet;
use std::sync::Arc;

/// Pools vehicles by their type key and keeps track of vehicles locked by routes.
#[derive(Clone)]
pub struct FleetManager {
    fleet_size: FleetSize,
    representatives: Vec<Arc<Actor>>,
    available: Vec<Vec<Arc<Actor>>>,
    locked: FxHashSet<Arc<Actor>>,
    penalties: Vec<Arc<Actor>>,
}

impl FleetManager {
    /// Creates a new instance of `FleetManager`. When penalty factor is set, an unlimited penalty
    /// actor is offered for every type key once its real pool is exhausted.
    pub fn new(fleet: &Fleet, fleet_size: FleetSize, penalty_factor: Option<f64>) -> Self {
        let available = (0..fleet.type_keys.len())
            .map(|slot| fleet.actors.iter().filter(|actor| actor.slot == slot).cloned().collect())
            .collect();

        let penalties = match (fleet_size, penalty_factor) {
            (FleetSize::Finite, Some(factor)) => fleet.create_penalty_actors(factor),
            _ => vec![],
        };

        Self {
            fleet_size,
            representatives: fleet.representatives.clone(),
            available,
            locked: FxHashSet::default(),
            penalties,
        }
    }

    /// Removes actor from available pool. It is a no-op for penalty actors and infinite fleet.
    /// Panics if the actor is already locked.
    pub fn lock(&mut self, actor: &Arc<Actor>) {
        if !self.is_lockable(actor) {
            return;
        }

        assert!(self.locked.insert(actor.clone()), "vehicle '{}' is already locked", actor.vehicle.id);

        if let Some(pool) = self.available.get_mut(actor.slot) {
            pool.retain(|other| other != actor);
        }
    }

    /// Returns actor back to available pool.
    pub fn unlock(&mut self, actor: &Arc<Actor>) {
        if !self.is_lockable(actor) {
            return;
        }

        if self.locked.remove(actor) {
            if let Some(pool) = self.available.get_mut(actor.slot) {
                pool.push(actor.clone());
            }
        }
    }

    /// Checks whether actor is locked.
    pub fn is_locked(&self, actor: &Arc<Actor>) -> bool {
        self.locked.contains(actor)
    }

    /// Returns one available actor per type key, ordered by slot.
    pub fn available(&self) -> impl Iterator<Item = Arc<Actor>> + '_ {
        (0..self.representatives.len()).filter_map(move |slot| self.get_available(slot))
    }

    /// Returns one available actor per type key, except the given one.
    pub fn available_except<'a>(&'a self, type_key: &'a TypeKey) -> impl Iterator<Item = Arc<Actor>> + 'a {
        self.available().filter(move |actor| actor.type_key != *type_key)
    }

    /// Returns all locked actors.
    pub fn locked(&self) -> impl Iterator<Item = &Arc<Actor>> + '_ {
        self.locked.iter()
    }

    fn get_available(&self, slot: usize) -> Option<Arc<Actor>> {
        match self.fleet_size {
            FleetSize::Infinite => self.representatives.get(slot).cloned(),
            FleetSize::Finite => {
                self.available.get(slot).and_then(|pool| pool.first()).or_else(|| self.penalties.get(slot)).cloned()
            }
        }
    }

    fn is_lockable(&self, actor: &Actor) -> bool {
        !actor.is_penalty && self.fleet_size == FleetSize::Finite
    }
}
