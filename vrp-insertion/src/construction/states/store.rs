#[cfg(test)]
#[path = "../../../tests/unit/construction/states/store_test.rs"]
mod store_test;

use crate::construction::states::StateKey;
use nohash_hasher::BuildNoHashHasher;
use std::collections::HashMap;

type StateMap<V> = HashMap<StateKey, V, BuildNoHashHasher<StateKey>>;

/// Keeps numeric state of the route and of its activities. Activity states are stored densely by
/// activity index in the tour.
#[derive(Clone, Default)]
pub struct RouteState {
    route_states: StateMap<f64>,
    activity_states: StateMap<Vec<Option<f64>>>,
}

impl RouteState {
    /// Gets value associated with the route and given key.
    pub fn get_route_state(&self, key: StateKey) -> Option<f64> {
        self.route_states.get(&key).copied()
    }

    /// Gets value associated with the activity at given tour index and given key.
    pub fn get_activity_state(&self, key: StateKey, activity_idx: usize) -> Option<f64> {
        self.activity_states.get(&key).and_then(|values| values.get(activity_idx).copied().flatten())
    }

    /// Puts value associated with the route and given key.
    pub fn put_route_state(&mut self, key: StateKey, value: f64) {
        self.route_states.insert(key, value);
    }

    /// Puts value associated with the activity at given tour index and given key.
    pub fn put_activity_state(&mut self, key: StateKey, activity_idx: usize, value: f64) {
        let values = self.activity_states.entry(key).or_default();
        if values.len() <= activity_idx {
            values.resize(activity_idx + 1, None);
        }

        values[activity_idx] = Some(value);
    }

    /// Removes all values keeping allocated memory.
    pub fn clear(&mut self) {
        self.route_states.clear();
        self.activity_states.values_mut().for_each(|values| values.clear());
    }
}
