use crate::construction::states::RouteState;
use crate::models::common::{Cost, Demand, Distance, Duration, Timestamp};
use std::hash::{Hash, Hasher};

/// A key which identifies a state in [RouteState]. A vehicle dependent state stores one value per
/// fleet slot under keys which share the id and differ by slot.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct StateKey {
    id: u32,
    slot: u32,
}

impl StateKey {
    /// Creates a new state key with given id.
    pub const fn new(id: u32) -> Self {
        Self { id, slot: 0 }
    }

    /// Returns a key for the same state and given vehicle slot.
    pub fn with_slot(self, slot: usize) -> Self {
        Self { id: self.id, slot: slot as u32 }
    }

    /// Returns state id.
    pub fn id(&self) -> u32 {
        self.id
    }
}

impl Hash for StateKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(((self.id as u64) << 32) | self.slot as u64);
    }
}

impl nohash_hasher::IsEnabled for StateKey {}

/// A cumulative cost: per activity from route start, per route in total.
pub const COST_KEY: StateKey = StateKey::new(1);
/// A load after the activity has been served.
pub const LOAD_KEY: StateKey = StateKey::new(2);
/// A load which has to be taken at route start.
pub const LOAD_AT_BEGINNING_KEY: StateKey = StateKey::new(3);
/// A load which is brought to route end.
pub const LOAD_AT_END_KEY: StateKey = StateKey::new(4);
/// A maximum load within the route.
pub const MAX_LOAD_KEY: StateKey = StateKey::new(5);
/// A maximum load from route start up to the activity.
pub const PAST_MAX_LOAD_KEY: StateKey = StateKey::new(6);
/// A maximum load from the activity up to route end.
pub const FUTURE_MAX_LOAD_KEY: StateKey = StateKey::new(7);
/// A vehicle dependent latest operation start time.
pub const LATEST_START_KEY: StateKey = StateKey::new(8);
/// A total route distance.
pub const TOTAL_DISTANCE_KEY: StateKey = StateKey::new(9);
/// A total route duration.
pub const TOTAL_DURATION_KEY: StateKey = StateKey::new(10);

/// A numeric value which can be kept in [RouteState].
pub trait StateValue: Copy {
    /// Converts stored value into typed one.
    fn from_state(value: f64) -> Self;

    /// Converts typed value into stored one.
    fn into_state(self) -> f64;
}

impl StateValue for f64 {
    fn from_state(value: f64) -> Self {
        value
    }

    fn into_state(self) -> f64 {
        self
    }
}

impl StateValue for i32 {
    fn from_state(value: f64) -> Self {
        value as i32
    }

    fn into_state(self) -> f64 {
        self as f64
    }
}

custom_route_state!(TotalCost typeof Cost, COST_KEY);
custom_route_state!(TotalDistance typeof Distance, TOTAL_DISTANCE_KEY);
custom_route_state!(TotalDuration typeof Duration, TOTAL_DURATION_KEY);
custom_route_state!(LoadAtBeginning typeof Demand, LOAD_AT_BEGINNING_KEY);
custom_route_state!(LoadAtEnd typeof Demand, LOAD_AT_END_KEY);
custom_route_state!(MaxLoad typeof Demand, MAX_LOAD_KEY);

custom_activity_state!(CumulativeCost typeof Cost, COST_KEY);
custom_activity_state!(Load typeof Demand, LOAD_KEY);
custom_activity_state!(PastMaxLoad typeof Demand, PAST_MAX_LOAD_KEY);
custom_activity_state!(FutureMaxLoad typeof Demand, FUTURE_MAX_LOAD_KEY);

custom_slot_activity_state!(LatestStart typeof Timestamp, LATEST_START_KEY);
