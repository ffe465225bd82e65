#[cfg(test)]
#[path = "../../../tests/unit/construction/heuristics/insertions_test.rs"]
mod insertions_test;

use crate::construction::heuristics::RouteId;
use crate::models::common::{Cost, Timestamp};
use crate::models::problem::{Actor, Job};
use crate::models::solution::Activity;
use crate::utils::compare_floats;
use std::cmp::Ordering;
use std::sync::Arc;

/// Specifies insertion result variant.
pub enum InsertionResult {
    /// Successful insertion result.
    Success(InsertionSuccess),
    /// Insertion failure.
    Failure(InsertionFailure),
}

/// Specifies insertion success result needed to insert job into tour.
pub struct InsertionSuccess {
    /// Specifies marginal cost of the insertion.
    pub cost: Cost,

    /// Original job to be inserted.
    pub job: Job,

    /// Specifies activities within the tour index of an activity after which they have to be
    /// inserted, in the original tour.
    pub activities: Vec<(Activity, usize)>,

    /// An actor which serves the route after insertion.
    pub actor: Arc<Actor>,

    /// A departure time from route start.
    pub departure: Timestamp,

    /// A route where job is inserted. None means a new route.
    pub route: Option<RouteId>,
}

/// Specifies insertion failure.
#[derive(Clone, Debug)]
pub struct InsertionFailure {
    /// Failed constraint code.
    pub constraint: i32,
    /// A flag which signalizes that algorithm should stop trying to insert at next positions.
    pub stopped: bool,
    /// Original job failed to be inserted.
    pub job: Option<Job>,
}

/// A code of failure when no constraint was violated, but no position was found.
pub const UNKNOWN_FAILURE_CODE: i32 = 0;

impl InsertionResult {
    /// Creates result which represents insertion success.
    pub fn make_success(
        cost: Cost,
        job: Job,
        activities: Vec<(Activity, usize)>,
        actor: Arc<Actor>,
        departure: Timestamp,
        route: Option<RouteId>,
    ) -> Self {
        Self::Success(InsertionSuccess { cost, job, activities, actor, departure, route })
    }

    /// Creates result which represents insertion failure.
    pub fn make_failure() -> Self {
        Self::make_failure_with_code(UNKNOWN_FAILURE_CODE, false, None)
    }

    /// Creates result which represents insertion failure with given code.
    pub fn make_failure_with_code(code: i32, stopped: bool, job: Option<Job>) -> Self {
        Self::Failure(InsertionFailure { constraint: code, stopped, job })
    }

    /// Compares two insertion results and returns the cheapest by cost. On tie, left one is kept.
    pub fn choose_best_result(left: Self, right: Self) -> Self {
        match (&left, &right) {
            (Self::Success(_), Self::Failure(_)) => left,
            (Self::Failure(_), Self::Success(_)) => right,
            (Self::Success(lhs), Self::Success(rhs)) => {
                if compare_floats(lhs.cost, rhs.cost) == Ordering::Greater {
                    right
                } else {
                    left
                }
            }
            (Self::Failure(_), Self::Failure(rhs)) => {
                if rhs.constraint == UNKNOWN_FAILURE_CODE {
                    left
                } else {
                    right
                }
            }
        }
    }

    /// Returns insertion result as success.
    pub fn as_success(&self) -> Option<&InsertionSuccess> {
        match self {
            Self::Success(success) => Some(success),
            Self::Failure(_) => None,
        }
    }

    /// Returns insertion result as success.
    pub fn into_success(self) -> Option<InsertionSuccess> {
        match self {
            Self::Success(success) => Some(success),
            Self::Failure(_) => None,
        }
    }

    /// Returns insertion result as failure.
    pub fn as_failure(&self) -> Option<&InsertionFailure> {
        match self {
            Self::Success(_) => None,
            Self::Failure(failure) => Some(failure),
        }
    }
}
