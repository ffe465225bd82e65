#[cfg(test)]
#[path = "../../../tests/unit/models/solution/tour_test.rs"]
mod tour_test;

use crate::models::problem::{Actor, Job};
use crate::models::solution::Activity;
use rustc_hash::FxHashSet;
use std::slice::Iter;

/// Represents a closed tour: a smart container for jobs with their associated activities
/// bracketed by start and end sentinels.
#[derive(Clone)]
pub struct Tour {
    /// Stores activities in the order they are performed.
    activities: Vec<Activity>,

    /// Stores jobs assigned to the tour.
    jobs: FxHashSet<Job>,
}

impl Tour {
    /// Creates a new empty tour with start and end using actor properties.
    pub fn new(actor: &Actor) -> Self {
        Self { activities: vec![Activity::new_start(actor), Activity::new_end(actor)], jobs: FxHashSet::default() }
    }

    /// Replaces start and end sentinels using given actor properties.
    pub fn set_sentinels(&mut self, actor: &Actor) {
        let last = self.activities.len() - 1;
        self.activities[0] = Activity::new_start(actor);
        self.activities[last] = Activity::new_end(actor);
    }

    /// Inserts job activity at specified index, which must lie between sentinels.
    pub fn insert_at(&mut self, activity: Activity, index: usize) -> &mut Tour {
        assert!(index > 0 && index < self.activities.len(), "insertion index {index} is out of tour range");
        let job = activity.job().expect("only job activities can be inserted into the tour");

        self.jobs.insert(job);
        self.activities.insert(index, activity);

        self
    }

    /// Inserts job activity right before the end sentinel.
    pub fn insert_last(&mut self, activity: Activity) -> &mut Tour {
        self.insert_at(activity, self.activities.len() - 1)
    }

    /// Removes job within its activities from the tour.
    pub fn remove(&mut self, job: &Job) -> bool {
        self.activities.retain(|a| !a.has_same_job(job));
        self.jobs.remove(job)
    }

    /// Returns all activities in the tour.
    pub fn all_activities(&self) -> Iter<'_, Activity> {
        self.activities.iter()
    }

    /// Returns activities of given job.
    pub fn job_activities<'a>(&'a self, job: &'a Job) -> impl Iterator<Item = &'a Activity> + 'a {
        self.activities.iter().filter(move |a| a.has_same_job(job))
    }

    /// Returns all jobs in the tour.
    pub fn jobs(&self) -> impl Iterator<Item = &Job> + '_ {
        self.jobs.iter()
    }

    /// Returns activity by its index in the tour.
    pub fn get(&self, index: usize) -> Option<&Activity> {
        self.activities.get(index)
    }

    /// Returns mutable activity by its index in the tour.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Activity> {
        self.activities.get_mut(index)
    }

    /// Returns start activity in the tour.
    pub fn start(&self) -> &Activity {
        &self.activities[0]
    }

    /// Returns end activity in the tour.
    pub fn end(&self) -> &Activity {
        &self.activities[self.activities.len() - 1]
    }

    /// Checks whether job is present in tour.
    pub fn contains(&self, job: &Job) -> bool {
        self.jobs.contains(job)
    }

    /// Returns index of the first job activity in the tour.
    pub fn index(&self, job: &Job) -> Option<usize> {
        self.activities.iter().position(|a| a.has_same_job(job))
    }

    /// Checks whether tour has jobs.
    pub fn has_jobs(&self) -> bool {
        !self.jobs.is_empty()
    }

    /// Returns amount of job activities.
    pub fn job_activity_count(&self) -> usize {
        self.activities.len() - 2
    }

    /// Returns total amount of activities in tour, including sentinels.
    pub fn total(&self) -> usize {
        self.activities.len()
    }

    /// Returns amount of jobs.
    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }
}
