//! Candidate timetables (chromosomes).
//!
//! A [`ScheduleAssignment`] is one complete proposed timetable: one
//! [`ActivityAssignment`] gene per schedule activity, keyed by activity id.
//! Candidates are built by uniform random draws or by crossover, and are
//! immutable once built — mutation happens inside crossover as a per-gene
//! random replacement, never as a pass over a finished candidate.

use std::collections::HashMap;

use rand::prelude::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::{Activity, ActivityId, Room, Schedule};

/// One gene: the facilitator, room, and time slot assigned to an activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityAssignment {
    /// The activity this gene decides.
    pub activity: ActivityId,
    /// Assigned facilitator name.
    pub facilitator: String,
    /// Assigned room.
    pub room: Room,
    /// Assigned time-slot label.
    pub time: i32,
}

impl ActivityAssignment {
    /// Draws a uniformly random gene for one activity.
    ///
    /// Facilitator, room, and time are drawn independently from the
    /// schedule's sets. No feasibility check happens here — infeasible
    /// combinations are expected and penalized by fitness, not rejected.
    ///
    /// # Panics
    ///
    /// Panics if the schedule's facilitator, room, or time set is empty
    /// (rejected up front by
    /// [`validate_schedule`](crate::validation::validate_schedule)).
    pub fn random<R: Rng>(schedule: &Schedule, activity: &Activity, rng: &mut R) -> Self {
        Self {
            activity: activity.id(),
            facilitator: schedule
                .facilitators
                .choose(rng)
                .expect("schedule has no facilitators")
                .clone(),
            room: schedule
                .rooms
                .choose(rng)
                .expect("schedule has no rooms")
                .clone(),
            time: *schedule.times.choose(rng).expect("schedule has no time slots"),
        }
    }
}

/// One candidate timetable: a gene per activity, keyed by activity id.
///
/// Invariant: the key set equals the schedule's activity-id set — no
/// activity unassigned, none duplicated. [`covers`](Self::covers) checks
/// the invariant against the schedule a candidate was drawn from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleAssignment {
    /// Genes by activity id.
    pub assignments: HashMap<ActivityId, ActivityAssignment>,
}

impl ScheduleAssignment {
    /// Draws a fully random candidate: one random gene per activity.
    pub fn random<R: Rng>(schedule: &Schedule, rng: &mut R) -> Self {
        let assignments = schedule
            .activities
            .iter()
            .map(|activity| (activity.id(), ActivityAssignment::random(schedule, activity, rng)))
            .collect();
        Self { assignments }
    }

    /// The gene for an activity, if assigned.
    pub fn get(&self, id: &ActivityId) -> Option<&ActivityAssignment> {
        self.assignments.get(id)
    }

    /// Number of genes.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Whether the candidate has no genes.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Checks the key-set invariant: every schedule activity assigned
    /// exactly once, and nothing else.
    pub fn covers(&self, schedule: &Schedule) -> bool {
        self.assignments.len() == schedule.activity_count()
            && schedule.activity_ids().all(|id| self.assignments.contains_key(&id))
    }

    /// Recombines two parents into one offspring.
    ///
    /// A single crossover point (chiasma) is drawn uniformly from
    /// `[0, activity_count)`. Walking the schedule's gene order, each gene
    /// is replaced by a fresh random draw with probability
    /// `mutation_rate`; otherwise it is copied from parent `a` before the
    /// chiasma and from parent `b` after it. Mutation is this per-gene
    /// branch — there is no separate pass over the finished offspring.
    ///
    /// # Panics
    ///
    /// Panics if the schedule has no activities, or if either parent is
    /// missing a gene for a schedule activity.
    pub fn crossover<R: Rng>(
        schedule: &Schedule,
        a: &Self,
        b: &Self,
        mutation_rate: f64,
        rng: &mut R,
    ) -> Self {
        let chiasma = rng.random_range(0..schedule.activity_count());

        let mut assignments = HashMap::with_capacity(schedule.activity_count());
        for (i, activity) in schedule.activities.iter().enumerate() {
            let id = activity.id();
            let gene = if rng.random::<f64>() < mutation_rate {
                ActivityAssignment::random(schedule, activity, rng)
            } else if i < chiasma {
                a.gene(&id).clone()
            } else {
                b.gene(&id).clone()
            };
            assignments.insert(id, gene);
        }

        Self { assignments }
    }

    fn gene(&self, id: &ActivityId) -> &ActivityAssignment {
        self.assignments
            .get(id)
            .unwrap_or_else(|| panic!("parent has no assignment for activity '{id}'"))
    }
}
