//! Schedule (search space) model.
//!
//! A schedule declares everything the optimizer may draw from: the
//! activities to place, the facilitators who can run them, the rooms they
//! can be placed in, and the time-slot labels. It is loaded once and never
//! mutated during evolution — candidates reference it, they do not own it.

use serde::{Deserialize, Serialize};

use super::{Activity, ActivityId, Room};

/// The full search-space definition for one optimization run.
///
/// Activity order matters: it fixes the gene order used by crossover.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schedule {
    /// Activities to schedule, in gene order.
    pub activities: Vec<Activity>,
    /// Facilitator names available for assignment.
    pub facilitators: Vec<String>,
    /// Rooms available for assignment.
    pub rooms: Vec<Room>,
    /// Integer time-slot labels (e.g., hours of the day).
    pub times: Vec<i32>,
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an activity.
    pub fn with_activity(mut self, activity: Activity) -> Self {
        self.activities.push(activity);
        self
    }

    /// Adds a facilitator name.
    pub fn with_facilitator(mut self, name: impl Into<String>) -> Self {
        self.facilitators.push(name.into());
        self
    }

    /// Adds a room.
    pub fn with_room(mut self, room: Room) -> Self {
        self.rooms.push(room);
        self
    }

    /// Adds a time-slot label.
    pub fn with_time_slot(mut self, time: i32) -> Self {
        self.times.push(time);
        self
    }

    /// Number of activities (the gene count of every candidate).
    pub fn activity_count(&self) -> usize {
        self.activities.len()
    }

    /// Derived ids of all activities, in gene order.
    pub fn activity_ids(&self) -> impl Iterator<Item = ActivityId> + '_ {
        self.activities.iter().map(Activity::id)
    }

    /// Looks up an activity by its derived id.
    pub fn activity(&self, id: &ActivityId) -> Option<&Activity> {
        self.activities.iter().find(|a| &a.id() == id)
    }
}
