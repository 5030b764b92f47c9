//! Room model.
//!
//! Rooms are the physical spaces activities are scheduled into. A room is
//! a plain value: two rooms with the same building, number, and capacity
//! are the same room wherever they appear.

use serde::{Deserialize, Serialize};

/// A room that can host activities.
///
/// Compared, hashed, and ordered by value — rooms are used directly as
/// grouping keys when detecting room/time conflicts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Room {
    /// Building the room is in (e.g., "Slater").
    pub building: String,
    /// Room number within the building.
    pub number: i32,
    /// Seating capacity.
    pub capacity: i32,
}

impl Room {
    /// Creates a new room.
    pub fn new(building: impl Into<String>, number: i32, capacity: i32) -> Self {
        Self {
            building: building.into(),
            number,
            capacity,
        }
    }
}

impl std::fmt::Display for Room {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.building, self.number)
    }
}
