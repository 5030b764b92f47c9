//! Activity (class section) model.
//!
//! An activity is one course section that needs a facilitator, a room, and
//! a time slot. Each activity derives a unique identifier from its subject,
//! course number, and section letter; that identifier is the key used
//! throughout the optimizer.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Derived activity identifier: subject + 3-digit course number + section.
///
/// `Activity::new("SLA", 101).with_section("A")` yields the id `"SLA101A"`.
/// Ids must be unique within a [`Schedule`](super::Schedule); duplicates are
/// rejected by [`validate_schedule`](crate::validation::validate_schedule).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityId(String);

impl ActivityId {
    /// Creates an id from an already-formatted string (e.g., `"SLA101A"`).
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActivityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ActivityId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A class section to be scheduled.
///
/// Carries the expected enrollment (matched against room capacity) and the
/// facilitators who prefer, or are at least able, to run this section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    /// Subject code (e.g., "SLA").
    pub subject: String,
    /// Course number (zero-padded to 3 digits in the derived id).
    pub course_number: i32,
    /// Section letter, if the course has more than one section.
    pub section: Option<String>,
    /// Expected number of enrolled students.
    pub expected_enrollment: i32,
    /// Facilitators who prefer to run this section.
    pub preferred_facilitators: HashSet<String>,
    /// Facilitators who can run this section if needed.
    pub other_facilitators: HashSet<String>,
}

impl Activity {
    /// Creates a new activity with no section and no facilitator lists.
    pub fn new(subject: impl Into<String>, course_number: i32) -> Self {
        Self {
            subject: subject.into(),
            course_number,
            section: None,
            expected_enrollment: 0,
            preferred_facilitators: HashSet::new(),
            other_facilitators: HashSet::new(),
        }
    }

    /// Sets the section letter.
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    /// Sets the expected enrollment.
    pub fn with_enrollment(mut self, expected: i32) -> Self {
        self.expected_enrollment = expected;
        self
    }

    /// Adds a preferred facilitator.
    pub fn with_preferred_facilitator(mut self, name: impl Into<String>) -> Self {
        self.preferred_facilitators.insert(name.into());
        self
    }

    /// Adds an acceptable (non-preferred) facilitator.
    pub fn with_other_facilitator(mut self, name: impl Into<String>) -> Self {
        self.other_facilitators.insert(name.into());
        self
    }

    /// Derived identifier: subject, course number zero-padded to 3 digits,
    /// and the section letter if present.
    pub fn id(&self) -> ActivityId {
        ActivityId(format!(
            "{}{:03}{}",
            self.subject,
            self.course_number,
            self.section.as_deref().unwrap_or("")
        ))
    }
}
