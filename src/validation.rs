//! Load-time validation of a schedule against a fitness rule set.
//!
//! Every condition the evaluator and the evolution loop rely on is checked
//! here, before any candidate is generated:
//! - Non-empty activity, facilitator, room, and time-slot sets
//! - Unique derived activity ids
//! - Every room's building mapped to a cluster
//! - Every linked section present in the schedule
//!
//! These are configuration errors: the run cannot proceed, so all of them
//! are collected and reported together rather than one at a time.

use std::collections::HashSet;

use crate::fitness::FitnessRules;
use crate::models::Schedule;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A domain set (activities, facilitators, rooms, times) is empty.
    EmptyDomain,
    /// Two activities derive the same id.
    DuplicateActivityId,
    /// A room's building is missing from the cluster map.
    UnmappedBuilding,
    /// A linked section id does not exist in the schedule.
    MissingLinkedSection,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a schedule against a fitness rule set.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with every detected issue.
pub fn validate_schedule(schedule: &Schedule, rules: &FitnessRules) -> ValidationResult {
    let mut errors = Vec::new();

    if schedule.activities.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyDomain,
            "schedule has no activities",
        ));
    }
    if schedule.facilitators.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyDomain,
            "schedule has no facilitators",
        ));
    }
    if schedule.rooms.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyDomain,
            "schedule has no rooms",
        ));
    }
    if schedule.times.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyDomain,
            "schedule has no time slots",
        ));
    }

    // Derived ids must be unique: they key every candidate.
    let mut seen_ids = HashSet::new();
    for activity in &schedule.activities {
        let id = activity.id();
        if !seen_ids.insert(id.clone()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateActivityId,
                format!("duplicate activity id: {id}"),
            ));
        }
    }

    // Travel scoring needs a cluster for every building in use.
    let mut unmapped = HashSet::new();
    for room in &schedule.rooms {
        if rules.cluster(&room.building).is_none() && unmapped.insert(room.building.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnmappedBuilding,
                format!("building '{}' has no cluster mapping", room.building),
            ));
        }
    }

    // The linked-section rules dereference these four ids unconditionally.
    for id in rules.linked.section_ids() {
        if !seen_ids.contains(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingLinkedSection,
                format!("linked section '{id}' is not in the schedule"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
