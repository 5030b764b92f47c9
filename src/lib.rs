//! Course timetabling via genetic algorithm.
//!
//! Assigns university class sections to facilitators, rooms, and time
//! slots by evolving whole-timetable candidates against a multi-term
//! fitness rule set: room-capacity fit, facilitator preference and load,
//! room and facilitator conflicts, building-to-building travel between
//! consecutive slots, and spacing of linked course sections.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Activity`, `ActivityId`, `Room`,
//!   `Schedule`
//! - **`fitness`**: `FitnessRules` and the candidate scoring function
//! - **`ga`**: Candidates, genetic operators, and the evolution loop
//! - **`validation`**: Load-time integrity checks (empty sets, duplicate
//!   ids, unmapped buildings, missing linked sections)
//!
//! # Usage
//!
//! ```no_run
//! use u_timetable::fitness::FitnessRules;
//! use u_timetable::ga::{EvolutionConfig, EvolutionRunner};
//! use u_timetable::models::Schedule;
//! use u_timetable::validation::validate_schedule;
//!
//! let schedule: Schedule = todo!("loaded by the caller");
//! let rules = FitnessRules::default();
//! validate_schedule(&schedule, &rules).expect("schedule fits the rule set");
//!
//! let result = EvolutionRunner::run(&schedule, &rules, &EvolutionConfig::default());
//! println!("best fitness: {}", result.best_fitness);
//! ```
//!
//! Loading schedules from files and rendering results are left to the
//! caller; all domain types are serde-serializable for that purpose.

pub mod fitness;
pub mod ga;
pub mod models;
pub mod validation;
