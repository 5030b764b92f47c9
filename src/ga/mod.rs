//! Genetic-algorithm optimization over candidate timetables.
//!
//! The search works on whole-timetable chromosomes: one gene per activity,
//! each gene a (facilitator, room, time) triple. Parents are drawn by
//! softmax-weighted sampling without replacement, recombined at a single
//! random chiasma, and mutated per gene by fresh random draws folded into
//! the crossover walk.
//!
//! # Key Types
//!
//! - [`ScheduleAssignment`] / [`ActivityAssignment`]: candidate and gene
//! - [`EvolutionConfig`]: loop parameters (population, pool, rates, bounds)
//! - [`EvolutionRunner`]: executes the generational loop
//! - [`EvolutionResult`]: best candidate plus run statistics
//!
//! # Submodules
//!
//! - [`selection`]: softmax and no-replacement weighted sampling
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*

mod candidate;
mod config;
mod runner;
pub mod selection;

pub use candidate::{ActivityAssignment, ScheduleAssignment};
pub use config::EvolutionConfig;
pub use runner::{EvolutionResult, EvolutionRunner, GenerationStats};
