//! Generational evolution loop.
//!
//! [`EvolutionRunner`] orchestrates the full process: random
//! initialization → evaluation → softmax parent selection → crossover →
//! repeat, until average fitness stops improving by more than the
//! configured ratio (or the generation bound is hit).
//!
//! # Reference
//! Holland (1975), *Adaptation in Natural and Artificial Systems*

use rand::prelude::IndexedRandom;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::candidate::ScheduleAssignment;
use super::config::EvolutionConfig;
use super::selection;
use crate::fitness::FitnessRules;
use crate::models::Schedule;
use crate::validation::validate_schedule;

/// Result of an evolutionary run.
#[derive(Debug, Clone)]
pub struct EvolutionResult {
    /// The best candidate of the final generation (ties broken by first
    /// occurrence in population order).
    pub best: ScheduleAssignment,

    /// Fitness of `best`.
    pub best_fitness: f64,

    /// Number of generations produced after the initial population.
    pub generations: usize,

    /// Whether the run stopped on the convergence check, as opposed to
    /// hitting `max_generations`.
    pub converged: bool,

    /// Average fitness of every evaluated population, the initial one
    /// first.
    pub avg_fitness_history: Vec<f64>,
}

/// Per-generation progress snapshot passed to the observer callback.
#[derive(Debug, Clone, Copy)]
pub struct GenerationStats {
    /// Generation counter (0 = first derived generation).
    pub generation: usize,
    /// Average fitness of the generation just evaluated.
    pub avg_fitness: f64,
    /// Average fitness of the previous generation.
    pub prev_avg_fitness: f64,
    /// Mutation rate the generation was produced with.
    pub mutation_rate: f64,
}

/// Executes the evolutionary loop.
///
/// # Usage
///
/// ```ignore
/// let result = EvolutionRunner::run(&schedule, &FitnessRules::default(),
///     &EvolutionConfig::default().with_seed(42));
/// println!("best fitness: {}", result.best_fitness);
/// ```
pub struct EvolutionRunner;

impl EvolutionRunner {
    /// Runs the optimization.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid (call
    /// [`EvolutionConfig::validate`] first for a descriptive error) or if
    /// the schedule/rules fail
    /// [`validate_schedule`](crate::validation::validate_schedule).
    pub fn run(
        schedule: &Schedule,
        rules: &FitnessRules,
        config: &EvolutionConfig,
    ) -> EvolutionResult {
        Self::run_with_progress(schedule, rules, config, |_| {})
    }

    /// Runs the optimization, invoking `on_generation` after every
    /// generation is evaluated.
    ///
    /// # Panics
    /// See [`run`](Self::run).
    pub fn run_with_progress(
        schedule: &Schedule,
        rules: &FitnessRules,
        config: &EvolutionConfig,
        mut on_generation: impl FnMut(&GenerationStats),
    ) -> EvolutionResult {
        config.validate().expect("invalid EvolutionConfig");
        validate_schedule(schedule, rules).expect("invalid schedule for these fitness rules");

        let mut rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };

        let mut mutation_rate = config.mutation_rate;

        // Generation 0: uniform random candidates.
        let mut population: Vec<ScheduleAssignment> = (0..config.population_size)
            .map(|_| ScheduleAssignment::random(schedule, &mut rng))
            .collect();
        let mut fitness = evaluate_population(rules, schedule, &population, config.parallel);

        let mut avg_fitness_history = vec![mean(&fitness)];
        let mut generations = 0;
        let mut converged = false;

        for generation in 0..config.max_generations {
            let prev_avg = *avg_fitness_history
                .last()
                .expect("history holds at least the initial average");

            population = Self::next_generation(
                schedule,
                &population,
                &fitness,
                mutation_rate,
                config.parent_pool_size,
                &mut rng,
            );
            fitness = evaluate_population(rules, schedule, &population, config.parallel);

            let avg = mean(&fitness);
            avg_fitness_history.push(avg);
            generations = generation + 1;

            on_generation(&GenerationStats {
                generation,
                avg_fitness: avg,
                prev_avg_fitness: prev_avg,
                mutation_rate,
            });

            // The stopping rule only arms once past the warm-up window;
            // until then the mutation rate also stays untouched.
            if generation > config.min_generations {
                if avg / prev_avg < config.convergence_ratio {
                    converged = true;
                    break;
                }
                mutation_rate *= config.mutation_decay;
            }
        }

        let (best_index, best_fitness) = pick_best(&fitness);
        EvolutionResult {
            best: population.swap_remove(best_index),
            best_fitness,
            generations,
            converged,
            avg_fitness_history,
        }
    }

    /// Derives the next population: one softmax-weighted parent-pool draw,
    /// then one offspring per slot from a uniformly drawn pair of distinct
    /// pool members.
    fn next_generation<R: Rng>(
        schedule: &Schedule,
        population: &[ScheduleAssignment],
        fitness: &[f64],
        mutation_rate: f64,
        parent_pool_size: usize,
        rng: &mut R,
    ) -> Vec<ScheduleAssignment> {
        let probabilities = selection::softmax(fitness);
        let pool_indices =
            selection::sample_weighted_without_replacement(&probabilities, parent_pool_size, rng);
        let pool: Vec<&ScheduleAssignment> =
            pool_indices.iter().map(|&i| &population[i]).collect();

        (0..population.len())
            .map(|_| {
                let mut pair = pool.choose_multiple(rng, 2);
                let a = *pair.next().expect("pool holds at least two parents");
                let b = *pair.next().expect("pool holds at least two parents");
                ScheduleAssignment::crossover(schedule, a, b, mutation_rate, rng)
            })
            .collect()
    }
}

#[cfg(feature = "parallel")]
fn evaluate_population(
    rules: &FitnessRules,
    schedule: &Schedule,
    population: &[ScheduleAssignment],
    parallel: bool,
) -> Vec<f64> {
    use rayon::prelude::*;

    if parallel {
        // Scoring is pure; par_iter keeps population order in the gather.
        population
            .par_iter()
            .map(|candidate| rules.score(schedule, candidate))
            .collect()
    } else {
        population
            .iter()
            .map(|candidate| rules.score(schedule, candidate))
            .collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn evaluate_population(
    rules: &FitnessRules,
    schedule: &Schedule,
    population: &[ScheduleAssignment],
    _parallel: bool,
) -> Vec<f64> {
    population
        .iter()
        .map(|candidate| rules.score(schedule, candidate))
        .collect()
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Index and value of the maximum fitness; ties keep the earliest index.
fn pick_best(fitness: &[f64]) -> (usize, f64) {
    let mut best_index = 0;
    let mut best_fitness = fitness[0];
    for (i, &f) in fitness.iter().enumerate().skip(1) {
        if f > best_fitness {
            best_index = i;
            best_fitness = f;
        }
    }
    (best_index, best_fitness)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Activity, Room};

    /// Toy domain: the four required linked sections, two facilitators,
    /// two rooms, six slots.
    fn toy_schedule() -> Schedule {
        Schedule::new()
            .with_activity(
                Activity::new("SLA", 101)
                    .with_section("A")
                    .with_enrollment(40)
                    .with_preferred_facilitator("Glen"),
            )
            .with_activity(
                Activity::new("SLA", 101)
                    .with_section("B")
                    .with_enrollment(40)
                    .with_preferred_facilitator("Lock"),
            )
            .with_activity(
                Activity::new("SLA", 191)
                    .with_section("A")
                    .with_enrollment(25)
                    .with_preferred_facilitator("Glen"),
            )
            .with_activity(
                Activity::new("SLA", 191)
                    .with_section("B")
                    .with_enrollment(25)
                    .with_preferred_facilitator("Lock"),
            )
            .with_facilitator("Glen")
            .with_facilitator("Lock")
            .with_room(Room::new("Slater", 3, 45))
            .with_room(Room::new("Roman", 201, 50))
            .with_time_slot(10)
            .with_time_slot(11)
            .with_time_slot(12)
            .with_time_slot(13)
            .with_time_slot(14)
            .with_time_slot(15)
    }

    fn toy_config() -> EvolutionConfig {
        EvolutionConfig::default()
            .with_population_size(30)
            .with_parent_pool_size(10)
            .with_min_generations(10)
            .with_max_generations(60)
            .with_seed(42)
    }

    #[test]
    fn test_run_returns_covering_best() {
        let schedule = toy_schedule();
        let result = EvolutionRunner::run(&schedule, &FitnessRules::default(), &toy_config());

        assert!(result.best.covers(&schedule));
        assert!(result.best_fitness.is_finite());
        assert!(result.generations > 0);
    }

    #[test]
    fn test_best_fitness_matches_reported_candidate() {
        let schedule = toy_schedule();
        let rules = FitnessRules::default();
        let result = EvolutionRunner::run(&schedule, &rules, &toy_config());

        let rescored = rules.score(&schedule, &result.best);
        assert_eq!(rescored.to_bits(), result.best_fitness.to_bits());
    }

    #[test]
    fn test_best_beats_initial_population() {
        let schedule = toy_schedule();
        let rules = FitnessRules::default();
        let config = toy_config().with_population_size(10).with_parent_pool_size(4);

        let result = EvolutionRunner::run(&schedule, &rules, &config);

        // Rebuild generation 0 from the same seed: the first
        // population-size draws of the run are identical.
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..config.population_size {
            let initial = ScheduleAssignment::random(&schedule, &mut rng);
            assert!(
                result.best_fitness >= rules.score(&schedule, &initial),
                "best must be at least as fit as every generation-0 member"
            );
        }
    }

    #[test]
    fn test_minimal_domain_runs_to_convergence() {
        // Smallest domain the evaluator accepts: the four linked sections,
        // one facilitator, one room, two slots. Conflicts are unavoidable;
        // the run must still converge and report a covering best.
        let schedule = Schedule::new()
            .with_activity(Activity::new("SLA", 101).with_section("A").with_enrollment(40))
            .with_activity(Activity::new("SLA", 101).with_section("B").with_enrollment(40))
            .with_activity(Activity::new("SLA", 191).with_section("A").with_enrollment(40))
            .with_activity(Activity::new("SLA", 191).with_section("B").with_enrollment(40))
            .with_facilitator("Glen")
            .with_room(Room::new("Slater", 3, 45))
            .with_time_slot(0)
            .with_time_slot(1);
        let rules = FitnessRules::default();
        let config = EvolutionConfig::default()
            .with_population_size(10)
            .with_parent_pool_size(4)
            .with_min_generations(30)
            .with_max_generations(500)
            .with_seed(7);

        let result = EvolutionRunner::run(&schedule, &rules, &config);

        assert!(result.best.covers(&schedule));
        assert!(result.converged, "a two-slot domain cannot keep improving 1% forever");

        // The reported best dominates the whole initial population.
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..config.population_size {
            let initial = ScheduleAssignment::random(&schedule, &mut rng);
            assert!(result.best_fitness >= rules.score(&schedule, &initial));
        }
    }

    #[test]
    fn test_history_tracks_every_generation() {
        let schedule = toy_schedule();
        let result = EvolutionRunner::run(&schedule, &FitnessRules::default(), &toy_config());

        // Initial average plus one entry per derived generation.
        assert_eq!(result.avg_fitness_history.len(), result.generations + 1);
        assert!(result.avg_fitness_history.iter().all(|f| f.is_finite()));
    }

    #[test]
    fn test_generation_bound_is_respected() {
        let schedule = toy_schedule();
        let config = toy_config().with_max_generations(5).with_min_generations(100);
        let result = EvolutionRunner::run(&schedule, &FitnessRules::default(), &config);

        assert_eq!(result.generations, 5);
        assert!(!result.converged);
    }

    #[test]
    fn test_convergence_check_waits_for_warmup() {
        let schedule = toy_schedule();
        let config = toy_config().with_min_generations(20).with_max_generations(200);
        let result = EvolutionRunner::run(&schedule, &FitnessRules::default(), &config);

        // The check first fires at generation min_generations + 1, so a
        // converged run has produced at least min_generations + 2
        // populations (counter is 0-based).
        if result.converged {
            assert!(result.generations >= config.min_generations + 2);
        }
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let schedule = toy_schedule();
        let rules = FitnessRules::default();

        let a = EvolutionRunner::run(&schedule, &rules, &toy_config());
        let b = EvolutionRunner::run(&schedule, &rules, &toy_config());

        assert_eq!(a.best_fitness.to_bits(), b.best_fitness.to_bits());
        assert_eq!(a.generations, b.generations);
        assert_eq!(a.avg_fitness_history.len(), b.avg_fitness_history.len());
        assert_eq!(a.best, b.best);
    }

    #[test]
    fn test_progress_observer_sees_every_generation() {
        let schedule = toy_schedule();
        let mut seen = Vec::new();
        let result = EvolutionRunner::run_with_progress(
            &schedule,
            &FitnessRules::default(),
            &toy_config(),
            |stats| seen.push(stats.generation),
        );

        assert_eq!(seen.len(), result.generations);
        assert_eq!(seen.first(), Some(&0));
        assert_eq!(seen.last(), Some(&(result.generations - 1)));
    }

    #[test]
    fn test_mutation_rate_decays_after_warmup() {
        let schedule = toy_schedule();
        let config = toy_config()
            .with_min_generations(3)
            .with_max_generations(10)
            // Ratio below any reachable value: never converge, always decay.
            .with_convergence_ratio(-1e18);

        let mut rates = Vec::new();
        EvolutionRunner::run_with_progress(
            &schedule,
            &FitnessRules::default(),
            &config,
            |stats| rates.push(stats.mutation_rate),
        );

        // Untouched through the warm-up window, halved afterwards.
        assert!(rates[..=4].iter().all(|&r| (r - 0.1).abs() < 1e-12));
        assert!((rates[5] - 0.05).abs() < 1e-12);
        assert!((rates[6] - 0.025).abs() < 1e-12);
    }

    #[test]
    fn test_next_generation_keeps_population_size() {
        let schedule = toy_schedule();
        let rules = FitnessRules::default();
        let mut rng = SmallRng::seed_from_u64(42);

        let population: Vec<ScheduleAssignment> = (0..20)
            .map(|_| ScheduleAssignment::random(&schedule, &mut rng))
            .collect();
        let fitness = evaluate_population(&rules, &schedule, &population, false);

        let next =
            EvolutionRunner::next_generation(&schedule, &population, &fitness, 0.1, 6, &mut rng);
        assert_eq!(next.len(), 20);
        assert!(next.iter().all(|c| c.covers(&schedule)));
    }

    #[test]
    #[should_panic(expected = "invalid EvolutionConfig")]
    fn test_run_rejects_invalid_config() {
        let schedule = toy_schedule();
        let config = EvolutionConfig::default().with_max_generations(0);
        EvolutionRunner::run(&schedule, &FitnessRules::default(), &config);
    }

    #[test]
    #[should_panic(expected = "invalid schedule")]
    fn test_run_rejects_unvalidated_schedule() {
        // Missing the linked sections entirely.
        let schedule = Schedule::new()
            .with_activity(Activity::new("CS", 100).with_enrollment(10))
            .with_facilitator("Glen")
            .with_room(Room::new("Slater", 3, 45))
            .with_time_slot(10);
        EvolutionRunner::run(&schedule, &FitnessRules::default(), &toy_config());
    }
}
