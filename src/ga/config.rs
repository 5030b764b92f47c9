//! Evolution configuration.
//!
//! [`EvolutionConfig`] holds all parameters that control the generational
//! loop. Defaults match the reference run the fitness weights were
//! calibrated with: population 500, parent pool 100, mutation rate 0.1
//! halving once past the convergence-check threshold.

/// Configuration for the evolutionary run.
///
/// # Builder Pattern
///
/// ```
/// use u_timetable::ga::EvolutionConfig;
///
/// let config = EvolutionConfig::default()
///     .with_population_size(200)
///     .with_parent_pool_size(40)
///     .with_mutation_rate(0.05)
///     .with_seed(42);
/// assert_eq!(config.population_size, 200);
/// ```
#[derive(Debug, Clone)]
pub struct EvolutionConfig {
    /// Number of candidates per generation. Fixed across the run.
    pub population_size: usize,

    /// Number of parents drawn (without replacement) each generation.
    pub parent_pool_size: usize,

    /// Initial per-gene probability of a fresh random draw during
    /// crossover (0.0–1.0).
    pub mutation_rate: f64,

    /// Multiplicative decay applied to `mutation_rate` each generation
    /// once the convergence check is active.
    pub mutation_decay: f64,

    /// Generations to run before the convergence check (and the decay)
    /// kicks in.
    pub min_generations: usize,

    /// Convergence threshold on the ratio of consecutive average
    /// fitnesses: below this, the run stops. 1.01 = stop when average
    /// fitness improves by less than 1%.
    pub convergence_ratio: f64,

    /// Hard upper bound on generations. Guarantees termination even when
    /// average fitness keeps improving past `convergence_ratio` forever.
    pub max_generations: usize,

    /// Whether to evaluate fitness in parallel. Only effective with the
    /// `parallel` cargo feature; evaluation order never affects results.
    pub parallel: bool,

    /// Random seed for reproducibility. `None` draws OS entropy.
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 500,
            parent_pool_size: 100,
            mutation_rate: 0.1,
            mutation_decay: 0.5,
            min_generations: 100,
            convergence_ratio: 1.01,
            max_generations: 10_000,
            parallel: false,
            seed: None,
        }
    }
}

impl EvolutionConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the parent pool size.
    pub fn with_parent_pool_size(mut self, n: usize) -> Self {
        self.parent_pool_size = n;
        self
    }

    /// Sets the initial mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation decay factor.
    pub fn with_mutation_decay(mut self, decay: f64) -> Self {
        self.mutation_decay = decay.clamp(0.0, 1.0);
        self
    }

    /// Sets the number of generations before the convergence check.
    pub fn with_min_generations(mut self, n: usize) -> Self {
        self.min_generations = n;
        self
    }

    /// Sets the convergence ratio.
    pub fn with_convergence_ratio(mut self, ratio: f64) -> Self {
        self.convergence_ratio = ratio;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Enables or disables parallel fitness evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.population_size < 2 {
            return Err("population_size must be at least 2".into());
        }
        if self.parent_pool_size < 2 {
            return Err("parent_pool_size must be at least 2 to form a pairing".into());
        }
        if self.parent_pool_size > self.population_size {
            return Err("parent_pool_size cannot exceed population_size".into());
        }
        if self.max_generations == 0 {
            return Err("max_generations must be at least 1".into());
        }
        if !self.convergence_ratio.is_finite() {
            return Err("convergence_ratio must be finite".into());
        }
        Ok(())
    }
}
