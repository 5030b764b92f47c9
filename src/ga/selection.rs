//! Parent selection.
//!
//! Selection pressure comes from a Boltzmann-style transform: the fitness
//! vector is pushed through a numerically stable softmax, and the parent
//! pool is drawn from the resulting distribution **without replacement**
//! by sequential renormalization. Fitter candidates are exponentially more
//! likely to parent the next generation, but no candidate is ever drawn
//! twice into one pool.
//!
//! # References
//!
//! - Goldberg (1990), "A Note on Boltzmann Tournament Selection for
//!   Genetic Algorithms and Population-Oriented Simulated Annealing"
//! - Efraimidis & Spirakis (2006), "Weighted Random Sampling with a
//!   Reservoir" (alternative no-replacement scheme)

use rand::Rng;

/// Numerically stable softmax.
///
/// Subtracts the maximum before exponentiating so large fitness values
/// cannot overflow. Returns a probability vector summing to 1.
pub fn softmax(values: &[f64]) -> Vec<f64> {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = values.iter().map(|&v| (v - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}

/// Draws `count` distinct indices, weighted by `weights`, without
/// replacement.
///
/// Sequential renormalization: each draw is a cumulative-sum roulette spin
/// over the remaining indices, and the winner is removed before the next
/// spin. If the remaining weight mass is exhausted (all zeros), the draw
/// falls back to uniform over what is left.
///
/// # Panics
///
/// Panics if `count > weights.len()`.
pub fn sample_weighted_without_replacement<R: Rng>(
    weights: &[f64],
    count: usize,
    rng: &mut R,
) -> Vec<usize> {
    assert!(
        count <= weights.len(),
        "cannot draw {count} distinct indices from {} weights",
        weights.len()
    );

    let mut remaining: Vec<(usize, f64)> = weights.iter().copied().enumerate().collect();
    let mut drawn = Vec::with_capacity(count);

    for _ in 0..count {
        let total: f64 = remaining.iter().map(|(_, w)| w).sum();
        let winner = if total > 0.0 {
            let threshold = rng.random_range(0.0..total);
            let mut cumulative = 0.0;
            let mut winner = remaining.len() - 1; // floating-point fallback
            for (pos, (_, w)) in remaining.iter().enumerate() {
                cumulative += w;
                if cumulative > threshold {
                    winner = pos;
                    break;
                }
            }
            winner
        } else {
            rng.random_range(0..remaining.len())
        };
        drawn.push(remaining.swap_remove(winner).0);
    }

    drawn
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_softmax_sums_to_one() {
        let probs = softmax(&[-0.9, 2.4, 0.0, 5.1]);
        let total: f64 = probs.iter().sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert!(probs.iter().all(|&p| p > 0.0));
    }

    #[test]
    fn test_softmax_orders_by_fitness() {
        let probs = softmax(&[1.0, 3.0, 2.0]);
        assert!(probs[1] > probs[2]);
        assert!(probs[2] > probs[0]);
    }

    #[test]
    fn test_softmax_is_shift_invariant() {
        let a = softmax(&[0.0, 1.0, 2.0]);
        let b = softmax(&[100.0, 101.0, 102.0]);
        for (x, y) in a.iter().zip(&b) {
            assert!((x - y).abs() < 1e-12);
        }
    }

    #[test]
    fn test_softmax_survives_extreme_values() {
        // Naive exponentiation of 1e3 overflows; subtracting the max must not.
        let probs = softmax(&[1000.0, 999.0]);
        assert!(probs.iter().all(|p| p.is_finite()));
        assert!(probs[0] > probs[1]);
    }

    #[test]
    fn test_sample_draws_distinct_indices() {
        let weights = vec![0.1; 20];
        let mut rng = SmallRng::seed_from_u64(42);

        for _ in 0..100 {
            let drawn = sample_weighted_without_replacement(&weights, 8, &mut rng);
            assert_eq!(drawn.len(), 8);
            let mut sorted = drawn.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), 8, "indices must be distinct: {drawn:?}");
            assert!(drawn.iter().all(|&i| i < 20));
        }
    }

    #[test]
    fn test_sample_full_draw_is_a_permutation() {
        let weights = vec![0.5, 1.0, 2.0, 4.0];
        let mut rng = SmallRng::seed_from_u64(42);

        let mut drawn = sample_weighted_without_replacement(&weights, 4, &mut rng);
        drawn.sort_unstable();
        assert_eq!(drawn, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_sample_favors_heavy_weights() {
        let weights = vec![0.01, 0.01, 0.96, 0.01, 0.01];
        let mut rng = SmallRng::seed_from_u64(42);

        let mut first_draw_counts = [0u32; 5];
        let n = 10_000;
        for _ in 0..n {
            let drawn = sample_weighted_without_replacement(&weights, 1, &mut rng);
            first_draw_counts[drawn[0]] += 1;
        }
        assert!(
            first_draw_counts[2] > 9_000,
            "index with 96% of the mass drawn only {}/{n} times",
            first_draw_counts[2]
        );
    }

    #[test]
    fn test_sample_handles_zero_mass() {
        let weights = vec![0.0, 0.0, 0.0];
        let mut rng = SmallRng::seed_from_u64(42);

        let mut drawn = sample_weighted_without_replacement(&weights, 3, &mut rng);
        drawn.sort_unstable();
        assert_eq!(drawn, vec![0, 1, 2]);
    }

    #[test]
    #[should_panic(expected = "cannot draw")]
    fn test_sample_rejects_oversized_draw() {
        let mut rng = SmallRng::seed_from_u64(42);
        sample_weighted_without_replacement(&[1.0, 1.0], 3, &mut rng);
    }

    #[test]
    fn test_softmax_then_sample_spans_population() {
        // The two stages composed, the way the evolution loop uses them.
        let fitness = vec![-2.0, 1.5, 0.0, 3.0, -0.5, 2.2];
        let probs = softmax(&fitness);
        let mut rng = SmallRng::seed_from_u64(42);

        let drawn = sample_weighted_without_replacement(&probs, 6, &mut rng);
        let mut sorted = drawn;
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2, 3, 4, 5]);
    }
}
