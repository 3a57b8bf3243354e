//! Selection strategies for the GA.
//!
//! Selection determines which genomes are chosen as parents for
//! crossover. Different strategies provide different selection pressure.
//! All strategies assume **maximization** (higher fitness = better) and
//! sample with replacement.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use rand::Rng;

use crate::error::{Error, Result};

use super::types::{FitnessFunction, Genome, SelectionOperator};

/// Selection strategy for choosing parents.
///
/// # Examples
///
/// ```
/// use u_bitevo::ga::Selection;
///
/// // Fitness-proportionate, the default
/// let sel = Selection::default();
/// assert_eq!(sel, Selection::Roulette);
///
/// // Tournament with size 3 (moderate selection pressure)
/// let sel = Selection::Tournament(3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    /// Fitness-proportionate (roulette wheel) selection.
    ///
    /// Each genome is drawn with probability `fitness / total_fitness`.
    /// Fitness values are used as weights directly, so they must be finite
    /// and non-negative. When every weight is zero (e.g. an early
    /// generation where every genome is infeasible) both parents are drawn
    /// uniformly at random instead.
    ///
    /// # Complexity
    /// O(n) evaluations per call, O(n) per draw
    #[default]
    Roulette,

    /// Tournament selection: pick `k` genomes at random, keep the fittest.
    ///
    /// Higher `k` = stronger selection pressure. `k = 0` behaves as `k = 1`.
    ///
    /// # Complexity
    /// O(n) evaluations per call, O(k) per draw
    Tournament(usize),

    /// Rank-based selection.
    ///
    /// Genomes are ranked by fitness and drawn with probability
    /// proportional to `n - rank` (best rank 0 gets weight `n`). This avoids
    /// the scaling problems of roulette wheel selection and accepts any
    /// fitness sign.
    ///
    /// Reference: Baker (1985), "Adaptive Selection Methods for Genetic
    /// Algorithms"
    ///
    /// # Complexity
    /// O(n log n) per call
    Rank,
}

impl SelectionOperator for Selection {
    fn select<F, R>(&self, population: &[Genome], fitness: &F, rng: &mut R) -> Result<(Genome, Genome)>
    where
        F: FitnessFunction + ?Sized,
        R: Rng + ?Sized,
    {
        if population.is_empty() {
            return Err(Error::InvalidInput(
                "cannot select from empty population".into(),
            ));
        }

        let weights = population
            .iter()
            .map(|g| fitness.evaluate(g))
            .collect::<Result<Vec<f64>>>()?;

        let (a, b) = match self {
            Selection::Roulette => {
                let weights = roulette_weights(weights)?;
                (roulette(&weights, rng), roulette(&weights, rng))
            }
            Selection::Tournament(k) => (
                tournament(&weights, *k, rng),
                tournament(&weights, *k, rng),
            ),
            Selection::Rank => {
                let order = rank_order(&weights);
                (rank(&order, rng), rank(&order, rng))
            }
        };

        Ok((population[a].clone(), population[b].clone()))
    }
}

/// Validates roulette weights, rescaling them when their sum overflows.
fn roulette_weights(weights: Vec<f64>) -> Result<Vec<f64>> {
    if let Some(w) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
        return Err(Error::InvalidInput(format!(
            "roulette selection needs finite non-negative fitness, got {w}"
        )));
    }

    if weights.iter().sum::<f64>().is_finite() {
        return Ok(weights);
    }

    // every weight is finite, so the largest one is positive and finite here
    let max = weights.iter().copied().fold(0.0, f64::max);
    Ok(weights.into_iter().map(|w| w / max).collect())
}

/// Roulette wheel draw over raw weights, uniform when they sum to zero.
fn roulette<R: Rng + ?Sized>(weights: &[f64], rng: &mut R) -> usize {
    let n = weights.len();
    if n == 1 {
        return 0;
    }

    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        log::debug!("all {n} selection weights are zero, sampling uniformly");
        return rng.random_range(0..n);
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return i;
        }
    }

    // floating-point fallback: last genome with a non-zero weight
    weights.iter().rposition(|&w| w > 0.0).unwrap_or(n - 1)
}

/// Tournament draw: k uniform picks, return the fittest.
fn tournament<R: Rng + ?Sized>(weights: &[f64], k: usize, rng: &mut R) -> usize {
    let k = k.max(1);
    let n = weights.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if weights[idx] > weights[best_idx] {
            best_idx = idx;
        }
    }
    best_idx
}

/// Population indices ordered best-first (stable for ties).
fn rank_order(weights: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..weights.len()).collect();
    order.sort_by(|&a, &b| weights[b].total_cmp(&weights[a]));
    order
}

/// Linear-ranking draw over a best-first order.
fn rank<R: Rng + ?Sized>(order: &[usize], rng: &mut R) -> usize {
    let n = order.len();
    if n == 1 {
        return order[0];
    }

    // weight of rank r is n - r
    let total = (n * (n + 1)) as f64 / 2.0;
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;

    for (rank, &idx) in order.iter().enumerate() {
        cumulative += (n - rank) as f64;
        if cumulative > threshold {
            return idx;
        }
    }

    order[n - 1]
}
