//! Binary crossover and mutation operators.
//!
//! The free functions operate on [`Genome`]s directly; the strategy types
//! ([`Crossover`], [`BitFlip`], [`PerGeneFlip`]) wrap them for the engine.
//! Every operator preserves genome length.
//!
//! # Crossover Operators
//!
//! - [`single_point_crossover`]: swap tails after one random cut, O(n)
//! - [`uniform_crossover`]: pick each gene from either parent, O(n)
//!
//! # Mutation Operators
//!
//! - [`bit_flip_mutation`]: `num_flips` random positions, each toggled with
//!   a fixed probability, O(num_flips)
//! - [`per_gene_mutation`]: toggle every gene independently, O(n)
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Syswerda (1989), "Uniform Crossover in Genetic Algorithms"

use rand::Rng;

use crate::error::{Error, Result};

use super::types::{CrossoverOperator, Genome, MutationOperator};

// ============================================================================
// Crossover operators
// ============================================================================

/// Single-point crossover.
///
/// Picks a cut `p` uniformly from `[1, len - 1]` and returns
/// `(a[..p] ++ b[p..], b[..p] ++ a[p..])`. Parents shorter than two genes
/// have no valid cut and are returned unchanged.
///
/// # Errors
/// [`Error::InvalidInput`] if the parents differ in length.
pub fn single_point_crossover<R: Rng + ?Sized>(
    a: &Genome,
    b: &Genome,
    rng: &mut R,
) -> Result<(Genome, Genome)> {
    check_same_length(a, b)?;

    let n = a.len();
    if n < 2 {
        return Ok((a.clone(), b.clone()));
    }

    let p = rng.random_range(1..n);
    Ok(splice(a, b, p))
}

/// Builds both single-point children for a fixed cut `p`.
fn splice(a: &Genome, b: &Genome, p: usize) -> (Genome, Genome) {
    let (a, b) = (a.genes(), b.genes());
    let child_a = a[..p].iter().chain(&b[p..]).copied().collect();
    let child_b = b[..p].iter().chain(&a[p..]).copied().collect();
    (child_a, child_b)
}

/// Uniform crossover.
///
/// Each position is taken from `a` or `b` with equal probability; the
/// second child receives the complementary choice.
///
/// # Errors
/// [`Error::InvalidInput`] if the parents differ in length.
pub fn uniform_crossover<R: Rng + ?Sized>(
    a: &Genome,
    b: &Genome,
    rng: &mut R,
) -> Result<(Genome, Genome)> {
    check_same_length(a, b)?;

    let mut child_a = Vec::with_capacity(a.len());
    let mut child_b = Vec::with_capacity(a.len());
    for (ga, gb) in a.iter().zip(b.iter()) {
        if rng.random_bool(0.5) {
            child_a.push(ga);
            child_b.push(gb);
        } else {
            child_a.push(gb);
            child_b.push(ga);
        }
    }
    Ok((Genome::new(child_a), Genome::new(child_b)))
}

fn check_same_length(a: &Genome, b: &Genome) -> Result<()> {
    if a.len() != b.len() {
        return Err(Error::InvalidInput(format!(
            "parents must have equal length, got {} and {}",
            a.len(),
            b.len()
        )));
    }
    Ok(())
}

/// Crossover strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Crossover {
    /// [`single_point_crossover`].
    #[default]
    SinglePoint,
    /// [`uniform_crossover`].
    Uniform,
}

impl CrossoverOperator for Crossover {
    fn crossover<R>(&self, a: &Genome, b: &Genome, rng: &mut R) -> Result<(Genome, Genome)>
    where
        R: Rng + ?Sized,
    {
        match self {
            Crossover::SinglePoint => single_point_crossover(a, b, rng),
            Crossover::Uniform => uniform_crossover(a, b, rng),
        }
    }
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Point mutation.
///
/// Repeats `num_flips` times: draw an index uniformly (independently each
/// time, so an index may be drawn twice), then toggle that gene with
/// probability `flip_probability` (clamped to `[0, 1]`).
///
/// # Errors
/// [`Error::InvalidInput`] on an empty genome.
pub fn bit_flip_mutation<R: Rng + ?Sized>(
    genome: &mut Genome,
    num_flips: usize,
    flip_probability: f64,
    rng: &mut R,
) -> Result<()> {
    check_not_empty(genome)?;

    let p = clamp_probability(flip_probability);
    let n = genome.len();
    for _ in 0..num_flips {
        let index = rng.random_range(0..n);
        if rng.random_bool(p) {
            genome.flip(index);
        }
    }
    Ok(())
}

/// Per-gene mutation: every gene is toggled independently with probability `rate`.
///
/// # Errors
/// [`Error::InvalidInput`] on an empty genome.
pub fn per_gene_mutation<R: Rng + ?Sized>(genome: &mut Genome, rate: f64, rng: &mut R) -> Result<()> {
    check_not_empty(genome)?;

    let p = clamp_probability(rate);
    for index in 0..genome.len() {
        if rng.random_bool(p) {
            genome.flip(index);
        }
    }
    Ok(())
}

fn check_not_empty(genome: &Genome) -> Result<()> {
    if genome.is_empty() {
        return Err(Error::InvalidInput("cannot mutate an empty genome".into()));
    }
    Ok(())
}

/// Clamps to `[0, 1]`; NaN becomes 0.
fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}

/// [`bit_flip_mutation`] as a strategy.
///
/// The default (`num_flips = 1`, `flip_probability = 0.5`) touches at most
/// one gene per child.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BitFlip {
    pub num_flips: usize,
    pub flip_probability: f64,
}

impl Default for BitFlip {
    fn default() -> Self {
        Self {
            num_flips: 1,
            flip_probability: 0.5,
        }
    }
}

impl BitFlip {
    pub fn new(num_flips: usize, flip_probability: f64) -> Self {
        Self {
            num_flips,
            flip_probability: clamp_probability(flip_probability),
        }
    }
}

impl MutationOperator for BitFlip {
    fn mutate<R>(&self, genome: &mut Genome, rng: &mut R) -> Result<()>
    where
        R: Rng + ?Sized,
    {
        bit_flip_mutation(genome, self.num_flips, self.flip_probability, rng)
    }
}

/// [`per_gene_mutation`] as a strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerGeneFlip {
    pub rate: f64,
}

impl PerGeneFlip {
    pub fn new(rate: f64) -> Self {
        Self {
            rate: clamp_probability(rate),
        }
    }
}

impl MutationOperator for PerGeneFlip {
    fn mutate<R>(&self, genome: &mut Genome, rng: &mut R) -> Result<()>
    where
        R: Rng + ?Sized,
    {
        per_gene_mutation(genome, self.rate, rng)
    }
}

// ============================================================================
// Tests
// ============================================================================
