//! Core types and trait definitions for the binary GA.
//!
//! [`Genome`] is the candidate representation. The four traits
//! ([`FitnessFunction`], [`SelectionOperator`], [`CrossoverOperator`],
//! [`MutationOperator`]) are the seams where the engine accepts
//! alternative strategies.

use std::fmt;

use rand::Rng;

use crate::error::Result;

/// A fixed-length binary vector; gene `i` includes or excludes catalog item `i`.
///
/// Genomes are produced by [`generate_genome`](super::generate_genome) or by a
/// crossover/mutation operator, all of which preserve length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Genome {
    genes: Vec<bool>,
}

/// An ordered collection of genomes evaluated together in one generation.
pub type Population = Vec<Genome>;

impl Genome {
    pub fn new(genes: Vec<bool>) -> Self {
        Self { genes }
    }

    /// Builds a genome from `0`/`1` values; any non-zero value is a set gene.
    pub fn from_bits(bits: &[u8]) -> Self {
        Self {
            genes: bits.iter().map(|&b| b != 0).collect(),
        }
    }

    /// Number of genes.
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn genes(&self) -> &[bool] {
        &self.genes
    }

    /// Returns gene `index`, or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<bool> {
        self.genes.get(index).copied()
    }

    /// Toggles gene `index`.
    ///
    /// # Panics
    /// Panics if `index >= self.len()`.
    pub fn flip(&mut self, index: usize) {
        self.genes[index] = !self.genes[index];
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.genes.iter().copied()
    }

    /// Indices of set genes, ascending.
    pub fn selected_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.genes
            .iter()
            .enumerate()
            .filter_map(|(i, &g)| g.then_some(i))
    }

    /// Number of set genes.
    pub fn count_ones(&self) -> usize {
        self.genes.iter().filter(|&&g| g).count()
    }

    /// Genes as `0`/`1` values.
    pub fn to_bits(&self) -> Vec<u8> {
        self.genes.iter().map(|&g| u8::from(g)).collect()
    }

    pub fn into_genes(self) -> Vec<bool> {
        self.genes
    }
}

impl From<Vec<bool>> for Genome {
    fn from(genes: Vec<bool>) -> Self {
        Self::new(genes)
    }
}

impl FromIterator<bool> for Genome {
    fn from_iter<T: IntoIterator<Item = bool>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Renders the genome as a bit string, e.g. `100`.
impl fmt::Display for Genome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &g in &self.genes {
            f.write_str(if g { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Maps a genome to a scalar fitness. Higher is better (maximization).
///
/// Implementations must be pure: the engine may call them any number of
/// times, in any order, and in parallel. Any `Fn(&Genome) -> Result<f64>`
/// closure that is `Send + Sync` is a fitness function.
pub trait FitnessFunction: Send + Sync {
    fn evaluate(&self, genome: &Genome) -> Result<f64>;
}

impl<F> FitnessFunction for F
where
    F: Fn(&Genome) -> Result<f64> + Send + Sync,
{
    fn evaluate(&self, genome: &Genome) -> Result<f64> {
        self(genome)
    }
}

/// Chooses two parents from a population.
///
/// Sampling is with replacement: both parents may be the same genome.
pub trait SelectionOperator {
    /// Returns `(parent_a, parent_b)`.
    ///
    /// # Errors
    /// [`Error::InvalidInput`](crate::Error::InvalidInput) on an empty
    /// population; fitness errors propagate.
    fn select<F, R>(&self, population: &[Genome], fitness: &F, rng: &mut R) -> Result<(Genome, Genome)>
    where
        F: FitnessFunction + ?Sized,
        R: Rng + ?Sized;
}

/// Recombines two equal-length parents into two equal-length children.
pub trait CrossoverOperator {
    /// # Errors
    /// [`Error::InvalidInput`](crate::Error::InvalidInput) if the parents
    /// differ in length.
    fn crossover<R>(&self, a: &Genome, b: &Genome, rng: &mut R) -> Result<(Genome, Genome)>
    where
        R: Rng + ?Sized;
}

/// Perturbs a genome in place.
pub trait MutationOperator {
    /// # Errors
    /// [`Error::InvalidInput`](crate::Error::InvalidInput) on an empty genome.
    fn mutate<R>(&self, genome: &mut Genome, rng: &mut R) -> Result<()>
    where
        R: Rng + ?Sized;
}
