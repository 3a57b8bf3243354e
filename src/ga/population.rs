//! Random genome and population generation.

use rand::Rng;

use super::types::{Genome, Population};

/// Generates a genome of `length` genes, each set with probability 0.5.
pub fn generate_genome<R: Rng + ?Sized>(length: usize, rng: &mut R) -> Genome {
    (0..length).map(|_| rng.random_bool(0.5)).collect()
}

/// Generates `size` independent random genomes of `genome_length` genes.
///
/// `size == 0` yields an empty population.
pub fn generate_population<R: Rng + ?Sized>(
    size: usize,
    genome_length: usize,
    rng: &mut R,
) -> Population {
    (0..size)
        .map(|_| generate_genome(genome_length, rng))
        .collect()
}
