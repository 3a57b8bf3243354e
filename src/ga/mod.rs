//! Binary-encoded Genetic Algorithm.
//!
//! Candidates are fixed-length bit vectors ([`Genome`]) index-aligned with
//! an item catalog. The engine maximizes a [`FitnessFunction`] with
//! elitism, pluggable selection, crossover and mutation, and stops when the
//! best genome reaches a value target or the generation cap is hit.
//!
//! # Core Traits
//!
//! - [`FitnessFunction`]: Maps a genome to a scalar (higher is better)
//! - [`SelectionOperator`], [`CrossoverOperator`], [`MutationOperator`]:
//!   Strategy seams for the three genetic operators
//!
//! # Key Types
//!
//! - [`KnapsackFitness`]: Catalog value under a resource limit, 0 if infeasible
//! - [`EvolutionConfig`]: Run parameters (population size, cap, target, seed)
//! - [`EvolutionRunner`]: Executes the generational loop
//! - [`EvolutionResult`]: Final sorted population and run metadata
//!
//! # Submodules
//!
//! - [`operators`]: Binary crossover (single-point, uniform) and bit-flip mutation
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Martello & Toth (1990), *Knapsack Problems: Algorithms and Computer Implementations*

mod config;
mod fitness;
pub mod operators;
mod population;
mod runner;
mod selection;
mod types;

pub use config::{EvolutionConfig, ELITE_COUNT};
pub use fitness::{fitness, KnapsackFitness};
pub use operators::{BitFlip, Crossover, PerGeneFlip};
pub use population::{generate_genome, generate_population};
pub use runner::{optimize, EvolutionResult, EvolutionRunner, Termination};
pub use selection::Selection;
pub use types::{
    CrossoverOperator, FitnessFunction, Genome, MutationOperator, Population, SelectionOperator,
};
