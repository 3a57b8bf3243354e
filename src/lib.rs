//! Binary-encoded evolutionary subset optimizer.
//!
//! Given an ordered catalog of items, each with several numeric cost
//! attributes and a scalar value, searches for the subset (a bit vector,
//! one gene per item) that maximizes total value while the summed cost of
//! one chosen attribute stays within a limit.
//!
//! - [`ga`]: the evolutionary engine: genomes, fitness, selection,
//!   crossover, mutation and the generational loop with elitism.
//! - [`catalog`]: the [`CatalogItem`](catalog::CatalogItem) contract plus
//!   a ready-made nutrition catalog.
//! - [`random`]: the seedable random source threaded through every run.
//!
//! # Example
//!
//! ```
//! use u_bitevo::catalog::{sample_foods, Nutrient};
//! use u_bitevo::ga::{optimize, EvolutionConfig};
//!
//! let foods = sample_foods();
//! let config = EvolutionConfig::default()
//!     .with_value_target(30.0)
//!     .with_max_generations(100)
//!     .with_seed(42);
//!
//! // Spend on foods while keeping total calories at or below 2000.
//! let result = optimize(&foods, Nutrient::Calories, 2000.0, &config).unwrap();
//! println!("best {} after {} generations", result.best_fitness, result.generation);
//! ```
//!
//! The search is best-effort within a fixed budget: it does not guarantee
//! a global optimum.

pub mod catalog;
mod error;
pub mod ga;
pub mod random;

pub use error::{Error, Result};
