//! Evolution run configuration.
//!
//! [`EvolutionConfig`] holds the parameters that control the generational
//! loop. The resource limit and attribute selector belong to the fitness
//! function (see [`KnapsackFitness`](super::KnapsackFitness)).

use crate::error::{Error, Result};

/// Number of top genomes carried unchanged into the next generation.
pub const ELITE_COUNT: usize = 2;

/// Configuration for an evolution run.
///
/// # Defaults
///
/// ```
/// use u_bitevo::ga::EvolutionConfig;
///
/// let config = EvolutionConfig::default();
/// assert_eq!(config.population_size, 20);
/// assert_eq!(config.max_generations, 100);
/// assert!(config.value_target.is_infinite());
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_bitevo::ga::EvolutionConfig;
///
/// let config = EvolutionConfig::default()
///     .with_population_size(50)
///     .with_max_generations(200)
///     .with_value_target(25.0)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EvolutionConfig {
    /// Number of genomes per generation.
    ///
    /// Must be even and at least 4: two elites plus whole pairs of children
    /// reproduce the size exactly every generation.
    pub population_size: usize,

    /// Generation cap: the maximum number of generations evaluated.
    pub max_generations: usize,

    /// Fitness threshold. The run succeeds as soon as the best genome of a
    /// generation reaches it.
    ///
    /// `f64::INFINITY` (the default) always runs to the cap.
    pub value_target: f64,

    /// Whether to evaluate fitness in parallel using rayon.
    ///
    /// Only effective with the `parallel` feature. Results are identical to
    /// sequential evaluation since evaluation draws no randomness.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 20,
            max_generations: 100,
            value_target: f64::INFINITY,
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

    /// Sets the generation cap.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the fitness threshold that ends the run successfully.
    pub fn with_value_target(mut self, target: f64) -> Self {
        self.value_target = target;
        self
    }

    /// Enables or disables parallel evaluation.
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
    /// # Errors
    /// [`Error::InvalidConfig`] describing the first invalid parameter.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 * ELITE_COUNT {
            return Err(Error::InvalidConfig(format!(
                "population_size must be at least {}, got {}",
                2 * ELITE_COUNT,
                self.population_size
            )));
        }
        if self.population_size % 2 != 0 {
            return Err(Error::InvalidConfig(format!(
                "population_size must be even, got {}",
                self.population_size
            )));
        }
        if self.max_generations == 0 {
            return Err(Error::InvalidConfig(
                "max_generations must be at least 1".into(),
            ));
        }
        if self.value_target.is_nan() {
            return Err(Error::InvalidConfig("value_target must not be NaN".into()));
        }
        Ok(())
    }
}
