//! Generational loop execution.
//!
//! [`EvolutionRunner`] orchestrates the complete evolutionary process:
//! initialization → evaluation → sort → elitism → selection → crossover →
//! mutation → repeat, until the value target is met or the generation cap
//! is reached.

use rand::Rng;

use super::config::{EvolutionConfig, ELITE_COUNT};
use super::fitness::KnapsackFitness;
use super::operators::{BitFlip, Crossover};
use super::population::generate_population;
use super::selection::Selection;
use super::types::{
    CrossoverOperator, FitnessFunction, Genome, MutationOperator, Population, SelectionOperator,
};
use crate::catalog::CatalogItem;
use crate::error::{Error, Result};
use crate::random::rng_from_seed;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// The best genome reached the value target.
    Success,
    /// The generation cap was reached first.
    Exhausted,
}

/// Result of an evolution run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvolutionResult {
    /// Final population, sorted best-first.
    pub population: Population,

    /// Fitness of each genome in `population`, same order.
    pub fitnesses: Vec<f64>,

    /// Zero-based index of the generation the loop stopped at.
    ///
    /// An exhausted run stops at `max_generations - 1`.
    pub generation: usize,

    /// Fitness of `population[0]`.
    pub best_fitness: f64,

    /// Why the loop stopped.
    pub outcome: Termination,

    /// Best fitness of every evaluated generation. Non-decreasing.
    pub fitness_history: Vec<f64>,
}

impl EvolutionResult {
    /// The best genome of the final generation.
    pub fn best(&self) -> &Genome {
        &self.population[0]
    }

    pub fn is_success(&self) -> bool {
        self.outcome == Termination::Success
    }
}

/// Executes the evolutionary loop with pluggable operators.
///
/// The defaults are roulette selection, single-point crossover and a single
/// 50% bit flip per child.
///
/// # Usage
///
/// ```
/// use u_bitevo::catalog::{sample_foods, Nutrient};
/// use u_bitevo::ga::{EvolutionConfig, EvolutionRunner, KnapsackFitness, Selection};
///
/// let foods = sample_foods();
/// let fitness = KnapsackFitness::new(&foods, Nutrient::Calories, 1500.0);
/// let config = EvolutionConfig::default()
///     .with_max_generations(50)
///     .with_seed(42);
///
/// let result = EvolutionRunner::new()
///     .with_selection(Selection::Tournament(3))
///     .run(&fitness, foods.len(), &config)
///     .unwrap();
/// assert_eq!(result.best().len(), foods.len());
/// ```
#[derive(Debug, Clone, Default)]
pub struct EvolutionRunner<S = Selection, C = Crossover, M = BitFlip> {
    selection: S,
    crossover: C,
    mutation: M,
}

impl EvolutionRunner {
    /// A runner with the default operators.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S, C, M> EvolutionRunner<S, C, M>
where
    S: SelectionOperator,
    C: CrossoverOperator,
    M: MutationOperator,
{
    /// A runner with the given operators.
    pub fn with_operators(selection: S, crossover: C, mutation: M) -> Self {
        Self {
            selection,
            crossover,
            mutation,
        }
    }

    /// Replaces the selection strategy.
    pub fn with_selection<S2: SelectionOperator>(self, selection: S2) -> EvolutionRunner<S2, C, M> {
        EvolutionRunner {
            selection,
            crossover: self.crossover,
            mutation: self.mutation,
        }
    }

    /// Replaces the crossover strategy.
    pub fn with_crossover<C2: CrossoverOperator>(self, crossover: C2) -> EvolutionRunner<S, C2, M> {
        EvolutionRunner {
            selection: self.selection,
            crossover,
            mutation: self.mutation,
        }
    }

    /// Replaces the mutation strategy.
    pub fn with_mutation<M2: MutationOperator>(self, mutation: M2) -> EvolutionRunner<S, C, M2> {
        EvolutionRunner {
            selection: self.selection,
            crossover: self.crossover,
            mutation,
        }
    }

    /// Runs from a random initial population, seeded from `config.seed`.
    ///
    /// # Errors
    /// [`Error::InvalidConfig`] for an invalid configuration; any error
    /// raised by the fitness function or an operator.
    pub fn run<F>(&self, fitness: &F, genome_length: usize, config: &EvolutionConfig) -> Result<EvolutionResult>
    where
        F: FitnessFunction + ?Sized,
    {
        let mut rng = rng_from_seed(config.seed);
        self.run_with_rng(fitness, genome_length, config, &mut rng)
    }

    /// Runs from a random initial population drawn from `rng`.
    ///
    /// `config.seed` is ignored; the caller owns the random source.
    pub fn run_with_rng<F, R>(
        &self,
        fitness: &F,
        genome_length: usize,
        config: &EvolutionConfig,
        rng: &mut R,
    ) -> Result<EvolutionResult>
    where
        F: FitnessFunction + ?Sized,
        R: Rng + ?Sized,
    {
        config.validate()?;
        let population = generate_population(config.population_size, genome_length, rng);
        self.evolve(fitness, population, config, rng)
    }

    /// Runs from a caller-supplied initial population.
    ///
    /// # Errors
    /// [`Error::InvalidInput`] unless `population` holds exactly
    /// `config.population_size` genomes of equal length.
    pub fn evolve<F, R>(
        &self,
        fitness: &F,
        population: Population,
        config: &EvolutionConfig,
        rng: &mut R,
    ) -> Result<EvolutionResult>
    where
        F: FitnessFunction + ?Sized,
        R: Rng + ?Sized,
    {
        config.validate()?;
        check_population(&population, config.population_size)?;

        let mut population = population;
        let mut fitness_history = Vec::new();
        let mut generation = 0usize;

        loop {
            let (sorted, fitnesses) = rank_population(fitness, population, config.parallel)?;
            let best_fitness = fitnesses[0];
            fitness_history.push(best_fitness);
            log::debug!("generation {generation}: best fitness {best_fitness}");

            let outcome = if best_fitness >= config.value_target {
                Some(Termination::Success)
            } else if generation + 1 >= config.max_generations {
                Some(Termination::Exhausted)
            } else {
                None
            };

            if let Some(outcome) = outcome {
                log::info!(
                    "evolution stopped at generation {generation} ({outcome:?}), best fitness {best_fitness}"
                );
                return Ok(EvolutionResult {
                    population: sorted,
                    fitnesses,
                    generation,
                    best_fitness,
                    outcome,
                    fitness_history,
                });
            }

            population = self.next_generation(&sorted, fitness, rng)?;
            generation += 1;
        }
    }

    /// Breeds the successor of a best-first sorted population.
    ///
    /// The top [`ELITE_COUNT`] genomes are copied unchanged; the rest are
    /// mutated children of parents selected from `sorted`.
    fn next_generation<F, R>(&self, sorted: &[Genome], fitness: &F, rng: &mut R) -> Result<Population>
    where
        F: FitnessFunction + ?Sized,
        R: Rng + ?Sized,
    {
        let size = sorted.len();
        let mut next_gen: Population = Vec::with_capacity(size);
        next_gen.extend_from_slice(&sorted[..ELITE_COUNT.min(size)]);

        while next_gen.len() < size {
            let (parent_a, parent_b) = self.selection.select(sorted, fitness, rng)?;
            let (mut child_a, mut child_b) = self.crossover.crossover(&parent_a, &parent_b, rng)?;
            self.mutation.mutate(&mut child_a, rng)?;
            self.mutation.mutate(&mut child_b, rng)?;
            next_gen.push(child_a);
            next_gen.push(child_b);
        }

        Ok(next_gen)
    }
}

/// Evolves a subset of `catalog` with the default operators.
///
/// Genes map to catalog items by index; a genome scores the summed value of
/// its items unless their summed `attribute` cost exceeds `limit`, in which
/// case it scores 0.
///
/// # Examples
///
/// ```
/// use u_bitevo::catalog::{sample_foods, Nutrient, NutritionTotals};
/// use u_bitevo::ga::{optimize, EvolutionConfig};
///
/// let foods = sample_foods();
/// let config = EvolutionConfig::default().with_seed(7).with_max_generations(30);
/// let result = optimize(&foods, Nutrient::Protein, 60.0, &config).unwrap();
///
/// let totals = NutritionTotals::of(&foods, result.best()).unwrap();
/// assert!(result.best_fitness == 0.0 || totals.protein <= 60.0);
/// ```
pub fn optimize<I: CatalogItem>(
    catalog: &[I],
    attribute: I::Attribute,
    limit: f64,
    config: &EvolutionConfig,
) -> Result<EvolutionResult> {
    let fitness = KnapsackFitness::new(catalog, attribute, limit);
    EvolutionRunner::new().run(&fitness, catalog.len(), config)
}

fn check_population(population: &[Genome], size: usize) -> Result<()> {
    if population.len() != size {
        return Err(Error::InvalidInput(format!(
            "initial population has {} genomes, expected {size}",
            population.len()
        )));
    }
    if let Some(first) = population.first() {
        if let Some(odd) = population.iter().find(|g| g.len() != first.len()) {
            return Err(Error::InvalidInput(format!(
                "genomes must share one length, found {} and {}",
                first.len(),
                odd.len()
            )));
        }
    }
    Ok(())
}

/// Evaluates and stably sorts a population best-first.
fn rank_population<F>(fitness: &F, population: Population, parallel: bool) -> Result<(Population, Vec<f64>)>
where
    F: FitnessFunction + ?Sized,
{
    let scores = evaluate_population(fitness, &population, parallel)?;
    if let Some(i) = scores.iter().position(|s| s.is_nan()) {
        return Err(Error::InvalidInput(format!(
            "fitness function returned NaN for genome {}",
            population[i]
        )));
    }

    let mut scored: Vec<(Genome, f64)> = population.into_iter().zip(scores).collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    Ok(scored.into_iter().unzip())
}

/// Evaluates every genome, on rayon when `parallel` is set.
#[cfg(feature = "parallel")]
fn evaluate_population<F>(fitness: &F, population: &[Genome], parallel: bool) -> Result<Vec<f64>>
where
    F: FitnessFunction + ?Sized,
{
    use rayon::prelude::*;

    if parallel {
        population.par_iter().map(|g| fitness.evaluate(g)).collect()
    } else {
        population.iter().map(|g| fitness.evaluate(g)).collect()
    }
}

/// Evaluates every genome.
#[cfg(not(feature = "parallel"))]
fn evaluate_population<F>(fitness: &F, population: &[Genome], _parallel: bool) -> Result<Vec<f64>>
where
    F: FitnessFunction + ?Sized,
{
    population.iter().map(|g| fitness.evaluate(g)).collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::{PerGeneFlip, generate_genome};
    use crate::random::create_rng;

    // ---- OneMax problem: maximize the number of set bits ----

    fn one_max(g: &Genome) -> Result<f64> {
        Ok(g.count_ones() as f64)
    }

    /// Crossover that returns the parents unchanged.
    struct Cloning;

    impl CrossoverOperator for Cloning {
        fn crossover<R: Rng + ?Sized>(&self, a: &Genome, b: &Genome, _rng: &mut R) -> Result<(Genome, Genome)> {
            Ok((a.clone(), b.clone()))
        }
    }

    /// Mutation that leaves genomes alone.
    struct Frozen;

    impl MutationOperator for Frozen {
        fn mutate<R: Rng + ?Sized>(&self, _genome: &mut Genome, _rng: &mut R) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_onemax_convergence() {
        let config = EvolutionConfig::default()
            .with_population_size(30)
            .with_max_generations(200)
            .with_seed(42);

        let result = EvolutionRunner::new().run(&one_max, 20, &config).unwrap();

        assert!(
            result.best_fitness >= 15.0,
            "expected fitness >= 15 for 20-bit OneMax, got {}",
            result.best_fitness
        );
    }

    #[test]
    fn test_success_stops_early() {
        let config = EvolutionConfig::default()
            .with_population_size(20)
            .with_max_generations(500)
            .with_value_target(8.0)
            .with_seed(42);

        let result = EvolutionRunner::new().run(&one_max, 10, &config).unwrap();

        assert_eq!(result.outcome, Termination::Success);
        assert!(result.best_fitness >= 8.0);
        assert!(result.generation < 500);
        assert_eq!(result.fitness_history.len(), result.generation + 1);
    }

    #[test]
    fn test_trivial_target_succeeds_at_generation_zero() {
        let config = EvolutionConfig::default()
            .with_value_target(0.0)
            .with_seed(1);

        let result = EvolutionRunner::new().run(&one_max, 8, &config).unwrap();

        assert!(result.is_success());
        assert_eq!(result.generation, 0);
        assert_eq!(result.fitness_history.len(), 1);
    }

    #[test]
    fn test_exhaustion_reports_last_generation() {
        let config = EvolutionConfig::default()
            .with_population_size(10)
            .with_max_generations(5)
            .with_seed(42);

        let result = EvolutionRunner::new().run(&one_max, 30, &config).unwrap();

        assert_eq!(result.outcome, Termination::Exhausted);
        assert_eq!(result.generation, 4);
        assert_eq!(result.fitness_history.len(), 5);
    }

    #[test]
    fn test_result_is_sorted_and_consistent() {
        let config = EvolutionConfig::default()
            .with_population_size(12)
            .with_max_generations(10)
            .with_seed(3);

        let result = EvolutionRunner::new().run(&one_max, 16, &config).unwrap();

        assert_eq!(result.population.len(), 12);
        assert_eq!(result.fitnesses.len(), 12);
        assert!(result.fitnesses.windows(2).all(|w| w[0] >= w[1]));
        for (g, &f) in result.population.iter().zip(&result.fitnesses) {
            assert_eq!(g.len(), 16);
            assert_eq!(one_max(g).unwrap(), f);
        }
        assert_eq!(result.best_fitness, result.fitnesses[0]);
        assert_eq!(result.fitness_history.last(), Some(&result.best_fitness));
    }

    #[test]
    fn test_history_non_decreasing() {
        let config = EvolutionConfig::default()
            .with_population_size(10)
            .with_max_generations(60)
            .with_seed(42);

        let result = EvolutionRunner::new().run(&one_max, 24, &config).unwrap();

        for window in result.fitness_history.windows(2) {
            assert!(
                window[1] >= window[0],
                "best fitness should never drop with elitism: {} < {}",
                window[1],
                window[0]
            );
        }
    }

    #[test]
    fn test_elites_carried_unchanged() {
        let mut rng = create_rng(42);
        let population: Population = (0..8).map(|_| generate_genome(12, &mut rng)).collect();
        let (sorted, _) = rank_population(&one_max, population, false).unwrap();

        let runner = EvolutionRunner::new().with_mutation(BitFlip::new(6, 1.0));
        for _ in 0..20 {
            let next = runner.next_generation(&sorted, &one_max, &mut rng).unwrap();
            assert_eq!(next.len(), sorted.len());
            assert_eq!(next[..2], sorted[..2]);
        }
    }

    #[test]
    fn test_same_seed_same_result() {
        let config = EvolutionConfig::default()
            .with_population_size(16)
            .with_max_generations(40)
            .with_seed(2024);

        let a = EvolutionRunner::new().run(&one_max, 18, &config).unwrap();
        let b = EvolutionRunner::new().run(&one_max, 18, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_injected_rng_matches_seeded_run() {
        let config = EvolutionConfig::default()
            .with_population_size(8)
            .with_max_generations(15)
            .with_seed(11);

        let seeded = EvolutionRunner::new().run(&one_max, 10, &config).unwrap();
        let injected = EvolutionRunner::new()
            .run_with_rng(&one_max, 10, &config, &mut create_rng(11))
            .unwrap();
        assert_eq!(seeded, injected);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let config = EvolutionConfig::default()
            .with_population_size(24)
            .with_max_generations(30)
            .with_seed(42);

        let sequential = EvolutionRunner::new().run(&one_max, 20, &config).unwrap();
        let parallel = EvolutionRunner::new()
            .run(&one_max, 20, &config.clone().with_parallel(true))
            .unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_all_operator_combinations() {
        let config = EvolutionConfig::default()
            .with_population_size(30)
            .with_max_generations(80)
            .with_seed(42);

        for selection in [Selection::Roulette, Selection::Tournament(3), Selection::Rank] {
            for crossover in [Crossover::SinglePoint, Crossover::Uniform] {
                let result = EvolutionRunner::new()
                    .with_selection(selection)
                    .with_crossover(crossover)
                    .with_mutation(PerGeneFlip::new(0.05))
                    .run(&one_max, 12, &config)
                    .unwrap();
                assert!(
                    result.best_fitness >= 9.0,
                    "{selection:?}/{crossover:?} should make progress, got {}",
                    result.best_fitness
                );
            }
        }
    }

    #[test]
    fn test_custom_operators_plug_in() {
        // Without crossover or mutation no new genome can ever appear.
        let mut rng = create_rng(5);
        let initial: Population = (0..6).map(|_| generate_genome(8, &mut rng)).collect();
        let config = EvolutionConfig::default()
            .with_population_size(6)
            .with_max_generations(25);

        let runner = EvolutionRunner::with_operators(Selection::Rank, Cloning, Frozen);
        let result = runner.evolve(&one_max, initial.clone(), &config, &mut rng).unwrap();

        assert!(result.population.iter().all(|g| initial.contains(g)));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EvolutionConfig::default().with_population_size(5);
        assert!(matches!(
            EvolutionRunner::new().run(&one_max, 4, &config),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_invalid_config_rejected_on_every_entry_point() {
        let runner = EvolutionRunner::new();
        let mut rng = create_rng(42);
        let config = EvolutionConfig::default()
            .with_population_size(4)
            .with_max_generations(0);

        assert!(matches!(
            runner.run_with_rng(&one_max, 4, &config, &mut rng),
            Err(Error::InvalidConfig(_))
        ));

        let population = generate_population(4, 4, &mut rng);
        assert!(matches!(
            runner.evolve(&one_max, population, &config, &mut rng),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_evolve_rejects_wrong_population_size() {
        let mut rng = create_rng(42);
        let config = EvolutionConfig::default().with_population_size(4);
        let population: Population = (0..6).map(|_| generate_genome(3, &mut rng)).collect();
        assert!(matches!(
            EvolutionRunner::new().evolve(&one_max, population, &config, &mut rng),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_evolve_rejects_ragged_population() {
        let mut rng = create_rng(42);
        let config = EvolutionConfig::default().with_population_size(4);
        let population = vec![
            Genome::from_bits(&[1, 0, 1]),
            Genome::from_bits(&[1, 0, 1]),
            Genome::from_bits(&[1, 0]),
            Genome::from_bits(&[1, 0, 1]),
        ];
        assert!(matches!(
            EvolutionRunner::new().evolve(&one_max, population, &config, &mut rng),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_fitness_error_propagates() {
        let config = EvolutionConfig::default().with_seed(42);
        let strict = |g: &Genome| -> Result<f64> {
            if g.len() != 3 {
                return Err(Error::InvalidInput("wrong length".into()));
            }
            Ok(1.0)
        };
        assert_eq!(
            EvolutionRunner::new().run(&strict, 2, &config),
            Err(Error::InvalidInput("wrong length".into()))
        );
    }

    #[test]
    fn test_nan_fitness_rejected() {
        let config = EvolutionConfig::default().with_seed(42);
        let nan = |_: &Genome| -> Result<f64> { Ok(f64::NAN) };
        assert!(matches!(
            EvolutionRunner::new().run(&nan, 4, &config),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_dyn_fitness_function() {
        let config = EvolutionConfig::default()
            .with_max_generations(3)
            .with_seed(42);
        let boxed: Box<dyn FitnessFunction> = Box::new(one_max);
        let result = EvolutionRunner::new().run(boxed.as_ref(), 6, &config).unwrap();
        assert_eq!(result.best().len(), 6);
    }
}
