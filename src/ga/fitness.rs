//! Knapsack-style fitness: total value of a feasible selection, 0 otherwise.

use crate::catalog::CatalogItem;
use crate::error::{Error, Result};

use super::types::{FitnessFunction, Genome};

/// Evaluates `genome` against `catalog`.
///
/// Genes are scanned in index order. Each set gene adds the item's
/// `attribute` cost to a running total and the item's value to the
/// fitness. As soon as the running cost exceeds `limit` the genome is
/// infeasible and scores exactly `0.0`; no partial credit is given.
///
/// # Errors
/// [`Error::InvalidInput`] if `genome.len() != catalog.len()`.
///
/// # Examples
///
/// ```
/// use u_bitevo::catalog::{sample_foods, Nutrient};
/// use u_bitevo::ga::{fitness, Genome};
///
/// let foods = sample_foods();
/// let mut bits = vec![0u8; foods.len()];
/// bits[0] = 1; // eggs: 231 kcal, 2.99
/// let genome = Genome::from_bits(&bits);
///
/// assert_eq!(fitness(&genome, &foods, Nutrient::Calories, 500.0).unwrap(), 2.99);
/// assert_eq!(fitness(&genome, &foods, Nutrient::Calories, 200.0).unwrap(), 0.0);
/// ```
pub fn fitness<I: CatalogItem>(
    genome: &Genome,
    catalog: &[I],
    attribute: I::Attribute,
    limit: f64,
) -> Result<f64> {
    if genome.len() != catalog.len() {
        return Err(Error::InvalidInput(format!(
            "genome length {} does not match catalog length {}",
            genome.len(),
            catalog.len()
        )));
    }

    let mut cumulative_cost = 0.0;
    let mut total_value = 0.0;

    for (item, selected) in catalog.iter().zip(genome.iter()) {
        if !selected {
            continue;
        }
        cumulative_cost += item.cost(attribute);
        total_value += item.value();

        if cumulative_cost > limit {
            return Ok(0.0);
        }
    }

    Ok(total_value)
}

/// [`fitness`] bound to a catalog, attribute selector and resource limit.
///
/// This is the fitness function the engine uses for catalog problems.
#[derive(Debug, Clone, Copy)]
pub struct KnapsackFitness<'a, I: CatalogItem> {
    catalog: &'a [I],
    attribute: I::Attribute,
    limit: f64,
}

impl<'a, I: CatalogItem> KnapsackFitness<'a, I> {
    pub fn new(catalog: &'a [I], attribute: I::Attribute, limit: f64) -> Self {
        Self {
            catalog,
            attribute,
            limit,
        }
    }

    pub fn catalog(&self) -> &'a [I] {
        self.catalog
    }

    pub fn attribute(&self) -> I::Attribute {
        self.attribute
    }

    pub fn limit(&self) -> f64 {
        self.limit
    }

    /// Genome length this fitness accepts.
    pub fn genome_length(&self) -> usize {
        self.catalog.len()
    }
}

impl<I: CatalogItem> FitnessFunction for KnapsackFitness<'_, I> {
    fn evaluate(&self, genome: &Genome) -> Result<f64> {
        fitness(genome, self.catalog, self.attribute, self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Clone, Copy, Debug)]
    struct Weight;

    #[derive(Debug, Clone)]
    struct Item {
        cost: f64,
        value: f64,
    }

    impl CatalogItem for Item {
        type Attribute = Weight;
        fn cost(&self, _: Weight) -> f64 {
            self.cost
        }
        fn value(&self) -> f64 {
            self.value
        }
    }

    fn catalog(costs: &[f64], values: &[f64]) -> Vec<Item> {
        costs
            .iter()
            .zip(values)
            .map(|(&cost, &value)| Item { cost, value })
            .collect()
    }

    #[test]
    fn test_feasible_sums_values() {
        let items = catalog(&[5.0, 1.0, 1.0], &[10.0, 1.0, 1.0]);
        let g = Genome::from_bits(&[0, 1, 1]);
        assert_eq!(fitness(&g, &items, Weight, 5.0), Ok(2.0));
    }

    #[test]
    fn test_exactly_at_limit_is_feasible() {
        let items = catalog(&[5.0, 1.0, 1.0], &[10.0, 1.0, 1.0]);
        let g = Genome::from_bits(&[1, 0, 0]);
        assert_eq!(fitness(&g, &items, Weight, 5.0), Ok(10.0));
    }

    #[test]
    fn test_over_limit_scores_zero() {
        let items = catalog(&[5.0, 1.0, 1.0], &[10.0, 1.0, 1.0]);
        let g = Genome::from_bits(&[1, 1, 0]);
        assert_eq!(fitness(&g, &items, Weight, 5.0), Ok(0.0));
    }

    #[test]
    fn test_empty_selection_scores_zero() {
        let items = catalog(&[5.0, 1.0], &[10.0, 1.0]);
        let g = Genome::from_bits(&[0, 0]);
        assert_eq!(fitness(&g, &items, Weight, 0.0), Ok(0.0));
    }

    #[test]
    fn test_empty_catalog_and_genome() {
        let items: Vec<Item> = Vec::new();
        assert_eq!(fitness(&Genome::default(), &items, Weight, 0.0), Ok(0.0));
    }

    #[test]
    fn test_length_mismatch_is_invalid_input() {
        let items = catalog(&[1.0, 1.0, 1.0], &[1.0, 1.0, 1.0]);
        let g = Genome::from_bits(&[1, 0]);
        assert!(matches!(
            fitness(&g, &items, Weight, 10.0),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_negative_cost_can_recover_budget() {
        // Short-circuit happens on the running sum, so order matters.
        let items = catalog(&[-3.0, 5.0], &[1.0, 1.0]);
        let g = Genome::from_bits(&[1, 1]);
        assert_eq!(fitness(&g, &items, Weight, 2.0), Ok(2.0));

        let items = catalog(&[5.0, -3.0], &[1.0, 1.0]);
        assert_eq!(fitness(&g, &items, Weight, 2.0), Ok(0.0));
    }

    #[test]
    fn test_knapsack_fitness_delegates() {
        let items = catalog(&[5.0, 1.0, 1.0], &[10.0, 1.0, 1.0]);
        let f = KnapsackFitness::new(&items, Weight, 5.0);
        assert_eq!(f.genome_length(), 3);
        assert_eq!(f.limit(), 5.0);
        assert_eq!(f.evaluate(&Genome::from_bits(&[1, 0, 0])), Ok(10.0));
        assert_eq!(f.evaluate(&Genome::from_bits(&[1, 0, 1])), Ok(0.0));
    }

    proptest! {
        #[test]
        fn prop_fitness_is_zero_or_feasible_value(
            items in prop::collection::vec((0.0f64..10.0, 0.0f64..10.0), 0..24),
            seed_bits in prop::collection::vec(any::<bool>(), 24),
            limit in 0.0f64..60.0,
        ) {
            let catalog: Vec<Item> = items
                .iter()
                .map(|&(cost, value)| Item { cost, value })
                .collect();
            let genome: Genome = seed_bits.into_iter().take(catalog.len()).collect();

            let f = fitness(&genome, &catalog, Weight, limit).unwrap();
            prop_assert!(f >= 0.0);

            let cost: f64 = genome.selected_indices().map(|i| catalog[i].cost).sum();
            let value: f64 = genome.selected_indices().map(|i| catalog[i].value).sum();
            if cost > limit {
                prop_assert_eq!(f, 0.0);
            } else {
                prop_assert!((f - value).abs() < 1e-9);
            }
        }
    }
}
