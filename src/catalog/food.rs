//! Nutrition catalog: foods priced in currency and measured per serving.

use std::fmt;
use std::str::FromStr;

use super::types::CatalogItem;
use crate::error::{Error, Result};
use crate::ga::Genome;

/// Nutrient (or other per-serving measure) that the resource limit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Nutrient {
    Calories,
    Fat,
    Protein,
    Carbs,
    Sugar,
    Taste,
}

impl Nutrient {
    /// All selectors, in declaration order.
    pub const ALL: [Nutrient; 6] = [
        Nutrient::Calories,
        Nutrient::Fat,
        Nutrient::Protein,
        Nutrient::Carbs,
        Nutrient::Sugar,
        Nutrient::Taste,
    ];

    /// Lowercase name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Nutrient::Calories => "calories",
            Nutrient::Fat => "fat",
            Nutrient::Protein => "protein",
            Nutrient::Carbs => "carbs",
            Nutrient::Sugar => "sugar",
            Nutrient::Taste => "taste",
        }
    }

    /// Unit suffix for amounts of this measure (`None` for unitless ones).
    pub fn unit(self) -> Option<&'static str> {
        match self {
            Nutrient::Calories | Nutrient::Taste => None,
            _ => Some("g"),
        }
    }
}

impl fmt::Display for Nutrient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Nutrient {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Nutrient::ALL
            .into_iter()
            .find(|n| n.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::InvalidInput(format!("unknown nutrient '{wanted}'")))
    }
}

/// A food item with per-serving nutrition, a price and a taste score.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Food {
    pub name: String,
    pub calories: f64,
    /// Grams of fat.
    pub fat: f64,
    /// Grams of protein.
    pub protein: f64,
    /// Grams of carbohydrates.
    pub carbs: f64,
    /// Grams of sugar.
    pub sugar: f64,
    /// Price of one serving. This is the value the optimizer maximizes.
    pub price: f64,
    /// Subjective taste score, 0 to 10.
    pub taste: f64,
}

impl Food {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        calories: f64,
        fat: f64,
        protein: f64,
        carbs: f64,
        sugar: f64,
        price: f64,
        taste: f64,
    ) -> Self {
        Self {
            name: name.into(),
            calories,
            fat,
            protein,
            carbs,
            sugar,
            price,
            taste,
        }
    }

    /// Returns the amount of `nutrient` in one serving.
    pub fn amount(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Calories => self.calories,
            Nutrient::Fat => self.fat,
            Nutrient::Protein => self.protein,
            Nutrient::Carbs => self.carbs,
            Nutrient::Sugar => self.sugar,
            Nutrient::Taste => self.taste,
        }
    }
}

impl CatalogItem for Food {
    type Attribute = Nutrient;

    fn cost(&self, attribute: Nutrient) -> f64 {
        self.amount(attribute)
    }

    fn value(&self) -> f64 {
        self.price
    }
}

/// A 22-item pantry suitable for demos, tests and benchmarks.
pub fn sample_foods() -> Vec<Food> {
    vec![
        Food::new("Eggs", 231.0, 15.0, 18.0, 1.8, 1.8, 2.99, 7.0),
        Food::new("Chicken Breast", 165.0, 3.6, 31.0, 0.01, 0.01, 1.99, 8.0),
        Food::new("Rye Bread", 260.0, 3.3, 9.0, 48.0, 4.0, 4.99, 7.0),
        Food::new("Butter", 717.0, 81.0, 0.9, 0.1, 0.1, 5.99, 8.0),
        Food::new("Milk Chocolate", 535.0, 30.0, 8.0, 59.0, 52.0, 2.49, 9.0),
        Food::new("Honey", 304.0, 0.01, 0.3, 82.0, 82.0, 4.49, 8.5),
        Food::new("Milk", 149.0, 8.0, 8.0, 12.0, 12.0, 1.59, 6.0),
        Food::new("Greek Yoghurt", 146.0, 3.8, 20.0, 7.8, 4.0, 1.99, 8.0),
        Food::new("Strawberries", 91.0, 0.3, 0.67, 7.7, 4.9, 4.99, 9.0),
        Food::new("Banana", 89.0, 0.3, 1.0, 23.0, 12.0, 1.39, 9.5),
        Food::new("Apple", 52.0, 0.2, 0.3, 14.0, 10.0, 1.29, 7.0),
        Food::new("Pecan Nuts", 400.0, 40.0, 5.0, 8.0, 2.0, 5.99, 6.0),
        Food::new("Steak", 405.0, 30.0, 38.0, 0.01, 0.01, 10.99, 10.0),
        Food::new("Protein Powder", 100.0, 2.0, 22.0, 4.0, 2.0, 1.99, 8.0),
        Food::new("Protein Yogurt", 180.0, 1.0, 20.0, 6.0, 4.0, 1.29, 8.5),
        Food::new("Blueberries", 60.0, 0.3, 0.7, 15.0, 10.0, 4.99, 9.0),
        Food::new("Almonds", 580.0, 50.0, 21.0, 21.55, 4.35, 4.79, 5.5),
        Food::new("Broccoli", 34.0, 0.4, 2.8, 7.0, 1.7, 4.69, 3.5),
        Food::new("Tomatoes", 22.5, 0.25, 1.1, 4.86, 2.6, 1.99, 6.5),
        Food::new("Potatoes", 320.0, 0.1, 2.0, 19.0, 0.2, 2.49, 9.0),
        Food::new("Rice", 150.0, 0.3, 2.7, 28.0, 0.1, 2.09, 8.5),
        Food::new("Watermelon", 30.0, 0.2, 0.6, 8.0, 6.0, 3.99, 9.5),
    ]
}

/// Aggregate nutrition of the foods a genome selects.
///
/// Raw figures only; formatting them is left to the caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NutritionTotals {
    /// Number of selected foods.
    pub items: usize,
    pub calories: f64,
    pub fat: f64,
    pub protein: f64,
    pub carbs: f64,
    pub sugar: f64,
    pub price: f64,
    /// Mean taste score, `None` when nothing is selected.
    pub average_taste: Option<f64>,
}

impl NutritionTotals {
    /// Sums every attribute over the foods selected by `genome`.
    ///
    /// # Errors
    /// [`Error::InvalidInput`] if `genome` and `foods` differ in length.
    pub fn of(foods: &[Food], genome: &Genome) -> Result<Self> {
        if genome.len() != foods.len() {
            return Err(Error::InvalidInput(format!(
                "genome length {} does not match catalog length {}",
                genome.len(),
                foods.len()
            )));
        }

        let mut totals = NutritionTotals::default();
        let mut taste = 0.0;
        for food in genome.selected_indices().map(|i| &foods[i]) {
            totals.items += 1;
            totals.calories += food.calories;
            totals.fat += food.fat;
            totals.protein += food.protein;
            totals.carbs += food.carbs;
            totals.sugar += food.sugar;
            totals.price += food.price;
            taste += food.taste;
        }
        if totals.items > 0 {
            totals.average_taste = Some(taste / totals.items as f64);
        }
        Ok(totals)
    }

    /// Total amount of `nutrient` (for [`Nutrient::Taste`], the mean score).
    pub fn amount(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Calories => self.calories,
            Nutrient::Fat => self.fat,
            Nutrient::Protein => self.protein,
            Nutrient::Carbs => self.carbs,
            Nutrient::Sugar => self.sugar,
            Nutrient::Taste => self.average_taste.unwrap_or(0.0),
        }
    }
}
