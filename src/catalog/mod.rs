//! Selectable-item catalogs.
//!
//! The evolutionary core only needs an ordered, immutable slice of items
//! that can report a cost for a chosen attribute and a scalar value. That
//! contract is [`CatalogItem`]. A ready-made nutrition catalog ([`Food`],
//! [`Nutrient`]) is provided for the common diet-planning use case.

mod food;
mod types;

pub use food::{sample_foods, Food, Nutrient, NutritionTotals};
pub use types::CatalogItem;
