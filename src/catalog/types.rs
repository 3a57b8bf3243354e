//! Catalog item contract.

/// An entry of the item catalog.
///
/// Genomes are index-aligned with a `&[I]` of catalog items: gene `i`
/// decides whether item `i` is part of the selected subset.
///
/// # Implementing
///
/// ```
/// use u_bitevo::catalog::CatalogItem;
///
/// #[derive(Clone, Copy, Debug)]
/// enum Resource { Weight, Volume }
///
/// struct Crate { weight: f64, volume: f64, worth: f64 }
///
/// impl CatalogItem for Crate {
///     type Attribute = Resource;
///     fn cost(&self, attribute: Resource) -> f64 {
///         match attribute {
///             Resource::Weight => self.weight,
///             Resource::Volume => self.volume,
///         }
///     }
///     fn value(&self) -> f64 { self.worth }
/// }
/// ```
pub trait CatalogItem: Send + Sync {
    /// Selector naming which resource-cost attribute is constrained.
    type Attribute: Copy + Send + Sync + std::fmt::Debug;

    /// Returns this item's cost under `attribute`.
    fn cost(&self, attribute: Self::Attribute) -> f64;

    /// Returns the scalar value credited when the item is selected.
    fn value(&self) -> f64;
}
