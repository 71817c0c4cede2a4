//! Calculator assumptions: tax regimes and scheme constants

mod product;
pub mod loader;

pub use product::{DepositFeatures, HealthFeatures, ProductFeatures, RetirementFeatures};
pub(crate) use product::override_value;
pub use loader::LoadedAssumptions;

use crate::tax::TaxAssumptions;
use std::path::Path;

/// Container for all calculator assumptions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assumptions {
    pub tax: TaxAssumptions,
    pub product: ProductFeatures,
}

impl Assumptions {
    /// Built-in defaults (FY 2024-25 tax rules, standard scheme constants)
    pub fn default_rules() -> Self {
        Self::default()
    }

    /// Load assumptions from CSV files in the default location (data/assumptions/)
    pub fn from_csv() -> Result<Self, Box<dyn std::error::Error>> {
        Self::from_csv_path(Path::new(loader::DEFAULT_ASSUMPTIONS_PATH))
    }

    /// Load assumptions from CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let loaded = LoadedAssumptions::load_from(path)?;
        log::info!(
            "loaded {} tax slab rows and {} parameters from {}",
            loaded.tax_slabs.len(),
            loaded.parameters.len(),
            path.display()
        );
        Self::from_loaded(&loaded)
    }

    pub fn from_loaded(loaded: &LoadedAssumptions) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            tax: TaxAssumptions::from_loaded(loaded)?,
            product: ProductFeatures::from_loaded(loaded)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shipped_csv_matches_defaults() {
        let from_csv = Assumptions::from_csv().expect("Failed to load assumptions");
        assert_eq!(from_csv, Assumptions::default_rules());
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        assert!(Assumptions::from_csv_path(Path::new("does/not/exist")).is_err());
    }
}
