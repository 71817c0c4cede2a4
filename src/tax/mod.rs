//! Income tax: slab tables, regime rules and the two-regime comparison

mod slabs;
mod regime;
mod income;

pub use slabs::{TaxSlab, TaxSlabs};
pub use regime::{RegimeRules, RegimeTax, TaxAssumptions, TaxRegime};
pub use income::{calculate_income_tax, IncomeTaxInput, IncomeTaxResult};
