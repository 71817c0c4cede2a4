//! Per-regime rules: slab table, standard deduction, rebate and cess

use super::slabs::{TaxSlab, TaxSlabs};
use crate::assumptions::loader::LoadedAssumptions;
use crate::assumptions::override_value;
use serde::{Deserialize, Serialize};

/// Which regime a figure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxRegime {
    Old,
    New,
}

impl TaxRegime {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaxRegime::Old => "old",
            TaxRegime::New => "new",
        }
    }
}

/// Rules applied to income under one regime
#[derive(Debug, Clone, PartialEq)]
pub struct RegimeRules {
    pub slabs: TaxSlabs,

    /// Flat amount subtracted from gross income before slabs apply
    pub standard_deduction: f64,

    /// Slab tax is fully rebated when taxable income does not exceed this
    pub rebate_limit: f64,
}

/// Breakdown of the tax due under one regime
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegimeTax {
    pub taxable: f64,
    /// Slab rate (percent) on the last rupee of taxable income
    pub marginal_rate_pct: f64,
    pub slab_tax: f64,
    pub rebate: f64,
    pub cess: f64,
    pub total: f64,
}

impl RegimeRules {
    /// Tax on `taxable` income, including rebate and cess
    pub fn assess(&self, taxable: f64, cess_rate: f64) -> RegimeTax {
        let taxable = taxable.max(0.0);
        let slab_tax = self.slabs.tax_on(taxable);
        let rebate = if taxable <= self.rebate_limit { slab_tax } else { 0.0 };
        let cess = (slab_tax - rebate) * cess_rate;

        RegimeTax {
            taxable,
            marginal_rate_pct: self.slabs.marginal_rate(taxable),
            slab_tax,
            rebate,
            cess,
            total: slab_tax - rebate + cess,
        }
    }
}

/// Income tax assumptions for both regimes
#[derive(Debug, Clone, PartialEq)]
pub struct TaxAssumptions {
    pub old: RegimeRules,
    pub new: RegimeRules,

    /// Health & education cess as a fraction of post-rebate tax
    pub cess_rate: f64,
}

impl Default for TaxAssumptions {
    fn default() -> Self {
        Self {
            old: RegimeRules {
                slabs: TaxSlabs::india_old_regime(),
                standard_deduction: 0.0,
                rebate_limit: 500_000.0,
            },
            new: RegimeRules {
                slabs: TaxSlabs::india_new_regime(),
                standard_deduction: 75_000.0,
                rebate_limit: 700_000.0,
            },
            cess_rate: 0.04,
        }
    }
}

impl TaxAssumptions {
    pub fn rules(&self, regime: TaxRegime) -> &RegimeRules {
        match regime {
            TaxRegime::Old => &self.old,
            TaxRegime::New => &self.new,
        }
    }

    /// Defaults overridden by slab rows and parameters from CSV
    pub fn from_loaded(loaded: &LoadedAssumptions) -> Result<Self, String> {
        let mut tax = Self::default();

        for regime in [TaxRegime::Old, TaxRegime::New] {
            let slabs: Vec<TaxSlab> = loaded
                .tax_slabs
                .iter()
                .filter(|row| row.regime.eq_ignore_ascii_case(regime.as_str()))
                .map(|row| TaxSlab {
                    lower: row.lower,
                    rate_pct: row.rate_pct,
                })
                .collect();

            if !slabs.is_empty() {
                let table = TaxSlabs::new(slabs).map_err(|e| format!("{} regime: {}", regime.as_str(), e))?;
                match regime {
                    TaxRegime::Old => tax.old.slabs = table,
                    TaxRegime::New => tax.new.slabs = table,
                }
            }
        }

        if let Some(unknown) = loaded
            .tax_slabs
            .iter()
            .find(|row| !row.regime.eq_ignore_ascii_case("old") && !row.regime.eq_ignore_ascii_case("new"))
        {
            return Err(format!("unknown tax regime: {}", unknown.regime));
        }

        let params = &loaded.parameters;
        override_value(params, "tax_cess_rate", &mut tax.cess_rate);
        override_value(params, "old_standard_deduction", &mut tax.old.standard_deduction);
        override_value(params, "new_standard_deduction", &mut tax.new.standard_deduction);
        override_value(params, "old_rebate_limit", &mut tax.old.rebate_limit);
        override_value(params, "new_rebate_limit", &mut tax.new.rebate_limit);

        Ok(tax)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::loader::SlabRow;
    use approx::assert_relative_eq;
    use std::collections::HashMap;

    #[test]
    fn test_rebate_wipes_tax_up_to_limit() {
        let tax = TaxAssumptions::default();

        let at_limit = tax.new.assess(700_000.0, tax.cess_rate);
        assert_relative_eq!(at_limit.slab_tax, 20_000.0);
        // rebated income still reports the slab it falls in
        assert_eq!(at_limit.marginal_rate_pct, 5.0);
        assert_eq!(at_limit.total, 0.0);

        let above = tax.new.assess(700_001.0, tax.cess_rate);
        assert_eq!(above.rebate, 0.0);
        assert_relative_eq!(above.total, 20_000.1 * 1.04, epsilon = 1e-6);
    }

    #[test]
    fn test_cess_on_old_regime() {
        let tax = TaxAssumptions::default();
        let assessed = tax.old.assess(1_050_000.0, tax.cess_rate);

        assert_relative_eq!(assessed.slab_tax, 127_500.0);
        assert_eq!(assessed.marginal_rate_pct, 30.0);
        assert_relative_eq!(assessed.cess, 5_100.0, epsilon = 1e-6);
        assert_relative_eq!(assessed.total, 132_600.0, epsilon = 1e-6);
    }

    #[test]
    fn test_from_loaded_replaces_slabs_and_parameters() {
        let loaded = LoadedAssumptions {
            tax_slabs: vec![
                SlabRow { regime: "new".into(), lower: 0.0, rate_pct: 0.0 },
                SlabRow { regime: "new".into(), lower: 400_000.0, rate_pct: 5.0 },
            ],
            parameters: HashMap::from([("tax_cess_rate".to_string(), 0.0)]),
        };
        let tax = TaxAssumptions::from_loaded(&loaded).unwrap();

        assert_eq!(tax.new.slabs.slabs().len(), 2);
        assert_eq!(tax.old, TaxAssumptions::default().old);
        assert_eq!(tax.cess_rate, 0.0);
    }

    #[test]
    fn test_from_loaded_rejects_unknown_regime() {
        let loaded = LoadedAssumptions {
            tax_slabs: vec![SlabRow { regime: "flat".into(), lower: 0.0, rate_pct: 10.0 }],
            parameters: HashMap::new(),
        };
        assert!(TaxAssumptions::from_loaded(&loaded).is_err());
    }
}
