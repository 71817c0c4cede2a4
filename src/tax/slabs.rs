//! Progressive income tax slab tables
//!
//! A table is a list of lower thresholds with the marginal rate that applies
//! from that threshold up to the next one. The last slab is open ended.

use serde::{Deserialize, Serialize};

/// One marginal band: income above `lower` (up to the next slab) is taxed at `rate_pct`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaxSlab {
    pub lower: f64,
    pub rate_pct: f64,
}

/// Ascending slab table starting at zero
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxSlabs {
    slabs: Vec<TaxSlab>,
}

impl TaxSlabs {
    /// Build a table from (lower, rate%) pairs. Pairs are sorted; the first
    /// threshold must be zero and thresholds must be distinct.
    pub fn new(mut slabs: Vec<TaxSlab>) -> Result<Self, String> {
        slabs.sort_by(|a, b| a.lower.total_cmp(&b.lower));

        match slabs.first() {
            None => return Err("slab table is empty".to_string()),
            Some(first) if first.lower != 0.0 => {
                return Err(format!("first slab must start at 0, starts at {}", first.lower))
            }
            _ => {}
        }

        for pair in slabs.windows(2) {
            if pair[0].lower == pair[1].lower {
                return Err(format!("duplicate slab threshold {}", pair[0].lower));
            }
        }

        if let Some(bad) = slabs
            .iter()
            .find(|s| !s.lower.is_finite() || !s.rate_pct.is_finite() || s.rate_pct < 0.0)
        {
            return Err(format!("invalid slab {:?}", bad));
        }

        Ok(Self { slabs })
    }

    /// Old regime, FY 2024-25
    pub fn india_old_regime() -> Self {
        Self {
            slabs: vec![
                TaxSlab { lower: 0.0, rate_pct: 0.0 },
                TaxSlab { lower: 250_000.0, rate_pct: 5.0 },
                TaxSlab { lower: 500_000.0, rate_pct: 20.0 },
                TaxSlab { lower: 1_000_000.0, rate_pct: 30.0 },
            ],
        }
    }

    /// New regime, FY 2024-25
    pub fn india_new_regime() -> Self {
        Self {
            slabs: vec![
                TaxSlab { lower: 0.0, rate_pct: 0.0 },
                TaxSlab { lower: 300_000.0, rate_pct: 5.0 },
                TaxSlab { lower: 700_000.0, rate_pct: 10.0 },
                TaxSlab { lower: 1_000_000.0, rate_pct: 15.0 },
                TaxSlab { lower: 1_200_000.0, rate_pct: 20.0 },
                TaxSlab { lower: 1_500_000.0, rate_pct: 30.0 },
            ],
        }
    }

    pub fn slabs(&self) -> &[TaxSlab] {
        &self.slabs
    }

    /// Tax due on `taxable` income, summing each band's share
    pub fn tax_on(&self, taxable: f64) -> f64 {
        if taxable <= 0.0 {
            return 0.0;
        }

        self.slabs
            .iter()
            .enumerate()
            .map(|(idx, slab)| {
                let upper = self
                    .slabs
                    .get(idx + 1)
                    .map(|next| next.lower)
                    .unwrap_or(f64::INFINITY);
                let in_band = (taxable.min(upper) - slab.lower).max(0.0);
                in_band * slab.rate_pct / 100.0
            })
            .sum()
    }

    /// Marginal rate (percent) applying to the last unit of `taxable`
    pub fn marginal_rate(&self, taxable: f64) -> f64 {
        self.slabs
            .iter()
            .rev()
            .find(|s| taxable > s.lower)
            .map(|s| s.rate_pct)
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_old_regime_slab_tax() {
        let slabs = TaxSlabs::india_old_regime();
        assert_eq!(slabs.tax_on(250_000.0), 0.0);
        // 5% of 250k
        assert_relative_eq!(slabs.tax_on(500_000.0), 12_500.0);
        // 12.5k + 20% of 500k
        assert_relative_eq!(slabs.tax_on(1_000_000.0), 112_500.0);
        // + 30% of 200k
        assert_relative_eq!(slabs.tax_on(1_200_000.0), 172_500.0);
    }

    #[test]
    fn test_new_regime_slab_tax() {
        let slabs = TaxSlabs::india_new_regime();
        // 5% of 400k + 10% of 300k + 15% of 200k + 20% of 300k + 30% of 500k
        assert_relative_eq!(slabs.tax_on(2_000_000.0), 20_000.0 + 30_000.0 + 30_000.0 + 60_000.0 + 150_000.0);
        assert_eq!(slabs.marginal_rate(1_500_000.0), 20.0);
        assert_eq!(slabs.marginal_rate(1_500_001.0), 30.0);
    }

    #[test]
    fn test_negative_taxable_is_untaxed() {
        assert_eq!(TaxSlabs::india_new_regime().tax_on(-10.0), 0.0);
    }

    #[test]
    fn test_new_sorts_and_rejects_bad_tables() {
        let slabs = TaxSlabs::new(vec![
            TaxSlab { lower: 100.0, rate_pct: 10.0 },
            TaxSlab { lower: 0.0, rate_pct: 0.0 },
        ])
        .unwrap();
        assert_eq!(slabs.slabs()[0].lower, 0.0);
        assert_relative_eq!(slabs.tax_on(200.0), 10.0);

        assert!(TaxSlabs::new(vec![]).is_err());
        assert!(TaxSlabs::new(vec![TaxSlab { lower: 10.0, rate_pct: 5.0 }]).is_err());
        assert!(TaxSlabs::new(vec![
            TaxSlab { lower: 0.0, rate_pct: 0.0 },
            TaxSlab { lower: 0.0, rate_pct: 5.0 },
        ])
        .is_err());
    }
}
