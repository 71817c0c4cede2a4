//! Income tax under the old and new regimes
//!
//! Old regime: the caller's deductions (and the old standard deduction, if
//! any) come off gross income before the slabs apply. New regime: only the
//! flat standard deduction is allowed.

use super::regime::{RegimeTax, TaxAssumptions, TaxRegime};
use crate::calculator::CalculatorKind;
use crate::error::CalcResult;
use crate::validate::{self, NamedOutputs};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeTaxInput {
    pub annual_income: f64,
    /// Chapter VI-A style deductions, old regime only
    #[serde(default)]
    pub deductions: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeTaxResult {
    pub taxable_old: f64,
    pub taxable_new: f64,
    pub tax_old: f64,
    pub tax_new: f64,
    /// Regime with the lower bill; new wins ties
    pub recommended_regime: TaxRegime,
    pub savings: f64,
    pub old_breakdown: RegimeTax,
    pub new_breakdown: RegimeTax,
}

impl NamedOutputs for IncomeTaxResult {
    fn named_values(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("taxableOld", self.taxable_old),
            ("taxableNew", self.taxable_new),
            ("taxOld", self.tax_old),
            ("taxNew", self.tax_new),
            ("savings", self.savings),
        ]
    }
}

pub fn calculate_income_tax(input: &IncomeTaxInput, tax: &TaxAssumptions) -> CalcResult<IncomeTaxResult> {
    let income = validate::non_negative("annualIncome", input.annual_income)?;
    let deductions = validate::non_negative("deductions", input.deductions)?;

    let taxable_old = (income - tax.old.standard_deduction - deductions).max(0.0);
    let taxable_new = (income - tax.new.standard_deduction).max(0.0);

    let old = tax.rules(TaxRegime::Old).assess(taxable_old, tax.cess_rate);
    let new = tax.rules(TaxRegime::New).assess(taxable_new, tax.cess_rate);

    let recommended_regime = if new.total <= old.total {
        TaxRegime::New
    } else {
        TaxRegime::Old
    };

    validate::ensure_finite(
        CalculatorKind::IncomeTax,
        IncomeTaxResult {
            taxable_old,
            taxable_new,
            tax_old: old.total,
            tax_new: new.total,
            recommended_regime,
            savings: (old.total - new.total).abs(),
            old_breakdown: old,
            new_breakdown: new,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tax_for(annual_income: f64, deductions: f64) -> IncomeTaxResult {
        calculate_income_tax(
            &IncomeTaxInput {
                annual_income,
                deductions,
            },
            &TaxAssumptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_both_regimes() {
        let result = tax_for(1_200_000.0, 150_000.0);

        assert_relative_eq!(result.taxable_old, 1_050_000.0);
        assert_relative_eq!(result.taxable_new, 1_125_000.0);
        assert_relative_eq!(result.tax_old, 132_600.0, epsilon = 1e-6);
        // 20k + 30k + 18.75k, plus 4% cess
        assert_relative_eq!(result.tax_new, 71_500.0, epsilon = 1e-6);
        assert_eq!(result.recommended_regime, TaxRegime::New);
        assert_relative_eq!(result.savings, 61_100.0, epsilon = 1e-6);
        assert_eq!(result.old_breakdown.marginal_rate_pct, 30.0);
        assert_eq!(result.new_breakdown.marginal_rate_pct, 15.0);
    }

    #[test]
    fn test_rebate_boundary_in_new_regime() {
        // 775k gross less 75k standard deduction sits exactly on the 7L limit
        assert_eq!(tax_for(775_000.0, 0.0).tax_new, 0.0);
        assert!(tax_for(775_001.0, 0.0).tax_new > 20_000.0);
    }

    #[test]
    fn test_large_deductions_favour_old_regime() {
        let result = tax_for(800_000.0, 300_000.0);
        assert_eq!(result.taxable_old, 500_000.0);
        assert_eq!(result.tax_old, 0.0);
        assert!(result.tax_new > 0.0);
        assert_eq!(result.recommended_regime, TaxRegime::Old);
    }

    #[test]
    fn test_deductions_above_income_floor_at_zero() {
        let result = tax_for(100_000.0, 500_000.0);
        assert_eq!(result.taxable_old, 0.0);
        assert_eq!(result.taxable_new, 25_000.0);
        assert_eq!(result.tax_old, 0.0);
        assert_eq!(result.tax_new, 0.0);
    }

    #[test]
    fn test_rejects_negative_income() {
        let err = calculate_income_tax(
            &IncomeTaxInput {
                annual_income: -1.0,
                deductions: 0.0,
            },
            &TaxAssumptions::default(),
        )
        .unwrap_err();
        assert_eq!(err.field(), Some("annualIncome"));
    }
}
