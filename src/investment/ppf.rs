//! Public Provident Fund: yearly deposit, compounded annually

use crate::calculator::CalculatorKind;
use crate::error::CalcResult;
use crate::validate::{self, NamedOutputs, MAX_TENURE_YEARS};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PpfInput {
    pub yearly_investment: f64,
    /// Annual interest rate, percent
    pub annual_rate: f64,
    pub years: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PpfResult {
    pub invested_amount: f64,
    pub interest: f64,
    pub maturity_amount: f64,
}

impl NamedOutputs for PpfResult {
    fn named_values(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("investedAmount", self.invested_amount),
            ("interest", self.interest),
            ("maturityAmount", self.maturity_amount),
        ]
    }
}

/// Deposit at the start of each year, then credit a year's interest:
/// corpus = (corpus + P)·(1 + r), t times
pub fn calculate_ppf(input: &PpfInput) -> CalcResult<PpfResult> {
    let deposit = validate::non_negative("yearlyInvestment", input.yearly_investment)?;
    let rate = validate::rate("annualRate", input.annual_rate)? / 100.0;
    let years = validate::tenure("years", input.years, MAX_TENURE_YEARS)?;

    let mut corpus = 0.0;
    for _ in 0..years {
        corpus = (corpus + deposit) * (1.0 + rate);
    }

    let invested_amount = deposit * years as f64;

    validate::ensure_finite(
        CalculatorKind::Ppf,
        PpfResult {
            invested_amount,
            interest: corpus - invested_amount,
            maturity_amount: corpus,
        },
    )
}
