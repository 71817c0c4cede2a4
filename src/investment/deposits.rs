//! Bank deposits: fixed (lump sum) and recurring (monthly)

use crate::assumptions::DepositFeatures;
use crate::calculator::CalculatorKind;
use crate::error::CalcResult;
use crate::growth::{CompoundGrowth, CompoundingFrequency};
use crate::validate::{self, NamedOutputs};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FdInput {
    pub principal: f64,
    /// Annual interest rate, percent
    pub annual_rate: f64,
    pub years: f64,
    /// Falls back to the deposit assumptions (quarterly) when absent
    #[serde(default)]
    pub compounding: Option<CompoundingFrequency>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FdResult {
    pub principal: f64,
    pub interest: f64,
    pub maturity_amount: f64,
}

impl NamedOutputs for FdResult {
    fn named_values(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("principal", self.principal),
            ("interest", self.interest),
            ("maturityAmount", self.maturity_amount),
        ]
    }
}

/// A = P·(1 + r/n)^(n·t)
pub fn calculate_fd(input: &FdInput, features: &DepositFeatures) -> CalcResult<FdResult> {
    let principal = validate::non_negative("principal", input.principal)?;
    let rate = validate::rate("annualRate", input.annual_rate)?;
    let years = validate::non_negative("years", input.years)?;
    let frequency = input.compounding.unwrap_or(features.fd_compounding);

    let growth = CompoundGrowth::new(principal, rate, frequency, years);
    let maturity_amount = growth.future_value();

    validate::ensure_finite(
        CalculatorKind::Fd,
        FdResult {
            principal,
            interest: maturity_amount - principal,
            maturity_amount,
        },
    )
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RdInput {
    pub monthly_deposit: f64,
    /// Annual interest rate, percent
    pub annual_rate: f64,
    pub years: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RdResult {
    pub deposited_amount: f64,
    pub interest: f64,
    pub maturity_amount: f64,
}

impl NamedOutputs for RdResult {
    fn named_values(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("depositedAmount", self.deposited_amount),
            ("interest", self.interest),
            ("maturityAmount", self.maturity_amount),
        ]
    }
}

/// Quarterly-compounding approximation used by the product:
/// maturity = Σ_{i=1}^{n} P·(1 + r/4)^((n − i + 1)/3), n = 12t.
/// The fractional exponent treats each instalment as earning
/// (months remaining)/3 quarters of interest.
pub fn calculate_rd(input: &RdInput) -> CalcResult<RdResult> {
    let deposit = validate::non_negative("monthlyDeposit", input.monthly_deposit)?;
    let rate = validate::rate("annualRate", input.annual_rate)?;
    let n = validate::whole_months("years", input.years)?;

    let quarterly_rate = rate / 100.0 / 4.0;
    let maturity_amount: f64 = (1..=n)
        .map(|i| {
            let quarters = (n - i + 1) as f64 / 3.0;
            deposit * (1.0 + quarterly_rate).powf(quarters)
        })
        .sum();

    let deposited_amount = deposit * n as f64;

    validate::ensure_finite(
        CalculatorKind::Rd,
        RdResult {
            deposited_amount,
            interest: maturity_amount - deposited_amount,
            maturity_amount,
        },
    )
}
