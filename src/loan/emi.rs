//! Equated monthly instalment for home, car, personal and education loans

use crate::calculator::CalculatorKind;
use crate::error::CalcResult;
use crate::growth::{monthly_rate, ZERO_RATE_EPSILON};
use crate::validate::{self, NamedOutputs, MAX_TENURE_MONTHS};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmiInput {
    pub principal: f64,
    /// Annual interest rate, percent
    pub annual_rate: f64,
    /// Tenure in months
    pub months: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmiResult {
    pub monthly_emi: f64,
    pub total_interest: f64,
    pub total_payment: f64,
}

impl NamedOutputs for EmiResult {
    fn named_values(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("monthlyEmi", self.monthly_emi),
            ("totalInterest", self.total_interest),
            ("totalPayment", self.total_payment),
        ]
    }
}

/// Validated loan terms, shared with the amortization schedule
#[derive(Debug, Clone, Copy)]
pub(super) struct LoanTerms {
    pub principal: f64,
    pub monthly_rate: f64,
    pub months: u32,
}

impl LoanTerms {
    pub fn from_input(input: &EmiInput) -> CalcResult<Self> {
        let principal = validate::positive("principal", input.principal)?;
        let rate = validate::rate("annualRate", input.annual_rate)?;
        let months = validate::tenure("months", input.months, MAX_TENURE_MONTHS)?;

        Ok(Self {
            principal,
            monthly_rate: monthly_rate(rate),
            months,
        })
    }

    /// EMI = P·i·(1+i)^n / ((1+i)^n − 1), or P/n at zero rate
    pub fn emi(&self) -> f64 {
        let n = self.months as f64;
        if self.monthly_rate.abs() < ZERO_RATE_EPSILON {
            return self.principal / n;
        }

        let growth = (1.0 + self.monthly_rate).powf(n);
        self.principal * self.monthly_rate * growth / (growth - 1.0)
    }
}

pub fn calculate_emi(input: &EmiInput) -> CalcResult<EmiResult> {
    let terms = LoanTerms::from_input(input)?;
    let monthly_emi = terms.emi();
    let total_payment = monthly_emi * terms.months as f64;

    validate::ensure_finite(
        CalculatorKind::Emi,
        EmiResult {
            monthly_emi,
            total_interest: total_payment - terms.principal,
            total_payment,
        },
    )
}
