//! Systematic Investment Plan: a fixed monthly instalment compounding monthly

use crate::calculator::CalculatorKind;
use crate::error::CalcResult;
use crate::growth::{monthly_rate, sip_future_value};
use crate::validate::{self, NamedOutputs};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SipInput {
    pub monthly_investment: f64,
    /// Expected annual return, percent
    pub annual_rate: f64,
    pub years: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SipResult {
    pub invested_amount: f64,
    pub returns: f64,
    pub total_value: f64,
}

impl NamedOutputs for SipResult {
    fn named_values(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("investedAmount", self.invested_amount),
            ("returns", self.returns),
            ("totalValue", self.total_value),
        ]
    }
}

/// Value of the plan at the end of one year
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SipGrowthRow {
    pub year: u32,
    pub invested_amount: f64,
    pub returns: f64,
    pub total_value: f64,
}

struct SipTerms {
    instalment: f64,
    monthly_rate: f64,
    months: u32,
}

fn validated(input: &SipInput) -> CalcResult<SipTerms> {
    let instalment = validate::non_negative("monthlyInvestment", input.monthly_investment)?;
    let rate = validate::rate("annualRate", input.annual_rate)?;
    let months = validate::whole_months("years", input.years)?;

    Ok(SipTerms {
        instalment,
        monthly_rate: monthly_rate(rate),
        months,
    })
}

/// FV = P·[((1+i)^n − 1)/i]·(1+i) with n = 12t, i = r/12/100
pub fn calculate_sip(input: &SipInput) -> CalcResult<SipResult> {
    let terms = validated(input)?;

    let months = terms.months as f64;
    let invested_amount = terms.instalment * months;
    let total_value = sip_future_value(terms.instalment, terms.monthly_rate, months);

    validate::ensure_finite(
        CalculatorKind::Sip,
        SipResult {
            invested_amount,
            returns: total_value - invested_amount,
            total_value,
        },
    )
}

/// Year-end snapshots; a part year at the end gets its own row
pub fn sip_growth_table(input: &SipInput) -> CalcResult<Vec<SipGrowthRow>> {
    let terms = validated(input)?;
    let years = terms.months.div_ceil(12);

    let rows = (1..=years)
        .map(|year| {
            let months = (12 * year).min(terms.months) as f64;
            let invested_amount = terms.instalment * months;
            let total_value = sip_future_value(terms.instalment, terms.monthly_rate, months);
            SipGrowthRow {
                year,
                invested_amount,
                returns: total_value - invested_amount,
                total_value,
            }
        })
        .collect();

    Ok(rows)
}
