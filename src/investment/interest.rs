//! Plain compound and simple interest on a lump sum

use crate::calculator::CalculatorKind;
use crate::error::CalcResult;
use crate::growth::{CompoundGrowth, CompoundingFrequency};
use crate::validate::{self, NamedOutputs};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompoundInterestInput {
    pub principal: f64,
    /// Annual rate, percent
    pub annual_rate: f64,
    pub years: f64,
    #[serde(default = "default_interest_compounding")]
    pub compounding: CompoundingFrequency,
}

fn default_interest_compounding() -> CompoundingFrequency {
    CompoundingFrequency::Annually
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleInterestInput {
    pub principal: f64,
    /// Annual rate, percent
    pub annual_rate: f64,
    pub years: f64,
}

/// Shared shape of both interest results
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestResult {
    pub principal: f64,
    pub interest: f64,
    pub total_amount: f64,
}

impl NamedOutputs for InterestResult {
    fn named_values(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("principal", self.principal),
            ("interest", self.interest),
            ("totalAmount", self.total_amount),
        ]
    }
}

/// A = P(1 + r/n)^(n·t)
pub fn calculate_compound_interest(input: &CompoundInterestInput) -> CalcResult<InterestResult> {
    let principal = validate::non_negative("principal", input.principal)?;
    let rate = validate::rate("annualRate", input.annual_rate)?;
    let years = validate::non_negative("years", input.years)?;

    let total_amount = CompoundGrowth::new(principal, rate, input.compounding, years).future_value();

    validate::ensure_finite(
        CalculatorKind::CompoundInterest,
        InterestResult {
            principal,
            interest: total_amount - principal,
            total_amount,
        },
    )
}

/// SI = P·r·t/100
pub fn calculate_simple_interest(input: &SimpleInterestInput) -> CalcResult<InterestResult> {
    let principal = validate::non_negative("principal", input.principal)?;
    let rate = validate::rate("annualRate", input.annual_rate)?;
    let years = validate::non_negative("years", input.years)?;

    let interest = principal * rate * years / 100.0;

    validate::ensure_finite(
        CalculatorKind::SimpleInterest,
        InterestResult {
            principal,
            interest,
            total_amount: principal + interest,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_simple_interest() {
        let result = calculate_simple_interest(&SimpleInterestInput {
            principal: 50_000.0,
            annual_rate: 8.0,
            years: 3.0,
        })
        .unwrap();
        assert_abs_diff_eq!(result.interest, 12_000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.total_amount, 62_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_compound_beats_simple_over_several_years() {
        let compound = calculate_compound_interest(&CompoundInterestInput {
            principal: 50_000.0,
            annual_rate: 8.0,
            years: 3.0,
            compounding: CompoundingFrequency::Annually,
        })
        .unwrap();

        // 50000 * 1.08^3
        assert_abs_diff_eq!(compound.total_amount, 62_985.6, epsilon = 1e-6);
        assert!(compound.interest > 12_000.0);
    }

    #[test]
    fn test_more_frequent_compounding_earns_more() {
        let amount = |compounding| {
            calculate_compound_interest(&CompoundInterestInput {
                principal: 10_000.0,
                annual_rate: 12.0,
                years: 2.0,
                compounding,
            })
            .unwrap()
            .total_amount
        };
        assert!(amount(CompoundingFrequency::Monthly) > amount(CompoundingFrequency::Quarterly));
        assert!(amount(CompoundingFrequency::Quarterly) > amount(CompoundingFrequency::Annually));
    }

    #[test]
    fn test_default_compounding_is_annual() {
        let input: CompoundInterestInput =
            serde_json::from_str(r#"{"principal": 100, "annualRate": 10, "years": 1}"#).unwrap();
        assert_eq!(input.compounding, CompoundingFrequency::Annually);
    }

    #[test]
    fn test_rejects_negative_time() {
        let err = calculate_simple_interest(&SimpleInterestInput {
            principal: 1_000.0,
            annual_rate: 5.0,
            years: -1.0,
        })
        .unwrap_err();
        assert_eq!(err.field(), Some("years"));
    }
}
