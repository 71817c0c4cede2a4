//! Statutory gratuity: 15 days' wages per year of service on a 26-day month

use crate::calculator::CalculatorKind;
use crate::error::CalcResult;
use crate::validate::{self, NamedOutputs};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GratuityInput {
    /// Last drawn monthly basic + DA
    pub last_salary: f64,
    pub years_of_service: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GratuityResult {
    pub gratuity_amount: f64,
}

impl NamedOutputs for GratuityResult {
    fn named_values(&self) -> Vec<(&'static str, f64)> {
        vec![("gratuityAmount", self.gratuity_amount)]
    }
}

pub fn calculate_gratuity(input: &GratuityInput) -> CalcResult<GratuityResult> {
    let salary = validate::non_negative("lastSalary", input.last_salary)?;
    let years = validate::non_negative("yearsOfService", input.years_of_service)?;

    validate::ensure_finite(
        CalculatorKind::Gratuity,
        GratuityResult {
            gratuity_amount: salary * 15.0 * years / 26.0,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_ten_years_on_fifty_thousand() {
        let result = calculate_gratuity(&GratuityInput {
            last_salary: 50_000.0,
            years_of_service: 10.0,
        })
        .unwrap();
        assert_abs_diff_eq!(result.gratuity_amount, 288_461.54, epsilon = 0.01);
    }

    #[test]
    fn test_rejects_negative_service() {
        let err = calculate_gratuity(&GratuityInput {
            last_salary: 50_000.0,
            years_of_service: -2.0,
        })
        .unwrap_err();
        assert_eq!(err.field(), Some("yearsOfService"));
    }
}
