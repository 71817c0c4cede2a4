//! Retirement corpus planning
//!
//! Today's monthly expenses are inflated to the retirement date, the corpus
//! must fund them (paid at the start of each retirement year) until the life
//! expectancy age at the real return, and the monthly SIP needed to build
//! that corpus before retirement is back-solved at the nominal return.

use crate::assumptions::RetirementFeatures;
use crate::calculator::CalculatorKind;
use crate::error::{CalcError, CalcResult};
use crate::growth::{compound, monthly_rate, pv_annuity_due, sip_instalment_for};
use crate::validate::{self, NamedOutputs};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementInput {
    pub current_age: f64,
    pub retirement_age: f64,
    /// Monthly expenses in today's money
    pub monthly_expenses: f64,
    /// Annual inflation, percent
    pub inflation_rate: f64,
    /// Annual investment return, percent
    pub return_rate: f64,
    #[serde(default)]
    pub life_expectancy: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementResult {
    pub years_to_retirement: f64,
    pub years_in_retirement: f64,
    pub future_monthly_expense: f64,
    pub corpus_required: f64,
    pub monthly_sip_needed: f64,
}

impl NamedOutputs for RetirementResult {
    fn named_values(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("yearsToRetirement", self.years_to_retirement),
            ("yearsInRetirement", self.years_in_retirement),
            ("futureMonthlyExpense", self.future_monthly_expense),
            ("corpusRequired", self.corpus_required),
            ("monthlySipNeeded", self.monthly_sip_needed),
        ]
    }
}

pub fn plan_retirement(input: &RetirementInput, features: &RetirementFeatures) -> CalcResult<RetirementResult> {
    let current_age = validate::non_negative("currentAge", input.current_age)?;
    let retirement_age = validate::finite("retirementAge", input.retirement_age)?;
    let expenses = validate::non_negative("monthlyExpenses", input.monthly_expenses)?;
    let inflation = validate::rate("inflationRate", input.inflation_rate)?;
    let nominal = validate::rate("returnRate", input.return_rate)?;
    let life_expectancy = validate::finite(
        "lifeExpectancy",
        input.life_expectancy.unwrap_or(features.life_expectancy),
    )?;

    if retirement_age <= current_age {
        return Err(CalcError::invalid(
            "retirementAge",
            format!("must be after current age {}, got {}", current_age, retirement_age),
        ));
    }
    if life_expectancy <= retirement_age {
        return Err(CalcError::invalid(
            "lifeExpectancy",
            format!("must be after retirement age {}, got {}", retirement_age, life_expectancy),
        ));
    }

    let years_to_retirement = retirement_age - current_age;
    let years_in_retirement = life_expectancy - retirement_age;

    let future_monthly_expense = compound(expenses, inflation / 100.0, years_to_retirement);

    let real_rate = (nominal - inflation) / 100.0;
    let corpus_required = pv_annuity_due(future_monthly_expense * 12.0, years_in_retirement, real_rate);

    let monthly_sip_needed = sip_instalment_for(
        corpus_required,
        monthly_rate(nominal),
        years_to_retirement * 12.0,
    );

    validate::ensure_finite(
        CalculatorKind::Retirement,
        RetirementResult {
            years_to_retirement,
            years_in_retirement,
            future_monthly_expense,
            corpus_required,
            monthly_sip_needed,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn input() -> RetirementInput {
        RetirementInput {
            current_age: 30.0,
            retirement_age: 60.0,
            monthly_expenses: 50_000.0,
            inflation_rate: 6.0,
            return_rate: 12.0,
            life_expectancy: None,
        }
    }

    #[test]
    fn test_plan_with_default_life_expectancy() {
        let plan = plan_retirement(&input(), &RetirementFeatures::default()).unwrap();

        assert_eq!(plan.years_to_retirement, 30.0);
        assert_eq!(plan.years_in_retirement, 25.0);
        assert_abs_diff_eq!(plan.future_monthly_expense, 287_174.56, epsilon = 0.01);
        assert_abs_diff_eq!(plan.corpus_required, 46_695_815.31, epsilon = 0.01);
        assert_abs_diff_eq!(plan.monthly_sip_needed, 13_228.60, epsilon = 0.01);
    }

    #[test]
    fn test_zero_real_return_needs_plain_sum_of_expenses() {
        let mut flat = input();
        flat.return_rate = 6.0;
        let plan = plan_retirement(&flat, &RetirementFeatures::default()).unwrap();

        assert_abs_diff_eq!(
            plan.corpus_required,
            plan.future_monthly_expense * 12.0 * 25.0,
            epsilon = 1e-4
        );
    }

    #[test]
    fn test_longer_life_needs_bigger_corpus() {
        let features = RetirementFeatures::default();
        let base = plan_retirement(&input(), &features).unwrap();

        let mut longer = input();
        longer.life_expectancy = Some(95.0);
        let longer = plan_retirement(&longer, &features).unwrap();

        assert!(longer.corpus_required > base.corpus_required);
        assert!(longer.monthly_sip_needed > base.monthly_sip_needed);
    }

    #[test]
    fn test_rejects_inverted_ages() {
        let mut bad = input();
        bad.retirement_age = 30.0;
        let err = plan_retirement(&bad, &RetirementFeatures::default()).unwrap_err();
        assert_eq!(err.field(), Some("retirementAge"));

        let mut bad = input();
        bad.life_expectancy = Some(55.0);
        let err = plan_retirement(&bad, &RetirementFeatures::default()).unwrap_err();
        assert_eq!(err.field(), Some("lifeExpectancy"));
    }
}
