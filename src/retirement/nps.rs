//! National Pension System: monthly contributions until the exit age, then a
//! lump sum / annuity split of the corpus

use crate::assumptions::RetirementFeatures;
use crate::calculator::CalculatorKind;
use crate::error::{CalcError, CalcResult};
use crate::growth::{monthly_rate, sip_future_value};
use crate::validate::{self, NamedOutputs};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NpsInput {
    pub current_age: f64,
    pub monthly_contribution: f64,
    /// Expected annual return, percent
    pub return_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NpsResult {
    pub total_invested: f64,
    pub corpus: f64,
    pub lumpsum: f64,
    pub annuity_corpus: f64,
    pub monthly_pension: f64,
}

impl NamedOutputs for NpsResult {
    fn named_values(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("totalInvested", self.total_invested),
            ("corpus", self.corpus),
            ("lumpsum", self.lumpsum),
            ("annuityCorpus", self.annuity_corpus),
            ("monthlyPension", self.monthly_pension),
        ]
    }
}

pub fn calculate_nps(input: &NpsInput, features: &RetirementFeatures) -> CalcResult<NpsResult> {
    let age = validate::non_negative("currentAge", input.current_age)?;
    let contribution = validate::non_negative("monthlyContribution", input.monthly_contribution)?;
    let rate = validate::rate("returnRate", input.return_rate)?;

    if age >= features.nps_exit_age {
        return Err(CalcError::invalid(
            "currentAge",
            format!("must be below the exit age {}, got {}", features.nps_exit_age, age),
        ));
    }

    let months = (features.nps_exit_age - age) * 12.0;
    let corpus = sip_future_value(contribution, monthly_rate(rate), months);
    let lumpsum = corpus * features.nps_lumpsum_share;
    let annuity_corpus = corpus - lumpsum;
    let monthly_pension = annuity_corpus * features.nps_annuity_rate_pct / 100.0 / 12.0;

    validate::ensure_finite(
        CalculatorKind::Nps,
        NpsResult {
            total_invested: contribution * months,
            corpus,
            lumpsum,
            annuity_corpus,
            monthly_pension,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_thirty_years_of_contributions() {
        let result = calculate_nps(
            &NpsInput {
                current_age: 30.0,
                monthly_contribution: 5_000.0,
                return_rate: 12.0,
            },
            &RetirementFeatures::default(),
        )
        .unwrap();

        assert_eq!(result.total_invested, 1_800_000.0);
        assert_abs_diff_eq!(result.corpus, 17_649_568.87, epsilon = 0.01);
        assert_abs_diff_eq!(result.lumpsum, 10_589_741.32, epsilon = 0.01);
        assert_abs_diff_eq!(result.annuity_corpus, 7_059_827.55, epsilon = 0.01);
        assert_abs_diff_eq!(result.monthly_pension, 35_299.14, epsilon = 0.01);
    }

    #[test]
    fn test_split_follows_assumptions() {
        let features = RetirementFeatures {
            nps_lumpsum_share: 0.0,
            ..RetirementFeatures::default()
        };
        let result = calculate_nps(
            &NpsInput {
                current_age: 50.0,
                monthly_contribution: 1_000.0,
                return_rate: 0.0,
            },
            &features,
        )
        .unwrap();

        assert_eq!(result.corpus, 120_000.0);
        assert_eq!(result.lumpsum, 0.0);
        assert_eq!(result.annuity_corpus, 120_000.0);
        assert_abs_diff_eq!(result.monthly_pension, 600.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rejects_age_at_exit() {
        let err = calculate_nps(
            &NpsInput {
                current_age: 60.0,
                monthly_contribution: 1_000.0,
                return_rate: 10.0,
            },
            &RetirementFeatures::default(),
        )
        .unwrap_err();
        assert_eq!(err.field(), Some("currentAge"));
    }
}
