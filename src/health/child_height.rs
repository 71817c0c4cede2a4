//! Mid-parental adult height prediction

use super::body::Gender;
use crate::calculator::CalculatorKind;
use crate::error::CalcResult;
use crate::validate::{self, NamedOutputs};
use serde::{Deserialize, Serialize};

/// Average adult height gap between sexes, cm
const SEX_ADJUSTMENT_CM: f64 = 13.0;

/// Half-width of the predicted range, cm
const RANGE_CM: f64 = 10.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildHeightInput {
    pub father_height_cm: f64,
    pub mother_height_cm: f64,
    pub gender: Gender,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildHeightResult {
    pub predicted_height: f64,
    pub range_low: f64,
    pub range_high: f64,
}

impl NamedOutputs for ChildHeightResult {
    fn named_values(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("predictedHeight", self.predicted_height),
            ("rangeLow", self.range_low),
            ("rangeHigh", self.range_high),
        ]
    }
}

/// boy = (F + M + 13)/2, girl = (F + M − 13)/2
pub fn predict_child_height(input: &ChildHeightInput) -> CalcResult<ChildHeightResult> {
    let father = validate::positive("fatherHeightCm", input.father_height_cm)?;
    let mother = validate::positive("motherHeightCm", input.mother_height_cm)?;

    let adjustment = match input.gender {
        Gender::Male => SEX_ADJUSTMENT_CM,
        Gender::Female => -SEX_ADJUSTMENT_CM,
    };
    let predicted_height = (father + mother + adjustment) / 2.0;

    validate::ensure_finite(
        CalculatorKind::ChildHeight,
        ChildHeightResult {
            predicted_height,
            range_low: predicted_height - RANGE_CM,
            range_high: predicted_height + RANGE_CM,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn predict(gender: Gender) -> ChildHeightResult {
        predict_child_height(&ChildHeightInput {
            father_height_cm: 175.0,
            mother_height_cm: 162.0,
            gender,
        })
        .unwrap()
    }

    #[test]
    fn test_boy_and_girl_predictions() {
        let boy = predict(Gender::Male);
        assert_eq!(boy.predicted_height, 175.0);
        assert_eq!(boy.range_low, 165.0);
        assert_eq!(boy.range_high, 185.0);

        assert_eq!(predict(Gender::Female).predicted_height, 162.0);
    }

    #[test]
    fn test_rejects_missing_parent_height() {
        let err = predict_child_height(&ChildHeightInput {
            father_height_cm: 175.0,
            mother_height_cm: 0.0,
            gender: Gender::Female,
        })
        .unwrap_err();
        assert_eq!(err.field(), Some("motherHeightCm"));
    }
}
