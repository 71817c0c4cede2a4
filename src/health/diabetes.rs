//! Type 2 diabetes risk score
//!
//! Six factors add up to at most 17 points:
//!
//! | Factor                     | Points                                       |
//! |----------------------------|----------------------------------------------|
//! | Age                        | <35: 0, 35-44: 1, 45-54: 2, 55-64: 3, 65+: 4 |
//! | BMI                        | <25: 0, 25-29.9: 1, 30+: 3                   |
//! | Waist (cm)                 | <80: 0, 80-93.9: 1, 94-101.9: 2, 102+: 3     |
//! | Family history             | none: 0, extended: 2, immediate: 3           |
//! | High blood pressure        | no: 0, yes: 2                                |
//! | Active 30+ minutes a day   | yes: 0, no: 2                                |

use crate::calculator::CalculatorKind;
use crate::error::CalcResult;
use crate::validate::{self, NamedOutputs};
use serde::{Deserialize, Serialize};

pub const MAX_SCORE: u32 = 17;

/// (lower bound, points), ascending
const AGE_POINTS: [(f64, u32); 5] = [(0.0, 0), (35.0, 1), (45.0, 2), (55.0, 3), (65.0, 4)];
const BMI_POINTS: [(f64, u32); 3] = [(0.0, 0), (25.0, 1), (30.0, 3)];
const WAIST_POINTS: [(f64, u32); 4] = [(0.0, 0), (80.0, 1), (94.0, 2), (102.0, 3)];

const HIGH_BP_POINTS: u32 = 2;
const INACTIVE_POINTS: u32 = 2;

/// Closest relatives diagnosed with diabetes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FamilyHistory {
    #[default]
    None,
    /// Grandparent, aunt, uncle or first cousin
    Extended,
    /// Parent, sibling or child
    Immediate,
}

impl FamilyHistory {
    pub fn points(&self) -> u32 {
        match self {
            FamilyHistory::None => 0,
            FamilyHistory::Extended => 2,
            FamilyHistory::Immediate => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "Low Risk")]
    Low,
    #[serde(rename = "Moderate")]
    Moderate,
    #[serde(rename = "High")]
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl RiskLevel {
    pub fn from_score(score: u32) -> Self {
        match score {
            0..=4 => RiskLevel::Low,
            5..=8 => RiskLevel::Moderate,
            9..=12 => RiskLevel::High,
            _ => RiskLevel::VeryHigh,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiabetesRiskInput {
    pub age: f64,
    pub bmi: f64,
    pub waist_cm: f64,
    #[serde(default)]
    pub family_history: FamilyHistory,
    #[serde(default)]
    pub high_blood_pressure: bool,
    /// Omitted means active, so a missing answer adds no points
    #[serde(default = "default_physically_active")]
    pub physically_active: bool,
}

fn default_physically_active() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiabetesRiskResult {
    pub score: u32,
    pub max_score: u32,
    pub risk_level: RiskLevel,
}

impl NamedOutputs for DiabetesRiskResult {
    fn named_values(&self) -> Vec<(&'static str, f64)> {
        vec![("score", self.score as f64), ("maxScore", self.max_score as f64)]
    }
}

fn band_points(value: f64, bands: &[(f64, u32)]) -> u32 {
    bands
        .iter()
        .rev()
        .find(|(lower, _)| value >= *lower)
        .map(|(_, points)| *points)
        .unwrap_or(0)
}

pub fn assess_diabetes_risk(input: &DiabetesRiskInput) -> CalcResult<DiabetesRiskResult> {
    let age = validate::non_negative("age", input.age)?;
    let bmi = validate::positive("bmi", input.bmi)?;
    let waist = validate::positive("waistCm", input.waist_cm)?;

    let mut score = band_points(age, &AGE_POINTS)
        + band_points(bmi, &BMI_POINTS)
        + band_points(waist, &WAIST_POINTS)
        + input.family_history.points();
    if input.high_blood_pressure {
        score += HIGH_BP_POINTS;
    }
    if !input.physically_active {
        score += INACTIVE_POINTS;
    }

    validate::ensure_finite(
        CalculatorKind::DiabetesRisk,
        DiabetesRiskResult {
            score,
            max_score: MAX_SCORE,
            risk_level: RiskLevel::from_score(score),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn low_risk_person() -> DiabetesRiskInput {
        DiabetesRiskInput {
            age: 28.0,
            bmi: 22.0,
            waist_cm: 75.0,
            family_history: FamilyHistory::None,
            high_blood_pressure: false,
            physically_active: true,
        }
    }

    #[test]
    fn test_omitted_activity_adds_no_points() {
        let omitted: DiabetesRiskInput =
            serde_json::from_value(serde_json::json!({ "age": 50, "bmi": 27, "waistCm": 85 })).unwrap();
        assert!(omitted.physically_active);

        let explicit: DiabetesRiskInput = serde_json::from_value(serde_json::json!({
            "age": 50, "bmi": 27, "waistCm": 85, "physicallyActive": true
        }))
        .unwrap();
        let score = assess_diabetes_risk(&omitted).unwrap().score;
        assert_eq!(score, assess_diabetes_risk(&explicit).unwrap().score);
        // 2 + 1 + 1
        assert_eq!(score, 4);
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(RiskLevel::from_score(0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(4), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(5), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(8), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(9), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(12), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(13), RiskLevel::VeryHigh);
        assert_eq!(RiskLevel::from_score(17), RiskLevel::VeryHigh);
    }

    #[test]
    fn test_lowest_and_highest_scores() {
        let low = assess_diabetes_risk(&low_risk_person()).unwrap();
        assert_eq!(low.score, 0);
        assert_eq!(low.risk_level, RiskLevel::Low);

        let high = assess_diabetes_risk(&DiabetesRiskInput {
            age: 70.0,
            bmi: 34.0,
            waist_cm: 110.0,
            family_history: FamilyHistory::Immediate,
            high_blood_pressure: true,
            physically_active: false,
        })
        .unwrap();
        assert_eq!(high.score, MAX_SCORE);
        assert_eq!(high.risk_level, RiskLevel::VeryHigh);
    }

    #[test]
    fn test_factor_thresholds_are_inclusive() {
        let mut person = low_risk_person();
        person.age = 45.0;
        person.bmi = 25.0;
        person.waist_cm = 94.0;
        // 2 + 1 + 2
        let result = assess_diabetes_risk(&person).unwrap();
        assert_eq!(result.score, 5);
        assert_eq!(result.risk_level, RiskLevel::Moderate);
    }

    #[test]
    fn test_risk_level_serializes_as_label() {
        let json = serde_json::to_string(&RiskLevel::Low).unwrap();
        assert_eq!(json, "\"Low Risk\"");
        let json = serde_json::to_string(&RiskLevel::VeryHigh).unwrap();
        assert_eq!(json, "\"Very High\"");
    }
}
