//! Anthropometric calculators: BMI, BMR, daily calories and ideal weight

use crate::assumptions::HealthFeatures;
use crate::calculator::CalculatorKind;
use crate::error::CalcResult;
use crate::validate::{self, NamedOutputs};
use serde::{Deserialize, Serialize};

const CM_PER_INCH: f64 = 2.54;
const FIVE_FEET_IN_INCHES: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// WHO adult BMI categories; each lower bound belongs to its own category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BmiInput {
    pub weight_kg: f64,
    pub height_cm: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BmiResult {
    pub bmi: f64,
    pub category: BmiCategory,
}

impl NamedOutputs for BmiResult {
    fn named_values(&self) -> Vec<(&'static str, f64)> {
        vec![("bmi", self.bmi)]
    }
}

pub fn calculate_bmi(input: &BmiInput) -> CalcResult<BmiResult> {
    let weight = validate::positive("weightKg", input.weight_kg)?;
    let height_m = validate::positive("heightCm", input.height_cm)? / 100.0;

    let bmi = weight / (height_m * height_m);

    validate::ensure_finite(
        CalculatorKind::Bmi,
        BmiResult {
            bmi,
            category: BmiCategory::from_bmi(bmi),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BmrInput {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age: f64,
    pub gender: Gender,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BmrResult {
    pub bmr: f64,
}

impl NamedOutputs for BmrResult {
    fn named_values(&self) -> Vec<(&'static str, f64)> {
        vec![("bmr", self.bmr)]
    }
}

/// Mifflin-St Jeor: 10w + 6.25h − 5a + 5 (male) or − 161 (female)
pub fn calculate_bmr(input: &BmrInput) -> CalcResult<BmrResult> {
    let weight = validate::positive("weightKg", input.weight_kg)?;
    let height = validate::positive("heightCm", input.height_cm)?;
    let age = validate::non_negative("age", input.age)?;

    let offset = match input.gender {
        Gender::Male => 5.0,
        Gender::Female => -161.0,
    };

    validate::ensure_finite(
        CalculatorKind::Bmr,
        BmrResult {
            bmr: 10.0 * weight + 6.25 * height - 5.0 * age + offset,
        },
    )
}

/// Daily activity, mapped to the Harris-Benedict style TDEE multipliers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    #[default]
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalorieInput {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age: f64,
    pub gender: Gender,
    #[serde(default)]
    pub activity: ActivityLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalorieResult {
    pub bmr: f64,
    pub maintenance: f64,
    pub weight_loss: f64,
    pub weight_gain: f64,
}

impl NamedOutputs for CalorieResult {
    fn named_values(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("bmr", self.bmr),
            ("maintenance", self.maintenance),
            ("weightLoss", self.weight_loss),
            ("weightGain", self.weight_gain),
        ]
    }
}

/// TDEE = BMR × activity multiplier, with a fixed daily deficit/surplus
pub fn calculate_calories(input: &CalorieInput, features: &HealthFeatures) -> CalcResult<CalorieResult> {
    let BmrResult { bmr } = calculate_bmr(&BmrInput {
        weight_kg: input.weight_kg,
        height_cm: input.height_cm,
        age: input.age,
        gender: input.gender,
    })?;

    let maintenance = bmr * input.activity.multiplier();

    validate::ensure_finite(
        CalculatorKind::Calorie,
        CalorieResult {
            bmr,
            maintenance,
            weight_loss: maintenance - features.calorie_adjustment,
            weight_gain: maintenance + features.calorie_adjustment,
        },
    )
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdealWeightInput {
    pub height_cm: f64,
    pub gender: Gender,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdealWeightResult {
    pub robinson_weight: f64,
    pub miller_weight: f64,
    pub min_weight: f64,
    pub max_weight: f64,
}

impl NamedOutputs for IdealWeightResult {
    fn named_values(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("robinsonWeight", self.robinson_weight),
            ("millerWeight", self.miller_weight),
            ("minWeight", self.min_weight),
            ("maxWeight", self.max_weight),
        ]
    }
}

/// Robinson and Miller formulas on inches over five feet (floored at zero),
/// plus the weight range that keeps BMI inside the healthy band
pub fn calculate_ideal_weight(input: &IdealWeightInput, features: &HealthFeatures) -> CalcResult<IdealWeightResult> {
    let height_cm = validate::positive("heightCm", input.height_cm)?;

    let inches_over = (height_cm / CM_PER_INCH - FIVE_FEET_IN_INCHES).max(0.0);
    let (robinson_weight, miller_weight) = match input.gender {
        Gender::Male => (52.0 + 1.9 * inches_over, 56.2 + 1.41 * inches_over),
        Gender::Female => (49.0 + 1.7 * inches_over, 53.1 + 1.36 * inches_over),
    };

    let height_m = height_cm / 100.0;
    let height_sq = height_m * height_m;

    validate::ensure_finite(
        CalculatorKind::IdealWeight,
        IdealWeightResult {
            robinson_weight,
            miller_weight,
            min_weight: features.healthy_bmi_min * height_sq,
            max_weight: features.healthy_bmi_max * height_sq,
        },
    )
}
