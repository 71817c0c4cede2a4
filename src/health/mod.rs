//! Health and fitness calculators

mod body;
mod child_height;
mod diabetes;
mod walking;

pub use body::{
    calculate_bmi, calculate_bmr, calculate_calories, calculate_ideal_weight, ActivityLevel,
    BmiCategory, BmiInput, BmiResult, BmrInput, BmrResult, CalorieInput, CalorieResult, Gender,
    IdealWeightInput, IdealWeightResult,
};
pub use child_height::{predict_child_height, ChildHeightInput, ChildHeightResult};
pub use diabetes::{assess_diabetes_risk, DiabetesRiskInput, DiabetesRiskResult, FamilyHistory, RiskLevel};
pub use walking::{calculate_walking_calories, met_for_speed, WalkingInput, WalkingResult};
