//! Calories burned walking, from a speed-bracketed MET value

use crate::assumptions::HealthFeatures;
use crate::calculator::CalculatorKind;
use crate::error::CalcResult;
use crate::validate::{self, NamedOutputs};
use serde::{Deserialize, Serialize};

/// (minimum speed km/h, MET), ascending
const MET_BY_SPEED: [(f64, f64); 5] = [(0.0, 2.0), (3.2, 3.0), (4.8, 3.5), (5.6, 4.3), (6.4, 5.0)];

pub fn met_for_speed(speed_kmh: f64) -> f64 {
    MET_BY_SPEED
        .iter()
        .rev()
        .find(|(min_speed, _)| speed_kmh >= *min_speed)
        .map(|(_, met)| *met)
        .unwrap_or(MET_BY_SPEED[0].1)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkingInput {
    pub weight_kg: f64,
    pub distance_km: f64,
    pub speed_kmh: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalkingResult {
    pub calories: f64,
    pub duration_minutes: f64,
    pub steps: f64,
    pub met: f64,
}

impl NamedOutputs for WalkingResult {
    fn named_values(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("calories", self.calories),
            ("durationMinutes", self.duration_minutes),
            ("steps", self.steps),
            ("met", self.met),
        ]
    }
}

/// calories = MET × weight × hours, hours = distance / speed
pub fn calculate_walking_calories(input: &WalkingInput, features: &HealthFeatures) -> CalcResult<WalkingResult> {
    let weight = validate::positive("weightKg", input.weight_kg)?;
    let distance = validate::non_negative("distanceKm", input.distance_km)?;
    let speed = validate::positive("speedKmh", input.speed_kmh)?;

    let met = met_for_speed(speed);
    let hours = distance / speed;

    validate::ensure_finite(
        CalculatorKind::WalkingCalorie,
        WalkingResult {
            calories: met * weight * hours,
            duration_minutes: hours * 60.0,
            steps: distance * 1000.0 / features.stride_length_m,
            met,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_met_brackets() {
        assert_eq!(met_for_speed(2.5), 2.0);
        assert_eq!(met_for_speed(3.2), 3.0);
        assert_eq!(met_for_speed(4.5), 3.0);
        assert_eq!(met_for_speed(5.0), 3.5);
        assert_eq!(met_for_speed(6.0), 4.3);
        assert_eq!(met_for_speed(7.5), 5.0);
    }

    #[test]
    fn test_five_km_walk() {
        let result = calculate_walking_calories(
            &WalkingInput {
                weight_kg: 70.0,
                distance_km: 5.0,
                speed_kmh: 4.5,
            },
            &HealthFeatures::default(),
        )
        .unwrap();

        assert_eq!(result.met, 3.0);
        assert_abs_diff_eq!(result.duration_minutes, 66.667, epsilon = 0.001);
        assert_abs_diff_eq!(result.calories, 233.333, epsilon = 0.001);
        assert_abs_diff_eq!(result.steps, 6_666.667, epsilon = 0.001);
    }

    #[test]
    fn test_rejects_zero_speed() {
        let err = calculate_walking_calories(
            &WalkingInput {
                weight_kg: 70.0,
                distance_km: 5.0,
                speed_kmh: 0.0,
            },
            &HealthFeatures::default(),
        )
        .unwrap_err();
        assert_eq!(err.field(), Some("speedKmh"));
    }
}
