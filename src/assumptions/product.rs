//! Scheme and product constants the calculators depend on
//!
//! Each group has a `Default` matching the published scheme rules, and can
//! be overridden from `parameters.csv` through `from_loaded`.

use super::loader::LoadedAssumptions;
use crate::growth::CompoundingFrequency;

/// Bank deposit features
#[derive(Debug, Clone, PartialEq)]
pub struct DepositFeatures {
    /// Compounding used by FD when the request does not name one
    pub fd_compounding: CompoundingFrequency,
}

impl Default for DepositFeatures {
    fn default() -> Self {
        Self {
            fd_compounding: CompoundingFrequency::Quarterly,
        }
    }
}

/// Retirement and pension scheme features
#[derive(Debug, Clone, PartialEq)]
pub struct RetirementFeatures {
    /// Age to which the retirement corpus must last
    pub life_expectancy: f64,

    /// NPS contributions stop and the corpus is split at this age
    pub nps_exit_age: f64,

    /// Share of the NPS corpus that may be withdrawn as a lump sum
    pub nps_lumpsum_share: f64,

    /// Annual annuity rate (percent) paid on the NPS annuity corpus
    pub nps_annuity_rate_pct: f64,
}

impl Default for RetirementFeatures {
    fn default() -> Self {
        Self {
            life_expectancy: 85.0,
            nps_exit_age: 60.0,
            nps_lumpsum_share: 0.60,
            nps_annuity_rate_pct: 6.0,
        }
    }
}

/// Constants used by the health calculators
#[derive(Debug, Clone, PartialEq)]
pub struct HealthFeatures {
    /// Daily kcal removed/added for the loss and gain targets
    pub calorie_adjustment: f64,

    /// Average walking stride in metres
    pub stride_length_m: f64,

    /// Healthy BMI band used for the ideal weight range
    pub healthy_bmi_min: f64,
    pub healthy_bmi_max: f64,
}

impl Default for HealthFeatures {
    fn default() -> Self {
        Self {
            calorie_adjustment: 500.0,
            stride_length_m: 0.75,
            healthy_bmi_min: 18.5,
            healthy_bmi_max: 24.9,
        }
    }
}

/// Combined product features
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFeatures {
    pub deposits: DepositFeatures,
    pub retirement: RetirementFeatures,
    pub health: HealthFeatures,
}

impl ProductFeatures {
    /// Defaults with any values present in `parameters.csv` applied on top
    pub fn from_loaded(loaded: &LoadedAssumptions) -> Result<Self, String> {
        let mut features = Self::default();
        let params = &loaded.parameters;

        if let Some(&periods) = params.get("fd_compounding_periods") {
            // whole periods only; no truncation
            features.deposits.fd_compounding = Some(periods)
                .filter(|p| p.fract() == 0.0 && *p >= 1.0 && *p <= 12.0)
                .and_then(|p| CompoundingFrequency::from_periods(p as u32))
                .ok_or_else(|| format!("unsupported fd_compounding_periods: {}", periods))?;
        }

        let retirement = &mut features.retirement;
        override_value(params, "life_expectancy", &mut retirement.life_expectancy);
        override_value(params, "nps_exit_age", &mut retirement.nps_exit_age);
        override_value(params, "nps_lumpsum_share", &mut retirement.nps_lumpsum_share);
        override_value(params, "nps_annuity_rate_pct", &mut retirement.nps_annuity_rate_pct);

        let health = &mut features.health;
        override_value(params, "calorie_adjustment", &mut health.calorie_adjustment);
        override_value(params, "stride_length_m", &mut health.stride_length_m);
        override_value(params, "healthy_bmi_min", &mut health.healthy_bmi_min);
        override_value(params, "healthy_bmi_max", &mut health.healthy_bmi_max);

        if !(0.0..=1.0).contains(&features.retirement.nps_lumpsum_share) {
            return Err(format!(
                "nps_lumpsum_share must be between 0 and 1, got {}",
                features.retirement.nps_lumpsum_share
            ));
        }

        Ok(features)
    }
}

pub(crate) fn override_value(
    params: &std::collections::HashMap<String, f64>,
    name: &str,
    target: &mut f64,
) {
    if let Some(&value) = params.get(name) {
        log::debug!("assumption override {} = {}", name, value);
        *target = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn loaded_with(params: &[(&str, f64)]) -> LoadedAssumptions {
        LoadedAssumptions {
            tax_slabs: Vec::new(),
            parameters: params
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect::<HashMap<_, _>>(),
        }
    }

    #[test]
    fn test_defaults() {
        let features = ProductFeatures::default();
        assert_eq!(features.deposits.fd_compounding.periods_per_year(), 4);
        assert_eq!(features.retirement.nps_exit_age, 60.0);
        assert_eq!(features.health.stride_length_m, 0.75);
    }

    #[test]
    fn test_overrides_from_parameters() {
        let loaded = loaded_with(&[("fd_compounding_periods", 12.0), ("nps_annuity_rate_pct", 5.5)]);
        let features = ProductFeatures::from_loaded(&loaded).unwrap();

        assert_eq!(features.deposits.fd_compounding, CompoundingFrequency::Monthly);
        assert_eq!(features.retirement.nps_annuity_rate_pct, 5.5);
        // untouched values keep their defaults
        assert_eq!(features.retirement.life_expectancy, 85.0);
    }

    #[test]
    fn test_rejects_bad_overrides() {
        assert!(ProductFeatures::from_loaded(&loaded_with(&[("fd_compounding_periods", 3.0)])).is_err());
        assert!(ProductFeatures::from_loaded(&loaded_with(&[("fd_compounding_periods", 4.7)])).is_err());
        assert!(ProductFeatures::from_loaded(&loaded_with(&[("fd_compounding_periods", -4.0)])).is_err());
        assert!(ProductFeatures::from_loaded(&loaded_with(&[("nps_lumpsum_share", 1.5)])).is_err());
    }
}
