//! Compound growth primitives shared by the compounding calculators
//!
//! All rates passed in here are periodic decimals (0.01 for 1% per period)
//! unless the function name says otherwise. Each helper falls back to its
//! linear identity when the periodic rate is zero.

use serde::{Deserialize, Serialize};

/// Below this the periodic rate is treated as zero
pub const ZERO_RATE_EPSILON: f64 = 1e-10;

/// How often interest is credited within a year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompoundingFrequency {
    Annually,
    HalfYearly,
    #[default]
    Quarterly,
    Monthly,
}

impl CompoundingFrequency {
    pub fn periods_per_year(&self) -> u32 {
        match self {
            CompoundingFrequency::Annually => 1,
            CompoundingFrequency::HalfYearly => 2,
            CompoundingFrequency::Quarterly => 4,
            CompoundingFrequency::Monthly => 12,
        }
    }

    pub fn from_periods(periods: u32) -> Option<Self> {
        match periods {
            1 => Some(CompoundingFrequency::Annually),
            2 => Some(CompoundingFrequency::HalfYearly),
            4 => Some(CompoundingFrequency::Quarterly),
            12 => Some(CompoundingFrequency::Monthly),
            _ => None,
        }
    }
}

/// A lump sum left to compound for a number of years
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompoundGrowth {
    pub principal: f64,
    /// Annual rate in percent
    pub annual_rate_pct: f64,
    pub frequency: CompoundingFrequency,
    pub years: f64,
}

impl CompoundGrowth {
    pub fn new(principal: f64, annual_rate_pct: f64, frequency: CompoundingFrequency, years: f64) -> Self {
        Self {
            principal,
            annual_rate_pct,
            frequency,
            years,
        }
    }

    /// A = P(1 + r/n)^(n·t)
    pub fn future_value(&self) -> f64 {
        let n = self.frequency.periods_per_year() as f64;
        let periodic_rate = self.annual_rate_pct / 100.0 / n;
        compound(self.principal, periodic_rate, n * self.years)
    }
}

/// Grow `principal` at `periodic_rate` for `periods` (may be fractional)
pub fn compound(principal: f64, periodic_rate: f64, periods: f64) -> f64 {
    if periodic_rate.abs() < ZERO_RATE_EPSILON {
        return principal;
    }
    principal * (1.0 + periodic_rate).powf(periods)
}

/// Convert an annual percentage into a monthly decimal rate (r/12/100)
pub fn monthly_rate(annual_rate_pct: f64) -> f64 {
    annual_rate_pct / 12.0 / 100.0
}

/// Future value of a level instalment paid at the start of each period
/// (annuity due): P·[((1+i)^n − 1)/i]·(1+i), or P·n at zero rate
pub fn sip_future_value(instalment: f64, periodic_rate: f64, periods: f64) -> f64 {
    instalment * annuity_due_factor(periodic_rate, periods)
}

/// Level instalment needed at the start of each period to reach `target`
pub fn sip_instalment_for(target: f64, periodic_rate: f64, periods: f64) -> f64 {
    target / annuity_due_factor(periodic_rate, periods)
}

fn annuity_due_factor(periodic_rate: f64, periods: f64) -> f64 {
    if periodic_rate.abs() < ZERO_RATE_EPSILON {
        return periods;
    }
    let growth = (1.0 + periodic_rate).powf(periods);
    (growth - 1.0) / periodic_rate * (1.0 + periodic_rate)
}

/// Present value of `amount` paid at the start of each of `periods` periods
pub fn pv_annuity_due(amount: f64, periods: f64, periodic_rate: f64) -> f64 {
    if periodic_rate.abs() < ZERO_RATE_EPSILON {
        return amount * periods;
    }

    let v = 1.0 / (1.0 + periodic_rate);
    amount * (1.0 - v.powf(periods)) / (1.0 - v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_compound_growth_quarterly() {
        let growth = CompoundGrowth::new(100_000.0, 8.0, CompoundingFrequency::Quarterly, 5.0);
        // 100000 * 1.02^20
        assert_relative_eq!(growth.future_value(), 148_594.74, epsilon = 0.01);
    }

    #[test]
    fn test_zero_rate_is_identity() {
        assert_eq!(compound(5_000.0, 0.0, 40.0), 5_000.0);
        assert_eq!(sip_future_value(1_000.0, 0.0, 24.0), 24_000.0);
        assert_eq!(pv_annuity_due(1_000.0, 10.0, 0.0), 10_000.0);
        assert_eq!(sip_instalment_for(24_000.0, 0.0, 24.0), 1_000.0);
    }

    #[test]
    fn test_sip_instalment_inverts_future_value() {
        let i = monthly_rate(12.0);
        let fv = sip_future_value(10_000.0, i, 120.0);
        assert_relative_eq!(sip_instalment_for(fv, i, 120.0), 10_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_pv_annuity_due() {
        // 100 at the start of each month for a year at 0.5%/month
        let pv = pv_annuity_due(100.0, 12.0, 0.005);
        assert_relative_eq!(pv, 1_167.70, epsilon = 0.01);
    }

    #[test]
    fn test_frequency_round_trip() {
        for freq in [
            CompoundingFrequency::Annually,
            CompoundingFrequency::HalfYearly,
            CompoundingFrequency::Quarterly,
            CompoundingFrequency::Monthly,
        ] {
            assert_eq!(CompoundingFrequency::from_periods(freq.periods_per_year()), Some(freq));
        }
        assert_eq!(CompoundingFrequency::from_periods(3), None);
    }
}
