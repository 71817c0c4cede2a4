//! Domain checks applied at the boundary of every calculator
//!
//! Inputs are rejected before any arithmetic runs, and outputs are checked for
//! NaN/infinity before they leave the engine.

use crate::calculator::CalculatorKind;
use crate::error::{CalcError, CalcResult};

/// Rates at or below this (in percent) make compounding meaningless
const MIN_RATE_PCT: f64 = -100.0;

/// Longest tenure any period-by-period calculator will iterate over
pub const MAX_TENURE_YEARS: u32 = 100;
pub const MAX_TENURE_MONTHS: u32 = MAX_TENURE_YEARS * 12;

/// Tolerance when checking that a tenure in years is a whole number of months
const WHOLE_MONTH_TOLERANCE: f64 = 1e-9;

pub fn finite(field: &'static str, value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::invalid(field, format!("must be a finite number, got {}", value)))
    }
}

pub fn non_negative(field: &'static str, value: f64) -> CalcResult<f64> {
    finite(field, value)?;
    if value < 0.0 {
        return Err(CalcError::invalid(field, format!("must not be negative, got {}", value)));
    }
    Ok(value)
}

pub fn positive(field: &'static str, value: f64) -> CalcResult<f64> {
    finite(field, value)?;
    if value <= 0.0 {
        return Err(CalcError::invalid(field, format!("must be greater than zero, got {}", value)));
    }
    Ok(value)
}

/// Annual rate in percent; anything at or below -100% is rejected
pub fn rate(field: &'static str, value: f64) -> CalcResult<f64> {
    finite(field, value)?;
    if value <= MIN_RATE_PCT {
        return Err(CalcError::invalid(
            field,
            format!("must be greater than {}%, got {}", MIN_RATE_PCT, value),
        ));
    }
    Ok(value)
}

/// Tenure in years, at most `MAX_TENURE_YEARS`, covering whole months;
/// returns the month count
pub fn whole_months(field: &'static str, years: f64) -> CalcResult<u32> {
    let years = positive(field, years)?;
    if years > MAX_TENURE_YEARS as f64 {
        return Err(CalcError::invalid(
            field,
            format!("must be at most {} years, got {}", MAX_TENURE_YEARS, years),
        ));
    }

    let exact_months = 12.0 * years;
    let months = exact_months.round();
    if (exact_months - months).abs() > WHOLE_MONTH_TOLERANCE {
        return Err(CalcError::invalid(
            field,
            format!("must cover a whole number of months, got {} years", years),
        ));
    }

    u32::try_from(months as i64)
        .ok()
        .filter(|&m| m >= 1)
        .ok_or_else(|| CalcError::invalid(field, format!("must cover at least one month, got {} years", years)))
}

/// Count of periods between 1 and `max`
pub fn tenure(field: &'static str, periods: u32, max: u32) -> CalcResult<u32> {
    if periods == 0 {
        return Err(CalcError::invalid(field, "must be at least 1"));
    }
    if periods > max {
        return Err(CalcError::invalid(field, format!("must be at most {}, got {}", max, periods)));
    }
    Ok(periods)
}

/// Numeric outputs of a calculator result, by their wire names
pub trait NamedOutputs {
    fn named_values(&self) -> Vec<(&'static str, f64)>;
}

/// Fail with `DegenerateResult` on the first non-finite output
pub fn ensure_finite<T: NamedOutputs>(calculator: CalculatorKind, result: T) -> CalcResult<T> {
    if let Some((output, value)) = result
        .named_values()
        .into_iter()
        .find(|(_, v)| !v.is_finite())
    {
        log::warn!("{} produced non-finite {} = {}", calculator, output, value);
        return Err(CalcError::DegenerateResult {
            calculator,
            output,
            value,
        });
    }
    Ok(result)
}
