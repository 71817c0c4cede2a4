//! Retirement planning, pension and gratuity calculators

mod planner;
mod nps;
mod gratuity;

pub use planner::{plan_retirement, RetirementInput, RetirementResult};
pub use nps::{calculate_nps, NpsInput, NpsResult};
pub use gratuity::{calculate_gratuity, GratuityInput, GratuityResult};
