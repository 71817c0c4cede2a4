//! Loan repayment: EMI and amortization schedules

mod emi;
mod schedule;

pub use emi::{calculate_emi, EmiInput, EmiResult};
pub use schedule::{AmortizationRow, AmortizationSchedule, YearSummary};
