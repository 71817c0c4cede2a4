//! Calculator Engine - Pure financial, loan and health formulas
//!
//! This library provides:
//! - Investment calculators (SIP, FD, RD, PPF, compound and simple interest)
//! - Loan EMI with month-by-month amortization schedules
//! - Retirement planning, NPS and gratuity
//! - Income tax under the old and new regimes
//! - Health calculators (BMI, BMR, calories, ideal weight, child height, diabetes risk, walking)
//! - A tagged request/response engine and a parallel batch runner

pub mod error;
pub mod validate;
pub mod growth;
pub mod assumptions;
pub mod investment;
pub mod loan;
pub mod retirement;
pub mod tax;
pub mod health;
pub mod calculator;
pub mod batch;

// Re-export commonly used types
pub use error::{CalcError, CalcResult};
pub use assumptions::Assumptions;
pub use calculator::{CalculatorEngine, CalculatorKind, CalculatorRequest, CalculatorResponse};
pub use batch::{BatchOutcome, BatchRunner};
pub use loan::AmortizationSchedule;
