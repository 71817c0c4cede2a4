//! Savings and investment calculators

mod sip;
mod deposits;
mod ppf;
mod interest;

pub use sip::{calculate_sip, sip_growth_table, SipGrowthRow, SipInput, SipResult};
pub use deposits::{calculate_fd, calculate_rd, FdInput, FdResult, RdInput, RdResult};
pub use ppf::{calculate_ppf, PpfInput, PpfResult};
pub use interest::{
    calculate_compound_interest, calculate_simple_interest, CompoundInterestInput, InterestResult,
    SimpleInterestInput,
};
