//! Month-by-month amortization of an EMI loan

use super::emi::{calculate_emi, EmiInput, EmiResult, LoanTerms};
use crate::error::CalcResult;
use chrono::{Months, NaiveDate};
use serde::Serialize;
use std::error::Error;
use std::io::Write;

/// Residual balances smaller than this are reported as fully repaid
const PAID_OFF_EPSILON: f64 = 1e-6;

/// A single instalment
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationRow {
    pub month: u32,
    pub payment_date: Option<NaiveDate>,
    pub opening_balance: f64,
    pub emi: f64,
    pub interest: f64,
    pub principal: f64,
    pub closing_balance: f64,
}

/// Totals for one loan year (months 1-12 are year 1)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearSummary {
    pub year: u32,
    pub principal_paid: f64,
    pub interest_paid: f64,
    pub closing_balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationSchedule {
    pub summary: EmiResult,
    pub rows: Vec<AmortizationRow>,
}

impl AmortizationSchedule {
    /// Build the schedule; with `first_payment` each row carries its due date,
    /// one calendar month apart
    pub fn build(input: &EmiInput, first_payment: Option<NaiveDate>) -> CalcResult<Self> {
        let summary = calculate_emi(input)?;
        let terms = LoanTerms::from_input(input)?;

        let mut rows = Vec::with_capacity(terms.months as usize);
        let mut balance = terms.principal;

        for month in 1..=terms.months {
            let interest = balance * terms.monthly_rate;
            let principal = summary.monthly_emi - interest;
            let mut closing_balance = balance - principal;
            if month == terms.months && closing_balance.abs() < PAID_OFF_EPSILON {
                closing_balance = 0.0;
            }

            rows.push(AmortizationRow {
                month,
                payment_date: first_payment.and_then(|d| d.checked_add_months(Months::new(month - 1))),
                opening_balance: balance,
                emi: summary.monthly_emi,
                interest,
                principal,
                closing_balance,
            });

            balance = closing_balance;
        }

        log::debug!("built {}-month amortization schedule", rows.len());
        Ok(Self { summary, rows })
    }

    pub fn total_interest(&self) -> f64 {
        self.rows.iter().map(|r| r.interest).sum()
    }

    pub fn yearly_summary(&self) -> Vec<YearSummary> {
        self.rows
            .chunks(12)
            .enumerate()
            .map(|(idx, chunk)| YearSummary {
                year: idx as u32 + 1,
                principal_paid: chunk.iter().map(|r| r.principal).sum(),
                interest_paid: chunk.iter().map(|r| r.interest).sum(),
                closing_balance: chunk.last().map(|r| r.closing_balance).unwrap_or(0.0),
            })
            .collect()
    }

    /// Write one CSV line per instalment
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), Box<dyn Error>> {
        write_rows(&self.rows, writer)
    }

    /// Write one CSV line per loan year
    pub fn write_yearly_csv<W: Write>(&self, writer: W) -> Result<(), Box<dyn Error>> {
        write_rows(&self.yearly_summary(), writer)
    }
}

fn write_rows<T: Serialize, W: Write>(rows: &[T], writer: W) -> Result<(), Box<dyn Error>> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn loan() -> EmiInput {
        EmiInput {
            principal: 1_000_000.0,
            annual_rate: 10.0,
            months: 60,
        }
    }

    #[test]
    fn test_schedule_pays_off_loan() {
        let schedule = AmortizationSchedule::build(&loan(), None).unwrap();

        assert_eq!(schedule.rows.len(), 60);
        assert_eq!(schedule.rows[0].opening_balance, 1_000_000.0);
        assert_abs_diff_eq!(schedule.rows[0].interest, 8_333.33, epsilon = 0.01);
        assert_eq!(schedule.rows.last().unwrap().closing_balance, 0.0);
        assert_abs_diff_eq!(schedule.total_interest(), schedule.summary.total_interest, epsilon = 1e-4);
    }

    #[test]
    fn test_balances_chain_between_rows() {
        let schedule = AmortizationSchedule::build(&loan(), None).unwrap();
        for pair in schedule.rows.windows(2) {
            assert_eq!(pair[0].closing_balance, pair[1].opening_balance);
        }
    }

    #[test]
    fn test_yearly_summary() {
        let schedule = AmortizationSchedule::build(&loan(), None).unwrap();
        let years = schedule.yearly_summary();

        assert_eq!(years.len(), 5);
        assert_abs_diff_eq!(years[0].interest_paid, 92_696.42, epsilon = 0.01);
        assert_abs_diff_eq!(years[0].closing_balance, 837_731.88, epsilon = 0.01);
        let principal: f64 = years.iter().map(|y| y.principal_paid).sum();
        assert_abs_diff_eq!(principal, 1_000_000.0, epsilon = 1e-4);
    }

    #[test]
    fn test_rejects_tenure_beyond_limit_before_allocating() {
        let err = AmortizationSchedule::build(
            &EmiInput {
                principal: 1_000_000.0,
                annual_rate: 10.0,
                months: u32::MAX,
            },
            None,
        )
        .unwrap_err();
        assert_eq!(err.field(), Some("months"));
    }

    #[test]
    fn test_payment_dates_advance_monthly() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        let schedule = AmortizationSchedule::build(&loan(), Some(start)).unwrap();

        assert_eq!(schedule.rows[0].payment_date, Some(start));
        // clamps to the end of a shorter month
        assert_eq!(schedule.rows[1].payment_date, NaiveDate::from_ymd_opt(2025, 2, 28));
        assert_eq!(schedule.rows[12].payment_date, NaiveDate::from_ymd_opt(2026, 1, 31));
    }

    #[test]
    fn test_write_csv() {
        let schedule = AmortizationSchedule::build(
            &EmiInput {
                principal: 1_200.0,
                annual_rate: 0.0,
                months: 3,
            },
            NaiveDate::from_ymd_opt(2025, 4, 1),
        )
        .unwrap();

        let mut buffer = Vec::new();
        schedule.write_csv(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "month,paymentDate,openingBalance,emi,interest,principal,closingBalance"
        );
        assert!(lines[1].starts_with("1,2025-04-01,1200.0,400.0,0.0,400.0,800.0"));
    }
}
