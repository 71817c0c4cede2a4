//! Calculator dispatch
//!
//! A request names its calculator in the `calculator` field and carries that
//! calculator's inputs alongside it:
//!
//! ```json
//! { "calculator": "emi", "principal": 1000000, "annualRate": 10, "months": 60 }
//! ```
//!
//! The engine holds one set of assumptions and routes each request to the
//! matching pure function.

use crate::assumptions::Assumptions;
use crate::error::{CalcError, CalcResult};
use crate::health::{
    assess_diabetes_risk, calculate_bmi, calculate_bmr, calculate_calories, calculate_ideal_weight,
    calculate_walking_calories, predict_child_height, BmiInput, BmiResult, BmrInput, BmrResult,
    CalorieInput, CalorieResult, ChildHeightInput, ChildHeightResult, DiabetesRiskInput,
    DiabetesRiskResult, IdealWeightInput, IdealWeightResult, WalkingInput, WalkingResult,
};
use crate::investment::{
    calculate_compound_interest, calculate_fd, calculate_ppf, calculate_rd, calculate_simple_interest,
    calculate_sip, CompoundInterestInput, FdInput, FdResult, InterestResult, PpfInput, PpfResult,
    RdInput, RdResult, SimpleInterestInput, SipInput, SipResult,
};
use crate::loan::{calculate_emi, EmiInput, EmiResult};
use crate::retirement::{
    calculate_gratuity, calculate_nps, plan_retirement, GratuityInput, GratuityResult, NpsInput,
    NpsResult, RetirementInput, RetirementResult,
};
use crate::tax::{calculate_income_tax, IncomeTaxInput, IncomeTaxResult};
use crate::validate::NamedOutputs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every calculator the engine knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculatorKind {
    Sip,
    Fd,
    Ppf,
    Rd,
    Emi,
    CompoundInterest,
    SimpleInterest,
    IncomeTax,
    Gratuity,
    Retirement,
    Nps,
    Bmi,
    Bmr,
    Calorie,
    IdealWeight,
    ChildHeight,
    DiabetesRisk,
    WalkingCalorie,
}

/// Loan products that share the EMI formula
const LOAN_ALIASES: [&str; 4] = ["home_loan", "car_loan", "personal_loan", "education_loan"];

impl CalculatorKind {
    pub const ALL: [CalculatorKind; 18] = [
        CalculatorKind::Sip,
        CalculatorKind::Fd,
        CalculatorKind::Ppf,
        CalculatorKind::Rd,
        CalculatorKind::Emi,
        CalculatorKind::CompoundInterest,
        CalculatorKind::SimpleInterest,
        CalculatorKind::IncomeTax,
        CalculatorKind::Gratuity,
        CalculatorKind::Retirement,
        CalculatorKind::Nps,
        CalculatorKind::Bmi,
        CalculatorKind::Bmr,
        CalculatorKind::Calorie,
        CalculatorKind::IdealWeight,
        CalculatorKind::ChildHeight,
        CalculatorKind::DiabetesRisk,
        CalculatorKind::WalkingCalorie,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CalculatorKind::Sip => "sip",
            CalculatorKind::Fd => "fd",
            CalculatorKind::Ppf => "ppf",
            CalculatorKind::Rd => "rd",
            CalculatorKind::Emi => "emi",
            CalculatorKind::CompoundInterest => "compound_interest",
            CalculatorKind::SimpleInterest => "simple_interest",
            CalculatorKind::IncomeTax => "income_tax",
            CalculatorKind::Gratuity => "gratuity",
            CalculatorKind::Retirement => "retirement",
            CalculatorKind::Nps => "nps",
            CalculatorKind::Bmi => "bmi",
            CalculatorKind::Bmr => "bmr",
            CalculatorKind::Calorie => "calorie",
            CalculatorKind::IdealWeight => "ideal_weight",
            CalculatorKind::ChildHeight => "child_height",
            CalculatorKind::DiabetesRisk => "diabetes_risk",
            CalculatorKind::WalkingCalorie => "walking_calorie",
        }
    }

    /// Request field names, optional ones suffixed with `?`
    pub fn input_fields(&self) -> &'static [&'static str] {
        match self {
            CalculatorKind::Sip => &["monthlyInvestment", "annualRate", "years"],
            CalculatorKind::Fd => &["principal", "annualRate", "years", "compounding?"],
            CalculatorKind::Ppf => &["yearlyInvestment", "annualRate", "years"],
            CalculatorKind::Rd => &["monthlyDeposit", "annualRate", "years"],
            CalculatorKind::Emi => &["principal", "annualRate", "months"],
            CalculatorKind::CompoundInterest => &["principal", "annualRate", "years", "compounding?"],
            CalculatorKind::SimpleInterest => &["principal", "annualRate", "years"],
            CalculatorKind::IncomeTax => &["annualIncome", "deductions?"],
            CalculatorKind::Gratuity => &["lastSalary", "yearsOfService"],
            CalculatorKind::Retirement => &[
                "currentAge",
                "retirementAge",
                "monthlyExpenses",
                "inflationRate",
                "returnRate",
                "lifeExpectancy?",
            ],
            CalculatorKind::Nps => &["currentAge", "monthlyContribution", "returnRate"],
            CalculatorKind::Bmi => &["weightKg", "heightCm"],
            CalculatorKind::Bmr => &["weightKg", "heightCm", "age", "gender"],
            CalculatorKind::Calorie => &["weightKg", "heightCm", "age", "gender", "activity?"],
            CalculatorKind::IdealWeight => &["heightCm", "gender"],
            CalculatorKind::ChildHeight => &["fatherHeightCm", "motherHeightCm", "gender"],
            CalculatorKind::DiabetesRisk => &[
                "age",
                "bmi",
                "waistCm",
                "familyHistory?",
                "highBloodPressure?",
                "physicallyActive? (default true)",
            ],
            CalculatorKind::WalkingCalorie => &["weightKg", "distanceKm", "speedKmh"],
        }
    }

    /// Other identifiers accepted for this calculator
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            CalculatorKind::Emi => &LOAN_ALIASES,
            _ => &[],
        }
    }
}

impl fmt::Display for CalculatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalculatorKind {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        CalculatorKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == normalized || kind.aliases().contains(&normalized.as_str()))
            .ok_or_else(|| CalcError::UnknownCalculator(s.to_string()))
    }
}

/// A calculation to perform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "calculator", rename_all = "snake_case")]
pub enum CalculatorRequest {
    Sip(SipInput),
    Fd(FdInput),
    Ppf(PpfInput),
    Rd(RdInput),
    #[serde(
        alias = "home_loan",
        alias = "car_loan",
        alias = "personal_loan",
        alias = "education_loan"
    )]
    Emi(EmiInput),
    CompoundInterest(CompoundInterestInput),
    SimpleInterest(SimpleInterestInput),
    IncomeTax(IncomeTaxInput),
    Gratuity(GratuityInput),
    Retirement(RetirementInput),
    Nps(NpsInput),
    Bmi(BmiInput),
    Bmr(BmrInput),
    Calorie(CalorieInput),
    IdealWeight(IdealWeightInput),
    ChildHeight(ChildHeightInput),
    DiabetesRisk(DiabetesRiskInput),
    WalkingCalorie(WalkingInput),
}

impl CalculatorRequest {
    pub fn kind(&self) -> CalculatorKind {
        match self {
            CalculatorRequest::Sip(_) => CalculatorKind::Sip,
            CalculatorRequest::Fd(_) => CalculatorKind::Fd,
            CalculatorRequest::Ppf(_) => CalculatorKind::Ppf,
            CalculatorRequest::Rd(_) => CalculatorKind::Rd,
            CalculatorRequest::Emi(_) => CalculatorKind::Emi,
            CalculatorRequest::CompoundInterest(_) => CalculatorKind::CompoundInterest,
            CalculatorRequest::SimpleInterest(_) => CalculatorKind::SimpleInterest,
            CalculatorRequest::IncomeTax(_) => CalculatorKind::IncomeTax,
            CalculatorRequest::Gratuity(_) => CalculatorKind::Gratuity,
            CalculatorRequest::Retirement(_) => CalculatorKind::Retirement,
            CalculatorRequest::Nps(_) => CalculatorKind::Nps,
            CalculatorRequest::Bmi(_) => CalculatorKind::Bmi,
            CalculatorRequest::Bmr(_) => CalculatorKind::Bmr,
            CalculatorRequest::Calorie(_) => CalculatorKind::Calorie,
            CalculatorRequest::IdealWeight(_) => CalculatorKind::IdealWeight,
            CalculatorRequest::ChildHeight(_) => CalculatorKind::ChildHeight,
            CalculatorRequest::DiabetesRisk(_) => CalculatorKind::DiabetesRisk,
            CalculatorRequest::WalkingCalorie(_) => CalculatorKind::WalkingCalorie,
        }
    }
}

/// Result of a calculation, tagged the same way as the request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "calculator", rename_all = "snake_case")]
pub enum CalculatorResponse {
    Sip(SipResult),
    Fd(FdResult),
    Ppf(PpfResult),
    Rd(RdResult),
    Emi(EmiResult),
    CompoundInterest(InterestResult),
    SimpleInterest(InterestResult),
    IncomeTax(IncomeTaxResult),
    Gratuity(GratuityResult),
    Retirement(RetirementResult),
    Nps(NpsResult),
    Bmi(BmiResult),
    Bmr(BmrResult),
    Calorie(CalorieResult),
    IdealWeight(IdealWeightResult),
    ChildHeight(ChildHeightResult),
    DiabetesRisk(DiabetesRiskResult),
    WalkingCalorie(WalkingResult),
}

impl CalculatorResponse {
    pub fn kind(&self) -> CalculatorKind {
        match self {
            CalculatorResponse::Sip(_) => CalculatorKind::Sip,
            CalculatorResponse::Fd(_) => CalculatorKind::Fd,
            CalculatorResponse::Ppf(_) => CalculatorKind::Ppf,
            CalculatorResponse::Rd(_) => CalculatorKind::Rd,
            CalculatorResponse::Emi(_) => CalculatorKind::Emi,
            CalculatorResponse::CompoundInterest(_) => CalculatorKind::CompoundInterest,
            CalculatorResponse::SimpleInterest(_) => CalculatorKind::SimpleInterest,
            CalculatorResponse::IncomeTax(_) => CalculatorKind::IncomeTax,
            CalculatorResponse::Gratuity(_) => CalculatorKind::Gratuity,
            CalculatorResponse::Retirement(_) => CalculatorKind::Retirement,
            CalculatorResponse::Nps(_) => CalculatorKind::Nps,
            CalculatorResponse::Bmi(_) => CalculatorKind::Bmi,
            CalculatorResponse::Bmr(_) => CalculatorKind::Bmr,
            CalculatorResponse::Calorie(_) => CalculatorKind::Calorie,
            CalculatorResponse::IdealWeight(_) => CalculatorKind::IdealWeight,
            CalculatorResponse::ChildHeight(_) => CalculatorKind::ChildHeight,
            CalculatorResponse::DiabetesRisk(_) => CalculatorKind::DiabetesRisk,
            CalculatorResponse::WalkingCalorie(_) => CalculatorKind::WalkingCalorie,
        }
    }
}

impl NamedOutputs for CalculatorResponse {
    fn named_values(&self) -> Vec<(&'static str, f64)> {
        match self {
            CalculatorResponse::Sip(r) => r.named_values(),
            CalculatorResponse::Fd(r) => r.named_values(),
            CalculatorResponse::Ppf(r) => r.named_values(),
            CalculatorResponse::Rd(r) => r.named_values(),
            CalculatorResponse::Emi(r) => r.named_values(),
            CalculatorResponse::CompoundInterest(r) | CalculatorResponse::SimpleInterest(r) => r.named_values(),
            CalculatorResponse::IncomeTax(r) => r.named_values(),
            CalculatorResponse::Gratuity(r) => r.named_values(),
            CalculatorResponse::Retirement(r) => r.named_values(),
            CalculatorResponse::Nps(r) => r.named_values(),
            CalculatorResponse::Bmi(r) => r.named_values(),
            CalculatorResponse::Bmr(r) => r.named_values(),
            CalculatorResponse::Calorie(r) => r.named_values(),
            CalculatorResponse::IdealWeight(r) => r.named_values(),
            CalculatorResponse::ChildHeight(r) => r.named_values(),
            CalculatorResponse::DiabetesRisk(r) => r.named_values(),
            CalculatorResponse::WalkingCalorie(r) => r.named_values(),
        }
    }
}

/// Evaluates requests against one set of assumptions
#[derive(Debug, Clone, Default)]
pub struct CalculatorEngine {
    assumptions: Assumptions,
}

impl CalculatorEngine {
    pub fn new(assumptions: Assumptions) -> Self {
        Self { assumptions }
    }

    /// Engine backed by the CSV tables in `data/assumptions`
    pub fn from_csv() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self::new(Assumptions::from_csv()?))
    }

    pub fn from_csv_path(path: &std::path::Path) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self::new(Assumptions::from_csv_path(path)?))
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    pub fn compute(&self, request: &CalculatorRequest) -> CalcResult<CalculatorResponse> {
        log::debug!("computing {}", request.kind());

        let product = &self.assumptions.product;
        let response = match request {
            CalculatorRequest::Sip(input) => CalculatorResponse::Sip(calculate_sip(input)?),
            CalculatorRequest::Fd(input) => CalculatorResponse::Fd(calculate_fd(input, &product.deposits)?),
            CalculatorRequest::Ppf(input) => CalculatorResponse::Ppf(calculate_ppf(input)?),
            CalculatorRequest::Rd(input) => CalculatorResponse::Rd(calculate_rd(input)?),
            CalculatorRequest::Emi(input) => CalculatorResponse::Emi(calculate_emi(input)?),
            CalculatorRequest::CompoundInterest(input) => {
                CalculatorResponse::CompoundInterest(calculate_compound_interest(input)?)
            }
            CalculatorRequest::SimpleInterest(input) => {
                CalculatorResponse::SimpleInterest(calculate_simple_interest(input)?)
            }
            CalculatorRequest::IncomeTax(input) => {
                CalculatorResponse::IncomeTax(calculate_income_tax(input, &self.assumptions.tax)?)
            }
            CalculatorRequest::Gratuity(input) => CalculatorResponse::Gratuity(calculate_gratuity(input)?),
            CalculatorRequest::Retirement(input) => {
                CalculatorResponse::Retirement(plan_retirement(input, &product.retirement)?)
            }
            CalculatorRequest::Nps(input) => CalculatorResponse::Nps(calculate_nps(input, &product.retirement)?),
            CalculatorRequest::Bmi(input) => CalculatorResponse::Bmi(calculate_bmi(input)?),
            CalculatorRequest::Bmr(input) => CalculatorResponse::Bmr(calculate_bmr(input)?),
            CalculatorRequest::Calorie(input) => {
                CalculatorResponse::Calorie(calculate_calories(input, &product.health)?)
            }
            CalculatorRequest::IdealWeight(input) => {
                CalculatorResponse::IdealWeight(calculate_ideal_weight(input, &product.health)?)
            }
            CalculatorRequest::ChildHeight(input) => CalculatorResponse::ChildHeight(predict_child_height(input)?),
            CalculatorRequest::DiabetesRisk(input) => {
                CalculatorResponse::DiabetesRisk(assess_diabetes_risk(input)?)
            }
            CalculatorRequest::WalkingCalorie(input) => {
                CalculatorResponse::WalkingCalorie(calculate_walking_calories(input, &product.health)?)
            }
        };

        Ok(response)
    }

    /// Decode a tagged JSON request, then compute it
    pub fn compute_json(&self, value: serde_json::Value) -> CalcResult<CalculatorResponse> {
        let request: CalculatorRequest = serde_json::from_value(value)?;
        self.compute(&request)
    }
}
