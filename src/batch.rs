//! Batch runner for evaluating many requests at once
//!
//! Loads assumptions once, then evaluates independent requests in parallel
//! against a shared engine. One bad request never aborts the batch.

use crate::calculator::{CalculatorEngine, CalculatorRequest, CalculatorResponse};
use crate::error::CalcResult;
use crate::Assumptions;
use rayon::prelude::*;
use serde::Serialize;

/// Outcome of one batch entry, serialised as `{"ok": ...}` or `{"error": ...}`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchOutcome {
    Ok(CalculatorResponse),
    Error(String),
}

impl BatchOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, BatchOutcome::Ok(_))
    }
}

impl From<CalcResult<CalculatorResponse>> for BatchOutcome {
    fn from(result: CalcResult<CalculatorResponse>) -> Self {
        match result {
            Ok(response) => BatchOutcome::Ok(response),
            Err(e) => BatchOutcome::Error(e.to_string()),
        }
    }
}

/// Pre-loaded batch runner
///
/// # Example
/// ```ignore
/// let runner = BatchRunner::from_csv()?;
/// let outcomes = runner.run_json(&requests);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BatchRunner {
    engine: CalculatorEngine,
}

impl BatchRunner {
    /// Create runner with default in-memory assumptions
    pub fn new() -> Self {
        Self::default()
    }

    /// Create runner by loading assumptions from CSV files
    pub fn from_csv() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            engine: CalculatorEngine::from_csv()?,
        })
    }

    /// Create runner from specific assumptions directory
    pub fn from_csv_path(path: &std::path::Path) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            engine: CalculatorEngine::from_csv_path(path)?,
        })
    }

    pub fn with_assumptions(assumptions: Assumptions) -> Self {
        Self {
            engine: CalculatorEngine::new(assumptions),
        }
    }

    pub fn engine(&self) -> &CalculatorEngine {
        &self.engine
    }

    /// Evaluate typed requests; output order matches input order
    pub fn run(&self, requests: &[CalculatorRequest]) -> Vec<CalcResult<CalculatorResponse>> {
        let results: Vec<_> = requests.par_iter().map(|req| self.engine.compute(req)).collect();
        log_failures(results.iter().filter(|r| r.is_err()).count(), results.len());
        results
    }

    /// Evaluate raw JSON requests, decoding each one independently
    pub fn run_json(&self, requests: &[serde_json::Value]) -> Vec<BatchOutcome> {
        let outcomes: Vec<BatchOutcome> = requests
            .par_iter()
            .map(|value| BatchOutcome::from(self.engine.compute_json(value.clone())))
            .collect();
        log_failures(outcomes.iter().filter(|o| !o.is_ok()).count(), outcomes.len());
        outcomes
    }
}

fn log_failures(failed: usize, total: usize) {
    if failed > 0 {
        log::warn!("{} of {} batch requests were rejected", failed, total);
    } else {
        log::debug!("batch of {} requests completed", total);
    }
}
