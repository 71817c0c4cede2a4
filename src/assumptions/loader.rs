//! CSV-based assumption loader
//!
//! Loads calculator assumptions from CSV files in data/assumptions/

use serde::Deserialize;
use std::collections::HashMap;
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Default path to assumptions directory
pub const DEFAULT_ASSUMPTIONS_PATH: &str = "data/assumptions";

/// One row of tax_slabs.csv
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SlabRow {
    #[serde(rename = "Regime")]
    pub regime: String,
    #[serde(rename = "LowerBound")]
    pub lower: f64,
    #[serde(rename = "RatePct")]
    pub rate_pct: f64,
}

/// Load tax slab rows from any reader
pub fn load_tax_slabs_from_reader<R: Read>(reader: R) -> Result<Vec<SlabRow>, Box<dyn Error>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();

    for result in csv_reader.deserialize() {
        let row: SlabRow = result?;
        rows.push(row);
    }

    Ok(rows)
}

/// Load tax slab rows from tax_slabs.csv
pub fn load_tax_slabs(path: &Path) -> Result<Vec<SlabRow>, Box<dyn Error>> {
    let file = File::open(path.join("tax_slabs.csv"))?;
    load_tax_slabs_from_reader(file)
}

/// One row of parameters.csv
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ParamRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Value")]
    pub value: f64,
}

/// Load named scalar parameters (Name,Value) from any reader
pub fn load_parameters_from_reader<R: Read>(reader: R) -> Result<HashMap<String, f64>, Box<dyn Error>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut params = HashMap::new();

    for result in csv_reader.deserialize() {
        let row: ParamRow = result?;
        params.insert(row.name, row.value);
    }

    Ok(params)
}

/// Load named scalar parameters from parameters.csv
pub fn load_parameters(path: &Path) -> Result<HashMap<String, f64>, Box<dyn Error>> {
    let file = File::open(path.join("parameters.csv"))?;
    load_parameters_from_reader(file)
}

/// Raw assumption tables as read from disk
pub struct LoadedAssumptions {
    pub tax_slabs: Vec<SlabRow>,
    pub parameters: HashMap<String, f64>,
}

impl LoadedAssumptions {
    /// Load all assumptions from the default path
    pub fn load_default() -> Result<Self, Box<dyn Error>> {
        Self::load_from(Path::new(DEFAULT_ASSUMPTIONS_PATH))
    }

    /// Load all assumptions from a specific path
    pub fn load_from(path: &Path) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            tax_slabs: load_tax_slabs(path)?,
            parameters: load_parameters(path)?,
        })
    }
}
