//! Calculator Engine CLI
//!
//! Command-line interface for running calculators, batches, loan schedules
//! and SIP growth tables

use anyhow::{anyhow, bail, Context, Result};
use calculator_engine::investment::{sip_growth_table, SipInput};
use calculator_engine::loan::EmiInput;
use calculator_engine::{AmortizationSchedule, Assumptions, BatchRunner, CalculatorEngine, CalculatorKind};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde_json::{Map, Number, Value};
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "calc", version, about = "Financial, loan and health calculators")]
struct Cli {
    /// Directory holding tax_slabs.csv and parameters.csv (built-in rules if omitted)
    #[arg(long, global = true)]
    assumptions: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List calculators and their input fields
    List,
    /// Run one calculator
    Run {
        /// Calculator identifier, e.g. sip, emi, home_loan, bmi
        kind: String,
        /// Inputs as key=value pairs, e.g. principal=500000 annualRate=9
        inputs: Vec<String>,
        /// Print the raw JSON response instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Evaluate a JSON array of tagged requests in parallel
    Batch {
        /// Input file, or - for stdin
        file: String,
    },
    /// Month-by-month amortization schedule as CSV
    Schedule {
        #[arg(long)]
        principal: f64,
        /// Annual interest rate in percent
        #[arg(long)]
        rate: f64,
        #[arg(long)]
        months: u32,
        /// Date of the first instalment (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,
        /// One row per loan year instead of per month
        #[arg(long)]
        yearly: bool,
        /// Output file (stdout if omitted)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Year-by-year SIP growth table as CSV
    Growth {
        /// Monthly instalment
        #[arg(long)]
        monthly: f64,
        /// Expected annual return in percent
        #[arg(long)]
        rate: f64,
        #[arg(long)]
        years: f64,
        /// Output file (stdout if omitted)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List => list_calculators(),
        Commands::Run { kind, inputs, json } => {
            let engine = CalculatorEngine::new(load_assumptions(cli.assumptions.as_deref())?);
            run_calculator(&engine, &kind, &inputs, json)
        }
        Commands::Batch { file } => {
            let runner = BatchRunner::with_assumptions(load_assumptions(cli.assumptions.as_deref())?);
            run_batch(&runner, &file)
        }
        Commands::Schedule {
            principal,
            rate,
            months,
            start,
            yearly,
            output,
        } => {
            let input = EmiInput {
                principal,
                annual_rate: rate,
                months,
            };
            let schedule = AmortizationSchedule::build(&input, start)?;
            log::info!(
                "EMI {:.2}, total interest {:.2}",
                schedule.summary.monthly_emi,
                schedule.summary.total_interest
            );
            let writer = open_output(output.as_deref())?;
            let written = if yearly {
                schedule.write_yearly_csv(writer)
            } else {
                schedule.write_csv(writer)
            };
            written.map_err(|e| anyhow!("failed to write schedule: {}", e))
        }
        Commands::Growth {
            monthly,
            rate,
            years,
            output,
        } => {
            let rows = sip_growth_table(&SipInput {
                monthly_investment: monthly,
                annual_rate: rate,
                years,
            })?;
            let mut writer = csv::Writer::from_writer(open_output(output.as_deref())?);
            for row in &rows {
                writer.serialize(row)?;
            }
            writer.flush()?;
            Ok(())
        }
    }
}

fn load_assumptions(dir: Option<&Path>) -> Result<Assumptions> {
    match dir {
        Some(path) => Assumptions::from_csv_path(path)
            .map_err(|e| anyhow!("failed to load assumptions from {}: {}", path.display(), e)),
        None => Ok(Assumptions::default_rules()),
    }
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    let writer: Box<dyn Write> = match path {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    Ok(writer)
}

fn list_calculators() -> Result<()> {
    println!("{:<18} {}", "Calculator", "Inputs (? = optional)");
    println!("{}", "-".repeat(80));
    for kind in CalculatorKind::ALL {
        println!("{:<18} {}", kind.as_str(), kind.input_fields().join(", "));
        if !kind.aliases().is_empty() {
            println!("{:<18} aliases: {}", "", kind.aliases().join(", "));
        }
    }
    Ok(())
}

fn run_calculator(engine: &CalculatorEngine, kind: &str, inputs: &[String], json: bool) -> Result<()> {
    let kind: CalculatorKind = kind.parse()?;

    let mut request = Map::new();
    request.insert("calculator".to_string(), Value::String(kind.as_str().to_string()));
    for pair in inputs {
        let (key, raw) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("expected key=value, got `{}`", pair))?;
        request.insert(key.trim().to_string(), parse_value(raw.trim()));
    }

    let response = engine.compute_json(Value::Object(request))?;
    let value = serde_json::to_value(&response)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{}", kind);
    println!("{}", "=".repeat(kind.as_str().len()));
    if let Value::Object(fields) = value {
        print_fields("", &fields);
    }
    Ok(())
}

/// Integers stay integers so whole-number fields like `months` decode
fn parse_value(raw: &str) -> Value {
    if let Ok(i) = raw.parse::<i64>() {
        return Value::Number(Number::from(i));
    }
    if let Some(n) = raw.parse::<f64>().ok().and_then(Number::from_f64) {
        return Value::Number(n);
    }
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::String(raw.to_string()),
    }
}

fn print_fields(prefix: &str, fields: &Map<String, Value>) {
    for (name, value) in fields {
        if name == "calculator" {
            continue;
        }
        let label = format!("{}{}", prefix, name);
        match value {
            Value::Number(n) => match n.as_f64() {
                Some(f) if n.is_f64() => println!("  {:<28} {:>18.2}", label, f),
                _ => println!("  {:<28} {:>18}", label, n),
            },
            Value::String(s) => println!("  {:<28} {:>18}", label, s),
            Value::Object(inner) => print_fields(&format!("{}.", label), inner),
            other => println!("  {:<28} {:>18}", label, other),
        }
    }
}

fn run_batch(runner: &BatchRunner, file: &str) -> Result<()> {
    let mut text = String::new();
    if file == "-" {
        io::stdin().read_to_string(&mut text)?;
    } else {
        File::open(file)
            .with_context(|| format!("failed to open {}", file))?
            .read_to_string(&mut text)?;
    }

    let requests: Vec<Value> = match serde_json::from_str(&text)? {
        Value::Array(items) => items,
        _ => bail!("batch input must be a JSON array of requests"),
    };

    let outcomes = runner.run_json(&requests);
    let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
    println!("{}", serde_json::to_string_pretty(&outcomes)?);
    if failed > 0 {
        eprintln!("{} of {} requests failed", failed, outcomes.len());
    }
    Ok(())
}
