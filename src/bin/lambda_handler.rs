//! AWS Lambda handler for running calculators
//!
//! Accepts either one tagged request or an array of them, directly as the
//! event or as the `body` of a Lambda Function URL / API Gateway event.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use calculator_engine::{Assumptions, BatchRunner, CalcError};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::Serialize;
use serde_json::{json, Value};
use std::path::Path;

/// Directory of CSV assumptions to load instead of the built-in rules
const ASSUMPTIONS_DIR_VAR: &str = "CALC_ASSUMPTIONS_DIR";

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

fn http_response<T: Serialize>(status: u16, body: &T) -> Value {
    let body = serde_json::to_string(body).unwrap_or_else(|e| format!(r#"{{"error":"{}"}}"#, e));
    json!({
        "statusCode": status,
        "headers": {
            "Content-Type": "application/json",
            "Access-Control-Allow-Origin": "*",
            "Access-Control-Allow-Methods": "POST, OPTIONS",
            "Access-Control-Allow-Headers": "Content-Type"
        },
        "body": body
    })
}

fn error_response(status: u16, message: &str) -> Value {
    http_response(status, &ErrorBody { error: message })
}

fn is_preflight(event: &Value) -> bool {
    let method = event
        .pointer("/requestContext/http/method")
        .or_else(|| event.get("httpMethod"))
        .and_then(Value::as_str);
    method == Some("OPTIONS")
}

/// Unwrap an HTTP-style event into the request payload
fn extract_payload(event: Value) -> Result<Value, String> {
    match event.get("body") {
        Some(Value::String(body)) => {
            if event.get("isBase64Encoded").and_then(Value::as_bool) == Some(true) {
                return Err("base64-encoded bodies are not supported".to_string());
            }
            serde_json::from_str(body).map_err(|e| CalcError::from(e).to_string())
        }
        Some(Value::Null) | None => Ok(event),
        Some(other) => Ok(other.clone()),
    }
}

fn load_runner() -> BatchRunner {
    match std::env::var(ASSUMPTIONS_DIR_VAR) {
        Ok(dir) => match Assumptions::from_csv_path(Path::new(&dir)) {
            Ok(assumptions) => BatchRunner::with_assumptions(assumptions),
            Err(e) => {
                log::warn!("failed to load assumptions from {}: {}; using built-in rules", dir, e);
                BatchRunner::new()
            }
        },
        Err(_) => BatchRunner::new(),
    }
}

/// Lambda handler function
async fn handler(runner: &BatchRunner, event: LambdaEvent<Value>) -> Result<Value, Error> {
    let start = std::time::Instant::now();
    let (event, context) = event.into_parts();

    if is_preflight(&event) {
        return Ok(http_response(200, &json!({})));
    }

    let payload = match extract_payload(event) {
        Ok(payload) => payload,
        Err(message) => return Ok(error_response(400, &message)),
    };

    let response = match payload {
        Value::Array(requests) => {
            let outcomes = runner.run_json(&requests);
            http_response(200, &json!({ "results": outcomes }))
        }
        request => match runner.engine().compute_json(request) {
            Ok(result) => http_response(200, &json!({ "result": result })),
            Err(e) => {
                log::warn!("request {} rejected: {}", context.request_id, e);
                error_response(400, &e.to_string())
            }
        },
    };

    log::info!(
        "request {} handled in {:.1}ms",
        context.request_id,
        start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let runner = load_runner();
    let runner = &runner;

    run(service_fn(move |event: LambdaEvent<Value>| async move {
        handler(runner, event).await
    }))
    .await
}
