use napi::Result as NapiResult;
use napi_derive::napi;

use package_pricing_core::{quote, FeeSchedules, QuoteInput};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Standard price list, or a validated schedule passed in as JSON.
fn schedules(schedule_json: Option<String>) -> NapiResult<FeeSchedules> {
    match schedule_json {
        Some(json) => FeeSchedules::from_json_str(&json).map_err(to_napi_error),
        None => FeeSchedules::standard().map_err(to_napi_error),
    }
}

fn parse_input(input_json: &str) -> NapiResult<QuoteInput> {
    serde_json::from_str(input_json).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Quotes
// ---------------------------------------------------------------------------

#[napi]
pub fn evaluate_quote(input_json: String, schedule_json: Option<String>) -> NapiResult<String> {
    let input = parse_input(&input_json)?;
    let schedules = schedules(schedule_json)?;
    let output = quote::evaluate_quote(&schedules, &input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn price_bronze(input_json: String, schedule_json: Option<String>) -> NapiResult<String> {
    let input = parse_input(&input_json)?;
    let schedules = schedules(schedule_json)?;
    let output = quote::quote_bronze(&schedules, &input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn price_silver(input_json: String, schedule_json: Option<String>) -> NapiResult<String> {
    let input = parse_input(&input_json)?;
    let schedules = schedules(schedule_json)?;
    let output = quote::quote_silver(&schedules, &input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn price_gold(input_json: String, schedule_json: Option<String>) -> NapiResult<String> {
    let input = parse_input(&input_json)?;
    let schedules = schedules(schedule_json)?;
    let output = quote::quote_gold(&schedules, &input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn price_platinum(input_json: String, schedule_json: Option<String>) -> NapiResult<String> {
    let input = parse_input(&input_json)?;
    let schedules = schedules(schedule_json)?;
    let output = quote::quote_platinum(&schedules, &input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[napi]
pub fn default_schedule() -> NapiResult<String> {
    let schedules = FeeSchedules::standard().map_err(to_napi_error)?;
    serde_json::to_string(&schedules).map_err(to_napi_error)
}
