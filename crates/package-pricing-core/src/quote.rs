//! Quote evaluation: price every package for one client and pick the
//! recommendation.

use serde::Serialize;
use std::time::Instant;

use crate::packages::bronze::{self, BronzeOutcome, StandardStatus};
use crate::packages::gold::price_gold;
use crate::packages::platinum::{price_platinum, PlatinumQuote};
use crate::packages::silver::price_silver;
use crate::packages::PackageBreakdown;
use crate::profile::{ClientProfile, QuoteInput};
use crate::recommendation::{self, DecisionContext, Recommendation};
use crate::schedule::FeeSchedules;
use crate::types::*;
use crate::PricingResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteOutput {
    pub profile: ClientProfile,
    pub currency: String,
    pub bronze: BronzeOutcome,
    pub silver: PackageBreakdown,
    pub gold: PackageBreakdown,
    pub platinum: PlatinumQuote,
    pub recommendation: Recommendation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platinum_upsell: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoldOutput {
    pub silver: PackageBreakdown,
    pub gold: PackageBreakdown,
}

// ---------------------------------------------------------------------------
// Main calculation
// ---------------------------------------------------------------------------

/// Price all four packages for a validated profile and run the
/// recommendation chain. No envelope; see [`evaluate_quote`].
pub fn evaluate_profile(
    schedules: &FeeSchedules,
    profile: &ClientProfile,
) -> PricingResult<QuoteOutput> {
    let bronze = bronze::resolve_bronze(schedules, profile)?;
    let silver = price_silver(schedules, profile)?;
    let gold = price_gold(schedules, &silver)?;
    let platinum = price_platinum(schedules, profile, &silver)?;

    let ctx = DecisionContext {
        annual_entries: profile.annual_entries(),
        bronze_total: bronze.total(),
        silver_total: silver.total(),
        gold_total: gold.total(),
        currency: &schedules.currency,
        policy: &schedules.policy,
    };
    let recommendation = recommendation::recommend(&ctx);
    let platinum_upsell = recommendation::platinum_upsell(&platinum, &schedules.currency);

    Ok(QuoteOutput {
        profile: *profile,
        currency: schedules.currency.clone(),
        bronze,
        silver,
        gold,
        platinum,
        recommendation,
        platinum_upsell,
    })
}

/// Full quote for one client, wrapped in the computation envelope.
///
/// Business outcomes that shaped the prices (Bronze-Standard unavailable,
/// audit clamped, volume overage) are repeated as envelope warnings.
pub fn evaluate_quote(
    schedules: &FeeSchedules,
    input: &QuoteInput,
) -> PricingResult<ComputationOutput<QuoteOutput>> {
    let start = Instant::now();
    let profile = ClientProfile::from_input(input)?;

    let output = evaluate_profile(schedules, &profile)?;

    let mut warnings = bronze_warnings(&output.bronze);
    warnings.extend(output.silver.adjustment_notes());

    tracing::info!(
        turnover = %profile.turnover(),
        annual_entries = profile.annual_entries(),
        recommended = %output.recommendation.package,
        warnings = warnings.len(),
        "quote evaluated"
    );
    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Package quote: tiered fee schedules with first-match recommendation rules",
        &assumptions(schedules, &profile),
        warnings,
        elapsed,
        output,
    ))
}

/// Governing Bronze price only.
pub fn quote_bronze(
    schedules: &FeeSchedules,
    input: &QuoteInput,
) -> PricingResult<ComputationOutput<BronzeOutcome>> {
    let start = Instant::now();
    let profile = ClientProfile::from_input(input)?;
    let outcome = bronze::resolve_bronze(schedules, &profile)?;
    let warnings = bronze_warnings(&outcome);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Bronze: bundled Standard fee or per-transaction Secondary fee, whichever is lower",
        &assumptions(schedules, &profile),
        warnings,
        elapsed,
        outcome,
    ))
}

pub fn quote_silver(
    schedules: &FeeSchedules,
    input: &QuoteInput,
) -> PricingResult<ComputationOutput<PackageBreakdown>> {
    let start = Instant::now();
    let profile = ClientProfile::from_input(input)?;
    let silver = price_silver(schedules, &profile)?;
    let warnings = silver.adjustment_notes();

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Silver: tiered monthly accounting with linear overage, clamped audit",
        &assumptions(schedules, &profile),
        warnings,
        elapsed,
        silver,
    ))
}

/// Gold together with the Silver breakdown it is priced from.
pub fn quote_gold(
    schedules: &FeeSchedules,
    input: &QuoteInput,
) -> PricingResult<ComputationOutput<GoldOutput>> {
    let start = Instant::now();
    let profile = ClientProfile::from_input(input)?;
    let silver = price_silver(schedules, &profile)?;
    let gold = price_gold(schedules, &silver)?;
    let warnings = gold.adjustment_notes();

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Gold: fixed base fee plus the Silver audit fee",
        &assumptions(schedules, &profile),
        warnings,
        elapsed,
        GoldOutput { silver, gold },
    ))
}

pub fn quote_platinum(
    schedules: &FeeSchedules,
    input: &QuoteInput,
) -> PricingResult<ComputationOutput<PlatinumQuote>> {
    let start = Instant::now();
    let profile = ClientProfile::from_input(input)?;
    let silver = price_silver(schedules, &profile)?;
    let platinum = price_platinum(schedules, &profile, &silver)?;
    let warnings = platinum.breakdown.adjustment_notes();

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Platinum: starting price from the base fee plus the Silver audit fee",
        &assumptions(schedules, &profile),
        warnings,
        elapsed,
        platinum,
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn assumptions(schedules: &FeeSchedules, profile: &ClientProfile) -> serde_json::Value {
    serde_json::json!({
        "currency": schedules.currency,
        "turnover": profile.turnover().to_string(),
        "annual_entries": profile.annual_entries(),
        "bronze_entry_cap": schedules.fixed.bronze_entry_cap,
        "silver_overage_threshold": schedules.fixed.silver_overage_threshold,
        "bronze_secondary_enabled": schedules.bronze_secondary_enabled,
    })
}

fn bronze_warnings(outcome: &BronzeOutcome) -> Vec<String> {
    match outcome {
        BronzeOutcome::Available(resolution) => {
            let mut warnings = Vec::new();
            if let StandardStatus::Ineligible { reason } = &resolution.standard {
                warnings.push(format!(
                    "{}; priced on the per-transaction Bronze instead",
                    reason.message()
                ));
            }
            warnings.extend(resolution.chosen.adjustment_notes());
            warnings
        }
        BronzeOutcome::Unavailable { reason } => {
            vec![format!("{}; Bronze is not available", reason.message())]
        }
    }
}
