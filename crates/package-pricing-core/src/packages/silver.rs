use rust_decimal::Decimal;

use super::{clamped_audit_fee, FeeComponent, PackageBreakdown, PricingAdjustment};
use crate::profile::ClientProfile;
use crate::schedule::FeeSchedules;
use crate::types::{Money, PackageTier, MONTHS_PER_YEAR};
use crate::PricingResult;

/// Annual Silver accounting fee and the overage adjustment, if any.
///
/// Up to the overage threshold the monthly fee comes from the entry tiers.
/// Above it, the base monthly fee is annualised and every extra entry is
/// charged at the overage rate, with no upper bound.
pub fn silver_accounting_fee(
    schedules: &FeeSchedules,
    annual_entries: u64,
) -> PricingResult<(Money, Option<PricingAdjustment>)> {
    let fixed = &schedules.fixed;
    let months = Decimal::from(MONTHS_PER_YEAR);

    if annual_entries <= fixed.silver_overage_threshold {
        let monthly = schedules
            .silver_monthly
            .lookup(Decimal::from(annual_entries))?;
        return Ok((*monthly * months, None));
    }

    let entries_over = annual_entries - fixed.silver_overage_threshold;
    let surcharge = Decimal::from(entries_over) * fixed.silver_overage_rate;
    let adjustment = PricingAdjustment::VolumeOverage {
        threshold: fixed.silver_overage_threshold,
        entries_over,
        surcharge,
    };
    Ok((
        fixed.silver_overage_base_monthly * months + surcharge,
        Some(adjustment),
    ))
}

/// Silver: a-la-carte accounting, clamped audit, tax representation and
/// bank confirmation. Always available.
pub fn price_silver(
    schedules: &FeeSchedules,
    profile: &ClientProfile,
) -> PricingResult<PackageBreakdown> {
    let (accounting, overage) = silver_accounting_fee(schedules, profile.annual_entries())?;
    let (audit, clamped) = clamped_audit_fee(schedules, profile);

    Ok(PackageBreakdown::new(
        PackageTier::Silver,
        [
            (FeeComponent::Accounting, accounting),
            (FeeComponent::Audit, audit),
            (FeeComponent::Tax, schedules.fixed.tax_representation),
            (FeeComponent::Bank, schedules.fixed.bank_confirmation),
        ],
    )
    .with_adjustments(overage.into_iter().chain(clamped)))
}
