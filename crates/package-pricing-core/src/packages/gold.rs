use super::{FeeComponent, PackageBreakdown, PricingAdjustment};
use crate::error::PricingError;
use crate::schedule::FeeSchedules;
use crate::types::PackageTier;
use crate::PricingResult;

/// Gold: fixed base fee plus Silver's audit figure, tax representation and
/// bank confirmation.
///
/// Takes the Silver breakdown for the same client rather than recomputing
/// the audit fee; any audit clamping carries over.
pub fn price_gold(
    schedules: &FeeSchedules,
    silver: &PackageBreakdown,
) -> PricingResult<PackageBreakdown> {
    if silver.package() != PackageTier::Silver {
        return Err(PricingError::InvalidInput {
            field: "silver".into(),
            reason: format!("Gold is priced from the Silver breakdown, got {}", silver.package()),
        });
    }

    let fixed = &schedules.fixed;
    Ok(PackageBreakdown::new(
        PackageTier::Gold,
        [
            (FeeComponent::Accounting, fixed.gold_base_annual),
            (FeeComponent::Audit, silver.component(FeeComponent::Audit)),
            (FeeComponent::Tax, fixed.tax_representation),
            (FeeComponent::Bank, fixed.bank_confirmation),
        ],
    )
    .with_adjustments(audit_adjustments(silver)))
}

pub(crate) fn audit_adjustments(
    silver: &PackageBreakdown,
) -> impl Iterator<Item = PricingAdjustment> + '_ {
    silver
        .adjustments()
        .iter()
        .filter(|a| matches!(a, PricingAdjustment::AuditClamped { .. }))
        .cloned()
}
