use serde::Serialize;

use super::gold::audit_adjustments;
use super::{FeeComponent, PackageBreakdown};
use crate::error::PricingError;
use crate::profile::ClientProfile;
use crate::schedule::FeeSchedules;
use crate::types::PackageTier;
use crate::PricingResult;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatinumQuote {
    pub breakdown: PackageBreakdown,
    /// Platinum is quoted as a floor; the final fee is scoped per client.
    pub starting_price: bool,
    /// Turnover is above the Platinum display threshold.
    pub featured: bool,
}

/// Platinum starting price: base fee plus Silver's audit figure.
pub fn price_platinum(
    schedules: &FeeSchedules,
    profile: &ClientProfile,
    silver: &PackageBreakdown,
) -> PricingResult<PlatinumQuote> {
    if silver.package() != PackageTier::Silver {
        return Err(PricingError::InvalidInput {
            field: "silver".into(),
            reason: format!(
                "Platinum is priced from the Silver breakdown, got {}",
                silver.package()
            ),
        });
    }

    let breakdown = PackageBreakdown::new(
        PackageTier::Platinum,
        [
            (FeeComponent::Accounting, schedules.fixed.platinum_base_annual),
            (FeeComponent::Audit, silver.component(FeeComponent::Audit)),
        ],
    )
    .with_adjustments(audit_adjustments(silver));

    Ok(PlatinumQuote {
        breakdown,
        starting_price: true,
        featured: profile.turnover() > schedules.policy.platinum_display_turnover,
    })
}
