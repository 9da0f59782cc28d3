//! Bronze pricing: the bundled Standard fee, the per-transaction Secondary
//! fee, and the resolver that picks the governing Bronze price.

use rust_decimal::Decimal;
use serde::Serialize;

use super::{clamped_audit_fee, BronzeVariant, FeeComponent, PackageBreakdown};
use crate::error::PricingError;
use crate::profile::ClientProfile;
use crate::schedule::FeeSchedules;
use crate::types::{Money, PackageTier};
use crate::PricingResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Why Bronze-Standard could not be offered.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Ineligibility {
    EntryCapExceeded { entries: u64, cap: u64 },
    TurnoverAboveTable { turnover: Money, top_threshold: Money },
}

impl Ineligibility {
    /// Business outcomes are split out of the error; anything else is a real failure.
    fn from_error(err: PricingError) -> PricingResult<Self> {
        match err {
            PricingError::EntryCapExceeded { entries, cap } => {
                Ok(Ineligibility::EntryCapExceeded { entries, cap })
            }
            PricingError::TierExhausted {
                value,
                top_threshold,
                ..
            } => Ok(Ineligibility::TurnoverAboveTable {
                turnover: value,
                top_threshold,
            }),
            other => Err(other),
        }
    }

    pub fn message(&self) -> String {
        match self {
            Ineligibility::EntryCapExceeded { entries, cap } => format!(
                "Bronze-Standard is capped at {cap} entries a year; this client has {entries}"
            ),
            Ineligibility::TurnoverAboveTable {
                turnover,
                top_threshold,
            } => format!(
                "Bronze-Standard covers turnover up to {top_threshold}; this client turns over {turnover}"
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StandardStatus {
    Eligible { total: Money },
    Ineligible { reason: Ineligibility },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BronzeResolution {
    /// Governing Bronze price, tagged with its variant.
    pub chosen: PackageBreakdown,
    pub variant: BronzeVariant,
    pub standard: StandardStatus,
    /// Secondary price, when that variant is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<PackageBreakdown>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BronzeOutcome {
    Available(BronzeResolution),
    Unavailable { reason: Ineligibility },
}

impl BronzeOutcome {
    pub fn price(&self) -> Option<&PackageBreakdown> {
        match self {
            BronzeOutcome::Available(resolution) => Some(&resolution.chosen),
            BronzeOutcome::Unavailable { .. } => None,
        }
    }

    pub fn total(&self) -> Option<Money> {
        self.price().map(PackageBreakdown::total)
    }

    pub fn variant(&self) -> Option<BronzeVariant> {
        match self {
            BronzeOutcome::Available(resolution) => Some(resolution.variant),
            BronzeOutcome::Unavailable { .. } => None,
        }
    }

    pub fn is_eligible(&self) -> bool {
        matches!(self, BronzeOutcome::Available(_))
    }
}

// ---------------------------------------------------------------------------
// Calculators
// ---------------------------------------------------------------------------

/// Bronze-Standard: bundled fee by turnover plus bank confirmation.
///
/// Fails closed: [`PricingError::EntryCapExceeded`] above the entry cap and
/// [`PricingError::TierExhausted`] above the bundle table's top turnover.
pub fn price_bronze_standard(
    schedules: &FeeSchedules,
    profile: &ClientProfile,
) -> PricingResult<PackageBreakdown> {
    let cap = schedules.fixed.bronze_entry_cap;
    if profile.annual_entries() > cap {
        return Err(PricingError::EntryCapExceeded {
            entries: profile.annual_entries(),
            cap,
        });
    }

    let bundle = schedules.bronze_bundles.lookup(profile.turnover())?;

    Ok(PackageBreakdown::new(
        PackageTier::Bronze,
        [
            (FeeComponent::Accounting, bundle.accounting),
            (FeeComponent::Audit, bundle.audit),
            (FeeComponent::Tax, bundle.tax),
            (FeeComponent::Bank, schedules.fixed.bank_confirmation),
        ],
    )
    .with_variant(BronzeVariant::Standard))
}

/// Bronze-Secondary: base fee plus a per-entry rate, with the clamped
/// secondary audit fee. No entry cap.
pub fn price_bronze_secondary(schedules: &FeeSchedules, profile: &ClientProfile) -> PackageBreakdown {
    let fixed = &schedules.fixed;
    let accounting =
        fixed.secondary_base_fee + fixed.secondary_entry_rate * Decimal::from(profile.annual_entries());
    let (audit, clamped) = clamped_audit_fee(schedules, profile);

    PackageBreakdown::new(
        PackageTier::Bronze,
        [
            (FeeComponent::Accounting, accounting),
            (FeeComponent::Audit, audit),
            (FeeComponent::Tax, fixed.tax_representation),
            (FeeComponent::Bank, fixed.bank_confirmation),
        ],
    )
    .with_variant(BronzeVariant::Secondary)
    .with_adjustments(clamped)
}

/// Governing Bronze price: the cheaper eligible variant, Standard on a tie.
///
/// For high-turnover, low-volume clients Secondary usually undercuts the
/// Standard bundle, which narrows the gap to Silver. Silver then wins as a
/// value upgrade rather than on price. It only undercuts Bronze outright
/// when `bronze_secondary_enabled` is false and Standard alone governs.
pub fn resolve_bronze(
    schedules: &FeeSchedules,
    profile: &ClientProfile,
) -> PricingResult<BronzeOutcome> {
    let standard = match price_bronze_standard(schedules, profile) {
        Ok(breakdown) => Ok(breakdown),
        Err(err) => Err(Ineligibility::from_error(err)?),
    };

    let secondary = schedules
        .bronze_secondary_enabled
        .then(|| price_bronze_secondary(schedules, profile));

    let outcome = match (standard, secondary) {
        (Ok(std_price), Some(sec_price)) => {
            let status = StandardStatus::Eligible {
                total: std_price.total(),
            };
            if sec_price.total() < std_price.total() {
                BronzeOutcome::Available(BronzeResolution {
                    chosen: sec_price.clone(),
                    variant: BronzeVariant::Secondary,
                    standard: status,
                    secondary: Some(sec_price),
                })
            } else {
                BronzeOutcome::Available(BronzeResolution {
                    chosen: std_price,
                    variant: BronzeVariant::Standard,
                    standard: status,
                    secondary: Some(sec_price),
                })
            }
        }
        (Ok(std_price), None) => BronzeOutcome::Available(BronzeResolution {
            standard: StandardStatus::Eligible {
                total: std_price.total(),
            },
            chosen: std_price,
            variant: BronzeVariant::Standard,
            secondary: None,
        }),
        (Err(reason), Some(sec_price)) => BronzeOutcome::Available(BronzeResolution {
            chosen: sec_price.clone(),
            variant: BronzeVariant::Secondary,
            standard: StandardStatus::Ineligible { reason },
            secondary: Some(sec_price),
        }),
        (Err(reason), None) => BronzeOutcome::Unavailable { reason },
    };

    tracing::debug!(
        variant = ?outcome.variant(),
        total = ?outcome.total(),
        "bronze resolved"
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn schedules() -> FeeSchedules {
        FeeSchedules::standard().unwrap()
    }

    fn profile(turnover: Decimal, entries: u64) -> ClientProfile {
        ClientProfile::new(turnover, entries).unwrap()
    }

    #[test]
    fn test_standard_low_turnover() {
        let b = price_bronze_standard(&schedules(), &profile(dec!(500_000), 360)).unwrap();
        assert_eq!(b.total(), dec!(13_300));
        assert_eq!(b.component(FeeComponent::Accounting), dec!(4_800));
        assert_eq!(b.component(FeeComponent::Audit), dec!(5_400));
        assert_eq!(b.component(FeeComponent::Tax), dec!(2_600));
        assert_eq!(b.component(FeeComponent::Bank), dec!(500));
        assert_eq!(b.variant(), Some(BronzeVariant::Standard));
    }

    #[test]
    fn test_standard_at_entry_cap_is_eligible() {
        assert!(price_bronze_standard(&schedules(), &profile(dec!(500_000), 1_200)).is_ok());
    }

    #[test]
    fn test_standard_above_entry_cap() {
        let err = price_bronze_standard(&schedules(), &profile(dec!(500_000), 1_201)).unwrap_err();
        assert_eq!(
            err,
            PricingError::EntryCapExceeded {
                entries: 1_201,
                cap: 1_200
            }
        );
    }

    #[test]
    fn test_standard_above_turnover_table() {
        let err =
            price_bronze_standard(&schedules(), &profile(dec!(30_000_001), 100)).unwrap_err();
        assert!(matches!(err, PricingError::TierExhausted { .. }));
    }

    #[test]
    fn test_secondary_accounting_scales_per_entry() {
        let b = price_bronze_secondary(&schedules(), &profile(dec!(500_000), 1_500));
        assert_eq!(b.component(FeeComponent::Accounting), dec!(45_500));
        assert_eq!(b.component(FeeComponent::Audit), dec!(6_000));
        assert_eq!(b.total(), dec!(54_600));
        assert!(b.adjustments().is_empty());
    }

    #[test]
    fn test_secondary_audit_clamped_above_table() {
        let b = price_bronze_secondary(&schedules(), &profile(dec!(250_000_000), 0));
        assert_eq!(b.component(FeeComponent::Audit), dec!(90_000));
        assert_eq!(b.adjustments().len(), 1);
    }

    #[test]
    fn test_resolver_prefers_cheaper_standard() {
        let outcome = resolve_bronze(&schedules(), &profile(dec!(500_000), 360)).unwrap();
        assert_eq!(outcome.variant(), Some(BronzeVariant::Standard));
        assert_eq!(outcome.total(), Some(dec!(13_300)));
    }

    #[test]
    fn test_resolver_prefers_cheaper_secondary() {
        // Standard 83,100 vs Secondary 8,000 + 9,000 + 45,000 + 2,600 + 500 = 65,100
        let outcome = resolve_bronze(&schedules(), &profile(dec!(25_000_000), 360)).unwrap();
        assert_eq!(outcome.variant(), Some(BronzeVariant::Secondary));
        assert_eq!(outcome.total(), Some(dec!(65_100)));
        match outcome {
            BronzeOutcome::Available(r) => {
                assert_eq!(r.standard, StandardStatus::Eligible { total: dec!(83_100) })
            }
            other => panic!("expected available bronze, got {other:?}"),
        }
    }

    #[test]
    fn test_resolver_falls_back_when_capped() {
        let outcome = resolve_bronze(&schedules(), &profile(dec!(500_000), 1_500)).unwrap();
        match outcome {
            BronzeOutcome::Available(r) => {
                assert_eq!(r.variant, BronzeVariant::Secondary);
                assert_eq!(r.chosen.total(), dec!(54_600));
                assert!(matches!(
                    r.standard,
                    StandardStatus::Ineligible {
                        reason: Ineligibility::EntryCapExceeded { .. }
                    }
                ));
            }
            other => panic!("expected available bronze, got {other:?}"),
        }
    }

    #[test]
    fn test_resolver_without_secondary_is_unavailable() {
        let mut s = schedules();
        s.bronze_secondary_enabled = false;
        let outcome = resolve_bronze(&s, &profile(dec!(500_000), 1_500)).unwrap();
        assert!(!outcome.is_eligible());
        assert_eq!(outcome.total(), None);
    }

    #[test]
    fn test_resolver_without_secondary_keeps_standard() {
        let mut s = schedules();
        s.bronze_secondary_enabled = false;
        let outcome = resolve_bronze(&s, &profile(dec!(25_000_000), 360)).unwrap();
        assert_eq!(outcome.variant(), Some(BronzeVariant::Standard));
        assert_eq!(outcome.total(), Some(dec!(83_100)));
    }

    #[test]
    fn test_ineligibility_message_mentions_cap() {
        let reason = Ineligibility::EntryCapExceeded {
            entries: 1_500,
            cap: 1_200,
        };
        assert!(reason.message().contains("1200"));
    }
}
