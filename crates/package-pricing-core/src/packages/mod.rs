//! Per-package price calculators.
//!
//! Every calculator returns a [`PackageBreakdown`] whose total is derived
//! from its components at construction, so a breakdown can never carry a
//! fee that is not itemised.

pub mod bronze;
pub mod gold;
pub mod platinum;
pub mod silver;

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::profile::ClientProfile;
use crate::schedule::FeeSchedules;
use crate::types::{Money, PackageTier};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeComponent {
    Accounting,
    Audit,
    Tax,
    Bank,
}

/// Which Bronze pricing produced the governing Bronze price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BronzeVariant {
    /// Bundled fee by turnover, capped on entries.
    Standard,
    /// Base fee plus a per-entry rate, no entry cap.
    Secondary,
}

/// Business rule that shaped a price.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PricingAdjustment {
    /// Turnover was above the audit table; the top bracket fee was charged.
    AuditClamped {
        turnover: Money,
        top_threshold: Money,
        fee: Money,
    },
    /// Entries above the Silver threshold were charged per entry.
    VolumeOverage {
        threshold: u64,
        entries_over: u64,
        surcharge: Money,
    },
}

impl PricingAdjustment {
    pub fn describe(&self, package: PackageTier) -> String {
        match self {
            PricingAdjustment::AuditClamped {
                turnover,
                top_threshold,
                fee,
            } => format!(
                "{package}: turnover {turnover} is above the audit table's top bracket ({top_threshold}); audit charged at the top fee {fee}"
            ),
            PricingAdjustment::VolumeOverage {
                threshold,
                entries_over,
                surcharge,
            } => format!(
                "{package}: {entries_over} entries above the {threshold}-entry threshold add a surcharge of {surcharge}"
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackageBreakdown {
    package: PackageTier,
    #[serde(skip_serializing_if = "Option::is_none")]
    variant: Option<BronzeVariant>,
    total: Money,
    components: BTreeMap<FeeComponent, Money>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    adjustments: Vec<PricingAdjustment>,
}

impl PackageBreakdown {
    pub(crate) fn new(
        package: PackageTier,
        components: impl IntoIterator<Item = (FeeComponent, Money)>,
    ) -> Self {
        let mut map = BTreeMap::new();
        for (component, amount) in components {
            *map.entry(component).or_insert(Decimal::ZERO) += amount;
        }
        let total = map.values().copied().sum();
        PackageBreakdown {
            package,
            variant: None,
            total,
            components: map,
            adjustments: Vec::new(),
        }
    }

    pub(crate) fn with_variant(mut self, variant: BronzeVariant) -> Self {
        self.variant = Some(variant);
        self
    }

    pub(crate) fn with_adjustments(
        mut self,
        adjustments: impl IntoIterator<Item = PricingAdjustment>,
    ) -> Self {
        self.adjustments.extend(adjustments);
        self
    }

    pub fn package(&self) -> PackageTier {
        self.package
    }

    pub fn variant(&self) -> Option<BronzeVariant> {
        self.variant
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn components(&self) -> &BTreeMap<FeeComponent, Money> {
        &self.components
    }

    /// Amount for one component; zero when the package does not itemise it.
    pub fn component(&self, component: FeeComponent) -> Money {
        self.components
            .get(&component)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    pub fn adjustments(&self) -> &[PricingAdjustment] {
        &self.adjustments
    }

    /// Human-readable notes for every adjustment, for the envelope warnings.
    pub fn adjustment_notes(&self) -> Vec<String> {
        self.adjustments
            .iter()
            .map(|a| a.describe(self.package))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Audit fee from the secondary audit table, clamped at the top bracket.
pub(crate) fn clamped_audit_fee(
    schedules: &FeeSchedules,
    profile: &ClientProfile,
) -> (Money, Option<PricingAdjustment>) {
    let hit = schedules.secondary_audit.lookup_clamped(profile.turnover());
    let fee = *hit.payload;
    let adjustment = hit.clamped.then(|| PricingAdjustment::AuditClamped {
        turnover: profile.turnover(),
        top_threshold: schedules.secondary_audit.top_threshold(),
        fee,
    });
    (fee, adjustment)
}
