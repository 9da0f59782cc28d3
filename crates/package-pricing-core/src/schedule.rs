//! Fee schedules: tier tables, fixed fees and recommendation thresholds.
//!
//! A [`FeeSchedules`] value is loaded once (either [`FeeSchedules::standard`]
//! or a validated config file) and then shared read-only by every calculator.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::PricingError;
use crate::tiers::{TierRecord, TierTable};
use crate::types::{Money, Rate};
use crate::PricingResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Bronze-Standard bundled fee for one turnover bracket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BronzeBundle {
    pub accounting: Money,
    pub audit: Money,
    pub tax: Money,
}

impl BronzeBundle {
    pub fn new(accounting: Money, audit: Money, tax: Money) -> Self {
        BronzeBundle {
            accounting,
            audit,
            tax,
        }
    }

    pub fn total(&self) -> Money {
        self.accounting + self.audit + self.tax
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedFees {
    pub tax_representation: Money,
    pub bank_confirmation: Money,
    /// Bronze-Standard is only offered up to this many entries a year.
    pub bronze_entry_cap: u64,
    /// Annual entries above which Silver switches to the overage formula.
    pub silver_overage_threshold: u64,
    /// Monthly accounting fee the overage formula starts from.
    pub silver_overage_base_monthly: Money,
    pub silver_overage_rate: Rate,
    pub gold_base_annual: Money,
    pub platinum_base_annual: Money,
    pub secondary_base_fee: Money,
    pub secondary_entry_rate: Rate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationPolicy {
    /// Largest Gold premium over Silver still pitched as a VIP upgrade.
    pub gold_upgrade_threshold: Money,
    /// Largest Silver premium over Bronze still pitched as a value upgrade.
    pub silver_upgrade_threshold: Money,
    /// Turnover above which Platinum is surfaced as an upsell.
    pub platinum_display_turnover: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeSchedules {
    /// Display label only; all amounts share this currency.
    pub currency: String,
    /// Bronze-Standard bundle by turnover.
    pub bronze_bundles: TierTable<BronzeBundle>,
    /// Audit fee by turnover, used by Bronze-Secondary, Silver, Gold and Platinum.
    pub secondary_audit: TierTable<Money>,
    /// Silver monthly accounting fee by annual entries.
    pub silver_monthly: TierTable<Money>,
    pub fixed: FixedFees,
    pub policy: RecommendationPolicy,
    /// When off, Bronze has no per-transaction fallback.
    #[serde(default = "default_true")]
    pub bronze_secondary_enabled: bool,
}

fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl FeeSchedules {
    /// The standard HKD price list.
    pub fn standard() -> PricingResult<Self> {
        let bronze_bundles = TierTable::new(
            "bronze_bundle",
            vec![
                TierRecord::new(dec!(500_000), BronzeBundle::new(dec!(4_800), dec!(5_400), dec!(2_600))),
                TierRecord::new(dec!(1_000_000), BronzeBundle::new(dec!(6_000), dec!(7_200), dec!(2_600))),
                TierRecord::new(dec!(2_000_000), BronzeBundle::new(dec!(7_200), dec!(10_000), dec!(2_600))),
                TierRecord::new(dec!(3_000_000), BronzeBundle::new(dec!(8_400), dec!(12_800), dec!(2_600))),
                TierRecord::new(dec!(5_000_000), BronzeBundle::new(dec!(9_600), dec!(19_600), dec!(2_600))),
                TierRecord::new(dec!(10_000_000), BronzeBundle::new(dec!(12_000), dec!(31_200), dec!(2_600))),
                TierRecord::new(dec!(15_000_000), BronzeBundle::new(dec!(13_200), dec!(42_800), dec!(2_600))),
                TierRecord::new(dec!(20_000_000), BronzeBundle::new(dec!(14_400), dec!(53_600), dec!(2_600))),
                TierRecord::new(dec!(25_000_000), BronzeBundle::new(dec!(15_600), dec!(64_400), dec!(2_600))),
                TierRecord::new(dec!(30_000_000), BronzeBundle::new(dec!(16_800), dec!(75_200), dec!(2_600))),
            ],
        )?;

        let secondary_audit = TierTable::new(
            "secondary_audit",
            vec![
                TierRecord::new(dec!(500_000), dec!(6_000)),
                TierRecord::new(dec!(1_000_000), dec!(7_500)),
                TierRecord::new(dec!(2_000_000), dec!(9_500)),
                TierRecord::new(dec!(5_000_000), dec!(14_000)),
                TierRecord::new(dec!(10_000_000), dec!(22_000)),
                TierRecord::new(dec!(20_000_000), dec!(35_000)),
                TierRecord::new(dec!(25_000_000), dec!(45_000)),
                TierRecord::new(dec!(50_000_000), dec!(65_000)),
                TierRecord::new(dec!(100_000_000), dec!(90_000)),
            ],
        )?;

        let silver_monthly = TierTable::new(
            "silver_monthly",
            vec![
                TierRecord::new(dec!(600), dec!(1_500)),
                TierRecord::new(dec!(1_200), dec!(2_000)),
                TierRecord::new(dec!(2_400), dec!(2_800)),
                TierRecord::new(dec!(4_800), dec!(3_800)),
                TierRecord::new(dec!(9_600), dec!(5_500)),
                TierRecord::new(dec!(14_400), dec!(7_000)),
                TierRecord::new(dec!(19_200), dec!(8_500)),
                TierRecord::new(dec!(24_000), dec!(10_000)),
            ],
        )?;

        let schedules = FeeSchedules {
            currency: "HKD".into(),
            bronze_bundles,
            secondary_audit,
            silver_monthly,
            fixed: FixedFees {
                tax_representation: dec!(2_600),
                bank_confirmation: dec!(500),
                bronze_entry_cap: 1_200,
                silver_overage_threshold: 24_000,
                silver_overage_base_monthly: dec!(10_000),
                silver_overage_rate: dec!(5),
                gold_base_annual: dec!(92_000),
                platinum_base_annual: dec!(150_000),
                secondary_base_fee: dec!(8_000),
                secondary_entry_rate: dec!(25),
            },
            policy: RecommendationPolicy {
                gold_upgrade_threshold: dec!(10_000),
                silver_upgrade_threshold: dec!(3_000),
                platinum_display_turnover: dec!(50_000_000),
            },
            bronze_secondary_enabled: true,
        };
        schedules.validate()?;
        Ok(schedules)
    }

    /// Parse and validate a schedule from JSON.
    pub fn from_json_str(json: &str) -> PricingResult<Self> {
        let schedules: FeeSchedules = serde_json::from_str(json)?;
        schedules.validate()?;
        tracing::debug!(currency = %schedules.currency, "fee schedule loaded from json");
        Ok(schedules)
    }

    /// Check the cross-table rules a tier table alone cannot enforce.
    pub fn validate(&self) -> PricingResult<()> {
        let fixed = &self.fixed;
        let non_negative = [
            ("tax_representation", fixed.tax_representation),
            ("bank_confirmation", fixed.bank_confirmation),
            ("silver_overage_base_monthly", fixed.silver_overage_base_monthly),
            ("silver_overage_rate", fixed.silver_overage_rate),
            ("gold_base_annual", fixed.gold_base_annual),
            ("platinum_base_annual", fixed.platinum_base_annual),
            ("secondary_base_fee", fixed.secondary_base_fee),
            ("secondary_entry_rate", fixed.secondary_entry_rate),
            ("gold_upgrade_threshold", self.policy.gold_upgrade_threshold),
            ("silver_upgrade_threshold", self.policy.silver_upgrade_threshold),
            ("platinum_display_turnover", self.policy.platinum_display_turnover),
        ];
        if let Some((field, value)) = non_negative.iter().find(|(_, v)| *v < Decimal::ZERO) {
            return Err(PricingError::InvalidSchedule(format!(
                "{field} must be non-negative, got {value}"
            )));
        }

        for record in self.bronze_bundles.records() {
            let b = &record.payload;
            if b.accounting < Decimal::ZERO || b.audit < Decimal::ZERO || b.tax < Decimal::ZERO {
                return Err(PricingError::InvalidSchedule(format!(
                    "bronze bundle up to {} has a negative component",
                    record.up_to
                )));
            }
        }

        if !self.bronze_bundles.is_non_decreasing_by(BronzeBundle::total) {
            return Err(PricingError::InvalidSchedule(
                "bronze bundle totals must not decrease as turnover rises".into(),
            ));
        }
        if !self.secondary_audit.is_non_decreasing_by(|fee| *fee) {
            return Err(PricingError::InvalidSchedule(
                "secondary audit fees must not decrease as turnover rises".into(),
            ));
        }
        if !self.silver_monthly.is_non_decreasing_by(|fee| *fee) {
            return Err(PricingError::InvalidSchedule(
                "silver monthly fees must not decrease as entries rise".into(),
            ));
        }

        // The flat Silver tiers must hand over to the overage formula with
        // no gap: the top tier ends at the overage threshold at the same fee.
        let top = self.silver_monthly.top();
        if top.up_to != Decimal::from(fixed.silver_overage_threshold) {
            return Err(PricingError::InvalidSchedule(format!(
                "silver table tops out at {} entries but overage starts at {}",
                top.up_to, fixed.silver_overage_threshold
            )));
        }
        if top.payload != fixed.silver_overage_base_monthly {
            return Err(PricingError::InvalidSchedule(format!(
                "silver top tier fee {} differs from the overage base fee {}",
                top.payload, fixed.silver_overage_base_monthly
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_schedule_is_valid() {
        let s = FeeSchedules::standard().unwrap();
        assert_eq!(s.currency, "HKD");
        assert_eq!(s.bronze_bundles.top_threshold(), dec!(30_000_000));
        assert_eq!(s.secondary_audit.top().payload, dec!(90_000));
        assert_eq!(s.fixed.bronze_entry_cap, 1_200);
    }

    #[test]
    fn test_bronze_bundle_total() {
        let s = FeeSchedules::standard().unwrap();
        let bundle = s.bronze_bundles.lookup(dec!(500_000)).unwrap();
        assert_eq!(bundle.total(), dec!(12_800));
        let bundle = s.bronze_bundles.lookup(dec!(25_000_000)).unwrap();
        assert_eq!(bundle.total(), dec!(82_600));
    }

    #[test]
    fn test_json_round_trip_preserves_schedule() {
        let s = FeeSchedules::standard().unwrap();
        let json = serde_json::to_string(&s).unwrap();
        let back = FeeSchedules::from_json_str(&json).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn test_missing_secondary_flag_defaults_on() {
        let s = FeeSchedules::standard().unwrap();
        let mut value = serde_json::to_value(&s).unwrap();
        value.as_object_mut().unwrap().remove("bronze_secondary_enabled");
        let back = FeeSchedules::from_json_str(&value.to_string()).unwrap();
        assert!(back.bronze_secondary_enabled);
    }

    #[test]
    fn test_negative_fixed_fee_rejected() {
        let mut s = FeeSchedules::standard().unwrap();
        s.fixed.bank_confirmation = dec!(-1);
        let err = s.validate().unwrap_err();
        assert!(err.to_string().contains("bank_confirmation"));
    }

    #[test]
    fn test_silver_gap_at_overage_rejected() {
        let mut s = FeeSchedules::standard().unwrap();
        s.fixed.silver_overage_base_monthly = dec!(11_000);
        assert!(matches!(s.validate(), Err(PricingError::InvalidSchedule(_))));

        let mut s = FeeSchedules::standard().unwrap();
        s.fixed.silver_overage_threshold = 30_000;
        assert!(matches!(s.validate(), Err(PricingError::InvalidSchedule(_))));
    }

    #[test]
    fn test_decreasing_audit_rejected() {
        let mut s = FeeSchedules::standard().unwrap();
        s.secondary_audit = TierTable::new(
            "secondary_audit",
            vec![
                TierRecord::new(dec!(1_000), dec!(500)),
                TierRecord::new(dec!(2_000), dec!(400)),
            ],
        )
        .unwrap();
        assert!(s.validate().is_err());
    }
}
