use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PricingError;
use crate::types::{Money, MONTHS_PER_YEAR};
use crate::PricingResult;

/// Monthly transaction volume as collected from the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "business_model", rename_all = "snake_case")]
pub enum TransactionVolume {
    /// Entries come from individual sales invoices and expense items.
    Standard {
        monthly_sales: u64,
        monthly_expenses: u64,
    },
    /// Sales are settled through a platform that pays out in batches.
    ConsolidatedPayout {
        monthly_payouts: u64,
        monthly_expenses: u64,
    },
    /// Annual entry count already known.
    Annual { annual_entries: u64 },
}

impl TransactionVolume {
    pub fn annual_entries(&self) -> PricingResult<u64> {
        let monthly = match *self {
            TransactionVolume::Standard {
                monthly_sales,
                monthly_expenses,
            } => monthly_sales.checked_add(monthly_expenses),
            TransactionVolume::ConsolidatedPayout {
                monthly_payouts,
                monthly_expenses,
            } => monthly_payouts.checked_add(monthly_expenses),
            TransactionVolume::Annual { annual_entries } => return Ok(annual_entries),
        };
        monthly
            .and_then(|m| m.checked_mul(MONTHS_PER_YEAR))
            .ok_or_else(|| PricingError::InvalidInput {
                field: "volume".into(),
                reason: "Monthly transaction counts are too large".into(),
            })
    }
}

/// Request accepted by [`crate::quote::evaluate_quote`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteInput {
    /// Projected annual turnover.
    pub turnover: Money,
    pub volume: TransactionVolume,
}

/// Validated client figures every calculator prices from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClientProfile {
    turnover: Money,
    annual_entries: u64,
}

impl ClientProfile {
    pub fn new(turnover: Money, annual_entries: u64) -> PricingResult<Self> {
        if turnover < Decimal::ZERO {
            return Err(PricingError::InvalidInput {
                field: "turnover".into(),
                reason: "Turnover must be non-negative".into(),
            });
        }
        Ok(ClientProfile {
            turnover,
            annual_entries,
        })
    }

    pub fn from_input(input: &QuoteInput) -> PricingResult<Self> {
        ClientProfile::new(input.turnover, input.volume.annual_entries()?)
    }

    pub fn turnover(&self) -> Money {
        self.turnover
    }

    pub fn annual_entries(&self) -> u64 {
        self.annual_entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_standard_model_annualises_sales_and_expenses() {
        let v = TransactionVolume::Standard {
            monthly_sales: 10,
            monthly_expenses: 20,
        };
        assert_eq!(v.annual_entries().unwrap(), 360);
    }

    #[test]
    fn test_payout_model_annualises_payouts_and_expenses() {
        let v = TransactionVolume::ConsolidatedPayout {
            monthly_payouts: 4,
            monthly_expenses: 46,
        };
        assert_eq!(v.annual_entries().unwrap(), 600);
    }

    #[test]
    fn test_annual_passthrough() {
        let v = TransactionVolume::Annual {
            annual_entries: 1_500,
        };
        assert_eq!(v.annual_entries().unwrap(), 1_500);
    }

    #[test]
    fn test_overflowing_volume_rejected() {
        let v = TransactionVolume::Standard {
            monthly_sales: u64::MAX,
            monthly_expenses: 1,
        };
        assert!(matches!(
            v.annual_entries(),
            Err(PricingError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_negative_turnover_rejected() {
        let err = ClientProfile::new(dec!(-0.01), 10).unwrap_err();
        match err {
            PricingError::InvalidInput { field, .. } => assert_eq!(field, "turnover"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_zero_profile_is_valid() {
        let p = ClientProfile::new(Decimal::ZERO, 0).unwrap();
        assert_eq!(p.turnover(), Decimal::ZERO);
        assert_eq!(p.annual_entries(), 0);
    }

    #[test]
    fn test_quote_input_from_json() {
        let json = r#"{
            "turnover": "500000",
            "volume": { "business_model": "standard", "monthly_sales": 10, "monthly_expenses": 20 }
        }"#;
        let input: QuoteInput = serde_json::from_str(json).unwrap();
        let profile = ClientProfile::from_input(&input).unwrap();
        assert_eq!(profile.turnover(), dec!(500000));
        assert_eq!(profile.annual_entries(), 360);
    }
}
