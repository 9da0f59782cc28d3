use package_pricing_core::packages::bronze::{
    price_bronze_secondary, price_bronze_standard, BronzeOutcome, StandardStatus,
};
use package_pricing_core::packages::{BronzeVariant, FeeComponent};
use package_pricing_core::quote::{evaluate_profile, evaluate_quote};
use package_pricing_core::recommendation::RecommendationRule;
use package_pricing_core::types::PackageTier;
use package_pricing_core::{ClientProfile, FeeSchedules, PricingError, QuoteInput, TransactionVolume};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn schedules() -> FeeSchedules {
    FeeSchedules::standard().unwrap()
}

fn standard_input(turnover: Decimal, monthly_sales: u64, monthly_expenses: u64) -> QuoteInput {
    QuoteInput {
        turnover,
        volume: TransactionVolume::Standard {
            monthly_sales,
            monthly_expenses,
        },
    }
}

fn profile(turnover: Decimal, entries: u64) -> ClientProfile {
    ClientProfile::new(turnover, entries).unwrap()
}

// ===========================================================================
// End-to-end scenarios: 10 sales + 20 expenses a month => 360 entries a year
// ===========================================================================

#[test]
fn test_small_client_gets_bronze() {
    let out = evaluate_quote(&schedules(), &standard_input(dec!(500_000), 10, 20)).unwrap();
    let quote = &out.result;

    assert_eq!(quote.profile.annual_entries(), 360);
    assert_eq!(quote.bronze.variant(), Some(BronzeVariant::Standard));
    assert_eq!(quote.bronze.total(), Some(dec!(13_300)));
    assert_eq!(quote.silver.component(FeeComponent::Accounting), dec!(18_000));
    assert_eq!(quote.silver.total(), dec!(27_100));

    assert_eq!(quote.recommendation.package, PackageTier::Bronze);
    assert_eq!(quote.recommendation.rule, RecommendationRule::BronzeBestPrice);
    assert!(quote.platinum_upsell.is_none());
}

#[test]
fn test_high_turnover_low_volume_gets_silver() {
    let out = evaluate_quote(&schedules(), &standard_input(dec!(25_000_000), 10, 20)).unwrap();
    let quote = &out.result;

    // Bronze-Standard is still priced for comparison.
    match &quote.bronze {
        BronzeOutcome::Available(r) => {
            assert_eq!(r.standard, StandardStatus::Eligible { total: dec!(83_100) });
            // The per-transaction variant undercuts it and governs Bronze.
            assert_eq!(r.variant, BronzeVariant::Secondary);
            assert_eq!(r.chosen.total(), dec!(65_100));
        }
        other => panic!("expected available bronze, got {other:?}"),
    }

    assert_eq!(quote.silver.component(FeeComponent::Audit), dec!(45_000));
    assert_eq!(quote.silver.component(FeeComponent::Accounting), dec!(18_000));
    assert_eq!(quote.silver.total(), dec!(66_100));

    // Silver is within 3,000 of the governing Bronze price.
    assert_eq!(quote.recommendation.package, PackageTier::Silver);
    assert_eq!(quote.recommendation.rule, RecommendationRule::SilverValueUpgrade);
    assert_eq!(quote.recommendation.upsell_points.len(), 4);
}

#[test]
fn test_high_turnover_without_secondary_bronze_silver_is_cheaper() {
    let mut s = schedules();
    s.bronze_secondary_enabled = false;
    let out = evaluate_quote(&s, &standard_input(dec!(25_000_000), 10, 20)).unwrap();
    let quote = &out.result;

    assert_eq!(quote.bronze.total(), Some(dec!(83_100)));
    assert_eq!(quote.recommendation.package, PackageTier::Silver);
    assert_eq!(quote.recommendation.rule, RecommendationRule::SilverCheaperThanBronze);
    assert_eq!(quote.recommendation.savings, Some(dec!(17_000)));
}

#[test]
fn test_overage_client_gets_gold() {
    let p = profile(dec!(5_000_000), 30_000);
    let quote = evaluate_profile(&schedules(), &p).unwrap();

    assert_eq!(quote.silver.component(FeeComponent::Accounting), dec!(150_000));
    assert_eq!(quote.silver.total(), dec!(167_100));
    assert_eq!(quote.gold.total(), dec!(109_100));

    assert_eq!(quote.recommendation.package, PackageTier::Gold);
    assert_eq!(quote.recommendation.rule, RecommendationRule::GoldCheaperThanSilver);
    assert_eq!(quote.recommendation.savings, Some(dec!(58_000)));
}

#[test]
fn test_gold_priority_over_silver_cheaper_than_bronze() {
    // Silver undercuts the per-transaction Bronze here too, but Gold wins first.
    let p = profile(dec!(5_000_000), 30_000);
    let quote = evaluate_profile(&schedules(), &p).unwrap();
    let bronze = quote.bronze.total().unwrap();
    assert!(quote.silver.total() < bronze);
    assert!(quote.gold.total() < quote.silver.total());
    assert_eq!(quote.recommendation.rule, RecommendationRule::GoldCheaperThanSilver);
}

#[test]
fn test_capped_client_falls_back_to_secondary_bronze() {
    let s = schedules();
    let p = profile(dec!(500_000), 1_500);

    let err = price_bronze_standard(&s, &p).unwrap_err();
    assert!(matches!(err, PricingError::EntryCapExceeded { entries: 1_500, cap: 1_200 }));

    let secondary = price_bronze_secondary(&s, &p);
    assert_eq!(secondary.component(FeeComponent::Accounting), dec!(45_500));
    assert_eq!(secondary.total(), dec!(45_500) + dec!(6_000) + dec!(2_600) + dec!(500));

    let quote = evaluate_profile(&s, &p).unwrap();
    assert_eq!(quote.bronze.variant(), Some(BronzeVariant::Secondary));
    assert_eq!(quote.silver.total(), dec!(42_700));
    assert_eq!(quote.recommendation.rule, RecommendationRule::SilverCheaperThanBronze);
}

#[test]
fn test_mid_volume_client_gets_gold_vip_upgrade() {
    let p = profile(dec!(1_000_000), 14_400);
    let quote = evaluate_profile(&schedules(), &p).unwrap();

    assert_eq!(quote.silver.total(), dec!(94_600));
    assert_eq!(quote.gold.total(), dec!(102_600));
    assert_eq!(quote.recommendation.package, PackageTier::Gold);
    assert_eq!(quote.recommendation.rule, RecommendationRule::GoldVipUpgrade);
    assert!(quote
        .recommendation
        .caveat
        .as_deref()
        .unwrap()
        .contains("HKD 94600"));
}

#[test]
fn test_capped_client_without_secondary_falls_back_to_silver() {
    let mut s = schedules();
    s.bronze_secondary_enabled = false;
    let out = evaluate_quote(&s, &standard_input(dec!(500_000), 100, 25)).unwrap();

    assert!(!out.result.bronze.is_eligible());
    assert_eq!(out.result.recommendation.rule, RecommendationRule::SilverFallback);
    assert!(out
        .warnings
        .iter()
        .any(|w| w.contains("Bronze is not available")));
}

#[test]
fn test_consolidated_payout_model() {
    let input = QuoteInput {
        turnover: dec!(2_000_000),
        volume: TransactionVolume::ConsolidatedPayout {
            monthly_payouts: 4,
            monthly_expenses: 26,
        },
    };
    let out = evaluate_quote(&schedules(), &input).unwrap();
    assert_eq!(out.result.profile.annual_entries(), 360);
    // 7,200 + 10,000 + 2,600 + 500
    assert_eq!(out.result.bronze.total(), Some(dec!(20_300)));
}

#[test]
fn test_very_high_turnover_surfaces_platinum() {
    let out = evaluate_quote(&schedules(), &standard_input(dec!(80_000_000), 10, 20)).unwrap();
    let quote = &out.result;

    assert!(quote.platinum.featured);
    assert!(quote.platinum.starting_price);
    assert_eq!(quote.platinum.breakdown.total(), dec!(150_000) + dec!(90_000));
    assert_ne!(quote.recommendation.package, PackageTier::Platinum);
    assert!(quote.platinum_upsell.as_deref().unwrap().contains("HKD 240000"));
}

#[test]
fn test_turnover_above_every_table() {
    let out = evaluate_quote(&schedules(), &standard_input(dec!(500_000_000), 10, 20)).unwrap();
    let quote = &out.result;

    assert_eq!(quote.bronze.variant(), Some(BronzeVariant::Secondary));
    assert_eq!(quote.silver.component(FeeComponent::Audit), dec!(90_000));
    // Standard unavailable, secondary audit clamped, silver audit clamped.
    assert_eq!(out.warnings.len(), 3);
}

#[test]
fn test_zero_activity_client() {
    let quote = evaluate_profile(&schedules(), &profile(Decimal::ZERO, 0)).unwrap();
    assert_eq!(quote.bronze.total(), Some(dec!(13_300)));
    assert_eq!(quote.recommendation.package, PackageTier::Bronze);
}
