//! Package recommendation as an ordered rule chain.
//!
//! Rules are evaluated top to bottom and the first whose predicate holds
//! decides the outcome. The order lives in [`RULES`] and nowhere else.
//! Platinum is never chosen here; it is only surfaced through
//! [`platinum_upsell`].

use rust_decimal::Decimal;
use serde::Serialize;

use crate::packages::platinum::PlatinumQuote;
use crate::schedule::RecommendationPolicy;
use crate::types::{Money, PackageTier};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationRule {
    GoldCheaperThanSilver,
    GoldVipUpgrade,
    SilverCheaperThanBronze,
    SilverValueUpgrade,
    BronzeBestPrice,
    SilverFallback,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub package: PackageTier,
    pub rule: RecommendationRule,
    pub reason: String,
    pub upsell_points: Vec<String>,
    /// Price of the cheaper alternative, for strategic upgrades.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caveat: Option<String>,
    /// How much the client saves against the package passed over.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings: Option<Money>,
}

/// Everything the rules look at.
#[derive(Debug, Clone, Copy)]
pub struct DecisionContext<'a> {
    pub annual_entries: u64,
    /// Governing Bronze total; `None` when Bronze cannot be offered.
    pub bronze_total: Option<Money>,
    pub silver_total: Money,
    pub gold_total: Money,
    pub currency: &'a str,
    pub policy: &'a RecommendationPolicy,
}

impl DecisionContext<'_> {
    fn amount(&self, value: Money) -> String {
        format!("{} {}", self.currency, value.normalize())
    }

    fn bronze_gap(&self) -> Option<Money> {
        self.bronze_total.map(|bronze| self.silver_total - bronze)
    }
}

struct Rule {
    id: RecommendationRule,
    applies: fn(&DecisionContext<'_>) -> bool,
    decide: fn(&DecisionContext<'_>) -> Recommendation,
}

// ---------------------------------------------------------------------------
// Rule chain
// ---------------------------------------------------------------------------

static RULES: [Rule; 6] = [
    Rule {
        id: RecommendationRule::GoldCheaperThanSilver,
        applies: |ctx| ctx.gold_total < ctx.silver_total,
        decide: gold_cheaper,
    },
    Rule {
        id: RecommendationRule::GoldVipUpgrade,
        applies: |ctx| ctx.gold_total - ctx.silver_total <= ctx.policy.gold_upgrade_threshold,
        decide: gold_vip_upgrade,
    },
    Rule {
        id: RecommendationRule::SilverCheaperThanBronze,
        applies: |ctx| matches!(ctx.bronze_gap(), Some(gap) if gap < Decimal::ZERO),
        decide: silver_cheaper,
    },
    Rule {
        id: RecommendationRule::SilverValueUpgrade,
        applies: |ctx| {
            matches!(ctx.bronze_gap(), Some(gap) if gap <= ctx.policy.silver_upgrade_threshold)
        },
        decide: silver_value_upgrade,
    },
    Rule {
        id: RecommendationRule::BronzeBestPrice,
        applies: |ctx| ctx.bronze_total.is_some(),
        decide: bronze_best_price,
    },
    Rule {
        id: RecommendationRule::SilverFallback,
        applies: |_| true,
        decide: silver_fallback,
    },
];

/// Rule ids in evaluation order.
pub fn rule_order() -> impl Iterator<Item = RecommendationRule> {
    RULES.iter().map(|rule| rule.id)
}

impl RecommendationRule {
    /// Whether this rule's predicate holds, regardless of earlier rules.
    pub fn matches(self, ctx: &DecisionContext<'_>) -> bool {
        RULES
            .iter()
            .find(|rule| rule.id == self)
            .is_some_and(|rule| (rule.applies)(ctx))
    }
}

/// Run the chain and return the first matching rule's recommendation.
pub fn recommend(ctx: &DecisionContext<'_>) -> Recommendation {
    let recommendation = RULES
        .iter()
        .find(|rule| (rule.applies)(ctx))
        .map(|rule| (rule.decide)(ctx))
        .unwrap_or_else(|| silver_fallback(ctx));

    tracing::debug!(
        rule = ?recommendation.rule,
        package = %recommendation.package,
        "recommendation decided"
    );
    recommendation
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

fn gold_cheaper(ctx: &DecisionContext<'_>) -> Recommendation {
    let savings = ctx.silver_total - ctx.gold_total;
    Recommendation {
        package: PackageTier::Gold,
        rule: RecommendationRule::GoldCheaperThanSilver,
        reason: format!(
            "Gold is {} cheaper than Silver: at {} entries a year Silver's volume surcharges outweigh Gold's fixed fee.",
            ctx.amount(savings),
            ctx.annual_entries
        ),
        upsell_points: Vec::new(),
        caveat: None,
        savings: Some(savings),
    }
}

fn gold_vip_upgrade(ctx: &DecisionContext<'_>) -> Recommendation {
    let premium = ctx.gold_total - ctx.silver_total;
    Recommendation {
        package: PackageTier::Gold,
        rule: RecommendationRule::GoldVipUpgrade,
        reason: format!(
            "VIP upgrade: Gold costs only {} more than Silver.",
            ctx.amount(premium)
        ),
        upsell_points: vec![
            "Tax optimisation planning with a senior tax adviser".into(),
            "Quarterly management forecasts and cash-flow projections".into(),
            "Senior accountant oversight on every filing".into(),
            "Priority turnaround on queries and deadlines".into(),
        ],
        caveat: Some(format!(
            "Silver is available at {} if the client prefers the lower fee.",
            ctx.amount(ctx.silver_total)
        )),
        savings: None,
    }
}

fn silver_cheaper(ctx: &DecisionContext<'_>) -> Recommendation {
    let savings = ctx.bronze_total.unwrap_or(ctx.silver_total) - ctx.silver_total;
    Recommendation {
        package: PackageTier::Silver,
        rule: RecommendationRule::SilverCheaperThanBronze,
        reason: format!(
            "Silver is {} cheaper than Bronze: with only {} entries a year the accounting fee stays small, and the client gets monthly reporting.",
            ctx.amount(savings),
            ctx.annual_entries
        ),
        upsell_points: Vec::new(),
        caveat: None,
        savings: Some(savings),
    }
}

fn silver_value_upgrade(ctx: &DecisionContext<'_>) -> Recommendation {
    let bronze = ctx.bronze_total.unwrap_or(ctx.silver_total);
    Recommendation {
        package: PackageTier::Silver,
        rule: RecommendationRule::SilverValueUpgrade,
        reason: format!(
            "Value upgrade: Silver costs only {} more than Bronze.",
            ctx.amount(ctx.silver_total - bronze)
        ),
        upsell_points: vec![
            "Professional liability protection on prepared accounts".into(),
            "A dedicated bookkeeper who knows the business".into(),
            "Priority scheduling ahead of Bronze clients".into(),
            "Monthly management reports instead of a single year-end set".into(),
        ],
        caveat: Some(format!(
            "Bronze is available at {} if the client prefers the lower fee.",
            ctx.amount(bronze)
        )),
        savings: None,
    }
}

fn bronze_best_price(_ctx: &DecisionContext<'_>) -> Recommendation {
    Recommendation {
        package: PackageTier::Bronze,
        rule: RecommendationRule::BronzeBestPrice,
        reason: "The client fits within the Bronze limits and Bronze is the best price.".into(),
        upsell_points: Vec::new(),
        caveat: None,
        savings: None,
    }
}

fn silver_fallback(_ctx: &DecisionContext<'_>) -> Recommendation {
    Recommendation {
        package: PackageTier::Silver,
        rule: RecommendationRule::SilverFallback,
        reason: "Bronze cannot be offered to this client, so Silver is required.".into(),
        upsell_points: Vec::new(),
        caveat: None,
        savings: None,
    }
}

/// Informational Platinum note for high-turnover clients.
pub fn platinum_upsell(platinum: &PlatinumQuote, currency: &str) -> Option<String> {
    platinum.featured.then(|| {
        format!(
            "Platinum is worth raising with this client: full CFO-level service from {} {} a year.",
            currency,
            platinum.breakdown.total().normalize()
        )
    })
}
