//! Ascending threshold tables for bracket-based fees.
//!
//! A [`TierTable`] is a list of `(up_to, payload)` records kept sorted by
//! `up_to`. A lookup scans from the lowest bracket and returns the first
//! record whose inclusive upper bound is at or above the query value. The
//! ordering is established once, in [`TierTable::new`], so the result never
//! depends on the order records were written in a config file.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::PricingError;
use crate::PricingResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One bracket of a tier table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierRecord<P> {
    /// Inclusive upper bound of the bracket.
    pub up_to: Decimal,
    pub payload: P,
}

impl<P> TierRecord<P> {
    pub fn new(up_to: Decimal, payload: P) -> Self {
        TierRecord { up_to, payload }
    }
}

/// Table as it appears in configuration, before ordering is enforced.
#[derive(Debug, Clone, Deserialize)]
struct RawTierTable<P> {
    name: String,
    records: Vec<TierRecord<P>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTierTable<P>")]
pub struct TierTable<P> {
    name: String,
    records: Vec<TierRecord<P>>,
}

/// Result of a clamping lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierMatch<'a, P> {
    pub payload: &'a P,
    /// True when the query was above every bound and the top bracket was used.
    pub clamped: bool,
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

impl<P> TierTable<P> {
    /// Build a table, sorting the records ascending by `up_to`.
    ///
    /// Rejects an empty table, negative bounds, and repeated bounds (two
    /// brackets ending at the same value would make the lookup ambiguous).
    pub fn new(name: impl Into<String>, mut records: Vec<TierRecord<P>>) -> PricingResult<Self> {
        let name = name.into();
        if records.is_empty() {
            return Err(PricingError::InvalidSchedule(format!(
                "tier table '{name}' has no records"
            )));
        }
        if let Some(r) = records.iter().find(|r| r.up_to < Decimal::ZERO) {
            return Err(PricingError::InvalidSchedule(format!(
                "tier table '{name}' has a negative bound {}",
                r.up_to
            )));
        }

        records.sort_by(|a, b| a.up_to.cmp(&b.up_to));

        if let Some(pair) = records.windows(2).find(|w| w[0].up_to == w[1].up_to) {
            return Err(PricingError::InvalidSchedule(format!(
                "tier table '{name}' repeats the bound {}",
                pair[0].up_to
            )));
        }

        Ok(TierTable { name, records })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Records in ascending bound order.
    pub fn records(&self) -> &[TierRecord<P>] {
        &self.records
    }

    /// Highest bracket. Construction guarantees at least one record.
    pub fn top(&self) -> &TierRecord<P> {
        &self.records[self.records.len() - 1]
    }

    pub fn top_threshold(&self) -> Decimal {
        self.top().up_to
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    fn find(&self, value: Decimal) -> Option<&TierRecord<P>> {
        self.records.iter().find(|r| value <= r.up_to)
    }

    /// Payload of the first bracket whose bound is `>= value`.
    ///
    /// Fails with [`PricingError::TierExhausted`] above the top bound.
    pub fn lookup(&self, value: Decimal) -> PricingResult<&P> {
        match self.find(value) {
            Some(record) => {
                tracing::trace!(table = %self.name, %value, up_to = %record.up_to, "tier hit");
                Ok(&record.payload)
            }
            None => Err(PricingError::TierExhausted {
                table: self.name.clone(),
                value,
                top_threshold: self.top_threshold(),
            }),
        }
    }

    /// Like [`lookup`](Self::lookup), but values above the top bound fall
    /// into the top bracket instead of failing.
    pub fn lookup_clamped(&self, value: Decimal) -> TierMatch<'_, P> {
        match self.find(value) {
            Some(record) => TierMatch {
                payload: &record.payload,
                clamped: false,
            },
            None => {
                tracing::trace!(table = %self.name, %value, "clamped to top tier");
                TierMatch {
                    payload: &self.top().payload,
                    clamped: true,
                }
            }
        }
    }

    /// True when `key(payload)` never decreases from one bracket to the next.
    pub fn is_non_decreasing_by(&self, key: impl Fn(&P) -> Decimal) -> bool {
        self.records
            .windows(2)
            .all(|w| key(&w[0].payload) <= key(&w[1].payload))
    }
}

impl<P> TryFrom<RawTierTable<P>> for TierTable<P> {
    type Error = PricingError;

    fn try_from(raw: RawTierTable<P>) -> Result<Self, Self::Error> {
        TierTable::new(raw.name, raw.records)
    }
}
