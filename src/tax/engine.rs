//! Lot-matching gain/loss engine
//!
//! Processes a transaction batch in chronological order, maintaining a pool
//! of open lots per asset. Sales draw against open lots in the order chosen
//! by the cost-basis method, realized gains are classified by holding
//! period, and jurisdiction rules turn the gain totals into tax owed.

use chrono::{Duration, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::jurisdiction::Jurisdiction;
use super::method::CostBasisMethod;
use crate::model::{Transaction, TransactionKind};

/// Holding periods beyond this many days classify as long-term (strict)
const LONG_TERM_DAYS: i64 = 365;

/// An open position created by a buy and consumed by later sells
#[derive(Debug, Clone)]
pub(crate) struct Lot {
    pub(crate) asset: String,
    /// Quantity still available for matching; zero once fully consumed
    pub(crate) remaining: Decimal,
    /// Quantity at acquisition time; basis for fee proration
    pub(crate) original_quantity: Decimal,
    pub(crate) unit_cost: Decimal,
    pub(crate) acquired_at: NaiveDateTime,
    pub(crate) acquisition_fee: Decimal,
}

impl Lot {
    fn open(tx: &Transaction) -> Self {
        Self {
            asset: tx.asset.clone(),
            remaining: tx.quantity,
            original_quantity: tx.quantity,
            unit_cost: tx.unit_price,
            acquired_at: tx.timestamp,
            acquisition_fee: tx.fee,
        }
    }
}

/// Holding-period classification of a realized gain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Term {
    ShortTerm,
    LongTerm,
}

/// One lot consumption by a sale; the audit trail of the matching loop
#[derive(Debug, Clone, Serialize)]
pub struct Disposal {
    pub asset: String,
    pub sold_at: NaiveDateTime,
    pub acquired_at: NaiveDateTime,
    pub quantity: Decimal,
    pub proceeds: Decimal,
    pub cost_basis: Decimal,
    pub gain: Decimal,
    pub term: Term,
}

/// Computed gains and tax for one transaction batch
///
/// `real_earnings` and `inflation_adjusted_return_pct` stay zero until the
/// real-earnings adjustment runs.
#[derive(Debug, Clone, Serialize)]
pub struct TaxReport {
    pub short_term_gain: Decimal,
    pub long_term_gain: Decimal,
    pub total_tax: Decimal,
    pub real_earnings: Decimal,
    pub inflation_adjusted_return_pct: Decimal,
    pub disposals: Vec<Disposal>,
    /// Sell quantity per asset that found no open lot to match
    pub uncovered: BTreeMap<String, Decimal>,
}

impl TaxReport {
    pub fn total_gains(&self) -> Decimal {
        self.short_term_gain + self.long_term_gain
    }

    pub fn has_uncovered_sells(&self) -> bool {
        !self.uncovered.is_empty()
    }
}

/// Compute realized gains and tax owed for a batch of transactions.
///
/// Transactions are processed in ascending timestamp order (stable for
/// ties). Buys open lots, transfers are ignored, and sells consume open
/// lots of the same asset in the order given by `method`. Selling more
/// than is held is not an error: the excess is left unmatched and recorded
/// in the report's `uncovered` map.
pub fn compute(
    transactions: &[Transaction],
    jurisdiction: Jurisdiction,
    method: CostBasisMethod,
) -> TaxReport {
    let rules = jurisdiction.rules();

    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by_key(|tx| tx.timestamp);

    let mut pool: Vec<Lot> = Vec::new();
    let mut short_term_gain = Decimal::ZERO;
    let mut long_term_gain = Decimal::ZERO;
    let mut disposals = Vec::new();
    let mut uncovered: BTreeMap<String, Decimal> = BTreeMap::new();

    for tx in sorted {
        match tx.kind {
            TransactionKind::Buy => {
                debug!(asset = %tx.asset, quantity = %tx.quantity, price = %tx.unit_price,
                    "opening lot");
                pool.push(Lot::open(tx));
            }
            TransactionKind::Transfer => {
                // No position or gain effect
            }
            TransactionKind::Sell => {
                let mut remaining = tx.quantity;

                let mut candidates: Vec<usize> = pool
                    .iter()
                    .enumerate()
                    .filter(|(_, lot)| lot.asset == tx.asset && lot.remaining > Decimal::ZERO)
                    .map(|(i, _)| i)
                    .collect();
                method.order_lots(&mut candidates, &pool);

                for i in candidates {
                    if remaining <= Decimal::ZERO {
                        break;
                    }
                    let lot = &mut pool[i];
                    let quantity = remaining.min(lot.remaining);

                    // Fees prorate over the lot's original quantity (buy
                    // side) and the sell transaction's total quantity
                    // (sell side). Multiply before dividing to keep the
                    // decimals exact.
                    let cost_basis = lot.unit_cost * quantity
                        + lot.acquisition_fee * quantity / lot.original_quantity;
                    let proceeds =
                        tx.unit_price * quantity - tx.fee * quantity / tx.quantity;
                    let gain = proceeds - cost_basis;

                    // Strictly more than 365 days qualifies as long-term
                    let term = if tx.timestamp - lot.acquired_at > Duration::days(LONG_TERM_DAYS)
                    {
                        Term::LongTerm
                    } else {
                        Term::ShortTerm
                    };
                    match term {
                        Term::ShortTerm => short_term_gain += gain,
                        Term::LongTerm => long_term_gain += gain,
                    }

                    debug!(asset = %tx.asset, quantity = %quantity, gain = %gain, ?term,
                        "matched lot");
                    disposals.push(Disposal {
                        asset: tx.asset.clone(),
                        sold_at: tx.timestamp,
                        acquired_at: lot.acquired_at,
                        quantity,
                        proceeds,
                        cost_basis,
                        gain,
                        term,
                    });

                    lot.remaining -= quantity;
                    remaining -= quantity;
                }

                if remaining > Decimal::ZERO {
                    warn!(asset = %tx.asset, quantity = %remaining,
                        "sell exceeds open lots; excess quantity left unmatched");
                    *uncovered.entry(tx.asset.clone()).or_insert(Decimal::ZERO) += remaining;
                }
            }
        }
    }

    let total_gains = short_term_gain + long_term_gain;
    let taxable_excess = (total_gains - rules.allowance).max(Decimal::ZERO);

    let mut total_tax = Decimal::ZERO;
    if taxable_excess > Decimal::ZERO {
        // A loss bucket contributes zero; losses are not netted across
        // buckets or carried forward
        total_tax = short_term_gain.max(Decimal::ZERO) * rules.short_term_rate
            + long_term_gain.max(Decimal::ZERO) * rules.long_term_rate;

        if let Some(withholding_rate) = rules.withholding_rate {
            total_tax += total_gains * withholding_rate;
        }
        if let Some(surcharge_rate) = rules.surcharge_rate {
            total_tax += total_tax * surcharge_rate;
        }
    }

    TaxReport {
        short_term_gain,
        long_term_gain,
        total_tax,
        real_earnings: Decimal::ZERO,
        inflation_adjusted_return_pct: Decimal::ZERO,
        disposals,
        uncovered,
    }
}
