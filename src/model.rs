use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Transaction kind (buy, sell, or transfer between wallets)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionKind {
    Buy,
    Sell,
    /// Wallet-to-wallet move; accepted in imports but has no tax effect
    Transfer,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Buy => "buy",
            TransactionKind::Sell => "sell",
            TransactionKind::Transfer => "transfer",
        }
    }
}

impl FromStr for TransactionKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" => Ok(TransactionKind::Buy),
            "sell" => Ok(TransactionKind::Sell),
            "transfer" => Ok(TransactionKind::Transfer),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single trade record in the reporting currency
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub timestamp: NaiveDateTime,
    /// Ticker symbol, uppercased at import time
    pub asset: String,
    pub kind: TransactionKind,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub fee: Decimal,
    /// Venue label, informational only
    pub exchange: String,
}

impl Transaction {
    pub fn new(
        timestamp: NaiveDateTime,
        asset: impl Into<String>,
        kind: TransactionKind,
        quantity: Decimal,
        unit_price: Decimal,
        fee: Decimal,
        exchange: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            asset: asset.into().to_uppercase(),
            kind,
            quantity,
            unit_price,
            fee,
            exchange: exchange.into(),
        }
    }
}
