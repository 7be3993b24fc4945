//! Jurisdiction rules table
//!
//! Each supported jurisdiction maps to one static rules record. Adding a
//! jurisdiction means adding one entry here, not new logic elsewhere.

use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// Supported tax jurisdictions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Jurisdiction {
    /// India - flat 30% plus 1% TDS and 4% cess
    India,
    /// United States - 22% short-term / 15% long-term
    UnitedStates,
    /// United Kingdom - 20% with a tax-free allowance
    UnitedKingdom,
}

/// Tax rules for a jurisdiction
#[derive(Debug, Clone)]
pub struct JurisdictionRules {
    /// Rate applied to positive short-term gains
    pub short_term_rate: Decimal,
    /// Rate applied to positive long-term gains
    pub long_term_rate: Decimal,
    /// Tax-free threshold on net total gains; gates whether any tax applies
    pub allowance: Decimal,
    /// Flat levy on total net gains (e.g. Indian TDS)
    pub withholding_rate: Option<Decimal>,
    /// Proportional levy on the computed tax amount (e.g. Indian cess)
    pub surcharge_rate: Option<Decimal>,
    /// Flat one-period inflation assumption for real-earnings adjustment
    pub inflation_rate: Decimal,
    pub name: &'static str,
}

static RULES: Lazy<HashMap<Jurisdiction, JurisdictionRules>> = Lazy::new(|| {
    let mut rules = HashMap::new();
    rules.insert(
        Jurisdiction::India,
        JurisdictionRules {
            short_term_rate: Decimal::new(30, 2),
            long_term_rate: Decimal::new(30, 2),
            allowance: Decimal::ZERO,
            withholding_rate: Some(Decimal::new(1, 2)),
            surcharge_rate: Some(Decimal::new(4, 2)),
            inflation_rate: Decimal::new(5, 2),
            name: "India",
        },
    );
    rules.insert(
        Jurisdiction::UnitedStates,
        JurisdictionRules {
            // Average short-term rate; actual brackets vary
            short_term_rate: Decimal::new(22, 2),
            long_term_rate: Decimal::new(15, 2),
            allowance: Decimal::ZERO,
            withholding_rate: None,
            surcharge_rate: None,
            inflation_rate: Decimal::new(3, 2),
            name: "United States",
        },
    );
    rules.insert(
        Jurisdiction::UnitedKingdom,
        JurisdictionRules {
            short_term_rate: Decimal::new(20, 2),
            long_term_rate: Decimal::new(20, 2),
            allowance: Decimal::from(6000),
            withholding_rate: None,
            surcharge_rate: None,
            inflation_rate: Decimal::new(28, 3),
            name: "United Kingdom",
        },
    );
    rules
});

impl Jurisdiction {
    /// All supported jurisdictions, in display order
    pub const ALL: [Jurisdiction; 3] = [
        Jurisdiction::India,
        Jurisdiction::UnitedStates,
        Jurisdiction::UnitedKingdom,
    ];

    /// Look up the static rules record for this jurisdiction
    pub fn rules(&self) -> &'static JurisdictionRules {
        &RULES[self]
    }

    /// Two-letter country code used on the CLI and in reports
    pub fn code(&self) -> &'static str {
        match self {
            Jurisdiction::India => "IN",
            Jurisdiction::UnitedStates => "US",
            Jurisdiction::UnitedKingdom => "UK",
        }
    }
}

impl FromStr for Jurisdiction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "IN" | "INDIA" => Ok(Jurisdiction::India),
            "US" | "USA" => Ok(Jurisdiction::UnitedStates),
            "UK" | "GB" => Ok(Jurisdiction::UnitedKingdom),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for Jurisdiction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.rules().name)
    }
}
