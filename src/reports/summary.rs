//! Terminal and JSON rendering of tax reports
//!
//! Formatting only: every figure is already computed by the tax engine and
//! the real-earnings adjuster. The ratios shown alongside the summary are
//! display derivations of those figures and fall back to zero when total
//! gains are zero.

use anyhow::Result;
use colored::Colorize;
use rust_decimal::Decimal;
use tabled::{settings::Style, Table, Tabled};

use crate::tax::{Jurisdiction, TaxReport, Term};
use crate::utils::{format_currency, format_pct};

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

#[derive(Tabled)]
struct DisposalRow {
    #[tabled(rename = "Asset")]
    asset: String,
    #[tabled(rename = "Sold")]
    sold: String,
    #[tabled(rename = "Acquired")]
    acquired: String,
    #[tabled(rename = "Quantity")]
    quantity: String,
    #[tabled(rename = "Proceeds")]
    proceeds: String,
    #[tabled(rename = "Cost Basis")]
    cost_basis: String,
    #[tabled(rename = "Gain")]
    gain: String,
    #[tabled(rename = "Term")]
    term: String,
}

/// Color a currency amount by its sign
fn signed_amount(value: Decimal) -> String {
    let text = format_currency(value);
    if value < Decimal::ZERO {
        text.red().to_string()
    } else {
        text.green().to_string()
    }
}

/// Render the headline summary table: gains, tax, real earnings.
pub fn render_summary(report: &TaxReport, jurisdiction: Jurisdiction) -> String {
    let rows = vec![
        SummaryRow {
            metric: "Short-term gains".to_string(),
            amount: signed_amount(report.short_term_gain),
        },
        SummaryRow {
            metric: "Long-term gains".to_string(),
            amount: signed_amount(report.long_term_gain),
        },
        SummaryRow {
            metric: format!("Tax owed ({})", jurisdiction.rules().name),
            amount: format_currency(report.total_tax).yellow().to_string(),
        },
        SummaryRow {
            metric: "Real earnings (after inflation)".to_string(),
            amount: if report.real_earnings < Decimal::ZERO {
                format_currency(report.real_earnings).red().to_string()
            } else {
                format_currency(report.real_earnings).blue().to_string()
            },
        },
    ];

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Render the derived return/tax ratio lines.
pub fn render_ratios(report: &TaxReport) -> String {
    let total_gains = report.total_gains();
    let (effective_return_pct, effective_tax_rate_pct) = if total_gains.is_zero() {
        (Decimal::ZERO, Decimal::ZERO)
    } else {
        let net_profit = total_gains - report.total_tax;
        (
            net_profit / total_gains.abs() * Decimal::ONE_HUNDRED,
            report.total_tax / total_gains.abs() * Decimal::ONE_HUNDRED,
        )
    };

    format!(
        "  Effective return:          {}\n  Effective tax rate:        {}\n  Inflation-adjusted return: {}",
        format_pct(effective_return_pct),
        format_pct(effective_tax_rate_pct),
        format_pct(report.inflation_adjusted_return_pct),
    )
}

/// Render the per-lot disposal audit table; None when nothing was sold.
pub fn render_disposals(report: &TaxReport) -> Option<String> {
    if report.disposals.is_empty() {
        return None;
    }

    let rows: Vec<DisposalRow> = report
        .disposals
        .iter()
        .map(|d| DisposalRow {
            asset: d.asset.clone(),
            sold: d.sold_at.format("%Y-%m-%d").to_string(),
            acquired: d.acquired_at.format("%Y-%m-%d").to_string(),
            quantity: d.quantity.to_string(),
            proceeds: format_currency(d.proceeds),
            cost_basis: format_currency(d.cost_basis),
            gain: signed_amount(d.gain),
            term: match d.term {
                Term::ShortTerm => "short".to_string(),
                Term::LongTerm => "long".to_string(),
            },
        })
        .collect();

    Some(Table::new(rows).with(Style::rounded()).to_string())
}

/// Warning lines for sells that exceeded open lots; None when fully covered.
pub fn render_uncovered_warning(report: &TaxReport) -> Option<String> {
    if !report.has_uncovered_sells() {
        return None;
    }

    let mut lines = vec![format!(
        "{} Some sells exceeded your open positions and were not matched:",
        "⚠".yellow().bold()
    )];
    for (asset, quantity) in &report.uncovered {
        lines.push(format!("  {} {} without a matching buy", quantity, asset));
    }
    lines.push("  Check the upload for missing purchase history.".to_string());
    Some(lines.join("\n"))
}

/// Cautionary note shown when inflation ate the entire net profit.
pub fn render_real_earnings_note(report: &TaxReport) -> Option<String> {
    if report.real_earnings >= Decimal::ZERO {
        return None;
    }
    Some(format!(
        "{} After tax and inflation, this activity lost purchasing power.",
        "ℹ".blue().bold()
    ))
}

/// Serialize the full report as pretty-printed JSON.
pub fn render_json(report: &TaxReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::BTreeMap;

    fn report(short: Decimal, long: Decimal, tax: Decimal) -> TaxReport {
        TaxReport {
            short_term_gain: short,
            long_term_gain: long,
            total_tax: tax,
            real_earnings: Decimal::ZERO,
            inflation_adjusted_return_pct: Decimal::ZERO,
            disposals: Vec::new(),
            uncovered: BTreeMap::new(),
        }
    }

    #[test]
    fn test_summary_contains_all_metrics() {
        colored::control::set_override(false);
        let text = render_summary(
            &report(dec!(100), dec!(6945), dec!(1041.75)),
            Jurisdiction::UnitedStates,
        );
        assert!(text.contains("Short-term gains"));
        assert!(text.contains("$6,945.00"));
        assert!(text.contains("United States"));
        assert!(text.contains("$1,041.75"));
    }

    #[test]
    fn test_ratios_zero_gains_render_zero() {
        let text = render_ratios(&report(dec!(500), dec!(-500), dec!(100)));
        assert!(text.contains("0.0%"));
    }

    #[test]
    fn test_ratios_for_positive_gains() {
        // 10000 gains, 1500 tax: return 85%, tax rate 15%
        let text = render_ratios(&report(dec!(10000), Decimal::ZERO, dec!(1500)));
        assert!(text.contains("85.0%"));
        assert!(text.contains("15.0%"));
    }

    #[test]
    fn test_disposals_none_when_empty() {
        assert!(render_disposals(&report(dec!(0), dec!(0), dec!(0))).is_none());
    }

    #[test]
    fn test_uncovered_warning_lists_assets() {
        colored::control::set_override(false);
        let mut r = report(dec!(100), dec!(0), dec!(0));
        r.uncovered.insert("BTC".to_string(), dec!(2));
        let text = render_uncovered_warning(&r).unwrap();
        assert!(text.contains("2 BTC"));
    }

    #[test]
    fn test_json_round_trips_decimals_as_strings() {
        let r = report(dec!(100.5), dec!(0), dec!(22.11));
        let json = render_json(&r).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["short_term_gain"], "100.5");
        assert_eq!(value["total_tax"], "22.11");
    }
}
