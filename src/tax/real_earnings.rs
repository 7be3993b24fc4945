//! Inflation adjustment of after-tax profit
//!
//! Applies a flat one-period inflation assumption per jurisdiction to the
//! net profit from a tax report. Pure function of its inputs; the only
//! degenerate case (zero total gains) short-circuits to a defined zero
//! instead of dividing.

use rust_decimal::Decimal;

use super::engine::TaxReport;
use super::jurisdiction::Jurisdiction;

/// Inflation-adjusted outcome derived from a tax report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RealEarnings {
    /// Net after-tax profit minus the assumed inflation erosion
    pub real_earnings: Decimal,
    /// Real earnings as a percentage of absolute total gains
    pub inflation_adjusted_return_pct: Decimal,
}

/// Derive real earnings from computed gains and tax.
pub fn adjust(report: &TaxReport, jurisdiction: Jurisdiction) -> RealEarnings {
    let inflation_rate = jurisdiction.rules().inflation_rate;
    let total_gains = report.total_gains();
    let net_profit = total_gains - report.total_tax;

    let inflation_impact = total_gains.abs() * inflation_rate;
    let real_earnings = net_profit - inflation_impact;

    let inflation_adjusted_return_pct = if total_gains.is_zero() {
        Decimal::ZERO
    } else {
        real_earnings / total_gains.abs() * Decimal::ONE_HUNDRED
    };

    RealEarnings {
        real_earnings,
        inflation_adjusted_return_pct,
    }
}

/// Merge the adjustment back into the report.
pub fn apply(report: &mut TaxReport, jurisdiction: Jurisdiction) {
    let adjusted = adjust(report, jurisdiction);
    report.real_earnings = adjusted.real_earnings;
    report.inflation_adjusted_return_pct = adjusted.inflation_adjusted_return_pct;
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
    fn test_us_inflation_erodes_net_profit() {
        // 10000 gains, 1500 tax: net 8500, inflation 10000*0.03 = 300
        let r = report(dec!(4000), dec!(6000), dec!(1500));
        let adjusted = adjust(&r, Jurisdiction::UnitedStates);
        assert_eq!(adjusted.real_earnings, dec!(8200));
        assert_eq!(adjusted.inflation_adjusted_return_pct, dec!(82));
    }

    #[test]
    fn test_zero_gains_short_circuits_percentage() {
        // Tax can be nonzero in principle; the percentage must still be 0
        let r = report(dec!(500), dec!(-500), dec!(100));
        let adjusted = adjust(&r, Jurisdiction::India);
        assert_eq!(adjusted.inflation_adjusted_return_pct, Decimal::ZERO);
        assert_eq!(adjusted.real_earnings, dec!(-100));
    }

    #[test]
    fn test_net_loss_uses_absolute_gains_for_impact() {
        // -2000 gains, no tax: net -2000, impact |−2000|*0.028 = 56
        let r = report(dec!(-2000), Decimal::ZERO, Decimal::ZERO);
        let adjusted = adjust(&r, Jurisdiction::UnitedKingdom);
        assert_eq!(adjusted.real_earnings, dec!(-2056));
        assert_eq!(adjusted.inflation_adjusted_return_pct, dec!(-102.8));
    }

    #[test]
    fn test_apply_merges_into_report() {
        let mut r = report(dec!(10000), Decimal::ZERO, dec!(2200));
        apply(&mut r, Jurisdiction::UnitedStates);
        assert_eq!(r.real_earnings, dec!(7500));
        assert_eq!(r.inflation_adjusted_return_pct, dec!(75));
    }
}
