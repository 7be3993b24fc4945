//! Utility functions for formatting and common operations
//!
//! Centralized formatting helpers for consistent display of currency and
//! percentage values throughout the application.

use rust_decimal::Decimal;

/// Currency symbol options for formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrencySymbol {
    /// Include "$" prefix
    Usd,
    /// No currency symbol (for table cells, calculations display)
    None,
}

/// Core formatting function with full control over output.
///
/// Formats a Decimal value with `,` as the thousands separator and `.` as
/// the decimal separator, rounded to two decimal places.
///
/// # Arguments
/// * `value` - The decimal value to format
/// * `width` - Minimum width for padding (0 for no padding, right-aligned)
/// * `symbol` - Whether to include the currency symbol
///
/// # Examples
/// ```
/// use cryptotax::utils::{format_currency_with_width, CurrencySymbol};
/// use rust_decimal_macros::dec;
///
/// assert_eq!(
///     format_currency_with_width(dec!(1234.56), 0, CurrencySymbol::Usd),
///     "$1,234.56"
/// );
///
/// assert_eq!(
///     format_currency_with_width(dec!(1234), 10, CurrencySymbol::None),
///     "  1,234.00"
/// );
/// ```
pub fn format_currency_with_width(value: Decimal, width: usize, symbol: CurrencySymbol) -> String {
    let is_negative = value < Decimal::ZERO;
    let abs_value = value.abs();

    // Round to 2 decimal places and format
    let formatted = format!("{:.2}", abs_value);
    let parts: Vec<&str> = formatted.split('.').collect();

    let integer_part = parts[0];
    let decimal_part = parts.get(1).unwrap_or(&"00");

    // Add thousands separators (,) to the integer part
    let with_separators: String = integer_part
        .chars()
        .rev()
        .enumerate()
        .flat_map(|(i, c)| {
            if i > 0 && i % 3 == 0 {
                vec![',', c]
            } else {
                vec![c]
            }
        })
        .collect::<String>()
        .chars()
        .rev()
        .collect();

    let mut result = String::new();
    if is_negative {
        result.push('-');
    }
    if symbol == CurrencySymbol::Usd {
        result.push('$');
    }
    result.push_str(&with_separators);
    result.push('.');
    result.push_str(decimal_part);

    if width > 0 {
        format!("{:>width$}", result)
    } else {
        result
    }
}

/// Format a currency value with the "$" symbol and no padding.
pub fn format_currency(value: Decimal) -> String {
    format_currency_with_width(value, 0, CurrencySymbol::Usd)
}

/// Format a ratio value as a percentage with one decimal place.
pub fn format_pct(value: Decimal) -> String {
    format!("{:.1}%", value)
}
