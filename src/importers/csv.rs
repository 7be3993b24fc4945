use anyhow::{anyhow, Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use itertools::Itertools;
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

use crate::error::TaxError;
use crate::model::{Transaction, TransactionKind};

/// Columns every upload must carry, in any order
const REQUIRED_COLUMNS: [&str; 7] = [
    "timestamp",
    "asset",
    "type",
    "quantity",
    "price",
    "fee",
    "exchange",
];

/// Parse a transaction CSV file.
///
/// The header must contain all required columns (case-insensitive, any
/// order). Row parsing fails fast on the first malformed value, naming the
/// offending row and column, so bad uploads never reach the tax engine.
pub fn parse_transactions_csv<P: AsRef<Path>>(file_path: P) -> Result<Vec<Transaction>> {
    let path = file_path.as_ref();
    info!("Parsing transaction CSV file: {:?}", path);

    let mut reader = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .context("Failed to open CSV file")?;

    let headers = reader
        .headers()
        .context("Failed to read CSV headers")?
        .clone();

    debug!("CSV headers: {:?}", headers);

    let mapping = find_columns(&headers)?;

    let mut transactions = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        let row_num = idx + 2; // 1-indexed, after the header row
        let record = result.with_context(|| format!("Failed to read CSV row {}", row_num))?;
        let transaction = parse_csv_row(&record, &mapping, row_num)?;
        transactions.push(transaction);
    }

    info!(
        "Successfully parsed {} transactions from CSV",
        transactions.len()
    );
    Ok(transactions)
}

#[derive(Debug)]
struct CsvColumnMapping {
    timestamp: usize,
    asset: usize,
    kind: usize,
    quantity: usize,
    price: usize,
    fee: usize,
    exchange: usize,
}

fn find_columns(headers: &csv::StringRecord) -> Result<CsvColumnMapping> {
    let position = |name: &str| {
        headers
            .iter()
            .position(|header| header.trim().eq_ignore_ascii_case(name))
    };

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|name| position(name).is_none())
        .collect();

    if !missing.is_empty() {
        return Err(anyhow!(
            "Missing required columns: {}",
            missing.iter().join(", ")
        ));
    }

    Ok(CsvColumnMapping {
        timestamp: position("timestamp").unwrap(),
        asset: position("asset").unwrap(),
        kind: position("type").unwrap(),
        quantity: position("quantity").unwrap(),
        price: position("price").unwrap(),
        fee: position("fee").unwrap(),
        exchange: position("exchange").unwrap(),
    })
}

fn parse_csv_row(
    record: &csv::StringRecord,
    mapping: &CsvColumnMapping,
    row_num: usize,
) -> Result<Transaction> {
    let field = |idx: usize, name: &str| {
        record
            .get(idx)
            .ok_or_else(|| anyhow!("Missing {} at row {}", name, row_num))
    };

    let timestamp_str = field(mapping.timestamp, "timestamp")?;
    let timestamp = parse_csv_timestamp(timestamp_str)
        .with_context(|| format!("Invalid timestamp '{}' at row {}", timestamp_str, row_num))?;

    let asset = field(mapping.asset, "asset")?.trim().to_uppercase();
    if asset.is_empty() {
        return Err(anyhow!("Empty asset at row {}", row_num));
    }

    let kind_str = field(mapping.kind, "type")?;
    let kind = TransactionKind::from_str(kind_str).map_err(|_| {
        TaxError::ParseError(format!(
            "invalid transaction type '{}' at row {}. Must be buy, sell, or transfer",
            kind_str, row_num
        ))
    })?;

    let quantity_str = field(mapping.quantity, "quantity")?;
    let quantity = parse_csv_decimal(quantity_str)
        .with_context(|| format!("Invalid quantity '{}' at row {}", quantity_str, row_num))?;

    let price_str = field(mapping.price, "price")?;
    let price = parse_csv_decimal(price_str)
        .with_context(|| format!("Invalid price '{}' at row {}", price_str, row_num))?;

    // An absent fee defaults to zero
    let fee_str = field(mapping.fee, "fee")?;
    let fee = if fee_str.trim().is_empty() {
        Decimal::ZERO
    } else {
        parse_csv_decimal(fee_str)
            .with_context(|| format!("Invalid fee '{}' at row {}", fee_str, row_num))?
    };

    let exchange = field(mapping.exchange, "exchange")?.trim().to_string();

    Ok(Transaction {
        timestamp,
        asset,
        kind,
        quantity,
        unit_price: price,
        fee,
        exchange,
    })
}

fn parse_csv_timestamp(text: &str) -> Result<NaiveDateTime> {
    let trimmed = text.trim();

    if let Ok(ts) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Ok(ts);
    }
    if let Ok(ts) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Ok(ts);
    }
    // Bare dates are taken as midnight
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_hms_opt(0, 0, 0).expect("midnight is valid"));
    }

    Err(anyhow!("Could not parse timestamp: {}", trimmed))
}

fn parse_csv_decimal(text: &str) -> Result<Decimal> {
    let cleaned = text.replace('$', "").replace(',', "").replace(' ', "");
    Decimal::from_str(&cleaned).context("Failed to parse decimal")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_csv_decimal() {
        assert_eq!(parse_csv_decimal("1,234.56").unwrap(), dec!(1234.56));
        assert_eq!(parse_csv_decimal("$ 10.50").unwrap(), dec!(10.50));
        assert_eq!(parse_csv_decimal("0.00000001").unwrap(), dec!(0.00000001));
        assert!(parse_csv_decimal("abc").is_err());
    }

    #[test]
    fn test_parse_csv_timestamp_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        assert_eq!(
            parse_csv_timestamp("2024-01-15 10:30:00").unwrap(),
            expected
        );
        assert_eq!(
            parse_csv_timestamp("2024-01-15T10:30:00").unwrap(),
            expected
        );

        let midnight = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(parse_csv_timestamp("2024-01-15").unwrap(), midnight);

        assert!(parse_csv_timestamp("15/01/2024").is_err());
    }

    #[test]
    fn test_find_columns_reports_all_missing() {
        let headers = csv::StringRecord::from(vec!["timestamp", "asset", "quantity"]);
        let err = find_columns(&headers).unwrap_err().to_string();
        assert!(err.contains("type"));
        assert!(err.contains("price"));
        assert!(err.contains("fee"));
        assert!(err.contains("exchange"));
        assert!(!err.contains("asset,"));
    }

    #[test]
    fn test_find_columns_is_case_insensitive() {
        let headers = csv::StringRecord::from(vec![
            "Timestamp", "ASSET", "Type", "Quantity", "Price", "Fee", "Exchange",
        ]);
        assert!(find_columns(&headers).is_ok());
    }
}
