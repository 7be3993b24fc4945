// Import module - transaction CSV parser and validation

pub mod csv;
pub mod validation;

use anyhow::{anyhow, Result};
use itertools::Itertools;
use std::path::Path;
use tracing::info;

use crate::error::TaxError;
use crate::model::Transaction;
pub use validation::{validate_transactions, ValidationIssue};

/// Canonical example file showing the expected upload layout
pub const SAMPLE_CSV: &str = "\
timestamp,asset,type,quantity,price,fee,exchange
2024-01-15 10:30:00,BTC,buy,0.5,45000,25.0,Binance
2024-02-20 14:15:00,ETH,buy,2.0,3200,15.0,Coinbase
2024-03-10 09:45:00,BTC,sell,0.25,52000,30.0,Binance
2024-03-25 16:20:00,ETH,sell,1.0,3800,20.0,Coinbase
";

/// Import and validate transactions from an upload file.
///
/// Only `.csv` (or `.txt`) files are accepted. Parsing fails fast on
/// malformed rows; after parsing, every value-range violation in the batch
/// is collected and reported in one error.
pub fn import_file<P: AsRef<Path>>(file_path: P) -> Result<Vec<Transaction>> {
    let path = file_path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| anyhow!("File has no extension"))?
        .to_lowercase();

    info!("Importing transaction file: {:?} (type: {})", path, extension);

    let transactions = match extension.as_str() {
        "csv" | "txt" => csv::parse_transactions_csv(path)?,
        _ => {
            return Err(TaxError::UnsupportedFormat(format!(
                "{}. Supported formats: .csv",
                extension
            ))
            .into())
        }
    };

    let issues = validate_transactions(&transactions);
    if !issues.is_empty() {
        return Err(TaxError::ValidationError(format!(
            "invalid transactions in {:?}:\n{}",
            path,
            issues.iter().join("\n")
        ))
        .into());
    }

    Ok(transactions)
}
