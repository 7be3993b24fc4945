//! Transaction validation
//!
//! Checks the value-range invariants of parsed transactions, collecting
//! every issue instead of failing on the first one so the caller can report
//! all problems with an upload at once.

use rust_decimal::Decimal;

use crate::model::Transaction;

/// A validation issue found in an imported transaction
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Data row number in the import file (1-indexed after the header)
    pub row: usize,
    /// Column name that has the issue (e.g. "quantity", "fee")
    pub column: String,
    /// The problematic value
    pub value: String,
    /// Description of why this is an issue
    pub reason: String,
}

impl ValidationIssue {
    pub fn new(
        row: usize,
        column: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            row,
            column: column.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "row {}, column {}: {} ('{}')",
            self.row, self.column, self.reason, self.value
        )
    }
}

/// Validate a batch of parsed transactions against the model invariants.
///
/// Returns every issue found; an empty list means the batch is safe to hand
/// to the tax engine. Row numbers start at 2 to account for the header row,
/// matching what the user sees in a spreadsheet.
pub fn validate_transactions(transactions: &[Transaction]) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for (idx, tx) in transactions.iter().enumerate() {
        let row_num = idx + 2;

        if tx.quantity <= Decimal::ZERO {
            issues.push(ValidationIssue::new(
                row_num,
                "quantity",
                tx.quantity.to_string(),
                "Quantity must be greater than zero",
            ));
        }

        if tx.unit_price <= Decimal::ZERO {
            issues.push(ValidationIssue::new(
                row_num,
                "price",
                tx.unit_price.to_string(),
                "Price must be greater than zero",
            ));
        }

        if tx.fee < Decimal::ZERO {
            issues.push(ValidationIssue::new(
                row_num,
                "fee",
                tx.fee.to_string(),
                "Fee cannot be negative",
            ));
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TransactionKind;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn sample_transaction(quantity: Decimal, price: Decimal, fee: Decimal) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(10, 30, 0)
                .unwrap(),
            "BTC",
            TransactionKind::Buy,
            quantity,
            price,
            fee,
            "Binance",
        )
    }

    #[test]
    fn test_valid_transaction_has_no_issues() {
        let txs = vec![sample_transaction(dec!(0.5), dec!(45000), dec!(25))];
        assert!(validate_transactions(&txs).is_empty());
    }

    #[test]
    fn test_zero_fee_is_allowed() {
        let txs = vec![sample_transaction(dec!(1), dec!(100), Decimal::ZERO)];
        assert!(validate_transactions(&txs).is_empty());
    }

    #[test]
    fn test_nonpositive_quantity_flagged() {
        let txs = vec![sample_transaction(dec!(-1), dec!(100), dec!(0))];
        let issues = validate_transactions(&txs);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].column, "quantity");
        assert_eq!(issues[0].row, 2);
    }

    #[test]
    fn test_multiple_issues_all_collected() {
        let txs = vec![
            sample_transaction(dec!(0), dec!(100), dec!(0)),
            sample_transaction(dec!(1), dec!(0), dec!(-5)),
        ];
        let issues = validate_transactions(&txs);
        assert_eq!(issues.len(), 3);
        assert_eq!(issues[0].column, "quantity");
        assert_eq!(issues[1].column, "price");
        assert_eq!(issues[1].row, 3);
        assert_eq!(issues[2].column, "fee");
    }

    #[test]
    fn test_issue_display_names_row_and_column() {
        let issue = ValidationIssue::new(4, "price", "0", "Price must be greater than zero");
        let text = issue.to_string();
        assert!(text.contains("row 4"));
        assert!(text.contains("column price"));
    }
}
