//! CSV export of a transaction list.

use std::io::Write;

use super::error::TransactionError;
use super::types::Transaction;

/// Column header of the export.
pub const CSV_HEADER: [&str; 5] = ["Date", "Type", "Category", "Description", "Amount"];

/// Writes transactions as CSV, one row per transaction in the given order.
///
/// Dates are ISO formatted and amounts keep their stored scale. Fields
/// containing commas, quotes or newlines are quoted by the writer.
///
/// # Errors
///
/// Returns `TransactionError::Export` or `TransactionError::Io` when the
/// underlying writer fails.
pub fn write_csv<W: Write>(writer: W, transactions: &[Transaction]) -> Result<(), TransactionError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER)?;

    for tx in transactions {
        let date = tx.occurred_on.format("%Y-%m-%d").to_string();
        let amount = tx.amount.to_string();
        wtr.write_record([
            date.as_str(),
            tx.kind.as_str(),
            tx.category.as_str(),
            tx.note.as_deref().unwrap_or(""),
            amount.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Renders the export into an in-memory buffer.
///
/// # Errors
///
/// Same as [`write_csv`].
pub fn to_csv_bytes(transactions: &[Transaction]) -> Result<Vec<u8>, TransactionError> {
    let mut buf = Vec::new();
    write_csv(&mut buf, transactions)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use tally_shared::types::{TransactionId, UserId};

    use crate::transaction::types::TransactionKind;

    fn tx(category: &str, note: Option<&str>) -> Transaction {
        Transaction {
            id: TransactionId::new(),
            owner_id: UserId::new(),
            kind: TransactionKind::Expense,
            category: category.to_string(),
            amount: dec!(12.50),
            occurred_on: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            note: note.map(str::to_string),
        }
    }

    #[test]
    fn test_empty_export_has_header_only() {
        let out = String::from_utf8(to_csv_bytes(&[]).unwrap()).unwrap();
        assert_eq!(out, "Date,Type,Category,Description,Amount\n");
    }

    #[test]
    fn test_one_row_per_transaction() {
        let out = String::from_utf8(
            to_csv_bytes(&[tx("Food", Some("Lunch")), tx("Rent", None)]).unwrap(),
        )
        .unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "2024-01-10,expense,Food,Lunch,12.50");
        assert_eq!(lines[2], "2024-01-10,expense,Rent,,12.50");
    }

    #[test]
    fn test_commas_and_quotes_are_escaped() {
        let out = String::from_utf8(
            to_csv_bytes(&[tx("Food, Drinks", Some("the \"good\" place"))]).unwrap(),
        )
        .unwrap();

        assert!(out.contains("\"Food, Drinks\""));
        assert!(out.contains("\"the \"\"good\"\" place\""));
    }
}
