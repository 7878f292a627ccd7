#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::models::{DebitCredit, Transaction, TxnStatus};

fn entry(id: u64, description: &str, amount: Decimal, kind: DebitCredit) -> Transaction {
    Transaction {
        id,
        account_id: 3,
        date: NaiveDate::parse_from_str("2025-07-15", "%Y-%m-%d").unwrap(),
        description: description.into(),
        category: "Sales".into(),
        amount,
        kind,
        status: TxnStatus::Cleared,
        reference: None,
    }
}

fn render(view: &[&Transaction]) -> String {
    let mut buf: Vec<u8> = Vec::new();
    write_csv(&mut buf, view).unwrap();
    String::from_utf8(buf).unwrap()
}

#[test]
fn test_header_row() {
    let out = render(&[]);
    assert_eq!(
        out.lines().next().unwrap(),
        "ID,Date,Description,Amount,Type,Category,Status,Account ID"
    );
}

#[test]
fn test_empty_view_writes_header_only() {
    let txns: Vec<Transaction> = Vec::new();
    let view: Vec<&Transaction> = txns.iter().collect();
    let mut buf: Vec<u8> = Vec::new();
    let count = write_csv(&mut buf, &view).unwrap();
    assert_eq!(count, 0);
    assert_eq!(String::from_utf8(buf).unwrap().lines().count(), 1);
}

#[test]
fn test_one_record_per_entry_in_view_order() {
    let txns = vec![
        entry(5, "First", dec!(10.00), DebitCredit::Credit),
        entry(2, "Second", dec!(20.00), DebitCredit::Debit),
        entry(9, "Third", dec!(30.00), DebitCredit::Credit),
    ];
    let view: Vec<&Transaction> = txns.iter().collect();

    let mut buf: Vec<u8> = Vec::new();
    let count = write_csv(&mut buf, &view).unwrap();
    assert_eq!(count, 3);

    let out = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 4);
    // View order is preserved, not id order.
    assert!(lines[1].starts_with("5,"));
    assert!(lines[2].starts_with("2,"));
    assert!(lines[3].starts_with("9,"));
}

#[test]
fn test_all_columns_present() {
    let txns = vec![entry(1, "Invoice #1042", dec!(1250.00), DebitCredit::Credit)];
    let view: Vec<&Transaction> = txns.iter().collect();
    let out = render(&view);

    let mut rdr = csv::Reader::from_reader(out.as_bytes());
    let record = rdr.records().next().unwrap().unwrap();
    assert_eq!(record.len(), 8);
    assert_eq!(&record[0], "1");
    assert_eq!(&record[1], "2025-07-15");
    assert_eq!(&record[2], "Invoice #1042");
    assert_eq!(&record[3], "1250.00");
    assert_eq!(&record[4], "Credit");
    assert_eq!(&record[5], "Sales");
    assert_eq!(&record[6], "Cleared");
    assert_eq!(&record[7], "3");
}

#[test]
fn test_embedded_commas_and_quotes_round_trip() {
    let mut txn = entry(1, r#"Refund, per "gesture of goodwill" note"#, dec!(18.40), DebitCredit::Debit);
    txn.category = "Fees, misc".into();
    let txns = vec![txn];
    let view: Vec<&Transaction> = txns.iter().collect();
    let out = render(&view);

    let mut rdr = csv::Reader::from_reader(out.as_bytes());
    let record = rdr.records().next().unwrap().unwrap();
    assert_eq!(&record[2], r#"Refund, per "gesture of goodwill" note"#);
    assert_eq!(&record[5], "Fees, misc");
}

#[test]
fn test_to_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(EXPORT_FILE_NAME);

    let txns = vec![
        entry(1, "First", dec!(10.00), DebitCredit::Credit),
        entry(2, "Second", dec!(20.00), DebitCredit::Debit),
    ];
    let view: Vec<&Transaction> = txns.iter().collect();

    let count = to_path(&path, &view).unwrap();
    assert_eq!(count, 2);

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("ID,Date,Description"));
    assert_eq!(contents.lines().count(), 3);
}
