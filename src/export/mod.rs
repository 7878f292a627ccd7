use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use crate::models::Transaction;

/// Default export file name when the user gives no path.
pub(crate) const EXPORT_FILE_NAME: &str = "transactions_export.csv";

const HEADER: [&str; 8] = [
    "ID",
    "Date",
    "Description",
    "Amount",
    "Type",
    "Category",
    "Status",
    "Account ID",
];

/// Serialize a filtered journal view: the fixed header row, then one record
/// per transaction in view order. The `csv` writer quotes per RFC 4180, so
/// embedded commas, quotes, and newlines survive in every field. Returns
/// the number of data records written.
pub(crate) fn write_csv<W: Write>(out: W, view: &[&Transaction]) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(HEADER).context("Failed to write CSV header")?;
    for txn in view {
        wtr.write_record([
            txn.id.to_string(),
            txn.date.format("%Y-%m-%d").to_string(),
            txn.description.clone(),
            txn.amount.to_string(),
            txn.kind.as_str().to_string(),
            txn.category.clone(),
            txn.status.as_str().to_string(),
            txn.account_id.to_string(),
        ])
        .context("Failed to write CSV record")?;
    }
    wtr.flush().context("Failed to flush CSV output")?;
    Ok(view.len())
}

pub(crate) fn to_path(path: &Path, view: &[&Transaction]) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_csv(file, view)
}

#[cfg(test)]
mod tests;
