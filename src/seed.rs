//! Canned sample ledger for `ledgertui demo`.

use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::ledger::Ledger;
use crate::models::{
    mask_number, AccountDraft, AccountId, AccountType, DebitCredit, TransactionDraft, TxnStatus,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn dollars(units: i64, cents: i64) -> Decimal {
    Decimal::new(units * 100 + cents, 2)
}

fn account(
    name: &str,
    bank: &str,
    raw_number: &str,
    account_type: AccountType,
    opening: Decimal,
    color: &str,
    gl: Option<&str>,
) -> AccountDraft {
    AccountDraft {
        name: name.to_string(),
        bank_name: bank.to_string(),
        number: mask_number(raw_number),
        opening_balance: Some(opening),
        currency: "USD".to_string(),
        account_type,
        color: color.to_string(),
        gl_account_id: gl.map(str::to_string),
    }
}

#[allow(clippy::too_many_arguments)]
fn entry(
    account_id: AccountId,
    d: NaiveDate,
    description: &str,
    category: &str,
    amount: Decimal,
    kind: DebitCredit,
    status: TxnStatus,
    reference: Option<&str>,
) -> TransactionDraft {
    TransactionDraft {
        account_id,
        date: d,
        description: description.to_string(),
        category: category.to_string(),
        amount,
        kind,
        status,
        reference: reference.map(str::to_string),
    }
}

/// Build a small, self-consistent ledger through the store's own operations
/// so every balance is reconciled the same way live data would be.
pub(crate) fn demo_ledger() -> Result<Ledger> {
    use DebitCredit::{Credit, Debit};
    use TxnStatus::{Cleared, Pending};

    let mut ledger = Ledger::new();

    let operating = ledger.open_account(account(
        "Operating",
        "First National",
        "4417 1234 5678 9021",
        AccountType::Checking,
        dollars(25_000, 0),
        "blue",
        Some("1010"),
    ));
    let payroll = ledger.open_account(account(
        "Payroll Reserve",
        "First National",
        "4417 9876 5432 1076",
        AccountType::Savings,
        dollars(60_000, 0),
        "green",
        Some("1020"),
    ));
    let card = ledger.open_account(account(
        "Corporate Card",
        "Capital Trust",
        "5500 0042 8765 4310",
        AccountType::Credit,
        Decimal::ZERO,
        "red",
        None,
    ));

    ledger.post(entry(
        operating,
        date(2025, 7, 3),
        "Invoice #1042 - Hargrove Ltd",
        "Sales",
        dollars(12_400, 0),
        Credit,
        Cleared,
        Some("INV-1042"),
    ))?;
    ledger.post(entry(
        operating,
        date(2025, 7, 5),
        "Office lease - July",
        "Facilities",
        dollars(3_850, 0),
        Debit,
        Cleared,
        None,
    ))?;
    ledger.post(entry(
        operating,
        date(2025, 7, 11),
        "Cloud hosting",
        "Infrastructure",
        dollars(642, 18),
        Debit,
        Cleared,
        Some("AWS-0711"),
    ))?;
    ledger.post(entry(
        payroll,
        date(2025, 7, 15),
        "Payroll run - first half July",
        "Payroll",
        dollars(21_730, 44),
        Debit,
        Cleared,
        Some("PR-2025-13"),
    ))?;
    ledger.post(entry(
        payroll,
        date(2025, 7, 15),
        "Operating sweep",
        "Transfers",
        dollars(10_000, 0),
        Credit,
        Cleared,
        None,
    ))?;
    ledger.post(entry(
        card,
        date(2025, 7, 18),
        "Team travel - ORD to AUS",
        "Travel",
        dollars(1_284, 60),
        Debit,
        Pending,
        None,
    ))?;
    ledger.post(entry(
        card,
        date(2025, 7, 21),
        "Conference sponsorship",
        "Marketing",
        dollars(2_500, 0),
        Debit,
        Pending,
        Some("PO-887"),
    ))?;
    ledger.post(entry(
        operating,
        date(2025, 7, 24),
        "Invoice #1047 - Meridian Co",
        "Sales",
        dollars(8_150, 0),
        Credit,
        Pending,
        Some("INV-1047"),
    ))?;

    Ok(ledger)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_ledger_builds() {
        let ledger = demo_ledger().unwrap();
        assert_eq!(ledger.accounts().len(), 3);
        assert_eq!(ledger.journal().len(), 8);
        // Every entry resolves to a live account.
        for txn in ledger.journal() {
            assert!(ledger.account(txn.account_id).is_some());
        }
    }

    #[test]
    fn test_demo_balances_reconciled() {
        let ledger = demo_ledger().unwrap();
        // Net of all entries plus openings must equal the summed balances.
        let openings = dollars(25_000, 0) + dollars(60_000, 0);
        let net: Decimal = ledger.journal().iter().map(|t| t.signed_amount()).sum();
        assert_eq!(ledger.total_balance(), openings + net);
    }
}
