#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::models::{AccountDraft, AccountType, DebitCredit, TransactionDraft, TxnStatus};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn checking(name: &str, opening: Decimal) -> AccountDraft {
    AccountDraft::new(name.into(), AccountType::Checking, opening)
}

fn entry(account_id: u64, amount: Decimal, kind: DebitCredit) -> TransactionDraft {
    TransactionDraft::new(account_id, date("2025-07-01"), "Test entry".into(), amount, kind)
}

// ── Registry ──────────────────────────────────────────────────

#[test]
fn test_open_account_assigns_unique_ids() {
    let mut ledger = Ledger::new();
    let a = ledger.open_account(checking("Operating", dec!(100)));
    let b = ledger.open_account(checking("Payroll", dec!(200)));
    assert_ne!(a, b);
    assert_eq!(ledger.accounts().len(), 2);
}

#[test]
fn test_open_account_stores_opening_balance() {
    let mut ledger = Ledger::new();
    let id = ledger.open_account(checking("Operating", dec!(1234.56)));
    assert_eq!(ledger.account(id).unwrap().balance(), dec!(1234.56));
}

#[test]
fn test_account_ids_not_reused_after_close() {
    let mut ledger = Ledger::new();
    let a = ledger.open_account(checking("First", dec!(0)));
    ledger.close_account(a).unwrap();
    let b = ledger.open_account(checking("Second", dec!(0)));
    assert_ne!(a, b);
}

#[test]
fn test_update_account_replaces_fields_keeps_balance() {
    let mut ledger = Ledger::new();
    let id = ledger.open_account(checking("Operating", dec!(1000)));
    ledger.post(entry(id, dec!(250), DebitCredit::Credit)).unwrap();

    let mut draft = AccountDraft::new("Renamed".into(), AccountType::Savings, dec!(0));
    draft.opening_balance = None;
    draft.bank_name = "First National".into();
    draft.currency = "EUR".into();
    ledger.update_account(id, draft).unwrap();

    let account = ledger.account(id).unwrap();
    assert_eq!(account.name, "Renamed");
    assert_eq!(account.bank_name, "First National");
    assert_eq!(account.currency, "EUR");
    assert_eq!(account.account_type, AccountType::Savings);
    // The edit never recomputes or resets the balance on its own.
    assert_eq!(account.balance(), dec!(1250));
}

#[test]
fn test_update_account_with_explicit_balance() {
    let mut ledger = Ledger::new();
    let id = ledger.open_account(checking("Operating", dec!(1000)));

    let draft = AccountDraft::new("Operating".into(), AccountType::Checking, dec!(500));
    ledger.update_account(id, draft).unwrap();

    assert_eq!(ledger.account(id).unwrap().balance(), dec!(500));
}

#[test]
fn test_update_account_missing() {
    let mut ledger = Ledger::new();
    let err = ledger
        .update_account(42, checking("Ghost", dec!(0)))
        .unwrap_err();
    assert_eq!(err, LedgerError::AccountNotFound(42));
}

#[test]
fn test_close_account_cascades_journal_entries() {
    let mut ledger = Ledger::new();
    let keep = ledger.open_account(checking("Keep", dec!(100)));
    let gone = ledger.open_account(checking("Drop", dec!(100)));
    ledger.post(entry(keep, dec!(10), DebitCredit::Credit)).unwrap();
    ledger.post(entry(gone, dec!(20), DebitCredit::Credit)).unwrap();
    ledger.post(entry(gone, dec!(5), DebitCredit::Debit)).unwrap();

    let closed = ledger.close_account(gone).unwrap();
    assert_eq!(closed.name, "Drop");
    assert_eq!(ledger.accounts().len(), 1);
    assert_eq!(ledger.journal().len(), 1);
    assert!(ledger.journal().iter().all(|t| t.account_id == keep));
    // The surviving account is untouched by the cascade.
    assert_eq!(ledger.account(keep).unwrap().balance(), dec!(110));
}

#[test]
fn test_close_account_missing() {
    let mut ledger = Ledger::new();
    assert_eq!(
        ledger.close_account(7).unwrap_err(),
        LedgerError::AccountNotFound(7)
    );
}

#[test]
fn test_total_balance() {
    let mut ledger = Ledger::new();
    assert_eq!(ledger.total_balance(), Decimal::ZERO);
    ledger.open_account(checking("A", dec!(100.50)));
    ledger.open_account(checking("B", dec!(-20.50)));
    assert_eq!(ledger.total_balance(), dec!(80.00));
}

// ── Journal + reconciliation ──────────────────────────────────

#[test]
fn test_post_credit_increases_balance() {
    let mut ledger = Ledger::new();
    let id = ledger.open_account(checking("Operating", dec!(1000)));
    ledger.post(entry(id, dec!(250.00), DebitCredit::Credit)).unwrap();
    assert_eq!(ledger.account(id).unwrap().balance(), dec!(1250.00));
}

#[test]
fn test_post_debit_decreases_balance() {
    let mut ledger = Ledger::new();
    let id = ledger.open_account(checking("Operating", dec!(1000)));
    ledger.post(entry(id, dec!(400.00), DebitCredit::Debit)).unwrap();
    assert_eq!(ledger.account(id).unwrap().balance(), dec!(600.00));
}

#[test]
fn test_post_unknown_account_rejected() {
    let mut ledger = Ledger::new();
    let id = ledger.open_account(checking("Operating", dec!(1000)));

    let err = ledger.post(entry(99, dec!(50), DebitCredit::Credit)).unwrap_err();
    assert_eq!(err, LedgerError::UnknownAccount(99));
    // Rejection happens before insertion: no entry, no balance movement.
    assert!(ledger.journal().is_empty());
    assert_eq!(ledger.account(id).unwrap().balance(), dec!(1000));
}

#[test]
fn test_post_negative_amount_rejected() {
    let mut ledger = Ledger::new();
    let id = ledger.open_account(checking("Operating", dec!(1000)));

    let err = ledger.post(entry(id, dec!(-5), DebitCredit::Debit)).unwrap_err();
    assert_eq!(err, LedgerError::NegativeAmount(dec!(-5)));
    assert!(ledger.journal().is_empty());
    assert_eq!(ledger.account(id).unwrap().balance(), dec!(1000));
}

#[test]
fn test_zero_amount_is_allowed() {
    let mut ledger = Ledger::new();
    let id = ledger.open_account(checking("Operating", dec!(1000)));
    ledger.post(entry(id, Decimal::ZERO, DebitCredit::Debit)).unwrap();
    assert_eq!(ledger.account(id).unwrap().balance(), dec!(1000));
    assert_eq!(ledger.journal().len(), 1);
}

#[test]
fn test_newest_inserted_first() {
    let mut ledger = Ledger::new();
    let id = ledger.open_account(checking("Operating", dec!(0)));

    // Dates deliberately out of order; insertion order wins.
    let mut d1 = entry(id, dec!(1), DebitCredit::Credit);
    d1.date = date("2025-07-20");
    let mut d2 = entry(id, dec!(2), DebitCredit::Credit);
    d2.date = date("2025-07-01");
    let first = ledger.post(d1).unwrap();
    let second = ledger.post(d2).unwrap();

    let ids: Vec<_> = ledger.journal().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![second, first]);
}

#[test]
fn test_void_is_exact_inverse_of_post() {
    let mut ledger = Ledger::new();
    let a = ledger.open_account(checking("A", dec!(500)));
    let b = ledger.open_account(checking("B", dec!(800)));
    ledger.post(entry(b, dec!(75), DebitCredit::Debit)).unwrap();

    let before_a = ledger.account(a).unwrap().balance();
    let before_b = ledger.account(b).unwrap().balance();
    let len_before = ledger.journal().len();

    let txn_id = ledger.post(entry(a, dec!(123.45), DebitCredit::Credit)).unwrap();
    ledger.void(txn_id).unwrap();

    assert_eq!(ledger.account(a).unwrap().balance(), before_a);
    assert_eq!(ledger.account(b).unwrap().balance(), before_b);
    assert_eq!(ledger.journal().len(), len_before);
}

#[test]
fn test_void_returns_the_entry() {
    let mut ledger = Ledger::new();
    let id = ledger.open_account(checking("Operating", dec!(0)));
    let txn_id = ledger.post(entry(id, dec!(9.99), DebitCredit::Debit)).unwrap();

    let voided = ledger.void(txn_id).unwrap();
    assert_eq!(voided.id, txn_id);
    assert_eq!(voided.amount, dec!(9.99));
    assert_eq!(voided.kind, DebitCredit::Debit);
    assert!(ledger.journal().iter().all(|t| t.id != txn_id));
}

#[test]
fn test_void_missing() {
    let mut ledger = Ledger::new();
    assert_eq!(
        ledger.void(42).unwrap_err(),
        LedgerError::TransactionNotFound(42)
    );
}

#[test]
fn test_pending_reconciles_immediately() {
    let mut ledger = Ledger::new();
    let id = ledger.open_account(checking("Operating", dec!(100)));
    let mut draft = entry(id, dec!(40), DebitCredit::Debit);
    draft.status = TxnStatus::Pending;
    ledger.post(draft).unwrap();
    // Pending is informational only; the balance moves right away.
    assert_eq!(ledger.account(id).unwrap().balance(), dec!(60));
}

#[test]
fn test_balance_invariant_over_sequence() {
    let mut ledger = Ledger::new();
    let id = ledger.open_account(checking("Operating", dec!(1000)));

    let mut kept = Vec::new();
    for (amount, kind) in [
        (dec!(250), DebitCredit::Credit),
        (dec!(400), DebitCredit::Debit),
        (dec!(13.37), DebitCredit::Credit),
        (dec!(0.01), DebitCredit::Debit),
    ] {
        kept.push(ledger.post(entry(id, amount, kind)).unwrap());
    }
    ledger.void(kept[2]).unwrap();

    let net: Decimal = ledger.journal().iter().map(|t| t.signed_amount()).sum();
    assert_eq!(ledger.account(id).unwrap().balance(), dec!(1000) + net);
}

// ── The worked example ────────────────────────────────────────

#[test]
fn test_worked_example() {
    let mut ledger = Ledger::new();
    let id = ledger.open_account(checking("A", dec!(1000.00)));

    let credit = ledger.post(entry(id, dec!(250.00), DebitCredit::Credit)).unwrap();
    assert_eq!(ledger.account(id).unwrap().balance(), dec!(1250.00));

    ledger.post(entry(id, dec!(400.00), DebitCredit::Debit)).unwrap();
    assert_eq!(ledger.account(id).unwrap().balance(), dec!(850.00));

    ledger.void(credit).unwrap();
    assert_eq!(ledger.account(id).unwrap().balance(), dec!(600.00));

    let filter = TxnFilter {
        kind: KindFilter::Debit,
        ..TxnFilter::default()
    };
    let view = filter.apply(ledger.journal());
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].amount, dec!(400.00));

    let stats = JournalStats::over(&view);
    assert_eq!(stats.inflow, Decimal::ZERO);
    assert_eq!(stats.outflow, dec!(400.00));
    assert_eq!(stats.net(), dec!(-400.00));
}

// ── Query/filter layer ────────────────────────────────────────

fn seeded() -> (Ledger, u64, u64) {
    let mut ledger = Ledger::new();
    let ops = ledger.open_account(checking("Operating", dec!(0)));
    let card = ledger.open_account(checking("Card", dec!(0)));

    let mut d = TransactionDraft::new(
        ops,
        date("2025-07-03"),
        "Invoice #1042".into(),
        dec!(1200),
        DebitCredit::Credit,
    );
    d.category = "Sales".into();
    ledger.post(d).unwrap();

    let mut d = TransactionDraft::new(
        ops,
        date("2025-07-10"),
        "Office lease".into(),
        dec!(800),
        DebitCredit::Debit,
    );
    d.category = "Facilities".into();
    ledger.post(d).unwrap();

    let mut d = TransactionDraft::new(
        card,
        date("2025-07-05"),
        "Team travel".into(),
        dec!(300),
        DebitCredit::Debit,
    );
    d.category = "Travel".into();
    d.status = TxnStatus::Pending;
    ledger.post(d).unwrap();

    (ledger, ops, card)
}

#[test]
fn test_filter_by_account() {
    let (ledger, ops, card) = seeded();
    let filter = TxnFilter {
        account: Some(ops),
        ..TxnFilter::default()
    };
    let view = filter.apply(ledger.journal());
    assert_eq!(view.len(), 2);
    assert!(view.iter().all(|t| t.account_id == ops));

    let filter = TxnFilter {
        account: Some(card),
        ..TxnFilter::default()
    };
    assert_eq!(filter.apply(ledger.journal()).len(), 1);
}

#[test]
fn test_filter_search_is_case_insensitive() {
    let (ledger, _, _) = seeded();
    let filter = TxnFilter {
        query: "INVOICE".into(),
        ..TxnFilter::default()
    };
    let view = filter.apply(ledger.journal());
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].description, "Invoice #1042");
}

#[test]
fn test_filter_search_matches_category() {
    let (ledger, _, _) = seeded();
    let filter = TxnFilter {
        query: "travel".into(),
        ..TxnFilter::default()
    };
    let view = filter.apply(ledger.journal());
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].description, "Team travel");
}

#[test]
fn test_filter_search_no_results() {
    let (ledger, _, _) = seeded();
    let filter = TxnFilter {
        query: "nonexistent".into(),
        ..TxnFilter::default()
    };
    assert!(filter.apply(ledger.journal()).is_empty());
}

#[test]
fn test_filter_by_kind() {
    let (ledger, _, _) = seeded();
    let filter = TxnFilter {
        kind: KindFilter::Debit,
        ..TxnFilter::default()
    };
    let view = filter.apply(ledger.journal());
    assert_eq!(view.len(), 2);
    assert!(view.iter().all(|t| !t.is_credit()));
}

#[test]
fn test_filter_by_status() {
    let (ledger, _, _) = seeded();
    let filter = TxnFilter {
        status: StatusFilter::Pending,
        ..TxnFilter::default()
    };
    let view = filter.apply(ledger.journal());
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].status, TxnStatus::Pending);
}

#[test]
fn test_filters_combine_with_and() {
    let (ledger, ops, _) = seeded();
    let filter = TxnFilter {
        account: Some(ops),
        query: "lease".into(),
        kind: KindFilter::Debit,
        status: StatusFilter::Cleared,
        ..TxnFilter::default()
    };
    let view = filter.apply(ledger.journal());
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].description, "Office lease");

    // Same constraints plus one that fails: AND semantics empty the view.
    let filter = TxnFilter {
        kind: KindFilter::Credit,
        ..filter
    };
    assert!(filter.apply(ledger.journal()).is_empty());
}

#[test]
fn test_filtering_is_idempotent() {
    let (ledger, _, _) = seeded();
    let filter = TxnFilter {
        kind: KindFilter::Debit,
        query: "e".into(),
        ..TxnFilter::default()
    };
    let first: Vec<u64> = filter.apply(ledger.journal()).iter().map(|t| t.id).collect();
    let second: Vec<u64> = filter.apply(ledger.journal()).iter().map(|t| t.id).collect();
    assert_eq!(first, second);
}

#[test]
fn test_sort_insertion_is_default() {
    let (ledger, _, _) = seeded();
    let view = TxnFilter::default().apply(ledger.journal());
    let ids: Vec<u64> = view.iter().map(|t| t.id).collect();
    // Journal order: newest-inserted first, dates ignored.
    assert_eq!(ids, vec![3, 2, 1]);
}

#[test]
fn test_sort_by_date() {
    let (ledger, _, _) = seeded();
    let filter = TxnFilter {
        sort: SortOrder::Date,
        ..TxnFilter::default()
    };
    let view = filter.apply(ledger.journal());
    let dates: Vec<_> = view.iter().map(|t| t.date).collect();
    assert_eq!(dates, vec![date("2025-07-10"), date("2025-07-05"), date("2025-07-03")]);
}

#[test]
fn test_sort_by_date_ties_keep_insertion_order() {
    let mut ledger = Ledger::new();
    let id = ledger.open_account(checking("Operating", dec!(0)));
    let mut first = entry(id, dec!(1), DebitCredit::Credit);
    first.date = date("2025-07-01");
    let mut second = entry(id, dec!(2), DebitCredit::Credit);
    second.date = date("2025-07-01");
    let a = ledger.post(first).unwrap();
    let b = ledger.post(second).unwrap();

    let filter = TxnFilter {
        sort: SortOrder::Date,
        ..TxnFilter::default()
    };
    let ids: Vec<u64> = filter.apply(ledger.journal()).iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![b, a]);
}

#[test]
fn test_stats_cover_filtered_view_only() {
    let (ledger, ops, _) = seeded();
    let filter = TxnFilter {
        account: Some(ops),
        ..TxnFilter::default()
    };
    let view = filter.apply(ledger.journal());
    let stats = JournalStats::over(&view);
    // The card's 300 debit sits outside the view.
    assert_eq!(stats.inflow, dec!(1200));
    assert_eq!(stats.outflow, dec!(800));
    assert_eq!(stats.net(), dec!(400));
}

#[test]
fn test_stats_net_identity() {
    let (ledger, _, _) = seeded();
    let view = TxnFilter::default().apply(ledger.journal());
    let stats = JournalStats::over(&view);
    assert_eq!(stats.net(), stats.inflow - stats.outflow);
}

#[test]
fn test_stats_empty_view() {
    let stats = JournalStats::over(&[]);
    assert_eq!(stats.inflow, Decimal::ZERO);
    assert_eq!(stats.outflow, Decimal::ZERO);
    assert_eq!(stats.net(), Decimal::ZERO);
}
