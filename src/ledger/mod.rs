mod error;
mod filter;

pub(crate) use error::{LedgerError, Result};
pub(crate) use filter::{JournalStats, KindFilter, SortOrder, StatusFilter, TxnFilter};

use rust_decimal::Decimal;

use crate::models::{Account, AccountDraft, AccountId, Transaction, TransactionDraft, TxnId};

/// Owned store for the account registry and the transaction journal.
///
/// Every mutation goes through a method on this type. The journal and the
/// account balances are never exposed mutably, so the reconciliation
/// invariant — balance equals opening balance plus credits minus debits —
/// cannot be bypassed from outside.
pub(crate) struct Ledger {
    accounts: Vec<Account>,
    /// Newest-inserted entry first. Insertion order is the display order.
    journal: Vec<Transaction>,
    next_account_id: AccountId,
    next_txn_id: TxnId,
}

impl Ledger {
    pub(crate) fn new() -> Self {
        Self {
            accounts: Vec::new(),
            journal: Vec::new(),
            next_account_id: 1,
            next_txn_id: 1,
        }
    }

    // ── Registry ──────────────────────────────────────────────

    /// Open an account with the draft's opening balance as its starting
    /// balance. Ids are never reused within a session.
    pub(crate) fn open_account(&mut self, draft: AccountDraft) -> AccountId {
        let id = self.next_account_id;
        self.next_account_id += 1;
        self.accounts.push(Account::new(id, draft));
        id
    }

    /// Replace all mutable fields of the account. The balance is untouched
    /// unless the draft explicitly carries one.
    pub(crate) fn update_account(&mut self, id: AccountId, draft: AccountDraft) -> Result<()> {
        let account = self
            .accounts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(LedgerError::AccountNotFound(id))?;
        account.rewrite(draft);
        Ok(())
    }

    /// Close an account and cascade-delete its journal entries. The journal
    /// never keeps entries for a dead account.
    pub(crate) fn close_account(&mut self, id: AccountId) -> Result<Account> {
        let pos = self
            .accounts
            .iter()
            .position(|a| a.id == id)
            .ok_or(LedgerError::AccountNotFound(id))?;
        self.journal.retain(|t| t.account_id != id);
        Ok(self.accounts.remove(pos))
    }

    pub(crate) fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub(crate) fn account(&self, id: AccountId) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == id)
    }

    pub(crate) fn total_balance(&self) -> Decimal {
        self.accounts.iter().map(Account::balance).sum()
    }

    // ── Journal + reconciliation ──────────────────────────────

    pub(crate) fn journal(&self) -> &[Transaction] {
        &self.journal
    }

    /// Append a journal entry and adjust the owning account's balance as
    /// one unit of work. A draft that cannot be reconciled — negative
    /// amount, unknown account — is rejected before anything is inserted.
    pub(crate) fn post(&mut self, draft: TransactionDraft) -> Result<TxnId> {
        if draft.amount < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount(draft.amount));
        }
        let account = self
            .accounts
            .iter_mut()
            .find(|a| a.id == draft.account_id)
            .ok_or(LedgerError::UnknownAccount(draft.account_id))?;

        let id = self.next_txn_id;
        self.next_txn_id += 1;
        let txn = Transaction {
            id,
            account_id: draft.account_id,
            date: draft.date,
            description: draft.description,
            category: draft.category,
            amount: draft.amount,
            kind: draft.kind,
            status: draft.status,
            reference: draft.reference,
        };
        account.apply(txn.signed_amount());
        self.journal.insert(0, txn);
        Ok(id)
    }

    /// Exact inverse of [`post`](Self::post): revert the balance delta,
    /// then drop the entry. `void(post(d))` leaves every balance where it
    /// started.
    pub(crate) fn void(&mut self, id: TxnId) -> Result<Transaction> {
        let pos = self
            .journal
            .iter()
            .position(|t| t.id == id)
            .ok_or(LedgerError::TransactionNotFound(id))?;
        let txn = self.journal.remove(pos);
        if let Some(account) = self.accounts.iter_mut().find(|a| a.id == txn.account_id) {
            account.apply(-txn.signed_amount());
        }
        Ok(txn)
    }
}

#[cfg(test)]
mod tests;
