use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::account::AccountId;

pub(crate) type TxnId = u64;

/// Direction of a journal entry. The stored amount is always a magnitude;
/// this carries the sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DebitCredit {
    Credit,
    Debit,
}

impl DebitCredit {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Credit => "Credit",
            Self::Debit => "Debit",
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "credit" | "c" => Some(Self::Credit),
            "debit" | "d" => Some(Self::Debit),
            _ => None,
        }
    }
}

impl std::fmt::Display for DebitCredit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Informational settlement status. Both variants reconcile immediately;
/// Pending does not defer the balance adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TxnStatus {
    Cleared,
    Pending,
}

impl TxnStatus {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Cleared => "Cleared",
            Self::Pending => "Pending",
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cleared" => Some(Self::Cleared),
            "pending" => Some(Self::Pending),
            _ => None,
        }
    }
}

impl std::fmt::Display for TxnStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Input payload for appending a journal entry.
#[derive(Debug, Clone)]
pub(crate) struct TransactionDraft {
    pub(crate) account_id: AccountId,
    pub(crate) date: NaiveDate,
    pub(crate) description: String,
    pub(crate) category: String,
    /// Non-negative magnitude; the store rejects anything below zero.
    pub(crate) amount: Decimal,
    pub(crate) kind: DebitCredit,
    pub(crate) status: TxnStatus,
    pub(crate) reference: Option<String>,
}

impl TransactionDraft {
    pub(crate) fn new(
        account_id: AccountId,
        date: NaiveDate,
        description: String,
        amount: Decimal,
        kind: DebitCredit,
    ) -> Self {
        Self {
            account_id,
            date,
            description,
            category: String::new(),
            amount,
            kind,
            status: TxnStatus::Cleared,
            reference: None,
        }
    }
}

/// A journal entry. Immutable once posted; the only way out is `void`,
/// and moving an entry to another account is void + re-post.
#[derive(Debug, Clone)]
pub(crate) struct Transaction {
    pub(crate) id: TxnId,
    pub(crate) account_id: AccountId,
    pub(crate) date: NaiveDate,
    pub(crate) description: String,
    pub(crate) category: String,
    pub(crate) amount: Decimal,
    pub(crate) kind: DebitCredit,
    pub(crate) status: TxnStatus,
    pub(crate) reference: Option<String>,
}

impl Transaction {
    pub(crate) fn is_credit(&self) -> bool {
        self.kind == DebitCredit::Credit
    }

    /// The balance delta this entry contributes to its account.
    pub(crate) fn signed_amount(&self) -> Decimal {
        match self.kind {
            DebitCredit::Credit => self.amount,
            DebitCredit::Debit => -self.amount,
        }
    }
}
