use rust_decimal::Decimal;

use crate::models::{AccountId, DebitCredit, Transaction, TxnStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum KindFilter {
    #[default]
    All,
    Credit,
    Debit,
}

impl KindFilter {
    fn admits(&self, kind: DebitCredit) -> bool {
        match self {
            Self::All => true,
            Self::Credit => kind == DebitCredit::Credit,
            Self::Debit => kind == DebitCredit::Debit,
        }
    }

    pub(crate) fn cycle(&self) -> Self {
        match self {
            Self::All => Self::Credit,
            Self::Credit => Self::Debit,
            Self::Debit => Self::All,
        }
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Credit => "credit",
            Self::Debit => "debit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum StatusFilter {
    #[default]
    All,
    Cleared,
    Pending,
}

impl StatusFilter {
    fn admits(&self, status: TxnStatus) -> bool {
        match self {
            Self::All => true,
            Self::Cleared => status == TxnStatus::Cleared,
            Self::Pending => status == TxnStatus::Pending,
        }
    }

    pub(crate) fn cycle(&self) -> Self {
        match self {
            Self::All => Self::Cleared,
            Self::Cleared => Self::Pending,
            Self::Pending => Self::All,
        }
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Cleared => "cleared",
            Self::Pending => "pending",
        }
    }
}

/// The two explicit sort keys of the journal view. Insertion order (the
/// journal's own order, newest entry first) is the default; date order
/// sorts newest date first and keeps insertion order as the tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum SortOrder {
    #[default]
    Insertion,
    Date,
}

impl SortOrder {
    pub(crate) fn toggle(&self) -> Self {
        match self {
            Self::Insertion => Self::Date,
            Self::Date => Self::Insertion,
        }
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::Insertion => "insertion",
            Self::Date => "date",
        }
    }
}

/// Constraints for deriving a journal view. All active constraints AND
/// together.
#[derive(Debug, Clone, Default)]
pub(crate) struct TxnFilter {
    pub(crate) account: Option<AccountId>,
    /// Case-insensitive substring match against description or category.
    /// Empty means unconstrained.
    pub(crate) query: String,
    pub(crate) kind: KindFilter,
    pub(crate) status: StatusFilter,
    pub(crate) sort: SortOrder,
}

impl TxnFilter {
    pub(crate) fn matches(&self, txn: &Transaction) -> bool {
        if let Some(id) = self.account {
            if txn.account_id != id {
                return false;
            }
        }
        if !self.kind.admits(txn.kind) {
            return false;
        }
        if !self.status.admits(txn.status) {
            return false;
        }
        if !self.query.is_empty() {
            let needle = self.query.to_lowercase();
            if !txn.description.to_lowercase().contains(&needle)
                && !txn.category.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        true
    }

    /// Derive the filtered view of a journal snapshot. Pure: the view is a
    /// function of the snapshot and this filter alone.
    pub(crate) fn apply<'a>(&self, journal: &'a [Transaction]) -> Vec<&'a Transaction> {
        let mut view: Vec<&Transaction> = journal.iter().filter(|t| self.matches(t)).collect();
        if self.sort == SortOrder::Date {
            // Stable sort; journal order survives as the within-date order.
            view.sort_by(|a, b| b.date.cmp(&a.date));
        }
        view
    }

    pub(crate) fn is_unconstrained(&self) -> bool {
        self.account.is_none()
            && self.query.is_empty()
            && self.kind == KindFilter::All
            && self.status == StatusFilter::All
    }
}

/// Aggregates over a filtered view — never over the full journal. Filtering
/// and reporting share one derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct JournalStats {
    pub(crate) inflow: Decimal,
    pub(crate) outflow: Decimal,
}

impl JournalStats {
    pub(crate) fn over(view: &[&Transaction]) -> Self {
        let mut inflow = Decimal::ZERO;
        let mut outflow = Decimal::ZERO;
        for txn in view {
            match txn.kind {
                DebitCredit::Credit => inflow += txn.amount,
                DebitCredit::Debit => outflow += txn.amount,
            }
        }
        Self { inflow, outflow }
    }

    pub(crate) fn net(&self) -> Decimal {
        self.inflow - self.outflow
    }
}
