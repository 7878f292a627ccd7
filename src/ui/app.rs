use rust_decimal::Decimal;

use crate::ledger::{JournalStats, Ledger, TxnFilter};
use crate::models::{Account, AccountId, Transaction, TxnId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Accounts,
    Transactions,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Dashboard, Self::Accounts, Self::Transactions]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Accounts => write!(f, "Accounts"),
            Self::Transactions => write!(f, "Transactions"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Search,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Search => write!(f, "SEARCH"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending destructive action; executed only after explicit confirmation.
#[derive(Debug, Clone)]
pub(crate) enum PendingAction {
    VoidTransaction { id: TxnId, description: String },
    CloseAccount { id: AccountId, name: String },
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    /// The active journal view filter. `filter.query` doubles as the live
    /// search input.
    pub(crate) filter: TxnFilter,

    // Snapshots re-derived from the ledger after every mutation
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) stats: JournalStats,
    pub(crate) accounts: Vec<Account>,
    pub(crate) total_balance: Decimal,
    pub(crate) journal_len: usize,

    // Cursors
    pub(crate) transaction_index: usize,
    pub(crate) transaction_scroll: usize,
    pub(crate) account_index: usize,
    pub(crate) account_scroll: usize,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new() -> Self {
        Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            filter: TxnFilter::default(),

            transactions: Vec::new(),
            stats: JournalStats::default(),
            accounts: Vec::new(),
            total_balance: Decimal::ZERO,
            journal_len: 0,

            transaction_index: 0,
            transaction_scroll: 0,
            account_index: 0,
            account_scroll: 0,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    /// Re-derive every snapshot from the ledger: the filtered journal view,
    /// its stats, and the account list. Called after each mutation and
    /// filter change.
    pub(crate) fn refresh(&mut self, ledger: &Ledger) {
        let view = self.filter.apply(ledger.journal());
        self.stats = JournalStats::over(&view);
        self.transactions = view.into_iter().cloned().collect();
        self.accounts = ledger.accounts().to_vec();
        self.total_balance = ledger.total_balance();
        self.journal_len = ledger.journal().len();

        if self.transaction_index >= self.transactions.len() {
            self.transaction_index = self.transactions.len().saturating_sub(1);
        }
        if self.transaction_scroll > self.transaction_index {
            self.transaction_scroll = self.transaction_index;
        }
        if self.account_index >= self.accounts.len() {
            self.account_index = self.accounts.len().saturating_sub(1);
        }
        if self.account_scroll > self.account_index {
            self.account_scroll = self.account_index;
        }
    }

    pub(crate) fn selected_transaction(&self) -> Option<&Transaction> {
        self.transactions.get(self.transaction_index)
    }

    pub(crate) fn selected_account(&self) -> Option<&Account> {
        self.accounts.get(self.account_index)
    }

    /// The current filtered view, borrowed for the export adapter.
    pub(crate) fn filtered_view(&self) -> Vec<&Transaction> {
        self.transactions.iter().collect()
    }

    pub(crate) fn reset_transaction_cursor(&mut self) {
        self.transaction_index = 0;
        self.transaction_scroll = 0;
    }

    pub(crate) fn transaction_page(&self) -> usize {
        self.visible_rows.max(1)
    }

    /// Account cards are taller than table rows; see the accounts screen.
    pub(crate) fn account_page(&self) -> usize {
        (self.visible_rows / 4).max(1)
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}
