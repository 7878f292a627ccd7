use rust_decimal::Decimal;

pub(crate) type AccountId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AccountType {
    Checking,
    Savings,
    Credit,
}

impl AccountType {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Checking => "Checking",
            Self::Savings => "Savings",
            Self::Credit => "Credit",
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "checking" => Some(Self::Checking),
            "savings" => Some(Self::Savings),
            "credit" | "credit card" | "creditcard" => Some(Self::Credit),
            _ => None,
        }
    }

    pub(crate) fn all() -> &'static [AccountType] {
        &[Self::Checking, Self::Savings, Self::Credit]
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Input payload for opening or editing an account. Collaborators (the
/// account commands) fill this in; the ledger store consumes it as-is.
#[derive(Debug, Clone)]
pub(crate) struct AccountDraft {
    pub(crate) name: String,
    pub(crate) bank_name: String,
    pub(crate) number: String,
    /// `Some` sets the balance outright (new accounts, or an edit that
    /// deliberately round-trips it); `None` leaves the balance alone.
    pub(crate) opening_balance: Option<Decimal>,
    pub(crate) currency: String,
    pub(crate) account_type: AccountType,
    pub(crate) color: String,
    pub(crate) gl_account_id: Option<String>,
}

impl AccountDraft {
    pub(crate) fn new(name: String, account_type: AccountType, opening_balance: Decimal) -> Self {
        Self {
            name,
            bank_name: String::new(),
            number: String::new(),
            opening_balance: Some(opening_balance),
            currency: "USD".to_string(),
            account_type,
            color: String::new(),
            gl_account_id: None,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Account {
    pub(crate) id: AccountId,
    pub(crate) name: String,
    pub(crate) bank_name: String,
    /// Masked display string, last four digits only. See [`mask_number`].
    pub(crate) number: String,
    balance: Decimal,
    pub(crate) currency: String,
    pub(crate) account_type: AccountType,
    pub(crate) color: String,
    /// Opaque reference into an external chart of accounts. Display only;
    /// nothing is ever posted against it.
    pub(crate) gl_account_id: Option<String>,
}

impl Account {
    pub(crate) fn new(id: AccountId, draft: AccountDraft) -> Self {
        Self {
            id,
            name: draft.name,
            bank_name: draft.bank_name,
            number: draft.number,
            balance: draft.opening_balance.unwrap_or(Decimal::ZERO),
            currency: draft.currency,
            account_type: draft.account_type,
            color: draft.color,
            gl_account_id: draft.gl_account_id,
        }
    }

    pub(crate) fn balance(&self) -> Decimal {
        self.balance
    }

    /// Reconciliation hook. The ledger store is the only caller; it never
    /// hands out `&mut Account`, so the balance cannot move any other way.
    pub(crate) fn apply(&mut self, delta: Decimal) {
        self.balance += delta;
    }

    /// Replace all mutable fields from a draft. The balance changes only
    /// when the draft carries one explicitly.
    pub(crate) fn rewrite(&mut self, draft: AccountDraft) {
        self.name = draft.name;
        self.bank_name = draft.bank_name;
        self.number = draft.number;
        self.currency = draft.currency;
        self.account_type = draft.account_type;
        self.color = draft.color;
        self.gl_account_id = draft.gl_account_id;
        if let Some(balance) = draft.opening_balance {
            self.balance = balance;
        }
    }

    /// Round-trip the account into an edit payload. `opening_balance` stays
    /// `None` so an edit built from this draft preserves the balance.
    pub(crate) fn draft(&self) -> AccountDraft {
        AccountDraft {
            name: self.name.clone(),
            bank_name: self.bank_name.clone(),
            number: self.number.clone(),
            opening_balance: None,
            currency: self.currency.clone(),
            account_type: self.account_type,
            color: self.color.clone(),
            gl_account_id: self.gl_account_id.clone(),
        }
    }
}

/// Masked display form of an account number: everything but the last four
/// digits is dropped. Non-digit input characters (spaces, dashes) never
/// leak into the result.
pub(crate) fn mask_number(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() <= 4 {
        return digits;
    }
    let last4 = &digits[digits.len() - 4..];
    format!("•••• {last4}")
}
