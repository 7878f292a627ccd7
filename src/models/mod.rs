mod account;
mod transaction;

pub(crate) use account::{mask_number, Account, AccountDraft, AccountId, AccountType};
pub(crate) use transaction::{DebitCredit, Transaction, TransactionDraft, TxnId, TxnStatus};
