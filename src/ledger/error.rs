use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{AccountId, TxnId};

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum LedgerError {
    #[error("account {0} does not exist")]
    AccountNotFound(AccountId),

    #[error("transaction {0} does not exist")]
    TransactionNotFound(TxnId),

    #[error("transaction references unknown account {0}")]
    UnknownAccount(AccountId),

    #[error("transaction amount cannot be negative: {0}")]
    NegativeAmount(Decimal),
}

pub(crate) type Result<T> = std::result::Result<T, LedgerError>;
