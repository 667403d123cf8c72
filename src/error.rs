use thiserror::Error;

use crate::account::AccountId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("PIN must be exactly 4 digits")]
    InvalidPinFormat,
    #[error("Amount must be greater than zero")]
    InvalidAmount,
    #[error("PIN is incorrect")]
    Unauthorized,
    #[error("Insufficient funds")]
    InsufficientFunds,
    #[error("Account {0} not found")]
    NotFound(AccountId),
    #[error("Cannot transfer to the same account")]
    SelfTransfer,
    #[error("No free account numbers left")]
    CapacityExhausted,
    #[error("Balance overflow")]
    Overflow,
    #[error("Timed out waiting for {0}")]
    LockTimeout(String),
    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
