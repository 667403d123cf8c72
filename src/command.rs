//! Typed command interface between a front end and the ledger core

use std::fmt;

use crate::account::{AccountId, AccountRegistry, Amount};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    CreateAccount {
        pin: String,
    },
    ListAccounts,
    ShowBalance {
        id: AccountId,
    },
    Transfer {
        from: AccountId,
        to: AccountId,
        amount: Amount,
        pin: String,
    },
    Deposit {
        id: AccountId,
        amount: Amount,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Created(AccountId),
    Accounts(Vec<AccountId>),
    Balance { id: AccountId, balance: Amount },
    Transferred,
    Deposited,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Created(id) => write!(f, "Account created. Account number: {}", id),
            Outcome::Accounts(ids) => {
                write!(f, "Accounts:")?;
                if ids.is_empty() {
                    write!(f, "\n  (none)")?;
                }
                for id in ids {
                    write!(f, "\n  Account number: {}", id)?;
                }
                Ok(())
            }
            Outcome::Balance { id, balance } => {
                write!(f, "Balance of account {}: {}", id, balance)
            }
            Outcome::Transferred => write!(f, "Transfer completed."),
            Outcome::Deposited => write!(f, "Deposit completed."),
        }
    }
}

/// Run one command against `registry`
pub fn execute(registry: &AccountRegistry, command: Command) -> Result<Outcome> {
    match command {
        Command::CreateAccount { pin } => {
            let account = registry.create_account(&pin)?;
            Ok(Outcome::Created(account.id()))
        }
        Command::ListAccounts => Ok(Outcome::Accounts(
            registry.list().iter().map(|account| account.id()).collect(),
        )),
        Command::ShowBalance { id } => {
            let account = registry.find(id)?;
            Ok(Outcome::Balance {
                id,
                balance: account.balance(),
            })
        }
        Command::Transfer {
            from,
            to,
            amount,
            pin,
        } => {
            let source = registry.find(from)?;
            let destination = registry.find(to)?;
            source.transfer(&destination, amount, &pin)?;
            Ok(Outcome::Transferred)
        }
        Command::Deposit { id, amount } => {
            registry.find(id)?.deposit(amount)?;
            Ok(Outcome::Deposited)
        }
    }
}
