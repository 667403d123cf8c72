pub mod account;
pub mod command;
pub mod config;
pub mod error;
pub mod interactive;

pub use account::{Account, AccountId, AccountRegistry, Amount};
pub use command::{execute, Command, Outcome};
pub use config::LedgerConfig;
pub use error::{LedgerError, Result};
