//! Balance-holding accounts

use std::ptr;
use std::time::Duration;

use parking_lot::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

use super::auth::PinCredential;
use super::types::{AccountId, Amount};
use crate::error::{LedgerError, Result};

pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_millis(500);

/// A single account. Balance changes go through `deposit` and `transfer`;
/// the id and credential never change after creation.
#[derive(Debug)]
pub struct Account {
    id: AccountId,
    credential: PinCredential,
    balance: Mutex<Amount>,
    lock_timeout: Duration,
}

impl Account {
    /// Create an account with an explicit id and a zero balance.
    ///
    /// Nothing here checks the id for uniqueness; use
    /// [`AccountRegistry::create_account`](super::AccountRegistry::create_account)
    /// to get an id that has not been issued before.
    pub fn new(id: AccountId, pin: &str) -> Result<Self> {
        let credential = PinCredential::derive(pin)?;

        Ok(Self {
            id,
            credential,
            balance: Mutex::new(Amount::ZERO),
            lock_timeout: DEFAULT_LOCK_TIMEOUT,
        })
    }

    /// Upper bound on how long a mutation waits for this account's lock
    pub fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    /// Current balance.
    ///
    /// Waits without a timeout: every writer holds this lock only for the
    /// arithmetic of one deposit or transfer, so the wait is bounded by that.
    pub fn balance(&self) -> Amount {
        *self.balance.lock()
    }

    pub fn authorize(&self, pin: &str) -> bool {
        self.credential.verify(pin)
    }

    /// Add funds. Zero is rejected and the balance is left untouched.
    pub fn deposit(&self, amount: Amount) -> Result<()> {
        if amount.is_zero() {
            warn!(account = %self.id, "Rejected deposit of zero");
            return Err(LedgerError::InvalidAmount);
        }

        let mut balance = self.lock_balance()?;
        *balance = balance.checked_add(amount).ok_or(LedgerError::Overflow)?;

        debug!(account = %self.id, %amount, balance = %*balance, "Deposit applied");
        Ok(())
    }

    /// Move `amount` from this account to `to`, authorized by this account's PIN.
    ///
    /// Checks run in order: PIN, amount, destination, funds. Both balances are
    /// locked (lower id first) before either is changed, so other callers see
    /// either the state before the transfer or the state after it.
    pub fn transfer(&self, to: &Account, amount: Amount, pin: &str) -> Result<()> {
        if !self.authorize(pin) {
            warn!(from = %self.id, to = %to.id, "Transfer rejected: wrong PIN");
            return Err(LedgerError::Unauthorized);
        }

        if amount.is_zero() {
            return Err(LedgerError::InvalidAmount);
        }

        if ptr::eq(self, to) {
            return Err(LedgerError::SelfTransfer);
        }

        let (mut source, mut destination) = if self.lock_order() < to.lock_order() {
            let source = self.lock_balance()?;
            let destination = to.lock_balance()?;
            (source, destination)
        } else {
            let destination = to.lock_balance()?;
            let source = self.lock_balance()?;
            (source, destination)
        };

        let debited = source.checked_sub(amount).ok_or_else(|| {
            warn!(from = %self.id, %amount, balance = %*source, "Transfer rejected: insufficient funds");
            LedgerError::InsufficientFunds
        })?;
        let credited = destination
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        *source = debited;
        *destination = credited;

        info!(from = %self.id, to = %to.id, %amount, "Transfer completed");
        Ok(())
    }

    fn lock_balance(&self) -> Result<MutexGuard<'_, Amount>> {
        self.balance
            .try_lock_for(self.lock_timeout)
            .ok_or_else(|| LedgerError::LockTimeout(format!("account {}", self.id)))
    }

    // Accounts from different registries may share an id; the address breaks the tie.
    fn lock_order(&self) -> (AccountId, usize) {
        (self.id, self as *const Self as usize)
    }
}
