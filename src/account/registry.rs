//! Account registry: issues account numbers and owns every account

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use super::auth::validate_pin;
use super::ledger::Account;
use super::types::AccountId;
use crate::config::{LedgerConfig, RegistryConfig};
use crate::error::{LedgerError, Result};

struct RegistryState {
    /// Creation order
    accounts: Vec<Arc<Account>>,
    index: HashMap<AccountId, usize>,
    rng: StdRng,
}

impl RegistryState {
    fn next_free_id(&mut self, settings: &RegistryConfig) -> Result<AccountId> {
        let capacity = u64::from(settings.id_max - settings.id_min) + 1;
        if self.accounts.len() as u64 >= capacity {
            return Err(LedgerError::CapacityExhausted);
        }

        for _ in 0..settings.max_id_attempts {
            let candidate = AccountId(self.rng.gen_range(settings.id_min..=settings.id_max));
            if !self.index.contains_key(&candidate) {
                return Ok(candidate);
            }
        }

        warn!(
            issued = self.accounts.len(),
            attempts = settings.max_id_attempts,
            "Gave up looking for a free account number"
        );
        Err(LedgerError::CapacityExhausted)
    }
}

/// Owner and factory of all accounts.
///
/// Callers get shared handles; a deposit made through one handle is visible
/// through every other handle to the same account.
pub struct AccountRegistry {
    state: RwLock<RegistryState>,
    settings: RegistryConfig,
    lock_timeout: Duration,
}

impl AccountRegistry {
    /// Registry with default settings and an entropy-seeded id source
    pub fn new() -> Self {
        Self::build(&LedgerConfig::default(), StdRng::from_entropy())
    }

    /// Registry configured from `config`
    pub fn from_config(config: &LedgerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, StdRng::from_entropy()))
    }

    /// Same as `from_config`, but ids come out in a reproducible sequence
    pub fn with_seed(config: &LedgerConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, StdRng::seed_from_u64(seed)))
    }

    fn build(config: &LedgerConfig, rng: StdRng) -> Self {
        Self {
            state: RwLock::new(RegistryState {
                accounts: Vec::new(),
                index: HashMap::new(),
                rng,
            }),
            settings: config.registry.clone(),
            lock_timeout: config.locks.timeout(),
        }
    }

    /// Create an account protected by `pin` under a fresh, never-issued id
    pub fn create_account(&self, pin: &str) -> Result<Arc<Account>> {
        // Reject bad PINs before touching shared state
        validate_pin(pin)?;

        let mut state = self
            .state
            .try_write_for(self.lock_timeout)
            .ok_or_else(|| LedgerError::LockTimeout("account registry".to_string()))?;

        let id = state.next_free_id(&self.settings)?;
        let account = Arc::new(Account::new(id, pin)?.with_lock_timeout(self.lock_timeout));

        let position = state.accounts.len();
        state.accounts.push(Arc::clone(&account));
        state.index.insert(id, position);

        info!(account = %id, total = state.accounts.len(), "Account created");
        Ok(account)
    }

    /// Look up an account by its exact id.
    ///
    /// Like `list`, this takes the read lock without a timeout; the write lock
    /// is only held while one account is numbered and inserted.
    pub fn find(&self, id: AccountId) -> Result<Arc<Account>> {
        let state = self.state.read();
        match state.index.get(&id) {
            Some(&position) => Ok(Arc::clone(&state.accounts[position])),
            None => {
                debug!(account = %id, "Account lookup missed");
                Err(LedgerError::NotFound(id))
            }
        }
    }

    /// All accounts in creation order
    pub fn list(&self) -> Vec<Arc<Account>> {
        self.state.read().accounts.clone()
    }

    pub fn len(&self) -> usize {
        self.state.read().accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for AccountRegistry {
    fn default() -> Self {
        Self::new()
    }
}
