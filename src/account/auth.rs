//! PIN validation and one-way credentials

use std::fmt;

use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::error::{LedgerError, Result};

pub const PIN_LENGTH: usize = 4;
const SALT_LENGTH: usize = 16;

/// Check that a PIN is exactly four ASCII digits (leading zeros allowed)
pub fn validate_pin(pin: &str) -> Result<()> {
    if pin.len() == PIN_LENGTH && pin.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(LedgerError::InvalidPinFormat)
    }
}

/// Salted SHA-256 digest of a PIN. The PIN itself is never kept.
#[derive(Clone)]
pub struct PinCredential {
    salt: [u8; SALT_LENGTH],
    digest: [u8; 32],
}

impl PinCredential {
    /// Validate a PIN and derive its credential with a fresh random salt
    pub fn derive(pin: &str) -> Result<Self> {
        validate_pin(pin)?;

        let mut salt = [0u8; SALT_LENGTH];
        OsRng.fill_bytes(&mut salt);

        Ok(Self {
            salt,
            digest: digest_pin(&salt, pin),
        })
    }

    /// Check a candidate PIN against the stored digest.
    ///
    /// All bytes are compared, so the time taken does not depend on where the
    /// first mismatch is.
    pub fn verify(&self, pin: &str) -> bool {
        if validate_pin(pin).is_err() {
            return false;
        }

        let candidate = digest_pin(&self.salt, pin);
        self.digest
            .iter()
            .zip(candidate.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}

impl fmt::Debug for PinCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PinCredential(<redacted>)")
    }
}

fn digest_pin(salt: &[u8], pin: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(pin.as_bytes());
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_validation() {
        assert!(validate_pin("1234").is_ok());
        assert!(validate_pin("0007").is_ok());

        for bad in ["", "123", "12345", "12a4", " 123", "-123", "１２３４"] {
            assert_eq!(validate_pin(bad), Err(LedgerError::InvalidPinFormat), "{bad:?}");
        }
    }

    #[test]
    fn test_credential_verify() {
        let credential = PinCredential::derive("0042").unwrap();

        assert!(credential.verify("0042"));
        assert!(!credential.verify("0043"));
        assert!(!credential.verify("42"));
        assert!(!credential.verify(""));
    }

    #[test]
    fn test_credential_is_salted() {
        let a = PinCredential::derive("1234").unwrap();
        let b = PinCredential::derive("1234").unwrap();

        // Same PIN, different salts
        assert_ne!(a.digest, b.digest);
        assert!(a.verify("1234") && b.verify("1234"));
    }

    #[test]
    fn test_debug_does_not_leak() {
        let credential = PinCredential::derive("9876").unwrap();
        let shown = format!("{:?}", credential);

        assert!(!shown.contains("9876"));
        assert!(shown.contains("redacted"));
    }
}
