//! Argon2id implementation of the [`PasswordHasher`] port.

use argon2::password_hash::{
    PasswordHash as PhcString, PasswordHasher as _, PasswordVerifier, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHasher, PasswordHasherError};

/// Hashes passwords with Argon2id and a random 16-byte salt.
#[derive(Clone)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    /// Hasher using the library's recommended cost parameters.
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }

    /// Hasher with explicit cost parameters.
    ///
    /// Verification reads the parameters embedded in the stored hash, so
    /// changing them does not invalidate existing accounts.
    pub fn with_params(params: Params) -> Self {
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }

    /// Cheapest parameters Argon2 accepts; for tests only.
    pub fn low_cost() -> Result<Self, PasswordHasherError> {
        let params = Params::new(Params::MIN_M_COST, Params::MIN_T_COST, Params::MIN_P_COST, None)
            .map_err(|err| PasswordHasherError::hash(err.to_string()))?;
        Ok(Self::with_params(params))
    }
}

impl Default for Argon2PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHasherError> {
        let mut salt_bytes = [0_u8; 16];
        rand::thread_rng().fill_bytes(&mut salt_bytes);
        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|err| PasswordHasherError::hash(err.to_string()))?;

        let encoded = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| PasswordHasherError::hash(err.to_string()))?
            .to_string();
        PasswordHash::new(encoded).map_err(|err| PasswordHasherError::hash(err.to_string()))
    }

    fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, PasswordHasherError> {
        let parsed = PhcString::new(hash.as_str())
            .map_err(|err| PasswordHasherError::malformed_hash(err.to_string()))?;
        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}
