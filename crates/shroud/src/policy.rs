use std::time::SystemTime;

use tracing::debug;

use crate::{
    config::LicenseCheck,
    error::{LoaderError, LoaderResult},
};

/// License and expiration gate.
///
/// Evaluated strictly after successful decryption and strictly before the
/// plaintext reaches the shaper. Checking after authentication keeps policy
/// outcomes invisible to unauthenticated payloads; the decrypt-first cost is
/// deliberate (matching the observable timing of the original behavior).
pub struct PolicyGate {
    license_check: Option<LicenseCheck>,
    expire_at: Option<SystemTime>,
}

impl PolicyGate {
    pub fn new(license_check: Option<LicenseCheck>, expire_at: Option<SystemTime>) -> Self {
        Self {
            license_check,
            expire_at,
        }
    }

    /// # Errors
    ///
    /// [`LoaderError::License`] when the predicate evaluates false;
    /// [`LoaderError::Expired`] when the current time exceeds `expire_at`.
    pub fn check(&self) -> LoaderResult<()> {
        if let Some(ref check) = self.license_check {
            if !check() {
                debug!("license predicate rejected payload");
                return Err(LoaderError::License);
            }
        }

        if let Some(expire_at) = self.expire_at {
            if SystemTime::now() > expire_at {
                debug!("payload past expiration instant");
                return Err(LoaderError::Expired);
            }
        }

        Ok(())
    }
}
