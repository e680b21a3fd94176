//! SecretCipher: seals plaintext for the vault.

use tracing::debug;

use vaultsync_client::{CancelSignal, VaultClient};
use vaultsync_core::Ciphertext;

use crate::error::{ReconcileError, Result};

/// Encrypts secrets through the vault's own public-key operation.
///
/// The public key is fetched on every call, never cached. There is no
/// decrypt counterpart.
pub struct SecretCipher<'a, V: ?Sized> {
    client: &'a V,
}

impl<'a, V: VaultClient + ?Sized> SecretCipher<'a, V> {
    pub fn new(client: &'a V) -> Self {
        Self { client }
    }

    /// Fetch the vault public key, then encrypt `plaintext` with it once.
    pub async fn encrypt(&self, plaintext: &str, cancel: &CancelSignal) -> Result<Ciphertext> {
        debug!("fetching vault public key");
        let public_key = cancel
            .run(self.client.get_public_key())
            .await
            .map_err(ReconcileError::encryption)?;

        cancel.check().map_err(ReconcileError::encryption)?;
        debug!(fingerprint = %public_key.fingerprint, "encrypting secret");
        self.client
            .encrypt(&public_key, plaintext)
            .map_err(ReconcileError::encryption)
    }
}
