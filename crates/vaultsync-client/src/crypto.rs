//! Sealed-box encryption used by the in-memory vault.
//!
//! Each plaintext is sealed to the vault's X25519 public key: an ephemeral
//! key agreement derives a one-time ChaCha20-Poly1305 key, and the envelope
//! (ephemeral public key, nonce, ciphertext) is CBOR-encoded and hex-armored.
//! Only the holder of the vault's static secret can open it.

use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Key, Nonce,
};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use x25519_dalek::{EphemeralSecret, PublicKey as DalekPublicKey, StaticSecret};

use vaultsync_core::{Ciphertext, PublicKey};

use crate::error::{ClientError, Result};

const KEY_CONTEXT: &str = "vaultsync-sealed-secret-v0";

/// The vault's own key pair.
pub struct VaultKeyPair {
    secret: StaticSecret,
    public: DalekPublicKey,
}

impl VaultKeyPair {
    /// Generate a new random key pair.
    pub fn generate() -> Self {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self::from_bytes(bytes)
    }

    /// Create from seed bytes.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        let secret = StaticSecret::from(bytes);
        let public = DalekPublicKey::from(&secret);
        Self { secret, public }
    }

    /// The public half in the form the vault hands out.
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            fingerprint: fingerprint(self.public.as_bytes()),
            armored: hex::encode(self.public.as_bytes()),
        }
    }

    /// Open a sealed secret addressed to this key pair.
    pub fn open(&self, ciphertext: &Ciphertext) -> Result<String> {
        let envelope = SealedEnvelope::decode(ciphertext)?;
        let shared = self
            .secret
            .diffie_hellman(&DalekPublicKey::from(envelope.ephemeral_public));
        let cipher = cipher_for(shared.as_bytes(), &envelope.ephemeral_public);
        let plaintext = cipher
            .decrypt(Nonce::from_slice(&envelope.nonce), envelope.ciphertext.as_slice())
            .map_err(|e| ClientError::Decryption(e.to_string()))?;
        String::from_utf8(plaintext).map_err(|e| ClientError::Decryption(e.to_string()))
    }
}

/// Seal `plaintext` to an armored public key.
pub fn seal(public_key: &PublicKey, plaintext: &str) -> Result<Ciphertext> {
    let recipient = parse_public_key(public_key)?;

    let ephemeral = EphemeralSecret::random_from_rng(rand::thread_rng());
    let ephemeral_public = *DalekPublicKey::from(&ephemeral).as_bytes();
    let shared = ephemeral.diffie_hellman(&recipient);

    let cipher = cipher_for(shared.as_bytes(), &ephemeral_public);

    let mut nonce = [0u8; 12];
    rand::thread_rng().fill_bytes(&mut nonce);
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce), plaintext.as_bytes())
        .map_err(|e| ClientError::Encryption(e.to_string()))?;

    SealedEnvelope {
        ephemeral_public,
        nonce,
        ciphertext,
    }
    .encode()
}

fn parse_public_key(public_key: &PublicKey) -> Result<DalekPublicKey> {
    let bytes = hex::decode(&public_key.armored)
        .map_err(|e| ClientError::Encryption(format!("malformed public key: {e}")))?;
    let bytes: [u8; 32] = bytes
        .try_into()
        .map_err(|_| ClientError::Encryption("public key must be 32 bytes".into()))?;
    Ok(DalekPublicKey::from(bytes))
}

fn cipher_for(shared: &[u8; 32], ephemeral_public: &[u8; 32]) -> ChaCha20Poly1305 {
    let mut hasher = blake3::Hasher::new_derive_key(KEY_CONTEXT);
    hasher.update(shared);
    hasher.update(ephemeral_public);
    let key = hasher.finalize();
    ChaCha20Poly1305::new(Key::from_slice(key.as_bytes()))
}

fn fingerprint(public: &[u8; 32]) -> String {
    blake3::hash(public).to_hex().as_str()[..40].to_uppercase()
}

#[derive(Debug, Serialize, Deserialize)]
struct SealedEnvelope {
    ephemeral_public: [u8; 32],
    nonce: [u8; 12],
    ciphertext: Vec<u8>,
}

impl SealedEnvelope {
    fn encode(&self) -> Result<Ciphertext> {
        let mut buf = Vec::new();
        ciborium::into_writer(self, &mut buf)
            .map_err(|e| ClientError::Encryption(e.to_string()))?;
        Ok(Ciphertext(hex::encode(buf)))
    }

    fn decode(ciphertext: &Ciphertext) -> Result<Self> {
        let bytes = hex::decode(ciphertext.as_str())
            .map_err(|e| ClientError::Decryption(format!("malformed armor: {e}")))?;
        ciborium::from_reader(bytes.as_slice()).map_err(|e| ClientError::Decryption(e.to_string()))
    }
}
