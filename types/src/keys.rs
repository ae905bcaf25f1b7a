//! Key types for the account credential that signs ledger submissions.

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::ParseError;

/// A 32-byte Ed25519 public key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PublicKey(pub [u8; 32]);

/// A 32-byte Ed25519 private key (seed).
///
/// Does not implement `Serialize` or `Clone`, and `Debug` prints a placeholder,
/// to prevent accidental exposure. Key bytes are zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey(pub [u8; 32]);

/// A 64-byte Ed25519 signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature(pub [u8; 64]);

/// An Ed25519 key pair (public + private).
///
/// Use `journal_crypto::generate_keypair()` or `journal_crypto::keypair_from_private()`
/// to construct key pairs. This struct is intentionally just data.
pub struct KeyPair {
    pub public: PublicKey,
    pub private: PrivateKey,
}

impl PublicKey {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// `0x`-prefixed hex, the form the ledger's REST API expects.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl PrivateKey {
    /// Parse a private key from hex, with or without the `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, ParseError> {
        let digits = s.trim().trim_start_matches("0x");
        if digits.is_empty() {
            return Err(ParseError::Empty);
        }
        let mut decoded =
            hex::decode(digits).map_err(|e| ParseError::InvalidHex(e.to_string()))?;
        let result = match <[u8; 32]>::try_from(decoded.as_slice()) {
            Ok(bytes) => Ok(Self(bytes)),
            Err(_) => Err(ParseError::WrongLength {
                expected: 32,
                actual: decoded.len(),
            }),
        };
        decoded.zeroize();
        result
    }

    /// `0x`-prefixed hex of the key seed. Only for writing credential files.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(<redacted>)")
    }
}

impl Signature {
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}
