//! The account credential that authorizes ledger submissions.

use journal_crypto::{derive_address, keypair_from_private, sign_message};
use journal_types::{AccountAddress, KeyPair, ParseError, PrivateKey, PublicKey, Signature};

/// Signing key plus the account address it controls.
///
/// Loaded once at startup and owned by the ledger client for the process
/// lifetime. The private key is zeroized when the credential is dropped.
pub struct AccountCredential {
    keypair: KeyPair,
    address: AccountAddress,
}

impl AccountCredential {
    pub fn new(private: PrivateKey) -> Self {
        let keypair = keypair_from_private(private);
        let address = derive_address(&keypair.public);
        Self { keypair, address }
    }

    /// Parse a hex private key, with or without the `0x` prefix.
    pub fn from_hex(private_key_hex: &str) -> Result<Self, ParseError> {
        PrivateKey::from_hex(private_key_hex).map(Self::new)
    }

    pub fn from_keypair(keypair: KeyPair) -> Self {
        let address = derive_address(&keypair.public);
        Self { keypair, address }
    }

    pub fn address(&self) -> AccountAddress {
        self.address
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.keypair.public
    }

    pub fn private_key_hex(&self) -> String {
        self.keypair.private.to_hex()
    }

    pub fn sign(&self, message: &[u8]) -> Signature {
        sign_message(message, &self.keypair.private)
    }
}

impl std::fmt::Debug for AccountCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountCredential")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use journal_crypto::verify_signature;

    #[test]
    fn address_matches_derivation() {
        let cred = AccountCredential::from_hex(&"11".repeat(32)).unwrap();
        assert_eq!(cred.address(), derive_address(cred.public_key()));
    }

    #[test]
    fn signatures_verify_under_public_key() {
        let cred = AccountCredential::from_hex(&format!("0x{}", "22".repeat(32))).unwrap();
        let sig = cred.sign(b"message");
        assert!(verify_signature(b"message", &sig, cred.public_key()));
    }

    #[test]
    fn debug_hides_key_material() {
        let cred = AccountCredential::from_hex(&"33".repeat(32)).unwrap();
        let text = format!("{cred:?}");
        assert!(!text.contains(&"33".repeat(32)));
        assert!(text.contains("address"));
    }

    #[test]
    fn bad_hex_is_rejected() {
        assert!(AccountCredential::from_hex("0xnothex").is_err());
        assert!(AccountCredential::from_hex("").is_err());
    }
}
