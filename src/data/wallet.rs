use alloy::signers::local::PrivateKeySigner;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("no signing key configured; pass --private-key or set PRIVATE_KEY")]
    NoWallet,
    #[error("signing key rejected: {0}")]
    Rejected(String),
}

/// Where signing-key material comes from. Injected so tests and other
/// front ends can substitute their own source.
pub trait KeySource {
    /// Raw hex-encoded private key, if any is configured.
    fn key_material(&self) -> Option<String>;
}

/// Key source backed by the parsed CLI config (`--private-key` / `PRIVATE_KEY`).
pub struct ConfigKeySource {
    key: Option<String>,
}

impl ConfigKeySource {
    pub fn new(key: Option<String>) -> Self {
        Self { key }
    }
}

impl KeySource for ConfigKeySource {
    fn key_material(&self) -> Option<String> {
        self.key.clone()
    }
}

/// Produce a signer from the injected key source.
///
/// Fails with `NoWallet` when no key material is configured at all, and with
/// `Rejected` when material is present but unusable. No retry; the caller
/// decides whether to continue without a signer.
pub fn load_signer(source: &dyn KeySource) -> Result<PrivateKeySigner, WalletError> {
    let raw = source.key_material().ok_or(WalletError::NoWallet)?;
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(WalletError::NoWallet);
    }
    raw.trim_start_matches("0x")
        .parse::<PrivateKeySigner>()
        .map_err(|e| WalletError::Rejected(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubKeySource(Option<&'static str>);

    impl KeySource for StubKeySource {
        fn key_material(&self) -> Option<String> {
            self.0.map(str::to_string)
        }
    }

    #[test]
    fn test_missing_key_is_no_wallet() {
        let result = load_signer(&StubKeySource(None));
        assert!(matches!(result, Err(WalletError::NoWallet)));
    }

    #[test]
    fn test_empty_key_is_no_wallet() {
        let result = load_signer(&StubKeySource(Some("   ")));
        assert!(matches!(result, Err(WalletError::NoWallet)));
    }

    #[test]
    fn test_garbage_key_is_rejected() {
        let result = load_signer(&StubKeySource(Some("not-a-key")));
        assert!(matches!(result, Err(WalletError::Rejected(_))));
    }

    #[test]
    fn test_truncated_key_is_rejected() {
        let result = load_signer(&StubKeySource(Some("0xabcdef")));
        assert!(matches!(result, Err(WalletError::Rejected(_))));
    }

    #[test]
    fn test_valid_key_loads() {
        let key = "0x0000000000000000000000000000000000000000000000000000000000000001";
        let result = load_signer(&StubKeySource(Some(key)));
        assert!(result.is_ok());
    }

    #[test]
    fn test_valid_key_without_prefix_loads() {
        let key = "0000000000000000000000000000000000000000000000000000000000000002";
        let result = load_signer(&StubKeySource(Some(key)));
        assert!(result.is_ok());
    }
}
