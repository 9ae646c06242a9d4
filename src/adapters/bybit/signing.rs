//! Bybit Signing
//!
//! V5 HMAC-SHA256 request signing.
//!
//! The signed string is `timestamp + api_key + recv_window + payload`, where
//! payload is the exact query string (GET) or the exact JSON body (POST).

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::adapters::errors::{ExchangeError, ExchangeResult};

use super::config::Credentials;

pub use crate::core::events::current_timestamp_ms as current_time_ms;

type HmacSha256 = Hmac<Sha256>;

/// `X-BAPI-SIGN-TYPE` value for HMAC signatures
pub const SIGN_TYPE_HMAC: &str = "2";

/// Lowercase hex HMAC-SHA256 of `message` keyed by `secret`
pub fn hmac_sha256_hex(secret: &str, message: &str) -> ExchangeResult<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| ExchangeError::AuthenticationFailed(format!("Invalid API secret: {}", e)))?;
    mac.update(message.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Compute the V5 signature for one request
pub fn sign(
    api_secret: &str,
    timestamp_ms: u64,
    api_key: &str,
    recv_window_ms: u64,
    payload: &str,
) -> ExchangeResult<String> {
    let message = format!("{}{}{}{}", timestamp_ms, api_key, recv_window_ms, payload);
    hmac_sha256_hex(api_secret, &message)
}

/// Authentication headers for a single signed request
#[derive(Debug, Clone)]
pub struct SignedHeaders {
    pub api_key: String,
    pub signature: String,
    pub timestamp_ms: u64,
    pub recv_window_ms: u64,
}

impl SignedHeaders {
    /// Sign `payload` with the current time
    pub fn new(
        credentials: &Credentials,
        recv_window_ms: u64,
        payload: &str,
    ) -> ExchangeResult<Self> {
        Self::at(credentials, current_time_ms(), recv_window_ms, payload)
    }

    /// Sign `payload` at a fixed timestamp
    pub fn at(
        credentials: &Credentials,
        timestamp_ms: u64,
        recv_window_ms: u64,
        payload: &str,
    ) -> ExchangeResult<Self> {
        let signature = sign(
            &credentials.api_secret,
            timestamp_ms,
            &credentials.api_key,
            recv_window_ms,
            payload,
        )?;
        Ok(Self {
            api_key: credentials.api_key.clone(),
            signature,
            timestamp_ms,
            recv_window_ms,
        })
    }

    /// Attach the `X-BAPI-*` headers to a request
    pub fn apply(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("X-BAPI-API-KEY", &self.api_key)
            .header("X-BAPI-SIGN", &self.signature)
            .header("X-BAPI-SIGN-TYPE", SIGN_TYPE_HMAC)
            .header("X-BAPI-TIMESTAMP", self.timestamp_ms.to_string())
            .header("X-BAPI-RECV-WINDOW", self.recv_window_ms.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hmac_sha256_rfc4231_case_2() {
        let sig = hmac_sha256_hex("Jefe", "what do ya want for nothing?").unwrap();
        assert_eq!(
            sig,
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn test_sign_concatenation_order() {
        let payload = "category=linear&symbol=ETHUSDT";
        let sig = sign("secret", 1_700_000_000_000, "key", 5000, payload).unwrap();
        let expected =
            hmac_sha256_hex("secret", "1700000000000key5000category=linear&symbol=ETHUSDT")
                .unwrap();
        assert_eq!(sig, expected);
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_sign_depends_on_payload() {
        let a = sign("secret", 1, "key", 5000, "{\"qty\":\"0.01\"}").unwrap();
        let b = sign("secret", 1, "key", 5000, "{\"qty\":\"0.02\"}").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_signed_headers_at_fixed_time() {
        let creds = Credentials::new("key", "secret");
        let headers = SignedHeaders::at(&creds, 42, 5000, "").unwrap();
        assert_eq!(headers.api_key, "key");
        assert_eq!(headers.timestamp_ms, 42);
        assert_eq!(headers.signature, sign("secret", 42, "key", 5000, "").unwrap());
    }

    #[test]
    fn test_signed_headers_now_uses_current_time() {
        let creds = Credentials::new("key", "secret");
        let before = current_time_ms();
        let headers = SignedHeaders::new(&creds, 5000, "").unwrap();
        assert!(headers.timestamp_ms >= before);
    }
}
