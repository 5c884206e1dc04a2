//! Per-call signing metadata.
//!
//! Every call gets a fresh context: the wall-clock timestamp and a
//! single-use nonce defend against replay, and the service name and
//! endpoint hostname pin the signature to its destination.

use chrono::Utc;
use uuid::Uuid;

use crate::constants::{META_HOSTNAME, META_METHOD, META_NONCE, META_SERVICE, META_TIMESTAMP};
use crate::params::{ParamValue, ParameterSet};

/// Metadata signed into a single request. Never reused across calls.
#[derive(Debug, Clone)]
pub struct SigningContext {
    pub service: String,
    pub hostname: String,
    pub timestamp: i64,
    pub nonce: String,
}

impl SigningContext {
    /// Capture a fresh context: current Unix time and a new random nonce.
    pub fn new(service: &str, hostname: &str) -> Self {
        Self {
            service: service.to_string(),
            hostname: hostname.to_string(),
            timestamp: Utc::now().timestamp(),
            nonce: Uuid::new_v4().simple().to_string(),
        }
    }

    /// Build the parameter set that gets canonicalized and signed.
    ///
    /// Positional arguments come first, keyed by decimal index, then the
    /// `__method` marker, then the four metadata entries in fixed order.
    /// The server rebuilds this exact layout, so the order is part of the
    /// wire contract.
    pub fn signing_params(&self, method: &str, args: &[ParamValue]) -> ParameterSet {
        let mut params = ParameterSet::new();
        for (index, arg) in args.iter().enumerate() {
            params.push(index.to_string(), arg.clone());
        }
        params.push(META_METHOD, method);
        params.push(META_SERVICE, self.service.as_str());
        params.push(META_HOSTNAME, self.hostname.as_str());
        params.push(META_TIMESTAMP, self.timestamp);
        params.push(META_NONCE, self.nonce.as_str());
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_the_documented_canonical_layout() {
        let context = SigningContext {
            service: "VpsService".to_string(),
            hostname: "api.example.com".to_string(),
            timestamp: 1700000000,
            nonce: "abc123".to_string(),
        };

        let params = context.signing_params("getVps", &["vps01".into()]);

        assert_eq!(
            params.encode(),
            "0=vps01&__method=getVps&__service=VpsService&__hostname=api.example.com&__timestamp=1700000000&__nonce=abc123"
        );
    }

    #[test]
    fn no_arguments_still_signs_metadata() {
        let context = SigningContext {
            service: "VpsService".to_string(),
            hostname: "api.example.com".to_string(),
            timestamp: 1700000000,
            nonce: "abc123".to_string(),
        };

        let params = context.signing_params("getVpses", &[]);

        assert_eq!(
            params.encode(),
            "__method=getVpses&__service=VpsService&__hostname=api.example.com&__timestamp=1700000000&__nonce=abc123"
        );
    }

    #[test]
    fn sequence_arguments_flatten_under_their_index() {
        let context = SigningContext {
            service: "VpsService".to_string(),
            hostname: "api.example.com".to_string(),
            timestamp: 1700000000,
            nonce: "abc123".to_string(),
        };

        let args = vec![
            ParamValue::from("vps01"),
            ParamValue::from(vec!["mail", "backup"]),
        ];
        let encoded = context.signing_params("orderAddon", &args).encode();

        assert!(encoded.starts_with("0=vps01&1[0]=mail&1[1]=backup&__method=orderAddon&"));
    }

    #[test]
    fn fresh_contexts_have_distinct_nonces() {
        let first = SigningContext::new("VpsService", "api.example.com");
        let second = SigningContext::new("VpsService", "api.example.com");

        assert_ne!(first.nonce, second.nonce);
        assert!(second.timestamp >= first.timestamp);
    }

    #[test]
    fn nonce_is_url_safe() {
        let context = SigningContext::new("VpsService", "api.example.com");
        assert!(context.nonce.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(context.nonce.len(), 32);
    }
}
