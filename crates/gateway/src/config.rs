//! Process configuration, read once from the environment at startup.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use mfs_auth::{KeyError, Rs256Verifier};
use mfs_backend::{BackendClient, BackendError};

use crate::session::SessionCookie;

pub const PUBLIC_KEY_VAR: &str = "MFS_JWT_PUBLIC_KEY";
pub const PUBLIC_KEY_FILE_VAR: &str = "MFS_JWT_PUBLIC_KEY_FILE";
pub const BACKEND_URL_VAR: &str = "MFS_BACKEND_URL";
pub const BIND_ADDR_VAR: &str = "MFS_BIND_ADDR";
pub const ENV_VAR: &str = "MFS_ENV";

const DEFAULT_BACKEND_URL: &str = "http://localhost:5000/api/v1";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no JWT public key configured (set MFS_JWT_PUBLIC_KEY or MFS_JWT_PUBLIC_KEY_FILE)")]
    MissingPublicKey,

    #[error("failed to read JWT public key from {path}: {source}")]
    ReadPublicKey {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JWT public key: {0}")]
    InvalidPublicKey(#[from] KeyError),

    #[error("invalid MFS_BACKEND_URL: {0}")]
    InvalidBackendUrl(BackendError),

    #[error("invalid MFS_BIND_ADDR '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

/// Validated gateway configuration.
///
/// The verification key is parsed here, once; everything downstream shares it
/// read-only.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub verifier: Rs256Verifier,
    pub backend: BackendClient,
    pub bind_addr: SocketAddr,
    pub cookie: SessionCookie,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let pem = match (var(PUBLIC_KEY_VAR), var(PUBLIC_KEY_FILE_VAR)) {
            (Some(pem), _) => pem,
            (None, Some(path)) => {
                let path = PathBuf::from(path);
                std::fs::read_to_string(&path).map_err(|source| ConfigError::ReadPublicKey { path, source })?
            }
            (None, None) => return Err(ConfigError::MissingPublicKey),
        };
        let verifier = Rs256Verifier::from_pem(pem.as_bytes())?;

        let backend_url = var(BACKEND_URL_VAR).unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        let backend = BackendClient::new(&backend_url).map_err(ConfigError::InvalidBackendUrl)?;

        let bind = var(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind
            .parse()
            .map_err(|source| ConfigError::InvalidBindAddr { value: bind.clone(), source })?;

        let production = var(ENV_VAR).is_some_and(|v| v.trim().eq_ignore_ascii_case("production"));

        Ok(Self {
            verifier,
            backend,
            bind_addr,
            cookie: SessionCookie::new(production),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const PUBLIC_KEY: &str = include_str!("../../auth/testdata/signing.pub.pem");

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_only_the_key_is_set() {
        let config = GatewayConfig::from_lookup(lookup(&[(PUBLIC_KEY_VAR, PUBLIC_KEY)])).unwrap();
        assert_eq!(config.backend.base_url(), DEFAULT_BACKEND_URL);
        assert_eq!(config.bind_addr, "0.0.0.0:3000".parse().unwrap());
        assert!(!config.cookie.is_secure());
    }

    #[test]
    fn missing_key_is_fatal() {
        let err = GatewayConfig::from_lookup(lookup(&[(PUBLIC_KEY_VAR, "   ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingPublicKey));
    }

    #[test]
    fn unparseable_key_is_fatal() {
        let err = GatewayConfig::from_lookup(lookup(&[(PUBLIC_KEY_VAR, "not a pem")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPublicKey(_)));
    }

    #[test]
    fn unreadable_key_file_is_fatal() {
        let err = GatewayConfig::from_lookup(lookup(&[(PUBLIC_KEY_FILE_VAR, "/nonexistent/mfs/key.pem")])).unwrap_err();
        assert!(matches!(err, ConfigError::ReadPublicKey { .. }));
    }

    #[test]
    fn production_makes_cookie_secure() {
        let config = GatewayConfig::from_lookup(lookup(&[
            (PUBLIC_KEY_VAR, PUBLIC_KEY),
            (ENV_VAR, "Production"),
            (BACKEND_URL_VAR, "https://api.example.com/api/v1"),
            (BIND_ADDR_VAR, "127.0.0.1:8088"),
        ]))
        .unwrap();
        assert!(config.cookie.is_secure());
        assert_eq!(config.bind_addr.port(), 8088);
    }

    #[test]
    fn bad_bind_addr_and_backend_url_are_rejected() {
        assert!(matches!(
            GatewayConfig::from_lookup(lookup(&[(PUBLIC_KEY_VAR, PUBLIC_KEY), (BIND_ADDR_VAR, "nope")])),
            Err(ConfigError::InvalidBindAddr { .. })
        ));
        assert!(matches!(
            GatewayConfig::from_lookup(lookup(&[(PUBLIC_KEY_VAR, PUBLIC_KEY), (BACKEND_URL_VAR, "ftp://x")])),
            Err(ConfigError::InvalidBackendUrl(_))
        ));
    }
}
