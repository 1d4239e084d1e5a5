//! Server settings loaded via OrthoConfig from CLI flags, `NAPCHART_*`
//! environment variables and configuration files.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use actix_web::cookie::Key;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::warn;
use zeroize::Zeroizing;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";
/// `Key::derive_from` needs at least this much master key material.
const SESSION_KEY_MIN_LEN: usize = 32;

/// Settings errors surfaced before the server starts.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
}

/// Runtime settings for the napchart server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "NAPCHART")]
pub struct AppSettings {
    /// Socket address to listen on. Defaults to `0.0.0.0:8080`.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without one the server runs on fixture adapters.
    pub database_url: Option<String>,
    /// File holding the session signing key material.
    pub session_key_file: Option<PathBuf>,
    /// Accept a random per-process session key when the key file is unreadable.
    #[ortho_config(default = false)]
    pub allow_ephemeral_session_key: bool,
    /// Drop the `Secure` attribute from session cookies (plain-HTTP development).
    #[ortho_config(default = false)]
    pub insecure_cookies: bool,
    /// Do not apply embedded migrations at startup.
    #[ortho_config(default = false)]
    pub skip_migrations: bool,
}

impl AppSettings {
    /// Parsed listen address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Configured key file, falling back to the mounted secret path.
    pub fn session_key_file(&self) -> &Path {
        self.session_key_file
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_SESSION_KEY_FILE))
    }

    pub fn cookie_secure(&self) -> bool {
        !self.insecure_cookies
    }

    pub fn run_migrations(&self) -> bool {
        !self.skip_migrations
    }

    /// Load the session key.
    ///
    /// An unreadable key file is fatal unless this is a debug build or
    /// ephemeral keys are allowed, in which case a random key is generated
    /// and sessions do not survive a restart. A short key is always fatal.
    pub fn session_key(&self) -> Result<Key, SettingsError> {
        let path = self.session_key_file();
        match std::fs::read(path) {
            Ok(bytes) => {
                let bytes = Zeroizing::new(bytes);
                if bytes.len() < SESSION_KEY_MIN_LEN {
                    return Err(SettingsError::KeyTooShort {
                        path: path.to_path_buf(),
                        length: bytes.len(),
                        min_len: SESSION_KEY_MIN_LEN,
                    });
                }
                Ok(Key::derive_from(&bytes))
            }
            Err(source) if cfg!(debug_assertions) || self.allow_ephemeral_session_key => {
                warn!(
                    path = %path.display(),
                    error = %source,
                    "using ephemeral session key; sessions reset on restart"
                );
                Ok(Key::generate())
            }
            Err(source) => Err(SettingsError::KeyRead {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}
