//! Service configuration loaded via OrthoConfig.
//!
//! Values are layered from CLI flags, `CATALOG_*` environment variables and
//! an optional configuration file, over the defaults declared on the struct.

use std::net::SocketAddr;
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::auth::JwtSettings;

/// Error returned when the configured bind address cannot be parsed.
#[derive(Debug, thiserror::Error)]
#[error("invalid bind address {value:?}: {message}")]
pub struct BindAddrError {
    value: String,
    message: String,
}

/// Configuration values for the catalog service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CATALOG")]
pub struct AppSettings {
    /// Socket address the HTTP server listens on.
    #[ortho_config(default = "0.0.0.0:8080".to_owned())]
    pub bind_addr: String,
    /// PostgreSQL connection URL; the in-memory store is used when unset.
    pub database_url: Option<String>,
    /// Maximum number of pooled database connections.
    #[ortho_config(default = 10)]
    pub pool_max_size: u32,
    /// Shared HS256 secret for bearer tokens.
    pub jwt_secret: Option<String>,
    /// RS256 public key (PEM) for bearer tokens.
    pub jwt_public_key_file: Option<PathBuf>,
    /// Expected token issuer.
    pub jwt_issuer: Option<String>,
    /// Expected token audience.
    pub jwt_audience: Option<String>,
}

impl AppSettings {
    /// Parse the configured bind address.
    pub fn bind_addr(&self) -> Result<SocketAddr, BindAddrError> {
        self.bind_addr
            .trim()
            .parse()
            .map_err(|err: std::net::AddrParseError| BindAddrError {
                value: self.bind_addr.clone(),
                message: err.to_string(),
            })
    }

    /// Return the configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Return the configured issuer, ignoring blank values.
    pub fn jwt_issuer(&self) -> Option<&str> {
        self.jwt_issuer
            .as_deref()
            .map(str::trim)
            .filter(|issuer| !issuer.is_empty())
    }

    /// Collect the token verification settings.
    pub fn jwt_settings(&self) -> JwtSettings {
        JwtSettings {
            secret: self.jwt_secret.clone(),
            public_key_file: self.jwt_public_key_file.clone(),
            issuer: self.jwt_issuer().map(str::to_owned),
            audience: self.jwt_audience.clone(),
        }
    }
}
