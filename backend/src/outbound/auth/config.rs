//! Verification key selection and loading.
//!
//! Exactly one key source must be configured: a shared HS256 secret or a
//! PEM-encoded RS256 public key on disk.

use std::path::{Path, PathBuf};

use tracing::info;
use zeroize::Zeroize;

use super::fingerprint::key_fingerprint;
use super::jwt::JwtTokenVerifier;

/// Token verification settings.
#[derive(Debug, Clone, Default)]
pub struct JwtSettings {
    /// Shared HS256 secret.
    pub secret: Option<String>,
    /// Path to an RS256 public key in PEM format.
    pub public_key_file: Option<PathBuf>,
    /// Required `iss` claim.
    pub issuer: Option<String>,
    /// Required `aud` entry.
    pub audience: Option<String>,
}

/// Errors raised while building a verifier from [`JwtSettings`].
#[derive(thiserror::Error, Debug)]
pub enum JwtConfigError {
    /// Neither a secret nor a public key file was configured.
    #[error("no token verification key configured; set a JWT secret or a public key file")]
    MissingKey,
    /// Both a secret and a public key file were configured.
    #[error("both a JWT secret and a public key file are configured; choose one")]
    ConflictingKeys,
    /// The configured secret is blank.
    #[error("JWT secret must not be empty")]
    EmptySecret,
    /// Reading the public key file failed.
    #[error("failed to read JWT public key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The public key file does not hold an RSA PEM key.
    #[error("JWT public key at {path} is not a valid RSA PEM key: {message}")]
    InvalidKey { path: PathBuf, message: String },
}

/// Build a [`JwtTokenVerifier`] from settings, logging the key fingerprint.
///
/// # Examples
/// ```
/// use book_catalog::outbound::auth::{JwtSettings, build_verifier};
///
/// let settings = JwtSettings {
///     secret: Some("catalog-secret".into()),
///     ..JwtSettings::default()
/// };
/// assert!(build_verifier(&settings).is_ok());
/// assert!(build_verifier(&JwtSettings::default()).is_err());
/// ```
pub fn build_verifier(settings: &JwtSettings) -> Result<JwtTokenVerifier, JwtConfigError> {
    let verifier = match (&settings.secret, &settings.public_key_file) {
        (Some(_), Some(_)) => return Err(JwtConfigError::ConflictingKeys),
        (None, None) => return Err(JwtConfigError::MissingKey),
        (Some(secret), None) => hs256_from_secret(secret)?,
        (None, Some(path)) => rs256_from_file(path)?,
    };

    let verifier = match settings.issuer.as_deref() {
        Some(issuer) => verifier.with_issuer(issuer),
        None => verifier,
    };
    Ok(match settings.audience.as_deref() {
        Some(audience) => verifier.with_audience(audience),
        None => verifier,
    })
}

fn hs256_from_secret(secret: &str) -> Result<JwtTokenVerifier, JwtConfigError> {
    if secret.trim().is_empty() {
        return Err(JwtConfigError::EmptySecret);
    }
    let mut bytes = secret.as_bytes().to_vec();
    let verifier = JwtTokenVerifier::hs256(&bytes);
    info!(
        algorithm = "HS256",
        fingerprint = %key_fingerprint(&bytes),
        "token verification key loaded"
    );
    bytes.zeroize();
    Ok(verifier)
}

fn rs256_from_file(path: &Path) -> Result<JwtTokenVerifier, JwtConfigError> {
    let pem = std::fs::read(path).map_err(|source| JwtConfigError::KeyRead {
        path: path.to_path_buf(),
        source,
    })?;
    let verifier = JwtTokenVerifier::rs256_pem(&pem).map_err(|err| JwtConfigError::InvalidKey {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    info!(
        algorithm = "RS256",
        path = %path.display(),
        fingerprint = %key_fingerprint(&pem),
        "token verification key loaded"
    );
    Ok(verifier)
}
