//! JWT bearer token verification.
//!
//! Validates signature and expiry on every token, plus issuer and audience
//! when configured. The `sub` claim becomes the principal's subject and the
//! space-separated `scope` claim its scopes.

use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;
use tracing::debug;

use crate::domain::Principal;
use crate::domain::ports::{TokenVerificationError, TokenVerifier};

#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    #[serde(default)]
    scope: Option<String>,
}

/// [`TokenVerifier`] backed by `jsonwebtoken`.
///
/// # Examples
/// ```
/// use book_catalog::domain::ports::TokenVerifier;
/// use book_catalog::outbound::auth::JwtTokenVerifier;
///
/// let verifier = JwtTokenVerifier::hs256(b"catalog-secret").with_issuer("https://id.example");
/// assert!(verifier.verify("not-a-jwt").is_err());
/// ```
#[derive(Clone)]
pub struct JwtTokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtTokenVerifier {
    /// Verify HS256 tokens signed with a shared secret.
    pub fn hs256(secret: &[u8]) -> Self {
        Self::from_key(DecodingKey::from_secret(secret), Algorithm::HS256)
    }

    /// Verify RS256 tokens against a PEM-encoded RSA public key.
    ///
    /// # Errors
    ///
    /// Returns the decoding error when `pem` is not a valid RSA key.
    pub fn rs256_pem(pem: &[u8]) -> Result<Self, JwtError> {
        let key = DecodingKey::from_rsa_pem(pem)?;
        Ok(Self::from_key(key, Algorithm::RS256))
    }

    fn from_key(key: DecodingKey, algorithm: Algorithm) -> Self {
        let mut validation = Validation::new(algorithm);
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation.validate_aud = false;
        Self { key, validation }
    }

    /// Require tokens to carry `iss == issuer`.
    ///
    /// Tokens without an `iss` claim are rejected.
    #[must_use]
    pub fn with_issuer(mut self, issuer: &str) -> Self {
        self.validation.set_issuer(&[issuer]);
        self.require_claim("iss");
        self
    }

    /// Require tokens to list `audience` in `aud`.
    ///
    /// Tokens without an `aud` claim are rejected.
    #[must_use]
    pub fn with_audience(mut self, audience: &str) -> Self {
        self.validation.set_audience(&[audience]);
        self.validation.validate_aud = true;
        self.require_claim("aud");
        self
    }

    fn require_claim(&mut self, claim: &str) {
        self.validation
            .required_spec_claims
            .insert(claim.to_owned());
    }
}

fn map_jwt_error(error: &JwtError) -> TokenVerificationError {
    match error.kind() {
        ErrorKind::ExpiredSignature => TokenVerificationError::expired(),
        ErrorKind::InvalidSignature => TokenVerificationError::invalid_signature(),
        ErrorKind::InvalidToken | ErrorKind::Base64(_) | ErrorKind::Json(_) | ErrorKind::Utf8(_) => {
            TokenVerificationError::malformed(error.to_string())
        }
        _ => TokenVerificationError::rejected(error.to_string()),
    }
}

impl TokenVerifier for JwtTokenVerifier {
    fn verify(&self, token: &str) -> Result<Principal, TokenVerificationError> {
        let data = decode::<Claims>(token, &self.key, &self.validation).map_err(|error| {
            debug!(%error, "bearer token failed verification");
            map_jwt_error(&error)
        })?;
        let Claims { sub, scope } = data.claims;
        let scopes = scope.as_deref().unwrap_or_default().split_whitespace();
        Ok(Principal::new(sub, scopes))
    }
}
