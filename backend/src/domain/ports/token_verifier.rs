//! Driven port for bearer token verification.
//!
//! The HTTP layer hands raw bearer tokens to this port and receives a
//! [`Principal`] back. Signature algorithms, key material and claim rules stay
//! inside the adapter.

use crate::domain::Principal;

use super::define_port_error;

define_port_error! {
    /// Reasons a bearer token was rejected.
    pub enum TokenVerificationError {
        /// The token could not be decoded.
        Malformed { message: String } => "malformed bearer token: {message}",
        /// The token's `exp` claim is in the past.
        Expired => "bearer token expired",
        /// The signature does not match the configured key.
        InvalidSignature => "bearer token signature is invalid",
        /// Claims failed validation (issuer, audience, required claims).
        Rejected { message: String } => "bearer token rejected: {message}",
    }
}

/// Port for turning bearer tokens into verified principals.
#[cfg_attr(test, mockall::automock)]
pub trait TokenVerifier: Send + Sync {
    /// Verify `token` and return the caller it identifies.
    fn verify(&self, token: &str) -> Result<Principal, TokenVerificationError>;
}
