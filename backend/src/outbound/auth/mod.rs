//! Bearer token verification adapters.

mod config;
mod fingerprint;
mod jwt;

pub use config::{JwtConfigError, JwtSettings, build_verifier};
pub use fingerprint::key_fingerprint;
pub use jwt::JwtTokenVerifier;
