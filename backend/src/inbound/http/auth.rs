//! Bearer token authentication for HTTP handlers.
//!
//! Handlers take an [`Authenticated`] argument to require a verified caller.
//! The extractor reads `Authorization: Bearer <token>`, hands the token to the
//! [`TokenVerifier`](crate::domain::ports::TokenVerifier) held in
//! [`HttpState`], and rejects the request with `401` before the handler runs.

use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};
use tracing::{debug, error};

use crate::domain::ports::TokenVerificationError;
use crate::domain::{Error, Principal};
use crate::inbound::http::state::HttpState;

const BEARER_SCHEME: &str = "Bearer";

/// Verified caller of a protected endpoint.
#[derive(Debug, Clone)]
pub struct Authenticated(Principal);

impl Authenticated {
    /// The verified principal.
    pub fn principal(&self) -> &Principal {
        &self.0
    }
}

/// Extract the bearer token from the `Authorization` header.
fn bearer_token(req: &HttpRequest) -> Result<&str, Error> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("missing bearer token"))?
        .to_str()
        .map_err(|_| Error::unauthorized("authorization header is not valid ASCII"))?;

    let (scheme, token) = value
        .split_once(' ')
        .ok_or_else(|| Error::unauthorized("authorization header must use the Bearer scheme"))?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return Err(Error::unauthorized(
            "authorization header must use the Bearer scheme",
        ));
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(Error::unauthorized("missing bearer token"));
    }
    Ok(token)
}

fn map_verification_error(error: TokenVerificationError) -> Error {
    debug!(%error, "bearer token rejected");
    match error {
        TokenVerificationError::Expired => Error::unauthorized("bearer token expired"),
        _ => Error::unauthorized("invalid bearer token"),
    }
}

fn authenticate(req: &HttpRequest) -> Result<Authenticated, Error> {
    let state = req.app_data::<web::Data<HttpState>>().ok_or_else(|| {
        error!("HttpState not registered; cannot verify bearer tokens");
        Error::internal("authentication is not configured")
    })?;
    let token = bearer_token(req)?;
    let principal = state.tokens.verify(token).map_err(map_verification_error)?;
    debug!(
        subject = %principal.subject(),
        scopes = ?principal.scopes(),
        "bearer token accepted"
    );
    Ok(Authenticated(principal))
}

impl FromRequest for Authenticated {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
