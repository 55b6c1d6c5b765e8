//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::http::header;

use crate::domain::Principal;
use crate::domain::ports::{MockCatalogCommand, MockCatalogQuery, MockTokenVerifier};
use crate::inbound::http::state::HttpState;

/// Token accepted by [`accepting_verifier`].
pub const TEST_TOKEN: &str = "test-token";

/// Verifier that accepts [`TEST_TOKEN`] as subject `tester` and rejects
/// everything else as malformed.
pub fn accepting_verifier() -> MockTokenVerifier {
    let mut verifier = MockTokenVerifier::new();
    verifier.expect_verify().returning(|token| {
        if token == TEST_TOKEN {
            Ok(Principal::new("tester", ["openid"]))
        } else {
            Err(crate::domain::ports::TokenVerificationError::malformed(
                "unknown test token",
            ))
        }
    });
    verifier
}

/// `Authorization` header carrying [`TEST_TOKEN`].
pub fn bearer() -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {TEST_TOKEN}"))
}

/// State with the given catalog mocks and an [`accepting_verifier`].
pub fn state_with(query: MockCatalogQuery, command: MockCatalogCommand) -> HttpState {
    HttpState::new(
        Arc::new(query),
        Arc::new(command),
        Arc::new(accepting_verifier()),
    )
}

/// State with the given verifier and catalog mocks that expect no calls.
pub fn state_with_tokens(verifier: MockTokenVerifier) -> HttpState {
    HttpState::new(
        Arc::new(MockCatalogQuery::new()),
        Arc::new(MockCatalogCommand::new()),
        Arc::new(verifier),
    )
}
