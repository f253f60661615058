use protocol_analysis::application::ports::{AccessTokenVerifier, AuthError};
use protocol_analysis::infrastructure::auth::StaticTokenVerifier;

use crate::helpers::user;

fn verifier() -> StaticTokenVerifier {
    StaticTokenVerifier::new([
        ("alpha-token".to_string(), user("1", "admin")),
        ("   ".to_string(), user("2", "blank")),
    ])
}

#[tokio::test]
async fn given_known_token_when_verifying_then_returns_user() {
    let user = verifier().verify("alpha-token").await.unwrap();
    assert_eq!(user.username, "admin");
}

#[tokio::test]
async fn given_unknown_token_when_verifying_then_invalid() {
    let err = verifier().verify("beta-token").await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidToken));
}

#[tokio::test]
async fn given_blank_token_when_verifying_then_missing() {
    let err = verifier().verify("  ").await.unwrap_err();
    assert!(matches!(err, AuthError::MissingToken));
}

#[test]
fn given_blank_configured_token_when_building_then_it_is_ignored() {
    assert_eq!(verifier().len(), 1);
}
