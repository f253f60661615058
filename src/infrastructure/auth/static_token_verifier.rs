use std::collections::HashMap;

use async_trait::async_trait;

use crate::application::ports::{AccessTokenVerifier, AuthError};
use crate::domain::AuthenticatedUser;

/// Resolves bearer tokens against a fixed token table loaded from configuration.
pub struct StaticTokenVerifier {
    tokens: HashMap<String, AuthenticatedUser>,
}

impl StaticTokenVerifier {
    pub fn new(entries: impl IntoIterator<Item = (String, AuthenticatedUser)>) -> Self {
        Self {
            tokens: entries
                .into_iter()
                .filter(|(token, _)| !token.trim().is_empty())
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[async_trait]
impl AccessTokenVerifier for StaticTokenVerifier {
    async fn verify(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AuthError::MissingToken);
        }
        self.tokens
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}
