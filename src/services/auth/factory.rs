/// Factory: build `TokenVerifier` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::TokenVerifier;

pub fn build_token_verifier(config: &Config) -> Arc<TokenVerifier> {
    if config.jwt.secret_is_fallback {
        tracing::warn!(
            "JWT_SECRET is not set; using the built-in development secret. \
             Tokens signed with it are forgeable by anyone"
        );
    }

    Arc::new(TokenVerifier::new(&config.jwt))
}
