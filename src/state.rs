/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - 現状は token 検証器のみ (起動時に一度だけ生成、以後 read-only)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::services::auth::TokenVerifier;

#[derive(Clone, Debug)]
pub struct AppState {
    pub verifier: Arc<TokenVerifier>,
}

impl AppState {
    pub fn new(verifier: Arc<TokenVerifier>) -> Self {
        Self { verifier }
    }
}
