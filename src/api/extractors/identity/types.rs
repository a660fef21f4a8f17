/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が検証して request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - JWT の検証ロジックは middleware/services 側の責務
 */

use crate::services::auth::Claims;

/// 認証済みのリクエストに付与されるコンテキスト
///
/// - `claims` は検証済み token の payload そのまま (加工しない)
#[derive(Debug, Clone)]
pub struct Identity {
    pub claims: Claims,
}

impl Identity {
    pub fn new(claims: Claims) -> Self {
        Self { claims }
    }
}
