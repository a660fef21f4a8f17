/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - 認証済みリクエストのコンテキスト（Identity）を handler に提供する
 * - HTTP / axum 依存は extract に閉じ込め、型定義は types に分離する
 *
 * Public API:
 * - Identity
 * - Authenticated
 */

mod extract;
mod types;

pub use extract::Authenticated;
pub use types::Identity;
