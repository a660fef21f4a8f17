/*
 * Responsibility
 * - middleware の公開インターフェース
 * - bearer_auth: /api 配下の認証、http / security_headers: 全体に掛ける横断的関心事
 */
pub mod bearer_auth;
pub mod http;
pub mod security_headers;
