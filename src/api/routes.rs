/*
 * Responsibility
 * - /api 配下の URL 構造を定義
 * - /api 配下全体に bearer middleware を掛ける (未定義パスも認証後に 404)
 * - 末尾スラッシュ付き (/api/hello/) も同じ handler で受ける
 */
use axum::{Router, http::StatusCode, routing::get};

use crate::api::handlers::hello::hello;
use crate::middleware::bearer_auth;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let router = Router::new()
        .route("/hello", get(hello))
        .route("/hello/", get(hello))
        .fallback(not_found);

    bearer_auth::apply(router, state)
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
