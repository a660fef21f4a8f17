/*
 * Responsibility
 * - GET /api/hello
 * - 検証済み claims をそのまま返す (middleware 通過が前提)
 */
use axum::Json;

use crate::api::dto::hello::{GREETING, HelloResponse};
use crate::api::extractors::Authenticated;

pub async fn hello(Authenticated(identity): Authenticated) -> Json<HelloResponse> {
    Json(HelloResponse {
        message: GREETING,
        user: identity.claims,
    })
}
