/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON error body `{ "message": ... }`)
 * - 認証エラーは 2 種類のみ: token なし / token 不正
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum AppError {
    #[error("Missing authentication token")]
    MissingCredential,
    // Bad signature, malformed payload, expired and wrong algorithm all land here.
    #[error("Invalid token signature")]
    InvalidCredential,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingCredential | AppError::InvalidCredential => StatusCode::UNAUTHORIZED,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            message: self.to_string(),
        };

        (self.status(), Json(body)).into_response()
    }
}
