use serde::Serialize;

use crate::services::auth::Claims;

pub const GREETING: &str = "Hello from backend!";

#[derive(Debug, Serialize)]
pub struct HelloResponse {
    pub message: &'static str,
    pub user: Claims,
}
