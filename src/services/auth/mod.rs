pub mod factory;
pub mod verifier;

pub use factory::build_token_verifier;
pub use verifier::{Claims, TokenVerifier};
