use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::JwtSettings;

/// Decoded access-token payload, kept verbatim.
///
/// Whatever the issuer put in the token (`sub`, `iat`, `exp`, custom claims)
/// is echoed back unchanged, so this is a JSON object rather than a typed struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(Map<String, Value>);

impl Claims {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn sub(&self) -> Option<&str> {
        self.get("sub").and_then(Value::as_str)
    }
}

/// HMAC (HS256/384/512) access-token verifier over the shared secret.
///
/// - Key material is intentionally not printable via Debug.
/// - `exp` / `nbf` are checked when the token carries them, but neither is required.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    pub fn new(settings: &JwtSettings) -> Self {
        let decoding_key = DecodingKey::from_secret(settings.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.set_required_spec_claims::<&str>(&[]);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = settings.leeway_seconds;

        if let Some(issuer) = &settings.issuer {
            validation.set_issuer(&[issuer]);
        }
        match &settings.audience {
            Some(audience) => validation.set_audience(&[audience]),
            // Without a configured audience an `aud` claim is accepted as-is.
            None => validation.validate_aud = false,
        }

        Self {
            decoding_key,
            validation,
        }
    }

    // Verify signature + registered claims and decode the payload.
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)?;

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
    use jsonwebtoken::errors::ErrorKind;
    use jsonwebtoken::{EncodingKey, Header};
    use serde_json::json;

    use super::*;

    const SECRET: &str = "unit-test-secret";

    fn settings() -> JwtSettings {
        JwtSettings {
            secret: SECRET.to_string(),
            secret_is_fallback: false,
            issuer: None,
            audience: None,
            leeway_seconds: 0,
        }
    }

    fn sign_with(alg: Algorithm, secret: &str, claims: &Value) -> String {
        jsonwebtoken::encode(
            &Header::new(alg),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn sign(claims: &Value) -> String {
        sign_with(Algorithm::HS256, SECRET, claims)
    }

    fn now() -> i64 {
        chrono::Utc::now().timestamp()
    }

    #[test]
    fn decodes_claims_verbatim() {
        let verifier = TokenVerifier::new(&settings());
        let claims = verifier.verify(&sign(&json!({ "sub": "u1" }))).unwrap();

        assert_eq!(serde_json::to_value(&claims).unwrap(), json!({ "sub": "u1" }));
        assert_eq!(claims.sub(), Some("u1"));
    }

    #[test]
    fn keeps_registered_and_custom_claims() {
        let verifier = TokenVerifier::new(&settings());
        let payload = json!({
            "sub": "u1",
            "iat": now(),
            "exp": now() + 3600,
            "roles": ["reader"],
        });

        let claims = verifier.verify(&sign(&payload)).unwrap();
        assert_eq!(serde_json::to_value(claims).unwrap(), payload);
    }

    #[test]
    fn accepts_every_hmac_algorithm() {
        let verifier = TokenVerifier::new(&settings());
        for alg in [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512] {
            let token = sign_with(alg, SECRET, &json!({ "sub": "u1" }));
            assert!(verifier.verify(&token).is_ok(), "{alg:?} should verify");
        }
    }

    #[test]
    fn rejects_wrong_secret() {
        let verifier = TokenVerifier::new(&settings());
        let token = sign_with(Algorithm::HS256, "someone-else", &json!({ "sub": "u1" }));

        let err = verifier.verify(&token).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidSignature));
    }

    #[test]
    fn rejects_expired_token() {
        let verifier = TokenVerifier::new(&settings());
        let token = sign(&json!({ "sub": "u1", "exp": now() - 120 }));

        let err = verifier.verify(&token).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::ExpiredSignature));
    }

    #[test]
    fn leeway_tolerates_recent_expiry() {
        let mut s = settings();
        s.leeway_seconds = 300;
        let verifier = TokenVerifier::new(&s);
        let token = sign(&json!({ "sub": "u1", "exp": now() - 120 }));

        assert!(verifier.verify(&token).is_ok());
    }

    #[test]
    fn rejects_token_not_yet_valid() {
        let verifier = TokenVerifier::new(&settings());
        let token = sign(&json!({ "sub": "u1", "nbf": now() + 3600 }));

        let err = verifier.verify(&token).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::ImmatureSignature));
    }

    #[test]
    fn rejects_malformed_input() {
        let verifier = TokenVerifier::new(&settings());
        for token in ["", "garbage", "a.b", "a.b.c", "a.b.c.d"] {
            assert!(verifier.verify(token).is_err(), "{token:?} should fail");
        }
    }

    #[test]
    fn rejects_unsigned_token() {
        let verifier = TokenVerifier::new(&settings());
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(r#"{"sub":"u1"}"#);
        let token = format!("{header}.{payload}.");

        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn rejects_tampered_payload() {
        let verifier = TokenVerifier::new(&settings());
        let token = sign(&json!({ "sub": "u1" }));
        let mut parts: Vec<&str> = token.split('.').collect();
        let forged = URL_SAFE_NO_PAD.encode(r#"{"sub":"admin"}"#);
        parts[1] = &forged;

        let err = verifier.verify(&parts.join(".")).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidSignature));
    }

    #[test]
    fn audience_is_ignored_unless_configured() {
        let verifier = TokenVerifier::new(&settings());
        let token = sign(&json!({ "sub": "u1", "aud": "some-api" }));

        assert!(verifier.verify(&token).is_ok());
    }

    #[test]
    fn configured_issuer_and_audience_are_enforced() {
        let mut s = settings();
        s.issuer = Some("https://issuer.example".to_string());
        s.audience = Some("hello-backend".to_string());
        let verifier = TokenVerifier::new(&s);

        let good = sign(&json!({
            "sub": "u1",
            "iss": "https://issuer.example",
            "aud": "hello-backend",
        }));
        assert!(verifier.verify(&good).is_ok());

        let wrong_aud = sign(&json!({
            "sub": "u1",
            "iss": "https://issuer.example",
            "aud": "other",
        }));
        let err = verifier.verify(&wrong_aud).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidAudience));

        let wrong_iss = sign(&json!({
            "sub": "u1",
            "iss": "https://elsewhere.example",
            "aud": "hello-backend",
        }));
        let err = verifier.verify(&wrong_iss).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidIssuer));
    }

    #[test]
    fn debug_output_hides_key() {
        let verifier = TokenVerifier::new(&settings());
        assert!(!format!("{verifier:?}").contains(SECRET));
    }
}
