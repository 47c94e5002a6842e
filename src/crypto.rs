use super::*;
use chrono::DateTime;
use chrono::Utc;

/// HS256 token codec keyed by the process secret.
pub struct Crypto {
    encoding: jsonwebtoken::EncodingKey,
    decoding: jsonwebtoken::DecodingKey,
    validation: jsonwebtoken::Validation,
    window: std::time::Duration,
}

impl Crypto {
    pub fn new(secret: &[u8], window: std::time::Duration) -> Self {
        // expiry lives in the custom `expiration` claim, checked by hand after the signature
        let mut validation = jsonwebtoken::Validation::new(jsonwebtoken::Algorithm::HS256);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        Self {
            encoding: jsonwebtoken::EncodingKey::from_secret(secret),
            decoding: jsonwebtoken::DecodingKey::from_secret(secret),
            validation,
            window,
        }
    }
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.secret(), config.window())
    }
    pub fn window(&self) -> std::time::Duration {
        self.window
    }

    pub fn issue(&self, user: &str) -> Result<String, jsonwebtoken::errors::Error> {
        self.issue_at(user, Utc::now())
    }
    pub fn issue_at(
        &self,
        user: &str,
        now: DateTime<Utc>,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        self.encode(&Claims::new(user, now, self.window))
    }
    pub fn encode(&self, claims: &Claims) -> Result<String, jsonwebtoken::errors::Error> {
        jsonwebtoken::encode(
            &jsonwebtoken::Header::new(jsonwebtoken::Algorithm::HS256),
            claims,
            &self.encoding,
        )
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        self.verify_at(token, Utc::now())
    }
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, AuthError> {
        if token.is_empty() {
            return Err(AuthError::TokenMissing);
        }
        let claims = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .inspect_err(|e| log::debug!("token rejected: {}", e))
            .map_err(|_| AuthError::TokenInvalid)?;
        if claims.expired_at(now) {
            return Err(AuthError::TokenExpired);
        }
        Ok(claims)
    }

    /// Cookie signing key derived from the same secret.
    pub fn cookie_key(secret: &[u8]) -> actix_web::cookie::Key {
        use sha2::Digest;
        actix_web::cookie::Key::from(&sha2::Sha512::digest(secret))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const SECRET: &[u8] = b"8asbddfgbfgdkufghdukffcshkdiwsujd";

    fn crypto() -> Crypto {
        Crypto::new(SECRET, TOKEN_VALIDITY)
    }
    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 31, 12, 0, 0).unwrap()
    }

    #[test]
    fn accepts_within_window() {
        let crypto = crypto();
        let token = crypto.issue_at("alice", noon()).unwrap();
        let expected = Claims::new("alice", noon(), TOKEN_VALIDITY);
        for offset in [0, 1, 30, 59] {
            let now = noon() + chrono::Duration::seconds(offset);
            assert_eq!(crypto.verify_at(&token, now).unwrap(), expected);
        }
    }

    #[test]
    fn rejects_at_and_after_expiry() {
        let crypto = crypto();
        let token = crypto.issue_at("alice", noon()).unwrap();
        for offset in [60, 61, 3600] {
            let now = noon() + chrono::Duration::seconds(offset);
            assert_eq!(crypto.verify_at(&token, now), Err(AuthError::TokenExpired));
        }
    }

    #[test]
    fn fresh_token_verifies_now() {
        let crypto = crypto();
        let token = crypto.issue("alice").unwrap();
        assert_eq!(crypto.verify(&token).unwrap().user(), "alice");
    }

    #[test]
    fn empty_token_is_missing_not_invalid() {
        let crypto = crypto();
        assert_eq!(crypto.verify(""), Err(AuthError::TokenMissing));
        assert_eq!(crypto.verify("   "), Err(AuthError::TokenInvalid));
        assert_eq!(crypto.verify("garbage"), Err(AuthError::TokenInvalid));
    }

    #[test]
    fn any_tampered_byte_is_invalid() {
        let crypto = crypto();
        let token = crypto.issue_at("alice", noon()).unwrap();
        let now = noon() + chrono::Duration::seconds(1);
        for i in 0..token.len() {
            let mut bytes = token.clone().into_bytes();
            bytes[i] = match bytes[i] {
                b'A' => b'B',
                _ => b'A',
            };
            let forged = String::from_utf8(bytes).unwrap();
            assert_eq!(
                crypto.verify_at(&forged, now),
                Err(AuthError::TokenInvalid),
                "byte {} of {}",
                i,
                token
            );
        }
    }

    #[test]
    fn forged_expired_token_is_invalid_not_expired() {
        let crypto = crypto();
        let token = crypto.issue_at("alice", noon()).unwrap();
        let mut forged = token.clone();
        forged.pop();
        let now = noon() + chrono::Duration::seconds(3600);
        assert_eq!(crypto.verify_at(&forged, now), Err(AuthError::TokenInvalid));
    }

    #[test]
    fn other_secret_is_invalid() {
        let token = crypto().issue_at("alice", noon()).unwrap();
        let other = Crypto::new(b"another-secret", TOKEN_VALIDITY);
        assert_eq!(other.verify_at(&token, noon()), Err(AuthError::TokenInvalid));
    }

    #[test]
    fn unsigned_token_is_invalid() {
        let crypto = crypto();
        let token = crypto.issue_at("alice", noon()).unwrap();
        let mut parts = token.split('.');
        let payload = parts.nth(1).unwrap();
        // {"alg":"none","typ":"JWT"}
        let forged = format!("eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0.{}.", payload);
        assert_eq!(crypto.verify_at(&forged, noon()), Err(AuthError::TokenInvalid));
    }

    #[test]
    fn payload_without_claims_is_invalid() {
        let crypto = crypto();
        let key = jsonwebtoken::EncodingKey::from_secret(SECRET);
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &serde_json::json!({ "sub": "alice" }),
            &key,
        )
        .unwrap();
        assert_eq!(crypto.verify_at(&token, noon()), Err(AuthError::TokenInvalid));
    }

    #[test]
    fn cookie_key_is_deterministic() {
        let a = Crypto::cookie_key(SECRET);
        let b = Crypto::cookie_key(SECRET);
        assert_eq!(a.master(), b.master());
        assert_ne!(a.master(), Crypto::cookie_key(b"other").master());
    }
}
