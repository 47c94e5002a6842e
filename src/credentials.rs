/// Login form fields. Lives only for the duration of the login request.
#[derive(serde::Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Checks a login against the single configured password.
pub struct Verifier {
    password: String,
}

impl Verifier {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
        }
    }
    /// Non-empty username AND exact password.
    pub fn verify(&self, credentials: &Credentials) -> bool {
        !credentials.username.is_empty()
            && !credentials.password.is_empty()
            && credentials.password == self.password
    }
}
