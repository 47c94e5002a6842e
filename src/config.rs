use super::*;
use anyhow::Context;
use anyhow::bail;

/// Process-wide settings, read once at startup and immutable afterwards.
#[derive(Clone)]
pub struct Config {
    secret: String,
    password: String,
    bind: String,
    window: std::time::Duration,
    transport: Transport,
    workers: Option<usize>,
}

impl Config {
    /// Defaults for everything but the secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            password: DEFAULT_PASSWORD.to_string(),
            bind: DEFAULT_BIND_ADDR.to_string(),
            window: TOKEN_VALIDITY,
            transport: Transport::default(),
            workers: None,
        }
    }

    /// Reads `JWT_SECRET` (required), `BIND_ADDR`, `LOGIN_PASSWORD`,
    /// `TOKEN_TTL`, `TOKEN_TRANSPORT` and `WORKERS`.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .context("JWT_SECRET must be set to a non-empty value")?;
        let mut config = Self::new(secret);
        if let Some(bind) = lookup("BIND_ADDR") {
            config.bind = bind;
        }
        if let Some(password) = lookup("LOGIN_PASSWORD") {
            config.password = password;
        }
        if let Some(ttl) = lookup("TOKEN_TTL") {
            let secs = ttl
                .trim()
                .parse::<u64>()
                .with_context(|| format!("TOKEN_TTL is not a number of seconds: {}", ttl))?;
            if secs == 0 {
                bail!("TOKEN_TTL must be positive");
            }
            config.window = std::time::Duration::from_secs(secs);
        }
        if let Some(transport) = lookup("TOKEN_TRANSPORT") {
            config.transport = transport.parse()?;
        }
        if let Some(workers) = lookup("WORKERS") {
            config.workers = Some(
                workers
                    .trim()
                    .parse()
                    .with_context(|| format!("WORKERS is not a count: {}", workers))?,
            );
        }
        Ok(config)
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }
    pub fn with_window(mut self, window: std::time::Duration) -> Self {
        self.window = window;
        self
    }
    pub fn with_transport(mut self, transport: Transport) -> Self {
        self.transport = transport;
        self
    }

    pub fn secret(&self) -> &[u8] {
        self.secret.as_bytes()
    }
    pub fn password(&self) -> &str {
        &self.password
    }
    pub fn bind(&self) -> &str {
        &self.bind
    }
    pub fn window(&self) -> std::time::Duration {
        self.window
    }
    pub fn transport(&self) -> Transport {
        self.transport
    }
    pub fn workers(&self) -> Option<usize> {
        self.workers
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("secret", &"<redacted>")
            .field("password", &"<redacted>")
            .field("bind", &self.bind)
            .field("window", &self.window)
            .field("transport", &self.transport)
            .field("workers", &self.workers)
            .finish()
    }
}
