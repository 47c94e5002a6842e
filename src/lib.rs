//! Session and JWT authentication gateway.
//!
//! Guards protected routes behind two independent credentials: a signed
//! cookie session set at login, and a short-lived HS256 bearer token issued
//! at login and checked on every protected request. The two are never
//! reconciled; `/auth` only looks at the token and `/` only looks at the
//! session.
//!
//! ## Tokens
//!
//! - [`Claims`] — token payload (`user`, `expiration`)
//! - [`Crypto`] — signing and verification with the process secret
//! - [`TokenGate`] — middleware that rejects requests without a valid token
//! - [`Transport`] — where the gate looks for the token
//!
//! ## Login
//!
//! - [`Verifier`] — single static credential check
//! - [`SessionStore`] — logged-in flag over the request/response exchange
//! - [`CookieSession`] — signed cookie implementation of the store
mod claims;
mod config;
mod credentials;
mod crypto;
mod error;
mod handlers;
mod middleware;
mod server;
mod session;

pub use claims::*;
pub use config::*;
pub use credentials::*;
pub use crypto::*;
pub use error::*;
pub use handlers::*;
pub use middleware::*;
pub use server::*;
pub use session::*;

// ============================================================================
// DEFAULTS
// ============================================================================
/// Seconds a freshly issued token stays valid.
pub const TOKEN_VALIDITY: std::time::Duration = std::time::Duration::from_secs(60);
/// The one password the login form accepts unless overridden.
pub const DEFAULT_PASSWORD: &str = "123456";
/// Listen address unless overridden.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
/// Name of the cookie carrying the signed session.
pub const SESSION_COOKIE: &str = "session";
/// Query parameter carrying the token under [`Transport::Query`].
pub const TOKEN_PARAM: &str = "token";

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "server")]
pub fn log() -> anyhow::Result<()> {
    std::fs::create_dir_all("logs")?;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)?
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time))?,
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file])?;
    Ok(())
}

/// Register Ctrl+C handler for immediate (non-graceful) termination.
#[cfg(feature = "server")]
pub fn kys() {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!();
            log::warn!("interrupt received, exiting immediately");
            std::process::exit(0);
        }
    });
}
