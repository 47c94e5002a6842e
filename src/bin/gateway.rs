//! Gateway Binary
//!
//! Serves the public, login, logout and token-protected routes.
//! Requires JWT_SECRET; BIND_ADDR, LOGIN_PASSWORD, TOKEN_TTL,
//! TOKEN_TRANSPORT and WORKERS are optional.

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    gatekeep::log()?;
    gatekeep::kys();
    let config = gatekeep::Config::from_env()?;
    log::debug!("{:?}", config);
    gatekeep::Server::run(config).await?;
    Ok(())
}
