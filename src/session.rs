use super::*;
use actix_web::HttpRequest;
use actix_web::HttpResponseBuilder;
use actix_web::cookie::Cookie;
use actix_web::cookie::CookieJar;
use actix_web::cookie::Key;
use actix_web::cookie::SameSite;

/// Server-side "logged in" flag carried across requests from one client.
/// Independent of bearer tokens: neither looks at the other.
pub trait SessionStore: Send + Sync {
    /// Mark the client behind this exchange as authenticated.
    fn set_logged_in(&self, response: &mut HttpResponseBuilder);
    /// Drop the flag. Clearing an already-clear session is fine.
    fn clear(&self, response: &mut HttpResponseBuilder);
    fn is_logged_in(&self, request: &HttpRequest) -> bool;
}

#[derive(Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
struct State {
    logged_in: bool,
}

/// Session state kept client-side in a signed cookie.
pub struct CookieSession {
    key: Key,
}

impl CookieSession {
    pub fn new(key: Key) -> Self {
        Self { key }
    }
    pub fn from_config(config: &Config) -> Self {
        Self::new(Crypto::cookie_key(config.secret()))
    }

    fn cookie(value: String) -> Cookie<'static> {
        Cookie::build(SESSION_COOKIE, value)
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .finish()
    }

    fn sign(&self, state: &State) -> Option<Cookie<'static>> {
        let value = serde_json::to_string(state)
            .inspect_err(|e| log::error!("session encoding failed: {}", e))
            .ok()?;
        let mut jar = CookieJar::new();
        jar.signed_mut(&self.key).add(Self::cookie(value));
        jar.get(SESSION_COOKIE).cloned()
    }

    fn state(&self, request: &HttpRequest) -> State {
        let mut jar = CookieJar::new();
        match request.cookie(SESSION_COOKIE) {
            Some(cookie) => jar.add_original(cookie),
            None => return State::default(),
        }
        jar.signed(&self.key)
            .get(SESSION_COOKIE)
            .and_then(|cookie| serde_json::from_str::<State>(cookie.value()).ok())
            .unwrap_or_default()
    }
}

impl SessionStore for CookieSession {
    fn set_logged_in(&self, response: &mut HttpResponseBuilder) {
        if let Some(cookie) = self.sign(&State { logged_in: true }) {
            response.cookie(cookie);
        }
    }
    fn clear(&self, response: &mut HttpResponseBuilder) {
        let mut cookie = Self::cookie(String::new());
        cookie.make_removal();
        response.cookie(cookie);
    }
    fn is_logged_in(&self, request: &HttpRequest) -> bool {
        self.state(request).logged_in
    }
}
