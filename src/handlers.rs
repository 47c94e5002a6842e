use super::*;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::Responder;
use actix_web::ResponseError;
use actix_web::http::header::ContentType;
use actix_web::web;

const LOGIN_VIEW: &str = include_str!("../templates/login.html");

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Landing page. Only the session decides what is shown here.
pub async fn home(req: HttpRequest, sessions: web::Data<dyn SessionStore>) -> impl Responder {
    if sessions.is_logged_in(&req) {
        HttpResponse::Ok().body("logged in currently")
    } else {
        HttpResponse::Ok()
            .content_type(ContentType::html())
            .body(LOGIN_VIEW)
    }
}

pub async fn public() -> impl Responder {
    HttpResponse::Ok().body("For Public")
}

/// Reached only through [`TokenGate`].
pub async fn dashboard() -> impl Responder {
    HttpResponse::Ok().body("JWT is verified. Welcome to your dashboard!")
}

pub async fn login(
    crypto: web::Data<Crypto>,
    verifier: web::Data<Verifier>,
    sessions: web::Data<dyn SessionStore>,
    form: web::Form<Credentials>,
) -> impl Responder {
    if !verifier.verify(&form) {
        log::info!("login refused for {:?}", form.username);
        return AuthError::CredentialMismatch.error_response();
    }
    let token = match crypto.issue(&form.username) {
        Ok(token) => token,
        Err(e) => {
            log::error!("token encoding failed: {}", e);
            return HttpResponse::InternalServerError().body(e.to_string());
        }
    };
    log::info!("login accepted for {:?}", form.username);
    let mut response = HttpResponse::Ok();
    sessions.set_logged_in(&mut response);
    response.json(TokenResponse { token })
}

pub async fn logout(sessions: web::Data<dyn SessionStore>) -> impl Responder {
    let mut response = HttpResponse::Ok();
    sessions.clear(&mut response);
    response.body("Logged out")
}
