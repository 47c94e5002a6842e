use actix_web::HttpResponse;
use actix_web::ResponseError;
use actix_web::http::StatusCode;
use actix_web::http::header;

/// Why a request was turned away. Every variant is terminal for the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Token is missing!")]
    TokenMissing,
    #[error("Token has expired")]
    TokenExpired,
    #[error("Invalid token")]
    TokenInvalid,
    #[error("Unable to verify")]
    CredentialMismatch,
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::TokenMissing => StatusCode::UNAUTHORIZED,
            Self::TokenExpired | Self::TokenInvalid | Self::CredentialMismatch => {
                StatusCode::FORBIDDEN
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());
        match self {
            Self::TokenMissing => response.json(serde_json::json!({ "Alert!": self.to_string() })),
            Self::TokenExpired | Self::TokenInvalid => {
                response.json(serde_json::json!({ "Message": self.to_string() }))
            }
            Self::CredentialMismatch => response
                .insert_header((
                    header::WWW_AUTHENTICATE,
                    r#"Basic realm: "Authentication Failed ""#,
                ))
                .body(self.to_string()),
        }
    }
}
