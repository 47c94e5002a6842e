use super::*;
use actix_web::Error;
use actix_web::HttpRequest;
use actix_web::ResponseError;
use actix_web::body::EitherBody;
use actix_web::dev::Service;
use actix_web::dev::ServiceRequest;
use actix_web::dev::ServiceResponse;
use actix_web::dev::Transform;
use actix_web::dev::forward_ready;
use actix_web::http::header;
use actix_web::web;
use futures::future::LocalBoxFuture;
use futures::future::Ready;

/// Where a protected request carries its token.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    /// `?token=<jwt>`
    #[default]
    Query,
    /// `Authorization: Bearer <jwt>`
    Header,
}

impl Transport {
    /// The raw token, if the request carries one in this location.
    pub fn extract(&self, request: &HttpRequest) -> Option<String> {
        let token = match self {
            // first occurrence wins when the parameter repeats
            Self::Query => web::Query::<Vec<(String, String)>>::from_query(request.query_string())
                .ok()
                .and_then(|query| {
                    query
                        .into_inner()
                        .into_iter()
                        .find(|(key, _)| key == TOKEN_PARAM)
                        .map(|(_, value)| value)
                }),
            Self::Header => request
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.strip_prefix("Bearer "))
                .map(|token| token.to_owned()),
        };
        token.filter(|token| !token.is_empty())
    }
}

impl std::str::FromStr for Transport {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "query" => Ok(Self::Query),
            "header" => Ok(Self::Header),
            other => Err(anyhow::anyhow!(
                "unknown token transport {:?}, expected \"query\" or \"header\"",
                other
            )),
        }
    }
}

/// Gate in front of protected routes. Requests without a valid, unexpired
/// token are answered here and never reach the wrapped service.
#[derive(Clone)]
pub struct TokenGate {
    crypto: web::Data<Crypto>,
    transport: Transport,
}

impl TokenGate {
    pub fn new(crypto: web::Data<Crypto>, transport: Transport) -> Self {
        Self { crypto, transport }
    }
}

impl<S, B> Transform<S, ServiceRequest> for TokenGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = TokenGateService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        futures::future::ok(TokenGateService {
            service,
            crypto: self.crypto.clone(),
            transport: self.transport,
        })
    }
}

pub struct TokenGateService<S> {
    service: S,
    crypto: web::Data<Crypto>,
    transport: Transport,
}

impl<S, B> Service<ServiceRequest> for TokenGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let token = self.transport.extract(req.request()).unwrap_or_default();
        match self.crypto.verify(&token) {
            Ok(claims) => {
                log::debug!("token accepted for {} on {}", claims.user(), req.path());
                let future = self.service.call(req);
                Box::pin(async move { future.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(e) => {
                log::info!("{} {} rejected: {}", req.method(), req.path(), e);
                let (request, _) = req.into_parts();
                let response = e.error_response().map_into_right_body();
                Box::pin(async move { Ok(ServiceResponse::new(request, response)) })
            }
        }
    }
}
