use super::*;
use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpServer;
use actix_web::middleware::Logger;
use actix_web::web;
use std::sync::Arc;

/// Shared, read-only request state built once from [`Config`].
#[derive(Clone)]
pub struct Gateway {
    crypto: web::Data<Crypto>,
    verifier: web::Data<Verifier>,
    sessions: web::Data<dyn SessionStore>,
    transport: Transport,
}

impl Gateway {
    pub fn new(config: &Config) -> Self {
        let sessions: Arc<dyn SessionStore> = Arc::new(CookieSession::from_config(config));
        Self {
            crypto: web::Data::new(Crypto::from_config(config)),
            verifier: web::Data::new(Verifier::new(config.password())),
            sessions: web::Data::from(sessions),
            transport: config.transport(),
        }
    }

    #[rustfmt::skip]
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.crypto.clone())
            .app_data(self.verifier.clone())
            .app_data(self.sessions.clone())
            .route("/", web::get().to(home))
            .route("/public", web::get().to(public))
            .route("/login", web::post().to(login))
            .route("/logout", web::post().to(logout))
            .service(
                web::resource("/auth")
                    .wrap(TokenGate::new(self.crypto.clone(), self.transport))
                    .route(web::get().to(dashboard)),
            );
    }
}

pub struct Server;

impl Server {
    pub async fn run(config: Config) -> Result<(), std::io::Error> {
        let gateway = Gateway::new(&config);
        log::info!("starting gateway on {}", config.bind());
        log::info!("tokens via {:?}, valid for {:?}", config.transport(), config.window());
        let server = HttpServer::new(move || {
            let gateway = gateway.clone();
            App::new()
                // %U leaves out the query string, which may carry a token
                .wrap(Logger::new("%m %U %s %Ts"))
                .wrap(
                    Cors::default()
                        .allow_any_origin()
                        .allow_any_method()
                        .allow_any_header(),
                )
                .configure(move |cfg| gateway.configure(cfg))
        });
        let server = match config.workers() {
            Some(workers) => server.workers(workers),
            None => server,
        };
        server.bind(config.bind())?.run().await
    }
}
