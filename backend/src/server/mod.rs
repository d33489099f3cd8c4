//! Server construction and wiring of adapters into the domain services.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App, HttpServer};
#[cfg(debug_assertions)]
use utoipa::OpenApi;

#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::domain::{AuthenticationService, CaseManagementService};
use backend::inbound::http;
use backend::inbound::http::state::HttpState;
use backend::outbound::persistence::{DieselCaseRepository, DieselUserRepository};
use backend::outbound::security::{Argon2PasswordHasher, JwtTokenService};

fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let tokens = Arc::new(JwtTokenService::new(&config.jwt_secret, config.token_ttl));
    let cases = CaseManagementService::new(Arc::new(DieselCaseRepository::new(
        config.db_pool.clone(),
    )));
    let auth = AuthenticationService::new(
        Arc::new(DieselUserRepository::new(config.db_pool.clone())),
        Arc::new(Argon2PasswordHasher::default()),
        tokens.clone(),
    );
    web::Data::new(HttpState::new(Arc::new(cases), Arc::new(auth), tokens))
}

#[cfg(debug_assertions)]
async fn openapi_json() -> web::Json<utoipa::openapi::OpenApi> {
    web::Json(ApiDoc::openapi())
}

fn build_app(
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(http_state)
        .configure(http::configure);

    #[cfg(debug_assertions)]
    let app = app.route("/api-docs/openapi.json", web::get().to(openapi_json));

    app
}

/// Construct an Actix HTTP server from the provided configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let http_state = build_http_state(&config);
    let server = HttpServer::new(move || build_app(http_state.clone()))
        .bind(config.bind_addr)?
        .run();
    Ok(server)
}
