//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{ServerConfig, ServerSettings};

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use news_backend::Trace;
#[cfg(debug_assertions)]
use news_backend::doc::ApiDoc;
use news_backend::inbound::http::api_scope;
use news_backend::inbound::http::error::route_not_found;
use news_backend::inbound::http::health::{HealthState, live, ready};
use news_backend::inbound::http::state::HttpState;

use state_builders::build_http_state;

fn build_app(
    health_state: web::Data<HealthState>,
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
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api_scope())
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app.default_service(web::to(route_not_found))
}

/// Construct the HTTP server and mark it ready once bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::{fixture, rstest};

    use super::*;
    use news_backend::middleware::TRACE_ID_HEADER;

    #[fixture]
    fn health_state() -> web::Data<HealthState> {
        web::Data::new(HealthState::new())
    }

    fn fixture_state() -> web::Data<HttpState> {
        build_http_state(&ServerConfig::new(SocketAddr::from(([127, 0, 0, 1], 0))))
    }

    fn get(uri: &str) -> actix_http::Request {
        test::TestRequest::get().uri(uri).to_request()
    }

    #[rstest]
    #[actix_web::test]
    async fn readiness_follows_health_state(health_state: web::Data<HealthState>) {
        let app = test::init_service(build_app(health_state.clone(), fixture_state())).await;

        let before = test::call_service(&app, get("/health/ready")).await;
        assert_eq!(before.status(), StatusCode::SERVICE_UNAVAILABLE);

        health_state.mark_ready();
        let after = test::call_service(&app, get("/health/ready")).await;
        assert_eq!(after.status(), StatusCode::OK);

        let liveness = test::call_service(&app, get("/health/live")).await;
        assert_eq!(liveness.status(), StatusCode::OK);
    }

    #[rstest]
    #[actix_web::test]
    async fn fixture_state_serves_the_api(health_state: web::Data<HealthState>) {
        let app = test::init_service(build_app(health_state, fixture_state())).await;

        let res = test::call_service(&app, get("/api/topics")).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().contains_key(TRACE_ID_HEADER));
    }

    #[rstest]
    #[actix_web::test]
    async fn unmatched_paths_use_the_error_envelope(health_state: web::Data<HealthState>) {
        let app = test::init_service(build_app(health_state, fixture_state())).await;

        let res = test::call_service(&app, get("/nope")).await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body.get("code"), Some(&serde_json::json!("not_found")));
    }

    #[rstest]
    #[actix_web::test]
    async fn create_server_marks_ready_once_bound(health_state: web::Data<HealthState>) {
        let config = ServerConfig::new(SocketAddr::from(([127, 0, 0, 1], 0)));

        let server = create_server(health_state.clone(), config).expect("server binds");

        assert!(health_state.is_ready());
        drop(server);
    }
}
