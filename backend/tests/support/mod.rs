//! Shared harness for the HTTP integration suites: the full `/api` scope
//! wired over the seeded in-memory store.

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::Value;

use news_backend::Trace;
use news_backend::inbound::http::api_scope;
use news_backend::inbound::http::error::route_not_found;
use news_backend::inbound::http::state::HttpState;
use news_backend::test_support::{InMemoryNewsStore, seeded_store};

/// Fresh copy of the seed data.
pub fn store() -> Arc<InMemoryNewsStore> {
    Arc::new(seeded_store())
}

/// App wired the way the server wires it, over `store`.
pub fn app(
    store: &Arc<InMemoryNewsStore>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    let state = HttpState::from_repositories(
        Arc::clone(store),
        Arc::clone(store),
        Arc::clone(store),
        Arc::clone(store),
    );
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .service(api_scope())
        .default_service(web::to(route_not_found))
}

/// Send a request and decode the JSON body (`Null` when empty).
pub async fn send<S, B>(app: &S, req: Request) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(app, req).await;
    let status = res.status();
    let body = test::read_body(res).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("response body is JSON")
    };
    (status, value)
}

/// Array under `key`, panicking with context when absent.
pub fn array<'a>(body: &'a Value, key: &str) -> &'a Vec<Value> {
    body.get(key)
        .and_then(Value::as_array)
        .unwrap_or_else(|| panic!("{key} array missing from {body}"))
}

pub fn int(value: &Value, key: &str) -> i64 {
    value
        .get(key)
        .and_then(Value::as_i64)
        .unwrap_or_else(|| panic!("{key} missing from {value}"))
}
