//! `GET /api`: a machine-readable index of every endpoint, derived from the
//! OpenAPI document so it cannot drift from the registered routes.

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use utoipa::openapi::OpenApi as OpenApiDocument;
use utoipa::openapi::path::Operation;
use utoipa::{OpenApi, ToSchema};

use crate::doc::ApiDoc;

/// Endpoint index keyed by `"<METHOD> <path>"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EndpointIndex {
    #[schema(value_type = Object)]
    pub endpoints: Map<String, Value>,
}

fn describe(operation: &Operation) -> Value {
    let description = operation
        .summary
        .clone()
        .or_else(|| operation.description.clone())
        .unwrap_or_default();
    json!({
        "description": description,
        "operationId": operation.operation_id,
    })
}

pub(crate) fn endpoint_index(document: &OpenApiDocument) -> EndpointIndex {
    let mut endpoints = Map::new();
    for (path, item) in &document.paths.paths {
        let operations = [
            ("GET", &item.get),
            ("POST", &item.post),
            ("PUT", &item.put),
            ("PATCH", &item.patch),
            ("DELETE", &item.delete),
        ];
        let present = operations
            .into_iter()
            .filter_map(|(method, operation)| operation.as_ref().map(|op| (method, op)));
        for (method, operation) in present {
            endpoints.insert(format!("{method} {path}"), describe(operation));
        }
    }
    EndpointIndex { endpoints }
}

/// Describe every available endpoint.
#[utoipa::path(
    get,
    path = "/api",
    responses((status = 200, description = "Endpoint index", body = EndpointIndex)),
    tags = ["index"],
    operation_id = "getApi"
)]
#[get("")]
pub async fn get_api() -> web::Json<EndpointIndex> {
    web::Json(endpoint_index(&ApiDoc::openapi()))
}
