//! User endpoints.
//!
//! ```text
//! GET /api/users
//! GET /api/users/butter_bridge
//! ```

use actix_web::{get, web};
use serde_json::json;

use crate::domain::{Error, Username};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{UserResponse, UsersResponse};
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::state::HttpState;

/// List every user.
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users", body = UsersResponse),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<UsersResponse>> {
    let users = state.users.list_users().await?;
    Ok(web::Json(UsersResponse {
        users: users.into_iter().map(Into::into).collect(),
    }))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/api/users/{username}",
    params(("username" = String, Path, description = "Username")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 404, description = "Unknown user", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{username}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponse>> {
    let raw = path.into_inner();
    let username = Username::new(raw.as_str()).map_err(|err| {
        Error::malformed_input(err.to_string())
            .with_details(json!({ "field": "username", "value": raw, "code": "invalid_username" }))
    })?;
    let user = state.users.get_user(&username).await?;
    Ok(web::Json(UserResponse { user: user.into() }))
}
