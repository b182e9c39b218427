//! Topic endpoints.

use actix_web::{get, web};

use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::TopicsResponse;
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::state::HttpState;

/// List every topic.
#[utoipa::path(
    get,
    path = "/api/topics",
    responses(
        (status = 200, description = "Topics", body = TopicsResponse),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["topics"],
    operation_id = "listTopics"
)]
#[get("/topics")]
pub async fn list_topics(state: web::Data<HttpState>) -> ApiResult<web::Json<TopicsResponse>> {
    let topics = state.topics.list_topics().await?;
    Ok(web::Json(TopicsResponse {
        topics: topics.into_iter().map(Into::into).collect(),
    }))
}
