//! Comment endpoints.
//!
//! ```text
//! PATCH  /api/comments/1 {"inc_votes":-1}
//! DELETE /api/comments/1
//! ```

use actix_web::{HttpResponse, delete, patch, web};

use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{CommentResponse, VoteRequest};
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_comment_id, parse_vote_delta};

/// Add `inc_votes` to a comment's votes.
#[utoipa::path(
    patch,
    path = "/api/comments/{comment_id}",
    params(("comment_id" = i32, Path, description = "Positive comment id")),
    request_body = VoteRequest,
    responses(
        (status = 200, description = "Updated comment", body = CommentResponse),
        (status = 400, description = "Malformed id or inc_votes", body = ErrorEnvelope),
        (status = 404, description = "Unknown comment", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["comments"],
    operation_id = "voteOnComment"
)]
#[patch("/comments/{comment_id}")]
pub async fn vote_on_comment(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<VoteRequest>,
) -> ApiResult<web::Json<CommentResponse>> {
    let comment_id = parse_comment_id(&path)?;
    let delta = parse_vote_delta(payload.into_inner().inc_votes)?;
    let comment = state
        .comment_commands
        .increment_votes(comment_id, delta)
        .await?;
    Ok(web::Json(CommentResponse {
        comment: comment.into(),
    }))
}

/// Delete a comment.
#[utoipa::path(
    delete,
    path = "/api/comments/{comment_id}",
    params(("comment_id" = i32, Path, description = "Positive comment id")),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 400, description = "Malformed id", body = ErrorEnvelope),
        (status = 404, description = "Unknown comment", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["comments"],
    operation_id = "deleteComment"
)]
#[delete("/comments/{comment_id}")]
pub async fn delete_comment(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let comment_id = parse_comment_id(&path)?;
    state.comment_commands.delete_comment(comment_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use mockall::predicate::eq;
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::domain::ports::MockCommentsCommand;
    use crate::domain::{CommentId, Error, VoteDelta};
    use crate::inbound::http::api_scope;

    async fn call(commands: MockCommentsCommand, req: test::TestRequest) -> (StatusCode, Vec<u8>) {
        let state = HttpState {
            comment_commands: Arc::new(commands),
            ..HttpState::fixtures()
        };
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(api_scope()),
        )
        .await;
        let res = test::call_service(&app, req.to_request()).await;
        let status = res.status();
        (status, test::read_body(res).await.to_vec())
    }

    #[rstest]
    #[actix_web::test]
    async fn delete_returns_no_content() {
        let mut commands = MockCommentsCommand::new();
        commands
            .expect_delete_comment()
            .with(eq(CommentId::new(3).expect("id")))
            .times(1)
            .return_once(|_| Ok(()));

        let (status, body) = call(commands, test::TestRequest::delete().uri("/api/comments/3")).await;

        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_empty());
    }

    #[rstest]
    #[actix_web::test]
    async fn delete_of_unknown_comment_is_not_found() {
        let mut commands = MockCommentsCommand::new();
        commands
            .expect_delete_comment()
            .return_once(|_| Err(Error::not_found("comment not found")));

        let (status, _) = call(commands, test::TestRequest::delete().uri("/api/comments/999")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[case("/api/comments/abc")]
    #[case("/api/comments/0")]
    #[case("/api/comments/99999999999")]
    #[actix_web::test]
    async fn malformed_ids_never_reach_the_port(#[case] uri: &str) {
        let mut commands = MockCommentsCommand::new();
        commands.expect_delete_comment().never();

        let (status, _) = call(commands, test::TestRequest::delete().uri(uri)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[rstest]
    #[case(json!({}))]
    #[case(json!({ "inc_votes": "cat" }))]
    #[actix_web::test]
    async fn vote_requires_an_integer_delta(#[case] body: serde_json::Value) {
        let mut commands = MockCommentsCommand::new();
        commands.expect_increment_votes().never();

        let (status, _) = call(
            commands,
            test::TestRequest::patch().uri("/api/comments/1").set_json(body),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[rstest]
    #[actix_web::test]
    async fn vote_passes_the_delta_through() {
        let mut commands = MockCommentsCommand::new();
        commands
            .expect_increment_votes()
            .with(eq(CommentId::new(1).expect("id")), eq(VoteDelta::new(-1)))
            .return_once(|_, _| Err(Error::not_found("comment not found")));

        let (status, _) = call(
            commands,
            test::TestRequest::patch()
                .uri("/api/comments/1")
                .set_json(json!({ "inc_votes": -1 })),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
