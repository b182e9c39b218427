//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects every HTTP endpoint and wire schema. The document is
//! served by Swagger UI in debug builds, printed by the `openapi-dump`
//! binary, and used to build the `GET /api` endpoint index.

use utoipa::OpenApi;

use crate::inbound::http::dto::{
    ArticleDto, ArticleResponse, ArticleSummaryDto, ArticlesResponse, CommentDto,
    CommentResponse, CommentsResponse, NewArticleRequest, NewCommentRequest, TopicDto,
    TopicsResponse, UserDto, UserResponse, UsersResponse, VoteRequest,
};
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::index::EndpointIndex;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "News backend API",
        description = "Articles, comments, topics and users with aggregated comment counts.",
        license(name = "MIT", url = "https://opensource.org/license/mit")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::index::get_api,
        crate::inbound::http::topics::list_topics,
        crate::inbound::http::articles::list_articles,
        crate::inbound::http::articles::create_article,
        crate::inbound::http::articles::get_article,
        crate::inbound::http::articles::vote_on_article,
        crate::inbound::http::articles::list_comments,
        crate::inbound::http::articles::post_comment,
        crate::inbound::http::comments::vote_on_comment,
        crate::inbound::http::comments::delete_comment,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ArticleDto,
        ArticleResponse,
        ArticleSummaryDto,
        ArticlesResponse,
        CommentDto,
        CommentResponse,
        CommentsResponse,
        EndpointIndex,
        ErrorEnvelope,
        NewArticleRequest,
        NewCommentRequest,
        TopicDto,
        TopicsResponse,
        UserDto,
        UserResponse,
        UsersResponse,
        VoteRequest,
    )),
    tags(
        (name = "index", description = "Endpoint discovery"),
        (name = "articles", description = "Articles and their vote tallies"),
        (name = "comments", description = "Comments on articles"),
        (name = "topics", description = "Article topics"),
        (name = "users", description = "Read-only user directory"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    use super::*;

    fn object_properties(name: &str) -> Vec<String> {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components registered");
        let schema = components.schemas.get(name).expect("schema registered");
        match schema {
            RefOr::T(Schema::Object(object)) => object.properties.keys().cloned().collect(),
            _ => panic!("{name} is not a plain object schema"),
        }
    }

    #[rstest]
    fn comment_schema_uses_wire_names() {
        let properties = object_properties("CommentDto");
        for field in ["comment_id", "article_id", "author", "body", "votes", "created_at"] {
            assert!(properties.iter().any(|p| p == field), "missing {field}");
        }
    }

    #[rstest]
    fn error_envelope_schema_is_camel_case() {
        let properties = object_properties("ErrorEnvelope");
        assert!(properties.iter().any(|p| p == "traceId"));
        assert!(properties.iter().any(|p| p == "status"));
    }

    #[rstest]
    fn article_list_documents_pagination_parameters() {
        let doc = ApiDoc::openapi();
        let item = doc.paths.paths.get("/api/articles").expect("path registered");
        let get = item.get.as_ref().expect("GET documented");
        let names: Vec<_> = get
            .parameters
            .iter()
            .flatten()
            .map(|p| p.name.clone())
            .collect();
        for name in ["topic", "sort_by", "order", "limit", "page", "p"] {
            assert!(names.iter().any(|n| n == name), "missing {name}");
        }
    }
}
