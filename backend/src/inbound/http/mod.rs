//! HTTP inbound adapter exposing the REST endpoints under `/api`.

pub mod articles;
pub mod comments;
pub mod dto;
pub mod error;
pub mod health;
pub mod index;
pub mod state;
pub mod topics;
pub mod users;
pub mod validation;

use actix_web::{Scope, web};

pub use error::ApiResult;

use self::error::{json_error_handler, path_error_handler, query_error_handler};

/// The `/api` scope with every endpoint and the extractor error handlers
/// that keep malformed requests inside the standard error envelope.
///
/// Handlers expect `web::Data<HttpState>` to be registered on the app.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use news_backend::inbound::http::api_scope;
/// use news_backend::inbound::http::state::HttpState;
///
/// let app = App::new()
///     .app_data(web::Data::new(HttpState::fixtures()))
///     .service(api_scope());
/// ```
pub fn api_scope() -> Scope {
    web::scope("/api")
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .service(index::get_api)
        .service(topics::list_topics)
        .service(articles::list_articles)
        .service(articles::create_article)
        .service(articles::get_article)
        .service(articles::vote_on_article)
        .service(articles::list_comments)
        .service(articles::post_comment)
        .service(comments::vote_on_comment)
        .service(comments::delete_comment)
        .service(users::list_users)
        .service(users::get_user)
}
