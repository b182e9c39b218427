//! Builds the HTTP state from the configured storage.

use std::sync::Arc;

use actix_web::web;
use tracing::warn;

use news_backend::inbound::http::state::HttpState;
use news_backend::outbound::persistence::{
    DieselArticleRepository, DieselCommentRepository, DieselTopicRepository,
    DieselUserRepository,
};

use super::ServerConfig;

/// Diesel-backed services when a pool is configured, fixtures otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => HttpState::from_repositories(
            Arc::new(DieselArticleRepository::new(pool.clone())),
            Arc::new(DieselCommentRepository::new(pool.clone())),
            Arc::new(DieselTopicRepository::new(pool.clone())),
            Arc::new(DieselUserRepository::new(pool.clone())),
        ),
        None => {
            warn!("no database configured; serving empty fixture data");
            HttpState::fixtures()
        }
    };
    web::Data::new(state)
}
