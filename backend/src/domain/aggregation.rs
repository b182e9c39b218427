//! Aggregation executor: a page of article summaries plus the total match
//! count, fetched concurrently.

use super::article_query::ArticleQuery;
use super::error_classifier::classify;
use super::ports::ArticleRepository;
use super::{ArticleSummary, Error};

/// One page of articles and the size of the whole filtered set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticlePage {
    pub articles: Vec<ArticleSummary>,
    pub total_count: u64,
}

/// Fetch the page and the total count concurrently, failing as soon as
/// either fetch fails.
pub async fn fetch_article_page<A>(articles: &A, query: &ArticleQuery) -> Result<ArticlePage, Error>
where
    A: ArticleRepository + ?Sized,
{
    let page = async { articles.list(query).await.map_err(classify) };
    let total = async { articles.count(query).await.map_err(classify) };
    let (articles, total_count) = tokio::try_join!(page, total)?;
    Ok(ArticlePage {
        articles,
        total_count,
    })
}
