//! Diesel article and comment repositories against embedded PostgreSQL.
//!
//! The suites share one seeded fixture: seven articles over three topics with
//! repeated titles, votes and timestamps so ordering ties are exercised, a
//! fourth topic with no articles, and uneven comment counts.
//!
//! Tests stay synchronous and drive the async repositories through a runtime
//! owned by the context, matching how the pool is built.

use diesel::sql_query;
use diesel::sql_types::{BigInt, Int4};
use diesel::{QueryableByName, RunQueryDsl};
use news_backend::domain::article_query::{ArticleQuery, PageRequest, SortBy, SortOrder};
use news_backend::domain::error_classifier::classify;
use news_backend::domain::ports::{ArticleRepository, CommentRepository};
use news_backend::domain::{
    ArticleId, ArticleSummary, CommentDraft, CommentId, ErrorCode, NewComment, TopicSlug,
    VoteDelta,
};
use news_backend::outbound::persistence::{
    DbPool, DieselArticleRepository, DieselCommentRepository, PoolConfig,
};
use pg_embedded_setup_unpriv::TemporaryDatabase;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

#[path = "support/embedded_postgres.rs"]
mod embedded_postgres;

use embedded_postgres::{connect, handle_cluster_setup_failure, migrated_database, seed};

const ARTICLE_COUNT: u64 = 7;

const SEED: &str = "
INSERT INTO topics (slug, description) VALUES
    ('coding', 'code'), ('cooking', 'food'), ('football', 'ball'), ('quiet', 'nothing yet');
INSERT INTO users (username, name, avatar_url) VALUES
    ('ada', 'Ada', 'https://avatars.test/ada.png'),
    ('grace', 'Grace', 'https://avatars.test/grace.png'),
    ('linus', 'Linus', 'https://avatars.test/linus.png');
INSERT INTO articles (title, topic, author, body, created_at, votes) VALUES
    ('alpha', 'coding', 'grace', 'text', '2020-01-01T00:00:00Z', 5),
    ('bravo', 'cooking', 'ada', 'text', '2020-03-01T00:00:00Z', 0),
    ('charlie', 'coding', 'linus', 'text', '2020-02-01T00:00:00Z', 5),
    ('delta', 'football', 'ada', 'text', '2020-03-01T00:00:00Z', -2),
    ('echo', 'cooking', 'grace', 'text', '2019-12-31T00:00:00Z', 10),
    ('bravo', 'football', 'linus', 'text', '2020-04-01T00:00:00Z', 0),
    ('foxtrot', 'coding', 'ada', 'text', '2020-05-01T00:00:00Z', 1);
INSERT INTO comments (article_id, author, body)
    SELECT article_id, 'ada', 'first!' FROM articles, generate_series(1, 3)
    WHERE title IN ('alpha', 'charlie');
INSERT INTO comments (article_id, author, body)
    SELECT article_id, 'linus', 'agreed' FROM articles
    WHERE title = 'bravo' AND topic = 'cooking';
INSERT INTO comments (article_id, author, body)
    SELECT article_id, 'grace', 'nope' FROM articles, generate_series(1, 2)
    WHERE title = 'delta';
";

#[derive(QueryableByName)]
struct Tally {
    #[diesel(sql_type = BigInt)]
    total: i64,
}

struct TestContext {
    runtime: Runtime,
    articles: DieselArticleRepository,
    comments: DieselCommentRepository,
    database_url: String,
    _database: TemporaryDatabase,
}

impl TestContext {
    fn list(&self, query: &ArticleQuery) -> Vec<ArticleSummary> {
        self.runtime
            .block_on(self.articles.list(query))
            .expect("list articles")
    }

    fn count(&self, query: &ArticleQuery) -> u64 {
        self.runtime
            .block_on(self.articles.count(query))
            .expect("count articles")
    }

    fn raw_comment_count(&self, article_id: ArticleId) -> u64 {
        let mut conn = connect(&self.database_url).expect("raw connection");
        let tally: Tally =
            sql_query("SELECT COUNT(*) AS total FROM comments WHERE article_id = $1")
                .bind::<Int4, _>(article_id.get())
                .get_result(&mut conn)
                .expect("raw comment count");
        u64::try_from(tally.total).expect("non-negative count")
    }
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let database = migrated_database()?;
    let database_url = database.url().to_owned();
    seed(&database_url, SEED)?;

    let config = PoolConfig::new(database_url.as_str())
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(async { DbPool::new(config).await })
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        articles: DieselArticleRepository::new(pool.clone()),
        comments: DieselCommentRepository::new(pool),
        database_url,
        _database: database,
    })
}

#[fixture]
fn repo_context() -> Option<TestContext> {
    match setup_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn query(
    topic: Option<&str>,
    sort_by: SortBy,
    order: SortOrder,
    limit: u32,
    page: u32,
) -> ArticleQuery {
    ArticleQuery::new(
        topic.map(|slug| TopicSlug::new(slug).expect("seeded slug")),
        sort_by,
        order,
        PageRequest::new(limit, page).expect("valid page"),
    )
}

fn everything(sort_by: SortBy, order: SortOrder) -> ArticleQuery {
    query(None, sort_by, order, 100, 1)
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortValue {
    Text(String),
    Number(i64),
}

fn sort_value(summary: &ArticleSummary, sort_by: SortBy) -> SortValue {
    match sort_by {
        SortBy::Topic => SortValue::Text(summary.topic.as_str().to_owned()),
        SortBy::Author => SortValue::Text(summary.author.as_str().to_owned()),
        SortBy::Title => SortValue::Text(summary.title.clone()),
        SortBy::CreatedAt => SortValue::Number(summary.created_at.timestamp_micros()),
        SortBy::Votes => SortValue::Number(i64::from(summary.votes)),
        SortBy::CommentCount => {
            SortValue::Number(i64::try_from(summary.comment_count).expect("small count"))
        }
    }
}

fn article_ids(rows: &[ArticleSummary]) -> Vec<i32> {
    rows.iter().map(|row| row.article_id.get()).collect()
}

fn article_titled(ctx: &TestContext, title: &str, topic: &str) -> ArticleId {
    ctx.list(&everything(SortBy::default(), SortOrder::Desc))
        .into_iter()
        .find(|row| row.title == title && row.topic.as_str() == topic)
        .map(|row| row.article_id)
        .expect("seeded article")
}

#[rstest]
fn comment_counts_match_a_raw_tally(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        return;
    };

    let rows = ctx.list(&everything(SortBy::CommentCount, SortOrder::Desc));
    assert_eq!(rows.len(), 7);
    assert_eq!(
        rows.iter().map(|row| row.comment_count).sum::<u64>(),
        9,
        "seeded comments are all attributed"
    );

    for row in rows {
        let raw = ctx.raw_comment_count(row.article_id);
        assert_eq!(row.comment_count, raw, "listing for {}", row.article_id.get());

        let single = ctx
            .runtime
            .block_on(ctx.articles.find_by_id(row.article_id))
            .expect("find article")
            .expect("article exists");
        assert_eq!(single.summary.comment_count, raw, "lookup for {}", row.article_id.get());
    }
}

#[rstest]
#[case(None, ARTICLE_COUNT)]
#[case(Some("coding"), 3)]
#[case(Some("football"), 2)]
fn total_count_ignores_the_page_window(
    repo_context: Option<TestContext>,
    #[case] topic: Option<&str>,
    #[case] expected: u64,
) {
    let Some(ctx) = repo_context else {
        return;
    };

    for (limit, page) in [(1, 1), (2, 3), (3, 2), (5, 9), (100, 1)] {
        let windowed = query(topic, SortBy::CreatedAt, SortOrder::Desc, limit, page);
        assert_eq!(ctx.count(&windowed), expected, "limit={limit} page={page}");
    }
}

#[rstest]
fn pages_partition_the_collection(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        return;
    };

    let mut seen = Vec::new();
    for page in 1..=4 {
        let rows = ctx.list(&query(None, SortBy::Votes, SortOrder::Asc, 2, page));
        assert!(rows.len() <= 2);
        seen.extend(article_ids(&rows));
    }
    assert!(
        ctx.list(&query(None, SortBy::Votes, SortOrder::Asc, 2, 5))
            .is_empty()
    );

    let mut unique = seen.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(seen.len(), 7);
    assert_eq!(unique.len(), 7, "no article appears on two pages");
}

#[rstest]
fn every_sort_key_orders_rows_with_an_id_tie_break(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        return;
    };

    for sort_by in SortBy::ALL {
        for order in [SortOrder::Asc, SortOrder::Desc] {
            let rows = ctx.list(&everything(sort_by, order));
            assert_eq!(rows.len(), 7, "{} {order:?}", sort_by.as_str());

            let keyed: Vec<(SortValue, i32)> = rows
                .iter()
                .map(|row| (sort_value(row, sort_by), row.article_id.get()))
                .collect();
            let ordered = match order {
                SortOrder::Asc => keyed.is_sorted(),
                SortOrder::Desc => keyed.iter().rev().is_sorted(),
            };
            assert!(ordered, "{} {order:?} gave {:?}", sort_by.as_str(), article_ids(&rows));
        }
    }
}

#[rstest]
fn topic_without_articles_lists_nothing(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        return;
    };

    let quiet = query(Some("quiet"), SortBy::CreatedAt, SortOrder::Desc, 10, 1);
    assert!(ctx.list(&quiet).is_empty());
    assert_eq!(ctx.count(&quiet), 0);
}

#[rstest]
fn vote_overflow_is_classified_as_malformed_input(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        return;
    };
    let article_id = article_titled(&ctx, "bravo", "cooking");

    let maxed = ctx
        .runtime
        .block_on(ctx.articles.increment_votes(article_id, VoteDelta::new(i32::MAX)))
        .expect("first increment fits")
        .expect("article exists");
    assert_eq!(maxed.summary.votes, i32::MAX);

    let failure = ctx
        .runtime
        .block_on(ctx.articles.increment_votes(article_id, VoteDelta::new(1)))
        .expect_err("votes column overflows");
    assert_eq!(classify(failure).code(), ErrorCode::MalformedInput);

    let unchanged = ctx
        .runtime
        .block_on(ctx.articles.find_by_id(article_id))
        .expect("find article")
        .expect("article exists");
    assert_eq!(unchanged.summary.votes, i32::MAX);
}

#[rstest]
fn vote_on_missing_article_matches_no_row(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        return;
    };

    let missing = ArticleId::new(9999).expect("positive id");
    let outcome = ctx
        .runtime
        .block_on(ctx.articles.increment_votes(missing, VoteDelta::new(1)))
        .expect("update runs");
    assert_eq!(outcome, None);
}

#[rstest]
fn comment_lifecycle_updates_the_article_tally(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        return;
    };
    let article_id = article_titled(&ctx, "echo", "cooking");
    let draft = |body: &str| {
        NewComment::new(
            article_id,
            CommentDraft {
                author: "grace".to_owned(),
                body: body.to_owned(),
            },
        )
        .expect("valid comment")
    };

    let older = ctx
        .runtime
        .block_on(ctx.comments.insert(&draft("older")))
        .expect("insert comment");
    let newer = ctx
        .runtime
        .block_on(ctx.comments.insert(&draft("newer")))
        .expect("insert comment");
    assert_eq!(older.votes, 0);
    assert_eq!(older.article_id, article_id);

    let listed = ctx
        .runtime
        .block_on(ctx.comments.list_for_article(article_id, None))
        .expect("list comments");
    let ids: Vec<CommentId> = listed.iter().map(|comment| comment.comment_id).collect();
    assert_eq!(ids, vec![newer.comment_id, older.comment_id]);
    assert_eq!(ctx.raw_comment_count(article_id), 2);

    let voted = ctx
        .runtime
        .block_on(ctx.comments.increment_votes(older.comment_id, VoteDelta::new(-3)))
        .expect("vote on comment")
        .expect("comment exists");
    assert_eq!(voted.votes, -3);

    let removed = ctx
        .runtime
        .block_on(ctx.comments.delete(older.comment_id))
        .expect("delete comment");
    let removed_again = ctx
        .runtime
        .block_on(ctx.comments.delete(older.comment_id))
        .expect("delete comment");
    assert!(removed);
    assert!(!removed_again);

    let article = ctx
        .runtime
        .block_on(ctx.articles.find_by_id(article_id))
        .expect("find article")
        .expect("article exists");
    assert_eq!(article.summary.comment_count, 1);
}

#[rstest]
fn comment_on_missing_article_is_classified_as_not_found(repo_context: Option<TestContext>) {
    let Some(ctx) = repo_context else {
        return;
    };

    let orphan = NewComment::new(
        ArticleId::new(9999).expect("positive id"),
        CommentDraft {
            author: "ada".to_owned(),
            body: "hello?".to_owned(),
        },
    )
    .expect("valid comment");

    let failure = ctx
        .runtime
        .block_on(ctx.comments.insert(&orphan))
        .expect_err("foreign key rejects the insert");
    assert_eq!(classify(failure).code(), ErrorCode::NotFound);
}
