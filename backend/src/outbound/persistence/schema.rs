//! Diesel table definitions. Must match `backend/migrations`.

diesel::table! {
    /// Topics articles are filed under.
    topics (slug) {
        slug -> Varchar,
        description -> Varchar,
    }
}

diesel::table! {
    /// Registered users.
    users (username) {
        username -> Varchar,
        name -> Varchar,
        avatar_url -> Varchar,
    }
}

diesel::table! {
    /// Articles. `comment_count` is never stored.
    articles (article_id) {
        article_id -> Int4,
        title -> Varchar,
        topic -> Varchar,
        author -> Varchar,
        body -> Text,
        created_at -> Timestamptz,
        votes -> Int4,
        article_img_url -> Varchar,
    }
}

diesel::table! {
    /// Comments on articles.
    comments (comment_id) {
        comment_id -> Int4,
        article_id -> Int4,
        author -> Varchar,
        body -> Text,
        votes -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(articles -> topics (topic));
diesel::joinable!(articles -> users (author));
diesel::joinable!(comments -> articles (article_id));
diesel::joinable!(comments -> users (author));

diesel::allow_tables_to_appear_in_same_query!(articles, comments, topics, users);
