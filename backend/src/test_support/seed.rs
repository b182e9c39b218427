//! Seed data: three topics (one without articles), four users, thirteen
//! articles and eighteen comments, eleven of them on article 1.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use super::{InMemoryNewsStore, SteppingClock};
use crate::domain::{
    ArticleId, NewArticle, NewComment, Topic, TopicSlug, User, Username,
};

/// Instant the store's clock starts at; later than every seeded timestamp.
pub const SEED_EPOCH: (i32, u32, u32) = (2021, 1, 1);

const TOPICS: [(&str, &str); 3] = [
    ("mitch", "The man, the Mitch, the legend"),
    ("cats", "Not dogs"),
    ("paper", "what books are made of"),
];

const USERS: [(&str, &str, &str); 4] = [
    (
        "butter_bridge",
        "jonny",
        "https://www.healthytherapies.com/wp-content/uploads/2016/06/Lime3.jpg",
    ),
    (
        "icellusedkars",
        "sam",
        "https://avatars2.githubusercontent.com/u/24604688?s=460&v=4",
    ),
    (
        "rogersop",
        "paul",
        "https://avatars2.githubusercontent.com/u/24394918?s=400&v=4",
    ),
    (
        "lurker",
        "do_nothing",
        "https://www.golenbock.com/wp-content/uploads/2015/01/placeholder-user.png",
    ),
];

struct SeedArticle {
    title: &'static str,
    topic: &'static str,
    author: &'static str,
    body: &'static str,
    created_at: (i32, u32, u32, u32, u32),
    votes: i32,
}

const ARTICLES: [SeedArticle; 13] = [
    SeedArticle {
        title: "Living in the shadow of a great man",
        topic: "mitch",
        author: "butter_bridge",
        body: "I find this existence challenging",
        created_at: (2020, 7, 9, 20, 11),
        votes: 100,
    },
    SeedArticle {
        title: "Sony Vaio; or, The Laptop",
        topic: "mitch",
        author: "icellusedkars",
        body: "Call me Mitchell. Some years ago I decided to buy a laptop.",
        created_at: (2020, 10, 16, 5, 3),
        votes: 0,
    },
    SeedArticle {
        title: "Eight pug gifs that remind me of mitch",
        topic: "mitch",
        author: "icellusedkars",
        body: "some gifs",
        created_at: (2020, 11, 3, 9, 12),
        votes: 0,
    },
    SeedArticle {
        title: "Student SUES Mitch!",
        topic: "mitch",
        author: "rogersop",
        body: "We all love Mitch and his wonderful, unique typing style.",
        created_at: (2020, 5, 6, 1, 14),
        votes: 0,
    },
    SeedArticle {
        title: "UNCOVERED: catspiracy to bring down democracy",
        topic: "cats",
        author: "rogersop",
        body: "Bastet walks amongst us, and the cats are taking arms!",
        created_at: (2020, 8, 3, 13, 14),
        votes: 0,
    },
    SeedArticle {
        title: "A",
        topic: "mitch",
        author: "icellusedkars",
        body: "Delicious tin of cat food",
        created_at: (2020, 10, 18, 1, 0),
        votes: 0,
    },
    SeedArticle {
        title: "Z",
        topic: "mitch",
        author: "icellusedkars",
        body: "I was hungry.",
        created_at: (2020, 1, 7, 14, 8),
        votes: 0,
    },
    SeedArticle {
        title: "Does Mitch predate civilisation?",
        topic: "mitch",
        author: "icellusedkars",
        body: "Archaeologists have uncovered a gigantic statue from the dawn of humanity.",
        created_at: (2020, 4, 17, 1, 8),
        votes: 0,
    },
    SeedArticle {
        title: "They're not exactly dogs, are they?",
        topic: "mitch",
        author: "butter_bridge",
        body: "Well? Think about it.",
        created_at: (2020, 6, 6, 9, 10),
        votes: 0,
    },
    SeedArticle {
        title: "Seven inspirational thought leaders from Manchester UK",
        topic: "mitch",
        author: "rogersop",
        body: "Who are we kidding, there is only one, and it's Mitch!",
        created_at: (2020, 5, 14, 4, 15),
        votes: 0,
    },
    SeedArticle {
        title: "Am I a cat?",
        topic: "mitch",
        author: "icellusedkars",
        body: "Having run out of ideas for articles, I am staring at the wall.",
        created_at: (2020, 1, 15, 22, 21),
        votes: 0,
    },
    SeedArticle {
        title: "Moustache",
        topic: "mitch",
        author: "butter_bridge",
        body: "Have you seen the size of that thing?",
        created_at: (2020, 10, 11, 11, 24),
        votes: 0,
    },
    SeedArticle {
        title: "Another article about Mitch",
        topic: "mitch",
        author: "butter_bridge",
        body: "There will never be enough articles about Mitch!",
        created_at: (2020, 10, 11, 11, 24),
        votes: 0,
    },
];

struct SeedComment {
    article_id: i32,
    author: &'static str,
    body: &'static str,
    votes: i32,
    created_at: (i32, u32, u32, u32, u32),
}

const COMMENTS: [SeedComment; 18] = [
    SeedComment {
        article_id: 9,
        author: "butter_bridge",
        body: "Oh, I've got compassion running out of my nose, pal!",
        votes: 16,
        created_at: (2020, 4, 6, 12, 17),
    },
    SeedComment {
        article_id: 1,
        author: "butter_bridge",
        body: "The beautiful thing about treasure is that it exists.",
        votes: 14,
        created_at: (2020, 10, 31, 3, 3),
    },
    SeedComment {
        article_id: 1,
        author: "icellusedkars",
        body: "Replacing the quiet elegance of the dark suit and tie is a form of fashion suicide.",
        votes: 100,
        created_at: (2020, 3, 1, 1, 13),
    },
    SeedComment {
        article_id: 1,
        author: "icellusedkars",
        body: "I carry a log. Is it funny to you? It is not to me.",
        votes: -100,
        created_at: (2020, 2, 23, 12, 1),
    },
    SeedComment {
        article_id: 1,
        author: "icellusedkars",
        body: "I hate streaming noses",
        votes: 0,
        created_at: (2020, 11, 3, 21, 0),
    },
    SeedComment {
        article_id: 1,
        author: "icellusedkars",
        body: "I hate streaming eyes even more",
        votes: 0,
        created_at: (2020, 4, 11, 21, 2),
    },
    SeedComment {
        article_id: 1,
        author: "icellusedkars",
        body: "Lobster pot",
        votes: 0,
        created_at: (2020, 5, 15, 20, 19),
    },
    SeedComment {
        article_id: 1,
        author: "icellusedkars",
        body: "Delicious crackerbreads",
        votes: 0,
        created_at: (2020, 4, 14, 20, 19),
    },
    SeedComment {
        article_id: 1,
        author: "icellusedkars",
        body: "Superficially charming",
        votes: 0,
        created_at: (2020, 1, 1, 3, 8),
    },
    SeedComment {
        article_id: 3,
        author: "icellusedkars",
        body: "git push origin master",
        votes: 0,
        created_at: (2020, 6, 20, 7, 24),
    },
    SeedComment {
        article_id: 3,
        author: "icellusedkars",
        body: "Ambidextrous marsupial",
        votes: 0,
        created_at: (2020, 9, 19, 23, 10),
    },
    SeedComment {
        article_id: 1,
        author: "icellusedkars",
        body: "Massive intercranial brain haemorrhage",
        votes: 0,
        created_at: (2020, 3, 2, 7, 10),
    },
    SeedComment {
        article_id: 1,
        author: "icellusedkars",
        body: "Fruit pastilles",
        votes: 0,
        created_at: (2020, 6, 15, 10, 25),
    },
    SeedComment {
        article_id: 5,
        author: "icellusedkars",
        body: "What do you see? I have no idea where this will lead us.",
        votes: 16,
        created_at: (2020, 6, 9, 5, 0),
    },
    SeedComment {
        article_id: 5,
        author: "butter_bridge",
        body: "I am 100% sure that we're not completely sure.",
        votes: 1,
        created_at: (2020, 11, 24, 0, 8),
    },
    SeedComment {
        article_id: 6,
        author: "butter_bridge",
        body: "This is a bad article name",
        votes: 1,
        created_at: (2020, 10, 11, 15, 23),
    },
    SeedComment {
        article_id: 9,
        author: "icellusedkars",
        body: "The owls are not what they seem.",
        votes: 20,
        created_at: (2020, 3, 14, 17, 2),
    },
    SeedComment {
        article_id: 1,
        author: "butter_bridge",
        body: "This morning, I showered for nine minutes.",
        votes: 16,
        created_at: (2020, 7, 21, 0, 20),
    },
];

fn at((year, month, day, hour, minute): (i32, u32, u32, u32, u32)) -> DateTime<Utc> {
    match Utc.with_ymd_and_hms(year, month, day, hour, minute, 0).single() {
        Some(instant) => instant,
        None => panic!("seed timestamp {year}-{month}-{day} {hour}:{minute} is invalid"),
    }
}

fn valid<T, E: std::fmt::Display>(result: Result<T, E>, what: &str) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("seed {what} is invalid: {err}"),
    }
}

/// Build a store holding the seed data, with a clock starting at
/// [`SEED_EPOCH`] so newly inserted rows sort as the newest.
///
/// # Panics
/// Panics if the constant seed data is inconsistent.
pub fn seeded_store() -> InMemoryNewsStore {
    let (year, month, day) = SEED_EPOCH;
    let clock = SteppingClock::new(at((year, month, day, 0, 0)));
    let store = InMemoryNewsStore::new(Arc::new(clock));

    for (slug, description) in TOPICS {
        store.add_topic(Topic {
            slug: valid(TopicSlug::new(slug), "topic"),
            description: description.to_owned(),
        });
    }

    for (username, name, avatar_url) in USERS {
        store.add_user(User {
            username: valid(Username::new(username), "username"),
            name: name.to_owned(),
            avatar_url: avatar_url.to_owned(),
        });
    }

    for seed in ARTICLES {
        let article = NewArticle {
            author: valid(Username::new(seed.author), "author"),
            title: seed.title.to_owned(),
            body: seed.body.to_owned(),
            topic: valid(TopicSlug::new(seed.topic), "topic"),
            article_img_url:
                "https://images.pexels.com/photos/158651/news-newsletter-newspaper-information-158651.jpeg?w=700&h=700"
                    .to_owned(),
        };
        valid(store.add_article(article, at(seed.created_at), seed.votes), "article");
    }

    for seed in COMMENTS {
        let comment = NewComment {
            article_id: valid(ArticleId::new(seed.article_id), "article id"),
            author: valid(Username::new(seed.author), "author"),
            body: seed.body.to_owned(),
        };
        valid(store.add_comment(comment, at(seed.created_at), seed.votes), "comment");
    }

    store
}
