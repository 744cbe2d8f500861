use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::warn;

/// Entry of the article index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Article {
    pub slug: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub image: &'static str,
}

pub const ARTICLES: &[Article] = &[
    Article {
        slug: "what-is-sports-betting",
        title: "What Is Sports Betting?",
        description: "How wagers, odds and sportsbooks fit together.",
        image: "/images/articles/what-is-sports-betting.jpg",
    },
    Article {
        slug: "moneyline-bets",
        title: "Moneyline Bets",
        description: "Reading American odds and picking a straight-up winner.",
        image: "/images/articles/moneyline-bets.jpg",
    },
    Article {
        slug: "point-spread-bets",
        title: "Point Spread Bets",
        description: "Handicaps, covering the spread and the hook.",
        image: "/images/articles/point-spread-bets.jpg",
    },
];

/// Article with its markdown body
#[derive(Debug, Clone, Serialize)]
pub struct ArticlePage {
    #[serde(flatten)]
    pub article: Article,
    pub content: String,
}

/// Serves article bodies from `<dir>/<slug>.md`
#[derive(Debug, Clone)]
pub struct ArticleLibrary {
    dir: PathBuf,
}

impl ArticleLibrary {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn index(&self) -> &'static [Article] {
        ARTICLES
    }

    pub fn find(&self, slug: &str) -> Option<&'static Article> {
        ARTICLES.iter().find(|a| a.slug == slug)
    }

    /// Load an article. Unknown slugs and missing files yield `None`.
    pub async fn load(&self, slug: &str) -> Result<Option<ArticlePage>> {
        let Some(article) = self.find(slug) else {
            return Ok(None);
        };

        let path = self.dir.join(format!("{}.md", article.slug));
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("Article {} has no content file at {}", slug, path.display());
                return Ok(None);
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", path.display()))
            }
        };

        Ok(Some(ArticlePage {
            article: *article,
            content,
        }))
    }
}
