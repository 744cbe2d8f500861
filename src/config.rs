use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono_tz::Tz;

use crate::navigation::parse_time_zone;
use crate::ranking::{FeaturedMetric, DEFAULT_FEATURED_LIMIT};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database path
    pub database_url: String,

    /// Address the HTTP server listens on
    pub bind_addr: SocketAddr,

    /// Zone used when a request does not name one
    pub default_time_zone: Tz,

    /// How long odds records stay cached
    pub odds_cache_ttl: Option<Duration>,

    /// How long arena and schedule records stay cached; `None` keeps them
    /// until a forced refresh
    pub schedule_cache_ttl: Option<Duration>,

    /// Number of games on the Featured tab
    pub featured_limit: usize,

    /// Metric the Featured tab is ranked by
    pub featured_metric: FeaturedMetric,

    /// Directory holding the article markdown files
    pub articles_dir: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let default_time_zone = var("DEFAULT_TIME_ZONE")
            .unwrap_or_else(|| "America/New_York".to_string());

        Ok(Config {
            database_url: var("DATABASE_URL").unwrap_or_else(|| "sqlite:data/odds.db".to_string()),

            bind_addr: var("BIND_ADDR")
                .unwrap_or_else(|| "127.0.0.1:3000".to_string())
                .parse()
                .context("BIND_ADDR must be a socket address like 127.0.0.1:3000")?,

            default_time_zone: parse_time_zone(&default_time_zone)
                .context("DEFAULT_TIME_ZONE must be an IANA zone name")?,

            odds_cache_ttl: Some(Duration::from_secs(
                var("ODDS_CACHE_TTL_SECS")
                    .unwrap_or_else(|| "7200".to_string())
                    .parse()
                    .context("ODDS_CACHE_TTL_SECS must be a valid number")?,
            )),

            schedule_cache_ttl: var("SCHEDULE_CACHE_TTL_SECS")
                .map(|secs| secs.parse().map(Duration::from_secs))
                .transpose()
                .context("SCHEDULE_CACHE_TTL_SECS must be a valid number")?,

            featured_limit: var("FEATURED_LIMIT")
                .unwrap_or_else(|| DEFAULT_FEATURED_LIMIT.to_string())
                .parse()
                .context("FEATURED_LIMIT must be a valid number")?,

            featured_metric: var("FEATURED_METRIC")
                .unwrap_or_else(|| FeaturedMetric::default().to_string())
                .parse()
                .context("FEATURED_METRIC must be kelly or probability")?,

            articles_dir: var("ARTICLES_DIR").unwrap_or_else(|| "content/articles".to_string()),
        })
    }
}
