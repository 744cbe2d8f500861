use std::env;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use odds_board::db::SqliteRecordStore;
use odds_board::models::{ArenaRecord, GameRecord, MatchupRecord};

const USAGE: &str =
    "usage: import_records --collection <ev_results|upcoming_games|games> --source <path|url>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Collection {
    OddsResults,
    UpcomingGames,
    Games,
}

impl FromStr for Collection {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ev_results" => Ok(Collection::OddsResults),
            "upcoming_games" => Ok(Collection::UpcomingGames),
            "games" => Ok(Collection::Games),
            other => bail!("unknown collection: {}", other),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    collection: Collection,
    source: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "import_records=info,odds_board=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let args = parse_args(&args).context(USAGE)?;

    dotenvy::dotenv().ok();
    let database_url =
        env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:data/odds.db".to_string());

    let store = SqliteRecordStore::new(&database_url).await?;
    let body = read_source(&args.source).await?;

    let written = match args.collection {
        Collection::OddsResults => {
            let records: Vec<MatchupRecord> = parse_records(&body)?;
            store.insert_odds_results(&records).await?
        }
        Collection::UpcomingGames => {
            let records: Vec<ArenaRecord> = parse_records(&body)?;
            store.insert_arena_records(&records).await?
        }
        Collection::Games => {
            let records: Vec<GameRecord> = parse_records(&body)?;
            store.insert_games(&records).await?
        }
    };

    info!(
        "Imported {} rows into {:?} from {}",
        written, args.collection, args.source
    );
    Ok(())
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut collection = None;
    let mut source = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--collection" | "-c" => {
                let value = iter.next().context("--collection needs a value")?;
                collection = Some(value.parse::<Collection>()?);
            }
            "--source" | "-s" => {
                source = Some(iter.next().context("--source needs a value")?.clone());
            }
            other => warn!("Ignoring unknown argument {}", other),
        }
    }

    Ok(Args {
        collection: collection.context("--collection is required")?,
        source: source.context("--source is required")?,
    })
}

async fn read_source(source: &str) -> Result<String> {
    if source.starts_with("http://") || source.starts_with("https://") {
        info!("Downloading records from {}", source);
        let response = reqwest::get(source)
            .await
            .with_context(|| format!("Failed to fetch {}", source))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            bail!("{} returned {} - {}", source, status, text);
        }

        return response.text().await.context("Failed to read response body");
    }

    tokio::fs::read_to_string(source)
        .await
        .with_context(|| format!("Failed to read {}", source))
}

fn parse_records<T: DeserializeOwned>(body: &str) -> Result<Vec<T>> {
    serde_json::from_str(body).context("Source must be a JSON array of records")
}
