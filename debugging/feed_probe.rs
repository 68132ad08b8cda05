//! Fetch one show's feed and print the mapped episodes as pretty JSON.
//! Usage:
//!   cargo run --bin feed_probe -- <show_id>
//! Honors FEED_TIMEOUT_SECS, EPISODE_SEASON and STREAM_TITLE (.env supported).

use anyhow::{Context, Result};
use dotenvy::dotenv;
use jupiter_addon::config::Config;
use jupiter_addon::feed::{FeedSource, HttpFeedClient};
use jupiter_addon::shows::default_shows;
use jupiter_addon::sync::build_episodes;
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let show_id = env::args()
        .nth(1)
        .context("Usage: feed_probe <show_id>")?;
    let config = Config::from_env()?;

    let shows = default_shows();
    let show = shows
        .iter()
        .find(|s| s.id == show_id)
        .with_context(|| {
            let known: Vec<&str> = shows.iter().map(|s| s.id.as_str()).collect();
            format!("Unknown show id {} (known: {})", show_id, known.join(", "))
        })?;

    let client = HttpFeedClient::new(config.feed_timeout)?;
    let feed = client.fetch_feed(&show.feed_url).await?;
    println!(
        "{} -> {} items from {} (feed title: {})",
        show.name,
        feed.items.len(),
        show.feed_url,
        feed.title.as_deref().unwrap_or("none")
    );

    let episodes = build_episodes(show, &feed, &config.episodes);
    println!("{}", serde_json::to_string_pretty(&episodes)?);
    Ok(())
}
