use crate::config::EpisodeSettings;
use crate::error::RefreshError;
use crate::feed::{FeedResponse, FeedSource};
use crate::registry::{Episode, ShowEntry, ShowInfo, ShowRegistry, StreamEntry};
use chrono::{DateTime, SecondsFormat, Utc};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{info, warn};

#[derive(Clone)]
pub struct EpisodeSynchronizer {
    source: Arc<dyn FeedSource>,
    settings: EpisodeSettings,
}

impl EpisodeSynchronizer {
    pub fn new(source: Arc<dyn FeedSource>, settings: EpisodeSettings) -> Self {
        Self { source, settings }
    }

    /// Fetches the show's feed and swaps in the rebuilt episode list.
    ///
    /// On error the current list is left exactly as it was.
    pub async fn refresh(&self, entry: &ShowEntry) -> Result<usize, RefreshError> {
        let _guard = entry.lock_refresh().await;
        let feed = self.source.fetch_feed(&entry.info().feed_url).await?;
        let episodes = build_episodes(entry.info(), &feed, &self.settings);
        let count = episodes.len();
        entry.replace_episodes(episodes).await;
        Ok(count)
    }

    /// Refreshes and returns whatever list the show holds afterwards.
    pub async fn refresh_episodes(&self, entry: &ShowEntry) -> Arc<Vec<Episode>> {
        match self.refresh(entry).await {
            Ok(count) => info!("Refreshed '{}': {} episodes", entry.info().name, count),
            Err(e) => warn!(
                "Keeping cached episodes for '{}' after failed refresh: {}",
                entry.info().name,
                e
            ),
        }
        entry.episodes().await
    }

    /// Refreshes every show concurrently and returns how many succeeded.
    pub async fn refresh_all(&self, registry: &Arc<ShowRegistry>) -> usize {
        let mut tasks = JoinSet::new();
        for entry in registry.list_shows() {
            let show_id = entry.id().to_string();
            let registry = Arc::clone(registry);
            let sync = self.clone();
            tasks.spawn(async move {
                let Some(entry) = registry.get(&show_id) else {
                    return false;
                };
                match sync.refresh(entry).await {
                    Ok(count) => {
                        info!("Loaded {} episodes for '{}'", count, entry.info().name);
                        true
                    }
                    Err(e) => {
                        warn!("Initial refresh of '{}' failed: {}", entry.info().name, e);
                        false
                    }
                }
            });
        }

        let mut refreshed = 0;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(true) => refreshed += 1,
                Ok(false) => {}
                Err(e) => warn!("Refresh task aborted: {}", e),
            }
        }
        refreshed
    }
}

/// Maps feed items (newest first) to episodes numbered from the feed length down to 1.
///
/// Numbers depend on how many items the feed holds right now, so they shift when
/// the publisher trims old items.
pub fn build_episodes(
    show: &ShowInfo,
    feed: &FeedResponse,
    settings: &EpisodeSettings,
) -> Vec<Episode> {
    let total = feed.items.len();
    feed.items
        .iter()
        .enumerate()
        .map(|(j, item)| {
            let number = total - j;
            Episode {
                id: format!("{}:{}", show.id, number),
                season: settings.season,
                number,
                title: item.title.clone(),
                thumbnail: show.logo.clone(),
                released: normalize_released(&item.date_published),
                overview: item.html.clone(),
                streams: item
                    .attachments
                    .iter()
                    .map(|a| StreamEntry::direct(settings.stream_title.clone(), a.url.clone()))
                    .collect(),
            }
        })
        .collect()
}

/// Rewrites RFC 3339 dates into UTC with millisecond precision, so `released` differs
/// from the feed's `date_published` whenever the publisher used an offset or no millis.
/// Anything that is not RFC 3339 is served verbatim.
fn normalize_released(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw.trim()) {
        Ok(dt) => dt
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Millis, true),
        Err(_) => raw.to_string(),
    }
}
