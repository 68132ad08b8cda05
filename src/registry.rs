use crate::error::RegistryError;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard, RwLock};

/// Static description of a show, fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowInfo {
    pub id: String,
    pub kind: String,
    pub name: String,
    pub description: String,
    pub logo: String,
    pub poster: String,
    pub genres: Vec<String>,
    pub feed_url: String,
}

/// Full show with its episodes, as returned by the meta query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Show {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub description: String,
    pub logo: String,
    pub poster: String,
    pub genres: Vec<String>,
    #[serde(rename = "videos", skip_serializing_if = "Vec::is_empty")]
    pub episodes: Vec<Episode>,
    #[serde(skip)]
    pub feed_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Episode {
    pub id: String,
    pub season: i32,
    #[serde(rename = "episode")]
    pub number: usize,
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub thumbnail: String,
    pub released: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub overview: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub streams: Vec<StreamEntry>,
}

/// One playable source for an episode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamEntry {
    pub title: String,
    pub url: String,
    #[serde(rename = "infoHash", skip_serializing_if = "Option::is_none")]
    pub info_hash: Option<String>,
    #[serde(rename = "fileIdx", skip_serializing_if = "Option::is_none")]
    pub file_index: Option<u32>,
    #[serde(rename = "externalUrl", skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
}

impl StreamEntry {
    pub fn direct(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            info_hash: None,
            file_index: None,
            external_url: None,
        }
    }
}

/// A registered show and its current episode list.
///
/// Readers clone the `Arc` behind the lock, writers swap in a complete new list,
/// so nobody ever sees a half-replaced list. `refresh_lock` serializes refreshes
/// of this show only.
#[derive(Debug)]
pub struct ShowEntry {
    info: ShowInfo,
    episodes: RwLock<Arc<Vec<Episode>>>,
    refresh_lock: Mutex<()>,
}

impl ShowEntry {
    fn new(info: ShowInfo) -> Self {
        Self {
            info,
            episodes: RwLock::new(Arc::new(Vec::new())),
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn info(&self) -> &ShowInfo {
        &self.info
    }

    pub fn id(&self) -> &str {
        &self.info.id
    }

    pub async fn episodes(&self) -> Arc<Vec<Episode>> {
        self.episodes.read().await.clone()
    }

    pub async fn replace_episodes(&self, episodes: Vec<Episode>) {
        let fresh = Arc::new(episodes);
        *self.episodes.write().await = fresh;
    }

    pub(crate) async fn lock_refresh(&self) -> MutexGuard<'_, ()> {
        self.refresh_lock.lock().await
    }

    pub async fn snapshot(&self) -> Show {
        let episodes = self.episodes().await;
        Show {
            id: self.info.id.clone(),
            kind: self.info.kind.clone(),
            name: self.info.name.clone(),
            description: self.info.description.clone(),
            logo: self.info.logo.clone(),
            poster: self.info.poster.clone(),
            genres: self.info.genres.clone(),
            episodes: episodes.as_ref().clone(),
            feed_url: self.info.feed_url.clone(),
        }
    }
}

#[derive(Debug)]
pub struct ShowRegistry {
    entries: Vec<ShowEntry>,
    index: HashMap<String, usize>,
}

impl ShowRegistry {
    pub fn new(shows: Vec<ShowInfo>) -> Result<Self, RegistryError> {
        let mut index = HashMap::with_capacity(shows.len());
        let mut entries = Vec::with_capacity(shows.len());
        for (pos, info) in shows.into_iter().enumerate() {
            if index.insert(info.id.clone(), pos).is_some() {
                return Err(RegistryError::DuplicateShowId(info.id));
            }
            entries.push(ShowEntry::new(info));
        }
        Ok(Self { entries, index })
    }

    /// Shows in registration order.
    pub fn list_shows(&self) -> &[ShowEntry] {
        &self.entries
    }

    pub fn get(&self, show_id: &str) -> Option<&ShowEntry> {
        self.index.get(show_id).map(|&pos| &self.entries[pos])
    }
}
