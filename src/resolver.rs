use crate::error::LookupError;
use crate::registry::{Show, ShowEntry, ShowRegistry, StreamEntry};
use crate::sync::EpisodeSynchronizer;
use serde::Serialize;
use std::sync::Arc;

/// The only media type the addon serves.
pub const SUPPORTED_TYPE: &str = "series";
const COMPOSITE_ID_DELIMITER: char = ':';

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub genres: Vec<String>,
    pub poster: String,
}

/// Answers catalog, meta and stream queries against the shared registry.
#[derive(Clone)]
pub struct CatalogResolver {
    registry: Arc<ShowRegistry>,
    sync: EpisodeSynchronizer,
}

impl CatalogResolver {
    pub fn new(registry: Arc<ShowRegistry>, sync: EpisodeSynchronizer) -> Self {
        Self { registry, sync }
    }

    pub fn list_catalog(&self, media_type: &str) -> Result<Vec<CatalogEntry>, LookupError> {
        check_type(media_type)?;
        Ok(self
            .registry
            .list_shows()
            .iter()
            .map(|entry| {
                let info = entry.info();
                CatalogEntry {
                    id: info.id.clone(),
                    kind: media_type.to_string(),
                    name: info.name.clone(),
                    genres: info.genres.clone(),
                    poster: info.logo.clone(),
                }
            })
            .collect())
    }

    /// Refreshes the show from its feed before answering; a failed refresh serves cached episodes.
    pub async fn get_meta(&self, media_type: &str, show_id: &str) -> Result<Show, LookupError> {
        check_type(media_type)?;
        let entry = self.find_show(show_id)?;
        self.sync.refresh_episodes(entry).await;
        Ok(entry.snapshot().await)
    }

    pub async fn get_stream(
        &self,
        media_type: &str,
        composite_id: &str,
    ) -> Result<StreamEntry, LookupError> {
        check_type(media_type)?;
        let show_id = split_composite_id(composite_id);
        let entry = self.find_show(show_id)?;
        let episodes = entry.episodes().await;
        episodes
            .iter()
            .find(|e| e.id == composite_id)
            .and_then(|e| e.streams.first())
            .cloned()
            .ok_or_else(|| LookupError::EpisodeNotFound(composite_id.to_string()))
    }

    fn find_show(&self, show_id: &str) -> Result<&ShowEntry, LookupError> {
        self.registry
            .get(show_id)
            .ok_or_else(|| LookupError::ShowNotFound(show_id.to_string()))
    }
}

fn check_type(media_type: &str) -> Result<(), LookupError> {
    if media_type == SUPPORTED_TYPE {
        Ok(())
    } else {
        Err(LookupError::UnsupportedType(media_type.to_string()))
    }
}

/// Show id part of `<showId>:<episode>`, cut at the first delimiter. Ids without one are all show id.
pub fn split_composite_id(composite_id: &str) -> &str {
    composite_id
        .split_once(COMPOSITE_ID_DELIMITER)
        .map_or(composite_id, |(show, _)| show)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EpisodeSettings;
    use crate::error::RefreshError;
    use crate::feed::{parse_feed, FeedResponse, FeedSource};
    use crate::registry::ShowInfo;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Serves fixed bodies per feed URL; unknown URLs fail with 404.
    struct FixedFeeds {
        bodies: Mutex<HashMap<String, String>>,
    }

    #[async_trait]
    impl FeedSource for FixedFeeds {
        async fn fetch_feed(&self, url: &str) -> Result<FeedResponse, RefreshError> {
            let body = self.bodies.lock().unwrap().get(url).cloned();
            match body {
                Some(body) => parse_feed(url, body.as_bytes()),
                None => Err(RefreshError::FeedStatus {
                    url: url.to_string(),
                    status: 404,
                }),
            }
        }
    }

    fn show(id: &str, kind: &str) -> ShowInfo {
        ShowInfo {
            id: id.to_string(),
            kind: kind.to_string(),
            name: format!("Show {id}"),
            description: "desc".to_string(),
            logo: format!("https://logo/{id}.jpg"),
            poster: format!("https://poster/{id}.jpg"),
            genres: vec!["Education".to_string(), "Technology".to_string()],
            feed_url: format!("http://feed/{id}"),
        }
    }

    fn build_resolver(feeds: &[(&str, &str)]) -> (CatalogResolver, Arc<FixedFeeds>) {
        let registry =
            Arc::new(ShowRegistry::new(vec![show("30017", "series"), show("30020", "channel")]).unwrap());
        let source = Arc::new(FixedFeeds {
            bodies: Mutex::new(
                feeds
                    .iter()
                    .map(|(u, b)| (u.to_string(), b.to_string()))
                    .collect(),
            ),
        });
        let sync = EpisodeSynchronizer::new(source.clone(), EpisodeSettings::default());
        (CatalogResolver::new(registry, sync), source)
    }

    const ONE_EPISODE: &str =
        r#"{"items":[{"id":"e1","title":"Ep A","attachments":[{"url":"http://x/a.mp4"}]}]}"#;

    #[test]
    fn catalog_projects_every_show_with_request_type() {
        let (resolver, _) = build_resolver(&[]);
        let metas = resolver.list_catalog("series").unwrap();
        assert_eq!(metas.len(), 2);
        assert!(metas.iter().all(|m| m.kind == "series"));
        assert_eq!(metas[1].id, "30020");
        assert_eq!(metas[0].poster, "https://logo/30017.jpg");
    }

    #[test]
    fn catalog_rejects_other_types() {
        let (resolver, _) = build_resolver(&[]);
        assert_eq!(
            resolver.list_catalog("movie"),
            Err(LookupError::UnsupportedType("movie".to_string()))
        );
    }

    #[tokio::test]
    async fn scenario_single_episode_feed() {
        let (resolver, _) = build_resolver(&[("http://feed/30017", ONE_EPISODE)]);
        let meta = resolver.get_meta("series", "30017").await.unwrap();
        assert_eq!(meta.episodes.len(), 1);
        let ep = &meta.episodes[0];
        assert_eq!(ep.id, "30017:1");
        assert_eq!(ep.number, 1);
        assert_eq!(ep.title, "Ep A");
        assert_eq!(ep.streams, vec![StreamEntry::direct("Jupiter Zone", "http://x/a.mp4")]);

        assert_eq!(
            resolver.get_stream("series", "30017:1").await,
            Ok(StreamEntry::direct("Jupiter Zone", "http://x/a.mp4"))
        );
        assert_eq!(
            resolver.get_stream("series", "30017:2").await,
            Err(LookupError::EpisodeNotFound("30017:2".to_string()))
        );
    }

    #[tokio::test]
    async fn stream_errors_checked_type_then_show_then_episode() {
        let (resolver, _) = build_resolver(&[("http://feed/30017", ONE_EPISODE)]);
        resolver.get_meta("series", "30017").await.unwrap();

        assert_eq!(
            resolver.get_stream("movie", "99999:1").await,
            Err(LookupError::UnsupportedType("movie".to_string()))
        );
        assert_eq!(
            resolver.get_stream("series", "99999:1").await,
            Err(LookupError::ShowNotFound("99999".to_string()))
        );
        assert_eq!(
            resolver.get_stream("series", "30017").await,
            Err(LookupError::EpisodeNotFound("30017".to_string()))
        );
    }

    #[tokio::test]
    async fn episode_without_streams_is_not_found() {
        let (resolver, _) = build_resolver(&[(
            "http://feed/30017",
            r#"{"items":[{"id":"e1","title":"Audio only","attachments":[]}]}"#,
        )]);
        resolver.get_meta("series", "30017").await.unwrap();
        assert_eq!(
            resolver.get_stream("series", "30017:1").await,
            Err(LookupError::EpisodeNotFound("30017:1".to_string()))
        );
    }

    #[tokio::test]
    async fn meta_serves_cached_episodes_when_feed_breaks() {
        let (resolver, source) = build_resolver(&[("http://feed/30017", ONE_EPISODE)]);
        let fresh = resolver.get_meta("series", "30017").await.unwrap();

        source
            .bodies
            .lock()
            .unwrap()
            .insert("http://feed/30017".to_string(), "<html>".to_string());
        let stale = resolver.get_meta("series", "30017").await.unwrap();
        assert_eq!(stale, fresh);
    }

    #[tokio::test]
    async fn meta_without_any_feed_data_has_no_episodes() {
        let (resolver, _) = build_resolver(&[]);
        let meta = resolver.get_meta("series", "30020").await.unwrap();
        assert!(meta.episodes.is_empty());
        assert_eq!(meta.kind, "channel");
    }

    #[tokio::test]
    async fn meta_errors() {
        let (resolver, _) = build_resolver(&[]);
        assert_eq!(
            resolver.get_meta("tv", "30017").await,
            Err(LookupError::UnsupportedType("tv".to_string()))
        );
        assert_eq!(
            resolver.get_meta("series", "nope").await,
            Err(LookupError::ShowNotFound("nope".to_string()))
        );
    }

    #[test]
    fn splits_composite_ids() {
        assert_eq!(split_composite_id("30017:12"), "30017");
        assert_eq!(split_composite_id("30017"), "30017");
        assert_eq!(split_composite_id("30017:1:2"), "30017");
    }
}
