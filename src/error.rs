use thiserror::Error;

/// Reasons a catalog, meta or stream query has no answer.
///
/// All of them end up as a plain 404 on the wire; the variant is kept for logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("unsupported media type '{0}'")]
    UnsupportedType(String),

    #[error("no show with id '{0}'")]
    ShowNotFound(String),

    #[error("no playable episode with id '{0}'")]
    EpisodeNotFound(String),
}

/// Why a feed refresh was abandoned. The show's episode list is untouched in every case.
#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("fetching feed {url} failed: {source}")]
    FeedFetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("feed {url} answered with status {status}")]
    FeedStatus { url: String, status: u16 },

    #[error("feed {url} is not a valid episode feed: {source}")]
    FeedParse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("show id '{0}' is registered more than once")]
    DuplicateShowId(String),
}
