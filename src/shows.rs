//! The Jupiter Broadcasting shows served by the addon.
use crate::registry::ShowInfo;

const FEED_BASE: &str = "http://feed.jupiter.zone/";
const ALT_FEED_BASE: &str = "http://feedpress.me/";
const FEED_FORMAT: &str = "?format=json";
const DEFAULT_GENRES: [&str; 2] = ["Education", "Technology"];

fn show(id: &str, name: &str, description: &str, logo: &str, feed_url: String) -> ShowInfo {
    ShowInfo {
        id: id.to_string(),
        kind: "series".to_string(),
        name: name.to_string(),
        description: description.to_string(),
        logo: logo.to_string(),
        poster: logo.to_string(),
        genres: DEFAULT_GENRES.iter().map(|g| g.to_string()).collect(),
        feed_url,
    }
}

pub fn default_shows() -> Vec<ShowInfo> {
    vec![
        show(
            "30020",
            "BSD Now",
            "A weekly show covering the latest developments in the world of the BSD \
             family of operating systems. News, Tutorials and Interviews for new \
             users and long time developers alike.",
            "https://static.feedpress.it/logo/bsdnowvid-5abd82a07a0e6.jpg",
            format!("{FEED_BASE}bsdvid{FEED_FORMAT}"),
        ),
        show(
            "30017",
            "Coder Radio",
            "A weekly talk show taking a pragmatic look at the art and business of \
             Software Development and related technologies.",
            "https://static.feedpress.it/logo/codervideo-5aafe52c954f4.jpg",
            format!("{FEED_BASE}codervid{FEED_FORMAT}"),
        ),
        show(
            "30019",
            "LINUX Unplugged",
            "The Linux Action Show with no prep, no limits, and tons of opinion. \
             An open show powered by community LINUX Unplugged takes the best attributes \
             of open collaboration and focuses them into a weekly lifestyle show about Linux.",
            "https://static.feedpress.it/logo/lupvid-5ab1c61d12ac2.jpg",
            format!("{FEED_BASE}lupvid{FEED_FORMAT}"),
        ),
        show(
            "30008",
            "TechSNAP",
            "TechSNAP our weekly Systems, Network, and Administration Podcast. Every week \
             TechSNAP covers the stories that impact those of us in the tech industry, and all \
             of us that follow it. Every episode we dedicate a portion of the show to answer \
             audience questions, discuss best practices, and solving your problems.",
            "https://static.feedpress.it/logo/techsnapvid-5a208ae7c62dc.jpg",
            format!("{ALT_FEED_BASE}techsnapvid{FEED_FORMAT}"),
        ),
        show(
            "30024",
            "User Error",
            "Life is a series of mistakes, but that's what makes it interesting. A show \
             about life, Linux, the universe, and everything in between.",
            "https://static.feedpress.it/logo/uevideo-57c6160ae2eab.png",
            format!("{ALT_FEED_BASE}uevideo{FEED_FORMAT}"),
        ),
    ]
}
