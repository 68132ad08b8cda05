use crate::resolver::SUPPORTED_TYPE;
use serde::Serialize;

pub const ADDON_ID: &str = "org.stremio.video.jupiterbroadcasting";
pub const ADDON_VERSION: &str = "0.0.1";
pub const CATALOG_ID: &str = "Jupiter Broadcasting Shows";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogRef {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Manifest {
    pub id: String,
    pub version: String,
    pub name: String,
    pub description: String,
    pub types: Vec<String>,
    pub catalogs: Vec<CatalogRef>,
    pub resources: Vec<String>,
}

pub fn manifest() -> Manifest {
    Manifest {
        id: ADDON_ID.to_string(),
        version: ADDON_VERSION.to_string(),
        name: "Jupiter Broadcasting".to_string(),
        description: "Watch shows from the Jupiter Broadcasting Network including Linux Action \
                      News, TechSNAP, Ask Noah, Coder Radio, and more."
            .to_string(),
        types: vec![SUPPORTED_TYPE.to_string()],
        catalogs: vec![CatalogRef {
            kind: SUPPORTED_TYPE.to_string(),
            id: CATALOG_ID.to_string(),
        }],
        resources: ["stream", "catalog", "meta"]
            .iter()
            .map(|r| r.to_string())
            .collect(),
    }
}
