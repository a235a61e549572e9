//! Catalog records as stored by the remote asset store, and the payloads sent back to it

use std::fmt;

use serde::{Deserialize, Serialize};

/// The four kinds of asset the catalog holds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    Artist,
    Album,
    Song,
    Playlist,
}

impl AssetType {
    pub fn as_str(self) -> &'static str {
        match self {
            AssetType::Artist => "artist",
            AssetType::Album => "album",
            AssetType::Song => "song",
            AssetType::Playlist => "playlist",
        }
    }

    /// Human label used in notifications and dialog titles
    pub fn label(self) -> &'static str {
        match self {
            AssetType::Artist => "Artist",
            AssetType::Album => "Album",
            AssetType::Song => "Song",
            AssetType::Playlist => "Playlist",
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to another asset by type and key
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRef {
    #[serde(rename = "@assetType")]
    pub asset_type: AssetType,
    #[serde(rename = "@key")]
    pub key: String,
}

impl AssetRef {
    pub fn new(asset_type: AssetType, key: impl Into<String>) -> Self {
        Self {
            asset_type,
            key: key.into(),
        }
    }
}

/// Bookkeeping the store attaches to every record. Read-only for the console.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    #[serde(rename = "@lastTouchBy", default, skip_serializing_if = "Option::is_none")]
    pub last_touch_by: Option<String>,
    #[serde(rename = "@lastTx", default, skip_serializing_if = "Option::is_none")]
    pub last_tx: Option<String>,
    #[serde(rename = "@lastUpdated", default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

impl Provenance {
    /// `@lastUpdated` rendered in local time, or the raw value if it is not RFC 3339
    pub fn last_updated_display(&self) -> Option<String> {
        let raw = self.last_updated.as_deref()?;
        Some(match chrono::DateTime::parse_from_rfc3339(raw) {
            Ok(ts) => ts
                .with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
                .to_string(),
            Err(_) => raw.to_string(),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    #[serde(rename = "@key")]
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub country: String,
    #[serde(flatten)]
    pub provenance: Provenance,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    #[serde(rename = "@key")]
    pub key: String,
    pub name: String,
    pub artist: AssetRef,
    #[serde(default)]
    pub year: i64,
    #[serde(flatten)]
    pub provenance: Provenance,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    #[serde(rename = "@key")]
    pub key: String,
    pub name: String,
    pub album: AssetRef,
    #[serde(flatten)]
    pub provenance: Provenance,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    #[serde(rename = "@key")]
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub songs: Vec<AssetRef>,
    #[serde(rename = "private", default)]
    pub is_private: bool,
    #[serde(flatten)]
    pub provenance: Provenance,
}

/// Body of a create or update call, tagged with `@assetType`
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "@assetType", rename_all = "lowercase")]
pub enum AssetPayload {
    Artist {
        name: String,
        country: String,
    },
    Album {
        name: String,
        artist: AssetRef,
        year: i64,
    },
    Song {
        name: String,
        album: AssetRef,
    },
    Playlist {
        name: String,
        songs: Vec<AssetRef>,
        private: bool,
    },
}

impl AssetPayload {
    pub fn asset_type(&self) -> AssetType {
        match self {
            AssetPayload::Artist { .. } => AssetType::Artist,
            AssetPayload::Album { .. } => AssetType::Album,
            AssetPayload::Song { .. } => AssetType::Song,
            AssetPayload::Playlist { .. } => AssetType::Playlist,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            AssetPayload::Artist { name, .. }
            | AssetPayload::Album { name, .. }
            | AssetPayload::Song { name, .. }
            | AssetPayload::Playlist { name, .. } => name,
        }
    }
}

/// A payload addressed to an existing record, for full replacement
#[derive(Debug, Serialize)]
pub struct KeyedPayload<'a> {
    #[serde(rename = "@key")]
    pub key: &'a str,
    #[serde(flatten)]
    pub payload: &'a AssetPayload,
}
