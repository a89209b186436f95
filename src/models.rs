//! Bookmark value types exchanged with the bookmark API

use serde::{Deserialize, Serialize};

/// A persisted tag
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    #[serde(rename = "tag_title")]
    pub title: String,
}

impl Tag {
    #[must_use]
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

/// A bookmark as returned by search and creation calls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: i64,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

/// Payload for creating a bookmark once its tags have ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBookmarkRequest {
    pub title: String,
    pub url: String,
    pub tag_ids: Vec<i64>,
}
