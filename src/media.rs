use std::path::PathBuf;

use serde::Serialize;

use crate::error::DlHubError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Video,
    Audio,
    Image,
}

impl MediaKind {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Video => "mp4",
            Self::Audio => "mp3",
            Self::Image => "jpg",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

pub type CookieSnapshot = Vec<SessionCookie>;

/// One resolvable asset. `filename` is assigned exactly once, at resolution
/// time; `path` only after the bytes were written to disk.
#[derive(Debug, Clone, Serialize)]
pub struct MediaDescriptor {
    #[serde(rename = "type")]
    pub kind: MediaKind,
    #[serde(rename = "url")]
    pub source_url: String,
    pub cookies: CookieSnapshot,
    #[serde(rename = "id")]
    pub owner_id: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Default, Serialize)]
pub struct PipelineResult {
    pub media: Vec<MediaDescriptor>,
    pub attempts: u32,
    #[serde(rename = "finalURL", skip_serializing_if = "Option::is_none")]
    pub final_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "coverURL", skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub succeeded: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PipelineResult {
    pub(crate) fn log_error(&mut self, err: &DlHubError) {
        let entry = format!("[attempt {}] {err}", self.attempts);
        match &mut self.error {
            Some(log) => {
                log.push('\n');
                log.push_str(&entry);
            }
            None => self.error = Some(entry),
        }
    }
}
