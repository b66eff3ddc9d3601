use serde::Serialize;
use thiserror::Error;

use crate::classification::domain::emotion::Emotion;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("song catalog failed: {0}")]
    Store(String),
}

/// A catalog document. Read-only from this pipeline's perspective; the field
/// names mirror the stored documents so the payload serializes as-is.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Song {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub artist: String,
    #[serde(rename = "coverUrl")]
    pub cover_url: String,
    #[serde(rename = "audioUrl")]
    pub audio_url: String,
    pub emotions: Vec<String>,
    pub language: String,
}

/// Store boundary for the song catalog.
pub trait SongCatalog: Send + Sync {
    /// Songs whose emotion tag set contains `emotion`, capped at `limit`.
    fn find_by_emotion(&self, emotion: Emotion, limit: i64) -> Result<Vec<Song>, CatalogError>;
}
