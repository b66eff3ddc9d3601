use mongodb::bson::{doc, Document};
use mongodb::sync::{Client, Collection};

use crate::catalog::domain::song_catalog::{CatalogError, Song, SongCatalog};
use crate::classification::domain::emotion::Emotion;

/// Song catalog backed by a MongoDB `songs` collection.
pub struct MongoCatalog {
    collection: Collection<Document>,
}

impl MongoCatalog {
    pub fn connect(uri: &str, database: &str) -> Result<Self, CatalogError> {
        let client = Client::with_uri_str(uri).map_err(|e| CatalogError::Store(e.to_string()))?;
        Ok(Self {
            collection: client.database(database).collection("songs"),
        })
    }
}

impl SongCatalog for MongoCatalog {
    fn find_by_emotion(&self, emotion: Emotion, limit: i64) -> Result<Vec<Song>, CatalogError> {
        let filter = doc! { "emotions": { "$in": [emotion.label()] } };
        let cursor = self
            .collection
            .find(filter)
            .limit(limit)
            .run()
            .map_err(|e| CatalogError::Store(e.to_string()))?;

        let mut songs = Vec::new();
        for document in cursor {
            let document = document.map_err(|e| CatalogError::Store(e.to_string()))?;
            songs.push(song_from_document(&document));
        }
        Ok(songs)
    }
}

/// Maps a stored document to a [`Song`], tolerating missing fields.
///
/// `_id` becomes its hex form so the payload is plain JSON.
fn song_from_document(document: &Document) -> Song {
    let get_str = |key: &str| document.get_str(key).unwrap_or_default().to_string();
    Song {
        id: document
            .get_object_id("_id")
            .map(|oid| oid.to_hex())
            .unwrap_or_default(),
        title: get_str("title"),
        artist: get_str("artist"),
        cover_url: get_str("coverUrl"),
        audio_url: get_str("audioUrl"),
        emotions: document
            .get_array("emotions")
            .map(|tags| {
                tags.iter()
                    .filter_map(|tag| tag.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default(),
        language: document.get_str("language").unwrap_or("English").to_string(),
    }
}
