use thiserror::Error;

use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("snapshot is not a base64 data URL")]
    MalformedDataUrl,
    #[error("base64 payload did not decode: {0}")]
    Base64(String),
    #[error("image container did not decode: {0}")]
    Container(String),
}

/// Domain interface for turning an uploaded snapshot string into a frame.
pub trait SnapshotDecoder: Send + Sync {
    fn decode(&self, snapshot: &str) -> Result<Frame, DecodeError>;
}
