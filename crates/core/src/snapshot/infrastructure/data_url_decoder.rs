use base64::Engine;

use crate::shared::frame::Frame;
use crate::snapshot::domain::snapshot_decoder::{DecodeError, SnapshotDecoder};

/// Decodes `data:image/<fmt>;base64,<payload>` snapshots with the `image`
/// crate.
///
/// The container format is sniffed from the decoded bytes, so the MIME part
/// of the header is not trusted. An alpha channel, if present, is dropped;
/// the output frame is always RGB.
pub struct DataUrlDecoder;

impl SnapshotDecoder for DataUrlDecoder {
    fn decode(&self, snapshot: &str) -> Result<Frame, DecodeError> {
        let (header, payload) = snapshot
            .split_once(',')
            .ok_or(DecodeError::MalformedDataUrl)?;
        if !header.starts_with("data:") {
            return Err(DecodeError::MalformedDataUrl);
        }

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(payload.trim())
            .map_err(|e| DecodeError::Base64(e.to_string()))?;

        let image = image::load_from_memory(&bytes)
            .map_err(|e| DecodeError::Container(e.to_string()))?
            .to_rgb8();

        let (width, height) = image.dimensions();
        Ok(Frame::new(image.into_raw(), width, height))
    }
}
