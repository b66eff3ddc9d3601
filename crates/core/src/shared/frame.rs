use crate::shared::region::FaceRegion;

/// A decoded snapshot: contiguous RGB bytes in row-major order.
///
/// Format conversion happens at the decode boundary only; the detector and
/// the classifier both read this canonical channel order. A frame lives for
/// the duration of one request.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        debug_assert_eq!(
            data.len(),
            (width as usize) * (height as usize) * 3,
            "data length must equal width * height * 3"
        );
        Self {
            data,
            width,
            height,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Grayscale derivation (ITU-R BT.601 weights), one byte per pixel.
    pub fn to_luma(&self) -> Vec<u8> {
        self.data
            .chunks_exact(3)
            .map(|px| {
                (0.299 * px[0] as f32 + 0.587 * px[1] as f32 + 0.114 * px[2] as f32).round() as u8
            })
            .collect()
    }

    /// Copies the pixels under `region`, clamped to the frame bounds.
    ///
    /// Returns `None` when the clamped region has no area.
    pub fn crop(&self, region: &FaceRegion) -> Option<Frame> {
        let clamped = region.clamped(self.width, self.height)?;
        let (x, y) = (clamped.x as usize, clamped.y as usize);
        let (w, h) = (clamped.width as usize, clamped.height as usize);
        let stride = self.width as usize * 3;

        let mut data = Vec::with_capacity(w * h * 3);
        for row in y..y + h {
            let start = row * stride + x * 3;
            data.extend_from_slice(&self.data[start..start + w * 3]);
        }
        Some(Frame::new(data, w as u32, h as u32))
    }
}
