pub const FACE_MODEL_NAME: &str = "seeta_fd_frontal_v1.0.bin";
pub const FACE_MODEL_URL: &str =
    "https://github.com/atomashpolskiy/rustface/raw/master/model/seeta_fd_frontal_v1.0.bin";

pub const EMOTION_MODEL_NAME: &str = "emotion-ferplus-8.onnx";
pub const EMOTION_MODEL_URL: &str =
    "https://github.com/onnx/models/raw/main/validated/vision/body_analysis/emotion_ferplus/model/emotion-ferplus-8.onnx";

/// Landmark count produced for every detected face.
pub const LANDMARK_COUNT: usize = 68;

/// Maximum number of songs returned for one detection.
pub const CATALOG_LIMIT: i64 = 10;
