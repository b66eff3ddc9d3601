use std::path::{Path, PathBuf};
use std::process;

use base64::Engine;
use clap::Parser;

use moodsync_core::catalog::domain::song_catalog::{CatalogError, Song, SongCatalog};
use moodsync_core::classification::domain::emotion::Emotion;
use moodsync_core::classification::infrastructure::onnx_emotion_classifier::OnnxEmotionClassifier;
use moodsync_core::detection::infrastructure::seeta_detector::SeetaFaceDetector;
use moodsync_core::history::domain::detection_history::{
    DetectionHistory, DetectionRecord, HistoryError, NewDetection,
};
use moodsync_core::pipeline::detect_emotion_use_case::{
    DetectEmotionUseCase, DetectionOutcome, UserIdentity,
};
use moodsync_core::shared::constants::{
    EMOTION_MODEL_NAME, EMOTION_MODEL_URL, FACE_MODEL_NAME, FACE_MODEL_URL,
};
use moodsync_core::shared::model_resolver;
use moodsync_core::snapshot::infrastructure::data_url_decoder::DataUrlDecoder;

/// Detect the dominant facial emotion in a local image.
#[derive(Parser)]
#[command(name = "moodsync")]
struct Cli {
    /// Input image file (png, jpg, ...).
    input: PathBuf,

    /// Directory with pre-downloaded model files, checked before the cache.
    #[arg(long)]
    model_dir: Option<PathBuf>,

    /// Include the synthesized 68-point landmark overlay in the output.
    #[arg(long)]
    landmarks: bool,
}

/// Detections made from the CLI are not recorded anywhere.
struct NoopHistory;

impl DetectionHistory for NoopHistory {
    fn record(&self, _detection: &NewDetection) -> Result<(), HistoryError> {
        Ok(())
    }

    fn recent(&self, _user_id: i32, _limit: i64) -> Result<Vec<DetectionRecord>, HistoryError> {
        Ok(Vec::new())
    }
}

/// The CLI runs without a catalog store; no songs are recommended.
struct EmptyCatalog;

impl SongCatalog for EmptyCatalog {
    fn find_by_emotion(&self, _emotion: Emotion, _limit: i64) -> Result<Vec<Song>, CatalogError> {
        Ok(Vec::new())
    }
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    if !cli.input.exists() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }

    let mut pipeline = build_pipeline(cli.model_dir.as_deref())?;

    let snapshot = data_url_from_file(&cli.input)?;
    let identity = UserIdentity {
        user_id: 0,
        email: "cli@localhost".into(),
    };

    match pipeline.execute(&identity, &snapshot)? {
        DetectionOutcome::NoFace(cause) => {
            log::info!("soft failure: {cause:?}");
            println!(
                "{}",
                serde_json::json!({ "success": false, "message": "😕 No face detected" })
            );
        }
        DetectionOutcome::Detected(detection) => {
            let probabilities: serde_json::Map<String, serde_json::Value> = detection
                .scores
                .iter()
                .map(|(emotion, score)| (emotion.label().to_string(), score.into()))
                .collect();
            let mut payload = serde_json::json!({
                "success": true,
                "emotion": detection.emotion.display_name(),
                "confidence": detection.scores.confidence(),
                "probabilities": probabilities,
                "faceRegion": detection.face,
            });
            if cli.landmarks {
                payload["landmarks"] = serde_json::to_value(&detection.landmarks)?;
            }
            println!("{payload}");
        }
    }

    Ok(())
}

fn build_pipeline(
    model_dir: Option<&Path>,
) -> Result<DetectEmotionUseCase, Box<dyn std::error::Error>> {
    let face_model = model_resolver::resolve(FACE_MODEL_NAME, FACE_MODEL_URL, model_dir)?;
    let emotion_model = model_resolver::resolve(EMOTION_MODEL_NAME, EMOTION_MODEL_URL, model_dir)?;

    Ok(DetectEmotionUseCase::new(
        Box::new(DataUrlDecoder),
        Box::new(SeetaFaceDetector::from_model_file(&face_model)?),
        Box::new(OnnxEmotionClassifier::from_model_file(&emotion_model)?),
        Box::new(NoopHistory),
        Box::new(EmptyCatalog),
    ))
}

/// Wraps the file's bytes as the data URL the decode boundary expects.
fn data_url_from_file(path: &Path) -> Result<String, Box<dyn std::error::Error>> {
    let bytes = std::fs::read(path)?;
    let mime = match path.extension().and_then(|ext| ext.to_str()) {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    };
    Ok(format!(
        "data:{mime};base64,{}",
        base64::engine::general_purpose::STANDARD.encode(&bytes)
    ))
}
