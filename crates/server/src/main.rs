mod config;
mod routes;
mod sessions;
mod state;

use std::process;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;

use moodsync_core::auth::infrastructure::postgres_user_store::PostgresUserStore;
use moodsync_core::catalog::infrastructure::mongo_catalog::MongoCatalog;
use moodsync_core::classification::infrastructure::onnx_emotion_classifier::OnnxEmotionClassifier;
use moodsync_core::detection::infrastructure::seeta_detector::SeetaFaceDetector;
use moodsync_core::history::infrastructure::postgres_history::PostgresHistory;
use moodsync_core::pipeline::detect_emotion_use_case::DetectEmotionUseCase;
use moodsync_core::shared::constants::{
    EMOTION_MODEL_NAME, EMOTION_MODEL_URL, FACE_MODEL_NAME, FACE_MODEL_URL,
};
use moodsync_core::shared::model_resolver;
use moodsync_core::snapshot::infrastructure::data_url_decoder::DataUrlDecoder;

use crate::config::Config;
use crate::sessions::SessionStore;
use crate::state::AppState;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::parse();

    // Everything blocking (schema init, model downloads, model loading)
    // happens before the async runtime starts.
    let state = Arc::new(build_state(&config)?);
    let app = routes::router(state);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let listener = tokio::net::TcpListener::bind(&config.bind).await?;
        log::info!("listening on {}", config.bind);
        axum::serve(listener, app).await?;
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

fn build_state(config: &Config) -> Result<AppState, Box<dyn std::error::Error>> {
    let users = PostgresUserStore::new(config.database_url.as_str());
    users.ensure_schema()?;
    let history = PostgresHistory::new(config.database_url.as_str());
    history.ensure_schema()?;
    log::info!("postgres schema ready");

    let catalog = MongoCatalog::connect(&config.mongo_uri, &config.mongo_db)?;

    let bundled = config.model_dir.as_deref();
    let face_model = model_resolver::resolve(FACE_MODEL_NAME, FACE_MODEL_URL, bundled)?;
    let emotion_model = model_resolver::resolve(EMOTION_MODEL_NAME, EMOTION_MODEL_URL, bundled)?;

    let detector = SeetaFaceDetector::from_model_file(&face_model)?;
    let classifier = OnnxEmotionClassifier::from_model_file(&emotion_model)?;
    log::info!("detection models loaded");

    let pipeline = DetectEmotionUseCase::new(
        Box::new(DataUrlDecoder),
        Box::new(detector),
        Box::new(classifier),
        Box::new(PostgresHistory::new(config.database_url.as_str())),
        Box::new(catalog),
    );

    Ok(AppState {
        pipeline: Mutex::new(pipeline),
        users: Box::new(users),
        history: Box::new(history),
        sessions: SessionStore::new(),
        detect_budget: Duration::from_secs(config.detect_budget_secs),
    })
}
