use std::path::PathBuf;

use clap::Parser;

/// Server configuration; every flag can also come from the environment.
#[derive(Parser, Debug, Clone)]
#[command(name = "moodsync-server")]
pub struct Config {
    /// Address to bind the HTTP listener on.
    #[arg(long, env = "MOODSYNC_BIND", default_value = "0.0.0.0:5000")]
    pub bind: String,

    /// PostgreSQL connection string for users and detection history.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// MongoDB connection string for the song catalog.
    #[arg(long, env = "MONGO_URI", default_value = "mongodb://localhost:27017")]
    pub mongo_uri: String,

    /// MongoDB database holding the songs collection.
    #[arg(long, env = "MONGO_DB", default_value = "moodsync")]
    pub mongo_db: String,

    /// Directory with pre-downloaded model files, checked before the cache.
    #[arg(long, env = "MOODSYNC_MODEL_DIR")]
    pub model_dir: Option<PathBuf>,

    /// Wall-clock budget for one detection, in seconds.
    #[arg(long, env = "MOODSYNC_DETECT_BUDGET_SECS", default_value = "15")]
    pub detect_budget_secs: u64,
}
