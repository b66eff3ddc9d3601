use postgres::{Client, NoTls};

use crate::history::domain::detection_history::{
    DetectionHistory, DetectionRecord, HistoryError, NewDetection,
};

/// Detection history backed by PostgreSQL.
///
/// Holds only the connection string: a fresh connection is opened per call
/// and dropped at the end of it, matching the request-scoped resource model.
pub struct PostgresHistory {
    conn_str: String,
}

impl PostgresHistory {
    pub fn new(conn_str: impl Into<String>) -> Self {
        Self {
            conn_str: conn_str.into(),
        }
    }

    fn connect(&self) -> Result<Client, HistoryError> {
        Client::connect(&self.conn_str, NoTls).map_err(|e| HistoryError::Store(e.to_string()))
    }

    /// Creates the `emotion_history` table and its indexes if missing.
    ///
    /// Expects the `users` table to exist already (see the user store).
    pub fn ensure_schema(&self) -> Result<(), HistoryError> {
        let mut client = self.connect()?;
        client
            .batch_execute(
                "CREATE TABLE IF NOT EXISTS emotion_history (
                     id SERIAL PRIMARY KEY,
                     user_id INTEGER NOT NULL,
                     email VARCHAR(255) NOT NULL,
                     emotion VARCHAR(50) NOT NULL,
                     confidence REAL NOT NULL,
                     detected_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
                     FOREIGN KEY (user_id) REFERENCES users(id)
                 );
                 CREATE INDEX IF NOT EXISTS idx_emotion_user_id
                     ON emotion_history(user_id);
                 CREATE INDEX IF NOT EXISTS idx_emotion_detected_at
                     ON emotion_history(detected_at);",
            )
            .map_err(|e| HistoryError::Store(e.to_string()))
    }
}

impl DetectionHistory for PostgresHistory {
    fn record(&self, detection: &NewDetection) -> Result<(), HistoryError> {
        let mut client = self.connect()?;
        client
            .execute(
                "INSERT INTO emotion_history (user_id, email, emotion, confidence)
                 VALUES ($1, $2, $3, $4)",
                &[
                    &detection.user_id,
                    &detection.email,
                    &detection.emotion.label(),
                    &detection.confidence,
                ],
            )
            .map_err(|e| HistoryError::Store(e.to_string()))?;
        Ok(())
    }

    fn recent(&self, user_id: i32, limit: i64) -> Result<Vec<DetectionRecord>, HistoryError> {
        let mut client = self.connect()?;
        let rows = client
            .query(
                "SELECT emotion, confidence, detected_at
                 FROM emotion_history
                 WHERE user_id = $1
                 ORDER BY detected_at DESC
                 LIMIT $2",
                &[&user_id, &limit],
            )
            .map_err(|e| HistoryError::Store(e.to_string()))?;

        Ok(rows
            .iter()
            .map(|row| DetectionRecord {
                emotion: row.get("emotion"),
                confidence: row.get("confidence"),
                detected_at: row.get("detected_at"),
            })
            .collect())
    }
}
