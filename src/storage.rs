use serde::{Serialize, de::DeserializeOwned};
use std::{env, path::PathBuf};
use tokio::fs;
use tracing::error;

pub const TODAY_TIMER_KEY: &str = "todayTimer";
pub const COMPLETION_HISTORY_KEY: &str = "completionHistory";

/// Keyed JSON records on local disk, one file per key. Missing or
/// malformed data reads as `None` so callers can fall back to defaults;
/// writes rewrite the whole file.
#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn resolve_from_env() -> Self {
        match env::var("STUDY_DATA_DIR") {
            Ok(dir) => Self::new(dir),
            Err(_) => Self::new("data"),
        }
    }

    pub async fn ensure_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir).await
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    pub async fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.record_path(key);
        match fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(value) => Some(value),
                Err(err) => {
                    error!("failed to parse record {key}: {err}");
                    None
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => {
                error!("failed to read record {key}: {err}");
                None
            }
        }
    }

    pub async fn save<T: Serialize>(&self, key: &str, value: &T) -> std::io::Result<()> {
        let payload = serde_json::to_vec_pretty(value).map_err(std::io::Error::other)?;
        fs::write(self.record_path(key), payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DailyTimerRecord;

    fn scratch_store() -> Store {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut dir = std::env::temp_dir();
        dir.push(format!("study_store_{}_{nanos}", std::process::id()));
        Store::new(dir)
    }

    #[tokio::test]
    async fn missing_record_loads_as_none() {
        let store = scratch_store();
        store.ensure_dir().await.unwrap();
        let loaded: Option<DailyTimerRecord> = store.load(TODAY_TIMER_KEY).await;
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn malformed_record_loads_as_none() {
        let store = scratch_store();
        store.ensure_dir().await.unwrap();
        fs::write(store.record_path(TODAY_TIMER_KEY), b"{not json")
            .await
            .unwrap();

        let loaded: Option<DailyTimerRecord> = store.load(TODAY_TIMER_KEY).await;
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn saved_record_loads_back() {
        let store = scratch_store();
        store.ensure_dir().await.unwrap();

        let record = DailyTimerRecord {
            start_time: None,
            elapsed_time: 777,
            is_completed: true,
        };
        store.save(TODAY_TIMER_KEY, &record).await.unwrap();

        let loaded: DailyTimerRecord = store.load(TODAY_TIMER_KEY).await.expect("record");
        assert_eq!(loaded.elapsed_time, 777);
        assert!(loaded.is_completed);
    }
}
