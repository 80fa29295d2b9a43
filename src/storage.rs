use crate::errors::AppError;
use crate::models::{Course, Ledger};
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::error;

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/attendance.json"))
}

/// Reads the persisted ledger, recovering to the fresh state on any read or
/// parse failure. A corrupt file must never keep the app from starting.
pub async fn load_ledger(path: &Path, catalog: &[Course]) -> Ledger {
    match fs::read_to_string(path).await {
        Ok(raw) => match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(root) => Ledger::from_blob(catalog, &root),
            Err(err) => {
                error!("failed to parse attendance file: {err}");
                Ledger::fresh(catalog)
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ledger::fresh(catalog),
        Err(err) => {
            error!("failed to read attendance file: {err}");
            Ledger::fresh(catalog)
        }
    }
}

pub async fn persist_ledger(path: &Path, ledger: &Ledger) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(ledger).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}

/// Removes the persisted blob entirely. Reset discards the file rather than
/// writing zeros, so the next startup takes the fresh-initialization path.
pub async fn clear_ledger(path: &Path) -> Result<(), AppError> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(AppError::internal(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Course> {
        vec![Course {
            code: "CS23601".to_string(),
            name: "CRYPTOGRAPHY AND SYSTEM SECURITY".to_string(),
            color: "#6366f1".to_string(),
        }]
    }

    fn scratch_path(tag: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!(
            "attendance_storage_{tag}_{}_{nanos}.json",
            std::process::id()
        ));
        path
    }

    #[tokio::test]
    async fn persist_then_load_round_trips() {
        let path = scratch_path("roundtrip");
        let mut ledger = Ledger::fresh(&catalog());
        ledger.record_attended("CS23601", 3).unwrap();
        ledger.record_missed("CS23601", 1).unwrap();

        persist_ledger(&path, &ledger).await.unwrap();
        let reloaded = load_ledger(&path, &catalog()).await;
        assert_eq!(reloaded, ledger);

        let _ = fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn load_of_missing_file_is_fresh() {
        let path = scratch_path("missing");
        let ledger = load_ledger(&path, &catalog()).await;
        assert_eq!(ledger, Ledger::fresh(&catalog()));
    }

    #[tokio::test]
    async fn load_of_corrupt_file_is_fresh() {
        let path = scratch_path("corrupt");
        fs::write(&path, b"{ not json").await.unwrap();
        let ledger = load_ledger(&path, &catalog()).await;
        assert_eq!(ledger, Ledger::fresh(&catalog()));

        let _ = fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn clear_removes_the_file_and_is_idempotent() {
        let path = scratch_path("clear");
        persist_ledger(&path, &Ledger::fresh(&catalog())).await.unwrap();
        assert!(path.exists());

        clear_ledger(&path).await.unwrap();
        assert!(!path.exists());
        clear_ledger(&path).await.unwrap();
    }
}
