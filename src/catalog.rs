use crate::models::Course;
use std::env;
use tokio::fs;
use tracing::error;

/// The taught course list. The ledger only consumes the codes; name and
/// color are handed through to the page.
pub fn default_catalog() -> Vec<Course> {
    [
        ("CS23601", "CRYPTOGRAPHY AND SYSTEM SECURITY", "#6366f1"),
        ("CS23602", "COMPILER DESIGN", "#8b5cf6"),
        ("CS23603", "MACHINE LEARNING", "#ec4899"),
        (
            "CS23U02",
            "PERSPECTIVES OF SUSTAINABILITY DEVELOPMENT",
            "#10b981",
        ),
        ("CS23057", "DEEP LEARNING", "#f59e0b"),
        ("CS23007", "NATURAL LANGUAGE PROCESSING", "#06b6d4"),
        ("CS23045", "CIP", "#ef4444"),
    ]
    .into_iter()
    .map(|(code, name, color)| Course {
        code: code.to_string(),
        name: name.to_string(),
        color: color.to_string(),
    })
    .collect()
}

/// Resolves the catalog at startup: an `APP_CATALOG_PATH` JSON array when
/// set and readable, the built-in list otherwise.
pub async fn load_catalog() -> Vec<Course> {
    let Ok(path) = env::var("APP_CATALOG_PATH") else {
        return default_catalog();
    };

    match fs::read(&path).await {
        Ok(bytes) => match serde_json::from_slice::<Vec<Course>>(&bytes) {
            Ok(catalog) if !catalog.is_empty() => catalog,
            Ok(_) => {
                error!("catalog file {path} is empty, using the built-in catalog");
                default_catalog()
            }
            Err(err) => {
                error!("failed to parse catalog file {path}: {err}");
                default_catalog()
            }
        },
        Err(err) => {
            error!("failed to read catalog file {path}: {err}");
            default_catalog()
        }
    }
}
