//! Flat-file profile store: one JSON document per candidate.
//!
//! The cache is an explicit per-store object (not a module global) so tests
//! construct isolated stores against temp directories. Entries live for the
//! process lifetime — profile content changes only via redeploy, so
//! staleness is accepted.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use tracing::debug;

use crate::errors::AppError;
use crate::models::profile::ProfileRecord;

pub struct ProfileStore {
    dir: PathBuf,
    cache: Mutex<HashMap<String, Arc<ProfileRecord>>>,
}

impl ProfileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Loads `<dir>/<resume_name>.json`, lazily caching the parsed record.
    pub fn load(&self, resume_name: &str) -> Result<Arc<ProfileRecord>, AppError> {
        if let Some(record) = self.cache.lock().unwrap().get(resume_name) {
            debug!("Profile cache hit: {resume_name}");
            return Ok(Arc::clone(record));
        }

        let path = self.dir.join(format!("{resume_name}.json"));
        if !path.exists() {
            return Err(AppError::NotFound(format!(
                "Profile file \"{resume_name}.json\" not found"
            )));
        }

        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read profile file {}", path.display()))?;
        let record: ProfileRecord = serde_json::from_str(&raw)
            .with_context(|| format!("Profile file {} is not valid JSON", path.display()))?;

        let record = Arc::new(record);
        self.cache
            .lock()
            .unwrap()
            .insert(resume_name.to_string(), Arc::clone(&record));
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_profile(dir: &std::path::Path, name: &str, body: &str) {
        std::fs::write(dir.join(format!("{name}.json")), body).unwrap();
    }

    #[test]
    fn loads_and_caches_profile() {
        let dir = tempfile::tempdir().unwrap();
        write_profile(
            dir.path(),
            "Jane_Doe",
            r#"{
                "name": "Jane Doe",
                "email": "jane@example.com",
                "experience": [{"company": "Acme", "title": "Engineer",
                                "start_date": "01/2015", "end_date": "Present"}],
                "education": [{"degree": "BSc", "school": "MIT"}]
            }"#,
        );

        let store = ProfileStore::new(dir.path());
        let first = store.load("Jane_Doe").unwrap();
        assert_eq!(first.name, "Jane Doe");
        assert_eq!(first.experience.len(), 1);

        // Second load is served from cache even if the file disappears.
        std::fs::remove_file(dir.path().join("Jane_Doe.json")).unwrap();
        let second = store.load("Jane_Doe").unwrap();
        assert_eq!(second.name, "Jane Doe");
    }

    #[test]
    fn missing_profile_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path());
        assert!(matches!(
            store.load("Nobody"),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn invalid_json_is_internal_error() {
        let dir = tempfile::tempdir().unwrap();
        write_profile(dir.path(), "Broken", "{not json");
        let store = ProfileStore::new(dir.path());
        assert!(matches!(store.load("Broken"), Err(AppError::Internal(_))));
    }
}
