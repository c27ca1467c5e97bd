//! Prompt template store: plain-text files with `{{variable}}` placeholders,
//! one per named prompt, plus a mandatory `default.txt` fallback.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Context};
use tracing::info;

use crate::errors::AppError;

pub struct PromptStore {
    dir: PathBuf,
    cache: Mutex<HashMap<String, Arc<String>>>,
}

impl PromptStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Loads a prompt template by name, falling back to `default` when the
    /// named file does not exist. A missing default is a deployment error.
    pub fn load(&self, name: &str) -> Result<Arc<String>, AppError> {
        if let Some(template) = self.cache.lock().unwrap().get(name) {
            return Ok(Arc::clone(template));
        }

        let path = self.dir.join(format!("{name}.txt"));
        if !path.exists() {
            if name == "default" {
                return Err(AppError::Internal(anyhow!(
                    "Prompt file not found: default.txt is missing from {}",
                    self.dir.display()
                )));
            }
            info!("Using default prompt ({name}.txt not found)");
            return self.load("default");
        }

        let template = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read prompt file {}", path.display()))?;

        let template = Arc::new(template);
        self.cache
            .lock()
            .unwrap()
            .insert(name.to_string(), Arc::clone(&template));
        Ok(template)
    }
}
