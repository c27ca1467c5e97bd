//! PDF rendering — template trait, palette variants and the registry the
//! request handler resolves template names against.

pub mod palette;
pub mod single_column;

use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::AppError;
use crate::models::content::ResumeDocument;
use crate::render::palette::{DEFAULT_TEMPLATE, PALETTES};
use crate::render::single_column::SingleColumnTemplate;

/// A renderable resume template. Implementations are stateless and shared
/// behind `Arc` across requests.
pub trait ResumeTemplate: Send + Sync {
    fn name(&self) -> &'static str;
    fn render(&self, resume: &ResumeDocument) -> Result<Vec<u8>, AppError>;
}

/// Name-indexed template lookup, built once at startup.
pub struct TemplateRegistry {
    templates: HashMap<&'static str, Arc<dyn ResumeTemplate>>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        let templates = PALETTES
            .iter()
            .map(|(name, palette)| {
                let template: Arc<dyn ResumeTemplate> =
                    Arc::new(SingleColumnTemplate::new(name, *palette));
                (*name, template)
            })
            .collect();
        Self { templates }
    }

    /// Resolves a template by name; `None` falls back to the default.
    pub fn resolve(&self, name: Option<&str>) -> Result<Arc<dyn ResumeTemplate>, AppError> {
        let name = name.unwrap_or(DEFAULT_TEMPLATE);
        self.templates
            .get(name)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Unknown template \"{name}\"")))
    }

    pub fn available(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.templates.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new()
    }
}
