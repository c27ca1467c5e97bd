//! AI-generated resume content and the final render input.
//!
//! `ResumeContent` is deliberately shallow: only the four top-level fields
//! are required, and their internal shape is trusted as the model produced
//! it. `ResumeDocument` is the merged, renderable form.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::profile::EducationEntry;

/// Validated AI output. `skills` stays a raw JSON map (category → items)
/// and per-job details stay raw values; the assembler coerces to strings.
#[derive(Debug, Clone, Deserialize)]
pub struct ResumeContent {
    pub title: String,
    pub summary: String,
    pub skills: serde_json::Map<String, Value>,
    pub experience: Vec<ContentExperience>,
}

/// One AI-generated experience block, index-aligned with the profile's
/// work history by position.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentExperience {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub details: Vec<Value>,
}

/// A named skill category, flattened for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct SkillCategory {
    pub name: String,
    pub items: Vec<String>,
}

/// The final render input: profile structure merged with generated content.
/// Contact fields that the product excludes from the PDF (phone, linkedin,
/// personal site) are simply absent.
#[derive(Debug, Clone, Serialize)]
pub struct ResumeDocument {
    pub name: String,
    pub title: String,
    pub email: String,
    pub location: String,
    pub summary: String,
    pub skills: Vec<SkillCategory>,
    pub experience: Vec<DocumentExperience>,
    pub education: Vec<EducationEntry>,
}

/// One rendered job: structure from the profile, bullets from the model.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentExperience {
    pub title: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub details: Vec<String>,
}
