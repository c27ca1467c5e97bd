//! Candidate profile data — loaded from flat JSON files in the profile store.
//!
//! Dates are free text at rest ("MM/YYYY", "Present", or anything the
//! tolerant parser in `generation::prompt` can handle) and are NOT
//! normalized here.

use serde::{Deserialize, Serialize};

/// A static candidate profile, one JSON document per candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
}

/// One job in the candidate's work history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default)]
    pub title: Option<String>,
    pub company: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    /// Raw accomplishment notes carried in some profile files. Not rendered
    /// directly — the generated bullets replace these.
    #[serde(default)]
    pub details: Vec<String>,
}

/// One education row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub school: String,
    #[serde(default)]
    pub start_year: Option<String>,
    #[serde(default)]
    pub end_year: Option<String>,
    #[serde(default)]
    pub grade: Option<String>,
}
