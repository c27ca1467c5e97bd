//! DocumentAssembler — merges the candidate profile (ground truth for
//! structure and dates) with the generated content (titles, summary,
//! skills, bullets) into the final [`ResumeDocument`].
//!
//! The profile's work history governs: content entries are matched by
//! index, a job the model skipped renders with empty details rather than
//! dropping the job, and the profile's own job title wins over a generated
//! one. Phone, LinkedIn and personal-site fields are excluded from the
//! document by product policy.

use serde_json::Value;

use crate::models::content::{DocumentExperience, ResumeContent, ResumeDocument, SkillCategory};
use crate::models::profile::ProfileRecord;

/// Title used when neither the profile nor the model supplied one.
const FALLBACK_TITLE: &str = "Engineer";

/// Coerces a raw skill-item value to display text. Strings pass through;
/// anything else is serialized, so a stray number still renders.
fn item_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Flattens the raw skills map into ordered categories. Scalar category
/// values become a single-item list.
fn flatten_skills(skills: &serde_json::Map<String, Value>) -> Vec<SkillCategory> {
    skills
        .iter()
        .map(|(name, items)| SkillCategory {
            name: name.clone(),
            items: match items {
                Value::Array(values) => values.iter().map(item_text).collect(),
                other => vec![item_text(other)],
            },
        })
        .collect()
}

/// Builds the render input from profile structure and generated content.
pub fn assemble(profile: &ProfileRecord, content: &ResumeContent) -> ResumeDocument {
    let experience = profile
        .experience
        .iter()
        .enumerate()
        .map(|(i, job)| {
            let generated = content.experience.get(i);
            let title = job
                .title
                .clone()
                .or_else(|| generated.and_then(|g| g.title.clone()))
                .unwrap_or_else(|| FALLBACK_TITLE.to_string());
            let details = generated
                .map(|g| g.details.iter().map(item_text).collect())
                .unwrap_or_default();
            DocumentExperience {
                title,
                company: job.company.clone(),
                location: job.location.clone().unwrap_or_default(),
                start_date: job.start_date.clone().unwrap_or_default(),
                end_date: job.end_date.clone().unwrap_or_default(),
                details,
            }
        })
        .collect();

    ResumeDocument {
        name: profile.name.clone(),
        title: content.title.clone(),
        email: profile.email.clone(),
        location: profile.location.clone().unwrap_or_default(),
        summary: content.summary.clone(),
        skills: flatten_skills(&content.skills),
        experience,
        education: profile.education.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::content::ContentExperience;
    use crate::models::profile::ExperienceEntry;
    use serde_json::json;

    fn job(company: &str, title: Option<&str>) -> ExperienceEntry {
        ExperienceEntry {
            title: title.map(String::from),
            company: company.to_string(),
            location: Some("Remote".to_string()),
            start_date: Some("01/2020".to_string()),
            end_date: Some("Present".to_string()),
            details: vec!["original note".to_string()],
        }
    }

    fn profile(jobs: Vec<ExperienceEntry>) -> ProfileRecord {
        ProfileRecord {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: Some("555-0100".to_string()),
            location: Some("Berlin".to_string()),
            linkedin: Some("linkedin.com/in/jane".to_string()),
            github: None,
            website: Some("jane.dev".to_string()),
            experience: jobs,
            education: Vec::new(),
        }
    }

    fn content(entries: Vec<ContentExperience>) -> ResumeContent {
        let skills = json!({"Languages": ["Rust", "Go"], "Cloud": "AWS"});
        ResumeContent {
            title: "Senior Engineer".to_string(),
            summary: "Systems generalist.".to_string(),
            skills: skills.as_object().unwrap().clone(),
            experience: entries,
        }
    }

    #[test]
    fn aligned_entries_merge_by_index() {
        let doc = assemble(
            &profile(vec![job("Acme", Some("Engineer")), job("Globex", None)]),
            &content(vec![
                ContentExperience {
                    title: Some("Platform Engineer".to_string()),
                    details: vec![json!("Built the platform")],
                },
                ContentExperience {
                    title: Some("Senior SRE".to_string()),
                    details: vec![json!("Ran the fleet")],
                },
            ]),
        );
        assert_eq!(doc.experience.len(), 2);
        // The profile's own title wins over the generated one.
        assert_eq!(doc.experience[0].title, "Engineer");
        assert_eq!(doc.experience[0].company, "Acme");
        assert_eq!(doc.experience[0].details, vec!["Built the platform"]);
        // No profile title, so the generated one fills in.
        assert_eq!(doc.experience[1].title, "Senior SRE");
        assert_eq!(doc.experience[1].start_date, "01/2020");
    }

    #[test]
    fn profile_length_governs_when_content_is_short() {
        let doc = assemble(
            &profile(vec![job("Acme", Some("Engineer")), job("Globex", Some("SRE"))]),
            &content(vec![ContentExperience {
                title: Some("Lead".to_string()),
                details: vec![json!("Led")],
            }]),
        );
        assert_eq!(doc.experience.len(), 2);
        assert_eq!(doc.experience[1].title, "SRE");
        assert!(doc.experience[1].details.is_empty());
    }

    #[test]
    fn title_falls_back_to_default_when_both_sides_are_empty() {
        let doc = assemble(
            &profile(vec![job("Acme", None)]),
            &content(vec![ContentExperience::default()]),
        );
        assert_eq!(doc.experience[0].title, "Engineer");
    }

    #[test]
    fn skills_keep_category_order_and_coerce_scalars() {
        let doc = assemble(&profile(vec![]), &content(vec![]));
        assert_eq!(doc.skills[0].name, "Languages");
        assert_eq!(doc.skills[0].items, vec!["Rust", "Go"]);
        assert_eq!(doc.skills[1].name, "Cloud");
        assert_eq!(doc.skills[1].items, vec!["AWS"]);
    }

    #[test]
    fn non_string_detail_values_render_as_text() {
        let doc = assemble(
            &profile(vec![job("Acme", Some("Engineer"))]),
            &content(vec![ContentExperience {
                title: None,
                details: vec![json!("text"), json!(42)],
            }]),
        );
        assert_eq!(doc.experience[0].details, vec!["text", "42"]);
    }
}
