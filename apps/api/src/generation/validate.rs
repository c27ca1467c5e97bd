//! ContentValidator — checks the recovered JSON for the fields the
//! downstream document assembly depends on, then converts it into a typed
//! [`ResumeContent`].
//!
//! Validation is deliberately shallow: only field PRESENCE is enforced.
//! Shape leniency (skills as an arbitrary object, details of mixed types)
//! is handled by the permissive deserialization in the content model.

use serde_json::Value;

use crate::errors::AppError;
use crate::models::content::ResumeContent;

/// The fields a resume document cannot be assembled without.
const REQUIRED_FIELDS: &[&str] = &["title", "summary", "skills", "experience"];

/// Validates the recovered object and deserializes it into [`ResumeContent`].
/// Reports the FIRST missing field so the error message stays actionable.
pub fn validate(content: Value) -> Result<ResumeContent, AppError> {
    let object = content
        .as_object()
        .ok_or(AppError::MissingField("title"))?;

    for field in REQUIRED_FIELDS {
        if !object.contains_key(*field) {
            return Err(AppError::MissingField(field));
        }
    }

    serde_json::from_value(content)
        .map_err(|e| AppError::MalformedOutput(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn complete() -> Value {
        json!({
            "title": "Senior Engineer",
            "summary": "Ten years of systems work.",
            "skills": {"Languages": ["Rust", "Go"]},
            "experience": [{"title": "Engineer", "details": ["Shipped things"]}]
        })
    }

    #[test]
    fn complete_content_validates() {
        let content = validate(complete()).unwrap();
        assert_eq!(content.title, "Senior Engineer");
        assert_eq!(content.experience.len(), 1);
    }

    #[test]
    fn first_missing_field_is_reported() {
        let mut value = complete();
        value.as_object_mut().unwrap().remove("summary");
        value.as_object_mut().unwrap().remove("skills");
        match validate(value) {
            Err(AppError::MissingField(name)) => assert_eq!(name, "summary"),
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn missing_experience_is_rejected() {
        let mut value = complete();
        value.as_object_mut().unwrap().remove("experience");
        assert!(matches!(
            validate(value),
            Err(AppError::MissingField("experience"))
        ));
    }

    #[test]
    fn non_object_is_rejected() {
        assert!(validate(json!(["not", "an", "object"])).is_err());
    }

    #[test]
    fn extra_fields_are_tolerated() {
        let mut value = complete();
        value
            .as_object_mut()
            .unwrap()
            .insert("confidence".into(), json!(0.93));
        assert!(validate(value).is_ok());
    }

    #[test]
    fn mixed_type_details_are_tolerated() {
        let mut value = complete();
        value["experience"][0]["details"] = json!(["text", 42, {"note": "odd"}]);
        assert!(validate(value).is_ok());
    }
}
