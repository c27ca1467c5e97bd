//! PromptBuilder — derives template variables from a profile record and job
//! description, then fills a `{{var}}` prompt template.
//!
//! Date handling is tolerant by design: a start date that fails every
//! parse attempt is logged and dropped, never fatal — partial work-history
//! data is acceptable for the years-of-experience estimate.

use std::sync::OnceLock;

use chrono::{NaiveDate, Utc};
use regex::Regex;
use tracing::warn;

use crate::models::profile::{EducationEntry, ExperienceEntry, ProfileRecord};

/// Output-size targets injected into the prompt template. Two named presets
/// exist: `FULL` for the first attempt and `CONCISE` for the one retry
/// after a truncated response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptParams {
    pub skills_total: &'static str,
    pub skills_per_category: &'static str,
    pub bullets_per_job: &'static str,
}

pub const FULL: PromptParams = PromptParams {
    skills_total: "60-80",
    skills_per_category: "8-12",
    bullets_per_job: "5-6",
};

pub const CONCISE: PromptParams = PromptParams {
    skills_total: "50-60",
    skills_per_category: "6-10",
    bullets_per_job: "4-5",
};

fn mm_yyyy_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(\d{1,2})/(\d{4})\s*$").unwrap())
}

/// Parses one free-text start date. "Present" (any case) is today,
/// "MM/YYYY" is the first of that month, anything else goes through a
/// small chain of common formats. `None` when nothing matches.
fn parse_date(raw: &str, now: NaiveDate) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.eq_ignore_ascii_case("present") {
        return Some(now);
    }

    if let Some(caps) = mm_yyyy_pattern().captures(trimmed) {
        let month: u32 = caps[1].parse().ok()?;
        let year: i32 = caps[2].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, 1);
    }

    for fmt in ["%Y-%m-%d", "%m/%d/%Y", "%B %d, %Y", "%b %d, %Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(date);
        }
    }
    // Month-year forms get a synthetic first-of-month day.
    for fmt in ["%d %B %Y", "%d %b %Y", "%d %Y-%m"] {
        if let Ok(date) = NaiveDate::parse_from_str(&format!("1 {trimmed}"), fmt) {
            return Some(date);
        }
    }
    if let Ok(year) = trimmed.parse::<i32>() {
        if (1900..=2100).contains(&year) {
            return NaiveDate::from_ymd_opt(year, 1, 1);
        }
    }

    None
}

/// Rounded years since the earliest parseable start date, floored at 0.
/// Unparseable entries are dropped with a warning; no parseable dates → 0.
pub fn years_of_experience(experience: &[ExperienceEntry], now: NaiveDate) -> u32 {
    let valid_dates: Vec<NaiveDate> = experience
        .iter()
        .filter_map(|job| {
            let raw = job.start_date.as_deref()?;
            let parsed = parse_date(raw, now);
            if parsed.is_none() {
                warn!("Failed to parse date: \"{raw}\"");
            }
            parsed
        })
        .collect();

    let Some(earliest) = valid_dates.into_iter().min() else {
        warn!("No valid dates found in experience");
        return 0;
    };

    let years = (now - earliest).num_days() as f64 / 365.0;
    years.round().max(0.0) as u32
}

/// One numbered line per job:
/// `"{n}. {company} | {title} | {location} | {start} - {end}"`,
/// omitting empty optional segments.
pub fn work_history_lines(experience: &[ExperienceEntry]) -> String {
    experience
        .iter()
        .enumerate()
        .map(|(idx, job)| {
            let company = if job.company.is_empty() {
                "Unknown Company"
            } else {
                &job.company
            };
            let mut parts = vec![format!("{}. {}", idx + 1, company)];
            if let Some(title) = job.title.as_deref().filter(|t| !t.is_empty()) {
                parts.push(title.to_string());
            }
            if let Some(location) = job.location.as_deref().filter(|l| !l.is_empty()) {
                parts.push(location.to_string());
            }
            parts.push(format!(
                "{} - {}",
                job.start_date.as_deref().unwrap_or("N/A"),
                job.end_date.as_deref().unwrap_or("N/A")
            ));
            parts.join(" | ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One dashed line per education row, with an optional GPA suffix.
pub fn education_lines(education: &[EducationEntry]) -> String {
    education
        .iter()
        .map(|edu| {
            let mut line = format!(
                "- {}, {} ({}-{})",
                edu.degree,
                edu.school,
                edu.start_year.as_deref().unwrap_or(""),
                edu.end_year.as_deref().unwrap_or("")
            );
            if let Some(grade) = edu.grade.as_deref().filter(|g| !g.is_empty()) {
                line.push_str(&format!(" | GPA: {grade}"));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Replaces every `{{key}}` with its value. Placeholders with no matching
/// variable are left as literal text — never an error.
pub fn substitute(template: &str, variables: &[(&str, String)]) -> String {
    let mut rendered = template.to_string();
    for (key, value) in variables {
        rendered = rendered.replace(&format!("{{{{{key}}}}}"), value);
    }
    rendered
}

/// Builds the fully substituted generation prompt.
pub fn build_prompt(
    template: &str,
    profile: &ProfileRecord,
    job_description: &str,
    params: &PromptParams,
) -> String {
    build_prompt_at(
        template,
        profile,
        job_description,
        params,
        Utc::now().date_naive(),
    )
}

/// Same as [`build_prompt`] with an explicit "today" for deterministic tests.
pub fn build_prompt_at(
    template: &str,
    profile: &ProfileRecord,
    job_description: &str,
    params: &PromptParams,
    now: NaiveDate,
) -> String {
    let years = years_of_experience(&profile.experience, now);
    let variables: Vec<(&str, String)> = vec![
        ("name", profile.name.clone()),
        ("email", profile.email.clone()),
        ("location", profile.location.clone().unwrap_or_default()),
        ("yearsOfExperience", years.to_string()),
        ("workHistory", work_history_lines(&profile.experience)),
        ("education", education_lines(&profile.education)),
        ("jobDescription", job_description.to_string()),
        ("experienceCount", profile.experience.len().to_string()),
        ("skillsTotalTarget", params.skills_total.to_string()),
        ("skillsPerCategory", params.skills_per_category.to_string()),
        ("bulletsPerJob", params.bullets_per_job.to_string()),
    ];
    substitute(template, &variables)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(company: &str, start: Option<&str>) -> ExperienceEntry {
        ExperienceEntry {
            title: None,
            company: company.to_string(),
            location: None,
            start_date: start.map(str::to_string),
            end_date: Some("Present".to_string()),
            details: Vec::new(),
        }
    }

    fn jan1_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn years_from_earliest_mm_yyyy_start() {
        let experience = vec![
            entry("Acme", Some("01/2015")),
            entry("Globex", Some("06/2018")),
        ];
        assert_eq!(years_of_experience(&experience, jan1_2024()), 9);
    }

    #[test]
    fn present_counts_as_zero_years() {
        let experience = vec![entry("Acme", Some("Present"))];
        assert_eq!(years_of_experience(&experience, jan1_2024()), 0);
    }

    #[test]
    fn unparseable_dates_are_dropped_not_fatal() {
        let experience = vec![
            entry("Acme", Some("whenever")),
            entry("Globex", Some("01/2020")),
        ];
        assert_eq!(years_of_experience(&experience, jan1_2024()), 4);
    }

    #[test]
    fn no_parseable_dates_yields_zero() {
        let experience = vec![entry("Acme", None), entry("Globex", Some("n/a"))];
        assert_eq!(years_of_experience(&experience, jan1_2024()), 0);
    }

    #[test]
    fn parse_date_handles_common_formats() {
        let now = jan1_2024();
        assert_eq!(
            parse_date("12/2018", now),
            NaiveDate::from_ymd_opt(2018, 12, 1)
        );
        assert_eq!(
            parse_date("2019-03-15", now),
            NaiveDate::from_ymd_opt(2019, 3, 15)
        );
        assert_eq!(
            parse_date("June 2017", now),
            NaiveDate::from_ymd_opt(2017, 6, 1)
        );
        assert_eq!(parse_date("2016", now), NaiveDate::from_ymd_opt(2016, 1, 1));
        assert_eq!(parse_date("PRESENT", now), Some(now));
        assert_eq!(parse_date("soon", now), None);
    }

    #[test]
    fn work_history_omits_empty_optional_segments() {
        let mut with_title = entry("Acme", Some("01/2015"));
        with_title.title = Some("Engineer".to_string());
        with_title.location = Some("Berlin".to_string());
        let without = entry("Globex", Some("06/2018"));

        let lines = work_history_lines(&[with_title, without]);
        assert_eq!(
            lines,
            "1. Acme | Engineer | Berlin | 01/2015 - Present\n\
             2. Globex | 06/2018 - Present"
        );
    }

    #[test]
    fn education_line_includes_optional_gpa() {
        let education = vec![EducationEntry {
            degree: "BSc Computer Science".to_string(),
            school: "MIT".to_string(),
            start_year: Some("2010".to_string()),
            end_year: Some("2014".to_string()),
            grade: Some("3.9".to_string()),
        }];
        assert_eq!(
            education_lines(&education),
            "- BSc Computer Science, MIT (2010-2014) | GPA: 3.9"
        );
    }

    #[test]
    fn substitute_leaves_unknown_placeholders_literal() {
        let rendered = substitute(
            "Hello {{name}}, your {{unknown}} stays.",
            &[("name", "Jane".to_string())],
        );
        assert_eq!(rendered, "Hello Jane, your {{unknown}} stays.");
    }

    #[test]
    fn build_prompt_fills_preset_targets() {
        let profile = ProfileRecord {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: None,
            location: Some("Lisbon".to_string()),
            linkedin: None,
            github: None,
            website: None,
            experience: vec![entry("Acme", Some("01/2015"))],
            education: Vec::new(),
        };
        let template = "{{name}} / {{yearsOfExperience}}y / total {{skillsTotalTarget}} \
                        / {{bulletsPerJob}} bullets";
        let full = build_prompt_at(template, &profile, "jd", &FULL, jan1_2024());
        assert_eq!(full, "Jane Doe / 9y / total 60-80 / 5-6 bullets");

        let concise = build_prompt_at(template, &profile, "jd", &CONCISE, jan1_2024());
        assert_eq!(concise, "Jane Doe / 9y / total 50-60 / 4-5 bullets");
    }
}
