//! KeywordGate — rule-based admissibility filter over the job description.
//!
//! The product only serves fully remote, mid-level-or-above positions, so
//! hybrid/onsite/entry-level postings are rejected before any LLM cost is
//! incurred. Matching is deliberately plain substring containment: cheap
//! and explainable, with false positives accepted as a product tradeoff
//! (e.g. "hybrid" inside an unrelated compound word still rejects).

const HYBRID_KEYWORDS: &[&str] = &[
    "hybrid",
    "hybrid work",
    "hybrid model",
    "hybrid schedule",
    "days in office",
    "days per week in office",
    "in-office days",
    "office presence",
    "some days in office",
];

const ONSITE_KEYWORDS: &[&str] = &[
    "on-site",
    "onsite",
    "on site",
    "in-office",
    "in office",
    "office based",
    "office-based",
    "must be located in",
    "must be based in",
    "must relocate",
    "relocation required",
    "physical presence required",
    "in person",
    "local candidates",
    "candidates must be in",
    "candidates must reside",
];

const REMOTE_KEYWORDS: &[&str] = &[
    "remote",
    "work from home",
    "fully remote",
    "100% remote",
    "remote-first",
    "distributed team",
];

const JUNIOR_KEYWORDS: &[&str] = &["junior role", "entry level", "entry-level"];

// The spaces around " intern " are load-bearing: they keep "internal" and
// "international" from matching.
const INTERN_KEYWORDS: &[&str] = &[" intern ", "internship"];

/// Verdict over a job description. Only `Remote` permits continuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationVerdict {
    Remote,
    Hybrid,
    Onsite,
    EntryLevel,
}

impl LocationVerdict {
    /// The `locationType` tag carried in rejection payloads.
    /// `Remote` is not a rejection and has no tag.
    pub fn rejection_tag(&self) -> Option<&'static str> {
        match self {
            LocationVerdict::Remote => None,
            LocationVerdict::Hybrid => Some("hybrid"),
            LocationVerdict::Onsite => Some("onsite"),
            LocationVerdict::EntryLevel => Some("entry-level"),
        }
    }

    /// User-facing rejection message, phrased as guidance.
    pub fn rejection_message(&self) -> Option<&'static str> {
        match self {
            LocationVerdict::Remote => None,
            LocationVerdict::Hybrid => Some(
                "This position is HYBRID (requires some office days). This tool is designed \
                 for REMOTE-ONLY positions. Please provide a fully remote job description.",
            ),
            LocationVerdict::Onsite => Some(
                "This position is ONSITE/IN-PERSON. This tool is designed for REMOTE-ONLY \
                 positions. Please provide a fully remote job description.",
            ),
            LocationVerdict::EntryLevel => Some(
                "This position is ENTRY LEVEL. This tool is designed for MID-LEVEL and \
                 SENIOR positions. Please provide a more senior job description.",
            ),
        }
    }
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

/// Evaluates a job description. Precedence, in order:
/// 1. any hybrid keyword → `Hybrid`;
/// 2. any onsite keyword with no remote keyword → `Onsite`;
/// 3. junior XOR intern signal → `EntryLevel`;
/// 4. otherwise → `Remote`.
pub fn evaluate(job_description: &str) -> LocationVerdict {
    let jd = job_description.to_lowercase();

    if contains_any(&jd, HYBRID_KEYWORDS) {
        return LocationVerdict::Hybrid;
    }

    let has_onsite = contains_any(&jd, ONSITE_KEYWORDS);
    let has_remote = contains_any(&jd, REMOTE_KEYWORDS);
    if has_onsite && !has_remote {
        return LocationVerdict::Onsite;
    }

    let has_junior = contains_any(&jd, JUNIOR_KEYWORDS);
    let has_intern = contains_any(&jd, INTERN_KEYWORDS);
    if (has_junior && !has_intern) || (has_intern && !has_junior) {
        return LocationVerdict::EntryLevel;
    }

    LocationVerdict::Remote
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn onsite_without_remote_is_rejected() {
        assert_eq!(
            evaluate("This role is on-site, must relocate to Austin."),
            LocationVerdict::Onsite
        );
    }

    #[test]
    fn onsite_with_remote_mention_passes() {
        assert_eq!(
            evaluate("Office based team, but fully remote candidates welcome."),
            LocationVerdict::Remote
        );
    }

    #[test]
    fn hybrid_wins_over_remote() {
        // Hybrid check precedes the remote-override logic.
        assert_eq!(
            evaluate("hybrid role, remote-first culture"),
            LocationVerdict::Hybrid
        );
    }

    #[test]
    fn entry_level_is_rejected() {
        assert_eq!(
            evaluate("Remote entry-level position for new grads."),
            LocationVerdict::EntryLevel
        );
        assert_eq!(
            evaluate("We offer a remote internship program."),
            LocationVerdict::EntryLevel
        );
    }

    #[test]
    fn junior_and_intern_together_cancel_out() {
        // XOR rule: both signals present → neither fires.
        assert_eq!(
            evaluate("remote internship or junior role available"),
            LocationVerdict::Remote
        );
    }

    #[test]
    fn intern_requires_word_boundary_spaces() {
        assert_eq!(
            evaluate("Remote role on our international payments team."),
            LocationVerdict::Remote
        );
    }

    #[test]
    fn plain_remote_jd_passes() {
        assert_eq!(
            evaluate("Fully remote senior engineer, distributed team."),
            LocationVerdict::Remote
        );
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(evaluate("HYBRID SCHEDULE"), LocationVerdict::Hybrid);
    }
}
