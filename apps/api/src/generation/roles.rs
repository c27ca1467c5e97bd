//! Role detection — keyword-scored classifier mapping a job description to
//! one of the role categories, each of which has its own prompt template.
//! Falls back to "default" when no category scores above the threshold.
//!
//! Plain substring occurrence counting, no stemming. Specialized ecosystems
//! (fullstack, salesforce, sap) carry a higher weight so a handful of their
//! very specific keywords can outvote generic ones.

struct RolePattern {
    name: &'static str,
    weight: f32,
    keywords: &'static [&'static str],
}

const ROLE_PATTERNS: &[RolePattern] = &[
    RolePattern {
        name: "frontend",
        weight: 1.0,
        keywords: &[
            "frontend", "front-end", "front end", "ui engineer", "ui developer",
            "react", "vue", "angular", "javascript", "typescript", "html", "css",
            "user interface", "client-side", "browser", "spa", "single page",
            "ui/ux", "user experience", "responsive design", "web design",
        ],
    },
    RolePattern {
        name: "backend",
        weight: 1.0,
        keywords: &[
            "backend", "back-end", "back end", "server-side", "api", "rest api",
            "graphql", "microservices", "node.js", "python", "java", "go", "rust",
            "database", "postgresql", "mysql", "mongodb", "redis", "elasticsearch",
            "server", "api development", "backend engineer", "server engineer",
        ],
    },
    RolePattern {
        name: "fullstack",
        weight: 1.2,
        keywords: &[
            "fullstack", "full-stack", "full stack", "full stack engineer",
            "end-to-end", "end to end", "full cycle", "full lifecycle",
        ],
    },
    RolePattern {
        name: "devops",
        weight: 1.0,
        keywords: &[
            "devops", "dev ops", "sre", "site reliability", "infrastructure",
            "ci/cd", "continuous integration", "continuous deployment", "jenkins",
            "docker", "kubernetes", "k8s", "terraform", "ansible", "aws", "azure",
            "gcp", "cloud infrastructure", "deployment", "automation", "monitoring",
            "prometheus", "grafana", "datadog", "cloudformation",
        ],
    },
    RolePattern {
        name: "data-science",
        weight: 1.0,
        keywords: &[
            "data scientist", "data science", "machine learning", "ml engineer",
            "data engineer", "data analyst", "analytics", "python", "pandas", "numpy",
            "scikit-learn", "tensorflow", "pytorch", "jupyter", "sql", "data pipeline",
            "etl", "big data", "hadoop", "spark", "data warehouse", "data lake",
            "statistical", "modeling", "ai", "artificial intelligence",
        ],
    },
    RolePattern {
        name: "mobile",
        weight: 1.0,
        keywords: &[
            "mobile", "ios", "android", "react native", "flutter", "swift", "kotlin",
            "mobile app", "mobile developer", "app development", "native app",
            "cross-platform", "xamarin", "ionic",
        ],
    },
    RolePattern {
        name: "qa",
        weight: 1.0,
        keywords: &[
            "qa", "quality assurance", "test engineer", "testing", "automation",
            "selenium", "cypress", "jest", "test automation", "qa engineer",
            "quality engineer", "test automation engineer", "sdet",
        ],
    },
    RolePattern {
        name: "security",
        weight: 1.0,
        keywords: &[
            "security engineer", "cybersecurity", "security", "penetration testing",
            "vulnerability", "security analyst", "infosec", "information security",
            "security architect", "compliance", "soc 2", "iso 27001", "gdpr",
        ],
    },
    RolePattern {
        name: "product-manager",
        weight: 1.0,
        keywords: &[
            "product manager", "product management", "pm", "product owner", "po",
            "product strategy", "roadmap", "stakeholder", "agile", "scrum master",
        ],
    },
    RolePattern {
        name: "salesforce",
        weight: 1.2,
        keywords: &[
            "salesforce", "sfdc", "salesforce developer", "salesforce admin",
            "salesforce consultant", "apex", "visualforce", "lightning",
            "sales cloud", "service cloud", "marketing cloud", "salesforce platform",
            "salesforce architect", "crm", "customer relationship management",
            "salesforce.com", "force.com", "lwc", "lightning web components", "aura",
            "flows", "salesforce cpq", "salesforce commerce cloud",
            "salesforce integration",
        ],
    },
    RolePattern {
        name: "sap",
        weight: 1.2,
        keywords: &[
            "sap", "sap consultant", "sap developer", "sap analyst", "sap architect",
            "sap erp", "sap hana", "sap fico", "sap mm", "sap sd", "sap pp", "sap hr",
            "sap abap", "sap basis", "sap bw", "sap bi", "sap ecc", "sap s/4hana",
            "sap successfactors", "sap ariba", "sap hybris", "sap crm", "sap pi",
            "sap po", "sap integration", "sap implementation", "sap migration",
        ],
    },
];

/// Minimum winning score; anything lower falls back to "default".
const SCORE_THRESHOLD: f32 = 2.0;

fn count_occurrences(text: &str, keyword: &str) -> usize {
    text.matches(keyword).count()
}

/// Detects the primary role of a job description. The role name (job title
/// from the request) participates in scoring since it is often the
/// strongest signal.
pub fn detect_role(job_description: &str, role_name: &str) -> &'static str {
    if job_description.is_empty() {
        return "default";
    }

    let text = format!("{job_description} {role_name}").to_lowercase();

    let mut scores: Vec<(&'static str, f32)> = ROLE_PATTERNS
        .iter()
        .map(|pattern| {
            let hits: usize = pattern
                .keywords
                .iter()
                .map(|k| count_occurrences(&text, k))
                .sum();
            (pattern.name, hits as f32 * pattern.weight)
        })
        .collect();

    // A JD that scores well on both frontend and backend is usually a
    // fullstack posting even without the literal words.
    let frontend = score_of(&scores, "frontend");
    let backend = score_of(&scores, "backend");
    if frontend > 2.0 && backend > 2.0 {
        if let Some(entry) = scores.iter_mut().find(|(name, _)| *name == "fullstack") {
            entry.1 += (frontend + backend) * 0.3;
        }
    }

    let mut best = ("default", 0.0_f32);
    for (name, score) in scores {
        if score > best.1 {
            best = (name, score);
        }
    }

    if best.1 < SCORE_THRESHOLD {
        return "default";
    }
    best.0
}

fn score_of(scores: &[(&'static str, f32)], name: &str) -> f32 {
    scores
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, s)| *s)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frontend_jd_detected() {
        let jd = "We need a frontend engineer with deep React and TypeScript \
                  experience building responsive design systems in the browser.";
        assert_eq!(detect_role(jd, "Frontend Engineer"), "frontend");
    }

    #[test]
    fn devops_jd_detected() {
        let jd = "Own our Kubernetes clusters, Terraform modules and CI/CD \
                  pipelines. Docker, Prometheus and Grafana monitoring daily.";
        assert_eq!(detect_role(jd, "DevOps Engineer"), "devops");
    }

    #[test]
    fn weak_signal_falls_back_to_default() {
        assert_eq!(detect_role("We sell artisanal cheese.", ""), "default");
    }

    #[test]
    fn empty_jd_is_default() {
        assert_eq!(detect_role("", "Engineer"), "default");
    }

    #[test]
    fn mixed_frontend_backend_boosts_fullstack() {
        // Strong scores on both sides push fullstack over either one.
        let jd = "Full stack role: React, TypeScript and CSS on the frontend; \
                  Python APIs, PostgreSQL database on the backend. End-to-end \
                  ownership across the full stack.";
        assert_eq!(detect_role(jd, "Engineer"), "fullstack");
    }

    #[test]
    fn sap_weight_beats_generic_keywords() {
        let jd = "SAP consultant for SAP S/4HANA migration. SAP FICO and SAP MM \
                  modules, SAP ABAP development.";
        assert_eq!(detect_role(jd, "SAP Consultant"), "sap");
    }
}
