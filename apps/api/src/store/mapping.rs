//! Profile slug mapping — which resume file, PDF template, and prompt each
//! public profile slug resolves to. Content changes only via redeploy.

/// One profile's configuration.
#[derive(Debug, Clone, Copy)]
pub struct ProfileConfig {
    pub slug: &'static str,
    /// Resume file name under the profiles dir (without `.json`), also the
    /// candidate's display-name source for filename derivation.
    pub resume: &'static str,
    pub template: &'static str,
    /// Pinned prompt name; `None` means pick by role detection.
    pub prompt: Option<&'static str>,
}

const PROFILES: &[ProfileConfig] = &[
    ProfileConfig {
        slug: "as",
        resume: "Anatoliy Sokolov",
        template: "Resume-Academic-Purple",
        prompt: Some("default"),
    },
    ProfileConfig {
        slug: "bv",
        resume: "Boris_Varbanov",
        template: "Resume-Tech-Teal",
        prompt: Some("default"),
    },
    ProfileConfig {
        slug: "cc",
        resume: "Christian_Carrasco",
        template: "Resume-Modern-Green",
        prompt: Some("default"),
    },
    ProfileConfig {
        slug: "jm",
        resume: "Jose_Martin",
        template: "Resume-Corporate-Slate",
        prompt: Some("default"),
    },
    ProfileConfig {
        slug: "kg",
        resume: "Kyle_Garcia",
        template: "Resume-Creative-Burgundy",
        prompt: Some("default"),
    },
    ProfileConfig {
        slug: "lm",
        resume: "Lucas_Moura",
        template: "Resume-Executive-Navy",
        prompt: Some("default"),
    },
    ProfileConfig {
        slug: "pv",
        resume: "Pavlo_Vorchylo",
        template: "Resume-Classic-Charcoal",
        prompt: Some("default"),
    },
];

/// Looks up a profile configuration by slug.
pub fn profile_by_slug(slug: &str) -> Option<&'static ProfileConfig> {
    PROFILES.iter().find(|p| p.slug == slug)
}

/// All known slugs, in registration order.
pub fn available_slugs() -> Vec<&'static str> {
    PROFILES.iter().map(|p| p.slug).collect()
}
