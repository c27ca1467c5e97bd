//! Template color palettes. Every template shares one single-column
//! layout; the palette is what distinguishes them visually.

/// RGB color in the 0.0..=1.0 range printpdf expects.
#[derive(Debug, Clone, Copy)]
pub struct Tone {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

pub const fn tone(r: f32, g: f32, b: f32) -> Tone {
    Tone { r, g, b }
}

/// Colors for one template variant.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    /// Candidate name and section headings.
    pub accent: Tone,
    /// Section divider rules.
    pub rule: Tone,
    /// Body text.
    pub body: Tone,
}

const INK: Tone = tone(0.13, 0.13, 0.13);

const fn palette(accent: Tone, rule: Tone) -> Palette {
    Palette {
        accent,
        rule,
        body: INK,
    }
}

/// Registered template variants, name to palette. The plain "Resume" entry
/// is the default when a request names no template.
pub const PALETTES: &[(&str, Palette)] = &[
    ("Resume", palette(tone(0.10, 0.10, 0.10), tone(0.60, 0.60, 0.60))),
    (
        "Resume-Academic-Purple",
        palette(tone(0.35, 0.18, 0.50), tone(0.62, 0.50, 0.73)),
    ),
    (
        "Resume-Tech-Teal",
        palette(tone(0.00, 0.45, 0.45), tone(0.35, 0.65, 0.65)),
    ),
    (
        "Resume-Modern-Green",
        palette(tone(0.13, 0.45, 0.25), tone(0.42, 0.65, 0.50)),
    ),
    (
        "Resume-Corporate-Slate",
        palette(tone(0.25, 0.30, 0.36), tone(0.52, 0.57, 0.62)),
    ),
    (
        "Resume-Creative-Burgundy",
        palette(tone(0.45, 0.11, 0.18), tone(0.66, 0.42, 0.47)),
    ),
    (
        "Resume-Executive-Navy",
        palette(tone(0.10, 0.17, 0.35), tone(0.42, 0.48, 0.63)),
    ),
    (
        "Resume-Classic-Charcoal",
        palette(tone(0.20, 0.20, 0.20), tone(0.55, 0.55, 0.55)),
    ),
    (
        "Resume-Bold-Emerald",
        palette(tone(0.02, 0.37, 0.25), tone(0.35, 0.62, 0.52)),
    ),
    (
        "Resume-Vision-Midnight",
        palette(tone(0.08, 0.10, 0.22), tone(0.40, 0.43, 0.56)),
    ),
    (
        "Resume-Vision-Coral",
        palette(tone(0.80, 0.30, 0.25), tone(0.88, 0.56, 0.52)),
    ),
    (
        "Resume-Vision-Sage",
        palette(tone(0.37, 0.45, 0.33), tone(0.60, 0.66, 0.57)),
    ),
    (
        "Resume-Consultant-Steel",
        palette(tone(0.27, 0.35, 0.45), tone(0.55, 0.62, 0.70)),
    ),
];

pub const DEFAULT_TEMPLATE: &str = "Resume";
