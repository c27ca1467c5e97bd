//! Single-column A4 resume layout on printpdf builtin fonts.
//!
//! All template variants share this layout; only the palette differs.
//! Text width is estimated from an average glyph width for Helvetica,
//! which is accurate enough for wrapping body copy.

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Rgb,
};

use crate::errors::AppError;
use crate::models::content::ResumeDocument;
use crate::render::palette::{Palette, Tone};
use crate::render::ResumeTemplate;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 18.0;
const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
const BOTTOM_LIMIT: f32 = 16.0;

const PT_TO_MM: f32 = 0.3528;
// Average Helvetica glyph width as a fraction of the font size.
const GLYPH_WIDTH_RATIO: f32 = 0.5;

fn color(tone: Tone) -> Color {
    Color::Rgb(Rgb::new(tone.r, tone.g, tone.b, None))
}

fn chars_per_line(font_size: f32, width_mm: f32) -> usize {
    let glyph_mm = font_size * GLYPH_WIDTH_RATIO * PT_TO_MM;
    ((width_mm / glyph_mm) as usize).max(8)
}

/// Greedy word wrap against an estimated line capacity. Words longer than
/// a full line are emitted on their own line rather than split.
fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.len() + 1 + word.len() <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Formats a date range, dropping the dash when both sides are blank.
fn date_range(start: &str, end: &str) -> String {
    match (start.is_empty(), end.is_empty()) {
        (true, true) => String::new(),
        (false, true) => format!("{start} - Present"),
        (true, false) => end.to_string(),
        (false, false) => format!("{start} - {end}"),
    }
}

/// Writing cursor that opens a fresh page when a block would run past the
/// bottom margin.
struct Cursor<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
}

impl<'a> Cursor<'a> {
    fn ensure(&mut self, needed: f32) {
        if self.y - needed < BOTTOM_LIMIT {
            let (page, layer) = self
                .doc
                .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT - MARGIN;
        }
    }

    fn text(&mut self, text: &str, size: f32, font: &IndirectFontRef, tone: Tone, indent: f32) {
        let line_height = size * PT_TO_MM * 1.35;
        self.ensure(line_height);
        self.layer.set_fill_color(color(tone));
        self.layer
            .use_text(text, size, Mm(MARGIN + indent), Mm(self.y), font);
        self.y -= line_height;
    }

    fn paragraph(
        &mut self,
        text: &str,
        size: f32,
        font: &IndirectFontRef,
        tone: Tone,
        indent: f32,
    ) {
        let capacity = chars_per_line(size, CONTENT_WIDTH - indent);
        for line in wrap(text, capacity) {
            self.text(&line, size, font, tone, indent);
        }
    }

    fn rule(&mut self, tone: Tone) {
        self.ensure(3.0);
        self.layer.set_outline_color(color(tone));
        self.layer.set_outline_thickness(0.6);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(MARGIN), Mm(self.y)), false),
                (Point::new(Mm(PAGE_WIDTH - MARGIN), Mm(self.y)), false),
            ],
            is_closed: false,
        });
        self.y -= 3.0;
    }

    fn gap(&mut self, mm: f32) {
        self.y -= mm;
    }
}

/// One registered template: the shared layout plus a named palette.
pub struct SingleColumnTemplate {
    name: &'static str,
    palette: Palette,
}

impl SingleColumnTemplate {
    pub fn new(name: &'static str, palette: Palette) -> Self {
        Self { name, palette }
    }

    fn section_heading(
        &self,
        cursor: &mut Cursor<'_>,
        title: &str,
        bold: &IndirectFontRef,
    ) {
        cursor.gap(2.5);
        cursor.text(title, 11.5, bold, self.palette.accent, 0.0);
        cursor.rule(self.palette.rule);
    }
}

impl ResumeTemplate for SingleColumnTemplate {
    fn name(&self) -> &'static str {
        self.name
    }

    fn render(&self, resume: &ResumeDocument) -> Result<Vec<u8>, AppError> {
        let (doc, page, layer) =
            PdfDocument::new(&resume.name, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| AppError::Render(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| AppError::Render(e.to_string()))?;

        let mut cursor = Cursor {
            doc: &doc,
            layer: doc.get_page(page).get_layer(layer),
            y: PAGE_HEIGHT - MARGIN,
        };
        let palette = &self.palette;

        // Header
        cursor.text(&resume.name, 20.0, &bold, palette.accent, 0.0);
        if !resume.title.is_empty() {
            cursor.text(&resume.title, 12.0, &regular, palette.body, 0.0);
        }
        let contact: Vec<&str> = [resume.email.as_str(), resume.location.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect();
        if !contact.is_empty() {
            cursor.text(&contact.join("  |  "), 9.0, &regular, palette.body, 0.0);
        }
        cursor.rule(palette.rule);

        // Summary
        if !resume.summary.is_empty() {
            self.section_heading(&mut cursor, "SUMMARY", &bold);
            cursor.paragraph(&resume.summary, 9.5, &regular, palette.body, 0.0);
        }

        // Skills
        if !resume.skills.is_empty() {
            self.section_heading(&mut cursor, "SKILLS", &bold);
            for category in &resume.skills {
                let line = format!("{}: {}", category.name, category.items.join(", "));
                cursor.paragraph(&line, 9.5, &regular, palette.body, 0.0);
            }
        }

        // Experience
        if !resume.experience.is_empty() {
            self.section_heading(&mut cursor, "EXPERIENCE", &bold);
            for job in &resume.experience {
                cursor.gap(1.5);
                cursor.text(&job.title, 10.5, &bold, palette.body, 0.0);
                let mut meta = job.company.clone();
                if !job.location.is_empty() {
                    meta.push_str(" | ");
                    meta.push_str(&job.location);
                }
                let dates = date_range(&job.start_date, &job.end_date);
                if !dates.is_empty() {
                    meta.push_str(" | ");
                    meta.push_str(&dates);
                }
                cursor.text(&meta, 9.0, &regular, palette.body, 0.0);
                for detail in &job.details {
                    let capacity = chars_per_line(9.5, CONTENT_WIDTH - 6.0);
                    for (i, line) in wrap(detail, capacity).into_iter().enumerate() {
                        let prefix = if i == 0 { "- " } else { "  " };
                        cursor.text(
                            &format!("{prefix}{line}"),
                            9.5,
                            &regular,
                            palette.body,
                            3.0,
                        );
                    }
                }
            }
        }

        // Education
        if !resume.education.is_empty() {
            self.section_heading(&mut cursor, "EDUCATION", &bold);
            for entry in &resume.education {
                cursor.text(
                    &format!("{}, {}", entry.degree, entry.school),
                    10.0,
                    &regular,
                    palette.body,
                    0.0,
                );
                let years = date_range(
                    entry.start_year.as_deref().unwrap_or(""),
                    entry.end_year.as_deref().unwrap_or(""),
                );
                let mut meta = years;
                if let Some(grade) = &entry.grade {
                    if !meta.is_empty() {
                        meta.push_str(" | ");
                    }
                    meta.push_str("GPA: ");
                    meta.push_str(grade);
                }
                if !meta.is_empty() {
                    cursor.text(&meta, 9.0, &regular, palette.body, 0.0);
                }
            }
        }

        doc.save_to_bytes()
            .map_err(|e| AppError::Render(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::content::{DocumentExperience, SkillCategory};
    use crate::render::palette::PALETTES;

    fn sample_document() -> ResumeDocument {
        ResumeDocument {
            name: "Jane Doe".to_string(),
            title: "Senior Engineer".to_string(),
            email: "jane@example.com".to_string(),
            location: "Berlin".to_string(),
            summary: "Experienced systems engineer with a decade of work on \
                      distributed storage, observability and developer tooling."
                .to_string(),
            skills: vec![SkillCategory {
                name: "Languages".to_string(),
                items: vec!["Rust".to_string(), "Go".to_string()],
            }],
            experience: vec![DocumentExperience {
                title: "Platform Engineer".to_string(),
                company: "Acme".to_string(),
                location: "Remote".to_string(),
                start_date: "01/2020".to_string(),
                end_date: "Present".to_string(),
                details: vec!["Built the deployment platform used by forty teams".to_string()],
            }],
            education: vec![],
        }
    }

    #[test]
    fn renders_a_pdf_byte_stream() {
        let (name, palette) = PALETTES[0];
        let template = SingleColumnTemplate::new(name, palette);
        let bytes = template.render(&sample_document()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 500);
    }

    #[test]
    fn long_summary_spills_to_more_pages_without_error() {
        let (name, palette) = PALETTES[0];
        let template = SingleColumnTemplate::new(name, palette);
        let mut doc = sample_document();
        doc.summary = "distributed systems engineering ".repeat(400);
        assert!(template.render(&doc).is_ok());
    }

    #[test]
    fn wrap_respects_capacity_and_keeps_long_words_whole() {
        let lines = wrap("alpha beta gamma delta", 11);
        assert_eq!(lines, vec!["alpha beta", "gamma delta"]);
        let lines = wrap("supercalifragilistic ok", 10);
        assert_eq!(lines, vec!["supercalifragilistic", "ok"]);
    }

    #[test]
    fn date_range_handles_missing_sides() {
        assert_eq!(date_range("01/2020", "06/2022"), "01/2020 - 06/2022");
        assert_eq!(date_range("01/2020", ""), "01/2020 - Present");
        assert_eq!(date_range("", ""), "");
    }
}
