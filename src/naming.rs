//! Export filename convention.
//!
//! Every exported artifact is named `cover-page-<title-slug>.<ext>`, where
//! the slug is derived from the report title and capped at 15 characters so
//! long titles produce manageable filenames. A record with no usable title
//! falls back to `untitled`.
//!
//! The title is slugified before truncation (lowercased, transliterated,
//! punctuation and spaces collapsed to dashes), so names differ from a raw
//! 15-character slice of the title. A raw slice can carry spaces, `/`, and
//! other characters that are awkward or illegal in filenames; the slug form
//! keeps the truncation behavior while staying filesystem-safe everywhere.

use slug::slugify;

const PREFIX: &str = "cover-page-";
const TITLE_BUDGET: usize = 15;

/// Build the export filename for a report title and extension.
///
/// - `"Quantum Computing Analysis"`, `"docx"` → `cover-page-quantum-computi.docx`
/// - `"Lab 3"`, `"png"` → `cover-page-lab-3.png`
/// - `""`, `"jpg"` → `cover-page-untitled.jpg`
pub fn export_file_name(title: &str, extension: &str) -> String {
    let slug = slugify(title);
    let mut part: String = slug.chars().take(TITLE_BUDGET).collect();
    while part.ends_with('-') {
        part.pop();
    }
    if part.is_empty() {
        part.push_str("untitled");
    }
    format!("{PREFIX}{part}.{extension}")
}
