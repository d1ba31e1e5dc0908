//! The cover-page record: everything the user typed plus their styling choices.
//!
//! One `CoverRecord` powers one cover page. It is the value every other module
//! consumes read-only — the template resolver, the detail-row builder, the
//! HTML renderer, and both exporters — and it serializes to the same camelCase
//! JSON the save/load commands exchange.
//!
//! ## Forgiving deserialization
//!
//! Saved files carry no schema version and are accepted as-is: missing fields
//! take their defaults, unknown keys are ignored, and an unrecognized
//! template/font/page-size/alignment string falls back to its default variant
//! rather than failing the load. Only syntactically invalid JSON is an error
//! (see [`crate::persist`]).

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::time::{SystemTime, UNIX_EPOCH};

/// Named layout variant controlling header/title arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Template {
    #[default]
    Formal,
    Academic,
    Modern,
}

impl Template {
    pub fn as_str(self) -> &'static str {
        match self {
            Template::Formal => "FORMAL",
            Template::Academic => "ACADEMIC",
            Template::Modern => "MODERN",
        }
    }

    /// Unknown values fall back to FORMAL — policy, not an error.
    fn from_persisted(s: &str) -> Self {
        match s {
            "ACADEMIC" => Template::Academic,
            "MODERN" => Template::Modern,
            _ => Template::Formal,
        }
    }
}

impl Serialize for Template {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Template {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Template::from_persisted(&s))
    }
}

/// One of four named font stacks. Persisted as the full CSS stack string so
/// saved records match the original on-disk format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Font {
    #[default]
    Times,
    Georgia,
    Inter,
    Arial,
}

impl Font {
    /// The CSS font-family stack, also the persisted representation.
    pub fn css_stack(self) -> &'static str {
        match self {
            Font::Times => "Times New Roman, serif",
            Font::Georgia => "Georgia, serif",
            Font::Inter => "Inter, sans-serif",
            Font::Arial => "Arial, sans-serif",
        }
    }

    fn from_persisted(s: &str) -> Self {
        match s {
            "Georgia, serif" => Font::Georgia,
            "Inter, sans-serif" => Font::Inter,
            "Arial, sans-serif" => Font::Arial,
            _ => Font::Times,
        }
    }
}

impl Serialize for Font {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.css_stack())
    }
}

impl<'de> Deserialize<'de> for Font {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Font::from_persisted(&s))
    }
}

/// Physical page size of the rendered cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSize {
    #[default]
    A4,
    Letter,
}

impl PageSize {
    pub fn as_str(self) -> &'static str {
        match self {
            PageSize::A4 => "A4",
            PageSize::Letter => "LETTER",
        }
    }

    /// Physical dimensions in millimeters as (width, height).
    pub fn dimensions_mm(self) -> (f64, f64) {
        match self {
            PageSize::A4 => (210.0, 297.0),
            PageSize::Letter => (215.9, 279.4),
        }
    }

    /// OOXML page dimensions in twentieths of a point as (width, height).
    ///
    /// Fixed constants from the WordprocessingML conventions, not computed
    /// from the millimeter dimensions.
    pub fn dimensions_twips(self) -> (u32, u32) {
        match self {
            PageSize::A4 => (11906, 16838),
            PageSize::Letter => (12240, 15840),
        }
    }

    fn from_persisted(s: &str) -> Self {
        match s {
            "LETTER" => PageSize::Letter,
            _ => PageSize::A4,
        }
    }
}

impl Serialize for PageSize {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PageSize {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(PageSize::from_persisted(&s))
    }
}

/// Horizontal alignment choice for header and title content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Center,
    Left,
}

impl Alignment {
    pub fn as_str(self) -> &'static str {
        match self {
            Alignment::Center => "center",
            Alignment::Left => "left",
        }
    }

    fn from_persisted(s: &str) -> Self {
        match s {
            "left" => Alignment::Left,
            _ => Alignment::Center,
        }
    }
}

impl Serialize for Alignment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Alignment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Alignment::from_persisted(&s))
    }
}

/// One group member on the "Submitted By" rows.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Student {
    /// Stable identity for in-place edits, unique within the collection.
    pub id: String,
    pub name: String,
    pub student_id: String,
}

/// A user-defined (label, value) detail row. Stored even when incomplete;
/// entries with an empty label or value are filtered out at render time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomField {
    pub id: String,
    pub label: String,
    pub value: String,
}

const STOCK_TITLE_FONT_SIZE: u32 = 36;
const STOCK_DETAILS_FONT_SIZE: u32 = 16;

/// A stored font size that may have been written as a number or a numeric
/// string by a hand-edited or foreign file.
#[derive(Deserialize)]
#[serde(untagged)]
enum LenientSize {
    Number(u32),
    Text(String),
    Other(serde::de::IgnoredAny),
}

/// Accept a number or a numeric string; anything else takes `fallback`.
/// Keeps a wrong-typed size field from failing the whole load.
fn lenient_size<'de, D>(deserializer: D, fallback: u32) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match LenientSize::deserialize(deserializer)? {
        LenientSize::Number(n) => n,
        LenientSize::Text(s) => s.trim().parse().unwrap_or(fallback),
        LenientSize::Other(_) => fallback,
    })
}

fn lenient_title_size<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_size(deserializer, STOCK_TITLE_FONT_SIZE)
}

fn lenient_details_size<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_size(deserializer, STOCK_DETAILS_FONT_SIZE)
}

/// The complete user-editable data powering one cover page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoverRecord {
    pub university_name: String,
    /// Embedded logo as a data URI, or absent.
    pub university_logo: Option<String>,
    pub department: String,
    pub course_title: String,
    pub course_code: String,
    pub report_title: String,
    pub assignment_type: String,
    pub professor_name: String,
    pub professor_designation: String,
    /// Insertion order determines "Submitted By" row order. Never empty.
    pub students: Vec<Student>,
    pub session: String,
    /// ISO-8601 calendar date (`YYYY-MM-DD`). Formatting for display never
    /// mutates this stored value.
    pub submission_date: String,
    pub diagnosis: String,
    pub custom_fields: Vec<CustomField>,

    pub template: Template,
    pub font: Font,
    #[serde(deserialize_with = "lenient_title_size")]
    pub title_font_size: u32,
    #[serde(deserialize_with = "lenient_details_size")]
    pub details_font_size: u32,
    /// Hex color string, e.g. `#1e40af`.
    pub accent_color: String,
    pub page_size: PageSize,
    pub show_logo: bool,
    pub show_footer: bool,
    pub alignment: Alignment,
}

impl Default for CoverRecord {
    /// The stock seed record a fresh session starts from.
    fn default() -> Self {
        Self {
            university_name: "Global Academic University".to_string(),
            university_logo: None,
            department: "Department of Computer Science & Engineering".to_string(),
            course_title: "Advanced Web Development".to_string(),
            course_code: "CS-402".to_string(),
            report_title:
                "Building Scalable Modern Web Architectures with React and Distributed Systems"
                    .to_string(),
            assignment_type: "Assignment".to_string(),
            professor_name: "Dr. Sarah Mitchell".to_string(),
            professor_designation: "Assistant Professor".to_string(),
            students: vec![Student {
                id: "initial-1".to_string(),
                name: "John Doe".to_string(),
                student_id: "CSE-2023-085".to_string(),
            }],
            session: "Fall 2024 - 2025".to_string(),
            submission_date: chrono::Local::now().format("%Y-%m-%d").to_string(),
            diagnosis: String::new(),
            custom_fields: Vec::new(),

            template: Template::Formal,
            font: Font::Times,
            title_font_size: STOCK_TITLE_FONT_SIZE,
            details_font_size: STOCK_DETAILS_FONT_SIZE,
            accent_color: "#1e40af".to_string(),
            page_size: PageSize::A4,
            show_logo: true,
            show_footer: true,
            alignment: Alignment::Center,
        }
    }
}

impl CoverRecord {
    /// Append a blank student entry and return its generated id.
    pub fn add_student(&mut self) -> String {
        let id = self.fresh_id();
        self.students.push(Student {
            id: id.clone(),
            ..Student::default()
        });
        id
    }

    /// Remove a student by id. Rejected (returns `false`) when it would leave
    /// the collection empty — a cover page always has at least one student.
    pub fn remove_student(&mut self, id: &str) -> bool {
        if self.students.len() <= 1 {
            return false;
        }
        let before = self.students.len();
        self.students.retain(|s| s.id != id);
        self.students.len() != before
    }

    pub fn student_mut(&mut self, id: &str) -> Option<&mut Student> {
        self.students.iter_mut().find(|s| s.id == id)
    }

    /// Append a blank custom field and return its generated id.
    pub fn add_custom_field(&mut self) -> String {
        let id = self.fresh_id();
        self.custom_fields.push(CustomField {
            id: id.clone(),
            ..CustomField::default()
        });
        id
    }

    pub fn remove_custom_field(&mut self, id: &str) -> bool {
        let before = self.custom_fields.len();
        self.custom_fields.retain(|f| f.id != id);
        self.custom_fields.len() != before
    }

    pub fn custom_field_mut(&mut self, id: &str) -> Option<&mut CustomField> {
        self.custom_fields.iter_mut().find(|f| f.id == id)
    }

    /// Replace everything with the stock seed record.
    pub fn reset(&mut self) {
        *self = CoverRecord::default();
    }

    /// Generate an id unique across both collections.
    fn fresh_id(&self) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        let mut candidate = format!("{nanos:x}");
        let mut bump = 0u32;
        while self.students.iter().any(|s| s.id == candidate)
            || self.custom_fields.iter().any(|f| f.id == candidate)
        {
            bump += 1;
            candidate = format!("{nanos:x}-{bump}");
        }
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_record_seed_values() {
        let record = CoverRecord::default();
        assert_eq!(record.university_name, "Global Academic University");
        assert_eq!(record.course_code, "CS-402");
        assert_eq!(record.students.len(), 1);
        assert_eq!(record.students[0].student_id, "CSE-2023-085");
        assert_eq!(record.template, Template::Formal);
        assert_eq!(record.accent_color, "#1e40af");
        assert_eq!(record.title_font_size, 36);
        assert_eq!(record.details_font_size, 16);
        assert!(record.show_logo);
        assert!(record.custom_fields.is_empty());
    }

    #[test]
    fn default_submission_date_is_iso() {
        let record = CoverRecord::default();
        let parts: Vec<&str> = record.submission_date.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].len(), 4);
        assert_eq!(parts[1].len(), 2);
        assert_eq!(parts[2].len(), 2);
    }

    #[test]
    fn remove_last_student_is_rejected() {
        let mut record = CoverRecord::default();
        let id = record.students[0].id.clone();
        assert!(!record.remove_student(&id));
        assert_eq!(record.students.len(), 1);
    }

    #[test]
    fn remove_student_keeps_order() {
        let mut record = CoverRecord::default();
        let second = record.add_student();
        let third = record.add_student();
        assert!(record.remove_student(&second));
        assert_eq!(record.students.len(), 2);
        assert_eq!(record.students[0].id, "initial-1");
        assert_eq!(record.students[1].id, third);
    }

    #[test]
    fn remove_unknown_student_is_noop() {
        let mut record = CoverRecord::default();
        record.add_student();
        assert!(!record.remove_student("nope"));
        assert_eq!(record.students.len(), 2);
    }

    #[test]
    fn generated_ids_are_unique() {
        let mut record = CoverRecord::default();
        let a = record.add_student();
        let b = record.add_student();
        let c = record.add_custom_field();
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(b, c);
    }

    #[test]
    fn student_mut_edits_in_place() {
        let mut record = CoverRecord::default();
        let id = record.add_student();
        let student = record.student_mut(&id).unwrap();
        student.name = "Ann".to_string();
        student.student_id = "S1".to_string();
        assert_eq!(record.students[1].name, "Ann");
    }

    #[test]
    fn remove_custom_field_can_empty_the_collection() {
        let mut record = CoverRecord::default();
        let id = record.add_custom_field();
        assert!(record.remove_custom_field(&id));
        assert!(record.custom_fields.is_empty());
    }

    #[test]
    fn reset_restores_seed() {
        let mut record = CoverRecord::default();
        record.university_name = "Elsewhere".to_string();
        record.add_student();
        record.reset();
        assert_eq!(record.university_name, "Global Academic University");
        assert_eq!(record.students.len(), 1);
    }

    // =========================================================================
    // Serde format tests
    // =========================================================================

    #[test]
    fn serializes_camel_case_keys() {
        let json = serde_json::to_string(&CoverRecord::default()).unwrap();
        assert!(json.contains("\"universityName\""));
        assert!(json.contains("\"professorDesignation\""));
        assert!(json.contains("\"studentId\""));
        assert!(json.contains("\"customFields\""));
        assert!(json.contains("\"showFooter\""));
    }

    #[test]
    fn template_persists_as_uppercase_name() {
        assert_eq!(
            serde_json::to_string(&Template::Academic).unwrap(),
            "\"ACADEMIC\""
        );
        let back: Template = serde_json::from_str("\"MODERN\"").unwrap();
        assert_eq!(back, Template::Modern);
    }

    #[test]
    fn unknown_template_falls_back_to_formal() {
        let t: Template = serde_json::from_str("\"BRUTALIST\"").unwrap();
        assert_eq!(t, Template::Formal);
    }

    #[test]
    fn font_sizes_accept_numeric_strings_and_fall_back() {
        let record: CoverRecord =
            serde_json::from_str(r#"{"titleFontSize": " 48 ", "detailsFontSize": [12]}"#).unwrap();
        assert_eq!(record.title_font_size, 48);
        assert_eq!(record.details_font_size, STOCK_DETAILS_FONT_SIZE);

        let record: CoverRecord =
            serde_json::from_str(r#"{"titleFontSize": "not a size"}"#).unwrap();
        assert_eq!(record.title_font_size, STOCK_TITLE_FONT_SIZE);
    }

    #[test]
    fn font_persists_as_css_stack() {
        assert_eq!(
            serde_json::to_string(&Font::Inter).unwrap(),
            "\"Inter, sans-serif\""
        );
        let back: Font = serde_json::from_str("\"Georgia, serif\"").unwrap();
        assert_eq!(back, Font::Georgia);
    }

    #[test]
    fn unknown_font_falls_back_to_times() {
        let f: Font = serde_json::from_str("\"Comic Sans MS\"").unwrap();
        assert_eq!(f, Font::Times);
    }

    #[test]
    fn page_size_fallback_and_twips() {
        let p: PageSize = serde_json::from_str("\"TABLOID\"").unwrap();
        assert_eq!(p, PageSize::A4);
        assert_eq!(PageSize::A4.dimensions_twips(), (11906, 16838));
        assert_eq!(PageSize::Letter.dimensions_twips(), (12240, 15840));
    }

    #[test]
    fn alignment_persists_lowercase() {
        assert_eq!(serde_json::to_string(&Alignment::Left).unwrap(), "\"left\"");
        let a: Alignment = serde_json::from_str("\"diagonal\"").unwrap();
        assert_eq!(a, Alignment::Center);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let record: CoverRecord =
            serde_json::from_str(r#"{"universityName":"MIT"}"#).unwrap();
        assert_eq!(record.university_name, "MIT");
        assert_eq!(record.course_code, "CS-402");
        assert_eq!(record.template, Template::Formal);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let record: CoverRecord =
            serde_json::from_str(r#"{"universityName":"MIT","watermark":true}"#).unwrap();
        assert_eq!(record.university_name, "MIT");
    }
}
