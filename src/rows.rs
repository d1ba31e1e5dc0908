//! The shared detail-row builder.
//!
//! The preview and the Word export render the same ordered (label, value)
//! list; building it in one place is what keeps the two in sync. The ordering
//! contract: course, submitted-to, designation (if present), one row per
//! student (only the first labeled), session, formatted date, diagnosis (if
//! present), then each complete custom field in stored order.
//!
//! Optional rows follow one uniform rule: presence implies a row. An empty
//! backing value omits the row entirely — it never renders blank.

use crate::record::CoverRecord;
use chrono::NaiveDate;

/// One (label, value) pair in the detail block. An empty label on a student
/// row marks it as a continuation of the "Submitted By" group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRow {
    pub label: String,
    pub value: String,
}

impl DetailRow {
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Build the ordered detail rows for a record. Consumed by both the HTML
/// renderer and the document exporter; any ordering change here changes both.
pub fn detail_rows(record: &CoverRecord) -> Vec<DetailRow> {
    let mut rows = Vec::new();

    rows.push(DetailRow::new(
        "Course Title",
        format!("{} ({})", record.course_title, record.course_code),
    ));
    rows.push(DetailRow::new("Submitted To", &record.professor_name));

    if !record.professor_designation.is_empty() {
        rows.push(DetailRow::new("Designation", &record.professor_designation));
    }

    for (i, student) in record.students.iter().enumerate() {
        let label = if i == 0 { "Submitted By" } else { "" };
        rows.push(DetailRow::new(
            label,
            format!("{} ({})", student.name, student.student_id),
        ));
    }

    rows.push(DetailRow::new("Session", &record.session));
    rows.push(DetailRow::new(
        "Submission Date",
        format_submission_date(&record.submission_date),
    ));

    if !record.diagnosis.is_empty() {
        rows.push(DetailRow::new("Diagnosis / Group", &record.diagnosis));
    }

    for field in &record.custom_fields {
        if !field.label.is_empty() && !field.value.is_empty() {
            rows.push(DetailRow::new(&field.label, &field.value));
        }
    }

    rows
}

/// Format an ISO-8601 date for display: `25 December 2024`.
///
/// Presentation only — the stored ISO value is never mutated. A value that
/// does not parse as a calendar date passes through verbatim.
pub fn format_submission_date(iso: &str) -> String {
    match NaiveDate::parse_from_str(iso, "%Y-%m-%d") {
        Ok(date) => date.format("%-d %B %Y").to_string(),
        Err(_) => iso.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{CustomField, Student};

    fn record_with_students(students: &[(&str, &str)]) -> CoverRecord {
        let mut record = CoverRecord::default();
        record.students = students
            .iter()
            .enumerate()
            .map(|(i, (name, sid))| Student {
                id: format!("s{i}"),
                name: name.to_string(),
                student_id: sid.to_string(),
            })
            .collect();
        record
    }

    #[test]
    fn rows_start_with_course_and_professor() {
        let rows = detail_rows(&CoverRecord::default());
        assert_eq!(rows[0].label, "Course Title");
        assert_eq!(rows[0].value, "Advanced Web Development (CS-402)");
        assert_eq!(rows[1].label, "Submitted To");
        assert_eq!(rows[1].value, "Dr. Sarah Mitchell");
    }

    #[test]
    fn designation_row_present_when_set() {
        let rows = detail_rows(&CoverRecord::default());
        assert_eq!(rows[2].label, "Designation");
        assert_eq!(rows[2].value, "Assistant Professor");
    }

    #[test]
    fn designation_row_omitted_when_empty() {
        let mut record = CoverRecord::default();
        record.professor_designation = String::new();
        let rows = detail_rows(&record);
        assert!(rows.iter().all(|r| r.label != "Designation"));
    }

    #[test]
    fn only_first_student_row_is_labeled() {
        let mut record = record_with_students(&[("Ann", "S1"), ("Bob", "S2")]);
        record.professor_designation = String::new();
        let rows = detail_rows(&record);
        // course, submitted-to, then the two student rows
        assert_eq!(rows[2].label, "Submitted By");
        assert_eq!(rows[2].value, "Ann (S1)");
        assert_eq!(rows[3].label, "");
        assert_eq!(rows[3].value, "Bob (S2)");
        assert_eq!(
            rows.iter().filter(|r| r.label == "Submitted By").count(),
            1
        );
    }

    #[test]
    fn diagnosis_row_only_when_non_empty() {
        let mut record = CoverRecord::default();
        record.diagnosis = String::new();
        assert!(
            detail_rows(&record)
                .iter()
                .all(|r| r.label != "Diagnosis / Group")
        );

        record.diagnosis = "Group 4".to_string();
        let rows = detail_rows(&record);
        let diag: Vec<_> = rows
            .iter()
            .filter(|r| r.label == "Diagnosis / Group")
            .collect();
        assert_eq!(diag.len(), 1);
        assert_eq!(diag[0].value, "Group 4");
    }

    #[test]
    fn incomplete_custom_fields_are_filtered() {
        let mut record = CoverRecord::default();
        record.custom_fields = vec![
            CustomField {
                id: "a".into(),
                label: "Semester".into(),
                value: "7th".into(),
            },
            CustomField {
                id: "b".into(),
                label: String::new(),
                value: "orphan".into(),
            },
            CustomField {
                id: "c".into(),
                label: "orphan".into(),
                value: String::new(),
            },
        ];
        let rows = detail_rows(&record);
        assert_eq!(rows.last().unwrap().label, "Semester");
        assert!(rows.iter().all(|r| r.value != "orphan" && r.label != "orphan"));
    }

    #[test]
    fn custom_fields_keep_stored_order() {
        let mut record = CoverRecord::default();
        record.custom_fields = vec![
            CustomField {
                id: "a".into(),
                label: "First".into(),
                value: "1".into(),
            },
            CustomField {
                id: "b".into(),
                label: "Second".into(),
                value: "2".into(),
            },
        ];
        let rows = detail_rows(&record);
        let n = rows.len();
        assert_eq!(rows[n - 2].label, "First");
        assert_eq!(rows[n - 1].label, "Second");
    }

    #[test]
    fn session_then_date_after_students() {
        let mut record = record_with_students(&[("Ann", "S1")]);
        record.professor_designation = String::new();
        record.submission_date = "2024-12-25".to_string();
        let rows = detail_rows(&record);
        assert_eq!(rows[3].label, "Session");
        assert_eq!(rows[4].label, "Submission Date");
        assert_eq!(rows[4].value, "25 December 2024");
    }

    #[test]
    fn blank_fields_render_empty_not_panic() {
        let mut record = CoverRecord::default();
        record.course_title = String::new();
        record.course_code = String::new();
        record.professor_name = String::new();
        record.session = String::new();
        let rows = detail_rows(&record);
        assert_eq!(rows[0].value, " ()");
        assert_eq!(rows[1].value, "");
    }

    // =========================================================================
    // Date formatting
    // =========================================================================

    #[test]
    fn formats_day_month_year() {
        assert_eq!(format_submission_date("2024-12-25"), "25 December 2024");
    }

    #[test]
    fn day_is_not_zero_padded() {
        assert_eq!(format_submission_date("2025-03-05"), "5 March 2025");
    }

    #[test]
    fn unparseable_date_passes_through() {
        assert_eq!(format_submission_date("next tuesday"), "next tuesday");
        assert_eq!(format_submission_date(""), "");
    }
}
