//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for the record is its semantic identity — report title plus template and
//! page setup — with supporting data shown as indented context lines. The
//! detail rows are printed exactly as they will appear on the rendered page,
//! so `check` doubles as a content preview.
//!
//! # Output Format
//!
//! ```text
//! Record
//! 001 Quantum Computing Analysis (FORMAL, A4)
//!     University: Global Academic University
//!     Department: Department of Computer Science & Engineering
//!     Logo: embedded
//! Students
//! 001 John Doe (CSE-2023-085)
//! Details
//!     Course Title: Advanced Algorithms (CS-402)
//!     Submitted To: Dr. Jane Smith
//! ```
//!
//! # Architecture
//!
//! Each concern has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure — no I/O, no side effects.

use std::path::Path;

use crate::record::CoverRecord;
use crate::rows;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format a record summary for the `check` command.
pub fn format_check_output(record: &CoverRecord) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Record".to_string());
    let title = if record.report_title.is_empty() {
        "(untitled)".to_string()
    } else {
        record.report_title.clone()
    };
    lines.push(format!(
        "{} {} ({}, {})",
        format_index(1),
        title,
        record.template.as_str(),
        record.page_size.as_str(),
    ));
    lines.push(format!(
        "{}University: {}",
        indent(1),
        record.university_name
    ));
    if !record.department.is_empty() {
        lines.push(format!("{}Department: {}", indent(1), record.department));
    }
    lines.push(format!(
        "{}Logo: {}",
        indent(1),
        match (&record.university_logo, record.show_logo) {
            (Some(_), true) => "embedded",
            (Some(_), false) => "embedded (hidden)",
            (None, _) => "none",
        }
    ));

    lines.push("Students".to_string());
    for (i, student) in record.students.iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            student.name,
            student.student_id
        ));
    }

    lines.push("Details".to_string());
    for row in rows::detail_rows(record) {
        if row.label.is_empty() {
            lines.push(format!("{}{}", indent(1), row.value));
        } else {
            lines.push(format!("{}{}: {}", indent(1), row.label, row.value));
        }
    }

    let warnings = check_warnings(record);
    if !warnings.is_empty() {
        lines.push("Warnings".to_string());
        for warning in warnings {
            lines.push(format!("{}{}", indent(1), warning));
        }
    }

    lines
}

/// Non-fatal issues worth surfacing before an export.
fn check_warnings(record: &CoverRecord) -> Vec<String> {
    let mut warnings = Vec::new();
    if record.report_title.is_empty() {
        warnings.push("report title is empty; exports will be named 'untitled'".to_string());
    }
    if record
        .students
        .iter()
        .any(|s| s.name.is_empty() && s.student_id.is_empty())
    {
        warnings.push("a student entry has no name or ID".to_string());
    }
    if rows::format_submission_date(&record.submission_date) == record.submission_date
        && !record.submission_date.is_empty()
    {
        warnings.push(format!(
            "submission date '{}' is not ISO (YYYY-MM-DD); it will appear verbatim",
            record.submission_date
        ));
    }
    warnings
}

/// Print check output to stdout.
pub fn print_check_output(record: &CoverRecord) {
    for line in format_check_output(record) {
        println!("{}", line);
    }
}

/// Format a one-line export result: what was written, where, and how big.
pub fn format_export_output(kind: &str, path: &Path, byte_len: usize) -> Vec<String> {
    vec![format!(
        "{} → {} ({})",
        kind,
        path.display(),
        human_size(byte_len)
    )]
}

/// Print an export result line to stdout.
pub fn print_export_output(kind: &str, path: &Path, byte_len: usize) {
    for line in format_export_output(kind, path, byte_len) {
        println!("{}", line);
    }
}

/// Human-readable byte size: `842 B`, `12.3 KB`, `1.2 MB`.
fn human_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = 1024.0 * 1024.0;
    let b = bytes as f64;
    if b >= MB {
        format!("{:.1} MB", b / MB)
    } else if b >= KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{} B", bytes)
    }
}
