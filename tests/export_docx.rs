//! End-to-end docx export: write a package to disk, read it back as a zip,
//! and verify the document content a word processor would see.

use std::io::{Cursor, Read};

use coverpage::export::docx;
use coverpage::naming;
use coverpage::record::{Alignment, CoverRecord, PageSize, Student};
use zip::ZipArchive;

fn read_part(bytes: &[u8], name: &str) -> String {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut entry = archive.by_name(name).unwrap();
    let mut out = String::new();
    entry.read_to_string(&mut out).unwrap();
    out
}

#[test]
fn written_file_is_a_readable_package() {
    let dir = tempfile::tempdir().unwrap();
    let record = CoverRecord::default();
    let path = dir
        .path()
        .join(naming::export_file_name(&record.report_title, "docx"));
    docx::write_docx(&path, &record).unwrap();

    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "cover-page-building-scalab.docx"
    );

    let bytes = std::fs::read(&path).unwrap();
    // Zip local file header magic.
    assert_eq!(&bytes[..2], b"PK");
    let mut archive = ZipArchive::new(Cursor::new(&bytes[..])).unwrap();
    assert!(archive.by_name("word/document.xml").is_ok());
    assert!(archive.by_name("[Content_Types].xml").is_ok());
}

#[test]
fn document_reflects_a_fully_customized_record() {
    let mut record = CoverRecord::default();
    record.university_name = "Test University".to_string();
    record.department = String::new();
    record.assignment_type = "thesis".to_string();
    record.report_title = "Edge & Case <Study>".to_string();
    record.accent_color = "#ff0000".to_string();
    record.page_size = PageSize::Letter;
    record.alignment = Alignment::Left;
    record.students = vec![
        Student {
            id: "1".into(),
            name: "Ada Lovelace".into(),
            student_id: "CS-001".into(),
        },
        Student {
            id: "2".into(),
            name: "Alan Turing".into(),
            student_id: "CS-002".into(),
        },
    ];
    record.submission_date = "2024-12-25".to_string();

    let bytes = docx::render_docx(&record).unwrap();
    let doc = read_part(&bytes, "word/document.xml");

    assert!(doc.contains("Test University"));
    // Empty department paragraph is omitted entirely.
    assert!(!doc.contains("<w:sz w:val=\"24\"/>"));
    assert!(doc.contains("THESIS"));
    assert!(doc.contains("Edge &amp; Case &lt;Study&gt;"));
    assert!(doc.contains("<w:color w:val=\"ff0000\"/>"));
    assert!(doc.contains("<w:pgSz w:w=\"12240\" w:h=\"15840\"/>"));
    // Left alignment: no jc elements anywhere.
    assert!(!doc.contains("<w:jc"));
    // Both students appear, the label only once.
    assert!(doc.contains("Ada Lovelace (CS-001)"));
    assert!(doc.contains("Alan Turing (CS-002)"));
    assert_eq!(doc.matches("Submitted By").count(), 1);
    // ISO date is formatted for display.
    assert!(doc.contains("25 December 2024"));
}

#[test]
fn custom_fields_reach_the_details_table() {
    let mut record = CoverRecord::default();
    let id = record.add_custom_field();
    {
        let field = record.custom_field_mut(&id).unwrap();
        field.label = "Lab Group".to_string();
        field.value = "B-7".to_string();
    }
    // Incomplete entries are stored but never rendered.
    let incomplete = record.add_custom_field();
    record.custom_field_mut(&incomplete).unwrap().label = "Orphan".to_string();

    let bytes = docx::render_docx(&record).unwrap();
    let doc = read_part(&bytes, "word/document.xml");
    assert!(doc.contains("Lab Group"));
    assert!(doc.contains("B-7"));
    assert!(!doc.contains("Orphan"));
}

#[test]
fn logo_roundtrips_through_the_package() {
    // A 1x1 transparent PNG.
    let png_b64 = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";
    let mut record = CoverRecord::default();
    record.university_logo = Some(format!("data:image/png;base64,{png_b64}"));

    let bytes = docx::render_docx(&record).unwrap();
    let mut archive = ZipArchive::new(Cursor::new(&bytes[..])).unwrap();
    let mut media = archive.by_name("word/media/image1.png").unwrap();
    let mut logo_bytes = Vec::new();
    media.read_to_end(&mut logo_bytes).unwrap();
    // PNG signature survives the trip.
    assert_eq!(&logo_bytes[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);

    let content_types = read_part(&bytes, "[Content_Types].xml");
    assert!(content_types.contains("Extension=\"png\""));
}
