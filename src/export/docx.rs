//! OOXML (docx) export.
//!
//! Builds the word-processing package directly: a zip archive holding
//! `[Content_Types].xml`, the relationship parts, `word/document.xml` with
//! hand-assembled WordprocessingML, and the logo under `word/media/` when one
//! is embedded. Font sizes are carried in half-points (the stored pixel sizes
//! doubled), spacing in twentieths of a point, and image extents in EMUs.

use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

use crate::export::ExportError;
use crate::record::{Alignment, CoverRecord};
use crate::rows;

/// EMUs per CSS pixel at 96 dpi.
const EMU_PER_PX: i64 = 9525;
/// Logo extent in the document, matching the fixed 100px preview box.
const LOGO_SIDE_PX: i64 = 100;

/// A decoded logo ready to land in `word/media/`.
struct LogoAsset {
    rel_id: &'static str,
    file_name: String,
    mime: String,
    bytes: Vec<u8>,
}

/// Render the record to docx package bytes.
pub fn render_docx(record: &CoverRecord) -> Result<Vec<u8>, ExportError> {
    let logo = logo_asset(record);
    let mut cursor = Cursor::new(Vec::new());
    let mut zip = ZipWriter::new(&mut cursor);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644);

    zip.start_file("[Content_Types].xml", options)?;
    zip.write_all(content_types_xml(logo.as_ref()).as_bytes())?;

    zip.start_file("_rels/.rels", options)?;
    zip.write_all(ROOT_RELS_XML.as_bytes())?;

    zip.start_file("word/document.xml", options)?;
    zip.write_all(document_xml(record, logo.as_ref()).as_bytes())?;

    zip.start_file("word/_rels/document.xml.rels", options)?;
    zip.write_all(document_rels_xml(logo.as_ref()).as_bytes())?;

    zip.start_file("word/styles.xml", options)?;
    zip.write_all(STYLES_XML.as_bytes())?;

    if let Some(logo) = &logo {
        zip.start_file(format!("word/media/{}", logo.file_name), options)?;
        zip.write_all(&logo.bytes)?;
    }

    zip.finish()?;
    Ok(cursor.into_inner())
}

/// Render the record and write the package to `path`.
pub fn write_docx(path: &Path, record: &CoverRecord) -> Result<(), ExportError> {
    let bytes = render_docx(record)?;
    fs::write(path, bytes)?;
    Ok(())
}

/// Decode the embedded logo data URI. Any malformed URI or undecodable
/// payload drops the logo from the document rather than failing the export.
fn logo_asset(record: &CoverRecord) -> Option<LogoAsset> {
    if !record.show_logo {
        return None;
    }
    let uri = record.university_logo.as_deref()?;
    let rest = uri.strip_prefix("data:")?;
    let (mime, payload) = rest.split_once(";base64,")?;
    let bytes = BASE64.decode(payload).ok()?;
    if bytes.is_empty() {
        return None;
    }
    Some(LogoAsset {
        rel_id: "rIdLogo1",
        file_name: format!("image1.{}", ext_from_mime(mime)),
        mime: mime.to_string(),
        bytes,
    })
}

fn ext_from_mime(mime: &str) -> &'static str {
    match mime {
        "image/png" => "png",
        "image/jpeg" => "jpg",
        "image/gif" => "gif",
        "image/webp" => "webp",
        _ => "bin",
    }
}

const ROOT_RELS_XML: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>
<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">
  <Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument\" Target=\"word/document.xml\"/>
</Relationships>";

const STYLES_XML: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>
<w:styles xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">
  <w:style w:type=\"paragraph\" w:default=\"1\" w:styleId=\"Normal\">
    <w:name w:val=\"Normal\"/>
  </w:style>
</w:styles>";

fn content_types_xml(logo: Option<&LogoAsset>) -> String {
    let mut defaults = vec![
        "<Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>".to_string(),
        "<Default Extension=\"xml\" ContentType=\"application/xml\"/>".to_string(),
    ];
    if let Some(logo) = logo {
        defaults.push(format!(
            "<Default Extension=\"{}\" ContentType=\"{}\"/>",
            ext_from_mime(&logo.mime),
            logo.mime
        ));
    }
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\n{}\n<Override PartName=\"/word/document.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml\"/>\n<Override PartName=\"/word/styles.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml\"/>\n</Types>",
        defaults.join("\n")
    )
}

fn document_rels_xml(logo: Option<&LogoAsset>) -> String {
    let mut rels = vec![
        "<Relationship Id=\"rIdStyles1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles\" Target=\"styles.xml\"/>".to_string(),
    ];
    if let Some(logo) = logo {
        rels.push(format!(
            "<Relationship Id=\"{}\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/image\" Target=\"media/{}\"/>",
            logo.rel_id, logo.file_name
        ));
    }
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">\n{}\n</Relationships>",
        rels.join("\n")
    )
}

fn document_xml(record: &CoverRecord, logo: Option<&LogoAsset>) -> String {
    let mut body = String::new();

    if let Some(logo) = logo {
        body.push_str(&logo_paragraph_xml(record.alignment, logo));
    }

    let accent = record.accent_color.trim_start_matches('#');
    body.push_str(&paragraph_xml(
        &record.university_name,
        record.alignment,
        100,
        RunProps {
            bold: true,
            size_half_points: 36,
            color: Some(accent),
        },
    ));

    if !record.department.is_empty() {
        body.push_str(&paragraph_xml(
            &record.department,
            record.alignment,
            1200,
            RunProps {
                bold: false,
                size_half_points: 24,
                color: None,
            },
        ));
    }

    body.push_str(&paragraph_xml(
        &record.assignment_type.to_uppercase(),
        record.alignment,
        200,
        RunProps {
            bold: true,
            size_half_points: 28,
            color: Some("666666"),
        },
    ));

    body.push_str(&paragraph_xml(
        &record.report_title,
        record.alignment,
        1500,
        RunProps {
            bold: true,
            size_half_points: record.title_font_size * 2,
            color: None,
        },
    ));

    body.push_str(&details_table_xml(record));

    let (page_w, page_h) = record.page_size.dimensions_twips();
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>
<w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\" xmlns:r=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships\" xmlns:wp=\"http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing\" xmlns:a=\"http://schemas.openxmlformats.org/drawingml/2006/main\" xmlns:pic=\"http://schemas.openxmlformats.org/drawingml/2006/picture\">
  <w:body>{body}<w:sectPr><w:pgSz w:w=\"{page_w}\" w:h=\"{page_h}\"/></w:sectPr></w:body>
</w:document>"
    )
}

struct RunProps<'a> {
    bold: bool,
    size_half_points: u32,
    color: Option<&'a str>,
}

fn paragraph_xml(text: &str, alignment: Alignment, spacing_after: u32, props: RunProps) -> String {
    let mut out = String::from("<w:p><w:pPr>");
    if let Some(jc) = jc_val(alignment) {
        out.push_str(&format!("<w:jc w:val=\"{jc}\"/>"));
    }
    out.push_str(&format!("<w:spacing w:after=\"{spacing_after}\"/>"));
    out.push_str("</w:pPr>");
    out.push_str(&run_xml(text, &props));
    out.push_str("</w:p>");
    out
}

fn run_xml(text: &str, props: &RunProps) -> String {
    let mut out = String::from("<w:r><w:rPr>");
    if props.bold {
        out.push_str("<w:b/>");
    }
    out.push_str(&format!("<w:sz w:val=\"{}\"/>", props.size_half_points));
    if let Some(color) = props.color {
        out.push_str(&format!("<w:color w:val=\"{}\"/>", escape_xml(color)));
    }
    out.push_str("</w:rPr>");
    out.push_str(&format!(
        "<w:t xml:space=\"preserve\">{}</w:t>",
        escape_xml(text)
    ));
    out.push_str("</w:r>");
    out
}

fn jc_val(alignment: Alignment) -> Option<&'static str> {
    match alignment {
        Alignment::Center => Some("center"),
        Alignment::Left => None,
    }
}

fn logo_paragraph_xml(alignment: Alignment, logo: &LogoAsset) -> String {
    let side = LOGO_SIDE_PX * EMU_PER_PX;
    let jc = jc_val(alignment)
        .map(|v| format!("<w:jc w:val=\"{v}\"/>"))
        .unwrap_or_default();
    format!(
        "<w:p><w:pPr>{jc}<w:spacing w:after=\"400\"/></w:pPr><w:r><w:drawing><wp:inline><wp:extent cx=\"{side}\" cy=\"{side}\"/><wp:docPr id=\"1\" name=\"Logo\" descr=\"University logo\"/><a:graphic><a:graphicData uri=\"http://schemas.openxmlformats.org/drawingml/2006/picture\"><pic:pic><pic:nvPicPr><pic:cNvPr id=\"0\" name=\"Logo\"/><pic:cNvPicPr/></pic:nvPicPr><pic:blipFill><a:blip r:embed=\"{rid}\"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill><pic:spPr><a:xfrm><a:off x=\"0\" y=\"0\"/><a:ext cx=\"{side}\" cy=\"{side}\"/></a:xfrm><a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom></pic:spPr></pic:pic></a:graphicData></a:graphic></wp:inline></w:drawing></w:r></w:p>",
        rid = logo.rel_id,
    )
}

/// Borderless two-column details table, 40/60 split, each row underlined by a
/// hairline bottom border.
fn details_table_xml(record: &CoverRecord) -> String {
    let size = record.details_font_size * 2;
    let mut out = String::from(
        "<w:tbl><w:tblPr><w:tblW w:w=\"5000\" w:type=\"pct\"/><w:tblBorders><w:top w:val=\"none\"/><w:left w:val=\"none\"/><w:bottom w:val=\"none\"/><w:right w:val=\"none\"/><w:insideH w:val=\"none\"/><w:insideV w:val=\"none\"/></w:tblBorders></w:tblPr>",
    );
    for row in rows::detail_rows(record) {
        out.push_str("<w:tr>");
        out.push_str(&table_cell_xml(&row.label, 2000, true, size));
        out.push_str(&table_cell_xml(&row.value, 3000, false, size));
        out.push_str("</w:tr>");
    }
    out.push_str("</w:tbl>");
    out
}

fn table_cell_xml(text: &str, width_pct: u32, bold: bool, size_half_points: u32) -> String {
    let mut out = format!(
        "<w:tc><w:tcPr><w:tcW w:w=\"{width_pct}\" w:type=\"pct\"/><w:vAlign w:val=\"center\"/><w:tcBorders><w:bottom w:val=\"single\" w:sz=\"1\" w:color=\"EEEEEE\"/></w:tcBorders></w:tcPr><w:p>"
    );
    out.push_str(&run_xml(
        text,
        &RunProps {
            bold,
            size_half_points,
            color: None,
        },
    ));
    out.push_str("</w:p></w:tc>");
    out
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
