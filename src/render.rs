//! HTML preview rendering.
//!
//! Turns a (record, layout) pair into a standalone HTML document: the page
//! element at its physical millimeter dimensions, optionally wrapped in a
//! zoom transform for on-screen scale-to-fit. The same document, rendered at
//! 1:1, is what the rasterizing render surface captures for image export.
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating —
//! templates are type-safe Rust code with automatic XSS escaping, so a record
//! full of `<script>` stays inert text.

use crate::record::{Alignment, CoverRecord};
use crate::rows::{self, DetailRow};
use crate::template::{Layout, LogoPlacement};
use maud::{DOCTYPE, Markup, PreEscaped, html};

const PAGE_PADDING_MM: f64 = 25.0;

/// Render the full preview document for a record at the given zoom factor.
///
/// The layout is resolved internally from the record's template, alignment,
/// and accent color. Pass `1.0` for export rasterization.
pub fn render_preview(record: &CoverRecord, zoom: f64) -> String {
    let layout = crate::template::resolve(record.template, record.alignment, &record.accent_color);
    let css = page_css(record, &layout);
    let content = html! {
        div.zoom-stage {
            (cover_page(record, &layout))
        }
    };
    base_document(&page_title(record), &css, zoom, content).into_string()
}

/// Render the document for rasterization: 1:1 scale, no stage chrome, and a
/// white page flush against the origin so a viewport clip of the page's pixel
/// dimensions captures exactly the page.
pub fn render_export(record: &CoverRecord) -> String {
    let layout = crate::template::resolve(record.template, record.alignment, &record.accent_color);
    let mut css = page_css(record, &layout);
    css.push_str("\nbody { margin: 0; padding: 0; background: #ffffff; }");
    let content = html! {
        (cover_page(record, &layout))
    };
    base_document(&page_title(record), &css, 1.0, content).into_string()
}

fn page_title(record: &CoverRecord) -> String {
    if record.report_title.is_empty() {
        "Cover Page".to_string()
    } else {
        format!("Cover Page - {}", record.report_title)
    }
}

/// Base HTML document: head with embedded stylesheet, zoom transform applied
/// on the stage wrapper so the page keeps its physical dimensions.
fn base_document(title: &str, css: &str, zoom: f64, content: Markup) -> Markup {
    let stage_css = format!(
        ".zoom-stage {{ transform: scale({zoom}); transform-origin: top center; }}"
    );
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css.to_string())) (PreEscaped(stage_css)) }
            }
            body {
                (content)
            }
        }
    }
}

/// The page element itself: header, divider, title block, detail grid,
/// optional footer, laid out per the resolved layout.
pub fn cover_page(record: &CoverRecord, layout: &Layout) -> Markup {
    let show_logo = record.show_logo && record.university_logo.is_some();
    html! {
        div #print-area .page {
            @if show_logo && layout.logo_placement == LogoPlacement::Overlay {
                (logo_img(record, layout, "logo logo-overlay"))
            }
            (header_block(record, layout, show_logo))
            @if layout.divider {
                div.divider {}
            }
            (title_block(record, layout))
            (detail_grid(&rows::detail_rows(record)))
            @if record.show_footer {
                div.page-footer { "Generated by CoverPage Pro" }
            }
        }
    }
}

fn logo_img(record: &CoverRecord, _layout: &Layout, class: &str) -> Markup {
    // show_logo was checked by the caller; the logo is present here.
    let src = record.university_logo.as_deref().unwrap_or_default();
    html! {
        img class=(class) src=(src) alt="Logo";
    }
}

fn header_block(record: &CoverRecord, layout: &Layout, show_logo: bool) -> Markup {
    let header_class = match layout.logo_placement {
        LogoPlacement::Inline => "page-header header-inline",
        _ => "page-header header-stack",
    };
    html! {
        header class=(header_class) {
            @if show_logo && layout.logo_placement != LogoPlacement::Overlay {
                (logo_img(record, layout, "logo"))
            }
            div.header-titles {
                h2.university { (record.university_name) }
                h3.department { (record.department) }
            }
        }
    }
}

fn title_block(record: &CoverRecord, layout: &Layout) -> Markup {
    let class = if layout.accent_bar {
        "title-block accent-bar"
    } else {
        "title-block"
    };
    html! {
        main class=(class) {
            p.assignment-type { (record.assignment_type) }
            h1.report-title { (record.report_title) }
        }
    }
}

fn detail_grid(rows: &[DetailRow]) -> Markup {
    html! {
        div.details {
            @for row in rows {
                div.detail-label { (row.label) }
                div.detail-colon { ":" }
                div.detail-value { (row.value) }
            }
        }
    }
}

fn text_align(alignment: Alignment) -> &'static str {
    match alignment {
        Alignment::Center => "center",
        Alignment::Left => "left",
    }
}

fn items_align(alignment: Alignment) -> &'static str {
    match alignment {
        Alignment::Center => "center",
        Alignment::Left => "flex-start",
    }
}

/// Generate the page stylesheet from the record's presentation fields and the
/// resolved layout. Everything style-dependent on user choices lives here;
/// the markup above is structure only.
pub fn page_css(record: &CoverRecord, layout: &Layout) -> String {
    let (width_mm, height_mm) = record.page_size.dimensions_mm();
    let logo_px = layout.logo_size.px();
    let header_align = items_align(record.alignment);
    let header_text = text_align(record.alignment);
    let title_text = text_align(layout.title_alignment);
    let header_divider = if layout.header_divider {
        "border-bottom: 2px solid #e2e8f0; padding-bottom: 1.5rem;"
    } else {
        ""
    };

    format!(
        r#"body {{
    margin: 0;
    background: #e2e8f0;
    padding: 1.5rem 0;
}}

.page {{
    width: {width_mm}mm;
    height: {height_mm}mm;
    padding: {PAGE_PADDING_MM}mm;
    box-sizing: border-box;
    margin: 0 auto;
    background: #ffffff;
    color: #1a1a1a;
    font-family: {font};
    position: relative;
    display: flex;
    flex-direction: column;
    overflow: hidden;
}}

.page-header {{
    position: relative;
    margin-bottom: 1.5rem;
    {header_divider}
}}

.header-stack {{
    display: flex;
    flex-direction: column;
    align-items: {header_align};
    gap: 1.5rem;
}}

.header-inline {{
    display: flex;
    flex-direction: row;
    align-items: flex-start;
    gap: 2rem;
}}

.header-titles {{
    flex: 1;
    text-align: {header_text};
}}

.logo {{
    width: {logo_px}px;
    height: {logo_px}px;
    object-fit: contain;
}}

.logo-overlay {{
    position: absolute;
    top: 2rem;
    right: 2rem;
}}

.university {{
    margin: 0 0 0.5rem 0;
    font-size: 30px;
    font-weight: bold;
    text-transform: uppercase;
    letter-spacing: -0.02em;
    line-height: 1;
    color: {accent};
}}

.department {{
    margin: 0;
    font-size: 20px;
    font-weight: 500;
    color: #475569;
}}

.divider {{
    height: 2px;
    width: 100%;
    margin-bottom: 2rem;
    background: {divider_bg};
}}

.title-block {{
    flex-grow: 1;
    display: flex;
    flex-direction: column;
    justify-content: center;
    text-align: {title_text};
}}

.accent-bar {{
    border-left: 4px solid {accent};
    padding-left: 1.5rem;
}}

.assignment-type {{
    margin: 0 0 1rem 0;
    font-size: 20px;
    font-weight: bold;
    color: #94a3b8;
    letter-spacing: 0.25em;
    text-transform: uppercase;
}}

.report-title {{
    margin: 0;
    font-size: {title_size}px;
    font-weight: bold;
    line-height: 1.2;
}}

.details {{
    margin-top: 3rem;
    padding-top: 2rem;
    border-top: 2px solid #f1f1f1;
    display: grid;
    grid-template-columns: 4fr 1fr 7fr;
    row-gap: 0.75rem;
    font-size: {details_size}px;
}}

.detail-label {{
    font-weight: bold;
    color: #334155;
}}

.detail-colon {{
    text-align: center;
    color: #cbd5e1;
}}

.detail-value {{
    font-weight: 500;
    color: #0f172a;
}}

.page-footer {{
    position: absolute;
    bottom: 2rem;
    left: 0;
    width: 100%;
    text-align: center;
    font-size: 9px;
    color: #e2e8f0;
    text-transform: uppercase;
    letter-spacing: 0.2em;
}}"#,
        font = record.font.css_stack(),
        accent = layout.accent,
        divider_bg = layout.divider_css(),
        title_size = record.title_font_size,
        details_size = record.details_font_size,
    )
}
