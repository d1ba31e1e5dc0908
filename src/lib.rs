//! # Cover Page
//!
//! A generator for academic assignment cover pages. A single JSON record is
//! the data source: it holds the institution, course, people, and
//! presentation choices, and every output is derived from it.
//!
//! # Architecture: One Record, Three Outputs
//!
//! ```text
//! record.json ─┬─ html   → standalone preview document (Maud)
//!              ├─ image  → PNG / JPEG raster at a fixed export scale
//!              └─ docx   → OOXML package built part-by-part
//! ```
//!
//! The record is the only mutable state. Rendering is a pure function of
//! (record, resolved layout), so the preview, the raster export, and the
//! word-processing export cannot drift apart: they all pull their row content
//! from the same [`rows::detail_rows`] builder and their geometry from the
//! same page-size table.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`record`] | The document model: `CoverRecord`, students, custom fields, presentation enums, mutation ops |
//! | [`template`] | Resolves a template choice into a concrete `Layout` (logo placement, dividers, title alignment) |
//! | [`rows`] | Builds the ordered label/value detail rows shared by every output |
//! | [`render`] | Maud HTML rendering: preview document with zoom stage, export document at 1:1 |
//! | [`scale`] | Scale-to-fit arithmetic, zoom state, and the export zoom guard |
//! | [`export`] | Raster (`export::image`) and OOXML (`export::docx`) pipelines |
//! | [`persist`] | JSON load/save of the record with forgiving deserialization |
//! | [`naming`] | `cover-page-<slug>.<ext>` export filename convention |
//! | [`config`] | `coverpage.toml` loading, validation, and merging |
//! | [`output`] | CLI output formatting — record summaries and export result lines |
//!
//! # Design Decisions
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system, rather than Handlebars or Tera. Advantages:
//!
//! - **Compile-time checking**: malformed HTML is a build error, not a runtime surprise.
//! - **Type-safe**: template variables are Rust expressions — no stringly-typed lookups.
//! - **XSS-safe by default**: all interpolation is auto-escaped, which matters
//!   when every field on the page is user-entered text.
//! - **Zero runtime files**: no template directory to ship or get out of sync.
//!
//! ## Hand-Built OOXML
//!
//! The docx exporter writes the package parts directly over the `zip` crate
//! instead of pulling in a document-object library. The cover page needs a
//! handful of paragraphs, one borderless table, and at most one image; a
//! full OOXML object model would be far larger than the document it produces.
//!
//! ## Rasterization Behind a Trait
//!
//! Turning HTML into pixels requires a browser engine. The image pipeline
//! only depends on the [`export::image::RenderSurface`] trait; a
//! Chromium-backed implementation ships behind the off-by-default `browser`
//! feature, and tests run against an in-process stub. Everything around the
//! rasterizer — zoom reset, scale selection, encoding — is testable without
//! a browser installed.
//!
//! ## Forgiving Persistence
//!
//! Record JSON is read with defaults for missing fields, ignored unknown
//! keys, and fallback values for unrecognized enum strings. Documents
//! written by older or newer versions of the tool still open; only
//! syntactically broken JSON is an error.

pub mod config;
pub mod export;
pub mod naming;
pub mod output;
pub mod persist;
pub mod record;
pub mod render;
pub mod rows;
pub mod scale;
pub mod template;
