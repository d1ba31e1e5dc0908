//! Export pipelines: raster images and OOXML word documents.
//!
//! Both exporters consume a [`CoverRecord`](crate::record::CoverRecord)
//! directly. The image path rasterizes the HTML document through a
//! [`RenderSurface`](image::RenderSurface); the docx path builds the package
//! from scratch without going through HTML at all.

pub mod docx;
pub mod image;

use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("i/o error during export: {0}")]
    Io(#[from] io::Error),

    #[error("error assembling docx package: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("error encoding image: {0}")]
    Encode(#[from] ::image::ImageError),

    #[error("render surface failed: {0}")]
    Surface(String),
}
