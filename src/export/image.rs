//! Raster image export (PNG and JPEG).
//!
//! Rasterization of HTML is delegated to a [`RenderSurface`]. The pipeline
//! renders the export document at 1:1, asks the surface for pixels at the
//! fixed 3x export scale, and encodes the result. Preview zoom is parked at
//! 1:1 for the duration and restored afterwards, including on failure.
//!
//! A Chromium-backed surface is available behind the `browser` feature; tests
//! use an in-process stub.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage, RgbaImage};

use crate::export::ExportError;
use crate::record::CoverRecord;
use crate::render;
use crate::scale::{EXPORT_SCALE, MM_TO_PX, Zoom, ZoomGuard};

/// Default JPEG quality for exports.
pub const JPEG_QUALITY: u8 = 92;

/// Knobs for the raster pipeline, loaded from `[export]` config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportOptions {
    pub scale: f64,
    pub jpeg_quality: u8,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            scale: EXPORT_SCALE,
            jpeg_quality: JPEG_QUALITY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
        }
    }
}

/// Page dimensions in CSS pixels, the clip the surface should capture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageRect {
    pub width_px: f64,
    pub height_px: f64,
}

impl PageRect {
    pub fn of(record: &CoverRecord) -> Self {
        let (w_mm, h_mm) = record.page_size.dimensions_mm();
        PageRect {
            width_px: w_mm * MM_TO_PX,
            height_px: h_mm * MM_TO_PX,
        }
    }
}

/// Something that can turn a standalone HTML document into pixels.
///
/// `scale` is the device scale factor: the returned image should measure
/// `page * scale` in each dimension.
pub trait RenderSurface {
    fn rasterize(
        &mut self,
        html: &str,
        page: PageRect,
        scale: f64,
    ) -> Result<RgbaImage, ExportError>;
}

/// Run the full export pipeline: reset zoom, render, rasterize, encode.
pub fn export_image(
    surface: &mut dyn RenderSurface,
    record: &CoverRecord,
    zoom: &mut Zoom,
    format: ImageFormat,
    options: ExportOptions,
) -> Result<Vec<u8>, ExportError> {
    let _guard = ZoomGuard::reset_for_export(zoom);
    let html = render::render_export(record);
    let pixels = surface.rasterize(&html, PageRect::of(record), options.scale)?;
    encode(&pixels, format, options.jpeg_quality)
}

/// Encode captured pixels. PNG keeps the alpha channel; JPEG has none, so the
/// image is flattened onto white first.
pub fn encode(
    pixels: &RgbaImage,
    format: ImageFormat,
    jpeg_quality: u8,
) -> Result<Vec<u8>, ExportError> {
    let mut out = Vec::new();
    match format {
        ImageFormat::Png => {
            pixels.write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)?;
        }
        ImageFormat::Jpeg => {
            let flattened = flatten_onto_white(pixels);
            let mut encoder = JpegEncoder::new_with_quality(Cursor::new(&mut out), jpeg_quality);
            encoder.encode_image(&flattened)?;
        }
    }
    Ok(out)
}

fn flatten_onto_white(pixels: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(pixels.width(), pixels.height(), |x, y| {
        let px = pixels.get_pixel(x, y);
        let alpha = px.0[3] as u32;
        let blend = |c: u8| ((c as u32 * alpha + 255 * (255 - alpha)) / 255) as u8;
        Rgb([blend(px.0[0]), blend(px.0[1]), blend(px.0[2])])
    })
}

#[cfg(feature = "browser")]
pub use chrome::ChromeSurface;

#[cfg(feature = "browser")]
mod chrome {
    use headless_chrome::Browser;
    use headless_chrome::protocol::cdp::Page;

    use super::*;
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD as BASE64;

    /// Rasterizes through a headless Chromium instance.
    pub struct ChromeSurface {
        browser: Browser,
    }

    impl ChromeSurface {
        pub fn launch() -> Result<Self, ExportError> {
            let browser = Browser::default().map_err(|e| ExportError::Surface(e.to_string()))?;
            Ok(ChromeSurface { browser })
        }
    }

    fn surface_err<E: std::fmt::Display>(e: E) -> ExportError {
        ExportError::Surface(e.to_string())
    }

    impl RenderSurface for ChromeSurface {
        fn rasterize(
            &mut self,
            html: &str,
            page: PageRect,
            scale: f64,
        ) -> Result<RgbaImage, ExportError> {
            let tab = self.browser.new_tab().map_err(surface_err)?;
            let url = format!("data:text/html;base64,{}", BASE64.encode(html));
            tab.navigate_to(&url).map_err(surface_err)?;
            tab.wait_until_navigated().map_err(surface_err)?;
            let clip = Page::Viewport {
                x: 0.0,
                y: 0.0,
                width: page.width_px,
                height: page.height_px,
                scale,
            };
            let png = tab
                .capture_screenshot(
                    Page::CaptureScreenshotFormatOption::Png,
                    None,
                    Some(clip),
                    true,
                )
                .map_err(surface_err)?;
            let decoded = image::load_from_memory(&png)?;
            Ok(decoded.to_rgba8())
        }
    }
}
