//! Scale-to-fit arithmetic and the preview zoom state.
//!
//! All functions here are pure and testable without any rendering. The zoom
//! only affects the on-screen preview; exports always rasterize at a fixed
//! reference scale regardless of the live zoom level.

use crate::record::PageSize;

/// Millimeter-to-pixel conversion at the reference 96 DPI.
pub const MM_TO_PX: f64 = 3.78;

/// Horizontal padding reserved inside the preview container, in pixels.
pub const FIT_PADDING_PX: f64 = 64.0;

/// Stock zoom clamp bounds and manual step size; `[preview]` config
/// overrides arrive as a [`ZoomLimits`].
pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 3.0;
pub const ZOOM_STEP: f64 = 0.1;

/// Fixed rasterization multiplier for exported images, independent of the
/// live preview zoom.
pub const EXPORT_SCALE: f64 = 3.0;

/// Page width in reference pixels.
pub fn page_width_px(page: PageSize) -> f64 {
    page.dimensions_mm().0 * MM_TO_PX
}

/// Zoom clamp bounds and the manual step size. Defaults to the stock
/// constants; built from `[preview]` config when the user overrides them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLimits {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min: MIN_ZOOM,
            max: MAX_ZOOM,
            step: ZOOM_STEP,
        }
    }
}

/// Compute the zoom factor that fits a page inside a container of the given
/// pixel width, leaving `padding` pixels of breathing room. Clamped to
/// `limits.min..limits.max` so degenerate container widths cannot produce
/// zero, negative, or runaway scales.
pub fn fit_scale(
    page: PageSize,
    container_width_px: f64,
    padding: f64,
    limits: ZoomLimits,
) -> f64 {
    let raw = (container_width_px - padding) / page_width_px(page);
    raw.clamp(limits.min, limits.max)
}

/// Live preview zoom: auto-fit by default, manual after the user steps it.
#[derive(Debug, Clone, PartialEq)]
pub struct Zoom {
    scale: f64,
    auto_fit: bool,
    limits: ZoomLimits,
}

impl Default for Zoom {
    fn default() -> Self {
        Self::with_limits(ZoomLimits::default())
    }
}

impl Zoom {
    /// Zoom state honoring the given clamp bounds and step size.
    pub fn with_limits(limits: ZoomLimits) -> Self {
        Self {
            scale: 1.0,
            auto_fit: true,
            limits,
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn is_auto_fit(&self) -> bool {
        self.auto_fit
    }

    /// Recompute for a new container width. No-op while in manual mode.
    pub fn fit(&mut self, page: PageSize, container_width_px: f64) {
        if self.auto_fit {
            self.scale = fit_scale(page, container_width_px, FIT_PADDING_PX, self.limits);
        }
    }

    /// Manual step in. Leaves auto-fit until [`Zoom::enable_auto_fit`].
    pub fn zoom_in(&mut self) {
        self.auto_fit = false;
        self.scale = (self.scale + self.limits.step).clamp(self.limits.min, self.limits.max);
    }

    /// Manual step out. Leaves auto-fit until [`Zoom::enable_auto_fit`].
    pub fn zoom_out(&mut self) {
        self.auto_fit = false;
        self.scale = (self.scale - self.limits.step).clamp(self.limits.min, self.limits.max);
    }

    /// Re-enable auto-fit and immediately refit.
    pub fn enable_auto_fit(&mut self, page: PageSize, container_width_px: f64) {
        self.auto_fit = true;
        self.fit(page, container_width_px);
    }
}

/// Scoped 1:1 reset of the live zoom around rasterization.
///
/// The rasterizer captures rendered pixel dimensions, not logical ones, so
/// the preview must sit at 1:1 while it runs. Dropping the guard restores the
/// previous zoom on every exit path, including early returns on error.
pub struct ZoomGuard<'a> {
    zoom: &'a mut Zoom,
    saved: Zoom,
}

impl<'a> ZoomGuard<'a> {
    pub fn reset_for_export(zoom: &'a mut Zoom) -> Self {
        let saved = zoom.clone();
        zoom.scale = 1.0;
        Self { zoom, saved }
    }
}

impl Drop for ZoomGuard<'_> {
    fn drop(&mut self) {
        *self.zoom = self.saved.clone();
    }
}
