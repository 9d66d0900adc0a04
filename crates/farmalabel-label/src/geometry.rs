//! The millimetre→pixel contract shared by every render pathway.
//!
//! Labels are configured in physical millimetres; screens and raster exports
//! work in pixels. The bridge is the 96 dpi CSS reference pixel:
//! `px = mm * 96 / 25.4`. Print and export must use the *same* conversion or
//! the two outputs drift apart in physical size, so this module is the only
//! place it is computed.

use farmalabel_core::LabelConfig;

/// Inner padding, in reference pixels, shared by the preview, print, and
/// raster pathways.
pub(crate) const PADDING_PX: u32 = 10;

/// Converts millimetres to device pixels at the 96 dpi reference.
///
/// `mm_to_px(100) == 378`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn mm_to_px(mm: u32) -> u32 {
    (f64::from(mm) * 96.0 / 25.4).round() as u32
}

/// Pixel dimensions of a label, derived from its millimetre config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelGeometry {
    pub width_px: u32,
    pub height_px: u32,
}

impl LabelGeometry {
    #[must_use]
    pub fn of(config: &LabelConfig) -> Self {
        Self {
            width_px: mm_to_px(config.width),
            height_px: mm_to_px(config.height),
        }
    }

    /// Applies the export sharpness multiplier to both dimensions.
    #[must_use]
    pub fn scaled(self, scale: u32) -> Self {
        let scale = scale.max(1);
        Self {
            width_px: self.width_px * scale,
            height_px: self.height_px * scale,
        }
    }
}
