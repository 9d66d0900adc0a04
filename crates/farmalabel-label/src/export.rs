//! PNG export: two interchangeable strategies behind one entry point.
//!
//! Strategy (a) encodes a pixel-faithful snapshot of the rendered preview
//! surface, supplied by the caller as raw RGBA. Strategy (b) draws the label
//! from scratch via [`crate::raster`]. [`export_png`] prefers the snapshot
//! and falls back to the draw strategy whenever the surface is absent or
//! does not match the geometry contract, so export never leaves the user
//! with no output.

use farmalabel_core::{LabelConfig, Product};

use crate::error::LabelError;
use crate::geometry::LabelGeometry;
use crate::layout::{layout, FieldOrder};
use crate::raster::draw_label;

/// A caller-captured snapshot of the rendered preview surface, as raw RGBA.
#[derive(Debug, Clone)]
pub struct RgbaSurface {
    pub width: u32,
    pub height: u32,
    /// `width * height * 4` bytes, row-major RGBA.
    pub pixels: Vec<u8>,
}

/// Encodes an RGBA buffer to PNG bytes. Deterministic for the same input.
///
/// # Errors
///
/// Returns [`LabelError::PngEncoding`] if the encoder rejects the buffer.
pub fn encode_rgba_to_png(width: u32, height: u32, rgba: &[u8]) -> Result<Vec<u8>, LabelError> {
    let mut bytes = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut bytes, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(rgba)?;
    }
    Ok(bytes)
}

/// Strategy (a): encodes a snapshot surface after validating it against the
/// geometry contract for `config` at `scale`.
///
/// # Errors
///
/// Returns [`LabelError::SnapshotGeometry`] or [`LabelError::SnapshotPixels`]
/// when the surface does not match, and [`LabelError::PngEncoding`] on
/// encoder failure.
pub fn export_snapshot(
    surface: &RgbaSurface,
    config: &LabelConfig,
    scale: u32,
) -> Result<Vec<u8>, LabelError> {
    let expected = LabelGeometry::of(config).scaled(scale);
    if surface.width != expected.width_px || surface.height != expected.height_px {
        return Err(LabelError::SnapshotGeometry {
            expected_width: expected.width_px,
            expected_height: expected.height_px,
            actual_width: surface.width,
            actual_height: surface.height,
        });
    }
    let expected_len = surface.width as usize * surface.height as usize * 4;
    if surface.pixels.len() != expected_len {
        return Err(LabelError::SnapshotPixels {
            expected: expected_len,
            actual: surface.pixels.len(),
        });
    }
    encode_rgba_to_png(surface.width, surface.height, &surface.pixels)
}

/// Strategy (b): draws the label from scratch and encodes it.
///
/// # Errors
///
/// Returns [`LabelError::PngEncoding`] on encoder failure.
pub fn export_draw(
    product: &Product,
    config: &LabelConfig,
    order: &FieldOrder,
    scale: u32,
) -> Result<Vec<u8>, LabelError> {
    let lines = layout(product, config, order);
    let raster = draw_label(&lines, config, scale);
    encode_rgba_to_png(raster.width, raster.height, &raster.pixels)
}

/// Exports the label as PNG bytes: snapshot strategy when a usable surface
/// is provided, draw strategy otherwise. Both produce an image whose pixel
/// dimensions equal the geometry-contract conversion of the configured size,
/// times `scale`.
///
/// # Errors
///
/// Returns [`LabelError::PngEncoding`] only if the final encode fails;
/// snapshot problems degrade to the draw strategy with a warning.
pub fn export_png(
    product: &Product,
    config: &LabelConfig,
    order: &FieldOrder,
    surface: Option<&RgbaSurface>,
    scale: u32,
) -> Result<Vec<u8>, LabelError> {
    if let Some(surface) = surface {
        match export_snapshot(surface, config, scale) {
            Ok(bytes) => return Ok(bytes),
            Err(err) => {
                tracing::warn!(error = %err, "snapshot export unusable, falling back to draw strategy");
            }
        }
    }
    export_draw(product, config, order, scale)
}

/// File name convention for exported labels:
/// `label_<productId>_<epochMillis>.png`.
#[must_use]
pub fn export_file_name(product_id: &str, epoch_millis: i64) -> String {
    format!("label_{product_id}_{epoch_millis}.png")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::mm_to_px;

    const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    fn make_product() -> Product {
        Product {
            id: "89997002".to_string(),
            codigo: "89997002".to_string(),
            codigo_barras: "2000000744902".to_string(),
            nombre: "BLOODYGREEN TEEN FLUJO INTENSO".to_string(),
            descripcion: "BLOODYGREEN TEEN".to_string(),
            dosage: "14-15".to_string(),
            batch: "2000000744902".to_string(),
            expiry_date: "2026-12-31".to_string(),
            manufacturer: "BLOODYGREEN".to_string(),
            laboratorio: "BLOODYGREEN".to_string(),
            precio_normal: 16_990,
            precio: 14_990,
            stock: 8,
            categoria: "20M02A".to_string(),
            oferta: None,
            meson: None,
        }
    }

    /// Reads the IHDR dimensions from encoded PNG bytes.
    fn png_dimensions(bytes: &[u8]) -> (u32, u32) {
        let width = u32::from_be_bytes(bytes[16..20].try_into().unwrap());
        let height = u32::from_be_bytes(bytes[20..24].try_into().unwrap());
        (width, height)
    }

    #[test]
    fn draw_strategy_produces_a_png_at_contract_dimensions() {
        let bytes = export_draw(
            &make_product(),
            &LabelConfig::default(),
            &FieldOrder::canonical(),
            2,
        )
        .expect("draw export should succeed");
        assert_eq!(bytes[..8], PNG_MAGIC);
        assert_eq!(png_dimensions(&bytes), (mm_to_px(100) * 2, mm_to_px(60) * 2));
    }

    #[test]
    fn snapshot_strategy_encodes_a_matching_surface() {
        let config = LabelConfig::default();
        let (w, h) = (mm_to_px(config.width), mm_to_px(config.height));
        let surface = RgbaSurface {
            width: w,
            height: h,
            pixels: vec![0x7F; w as usize * h as usize * 4],
        };
        let bytes = export_snapshot(&surface, &config, 1).expect("snapshot should encode");
        assert_eq!(bytes[..8], PNG_MAGIC);
        assert_eq!(png_dimensions(&bytes), (w, h));
    }

    #[test]
    fn snapshot_with_wrong_geometry_is_rejected() {
        let surface = RgbaSurface {
            width: 100,
            height: 100,
            pixels: vec![0; 100 * 100 * 4],
        };
        let result = export_snapshot(&surface, &LabelConfig::default(), 1);
        assert!(matches!(
            result,
            Err(LabelError::SnapshotGeometry {
                expected_width: 378,
                expected_height: 227,
                ..
            })
        ));
    }

    #[test]
    fn snapshot_with_truncated_pixels_is_rejected() {
        let config = LabelConfig::default();
        let (w, h) = (mm_to_px(config.width), mm_to_px(config.height));
        let surface = RgbaSurface {
            width: w,
            height: h,
            pixels: vec![0; 16],
        };
        let result = export_snapshot(&surface, &config, 1);
        assert!(matches!(result, Err(LabelError::SnapshotPixels { .. })));
    }

    #[test]
    fn export_png_falls_back_to_draw_on_bad_surface() {
        let bad_surface = RgbaSurface {
            width: 1,
            height: 1,
            pixels: vec![0, 0, 0, 0xFF],
        };
        let bytes = export_png(
            &make_product(),
            &LabelConfig::default(),
            &FieldOrder::canonical(),
            Some(&bad_surface),
            1,
        )
        .expect("fallback export should succeed");
        // Dimensions prove the draw strategy ran, not the 1×1 snapshot.
        assert_eq!(png_dimensions(&bytes), (378, 227));
    }

    #[test]
    fn export_png_without_surface_uses_the_draw_strategy() {
        let bytes = export_png(
            &make_product(),
            &LabelConfig::default(),
            &FieldOrder::canonical(),
            None,
            1,
        )
        .expect("draw export should succeed");
        assert_eq!(png_dimensions(&bytes), (378, 227));
    }

    #[test]
    fn file_name_follows_the_convention() {
        assert_eq!(
            export_file_name("89997002", 1_745_000_000_000),
            "label_89997002_1745000000000.png"
        );
    }
}
