//! Print adapter: builds a single-page PDF sized exactly to the label's
//! physical millimetre dimensions, zero margin, for the host print facility.
//!
//! Multiple copies are deliberately not handled here (the print dialog owns
//! that), and the pathway shares its pixel metrics with the raster export
//! through [`crate::geometry`], converted back to millimetres for the page.

use std::io::BufWriter;

use farmalabel_core::{LabelConfig, Product};
use printpdf::{BuiltinFont, Mm, PdfDocument};

use crate::error::LabelError;
use crate::geometry::PADDING_PX;
use crate::layout::{layout, FieldOrder, LabelField};

/// Millimetres per 96 dpi reference pixel; inverse of the geometry contract.
const MM_PER_PX: f64 = 25.4 / 96.0;

/// Points per CSS pixel (72 pt / 96 px).
const PT_PER_PX: f64 = 0.75;

/// Renders the print PDF for a product under a config and field order.
///
/// # Errors
///
/// Returns [`LabelError::Pdf`] if the document cannot be assembled or
/// serialized.
pub fn render_pdf(
    product: &Product,
    config: &LabelConfig,
    order: &FieldOrder,
) -> Result<Vec<u8>, LabelError> {
    let width_mm = f64::from(config.width);
    let height_mm = f64::from(config.height);

    let (doc, page, layer) = PdfDocument::new(
        format!("Etiqueta {}", product.codigo),
        Mm(width_mm as _),
        Mm(height_mm as _),
        "Etiqueta",
    );
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| LabelError::Pdf(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| LabelError::Pdf(e.to_string()))?;
    let surface = doc.get_page(page).get_layer(layer);

    let font_px = f64::from(config.font_size);
    let pitch_mm = (font_px + 4.0) * MM_PER_PX;
    let x_mm = f64::from(PADDING_PX) * MM_PER_PX;
    // PDF origin is bottom-left; walk down from the top edge.
    let mut baseline_mm = height_mm - f64::from(PADDING_PX) * MM_PER_PX - font_px * MM_PER_PX;

    for line in layout(product, config, order) {
        let (size_px, font) = match line.field {
            LabelField::ProductName => (font_px, &bold),
            LabelField::Price => ((font_px + 4.0).max(14.0), &bold),
            _ => (font_px, &regular),
        };
        surface.use_text(
            line.text,
            (size_px * PT_PER_PX) as _,
            Mm(x_mm as _),
            Mm(baseline_mm as _),
            font,
        );
        baseline_mm -= pitch_mm;
    }

    let mut bytes = Vec::new();
    {
        let mut writer = BufWriter::new(&mut bytes);
        doc.save(&mut writer)
            .map_err(|e| LabelError::Pdf(e.to_string()))?;
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::FieldOrder;

    fn make_product() -> Product {
        Product {
            id: "1".to_string(),
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

    #[test]
    fn pdf_bytes_start_with_the_pdf_magic() {
        let bytes = render_pdf(
            &make_product(),
            &LabelConfig::default(),
            &FieldOrder::canonical(),
        )
        .expect("PDF should render");
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn pdf_renders_even_with_every_field_hidden() {
        let config = LabelConfig {
            show_product_name: false,
            show_generic_name: false,
            show_dosage: false,
            show_batch: false,
            show_expiry: false,
            show_manufacturer: false,
            show_price: false,
            ..LabelConfig::default()
        };
        let bytes = render_pdf(&make_product(), &config, &FieldOrder::canonical())
            .expect("empty label should still render");
        assert!(bytes.starts_with(b"%PDF"));
    }
}
