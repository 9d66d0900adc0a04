//! On-screen preview adapter: renders the layout sequence as a standalone
//! SVG document.
//!
//! A pure function of product + config + order; callers re-render on every
//! change instead of caching. The label box clips its content, so text that
//! overflows the configured geometry is truncated visually, never at the
//! data layer.

use farmalabel_core::{LabelConfig, Product};

use crate::geometry::{LabelGeometry, PADDING_PX};
use crate::layout::{layout, FieldOrder, LabelField};

/// Renders the preview SVG for a product under a config and field order.
#[must_use]
pub fn render_svg(product: &Product, config: &LabelConfig, order: &FieldOrder) -> String {
    let geometry = LabelGeometry::of(config);
    let (w, h) = (geometry.width_px, geometry.height_px);
    let font_size = config.font_size;
    let pitch = font_size + 4;

    let mut s = String::new();
    s.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" \
         viewBox=\"0 0 {w} {h}\" font-family=\"Arial, Roboto, sans-serif\">\n"
    ));
    s.push_str(&format!(
        "<clipPath id=\"label-box\"><rect x=\"0\" y=\"0\" width=\"{w}\" height=\"{h}\"/></clipPath>\n"
    ));
    s.push_str(&format!(
        "<rect x=\"0\" y=\"0\" width=\"{w}\" height=\"{h}\" fill=\"{}\"/>\n",
        svg_escape(&config.background_color)
    ));
    s.push_str(&format!(
        "<g clip-path=\"url(#label-box)\" fill=\"{}\" text-anchor=\"middle\">\n",
        svg_escape(&config.text_color)
    ));

    let mut y = PADDING_PX + font_size;
    for line in layout(product, config, order) {
        // The product name and the price are emphasized; the price is also
        // enlarged so it reads from a distance.
        let (size, weight) = match line.field {
            LabelField::ProductName => (font_size, " font-weight=\"600\""),
            LabelField::Price => ((font_size + 4).max(14), " font-weight=\"700\""),
            _ => (font_size, ""),
        };
        s.push_str(&format!(
            "<text x=\"{}\" y=\"{y}\" font-size=\"{size}\"{weight}>{}</text>\n",
            w / 2,
            svg_escape(&line.text)
        ));
        y += pitch;
    }

    s.push_str("</g>\n</svg>\n");
    s
}

/// Escapes text for SVG element and attribute content.
fn svg_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
