//! Label layout and rendering.
//!
//! [`layout()`] turns a product plus a [`farmalabel_core::LabelConfig`] into
//! an ordered sequence of visible lines; three independent adapters consume that
//! sequence: an SVG preview ([`svg`]), a paged PDF sized exactly to the label
//! for the host print facility ([`pdf`]), and PNG export ([`export`]) with a
//! surface-snapshot strategy and a from-scratch raster fallback ([`raster`]).
//!
//! All adapters share one millimetre→pixel conversion ([`geometry`]); if the
//! print and export pathways ever disagreed on it, printed and exported
//! labels would visibly differ in size.

pub mod error;
pub mod export;
pub mod fmt;
pub mod geometry;
pub mod layout;
pub mod pdf;
pub mod raster;
pub mod svg;

pub use error::LabelError;
pub use export::{export_file_name, export_png, RgbaSurface};
pub use fmt::{format_clp, format_price};
pub use geometry::{mm_to_px, LabelGeometry};
pub use layout::{layout, FieldOrder, LabelField, LayoutLine, CANONICAL_ORDER};
pub use pdf::render_pdf;
pub use svg::render_svg;
