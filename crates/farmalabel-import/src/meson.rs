//! Parser for the merchandising source (mesón), a fixed-column
//! tab-delimited export describing shelf placement.
//!
//! Columns 0–5 are SKU, description, division, category, subcategory, and
//! brand. A header row is auto-detected by the `SKU` token and skipped.

use std::collections::HashMap;

use farmalabel_core::MesonInfo;

use crate::tsv;

/// Header token that marks the first line as column names.
const HEADER_TOKEN: &str = "SKU";

/// Rows with fewer tab-separated fields than this are malformed and skipped.
const MIN_FIELDS: usize = 6;

/// Parses merchandising-source content into a SKU-keyed map.
///
/// Malformed rows are skipped with a warning, empty-SKU rows are filtered,
/// duplicates are last-write-wins. Every surviving row is flagged
/// `en_meson = true`; presence in the file is the flag.
#[must_use]
pub fn parse_meson_file(content: &str) -> HashMap<String, MesonInfo> {
    let lines = tsv::rows(content);
    let mut meson = HashMap::new();

    let start = usize::from(
        lines
            .first()
            .is_some_and(|first| tsv::has_header(first, HEADER_TOKEN)),
    );

    for (row, line) in lines.iter().enumerate().skip(start) {
        let parts = tsv::fields(line);
        if parts.len() < MIN_FIELDS {
            tracing::warn!(row, fields = parts.len(), "skipping short meson row");
            continue;
        }

        let Some(sku) = tsv::field(&parts, 0) else {
            continue;
        };

        meson.insert(
            sku.to_string(),
            MesonInfo {
                division: tsv::field(&parts, 2).unwrap_or_default().to_string(),
                categoria: tsv::field(&parts, 3).unwrap_or_default().to_string(),
                subcategoria: tsv::field(&parts, 4).unwrap_or_default().to_string(),
                marca: tsv::field(&parts, 5).unwrap_or_default().to_string(),
                en_meson: true,
            },
        );
    }

    meson
}
