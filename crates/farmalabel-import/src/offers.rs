//! Parser for the offer source (posdpofe), a fixed-column tab-delimited
//! export from the POS discount system.
//!
//! Column positions are contractual, not header-driven: SKU at field 9
//! (zero-padded), offer price at field 7, discount percentage at field 19,
//! and the offer end date at field 5 as a compact `MMDDYY`. A header row is
//! auto-detected by the `DP_DESCRIP` token and skipped.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use farmalabel_core::Oferta;

use crate::dates::expand_compact_date;
use crate::tsv;

/// Header token that marks the first line as column names.
const HEADER_TOKEN: &str = "DP_DESCRIP";

/// Rows with fewer tab-separated fields than this are malformed and skipped.
const MIN_FIELDS: usize = 8;

const COL_END_DATE: usize = 5;
const COL_OFFER_PRICE: usize = 7;
const COL_SKU: usize = 9;
const COL_DISCOUNT_PCT: usize = 19;

/// Parses offer-source content into a SKU-keyed map, against today's date.
#[must_use]
pub fn parse_offer_file(content: &str) -> HashMap<String, Oferta> {
    parse_offer_file_at(content, Utc::now().date_naive())
}

/// Parses offer-source content into a SKU-keyed map.
///
/// Malformed rows (too few fields) are skipped with a warning; rows whose
/// SKU is empty after zero-stripping are filtered out. Duplicate SKUs are
/// last-write-wins. `today` seeds `vigencia_inicio` and the end-date
/// fallback.
#[must_use]
pub fn parse_offer_file_at(content: &str, today: NaiveDate) -> HashMap<String, Oferta> {
    let lines = tsv::rows(content);
    let mut offers = HashMap::new();

    let start = usize::from(
        lines
            .first()
            .is_some_and(|first| tsv::has_header(first, HEADER_TOKEN)),
    );

    for (row, line) in lines.iter().enumerate().skip(start) {
        let parts = tsv::fields(line);
        if parts.len() < MIN_FIELDS {
            tracing::warn!(row, fields = parts.len(), "skipping short offer row");
            continue;
        }

        let sku = tsv::field(&parts, COL_SKU)
            .map(tsv::strip_leading_zeros)
            .unwrap_or_default();
        if sku.is_empty() {
            continue;
        }

        let precio_oferta = tsv::field(&parts, COL_OFFER_PRICE)
            .and_then(tsv::parse_i64_loose)
            .unwrap_or(0);
        let descuento_porcentaje = tsv::field(&parts, COL_DISCOUNT_PCT)
            .and_then(tsv::parse_i64_loose)
            .unwrap_or(0);
        let vigencia_fin =
            expand_compact_date(tsv::field(&parts, COL_END_DATE).unwrap_or_default(), today);

        offers.insert(
            sku.to_string(),
            Oferta {
                precio_oferta,
                vigencia_inicio: today.format("%Y-%m-%d").to_string(),
                vigencia_fin,
                descuento_porcentaje,
                tipo_oferta: "1".to_string(),
            },
        );
    }

    offers
}
