//! Parser for the base-product export: a header-driven tab-delimited dump of
//! the legacy product database (DBF-style `MAP*` column names).
//!
//! Unlike the fixed-column offer/mesón sources, this file names its columns
//! in the first row, so a file without at least a header row and one data
//! row is structurally unusable and the one hard error of the pipeline.

use std::collections::HashMap;

use chrono::{Months, NaiveDate, Utc};
use farmalabel_core::Product;

use crate::error::ImportError;
use crate::tsv;

/// Parses base-product content against today's date.
///
/// # Errors
///
/// Returns [`ImportError::MissingData`] when the file has fewer than two
/// lines.
pub fn parse_base_products(content: &str) -> Result<Vec<Product>, ImportError> {
    parse_base_products_at(content, Utc::now().date_naive())
}

/// Parses base-product content into canonical products.
///
/// Each data row is zipped against the header row into a raw column→value
/// record and converted. Rows without a `MAPCODIN` SKU are dropped with a
/// warning: they could never join the offer or mesón sources. The expiry
/// date is not present in this export; it defaults to one year from `today`.
///
/// # Errors
///
/// Returns [`ImportError::MissingData`] when the file has fewer than two
/// lines.
pub fn parse_base_products_at(
    content: &str,
    today: NaiveDate,
) -> Result<Vec<Product>, ImportError> {
    let lines = tsv::rows(content);
    if lines.len() < 2 {
        return Err(ImportError::MissingData { lines: lines.len() });
    }

    let headers: Vec<&str> = tsv::fields(lines[0]).iter().map(|h| h.trim()).collect();
    let expiry_date = default_expiry(today);

    let mut products = Vec::new();
    for (row, line) in lines.iter().enumerate().skip(1) {
        let values = tsv::fields(line);
        let raw: HashMap<&str, &str> = headers
            .iter()
            .zip(values.iter())
            .map(|(header, value)| (*header, value.trim()))
            .collect();

        let get = |key: &str| raw.get(key).copied().filter(|v| !v.is_empty());

        let Some(codigo) = get("MAPCODIN") else {
            tracing::warn!(row, "skipping product row without MAPCODIN");
            continue;
        };

        let nombre = get("MAPDESCC").or_else(|| get("MAPDESCL")).unwrap_or("");
        let dosage = get("MAPDESCC")
            .and_then(|desc| desc.split(',').next_back())
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or("Estándar");
        let barcode = get("MAPBARRA").unwrap_or("");
        let precio = get("MAPPREVT")
            .and_then(tsv::parse_i64_loose)
            .unwrap_or(0);

        products.push(Product {
            id: row.to_string(),
            codigo: codigo.to_string(),
            codigo_barras: barcode.to_string(),
            nombre: nombre.to_string(),
            descripcion: get("MAPDESCL").unwrap_or("").to_string(),
            dosage: dosage.to_string(),
            batch: barcode.to_string(),
            expiry_date: expiry_date.clone(),
            manufacturer: get("MAPLAB").unwrap_or("N/A").to_string(),
            laboratorio: get("MAPLAB").unwrap_or("Desconocido").to_string(),
            precio_normal: precio,
            precio,
            stock: get("MAPSTOCK").and_then(tsv::parse_i64_loose).unwrap_or(0),
            categoria: get("MAPCATEG").unwrap_or("General").to_string(),
            oferta: None,
            meson: None,
        });
    }

    Ok(products)
}

/// One year out from `today` (clamped for leap days), as ISO text.
fn default_expiry(today: NaiveDate) -> String {
    today
        .checked_add_months(Months::new(12))
        .unwrap_or(today)
        .format("%Y-%m-%d")
        .to_string()
}
