//! Generic field mapper for loosely-shaped records.
//!
//! Upload endpoints and the remote query service return flat key→value
//! records whose key spellings differ per source (`CODPROD` vs `CODIGO` vs
//! `MAPCODIN`, …). Rather than probing properties dynamically, each canonical
//! field resolves through an explicit ordered candidate-key list (first
//! non-empty wins), followed by safe type coercion that degrades to a
//! caller-visible default instead of failing the record.

use chrono::{NaiveDate, Utc};
use farmalabel_core::{Oferta, Product};
use serde_json::{Map, Value};

use crate::dates::normalize_date_input;

/// A raw record as delivered by an upload or the query service: a flat JSON
/// object with source-specific key spellings.
pub type RawRecord = Map<String, Value>;

const CODIGO_KEYS: &[&str] = &["CODPROD", "CODIGO", "COD", "MAPCODIN"];
const BARCODE_KEYS: &[&str] = &["CODBARRA", "CODBAR", "MAPBARRA", "BARRA"];
const NOMBRE_KEYS: &[&str] = &["DESPROD", "DESCRIPCION", "MAPDESCC", "NOMBRE"];
const DESCRIPCION_KEYS: &[&str] = &["DESCRIPCION", "DESPROD"];
const LAB_KEYS: &[&str] = &["LABORATORIO", "MARCA", "LAB"];
const DOSAGE_KEYS: &[&str] = &["TALLA", "PRESENTACION", "DOSAGE"];
const BATCH_KEYS: &[&str] = &["LOTE", "BATCH"];
const EXPIRY_KEYS: &[&str] = &["FEC_VENCE", "FEC_VENC", "EXPIRY"];
const OFFER_PRICE_KEYS: &[&str] = &["PRECIO_OFERTA"];
const NORMAL_PRICE_KEYS: &[&str] = &["PRECIO", "PRECIO1"];
const OFFER_START_KEYS: &[&str] = &["FEC_INICIO", "INI_OFERTA"];
const OFFER_END_KEYS: &[&str] = &["FEC_TERMINO", "FIN_OFERTA"];
const STOCK_KEYS: &[&str] = &["STOCK", "EXISTENCIA"];
const CATEGORIA_KEYS: &[&str] = &["CATEGORIA", "CATEG"];

/// Maps a raw record to a canonical [`Product`] against the current clock
/// (date fallbacks and the timestamp-derived identity fallback).
#[must_use]
pub fn map_raw_record(record: &RawRecord) -> Product {
    let now = Utc::now();
    map_raw_record_at(record, now.date_naive(), now.timestamp_millis())
}

/// Maps a raw record to a canonical [`Product`].
///
/// When a finite `PRECIO_OFERTA` is present an [`Oferta`] is synthesized
/// inline, its discount derived from the two prices, and the effective
/// `precio` becomes the offer price. The identity falls back from SKU to
/// barcode to `epoch_millis`.
#[must_use]
pub fn map_raw_record_at(record: &RawRecord, today: NaiveDate, epoch_millis: i64) -> Product {
    let codigo = first_string(record, CODIGO_KEYS).unwrap_or_default();
    let codigo_barras = first_string(record, BARCODE_KEYS).unwrap_or_default();
    let laboratorio = first_string(record, LAB_KEYS).unwrap_or_default();
    let batch = first_string(record, BATCH_KEYS).unwrap_or_else(|| codigo_barras.clone());

    let precio_oferta = first_number(record, OFFER_PRICE_KEYS);
    let precio_normal = safe_i64(first_number(record, NORMAL_PRICE_KEYS), 0);

    let oferta = precio_oferta.map(|po| {
        let precio_oferta = round_i64(po);
        Oferta {
            precio_oferta,
            vigencia_inicio: normalize_date_input(
                first_string(record, OFFER_START_KEYS).as_deref(),
                today,
            ),
            vigencia_fin: normalize_date_input(
                first_string(record, OFFER_END_KEYS).as_deref(),
                today,
            ),
            descuento_porcentaje: Oferta::derived_discount(precio_normal, precio_oferta),
            tipo_oferta: "1".to_string(),
        }
    });

    let precio = oferta
        .as_ref()
        .map_or(precio_normal, |o| o.precio_oferta);

    let id = if codigo.is_empty() {
        if codigo_barras.is_empty() {
            epoch_millis.to_string()
        } else {
            codigo_barras.clone()
        }
    } else {
        codigo.clone()
    };

    Product {
        id,
        codigo,
        codigo_barras,
        nombre: first_string(record, NOMBRE_KEYS).unwrap_or_default(),
        descripcion: first_string(record, DESCRIPCION_KEYS).unwrap_or_default(),
        dosage: first_string(record, DOSAGE_KEYS).unwrap_or_default(),
        batch,
        expiry_date: normalize_date_input(first_string(record, EXPIRY_KEYS).as_deref(), today),
        manufacturer: laboratorio.clone(),
        laboratorio,
        precio_normal,
        precio,
        stock: safe_i64(first_number(record, STOCK_KEYS), 0),
        categoria: first_string(record, CATEGORIA_KEYS).unwrap_or_default(),
        oferta,
        meson: None,
    }
}

/// Resolves the first candidate key holding a non-empty string (or a number,
/// stringified; legacy sources store SKUs as integers).
fn first_string(record: &RawRecord, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match record.get(*key) {
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Resolves the first candidate key holding a finite number (numeric JSON
/// value or numeric string).
fn first_number(record: &RawRecord, keys: &[&str]) -> Option<f64> {
    keys.iter().find_map(|key| match record.get(*key) {
        Some(Value::Number(n)) => n.as_f64().filter(|v| v.is_finite()),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    })
}

/// Safe-numeric coercion: a finite resolved value rounds to an integer,
/// anything else is the caller's fallback.
#[must_use]
pub fn safe_i64(value: Option<f64>, fallback: i64) -> i64 {
    value.map_or(fallback, round_i64)
}

#[allow(clippy::cast_possible_truncation)]
fn round_i64(value: f64) -> i64 {
    value.round() as i64
}
