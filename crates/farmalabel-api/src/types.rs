//! Wire types for the remote query service.
//!
//! ## Observed response shapes
//!
//! ### Product endpoints (`/api/products/…`)
//! Flat camelCase records carrying the base product plus optional offer and
//! mesón columns inline (`precioOferta`, `division`, `enMeson`, …). The
//! effective price arrives as `precioActual`. An offer is considered present
//! only when `precioOferta` is set *and non-zero*; the service emits `0`
//! for some no-offer rows.
//!
//! ### Excel/mesón endpoints (`/api/meson/excel/…`)
//! Envelope objects: `{ "ok": true, ... }` with the payload under `items`
//! or `summary`. Failures carry `message` and sometimes `detail`.
//! `foundInDPOFE` keeps the service's all-caps acronym spelling.

use chrono::{Months, NaiveDate};
use farmalabel_core::{MesonInfo, Oferta, Product};
use serde::Deserialize;

/// A flat product record from the query service.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiProduct {
    /// Service-side numeric row id.
    pub id: i64,
    pub codigo: String,
    #[serde(default)]
    pub codigo_barras: String,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: String,
    /// Size/variant descriptor; the service calls it `talla`.
    #[serde(default)]
    pub talla: String,
    #[serde(default)]
    pub precio_normal: i64,
    #[serde(default)]
    pub precio_unitario: i64,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub categoria: String,
    #[serde(default)]
    pub laboratorio: String,
    /// Effective price (offer already applied by the service).
    pub precio_actual: i64,
    #[serde(default)]
    pub oferta_id: Option<i64>,
    #[serde(default)]
    pub precio_oferta: Option<i64>,
    #[serde(default)]
    pub descuento_porcentaje: Option<i64>,
    #[serde(default)]
    pub vigencia_inicio: Option<String>,
    #[serde(default)]
    pub vigencia_fin: Option<String>,
    #[serde(default)]
    pub tipo_oferta: Option<String>,
    #[serde(default)]
    pub oferta_activa: Option<bool>,
    #[serde(default)]
    pub division: Option<String>,
    /// Long-form category name for the mesón block (`categoria` above is
    /// the short merchant code).
    #[serde(default)]
    pub categoria_larga: Option<String>,
    #[serde(default)]
    pub subcategoria: Option<String>,
    #[serde(default)]
    pub marca: Option<String>,
    #[serde(default)]
    pub en_meson: Option<bool>,
}

impl ApiProduct {
    /// Converts the wire record into a canonical [`Product`].
    ///
    /// The service does not ship an expiry date; it defaults to one year
    /// from `today`, the same rule the file importer applies.
    #[must_use]
    pub fn into_product(self, today: NaiveDate) -> Product {
        let oferta = self
            .precio_oferta
            .filter(|precio| *precio != 0)
            .map(|precio_oferta| Oferta {
                precio_oferta,
                vigencia_inicio: self.vigencia_inicio.unwrap_or_default(),
                vigencia_fin: self.vigencia_fin.unwrap_or_default(),
                descuento_porcentaje: self.descuento_porcentaje.unwrap_or(0),
                tipo_oferta: self.tipo_oferta.unwrap_or_else(|| "1".to_string()),
            });

        let meson = (self.en_meson == Some(true)).then(|| MesonInfo {
            division: self.division.unwrap_or_default(),
            categoria: self.categoria_larga.unwrap_or_default(),
            subcategoria: self.subcategoria.unwrap_or_default(),
            marca: self.marca.unwrap_or_default(),
            en_meson: true,
        });

        Product {
            id: self.id.to_string(),
            codigo: self.codigo,
            codigo_barras: self.codigo_barras.clone(),
            nombre: self.nombre,
            descripcion: self.descripcion,
            dosage: self.talla,
            batch: self.codigo_barras,
            expiry_date: default_expiry(today),
            manufacturer: self.laboratorio.clone(),
            laboratorio: self.laboratorio,
            precio_normal: self.precio_normal,
            precio: self.precio_actual,
            stock: self.stock,
            categoria: self.categoria,
            oferta,
            meson,
        }
    }
}

/// A search hit from the Excel index: SKU and description only, no pricing
/// until the enrich step.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExcelItem {
    pub sku: String,
    #[serde(default)]
    pub descripcion: Option<String>,
}

/// Pricing record from the POS discount source (DPOFE), returned by the
/// enrich endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedRecord {
    pub sku: String,
    #[serde(default)]
    pub descripcion_promo: String,
    #[serde(default)]
    pub precio_normal: i64,
    #[serde(default)]
    pub precio_oferta: Option<i64>,
    #[serde(default)]
    pub precio_unitario: Option<i64>,
    #[serde(default)]
    pub vigencia_inicio: Option<String>,
    #[serde(default)]
    pub vigencia_fin: Option<String>,
    #[serde(default)]
    pub descuento_pct: Option<i64>,
}

impl PricedRecord {
    /// Converts the pricing record into a canonical [`Product`].
    ///
    /// An offer is synthesized when `precio_oferta` is present; a missing
    /// discount percentage is derived from the two prices. Absent validity
    /// dates fall back to `today`.
    #[must_use]
    pub fn into_product(self, today: NaiveDate) -> Product {
        let today_iso = today.format("%Y-%m-%d").to_string();
        let oferta = self.precio_oferta.map(|precio_oferta| Oferta {
            precio_oferta,
            vigencia_inicio: self.vigencia_inicio.unwrap_or_else(|| today_iso.clone()),
            vigencia_fin: self.vigencia_fin.unwrap_or_else(|| today_iso.clone()),
            descuento_porcentaje: self
                .descuento_pct
                .unwrap_or_else(|| Oferta::derived_discount(self.precio_normal, precio_oferta)),
            tipo_oferta: "1".to_string(),
        });
        let precio = oferta
            .as_ref()
            .map_or(self.precio_normal, |o| o.precio_oferta);

        Product {
            id: self.sku.clone(),
            codigo: self.sku,
            codigo_barras: String::new(),
            nombre: self.descripcion_promo.clone(),
            descripcion: self.descripcion_promo,
            dosage: String::new(),
            batch: String::new(),
            expiry_date: default_expiry(today),
            manufacturer: String::new(),
            laboratorio: String::new(),
            precio_normal: self.precio_normal,
            precio,
            stock: 0,
            categoria: String::new(),
            oferta,
            meson: None,
        }
    }
}

/// Envelope for the enrich endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub found_in_excel: bool,
    #[serde(default, rename = "foundInDPOFE")]
    pub found_in_dpofe: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub producto: Option<PricedRecord>,
}

/// Upload/status summary for the mesón Excel index.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExcelSummary {
    pub count: i64,
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub sample: Vec<String>,
    #[serde(default)]
    pub source: Option<ExcelSource>,
}

/// Provenance block of an [`ExcelSummary`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExcelSource {
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub sheet: Option<String>,
    #[serde(default)]
    pub col: Option<String>,
    #[serde(default)]
    pub excel_rows: Option<i64>,
}

/// One year out from `today` (clamped for leap days), as ISO text.
fn default_expiry(today: NaiveDate) -> String {
    today
        .checked_add_months(Months::new(12))
        .unwrap_or(today)
        .format("%Y-%m-%d")
        .to_string()
}
