use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A canonical pharmacy product record, reconciled from the legacy product
/// export, the offer source (posdpofe), and the merchandising source (mesón).
///
/// Serialized with the camelCase field names the existing merged-data files
/// use, so output stays readable by the tools that consumed the old exports.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Opaque identity: the SKU when present, else the barcode, else an
    /// epoch-millis timestamp assigned at mapping time.
    pub id: String,
    /// Merchant SKU; the join key across all data sources. Records without
    /// one are dropped during parsing and never reach a merge.
    pub codigo: String,
    pub codigo_barras: String,
    pub nombre: String,
    pub descripcion: String,
    /// Size/variant descriptor, e.g. `"XXL"` or `"14-15"`.
    pub dosage: String,
    pub batch: String,
    /// ISO `YYYY-MM-DD` date string, kept as text exactly as displayed.
    pub expiry_date: String,
    pub manufacturer: String,
    /// Same semantic value as `manufacturer`; both fields are kept for
    /// compatibility with existing consumers of the merged output.
    pub laboratorio: String,
    /// Pre-offer price in CLP. The peso has no subunit, so prices are plain
    /// integers everywhere.
    pub precio_normal: i64,
    /// Effective price: the offer price while an [`Oferta`] is attached,
    /// `precio_normal` otherwise.
    pub precio: i64,
    /// Units on hand.
    pub stock: i64,
    pub categoria: String,
    /// Offer data joined from the posdpofe source. Owned exclusively by this
    /// product; replaced wholesale on every re-merge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oferta: Option<Oferta>,
    /// Shelf-placement data joined from the mesón source. Same ownership
    /// rule as `oferta`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meson: Option<MesonInfo>,
}

impl Product {
    /// Savings in CLP versus the normal price. Zero without an offer.
    #[must_use]
    pub fn ahorro(&self) -> i64 {
        if self.oferta.is_some() {
            self.precio_normal - self.precio
        } else {
            0
        }
    }

    /// Effective discount percentage computed from the current prices.
    ///
    /// Zero without an offer or when `precio_normal` is not positive.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn descuento_real(&self) -> i64 {
        if self.oferta.is_none() || self.precio_normal <= 0 {
            return 0;
        }
        let diff = (self.precio_normal - self.precio) as f64;
        (diff / self.precio_normal as f64 * 100.0).round() as i64
    }

    /// Returns `true` when an offer is attached and `today` falls on or
    /// before its `vigencia_fin`. An unparseable end date counts as expired.
    #[must_use]
    pub fn oferta_vigente(&self, today: NaiveDate) -> bool {
        self.oferta
            .as_ref()
            .and_then(|o| NaiveDate::parse_from_str(&o.vigencia_fin, "%Y-%m-%d").ok())
            .is_some_and(|fin| today <= fin)
    }
}

/// A time-bounded price discount attached to a [`Product`], keyed by SKU in
/// the offer source. Has no identity of its own: discarded and rebuilt on
/// every merge.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Oferta {
    /// Discounted price in CLP.
    pub precio_oferta: i64,
    /// Validity window start, ISO `YYYY-MM-DD`.
    pub vigencia_inicio: String,
    /// Validity window end, ISO `YYYY-MM-DD`.
    pub vigencia_fin: String,
    /// Discount percentage, 0–100. Supplied by the offer source or derived
    /// via [`Oferta::derived_discount`].
    pub descuento_porcentaje: i64,
    /// Offer type discriminator: `"1"` = percentage-based, `"3"` =
    /// quantity-for-price bundle. Bundles are carried but not computed
    /// differently.
    pub tipo_oferta: String,
}

impl Oferta {
    /// Discount percentage derived from the two prices:
    /// `round((1 - precio_oferta / precio_normal) * 100)`, clamped at zero so
    /// an offer price at or above the normal price never yields a negative
    /// discount. Zero when `precio_normal` is not positive.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn derived_discount(precio_normal: i64, precio_oferta: i64) -> i64 {
        if precio_normal <= 0 {
            return 0;
        }
        let pct = (1.0 - precio_oferta as f64 / precio_normal as f64) * 100.0;
        (pct.round() as i64).max(0)
    }
}

/// Merchandising metadata describing a product's shelf placement, keyed by
/// SKU in the mesón source. Same ownership/lifecycle rule as [`Oferta`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MesonInfo {
    pub division: String,
    pub categoria: String,
    pub subcategoria: String,
    pub marca: String,
    /// Presence flag: `true` for every row that appears in the mesón export.
    pub en_meson: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_product(precio_normal: i64, precio: i64, oferta: Option<Oferta>) -> Product {
        Product {
            id: "1".to_string(),
            codigo: "89997002".to_string(),
            codigo_barras: "2000000744902".to_string(),
            nombre: "BLOODYGREEN TEEN FLUJO INTENSO".to_string(),
            descripcion: "BLOODYGREEN TEEN FLUJO INTENSO NEGR, 14-15".to_string(),
            dosage: "14-15".to_string(),
            batch: "2000000744902".to_string(),
            expiry_date: "2026-12-31".to_string(),
            manufacturer: "BLOODYGREEN".to_string(),
            laboratorio: "BLOODYGREEN".to_string(),
            precio_normal,
            precio,
            stock: 8,
            categoria: "20M02A".to_string(),
            oferta,
            meson: None,
        }
    }

    fn make_oferta(precio_oferta: i64, vigencia_fin: &str) -> Oferta {
        Oferta {
            precio_oferta,
            vigencia_inicio: "2025-04-22".to_string(),
            vigencia_fin: vigencia_fin.to_string(),
            descuento_porcentaje: 12,
            tipo_oferta: "1".to_string(),
        }
    }

    #[test]
    fn ahorro_zero_without_offer() {
        let product = make_product(16_990, 16_990, None);
        assert_eq!(product.ahorro(), 0);
    }

    #[test]
    fn ahorro_is_price_difference_with_offer() {
        let product = make_product(16_990, 14_990, Some(make_oferta(14_990, "2025-05-26")));
        assert_eq!(product.ahorro(), 2_000);
    }

    #[test]
    fn descuento_real_zero_without_offer() {
        let product = make_product(16_990, 16_990, None);
        assert_eq!(product.descuento_real(), 0);
    }

    #[test]
    fn descuento_real_rounds_from_prices() {
        let product = make_product(16_990, 14_990, Some(make_oferta(14_990, "2025-05-26")));
        assert_eq!(product.descuento_real(), 12);
    }

    #[test]
    fn descuento_real_zero_when_normal_price_is_zero() {
        let product = make_product(0, 0, Some(make_oferta(0, "2025-05-26")));
        assert_eq!(product.descuento_real(), 0);
    }

    #[test]
    fn derived_discount_matches_rounding_rule() {
        assert_eq!(Oferta::derived_discount(16_990, 14_990), 12);
    }

    #[test]
    fn derived_discount_clamped_at_zero() {
        assert_eq!(Oferta::derived_discount(10_000, 12_000), 0);
    }

    #[test]
    fn derived_discount_zero_for_nonpositive_normal_price() {
        assert_eq!(Oferta::derived_discount(0, 5_000), 0);
        assert_eq!(Oferta::derived_discount(-1, 5_000), 0);
    }

    #[test]
    fn oferta_vigente_true_within_window() {
        let product = make_product(16_990, 14_990, Some(make_oferta(14_990, "2025-05-26")));
        let today = NaiveDate::from_ymd_opt(2025, 5, 26).unwrap();
        assert!(product.oferta_vigente(today));
    }

    #[test]
    fn oferta_vigente_false_after_window() {
        let product = make_product(16_990, 14_990, Some(make_oferta(14_990, "2025-05-26")));
        let today = NaiveDate::from_ymd_opt(2025, 5, 27).unwrap();
        assert!(!product.oferta_vigente(today));
    }

    #[test]
    fn oferta_vigente_false_without_offer() {
        let product = make_product(16_990, 16_990, None);
        let today = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        assert!(!product.oferta_vigente(today));
    }

    #[test]
    fn oferta_vigente_false_for_unparseable_end_date() {
        let product = make_product(16_990, 14_990, Some(make_oferta(14_990, "052625")));
        let today = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        assert!(!product.oferta_vigente(today));
    }

    #[test]
    fn serde_uses_camel_case_keys() {
        let product = make_product(16_990, 14_990, Some(make_oferta(14_990, "2025-05-26")));
        let json = serde_json::to_value(&product).expect("serialization failed");
        assert_eq!(json["codigoBarras"], "2000000744902");
        assert_eq!(json["precioNormal"], 16_990);
        assert_eq!(json["oferta"]["precioOferta"], 14_990);
        assert_eq!(json["oferta"]["tipoOferta"], "1");
    }

    #[test]
    fn serde_omits_absent_offer_and_meson() {
        let product = make_product(16_990, 16_990, None);
        let json = serde_json::to_value(&product).expect("serialization failed");
        assert!(json.get("oferta").is_none());
        assert!(json.get("meson").is_none());
    }

    #[test]
    fn serde_roundtrip_preserves_meson() {
        let mut product = make_product(16_990, 16_990, None);
        product.meson = Some(MesonInfo {
            division: "Consumo".to_string(),
            categoria: "PROTECCION SANITARIA FEMENINA".to_string(),
            subcategoria: "TOALLAS".to_string(),
            marca: "BLOODYGREEN".to_string(),
            en_meson: true,
        });
        let json = serde_json::to_string(&product).expect("serialization failed");
        let decoded: Product = serde_json::from_str(&json).expect("deserialization failed");
        let meson = decoded.meson.expect("expected meson info");
        assert!(meson.en_meson);
        assert_eq!(meson.division, "Consumo");
    }
}
