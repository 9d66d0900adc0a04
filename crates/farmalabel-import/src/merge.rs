//! The merge engine: joins a canonical product base list with the
//! SKU-keyed offer and mesón maps into a reconciled product list.

use std::collections::HashMap;

use farmalabel_core::{MesonInfo, Oferta, Product};

/// Reconciles `base` with the two lookup maps.
///
/// A pure, order- and length-preserving map over `base`: each product's
/// prior `oferta`/`meson` attachments are cleared (a merge is a full
/// replace, never an incremental patch), then re-attached from the maps
/// when a row with the product's `codigo` exists. An attached offer
/// overwrites `precio` with its `precio_oferta`; without one the product
/// keeps `precio == precio_normal`. All other fields pass through
/// unchanged, and none of the inputs are mutated.
#[must_use]
pub fn reconcile(
    base: &[Product],
    offers_by_code: &HashMap<String, Oferta>,
    meson_by_code: &HashMap<String, MesonInfo>,
) -> Vec<Product> {
    base.iter()
        .map(|product| {
            let mut updated = product.clone();
            updated.oferta = None;
            updated.meson = None;
            updated.precio = updated.precio_normal;

            if let Some(oferta) = offers_by_code.get(&product.codigo) {
                updated.precio = oferta.precio_oferta;
                updated.oferta = Some(oferta.clone());
            }
            if let Some(meson) = meson_by_code.get(&product.codigo) {
                updated.meson = Some(meson.clone());
            }

            updated
        })
        .collect()
}
