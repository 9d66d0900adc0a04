//! The layout engine: maps a product and a config onto an ordered sequence
//! of visible label lines.
//!
//! Ordering is a presentation concern: the config only says *which* fields
//! show, [`FieldOrder`] says where. The default is the canonical top-to-
//! bottom order; a user reorder moves one field at a time and shifts the
//! rest (the drag-and-drop semantics of the label builder).

use farmalabel_core::{LabelConfig, Product};

use crate::error::LabelError;
use crate::fmt::format_price;

/// The seven displayable label fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelField {
    ProductName,
    GenericName,
    Dosage,
    Manufacturer,
    Batch,
    Expiry,
    Price,
}

/// Canonical default order: name, generic name, dosage, manufacturer,
/// batch/code, expiry, price.
pub const CANONICAL_ORDER: [LabelField; 7] = [
    LabelField::ProductName,
    LabelField::GenericName,
    LabelField::Dosage,
    LabelField::Manufacturer,
    LabelField::Batch,
    LabelField::Expiry,
    LabelField::Price,
];

impl LabelField {
    /// Stable key used on the CLI and in saved orderings.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::ProductName => "name",
            Self::GenericName => "generic",
            Self::Dosage => "dosage",
            Self::Manufacturer => "manufacturer",
            Self::Batch => "batch",
            Self::Expiry => "expiry",
            Self::Price => "price",
        }
    }
}

impl std::str::FromStr for LabelField {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "name" => Ok(Self::ProductName),
            "generic" => Ok(Self::GenericName),
            "dosage" => Ok(Self::Dosage),
            "manufacturer" => Ok(Self::Manufacturer),
            "batch" => Ok(Self::Batch),
            "expiry" => Ok(Self::Expiry),
            "price" => Ok(Self::Price),
            other => Err(LabelError::InvalidFieldOrder {
                reason: format!("unknown field key \"{other}\""),
            }),
        }
    }
}

/// A permutation of all seven label fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOrder(Vec<LabelField>);

impl Default for FieldOrder {
    fn default() -> Self {
        Self(CANONICAL_ORDER.to_vec())
    }
}

impl FieldOrder {
    /// The canonical default order.
    #[must_use]
    pub fn canonical() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn fields(&self) -> &[LabelField] {
        &self.0
    }

    /// Builds an order from an explicit permutation.
    ///
    /// # Errors
    ///
    /// Returns [`LabelError::InvalidFieldOrder`] unless every field appears
    /// exactly once.
    pub fn from_fields(fields: &[LabelField]) -> Result<Self, LabelError> {
        if fields.len() != CANONICAL_ORDER.len() {
            return Err(LabelError::InvalidFieldOrder {
                reason: format!(
                    "expected {} fields, got {}",
                    CANONICAL_ORDER.len(),
                    fields.len()
                ),
            });
        }
        for field in CANONICAL_ORDER {
            if !fields.contains(&field) {
                return Err(LabelError::InvalidFieldOrder {
                    reason: format!("missing field \"{}\"", field.key()),
                });
            }
        }
        Ok(Self(fields.to_vec()))
    }

    /// Moves one field to `target_index` (clamped to the end), shifting the
    /// others: the single-item reorder of a drag-and-drop step. Returns a
    /// new order; `self` is untouched.
    #[must_use]
    pub fn move_field(&self, field: LabelField, target_index: usize) -> Self {
        let Some(current) = self.0.iter().position(|f| *f == field) else {
            return self.clone();
        };
        let mut fields = self.0.clone();
        fields.remove(current);
        let target = target_index.min(fields.len());
        fields.insert(target, field);
        Self(fields)
    }
}

/// One visible label line: which field it is and its final display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutLine {
    pub field: LabelField,
    pub text: String,
}

/// Lays out a product under a config: one line per visible field, in
/// `order`, with final display text. Hidden fields are omitted entirely,
/// never rendered empty.
#[must_use]
pub fn layout(product: &Product, config: &LabelConfig, order: &FieldOrder) -> Vec<LayoutLine> {
    order
        .fields()
        .iter()
        .filter(|field| is_visible(config, **field))
        .map(|field| LayoutLine {
            field: *field,
            text: line_text(product, *field),
        })
        .collect()
}

fn is_visible(config: &LabelConfig, field: LabelField) -> bool {
    match field {
        LabelField::ProductName => config.show_product_name,
        LabelField::GenericName => config.show_generic_name,
        LabelField::Dosage => config.show_dosage,
        LabelField::Manufacturer => config.show_manufacturer,
        LabelField::Batch => config.show_batch,
        LabelField::Expiry => config.show_expiry,
        LabelField::Price => config.show_price,
    }
}

/// Display-text rule per field. Name, generic name, and manufacturer are the
/// raw stored strings (overflow truncation is the renderer's job); dosage,
/// batch, and expiry carry their localized prefixes; the price gets es-CL
/// grouping.
fn line_text(product: &Product, field: LabelField) -> String {
    match field {
        LabelField::ProductName => product.nombre.clone(),
        LabelField::GenericName => product.descripcion.clone(),
        LabelField::Dosage => format!("Talla: {}", product.dosage),
        LabelField::Manufacturer => product.laboratorio.clone(),
        LabelField::Batch => format!("Código: {}", product.codigo),
        LabelField::Expiry => format!("Venc: {}", product.expiry_date),
        LabelField::Price => format_price(Some(product.precio)),
    }
}
