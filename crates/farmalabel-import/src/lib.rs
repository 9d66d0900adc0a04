//! Import pipeline: turns heterogeneous tabular exports and raw API records
//! into canonical [`farmalabel_core::Product`] values.
//!
//! Three ingestion paths feed the same model: the header-driven base-product
//! export ([`products`]), the fixed-column offer and merchandising sources
//! ([`offers`], [`meson`]), and loosely-shaped key-value records from uploads
//! or the query service ([`mapper`]). [`merge::reconcile`] joins them by SKU.
//!
//! Everything in this crate is pure and synchronous: callers hand in file
//! *content*, never paths, and receive full replacement values.

pub mod dates;
pub mod error;
pub mod mapper;
pub mod merge;
pub mod meson;
pub mod offers;
pub mod products;
pub mod tsv;

pub use error::ImportError;
pub use mapper::{map_raw_record, RawRecord};
pub use merge::reconcile;
pub use meson::parse_meson_file;
pub use offers::parse_offer_file;
pub use products::parse_base_products;
