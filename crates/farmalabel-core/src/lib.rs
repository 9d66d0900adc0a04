//! Shared data model and configuration for the farmalabel workspace.
//!
//! Everything here is a plain value type: merges and layouts elsewhere in the
//! workspace consume these by reference and produce full replacement values,
//! never in-place mutations.

pub mod app_config;
pub mod config;
pub mod label;
pub mod products;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env, ConfigError};
pub use label::LabelConfig;
pub use products::{MesonInfo, Oferta, Product};
