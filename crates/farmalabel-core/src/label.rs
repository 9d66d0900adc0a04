use serde::{Deserialize, Serialize};

/// User-controlled label layout configuration.
///
/// Lives only for the session; callers replace the whole value on every edit
/// rather than mutating a shared instance. Field *ordering* is deliberately
/// not part of the config; it is a presentation concern of the layout
/// engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelConfig {
    /// Label width in millimetres.
    pub width: u32,
    /// Label height in millimetres.
    pub height: u32,
    pub show_product_name: bool,
    pub show_generic_name: bool,
    pub show_dosage: bool,
    pub show_batch: bool,
    pub show_expiry: bool,
    pub show_manufacturer: bool,
    pub show_price: bool,
    /// Hex color string, e.g. `"#FFFFFF"`.
    pub background_color: String,
    /// Hex color string, e.g. `"#000000"`.
    pub text_color: String,
    /// Base font size in pixels.
    pub font_size: u32,
}

impl Default for LabelConfig {
    /// The session default: 100×60 mm, 11 px text, black on white, every
    /// field visible.
    fn default() -> Self {
        Self {
            width: 100,
            height: 60,
            show_product_name: true,
            show_generic_name: true,
            show_dosage: true,
            show_batch: true,
            show_expiry: true,
            show_manufacturer: true,
            show_price: true,
            background_color: "#FFFFFF".to_string(),
            text_color: "#000000".to_string(),
            font_size: 11,
        }
    }
}
