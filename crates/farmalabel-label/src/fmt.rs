//! Display-text formatting shared by the render adapters.
//!
//! Prices render the way the es-CL locale groups them: `$ 14.990`, dot
//! separators, no decimals (the peso has no subunit). Grouping is done by
//! hand; the label needs exactly one locale, not a formatting crate.

/// Formats a price for display: `Some(14990)` → `"$ 14.990"`, `None` → `"-"`.
///
/// The dash is the placeholder for records that have no price yet (e.g. a
/// search hit before pricing enrichment); rendering must never fail on one.
#[must_use]
pub fn format_price(precio: Option<i64>) -> String {
    precio.map_or_else(|| "-".to_string(), format_clp)
}

/// Formats an integer CLP amount with es-CL thousands grouping.
#[must_use]
pub fn format_clp(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 3);
    let first_group = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - first_group) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    if value < 0 {
        format!("$ -{grouped}")
    } else {
        format!("$ {grouped}")
    }
}

/// Parses a `#RRGGBB` or `#RGB` hex color. Malformed input degrades to the
/// given default rather than failing the render.
#[must_use]
pub fn parse_hex_color(raw: &str, default: [u8; 3]) -> [u8; 3] {
    let hex = raw.trim().trim_start_matches('#');
    let expand = |c: u8| (c << 4) | c;
    match hex.len() {
        6 => {
            let parse = |range| u8::from_str_radix(&hex[range], 16).ok();
            match (parse(0..2), parse(2..4), parse(4..6)) {
                (Some(r), Some(g), Some(b)) => [r, g, b],
                _ => default,
            }
        }
        3 => {
            let parse = |range| u8::from_str_radix(&hex[range], 16).ok().map(expand);
            match (parse(0..1), parse(1..2), parse(2..3)) {
                (Some(r), Some(g), Some(b)) => [r, g, b],
                _ => default,
            }
        }
        _ => default,
    }
}
