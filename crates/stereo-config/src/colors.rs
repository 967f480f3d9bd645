//! Hex colour parsing for material components.

use crate::ConfigError;

/// Parse `#rrggbb` (the `#` is optional, digits are case-insensitive) into
/// linear `[r, g, b]` components in `[0, 1]`.
pub fn parse_hex_color(s: &str) -> Result<[f32; 3], ConfigError> {
    let digits = s.trim();
    let digits = digits.strip_prefix('#').unwrap_or(digits);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ConfigError::ParseError(format!("invalid hex color: {s}")));
    }

    let channel = |i: usize| -> Result<f32, ConfigError> {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .map(|c| c as f32 / 255.0)
            .map_err(|e| ConfigError::ParseError(format!("invalid hex color {s}: {e}")))
    };
    Ok([channel(0)?, channel(2)?, channel(4)?])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_and_without_hash() {
        assert_eq!(parse_hex_color("#ff0000").unwrap(), [1.0, 0.0, 0.0]);
        assert_eq!(parse_hex_color("00FF00").unwrap(), [0.0, 1.0, 0.0]);
        let c = parse_hex_color("#336699").unwrap();
        assert!((c[0] - 0.2).abs() < 1e-6);
        assert!((c[1] - 0.4).abs() < 1e-6);
        assert!((c[2] - 0.6).abs() < 1e-6);
    }

    #[test]
    fn rejects_malformed() {
        for bad in ["", "#fff", "#12345g", "#1234567", "rgb(1,2,3)", "#ééé"] {
            assert!(parse_hex_color(bad).is_err(), "{bad} should be rejected");
        }
    }
}
