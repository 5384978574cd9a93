use std::fmt;

use super::Color;

/// A hex color string that failed strict parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct HexColorError {
    pub input: String,
}

impl HexColorError {
    fn new(input: &str) -> Self {
        Self { input: input.to_string() }
    }
}

impl fmt::Display for HexColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid hex color {:?} (expected #RRGGBB or #AARRGGBB)", self.input)
    }
}

impl std::error::Error for HexColorError {}

impl Color {
    /// Strict parse of `#RRGGBB` or `#AARRGGBB` (alpha first).
    ///
    /// The leading `#` is optional; hex digits may be any case.
    pub fn try_from_hex(hex: &str) -> Result<Color, HexColorError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(HexColorError::new(hex));
        }

        let byte = |i: usize| -> f32 {
            // Caller has validated length and digit set.
            u8::from_str_radix(&digits[i..i + 2], 16).unwrap_or(0) as f32 / 255.0
        };

        match digits.len() {
            6 => Ok(Color::new(byte(0), byte(2), byte(4), 1.0)),
            8 => Ok(Color::new(byte(2), byte(4), byte(6), byte(0))),
            _ => Err(HexColorError::new(hex)),
        }
    }

    /// Lenient parse: any malformed input decodes to opaque black.
    ///
    /// Persisted gradients may carry junk strings; decode failure is not an
    /// error condition for rendering.
    pub fn from_hex(hex: &str) -> Color {
        Self::try_from_hex(hex).unwrap_or_else(|e| {
            log::debug!("hex decode failed, using opaque black: {e}");
            Color::black()
        })
    }

    /// Serializes as uppercase `#RRGGBB`, or `#AARRGGBB` when alpha < 1.
    pub fn to_hex(self) -> String {
        let c = self.clamped();
        let q = |v: f32| (v * 255.0).round() as u8;
        if c.a >= 1.0 {
            format!("#{:02X}{:02X}{:02X}", q(c.r), q(c.g), q(c.b))
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", q(c.a), q(c.r), q(c.g), q(c.b))
        }
    }
}
