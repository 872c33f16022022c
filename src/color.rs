use palette::{Hsl, IntoColor, Srgb};
use thiserror::Error;

/// Sentinel recorded wherever a swatch color could not be produced.
pub const UNAVAILABLE: &str = "N/A";

/// Core color type used throughout the pipeline.
/// Wraps sRGB u8 components and provides the hex codec and HSL view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Error returned when a hex color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseHexError {
    /// Input did not hold exactly six digits after the optional `#`.
    #[error("invalid hex color: expected 6 hex digits, got {0}")]
    Length(usize),
    /// Input held a character outside `[0-9a-fA-F]`.
    #[error("invalid hex digit in `{0}`")]
    Digit(String),
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color string like `#ff8800` or `FF8800`.
    ///
    /// The leading `#` is optional; the rest must be exactly six hex digits.
    pub fn from_hex(hex: &str) -> Result<Self, ParseHexError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 {
            return Err(ParseHexError::Length(digits.len()));
        }
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseHexError::Digit(digits.to_owned()));
        }
        let invalid = || ParseHexError::Digit(digits.to_owned());
        let r = u8::from_str_radix(&digits[0..2], 16).map_err(|_| invalid())?;
        let g = u8::from_str_radix(&digits[2..4], 16).map_err(|_| invalid())?;
        let b = u8::from_str_radix(&digits[4..6], 16).map_err(|_| invalid())?;
        Ok(Self { r, g, b })
    }

    /// Serialize to lowercase hex `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Convert to `palette::Srgb<u8>`.
    pub fn to_srgb_u8(self) -> Srgb<u8> {
        Srgb::new(self.r, self.g, self.b)
    }

    /// Convert to HSL (for family classification).
    pub fn to_hsl(self) -> Hsl {
        let srgb_f32: Srgb<f32> = self.to_srgb_u8().into_format();
        srgb_f32.into_color()
    }

    /// Equal channels carry no hue information.
    pub fn is_achromatic(self) -> bool {
        self.r == self.g && self.g == self.b
    }

    /// Clamp an Srgb<f32> to [0, 1] and convert to Color.
    pub(crate) fn from_srgb_f32_clamped(srgb: Srgb<f32>) -> Self {
        let r = (srgb.red.clamp(0.0, 1.0) * 255.0).round() as u8;
        let g = (srgb.green.clamp(0.0, 1.0) * 255.0).round() as u8;
        let b = (srgb.blue.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self { r, g, b }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };

    #[test]
    fn hex_round_trip() {
        let original = Color::from_hex("#ff8800").unwrap();
        assert_eq!(original.r, 255);
        assert_eq!(original.g, 136);
        assert_eq!(original.b, 0);
        assert_eq!(original.to_hex(), "#ff8800");
    }

    #[test]
    fn hex_uppercase_input() {
        let color = Color::from_hex("#FF8800").unwrap();
        assert_eq!(color.to_hex(), "#ff8800");
    }

    #[test]
    fn hex_without_hash() {
        let color = Color::from_hex("aabbcc").unwrap();
        assert_eq!(color.to_hex(), "#aabbcc");
    }

    #[test]
    fn hex_invalid_length() {
        assert_eq!(Color::from_hex("#fff"), Err(ParseHexError::Length(3)));
        assert_eq!(Color::from_hex(""), Err(ParseHexError::Length(0)));
        assert!(Color::from_hex("#aabbccdd").is_err());
    }

    #[test]
    fn hex_invalid_chars() {
        assert_eq!(
            Color::from_hex("#gggggg"),
            Err(ParseHexError::Digit("gggggg".to_owned()))
        );
    }

    #[test]
    fn hex_rejects_sign_characters() {
        // from_str_radix would accept a leading `+`; the codec must not.
        assert!(Color::from_hex("+12345").is_err());
        assert!(Color::from_hex("-12345").is_err());
    }

    #[test]
    fn hex_rejects_multibyte_input() {
        assert!(Color::from_hex("ééé").is_err());
    }

    #[test]
    fn hex_extremes() {
        assert_eq!(Color::from_hex("#000000").unwrap(), BLACK);
        assert_eq!(Color::from_hex("#ffffff").unwrap(), WHITE);
    }

    #[test]
    fn hsl_pure_red() {
        let hsl = Color::new(255, 0, 0).to_hsl();
        assert!(hsl.hue.into_positive_degrees().abs() < 0.01);
        assert!((hsl.saturation - 1.0).abs() < 0.001);
        assert!((hsl.lightness - 0.5).abs() < 0.001);
    }

    #[test]
    fn hsl_pure_green() {
        let hsl = Color::new(0, 255, 0).to_hsl();
        assert!((hsl.hue.into_positive_degrees() - 120.0).abs() < 0.01);
    }

    #[test]
    fn hsl_gray_has_no_saturation() {
        let gray = Color::new(128, 128, 128);
        assert!(gray.is_achromatic());
        let hsl = gray.to_hsl();
        assert!(hsl.saturation < 1e-6);
        assert!((hsl.lightness - 0.502).abs() < 0.001);
    }

    #[test]
    fn achromatic_detection() {
        assert!(BLACK.is_achromatic());
        assert!(WHITE.is_achromatic());
        assert!(!Color::new(255, 254, 255).is_achromatic());
    }

    #[test]
    fn clamped_conversion_rounds() {
        use palette::Srgb;
        let color = Color::from_srgb_f32_clamped(Srgb::new(1.2, -0.3, 0.5));
        assert_eq!(color, Color::new(255, 0, 128));
    }

    #[test]
    fn display_matches_to_hex() {
        let color = Color::new(171, 205, 239);
        assert_eq!(format!("{color}"), color.to_hex());
    }
}
