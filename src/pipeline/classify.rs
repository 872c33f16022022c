use crate::color::{self, Color};

/// Closed set of family labels the classifier can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorFamily {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Pink,
    Brown,
    Gray,
    Black,
    White,
    NudesNeutrals,
    Unknown,
}

impl ColorFamily {
    /// Canonical label, as stored in product records.
    pub fn label(self) -> &'static str {
        match self {
            ColorFamily::Red => "Red",
            ColorFamily::Orange => "Orange",
            ColorFamily::Yellow => "Yellow",
            ColorFamily::Green => "Green",
            ColorFamily::Blue => "Blue",
            ColorFamily::Purple => "Purple",
            ColorFamily::Pink => "Pink",
            ColorFamily::Brown => "Brown",
            ColorFamily::Gray => "Gray",
            ColorFamily::Black => "Black",
            ColorFamily::White => "White",
            ColorFamily::NudesNeutrals => "Nudes/Neutrals",
            ColorFamily::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for ColorFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Keywords scanned in product descriptions, in override priority order.
/// The first keyword found anywhere in the text decides the family.
const DESCRIPTION_KEYWORDS: [(&str, ColorFamily); 13] = [
    ("red", ColorFamily::Red),
    ("orange", ColorFamily::Orange),
    ("yellow", ColorFamily::Yellow),
    ("green", ColorFamily::Green),
    ("blue", ColorFamily::Blue),
    ("purple", ColorFamily::Purple),
    ("pink", ColorFamily::Pink),
    ("brown", ColorFamily::Brown),
    ("gray", ColorFamily::Gray),
    ("black", ColorFamily::Black),
    ("white", ColorFamily::White),
    ("nude", ColorFamily::NudesNeutrals),
    ("neutral", ColorFamily::NudesNeutrals),
];

/// Resolve a family for a swatch hex, letting a free-text description
/// override the measured color.
///
/// Precedence: description keyword, then the `"N/A"` sentinel (which maps
/// to Nudes/Neutrals), then the HSL decision list. Never fails; hex strings
/// that parse as neither a color nor the sentinel come back as `Unknown`.
pub fn classify(hex: &str, description: Option<&str>) -> ColorFamily {
    if let Some(family) = description.and_then(keyword_match) {
        return family;
    }
    if hex == color::UNAVAILABLE {
        return ColorFamily::NudesNeutrals;
    }
    match Color::from_hex(hex) {
        Ok(color) => classify_color(color),
        Err(_) => ColorFamily::Unknown,
    }
}

/// Scan a description for the first matching keyword, in list order.
/// Matching is a case-insensitive substring test, so "Ruby Red" and
/// "reduced" both hit "red"; list order wins over position in the text.
fn keyword_match(description: &str) -> Option<ColorFamily> {
    let text = description.to_lowercase();
    DESCRIPTION_KEYWORDS
        .into_iter()
        .find_map(|(keyword, family)| text.contains(keyword).then_some(family))
}

/// Assign a family from hue, saturation and lightness.
///
/// The rules form an ordered list and the first match wins, so earlier
/// rules shadow later ones. Pixels with equal channels have no hue and
/// skip every hue-ranged rule.
pub fn classify_color(color: Color) -> ColorFamily {
    let hsl = color.to_hsl();
    let saturation = hsl.saturation;
    let lightness = hsl.lightness;
    let hue = (!color.is_achromatic()).then(|| hsl.hue.into_positive_degrees());
    let hue_in = |lo: f32, hi: f32| hue.is_some_and(|h| h >= lo && h < hi);

    let rules = [
        (hue.is_some_and(|h| h < 2.0), ColorFamily::Red),
        (hue_in(2.0, 39.0), ColorFamily::Orange),
        (hue_in(320.0, 340.0) && saturation > 0.3, ColorFamily::Pink),
        (lightness > 0.85 && saturation < 0.15, ColorFamily::White),
        (lightness < 0.15, ColorFamily::Black),
        (
            saturation < 0.10 && lightness > 0.2 && lightness < 0.85,
            ColorFamily::Gray,
        ),
        (
            saturation < 0.18 && lightness >= 0.75,
            ColorFamily::NudesNeutrals,
        ),
        (hue_in(300.0, 320.0), ColorFamily::Pink),
        (hue_in(40.0, 80.0), ColorFamily::Yellow),
        (hue_in(80.0, 170.0), ColorFamily::Green),
        (hue_in(170.0, 250.0), ColorFamily::Blue),
        (hue_in(250.0, 300.0), ColorFamily::Purple),
        (
            hue.is_some_and(|h| (15.0..=50.0).contains(&h)) && saturation < 0.5 && lightness < 0.5,
            ColorFamily::Brown,
        ),
    ];

    rules
        .into_iter()
        .find_map(|(matched, family)| matched.then_some(family))
        .unwrap_or(ColorFamily::Brown)
}
