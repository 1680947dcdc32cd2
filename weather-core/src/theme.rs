//! Condition → background and icon code → glyph lookup tables.

/// An sRGB colour stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Background gradient family chosen from the primary condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backdrop {
    Clear,
    Clouds,
    Rain,
    Thunderstorm,
    Snow,
    Mist,
    Default,
}

const BACKDROPS: &[(&str, Backdrop)] = &[
    ("clear", Backdrop::Clear),
    ("clouds", Backdrop::Clouds),
    ("rain", Backdrop::Rain),
    ("drizzle", Backdrop::Rain),
    ("thunderstorm", Backdrop::Thunderstorm),
    ("snow", Backdrop::Snow),
    ("mist", Backdrop::Mist),
    ("fog", Backdrop::Mist),
    ("haze", Backdrop::Mist),
];

impl Backdrop {
    /// Case-insensitive lookup; unknown conditions get [`Backdrop::Default`].
    pub fn for_condition(condition: &str) -> Self {
        let condition = condition.trim();
        BACKDROPS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(condition))
            .map(|&(_, backdrop)| backdrop)
            .unwrap_or(Backdrop::Default)
    }

    /// Gradient start and end colours.
    pub fn gradient(&self) -> (Rgb, Rgb) {
        match self {
            Backdrop::Clear => (Rgb(253, 224, 71), Rgb(249, 115, 22)),
            Backdrop::Clouds | Backdrop::Mist => (Rgb(209, 213, 219), Rgb(107, 114, 128)),
            Backdrop::Rain => (Rgb(96, 165, 250), Rgb(29, 78, 216)),
            Backdrop::Thunderstorm => (Rgb(168, 85, 247), Rgb(107, 33, 168)),
            Backdrop::Snow => (Rgb(219, 234, 254), Rgb(147, 197, 253)),
            Backdrop::Default => (Rgb(96, 165, 250), Rgb(37, 99, 235)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Backdrop::Clear => "clear",
            Backdrop::Clouds => "clouds",
            Backdrop::Rain => "rain",
            Backdrop::Thunderstorm => "thunderstorm",
            Backdrop::Snow => "snow",
            Backdrop::Mist => "mist",
            Backdrop::Default => "default",
        }
    }
}

const DEFAULT_GLYPH: &str = "☁";

const ICON_GLYPHS: &[(&str, &str)] = &[
    ("01d", "☀"),
    ("01n", "☀"),
    ("02d", "⛅"),
    ("02n", "⛅"),
    ("03d", "☁"),
    ("03n", "☁"),
    ("04d", "☁"),
    ("04n", "☁"),
    ("09d", "🌧"),
    ("09n", "🌧"),
    ("10d", "🌧"),
    ("10n", "🌧"),
    ("11d", "⛈"),
    ("11n", "⛈"),
    ("13d", "❄"),
    ("13n", "❄"),
    ("50d", "🌫"),
    ("50n", "🌫"),
];

/// Terminal glyph for an OpenWeather icon code.
pub fn icon_glyph(code: &str) -> &'static str {
    ICON_GLYPHS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|&(_, glyph)| glyph)
        .unwrap_or(DEFAULT_GLYPH)
}

/// Hosted 4x PNG for an icon code.
pub fn icon_url(code: &str) -> String {
    format!("https://openweathermap.org/img/wn/{code}@4x.png")
}
