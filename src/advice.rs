//! Weather icon and clothing advice derived from free-text descriptions.
//!
//! Descriptions arrive in English or French. Each classifier is an ordered
//! table of `(Condition, outcome)` rules evaluated against the lowercased
//! description and the temperature; the first matching rule wins and a fixed
//! fallback applies when nothing matches.

use crate::data::WeatherRecord;

// ============================================================================
// KEYWORD FAMILIES
// ============================================================================

/// Rain, showers and drizzle
pub const RAIN_WORDS: &[&str] = &[
    "pluie", "pluvieux", "averse", "bruine", "rain", "shower", "drizzle",
];

/// Sunny or clear sky
pub const SUN_WORDS: &[&str] = &[
    "soleil",
    "ensoleillé",
    "clair",
    "dégagé",
    "sun",
    "sunny",
    "clear",
];

/// Snow
pub const SNOW_WORDS: &[&str] = &["neige", "neigeux", "snow", "snowy"];

/// Wind, gusts and storms
pub const WIND_WORDS: &[&str] = &[
    "vent", "venteux", "tempête", "rafale", "wind", "windy", "storm", "gust",
];

/// Cloud cover
pub const CLOUD_WORDS: &[&str] = &[
    "nuage", "nuageux", "couvert", "cloud", "cloudy", "overcast",
];

/// Fog and mist
pub const FOG_WORDS: &[&str] = &["brouillard", "brume", "fog", "mist"];

/// Whole descriptions that always mean rain, compared after lowercasing
const RAIN_PHRASES: &[&str] = &["rain showers", "rain shower"];

/// Provider values that force the rain outcome, compared verbatim
const FORCED_RAIN_VALUES: &[&str] = &["Rain showers", "Rainy"];

/// Above this temperature sun advice turns to sunscreen
const SUNSCREEN_ABOVE: f64 = 25.0;

// ============================================================================
// RULE EVALUATION
// ============================================================================

/// A predicate over a lowercased description and a temperature in Celsius
#[derive(Debug, Clone, Copy)]
pub enum Condition {
    /// Description equals one of the phrases
    Equals(&'static [&'static str]),
    /// Description contains one of the keywords
    Mentions(&'static [&'static str]),
    /// Description contains one of the keywords and it is warmer than the bound
    MentionsAndWarmerThan(&'static [&'static str], f64),
    /// Temperature is strictly below the bound
    ColderThan(f64),
    /// Temperature is strictly above the bound
    WarmerThan(f64),
}

impl Condition {
    /// Evaluates the predicate; `description` must already be lowercase
    pub fn matches(&self, description: &str, temperature: f64) -> bool {
        match *self {
            Condition::Equals(phrases) => phrases.contains(&description),
            Condition::Mentions(words) => mentions(description, words),
            Condition::MentionsAndWarmerThan(words, bound) => {
                mentions(description, words) && temperature > bound
            }
            Condition::ColderThan(bound) => temperature < bound,
            Condition::WarmerThan(bound) => temperature > bound,
        }
    }
}

fn mentions(description: &str, words: &[&str]) -> bool {
    words.iter().any(|word| description.contains(word))
}

/// Returns the outcome of the first rule whose condition matches
fn first_match<T: Copy>(
    rules: &[(Condition, T)],
    description: &str,
    temperature: f64,
) -> Option<T> {
    rules
        .iter()
        .find(|(condition, _)| condition.matches(description, temperature))
        .map(|(_, outcome)| *outcome)
}

/// Lowercases a description, treating empty text as absent
fn normalize(description: Option<&str>) -> Option<String> {
    description
        .filter(|d| !d.is_empty())
        .map(|d| d.to_lowercase())
}

// ============================================================================
// WEATHER ICON
// ============================================================================

/// Icon category shown next to the temperature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherIcon {
    Rain,
    Cloud,
    Sun,
}

impl WeatherIcon {
    /// Terminal glyph for the icon
    pub fn glyph(&self) -> &'static str {
        match self {
            WeatherIcon::Rain => "\u{1F327}", // 🌧
            WeatherIcon::Cloud => "\u{2601}", // ☁
            WeatherIcon::Sun => "\u{2600}",   // ☀
        }
    }
}

const ICON_RULES: &[(Condition, WeatherIcon)] = &[
    (Condition::Equals(RAIN_PHRASES), WeatherIcon::Rain),
    (Condition::Mentions(RAIN_WORDS), WeatherIcon::Rain),
    (Condition::Mentions(CLOUD_WORDS), WeatherIcon::Cloud),
];

/// Picks the weather icon for a description.
///
/// Returns `None` when there is no description. Rain wins over cloud, and
/// anything else is sunny.
pub fn classify_icon(description: Option<&str>) -> Option<WeatherIcon> {
    let description = normalize(description)?;
    Some(first_match(ICON_RULES, &description, 0.0).unwrap_or(WeatherIcon::Sun))
}

// ============================================================================
// CLOTHING ADVICE
// ============================================================================

/// Clothing advice shown under the temperature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advice {
    NiceDay,
    BringUmbrella,
    Sunscreen,
    Sunglasses,
    DressVeryWarmly,
    StrongWind,
    VeryWarmCoat,
    WarmCoat,
    HydrateInShade,
    StayHydrated,
    WeatherMayChange,
    DriveCarefully,
    DressForTemperature,
}

impl Advice {
    /// Returns the text shown to the user
    pub fn message(&self) -> &'static str {
        match self {
            Advice::NiceDay => "Have a nice day!",
            Advice::BringUmbrella => "Bring your umbrella",
            Advice::Sunscreen => "Remember sunscreen",
            Advice::Sunglasses => "Wear sunglasses",
            Advice::DressVeryWarmly => "Dress very warmly",
            Advice::StrongWind => "Watch out for strong wind",
            Advice::VeryWarmCoat => "Wear a very warm coat",
            Advice::WarmCoat => "Wear a warm coat",
            Advice::HydrateInShade => "Stay hydrated and in the shade",
            Advice::StayHydrated => "Stay well hydrated",
            Advice::WeatherMayChange => "Weather may change, be prepared",
            Advice::DriveCarefully => "Drive carefully",
            Advice::DressForTemperature => "Dress according to the temperature",
        }
    }
}

// Keyword rules come before the temperature bands, so a cold rainy day gets
// the umbrella and never the coat.
const ADVICE_RULES: &[(Condition, Advice)] = &[
    (Condition::Mentions(RAIN_WORDS), Advice::BringUmbrella),
    (
        Condition::MentionsAndWarmerThan(SUN_WORDS, SUNSCREEN_ABOVE),
        Advice::Sunscreen,
    ),
    (Condition::Mentions(SUN_WORDS), Advice::Sunglasses),
    (Condition::Mentions(SNOW_WORDS), Advice::DressVeryWarmly),
    (Condition::Mentions(WIND_WORDS), Advice::StrongWind),
    (Condition::ColderThan(5.0), Advice::VeryWarmCoat),
    (Condition::ColderThan(10.0), Advice::WarmCoat),
    (Condition::WarmerThan(30.0), Advice::HydrateInShade),
    (Condition::WarmerThan(28.0), Advice::StayHydrated),
    (Condition::Mentions(CLOUD_WORDS), Advice::WeatherMayChange),
    (Condition::Mentions(FOG_WORDS), Advice::DriveCarefully),
];

/// Picks clothing advice for a description and a temperature in Celsius.
///
/// An absent or empty description short-circuits to [`Advice::NiceDay`]
/// before any temperature rule is considered.
pub fn classify_advice(description: Option<&str>, temperature: f64) -> Advice {
    let Some(description) = normalize(description) else {
        return Advice::NiceDay;
    };
    first_match(ADVICE_RULES, &description, temperature).unwrap_or(Advice::DressForTemperature)
}

/// Small glyph shown beside the advice text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdviceGlyph {
    Rain,
    Sun,
    Clothing,
}

impl AdviceGlyph {
    pub fn glyph(&self) -> &'static str {
        match self {
            AdviceGlyph::Rain => "\u{2602}",       // ☂
            AdviceGlyph::Sun => "\u{263C}",        // ☼
            AdviceGlyph::Clothing => "\u{1F455}", // 👕
        }
    }
}

// Heat alone selects the sun glyph even though the advice text only looks at
// temperature after every keyword rule has failed.
const ADVICE_GLYPH_RULES: &[(Condition, AdviceGlyph)] = &[
    (Condition::Mentions(RAIN_WORDS), AdviceGlyph::Rain),
    (Condition::Mentions(SUN_WORDS), AdviceGlyph::Sun),
    (Condition::WarmerThan(SUNSCREEN_ABOVE), AdviceGlyph::Sun),
];

/// Picks the advice glyph; `None` when there is no description
pub fn classify_advice_glyph(description: Option<&str>, temperature: f64) -> Option<AdviceGlyph> {
    let description = normalize(description)?;
    Some(
        first_match(ADVICE_GLYPH_RULES, &description, temperature)
            .unwrap_or(AdviceGlyph::Clothing),
    )
}

/// Whether the raw alternate description forces the rain outcome.
///
/// Case-sensitive and exact: `"Rain showers"` and `"Rainy"` only.
pub fn is_forced_rain(alternate_description: Option<&str>) -> bool {
    alternate_description.is_some_and(|value| FORCED_RAIN_VALUES.contains(&value))
}

// ============================================================================
// PER-RECORD PRESENTATION
// ============================================================================

/// Everything the weather card derives from a record
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    /// Description shown under the temperature
    pub description: Option<String>,
    pub icon: Option<WeatherIcon>,
    pub advice: Advice,
    pub advice_glyph: Option<AdviceGlyph>,
}

impl Forecast {
    /// Classifies a record, applying the forced-rain override first
    pub fn for_record(record: &WeatherRecord) -> Self {
        let description = record.effective_description();

        if is_forced_rain(record.alternate_description.as_deref()) {
            return Self {
                description: description.map(str::to_string),
                icon: Some(WeatherIcon::Rain),
                advice: Advice::BringUmbrella,
                advice_glyph: Some(AdviceGlyph::Rain),
            };
        }

        Self {
            description: description.map(str::to_string),
            icon: classify_icon(description),
            advice: classify_advice(description, record.temperature),
            advice_glyph: classify_advice_glyph(description, record.temperature),
        }
    }
}
