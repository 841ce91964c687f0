//! Keyword heuristic for names that denote a street or highway rather than a
//! point of interest.
//!
//! Keywords are Portuguese; names in other languages are not recognised, and
//! businesses named after a street ("Rua Bonita Café") match as roads.

/// Lowercase substrings marking a road-like name. Abbreviations include their
/// trailing punctuation or space to reduce accidental matches.
const ROAD_KEYWORDS: &[&str] = &[
    "rodovia", "estrada", "avenida", "rua", "acesso", "br-", "br ", "alça", "linha", "viaduto",
    "trevo", "marginal", "r.", "av.", "km ",
];

/// Returns `true` when `name` looks like a road, highway or access way.
#[must_use]
pub fn looks_like_road(name: &str) -> bool {
    let lowered = name.trim().to_lowercase();
    ROAD_KEYWORDS.iter().any(|keyword| lowered.contains(keyword))
}
