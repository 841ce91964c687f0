//! Latitude/longitude extraction from Google Maps URLs.
//!
//! Tries each [`CoordinatePattern`] in [`CoordinatePattern::PRIORITY`] order
//! and returns the first match. Every pattern yields both values or neither.

use std::sync::LazyLock;

use mapslink_core::Coordinates;
use regex::Regex;
use reqwest::Url;

static AT_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@(-?\d+(?:\.\d+)?),\s*(-?\d+(?:\.\d+)?)").expect("valid regex")
});

static LAT_DIRECTIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!3d(-?\d+(?:\.\d+)?)").expect("valid regex"));

static LON_DIRECTIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!4d(-?\d+(?:\.\d+)?)").expect("valid regex"));

static LAT_LON_PAIR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(-?\d+(?:\.\d+)?),\s*(-?\d+(?:\.\d+)?)").expect("valid regex")
});

/// One way Google Maps encodes a location in a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinatePattern {
    /// `.../@<lat>,<lon>,<zoom>z/...`
    AtPath,
    /// `...!3d<lat>...!4d<lon>...` data directives.
    DataDirectives,
    /// `?q=<lat>,<lon>` or `?query=<lat>,<lon>`.
    QueryParam,
}

impl CoordinatePattern {
    pub const PRIORITY: [Self; 3] = [Self::AtPath, Self::DataDirectives, Self::QueryParam];

    /// Applies this single pattern to `url`.
    #[must_use]
    pub fn extract(self, url: &str) -> Option<Coordinates> {
        match self {
            Self::AtPath => pair_from_captures(&AT_PATH_RE, url),
            Self::DataDirectives => {
                let lat = first_number(&LAT_DIRECTIVE_RE, url)?;
                let lon = first_number(&LON_DIRECTIVE_RE, url)?;
                Some(Coordinates::new(lat, lon))
            }
            Self::QueryParam => query_values(url)
                .iter()
                .find_map(|value| pair_from_captures(&LAT_LON_PAIR_RE, value)),
        }
    }
}

/// Extracts coordinates from `url`, trying patterns in priority order.
///
/// Returns `None` when no pattern matches or every match fails to parse.
#[must_use]
pub fn extract_coordinates(url: &str) -> Option<Coordinates> {
    CoordinatePattern::PRIORITY
        .iter()
        .find_map(|pattern| pattern.extract(url))
}

fn pair_from_captures(re: &Regex, haystack: &str) -> Option<Coordinates> {
    let caps = re.captures(haystack)?;
    let lat = caps.get(1)?.as_str().parse::<f64>().ok()?;
    let lon = caps.get(2)?.as_str().parse::<f64>().ok()?;
    Some(Coordinates::new(lat, lon))
}

fn first_number(re: &Regex, haystack: &str) -> Option<f64> {
    re.captures(haystack)?.get(1)?.as_str().parse::<f64>().ok()
}

/// Non-empty `q` values, or `query` values when there is no `q`.
fn query_values(url: &str) -> Vec<String> {
    let Ok(parsed) = Url::parse(url) else {
        return Vec::new();
    };

    let values_for = |key: &str| -> Vec<String> {
        parsed
            .query_pairs()
            .filter(|(k, v)| k == key && !v.is_empty())
            .map(|(_, v)| v.into_owned())
            .collect()
    };

    let q = values_for("q");
    if q.is_empty() {
        values_for("query")
    } else {
        q
    }
}
