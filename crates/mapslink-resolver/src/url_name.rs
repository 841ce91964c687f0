//! Place name embedded in a `/maps/place/<name>/...` URL path.

use std::sync::LazyLock;

use percent_encoding::percent_decode_str;
use regex::Regex;
use reqwest::Url;

use crate::road::looks_like_road;
use crate::sanitize::sanitize_text;

/// A bare `lat,lon` pair (optionally `@`-prefixed) at the start of the
/// segment: the map encoded a dropped pin instead of a name.
static COORDINATE_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@?-?\d+(?:\.\d+)?,\s*-?\d+(?:\.\d+)?").expect("valid regex")
});

/// Returns the decoded, sanitized segment following the first `place`
/// segment of the URL path.
///
/// Returns `None` when the URL does not parse, has no `place` segment or no
/// segment after it, or when the candidate is empty, a coordinate pair, or
/// looks like a road.
#[must_use]
pub fn extract_url_name(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let mut segments = parsed.path_segments()?.filter(|s| !s.is_empty());

    segments.by_ref().find(|segment| *segment == "place")?;
    let raw = segments.next()?;

    let decoded = percent_decode_str(raw).decode_utf8_lossy();
    let name = sanitize_text(&decoded);

    if name.is_empty() || COORDINATE_NAME_RE.is_match(&name) || looks_like_road(&name) {
        tracing::debug!(url, candidate = %name, "rejected URL place segment");
        return None;
    }

    Some(name)
}
