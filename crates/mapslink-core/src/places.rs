//! Place-resolution domain types shared by the resolver pipeline and the CLI.

/// Name written when nothing better could be resolved for a link.
pub const UNAVAILABLE: &str = "(unavailable)";

/// A latitude/longitude pair in decimal degrees.
///
/// Values are taken as parsed; range is not validated because upstream URLs
/// occasionally carry garbage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// One input link together with the URL it resolved to, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    pub original: String,
    pub resolved: Option<String>,
}

impl LinkRecord {
    #[must_use]
    pub fn new(original: impl Into<String>, resolved: Option<String>) -> Self {
        Self {
            original: original.into(),
            resolved,
        }
    }

    /// The URL further extraction should run against: the resolved URL when
    /// present, otherwise the original link text.
    #[must_use]
    pub fn effective_url(&self) -> &str {
        self.resolved.as_deref().unwrap_or(&self.original)
    }
}

/// Where a candidate name came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameSource {
    /// Embedded in the `/place/<name>/` path segment of the map URL.
    Url,
    /// Returned by the reverse geocoder for the link's coordinates.
    ReverseGeocode,
    /// The closest named feature found by the nearby-POI search.
    NearbyPoi,
}

/// A candidate place name produced while resolving a link.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceCandidate {
    pub name: String,
    pub source: NameSource,
    /// Distance in meters from the query point; only set for POI candidates.
    pub distance_m: Option<f64>,
}

impl PlaceCandidate {
    #[must_use]
    pub fn new(name: impl Into<String>, source: NameSource) -> Self {
        Self {
            name: name.into(),
            source,
            distance_m: None,
        }
    }

    #[must_use]
    pub fn with_distance(mut self, distance_m: f64) -> Self {
        self.distance_m = Some(distance_m);
        self
    }
}

/// Final per-link output record.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceResult {
    pub name: String,
    pub coordinates: Option<Coordinates>,
    pub link: String,
}

impl PlaceResult {
    /// Builds a result, substituting [`UNAVAILABLE`] for a blank name.
    #[must_use]
    pub fn new(name: impl Into<String>, coordinates: Option<Coordinates>, link: impl Into<String>) -> Self {
        let name = name.into();
        let name = if name.trim().is_empty() {
            UNAVAILABLE.to_string()
        } else {
            name
        };
        Self {
            name,
            coordinates,
            link: link.into(),
        }
    }

    /// Result for a link where nothing could be resolved.
    #[must_use]
    pub fn unavailable(link: impl Into<String>) -> Self {
        Self::new(UNAVAILABLE, None, link)
    }

    #[must_use]
    pub fn latitude(&self) -> Option<f64> {
        self.coordinates.map(|c| c.lat)
    }

    #[must_use]
    pub fn longitude(&self) -> Option<f64> {
        self.coordinates.map(|c| c.lon)
    }

    /// `true` when the link yielded a coordinate pair.
    #[must_use]
    pub fn is_located(&self) -> bool {
        self.coordinates.is_some()
    }
}

/// Formats a coordinate with two decimals and `.` as separator, or an empty
/// string when absent.
#[must_use]
pub fn format_coordinate(value: Option<f64>) -> String {
    value.map_or_else(String::new, |v| format!("{v:.2}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_coordinate_pads_to_two_decimals() {
        assert_eq!(format_coordinate(Some(-23.5)), "-23.50");
        assert_eq!(format_coordinate(Some(12.345_6)), "12.35");
    }

    #[test]
    fn format_coordinate_absent_is_empty() {
        assert_eq!(format_coordinate(None), "");
    }

    #[test]
    fn blank_name_becomes_sentinel() {
        let result = PlaceResult::new("   ", None, "https://maps.app.goo.gl/x");
        assert_eq!(result.name, UNAVAILABLE);
    }

    #[test]
    fn result_exposes_both_coordinates_or_neither() {
        let located = PlaceResult::new("Cafe", Some(Coordinates::new(1.0, 2.0)), "l");
        assert_eq!(located.latitude(), Some(1.0));
        assert_eq!(located.longitude(), Some(2.0));
        assert!(located.is_located());

        let missing = PlaceResult::unavailable("l");
        assert_eq!(missing.latitude(), None);
        assert_eq!(missing.longitude(), None);
        assert!(!missing.is_located());
    }

    #[test]
    fn effective_url_prefers_resolved() {
        let record = LinkRecord::new("short", Some("long".to_string()));
        assert_eq!(record.effective_url(), "long");
        let record = LinkRecord::new("short", None);
        assert_eq!(record.effective_url(), "short");
    }
}
