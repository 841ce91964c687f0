//! Reverse geocoding against a Nominatim `/reverse` endpoint.

use std::collections::HashMap;
use std::future::Future;

use mapslink_core::{Coordinates, ResolverConfig};
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::error::LookupError;
use crate::http::{build_client, parse_endpoint};
use crate::sanitize::sanitize_text;

/// Name and `category:type` tag for a point.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReverseGeocodeHit {
    pub name: Option<String>,
    /// e.g. `"highway:residential"` or `"amenity:restaurant"`.
    pub category: Option<String>,
}

impl ReverseGeocodeHit {
    /// `true` when the point itself is classified as a road.
    #[must_use]
    pub fn is_highway(&self) -> bool {
        self.category
            .as_deref()
            .is_some_and(|c| c.starts_with("highway"))
    }
}

/// Point lookup seam used by [`crate::NameResolver`].
pub trait ReverseGeocode {
    fn reverse(
        &self,
        at: Coordinates,
    ) -> impl Future<Output = Result<ReverseGeocodeHit, LookupError>>;
}

#[derive(Debug, Default, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    namedetails: Option<HashMap<String, String>>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    class: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
}

impl ReverseResponse {
    fn into_hit(self) -> ReverseGeocodeHit {
        let local_name = self.namedetails.and_then(|mut names| names.remove("name"));
        let name = [local_name, self.name, self.display_name]
            .into_iter()
            .flatten()
            .find(|candidate| !candidate.trim().is_empty())
            .map(|raw| sanitize_text(&raw))
            .filter(|clean| !clean.is_empty());

        let class = self
            .category
            .filter(|c| !c.is_empty())
            .or(self.class.filter(|c| !c.is_empty()));
        let kind = self.kind.filter(|k| !k.is_empty());
        let category = match (class, kind) {
            (Some(class), Some(kind)) => Some(format!("{class}:{kind}")),
            (class, kind) => class.or(kind),
        };

        ReverseGeocodeHit { name, category }
    }
}

/// Client for Nominatim reverse geocoding (`format=jsonv2`).
pub struct NominatimClient {
    client: Client,
    endpoint: Url,
    language: String,
    zoom: u8,
}

impl NominatimClient {
    /// # Errors
    ///
    /// Returns [`LookupError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`LookupError::InvalidEndpoint`] if the configured
    /// endpoint is not a URL.
    pub fn new(config: &ResolverConfig) -> Result<Self, LookupError> {
        Ok(Self {
            client: build_client(config.geocode_timeout_secs, &config.contact_user_agent)?,
            endpoint: parse_endpoint(&config.nominatim_url)?,
            language: config.geocode_language.clone(),
            zoom: config.geocode_zoom,
        })
    }

    fn reverse_url(&self, at: Coordinates) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("lat", &at.lat.to_string())
            .append_pair("lon", &at.lon.to_string())
            .append_pair("format", "jsonv2")
            .append_pair("addressdetails", "1")
            .append_pair("namedetails", "1")
            .append_pair("accept-language", &self.language)
            .append_pair("zoom", &self.zoom.to_string());
        url
    }
}

impl ReverseGeocode for NominatimClient {
    async fn reverse(&self, at: Coordinates) -> Result<ReverseGeocodeHit, LookupError> {
        let url = self.reverse_url(at);
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let parsed = serde_json::from_str::<ReverseResponse>(&body).map_err(|e| {
            LookupError::Deserialize {
                context: format!("reverse geocode at {},{}", at.lat, at.lon),
                source: e,
            }
        })?;

        Ok(parsed.into_hit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit_from(json: serde_json::Value) -> ReverseGeocodeHit {
        serde_json::from_value::<ReverseResponse>(json)
            .unwrap()
            .into_hit()
    }

    #[test]
    fn prefers_namedetails_name() {
        let hit = hit_from(serde_json::json!({
            "namedetails": { "name": "Padaria  Central", "name:en": "Central Bakery" },
            "name": "Other",
            "display_name": "Padaria Central, Rua X, São Paulo",
            "category": "shop",
            "type": "bakery"
        }));
        assert_eq!(hit.name.as_deref(), Some("Padaria Central"));
        assert_eq!(hit.category.as_deref(), Some("shop:bakery"));
        assert!(!hit.is_highway());
    }

    #[test]
    fn falls_back_to_name_then_display_name() {
        let hit = hit_from(serde_json::json!({ "namedetails": {}, "name": "Museu" }));
        assert_eq!(hit.name.as_deref(), Some("Museu"));

        let hit = hit_from(serde_json::json!({ "name": "", "display_name": "500, Rua X, SP" }));
        assert_eq!(hit.name.as_deref(), Some("500, Rua X, SP"));
    }

    #[test]
    fn legacy_class_field_is_used_without_category() {
        let hit = hit_from(serde_json::json!({ "class": "highway", "type": "residential" }));
        assert_eq!(hit.category.as_deref(), Some("highway:residential"));
        assert!(hit.is_highway());
    }

    #[test]
    fn category_with_only_one_part() {
        let hit = hit_from(serde_json::json!({ "category": "highway" }));
        assert_eq!(hit.category.as_deref(), Some("highway"));
        let hit = hit_from(serde_json::json!({ "type": "yes" }));
        assert_eq!(hit.category.as_deref(), Some("yes"));
    }

    #[test]
    fn error_payload_yields_empty_hit() {
        let hit = hit_from(serde_json::json!({ "error": "Unable to geocode" }));
        assert_eq!(hit, ReverseGeocodeHit::default());
    }

    #[test]
    fn reverse_url_carries_query_parameters() {
        let config = ResolverConfig::default();
        let client = NominatimClient::new(&config).unwrap();
        let url = client.reverse_url(Coordinates::new(-23.5, -46.6));
        let pairs: HashMap<String, String> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs["lat"], "-23.5");
        assert_eq!(pairs["lon"], "-46.6");
        assert_eq!(pairs["format"], "jsonv2");
        assert_eq!(pairs["namedetails"], "1");
        assert_eq!(pairs["accept-language"], "pt-BR");
        assert_eq!(pairs["zoom"], "18");
    }
}
