//! Nearby point-of-interest search against an Overpass API interpreter.

use std::collections::HashMap;
use std::future::Future;

use mapslink_core::{Coordinates, NameSource, PlaceCandidate, ResolverConfig};
use reqwest::{Client, Url};
use serde::Deserialize;

use crate::distance::haversine_m;
use crate::error::LookupError;
use crate::http::{build_client, parse_endpoint};
use crate::road::looks_like_road;
use crate::sanitize::sanitize_text;

/// Spatial query seam used by [`crate::NameResolver`].
pub trait PoiSearch {
    /// The closest named, non-road feature within `radius_m` of `at`.
    fn nearest_poi(
        &self,
        at: Coordinates,
        radius_m: u32,
    ) -> impl Future<Output = Result<Option<PlaceCandidate>, LookupError>>;
}

#[derive(Debug, Default, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Default, Deserialize)]
struct OverpassElement {
    #[serde(default, rename = "type")]
    kind: String,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
    #[serde(default)]
    center: Option<OverpassCenter>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
struct OverpassCenter {
    lat: Option<f64>,
    lon: Option<f64>,
}

impl OverpassElement {
    /// Nodes carry their own position; ways and relations their centroid.
    fn position(&self) -> Option<Coordinates> {
        let (lat, lon) = if self.kind == "node" {
            (self.lat, self.lon)
        } else {
            let center = self.center.as_ref()?;
            (center.lat, center.lon)
        };
        Some(Coordinates::new(lat?, lon?))
    }
}

/// Overpass QL for every named node/way/relation within `radius_m`.
fn build_query(at: Coordinates, radius_m: u32) -> String {
    let around = format!("around:{radius_m},{},{}", at.lat, at.lon);
    format!(
        "[out:json][timeout:20];\n(\n  node({around})[name];\n  way({around})[name];\n  relation({around})[name];\n);\nout center tags;"
    )
}

/// Picks the closest qualifying element. Elements tagged `highway`, with a
/// road-like or empty name, or without a position are skipped. On equal
/// distance the first element wins.
fn select_nearest(elements: &[OverpassElement], origin: Coordinates) -> Option<PlaceCandidate> {
    elements
        .iter()
        .filter_map(|element| {
            let raw_name = element.tags.get("name")?;
            let name = sanitize_text(raw_name);
            if name.is_empty() || element.tags.contains_key("highway") || looks_like_road(&name) {
                return None;
            }
            let distance = haversine_m(origin, element.position()?);
            Some((distance, name))
        })
        .min_by(|(a, _), (b, _)| a.total_cmp(b))
        .map(|(distance, name)| {
            PlaceCandidate::new(name, NameSource::NearbyPoi).with_distance(distance)
        })
}

/// Client for the Overpass API `interpreter` endpoint.
pub struct OverpassClient {
    client: Client,
    endpoint: Url,
}

impl OverpassClient {
    /// # Errors
    ///
    /// Returns [`LookupError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`LookupError::InvalidEndpoint`] if the configured
    /// endpoint is not a URL.
    pub fn new(config: &ResolverConfig) -> Result<Self, LookupError> {
        Ok(Self {
            client: build_client(config.poi_timeout_secs, &config.contact_user_agent)?,
            endpoint: parse_endpoint(&config.overpass_url)?,
        })
    }
}

impl PoiSearch for OverpassClient {
    async fn nearest_poi(
        &self,
        at: Coordinates,
        radius_m: u32,
    ) -> Result<Option<PlaceCandidate>, LookupError> {
        let query = build_query(at, radius_m);
        let response = self
            .client
            .post(self.endpoint.clone())
            .form(&[("data", query.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.endpoint.to_string(),
            });
        }

        let body = response.text().await?;
        let parsed = serde_json::from_str::<OverpassResponse>(&body).map_err(|e| {
            LookupError::Deserialize {
                context: format!("overpass around {},{}", at.lat, at.lon),
                source: e,
            }
        })?;

        tracing::debug!(
            lat = at.lat,
            lon = at.lon,
            elements = parsed.elements.len(),
            "overpass returned named features"
        );

        Ok(select_nearest(&parsed.elements, at))
    }
}
