//! Prioritized place-name resolution.
//!
//! Decision order:
//! 1. A usable URL-derived name wins outright, with no network calls.
//! 2. Without coordinates nothing else can be looked up: [`UNAVAILABLE`].
//! 3. Reverse geocode the point.
//!    - A non-road name on a point classified `highway:*` is a street name
//!      in disguise, so a nearby POI is preferred, falling back to it.
//!    - Any other non-road name is returned.
//! 4. Otherwise search for a nearby POI.
//! 5. Otherwise return whatever the geocoder said, or [`UNAVAILABLE`].

use mapslink_core::{Coordinates, NameSource, PlaceCandidate, ResolverConfig, UNAVAILABLE};

use crate::geocode::{ReverseGeocode, ReverseGeocodeHit};
use crate::pacing::Pacing;
use crate::poi::PoiSearch;
use crate::road::looks_like_road;

/// Combines URL names, reverse geocoding and nearby-POI search into one
/// non-empty name.
pub struct NameResolver<G, P> {
    geocoder: G,
    poi: P,
    pacing: Pacing,
    poi_radius_m: u32,
}

impl<G, P> NameResolver<G, P>
where
    G: ReverseGeocode,
    P: PoiSearch,
{
    pub fn new(geocoder: G, poi: P, pacing: Pacing, poi_radius_m: u32) -> Self {
        Self {
            geocoder,
            poi,
            pacing,
            poi_radius_m,
        }
    }

    pub fn from_config(geocoder: G, poi: P, config: &ResolverConfig) -> Self {
        Self::new(geocoder, poi, Pacing::from_config(config), config.poi_radius_m)
    }

    /// Resolves the final display name for a link. Never returns an empty
    /// string.
    pub async fn resolve(&self, coordinates: Option<Coordinates>, url_name: Option<&str>) -> String {
        self.resolve_candidate(coordinates, url_name)
            .await
            .map(|candidate| candidate.name)
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| UNAVAILABLE.to_string())
    }

    /// Same as [`Self::resolve`] but keeps track of which source won.
    /// `None` means nothing was found at all.
    pub async fn resolve_candidate(
        &self,
        coordinates: Option<Coordinates>,
        url_name: Option<&str>,
    ) -> Option<PlaceCandidate> {
        if let Some(name) = url_name.filter(|n| !n.trim().is_empty() && !looks_like_road(n)) {
            return Some(PlaceCandidate::new(name, NameSource::Url));
        }

        let at = coordinates?;

        let hit = self.reverse_geocode(at).await;
        if let Some(name) = hit.name.as_deref().filter(|n| !looks_like_road(n)) {
            let geocoded = PlaceCandidate::new(name, NameSource::ReverseGeocode);
            if hit.is_highway() {
                tracing::debug!(
                    name,
                    category = hit.category.as_deref(),
                    "geocoded point sits on a highway; looking for a nearby POI"
                );
                return Some(self.nearby_poi(at).await.unwrap_or(geocoded));
            }
            return Some(geocoded);
        }

        if let Some(poi) = self.nearby_poi(at).await {
            return Some(poi);
        }

        hit.name
            .map(|name| PlaceCandidate::new(name, NameSource::ReverseGeocode))
    }

    async fn reverse_geocode(&self, at: Coordinates) -> ReverseGeocodeHit {
        let result = self.geocoder.reverse(at).await;
        self.pacing.after_lookup().await;

        result.unwrap_or_else(|e| {
            tracing::warn!(
                lat = at.lat,
                lon = at.lon,
                kind = e.kind(),
                error = %e,
                "reverse geocode failed"
            );
            ReverseGeocodeHit::default()
        })
    }

    async fn nearby_poi(&self, at: Coordinates) -> Option<PlaceCandidate> {
        let result = self.poi.nearest_poi(at, self.poi_radius_m).await;
        self.pacing.after_lookup().await;

        match result {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(
                    lat = at.lat,
                    lon = at.lon,
                    kind = e.kind(),
                    error = %e,
                    "nearby POI search failed"
                );
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
