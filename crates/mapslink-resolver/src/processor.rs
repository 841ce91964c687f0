//! Per-link driver: redirect → coordinates → URL name → final name.

use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use mapslink_core::{LinkRecord, PlaceResult, ResolverConfig};

use crate::coords::extract_coordinates;
use crate::error::LookupError;
use crate::geocode::{NominatimClient, ReverseGeocode};
use crate::poi::{OverpassClient, PoiSearch};
use crate::redirect::RedirectResolver;
use crate::resolver::NameResolver;
use crate::url_name::extract_url_name;

pub struct LinkProcessor<G, P> {
    redirects: RedirectResolver,
    names: NameResolver<G, P>,
}

impl LinkProcessor<NominatimClient, OverpassClient> {
    /// Builds the production pipeline against the configured endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] if an HTTP client cannot be built or an
    /// endpoint URL is invalid.
    pub fn from_config(config: &ResolverConfig) -> Result<Self, LookupError> {
        let names = NameResolver::from_config(
            NominatimClient::new(config)?,
            OverpassClient::new(config)?,
            config,
        );
        Ok(Self::new(RedirectResolver::new(config)?, names))
    }
}

impl<G, P> LinkProcessor<G, P>
where
    G: ReverseGeocode,
    P: PoiSearch,
{
    pub fn new(redirects: RedirectResolver, names: NameResolver<G, P>) -> Self {
        Self { redirects, names }
    }

    /// Produces exactly one [`PlaceResult`] for `link`.
    ///
    /// A panic anywhere in the pipeline is contained here and reported as an
    /// unavailable result so one bad link cannot abort a batch.
    pub async fn process(&self, link: &str) -> PlaceResult {
        match AssertUnwindSafe(self.process_inner(link))
            .catch_unwind()
            .await
        {
            Ok(result) => result,
            Err(_) => {
                tracing::error!(link, "link processing panicked; recording as unavailable");
                PlaceResult::unavailable(link)
            }
        }
    }

    async fn process_inner(&self, link: &str) -> PlaceResult {
        let final_url = self.redirects.resolve(link).await;
        let record = LinkRecord::new(link, (final_url != link).then_some(final_url));

        let url = record.effective_url();
        let coordinates = extract_coordinates(url);
        let url_name = extract_url_name(url);

        tracing::debug!(
            link,
            url,
            has_coordinates = coordinates.is_some(),
            url_name = url_name.as_deref(),
            "extracted link data"
        );

        let name = self.names.resolve(coordinates, url_name.as_deref()).await;
        PlaceResult::new(name, coordinates, record.original)
    }
}
