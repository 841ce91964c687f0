//! Resolution pipeline turning a Google Maps link into a place name and
//! coordinates.
//!
//! Components are leaf-first: [`sanitize`], [`road`] and [`distance`] are
//! pure helpers; [`redirect`], [`coords`] and [`url_name`] work on the link
//! itself; [`geocode`] and [`poi`] call the OSM services; [`resolver`]
//! combines them by priority and [`processor`] drives one link end to end.
//! [`batch`] runs a list of links sequentially.

pub mod batch;
pub mod coords;
pub mod distance;
pub mod error;
pub mod geocode;
mod http;
pub mod pacing;
pub mod poi;
pub mod processor;
pub mod redirect;
pub mod resolver;
pub mod road;
pub mod sanitize;
pub mod url_name;

pub use batch::{run_batch, BatchReport};
pub use coords::{extract_coordinates, CoordinatePattern};
pub use distance::haversine_m;
pub use error::LookupError;
pub use geocode::{NominatimClient, ReverseGeocode, ReverseGeocodeHit};
pub use pacing::Pacing;
pub use poi::{OverpassClient, PoiSearch};
pub use processor::LinkProcessor;
pub use redirect::{is_host_allowed, RedirectResolver};
pub use resolver::NameResolver;
pub use road::looks_like_road;
pub use sanitize::sanitize_text;
pub use url_name::extract_url_name;
