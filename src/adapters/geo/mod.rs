//! OpenStreetMap adapters: Overpass (booth locator) and Nominatim (geocoder).

pub mod nominatim_adapter;
pub mod overpass_adapter;

pub use nominatim_adapter::{NOMINATIM_SEARCH_URL, NominatimAdapter};
pub use overpass_adapter::{OVERPASS_INTERPRETER_URL, OVERPASS_TIMEOUT, OverpassAdapter};
