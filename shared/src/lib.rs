pub mod geo;
pub mod popup;
pub mod search;
pub mod shelter;

pub use geo::{LatLng, LatLngBounds};
pub use popup::{CAPACITY_PLACEHOLDER, capacity_label, popup_html};
pub use search::{SearchError, search_database, validate_query};
pub use shelter::*;
