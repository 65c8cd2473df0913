use super::{decode, response_items};
use crate::error::FetchError;
use crate::types::Place;

/// Place search hits from `response[] -> {place, loc}`.
///
/// The `success` flag is not consulted; whatever `response` holds is used.
pub fn try_parse_places(body: &str) -> Result<Vec<Place>, FetchError> {
    let doc = decode(body)?;
    let places = response_items(&doc)?
        .map(|item| {
            let place = item.get("place");
            let text = |key: &str| place.and_then(|p| p.text(key)).unwrap_or_default();
            let loc = item.get("loc");

            Place {
                name: text("name"),
                country: text("countryFull"),
                state: text("state"),
                latitude: loc.and_then(|l| l.f64("lat")),
                longitude: loc.and_then(|l| l.f64("long")),
            }
        })
        .collect();
    Ok(places)
}

pub fn parse_places(body: &str) -> Vec<Place> {
    try_parse_places(body).unwrap_or_default()
}
