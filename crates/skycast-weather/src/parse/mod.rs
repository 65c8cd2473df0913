//! Per-facet response parsers.
//!
//! Each facet has a `try_parse_*` that reports why it produced nothing and
//! a `parse_*` that never fails and falls back to the facet's empty default.

mod air_quality;
mod alerts;
mod conditions;
mod forecast;
mod places;

pub use air_quality::{parse_air_quality, try_parse_air_quality};
pub use alerts::{parse_alerts, try_parse_alerts};
pub use conditions::{parse_conditions, try_parse_conditions};
pub use forecast::{parse_daily, parse_hourly, try_parse_daily, try_parse_hourly};
pub use places::{parse_places, try_parse_places};

use serde_json::Value;

use crate::error::FetchError;
use crate::json::{self, Record};

/// Decode a provider body and check its `success` flag.
///
/// Blank bodies, invalid JSON and a false or missing `success` are all errors.
pub fn open_envelope(body: &str) -> Result<Value, FetchError> {
    let doc = decode(body)?;

    if !json::is_truthy(doc.get("success")) {
        let error = Record::at(&doc, "/error");
        return Err(FetchError::ProviderRejected {
            code: error.and_then(|e| e.text("code")),
            description: error.and_then(|e| e.text("description")),
        });
    }

    Ok(doc)
}

/// Decode a provider body without looking at `success`.
fn decode(body: &str) -> Result<Value, FetchError> {
    if body.trim().is_empty() {
        return Err(FetchError::EmptyBody);
    }
    Ok(serde_json::from_str(body)?)
}

/// Elements of the top-level `response` array.
fn response_items(doc: &Value) -> Result<impl Iterator<Item = Record<'_>>, FetchError> {
    json::items(doc, "/response").ok_or(FetchError::MissingData("response"))
}
