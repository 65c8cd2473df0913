use super::{open_envelope, response_items};
use crate::error::FetchError;
use crate::types::Alert;

/// One alert per `response[]` entry that carries a `details` object.
pub fn try_parse_alerts(body: &str) -> Result<Vec<Alert>, FetchError> {
    let doc = open_envelope(body)?;
    let alerts = response_items(&doc)?
        .filter_map(|item| item.get("details"))
        .map(|details| Alert {
            kind: details.text("type"),
            message: details.text("body"),
            severity: details.text("priority"),
        })
        .collect();
    Ok(alerts)
}

pub fn parse_alerts(body: &str) -> Vec<Alert> {
    try_parse_alerts(body).unwrap_or_default()
}
