use serde::{Deserialize, Serialize};

use crate::domain::types::{Callsign, ContactId, sanitize_optional_text, trim_optional};

/// A logged radio contact as stored by the logbook backend.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Contact {
    pub id: ContactId,
    pub callsign: String,
    /// Frequency in MHz.
    pub frequency: f64,
    pub mode: String,
    pub band: String,
    /// ISO-8601 timestamp exactly as delivered by the backend.
    pub datetime: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rst_sent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rst_received: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qth: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_locator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmed: Option<bool>,
}

/// Changes submitted from the edit dialog.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UpdateContact {
    pub callsign: Callsign,
    pub frequency: f64,
    pub mode: String,
    pub band: String,
    pub datetime: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rst_sent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rst_received: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid_locator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    pub confirmed: bool,
}

impl UpdateContact {
    /// Builds an update normalizing text fields.
    ///
    /// Mode and locator are upper-cased and band lower-cased. Free-text
    /// fields are sanitized and blank optionals dropped.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        callsign: Callsign,
        frequency: f64,
        mode: String,
        band: String,
        datetime: String,
        rst_sent: Option<String>,
        rst_received: Option<String>,
        name: Option<String>,
        qth: Option<String>,
        grid_locator: Option<String>,
        notes: Option<String>,
        latitude: Option<f64>,
        longitude: Option<f64>,
        confirmed: bool,
    ) -> Self {
        Self {
            callsign,
            frequency,
            mode: mode.trim().to_uppercase(),
            band: band.trim().to_lowercase(),
            datetime: datetime.trim().to_string(),
            rst_sent: trim_optional(rst_sent),
            rst_received: trim_optional(rst_received),
            name: sanitize_optional_text(name),
            qth: sanitize_optional_text(qth),
            grid_locator: trim_optional(grid_locator).map(|g| g.to_uppercase()),
            notes: sanitize_optional_text(notes),
            latitude,
            longitude,
            confirmed,
        }
    }
}
