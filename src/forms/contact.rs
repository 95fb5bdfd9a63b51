use serde::Deserialize;
use validator::Validate;

use crate::domain::contact::UpdateContact;
use crate::domain::types::Callsign;
use crate::forms::{FormError, empty_string_as_none};

#[derive(Debug, Deserialize, Validate)]
/// Form data submitted by the edit dialog.
pub struct SaveContactForm {
    #[validate(length(min = 1, max = 20))]
    pub callsign: String,
    /// Frequency in MHz.
    #[validate(range(exclusive_min = 0.0))]
    pub frequency: f64,
    #[validate(length(min = 1, max = 16))]
    pub mode: String,
    #[validate(length(min = 1, max = 16))]
    pub band: String,
    #[validate(length(min = 1))]
    pub datetime: String,
    #[serde(default)]
    #[validate(length(max = 8))]
    pub rst_sent: Option<String>,
    #[serde(default)]
    #[validate(length(max = 8))]
    pub rst_received: Option<String>,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub name: Option<String>,
    #[serde(default)]
    #[validate(length(max = 200))]
    pub qth: Option<String>,
    #[serde(default)]
    #[validate(length(max = 8))]
    pub grid_locator: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
    /// Checkbox: present when ticked.
    #[serde(default)]
    pub confirmed: Option<String>,
}

impl TryFrom<SaveContactForm> for UpdateContact {
    type Error = FormError;

    fn try_from(form: SaveContactForm) -> Result<Self, Self::Error> {
        form.validate()?;
        let callsign = Callsign::new(form.callsign)?;

        Ok(UpdateContact::new(
            callsign,
            form.frequency,
            form.mode,
            form.band,
            form.datetime,
            form.rst_sent,
            form.rst_received,
            form.name,
            form.qth,
            form.grid_locator,
            form.notes,
            form.latitude,
            form.longitude,
            form.confirmed.is_some(),
        ))
    }
}
