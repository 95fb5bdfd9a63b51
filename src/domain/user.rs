use serde::{Deserialize, Serialize};

use crate::domain::maidenhead::grid_to_lat_lon;
use crate::domain::types::UserId;

/// The signed-in operator as reported by the backend profile endpoint.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserContext {
    pub id: UserId,
    pub callsign: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub grid_locator: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl UserContext {
    /// Station position: explicit coordinates first, then the locator square.
    pub fn position(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => self.grid_locator.as_deref().and_then(grid_to_lat_lon),
        }
    }
}
