//! View models shaped for the dashboard templates.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

use crate::domain::contact::Contact;
use crate::domain::maidenhead::grid_to_lat_lon;
use crate::domain::user::UserContext;
use crate::pagination::PaginationControl;
use crate::services::dashboard::Dashboard;

const MAP_HEIGHT: &str = "400px";

/// Formats a backend timestamp like `Jan 5, 2024, 02:30 PM` (UTC).
///
/// Accepts RFC 3339 as well as naive `YYYY-MM-DDTHH:MM[:SS]` values.
/// Anything else renders as `Invalid Date`.
pub fn format_contact_datetime(value: &str) -> String {
    parse_contact_datetime(value)
        .map(|dt| dt.format("%b %-d, %Y, %I:%M %p").to_string())
        .unwrap_or_else(|| "Invalid Date".to_string())
}

/// Value for an `<input type="datetime-local">`.
pub fn datetime_input_value(value: &str) -> String {
    parse_contact_datetime(value)
        .map(|dt| dt.format("%Y-%m-%dT%H:%M").to_string())
        .unwrap_or_default()
}

fn parse_contact_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc).naive_utc());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

/// One table row.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ContactRow {
    pub id: i32,
    pub callsign: String,
    pub datetime: String,
    pub frequency: String,
    pub mode: String,
    pub band: String,
    pub rst: String,
    pub name: String,
}

impl From<&Contact> for ContactRow {
    fn from(contact: &Contact) -> Self {
        Self {
            id: contact.id.get(),
            callsign: contact.callsign.clone(),
            datetime: format_contact_datetime(&contact.datetime),
            frequency: format!("{} MHz", contact.frequency),
            mode: contact.mode.clone(),
            band: contact.band.clone(),
            rst: format!(
                "{}/{}",
                contact.rst_sent.as_deref().unwrap_or(""),
                contact.rst_received.as_deref().unwrap_or("")
            ),
            name: contact
                .name
                .as_deref()
                .filter(|n| !n.is_empty())
                .unwrap_or("-")
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MapMarker {
    pub id: i32,
    pub callsign: String,
    pub latitude: f64,
    pub longitude: f64,
    pub band: String,
    pub mode: String,
    pub datetime: String,
}

impl MapMarker {
    /// Marker for a contact; coordinates fall back to the locator square.
    pub fn from_contact(contact: &Contact) -> Option<Self> {
        let (latitude, longitude) = match (contact.latitude, contact.longitude) {
            (Some(lat), Some(lon)) => (lat, lon),
            _ => grid_to_lat_lon(contact.grid_locator.as_deref()?)?,
        };
        Some(Self {
            id: contact.id.get(),
            callsign: contact.callsign.clone(),
            latitude,
            longitude,
            band: contact.band.clone(),
            mode: contact.mode.clone(),
            datetime: format_contact_datetime(&contact.datetime),
        })
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StationMarker {
    pub callsign: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Data handed to the client-side map script.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MapView {
    pub markers: Vec<MapMarker>,
    pub station: Option<StationMarker>,
    pub height: &'static str,
}

impl MapView {
    pub fn new(contacts: &[Contact], user: Option<&UserContext>) -> Self {
        let station = user.and_then(|user| {
            user.position().map(|(latitude, longitude)| StationMarker {
                callsign: user.callsign.clone(),
                latitude,
                longitude,
            })
        });
        Self {
            markers: contacts.iter().filter_map(MapMarker::from_contact).collect(),
            station,
            height: MAP_HEIGHT,
        }
    }

    /// JSON payload safe to embed inside a `<script>` element.
    pub fn to_script_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| "{}".to_string())
            .replace("</", "<\\/")
    }
}

/// Selected contact as shown in the edit dialog.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EditDialogView {
    pub contact: Contact,
    pub datetime_input: String,
}

/// Everything `dashboard/index.html` renders.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardView {
    pub loading: bool,
    pub initial_loading: bool,
    pub error: Option<String>,
    pub is_empty: bool,
    pub total: u64,
    pub rows: Vec<ContactRow>,
    pub map: MapView,
    pub map_json: String,
    pub pagination: PaginationControl,
    pub show_pagination: bool,
    pub dialog: Option<EditDialogView>,
    pub user: Option<UserContext>,
}

impl DashboardView {
    pub fn new(dashboard: &Dashboard, user: Option<&UserContext>) -> Self {
        let map = MapView::new(dashboard.contacts(), user);
        let pagination = PaginationControl::new(dashboard.pagination());
        let dialog = match (dashboard.is_edit_dialog_open(), dashboard.selected_contact()) {
            (true, Some(contact)) => Some(EditDialogView {
                contact: contact.clone(),
                datetime_input: datetime_input_value(&contact.datetime),
            }),
            _ => None,
        };

        Self {
            loading: dashboard.is_loading(),
            initial_loading: dashboard.is_initial_loading(),
            error: dashboard.error().map(str::to_string),
            is_empty: dashboard.is_empty(),
            total: dashboard.pagination().total,
            rows: dashboard.contacts().iter().map(ContactRow::from).collect(),
            map_json: map.to_script_json(),
            map,
            show_pagination: pagination.is_visible(),
            pagination,
            dialog,
            user: user.cloned(),
        }
    }
}
