use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::resource::{Identified, Resource};

status_code!(
    StationStatus, default = Enabled {
        Disabled = 0 => "disabled",
        Enabled = 1 => "enabled",
    }
);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StationListItem {
    pub station_uuid: String,
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub longitude: f64,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub status: StationStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Station {
    pub station_uuid: String,
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub longitude: f64,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub status: StationStatus,
    #[serde(default)]
    pub remark: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Validate)]
#[serde(default)]
pub struct StationDraft {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub code: String,
    pub address: String,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    pub status: StationStatus,
    pub remark: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StationFilter {
    pub name: Option<String>,
    pub code: Option<String>,
    pub status: Option<StationStatus>,
}

impl Identified for StationListItem {
    fn id(&self) -> &str {
        &self.station_uuid
    }
}

impl Identified for Station {
    fn id(&self) -> &str {
        &self.station_uuid
    }
}

pub struct Stations;

impl Resource for Stations {
    const NAME: &'static str = "station";
    const PATH: &'static str = "/api/v1/station";

    type ListItem = StationListItem;
    type Detail = Station;
    type Draft = StationDraft;
    type Filter = StationFilter;

    fn draft_from_detail(s: &Station) -> StationDraft {
        StationDraft {
            name: s.name.clone(),
            code: s.code.clone(),
            address: s.address.clone(),
            longitude: s.longitude,
            latitude: s.latitude,
            status: s.status,
            remark: s.remark.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiananmen() -> StationDraft {
        StationDraft {
            name: "Tiananmen East".into(),
            code: "S-001".into(),
            longitude: 116.397128,
            latitude: 39.916527,
            status: StationStatus::Enabled,
            ..StationDraft::default()
        }
    }

    #[test]
    fn valid_coordinates_pass() {
        assert!(tiananmen().validate().is_ok());
    }

    #[test]
    fn swapped_coordinates_fail_on_latitude_only() {
        let draft = StationDraft {
            longitude: 39.916527,
            latitude: 116.397128,
            ..tiananmen()
        };
        let errors = draft.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("latitude"));
        assert!(!fields.contains_key("longitude"));
    }
}
