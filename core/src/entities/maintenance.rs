use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::resource::{Identified, Resource};
use crate::validate::validate_date;

status_code!(
    MaintenanceType, default = Routine {
        Routine = 1 => "routine",
        Repair = 2 => "repair",
        Accident = 3 => "accident",
        Other = 4 => "other",
    }
);

status_code!(
    MaintenanceStatus, default = Scheduled {
        Scheduled = 1 => "scheduled",
        InProgress = 2 => "in_progress",
        Completed = 3 => "completed",
        Cancelled = 4 => "cancelled",
    }
);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaintenanceListItem {
    pub maintenance_uuid: String,
    pub vehicle_uuid: String,
    /// Joined from the vehicle by the server when available.
    #[serde(default)]
    pub plate_number: String,
    #[serde(default)]
    pub maintenance_type: MaintenanceType,
    #[serde(default)]
    pub maintenance_date: String,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub status: MaintenanceStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Maintenance {
    pub maintenance_uuid: String,
    pub vehicle_uuid: String,
    #[serde(default)]
    pub plate_number: String,
    #[serde(default)]
    pub maintenance_type: MaintenanceType,
    #[serde(default)]
    pub maintenance_date: String,
    #[serde(default)]
    pub cost: f64,
    /// Odometer reading in kilometres.
    #[serde(default)]
    pub mileage: u64,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub status: MaintenanceStatus,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Validate)]
#[serde(default)]
pub struct MaintenanceDraft {
    /// Opaque server identifier of the vehicle; only presence is checked.
    #[validate(length(min = 1))]
    pub vehicle_uuid: String,
    pub maintenance_type: MaintenanceType,
    #[validate(custom = "validate_date")]
    pub maintenance_date: String,
    #[validate(range(min = 0.0))]
    pub cost: f64,
    pub mileage: u64,
    pub provider: String,
    pub status: MaintenanceStatus,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MaintenanceFilter {
    pub vehicle_uuid: Option<String>,
    pub maintenance_type: Option<MaintenanceType>,
    pub status: Option<MaintenanceStatus>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl Identified for MaintenanceListItem {
    fn id(&self) -> &str {
        &self.maintenance_uuid
    }
}

impl Identified for Maintenance {
    fn id(&self) -> &str {
        &self.maintenance_uuid
    }
}

pub struct Maintenances;

impl Resource for Maintenances {
    const NAME: &'static str = "maintenance";
    const PATH: &'static str = "/api/v1/maintenance";

    type ListItem = MaintenanceListItem;
    type Detail = Maintenance;
    type Draft = MaintenanceDraft;
    type Filter = MaintenanceFilter;

    fn draft_from_detail(m: &Maintenance) -> MaintenanceDraft {
        MaintenanceDraft {
            vehicle_uuid: m.vehicle_uuid.clone(),
            maintenance_type: m.maintenance_type,
            maintenance_date: m.maintenance_date.clone(),
            cost: m.cost,
            mileage: m.mileage,
            provider: m.provider.clone(),
            status: m.status,
            description: m.description.clone(),
        }
    }
}
