use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::resource::{Identified, Resource};
use crate::validate::validate_optional_date;

status_code!(
    VehicleStatus, default = Operating {
        Operating = 1 => "operating",
        Maintenance = 2 => "maintenance",
        OutOfService = 3 => "out_of_service",
        Scrapped = 4 => "scrapped",
    }
);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VehicleListItem {
    pub vehicle_uuid: String,
    pub plate_number: String,
    #[serde(default)]
    pub vehicle_type: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub seat_count: u32,
    #[serde(default)]
    pub status: VehicleStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vehicle {
    pub vehicle_uuid: String,
    pub plate_number: String,
    #[serde(default)]
    pub vehicle_type: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub seat_count: u32,
    #[serde(default)]
    pub purchase_date: String,
    #[serde(default)]
    pub status: VehicleStatus,
    #[serde(default)]
    pub remark: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Validate)]
#[serde(default)]
pub struct VehicleDraft {
    #[validate(length(min = 1))]
    pub plate_number: String,
    pub vehicle_type: String,
    pub brand: String,
    pub model: String,
    #[validate(range(min = 1))]
    pub seat_count: u32,
    #[validate(custom = "validate_optional_date")]
    pub purchase_date: String,
    pub status: VehicleStatus,
    pub remark: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct VehicleFilter {
    pub plate_number: Option<String>,
    pub vehicle_type: Option<String>,
    pub status: Option<VehicleStatus>,
}

impl Identified for VehicleListItem {
    fn id(&self) -> &str {
        &self.vehicle_uuid
    }
}

impl Identified for Vehicle {
    fn id(&self) -> &str {
        &self.vehicle_uuid
    }
}

pub struct Vehicles;

impl Resource for Vehicles {
    const NAME: &'static str = "vehicle";
    const PATH: &'static str = "/api/v1/vehicle";

    type ListItem = VehicleListItem;
    type Detail = Vehicle;
    type Draft = VehicleDraft;
    type Filter = VehicleFilter;

    fn draft_from_detail(v: &Vehicle) -> VehicleDraft {
        VehicleDraft {
            plate_number: v.plate_number.clone(),
            vehicle_type: v.vehicle_type.clone(),
            brand: v.brand.clone(),
            model: v.model.clone(),
            seat_count: v.seat_count,
            purchase_date: v.purchase_date.clone(),
            status: v.status,
            remark: v.remark.clone(),
        }
    }
}
