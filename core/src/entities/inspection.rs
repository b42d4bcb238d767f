use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::expiry::ExpiryBadge;
use crate::resource::{Identified, Resource};
use crate::validate::{validate_date, validate_optional_date};

status_code!(
    InspectionResult, default = Passed {
        Passed = 1 => "passed",
        Failed = 2 => "failed",
        Conditional = 3 => "conditional",
    }
);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InspectionListItem {
    pub inspection_uuid: String,
    pub vehicle_uuid: String,
    #[serde(default)]
    pub plate_number: String,
    #[serde(default)]
    pub inspection_date: String,
    #[serde(default)]
    pub next_inspection_date: String,
    #[serde(default)]
    pub inspector: String,
    #[serde(default)]
    pub result: InspectionResult,
}

impl InspectionListItem {
    /// Badge for the next due inspection.
    pub fn due_badge(&self, today: NaiveDate) -> Option<ExpiryBadge> {
        ExpiryBadge::for_str(&self.next_inspection_date, today)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Inspection {
    pub inspection_uuid: String,
    pub vehicle_uuid: String,
    #[serde(default)]
    pub plate_number: String,
    #[serde(default)]
    pub inspection_date: String,
    #[serde(default)]
    pub next_inspection_date: String,
    #[serde(default)]
    pub inspector: String,
    #[serde(default)]
    pub result: InspectionResult,
    #[serde(default)]
    pub remark: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Validate)]
#[serde(default)]
pub struct InspectionDraft {
    #[validate(length(min = 1))]
    pub vehicle_uuid: String,
    #[validate(custom = "validate_date")]
    pub inspection_date: String,
    #[validate(custom = "validate_optional_date")]
    pub next_inspection_date: String,
    #[validate(length(min = 1))]
    pub inspector: String,
    pub result: InspectionResult,
    pub remark: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InspectionFilter {
    pub vehicle_uuid: Option<String>,
    pub result: Option<InspectionResult>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl Identified for InspectionListItem {
    fn id(&self) -> &str {
        &self.inspection_uuid
    }
}

impl Identified for Inspection {
    fn id(&self) -> &str {
        &self.inspection_uuid
    }
}

pub struct Inspections;

impl Resource for Inspections {
    const NAME: &'static str = "inspection";
    const PATH: &'static str = "/api/v1/inspection";

    type ListItem = InspectionListItem;
    type Detail = Inspection;
    type Draft = InspectionDraft;
    type Filter = InspectionFilter;

    fn draft_from_detail(i: &Inspection) -> InspectionDraft {
        InspectionDraft {
            vehicle_uuid: i.vehicle_uuid.clone(),
            inspection_date: i.inspection_date.clone(),
            next_inspection_date: i.next_inspection_date.clone(),
            inspector: i.inspector.clone(),
            result: i.result,
            remark: i.remark.clone(),
        }
    }
}
