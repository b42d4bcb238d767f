use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::expiry::ExpiryBadge;
use crate::resource::{Identified, Resource};
use crate::validate::validate_optional_date;

status_code!(
    /// Employment status of a driver.
    DriverStatus, default = Active {
        Resigned = 0 => "resigned",
        Active = 1 => "active",
        OnLeave = 2 => "on_leave",
        Suspended = 3 => "suspended",
    }
);

/// Row shown in the driver table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DriverListItem {
    pub driver_uuid: String,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub license_number: String,
    #[serde(default)]
    pub license_type: String,
    #[serde(default)]
    pub license_expiry: String,
    #[serde(default)]
    pub status: DriverStatus,
}

impl DriverListItem {
    pub fn license_badge(&self, today: NaiveDate) -> Option<ExpiryBadge> {
        ExpiryBadge::for_str(&self.license_expiry, today)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Driver {
    pub driver_uuid: String,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub id_card: String,
    #[serde(default)]
    pub license_number: String,
    #[serde(default)]
    pub license_type: String,
    #[serde(default)]
    pub license_expiry: String,
    #[serde(default)]
    pub hire_date: String,
    #[serde(default)]
    pub status: DriverStatus,
    #[serde(default)]
    pub remark: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Validate)]
#[serde(default)]
pub struct DriverDraft {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub phone: String,
    pub id_card: String,
    #[validate(length(min = 1))]
    pub license_number: String,
    pub license_type: String,
    #[validate(custom = "validate_optional_date")]
    pub license_expiry: String,
    #[validate(custom = "validate_optional_date")]
    pub hire_date: String,
    pub status: DriverStatus,
    pub remark: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DriverFilter {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub license_number: Option<String>,
    pub status: Option<DriverStatus>,
}

impl Identified for DriverListItem {
    fn id(&self) -> &str {
        &self.driver_uuid
    }
}

impl Identified for Driver {
    fn id(&self) -> &str {
        &self.driver_uuid
    }
}

pub struct Drivers;

impl Resource for Drivers {
    const NAME: &'static str = "driver";
    const PATH: &'static str = "/api/v1/driver";

    type ListItem = DriverListItem;
    type Detail = Driver;
    type Draft = DriverDraft;
    type Filter = DriverFilter;

    fn draft_from_detail(d: &Driver) -> DriverDraft {
        DriverDraft {
            name: d.name.clone(),
            phone: d.phone.clone(),
            id_card: d.id_card.clone(),
            license_number: d.license_number.clone(),
            license_type: d.license_type.clone(),
            license_expiry: d.license_expiry.clone(),
            hire_date: d.hire_date.clone(),
            status: d.status,
            remark: d.remark.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_status_renders_as_unknown() {
        let item: DriverListItem = serde_json::from_str(
            r#"{"driver_uuid":"d1","name":"Li Wei","status":9}"#,
        )
        .unwrap();
        assert_eq!(item.status, DriverStatus::Unknown(9));
        assert_eq!(item.status.to_string(), "unknown");
        assert_eq!(serde_json::to_value(item.status).unwrap(), 9);
    }

    #[test]
    fn status_codes_map_both_ways() {
        assert_eq!(DriverStatus::from(2), DriverStatus::OnLeave);
        assert_eq!(i32::from(DriverStatus::Resigned), 0);
        assert_eq!(DriverStatus::KNOWN.len(), 4);
        assert_eq!(DriverStatus::default(), DriverStatus::Active);
    }

    #[test]
    fn default_draft_fails_on_required_fields() {
        let errors = DriverDraft::default().validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("phone"));
        assert!(fields.contains_key("license_number"));
        assert!(!fields.contains_key("hire_date"));
    }

    #[test]
    fn malformed_expiry_is_rejected() {
        let draft = DriverDraft {
            name: "Li Wei".into(),
            phone: "13800000000".into(),
            license_number: "A1-2231".into(),
            license_expiry: "next year".into(),
            ..DriverDraft::default()
        };
        let errors = draft.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("license_expiry"));
    }

    #[test]
    fn filter_status_serializes_as_code() {
        let filter = DriverFilter {
            status: Some(DriverStatus::Suspended),
            ..DriverFilter::default()
        };
        let query = crate::query::encode_list_query(&filter, 1, 10).unwrap();
        assert_eq!(query, "page=1&size=10&status=3");
    }
}
