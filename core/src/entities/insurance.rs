use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::expiry::ExpiryBadge;
use crate::resource::{Identified, Resource};
use crate::validate::{parse_date, validate_date};

status_code!(
    InsuranceType, default = Compulsory {
        Compulsory = 1 => "compulsory",
        Commercial = 2 => "commercial",
        CarrierLiability = 3 => "carrier_liability",
    }
);

status_code!(
    InsuranceStatus, default = Active {
        Active = 1 => "active",
        Expired = 2 => "expired",
        Cancelled = 3 => "cancelled",
    }
);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InsuranceListItem {
    pub insurance_uuid: String,
    pub vehicle_uuid: String,
    #[serde(default)]
    pub plate_number: String,
    #[serde(default)]
    pub policy_number: String,
    #[serde(default)]
    pub insurer: String,
    #[serde(default)]
    pub insurance_type: InsuranceType,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub premium: f64,
    #[serde(default)]
    pub status: InsuranceStatus,
}

impl InsuranceListItem {
    pub fn expiry_badge(&self, today: NaiveDate) -> Option<ExpiryBadge> {
        ExpiryBadge::for_str(&self.end_date, today)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Insurance {
    pub insurance_uuid: String,
    pub vehicle_uuid: String,
    #[serde(default)]
    pub plate_number: String,
    #[serde(default)]
    pub policy_number: String,
    #[serde(default)]
    pub insurer: String,
    #[serde(default)]
    pub insurance_type: InsuranceType,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub premium: f64,
    #[serde(default)]
    pub status: InsuranceStatus,
    #[serde(default)]
    pub remark: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Validate)]
#[serde(default)]
#[validate(schema(function = "validate_policy_period"))]
pub struct InsuranceDraft {
    #[validate(length(min = 1))]
    pub vehicle_uuid: String,
    #[validate(length(min = 1))]
    pub policy_number: String,
    #[validate(length(min = 1))]
    pub insurer: String,
    pub insurance_type: InsuranceType,
    #[validate(custom = "validate_date")]
    pub start_date: String,
    #[validate(custom = "validate_date")]
    pub end_date: String,
    #[validate(range(min = 0.0))]
    pub premium: f64,
    pub status: InsuranceStatus,
    pub remark: String,
}

/// Runs only once both dates parse.
fn validate_policy_period(draft: &InsuranceDraft) -> Result<(), ValidationError> {
    let start = parse_date(&draft.start_date)?;
    let end = parse_date(&draft.end_date)?;
    if end < start {
        let mut error = ValidationError::new("date_order");
        error.message = Some("end date is before start date".into());
        return Err(error);
    }
    Ok(())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InsuranceFilter {
    pub vehicle_uuid: Option<String>,
    pub policy_number: Option<String>,
    pub insurer: Option<String>,
    pub status: Option<InsuranceStatus>,
}

impl Identified for InsuranceListItem {
    fn id(&self) -> &str {
        &self.insurance_uuid
    }
}

impl Identified for Insurance {
    fn id(&self) -> &str {
        &self.insurance_uuid
    }
}

pub struct Insurances;

impl Resource for Insurances {
    const NAME: &'static str = "insurance";
    const PATH: &'static str = "/api/v1/insurance";

    type ListItem = InsuranceListItem;
    type Detail = Insurance;
    type Draft = InsuranceDraft;
    type Filter = InsuranceFilter;

    fn draft_from_detail(i: &Insurance) -> InsuranceDraft {
        InsuranceDraft {
            vehicle_uuid: i.vehicle_uuid.clone(),
            policy_number: i.policy_number.clone(),
            insurer: i.insurer.clone(),
            insurance_type: i.insurance_type,
            start_date: i.start_date.clone(),
            end_date: i.end_date.clone(),
            premium: i.premium,
            status: i.status,
            remark: i.remark.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> InsuranceDraft {
        InsuranceDraft {
            vehicle_uuid: "veh-42".into(),
            policy_number: "PDAA2024-0001".into(),
            insurer: "PICC".into(),
            start_date: "2024-01-01".into(),
            end_date: "2024-12-31".into(),
            premium: 4800.0,
            ..InsuranceDraft::default()
        }
    }

    #[test]
    fn valid_policy_passes() {
        assert!(policy().validate().is_ok());
    }

    #[test]
    fn end_before_start_is_rejected() {
        let draft = InsuranceDraft {
            end_date: "2023-12-31".into(),
            ..policy()
        };
        let errors = draft.validate().unwrap_err();
        let period = errors.field_errors()["__all__"];
        assert_eq!(period.len(), 1);
        assert_eq!(period[0].code, "date_order");
        assert_eq!(
            crate::ApiError::from(errors).user_message(),
            "end date is before start date"
        );
    }

    #[test]
    fn unparseable_end_date_is_a_field_error() {
        let draft = InsuranceDraft {
            end_date: "next year".into(),
            ..policy()
        };
        let errors = draft.validate().unwrap_err();
        assert_eq!(errors.field_errors()["end_date"][0].code, "date");
        assert!(!errors.field_errors().contains_key("__all__"));
    }

    #[test]
    fn expiry_badge_on_list_item() {
        let item: InsuranceListItem = serde_json::from_str(
            r#"{"insurance_uuid":"p1","vehicle_uuid":"v1","end_date":"2024-01-15"}"#,
        )
        .unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
        assert_eq!(
            item.expiry_badge(today),
            Some(ExpiryBadge::Expired { days_ago: 5 })
        );
    }
}
