use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::resource::{Identified, Resource};

status_code!(
    RouteStatus, default = Active {
        Inactive = 0 => "inactive",
        Active = 1 => "active",
    }
);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteListItem {
    pub route_uuid: String,
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub start_station: String,
    #[serde(default)]
    pub end_station: String,
    /// Kilometres.
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub status: RouteStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Route {
    pub route_uuid: String,
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub start_station: String,
    #[serde(default)]
    pub end_station: String,
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub status: RouteStatus,
    #[serde(default)]
    pub remark: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Validate)]
#[serde(default)]
pub struct RouteDraft {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub code: String,
    pub start_station: String,
    pub end_station: String,
    #[validate(range(min = 0.0))]
    pub distance: f64,
    pub status: RouteStatus,
    pub remark: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RouteFilter {
    pub name: Option<String>,
    pub code: Option<String>,
    pub status: Option<RouteStatus>,
}

impl Identified for RouteListItem {
    fn id(&self) -> &str {
        &self.route_uuid
    }
}

impl Identified for Route {
    fn id(&self) -> &str {
        &self.route_uuid
    }
}

pub struct Routes;

impl Resource for Routes {
    const NAME: &'static str = "route";
    const PATH: &'static str = "/api/v1/route";

    type ListItem = RouteListItem;
    type Detail = Route;
    type Draft = RouteDraft;
    type Filter = RouteFilter;

    fn draft_from_detail(r: &Route) -> RouteDraft {
        RouteDraft {
            name: r.name.clone(),
            code: r.code.clone(),
            start_station: r.start_station.clone(),
            end_station: r.end_station.clone(),
            distance: r.distance,
            status: r.status,
            remark: r.remark.clone(),
        }
    }
}
