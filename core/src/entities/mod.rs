//! Record shapes, drafts, filters, and status domains for each console
//! resource.

pub mod driver;
pub mod inspection;
pub mod insurance;
pub mod maintenance;
pub mod route;
pub mod route_station;
pub mod station;
pub mod vehicle;

pub use driver::{Driver, DriverDraft, DriverFilter, DriverListItem, DriverStatus, Drivers};
pub use inspection::{
    Inspection, InspectionDraft, InspectionFilter, InspectionListItem, InspectionResult, Inspections,
};
pub use insurance::{
    Insurance, InsuranceDraft, InsuranceFilter, InsuranceListItem, InsuranceStatus, InsuranceType,
    Insurances,
};
pub use maintenance::{
    Maintenance, MaintenanceDraft, MaintenanceFilter, MaintenanceListItem, MaintenanceStatus,
    MaintenanceType, Maintenances,
};
pub use route::{Route, RouteDraft, RouteFilter, RouteListItem, RouteStatus, Routes};
pub use route_station::{RouteStation, RouteStationDraft, SequenceCollision};
pub use station::{Station, StationDraft, StationFilter, StationListItem, StationStatus, Stations};
pub use vehicle::{Vehicle, VehicleDraft, VehicleFilter, VehicleListItem, VehicleStatus, Vehicles};
