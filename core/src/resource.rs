//! Per-entity configuration for the generic list/CRUD workflow.
//!
//! # Design
//! Every console screen repeats the same skeleton: a paginated list with
//! filters, a detail fetch, and create/update/delete dialogs. `Resource`
//! captures what differs between entities (paths, record shapes, draft
//! validation) so the client, list controller, and CRUD orchestrator are
//! written once.
//!
//! All resources share one route convention: `GET {PATH}/list`,
//! `GET|PUT|DELETE {PATH}/{id}`, `POST {PATH}`. The identifier always travels
//! in the path, never in the body.

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::Serialize;
use validator::Validate;

/// A record carrying its server-generated identifier.
pub trait Identified {
    fn id(&self) -> &str;
}

pub trait Resource {
    /// Singular resource name, e.g. `"driver"`.
    const NAME: &'static str;
    /// Route prefix, e.g. `"/api/v1/driver"`.
    const PATH: &'static str;

    type ListItem: DeserializeOwned + Identified + Clone + Debug;
    type Detail: DeserializeOwned + Identified + Clone + Debug;
    type Draft: Serialize + DeserializeOwned + Validate + Default + Clone + PartialEq + Debug;
    type Filter: Serialize + DeserializeOwned + Default + Clone + Debug;

    /// Seed an edit dialog from a fetched record.
    fn draft_from_detail(detail: &Self::Detail) -> Self::Draft;

    fn list_path() -> String {
        format!("{}/list", Self::PATH)
    }

    fn item_path(id: &str) -> String {
        format!("{}/{}", Self::PATH, urlencoding::encode(id))
    }

    fn create_path() -> String {
        Self::PATH.to_string()
    }
}
