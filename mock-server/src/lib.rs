//! In-memory fleet API for integration tests and local UI development.
//!
//! Every resource is stored as a list of JSON objects in insertion order.
//! Responses always use the `{code, message, data}` envelope with HTTP 200;
//! failures are reported through `code` (401 bad token, 404 unknown id,
//! 400 malformed body).

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    routing::{get, post, put},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info, warn};
use uuid::Uuid;

pub const DEFAULT_TOKEN: &str = "dev-token";

pub const SUCCESS: i64 = 200;
pub const BAD_REQUEST: i64 = 400;
pub const UNAUTHORIZED: i64 = 401;
pub const NOT_FOUND: i64 = 404;

const DEFAULT_PAGE_SIZE: usize = 10;

/// Where a resource lives and how its records are keyed.
#[derive(Debug, Clone, Copy)]
pub struct ResourceSpec {
    pub name: &'static str,
    pub id_field: &'static str,
    /// Field the `start_date`/`end_date` filters apply to.
    pub date_field: Option<&'static str>,
}

pub const RESOURCES: [ResourceSpec; 7] = [
    ResourceSpec { name: "driver", id_field: "driver_uuid", date_field: None },
    ResourceSpec { name: "vehicle", id_field: "vehicle_uuid", date_field: None },
    ResourceSpec { name: "route", id_field: "route_uuid", date_field: None },
    ResourceSpec { name: "station", id_field: "station_uuid", date_field: None },
    ResourceSpec { name: "maintenance", id_field: "maintenance_uuid", date_field: Some("maintenance_date") },
    ResourceSpec { name: "inspection", id_field: "inspection_uuid", date_field: Some("inspection_date") },
    ResourceSpec { name: "insurance", id_field: "insurance_uuid", date_field: None },
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

type Reply = Json<Envelope>;

fn ok(data: Value) -> Reply {
    Json(Envelope {
        code: SUCCESS,
        message: "success".to_string(),
        data: Some(data),
    })
}

fn ok_empty(message: &str) -> Reply {
    Json(Envelope {
        code: SUCCESS,
        message: message.to_string(),
        data: None,
    })
}

fn fail(code: i64, message: impl Into<String>) -> Reply {
    Json(Envelope {
        code,
        message: message.into(),
        data: None,
    })
}

#[derive(Debug, Default)]
pub struct Store {
    tables: HashMap<&'static str, Vec<Value>>,
    route_stations: Vec<Value>,
}

impl Store {
    fn table(&self, name: &str) -> &[Value] {
        self.tables.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    fn table_mut(&mut self, name: &'static str) -> &mut Vec<Value> {
        self.tables.entry(name).or_default()
    }

    fn find(&self, spec: ResourceSpec, id: &str) -> Option<&Value> {
        self.table(spec.name)
            .iter()
            .find(|record| record[spec.id_field].as_str() == Some(id))
    }

    fn station_name(&self, station_uuid: &str) -> String {
        self.table("station")
            .iter()
            .find(|s| s["station_uuid"].as_str() == Some(station_uuid))
            .and_then(|s| s["name"].as_str())
            .unwrap_or_default()
            .to_string()
    }
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Clone)]
pub struct AppState {
    db: Db,
    token: Arc<str>,
}

pub fn app() -> Router {
    app_with_token(DEFAULT_TOKEN)
}

pub fn app_with_token(token: &str) -> Router {
    let state = AppState {
        db: Arc::new(RwLock::new(Store::default())),
        token: Arc::from(token),
    };

    let mut router: Router<AppState> = Router::new();
    for spec in RESOURCES {
        let base = format!("/api/v1/{}", spec.name);
        router = router
            .route(
                &format!("{base}/list"),
                get(
                    move |State(state): State<AppState>,
                          headers: HeaderMap,
                          Query(params): Query<HashMap<String, String>>| {
                        list_records(state, headers, params, spec)
                    },
                ),
            )
            .route(
                &base,
                post(
                    move |State(state): State<AppState>, headers: HeaderMap, Json(body): Json<Value>| {
                        create_record(state, headers, body, spec)
                    },
                ),
            )
            .route(
                &format!("{base}/{{id}}"),
                get(
                    move |State(state): State<AppState>, headers: HeaderMap, Path(id): Path<String>| {
                        get_record(state, headers, id, spec)
                    },
                )
                .put(
                    move |State(state): State<AppState>,
                          headers: HeaderMap,
                          Path(id): Path<String>,
                          Json(body): Json<Value>| { update_record(state, headers, id, body, spec) },
                )
                .delete(
                    move |State(state): State<AppState>, headers: HeaderMap, Path(id): Path<String>| {
                        delete_record(state, headers, id, spec)
                    },
                ),
            );
    }

    router
        .route("/api/v1/route/{id}/stations", get(list_route_stations))
        .route("/api/v1/route/{id}/station", post(add_route_station))
        .route(
            "/api/v1/route/{id}/station/{rs_id}",
            put(update_route_station).delete(remove_route_station),
        )
        .with_state(state)
}

pub async fn run(listener: TcpListener, token: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_token(token)).await
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), Reply> {
    let expected = format!("Bearer {}", state.token);
    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        Some(_) => {
            warn!("rejected request with wrong token");
            Err(fail(UNAUTHORIZED, "invalid token"))
        }
        None => {
            warn!("rejected request without token");
            Err(fail(UNAUTHORIZED, "missing token"))
        }
    }
}

fn now() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

fn positive(params: &HashMap<String, String>, key: &str, default: usize) -> usize {
    params
        .get(key)
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

/// Whether `record` satisfies every filter in `params`. Strings match by
/// substring, numbers exactly, and dates by inclusive range.
pub fn matches(record: &Value, params: &HashMap<String, String>, spec: ResourceSpec) -> bool {
    params.iter().all(|(key, wanted)| {
        if key == "page" || key == "size" || wanted.is_empty() {
            return true;
        }
        match (key.as_str(), spec.date_field) {
            ("start_date", Some(field)) => {
                return record[field].as_str().is_some_and(|d| d >= wanted.as_str());
            }
            ("end_date", Some(field)) => {
                return record[field].as_str().is_some_and(|d| d <= wanted.as_str());
            }
            _ => {}
        }
        match record.get(key) {
            Some(Value::String(s)) => s.contains(wanted.as_str()),
            Some(Value::Number(n)) => wanted.parse::<f64>().ok() == n.as_f64(),
            Some(Value::Bool(b)) => wanted == &b.to_string(),
            _ => false,
        }
    })
}

/// One page of `records`, shaped as the list payload.
pub fn paginate(records: Vec<&Value>, page: usize, size: usize) -> Value {
    let total = records.len();
    let list: Vec<Value> = records
        .into_iter()
        .skip((page - 1).saturating_mul(size))
        .take(size)
        .cloned()
        .collect();
    json!({ "list": list, "page": page, "size": size, "total": total })
}

fn merge(target: &mut Value, patch: Map<String, Value>, protected: &[&str]) {
    if let Value::Object(fields) = target {
        for (key, value) in patch {
            if !protected.contains(&key.as_str()) {
                fields.insert(key, value);
            }
        }
    }
}

async fn list_records(
    state: AppState,
    headers: HeaderMap,
    params: HashMap<String, String>,
    spec: ResourceSpec,
) -> Reply {
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    let page = positive(&params, "page", 1);
    let size = positive(&params, "size", DEFAULT_PAGE_SIZE);

    let store = state.db.read().await;
    let matching: Vec<&Value> = store
        .table(spec.name)
        .iter()
        .filter(|record| matches(record, &params, spec))
        .collect();
    debug!(resource = spec.name, page, size, total = matching.len(), "list");
    ok(paginate(matching, page, size))
}

async fn create_record(state: AppState, headers: HeaderMap, body: Value, spec: ResourceSpec) -> Reply {
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    let Value::Object(mut fields) = body else {
        return fail(BAD_REQUEST, "request body must be an object");
    };

    let id = Uuid::new_v4().to_string();
    let stamp = now();
    fields.insert(spec.id_field.to_string(), Value::String(id.clone()));
    fields.insert("created_at".to_string(), Value::String(stamp.clone()));
    fields.insert("updated_at".to_string(), Value::String(stamp));
    let record = Value::Object(fields);

    state.db.write().await.table_mut(spec.name).push(record.clone());
    info!(resource = spec.name, %id, "created");
    ok(record)
}

async fn get_record(state: AppState, headers: HeaderMap, id: String, spec: ResourceSpec) -> Reply {
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    let store = state.db.read().await;
    match store.find(spec, &id) {
        Some(record) => ok(record.clone()),
        None => fail(NOT_FOUND, format!("{} not found", spec.name)),
    }
}

async fn update_record(
    state: AppState,
    headers: HeaderMap,
    id: String,
    body: Value,
    spec: ResourceSpec,
) -> Reply {
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    let Value::Object(patch) = body else {
        return fail(BAD_REQUEST, "request body must be an object");
    };

    let mut store = state.db.write().await;
    let Some(record) = store
        .table_mut(spec.name)
        .iter_mut()
        .find(|record| record[spec.id_field].as_str() == Some(id.as_str()))
    else {
        return fail(NOT_FOUND, format!("{} not found", spec.name));
    };
    merge(record, patch, &[spec.id_field, "created_at", "updated_at"]);
    record["updated_at"] = Value::String(now());
    info!(resource = spec.name, %id, "updated");
    ok(record.clone())
}

async fn delete_record(state: AppState, headers: HeaderMap, id: String, spec: ResourceSpec) -> Reply {
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    let mut store = state.db.write().await;
    let table = store.table_mut(spec.name);
    let before = table.len();
    table.retain(|record| record[spec.id_field].as_str() != Some(id.as_str()));
    if table.len() == before {
        return fail(NOT_FOUND, format!("{} not found", spec.name));
    }
    if spec.name == "route" {
        store
            .route_stations
            .retain(|rs| rs["route_uuid"].as_str() != Some(id.as_str()));
    }
    info!(resource = spec.name, %id, "deleted");
    ok_empty("deleted")
}

const ROUTE: ResourceSpec = RESOURCES[2];

async fn list_route_stations(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(route_id): Path<String>,
) -> Reply {
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    let store = state.db.read().await;
    if store.find(ROUTE, &route_id).is_none() {
        return fail(NOT_FOUND, "route not found");
    }
    let mut stations: Vec<Value> = store
        .route_stations
        .iter()
        .filter(|rs| rs["route_uuid"].as_str() == Some(route_id.as_str()))
        .cloned()
        .collect();
    stations.sort_by_key(|rs| rs["sequence"].as_u64().unwrap_or(0));
    ok(Value::Array(stations))
}

async fn add_route_station(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(route_id): Path<String>,
    Json(body): Json<Value>,
) -> Reply {
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    let Value::Object(mut fields) = body else {
        return fail(BAD_REQUEST, "request body must be an object");
    };

    let mut store = state.db.write().await;
    if store.find(ROUTE, &route_id).is_none() {
        return fail(NOT_FOUND, "route not found");
    }
    let station_uuid = fields
        .get("station_uuid")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let id = Uuid::new_v4().to_string();
    fields.insert("route_station_uuid".to_string(), Value::String(id.clone()));
    fields.insert("route_uuid".to_string(), Value::String(route_id.clone()));
    fields.insert("station_name".to_string(), Value::String(store.station_name(&station_uuid)));
    let record = Value::Object(fields);
    store.route_stations.push(record.clone());
    info!(route = %route_id, %id, "route station added");
    ok(record)
}

async fn update_route_station(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((route_id, rs_id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Reply {
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    let Value::Object(patch) = body else {
        return fail(BAD_REQUEST, "request body must be an object");
    };

    let mut store = state.db.write().await;
    let station_name = patch
        .get("station_uuid")
        .and_then(Value::as_str)
        .map(|uuid| store.station_name(uuid));
    let Some(record) = store.route_stations.iter_mut().find(|rs| {
        rs["route_uuid"].as_str() == Some(route_id.as_str())
            && rs["route_station_uuid"].as_str() == Some(rs_id.as_str())
    }) else {
        return fail(NOT_FOUND, "route station not found");
    };
    merge(record, patch, &["route_station_uuid", "route_uuid"]);
    if let Some(name) = station_name {
        record["station_name"] = Value::String(name);
    }
    info!(route = %route_id, id = %rs_id, "route station updated");
    ok(record.clone())
}

async fn remove_route_station(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((route_id, rs_id)): Path<(String, String)>,
) -> Reply {
    if let Err(denied) = authorize(&state, &headers) {
        return denied;
    }
    let mut store = state.db.write().await;
    let before = store.route_stations.len();
    store.route_stations.retain(|rs| {
        !(rs["route_uuid"].as_str() == Some(route_id.as_str())
            && rs["route_station_uuid"].as_str() == Some(rs_id.as_str()))
    });
    if store.route_stations.len() == before {
        return fail(NOT_FOUND, "route station not found");
    }
    info!(route = %route_id, id = %rs_id, "route station removed");
    ok_empty("deleted")
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATION: ResourceSpec = RESOURCES[3];
    const MAINTENANCE: ResourceSpec = RESOURCES[4];

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn string_filters_match_substrings() {
        let record = json!({ "name": "North Gate Depot", "status": 1 });
        assert!(matches(&record, &params(&[("name", "Gate")]), STATION));
        assert!(!matches(&record, &params(&[("name", "Harbour")]), STATION));
    }

    #[test]
    fn numeric_filters_match_exactly() {
        let record = json!({ "name": "A", "status": 1 });
        assert!(matches(&record, &params(&[("status", "1")]), STATION));
        assert!(!matches(&record, &params(&[("status", "0")]), STATION));
    }

    #[test]
    fn pagination_and_blank_params_are_ignored_as_filters() {
        let record = json!({ "name": "A" });
        assert!(matches(&record, &params(&[("page", "2"), ("size", "10"), ("code", "")]), STATION));
    }

    #[test]
    fn date_range_is_inclusive() {
        let record = json!({ "maintenance_date": "2026-03-15" });
        let within = params(&[("start_date", "2026-03-15"), ("end_date", "2026-03-31")]);
        let after = params(&[("start_date", "2026-03-16")]);
        assert!(matches(&record, &within, MAINTENANCE));
        assert!(!matches(&record, &after, MAINTENANCE));
    }

    #[test]
    fn paginate_reports_total_of_all_matches() {
        let records: Vec<Value> = (0..25).map(|i| json!({ "n": i })).collect();
        let page = paginate(records.iter().collect(), 3, 10);
        assert_eq!(page["total"], 25);
        assert_eq!(page["list"].as_array().unwrap().len(), 5);
        assert_eq!(page["list"][0]["n"], 20);
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let records: Vec<Value> = (0..3).map(|i| json!({ "n": i })).collect();
        let page = paginate(records.iter().collect(), 9, 10);
        assert_eq!(page["total"], 3);
        assert!(page["list"].as_array().unwrap().is_empty());
    }

    #[test]
    fn envelope_omits_absent_data() {
        let json = serde_json::to_value(fail(NOT_FOUND, "driver not found").0).unwrap();
        assert_eq!(json, json!({ "code": 404, "message": "driver not found" }));
    }
}
