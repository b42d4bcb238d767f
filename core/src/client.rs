//! Request builder and response parser for the fleet REST API.
//!
//! # Design
//! `ResourceClient` holds the base URL and a shared `Session`. It does no I/O:
//! every operation is split into a `build_*` method that produces an
//! `HttpRequest` carrying the bearer token, and a `parse_*` method that
//! consumes the `HttpResponse`, checks HTTP status first and the envelope
//! `code` second, and deserializes `data`. Generic builders take any
//! `Resource`, so one client serves all seven console screens.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ConsoleConfig;
use crate::entities::route_station::{RouteStation, RouteStationDraft};
use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::page::Page;
use crate::query::{encode_list_query, encode_query, QueryState};
use crate::resource::Resource;
use crate::session::Session;

const ROUTE_PATH: &str = "/api/v1/route";

#[derive(Debug, Clone)]
pub struct ResourceClient {
    base_url: String,
    session: Arc<Session>,
}

impl ResourceClient {
    pub fn new(base_url: &str, session: Arc<Session>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn from_config(config: &ConsoleConfig, session: Arc<Session>) -> Self {
        Self::new(&config.api_base_url, session)
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Build a request with an optional JSON body.
    pub fn build<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&B>,
    ) -> Result<HttpRequest, ApiError> {
        let body = body
            .map(|b| serde_json::to_string(b).map_err(|e| ApiError::Serialization(e.to_string())))
            .transpose()?;
        Ok(self.assemble(method, path, String::new(), body))
    }

    /// Build a bodyless request whose parameters go in the query string.
    pub fn build_with_query<Q: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        query: &Q,
    ) -> Result<HttpRequest, ApiError> {
        let query = encode_query(query)?;
        Ok(self.assemble(method, path, query, None))
    }

    fn assemble(&self, method: HttpMethod, path: &str, query: String, body: Option<String>) -> HttpRequest {
        let mut url = format!("{}{}", self.base_url, path);
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query);
        }

        let mut headers = Vec::new();
        match self.session.bearer() {
            Some(bearer) => headers.push(("authorization".to_string(), bearer)),
            None => warn!(%method, %url, "building request without a session token"),
        }
        if body.is_some() {
            headers.push(("content-type".to_string(), "application/json".to_string()));
        }

        debug!(%method, %url, "built request");
        HttpRequest {
            method,
            url,
            headers,
            body,
        }
    }

    /// Parse a response whose envelope must carry `data`.
    pub fn parse<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<T, ApiError> {
        self.parse_optional(response)?
            .ok_or_else(|| ApiError::Deserialization("response envelope has no data".to_string()))
    }

    /// Parse a response whose envelope may omit `data`.
    pub fn parse_optional<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<Option<T>, ApiError> {
        check_status(&response)?;
        let envelope: Envelope<T> = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::Deserialization(e.to_string()))?;
        envelope.into_result()
    }

    /// Parse a response where only the envelope `code` matters.
    pub fn parse_ack(&self, response: HttpResponse) -> Result<(), ApiError> {
        self.parse_optional::<serde_json::Value>(response).map(|_| ())
    }

    pub fn build_list<R: Resource>(&self, filter: &R::Filter, page: u32, size: u32) -> Result<HttpRequest, ApiError> {
        let query = encode_list_query(filter, page, size)?;
        Ok(self.assemble(HttpMethod::Get, &R::list_path(), query, None))
    }

    pub fn build_list_for<R: Resource>(&self, state: &QueryState<R::Filter>) -> Result<HttpRequest, ApiError> {
        self.build_list::<R>(state.filters(), state.page(), state.size())
    }

    pub fn build_detail<R: Resource>(&self, id: &str) -> HttpRequest {
        self.assemble(HttpMethod::Get, &R::item_path(id), String::new(), None)
    }

    pub fn build_create<R: Resource>(&self, draft: &R::Draft) -> Result<HttpRequest, ApiError> {
        self.build(HttpMethod::Post, &R::create_path(), Some(draft))
    }

    pub fn build_update<R: Resource>(&self, id: &str, draft: &R::Draft) -> Result<HttpRequest, ApiError> {
        self.build(HttpMethod::Put, &R::item_path(id), Some(draft))
    }

    pub fn build_delete<R: Resource>(&self, id: &str) -> HttpRequest {
        self.assemble(HttpMethod::Delete, &R::item_path(id), String::new(), None)
    }

    pub fn parse_list<R: Resource>(&self, response: HttpResponse) -> Result<Page<R::ListItem>, ApiError> {
        let page: Page<R::ListItem> = self.parse(response)?;
        if !page.is_consistent() {
            warn!(
                resource = R::NAME,
                len = page.list.len(),
                size = page.size,
                total = page.total,
                "server returned an inconsistent page"
            );
        }
        Ok(page)
    }

    pub fn parse_detail<R: Resource>(&self, response: HttpResponse) -> Result<R::Detail, ApiError> {
        self.parse(response)
    }

    /// The created record, when the server echoes it back.
    pub fn parse_create<R: Resource>(&self, response: HttpResponse) -> Result<Option<R::Detail>, ApiError> {
        self.parse_optional(response)
    }

    pub fn parse_update<R: Resource>(&self, response: HttpResponse) -> Result<Option<R::Detail>, ApiError> {
        self.parse_optional(response)
    }

    pub fn parse_delete(&self, response: HttpResponse) -> Result<(), ApiError> {
        self.parse_ack(response)
    }

    pub fn build_route_stations(&self, route_id: &str) -> HttpRequest {
        let path = format!("{ROUTE_PATH}/{}/stations", urlencoding::encode(route_id));
        self.assemble(HttpMethod::Get, &path, String::new(), None)
    }

    pub fn build_add_route_station(&self, route_id: &str, draft: &RouteStationDraft) -> Result<HttpRequest, ApiError> {
        let path = format!("{ROUTE_PATH}/{}/station", urlencoding::encode(route_id));
        self.build(HttpMethod::Post, &path, Some(draft))
    }

    pub fn build_update_route_station(
        &self,
        route_id: &str,
        route_station_id: &str,
        draft: &RouteStationDraft,
    ) -> Result<HttpRequest, ApiError> {
        let path = route_station_path(route_id, route_station_id);
        self.build(HttpMethod::Put, &path, Some(draft))
    }

    pub fn build_remove_route_station(&self, route_id: &str, route_station_id: &str) -> HttpRequest {
        let path = route_station_path(route_id, route_station_id);
        self.assemble(HttpMethod::Delete, &path, String::new(), None)
    }

    /// Stations of a route. A missing `data` is an empty route.
    pub fn parse_route_stations(&self, response: HttpResponse) -> Result<Vec<RouteStation>, ApiError> {
        Ok(self.parse_optional(response)?.unwrap_or_default())
    }
}

fn route_station_path(route_id: &str, route_station_id: &str) -> String {
    format!(
        "{ROUTE_PATH}/{}/station/{}",
        urlencoding::encode(route_id),
        urlencoding::encode(route_station_id)
    )
}

/// Non-2xx responses fail before the envelope is looked at.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{DriverFilter, Drivers, StationDraft, Stations, VehicleStatus, Vehicles};

    fn client() -> ResourceClient {
        ResourceClient::new("http://localhost:3000", Session::with_token("t0k3n"))
    }

    #[test]
    fn client_from_config_uses_the_configured_base_url() {
        let config = ConsoleConfig::new("http://fleet.internal:8080/");
        let client = ResourceClient::from_config(&config, Session::with_token("t0k3n"));
        let request = client.build_detail::<Stations>("s1");
        assert_eq!(request.url, "http://fleet.internal:8080/api/v1/station/s1");
        assert_eq!(request.header("authorization"), Some("Bearer t0k3n"));
    }

    #[test]
    fn every_request_carries_the_bearer_token() {
        let c = client();
        let requests = vec![
            c.build_list::<Drivers>(&DriverFilter::default(), 1, 10).unwrap(),
            c.build_detail::<Drivers>("d1"),
            c.build_create::<Stations>(&StationDraft::default()).unwrap(),
            c.build_delete::<Stations>("s1"),
            c.build_route_stations("r1"),
        ];
        for req in requests {
            assert_eq!(req.header("authorization"), Some("Bearer t0k3n"), "{}", req.url);
        }
    }

    #[test]
    fn logged_out_session_sends_no_authorization_header() {
        let session = Session::new();
        let c = ResourceClient::new("http://localhost:3000", session);
        assert_eq!(c.build_detail::<Drivers>("d1").header("authorization"), None);
    }

    #[test]
    fn token_changes_are_picked_up_by_existing_clients() {
        let c = client();
        c.session().login("rotated");
        assert_eq!(
            c.build_detail::<Drivers>("d1").header("authorization"),
            Some("Bearer rotated")
        );
    }

    #[test]
    fn build_list_drops_absent_filters() {
        let filter = crate::entities::VehicleFilter {
            plate_number: None,
            vehicle_type: Some(String::new()),
            status: Some(VehicleStatus::Maintenance),
        };
        let req = client().build_list::<Vehicles>(&filter, 2, 20).unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(
            req.url,
            "http://localhost:3000/api/v1/vehicle/list?page=2&size=20&status=2"
        );
        assert!(req.body.is_none());
    }

    #[test]
    fn build_update_puts_id_in_path_only() {
        let draft = StationDraft {
            name: "North Gate".into(),
            ..StationDraft::default()
        };
        let req = client().build_update::<Stations>("s-9", &draft).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.url, "http://localhost:3000/api/v1/station/s-9");
        assert_eq!(req.header("content-type"), Some("application/json"));
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["name"], "North Gate");
        assert!(body.get("station_uuid").is_none());
    }

    #[test]
    fn route_station_paths() {
        let c = client();
        let draft = RouteStationDraft::default();
        assert_eq!(
            c.build_add_route_station("r1", &draft).unwrap().url,
            "http://localhost:3000/api/v1/route/r1/station"
        );
        assert_eq!(
            c.build_update_route_station("r1", "rs2", &draft).unwrap().url,
            "http://localhost:3000/api/v1/route/r1/station/rs2"
        );
        let remove = c.build_remove_route_station("r1", "rs2");
        assert_eq!(remove.method, HttpMethod::Delete);
        assert_eq!(remove.url, "http://localhost:3000/api/v1/route/r1/station/rs2");
    }

    #[test]
    fn parse_list_success() {
        let response = HttpResponse::new(
            200,
            r#"{"code":200,"message":"ok","data":{"list":[{"driver_uuid":"d1","name":"Li Wei","status":1}],"page":1,"size":10,"total":1}}"#,
        );
        let page = client().parse_list::<Drivers>(response).unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.list[0].name, "Li Wei");
    }

    #[test]
    fn http_200_with_failure_code_is_application_error() {
        let response = HttpResponse::new(200, r#"{"code":401,"message":"token expired"}"#);
        let err = client().parse_detail::<Drivers>(response).unwrap_err();
        assert!(matches!(err, ApiError::Application { code: 401, .. }));
        assert_eq!(err.user_message(), "token expired");
    }

    #[test]
    fn non_2xx_is_http_error() {
        let response = HttpResponse::new(502, "bad gateway");
        let err = client().parse_delete(response).unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 502, .. }));
    }

    #[test]
    fn malformed_body_is_deserialization_error() {
        let err = client()
            .parse_list::<Drivers>(HttpResponse::new(200, "<html>"))
            .unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn detail_without_data_is_deserialization_error() {
        let err = client()
            .parse_detail::<Drivers>(HttpResponse::new(200, r#"{"code":200,"message":"ok"}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn create_without_echo_is_ok() {
        let created = client()
            .parse_create::<Stations>(HttpResponse::new(200, r#"{"code":200,"message":"created"}"#))
            .unwrap();
        assert!(created.is_none());
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let c = ResourceClient::new("http://localhost:3000/", Session::new());
        assert_eq!(
            c.build_detail::<Drivers>("d1").url,
            "http://localhost:3000/api/v1/driver/d1"
        );
    }

    #[test]
    fn empty_route_station_data_is_empty_list() {
        let stations = client()
            .parse_route_stations(HttpResponse::new(200, r#"{"code":200,"message":"ok","data":null}"#))
            .unwrap();
        assert!(stations.is_empty());
    }
}
