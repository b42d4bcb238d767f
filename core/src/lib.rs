//! Client core for the fleet administrative console.
//!
//! # Overview
//! Every console screen (drivers, vehicles, routes, stations, maintenance,
//! inspections, insurance) is the same paginated list with filters and
//! create/update/delete dialogs. This crate implements that workflow once,
//! parameterized by a per-entity `Resource`.
//!
//! # Design
//! - Host-does-IO: `ResourceClient` builds `HttpRequest` values and parses
//!   `HttpResponse` values. The host runs the round-trip, or hands a
//!   `Transport` (such as `UreqTransport`) to the `sync`/`run` helpers.
//! - `ListController` re-fetches when its `QueryState` changes and applies
//!   only the latest response.
//! - `CrudOrchestrator` validates drafts before building anything, gates
//!   deletes behind confirmation, and refreshes the list on success.
//! - Responses are enveloped `{code, message, data}`; `code == 200` is the
//!   only success. HTTP status is checked first.
//! - Record types are defined independently from the mock-server crate;
//!   integration tests catch schema drift.

#[macro_use]
mod macros;

pub mod client;
pub mod config;
pub mod crud;
pub mod entities;
pub mod envelope;
pub mod error;
pub mod expiry;
pub mod form;
pub mod http;
pub mod list;
pub mod notice;
pub mod page;
pub mod query;
pub mod resource;
pub mod route_stations;
pub mod session;
pub mod transport;
pub mod validate;

pub use client::ResourceClient;
pub use config::{ConfigError, ConsoleConfig};
pub use crud::{CrudOrchestrator, CrudState, Operation, Submission};
pub use envelope::Envelope;
pub use error::ApiError;
pub use expiry::ExpiryBadge;
pub use form::FormState;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use list::{FetchOutcome, ListController, ListFetch};
pub use notice::{Notice, NoticeLevel, Notices};
pub use page::Page;
pub use query::QueryState;
pub use resource::{Identified, Resource};
pub use route_stations::RouteStationsPanel;
pub use session::Session;
pub use transport::{Transport, UreqTransport};
