//! Station management inside a route's detail view.
//!
//! Same request/result split as the list and CRUD controllers: methods hand
//! out requests, the host executes them, and `complete_load` / `finish` apply
//! the results. Loads are sequence-tagged so a late response for an older
//! load cannot overwrite a newer one. Any successful mutation triggers a
//! reload on the next `poll`.

use tracing::{debug, info, warn};
use validator::Validate;

use crate::client::ResourceClient;
use crate::crud::{CrudState, Operation, Submission};
use crate::entities::route_station::{self, Leg, RouteStation, RouteStationDraft, SequenceCollision};
use crate::error::ApiError;
use crate::form::FormState;
use crate::http::HttpResponse;
use crate::list::{FetchOutcome, ListFetch};
use crate::notice::{Notice, Notices};
use crate::transport::Transport;

pub struct RouteStationsPanel {
    client: ResourceClient,
    route_id: String,
    stations: Vec<RouteStation>,
    loaded: bool,
    reload_requested: bool,
    loading: bool,
    issued: u64,
    dialog_open: bool,
    form: FormState<RouteStationDraft>,
    pending_remove: Option<String>,
    state: CrudState,
    notices: Notices,
}

impl RouteStationsPanel {
    pub fn new(client: ResourceClient, route_id: impl Into<String>) -> Self {
        Self {
            client,
            route_id: route_id.into(),
            stations: Vec::new(),
            loaded: false,
            reload_requested: false,
            loading: false,
            issued: 0,
            dialog_open: false,
            form: FormState::default(),
            pending_remove: None,
            state: CrudState::Idle,
            notices: Notices::default(),
        }
    }

    pub fn route_id(&self) -> &str {
        &self.route_id
    }

    /// Stations as the server returned them.
    pub fn stations(&self) -> &[RouteStation] {
        &self.stations
    }

    pub fn ordered(&self) -> Vec<&RouteStation> {
        route_station::ordered(&self.stations)
    }

    pub fn legs(&self) -> Vec<Leg> {
        route_station::legs(&self.stations)
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn state(&self) -> &CrudState {
        &self.state
    }

    pub fn dialog_open(&self) -> bool {
        self.dialog_open
    }

    pub fn form(&self) -> &FormState<RouteStationDraft> {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState<RouteStationDraft> {
        &mut self.form
    }

    pub fn pending_remove(&self) -> Option<&str> {
        self.pending_remove.as_deref()
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain()
    }

    pub fn reload(&mut self) {
        self.reload_requested = true;
    }

    /// Issue a load on first use or after `reload`.
    pub fn poll(&mut self) -> Option<ListFetch> {
        if self.loaded && !self.reload_requested {
            return None;
        }
        self.loaded = true;
        self.reload_requested = false;
        self.issued += 1;
        self.loading = true;
        let request = self.client.build_route_stations(&self.route_id);
        debug!(route = %self.route_id, seq = self.issued, "route stations load issued");
        Some(ListFetch {
            seq: self.issued,
            request,
        })
    }

    pub fn complete_load(&mut self, seq: u64, result: Result<HttpResponse, ApiError>) -> FetchOutcome {
        if seq != self.issued {
            return FetchOutcome::Stale;
        }
        self.loading = false;
        match result.and_then(|response| self.client.parse_route_stations(response)) {
            Ok(stations) => {
                self.stations = stations;
                FetchOutcome::Applied
            }
            Err(e) => {
                warn!(route = %self.route_id, error = %e, "route stations load failed");
                self.notices.error(e.user_message());
                FetchOutcome::Failed
            }
        }
    }

    pub fn sync<T: Transport + ?Sized>(&mut self, transport: &T) -> Option<FetchOutcome> {
        let fetch = self.poll()?;
        let result = transport.execute(&fetch.request);
        Some(self.complete_load(fetch.seq, result))
    }

    /// Open the add dialog, proposing the next free sequence.
    pub fn open_add(&mut self) {
        self.form.reset();
        let next = route_station::next_sequence(&self.stations);
        self.form.edit(|draft| draft.sequence = next);
        self.dialog_open = true;
        self.state = CrudState::Idle;
    }

    pub fn open_edit(&mut self, route_station_id: &str) -> bool {
        let Some(existing) = self
            .stations
            .iter()
            .find(|rs| rs.route_station_uuid == route_station_id)
        else {
            return false;
        };
        self.form = FormState::for_edit(route_station_id, RouteStationDraft::from(existing));
        self.dialog_open = true;
        self.state = CrudState::Idle;
        true
    }

    pub fn close_dialog(&mut self) {
        self.dialog_open = false;
        self.form.reset();
        self.state = CrudState::Idle;
    }

    /// Live warning for the sequence currently in the form.
    pub fn sequence_warning(&self) -> Option<SequenceCollision> {
        self.form.sequence_warning(&self.stations)
    }

    /// Validate and build the add or update request. A sequence collision
    /// is reported as a warning notice and does not block the submit.
    pub fn submit(&mut self) -> Result<Submission, ApiError> {
        if let Err(errors) = self.form.draft().validate() {
            let error = ApiError::Validation(errors);
            self.fail(&error);
            return Err(error);
        }
        if let Some(collision) = self.sequence_warning() {
            warn!(route = %self.route_id, sequence = collision.sequence, "sequence already in use");
            self.notices.warning(collision.message());
        }

        let built = match self.form.editing() {
            None => self
                .client
                .build_add_route_station(&self.route_id, self.form.draft())
                .map(|request| (Operation::Create, request)),
            Some(id) => self
                .client
                .build_update_route_station(&self.route_id, id, self.form.draft())
                .map(|request| (Operation::Update(id.to_string()), request)),
        };
        match built {
            Ok((operation, request)) => {
                self.state = CrudState::Submitting;
                Ok(Submission { operation, request })
            }
            Err(error) => {
                self.fail(&error);
                Err(error)
            }
        }
    }

    pub fn request_remove(&mut self, route_station_id: impl Into<String>) {
        self.pending_remove = Some(route_station_id.into());
    }

    pub fn confirm_remove(&mut self, confirmed: bool) -> Option<Submission> {
        let id = self.pending_remove.take()?;
        if !confirmed {
            return None;
        }
        self.state = CrudState::Submitting;
        let request = self.client.build_remove_route_station(&self.route_id, &id);
        Some(Submission {
            operation: Operation::Delete(id),
            request,
        })
    }

    pub fn finish(&mut self, operation: Operation, result: Result<HttpResponse, ApiError>) -> Result<(), ApiError> {
        match result.and_then(|response| self.client.parse_ack(response)) {
            Ok(()) => {
                info!(route = %self.route_id, operation = ?operation, "route station change applied");
                self.state = CrudState::Success;
                if self.dialog_belongs_to(&operation) {
                    self.dialog_open = false;
                    self.form.reset();
                }
                self.reload();
                Ok(())
            }
            Err(error) => {
                warn!(route = %self.route_id, operation = ?operation, error = %error, "route station change failed");
                self.fail(&error);
                Err(error)
            }
        }
    }

    pub fn run<T: Transport + ?Sized>(&mut self, submission: Submission, transport: &T) -> Result<(), ApiError> {
        let result = transport.execute(&submission.request);
        self.finish(submission.operation, result)
    }

    fn dialog_belongs_to(&self, operation: &Operation) -> bool {
        self.dialog_open && operation.submitted_from(&self.form)
    }

    fn fail(&mut self, error: &ApiError) {
        let message = error.user_message();
        self.state = CrudState::Failed(message.clone());
        self.notices.error(message);
    }
}
