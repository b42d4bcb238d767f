//! Paginated list state with fetch-on-change.
//!
//! # Design
//! The controller owns the `QueryState` and remembers which query revision it
//! last fetched. `poll` issues a new fetch whenever the query changed (or a
//! refresh was requested) and tags it with a sequence number. The host runs
//! the request and hands the result to `complete` with that tag. Only the
//! latest issued sequence may touch `data`: a slower response to an older
//! query is discarded, whatever order responses arrive in.
//!
//! Nothing is cancelled. A stale request still runs to completion on the
//! host; its response is simply dropped.

use tracing::{debug, warn};

use crate::client::ResourceClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::notice::{Notice, Notices};
use crate::page::Page;
use crate::query::QueryState;
use crate::resource::{Identified, Resource};
use crate::transport::Transport;

/// A list request handed to the host, tagged for last-request-wins.
#[derive(Debug, Clone)]
pub struct ListFetch {
    pub seq: u64,
    pub request: HttpRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response was the latest and replaced `data`.
    Applied,
    /// The latest fetch failed; `data` kept its previous value.
    Failed,
    /// A newer fetch was issued since; the response was dropped.
    Stale,
}

pub struct ListController<R: Resource> {
    client: ResourceClient,
    query: QueryState<R::Filter>,
    data: Option<Page<R::ListItem>>,
    loading: bool,
    error: Option<String>,
    notices: Notices,
    issued: u64,
    fetched_revision: Option<u64>,
    refresh_requested: bool,
}

impl<R: Resource> ListController<R> {
    pub fn new(client: ResourceClient, page_size: u32) -> Self {
        Self {
            client,
            query: QueryState::new(page_size),
            data: None,
            loading: false,
            error: None,
            notices: Notices::default(),
            issued: 0,
            fetched_revision: None,
            refresh_requested: false,
        }
    }

    pub fn client(&self) -> &ResourceClient {
        &self.client
    }

    pub fn query(&self) -> &QueryState<R::Filter> {
        &self.query
    }

    pub fn data(&self) -> Option<&Page<R::ListItem>> {
        self.data.as_ref()
    }

    pub fn items(&self) -> &[R::ListItem] {
        self.data.as_ref().map(|p| p.list.as_slice()).unwrap_or(&[])
    }

    pub fn find(&self, id: &str) -> Option<&R::ListItem> {
        self.items().iter().find(|item| item.id() == id)
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Message of the most recent failed fetch, cleared by the next success.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notices_mut(&mut self) -> &mut Notices {
        &mut self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain()
    }

    // Query changes. Each one makes the next `poll` issue a fetch.

    pub fn set_filters(&mut self, filters: R::Filter) {
        self.query.set_filters(filters);
    }

    pub fn set_page(&mut self, page: u32) {
        self.query.set_page(page);
    }

    pub fn set_size(&mut self, size: u32) {
        self.query.set_size(size);
    }

    pub fn reset(&mut self) {
        self.query.reset();
    }

    /// Re-fetch the current query, e.g. after a successful mutation.
    pub fn refresh(&mut self) {
        self.refresh_requested = true;
    }

    /// Whether the displayed data no longer matches the query.
    pub fn needs_fetch(&self) -> bool {
        self.refresh_requested || self.fetched_revision != Some(self.query.revision())
    }

    /// Issue a fetch if one is due.
    pub fn poll(&mut self) -> Option<ListFetch> {
        if !self.needs_fetch() {
            return None;
        }
        self.fetched_revision = Some(self.query.revision());
        self.refresh_requested = false;

        match self.client.build_list_for::<R>(&self.query) {
            Ok(request) => {
                self.issued += 1;
                self.loading = true;
                debug!(resource = R::NAME, seq = self.issued, url = %request.url, "list fetch issued");
                Some(ListFetch {
                    seq: self.issued,
                    request,
                })
            }
            Err(e) => {
                warn!(resource = R::NAME, error = %e, "could not build list request");
                self.fail(&e);
                None
            }
        }
    }

    /// Apply the result of fetch `seq`.
    pub fn complete(&mut self, seq: u64, result: Result<HttpResponse, ApiError>) -> FetchOutcome {
        if seq != self.issued {
            debug!(resource = R::NAME, seq, latest = self.issued, "discarding stale list response");
            return FetchOutcome::Stale;
        }
        self.loading = false;

        match result.and_then(|response| self.client.parse_list::<R>(response)) {
            Ok(page) => {
                self.data = Some(page);
                self.error = None;
                FetchOutcome::Applied
            }
            Err(e) => {
                warn!(resource = R::NAME, seq, error = %e, "list fetch failed");
                self.fail(&e);
                FetchOutcome::Failed
            }
        }
    }

    /// Poll, execute, and complete in one blocking step.
    pub fn sync<T: Transport + ?Sized>(&mut self, transport: &T) -> Option<FetchOutcome> {
        let fetch = self.poll()?;
        let result = transport.execute(&fetch.request);
        Some(self.complete(fetch.seq, result))
    }

    fn fail(&mut self, error: &ApiError) {
        let message = error.user_message();
        self.error = Some(message.clone());
        self.notices.error(message);
    }
}
