//! Create/update/delete sequencing for one resource screen.
//!
//! # Design
//! `CrudOrchestrator` owns the dialog and its `FormState`. `submit` validates
//! the draft and, only if it passes, hands back a `Submission` for the host to
//! execute; `finish` applies the result. Deletes go through a confirmation
//! gate: `request_delete` arms it, `confirm_delete(false)` disarms it with no
//! request built.
//!
//! On success the dialog closes, the form resets, and the list controller is
//! asked to refresh. A late result only closes the dialog it was submitted
//! from; a dialog opened for another record in the meantime stays as it is. On failure the dialog stays open with the draft as the
//! user left it and the list is not touched. Nothing is retried and repeated
//! identical creates are not deduplicated.

use tracing::{info, warn};
use validator::Validate;

use crate::client::ResourceClient;
use crate::error::ApiError;
use crate::form::FormState;
use crate::http::{HttpRequest, HttpResponse};
use crate::list::ListController;
use crate::notice::{Notice, Notices};
use crate::resource::{Identified, Resource};
use crate::transport::Transport;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrudState {
    Idle,
    Submitting,
    Success,
    /// Carries the user-facing message.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update(String),
    Delete(String),
}

impl Operation {
    /// Whether `form` is the one this operation was submitted from.
    pub(crate) fn submitted_from<D>(&self, form: &FormState<D>) -> bool {
        match self {
            Operation::Create => form.editing().is_none(),
            Operation::Update(id) => form.editing() == Some(id.as_str()),
            Operation::Delete(_) => false,
        }
    }

    fn verb(&self) -> &'static str {
        match self {
            Operation::Create => "created",
            Operation::Update(_) => "updated",
            Operation::Delete(_) => "deleted",
        }
    }
}

/// A mutation ready for the host to execute.
#[derive(Debug, Clone)]
pub struct Submission {
    pub operation: Operation,
    pub request: HttpRequest,
}

pub struct CrudOrchestrator<R: Resource> {
    client: ResourceClient,
    state: CrudState,
    dialog_open: bool,
    form: FormState<R::Draft>,
    pending_delete: Option<String>,
    notices: Notices,
}

impl<R: Resource> CrudOrchestrator<R> {
    pub fn new(client: ResourceClient) -> Self {
        Self {
            client,
            state: CrudState::Idle,
            dialog_open: false,
            form: FormState::default(),
            pending_delete: None,
            notices: Notices::default(),
        }
    }

    pub fn state(&self) -> &CrudState {
        &self.state
    }

    pub fn dialog_open(&self) -> bool {
        self.dialog_open
    }

    pub fn form(&self) -> &FormState<R::Draft> {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState<R::Draft> {
        &mut self.form
    }

    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain()
    }

    pub fn open_create(&mut self) {
        self.form.reset();
        self.dialog_open = true;
        self.state = CrudState::Idle;
    }

    pub fn open_edit(&mut self, detail: &R::Detail) {
        self.form = FormState::for_edit(detail.id(), R::draft_from_detail(detail));
        self.dialog_open = true;
        self.state = CrudState::Idle;
    }

    /// Cancel: the draft is discarded.
    pub fn close_dialog(&mut self) {
        self.dialog_open = false;
        self.form.reset();
        self.state = CrudState::Idle;
    }

    /// Validate the draft and build the create or update request.
    ///
    /// A validation failure moves to `Failed` and builds nothing.
    pub fn submit(&mut self) -> Result<Submission, ApiError> {
        if let Err(errors) = self.form.draft().validate() {
            let error = ApiError::Validation(errors);
            warn!(resource = R::NAME, error = %error, "draft rejected before submit");
            self.fail(&error);
            return Err(error);
        }

        let built = match self.form.editing() {
            None => self
                .client
                .build_create::<R>(self.form.draft())
                .map(|request| (Operation::Create, request)),
            Some(id) => self
                .client
                .build_update::<R>(id, self.form.draft())
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

    /// Arm the confirmation gate for `id`. Nothing is sent yet.
    pub fn request_delete(&mut self, id: impl Into<String>) {
        self.pending_delete = Some(id.into());
    }

    /// Answer the confirmation prompt. Declining builds no request and
    /// leaves state as it was.
    pub fn confirm_delete(&mut self, confirmed: bool) -> Option<Submission> {
        let id = self.pending_delete.take()?;
        if !confirmed {
            info!(resource = R::NAME, id = %id, "delete declined");
            return None;
        }
        self.state = CrudState::Submitting;
        let request = self.client.build_delete::<R>(&id);
        Some(Submission {
            operation: Operation::Delete(id),
            request,
        })
    }

    /// Apply the host's result for a submission. Returns the record echoed
    /// by the server for creates and updates, when there is one.
    pub fn finish(
        &mut self,
        operation: Operation,
        result: Result<HttpResponse, ApiError>,
        list: &mut ListController<R>,
    ) -> Result<Option<R::Detail>, ApiError> {
        let parsed = result.and_then(|response| match &operation {
            Operation::Create => self.client.parse_create::<R>(response),
            Operation::Update(_) => self.client.parse_update::<R>(response),
            Operation::Delete(_) => self.client.parse_delete(response).map(|_| None),
        });

        match parsed {
            Ok(record) => {
                info!(resource = R::NAME, operation = ?operation, "mutation succeeded");
                self.state = CrudState::Success;
                if self.dialog_belongs_to(&operation) {
                    self.dialog_open = false;
                    self.form.reset();
                }
                self.notices.success(format!("{} {}", R::NAME, operation.verb()));
                list.refresh();
                Ok(record)
            }
            Err(error) => {
                warn!(resource = R::NAME, operation = ?operation, error = %error, "mutation failed");
                self.fail(&error);
                Err(error)
            }
        }
    }

    /// Execute a submission through `transport` and finish it.
    pub fn run<T: Transport + ?Sized>(
        &mut self,
        submission: Submission,
        transport: &T,
        list: &mut ListController<R>,
    ) -> Result<Option<R::Detail>, ApiError> {
        let result = transport.execute(&submission.request);
        self.finish(submission.operation, result, list)
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
