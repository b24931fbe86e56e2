//! The submission controller: validates the selected receipt, uploads it and
//! sends the bill built from the form.
//!
//! The controller owns one draft for one visit to the new bill page. Its
//! methods take `&self` so that a file selection and a submit can be in flight
//! at the same time on a single thread, the way UI events arrive.

use std::cell::{Cell, RefCell};

use crate::{
    Error,
    bill::{BillRecord, NewBillForm, UploadedFile},
    file::{FormData, SelectedFile, UploadPolicy},
    new_bill::view::NewBillView,
    routing::{Navigator, Route},
    stores::{BillStore, CreatedBill, UpdateRequest},
    user::SessionAccessor,
};

/// Why the last selected file cannot be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    /// The file name does not have an accepted extension.
    UnsupportedFormat,
    /// The store rejected the upload.
    UploadFailed,
}

/// The state of the bill being drafted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftState {
    /// No file has been selected yet.
    NoFile,
    /// The last selected file cannot be used.
    Rejected(RejectionReason),
    /// The last selected file is being uploaded.
    ///
    /// `attempt` identifies the selection; only the upload started by the
    /// latest selection may change the draft when it resolves.
    Uploading {
        /// The selection number this upload belongs to.
        attempt: u64,
        /// The name of the file being uploaded.
        file_name: String,
    },
    /// The receipt is uploaded and the bill can be sent.
    Ready(UploadedFile),
    /// The bill is being sent.
    Submitting(UploadedFile),
    /// The bill was sent. The controller takes no further input.
    Submitted,
}

impl DraftState {
    /// `None` before any file is processed, then whether the draft holds an
    /// uploaded receipt.
    pub fn file_is_valid(&self) -> Option<bool> {
        match self {
            DraftState::NoFile => None,
            DraftState::Ready(_) | DraftState::Submitting(_) => Some(true),
            DraftState::Rejected(_) | DraftState::Uploading { .. } | DraftState::Submitted => {
                Some(false)
            }
        }
    }

    /// The uploaded receipt, if the draft holds one.
    pub fn uploaded_file(&self) -> Option<&UploadedFile> {
        match self {
            DraftState::Ready(file) | DraftState::Submitting(file) => Some(file),
            _ => None,
        }
    }
}

/// What happened to a selected file.
#[derive(Debug, Clone, PartialEq)]
pub enum FileSelectionOutcome {
    /// The file does not have an accepted extension and was not uploaded.
    Rejected,
    /// The file was uploaded and the bill can be sent.
    Ready(UploadedFile),
    /// The upload failed. The draft stays blocked until another file is
    /// uploaded.
    UploadFailed(Error),
    /// Another file was selected before this upload resolved, so its result
    /// was discarded.
    Superseded,
    /// The bill has already been submitted.
    Closed,
}

/// What happened to a submit event.
///
/// In every case the event is handled; the page is never submitted natively.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The draft has no uploaded receipt, so nothing was sent.
    Blocked,
    /// The bill was sent and the bills list is displayed.
    Submitted,
    /// The bill could not be sent. The draft is kept so the user can retry.
    Failed(Error),
}

/// Drives one bill submission from file selection to the bills list.
pub struct SubmissionController<S, A, N, V> {
    store: S,
    session: A,
    navigator: N,
    view: V,
    policy: UploadPolicy,
    state: RefCell<DraftState>,
    attempts: Cell<u64>,
}

impl<S, A, N, V> SubmissionController<S, A, N, V>
where
    S: BillStore,
    A: SessionAccessor,
    N: Navigator,
    V: NewBillView,
{
    /// Create a controller with an empty draft and the default [UploadPolicy].
    pub fn new(store: S, session: A, navigator: N, view: V) -> Self {
        Self {
            store,
            session,
            navigator,
            view,
            policy: UploadPolicy::default(),
            state: RefCell::new(DraftState::NoFile),
            attempts: Cell::new(0),
        }
    }

    /// Use `policy` to decide which files may be uploaded.
    pub fn with_policy(mut self, policy: UploadPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// A snapshot of the draft.
    pub fn state(&self) -> DraftState {
        self.state.borrow().clone()
    }

    /// See [DraftState::file_is_valid].
    pub fn file_is_valid(&self) -> Option<bool> {
        self.state.borrow().file_is_valid()
    }

    /// The name of the uploaded receipt.
    pub fn file_name(&self) -> Option<String> {
        self.uploaded_field(|file| &file.file_name)
    }

    /// Where the store keeps the uploaded receipt.
    pub fn remote_file_url(&self) -> Option<String> {
        self.uploaded_field(|file| &file.file_url)
    }

    /// The ID the store gave the bill when the receipt was uploaded.
    pub fn remote_record_id(&self) -> Option<String> {
        self.uploaded_field(|file| &file.key)
    }

    fn uploaded_field(&self, field: impl Fn(&UploadedFile) -> &String) -> Option<String> {
        self.state.borrow().uploaded_file().map(field).cloned()
    }

    /// Handle a file picked from the file input.
    ///
    /// Files without an accepted extension are rejected with an error next to
    /// the file input. Accepted files are uploaded along with the user's
    /// email. Upload failures are logged and shown, and never propagate.
    pub async fn on_file_selected(&self, file: SelectedFile) -> FileSelectionOutcome {
        if *self.state.borrow() == DraftState::Submitted {
            tracing::debug!("Ignoring file '{}', the bill was already sent", file.name);
            return FileSelectionOutcome::Closed;
        }

        let attempt = self.attempts.get() + 1;
        self.attempts.set(attempt);

        if !self.policy.accepts(&file.name) {
            let error = Error::UnsupportedFileFormat(file.name);
            tracing::debug!("Rejected file: {error}");
            self.state
                .replace(DraftState::Rejected(RejectionReason::UnsupportedFormat));
            self.view.show_file_error(&error.user_message());
            return FileSelectionOutcome::Rejected;
        }

        self.view.hide_file_error();
        self.view.hide_submit_error();
        let file_name = file.name.clone();
        self.state.replace(DraftState::Uploading {
            attempt,
            file_name: file_name.clone(),
        });

        let result = self.upload(file).await;

        if !self.is_latest_upload(attempt) {
            tracing::debug!("Discarding upload of '{file_name}', a newer file was selected");
            return FileSelectionOutcome::Superseded;
        }

        match result {
            Ok(CreatedBill { file_url, key }) => {
                tracing::info!("Uploaded receipt '{file_name}' for bill {key}");
                let uploaded = UploadedFile {
                    file_name,
                    file_url,
                    key,
                };
                self.state.replace(DraftState::Ready(uploaded.clone()));

                FileSelectionOutcome::Ready(uploaded)
            }
            Err(error) => {
                tracing::error!("Could not upload receipt '{file_name}': {error}");
                self.state
                    .replace(DraftState::Rejected(RejectionReason::UploadFailed));
                self.view.show_upload_error(&error.user_message());

                FileSelectionOutcome::UploadFailed(error)
            }
        }
    }

    /// Handle the new bill form being submitted.
    ///
    /// Does nothing unless a receipt has been uploaded. On success the bills
    /// list is displayed; on failure the draft is kept and the error is shown.
    pub async fn on_submit(&self, form: &NewBillForm) -> SubmitOutcome {
        let uploaded = match &*self.state.borrow() {
            DraftState::Ready(uploaded) => uploaded.clone(),
            state => {
                tracing::debug!("Ignoring submit, the draft is not ready: {state:?}");
                return SubmitOutcome::Blocked;
            }
        };

        self.view.hide_submit_error();

        let request = match self.build_update(form, &uploaded) {
            Ok(request) => request,
            Err(error) => {
                tracing::warn!("Could not build bill {}: {error}", uploaded.key);
                self.view.show_submit_error(&error.user_message());
                return SubmitOutcome::Failed(error);
            }
        };

        self.state
            .replace(DraftState::Submitting(uploaded.clone()));

        match self.store.update(request).await {
            Ok(()) => {
                tracing::info!("Sent bill {}", uploaded.key);
                self.state.replace(DraftState::Submitted);
                self.navigator.navigate(Route::Bills);

                SubmitOutcome::Submitted
            }
            Err(error) => {
                let error = Error::Update(error);
                tracing::error!("Could not send bill {}: {error}", uploaded.key);

                {
                    let mut state = self.state.borrow_mut();
                    // A file selected while sending takes precedence.
                    if matches!(*state, DraftState::Submitting(_)) {
                        *state = DraftState::Ready(uploaded);
                    }
                }

                self.view.show_submit_error(&error.user_message());

                SubmitOutcome::Failed(error)
            }
        }
    }

    async fn upload(&self, file: SelectedFile) -> Result<CreatedBill, Error> {
        let user = self.session.current_user()?;

        let mut payload = FormData::new();
        payload.append_file("file", file);
        payload.append_text("email", &user.email);

        self.store.create(payload).await.map_err(Error::Upload)
    }

    fn build_update(
        &self,
        form: &NewBillForm,
        uploaded: &UploadedFile,
    ) -> Result<UpdateRequest, Error> {
        let user = self.session.current_user()?;
        let bill = BillRecord::pending(&user.email, form, uploaded)?;

        Ok(UpdateRequest {
            data: serde_json::to_string(&bill)?,
            selector: uploaded.key.clone(),
        })
    }

    fn is_latest_upload(&self, attempt: u64) -> bool {
        matches!(
            &*self.state.borrow(),
            DraftState::Uploading { attempt: current, .. } if *current == attempt
        )
    }
}
