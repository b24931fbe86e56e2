//! Billed is the client side of an expense reporting tool.
//!
//! Employees upload a receipt, fill in the new bill form and send the bill to a
//! remote store. They can then browse the bills they sent and check whether
//! each was accepted.
//!
//! This library holds the logic behind those two pages:
//! - [SubmissionController] validates and uploads the receipt, then sends the
//!   bill built from the form.
//! - [BillsPresenter] sorts bills newest first, renders them and opens receipt
//!   previews.
//!
//! Collaborators such as the remote store, the session and navigation are
//! traits so the host can plug in its own.

#![warn(missing_docs)]

mod bill;
mod bills;
mod endpoints;
mod error;
mod file;
mod html;
mod new_bill;
mod routing;
pub mod stores;
mod user;

#[cfg(test)]
mod test_utils;

pub use bill::{BillRecord, BillStatus, DEFAULT_PCT, MAX_AMOUNT, NewBillForm, UploadedFile};
pub use bills::{
    BillList, BillListEntry, BillsPresenter, BillsView, PreviewSurface, StatusBadge, bill_preview,
    bills_page,
};
pub use endpoints::{BILLS_VIEW, DASHBOARD_VIEW, LOG_IN_VIEW, NEW_BILL_VIEW};
pub use error::{Error, SESSION_ERROR_MESSAGE};
pub use file::{
    ExtensionMatch, FILE_FORMAT_ERROR_MESSAGE, FormData, FormDataValue, SelectedFile,
    UploadPolicy,
};
pub use html::error_view;
pub use new_bill::{
    DraftState, EXPENSE_TYPES, FileSelectionOutcome, HtmlNewBillView, NewBillView,
    RejectionReason, SubmissionController, SubmitOutcome, new_bill_form, new_bill_page,
};
pub use routing::{Navigator, Route, UnknownRoute};
pub use user::{
    KeyValueStorage, LocalStorageSession, MemoryStorage, SESSION_USER_KEY, SessionAccessor, User,
    UserType,
};
