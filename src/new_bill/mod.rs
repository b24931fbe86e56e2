//! The new bill page: receipt upload and bill submission.

mod controller;
mod view;

pub use controller::{
    DraftState, FileSelectionOutcome, RejectionReason, SubmissionController, SubmitOutcome,
};
pub use view::{EXPENSE_TYPES, HtmlNewBillView, NewBillView, new_bill_form, new_bill_page};
