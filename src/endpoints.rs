//! The view paths the navigator switches between.
//!
//! Paths are hash routes, so switching views never reloads the page.

/// The log in page.
pub const LOG_IN_VIEW: &str = "/";
/// The page listing the signed-in employee's bills.
pub const BILLS_VIEW: &str = "#employee/bills";
/// The page for submitting a new bill.
pub const NEW_BILL_VIEW: &str = "#employee/bill/new";
/// The admin dashboard for reviewing bills.
pub const DASHBOARD_VIEW: &str = "#admin/dashboard";
