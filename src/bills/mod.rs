//! The employee's bills list: sorting, rendering and file previews.

mod presenter;
mod view;

pub use presenter::{BillList, BillListEntry, BillsPresenter, StatusBadge};
pub use view::{BillsView, PreviewSurface, bill_preview, bills_page};
