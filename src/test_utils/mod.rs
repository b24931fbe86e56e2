#![allow(missing_docs)]

pub(crate) mod doubles;
pub(crate) mod html;

pub(crate) use doubles::{RecordingNavigator, RecordingSurface};
pub(crate) use html::{assert_valid_html, must_get_by_test_id, parse_html_str, select_all};
