use std::{cell::RefCell, rc::Rc};

use maud::Markup;

use crate::{
    bills::{BillsView, PreviewSurface},
    routing::{Navigator, Route},
};

/// Records every route it is asked to display.
///
/// Clones share the same record so a test can keep one after handing the
/// other to a controller.
#[derive(Debug, Clone, Default)]
pub(crate) struct RecordingNavigator {
    visited: Rc<RefCell<Vec<Route>>>,
}

impl RecordingNavigator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn visited(&self) -> Vec<Route> {
        self.visited.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.visited.borrow_mut().push(route);
    }
}

/// Keeps everything shown on it as an HTML string.
#[derive(Debug, Default)]
pub(crate) struct RecordingSurface {
    shown: RefCell<Vec<String>>,
}

impl RecordingSurface {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn shown(&self) -> Vec<String> {
        self.shown.borrow().clone()
    }

    pub(crate) fn last(&self) -> Option<String> {
        self.shown.borrow().last().cloned()
    }
}

impl BillsView for RecordingSurface {
    fn show(&self, markup: Markup) {
        self.shown.borrow_mut().push(markup.into_string());
    }
}

impl PreviewSurface for RecordingSurface {
    fn open(&self, markup: Markup) {
        self.shown.borrow_mut().push(markup.into_string());
    }
}
