//! Symbolic routes and the navigator that switches the displayed view.

use std::{fmt, str::FromStr};

use crate::endpoints;

/// A view the application can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// The log in page.
    Login,
    /// The list of the employee's bills.
    Bills,
    /// The new bill form.
    NewBill,
    /// The admin dashboard.
    Dashboard,
}

impl Route {
    /// The symbolic key of the route, e.g. "NewBill".
    pub fn key(self) -> &'static str {
        match self {
            Route::Login => "Login",
            Route::Bills => "Bills",
            Route::NewBill => "NewBill",
            Route::Dashboard => "Dashboard",
        }
    }

    /// The path of the view behind the route.
    pub fn path(self) -> &'static str {
        match self {
            Route::Login => endpoints::LOG_IN_VIEW,
            Route::Bills => endpoints::BILLS_VIEW,
            Route::NewBill => endpoints::NEW_BILL_VIEW,
            Route::Dashboard => endpoints::DASHBOARD_VIEW,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The string did not name a known route.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown route \"{0}\"")]
pub struct UnknownRoute(pub String);

impl FromStr for Route {
    type Err = UnknownRoute;

    /// Parse either a route key ("Bills") or a route path ("#employee/bills").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Route::Login, Route::Bills, Route::NewBill, Route::Dashboard]
            .into_iter()
            .find(|route| route.key() == s || route.path() == s)
            .ok_or_else(|| UnknownRoute(s.to_owned()))
    }
}

/// Replaces the currently displayed view.
pub trait Navigator {
    /// Display the view for `route`.
    fn navigate(&self, route: Route);
}

impl<F: Fn(Route)> Navigator for F {
    fn navigate(&self, route: Route) {
        self(route)
    }
}

#[cfg(test)]
mod routing_tests {
    use std::cell::RefCell;

    use super::{Navigator, Route, UnknownRoute};

    #[test]
    fn parses_keys_and_paths() {
        assert_eq!("Bills".parse(), Ok(Route::Bills));
        assert_eq!("#employee/bill/new".parse(), Ok(Route::NewBill));
        assert_eq!("/".parse(), Ok(Route::Login));
        assert_eq!(
            "Nope".parse::<Route>(),
            Err(UnknownRoute("Nope".to_owned()))
        );
    }

    #[test]
    fn closures_navigate() {
        let visited = RefCell::new(Vec::new());
        let navigator = |route: Route| visited.borrow_mut().push(route);

        navigator.navigate(Route::NewBill);
        navigator.navigate(Route::Bills);

        assert_eq!(*visited.borrow(), vec![Route::NewBill, Route::Bills]);
    }
}
