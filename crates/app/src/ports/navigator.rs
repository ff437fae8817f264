//! Navigator port — moves the user interface to another view.

use std::fmt;
use std::sync::Arc;

/// Views the use-cases can send the user to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The "page not found" view.
    NotFound,
    /// Whatever view the user came from.
    Back,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => f.write_str("404"),
            Self::Back => f.write_str("back"),
        }
    }
}

/// Issues navigations. Fire-and-forget: navigating never fails.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

impl<T: Navigator> Navigator for Arc<T> {
    fn navigate(&self, route: Route) {
        (**self).navigate(route);
    }
}

impl<T: Navigator> Navigator for &T {
    fn navigate(&self, route: Route) {
        (**self).navigate(route);
    }
}
