//! Navigation hook for forced redirects.
//!
//! The gateway performs exactly one kind of navigation on its own: sending
//! the user to the login route after an unrecoverable refresh failure.

use tokio::sync::watch;

use crate::Route;

pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Logs redirects; for headless callers that have nothing to navigate.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn navigate(&self, route: Route) {
        tracing::info!(route = %route, "navigation requested");
    }
}

/// Publishes the most recent redirect on a `watch` channel for a UI layer
/// to follow.
#[derive(Debug)]
pub struct WatchNavigator {
    tx: watch::Sender<Option<Route>>,
}

impl WatchNavigator {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Route>> {
        self.tx.subscribe()
    }

    pub fn last_redirect(&self) -> Option<Route> {
        *self.tx.borrow()
    }
}

impl Default for WatchNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator for WatchNavigator {
    fn navigate(&self, route: Route) {
        tracing::info!(route = %route, "navigation requested");
        self.tx.send_replace(Some(route));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_last_redirect() {
        let nav = WatchNavigator::new();
        let rx = nav.subscribe();
        assert_eq!(nav.last_redirect(), None);

        nav.navigate(Route::Login);

        assert_eq!(nav.last_redirect(), Some(Route::Login));
        assert_eq!(*rx.borrow(), Some(Route::Login));
    }
}
