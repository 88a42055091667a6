//! Role-gated routing policy.
//!
//! - No IO
//! - No panics
//! - Pure function of session state and route

use serde::{Deserialize, Serialize};

use crate::{Role, SessionState};

/// Navigable portal routes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Home,
    Login,
    Register,
    Dashboard,
    BankAccount,
    MutualFunds,
    Portfolio,
    Admin,
    AdminSchemes,
    AdminUsers,
}

/// Who may see a route.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Access {
    Public,
    /// `/` never renders; it always redirects.
    RoleHome,
    Requires(Role),
}

/// Outcome of guarding a route.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session still loading; show a placeholder.
    Pending,
    Render,
    Redirect(Route),
}

impl Route {
    pub const ALL: [Route; 10] = [
        Route::Home,
        Route::Login,
        Route::Register,
        Route::Dashboard,
        Route::BankAccount,
        Route::MutualFunds,
        Route::Portfolio,
        Route::Admin,
        Route::AdminSchemes,
        Route::AdminUsers,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Dashboard => "/dashboard",
            Route::BankAccount => "/bank-account",
            Route::MutualFunds => "/mutual-funds",
            Route::Portfolio => "/portfolio",
            Route::Admin => "/admin",
            Route::AdminSchemes => "/admin/schemes",
            Route::AdminUsers => "/admin/users",
        }
    }

    /// Resolve a path; a trailing slash is ignored.
    pub fn from_path(path: &str) -> Option<Route> {
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        Route::ALL.into_iter().find(|r| r.path() == normalized)
    }

    pub fn access(&self) -> Access {
        match self {
            Route::Home => Access::RoleHome,
            Route::Login | Route::Register => Access::Public,
            Route::Dashboard | Route::BankAccount | Route::MutualFunds | Route::Portfolio => {
                Access::Requires(Role::Customer)
            }
            Route::Admin | Route::AdminSchemes | Route::AdminUsers => Access::Requires(Role::Admin),
        }
    }
}

impl core::fmt::Display for Route {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.path())
    }
}

/// Landing route for a role.
pub fn home_for(role: Role) -> Route {
    match role {
        Role::Admin => Route::Admin,
        Role::Customer => Route::Dashboard,
    }
}

/// Decide what to do with a navigation to `route` in session `state`.
pub fn guard(state: &SessionState, route: Route) -> GuardDecision {
    let access = route.access();
    if access == Access::Public {
        return GuardDecision::Render;
    }

    let user = match state {
        SessionState::Loading => return GuardDecision::Pending,
        SessionState::Anonymous => return GuardDecision::Redirect(Route::Login),
        SessionState::Authenticated(user) => user,
    };

    match access {
        Access::Requires(required) if required != user.role => {
            GuardDecision::Redirect(home_for(user.role))
        }
        Access::RoleHome => GuardDecision::Redirect(home_for(user.role)),
        _ => GuardDecision::Render,
    }
}
