//! Shared harness: a wiremock backend plus a fully wired client.
#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{json, Value};
use wiremock::MockServer;

use fundportal_auth::{MemoryTokenStore, Navigator, SessionStore, TokenKey, TokenStore, WatchNavigator};
use fundportal_client::{ClientConfig, Gateway, SessionManager};

pub struct Harness {
    pub server: MockServer,
    pub tokens: Arc<MemoryTokenStore>,
    pub session: Arc<SessionStore>,
    pub navigator: Arc<WatchNavigator>,
    pub gateway: Gateway,
    pub manager: SessionManager,
}

impl Harness {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        Self::over(server, Arc::new(MemoryTokenStore::new()))
    }

    /// Harness whose store already holds a token pair.
    pub async fn with_tokens(access: &str, refresh: &str) -> Self {
        let tokens = Arc::new(MemoryTokenStore::new());
        tokens.set(TokenKey::Access, access).unwrap();
        tokens.set(TokenKey::Refresh, refresh).unwrap();
        Self::over(MockServer::start().await, tokens)
    }

    /// A second client over the same backend and token store, as after a
    /// restart.
    pub fn reopen(&self) -> (Arc<SessionStore>, SessionManager) {
        let session = Arc::new(SessionStore::new(self.tokens.clone()));
        let navigator: Arc<dyn Navigator> = Arc::new(WatchNavigator::new());
        let gateway = Gateway::new(&config(&self.server), session.clone(), navigator).unwrap();
        (session, SessionManager::new(gateway))
    }

    fn over(server: MockServer, tokens: Arc<MemoryTokenStore>) -> Self {
        let session = Arc::new(SessionStore::new(tokens.clone()));
        let navigator = Arc::new(WatchNavigator::new());
        let gateway = Gateway::new(
            &config(&server),
            session.clone(),
            navigator.clone() as Arc<dyn Navigator>,
        )
        .unwrap();
        let manager = SessionManager::new(gateway.clone());

        Self {
            server,
            tokens,
            session,
            navigator,
            gateway,
            manager,
        }
    }

    pub fn access(&self) -> Option<String> {
        self.tokens.get(TokenKey::Access)
    }

    pub fn refresh(&self) -> Option<String> {
        self.tokens.get(TokenKey::Refresh)
    }

    pub fn tokens_set_access_only(&self, access: &str) {
        self.tokens.set(TokenKey::Access, access).unwrap();
    }
}

fn config(server: &MockServer) -> ClientConfig {
    ClientConfig::new(&format!("{}/api", server.uri())).unwrap()
}

pub fn user_json(id: i64, username: &str, role: &str) -> Value {
    json!({
        "id": id,
        "username": username,
        "email": format!("{username}@example.com"),
        "first_name": "Test",
        "last_name": "User",
        "role": role
    })
}

pub fn scheme_json(id: i64, name: &str, nav: &str, active: bool) -> Value {
    json!({
        "id": id,
        "name": name,
        "scheme_code": format!("SCH{id:03}"),
        "description": "",
        "category": "Equity",
        "nav": nav,
        "is_active": active,
        "created_at": "2024-05-01T10:00:00Z",
        "updated_at": "2024-05-01T10:00:00Z"
    })
}

pub fn account_json(id: i64, user: i64, balance: &str) -> Value {
    json!({
        "id": id,
        "user": user,
        "user_username": "alice",
        "account_number": "1234567890",
        "ifsc_code": "HDFC0001234",
        "bank_name": "HDFC",
        "balance": balance,
        "created_at": "2024-05-01T10:00:00Z",
        "updated_at": "2024-05-01T10:00:00Z"
    })
}

pub fn summary_json(invested: &str, current: &str) -> Value {
    json!({
        "portfolios": [],
        "total_invested": invested,
        "total_current_value": current,
        "total_profit_loss": "0.00"
    })
}
