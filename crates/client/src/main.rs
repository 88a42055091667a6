//! `fundportal` command-line entry point.
//!
//! Restores the persisted session (or logs in with `FUNDPORTAL_USERNAME` /
//! `FUNDPORTAL_PASSWORD`) and prints the signed-in user's home view as JSON.
//! `fundportal logout` drops the persisted session.

use std::sync::Arc;

use anyhow::{bail, Context};

use fundportal_auth::{guard, home_for, GuardDecision, Navigator, Role, SessionStore, TracingNavigator, User};
use fundportal_client::views::{AdminOverview, CustomerDashboard};
use fundportal_client::{ClientConfig, FileTokenStore, Gateway, SessionManager};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fundportal_observability::init();

    let config = ClientConfig::from_env().context("invalid client configuration")?;
    let session_file = config.session_file_path()?;
    let tokens = FileTokenStore::open(&session_file)
        .with_context(|| format!("failed to open session file {}", session_file.display()))?;

    let session = Arc::new(SessionStore::new(Arc::new(tokens)));
    let navigator: Arc<dyn Navigator> = Arc::new(TracingNavigator);
    let gateway = Gateway::new(&config, session, navigator)?;
    let manager = SessionManager::new(gateway.clone());

    match std::env::args().nth(1).as_deref() {
        None | Some("home") => {}
        Some("logout") => {
            manager.logout();
            println!("logged out");
            return Ok(());
        }
        Some(other) => bail!("unknown command '{other}' (expected 'home' or 'logout')"),
    }

    let user = match manager.restore().await {
        Some(user) => user,
        None => sign_in(&manager).await?,
    };
    tracing::info!(user = %user.username, role = %user.role, "signed in");

    let home = home_for(user.role);
    if guard(&manager.state(), home) != GuardDecision::Render {
        bail!("session is not allowed to open {home}");
    }

    let rendered = match user.role {
        Role::Admin => serde_json::to_string_pretty(&AdminOverview::load(&gateway).await?)?,
        Role::Customer => serde_json::to_string_pretty(&CustomerDashboard::load(&gateway).await?)?,
    };
    println!("{rendered}");
    Ok(())
}

async fn sign_in(manager: &SessionManager) -> anyhow::Result<User> {
    let username = std::env::var("FUNDPORTAL_USERNAME")
        .context("no saved session; set FUNDPORTAL_USERNAME and FUNDPORTAL_PASSWORD to log in")?;
    let password =
        std::env::var("FUNDPORTAL_PASSWORD").context("FUNDPORTAL_PASSWORD is not set")?;

    manager
        .login(&username, &password)
        .await
        .map_err(|err| anyhow::anyhow!(err.user_message()))
}
