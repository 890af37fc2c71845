use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use crate::api_client::ApiClient;
use crate::auth::controller::AuthController;
use crate::auth::session::ResolveTicket;
use crate::auth::store::FileTokenStore;
use crate::config::Config;

/// Shared client state handed to every command.
pub struct AppState {
    pub config: Config,
    pub api: Arc<ApiClient>,
    pub auth: Arc<AuthController>,
    /// Resolution for the persisted token, deferred until a command needs
    /// the identity so `logout` stays offline.
    pending: Option<ResolveTicket>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let api = Arc::new(ApiClient::new(&config.api_base_url, config.request_timeout)?);
        let store = Arc::new(FileTokenStore::new(config.token_path.clone()));
        debug!("Token store: {}", store.path().display());

        let (auth, pending) = AuthController::bootstrap(store, api.clone());
        Ok(AppState {
            config,
            api,
            auth: Arc::new(auth),
            pending,
        })
    }

    /// Resolves the persisted token's identity, if one is pending.
    pub async fn resolve_session(&mut self) {
        if let Some(ticket) = self.pending.take() {
            self.auth.resolve(ticket).await;
        }
    }
}
