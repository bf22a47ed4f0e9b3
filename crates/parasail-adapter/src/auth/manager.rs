/*
[INPUT]:  Node API, wallet private key, persisted session, session store
[OUTPUT]: Authenticated operations that survive token expiry
[POS]:    Auth layer - owns the session and drives re-authentication
[UPDATE]: When auth endpoints, retry bound, or persistence rules change
*/

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, warn};

use crate::auth::{EvmWalletSigner, Session, SessionState, SessionStore, WalletSigner, sign_consent};
use crate::http::{Credentials, NodeApi, ParasailError, Result};
use crate::types::{CheckInResponse, NodeStats, OnboardResponse};

/// Owns the session and guarantees authenticated operations run with a valid token.
///
/// An operation rejected with 401 triggers one re-authentication and exactly one
/// retry. Re-authentication is serialized: a caller that waited on the guard
/// while another caller refreshed the token reuses the fresh token.
pub struct SessionManager {
    api: Arc<dyn NodeApi>,
    private_key: String,
    session: RwLock<Session>,
    reauth_guard: Mutex<()>,
    reauthenticating: AtomicBool,
    store: Arc<dyn SessionStore>,
}

impl SessionManager {
    pub fn new(
        api: Arc<dyn NodeApi>,
        private_key: impl Into<String>,
        session: Session,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        let private_key = private_key.into();
        let mut session = session;
        // Only the token was persisted; recover the address from the key
        if session.wallet_address.trim().is_empty() {
            if let Ok(wallet) = EvmWalletSigner::new(&private_key) {
                session.wallet_address = wallet.address().to_string();
            }
        }

        Self {
            api,
            private_key,
            session: RwLock::new(session),
            reauth_guard: Mutex::new(()),
            reauthenticating: AtomicBool::new(false),
            store,
        }
    }

    /// Snapshot of the current session
    pub async fn session(&self) -> Session {
        self.session.read().await.clone()
    }

    pub async fn wallet_address(&self) -> String {
        self.session.read().await.wallet_address.clone()
    }

    pub async fn state(&self) -> SessionState {
        if self.reauthenticating.load(Ordering::SeqCst) {
            return SessionState::Reauthenticating;
        }
        if self.session.read().await.is_authenticated() {
            SessionState::Authenticated
        } else {
            SessionState::Unauthenticated
        }
    }

    /// Sign the consent message, verify it, and persist the new session.
    pub async fn authenticate(&self) -> Result<Session> {
        let _guard = self.reauth_guard.lock().await;
        self.authenticate_locked().await
    }

    /// Run `operation` with valid credentials, re-authenticating at most once.
    pub async fn with_session<T, F, Fut>(&self, operation: F) -> Result<T>
    where
        F: Fn(Credentials) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let current = self.session.read().await.credentials();
        let credentials = match current {
            Some(credentials) => credentials,
            None => self.refresh_credentials(None).await?,
        };

        match operation(credentials.clone()).await {
            Err(err) if err.is_unauthorized() => {
                warn!("Token expired. Attempting to refresh...");
                let refreshed = self
                    .refresh_credentials(Some(&credentials.bearer_token))
                    .await?;
                operation(refreshed).await.inspect_err(|err| {
                    if err.is_unauthorized() {
                        error!("request still unauthorized after re-authentication");
                    }
                })
            }
            result => result,
        }
    }

    /// Register the node (safe to repeat)
    pub async fn onboard(&self) -> Result<OnboardResponse> {
        let api = &self.api;
        let response = self
            .with_session(|credentials| async move { api.onboard(&credentials).await })
            .await
            .inspect_err(|err| error!(error = %err, "Onboarding error"))?;
        info!("Node onboarding successful");
        Ok(response)
    }

    pub async fn check_in(&self) -> Result<CheckInResponse> {
        let api = &self.api;
        let response = self
            .with_session(|credentials| async move { api.check_in(&credentials).await })
            .await
            .inspect_err(|err| error!(error = %err, "Check-in error"))?;
        info!("Node check-in successful");
        Ok(response)
    }

    pub async fn node_stats(&self) -> Result<NodeStats> {
        let api = &self.api;
        self.with_session(|credentials| async move { api.node_stats(&credentials).await })
            .await
            .inspect_err(|err| error!(error = %err, "Failed to fetch node stats"))
    }

    /// Re-authenticate unless the token that was rejected has already been replaced.
    async fn refresh_credentials(&self, rejected: Option<&str>) -> Result<Credentials> {
        let _guard = self.reauth_guard.lock().await;

        let current = self.session.read().await.credentials();
        if let Some(current) = current {
            if rejected != Some(current.bearer_token.as_str()) {
                debug!("token already refreshed by a concurrent caller");
                return Ok(current);
            }
        }

        let session = self.authenticate_locked().await?;
        session.credentials().ok_or_else(|| {
            ParasailError::InvalidResponse("verify did not yield a bearer token".to_string())
        })
    }

    /// Caller must hold `reauth_guard`.
    async fn authenticate_locked(&self) -> Result<Session> {
        self.reauthenticating.store(true, Ordering::SeqCst);
        let result = self.verify_and_store().await;
        self.reauthenticating.store(false, Ordering::SeqCst);
        result
    }

    async fn verify_and_store(&self) -> Result<Session> {
        let payload = sign_consent(&self.private_key)
            .await
            .inspect_err(|err| error!(error = %err, "could not sign consent message"))?;

        info!(address = %payload.address, "Attempting verification");

        let response = self
            .api
            .verify(&payload)
            .await
            .inspect_err(|err| error!(error = %err, "Verification failed"))?;

        if response.token.trim().is_empty() {
            return Err(ParasailError::InvalidResponse(
                "verify returned an empty token".to_string(),
            ));
        }

        let session = Session::new(payload.address, Some(response.token));
        *self.session.write().await = session.clone();

        if let Err(err) = self.store.save(&session) {
            warn!(error = %err, "Error saving config");
        }

        info!("User verification successful");
        Ok(session)
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("reauthenticating", &self.reauthenticating.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}
