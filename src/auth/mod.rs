//! Authentication collaborator
//!
//! Login, registration, logout and the current signed-in user. The core
//! calculators and responder never depend on identity; learning progress is
//! keyed by the user id this module hands out.
//!
//! Every login or registration opens its own session token, so callers that
//! share one service never see each other's user.

use crate::config::AppConfig;
use crate::models::{AuthSession, RegisterRequest, UserProfile};
use crate::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

mod memory;
mod supabase;

pub use memory::InMemoryAuthService;
pub use supabase::SupabaseAuthService;

#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    fn backend_name(&self) -> &'static str;
    /// User signed in under `token`, if the session is still open.
    async fn current_user(&self, token: &str) -> Option<UserProfile>;
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession>;
    async fn register(&self, request: RegisterRequest) -> Result<AuthSession>;
    /// Close the session behind `token`. Unknown tokens are ignored.
    async fn logout(&self, token: &str);
}

/// Open sign-in sessions keyed by token
#[derive(Default)]
pub(crate) struct SessionTable {
    sessions: Arc<RwLock<HashMap<Uuid, UserProfile>>>,
}

impl SessionTable {
    pub(crate) async fn open(&self, user: UserProfile) -> AuthSession {
        let token = Uuid::new_v4();
        self.sessions.write().await.insert(token, user.clone());
        AuthSession {
            token: token.to_string(),
            user,
        }
    }

    pub(crate) async fn user(&self, token: &str) -> Option<UserProfile> {
        let token = Uuid::parse_str(token.trim()).ok()?;
        self.sessions.read().await.get(&token).cloned()
    }

    pub(crate) async fn close(&self, token: &str) -> Option<UserProfile> {
        let token = Uuid::parse_str(token.trim()).ok()?;
        self.sessions.write().await.remove(&token)
    }
}

/// Hosted backend when configured, in-memory otherwise.
pub fn build_auth_service(config: &AppConfig) -> Arc<dyn AuthService> {
    let service: Arc<dyn AuthService> = match &config.supabase {
        Some(supabase) => Arc::new(SupabaseAuthService::new(supabase.clone())),
        None => Arc::new(InMemoryAuthService::new()),
    };
    info!(backend = service.backend_name(), "Auth service ready");
    service
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
