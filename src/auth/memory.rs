//! In-process accounts for development and tests

use super::{normalize_email, AuthService, SessionTable};
use crate::error::AppError;
use crate::models::{AuthSession, RegisterRequest, UserProfile};
use crate::Result;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

struct Account {
    profile: UserProfile,
    password_digest: String,
}

pub struct InMemoryAuthService {
    accounts: Arc<RwLock<HashMap<String, Account>>>,
    sessions: SessionTable,
}

impl InMemoryAuthService {
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
            sessions: SessionTable::default(),
        }
    }
}

impl Default for InMemoryAuthService {
    fn default() -> Self {
        Self::new()
    }
}

fn password_digest(email: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(email.as_bytes());
    hasher.update([0u8]);
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

#[async_trait::async_trait]
impl AuthService for InMemoryAuthService {
    fn backend_name(&self) -> &'static str {
        "in_memory"
    }

    async fn current_user(&self, token: &str) -> Option<UserProfile> {
        self.sessions.user(token).await
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthSession> {
        let email = normalize_email(email);
        let profile = {
            let accounts = self.accounts.read().await;
            match accounts.get(&email) {
                Some(account) if account.password_digest == password_digest(&email, password) => {
                    account.profile.clone()
                }
                _ => {
                    warn!(email = %email, "Login rejected");
                    return Err(AppError::AuthError("invalid email or password".to_string()));
                }
            }
        };

        info!(user_id = %profile.id, "User logged in");
        Ok(self.sessions.open(profile).await)
    }

    async fn register(&self, request: RegisterRequest) -> Result<AuthSession> {
        let email = normalize_email(&request.email);
        if email.is_empty() || request.password.is_empty() {
            return Err(AppError::AuthError("email and password are required".to_string()));
        }

        let profile = UserProfile {
            id: Uuid::new_v4().to_string(),
            name: request.name.trim().to_string(),
            email: email.clone(),
            village: request.village,
            phone: request.phone,
        };

        {
            let mut accounts = self.accounts.write().await;
            if accounts.contains_key(&email) {
                return Err(AppError::AuthError(format!("{} is already registered", email)));
            }
            accounts.insert(
                email.clone(),
                Account {
                    profile: profile.clone(),
                    password_digest: password_digest(&email, &request.password),
                },
            );
        }

        info!(user_id = %profile.id, "User registered");
        Ok(self.sessions.open(profile).await)
    }

    async fn logout(&self, token: &str) {
        if let Some(user) = self.sessions.close(token).await {
            info!(user_id = %user.id, "User logged out");
        }
    }
}
