//! Hosted auth backend (Supabase GoTrue REST API)

use super::{normalize_email, AuthService, SessionTable};
use crate::config::SupabaseConfig;
use crate::error::AppError;
use crate::models::{AuthSession, RegisterRequest, UserProfile};
use crate::Result;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{info, warn};

pub struct SupabaseAuthService {
    client: Client,
    config: SupabaseConfig,
    sessions: SessionTable,
}

impl SupabaseAuthService {
    pub fn new(config: SupabaseConfig) -> Self {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(60))
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            config,
            sessions: SessionTable::default(),
        }
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value> {
        let url = format!("{}{}", self.config.url, path);

        let response = self
            .client
            .post(url)
            .header("apikey", self.config.anon_key.as_str())
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let body = response.json::<Value>().await.unwrap_or(Value::Null);

        if !status.is_success() {
            let message = body
                .get("error_description")
                .or_else(|| body.get("msg"))
                .or_else(|| body.get("message"))
                .and_then(|v| v.as_str())
                .unwrap_or("request rejected")
                .to_string();
            warn!(status = %status, path, "Auth backend rejected request");
            return Err(AppError::AuthError(message));
        }

        Ok(body)
    }
}

/// Build a profile from a GoTrue user object. `fallback` fills fields the
/// backend leaves empty (sign-up before e-mail confirmation returns little).
fn profile_from_user(user: &Value, fallback: Option<&RegisterRequest>) -> Result<UserProfile> {
    let metadata = user.get("user_metadata").cloned().unwrap_or(Value::Null);
    let text = |value: Option<&Value>| value.and_then(|v| v.as_str()).map(|s| s.to_string());

    let id = text(user.get("id"))
        .ok_or_else(|| AppError::AuthError("auth response carried no user id".to_string()))?;

    Ok(UserProfile {
        id,
        name: text(metadata.get("name"))
            .or_else(|| fallback.map(|r| r.name.clone()))
            .unwrap_or_default(),
        email: text(user.get("email"))
            .or_else(|| fallback.map(|r| normalize_email(&r.email)))
            .unwrap_or_default(),
        village: text(metadata.get("village")).or_else(|| fallback.and_then(|r| r.village.clone())),
        phone: text(metadata.get("phone")).or_else(|| fallback.and_then(|r| r.phone.clone())),
    })
}

#[async_trait::async_trait]
impl AuthService for SupabaseAuthService {
    fn backend_name(&self) -> &'static str {
        "supabase"
    }

    async fn current_user(&self, token: &str) -> Option<UserProfile> {
        self.sessions.user(token).await
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthSession> {
        let body = self
            .post_json(
                "/auth/v1/token?grant_type=password",
                &json!({
                    "email": normalize_email(email),
                    "password": password,
                }),
            )
            .await?;

        let user = body
            .get("user")
            .ok_or_else(|| AppError::AuthError("login response carried no user".to_string()))?;
        let profile = profile_from_user(user, None)?;

        info!(user_id = %profile.id, "User logged in");
        Ok(self.sessions.open(profile).await)
    }

    async fn register(&self, request: RegisterRequest) -> Result<AuthSession> {
        let body = self
            .post_json(
                "/auth/v1/signup",
                &json!({
                    "email": normalize_email(&request.email),
                    "password": request.password,
                    "data": {
                        "name": request.name,
                        "village": request.village,
                        "phone": request.phone,
                    },
                }),
            )
            .await?;

        // with auto-confirm the user is nested next to a session
        let user = body.get("user").unwrap_or(&body);
        let profile = profile_from_user(user, Some(&request))?;

        info!(user_id = %profile.id, "User registered");
        Ok(self.sessions.open(profile).await)
    }

    async fn logout(&self, token: &str) {
        if let Some(user) = self.sessions.close(token).await {
            info!(user_id = %user.id, "User logged out");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_from_login_payload() {
        let user = json!({
            "id": "8d2f",
            "email": "asha@example.com",
            "user_metadata": { "name": "Asha", "village": "Rampur" }
        });
        let profile = profile_from_user(&user, None).unwrap();
        assert_eq!(profile.id, "8d2f");
        assert_eq!(profile.name, "Asha");
        assert_eq!(profile.village.as_deref(), Some("Rampur"));
        assert!(profile.phone.is_none());
    }

    #[test]
    fn test_profile_from_signup_uses_request_fallback() {
        let request = RegisterRequest {
            name: "Ravi".to_string(),
            email: "Ravi@Example.com".to_string(),
            password: "pw".to_string(),
            village: None,
            phone: Some("98xxxxxx10".to_string()),
        };
        let profile = profile_from_user(&json!({ "id": "u-1" }), Some(&request)).unwrap();
        assert_eq!(profile.name, "Ravi");
        assert_eq!(profile.email, "ravi@example.com");
        assert_eq!(profile.phone.as_deref(), Some("98xxxxxx10"));
    }

    #[test]
    fn test_missing_user_id_is_an_auth_error() {
        let result = profile_from_user(&json!({ "email": "x@y.in" }), None);
        assert!(matches!(result, Err(AppError::AuthError(_))));
    }
}
