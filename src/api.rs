//! REST API Server
//!
//! Exposes the calculators, chat assistant, scheme catalog, learning
//! progress and auth collaborator over HTTP for the web frontend.

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthService;
use crate::calculator::{
    compute_investment_growth, compute_loan_emi, compute_sip, format_inr,
};
use crate::chat::{ChatSession, ReplyDelay, SessionRegistry};
use crate::config::AppConfig;
use crate::error::AppError;
use crate::learning::{self, ProgressStore};
use crate::models::{
    InvestmentParameters, LoanParameters, RegisterRequest, SipParameters,
};
use crate::responder::{self, ResponseSelector};
use crate::schemes::{self, SchemeCategory};

/// =============================
/// Request Models
/// =============================

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub chat_id: Option<String>,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct SchemeQuery {
    pub q: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CompleteStepRequest {
    pub step_index: usize,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// =============================
/// Response Wrapper
/// =============================

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub data: Option<serde_json::Value>,
    pub error: Option<String>,
    pub timestamp: String,
}

impl ApiResponse {
    pub fn success<T: Serialize>(data: T) -> Self {
        Self {
            success: true,
            data: serde_json::to_value(data).ok(),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

type ApiResult = (StatusCode, Json<ApiResponse>);

fn ok<T: Serialize>(data: T) -> ApiResult {
    (StatusCode::OK, Json(ApiResponse::success(data)))
}

fn fail(error: AppError) -> ApiResult {
    let status = match &error {
        AppError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
        AppError::NotFound(_) => StatusCode::NOT_FOUND,
        AppError::AuthError(_) => StatusCode::UNAUTHORIZED,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ApiResponse::error(error.to_string())))
}

/// =============================
/// API State
/// =============================

#[derive(Clone)]
pub struct ApiState {
    pub selector: &'static ResponseSelector,
    pub sessions: Arc<RwLock<SessionRegistry>>,
    pub progress: Arc<dyn ProgressStore>,
    pub auth: Arc<dyn AuthService>,
    pub reply_delay: ReplyDelay,
}

impl ApiState {
    pub fn new(
        config: &AppConfig,
        progress: Arc<dyn ProgressStore>,
        auth: Arc<dyn AuthService>,
    ) -> Self {
        Self {
            selector: responder::default_selector(),
            sessions: Arc::new(RwLock::new(SessionRegistry::new(config.chat_sessions))),
            progress,
            auth,
            reply_delay: ReplyDelay::new(config.chat_reply_delay),
        }
    }
}

/// =============================
/// Helpers
/// =============================

fn stable_uuid_from_string(input: &str) -> Uuid {
    use sha2::{Digest, Sha256};

    let hash = Sha256::digest(input.as_bytes());
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&hash[..16]);

    // Set UUID version (4) and variant (RFC4122) bits.
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    Uuid::from_bytes(bytes)
}

fn parse_chat_id(value: Option<&str>) -> Uuid {
    match value {
        Some(v) if !v.trim().is_empty() => {
            Uuid::parse_str(v).unwrap_or_else(|_| stable_uuid_from_string(v))
        }
        _ => Uuid::new_v4(),
    }
}

/// Token from an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// =============================
/// Health Endpoint
/// =============================

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// =============================
/// Calculator Endpoints
/// =============================

async fn sip_handler(Json(params): Json<SipParameters>) -> ApiResult {
    match compute_sip(&params) {
        Ok(result) => ok(serde_json::json!({
            "result": result,
            "formatted": {
                "futureValue": format_inr(result.future_value),
                "totalInvestment": format_inr(result.total_investment),
                "totalReturns": format_inr(result.total_returns),
            }
        })),
        Err(e) => fail(e),
    }
}

async fn loan_handler(Json(params): Json<LoanParameters>) -> ApiResult {
    match compute_loan_emi(&params) {
        Ok(result) => ok(serde_json::json!({
            "result": result,
            "formatted": {
                "monthlyPayment": format_inr(result.monthly_payment),
                "totalPayable": format_inr(result.total_payable),
                "totalInterest": format_inr(result.total_interest),
            }
        })),
        Err(e) => fail(e),
    }
}

async fn investment_handler(Json(params): Json<InvestmentParameters>) -> ApiResult {
    match compute_investment_growth(&params) {
        Ok(result) => ok(serde_json::json!({
            "result": result,
            "formatted": {
                "futureValue": format_inr(result.future_value),
                "totalInvestment": format_inr(result.total_investment),
                "totalReturns": format_inr(result.total_returns),
            }
        })),
        Err(e) => fail(e),
    }
}

/// =============================
/// Chat Endpoint
/// =============================

async fn chat_handler(State(state): State<ApiState>, Json(req): Json<ChatRequest>) -> ApiResult {
    if req.message.trim().is_empty() {
        return fail(AppError::invalid("message must not be empty"));
    }

    let chat_id = parse_chat_id(req.chat_id.as_deref());

    // reply is fixed before the display delay starts
    let reply = state.selector.select(&req.message).to_string();
    {
        let mut sessions = state.sessions.write().await;
        sessions
            .session_mut(chat_id, Instant::now(), || {
                ChatSession::with_welcome(responder::welcome_message())
            })
            .push_user(req.message.clone());
    }

    state.reply_delay.wait().await;

    let messages = {
        let mut sessions = state.sessions.write().await;
        let session = sessions.session_mut(chat_id, Instant::now(), ChatSession::new);
        session.push_assistant(reply.clone());
        session.messages().to_vec()
    };

    info!(chat_id = %chat_id, message_count = messages.len(), "Chat exchange completed");

    ok(serde_json::json!({
        "chat_id": chat_id.to_string(),
        "reply": reply,
        "messages": messages,
    }))
}

/// =============================
/// Scheme Endpoint
/// =============================

async fn schemes_handler(Query(query): Query<SchemeQuery>) -> ApiResult {
    let category = match SchemeCategory::parse_filter(query.category.as_deref().unwrap_or("all")) {
        Ok(category) => category,
        Err(e) => return fail(e),
    };
    let results = schemes::search(query.q.as_deref().unwrap_or(""), category);
    ok(results)
}

/// =============================
/// Learning Endpoints
/// =============================

async fn modules_handler() -> ApiResult {
    ok(learning::modules())
}

async fn progress_handler(
    State(state): State<ApiState>,
    Path((user_id, module_id)): Path<(String, u32)>,
) -> ApiResult {
    let Some(module) = learning::find_module(module_id) else {
        return fail(AppError::NotFound(format!("learning module {}", module_id)));
    };

    match state.progress.load(&user_id, module.id).await {
        Ok(progress) => {
            let progress = progress.unwrap_or_default();
            ok(serde_json::json!({
                "moduleId": module.id,
                "totalSteps": module.total_steps(),
                "nextStepIndex": progress.next_step_index(module.total_steps()),
                "progress": progress,
            }))
        }
        Err(e) => fail(e),
    }
}

async fn complete_step_handler(
    State(state): State<ApiState>,
    Path((user_id, module_id)): Path<(String, u32)>,
    Json(req): Json<CompleteStepRequest>,
) -> ApiResult {
    let Some(module) = learning::find_module(module_id) else {
        return fail(AppError::NotFound(format!("learning module {}", module_id)));
    };

    match learning::record_step_completion(state.progress.as_ref(), &user_id, module, req.step_index)
        .await
    {
        Ok(progress) => ok(serde_json::json!({
            "moduleId": module.id,
            "totalSteps": module.total_steps(),
            "nextStepIndex": progress.next_step_index(module.total_steps()),
            "progress": progress,
        })),
        Err(e) => fail(e),
    }
}

/// =============================
/// Auth Endpoints
/// =============================

async fn register_handler(
    State(state): State<ApiState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult {
    match state.auth.register(req).await {
        Ok(user) => ok(user),
        Err(e) => fail(e),
    }
}

async fn login_handler(State(state): State<ApiState>, Json(req): Json<LoginRequest>) -> ApiResult {
    match state.auth.login(&req.email, &req.password).await {
        Ok(user) => ok(user),
        Err(e) => fail(e),
    }
}

async fn logout_handler(State(state): State<ApiState>, headers: HeaderMap) -> ApiResult {
    let Some(token) = bearer_token(&headers) else {
        return fail(AppError::AuthError("missing bearer token".to_string()));
    };
    state.auth.logout(token).await;
    ok(serde_json::json!({ "logged_out": true }))
}

async fn me_handler(State(state): State<ApiState>, headers: HeaderMap) -> ApiResult {
    let Some(token) = bearer_token(&headers) else {
        return fail(AppError::AuthError("missing bearer token".to_string()));
    };
    match state.auth.current_user(token).await {
        Some(user) => ok(user),
        None => fail(AppError::AuthError("session expired or unknown".to_string())),
    }
}

/// =============================
/// Router
/// =============================

pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/calculators/sip", post(sip_handler))
        .route("/api/calculators/loan", post(loan_handler))
        .route("/api/calculators/investment", post(investment_handler))
        .route("/api/chat", post(chat_handler))
        .route("/api/schemes", get(schemes_handler))
        .route("/api/learning/modules", get(modules_handler))
        .route(
            "/api/learning/:user_id/modules/:module_id",
            get(progress_handler),
        )
        .route(
            "/api/learning/:user_id/modules/:module_id/complete",
            post(complete_step_handler),
        )
        .route("/api/auth/register", post(register_handler))
        .route("/api/auth/login", post(login_handler))
        .route("/api/auth/logout", post(logout_handler))
        .route("/api/auth/me", get(me_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// =============================
/// Server Startup
/// =============================

pub async fn start_server(
    state: ApiState,
    port: u16,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!("API Server listening on http://0.0.0.0:{}", port);
    info!("Local: http://127.0.0.1:{}", port);

    axum::serve(listener, router).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::InMemoryAuthService;
    use crate::learning::InMemoryProgressStore;
    use axum::body::{to_bytes, Body};
    use crate::chat::SessionLimits;
    use axum::http::Request;
    use serde_json::{json, Value};
    use std::time::Duration;
    use tower::ServiceExt;

    fn test_router() -> Router {
        let state = ApiState::new(
            &AppConfig::default(),
            Arc::new(InMemoryProgressStore::new()),
            Arc::new(InMemoryAuthService::new()),
        );
        create_router(state)
    }

    async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        send_as(router, None, method, uri, body).await
    }

    async fn send_as(
        router: &Router,
        token: Option<&str>,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_sip_endpoint() {
        let router = test_router();
        let (status, body) = send(
            &router,
            "POST",
            "/api/calculators/sip",
            Some(json!({ "monthlyAmount": 5000, "annualReturnPercent": 12, "years": 15 })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["result"]["futureValue"], 2_522_880);
        assert_eq!(body["data"]["formatted"]["futureValue"], "₹25,22,880");
    }

    #[tokio::test]
    async fn test_invalid_loan_is_bad_request() {
        let router = test_router();
        let (status, body) = send(
            &router,
            "POST",
            "/api/calculators/loan",
            Some(json!({ "principal": 0, "annualRatePercent": 8.5, "tenureYears": 20 })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("principal"));
    }

    #[tokio::test]
    async fn test_chat_keeps_session() {
        let router = test_router();
        let (status, first) = send(
            &router,
            "POST",
            "/api/chat",
            Some(json!({ "chat_id": "browser-tab-1", "message": "I want to open a bank account" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(first["data"]["reply"].as_str().unwrap().starts_with("To open a bank account"));
        // welcome + user + reply
        assert_eq!(first["data"]["messages"].as_array().unwrap().len(), 3);

        let (_, second) = send(
            &router,
            "POST",
            "/api/chat",
            Some(json!({ "chat_id": "browser-tab-1", "message": "zzxq" })),
        )
        .await;
        let messages = second["data"]["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 5);
        assert_eq!(messages[4]["id"], 5);
        assert_eq!(messages[4]["sender"], "assistant");
        assert_eq!(second["data"]["chat_id"], first["data"]["chat_id"]);
    }

    #[tokio::test]
    async fn test_chat_rejects_blank_message() {
        let router = test_router();
        let (status, _) = send(&router, "POST", "/api/chat", Some(json!({ "message": "  " }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_scheme_search() {
        let router = test_router();
        let (status, body) = send(&router, "GET", "/api/schemes?q=yojana&category=housing", None).await;
        assert_eq!(status, StatusCode::OK);
        let schemes = body["data"].as_array().unwrap();
        assert_eq!(schemes.len(), 1);
        assert_eq!(schemes[0]["name"], "PM Awas Yojana");

        let (status, _) = send(&router, "GET", "/api/schemes?category=mining", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_learning_progress_flow() {
        let router = test_router();
        let (status, body) = send(
            &router,
            "POST",
            "/api/learning/u-42/modules/2/complete",
            Some(json!({ "step_index": 0 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["progress"]["progressPercent"], 25);

        let (_, body) = send(&router, "GET", "/api/learning/u-42/modules/2", None).await;
        assert_eq!(body["data"]["progress"]["currentStep"], 1);
        assert_eq!(body["data"]["nextStepIndex"], 1);

        let (status, _) = send(&router, "GET", "/api/learning/u-42/modules/9", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_auth_flow() {
        let router = test_router();
        let (status, registered) = send(
            &router,
            "POST",
            "/api/auth/register",
            Some(json!({ "name": "Asha", "email": "asha@example.com", "password": "pw" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let token = registered["data"]["token"].as_str().unwrap().to_string();

        let (status, me) = send_as(&router, Some(&token), "GET", "/api/auth/me", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(me["data"]["email"], "asha@example.com");

        send_as(&router, Some(&token), "POST", "/api/auth/logout", None).await;
        let (status, _) = send_as(&router, Some(&token), "GET", "/api/auth/me", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(
            &router,
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "asha@example.com", "password": "nope" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_me_is_scoped_to_the_caller() {
        let router = test_router();
        let (_, registered) = send(
            &router,
            "POST",
            "/api/auth/register",
            Some(json!({
                "name": "Asha",
                "email": "asha@example.com",
                "password": "pw",
                "village": "Rampur",
                "phone": "98xxxxxx10"
            })),
        )
        .await;
        let token = registered["data"]["token"].as_str().unwrap().to_string();

        // another client without credentials learns nothing
        let (status, body) = send(&router, "GET", "/api/auth/me", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body["data"].is_null());

        let (status, _) = send_as(&router, Some("forged"), "GET", "/api/auth/me", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        // and cannot end someone else's session
        let (status, _) = send(&router, "POST", "/api/auth/logout", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let (status, me) = send_as(&router, Some(&token), "GET", "/api/auth/me", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(me["data"]["village"], "Rampur");
    }

    #[tokio::test]
    async fn test_chat_sessions_are_bounded() {
        let config = AppConfig {
            chat_sessions: SessionLimits {
                idle_ttl: Duration::from_secs(3600),
                max_sessions: 2,
            },
            ..AppConfig::default()
        };
        let state = ApiState::new(
            &config,
            Arc::new(InMemoryProgressStore::new()),
            Arc::new(InMemoryAuthService::new()),
        );
        let sessions = state.sessions.clone();
        let router = create_router(state);

        for _ in 0..5 {
            let (status, _) = send(&router, "POST", "/api/chat", Some(json!({ "message": "hello" }))).await;
            assert_eq!(status, StatusCode::OK);
        }

        assert_eq!(sessions.read().await.len(), 2);
    }
}
