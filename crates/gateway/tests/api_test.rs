//! Integration tests for API endpoints.
//!
//! The real services run over in-memory stores so the router can be driven
//! without Postgres or Redis.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header::AUTHORIZATION, Method, Request, StatusCode},
    Router,
};
use chrono::{NaiveDate, NaiveTime, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use auth_service_lib::{Authenticator, CredentialVerifier, Session, SessionStore, UserDirectory};
use common::{AppError, AppResult, RateLimitConfig};
use domain::{CredentialRecord, FixedClock, Password, Role, User};
use gateway_lib::config::GatewayConfig;
use gateway_lib::middleware::{RateLimitDecision, RateLimiter};
use gateway_lib::routes::create_router;
use gateway_lib::state::AppState;
use schedule_service_lib::{ScheduleEntry, ScheduleManager, ScheduleRepository};
use user_service_lib::{AccountManager, NewUser, UserRepository};

// =============================================================================
// In-memory stores
// =============================================================================

#[derive(Default)]
struct MemoryUsers {
    users: Mutex<Vec<User>>,
}

impl MemoryUsers {
    fn seeded() -> Self {
        let store = Self::default();
        for (id, email, name, role) in [
            (1, "admin@example.com", "Admin", Role::Admin),
            (2, "teacher@example.com", "Teacher", Role::Teacher),
            (3, "student@example.com", "Student", Role::Student),
        ] {
            let hash = Password::new(&format!("{}-pass", role)).unwrap().into_string();
            store.users.lock().unwrap().push(User {
                id,
                email: email.to_string(),
                password_hash: hash,
                name: name.to_string(),
                role,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            });
        }
        store
    }
}

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.email == email).cloned())
    }

    async fn find_credentials(&self, email: &str) -> AppResult<Option<CredentialRecord>> {
        Ok(self.find_by_email(email).await?.map(|user| CredentialRecord {
            id: user.id,
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role.to_string(),
        }))
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        let user = User {
            id: users.len() as i64 + 1,
            email: new_user.email,
            password_hash: new_user.password_hash,
            name: new_user.name,
            role: new_user.role,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
struct MemorySessions {
    sessions: Mutex<HashMap<String, Session>>,
}

#[async_trait]
impl SessionStore for MemorySessions {
    async fn save(&self, session: &Session) -> AppResult<()> {
        self.sessions
            .lock()
            .unwrap()
            .insert(session.token.clone(), session.clone());
        Ok(())
    }

    async fn find(&self, token: &str) -> AppResult<Option<Session>> {
        Ok(self.sessions.lock().unwrap().get(token).cloned())
    }

    async fn revoke(&self, token: &str) -> AppResult<()> {
        self.sessions.lock().unwrap().remove(token);
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Course 10 is taught by teacher 2; student 3 is approved for it only.
struct MemorySchedule {
    entries: Vec<ScheduleEntry>,
}

impl MemorySchedule {
    fn seeded() -> Self {
        let class = |id: i64, course_id: i64, teacher_id: i64, day: u32, hour: u32| ScheduleEntry {
            id,
            course_id,
            course_name: format!("Course {}", course_id),
            teacher_id,
            date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
            start_time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(hour + 1, 30, 0).unwrap(),
            room: Some("A-101".to_string()),
        };

        Self {
            entries: vec![
                class(1, 10, 2, 10, 9),
                class(2, 20, 4, 11, 13),
                class(3, 10, 2, 17, 9),
                class(4, 20, 4, 5, 10),
            ],
        }
    }

    fn within(&self, start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = &ScheduleEntry> {
        self.entries
            .iter()
            .filter(move |e| e.date >= start && e.date <= end)
    }
}

#[async_trait]
impl ScheduleRepository for MemorySchedule {
    async fn list_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<ScheduleEntry>> {
        Ok(self.within(start, end).cloned().collect())
    }

    async fn list_for_teacher(
        &self,
        teacher_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<ScheduleEntry>> {
        Ok(self
            .within(start, end)
            .filter(|e| e.teacher_id == teacher_id)
            .cloned()
            .collect())
    }

    async fn list_for_student(
        &self,
        student_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<ScheduleEntry>> {
        let approved: &[i64] = if student_id == 3 { &[10] } else { &[] };
        Ok(self
            .within(start, end)
            .filter(|e| approved.contains(&e.course_id))
            .cloned()
            .collect())
    }
}

struct FixedLimiter {
    allowed: bool,
}

#[async_trait]
impl RateLimiter for FixedLimiter {
    async fn hit(&self, _identifier: &str, limit: RateLimitConfig) -> AppResult<RateLimitDecision> {
        Ok(RateLimitDecision {
            count: 1,
            allowed: self.allowed && limit.max_requests > 0,
        })
    }
}

struct BrokenLimiter;

#[async_trait]
impl RateLimiter for BrokenLimiter {
    async fn hit(
        &self,
        _identifier: &str,
        _limit: RateLimitConfig,
    ) -> AppResult<RateLimitDecision> {
        Err(AppError::internal("redis down"))
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn app_with_limiter(limiter: Arc<dyn RateLimiter>) -> Router {
    let users: Arc<dyn UserRepository> = Arc::new(MemoryUsers::seeded());
    let verifier = CredentialVerifier::new(Arc::new(UserDirectory::new(users.clone())));
    let auth = Authenticator::new(verifier, Arc::new(MemorySessions::default()), 24);
    let accounts = AccountManager::new(users);
    // Wednesday
    let clock = FixedClock(NaiveDate::from_ymd_opt(2024, 6, 12).unwrap());
    let schedules = ScheduleManager::new(Arc::new(MemorySchedule::seeded()), Arc::new(clock));

    let state = AppState::new(
        Arc::new(auth),
        Arc::new(accounts),
        Arc::new(schedules),
        limiter,
        GatewayConfig::default(),
    );
    create_router(state)
}

fn app() -> Router {
    app_with_limiter(Arc::new(FixedLimiter { allowed: true }))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post_json(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

async fn login_as(app: &Router, role: Role) -> String {
    let (status, body) = send(
        app,
        post_json(
            "/auth/login",
            None,
            json!({
                "email": format!("{}@example.com", role),
                "password": format!("{}-pass", role)
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    body["token"].as_str().unwrap().to_string()
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_login_returns_session_and_identity() {
    let app = app();

    let (status, body) = send(
        &app,
        post_json(
            "/auth/login",
            None,
            json!({ "email": "  Admin@Example.com ", "password": "admin-pass" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tokenType"], "Bearer");
    assert_eq!(body["expiresIn"], 24 * 3600);
    assert_eq!(body["user"]["id"], 1);
    assert_eq!(body["user"]["email"], "admin@example.com");
    assert_eq!(body["user"]["role"], "admin");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = app();

    let (wrong_status, wrong_body) = send(
        &app,
        post_json(
            "/auth/login",
            None,
            json!({ "email": "admin@example.com", "password": "wrongpassword" }),
        ),
    )
    .await;
    let (unknown_status, unknown_body) = send(
        &app,
        post_json(
            "/auth/login",
            None,
            json!({ "email": "nobody@example.com", "password": "anything" }),
        ),
    )
    .await;
    let (empty_status, empty_body) = send(&app, post_json("/auth/login", None, json!({}))).await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_status, unknown_status);
    assert_eq!(wrong_status, empty_status);
    assert_eq!(wrong_body, unknown_body);
    assert_eq!(wrong_body, empty_body);
    assert_eq!(wrong_body["error"]["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_me_and_logout() {
    let app = app();
    let token = login_as(&app, Role::Teacher).await;

    let (status, body) = send(&app, get("/auth/me", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "teacher");
    assert_eq!(body["name"], "Teacher");

    let logout = Request::builder()
        .method(Method::POST)
        .uri("/auth/logout")
        .header(AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, logout).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, get("/auth/me", Some(&token))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_missing_or_unknown_token_is_unauthorized() {
    let app = app();

    let (status, _) = send(&app, get("/admin/schedule", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, get("/admin/schedule", Some("deadbeef"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Role gate
// =============================================================================

#[tokio::test]
async fn test_each_dashboard_admits_only_its_role() {
    let app = app();
    let tokens = [
        (Role::Admin, login_as(&app, Role::Admin).await),
        (Role::Teacher, login_as(&app, Role::Teacher).await),
        (Role::Student, login_as(&app, Role::Student).await),
    ];

    for (dashboard, path) in [
        (Role::Admin, "/admin/schedule"),
        (Role::Teacher, "/teacher/schedule"),
        (Role::Student, "/student/schedule"),
    ] {
        for (role, token) in &tokens {
            let (status, body) = send(&app, get(path, Some(token))).await;
            if *role == dashboard {
                assert_eq!(status, StatusCode::OK, "{} on {}", role, path);
            } else {
                assert_eq!(status, StatusCode::FORBIDDEN, "{} on {}", role, path);
                assert_eq!(body["error"]["code"], "FORBIDDEN");
            }
        }
    }
}

// =============================================================================
// Schedules
// =============================================================================

#[tokio::test]
async fn test_week_endpoint_uses_offset() {
    let app = app();
    let token = login_as(&app, Role::Student).await;

    let (status, body) = send(&app, get("/schedule/week", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["weekOffset"], 0);
    assert_eq!(body["startDate"], "2024-06-09");
    assert_eq!(body["endDate"], "2024-06-15");
    assert_eq!(body["displayRange"], "Jun 9 - Jun 15, 2024");

    let (_, body) = send(&app, get("/schedule/week?weekOffset=-1", Some(&token))).await;
    assert_eq!(body["displayRange"], "Jun 2 - Jun 8, 2024");

    let (_, body) = send(&app, get("/schedule/week?weekOffset=abc", Some(&token))).await;
    assert_eq!(body["weekOffset"], 0);
    assert_eq!(body["startDate"], "2024-06-09");
}

#[tokio::test]
async fn test_admin_sees_all_classes_in_week() {
    let app = app();
    let token = login_as(&app, Role::Admin).await;

    let (status, body) = send(&app, get("/admin/schedule", Some(&token))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["week"]["startDate"], "2024-06-09");
    let ids: Vec<i64> = body["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn test_teacher_and_student_views_are_scoped() {
    let app = app();

    let teacher = login_as(&app, Role::Teacher).await;
    let (_, body) = send(&app, get("/teacher/schedule?weekOffset=1", Some(&teacher))).await;
    assert_eq!(body["week"]["startDate"], "2024-06-16");
    assert_eq!(body["entries"].as_array().unwrap().len(), 1);
    assert_eq!(body["entries"][0]["id"], 3);

    let student = login_as(&app, Role::Student).await;
    let (_, body) = send(&app, get("/student/schedule", Some(&student))).await;
    assert_eq!(body["entries"].as_array().unwrap().len(), 1);
    assert_eq!(body["entries"][0]["courseId"], 10);
    assert_eq!(body["entries"][0]["startTime"], "09:00:00");
}

// =============================================================================
// Accounts
// =============================================================================

#[tokio::test]
async fn test_admin_creates_account_and_duplicates_conflict() {
    let app = app();
    let token = login_as(&app, Role::Admin).await;

    let (status, body) = send(
        &app,
        post_json(
            "/admin/users",
            Some(&token),
            json!({
                "email": "New.Teacher@Example.com",
                "password": "SecurePass123!",
                "name": "New Teacher",
                "role": "teacher"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], "new.teacher@example.com");
    assert_eq!(body["role"], "teacher");
    assert!(body.get("password_hash").is_none());

    let (status, body) = send(
        &app,
        post_json(
            "/admin/users",
            Some(&token),
            json!({
                "email": "new.teacher@example.com",
                "password": "AnotherPass456!",
                "name": "Copy",
                "role": "student"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");

    let (status, _) = send(
        &app,
        post_json(
            "/auth/login",
            None,
            json!({ "email": "NEW.TEACHER@example.com", "password": "SecurePass123!" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, get("/admin/users", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_padded_mixed_case_account_can_sign_in() {
    let app = app();
    let token = login_as(&app, Role::Admin).await;

    let (status, body) = send(
        &app,
        post_json(
            "/admin/users",
            Some(&token),
            json!({
                "email": "  Padded@Example.com ",
                "password": "SecurePass123!",
                "name": "Padded Student",
                "role": "student"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    assert_eq!(body["email"], "padded@example.com");

    let (status, body) = send(
        &app,
        post_json(
            "/auth/login",
            None,
            json!({ "email": " PADDED@example.COM  ", "password": "SecurePass123!" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["user"]["email"], "padded@example.com");
    assert_eq!(body["user"]["role"], "student");
}

#[tokio::test]
async fn test_account_creation_validates_input() {
    let app = app();
    let token = login_as(&app, Role::Admin).await;

    let (status, body) = send(
        &app,
        post_json(
            "/admin/users",
            Some(&token),
            json!({
                "email": "x@example.com",
                "password": "short",
                "name": "X",
                "role": "student"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (status, _) = send(
        &app,
        post_json(
            "/admin/users",
            Some(&token),
            json!({
                "email": "x@example.com",
                "password": "longenough",
                "name": "X",
                "role": "superuser"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_non_admin_cannot_list_accounts() {
    let app = app();
    let token = login_as(&app, Role::Teacher).await;

    let (status, _) = send(&app, get("/admin/users", Some(&token))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

// =============================================================================
// Infrastructure
// =============================================================================

#[tokio::test]
async fn test_rate_limit_rejects_and_fails_closed() {
    let denied = app_with_limiter(Arc::new(FixedLimiter { allowed: false }));
    let (status, body) = send(
        &denied,
        post_json("/auth/login", None, json!({ "email": "a@b.c", "password": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"]["code"], "TOO_MANY_REQUESTS");

    let broken = app_with_limiter(Arc::new(BrokenLimiter));
    let (status, _) = send(&broken, get("/auth/me", Some("abc"))).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_rate_limit_headers_on_success() {
    let app = app();
    let response = app
        .oneshot(post_json(
            "/auth/login",
            None,
            json!({ "email": "admin@example.com", "password": "admin-pass" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-ratelimit-limit"], "10");
    assert_eq!(response.headers()["x-ratelimit-remaining"], "9");
}

#[tokio::test]
async fn test_health_reports_dependencies() {
    let app = app();

    let (status, body) = send(&app, get("/health", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["redis"]["status"], "healthy");
    assert_eq!(body["services"]["database"]["status"], "healthy");
}
