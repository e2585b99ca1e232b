//! API router and OpenAPI document

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::FromRef,
    middleware,
    routing::{delete, get, post},
    Json, Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::application::{AuthService, BookingService, CatalogueService};
use crate::domain::Role;
use crate::infrastructure::crypto::jwt::TokenService;
use crate::interfaces::http::common::{ApiResponse, ErrorBody};
use crate::interfaces::http::middleware::{require_auth, AuthGate};

use super::modules::{admin, auth, bookings, classrooms, health, metrics};

/// Shared state for every route. Handlers pull their own slice via `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub bookings: Arc<BookingService>,
    pub catalogue: Arc<CatalogueService>,
    pub tokens: TokenService,
    pub started_at: Arc<Instant>,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(
        auth: Arc<AuthService>,
        bookings: Arc<BookingService>,
        catalogue: Arc<CatalogueService>,
    ) -> Self {
        Self {
            tokens: auth.tokens().clone(),
            auth,
            bookings,
            catalogue,
            started_at: Arc::new(Instant::now()),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

impl FromRef<AppState> for auth::AuthHandlerState {
    fn from_ref(s: &AppState) -> Self {
        auth::AuthHandlerState {
            auth: Arc::clone(&s.auth),
        }
    }
}

impl FromRef<AppState> for bookings::BookingState {
    fn from_ref(s: &AppState) -> Self {
        bookings::BookingState {
            bookings: Arc::clone(&s.bookings),
        }
    }
}

impl FromRef<AppState> for classrooms::CatalogueState {
    fn from_ref(s: &AppState) -> Self {
        classrooms::CatalogueState {
            catalogue: Arc::clone(&s.catalogue),
        }
    }
}

impl FromRef<AppState> for admin::AdminState {
    fn from_ref(s: &AppState) -> Self {
        admin::AdminState {
            auth: Arc::clone(&s.auth),
            bookings: Arc::clone(&s.bookings),
            catalogue: Arc::clone(&s.catalogue),
        }
    }
}

impl FromRef<AppState> for health::HealthState {
    fn from_ref(s: &AppState) -> Self {
        health::HealthState {
            bookings: Arc::clone(&s.bookings),
            started_at: Arc::clone(&s.started_at),
        }
    }
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token from /api/auth/login or /api/auth/register"))
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::register,
        auth::get_current_user,
        bookings::create_booking,
        bookings::my_bookings,
        bookings::availability,
        bookings::cancel_booking,
        classrooms::list_classrooms,
        classrooms::classrooms_by_branch,
        classrooms::create_classroom,
        classrooms::delete_classroom,
        admin::all_bookings,
        admin::dashboard_stats,
        admin::list_faculty,
        admin::create_faculty,
        admin::delete_faculty,
        admin::faculty_branches,
        admin::list_admins,
        admin::create_admin,
        admin::get_admin,
        admin::update_admin,
        admin::deactivate_admin,
        admin::reset_user_password,
    ),
    components(
        schemas(
            ErrorBody,
            ApiResponse<String>,
            health::HealthResponse,
            health::ComponentHealth,
            auth::LoginRequest,
            auth::RegisterRequest,
            auth::LoginResponse,
            auth::ProfileResponse,
            auth::UserInfo,
            bookings::CreateBookingRequest,
            bookings::BookingDto,
            bookings::BookingResult,
            bookings::AvailabilityResponse,
            classrooms::ClassroomDto,
            classrooms::CreateClassroomRequest,
            admin::OwnerDto,
            admin::AdminBookingDto,
            admin::StatsDto,
            admin::FacultyDto,
            admin::CreateFacultyRequest,
            admin::AdminDto,
            admin::CreateAdminRequest,
            admin::UpdateAdminRequest,
            admin::ResetPasswordRequest,
            admin::PasswordResetDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness and storage probe"),
        (name = "Authentication", description = "Login, roster-gated registration, current profile"),
        (name = "Bookings", description = "Smartboard slot booking"),
        (name = "Classrooms", description = "Classroom and smartboard catalogue"),
        (name = "Admin", description = "Administrator views, roster and admin accounts"),
    ),
    info(
        title = "Smartboard Booking API",
        version = "1.0.0",
        description = "Book classroom smartboards by date and time slot"
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full HTTP surface
pub fn create_api_router(state: AppState) -> Router {
    let any_user = AuthGate::any(state.tokens.clone());
    let admin_only = AuthGate::roles(state.tokens.clone(), &[Role::Admin]);

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/auth/login", post(auth::login))
        .route("/auth/register", post(auth::register));

    let member_routes = Router::new()
        .route("/auth/me", get(auth::get_current_user))
        .route("/bookings", post(bookings::create_booking))
        .route("/bookings/mine", get(bookings::my_bookings))
        .route("/bookings/availability", get(bookings::availability))
        .route("/bookings/{id}", delete(bookings::cancel_booking))
        .route("/classrooms", get(classrooms::list_classrooms))
        .route("/classrooms/{branch}", get(classrooms::classrooms_by_branch))
        .route_layer(middleware::from_fn_with_state(any_user, require_auth));

    let admin_routes = Router::new()
        .route("/admin", get(admin::list_admins).post(admin::create_admin))
        .route("/admin/bookings", get(admin::all_bookings))
        .route("/admin/stats", get(admin::dashboard_stats))
        .route(
            "/admin/faculty",
            get(admin::list_faculty).post(admin::create_faculty),
        )
        .route("/admin/faculty/{id}", delete(admin::delete_faculty))
        .route("/admin/classrooms", post(classrooms::create_classroom))
        .route("/admin/classrooms/{id}", delete(classrooms::delete_classroom))
        .route(
            "/admin/{id}",
            get(admin::get_admin)
                .put(admin::update_admin)
                .delete(admin::deactivate_admin),
        )
        .route("/faculties/branches", get(admin::faculty_branches))
        .route("/auth/admin-reset-password", post(admin::reset_user_password))
        .route_layer(middleware::from_fn_with_state(admin_only, require_auth));

    let api_routes = Router::new()
        .merge(public_routes)
        .merge(member_routes)
        .merge(admin_routes);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .nest("/api", api_routes)
        .route("/api-docs/openapi.json", get(openapi_json));

    if let Some(handle) = state.metrics.clone() {
        let scrape = Router::new()
            .route("/metrics", get(metrics::prometheus_metrics))
            .with_state(metrics::MetricsState { handle });
        router = router.merge(scrape);
    }

    router
        .route_layer(middleware::from_fn(metrics::http_metrics_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::application::AdminAccount;
    use crate::domain::{Identity, NewFaculty, RepositoryProvider, User};
    use crate::infrastructure::crypto::jwt::JwtConfig;
    use crate::infrastructure::storage::InMemoryRepositoryProvider;

    const TEST_SECRET: &str = "router-test-secret";
    const ADMIN_EMAIL: &str = "registrar@campus.edu";
    const ADMIN_PASSWORD: &str = "admin-pass";

    async fn app() -> Router {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(InMemoryRepositoryProvider::new());
        let tokens = TokenService::new(JwtConfig::new(TEST_SECRET));
        let auth = Arc::new(AuthService::new(repos.clone(), tokens).with_bcrypt_cost(4));
        let bookings = Arc::new(BookingService::new(repos.clone()));
        let catalogue = Arc::new(CatalogueService::new(repos));

        auth.seed_default_admin(&AdminAccount {
            admin_id: "A001".into(),
            name: "Registrar".into(),
            position: "Head".into(),
            branch: "ADMIN".into(),
            email: ADMIN_EMAIL.into(),
            phone: "555-0100".into(),
            password: ADMIN_PASSWORD.into(),
        })
        .await
        .unwrap();

        for (id, name, email) in [
            ("F001", "Ada Lovelace", "ada@campus.edu"),
            ("F002", "Alan Turing", "alan@campus.edu"),
        ] {
            catalogue
                .add_faculty(NewFaculty {
                    faculty_id: id.into(),
                    name: name.into(),
                    branch: "cse".into(),
                    email: email.into(),
                    phone: None,
                })
                .await
                .unwrap();
        }

        create_api_router(AppState::new(auth, bookings, catalogue))
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let resp = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    async fn register(app: &Router, email: &str) -> String {
        let (status, body) = send(
            app,
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({"email": email, "password": "secret1"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["token"].as_str().unwrap().to_string()
    }

    async fn admin_token(app: &Router) -> String {
        let (status, body) = send(
            app,
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"email": ADMIN_EMAIL, "password": ADMIN_PASSWORD})),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["user"]["role"], "admin");
        body["token"].as_str().unwrap().to_string()
    }

    fn booking(date: &str, classroom: &str, time: &str) -> Value {
        json!({"date": date, "classroom": classroom, "time": time})
    }

    #[tokio::test]
    async fn health_is_public() {
        let app = app().await;
        let (status, body) = send(&app, Method::GET, "/api/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["storage"]["status"], "up");
    }

    #[tokio::test]
    async fn register_then_login_then_profile() {
        let app = app().await;
        register(&app, "Ada@Campus.edu").await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"email": "ada@campus.edu", "password": "secret1"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["branch"], "CSE");
        assert!(body.get("success").is_none());
        let token = body["token"].as_str().unwrap().to_string();

        let (status, body) = send(&app, Method::GET, "/api/auth/me", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["email"], "ada@campus.edu");
        assert_eq!(body["user"]["name"], "Ada Lovelace");
    }

    #[tokio::test]
    async fn registration_rejects_off_roster_and_repeat() {
        let app = app().await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({"email": "stranger@campus.edu", "password": "secret1"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "NOT_ELIGIBLE");

        register(&app, "ada@campus.edu").await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({"email": "ada@campus.edu", "password": "secret1"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "ALREADY_REGISTERED");
    }

    #[tokio::test]
    async fn wrong_password_is_invalid_credentials() {
        let app = app().await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"email": ADMIN_EMAIL, "password": "nope"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_CREDENTIALS");
    }

    #[tokio::test]
    async fn second_booking_of_same_slot_is_slot_taken() {
        let app = app().await;
        let ada = register(&app, "ada@campus.edu").await;
        let alan = register(&app, "alan@campus.edu").await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/bookings",
            Some(&ada),
            Some(booking("2026-11-02", "CSE-101", "09:30-10:30")),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        assert_eq!(body["message"], "Booking confirmed");
        assert_eq!(body["booking"]["timeSlot"], "09:30-10:30");

        let (status, body) = send(&app, Method::GET, "/api/bookings/mine", Some(&ada), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["classroom"], "CSE-101");

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/bookings",
            Some(&alan),
            Some(booking("2026-11-02", "CSE-101", "09:30-10:30")),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "SLOT_TAKEN");
        assert_eq!(body["error"], "Slot already booked");
    }

    #[tokio::test]
    async fn booking_input_errors() {
        let app = app().await;
        let ada = register(&app, "ada@campus.edu").await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/bookings",
            Some(&ada),
            Some(booking("2026-11-02", "CSE-101", "08:00-09:00")),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_SLOT");

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/bookings",
            Some(&ada),
            Some(json!({"date": "2026-11-02", "time": "09:30-10:30"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_INPUT");
    }

    /// Token for a faculty member that exists only in the token itself.
    fn faculty_token(n: usize) -> String {
        let now = chrono::Utc::now();
        let identity = Identity::User(User {
            id: format!("faculty-{n}"),
            name: format!("Faculty {n}"),
            email: format!("faculty{n}@campus.edu"),
            password_hash: String::new(),
            branch: "CSE".into(),
            phone: None,
            role: Role::Faculty,
            is_active: true,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        });
        TokenService::new(JwtConfig::new(TEST_SECRET))
            .issue(&identity)
            .unwrap()
    }

    #[tokio::test]
    async fn concurrent_requests_from_distinct_owners_admit_exactly_one() {
        let app = app().await;

        let mut handles = Vec::new();
        for n in 0..10 {
            let app = app.clone();
            let token = faculty_token(n);
            handles.push(tokio::spawn(async move {
                send(
                    &app,
                    Method::POST,
                    "/api/bookings",
                    Some(&token),
                    Some(booking("2026-11-03", "CSE-202", "11:45-12:45")),
                )
                .await
            }));
        }

        let mut winners = Vec::new();
        for handle in handles {
            let (status, body) = handle.await.unwrap();
            if status == StatusCode::CREATED {
                winners.push(body["booking"]["userId"].clone());
            } else {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(body["code"], "SLOT_TAKEN");
            }
        }
        assert_eq!(winners.len(), 1);
        assert!(winners[0].as_str().unwrap().starts_with("faculty-"));

        let admin = admin_token(&app).await;
        let (_, body) = send(&app, Method::GET, "/api/admin/bookings", Some(&admin), None).await;
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["userId"], winners[0]);
        // owners minted outside the store have no account to resolve
        assert!(rows[0]["user"].is_null());
    }

    #[tokio::test]
    async fn availability_lists_booked_and_free() {
        let app = app().await;
        let ada = register(&app, "ada@campus.edu").await;
        send(
            &app,
            Method::POST,
            "/api/bookings",
            Some(&ada),
            Some(booking("2026-11-02", "CSE-101", "14:30-15:30")),
        )
        .await;

        let (status, body) = send(
            &app,
            Method::GET,
            "/api/bookings/availability?date=2026-11-02&classroom=CSE-101",
            Some(&ada),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["bookedTimes"], json!(["14:30-15:30"]));
        assert_eq!(body["availableTimes"].as_array().unwrap().len(), 7);

        let (status, body) = send(
            &app,
            Method::GET,
            "/api/bookings/availability?date=2026-11-02",
            Some(&ada),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_INPUT");
    }

    #[tokio::test]
    async fn only_owner_or_admin_may_cancel() {
        let app = app().await;
        let ada = register(&app, "ada@campus.edu").await;
        let alan = register(&app, "alan@campus.edu").await;

        let (_, body) = send(
            &app,
            Method::POST,
            "/api/bookings",
            Some(&ada),
            Some(booking("2026-11-04", "CSE-101", "10:45-11:45")),
        )
        .await;
        let id = body["booking"]["id"].as_str().unwrap().to_string();
        let uri = format!("/api/bookings/{id}");

        let (status, body) = send(&app, Method::DELETE, &uri, Some(&alan), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["code"], "FORBIDDEN");

        let admin = admin_token(&app).await;
        let (status, body) = send(&app, Method::DELETE, &uri, Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Booking cancelled");

        let (status, body) = send(&app, Method::DELETE, &uri, Some(&ada), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn protected_routes_report_auth_failures() {
        let app = app().await;
        let (status, body) = send(&app, Method::GET, "/api/bookings/mine", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "NO_TOKEN");

        let (status, body) =
            send(&app, Method::GET, "/api/bookings/mine", Some("garbage"), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "INVALID_OR_EXPIRED_TOKEN");

        let ada = register(&app, "ada@campus.edu").await;
        let (status, body) = send(&app, Method::GET, "/api/admin/stats", Some(&ada), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["code"], "FORBIDDEN");
    }

    #[tokio::test]
    async fn admin_sees_stats_and_all_bookings() {
        let app = app().await;
        let ada = register(&app, "ada@campus.edu").await;
        send(
            &app,
            Method::POST,
            "/api/bookings",
            Some(&ada),
            Some(booking("2026-11-02", "CSE-101", "09:30-10:30")),
        )
        .await;

        let admin = admin_token(&app).await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/admin/classrooms",
            Some(&admin),
            Some(json!({"branch": "cse", "name": "CSE-101", "smartboards": []})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");

        let (status, body) = send(&app, Method::GET, "/api/admin/stats", Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["classrooms"], 1);
        assert_eq!(body["data"]["bookings"], 1);
        assert_eq!(body["data"]["facultyMembers"], 2);

        let (status, body) =
            send(&app, Method::GET, "/api/admin/bookings", Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK);
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["user"]["email"], "ada@campus.edu");

        let (status, body) =
            send(&app, Method::GET, "/api/classrooms/CSE", Some(&ada), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["name"], "CSE-101");
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let app = app().await;
        let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/api/bookings"].is_object());
    }

    async fn login(app: &Router, email: &str, password: &str) -> (StatusCode, Value) {
        send(
            app,
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"email": email, "password": password})),
        )
        .await
    }

    #[tokio::test]
    async fn admin_accounts_are_managed_and_soft_deleted() {
        let app = app().await;
        let (_, body) = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
        let admin = body["token"].as_str().unwrap().to_string();
        let own_id = body["user"]["id"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/admin",
            Some(&admin),
            Some(json!({
                "adminId": "A002",
                "name": "Deputy Registrar",
                "position": "Deputy",
                "branch": "ADMIN",
                "email": "deputy@campus.edu",
                "phone": "555-0102",
                "password": "deputy-pass"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        assert!(body["data"].get("passwordHash").is_none());
        let deputy_id = body["data"]["id"].as_str().unwrap().to_string();
        let deputy_uri = format!("/api/admin/{deputy_id}");

        let (status, body) = send(
            &app,
            Method::PUT,
            &deputy_uri,
            Some(&admin),
            Some(json!({"position": "Acting Head"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["data"]["position"], "Acting Head");
        assert_eq!(body["data"]["email"], "deputy@campus.edu");

        let (status, _) = login(&app, "deputy@campus.edu", "deputy-pass").await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, Method::GET, "/api/admin", Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 2);

        let (status, body) = send(&app, Method::DELETE, &deputy_uri, Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["isActive"], false);

        // deactivated admin cannot log in
        let (status, body) = login(&app, "deputy@campus.edu", "deputy-pass").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_CREDENTIALS");

        let (_, body) = send(&app, Method::GET, "/api/admin", Some(&admin), None).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        let (status, body) = send(&app, Method::GET, &deputy_uri, Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["isActive"], false);

        let own_uri = format!("/api/admin/{own_id}");
        let (status, body) = send(&app, Method::DELETE, &own_uri, Some(&admin), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_INPUT");

        let (status, body) =
            send(&app, Method::GET, "/api/admin/missing-id", Some(&admin), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn admin_removes_roster_entries_and_classrooms() {
        let app = app().await;
        let admin = admin_token(&app).await;
        let ada = register(&app, "ada@campus.edu").await;

        let (status, body) =
            send(&app, Method::GET, "/api/faculties/branches", Some(&ada), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{body}");

        let (status, body) =
            send(&app, Method::GET, "/api/faculties/branches", Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], json!(["CSE"]));

        let (_, body) = send(&app, Method::GET, "/api/admin/faculty", Some(&admin), None).await;
        let alan = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .find(|f| f["email"] == "alan@campus.edu")
            .unwrap()["id"]
            .as_str()
            .unwrap()
            .to_string();
        let uri = format!("/api/admin/faculty/{alan}");
        let (status, body) = send(&app, Method::DELETE, &uri, Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["email"], "alan@campus.edu");
        let (status, _) = send(&app, Method::DELETE, &uri, Some(&admin), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        // off the roster now, so registration is refused
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({"email": "alan@campus.edu", "password": "secret1"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "NOT_ELIGIBLE");

        let (_, body) = send(
            &app,
            Method::POST,
            "/api/admin/classrooms",
            Some(&admin),
            Some(json!({"branch": "cse", "name": "CSE-101", "smartboards": []})),
        )
        .await;
        let room = body["data"]["id"].as_str().unwrap().to_string();
        let uri = format!("/api/admin/classrooms/{room}");

        let (status, _) = send(&app, Method::DELETE, &uri, Some(&ada), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        let (status, body) = send(&app, Method::DELETE, &uri, Some(&admin), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["name"], "CSE-101");

        let (_, body) = send(&app, Method::GET, "/api/classrooms", Some(&ada), None).await;
        assert!(body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn admin_resets_a_faculty_password() {
        let app = app().await;
        let admin = admin_token(&app).await;
        let ada = register(&app, "ada@campus.edu").await;
        let reset = json!({"email": "ada@campus.edu", "newPassword": "changed1"});

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/auth/admin-reset-password",
            Some(&ada),
            Some(reset.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/admin-reset-password",
            Some(&admin),
            Some(reset),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["data"]["email"], "ada@campus.edu");

        let (status, _) = login(&app, "ada@campus.edu", "secret1").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = login(&app, "ada@campus.edu", "changed1").await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/admin-reset-password",
            Some(&admin),
            Some(json!({"email": "ghost@campus.edu", "newPassword": "changed1"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
    }
}
