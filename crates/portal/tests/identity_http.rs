use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    routing::{get, post},
};
use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{EncodingKey, Header};
use parking_lot::Mutex;
use portal::{
    abstract_trait::{DynIdentityClient, DynKeyValueStore, KeyValueStore, Navigator},
    cache::{FileStore, TOKEN_SLOT, USER_SLOT},
    di::DependenciesInject,
    middleware::{GuardOutcome, NavigationRequest, PortalOutcome},
    service::IdentityHttpClient,
    state::AppState,
};
use serde_json::{Value, json};
use shared::{domain::requests::SignupRequest, errors::AuthError, model::Role};
use std::{
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

const PASSWORD: &str = "correct-horse";

#[derive(Clone, Default)]
struct Backend {
    hits: Arc<AtomicUsize>,
}

struct TestServer {
    base_url: String,
    backend: Backend,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        let backend = Backend::default();
        let app = Router::new()
            .route("/auth/login", post(login))
            .route("/auth/owner-login", post(owner_login))
            .route("/auth/signup", post(signup))
            .route("/me", get(echo_authorization))
            .route("/broken/auth/login", post(broken))
            .with_state(backend.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            backend,
            handle,
        }
    }

    fn hits(&self) -> usize {
        self.backend.hits.load(Ordering::SeqCst)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn mint_token(sub: &str) -> String {
    let claims = json!({
        "sub": sub,
        "iat": Utc::now().timestamp(),
        "exp": (Utc::now() + ChronoDuration::minutes(30)).timestamp(),
    });
    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"backend-only-secret"),
    )
    .expect("failed to encode jwt")
}

fn user_json(id: &str, email: &str, role: &str, blocked: bool) -> Value {
    json!({
        "_id": id,
        "email": email,
        "firstName": "Test",
        "lastName": "Person",
        "role": role,
        "isBlocked": blocked,
    })
}

async fn login(
    State(backend): State<Backend>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    backend.hits.fetch_add(1, Ordering::SeqCst);

    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    let account = match email {
        "admin@example.com" => Some(("a-1", "system_admin", false)),
        "manager@example.com" => Some(("m-1", "manager", false)),
        "owner@example.com" => Some(("o-1", "owner", false)),
        "blocked@example.com" => Some(("b-1", "manager", true)),
        _ => None,
    };

    match account {
        Some((id, role, blocked)) if password == PASSWORD => (
            StatusCode::OK,
            Json(json!({
                "user": user_json(id, email, role, blocked),
                "token": mint_token(id),
                "refreshToken": format!("refresh-{id}"),
            })),
        ),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Incorrect email or password" })),
        ),
    }
}

async fn owner_login(
    State(backend): State<Backend>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    backend.hits.fetch_add(1, Ordering::SeqCst);

    if body["nationalId"] == "0012345678" {
        (
            StatusCode::OK,
            Json(json!({
                "user": user_json("o-9", "", "owner", false),
                "token": mint_token("o-9"),
                "propertyCount": 4,
            })),
        )
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "No owner registered with this national ID" })),
        )
    }
}

async fn signup(
    State(backend): State<Backend>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    backend.hits.fetch_add(1, Ordering::SeqCst);

    if body.get("confirmPassword").is_some() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "unexpected field confirmPassword" })),
        );
    }

    if body["email"] == "taken@example.com" {
        (
            StatusCode::CONFLICT,
            Json(json!({ "message": "Email already registered" })),
        )
    } else {
        (StatusCode::CREATED, Json(json!({ "message": "created" })))
    }
}

async fn echo_authorization(headers: HeaderMap) -> String {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("none")
        .to_string()
}

async fn broken(State(backend): State<Backend>) -> (StatusCode, &'static str) {
    backend.hits.fetch_add(1, Ordering::SeqCst);
    (StatusCode::INTERNAL_SERVER_ERROR, "oops")
}

#[derive(Default)]
struct RecordingNavigator {
    visited: Mutex<Vec<String>>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.visited.lock().push(path.to_string());
    }
}

fn app_state(base_url: &str, session_file: &Path) -> (AppState, Arc<FileStore>) {
    let storage = Arc::new(FileStore::new(session_file));
    let deps = DependenciesInject {
        identity: Arc::new(IdentityHttpClient::new(base_url, Duration::from_secs(5)).unwrap())
            as DynIdentityClient,
        storage: storage.clone() as DynKeyValueStore,
        navigator: Arc::new(RecordingNavigator::default()),
    };
    let state = AppState::from_deps(deps);
    state.start();
    (state, storage)
}

fn session_file(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join("session.json")
}

fn profile(email: &str) -> SignupRequest {
    SignupRequest {
        first_name: "Nima".into(),
        last_name: "Rahimi".into(),
        email: email.into(),
        phone: "09351234567".into(),
        national_id: "0098765432".into(),
        password: "secret1".into(),
        confirm_password: "secret1".into(),
        role: Role::Manager,
    }
}

#[tokio::test]
async fn admin_portal_revokes_manager_session() {
    let server = TestServer::spawn().await;
    let dir = tempfile::tempdir().unwrap();
    let (state, storage) = app_state(&server.base_url, &session_file(&dir));

    let outcome = state
        .portal
        .admin_login("manager@example.com", PASSWORD)
        .await
        .unwrap();

    let PortalOutcome::Stay { on, notice } = outcome else {
        panic!("expected to stay on the admin login page");
    };
    assert_eq!(on, "/admin/login");
    assert!(notice.starts_with("Access denied"));

    let snapshot = state.session.get();
    assert!(!snapshot.is_authenticated);
    assert_eq!(snapshot.user, None);
    assert_eq!(storage.get(TOKEN_SLOT).unwrap(), None);
    assert_eq!(storage.get(USER_SLOT).unwrap(), None);
}

#[tokio::test]
async fn staff_login_persists_and_survives_restart() {
    let server = TestServer::spawn().await;
    let dir = tempfile::tempdir().unwrap();
    let path = session_file(&dir);

    {
        let (state, _storage) = app_state(&server.base_url, &path);
        let outcome = state
            .portal
            .staff_login("owner@example.com", PASSWORD)
            .await
            .unwrap();
        assert_eq!(
            outcome,
            PortalOutcome::Navigate {
                to: "/owner".into(),
                notice: None
            }
        );
    }

    let (restarted, _storage) = app_state(&server.base_url, &path);
    let session = restarted.session.session().expect("session restored");
    assert_eq!(session.user.id, "o-1");
    assert_eq!(session.user.role, Role::Owner);
    assert_eq!(session.refresh_token.as_deref(), Some("refresh-o-1"));

    assert_eq!(
        restarted
            .guard
            .check(&NavigationRequest::to("/").requiring(&[Role::Manager])),
        GuardOutcome::Redirected("/owner".into())
    );
    assert_eq!(
        restarted.guard.check(&NavigationRequest::for_area("/owner/contracts")),
        GuardOutcome::Render
    );
}

#[tokio::test]
async fn blocked_account_is_rejected_after_successful_transport() {
    let server = TestServer::spawn().await;
    let dir = tempfile::tempdir().unwrap();
    let (state, storage) = app_state(&server.base_url, &session_file(&dir));

    let err = state
        .exchange
        .password_login("blocked@example.com", PASSWORD)
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::AccountBlocked(_)));
    assert_eq!(server.hits(), 1);
    assert!(!state.session.get().is_authenticated);
    assert_eq!(storage.get(TOKEN_SLOT).unwrap(), None);
}

#[tokio::test]
async fn server_message_is_surfaced_verbatim() {
    let server = TestServer::spawn().await;
    let dir = tempfile::tempdir().unwrap();
    let (state, _storage) = app_state(&server.base_url, &session_file(&dir));

    let err = state
        .portal
        .staff_login("manager@example.com", "wrong")
        .await
        .unwrap_err();

    assert_eq!(
        err,
        AuthError::InvalidCredentials("Incorrect email or password".into())
    );
    assert_eq!(err.to_string(), "Incorrect email or password");
    assert!(!state.portal.is_pending());
}

#[tokio::test]
async fn short_national_id_never_reaches_the_server() {
    let server = TestServer::spawn().await;
    let dir = tempfile::tempdir().unwrap();
    let (state, _storage) = app_state(&server.base_url, &session_file(&dir));

    let err = state.portal.owner_login("12345").await.unwrap_err();

    assert!(matches!(err, AuthError::Validation(_)));
    assert_eq!(server.hits(), 0);
}

#[tokio::test]
async fn owner_login_round_trip() {
    let server = TestServer::spawn().await;
    let dir = tempfile::tempdir().unwrap();
    let (state, _storage) = app_state(&server.base_url, &session_file(&dir));

    let outcome = state.portal.owner_login("0012345678").await.unwrap();
    let PortalOutcome::Navigate { to, notice } = outcome else {
        panic!("expected navigation");
    };
    assert_eq!(to, "/owner");
    assert!(notice.unwrap().contains("4 registered properties"));

    let err = state.portal.owner_login("0000000000").await.unwrap_err();
    assert_eq!(
        err,
        AuthError::NotFoundOrUnauthorized("No owner registered with this national ID".into())
    );
}

#[tokio::test]
async fn signup_reports_conflicts_and_successes() {
    let server = TestServer::spawn().await;
    let dir = tempfile::tempdir().unwrap();
    let (state, _storage) = app_state(&server.base_url, &session_file(&dir));

    let created = state
        .exchange
        .signup(&profile("new@example.com"))
        .await
        .unwrap();
    assert_eq!(created.message.as_deref(), Some("created"));

    let err = state
        .exchange
        .signup(&profile("taken@example.com"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        AuthError::Validation(vec!["Email already registered".into()])
    );
    assert!(!state.session.get().is_authenticated);
}

#[tokio::test]
async fn authorized_requests_carry_the_bearer_token() {
    let server = TestServer::spawn().await;
    let dir = tempfile::tempdir().unwrap();
    let (state, _storage) = app_state(&server.base_url, &session_file(&dir));
    let client = IdentityHttpClient::new(&server.base_url, Duration::from_secs(5)).unwrap();

    let anonymous = client.get("/me", &state.session).send().await.unwrap();
    assert_eq!(anonymous.text().await.unwrap(), "none");

    state
        .exchange
        .password_login("admin@example.com", PASSWORD)
        .await
        .unwrap();

    let signed_in = client.get("/me", &state.session).send().await.unwrap();
    assert_eq!(
        signed_in.text().await.unwrap(),
        state.session.bearer_header().unwrap()
    );
}

#[tokio::test]
async fn non_json_server_error_falls_back_to_reason_phrase() {
    let server = TestServer::spawn().await;
    let dir = tempfile::tempdir().unwrap();
    let (state, _storage) = app_state(&format!("{}/broken", server.base_url), &session_file(&dir));

    let err = state
        .exchange
        .password_login("admin@example.com", PASSWORD)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        AuthError::NetworkOrServer("Internal Server Error".into())
    );
}

#[tokio::test]
async fn unreachable_endpoint_is_a_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let dir = tempfile::tempdir().unwrap();
    let (state, _storage) = app_state(&format!("http://{addr}"), &session_file(&dir));

    let err = state
        .exchange
        .password_login("admin@example.com", PASSWORD)
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::NetworkOrServer(_)));
    assert!(!state.session.get().is_authenticated);
}
