//! Shared test helpers for integration tests.
//!
//! The router is exercised end-to-end against in-memory implementations of
//! the collaborator traits, so no database is required.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use bookstore_api::state::AppState;
use bookstore_auth::audit::AuditRecorder;
use bookstore_auth::jwt::{JwtDecoder, JwtEncoder};
use bookstore_auth::password::PasswordHasher;
use bookstore_auth::rbac::PermissionEvaluator;
use bookstore_auth::revocation::{MemoryRefreshTokenStore, TokenBlacklist};
use bookstore_auth::session::AuthService;
use bookstore_core::config::auth::{AuthConfig, TokenCarrier};
use bookstore_core::config::{AppConfig, DatabaseConfig};
use bookstore_core::result::AppResult;
use bookstore_core::traits::audit::AuditSink;
use bookstore_core::traits::catalog::BookCatalog;
use bookstore_core::traits::directory::{IdentityStore, RoleStore};
use bookstore_core::types::audit::NewAuditEntry;
use bookstore_core::types::book::{Book, NewBook};
use bookstore_core::types::user::User;

/// In-memory user directory with the same role grants the migrations seed:
/// admin gets every book permission, editor everything but delete, member
/// read only.
#[derive(Default)]
pub struct TestDirectory {
    users: Mutex<Vec<User>>,
    user_roles: Mutex<HashMap<i64, Vec<String>>>,
}

fn role_grants(role: &str) -> &'static [&'static str] {
    match role {
        "admin" => &["books:read", "books:create", "books:update", "books:delete"],
        "editor" => &["books:read", "books:create", "books:update"],
        "member" => &["books:read"],
        _ => &[],
    }
}

#[async_trait]
impl IdentityStore for TestDirectory {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_id(&self, user_id: i64) -> AppResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == user_id)
            .cloned())
    }

    async fn touch_last_login(&self, user_id: i64, at: DateTime<Utc>) -> AppResult<()> {
        if let Some(user) = self
            .users
            .lock()
            .unwrap()
            .iter_mut()
            .find(|u| u.id == user_id)
        {
            user.last_login = Some(at);
        }
        Ok(())
    }
}

#[async_trait]
impl RoleStore for TestDirectory {
    async fn roles_for_user(&self, user_id: i64) -> AppResult<Vec<String>> {
        Ok(self
            .user_roles
            .lock()
            .unwrap()
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn user_has_permission(&self, user_id: i64, permission: &str) -> AppResult<bool> {
        let roles = self.roles_for_user(user_id).await?;
        Ok(roles
            .iter()
            .any(|role| role_grants(role).contains(&permission)))
    }
}

/// In-memory book catalog.
#[derive(Default)]
pub struct MemoryBooks {
    books: Mutex<Vec<Book>>,
    next_id: Mutex<i64>,
}

#[async_trait]
impl BookCatalog for MemoryBooks {
    async fn list(&self) -> AppResult<Vec<Book>> {
        Ok(self.books.lock().unwrap().clone())
    }

    async fn find(&self, id: i64) -> AppResult<Option<Book>> {
        Ok(self
            .books
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == id)
            .cloned())
    }

    async fn create(&self, book: &NewBook) -> AppResult<Book> {
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        let created = Book {
            id: *next_id,
            title: book.title.clone(),
            author: book.author.clone(),
            isbn: book.isbn.clone(),
            year: book.year,
            price: book.price,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.books.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: i64, book: &NewBook) -> AppResult<Option<Book>> {
        let mut books = self.books.lock().unwrap();
        if let Some(existing) = books.iter_mut().find(|b| b.id == id) {
            existing.title = book.title.clone();
            existing.author = book.author.clone();
            existing.isbn = book.isbn.clone();
            existing.year = book.year;
            existing.price = book.price;
            existing.updated_at = Utc::now();
            Ok(Some(existing.clone()))
        } else {
            Ok(None)
        }
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut books = self.books.lock().unwrap();
        let before = books.len();
        books.retain(|b| b.id != id);
        Ok(books.len() != before)
    }
}

/// Captures audit entries for assertions.
#[derive(Default)]
pub struct CapturingAuditSink {
    pub entries: Mutex<Vec<NewAuditEntry>>,
}

#[async_trait]
impl AuditSink for CapturingAuditSink {
    async fn append(&self, entry: &NewAuditEntry) -> AppResult<()> {
        self.entries.lock().unwrap().push(entry.clone());
        Ok(())
    }
}

/// Test application context.
pub struct TestApp {
    /// The Axum router for making test requests.
    pub router: Router,
    /// User directory, for seeding accounts.
    pub directory: Arc<TestDirectory>,
    /// Captured audit entries.
    pub audit: Arc<CapturingAuditSink>,
    /// Password hasher matching the app configuration.
    hasher: PasswordHasher,
    next_user_id: Mutex<i64>,
}

impl TestApp {
    /// Create a test application with the bearer-header carrier.
    pub async fn new() -> Self {
        Self::with_carrier(TokenCarrier::Bearer).await
    }

    /// Create a test application with the given token carrier.
    pub async fn with_carrier(carrier: TokenCarrier) -> Self {
        let config = AppConfig {
            server: Default::default(),
            database: DatabaseConfig {
                url: "postgres://unused".to_string(),
                max_connections: 1,
                min_connections: 1,
                connect_timeout_seconds: 1,
                idle_timeout_seconds: 1,
            },
            auth: AuthConfig {
                jwt_secret: "integration-test-secret".to_string(),
                bcrypt_cost: 4,
                token_carrier: carrier,
                ..AuthConfig::default()
            },
            logging: Default::default(),
        };

        let directory = Arc::new(TestDirectory::default());
        let books = Arc::new(MemoryBooks::default());
        let audit_sink = Arc::new(CapturingAuditSink::default());
        let refresh_tokens = Arc::new(MemoryRefreshTokenStore::new());
        let blacklist = Arc::new(TokenBlacklist::new());

        let password_hasher = Arc::new(PasswordHasher::new(&config.auth));
        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
        let audit = Arc::new(AuditRecorder::new(audit_sink.clone()));
        let permissions = Arc::new(PermissionEvaluator::new(directory.clone()));
        let auth_service = Arc::new(AuthService::new(
            directory.clone(),
            directory.clone(),
            refresh_tokens.clone(),
            Arc::clone(&blacklist),
            Arc::clone(&password_hasher),
            Arc::clone(&jwt_encoder),
            Arc::clone(&jwt_decoder),
            Arc::clone(&audit),
        ));

        let hasher = PasswordHasher::new(&config.auth);
        let state = AppState {
            config: Arc::new(config),
            jwt_encoder,
            jwt_decoder,
            password_hasher,
            blacklist,
            permissions,
            auth_service,
            audit,
            identities: directory.clone(),
            roles: directory.clone(),
            refresh_tokens,
            books,
        };

        let router = bookstore_api::router::build_router(state);

        Self {
            router,
            directory,
            audit: audit_sink,
            hasher,
            next_user_id: Mutex::new(0),
        }
    }

    /// Seed a user with the given roles. Returns the user ID.
    pub async fn create_test_user(&self, username: &str, password: &str, roles: &[&str]) -> i64 {
        self.create_user_with_status(username, password, roles, true)
            .await
    }

    /// Seed a user, optionally disabled.
    pub async fn create_user_with_status(
        &self,
        username: &str,
        password: &str,
        roles: &[&str],
        is_active: bool,
    ) -> i64 {
        let id = {
            let mut next = self.next_user_id.lock().unwrap();
            *next += 1;
            *next
        };

        let user = User {
            id,
            username: username.to_string(),
            email: format!("{username}@test.com"),
            password_hash: self.hasher.hash(password).expect("Failed to hash password"),
            is_active,
            created_at: Utc::now(),
            last_login: None,
        };

        self.directory.users.lock().unwrap().push(user);
        self.directory
            .user_roles
            .lock()
            .unwrap()
            .insert(id, roles.iter().map(|r| r.to_string()).collect());

        id
    }

    /// Login and return the JWT access token.
    pub async fn login(&self, username: &str, password: &str) -> String {
        let (access, _) = self.login_pair(username, password).await;
        access
    }

    /// Login and return both tokens.
    pub async fn login_pair(&self, username: &str, password: &str) -> (String, String) {
        let response = self
            .request(
                "POST",
                "/auth/login",
                Some(serde_json::json!({
                    "username": username,
                    "password": password,
                })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        let access = response
            .body
            .get("access_token")
            .and_then(|v| v.as_str())
            .expect("No access_token in login response")
            .to_string();
        let refresh = response
            .body
            .get("refresh_token")
            .and_then(|v| v.as_str())
            .expect("No refresh_token in login response")
            .to_string();

        (access, refresh)
    }

    /// Make an HTTP request with an optional bearer token.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("content-type", "application/json");

        if let Some(token) = token {
            req = req.header("authorization", format!("Bearer {}", token));
        }

        self.send(req, body).await
    }

    /// Make an HTTP request with a `Cookie` header.
    pub async fn request_with_cookies(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        cookies: &str,
    ) -> TestResponse {
        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("content-type", "application/json")
            .header("cookie", cookies);

        self.send(req, body).await
    }

    async fn send(&self, req: http::request::Builder, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let set_cookies = response
            .headers()
            .get_all("set-cookie")
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(String::from)
            .collect();

        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            body,
            set_cookies,
        }
    }

    /// Audit actions recorded so far, in order.
    pub fn audit_actions(&self) -> Vec<String> {
        self.audit
            .entries
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.action.clone())
            .collect()
    }
}

/// Response from a test request.
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Parsed JSON body.
    pub body: Value,
    /// `Set-Cookie` header values.
    pub set_cookies: Vec<String>,
}
