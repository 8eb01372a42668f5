//! Common test utilities and harness for contract-runner integration tests
//!
//! This module provides:
//! - FakeUsersApi: a stateful stand-in for the remote users API, served by wiremock
//! - TestApi: owns the mock server and hands out configs/clients pointing at it
//! - Faults: switches that make the fake misbehave in specific ways

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::json;
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

use users_contract::{Config, NewUser, User, UsersClient};

/// Token the fake API accepts
pub const TEST_TOKEN: &str = "test-token-123";

/// Path prefix the fake API lives under, like the real one
pub const BASE_PATH: &str = "/public/v2";

/// Ways the fake API can be told to misbehave
#[derive(Debug, Clone, Default)]
pub struct Faults {
    /// GET /users/{id} reports a different name than stored
    pub corrupt_reads: bool,
    /// POST /users answers with this id instead of the stored one
    pub create_reports_id: Option<i64>,
    /// DELETE /users/{id} answers with this status and keeps the user
    pub delete_status: Option<u16>,
    /// DELETE /users/{id} answers 204 but keeps the user
    pub ignore_deletes: bool,
    /// PUT /users/{id} answers 200 with the old record and changes nothing
    pub ignore_updates: bool,
    /// DELETE /users/{id} removes the user, but GET /users keeps listing it
    pub list_shows_deleted: bool,
}

#[derive(Debug, Default)]
struct FakeState {
    users: BTreeMap<i64, User>,
    next_id: i64,
    deleted: Vec<i64>,
    stale_listings: BTreeMap<i64, User>,
    requests: Vec<String>,
}

/// Stateful fake of the users collection
#[derive(Clone)]
pub struct FakeUsersApi {
    state: Arc<Mutex<FakeState>>,
    faults: Faults,
}

impl FakeUsersApi {
    pub fn new(faults: Faults) -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeState {
                next_id: 7000,
                ..FakeState::default()
            })),
            faults,
        }
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().expect("fake state poisoned")
    }

    /// Insert a user directly, bypassing HTTP
    pub fn seed(&self, payload: NewUser) -> User {
        let mut state = self.lock();
        state.next_id += 1;
        let user = User {
            id: state.next_id,
            name: payload.name,
            email: payload.email,
            gender: payload.gender,
            status: payload.status,
        };
        state.users.insert(user.id, user.clone());
        user
    }

    pub fn users(&self) -> Vec<User> {
        self.lock().users.values().cloned().collect()
    }

    pub fn contains(&self, id: i64) -> bool {
        self.lock().users.contains_key(&id)
    }

    pub fn contains_email(&self, email: &str) -> bool {
        self.lock().users.values().any(|user| user.email == email)
    }

    /// Ids removed through DELETE, in order
    pub fn deleted(&self) -> Vec<i64> {
        self.lock().deleted.clone()
    }

    /// "METHOD /path" for every request received
    pub fn requests(&self) -> Vec<String> {
        self.lock().requests.clone()
    }

    fn list(&self, request: &Request) -> ResponseTemplate {
        let filter = request
            .url
            .query_pairs()
            .find(|(key, _)| key == "email")
            .map(|(_, value)| value.into_owned());
        let state = self.lock();
        // newest first, partial email match, like the real API
        let users: Vec<&User> = state
            .users
            .values()
            .chain(state.stale_listings.values())
            .rev()
            .filter(|user| filter.as_ref().is_none_or(|f| user.email.contains(f.as_str())))
            .collect();
        ResponseTemplate::new(200).set_body_json(&users)
    }

    fn create(&self, request: &Request) -> ResponseTemplate {
        let payload: NewUser = match serde_json::from_slice(&request.body) {
            Ok(payload) => payload,
            Err(e) => return unprocessable("body", &e.to_string()),
        };
        if self.contains_email(&payload.email) {
            return unprocessable("email", "has already been taken");
        }
        let mut user = self.seed(payload);
        if let Some(id) = self.faults.create_reports_id {
            user.id = id;
        }
        ResponseTemplate::new(201).set_body_json(&user)
    }

    fn get(&self, id: i64) -> ResponseTemplate {
        let state = self.lock();
        match state.users.get(&id) {
            Some(user) if self.faults.corrupt_reads => {
                let mut user = user.clone();
                user.name.push_str("_corrupted");
                ResponseTemplate::new(200).set_body_json(&user)
            }
            Some(user) => ResponseTemplate::new(200).set_body_json(user),
            None => not_found(),
        }
    }

    fn update(&self, id: i64, request: &Request) -> ResponseTemplate {
        let payload: NewUser = match serde_json::from_slice(&request.body) {
            Ok(payload) => payload,
            Err(e) => return unprocessable("body", &e.to_string()),
        };
        let mut state = self.lock();
        let Some(user) = state.users.get_mut(&id) else {
            return not_found();
        };
        if !self.faults.ignore_updates {
            user.name = payload.name;
            user.email = payload.email;
            user.gender = payload.gender;
            user.status = payload.status;
        }
        ResponseTemplate::new(200).set_body_json(&*user)
    }

    fn delete(&self, id: i64) -> ResponseTemplate {
        if let Some(status) = self.faults.delete_status {
            return ResponseTemplate::new(status).set_body_json(json!({"message": "Internal error"}));
        }
        let mut state = self.lock();
        if !state.users.contains_key(&id) {
            return not_found();
        }
        if !self.faults.ignore_deletes {
            if let Some(user) = state.users.remove(&id) {
                if self.faults.list_shows_deleted {
                    state.stale_listings.insert(id, user);
                }
            }
            state.deleted.push(id);
        }
        ResponseTemplate::new(204)
    }
}

impl Respond for FakeUsersApi {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let path = request.url.path().to_string();
        self.lock()
            .requests
            .push(format!("{} {}", request.method, path));

        let authorized = request
            .headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value == format!("Bearer {TEST_TOKEN}"));
        if !authorized {
            return ResponseTemplate::new(401)
                .set_body_json(json!({"message": "Authentication failed"}));
        }

        let Some(relative) = path.strip_prefix(BASE_PATH) else {
            return not_found();
        };
        let segments: Vec<&str> = relative.trim_matches('/').split('/').collect();
        match (request.method.as_str(), segments.as_slice()) {
            ("GET", ["users"]) => self.list(request),
            ("POST", ["users"]) => self.create(request),
            (method, ["users", id]) => match id.parse::<i64>() {
                Ok(id) => match method {
                    "GET" => self.get(id),
                    "PUT" => self.update(id, request),
                    "DELETE" => self.delete(id),
                    _ => ResponseTemplate::new(405),
                },
                Err(_) => not_found(),
            },
            _ => not_found(),
        }
    }
}

fn not_found() -> ResponseTemplate {
    ResponseTemplate::new(404).set_body_json(json!({"message": "Resource not found"}))
}

fn unprocessable(field: &str, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(422).set_body_json(json!([{"field": field, "message": message}]))
}

/// Mock server running a fake users API
pub struct TestApi {
    server: MockServer,
    fake: FakeUsersApi,
}

impl TestApi {
    /// Start a well-behaved fake API
    pub async fn start() -> Self {
        Self::with_faults(Faults::default()).await
    }

    /// Start a fake API with the given faults switched on
    pub async fn with_faults(faults: Faults) -> Self {
        let server = MockServer::start().await;
        let fake = FakeUsersApi::new(faults);
        Mock::given(any())
            .respond_with(fake.clone())
            .mount(&server)
            .await;
        Self { server, fake }
    }

    pub fn fake(&self) -> &FakeUsersApi {
        &self.fake
    }

    /// Get the base URL for API requests
    pub fn base_url(&self) -> String {
        format!("{}{}", self.server.uri(), BASE_PATH)
    }

    pub fn config(&self) -> Config {
        Config::new(&self.base_url(), TEST_TOKEN).expect("valid test config")
    }

    pub fn client(&self) -> UsersClient {
        UsersClient::new(&self.config()).expect("client builds")
    }

    /// A client whose bearer token the fake rejects
    pub fn unauthorized_client(&self) -> UsersClient {
        let config = Config::new(&self.base_url(), "wrong-token").expect("valid test config");
        UsersClient::new(&config).expect("client builds")
    }
}

/// Config pointing at a port nothing listens on
pub fn unreachable_config() -> Config {
    Config::new("http://127.0.0.1:9", TEST_TOKEN).expect("valid test config")
}

// Re-export commonly used types for tests
pub use users_contract::HarnessError;
