//! In-memory application fixture
//!
//! Channel 7 exists with users 1 (`alice`, a participant) and 2 (`bob`, not
//! a participant).

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use channel_chat::backend::chat::InMemoryChatStore;
use channel_chat::backend::routes::create_router;
use channel_chat::backend::server::AppState;
use channel_chat::shared::{AppConfig, ChannelId, SenderProfile, UserId};

use super::auth_helpers::{auth_header, TEST_SECRET};

pub const CHANNEL: ChannelId = 7;
pub const ALICE: UserId = 1;
pub const BOB: UserId = 2;

pub fn test_config() -> AppConfig {
    AppConfig::builder()
        .jwt_secret(TEST_SECRET)
        .build()
        .expect("test configuration is valid")
}

pub fn profile(id: UserId, nickname: &str) -> SenderProfile {
    SenderProfile {
        id,
        email: format!("user{}@example.com", id),
        nickname: nickname.to_string(),
        profile_image: Some(format!("/images/{}.png", nickname)),
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: Arc<InMemoryChatStore>,
}

impl TestApp {
    pub async fn new() -> Self {
        let store = Arc::new(InMemoryChatStore::new());
        store.add_user(profile(ALICE, "alice")).await;
        store.add_user(profile(BOB, "bob")).await;
        store.add_channel(CHANNEL).await;
        store
            .join_channel(ALICE, CHANNEL)
            .await
            .expect("seed membership");

        let state = AppState::new(test_config(), store.clone());
        let router = create_router(state.clone());
        Self {
            router,
            state,
            store,
        }
    }

    /// Post `count` messages as alice through the service, oldest first
    pub async fn seed_messages(&self, count: usize) {
        for i in 1..=count {
            self.state
                .chat
                .post_message(ALICE, CHANNEL, &format!("message {}", i))
                .await
                .expect("seed message");
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        send(&self.router, request).await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(get_request(uri)).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: &str) -> (StatusCode, Value) {
        self.send(post_request(uri, token, body)).await
    }
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .expect("valid request")
}

pub fn post_request(uri: &str, token: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, auth_header(token));
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

/// Drive one request through the router; a non-JSON body reads as `Null`
pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("router is infallible");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}
