//! Authentication test helpers

use channel_chat::backend::auth::sessions::create_token;
use channel_chat::shared::UserId;

/// Secret the test application signs and verifies tokens with
pub const TEST_SECRET: &str = "integration-test-secret";

/// Generate a test JWT token
pub fn generate_test_token(user_id: UserId) -> String {
    create_token(user_id, &format!("user{}@example.com", user_id), TEST_SECRET)
        .expect("Failed to generate test token")
}

/// Create authorization header value
pub fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}
