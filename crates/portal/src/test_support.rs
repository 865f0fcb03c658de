use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::json;
use shared::model::{Role, User};

pub fn user(id: &str, role: Role) -> User {
    User {
        id: id.to_string(),
        email: format!("{id}@example.com"),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        phone: None,
        national_id: None,
        role,
        is_blocked: false,
    }
}

fn token_expiring_in(delta: Duration) -> String {
    let claims = json!({ "sub": "u-1", "exp": (Utc::now() + delta).timestamp() });
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"identity-provider-secret"),
    )
    .unwrap()
}

pub fn live_token() -> String {
    token_expiring_in(Duration::hours(1))
}

pub fn expired_token() -> String {
    token_expiring_in(Duration::hours(-1))
}
