use crate::model::{Session, User};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerLoginResponse {
    pub user: User,
    pub token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub property_count: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignupResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

impl LoginResponse {
    pub fn into_session(self) -> Session {
        Session::new(self.token, self.user).with_refresh_token(self.refresh_token)
    }
}

impl OwnerLoginResponse {
    pub fn into_session(self) -> (Session, u32) {
        let session = Session::new(self.token, self.user).with_refresh_token(self.refresh_token);
        (session, self.property_count)
    }
}
