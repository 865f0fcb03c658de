use async_trait::async_trait;
use shared::{
    domain::{
        requests::{LoginRequest, OwnerLoginRequest, SignupRequest},
        responses::{LoginResponse, OwnerLoginResponse, SignupResponse},
    },
    errors::HttpError,
};
use std::sync::Arc;

pub type DynIdentityClient = Arc<dyn IdentityClientTrait + Send + Sync>;

/// The remote identity endpoint.
#[async_trait]
pub trait IdentityClientTrait {
    async fn login(&self, input: &LoginRequest) -> Result<LoginResponse, HttpError>;
    async fn owner_login(
        &self,
        input: &OwnerLoginRequest,
    ) -> Result<OwnerLoginResponse, HttpError>;
    async fn signup(&self, input: &SignupRequest) -> Result<SignupResponse, HttpError>;
}
