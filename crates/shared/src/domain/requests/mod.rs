mod auth;

pub use self::auth::{
    LoginRequest, OwnerLoginRequest, SignupRequest, validate_mobile_phone, validate_national_id,
};
