use crate::model::Role;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OwnerLoginRequest {
    #[validate(custom(function = "validate_national_id"))]
    pub national_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,

    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(custom(function = "validate_mobile_phone"))]
    pub phone: String,

    #[validate(custom(function = "validate_national_id"))]
    pub national_id: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[serde(skip_serializing, default)]
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub confirm_password: String,

    pub role: Role,
}

/// Exactly ten ASCII digits.
pub fn validate_national_id(value: &str) -> Result<(), ValidationError> {
    if value.len() == 10 && value.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(with_message(
            "national_id",
            "National ID must be exactly 10 digits",
        ))
    }
}

/// Local mobile numbers: `09` followed by nine digits.
pub fn validate_mobile_phone(value: &str) -> Result<(), ValidationError> {
    if value.len() == 11 && value.starts_with("09") && value.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(with_message(
            "phone",
            "Phone must be a mobile number like 09123456789",
        ))
    }
}

fn with_message(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}
