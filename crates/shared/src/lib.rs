//! Types shared by the portal crates: the user/session model, identity
//! endpoint DTOs, the error taxonomy, token inspection, configuration and
//! logging setup.

pub mod config;
pub mod domain;
pub mod errors;
pub mod model;
pub mod utils;
