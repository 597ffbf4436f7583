//! # role-check
//!
//! A client for the accounts role-check endpoint.
//!
//! ## Components
//!
//! - **Cookies:** Reads the CSRF token from an injected, read-only cookie source.
//! - **Client:** Sends the role-check POST with the token attached and decodes the reply.
//! - **Errors:** Non-success statuses, transport failures and decoding failures.

pub mod client;
pub mod cookie;
pub mod error;
pub mod models;

pub use crate::client::{
    CredentialsMode, DEFAULT_BASE_URL, DEFAULT_ENDPOINT, RoleCheckClient, RoleCheckClientBuilder,
};
pub use crate::cookie::{
    CSRF_COOKIE_NAME, CookieSource, JarCookies, NoCookies, StaticCookies, get_cookie,
};
pub use crate::error::RoleCheckError;
pub use crate::models::{RoleCheckOutcome, RoleCheckRequest};

use async_trait::async_trait;
use reqwest::Response;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Trait defining the role-check operations a caller can depend on
#[async_trait]
pub trait RoleChecker {
    /// Checks whether `username` holds `role` and returns the server's JSON reply
    async fn role_check(&self, username: &str, role: &str) -> Result<Value, RoleCheckError>;

    /// Same as `role_check`, decoding the reply into `R`
    async fn role_check_as<R>(&self, username: &str, role: &str) -> Result<R, RoleCheckError>
    where
        R: DeserializeOwned + Send + 'static;

    /// Sends the role-check request and returns the raw response without a status check
    async fn role_check_raw(&self, username: &str, role: &str)
    -> Result<Response, RoleCheckError>;
}
