use crate::RoleChecker;
use crate::cookie::{CSRF_COOKIE_NAME, CookieSource, JarCookies, NoCookies};
use crate::error::RoleCheckError;
use crate::models::RoleCheckRequest;
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::cookie::Jar;
use reqwest::header::{CONTENT_TYPE, COOKIE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Base URL used when none is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/";

/// Path of the role-check endpoint
pub const DEFAULT_ENDPOINT: &str = "/accounts/api/role_check/";

const CSRF_HEADER: HeaderName = HeaderName::from_static("x-csrftoken");

/// Whether the source's cookies travel with the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CredentialsMode {
    /// Send the cookies visible to the endpoint URL
    #[default]
    SameOrigin,
    /// Send no cookies; the CSRF header is still attached
    Omit,
}

/// A builder for configuring a role-check client.
/// The builder is generic over the cookie source the client reads the CSRF token from.
#[derive(Debug, Clone)]
pub struct RoleCheckClientBuilder<C = NoCookies> {
    base_url: String,
    endpoint: String,
    cookies: C,
    token_cookie: String,
    credentials: CredentialsMode,
    timeout: Option<Duration>,
}

impl RoleCheckClientBuilder<NoCookies> {
    /// Creates a new builder targeting the default base URL and endpoint, without cookies.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            cookies: NoCookies,
            token_cookie: CSRF_COOKIE_NAME.to_string(),
            credentials: CredentialsMode::default(),
            timeout: None,
        }
    }
}

impl Default for RoleCheckClientBuilder<NoCookies> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: CookieSource> RoleCheckClientBuilder<C> {
    /// Overrides the base URL the endpoint is resolved against.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the endpoint path.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Overrides the name of the cookie holding the CSRF token.
    pub fn with_token_cookie(mut self, name: impl Into<String>) -> Self {
        self.token_cookie = name.into();
        self
    }

    pub fn with_credentials(mut self, credentials: CredentialsMode) -> Self {
        self.credentials = credentials;
        self
    }

    /// Sets a total request timeout. Without it the transport's default applies.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Replaces the cookie source.
    pub fn with_cookies<S: CookieSource>(self, cookies: S) -> RoleCheckClientBuilder<S> {
        RoleCheckClientBuilder {
            base_url: self.base_url,
            endpoint: self.endpoint,
            cookies,
            token_cookie: self.token_cookie,
            credentials: self.credentials,
            timeout: self.timeout,
        }
    }

    /// Reads cookies from a shared jar.
    pub fn with_cookie_jar(self, jar: Arc<Jar>) -> RoleCheckClientBuilder<JarCookies> {
        self.with_cookies(JarCookies::new(jar))
    }

    /// Resolves the endpoint URL and builds the HTTP client.
    pub fn build(self) -> Result<RoleCheckClient<C>, RoleCheckError> {
        let base_url = Url::parse(&self.base_url)?;
        let endpoint = base_url.join(&self.endpoint)?;

        let mut builder = Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(RoleCheckClient {
            client,
            endpoint,
            cookies: self.cookies,
            token_cookie: self.token_cookie,
            credentials: self.credentials,
        })
    }
}

/// Client for the role-check endpoint.
///
/// Holds no mutable state, so a single client can serve concurrent checks.
#[derive(Debug, Clone)]
pub struct RoleCheckClient<C = NoCookies> {
    client: Client,
    endpoint: Url,
    cookies: C,
    token_cookie: String,
    credentials: CredentialsMode,
}

impl RoleCheckClient<NoCookies> {
    pub fn builder() -> RoleCheckClientBuilder<NoCookies> {
        RoleCheckClientBuilder::new()
    }
}

impl<C: CookieSource> RoleCheckClient<C> {
    /// The resolved endpoint URL
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Prepares the role-check POST: JSON body, CSRF header and, unless omitted, cookies.
    pub fn request(&self, username: &str, role: &str) -> Result<RequestBuilder, RoleCheckError> {
        let token = self.cookies.read(&self.endpoint, &self.token_cookie);
        if token.is_empty() {
            warn!(
                "No `{}` cookie for {}, sending an empty CSRF token",
                self.token_cookie, self.endpoint
            );
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut token = HeaderValue::from_str(&token)?;
        token.set_sensitive(true);
        headers.insert(CSRF_HEADER, token);

        if self.credentials == CredentialsMode::SameOrigin {
            if let Some(cookies) = self.cookies.cookie_header(&self.endpoint) {
                let mut cookies = HeaderValue::from_str(&cookies)?;
                cookies.set_sensitive(true);
                headers.insert(COOKIE, cookies);
            }
        }

        let body = RoleCheckRequest::new(username, role);
        Ok(self
            .client
            .post(self.endpoint.clone())
            .headers(headers)
            .json(&body))
    }
}

#[async_trait]
impl<C: CookieSource> RoleChecker for RoleCheckClient<C> {
    async fn role_check(&self, username: &str, role: &str) -> Result<Value, RoleCheckError> {
        self.role_check_as(username, role).await
    }

    async fn role_check_as<R>(&self, username: &str, role: &str) -> Result<R, RoleCheckError>
    where
        R: DeserializeOwned + Send + 'static,
    {
        let response = self.role_check_raw(username, role).await?;

        if !response.status().is_success() {
            let status = response.status();
            debug!("Role check for {} failed with status {}", username, status);
            return Err(RoleCheckError::Network {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn role_check_raw(
        &self,
        username: &str,
        role: &str,
    ) -> Result<Response, RoleCheckError> {
        let request = self.request(username, role)?;
        debug!("Sending role check for {} to {}", username, self.endpoint);
        Ok(request.send().await?)
    }
}
