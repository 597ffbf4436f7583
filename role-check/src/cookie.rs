use reqwest::cookie::{CookieStore, Jar};
use std::sync::Arc;
use url::Url;

/// Name of the cookie holding the CSRF token
pub const CSRF_COOKIE_NAME: &str = "csrftoken";

/// Returns the value of the cookie `name` in a `a=1; b=2` cookie string.
///
/// Whitespace around the name and before the value is ignored and the name must
/// match exactly. Entries with an empty value are skipped. Returns an empty string
/// when no entry matches.
pub fn get_cookie(cookies: &str, name: &str) -> String {
    for entry in cookies.split(';') {
        let Some(rest) = entry.trim_start().strip_prefix(name) else {
            continue;
        };
        let Some(value) = rest.trim_start().strip_prefix('=') else {
            continue;
        };
        let value = value.trim_start();
        if !value.is_empty() {
            return value.to_string();
        }
    }
    String::new()
}

/// Read-only view of the cookies visible to a URL
pub trait CookieSource: Send + Sync {
    /// Returns the cookie string for `url`, if any
    fn cookie_header(&self, url: &Url) -> Option<String>;

    /// Returns the value of the cookie `name` for `url`, or an empty string
    fn read(&self, url: &Url, name: &str) -> String {
        self.cookie_header(url)
            .map(|cookies| get_cookie(&cookies, name))
            .unwrap_or_default()
    }
}

/// A source without any cookies
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCookies;

impl CookieSource for NoCookies {
    fn cookie_header(&self, _url: &Url) -> Option<String> {
        None
    }
}

/// A fixed cookie string, applied to every URL
#[derive(Debug, Clone, Default)]
pub struct StaticCookies(String);

impl StaticCookies {
    pub fn new(cookies: impl Into<String>) -> Self {
        Self(cookies.into())
    }
}

impl CookieSource for StaticCookies {
    fn cookie_header(&self, _url: &Url) -> Option<String> {
        (!self.0.is_empty()).then(|| self.0.clone())
    }
}

impl CookieSource for String {
    fn cookie_header(&self, _url: &Url) -> Option<String> {
        (!self.is_empty()).then(|| self.clone())
    }
}

impl CookieSource for &'static str {
    fn cookie_header(&self, _url: &Url) -> Option<String> {
        (!self.is_empty()).then(|| self.to_string())
    }
}

/// Cookies held by a shared jar, scoped to the request URL
#[derive(Debug, Clone, Default)]
pub struct JarCookies {
    jar: Arc<Jar>,
}

impl JarCookies {
    pub fn new(jar: Arc<Jar>) -> Self {
        Self { jar }
    }

    pub fn jar(&self) -> &Arc<Jar> {
        &self.jar
    }
}

impl CookieSource for JarCookies {
    fn cookie_header(&self, url: &Url) -> Option<String> {
        let value = self.jar.cookies(url)?;
        value.to_str().ok().map(str::to_string)
    }
}
