mod config;

use crate::config::SmokeConfig;
use log::{error, info};
use reqwest::cookie::Jar;
use role_check::{CSRF_COOKIE_NAME, JarCookies, RoleCheckClient, RoleCheckError, RoleChecker};
use serde_json::Value;
use std::sync::Arc;
use url::Url;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize logging
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = match SmokeConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let client = match build_client(&config) {
        Ok(client) => client,
        Err(e) => {
            error!("Failed to create role check client: {}", e);
            std::process::exit(1);
        }
    };

    match run(&client, &config.username, &config.role).await {
        Ok(report) => print!("{report}"),
        Err(e) => {
            error!("Request failed: {}", e);
            std::process::exit(2);
        }
    }
}

/// Builds a client whose cookie jar holds the configured CSRF token, if any
fn build_client(config: &SmokeConfig) -> Result<RoleCheckClient<JarCookies>, RoleCheckError> {
    let jar = Arc::new(Jar::default());
    if let Some(token) = &config.csrftoken {
        let base_url = Url::parse(&config.base_url)?;
        jar.add_cookie_str(&format!("{CSRF_COOKIE_NAME}={token}; Path=/"), &base_url);
    }

    RoleCheckClient::builder()
        .with_base_url(&config.base_url)
        .with_endpoint(&config.endpoint)
        .with_timeout(config.timeout())
        .with_cookie_jar(jar)
        .build()
}

/// Sends one role check and renders the reply, whatever its status
async fn run<R>(checker: &R, username: &str, role: &str) -> Result<String, RoleCheckError>
where
    R: RoleChecker + Sync,
{
    let response = checker.role_check_raw(username, role).await?;
    let status = response.status();
    info!("Role check for {} answered with {}", username, status);

    let body = response.bytes().await?;
    Ok(render_report(status.as_u16(), &body))
}

fn render_report(status: u16, body: &[u8]) -> String {
    let body = match serde_json::from_slice::<Value>(body) {
        Ok(json) => format!("JSON: {json}"),
        Err(_) => format!("Body: {}", String::from_utf8_lossy(body)),
    };
    format!("Status: {status}\n{body}\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer, csrftoken: Option<&str>) -> SmokeConfig {
        SmokeConfig {
            base_url: server.uri(),
            endpoint: role_check::DEFAULT_ENDPOINT.to_string(),
            username: "jdoe".to_string(),
            role: "volunteer".to_string(),
            csrftoken: csrftoken.map(str::to_string),
            timeout: 5,
        }
    }

    #[test]
    fn test_render_json_report() {
        let report = render_report(200, br#"{"exists":true}"#);
        assert_eq!(report, "Status: 200\nJSON: {\"exists\":true}\n");
    }

    #[test]
    fn test_render_text_report() {
        let report = render_report(502, b"Bad Gateway");
        assert_eq!(report, "Status: 502\nBody: Bad Gateway\n");
    }

    #[tokio::test]
    async fn test_run_sends_configured_token() {
        let server = MockServer::start().await;
        Mock::given(matchers::method("POST"))
            .and(matchers::path("/accounts/api/role_check/"))
            .and(matchers::header("x-csrftoken", "ABC123"))
            .and(matchers::header("cookie", "csrftoken=ABC123"))
            .and(matchers::body_json(json!({ "username": "jdoe", "role": "volunteer" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "exists": true,
                "matches": true,
                "user_role": "volunteer"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let config = config_for(&server, Some("ABC123"));
        let client = build_client(&config).expect("Failed to build client");
        let report = run(&client, &config.username, &config.role)
            .await
            .expect("Smoke run failed");

        assert!(report.starts_with("Status: 200\nJSON: "));
        assert!(report.contains("\"user_role\":\"volunteer\""));
        server.verify().await;
    }

    #[tokio::test]
    async fn test_run_reports_forbidden_status() {
        let server = MockServer::start().await;
        Mock::given(matchers::method("POST"))
            .and(matchers::path("/accounts/api/role_check/"))
            .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
            .expect(1)
            .mount(&server)
            .await;

        let config = config_for(&server, None);
        let client = build_client(&config).expect("Failed to build client");
        let report = run(&client, &config.username, &config.role)
            .await
            .expect("Smoke run failed");

        assert_eq!(report, "Status: 403\nBody: Forbidden\n");
        server.verify().await;
    }
}
