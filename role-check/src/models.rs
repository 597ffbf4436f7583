use serde::{Deserialize, Serialize};

/// Body of a role-check request
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RoleCheckRequest {
    /// Username (or email) of the user to check
    pub username: String,
    /// Role label to compare against the user's role
    pub role: String,
}

impl RoleCheckRequest {
    pub fn new(username: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            role: role.into(),
        }
    }
}

/// Reply of the accounts role-check endpoint
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RoleCheckOutcome {
    /// Whether a user with that username or email exists
    pub exists: bool,
    /// Whether the user's role matches the requested role
    pub matches: bool,
    /// The user's stored role, if the user exists
    #[serde(default)]
    pub user_role: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serializes_username_then_role() {
        let request = RoleCheckRequest::new("alice", "volunteer");
        let body = serde_json::to_string(&request).expect("Failed to serialize request");
        assert_eq!(body, r#"{"username":"alice","role":"volunteer"}"#);
    }

    #[test]
    fn test_outcome_for_unknown_user() {
        let outcome: RoleCheckOutcome = serde_json::from_value(json!({
            "exists": false,
            "matches": false,
            "user_role": null
        }))
        .expect("Failed to parse outcome");
        assert!(!outcome.exists);
        assert!(!outcome.matches);
        assert!(outcome.user_role.is_none());
    }
}
