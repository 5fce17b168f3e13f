mod group;
mod user;

pub use group::*;
pub use user::*;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Access token with expiration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub value: String,
    pub expires: i64,
}

/// OAuth token endpoint response
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_expires_in")]
    pub expires_in: i64,
    #[serde(default)]
    pub token_type: Option<String>,
}

fn default_expires_in() -> i64 {
    3600
}

/// Token storage, one entry per impersonated subject and scope set
#[derive(Debug, Clone, Default)]
pub struct TokenStore {
    tokens: HashMap<String, AccessToken>,
}

impl TokenStore {
    pub fn key(subject: &str, scopes: &[&str]) -> String {
        format!("{}|{}", subject, scopes.join(" "))
    }

    /// Returns the token for `key` if it is still valid at `now` (epoch seconds).
    pub fn get_valid(&self, key: &str, now: i64) -> Option<&AccessToken> {
        self.tokens.get(key).filter(|t| t.expires > now)
    }

    /// Store `token`, dropping every entry already expired at `now`
    pub fn insert(&mut self, key: String, token: AccessToken, now: i64) {
        self.tokens.retain(|_, t| t.expires > now);
        self.tokens.insert(key, token);
    }
}

/// Error body returned by every Google REST API
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleErrorEnvelope {
    pub error: GoogleErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleErrorBody {
    pub code: Option<u16>,
    pub message: Option<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub errors: Vec<GoogleErrorDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleErrorDetail {
    pub message: Option<String>,
    pub domain: Option<String>,
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expired_tokens_are_not_returned() {
        let mut store = TokenStore::default();
        let key = TokenStore::key("admin@example.org", &["a", "b"]);
        assert_eq!(key, "admin@example.org|a b");

        store.insert(
            key.clone(),
            AccessToken {
                value: "tok".to_string(),
                expires: 100,
            },
            0,
        );
        assert_eq!(store.get_valid(&key, 99).map(|t| t.value.as_str()), Some("tok"));
        assert!(store.get_valid(&key, 100).is_none());
    }

    #[test]
    fn insert_drops_expired_mailboxes() {
        let mut store = TokenStore::default();
        for (subject, expires) in [("a@example.org", 100), ("b@example.org", 300)] {
            store.insert(
                TokenStore::key(subject, &["gmail"]),
                AccessToken {
                    value: subject.to_string(),
                    expires,
                },
                0,
            );
        }
        assert_eq!(store.tokens.len(), 2);

        let fresh = TokenStore::key("c@example.org", &["gmail"]);
        store.insert(
            fresh.clone(),
            AccessToken {
                value: "c".to_string(),
                expires: 500,
            },
            200,
        );
        assert_eq!(store.tokens.len(), 2);
        assert!(!store.tokens.contains_key(&TokenStore::key("a@example.org", &["gmail"])));
        assert!(store.get_valid(&fresh, 200).is_some());
    }
}
