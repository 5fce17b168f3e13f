use std::path::Path;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::WorkspaceError;
use crate::types::{AccessToken, TokenResponse, TokenStore};

/// Tokens are refreshed this many seconds before Google expires them
const EXPIRY_MARGIN_S: i64 = 60;

/// Assertions are valid for one hour, the maximum Google accepts
const ASSERTION_LIFETIME_S: i64 = 3600;

/// Source of OAuth bearer tokens for Google APIs
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Token acting as `subject` with the given scopes
    async fn token(&self, subject: &str, scopes: &[&str]) -> Result<String, WorkspaceError>;
}

/// Service account JSON key as downloaded from the Cloud console
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

impl ServiceAccountKey {
    pub fn from_file(path: &Path) -> Result<Self, WorkspaceError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            WorkspaceError::Auth(format!("cannot read service account key {:?}: {}", path, e))
        })?;
        serde_json::from_str(&content)
            .map_err(|e| WorkspaceError::Auth(format!("invalid service account key: {}", e)))
    }
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    sub: &'a str,
    scope: String,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

/// Service account with domain-wide delegation
pub struct ServiceAccount {
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    tokens: Arc<RwLock<TokenStore>>,
    http: Client,
}

impl ServiceAccount {
    pub fn new(key: ServiceAccountKey) -> Result<Self, WorkspaceError> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| WorkspaceError::Auth(format!("invalid private key: {}", e)))?;

        Ok(Self {
            key,
            encoding_key,
            tokens: Arc::new(RwLock::new(TokenStore::default())),
            http: Client::builder()
                .redirect(reqwest::redirect::Policy::none())
                .build()?,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, WorkspaceError> {
        Self::new(ServiceAccountKey::from_file(path)?)
    }

    pub fn client_email(&self) -> &str {
        &self.key.client_email
    }

    /// Build the signed JWT assertion for the token exchange
    fn assertion(&self, subject: &str, scopes: &[&str], now: i64) -> Result<String, WorkspaceError> {
        let claims = Claims {
            iss: &self.key.client_email,
            sub: subject,
            scope: scopes.join(" "),
            aud: &self.key.token_uri,
            iat: now,
            exp: now + ASSERTION_LIFETIME_S,
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key.private_key_id.clone();

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| WorkspaceError::Auth(format!("cannot sign assertion: {}", e)))
    }

    async fn exchange(&self, assertion: &str) -> Result<TokenResponse, WorkspaceError> {
        let res = self
            .http
            .post(&self.key.token_uri)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", assertion),
            ])
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await?;
            return Err(WorkspaceError::Auth(format!(
                "token exchange failed: {} - {}",
                status, body
            )));
        }

        res.json()
            .await
            .map_err(|e| WorkspaceError::Decode(format!("token response: {}", e)))
    }
}

#[async_trait]
impl TokenSource for ServiceAccount {
    async fn token(&self, subject: &str, scopes: &[&str]) -> Result<String, WorkspaceError> {
        let key = TokenStore::key(subject, scopes);
        let now = Utc::now().timestamp();

        let existing = {
            let tokens = self.tokens.read().unwrap_or_else(|e| e.into_inner());
            tokens.get_valid(&key, now).cloned()
        };
        if let Some(token) = existing {
            return Ok(token.value);
        }

        debug!(subject, "requesting Google access token");
        let assertion = self.assertion(subject, scopes, now)?;
        let response = self.exchange(&assertion).await?;

        let token = AccessToken {
            value: response.access_token,
            expires: now + response.expires_in - EXPIRY_MARGIN_S,
        };
        {
            let mut tokens = self.tokens.write().unwrap_or_else(|e| e.into_inner());
            tokens.insert(key, token.clone(), now);
        }

        Ok(token.value)
    }
}

/// Fixed bearer token, e.g. one minted by `gcloud auth print-access-token`
pub struct StaticToken(pub String);

#[async_trait]
impl TokenSource for StaticToken {
    async fn token(&self, _subject: &str, _scopes: &[&str]) -> Result<String, WorkspaceError> {
        Ok(self.0.clone())
    }
}
