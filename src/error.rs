use thiserror::Error;

use crate::types::GoogleErrorEnvelope;

/// Caller-facing failures: reported in the channel, the command then stops cleanly.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Role {0} is not managed by bot")]
    UnknownRole(String),

    #[error("Role {0} is not a team role")]
    NotTeamRole(String),

    #[error("Role {0} does not exist, check bot config")]
    UnknownTeam(String),

    #[error("Role {0} is invalid, check bot config")]
    InvalidTeam(String),

    #[error("Discord role {0} does not exist on server, check bot config")]
    MissingChatRole(String),

    #[error("Discord role {0} does not exist, check bot config")]
    MissingTeamChatRole(String),

    #[error("no workspace account is linked to this member")]
    UserNotFound,

    #[error("workspace account {email} has no {field}")]
    IncompleteRecord { email: String, field: &'static str },

    #[error("user {email} is member of {group}, which is not managed by bot")]
    Unmanaged { email: String, group: String },

    #[error("team {team} of user {email} is not configured")]
    TeamNotConfigured { email: String, team: String },

    #[error("{member} => {source}")]
    Member {
        member: String,
        #[source]
        source: Box<DomainError>,
    },
}

impl DomainError {
    /// Attach the guild member the failure was raised for.
    pub fn for_member(self, member: impl Into<String>) -> Self {
        DomainError::Member {
            member: member.into(),
            source: Box::new(self),
        }
    }
}

/// Failures talking to Google.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("Google API error {code} ({reason}): {message}")]
    Api {
        code: u16,
        reason: String,
        message: String,
    },

    #[error("Google API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Google authentication failed: {0}")]
    Auth(String),

    #[error("unexpected Google API response: {0}")]
    Decode(String),
}

impl WorkspaceError {
    /// Build an API error from a non-success status and the raw response body.
    ///
    /// Google wraps failures in `{"error": {"code", "message", "errors": [{"reason"}]}}`;
    /// bodies that do not follow that shape are kept verbatim as the message.
    pub fn from_response(status: reqwest::StatusCode, body: &str) -> Self {
        match serde_json::from_str::<GoogleErrorEnvelope>(body) {
            Ok(envelope) => {
                let reason = envelope
                    .error
                    .errors
                    .first()
                    .and_then(|e| e.reason.clone())
                    .or(envelope.error.status)
                    .unwrap_or_else(|| "unknown".to_string());
                WorkspaceError::Api {
                    code: envelope.error.code.unwrap_or(status.as_u16()),
                    reason,
                    message: envelope.error.message.unwrap_or_default(),
                }
            }
            Err(_) => WorkspaceError::Api {
                code: status.as_u16(),
                reason: status
                    .canonical_reason()
                    .unwrap_or("unknown")
                    .to_string(),
                message: body.trim().to_string(),
            },
        }
    }
}

/// Failures talking to Discord.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error(transparent)]
    Discord(#[from] poise::serenity_prelude::Error),

    #[error("{0}")]
    Other(String),
}

/// Everything a command handler can fail with.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    #[error(transparent)]
    Chat(#[from] ChatError),

    #[error("template rendering failed: {0}")]
    Template(#[from] minijinja::Error),
}
