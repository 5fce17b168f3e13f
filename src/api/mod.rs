pub mod auth;
pub mod client;

pub use auth::*;
pub use client::*;

pub const DIRECTORY_API_BASE: &str = "https://admin.googleapis.com";
pub const GMAIL_API_BASE: &str = "https://gmail.googleapis.com";

// API scopes
pub const SCOPE_DIRECTORY_USER: &str = "https://www.googleapis.com/auth/admin.directory.user";
pub const SCOPE_DIRECTORY_GROUP: &str = "https://www.googleapis.com/auth/admin.directory.group";
pub const SCOPE_GMAIL_SETTINGS: &str = "https://www.googleapis.com/auth/gmail.settings.basic";

pub const SCOPES_DIRECTORY: &[&str] = &[SCOPE_DIRECTORY_USER, SCOPE_DIRECTORY_GROUP];
pub const SCOPES_GMAIL_SETTINGS: &[&str] = &[SCOPE_GMAIL_SETTINGS];
