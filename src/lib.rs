//! Workspace Bot - Discord bot managing Google Workspace accounts
//!
//! Members of a Discord server get their Google account created, suspended
//! and kept in sync (groups, signature, recovery email) through admin-only
//! text commands. The command handlers in [`commands`] only talk to the
//! [`workspace::Workspace`] and [`chat::Chat`] traits; [`api`] and [`bot`]
//! provide the Google and Discord implementations.

pub mod api;
pub mod bot;
pub mod chat;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod password;
pub mod templates;
pub mod types;
pub mod user;
pub mod util;
pub mod workspace;

pub use api::GoogleClient;
pub use config::Config;
