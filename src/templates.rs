//! Signature and Discord message templates.

use std::path::Path;

use minijinja::{context, path_loader, Environment};

use crate::config::TeamConfig;
use crate::user::User;
use crate::util::escape_markdown;

pub const SIGNATURE_TEMPLATE: &str = "google/gmail_signature.j2";
pub const WELCOME_TEMPLATE: &str = "discord/base.j2";
pub const RESET_PASSWORD_TEMPLATE: &str = "discord/reset_password.j2";

/// Templates loaded lazily from a directory
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let mut env = Environment::new();
        env.set_loader(path_loader(dir.as_ref()));
        Self { env }
    }

    /// Gmail signature for `user` in `team`
    pub fn signature(&self, user: &User, team: &TeamConfig) -> Result<String, minijinja::Error> {
        self.env.get_template(SIGNATURE_TEMPLATE)?.render(context! {
            email => user.email,
            firstname => user.firstname,
            lastname => user.lastname,
            role => user.role,
            team => user.team,
            team_role => team.team_role,
        })
    }

    /// Credentials sent to a newly provisioned member
    pub fn welcome(&self, email: &str, password: &str) -> Result<String, minijinja::Error> {
        self.credentials(WELCOME_TEMPLATE, email, password)
    }

    /// Credentials sent after a password reset
    pub fn reset_password(&self, email: &str, password: &str) -> Result<String, minijinja::Error> {
        self.credentials(RESET_PASSWORD_TEMPLATE, email, password)
    }

    fn credentials(&self, name: &str, email: &str, password: &str) -> Result<String, minijinja::Error> {
        self.env.get_template(name)?.render(context! {
            email => email,
            password => escape_markdown(password),
        })
    }

    /// Team specific message, empty when the team has none
    pub fn team_message(&self, team: &TeamConfig) -> Result<String, minijinja::Error> {
        match team.message_template.as_deref() {
            Some(name) if !name.is_empty() => {
                let rendered = self
                    .env
                    .get_template(&format!("discord/{}", name))?
                    .render(context!())?;
                Ok(rendered.trim().to_string())
            }
            _ => Ok(String::new()),
        }
    }
}
