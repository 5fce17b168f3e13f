use anyhow::{bail, Result};

use crate::api::ServiceAccountKey;
use crate::config::Config;
use crate::templates::Templates;
use crate::user::User;

use super::output::{print_error, print_info, print_success};

pub fn execute(config: &Config) -> Result<()> {
    let mut failures = 0;

    match config.validate() {
        Ok(()) => print_success("Configuration is valid"),
        Err(e) => {
            print_error(&e.to_string());
            failures += 1;
        }
    }

    match ServiceAccountKey::from_file(&config.google.service_account_key) {
        Ok(key) => print_success(&format!("Service account: {}", key.client_email)),
        Err(e) => {
            print_error(&e.to_string());
            failures += 1;
        }
    }

    print_info(&format!("Rendering templates from {:?}", config.templates_dir));
    failures += check_templates(config, &Templates::from_dir(&config.templates_dir));

    if failures > 0 {
        bail!("{} check(s) failed", failures);
    }
    Ok(())
}

/// Render every template once per team, returning the number of failures
fn check_templates(config: &Config, templates: &Templates) -> usize {
    let mut failures = 0;
    let sample_email = User::email_from_name("Jane", "Doe", &config.google.domain);

    let mut report = |what: String, result: Result<String, minijinja::Error>| match result {
        Ok(_) => print_success(&what),
        Err(e) => {
            print_error(&format!("{}: {:#}", what, e));
            failures += 1;
        }
    };

    report(
        "discord/base.j2".to_string(),
        templates.welcome(&sample_email, "Sample*Password1"),
    );
    report(
        "discord/reset_password.j2".to_string(),
        templates.reset_password(&sample_email, "Sample*Password1"),
    );

    for (name, team) in &config.teams {
        let user = User {
            email: sample_email.clone(),
            firstname: "Jane".to_string(),
            lastname: "Doe".to_string(),
            pseudo: Some("jdoe".to_string()),
            role: None,
            team: Some(name.clone()),
            discord_id: None,
        };
        report(
            format!("signature for team {}", name),
            templates.signature(&user, team),
        );
        report(format!("message for team {}", name), templates.team_message(team));
    }

    failures
}
