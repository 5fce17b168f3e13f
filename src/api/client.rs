use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, info};
use urlencoding::encode;

use super::{TokenSource, DIRECTORY_API_BASE, GMAIL_API_BASE, SCOPES_DIRECTORY, SCOPES_GMAIL_SETTINGS};
use crate::config::GoogleConfig;
use crate::error::WorkspaceError;
use crate::types::*;
use crate::workspace::{NewAccount, Workspace};

/// Page size for list calls
const PAGE_SIZE: &str = "500";

/// Google Admin SDK and Gmail client
pub struct GoogleClient {
    auth: Arc<dyn TokenSource>,
    http: Client,
    admin_email: String,
    customer: String,
    schema: String,
    directory_base: String,
    gmail_base: String,
}

impl GoogleClient {
    /// Create a new client acting as `config.admin_email`
    pub fn new(config: &GoogleConfig, auth: Arc<dyn TokenSource>) -> Result<Self, WorkspaceError> {
        Ok(Self {
            auth,
            http: Client::builder()
                .redirect(reqwest::redirect::Policy::none())
                .timeout(Duration::from_secs(config.timeout))
                .build()?,
            admin_email: config.admin_email.clone(),
            customer: config.customer.clone(),
            schema: config.schema.clone(),
            directory_base: DIRECTORY_API_BASE.to_string(),
            gmail_base: GMAIL_API_BASE.to_string(),
        })
    }

    /// Point both APIs at another host (for testing with wiremock)
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.directory_base = url.to_string();
        self.gmail_base = url.to_string();
        self
    }

    fn user_url(&self, email: &str) -> String {
        format!("{}/admin/directory/v1/users/{}", self.directory_base, encode(email))
    }

    fn members_url(&self, group: &str) -> String {
        format!(
            "{}/admin/directory/v1/groups/{}/members",
            self.directory_base,
            encode(group)
        )
    }

    async fn admin_token(&self) -> Result<String, WorkspaceError> {
        self.auth.token(&self.admin_email, SCOPES_DIRECTORY).await
    }

    /// Turn a non-success response into an API error
    async fn check(res: Response) -> Result<Response, WorkspaceError> {
        if res.status().is_success() {
            Ok(res)
        } else {
            let status = res.status();
            let body = res.text().await?;
            Err(WorkspaceError::from_response(status, &body))
        }
    }

    async fn parse<T: DeserializeOwned>(res: Response, what: &str) -> Result<T, WorkspaceError> {
        let body = Self::check(res).await?.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| WorkspaceError::Decode(format!("Failed to parse {}: {}", what, e)))
    }

    /// PATCH a partial user resource
    async fn patch_user(&self, email: &str, patch: serde_json::Value) -> Result<(), WorkspaceError> {
        let token = self.admin_token().await?;
        let res = self
            .http
            .patch(self.user_url(email))
            .bearer_auth(token)
            .json(&patch)
            .send()
            .await?;
        Self::check(res).await?;
        Ok(())
    }

    async fn list_users_page(
        &self,
        query: Option<&str>,
        page_token: Option<&str>,
    ) -> Result<DirectoryUsers, WorkspaceError> {
        let token = self.admin_token().await?;
        let url = format!("{}/admin/directory/v1/users", self.directory_base);

        let mut req = self
            .http
            .get(&url)
            .bearer_auth(token)
            .query(&[
                ("customer", self.customer.as_str()),
                ("projection", "full"),
                ("maxResults", PAGE_SIZE),
            ]);
        if let Some(q) = query {
            req = req.query(&[("query", q)]);
        }
        if let Some(p) = page_token {
            req = req.query(&[("pageToken", p)]);
        }

        let res = req.send().await?;
        Self::parse(res, "users").await
    }
}

#[async_trait]
impl Workspace for GoogleClient {
    async fn create_user(&self, account: &NewAccount) -> Result<(), WorkspaceError> {
        let token = self.admin_token().await?;
        let url = format!("{}/admin/directory/v1/users", self.directory_base);

        let body = json!({
            "primaryEmail": account.email,
            "name": {
                "givenName": account.firstname,
                "familyName": account.lastname,
            },
            "password": account.password,
            "changePasswordAtNextLogin": true,
            "organizations": [{
                "department": account.team,
                "primary": true,
            }],
            "customSchemas": {
                self.schema.as_str(): {
                    "id": account.discord_id.to_string(),
                    "pseudo": account.pseudo,
                }
            },
        });

        let res = self.http.post(&url).bearer_auth(token).json(&body).send().await?;
        Self::check(res).await?;

        info!(email = %account.email, team = %account.team, "created workspace account");
        Ok(())
    }

    async fn find_user(&self, discord_id: u64) -> Result<Option<DirectoryUser>, WorkspaceError> {
        let query = format!("{}.id={}", self.schema, discord_id);
        let page = self.list_users_page(Some(&query), None).await?;
        debug!(discord_id, matches = page.users.len(), "searched workspace account");
        Ok(page.users.into_iter().next())
    }

    async fn list_users(&self) -> Result<Vec<DirectoryUser>, WorkspaceError> {
        let mut users = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page = self.list_users_page(None, page_token.as_deref()).await?;
            users.extend(page.users);
            match page.next_page_token {
                Some(next) if !next.is_empty() => page_token = Some(next),
                _ => break,
            }
        }

        Ok(users)
    }

    async fn user_groups(&self, email: &str) -> Result<Vec<String>, WorkspaceError> {
        let token = self.admin_token().await?;
        let url = format!("{}/admin/directory/v1/groups", self.directory_base);
        let mut groups = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut req = self
                .http
                .get(&url)
                .bearer_auth(&token)
                .query(&[("userKey", email), ("maxResults", "200")]);
            if let Some(p) = page_token.as_deref() {
                req = req.query(&[("pageToken", p)]);
            }

            let page: Groups = Self::parse(req.send().await?, "groups").await?;
            groups.extend(page.groups.into_iter().map(|g| g.email));
            match page.next_page_token {
                Some(next) if !next.is_empty() => page_token = Some(next),
                _ => break,
            }
        }

        Ok(groups)
    }

    async fn suspend_user(&self, email: &str) -> Result<(), WorkspaceError> {
        self.patch_user(email, json!({ "suspended": true })).await?;
        info!(email, "suspended workspace account");
        Ok(())
    }

    async fn add_to_group(&self, email: &str, group: &str) -> Result<(), WorkspaceError> {
        let token = self.admin_token().await?;
        let res = self
            .http
            .post(self.members_url(group))
            .bearer_auth(token)
            .json(&GroupMember {
                email,
                role: "MEMBER",
            })
            .send()
            .await?;
        Self::check(res).await?;

        info!(email, group, "added user to group");
        Ok(())
    }

    async fn remove_from_group(&self, email: &str, group: &str) -> Result<(), WorkspaceError> {
        let token = self.admin_token().await?;
        let url = format!("{}/{}", self.members_url(group), encode(email));
        let res = self.http.delete(&url).bearer_auth(token).send().await?;

        if res.status() == StatusCode::NOT_FOUND {
            debug!(email, group, "user was not a group member");
            return Ok(());
        }
        Self::check(res).await?;

        info!(email, group, "removed user from group");
        Ok(())
    }

    async fn update_organization(
        &self,
        email: &str,
        title: Option<&str>,
        department: &str,
    ) -> Result<(), WorkspaceError> {
        let org = Organization {
            title: title.map(str::to_string),
            department: Some(department.to_string()),
            primary: Some(true),
        };
        self.patch_user(email, json!({ "organizations": [org] })).await?;
        info!(email, department, "updated department");
        Ok(())
    }

    async fn update_pseudo(&self, email: &str, pseudo: &str) -> Result<(), WorkspaceError> {
        let patch = json!({
            "customSchemas": { self.schema.as_str(): { "pseudo": pseudo } }
        });
        self.patch_user(email, patch).await?;
        info!(email, pseudo, "updated pseudo");
        Ok(())
    }

    async fn update_recovery_email(
        &self,
        email: &str,
        recovery: &str,
    ) -> Result<(), WorkspaceError> {
        self.patch_user(email, json!({ "recoveryEmail": recovery }))
            .await?;
        info!(email, "updated recovery email");
        Ok(())
    }

    async fn update_password(
        &self,
        email: &str,
        password: &str,
        change_at_next_login: bool,
    ) -> Result<(), WorkspaceError> {
        let patch = json!({
            "password": password,
            "changePasswordAtNextLogin": change_at_next_login,
        });
        self.patch_user(email, patch).await?;
        info!(email, change_at_next_login, "updated password");
        Ok(())
    }

    async fn update_signature(&self, email: &str, signature: &str) -> Result<(), WorkspaceError> {
        let token = self.auth.token(email, SCOPES_GMAIL_SETTINGS).await?;
        let url = format!(
            "{}/gmail/v1/users/{}/settings/sendAs/{}",
            self.gmail_base,
            encode(email),
            encode(email)
        );

        let res = self
            .http
            .patch(&url)
            .bearer_auth(token)
            .json(&json!({ "signature": signature }))
            .send()
            .await?;
        Self::check(res).await?;

        info!(email, "updated signature");
        Ok(())
    }
}
