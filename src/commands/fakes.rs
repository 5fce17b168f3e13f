//! In-memory collaborators recording what commands do.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;

use super::Services;
use crate::chat::{Chat, Member, RoleId};
use crate::config::Config;
use crate::error::{ChatError, WorkspaceError};
use crate::templates::Templates;
use crate::types::DirectoryUser;
use crate::workspace::{NewAccount, Workspace};

pub const CONFIG: &str = r#"
    teams_to_skip = ["board"]

    [discord]
    roles.default = ["member"]
    roles.admin = ["admin"]

    [google]
    domain = "example.org"
    admin_email = "admin@example.org"
    signature_delay_secs = 0

    [teams.engineer]
    google_email = "engineering@example.org"
    team_role = "Engineering team"
    discord = "Engineering"
    message_template = "engineer.j2"

    [teams.design]
    google_email = "design@example.org"
    team_role = "Design team"
    discord = "Design"
    message_template = "empty.j2"

    [teams.board]
    google_email = "board@example.org"
    discord = "Board"
"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    CreateUser(NewAccount),
    Suspend(String),
    AddToGroup { email: String, group: String },
    RemoveFromGroup { email: String, group: String },
    UpdateOrganization { email: String, title: Option<String>, department: String },
    UpdatePseudo { email: String, pseudo: String },
    UpdateRecovery { email: String, recovery: String },
    UpdatePassword { email: String, password: String, change_at_next_login: bool },
    UpdateSignature { email: String, signature: String },
}

#[derive(Default)]
pub struct FakeWorkspace {
    users: Mutex<Vec<DirectoryUser>>,
    groups: Mutex<HashMap<String, Vec<String>>>,
    mutations: Mutex<Vec<Mutation>>,
    /// Operation name that answers with a Google error
    failing: Mutex<Option<&'static str>>,
    /// Accounts whose signature update answers with a Google error
    failing_signatures: Mutex<Vec<String>>,
}

impl FakeWorkspace {
    pub fn add_user(&self, user: DirectoryUser) {
        self.users.lock().unwrap().push(user);
    }

    pub fn set_groups(&self, email: &str, groups: &[&str]) {
        self.groups.lock().unwrap().insert(
            email.to_string(),
            groups.iter().map(|g| g.to_string()).collect(),
        );
    }

    pub fn fail(&self, operation: &'static str) {
        *self.failing.lock().unwrap() = Some(operation);
    }

    pub fn fail_signature_for(&self, email: &str) {
        self.failing_signatures.lock().unwrap().push(email.to_string());
    }

    pub fn mutations(&self) -> Vec<Mutation> {
        self.mutations.lock().unwrap().clone()
    }

    fn record(&self, operation: &'static str, mutation: Mutation) -> Result<(), WorkspaceError> {
        self.check(operation)?;
        self.mutations.lock().unwrap().push(mutation);
        Ok(())
    }

    fn check(&self, operation: &'static str) -> Result<(), WorkspaceError> {
        if *self.failing.lock().unwrap() == Some(operation) {
            return Err(WorkspaceError::Api {
                code: 503,
                reason: "backendError".to_string(),
                message: format!("{} failed", operation),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Workspace for FakeWorkspace {
    async fn create_user(&self, account: &NewAccount) -> Result<(), WorkspaceError> {
        self.record("create_user", Mutation::CreateUser(account.clone()))
    }

    async fn find_user(&self, discord_id: u64) -> Result<Option<DirectoryUser>, WorkspaceError> {
        self.check("find_user")?;
        let wanted = discord_id.to_string();
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.schema_field("discord", "id").as_deref() == Some(wanted.as_str()))
            .cloned())
    }

    async fn list_users(&self) -> Result<Vec<DirectoryUser>, WorkspaceError> {
        self.check("list_users")?;
        Ok(self.users.lock().unwrap().clone())
    }

    async fn user_groups(&self, email: &str) -> Result<Vec<String>, WorkspaceError> {
        self.check("user_groups")?;
        Ok(self
            .groups
            .lock()
            .unwrap()
            .get(email)
            .cloned()
            .unwrap_or_default())
    }

    async fn suspend_user(&self, email: &str) -> Result<(), WorkspaceError> {
        self.record("suspend_user", Mutation::Suspend(email.to_string()))
    }

    async fn add_to_group(&self, email: &str, group: &str) -> Result<(), WorkspaceError> {
        self.record(
            "add_to_group",
            Mutation::AddToGroup {
                email: email.to_string(),
                group: group.to_string(),
            },
        )
    }

    async fn remove_from_group(&self, email: &str, group: &str) -> Result<(), WorkspaceError> {
        self.record(
            "remove_from_group",
            Mutation::RemoveFromGroup {
                email: email.to_string(),
                group: group.to_string(),
            },
        )
    }

    async fn update_organization(
        &self,
        email: &str,
        title: Option<&str>,
        department: &str,
    ) -> Result<(), WorkspaceError> {
        self.record(
            "update_organization",
            Mutation::UpdateOrganization {
                email: email.to_string(),
                title: title.map(str::to_string),
                department: department.to_string(),
            },
        )
    }

    async fn update_pseudo(&self, email: &str, pseudo: &str) -> Result<(), WorkspaceError> {
        self.record(
            "update_pseudo",
            Mutation::UpdatePseudo {
                email: email.to_string(),
                pseudo: pseudo.to_string(),
            },
        )
    }

    async fn update_recovery_email(
        &self,
        email: &str,
        recovery: &str,
    ) -> Result<(), WorkspaceError> {
        self.record(
            "update_recovery_email",
            Mutation::UpdateRecovery {
                email: email.to_string(),
                recovery: recovery.to_string(),
            },
        )
    }

    async fn update_password(
        &self,
        email: &str,
        password: &str,
        change_at_next_login: bool,
    ) -> Result<(), WorkspaceError> {
        self.record(
            "update_password",
            Mutation::UpdatePassword {
                email: email.to_string(),
                password: password.to_string(),
                change_at_next_login,
            },
        )
    }

    async fn update_signature(&self, email: &str, signature: &str) -> Result<(), WorkspaceError> {
        if self.failing_signatures.lock().unwrap().iter().any(|e| e == email) {
            return Err(WorkspaceError::Api {
                code: 403,
                reason: "forbidden".to_string(),
                message: format!("cannot impersonate {}", email),
            });
        }
        self.record(
            "update_signature",
            Mutation::UpdateSignature {
                email: email.to_string(),
                signature: signature.to_string(),
            },
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    Say(String),
    DirectMessage { member: u64, content: String },
    AddRole { member: u64, role: String },
    RemoveRole { member: u64, role: String },
    ClearRoles(u64),
    Rename { member: u64, nick: String },
}

pub struct FakeChat {
    roles: Vec<String>,
    events: Mutex<Vec<ChatEvent>>,
}

impl FakeChat {
    pub fn with_roles(roles: &[&str]) -> Self {
        Self {
            roles: roles.iter().map(|r| r.to_string()).collect(),
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn events(&self) -> Vec<ChatEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Channel messages, in order
    pub fn said(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ChatEvent::Say(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    pub fn direct_messages(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ChatEvent::DirectMessage { content, .. } => Some(content),
                _ => None,
            })
            .collect()
    }

    /// Events that change the member
    pub fn member_changes(&self) -> Vec<ChatEvent> {
        self.events()
            .into_iter()
            .filter(|e| {
                !matches!(e, ChatEvent::Say(_) | ChatEvent::DirectMessage { .. })
            })
            .collect()
    }

    fn role_name(&self, role: RoleId) -> String {
        self.roles[role.0 as usize].clone()
    }

    fn push(&self, event: ChatEvent) -> Result<(), ChatError> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

#[async_trait]
impl Chat for FakeChat {
    async fn say(&self, content: &str) -> Result<(), ChatError> {
        self.push(ChatEvent::Say(content.to_string()))
    }

    async fn direct_message(&self, member: &Member, content: &str) -> Result<(), ChatError> {
        self.push(ChatEvent::DirectMessage {
            member: member.id,
            content: content.to_string(),
        })
    }

    async fn find_role(&self, name: &str) -> Result<Option<RoleId>, ChatError> {
        Ok(self
            .roles
            .iter()
            .position(|r| r == name)
            .map(|i| RoleId(i as u64)))
    }

    async fn add_role(&self, member: &Member, role: RoleId) -> Result<(), ChatError> {
        self.push(ChatEvent::AddRole {
            member: member.id,
            role: self.role_name(role),
        })
    }

    async fn remove_role(&self, member: &Member, role: RoleId) -> Result<(), ChatError> {
        self.push(ChatEvent::RemoveRole {
            member: member.id,
            role: self.role_name(role),
        })
    }

    async fn clear_roles(&self, member: &Member) -> Result<(), ChatError> {
        self.push(ChatEvent::ClearRoles(member.id))
    }

    async fn rename(&self, member: &Member, nick: &str) -> Result<(), ChatError> {
        self.push(ChatEvent::Rename {
            member: member.id,
            nick: nick.to_string(),
        })
    }
}

pub struct Harness {
    pub config: Config,
    pub workspace: FakeWorkspace,
    pub chat: FakeChat,
    pub templates: Templates,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_roles(&["member", "Engineering", "Design", "Board"])
    }

    pub fn with_roles(roles: &[&str]) -> Self {
        Self {
            config: Config::parse(CONFIG).unwrap(),
            workspace: FakeWorkspace::default(),
            chat: FakeChat::with_roles(roles),
            templates: Templates::from_dir(Path::new(env!("CARGO_MANIFEST_DIR")).join("templates")),
        }
    }

    pub fn services(&self) -> Services<'_> {
        Services {
            config: &self.config,
            workspace: &self.workspace,
            chat: &self.chat,
            templates: &self.templates,
        }
    }
}

pub fn member() -> Member {
    Member {
        id: 42,
        name: "jane".to_string(),
        nick: Some("Jane".to_string()),
    }
}

pub fn directory_user(email: &str, first: &str, last: &str, team: &str, discord_id: u64) -> DirectoryUser {
    serde_json::from_value(serde_json::json!({
        "primaryEmail": email,
        "name": {"givenName": first, "familyName": last},
        "organizations": [{"title": "developer", "department": team, "primary": true}],
        "customSchemas": {"discord": {"id": discord_id.to_string(), "pseudo": "jdoe"}}
    }))
    .unwrap()
}

/// Jane, linked to [`member`], in the engineering team
pub fn jane() -> DirectoryUser {
    directory_user("jane.doe@example.org", "Jane", "Doe", "engineer", 42)
}
