use std::sync::LazyLock;

use regex::Regex;

use crate::error::DomainError;
use crate::types::DirectoryUser;
use crate::util::truncate;

/// Discord caps nicknames at 32 characters
pub const NICKNAME_MAX_LEN: usize = 32;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static NOT_LOCAL_PART: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9.-]").unwrap());

/// Working view of a directory account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub email: String,
    pub firstname: String,
    pub lastname: String,
    pub pseudo: Option<String>,
    /// Organization title
    pub role: Option<String>,
    /// Organization department, i.e. the team name
    pub team: Option<String>,
    pub discord_id: Option<u64>,
}

impl User {
    /// Build from a directory record; `schema` names the custom schema holding Discord fields
    pub fn from_record(record: DirectoryUser, schema: &str) -> Result<Self, DomainError> {
        let email = record
            .primary_email
            .clone()
            .filter(|e| !e.is_empty())
            .ok_or_else(|| DomainError::IncompleteRecord {
                email: record.id.clone().unwrap_or_else(|| "<unknown>".to_string()),
                field: "primary email",
            })?;

        let name = record
            .name
            .clone()
            .ok_or_else(|| DomainError::IncompleteRecord {
                email: email.clone(),
                field: "name",
            })?;

        let organization = record.organization();

        Ok(Self {
            pseudo: record.schema_field(schema, "pseudo"),
            role: organization.and_then(|o| o.title.clone()).filter(|t| !t.is_empty()),
            team: organization
                .and_then(|o| o.department.clone())
                .filter(|d| !d.is_empty()),
            discord_id: record
                .schema_field(schema, "id")
                .and_then(|id| id.parse().ok()),
            email,
            firstname: name.given_name,
            lastname: name.family_name,
        })
    }

    /// `first.last@domain`, folded to what Google accepts in a local part
    pub fn email_from_name(firstname: &str, lastname: &str, domain: &str) -> String {
        format!(
            "{}.{}@{}",
            local_part(firstname),
            local_part(lastname),
            domain
        )
    }

    /// Nickname shown on the guild
    pub fn discord_name(firstname: &str, pseudo: &str, lastname: &str) -> String {
        truncate(
            &format!("{} \"{}\" {}", firstname, pseudo, lastname),
            NICKNAME_MAX_LEN,
        )
    }

    pub fn nickname(&self) -> String {
        Self::discord_name(
            &self.firstname,
            self.pseudo.as_deref().unwrap_or_default(),
            &self.lastname,
        )
    }
}

fn local_part(name: &str) -> String {
    let folded: String = name.trim().to_lowercase().chars().map(fold_accent).collect();
    let dashed = WHITESPACE.replace_all(&folded, "-");
    NOT_LOCAL_PART.replace_all(&dashed, "").into_owned()
}

fn fold_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}
