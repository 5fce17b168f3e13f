use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// User resource from the Admin SDK Directory API
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub primary_email: Option<String>,
    pub name: Option<UserName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspended: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_password_at_next_login: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovery_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizations: Option<Vec<Organization>>,
    /// Schema name -> field name -> value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_schemas: Option<Map<String, Value>>,
}

impl DirectoryUser {
    /// The primary organization, or the first one listed.
    pub fn organization(&self) -> Option<&Organization> {
        let orgs = self.organizations.as_ref()?;
        orgs.iter()
            .find(|o| o.primary == Some(true))
            .or_else(|| orgs.first())
    }

    /// Read a string field from a custom schema.
    pub fn schema_field(&self, schema: &str, field: &str) -> Option<String> {
        let value = self.custom_schemas.as_ref()?.get(schema)?.get(field)?;
        match value {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserName {
    pub given_name: String,
    pub family_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<bool>,
}

/// Users list response from the Directory API
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryUsers {
    #[serde(default)]
    pub users: Vec<DirectoryUser>,
    pub next_page_token: Option<String>,
}
