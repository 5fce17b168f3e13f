use serde::{Deserialize, Serialize};

/// Group resource from the Directory API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: Option<String>,
    pub email: String,
    pub name: Option<String>,
}

/// Groups list response
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Groups {
    #[serde(default)]
    pub groups: Vec<Group>,
    pub next_page_token: Option<String>,
}

/// Member insert body
#[derive(Debug, Clone, Serialize)]
pub struct GroupMember<'a> {
    pub email: &'a str,
    pub role: &'a str,
}
