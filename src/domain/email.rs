use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Backend-assigned email id. Some backends send numbers, others strings,
/// so it is kept in its textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EmailId(pub String);

impl EmailId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for EmailId {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            UInt(u64),
            Float(f64),
            Text(String),
        }
        Ok(match Raw::deserialize(de)? {
            Raw::Int(n) => EmailId(n.to_string()),
            Raw::UInt(n) => EmailId(n.to_string()),
            Raw::Float(n) => EmailId(n.to_string()),
            Raw::Text(s) => EmailId(s),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Priority::High => Priority::Medium,
            Priority::Medium => Priority::Low,
            Priority::Low => Priority::High,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Priority::High => Priority::Low,
            Priority::Medium => Priority::High,
            Priority::Low => Priority::Medium,
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(anyhow::anyhow!("unknown priority '{other}'")),
        }
    }
}

/// A file attached to an outgoing email. `content` is a data URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    #[serde(rename = "type", default)]
    pub mime_type: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub content: String,
}

/// An email ready to be handed to the backend. Built by `EmailBuilder`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Email {
    pub from_address: String,
    pub subject: String,
    pub to_address: Vec<String>,
    pub body: String,
    pub attachments: Vec<Attachment>,
    pub priority: Priority,
    pub is_draft: bool,
}

/// List item as returned by the backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailSummary {
    pub id: EmailId,
    #[serde(default)]
    pub from_address: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
    #[serde(default, deserialize_with = "addresses")]
    pub to_address: Vec<String>,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub color: Option<String>,
}

// toAddress comes back either as one string or as a list.
fn addresses<'de, D: Deserializer<'de>>(de: D) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        One(String),
        Many(Vec<String>),
        Null,
    }
    Ok(match Raw::deserialize(de)? {
        Raw::One(s) if s.is_empty() => vec![],
        Raw::One(s) => vec![s],
        Raw::Many(v) => v,
        Raw::Null => vec![],
    })
}
