use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Server-assigned identifier. The service may hand out numbers or strings; the
/// client never interprets it beyond equality and path formatting.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum ItemId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Number(n) => write!(f, "{n}"),
            ItemId::Text(s) => f.write_str(s),
        }
    }
}

impl FromStr for ItemId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        // Only the canonical spelling of a number is numeric; "007" or "+5" stay text.
        Ok(match s.parse::<i64>() {
            Ok(n) if n.to_string() == s => ItemId::Number(n),
            _ => ItemId::Text(s.to_string()),
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LaunchItem {
    pub id: ItemId,
    pub name: String,
    pub path: String,
}

/// Body of `POST /launch-items`; the id is assigned by the service.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NewLaunchItem {
    pub name: String,
    pub path: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: ItemId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    pub content: String,
}

/// Body of `POST /notes` and `PUT /notes/{id}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    pub content: String,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    pub fn has_content(&self) -> bool {
        !self.content.trim().is_empty()
    }
}

/// Error body returned with non-2xx statuses. Both fields are optional on the wire.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_id_accepts_numbers_and_strings() {
        let items: Vec<LaunchItem> = serde_json::from_str(
            r#"[{"id":3,"name":"Terminal","path":"/t"},{"id":"a1b2","name":"x","path":"/x"}]"#,
        )
        .unwrap();
        assert_eq!(items[0].id, ItemId::Number(3));
        assert_eq!(items[1].id, ItemId::Text("a1b2".to_string()));
        assert_eq!(items[0].id.to_string(), "3");
        assert_eq!(items[1].id.to_string(), "a1b2");
    }

    #[test]
    fn item_id_parses_cli_input() {
        assert_eq!("5".parse::<ItemId>().unwrap(), ItemId::Number(5));
        assert_eq!(" abc ".parse::<ItemId>().unwrap(), ItemId::Text("abc".to_string()));
        assert_eq!("-3".parse::<ItemId>().unwrap(), ItemId::Number(-3));
        for raw in ["007", "+5", "-0"] {
            let id = raw.parse::<ItemId>().unwrap();
            assert_eq!(id, ItemId::Text(raw.to_string()));
            assert_eq!(id.to_string(), raw);
        }
    }

    #[test]
    fn note_title_tolerates_null_and_missing() {
        let a: Note = serde_json::from_str(r#"{"id":1,"title":null,"content":"c"}"#).unwrap();
        let b: Note = serde_json::from_str(r#"{"id":2,"content":"c"}"#).unwrap();
        assert_eq!(a.title, "");
        assert_eq!(b.title, "");
    }

    #[test]
    fn new_launch_item_has_no_id_field() {
        let body = serde_json::to_value(NewLaunchItem {
            name: "Chrome".to_string(),
            path: "/Applications/Google Chrome.app".to_string(),
        })
        .unwrap();
        assert!(body.get("id").is_none());
    }

    #[test]
    fn whitespace_only_draft_has_no_content() {
        assert!(!NoteDraft::new("t", "  \n\t").has_content());
        assert!(NoteDraft::new("", "x").has_content());
    }
}
