use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

pub type ObjectId = String;

/// Free-form string map carried by every object.
pub type ObjectData = BTreeMap<String, String>;

/// The single key the edit form writes its free-text field under.
pub const FORM_DATA_KEY: &str = "info";

pub const NO_DATA_TEXT: &str = "No data";

/// An object as persisted by the remote service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DataObject {
    pub id: ObjectId,
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_data")]
    pub data: ObjectData,
}

impl DataObject {
    /// Row text: `key, value` per entry, `"No data"` for an empty map.
    pub fn data_summary(&self) -> String {
        if self.data.is_empty() {
            return NO_DATA_TEXT.to_string();
        }
        join_entries(&self.data, "; ")
    }

    /// Text the edit form is pre-filled with.
    pub fn form_text(&self) -> String {
        match self.data.get(FORM_DATA_KEY) {
            Some(value) if self.data.len() == 1 => value.clone(),
            _ => join_entries(&self.data, ","),
        }
    }
}

/// Body of create and update calls. The target id travels in the URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CreateDataRequest {
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_data")]
    pub data: ObjectData,
}

impl CreateDataRequest {
    pub fn from_form(name: impl Into<String>, info: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: BTreeMap::from([(FORM_DATA_KEY.to_string(), info.into())]),
        }
    }
}

/// Container the collection response is decoded into. Transparent on the
/// wire, so it reads a bare JSON array.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct ObjectList {
    pub items: Vec<DataObject>,
}

fn join_entries(data: &ObjectData, separator: &str) -> String {
    data.iter()
        .map(|(key, value)| format!("{key}, {value}"))
        .collect::<Vec<_>>()
        .join(separator)
}

fn deserialize_data<'de, D>(deserializer: D) -> Result<ObjectData, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, serde_json::Value>>::deserialize(deserializer)?;

    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(key, value)| {
            let text = match value {
                serde_json::Value::String(text) => text,
                other => other.to_string(),
            };
            (key, text)
        })
        .collect())
}
