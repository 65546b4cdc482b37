use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A todo record as stored and as sent over the wire.
///
/// Every field but `id` can be absent: an update that omits a field clears
/// it. Absent fields are left out of the JSON rather than written as `null`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl Todo {
    pub fn new(id: u64, title: &str, description: &str, completed: bool) -> Self {
        Self {
            id,
            title: Some(title.to_owned()),
            description: Some(description.to_owned()),
            completed: Some(completed),
        }
    }

    /// Title or description contains `needle`. Case-sensitive.
    pub fn mentions(&self, needle: &str) -> bool {
        let hit = |field: &Option<String>| field.as_deref().is_some_and(|s| s.contains(needle));
        hit(&self.title) || hit(&self.description)
    }
}

/// The client-writable fields of a [`Todo`], as read from a create or update
/// body. Any `id` in the body is ignored; unknown keys are ignored.
///
/// Only a JSON object is accepted. Arrays and scalars are rejected rather
/// than read field by field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct TodoFields {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

impl TryFrom<Map<String, Value>> for TodoFields {
    type Error = serde_json::Error;

    fn try_from(mut object: Map<String, Value>) -> Result<Self, Self::Error> {
        Ok(Self {
            title: take(&mut object, "title")?,
            description: take(&mut object, "description")?,
            completed: take(&mut object, "completed")?,
        })
    }
}

/// A missing key and an explicit `null` both read as `None`.
fn take<T: DeserializeOwned>(object: &mut Map<String, Value>, key: &str) -> serde_json::Result<Option<T>> {
    match object.remove(key) {
        Some(value) => serde_json::from_value(value),
        None => Ok(None),
    }
}
