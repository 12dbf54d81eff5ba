//! Detection records as returned by `GET /detections`

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A single object-detection event logged by the robot
///
/// Every field is display text. The backend is loose about types (ids may
/// come back as numbers or strings, timestamps may be null), so each field
/// is read through [`loose_text`] and one odd record never costs the rest
/// of the list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detection {
    #[serde(default, deserialize_with = "loose_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub timestamp: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub object_type: Option<String>,
    #[serde(default, deserialize_with = "loose_text")]
    pub image_url: Option<String>,
}

/// Accept any JSON scalar as text: null -> `None`, strings as-is, anything
/// else in its JSON form
fn loose_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

impl Detection {
    pub fn timestamp(&self) -> &str {
        self.timestamp.as_deref().unwrap_or("")
    }

    pub fn object_type(&self) -> &str {
        self.object_type.as_deref().unwrap_or("")
    }

    pub fn image_url(&self) -> &str {
        self.image_url.as_deref().unwrap_or("")
    }
}
