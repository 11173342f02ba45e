use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Opaque user-defined metadata attached to a component.
///
/// Carried along for the caller; the registry never reads it.
pub type Meta = serde_json::Map<String, serde_json::Value>;

/// Configuration shared by every component type.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ComponentConfig {
    /// Explicit id, unique within the owning scene. Generated when `None`.
    pub id: Option<String>,
    pub meta: Meta,
}

impl ComponentConfig {
    #[must_use]
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }
}

/// Deserializes an optional configuration field, replacing a malformed value
/// with `None` so the field takes its default.
///
/// Use with `#[serde(default, deserialize_with = "or_default")]`.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match serde_json::from_value::<Option<T>>(value) {
        Ok(parsed) => Ok(parsed),
        Err(err) => {
            log::warn!("Ignoring malformed configuration value ({err}); using default");
            Ok(None)
        }
    }
}
