//! Basic types for dependent select loading

use crate::error::LoadError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifier of a selectable option
///
/// Stored as text. The backend emits numeric ids while preselected ids come
/// from element attributes as strings, so both compare by their textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OptionId(String);

impl OptionId {
    pub fn new(id: impl Into<String>) -> Self {
        OptionId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OptionId {
    fn from(s: &str) -> Self {
        OptionId(s.to_string())
    }
}

impl From<i32> for OptionId {
    fn from(n: i32) -> Self {
        OptionId(n.to_string())
    }
}

impl From<i64> for OptionId {
    fn from(n: i64) -> Self {
        OptionId(n.to_string())
    }
}

impl std::fmt::Display for OptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(serde_json::Number),
    Text(String),
}

impl<'de> Deserialize<'de> for OptionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => OptionId(n.to_string()),
            RawId::Text(s) => OptionId(s),
        })
    }
}

impl Serialize for OptionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// One selectable child item, as returned by the subcategory endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub id: OptionId,
    #[serde(rename = "nome")]
    pub label: String,
}

impl SelectOption {
    pub fn new(id: impl Into<OptionId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// The parent value chosen by the user; blank means nothing is chosen
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParentSelection(Option<String>);

impl ParentSelection {
    /// No parent chosen
    pub fn none() -> Self {
        ParentSelection(None)
    }

    /// Trimmed parent id, or `EmptyParent` when nothing usable is selected
    pub fn id(&self) -> Result<&str, LoadError> {
        match self.0.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => Ok(id),
            _ => Err(LoadError::EmptyParent),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id().is_err()
    }
}

impl From<&str> for ParentSelection {
    fn from(s: &str) -> Self {
        ParentSelection(Some(s.to_string()))
    }
}

impl From<String> for ParentSelection {
    fn from(s: String) -> Self {
        ParentSelection(Some(s))
    }
}

impl From<Option<&str>> for ParentSelection {
    fn from(s: Option<&str>) -> Self {
        ParentSelection(s.map(str::to_string))
    }
}

/// Display state of a dependent select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadState {
    /// Nothing requested yet, or no parent selected
    Idle,
    /// A request is in flight
    Loading,
    /// Options from the last response are displayed
    Loaded,
    /// The last load failed
    Failed,
}

impl Default for LoadState {
    fn default() -> Self {
        LoadState::Idle
    }
}

impl std::str::FromStr for LoadState {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "idle" => Ok(LoadState::Idle),
            "loading" => Ok(LoadState::Loading),
            "loaded" => Ok(LoadState::Loaded),
            "failed" => Ok(LoadState::Failed),
            _ => Err(format!("Invalid load state: {}", s)),
        }
    }
}

impl std::fmt::Display for LoadState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadState::Idle => write!(f, "idle"),
            LoadState::Loading => write!(f, "loading"),
            LoadState::Loaded => write!(f, "loaded"),
            LoadState::Failed => write!(f, "failed"),
        }
    }
}

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Info
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Success => write!(f, "success"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}
