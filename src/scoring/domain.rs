use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for persisted scoring configurations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConfigurationId(pub String);

/// Identifier wrapper for scoring items (fields bound to a configuration).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub String);

/// Identifier wrapper for scoring values (rules bound to an item).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ValueId(pub String);

impl fmt::Display for ConfigurationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ValueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Data type of the external lead field an item is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FieldDataType {
    Text,
    Email,
    Phone,
    Date,
    Number,
    Picklist,
    Checkbox,
}

impl FieldDataType {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::Text,
            Self::Email,
            Self::Phone,
            Self::Date,
            Self::Number,
            Self::Picklist,
            Self::Checkbox,
        ]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::Email => "EMAIL",
            Self::Phone => "PHONE",
            Self::Date => "DATE",
            Self::Number => "NUMBER",
            Self::Picklist => "PICKLIST",
            Self::Checkbox => "CHECKBOX",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Date => "Date",
            Self::Number => "Number",
            Self::Picklist => "Picklist",
            Self::Checkbox => "Checkbox",
        }
    }

    /// Presence-scored types award the point cap whenever the bound field is non-empty.
    pub const fn scores_on_presence(self) -> bool {
        matches!(self, Self::Text | Self::Email | Self::Phone | Self::Date)
    }
}

impl fmt::Display for FieldDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field data type '{0}'")]
pub struct UnknownDataType(pub String);

impl FromStr for FieldDataType {
    type Err = UnknownDataType;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_uppercase();
        Self::ordered()
            .into_iter()
            .find(|kind| kind.code() == normalized)
            .ok_or_else(|| UnknownDataType(raw.to_string()))
    }
}

/// Top-level named scoring profile.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoringConfiguration {
    pub id: Option<ConfigurationId>,
    pub name: String,
    pub active: bool,
    #[serde(default)]
    pub description: String,
}

/// A scored lead field belonging to one configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringItem {
    pub id: Option<ItemId>,
    pub configuration_id: ConfigurationId,
    pub label: String,
    pub field_api_name: String,
    pub data_type: FieldDataType,
    pub point_cap: f64,
    pub order: u32,
    pub active: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub agent_question: String,
}

/// Editable form state for an item; the data type stays unset until a catalog field is chosen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDraft {
    pub id: Option<ItemId>,
    pub configuration_id: ConfigurationId,
    pub label: String,
    pub field_api_name: String,
    pub data_type: Option<FieldDataType>,
    pub point_cap: f64,
    pub order: u32,
    pub active: bool,
    pub description: String,
    pub agent_question: String,
}

impl ItemDraft {
    pub fn new(configuration_id: ConfigurationId, order: u32) -> Self {
        Self {
            id: None,
            configuration_id,
            label: String::new(),
            field_api_name: String::new(),
            data_type: None,
            point_cap: 0.0,
            order,
            active: true,
            description: String::new(),
            agent_question: String::new(),
        }
    }
}

impl From<ScoringItem> for ItemDraft {
    fn from(item: ScoringItem) -> Self {
        Self {
            id: item.id,
            configuration_id: item.configuration_id,
            label: item.label,
            field_api_name: item.field_api_name,
            data_type: Some(item.data_type),
            point_cap: item.point_cap,
            order: item.order,
            active: item.active,
            description: item.description,
            agent_question: item.agent_question,
        }
    }
}

/// A discrete scoring rule belonging to one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringValue {
    pub id: Option<ValueId>,
    pub item_id: ItemId,
    pub value_text: String,
    pub picklist_option: Option<String>,
    pub score: f64,
    pub exact_match: bool,
    pub active: bool,
}

impl ScoringValue {
    pub fn blank(item_id: ItemId) -> Self {
        Self {
            id: None,
            item_id,
            value_text: String::new(),
            picklist_option: None,
            score: 0.0,
            exact_match: false,
            active: true,
        }
    }

    /// Label shown when asking the user to confirm a delete.
    pub fn display_label(&self) -> String {
        if !self.value_text.trim().is_empty() {
            return self.value_text.clone();
        }
        match self.picklist_option.as_deref() {
            Some(option) if !option.trim().is_empty() => option.to_string(),
            _ => "Value".to_string(),
        }
    }
}

/// Candidate field supplied by the external lead-field catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadFieldDescriptor {
    pub api_name: String,
    pub label: String,
    pub data_type: FieldDataType,
}

/// Selectable option (picklist entry or checkbox state).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PicklistOption {
    pub value: String,
    pub label: String,
}

impl PicklistOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Parent field details needed to edit an item's values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemFieldProfile {
    pub data_type: FieldDataType,
    pub point_cap: f64,
    pub options: Vec<PicklistOption>,
}

/// Entity families managed by the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Configuration,
    Item,
    Value,
}

impl EntityKind {
    pub const fn label(self) -> &'static str {
        match self {
            EntityKind::Configuration => "configuration",
            EntityKind::Item => "field",
            EntityKind::Value => "value",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
