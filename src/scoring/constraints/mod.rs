mod actions;
mod rules;

pub use actions::{configuration_row_actions, row_actions, value_row_actions, RowAction};

use serde::{Deserialize, Serialize};

use super::domain::{
    FieldDataType, ItemDraft, PicklistOption, ScoringConfiguration, ScoringItem, ScoringValue,
};

/// Checkbox values are restricted to this two-element domain.
pub const CHECKBOX_TRUE: &str = "TRUE";
pub const CHECKBOX_FALSE: &str = "FALSE";

pub fn checkbox_domain() -> [PicklistOption; 2] {
    [
        PicklistOption::new(CHECKBOX_TRUE, "True"),
        PicklistOption::new(CHECKBOX_FALSE, "False"),
    ]
}

/// Options a new value may still target for a given item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "options", rename_all = "snake_case")]
pub enum AvailableOptions {
    /// Free-form numeric values; nothing to enumerate.
    Unrestricted,
    Choices(Vec<PicklistOption>),
    /// The data type never owns values.
    Forbidden,
}

impl AvailableOptions {
    pub fn choices(&self) -> &[PicklistOption] {
        match self {
            AvailableOptions::Choices(options) => options,
            AvailableOptions::Unrestricted | AvailableOptions::Forbidden => &[],
        }
    }

    /// Whether at least one more value can be created.
    pub fn admits_new_value(&self) -> bool {
        match self {
            AvailableOptions::Unrestricted => true,
            AvailableOptions::Choices(options) => !options.is_empty(),
            AvailableOptions::Forbidden => false,
        }
    }
}

/// Rule violations for value records.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(tag = "violation", rename_all = "snake_case")]
pub enum ValueViolation {
    #[error("awarded score {score} exceeds the field point cap {cap}")]
    ScoreExceedsCap { score: f64, cap: f64 },
    #[error("awarded score {score} must not be negative")]
    NegativeScore { score: f64 },
    #[error("{data_type} fields do not accept values; they score the point cap when not empty")]
    TypeForbidsValues { data_type: FieldDataType },
    #[error("select a picklist option")]
    MissingPicklistSelection,
    #[error("select True or False")]
    MissingCheckboxSelection,
    #[error("enter a numeric value")]
    MissingNumericValue,
    #[error("option '{option}' is already configured for this field")]
    OptionAlreadyConfigured { option: String },
    #[error("every option of this field already has a value")]
    NoOptionsRemaining,
}

/// Rule violations for item drafts.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(tag = "violation", rename_all = "snake_case")]
pub enum ItemViolation {
    #[error("a label is required")]
    MissingLabel,
    #[error("select a lead field")]
    MissingField,
    #[error("the selected lead field has no data type")]
    MissingDataType,
    #[error("the point cap must be greater than or equal to 0")]
    NegativePointCap { point_cap: f64 },
    #[error("the point cap must be a finite number")]
    InvalidPointCap { point_cap: f64 },
}

/// Rule violations for configuration drafts.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(tag = "violation", rename_all = "snake_case")]
pub enum ConfigurationViolation {
    #[error("a configuration name is required")]
    MissingName,
}

/// Local rule violation; blocks submission and never reaches the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(tag = "entity", rename_all = "snake_case")]
pub enum ValidationError {
    #[error(transparent)]
    Value(#[from] ValueViolation),
    #[error(transparent)]
    Item(#[from] ItemViolation),
    #[error(transparent)]
    Configuration(#[from] ConfigurationViolation),
}

/// Stateless evaluator for the fixed set of value, item, and configuration rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValueConstraintEngine;

impl ValueConstraintEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn is_value_eligible_type(&self, data_type: FieldDataType) -> bool {
        !data_type.scores_on_presence()
    }

    pub fn available_options(
        &self,
        data_type: FieldDataType,
        existing: &[ScoringValue],
        catalog_options: &[PicklistOption],
    ) -> AvailableOptions {
        rules::available_options(data_type, existing, catalog_options)
    }

    /// Gate for opening a form for a brand-new value.
    pub fn check_can_create(
        &self,
        data_type: FieldDataType,
        existing: &[ScoringValue],
        catalog_options: &[PicklistOption],
    ) -> Result<AvailableOptions, ValueViolation> {
        match self.available_options(data_type, existing, catalog_options) {
            AvailableOptions::Forbidden => Err(ValueViolation::TypeForbidsValues { data_type }),
            options if !options.admits_new_value() => Err(ValueViolation::NoOptionsRemaining),
            options => Ok(options),
        }
    }

    /// Validate a candidate against its parent item and return the normalized record.
    pub fn validate_value(
        &self,
        candidate: &ScoringValue,
        parent: &ValueParent<'_>,
        existing: &[ScoringValue],
    ) -> Result<ScoringValue, ValueViolation> {
        rules::validate_value(candidate, parent, existing)
    }

    pub fn validate_item(&self, draft: &ItemDraft) -> Result<ScoringItem, ItemViolation> {
        if !draft.point_cap.is_finite() {
            return Err(ItemViolation::InvalidPointCap {
                point_cap: draft.point_cap,
            });
        }
        if draft.point_cap < 0.0 {
            return Err(ItemViolation::NegativePointCap {
                point_cap: draft.point_cap,
            });
        }
        if draft.field_api_name.trim().is_empty() {
            return Err(ItemViolation::MissingField);
        }
        let data_type = draft.data_type.ok_or(ItemViolation::MissingDataType)?;
        if draft.label.trim().is_empty() {
            return Err(ItemViolation::MissingLabel);
        }

        Ok(ScoringItem {
            id: draft.id.clone(),
            configuration_id: draft.configuration_id.clone(),
            label: draft.label.trim().to_string(),
            field_api_name: draft.field_api_name.clone(),
            data_type,
            point_cap: draft.point_cap,
            order: draft.order,
            active: draft.active,
            description: draft.description.clone(),
            agent_question: draft.agent_question.clone(),
        })
    }

    pub fn validate_configuration(
        &self,
        draft: &ScoringConfiguration,
    ) -> Result<ScoringConfiguration, ConfigurationViolation> {
        if draft.name.trim().is_empty() {
            return Err(ConfigurationViolation::MissingName);
        }
        let mut record = draft.clone();
        record.name = draft.name.trim().to_string();
        Ok(record)
    }
}

/// Parent item facts a value is validated against.
#[derive(Debug, Clone, Copy)]
pub struct ValueParent<'a> {
    pub data_type: FieldDataType,
    pub point_cap: f64,
    pub catalog_options: &'a [PicklistOption],
}
