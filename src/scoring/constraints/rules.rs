use std::collections::BTreeSet;

use crate::scoring::domain::{FieldDataType, PicklistOption, ScoringValue, ValueId};
use super::{checkbox_domain, AvailableOptions, ValueParent, ValueViolation};

pub(crate) fn available_options(
    data_type: FieldDataType,
    existing: &[ScoringValue],
    catalog_options: &[PicklistOption],
) -> AvailableOptions {
    match data_type {
        FieldDataType::Picklist => {
            let configured = configured_picklist_options(existing, None);
            AvailableOptions::Choices(
                catalog_options
                    .iter()
                    .filter(|option| !configured.contains(option.value.as_str()))
                    .cloned()
                    .collect(),
            )
        }
        FieldDataType::Checkbox => {
            let configured = configured_checkbox_texts(existing, None);
            AvailableOptions::Choices(
                checkbox_domain()
                    .into_iter()
                    .filter(|option| !configured.contains(&option.value))
                    .collect(),
            )
        }
        FieldDataType::Number => AvailableOptions::Unrestricted,
        FieldDataType::Text | FieldDataType::Email | FieldDataType::Phone | FieldDataType::Date => {
            AvailableOptions::Forbidden
        }
    }
}

pub(crate) fn validate_value(
    candidate: &ScoringValue,
    parent: &ValueParent<'_>,
    existing: &[ScoringValue],
) -> Result<ScoringValue, ValueViolation> {
    // A NaN cap admits nothing.
    if candidate.score > parent.point_cap || parent.point_cap.is_nan() {
        return Err(ValueViolation::ScoreExceedsCap {
            score: candidate.score,
            cap: parent.point_cap,
        });
    }
    if candidate.score < 0.0 || candidate.score.is_nan() {
        return Err(ValueViolation::NegativeScore {
            score: candidate.score,
        });
    }

    let mut normalized = candidate.clone();
    match parent.data_type {
        FieldDataType::Picklist => {
            let option = candidate
                .picklist_option
                .as_deref()
                .map(str::trim)
                .filter(|option| !option.is_empty())
                .ok_or(ValueViolation::MissingPicklistSelection)?;

            let configured = configured_picklist_options(existing, candidate.id.as_ref());
            if configured.contains(option) {
                return Err(ValueViolation::OptionAlreadyConfigured {
                    option: option.to_string(),
                });
            }

            if normalized.value_text.trim().is_empty() {
                normalized.value_text = parent
                    .catalog_options
                    .iter()
                    .find(|entry| entry.value == option)
                    .map(|entry| entry.label.clone())
                    .unwrap_or_else(|| option.to_string());
            }
            normalized.picklist_option = Some(option.to_string());
        }
        FieldDataType::Checkbox => {
            let text = candidate.value_text.trim().to_ascii_uppercase();
            if !checkbox_domain().iter().any(|option| option.value == text) {
                return Err(ValueViolation::MissingCheckboxSelection);
            }

            let configured = configured_checkbox_texts(existing, candidate.id.as_ref());
            if configured.contains(&text) {
                return Err(ValueViolation::OptionAlreadyConfigured { option: text });
            }

            normalized.value_text = text;
            normalized.exact_match = true;
            normalized.picklist_option = None;
        }
        FieldDataType::Number => {
            let text = candidate.value_text.trim();
            match text.parse::<f64>() {
                Ok(number) if number.is_finite() => {}
                _ => return Err(ValueViolation::MissingNumericValue),
            }
            normalized.value_text = text.to_string();
            normalized.picklist_option = None;
        }
        data_type => return Err(ValueViolation::TypeForbidsValues { data_type }),
    }

    Ok(normalized)
}

fn configured_picklist_options<'a>(
    existing: &'a [ScoringValue],
    editing: Option<&ValueId>,
) -> BTreeSet<&'a str> {
    existing
        .iter()
        .filter(|value| editing.is_none() || value.id.as_ref() != editing)
        .filter_map(|value| value.picklist_option.as_deref())
        .collect()
}

fn configured_checkbox_texts(
    existing: &[ScoringValue],
    editing: Option<&ValueId>,
) -> BTreeSet<String> {
    existing
        .iter()
        .filter(|value| editing.is_none() || value.id.as_ref() != editing)
        .map(|value| value.value_text.trim().to_ascii_uppercase())
        .collect()
}
