use std::sync::OnceLock;

use regex::Regex;

use super::domain::{ItemDraft, LeadFieldDescriptor};

/// Maximum length of an item label derived from a catalog field.
pub const MAX_ITEM_LABEL_CHARS: usize = 80;

const ELLIPSIS: &str = "...";

fn trailing_annotation() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\s\([^)]+\)$").expect("annotation pattern compiles"))
}

/// Strip a trailing `" (...)"` annotation, then cap the label at 80 characters.
pub fn shorten_label(label: &str) -> String {
    let stripped = trailing_annotation().replace(label, "");
    if stripped.chars().count() <= MAX_ITEM_LABEL_CHARS {
        return stripped.into_owned();
    }

    let keep = MAX_ITEM_LABEL_CHARS - ELLIPSIS.len();
    let mut shortened: String = stripped.chars().take(keep).collect();
    shortened.push_str(ELLIPSIS);
    shortened
}

/// Lookup over the eligible lead fields fetched once per session.
#[derive(Debug, Clone, Default)]
pub struct FieldCatalogResolver {
    fields: Vec<LeadFieldDescriptor>,
}

impl FieldCatalogResolver {
    pub fn new(fields: Vec<LeadFieldDescriptor>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[LeadFieldDescriptor] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn resolve(&self, api_name: &str) -> Option<&LeadFieldDescriptor> {
        self.fields.iter().find(|field| field.api_name == api_name)
    }

    /// Bind the draft to the named field, resetting its data type and label.
    ///
    /// Returns the applied descriptor; unknown or blank names leave the draft untouched.
    pub fn apply_selection(
        &self,
        draft: &mut ItemDraft,
        api_name: &str,
    ) -> Option<&LeadFieldDescriptor> {
        if api_name.trim().is_empty() {
            return None;
        }
        let field = self.resolve(api_name)?;
        draft.field_api_name = field.api_name.clone();
        draft.data_type = Some(field.data_type);
        draft.label = shorten_label(&field.label);
        Some(field)
    }
}
