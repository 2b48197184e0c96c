//! Lead scoring configuration console core.
//!
//! Configurations own ordered items (lead fields) and items own value rules. The orchestrator
//! drives the four-level modal navigation, consults the constraint engine before any value form
//! opens or submits, and routes every successful mutation through the refresh coordinator
//! before committing the next view.

pub mod catalog;
pub mod constraints;
pub mod domain;
pub mod gateway;
pub mod guard;
pub mod memory;
pub mod navigation;
pub mod notify;
pub mod orchestrator;
pub mod refresh;

#[cfg(test)]
mod tests;

pub use catalog::{shorten_label, FieldCatalogResolver, MAX_ITEM_LABEL_CHARS};
pub use constraints::{
    configuration_row_actions, row_actions, value_row_actions, AvailableOptions,
    ConfigurationViolation, ItemViolation, RowAction, ValidationError, ValueConstraintEngine,
    ValueParent, ValueViolation,
};
pub use domain::{
    ConfigurationId, EntityKind, FieldDataType, ItemDraft, ItemFieldProfile, ItemId,
    LeadFieldDescriptor, PicklistOption, ScoringConfiguration, ScoringItem, ScoringValue, ValueId,
};
pub use gateway::{
    CatalogGateway, ConfigurationGateway, ItemGateway, RemoteOperationError, ScoringGateway,
    ValueGateway,
};
pub use guard::SubmissionGuard;
pub use memory::{GatewayCall, InMemoryScoringGateway};
pub use navigation::{Navigation, NavigationContext, NavigationError, NavigationIntent, Screen};
pub use notify::{Notification, NotificationLevel, Notifier, TracingNotifier};
pub use orchestrator::{
    ConfigurationOrchestrator, EntityTarget, Intent, Outcome, PendingDelete, PresentationEvent,
    SessionError,
};
pub use refresh::{FanOutPolicy, RefreshCoordinator, RefreshScope};
