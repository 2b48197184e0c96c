//! Remote data gateway contract.
//!
//! Every call is a suspending round-trip to the remote collaborator; server state is ground
//! truth and nothing here retries.

use async_trait::async_trait;

use super::domain::{
    ConfigurationId, ItemFieldProfile, ItemId, LeadFieldDescriptor, ScoringConfiguration,
    ScoringItem, ScoringValue, ValueId,
};

/// Fallback shown when the remote side supplies no message.
pub const GENERIC_FAILURE_MESSAGE: &str = "The remote operation failed.";

/// Failure raised by any gateway call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", self.user_message())]
pub struct RemoteOperationError {
    pub message: Option<String>,
}

impl RemoteOperationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    pub fn without_message() -> Self {
        Self { message: None }
    }

    /// Server-supplied message verbatim, else the generic fallback.
    pub fn user_message(&self) -> &str {
        match self.message.as_deref() {
            Some(message) if !message.trim().is_empty() => message,
            _ => GENERIC_FAILURE_MESSAGE,
        }
    }
}

pub type GatewayResult<T> = Result<T, RemoteOperationError>;

#[async_trait]
pub trait ConfigurationGateway: Send + Sync {
    async fn list_configurations(&self) -> GatewayResult<Vec<ScoringConfiguration>>;
    async fn get_configuration(
        &self,
        id: &ConfigurationId,
    ) -> GatewayResult<Option<ScoringConfiguration>>;
    async fn save_configuration(
        &self,
        record: ScoringConfiguration,
    ) -> GatewayResult<ConfigurationId>;
    /// Cascades to the configuration's items and values server-side.
    async fn delete_configuration(&self, id: &ConfigurationId) -> GatewayResult<()>;
}

#[async_trait]
pub trait ItemGateway: Send + Sync {
    async fn list_items(&self, configuration_id: &ConfigurationId)
        -> GatewayResult<Vec<ScoringItem>>;
    async fn get_item(&self, id: &ItemId) -> GatewayResult<Option<ScoringItem>>;
    async fn next_order_index(&self, configuration_id: &ConfigurationId) -> GatewayResult<u32>;
    async fn save_item(&self, record: ScoringItem) -> GatewayResult<ItemId>;
    /// Cascades to the item's values server-side.
    async fn delete_item(&self, id: &ItemId) -> GatewayResult<()>;
}

#[async_trait]
pub trait ValueGateway: Send + Sync {
    async fn list_values(&self, item_id: &ItemId) -> GatewayResult<Vec<ScoringValue>>;
    async fn save_value(&self, record: ScoringValue) -> GatewayResult<ValueId>;
    async fn delete_value(&self, id: &ValueId) -> GatewayResult<()>;
}

#[async_trait]
pub trait CatalogGateway: Send + Sync {
    async fn list_eligible_fields(&self) -> GatewayResult<Vec<LeadFieldDescriptor>>;
    async fn field_and_options_for_item(&self, item_id: &ItemId)
        -> GatewayResult<ItemFieldProfile>;
}

/// Everything the console needs from the remote side.
pub trait ScoringGateway: ConfigurationGateway + ItemGateway + ValueGateway + CatalogGateway {}

impl<T> ScoringGateway for T where
    T: ConfigurationGateway + ItemGateway + ValueGateway + CatalogGateway
{
}
