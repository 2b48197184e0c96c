use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::domain::{
    ConfigurationId, EntityKind, ItemId, ScoringConfiguration, ScoringItem, ScoringValue,
};
use super::gateway::{RemoteOperationError, ScoringGateway};

/// Cached collection families that can be invalidated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshScope {
    Configuration,
    Item,
    Value,
}

impl From<EntityKind> for RefreshScope {
    fn from(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Configuration => RefreshScope::Configuration,
            EntityKind::Item => RefreshScope::Item,
            EntityKind::Value => RefreshScope::Value,
        }
    }
}

impl fmt::Display for RefreshScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RefreshScope::Configuration => "configuration",
            RefreshScope::Item => "item",
            RefreshScope::Value => "value",
        };
        f.write_str(label)
    }
}

/// Declared cross-scope invalidation rules applied after deletes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FanOutPolicy {
    /// Also re-fetch the configuration list when an item or value is deleted.
    pub refresh_parent_on_child_delete: bool,
}

/// Last-fetched result of one list view.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedList<T> {
    records: Vec<T>,
    generation: u64,
    stale: bool,
}

impl<T> Default for CachedList<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            generation: 0,
            stale: true,
        }
    }
}

impl<T> CachedList<T> {
    pub fn records(&self) -> &[T] {
        &self.records
    }

    /// Number of successful fetches since the list was bound.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    fn replace(&mut self, records: Vec<T>) {
        self.records = records;
        self.generation += 1;
        self.stale = false;
    }
}

#[derive(Debug)]
struct Bound<K, T> {
    parent: K,
    list: CachedList<T>,
}

/// Sole owner of the cached list views; everyone else requests invalidation.
pub struct RefreshCoordinator<G> {
    gateway: Arc<G>,
    policy: FanOutPolicy,
    configurations: CachedList<ScoringConfiguration>,
    items: Option<Bound<ConfigurationId, ScoringItem>>,
    values: Option<Bound<ItemId, ScoringValue>>,
}

impl<G> RefreshCoordinator<G>
where
    G: ScoringGateway + 'static,
{
    pub fn new(gateway: Arc<G>, policy: FanOutPolicy) -> Self {
        Self {
            gateway,
            policy,
            configurations: CachedList::default(),
            items: None,
            values: None,
        }
    }

    pub fn policy(&self) -> FanOutPolicy {
        self.policy
    }

    pub fn configurations(&self) -> &CachedList<ScoringConfiguration> {
        &self.configurations
    }

    pub fn items(&self) -> Option<&CachedList<ScoringItem>> {
        self.items.as_ref().map(|bound| &bound.list)
    }

    pub fn values(&self) -> Option<&CachedList<ScoringValue>> {
        self.values.as_ref().map(|bound| &bound.list)
    }

    pub fn bound_configuration(&self) -> Option<&ConfigurationId> {
        self.items.as_ref().map(|bound| &bound.parent)
    }

    pub fn bound_item(&self) -> Option<&ItemId> {
        self.values.as_ref().map(|bound| &bound.parent)
    }

    /// Point the item list at a configuration; a different parent drops the old cache.
    pub fn bind_items(&mut self, configuration_id: &ConfigurationId) {
        if self.bound_configuration() != Some(configuration_id) {
            self.items = Some(Bound {
                parent: configuration_id.clone(),
                list: CachedList::default(),
            });
        }
    }

    pub fn bind_values(&mut self, item_id: &ItemId) {
        if self.bound_item() != Some(item_id) {
            self.values = Some(Bound {
                parent: item_id.clone(),
                list: CachedList::default(),
            });
        }
    }

    pub fn release_values(&mut self) {
        self.values = None;
    }

    /// Drop child bindings when the console closes.
    pub fn release_children(&mut self) {
        self.items = None;
        self.values = None;
    }

    /// Re-fetch one scope; resolves only after the fresh result replaced the cache.
    pub async fn invalidate(&mut self, scope: RefreshScope) -> Result<(), RemoteOperationError> {
        match scope {
            RefreshScope::Configuration => {
                let fetched = self.gateway.list_configurations().await;
                store(&mut self.configurations, fetched, scope)
            }
            RefreshScope::Item => {
                let Some(bound) = self.items.as_mut() else {
                    debug!(%scope, "no item list bound; skipping refresh");
                    return Ok(());
                };
                let fetched = self.gateway.list_items(&bound.parent).await;
                store(&mut bound.list, fetched, scope)
            }
            RefreshScope::Value => {
                let Some(bound) = self.values.as_mut() else {
                    debug!(%scope, "no value list bound; skipping refresh");
                    return Ok(());
                };
                let fetched = self.gateway.list_values(&bound.parent).await;
                store(&mut bound.list, fetched, scope)
            }
        }
    }

    /// Invalidate after a confirmed delete, applying the declared fan-out rule.
    pub async fn invalidate_after_delete(
        &mut self,
        kind: EntityKind,
    ) -> Result<(), RemoteOperationError> {
        let scope = RefreshScope::from(kind);
        self.invalidate(scope).await?;
        if scope != RefreshScope::Configuration && self.policy.refresh_parent_on_child_delete {
            debug!(%scope, "fanning out to the configuration list");
            self.invalidate(RefreshScope::Configuration).await?;
        }
        Ok(())
    }
}

fn store<T>(
    cache: &mut CachedList<T>,
    fetched: Result<Vec<T>, RemoteOperationError>,
    scope: RefreshScope,
) -> Result<(), RemoteOperationError> {
    match fetched {
        Ok(records) => {
            cache.replace(records);
            debug!(
                %scope,
                generation = cache.generation,
                records = cache.records.len(),
                "cache refreshed"
            );
            Ok(())
        }
        Err(err) => {
            cache.stale = true;
            warn!(%scope, error = %err, "cache refresh failed; keeping previous data");
            Err(err)
        }
    }
}
