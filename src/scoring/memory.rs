use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use super::domain::{
    ConfigurationId, ItemFieldProfile, ItemId, LeadFieldDescriptor, PicklistOption,
    ScoringConfiguration, ScoringItem, ScoringValue, ValueId,
};
use super::gateway::{
    CatalogGateway, ConfigurationGateway, GatewayResult, ItemGateway, RemoteOperationError,
    ValueGateway,
};

/// Gateway operation names, used for failure injection and call accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GatewayCall {
    ListConfigurations,
    GetConfiguration,
    SaveConfiguration,
    DeleteConfiguration,
    ListItems,
    GetItem,
    NextOrderIndex,
    SaveItem,
    DeleteItem,
    ListValues,
    SaveValue,
    DeleteValue,
    ListEligibleFields,
    FieldAndOptions,
}

#[derive(Debug, Default)]
struct Store {
    configurations: BTreeMap<ConfigurationId, ScoringConfiguration>,
    items: BTreeMap<ItemId, ScoringItem>,
    values: BTreeMap<ValueId, ScoringValue>,
    catalog: Vec<LeadFieldDescriptor>,
    picklists: HashMap<String, Vec<PicklistOption>>,
    failures: HashMap<GatewayCall, RemoteOperationError>,
    calls: BTreeMap<GatewayCall, usize>,
}

/// Process-local stand-in for the remote scoring service.
#[derive(Debug, Default, Clone)]
pub struct InMemoryScoringGateway {
    store: Arc<Mutex<Store>>,
    sequence: Arc<AtomicU64>,
}

impl InMemoryScoringGateway {
    pub fn with_catalog(
        catalog: Vec<LeadFieldDescriptor>,
        picklists: HashMap<String, Vec<PicklistOption>>,
    ) -> Self {
        let gateway = Self::default();
        {
            let mut store = gateway.lock();
            store.catalog = catalog;
            store.picklists = picklists;
        }
        gateway
    }

    /// Make the next call of the given kind fail with the supplied error.
    pub fn fail_next(&self, call: GatewayCall, error: RemoteOperationError) {
        self.lock().failures.insert(call, error);
    }

    pub fn call_count(&self, call: GatewayCall) -> usize {
        self.lock().calls.get(&call).copied().unwrap_or(0)
    }

    pub fn configurations(&self) -> Vec<ScoringConfiguration> {
        self.lock().configurations.values().cloned().collect()
    }

    pub fn items(&self) -> Vec<ScoringItem> {
        self.lock().items.values().cloned().collect()
    }

    pub fn values(&self) -> Vec<ScoringValue> {
        self.lock().values.values().cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().expect("gateway mutex poisoned")
    }

    fn next_id(&self, prefix: &str) -> String {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{prefix}-{id:06}")
    }

    fn begin(&self, call: GatewayCall) -> Result<MutexGuard<'_, Store>, RemoteOperationError> {
        let mut store = self.lock();
        *store.calls.entry(call).or_default() += 1;
        match store.failures.remove(&call) {
            Some(error) => Err(error),
            None => Ok(store),
        }
    }
}

#[async_trait]
impl ConfigurationGateway for InMemoryScoringGateway {
    async fn list_configurations(&self) -> GatewayResult<Vec<ScoringConfiguration>> {
        let store = self.begin(GatewayCall::ListConfigurations)?;
        let mut records: Vec<_> = store.configurations.values().cloned().collect();
        records.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(records)
    }

    async fn get_configuration(
        &self,
        id: &ConfigurationId,
    ) -> GatewayResult<Option<ScoringConfiguration>> {
        let store = self.begin(GatewayCall::GetConfiguration)?;
        Ok(store.configurations.get(id).cloned())
    }

    async fn save_configuration(
        &self,
        mut record: ScoringConfiguration,
    ) -> GatewayResult<ConfigurationId> {
        let id = match record.id.clone() {
            Some(id) => id,
            None => ConfigurationId(self.next_id("cfg")),
        };
        let mut store = self.begin(GatewayCall::SaveConfiguration)?;
        if record.id.is_some() && !store.configurations.contains_key(&id) {
            return Err(RemoteOperationError::new(format!(
                "configuration {id} no longer exists"
            )));
        }
        record.id = Some(id.clone());
        store.configurations.insert(id.clone(), record);
        Ok(id)
    }

    async fn delete_configuration(&self, id: &ConfigurationId) -> GatewayResult<()> {
        let mut store = self.begin(GatewayCall::DeleteConfiguration)?;
        if store.configurations.remove(id).is_none() {
            return Err(RemoteOperationError::new(format!(
                "configuration {id} no longer exists"
            )));
        }
        let orphaned: Vec<ItemId> = store
            .items
            .iter()
            .filter(|(_, item)| &item.configuration_id == id)
            .map(|(item_id, _)| item_id.clone())
            .collect();
        for item_id in orphaned {
            store.items.remove(&item_id);
            store.values.retain(|_, value| value.item_id != item_id);
        }
        Ok(())
    }
}

#[async_trait]
impl ItemGateway for InMemoryScoringGateway {
    async fn list_items(
        &self,
        configuration_id: &ConfigurationId,
    ) -> GatewayResult<Vec<ScoringItem>> {
        let store = self.begin(GatewayCall::ListItems)?;
        let mut records: Vec<_> = store
            .items
            .values()
            .filter(|item| &item.configuration_id == configuration_id)
            .cloned()
            .collect();
        records.sort_by_key(|item| item.order);
        Ok(records)
    }

    async fn get_item(&self, id: &ItemId) -> GatewayResult<Option<ScoringItem>> {
        let store = self.begin(GatewayCall::GetItem)?;
        Ok(store.items.get(id).cloned())
    }

    async fn next_order_index(&self, configuration_id: &ConfigurationId) -> GatewayResult<u32> {
        let store = self.begin(GatewayCall::NextOrderIndex)?;
        let highest = store
            .items
            .values()
            .filter(|item| &item.configuration_id == configuration_id)
            .map(|item| item.order)
            .max()
            .unwrap_or(0);
        Ok(highest + 1)
    }

    async fn save_item(&self, mut record: ScoringItem) -> GatewayResult<ItemId> {
        let id = match record.id.clone() {
            Some(id) => id,
            None => ItemId(self.next_id("itm")),
        };
        let mut store = self.begin(GatewayCall::SaveItem)?;
        if !store.configurations.contains_key(&record.configuration_id) {
            return Err(RemoteOperationError::new(format!(
                "configuration {} no longer exists",
                record.configuration_id
            )));
        }
        record.id = Some(id.clone());
        store.items.insert(id.clone(), record);
        Ok(id)
    }

    async fn delete_item(&self, id: &ItemId) -> GatewayResult<()> {
        let mut store = self.begin(GatewayCall::DeleteItem)?;
        if store.items.remove(id).is_none() {
            return Err(RemoteOperationError::new(format!("field {id} no longer exists")));
        }
        store.values.retain(|_, value| &value.item_id != id);
        Ok(())
    }
}

#[async_trait]
impl ValueGateway for InMemoryScoringGateway {
    async fn list_values(&self, item_id: &ItemId) -> GatewayResult<Vec<ScoringValue>> {
        let store = self.begin(GatewayCall::ListValues)?;
        Ok(store
            .values
            .values()
            .filter(|value| &value.item_id == item_id)
            .cloned()
            .collect())
    }

    async fn save_value(&self, mut record: ScoringValue) -> GatewayResult<ValueId> {
        let id = match record.id.clone() {
            Some(id) => id,
            None => ValueId(self.next_id("val")),
        };
        let mut store = self.begin(GatewayCall::SaveValue)?;
        if !store.items.contains_key(&record.item_id) {
            return Err(RemoteOperationError::new(format!(
                "field {} no longer exists",
                record.item_id
            )));
        }
        record.id = Some(id.clone());
        store.values.insert(id.clone(), record);
        Ok(id)
    }

    async fn delete_value(&self, id: &ValueId) -> GatewayResult<()> {
        let mut store = self.begin(GatewayCall::DeleteValue)?;
        match store.values.remove(id) {
            Some(_) => Ok(()),
            None => Err(RemoteOperationError::new(format!("value {id} no longer exists"))),
        }
    }
}

#[async_trait]
impl CatalogGateway for InMemoryScoringGateway {
    async fn list_eligible_fields(&self) -> GatewayResult<Vec<LeadFieldDescriptor>> {
        let store = self.begin(GatewayCall::ListEligibleFields)?;
        Ok(store.catalog.clone())
    }

    async fn field_and_options_for_item(
        &self,
        item_id: &ItemId,
    ) -> GatewayResult<ItemFieldProfile> {
        let store = self.begin(GatewayCall::FieldAndOptions)?;
        let item = store.items.get(item_id).ok_or_else(|| {
            RemoteOperationError::new(format!("field {item_id} no longer exists"))
        })?;
        let options = store
            .picklists
            .get(&item.field_api_name)
            .cloned()
            .unwrap_or_default();
        Ok(ItemFieldProfile {
            data_type: item.data_type,
            point_cap: item.point_cap,
            options,
        })
    }
}
