use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::scoring::domain::{
    ConfigurationId, FieldDataType, ItemId, LeadFieldDescriptor, PicklistOption,
    ScoringConfiguration, ScoringItem, ScoringValue, ValueId,
};
use crate::scoring::memory::InMemoryScoringGateway;
use crate::scoring::notify::{Notification, NotificationLevel, Notifier};
use crate::scoring::orchestrator::{ConfigurationOrchestrator, Intent, Outcome};
use crate::scoring::refresh::FanOutPolicy;

pub(super) type Console = ConfigurationOrchestrator<InMemoryScoringGateway, RecordingNotifier>;

#[derive(Default)]
pub(super) struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub(super) fn sent(&self) -> Vec<Notification> {
        self.sent.lock().expect("notifier mutex poisoned").clone()
    }

    pub(super) fn last(&self) -> Option<Notification> {
        self.sent().last().cloned()
    }

    pub(super) fn count(&self, level: NotificationLevel) -> usize {
        self.sent()
            .iter()
            .filter(|notification| notification.level == level)
            .count()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.sent
            .lock()
            .expect("notifier mutex poisoned")
            .push(notification);
    }
}

pub(super) fn field(api_name: &str, label: &str, data_type: FieldDataType) -> LeadFieldDescriptor {
    LeadFieldDescriptor {
        api_name: api_name.to_string(),
        label: label.to_string(),
        data_type,
    }
}

pub(super) fn rating_options() -> Vec<PicklistOption> {
    vec![
        PicklistOption::new("Hot", "Hot"),
        PicklistOption::new("Warm", "Warm"),
        PicklistOption::new("Cold", "Cold"),
    ]
}

pub(super) fn gateway() -> InMemoryScoringGateway {
    let catalog = vec![
        field("AnnualRevenue", "Annual Revenue (USD)", FieldDataType::Number),
        field("Rating", "Rating", FieldDataType::Picklist),
        field("HasOptedOutOfEmail", "Email Opt Out", FieldDataType::Checkbox),
        field("Email", "Email", FieldDataType::Email),
    ];
    let mut picklists = HashMap::new();
    picklists.insert("Rating".to_string(), rating_options());
    InMemoryScoringGateway::with_catalog(catalog, picklists)
}

pub(super) fn console_with(
    gateway: &InMemoryScoringGateway,
    policy: FanOutPolicy,
) -> (Console, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::default());
    let console = ConfigurationOrchestrator::new(
        Arc::new(gateway.clone()),
        Arc::clone(&notifier),
        policy,
    );
    (console, notifier)
}

pub(super) fn console(gateway: &InMemoryScoringGateway) -> (Console, Arc<RecordingNotifier>) {
    console_with(gateway, FanOutPolicy::default())
}

pub(super) fn value(item: &str, text: &str, option: Option<&str>, score: f64) -> ScoringValue {
    ScoringValue {
        id: None,
        item_id: ItemId(item.to_string()),
        value_text: text.to_string(),
        picklist_option: option.map(str::to_string),
        score,
        exact_match: false,
        active: true,
    }
}

pub(super) fn stored_value(id: &str, item: &str, text: &str, option: Option<&str>) -> ScoringValue {
    let mut record = value(item, text, option, 1.0);
    record.id = Some(ValueId(id.to_string()));
    record
}

pub(super) fn item(configuration: &ConfigurationId, data_type: FieldDataType) -> ScoringItem {
    ScoringItem {
        id: None,
        configuration_id: configuration.clone(),
        label: data_type.label().to_string(),
        field_api_name: format!("{}Field", data_type.label()),
        data_type,
        point_cap: 10.0,
        order: 1,
        active: true,
        description: String::new(),
        agent_question: String::new(),
    }
}

/// Create a configuration through the console and land on its item list.
pub(super) async fn create_configuration(console: &mut Console, name: &str) -> ConfigurationId {
    console
        .handle(Intent::NewConfiguration)
        .await
        .expect("new configuration opens");
    console
        .configuration_form_mut()
        .expect("configuration form open")
        .record = ScoringConfiguration {
        id: None,
        name: name.to_string(),
        active: true,
        description: String::new(),
    };
    match console
        .save_configuration()
        .await
        .expect("configuration saves")
    {
        Outcome::Accepted(id) => id,
        other => panic!("expected accepted configuration, got {other:?}"),
    }
}

/// Add an item from the catalog while on the item list.
pub(super) async fn add_item(console: &mut Console, api_name: &str, point_cap: f64) -> ItemId {
    console
        .handle(Intent::NewItem)
        .await
        .expect("new item opens");
    console
        .select_catalog_field(api_name)
        .expect("catalog field exists");
    console.item_form_mut().expect("item form open").point_cap = point_cap;
    match console.save_item().await.expect("item saves") {
        Outcome::Accepted(id) => id,
        other => panic!("expected accepted item, got {other:?}"),
    }
}
