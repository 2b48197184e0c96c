use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::catalog::FieldCatalogResolver;
use super::constraints::{
    AvailableOptions, ValidationError, ValueConstraintEngine, ValueParent, ValueViolation,
};
use super::domain::{
    ConfigurationId, EntityKind, FieldDataType, ItemDraft, ItemFieldProfile, ItemId,
    LeadFieldDescriptor, ScoringConfiguration, ScoringItem, ScoringValue, ValueId,
};
use super::gateway::{RemoteOperationError, ScoringGateway};
use super::guard::{SubmissionGuard, SubmissionTicket};
use super::navigation::{
    Navigation, NavigationEffect, NavigationError, NavigationIntent, Screen, Transition,
};
use super::notify::{Notification, Notifier};
use super::refresh::{FanOutPolicy, RefreshCoordinator, RefreshScope};

/// Intents raised by the surrounding views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    NewConfiguration,
    EditConfiguration { id: ConfigurationId },
    ViewItems { id: ConfigurationId },
    NewItem,
    EditItem { id: ItemId },
    OpenValues { item_id: ItemId },
    Back,
    Close,
}

/// Record targeted by a delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum EntityTarget {
    Configuration(ConfigurationId),
    Item(ItemId),
    Value(ValueId),
}

impl EntityTarget {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityTarget::Configuration(_) => EntityKind::Configuration,
            EntityTarget::Item(_) => EntityKind::Item,
            EntityTarget::Value(_) => EntityKind::Value,
        }
    }

    fn raw_id(&self) -> &str {
        match self {
            EntityTarget::Configuration(id) => &id.0,
            EntityTarget::Item(id) => &id.0,
            EntityTarget::Value(id) => &id.0,
        }
    }
}

/// Events raised outward to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PresentationEvent {
    ConfigurationSaved { id: ConfigurationId },
    ItemSaved,
    ValueSaved,
    NavigationCancelled,
    DeleteRequested { target: EntityTarget, label: String },
    DeleteConfirmed { target: EntityTarget },
}

/// Result of an operation that may be refused by a local rule.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Accepted(T),
    Rejected(ValidationError),
}

impl<T> Outcome<T> {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted(_))
    }

    pub fn rejection(&self) -> Option<&ValidationError> {
        match self {
            Outcome::Accepted(_) => None,
            Outcome::Rejected(error) => Some(error),
        }
    }
}

/// Configuration editor state.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigurationForm {
    pub record: ScoringConfiguration,
    created: bool,
}

impl ConfigurationForm {
    /// Whether the form was opened for a configuration that did not exist yet.
    pub fn is_new(&self) -> bool {
        self.created
    }
}

/// Value editor nested in the value list.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueForm {
    pub candidate: ScoringValue,
    pub options: AvailableOptions,
}

/// Parent field details and the open value editor for the value list.
#[derive(Debug, Clone, PartialEq)]
pub struct ValuePanel {
    pub item_id: ItemId,
    pub profile: ItemFieldProfile,
    pub form: Option<ValueForm>,
}

/// Delete awaiting user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub target: EntityTarget,
    pub label: String,
}

/// Error raised by the orchestrator; validation failures travel in [`Outcome`] instead.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Remote(#[from] RemoteOperationError),
    #[error("{kind} {id} was not found")]
    NotFound { kind: EntityKind, id: String },
    #[error(transparent)]
    Navigation(#[from] NavigationError),
    #[error("another save or delete is still in progress")]
    SubmissionInFlight,
    #[error("no delete is awaiting confirmation")]
    NoPendingDelete,
    #[error("no {0} form is open")]
    NoOpenForm(EntityKind),
}

/// Navigation state machine wired to the gateway, constraint engine, and refresh coordinator.
pub struct ConfigurationOrchestrator<G, N> {
    gateway: Arc<G>,
    notifier: Arc<N>,
    engine: ValueConstraintEngine,
    refresh: RefreshCoordinator<G>,
    navigation: Navigation,
    catalog: Option<FieldCatalogResolver>,
    configuration_form: Option<ConfigurationForm>,
    item_form: Option<ItemDraft>,
    value_panel: Option<ValuePanel>,
    pending_delete: Option<PendingDelete>,
    events: Vec<PresentationEvent>,
    guard: SubmissionGuard,
}

impl<G, N> ConfigurationOrchestrator<G, N>
where
    G: ScoringGateway + 'static,
    N: Notifier + 'static,
{
    pub fn new(gateway: Arc<G>, notifier: Arc<N>, policy: FanOutPolicy) -> Self {
        let refresh = RefreshCoordinator::new(Arc::clone(&gateway), policy);
        Self {
            gateway,
            notifier,
            engine: ValueConstraintEngine::new(),
            refresh,
            navigation: Navigation::closed(),
            catalog: None,
            configuration_form: None,
            item_form: None,
            value_panel: None,
            pending_delete: None,
            events: Vec::new(),
            guard: SubmissionGuard::default(),
        }
    }

    pub fn navigation(&self) -> &Navigation {
        &self.navigation
    }

    pub fn refresh(&self) -> &RefreshCoordinator<G> {
        &self.refresh
    }

    pub fn configurations(&self) -> &[ScoringConfiguration] {
        self.refresh.configurations().records()
    }

    pub fn items(&self) -> &[ScoringItem] {
        self.refresh.items().map(|list| list.records()).unwrap_or(&[])
    }

    pub fn values(&self) -> &[ScoringValue] {
        self.refresh.values().map(|list| list.records()).unwrap_or(&[])
    }

    pub fn catalog_fields(&self) -> &[LeadFieldDescriptor] {
        self.catalog
            .as_ref()
            .map(FieldCatalogResolver::fields)
            .unwrap_or(&[])
    }

    pub fn configuration_form(&self) -> Option<&ConfigurationForm> {
        self.configuration_form.as_ref()
    }

    pub fn configuration_form_mut(&mut self) -> Option<&mut ConfigurationForm> {
        self.configuration_form.as_mut()
    }

    pub fn item_form(&self) -> Option<&ItemDraft> {
        self.item_form.as_ref()
    }

    pub fn item_form_mut(&mut self) -> Option<&mut ItemDraft> {
        self.item_form.as_mut()
    }

    pub fn value_panel(&self) -> Option<&ValuePanel> {
        self.value_panel.as_ref()
    }

    pub fn value_form_mut(&mut self) -> Option<&mut ValueForm> {
        self.value_panel.as_mut().and_then(|panel| panel.form.as_mut())
    }

    pub fn pending_delete(&self) -> Option<&PendingDelete> {
        self.pending_delete.as_ref()
    }

    pub fn submission_guard(&self) -> SubmissionGuard {
        self.guard.clone()
    }

    pub fn take_events(&mut self) -> Vec<PresentationEvent> {
        std::mem::take(&mut self.events)
    }

    /// Whether the value list should offer "new value" right now.
    pub fn can_create_value(&self) -> bool {
        self.value_panel.as_ref().is_some_and(|panel| {
            self.engine
                .available_options(panel.profile.data_type, self.values(), &panel.profile.options)
                .admits_new_value()
        })
    }

    /// Initial fetch of the configuration list.
    pub async fn load(&mut self) -> Result<(), SessionError> {
        self.refresh
            .invalidate(RefreshScope::Configuration)
            .await
            .map_err(|err| self.report_remote("Could not load configurations", err))
    }

    pub async fn handle(&mut self, intent: Intent) -> Result<Outcome<()>, SessionError> {
        debug!(?intent, screen = self.navigation.screen().label(), "handling intent");
        match intent {
            Intent::NewConfiguration => {
                let transition = self.navigation.apply(&NavigationIntent::NewConfiguration)?;
                self.enter(transition).await;
                self.configuration_form = Some(ConfigurationForm {
                    record: ScoringConfiguration::default(),
                    created: true,
                });
            }
            Intent::EditConfiguration { id } => {
                let transition = self
                    .navigation
                    .apply(&NavigationIntent::EditConfiguration(id.clone()))?;
                let fetched = self.gateway.get_configuration(&id).await;
                let record = match fetched {
                    Ok(Some(record)) => record,
                    Ok(None) => {
                        return Err(self
                            .report_not_found(EntityKind::Configuration, &id.0)
                            .await)
                    }
                    Err(err) => {
                        return Err(self.report_remote("Could not load the configuration", err))
                    }
                };
                self.enter(transition).await;
                self.configuration_form = Some(ConfigurationForm {
                    record,
                    created: false,
                });
            }
            Intent::ViewItems { id } => {
                let transition = self
                    .navigation
                    .apply(&NavigationIntent::ViewItems(id.clone()))?;
                self.refresh.bind_items(&id);
                self.refresh
                    .invalidate(RefreshScope::Item)
                    .await
                    .map_err(|err| self.report_remote("Could not load fields", err))?;
                self.enter(transition).await;
            }
            Intent::NewItem => {
                let transition = self.navigation.apply(&NavigationIntent::NewItem)?;
                let configuration_id = transition
                    .next
                    .context()
                    .configuration_id
                    .clone()
                    .ok_or(SessionError::NoOpenForm(EntityKind::Configuration))?;
                self.ensure_catalog().await;
                let order = self.next_order(&configuration_id).await;
                self.enter(transition).await;
                self.item_form = Some(ItemDraft::new(configuration_id, order));
            }
            Intent::EditItem { id } => {
                let transition = self
                    .navigation
                    .apply(&NavigationIntent::EditItem(id.clone()))?;
                self.ensure_catalog().await;
                let fetched = self.gateway.get_item(&id).await;
                let item = match fetched {
                    Ok(Some(item)) => item,
                    Ok(None) => return Err(self.report_not_found(EntityKind::Item, &id.0).await),
                    Err(err) => return Err(self.report_remote("Could not load the field", err)),
                };
                self.enter(transition).await;
                self.item_form = Some(ItemDraft::from(item));
            }
            Intent::OpenValues { item_id } => return self.open_values(item_id).await,
            Intent::Back => {
                let transition = self.navigation.apply(&NavigationIntent::Back)?;
                self.enter(transition).await;
                self.events.push(PresentationEvent::NavigationCancelled);
            }
            Intent::Close => {
                let transition = self.navigation.apply(&NavigationIntent::Close)?;
                self.enter(transition).await;
                self.events.push(PresentationEvent::NavigationCancelled);
            }
        }
        Ok(Outcome::Accepted(()))
    }

    /// Bind the draft to a catalog field; unknown names leave it untouched.
    pub fn select_catalog_field(&mut self, api_name: &str) -> Option<LeadFieldDescriptor> {
        let draft = self.item_form.as_mut()?;
        let catalog = self.catalog.as_ref()?;
        catalog.apply_selection(draft, api_name).cloned()
    }

    pub async fn save_configuration(
        &mut self,
    ) -> Result<Outcome<ConfigurationId>, SessionError> {
        let _ticket = self.ticket()?;
        let form = self
            .configuration_form
            .as_ref()
            .ok_or(SessionError::NoOpenForm(EntityKind::Configuration))?;
        let created = form.created;
        let record = match self.engine.validate_configuration(&form.record) {
            Ok(record) => record,
            Err(violation) => return Ok(Outcome::Rejected(violation.into())),
        };

        let id = self
            .gateway
            .save_configuration(record)
            .await
            .map_err(|err| self.report_remote("Could not save the configuration", err))?;
        info!(%id, created, "configuration saved");
        if let Some(form) = self.configuration_form.as_mut() {
            form.record.id = Some(id.clone());
        }
        self.notifier
            .notify(Notification::success("Saved", "Configuration saved"));

        self.refresh
            .invalidate(RefreshScope::Configuration)
            .await
            .map_err(|err| self.report_remote("Could not refresh configurations", err))?;
        if created {
            self.refresh.bind_items(&id);
            self.refresh
                .invalidate(RefreshScope::Item)
                .await
                .map_err(|err| self.report_remote("Could not load fields", err))?;
        }

        let transition = self.navigation.apply(&NavigationIntent::ConfigurationSaved {
            id: id.clone(),
            created,
        })?;
        self.enter(transition).await;
        self.events
            .push(PresentationEvent::ConfigurationSaved { id: id.clone() });
        Ok(Outcome::Accepted(id))
    }

    pub async fn save_item(&mut self) -> Result<Outcome<ItemId>, SessionError> {
        let _ticket = self.ticket()?;
        let draft = self
            .item_form
            .as_ref()
            .ok_or(SessionError::NoOpenForm(EntityKind::Item))?;
        let record = match self.engine.validate_item(draft) {
            Ok(record) => record,
            Err(violation) => return Ok(Outcome::Rejected(violation.into())),
        };

        let id = self
            .gateway
            .save_item(record)
            .await
            .map_err(|err| self.report_remote("Could not save the field", err))?;
        info!(%id, "field saved");
        if let Some(draft) = self.item_form.as_mut() {
            draft.id = Some(id.clone());
        }
        self.notifier
            .notify(Notification::success("Saved", "Field saved"));

        self.refresh
            .invalidate(RefreshScope::Item)
            .await
            .map_err(|err| self.report_remote("Could not refresh fields", err))?;

        let transition = self.navigation.apply(&NavigationIntent::ItemSaved)?;
        self.enter(transition).await;
        self.events.push(PresentationEvent::ItemSaved);
        Ok(Outcome::Accepted(id))
    }

    /// Open the value editor for a new value (`None`) or an existing one.
    pub async fn open_value_form(
        &mut self,
        value_id: Option<ValueId>,
    ) -> Result<Outcome<()>, SessionError> {
        if self.value_panel.is_none() {
            return Err(SessionError::NoOpenForm(EntityKind::Value));
        }
        let existing = self.values().to_vec();
        if let Some(id) = &value_id {
            if !existing.iter().any(|value| value.id.as_ref() == Some(id)) {
                return Err(self.report_not_found(EntityKind::Value, &id.0).await);
            }
        }
        let panel = self
            .value_panel
            .as_mut()
            .ok_or(SessionError::NoOpenForm(EntityKind::Value))?;
        let profile = &panel.profile;

        let form = match value_id {
            Some(id) => {
                let candidate = existing
                    .iter()
                    .find(|value| value.id.as_ref() == Some(&id))
                    .cloned()
                    .ok_or_else(|| SessionError::NotFound {
                        kind: EntityKind::Value,
                        id: id.0.clone(),
                    })?;
                let others: Vec<ScoringValue> = existing
                    .into_iter()
                    .filter(|value| value.id.as_ref() != Some(&id))
                    .collect();
                let options =
                    self.engine
                        .available_options(profile.data_type, &others, &profile.options);
                ValueForm { candidate, options }
            }
            None => {
                let options = match self.engine.check_can_create(
                    profile.data_type,
                    &existing,
                    &profile.options,
                ) {
                    Ok(options) => options,
                    Err(violation) => {
                        self.notifier
                            .notify(Notification::warning("Not allowed", violation.to_string()));
                        return Ok(Outcome::Rejected(violation.into()));
                    }
                };
                let mut candidate = ScoringValue::blank(panel.item_id.clone());
                if let Some(first) = options.choices().first() {
                    match profile.data_type {
                        FieldDataType::Picklist => {
                            candidate.picklist_option = Some(first.value.clone())
                        }
                        _ => candidate.value_text = first.value.clone(),
                    }
                }
                ValueForm { candidate, options }
            }
        };

        panel.form = Some(form);
        Ok(Outcome::Accepted(()))
    }

    pub fn close_value_form(&mut self) {
        if let Some(panel) = self.value_panel.as_mut() {
            panel.form = None;
        }
    }

    pub async fn save_value(&mut self) -> Result<Outcome<ValueId>, SessionError> {
        let _ticket = self.ticket()?;
        let panel = self
            .value_panel
            .as_ref()
            .ok_or(SessionError::NoOpenForm(EntityKind::Value))?;
        let form = panel
            .form
            .as_ref()
            .ok_or(SessionError::NoOpenForm(EntityKind::Value))?;
        let parent = ValueParent {
            data_type: panel.profile.data_type,
            point_cap: panel.profile.point_cap,
            catalog_options: &panel.profile.options,
        };
        let record = match self
            .engine
            .validate_value(&form.candidate, &parent, self.values())
        {
            Ok(record) => record,
            Err(violation) => return Ok(Outcome::Rejected(violation.into())),
        };

        let id = self
            .gateway
            .save_value(record)
            .await
            .map_err(|err| self.report_remote("Could not save the value", err))?;
        info!(%id, "value saved");
        if let Some(form) = self.value_form_mut() {
            form.candidate.id = Some(id.clone());
        }
        self.notifier
            .notify(Notification::success("Saved", "Value saved"));

        self.refresh
            .invalidate(RefreshScope::Value)
            .await
            .map_err(|err| self.report_remote("Could not refresh values", err))?;
        self.refresh
            .invalidate(RefreshScope::Item)
            .await
            .map_err(|err| self.report_remote("Could not refresh fields", err))?;

        let transition = self.navigation.apply(&NavigationIntent::ValueSaved)?;
        self.enter(transition).await;
        self.events.push(PresentationEvent::ValueSaved);
        Ok(Outcome::Accepted(id))
    }

    /// First step of a delete: record the target and ask the user to confirm.
    pub fn request_delete(&mut self, target: EntityTarget) -> Result<(), SessionError> {
        let expected = match target.kind() {
            EntityKind::Configuration => Screen::Closed,
            EntityKind::Item => Screen::ItemList,
            EntityKind::Value => Screen::ValueList,
        };
        if self.navigation.screen() != expected {
            return Err(NavigationError::IntentNotAllowed {
                intent: "delete",
                screen: self.navigation.screen().label(),
            }
            .into());
        }

        let label = self.delete_label(&target);
        self.events.push(PresentationEvent::DeleteRequested {
            target: target.clone(),
            label: label.clone(),
        });
        self.pending_delete = Some(PendingDelete { target, label });
        Ok(())
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Issue the confirmed delete; a failure keeps the confirmation open for a retry.
    pub async fn confirm_delete(&mut self) -> Result<(), SessionError> {
        let _ticket = self.ticket()?;
        let pending = self
            .pending_delete
            .clone()
            .ok_or(SessionError::NoPendingDelete)?;
        let kind = pending.target.kind();

        let deleted = match &pending.target {
            EntityTarget::Configuration(id) => self.gateway.delete_configuration(id).await,
            EntityTarget::Item(id) => self.gateway.delete_item(id).await,
            EntityTarget::Value(id) => self.gateway.delete_value(id).await,
        };
        deleted.map_err(|err| self.report_remote("Could not delete", err))?;
        info!(%kind, id = pending.target.raw_id(), "record deleted");

        self.pending_delete = None;
        match &pending.target {
            EntityTarget::Item(id) if self.refresh.bound_item() == Some(id) => {
                self.refresh.release_values();
            }
            EntityTarget::Value(id) => {
                if let Some(panel) = self.value_panel.as_mut() {
                    let editing_deleted = panel
                        .form
                        .as_ref()
                        .is_some_and(|form| form.candidate.id.as_ref() == Some(id));
                    if editing_deleted {
                        panel.form = None;
                    }
                }
            }
            _ => {}
        }
        self.notifier.notify(Notification::success(
            "Deleted",
            format!("{} deleted", capitalize(kind.label())),
        ));
        self.events.push(PresentationEvent::DeleteConfirmed {
            target: pending.target,
        });

        self.refresh
            .invalidate_after_delete(kind)
            .await
            .map_err(|err| self.report_remote("Could not refresh after delete", err))
    }

    async fn open_values(&mut self, item_id: ItemId) -> Result<Outcome<()>, SessionError> {
        let transition = self
            .navigation
            .apply(&NavigationIntent::OpenValues(item_id.clone()))?;

        let Some(item) = self
            .items()
            .iter()
            .find(|item| item.id.as_ref() == Some(&item_id))
            .cloned()
        else {
            return Err(self.report_not_found(EntityKind::Item, &item_id.0).await);
        };
        if !self.engine.is_value_eligible_type(item.data_type) {
            let violation = ValueViolation::TypeForbidsValues {
                data_type: item.data_type,
            };
            self.notifier
                .notify(Notification::warning("Not allowed", violation.to_string()));
            return Ok(Outcome::Rejected(violation.into()));
        }

        let profile = match self.gateway.field_and_options_for_item(&item_id).await {
            Ok(profile) => profile,
            Err(err) => {
                // Distinguish a row deleted elsewhere from a transient failure.
                let lookup = self.gateway.get_item(&item_id).await;
                if let Ok(None) = lookup {
                    return Err(self.report_not_found(EntityKind::Item, &item_id.0).await);
                }
                return Err(self.report_remote("Could not load field details", err));
            }
        };
        self.refresh.bind_values(&item_id);
        self.refresh
            .invalidate(RefreshScope::Value)
            .await
            .map_err(|err| self.report_remote("Could not load values", err))?;

        self.enter(transition).await;
        self.value_panel = Some(ValuePanel {
            item_id,
            profile,
            form: None,
        });
        Ok(Outcome::Accepted(()))
    }

    /// Commit a transition: run its refresh effect first, then swap the navigation record.
    async fn enter(&mut self, transition: Transition) {
        let Transition { next, effect } = transition;
        if let Some(NavigationEffect::RefreshConfigurations) = effect {
            if let Err(err) = self.refresh.invalidate(RefreshScope::Configuration).await {
                self.report_remote("Could not refresh configurations", err);
            }
        }

        let screen = next.screen();
        if screen != Screen::Configuration {
            self.configuration_form = None;
        }
        if screen != Screen::ItemDetail {
            self.item_form = None;
        }
        if screen != Screen::ValueList {
            self.value_panel = None;
        }
        if screen == Screen::Closed {
            self.refresh.release_children();
        }
        self.pending_delete = None;
        self.navigation = next;
        info!(
            screen = screen.label(),
            depth = self.navigation.stack().len(),
            "navigation committed"
        );
    }

    fn ticket(&self) -> Result<SubmissionTicket, SessionError> {
        self.guard
            .try_acquire()
            .ok_or(SessionError::SubmissionInFlight)
    }

    async fn ensure_catalog(&mut self) {
        if self.catalog.is_some() {
            return;
        }
        match self.gateway.list_eligible_fields().await {
            Ok(fields) => self.catalog = Some(FieldCatalogResolver::new(fields)),
            Err(err) => {
                self.report_remote("Could not load lead fields", err);
            }
        }
    }

    async fn next_order(&self, configuration_id: &ConfigurationId) -> u32 {
        match self.gateway.next_order_index(configuration_id).await {
            Ok(0) => 1,
            Ok(order) => order,
            Err(err) => {
                warn!(%configuration_id, error = %err, "next order lookup failed; defaulting to 1");
                1
            }
        }
    }

    fn delete_label(&self, target: &EntityTarget) -> String {
        let found = match target {
            EntityTarget::Configuration(id) => self
                .configurations()
                .iter()
                .find(|record| record.id.as_ref() == Some(id))
                .map(|record| record.name.clone()),
            EntityTarget::Item(id) => self
                .items()
                .iter()
                .find(|record| record.id.as_ref() == Some(id))
                .map(|record| record.label.clone()),
            EntityTarget::Value(id) => self
                .values()
                .iter()
                .find(|record| record.id.as_ref() == Some(id))
                .map(ScoringValue::display_label),
        };
        found.unwrap_or_else(|| capitalize(target.kind().label()))
    }

    fn report_remote(&self, title: &str, err: RemoteOperationError) -> SessionError {
        warn!(%title, error = %err, "remote operation failed");
        self.notifier
            .notify(Notification::error(title, err.user_message()));
        SessionError::Remote(err)
    }

    /// Report a stale id and re-fetch the parent list it came from.
    async fn report_not_found(&mut self, kind: EntityKind, id: &str) -> SessionError {
        warn!(%kind, %id, "record not found");
        self.notifier.notify(Notification::error(
            "Not found",
            format!("The {kind} no longer exists."),
        ));
        if let Err(err) = self.refresh.invalidate(RefreshScope::from(kind)).await {
            self.report_remote("Could not refresh", err);
        }
        SessionError::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
