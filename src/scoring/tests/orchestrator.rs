use crate::scoring::constraints::{ItemViolation, ValidationError, ValueViolation};
use crate::scoring::domain::{ConfigurationId, EntityKind, FieldDataType, ItemId, ValueId};
use crate::scoring::gateway::{ItemGateway, RemoteOperationError, GENERIC_FAILURE_MESSAGE};
use crate::scoring::memory::GatewayCall;
use crate::scoring::navigation::{NavigationError, Screen};
use crate::scoring::notify::NotificationLevel;
use crate::scoring::orchestrator::{EntityTarget, Intent, Outcome, PresentationEvent, SessionError};
use crate::scoring::refresh::FanOutPolicy;

use super::common::{add_item, console, console_with, create_configuration, gateway};

#[tokio::test]
async fn creating_a_configuration_lands_on_its_item_list() {
    let gateway = gateway();
    let (mut console, notifier) = console(&gateway);
    console.load().await.expect("initial load");

    let id = create_configuration(&mut console, "Q1 Leads").await;

    let navigation = console.navigation();
    assert_eq!(navigation.screen(), Screen::ItemList);
    assert_eq!(navigation.context().configuration_id, Some(id.clone()));
    assert!(navigation.stack().is_empty());
    assert!(!navigation.back_available());
    assert!(console.configuration_form().is_none());
    assert_eq!(console.configurations().len(), 1);
    assert_eq!(console.configurations()[0].name, "Q1 Leads");
    assert_eq!(console.refresh().bound_configuration(), Some(&id));
    assert_eq!(
        console.take_events(),
        vec![PresentationEvent::ConfigurationSaved { id }]
    );
    assert_eq!(notifier.count(NotificationLevel::Success), 1);
}

#[tokio::test]
async fn number_values_are_capped_by_the_item_point_cap() {
    let gateway = gateway();
    let (mut console, _) = console(&gateway);
    create_configuration(&mut console, "Q1 Leads").await;
    let revenue = add_item(&mut console, "AnnualRevenue", 10.0).await;
    assert_eq!(console.items()[0].label, "Annual Revenue");
    assert_eq!(console.items()[0].order, 1);

    console
        .handle(Intent::OpenValues {
            item_id: revenue.clone(),
        })
        .await
        .expect("values open");
    assert_eq!(console.navigation().screen(), Screen::ValueList);
    console.open_value_form(None).await.expect("value form opens");
    let form = console.value_form_mut().expect("value form open");
    form.candidate.value_text = "1000000".to_string();
    form.candidate.score = 15.0;

    match console.save_value().await.expect("no remote failure") {
        Outcome::Rejected(ValidationError::Value(ValueViolation::ScoreExceedsCap {
            score,
            cap,
        })) => {
            assert_eq!(score, 15.0);
            assert_eq!(cap, 10.0);
        }
        other => panic!("expected cap rejection, got {other:?}"),
    }
    assert_eq!(gateway.call_count(GatewayCall::SaveValue), 0);
    assert_eq!(console.navigation().screen(), Screen::ValueList);

    console.value_form_mut().expect("form still open").candidate.score = 10.0;
    match console.save_value().await.expect("value saves") {
        Outcome::Accepted(_) => {}
        other => panic!("expected accepted value, got {other:?}"),
    }
    assert_eq!(console.navigation().screen(), Screen::ItemList);
    assert!(console.navigation().stack().is_empty());
    assert_eq!(gateway.values().len(), 1);
    assert_eq!(gateway.values()[0].item_id, revenue);
}

#[tokio::test]
async fn checkbox_rejects_a_second_true_value() {
    let gateway = gateway();
    let (mut console, _) = console(&gateway);
    create_configuration(&mut console, "Q1 Leads").await;
    let opt_out = add_item(&mut console, "HasOptedOutOfEmail", 5.0).await;

    console
        .handle(Intent::OpenValues {
            item_id: opt_out.clone(),
        })
        .await
        .expect("values open");
    console.open_value_form(None).await.expect("value form opens");
    let form = console.value_form_mut().expect("value form open");
    assert_eq!(form.candidate.value_text, "TRUE");
    form.candidate.score = 5.0;
    match console.save_value().await.expect("value saves") {
        Outcome::Accepted(_) => {}
        other => panic!("expected accepted value, got {other:?}"),
    }
    assert!(gateway.values()[0].exact_match);

    console
        .handle(Intent::OpenValues { item_id: opt_out })
        .await
        .expect("values reopen");
    console.open_value_form(None).await.expect("value form opens");
    let form = console.value_form_mut().expect("value form open");
    assert_eq!(form.options.choices().len(), 1);
    assert_eq!(form.candidate.value_text, "FALSE");
    form.candidate.value_text = "TRUE".to_string();

    match console.save_value().await.expect("no remote failure") {
        Outcome::Rejected(ValidationError::Value(ValueViolation::OptionAlreadyConfigured {
            option,
        })) => assert_eq!(option, "TRUE"),
        other => panic!("expected duplicate rejection, got {other:?}"),
    }
    assert_eq!(gateway.values().len(), 1);
}

#[tokio::test]
async fn exhausted_checkbox_refuses_to_open_a_new_value_form() {
    let gateway = gateway();
    let (mut console, notifier) = console(&gateway);
    create_configuration(&mut console, "Q1 Leads").await;
    let opt_out = add_item(&mut console, "HasOptedOutOfEmail", 5.0).await;

    for _ in 0..2 {
        console
            .handle(Intent::OpenValues {
                item_id: opt_out.clone(),
            })
            .await
            .expect("values open");
        console.open_value_form(None).await.expect("value form opens");
        match console.save_value().await.expect("value saves") {
            Outcome::Accepted(_) => {}
            other => panic!("expected accepted value, got {other:?}"),
        }
    }

    console
        .handle(Intent::OpenValues { item_id: opt_out })
        .await
        .expect("values open");
    assert!(!console.can_create_value());
    match console.open_value_form(None).await.expect("no session failure") {
        Outcome::Rejected(ValidationError::Value(ValueViolation::NoOptionsRemaining)) => {}
        other => panic!("expected no options remaining, got {other:?}"),
    }
    assert_eq!(
        notifier.last().map(|notification| notification.level),
        Some(NotificationLevel::Warning)
    );
}

#[tokio::test]
async fn presence_scored_items_never_open_values() {
    let gateway = gateway();
    let (mut console, notifier) = console(&gateway);
    create_configuration(&mut console, "Q1 Leads").await;
    let email = add_item(&mut console, "Email", 3.0).await;

    match console
        .handle(Intent::OpenValues { item_id: email })
        .await
        .expect("no session failure")
    {
        Outcome::Rejected(ValidationError::Value(ValueViolation::TypeForbidsValues {
            data_type,
        })) => assert_eq!(data_type, FieldDataType::Email),
        other => panic!("expected forbidden type, got {other:?}"),
    }
    assert_eq!(console.navigation().screen(), Screen::ItemList);
    assert!(console.value_panel().is_none());
    assert_eq!(gateway.call_count(GatewayCall::FieldAndOptions), 0);
    assert_eq!(notifier.count(NotificationLevel::Warning), 1);
}

#[tokio::test]
async fn picklist_form_preselects_the_first_open_option() {
    let gateway = gateway();
    let (mut console, _) = console(&gateway);
    create_configuration(&mut console, "Q1 Leads").await;
    let rating = add_item(&mut console, "Rating", 8.0).await;

    console
        .handle(Intent::OpenValues {
            item_id: rating.clone(),
        })
        .await
        .expect("values open");
    console.open_value_form(None).await.expect("value form opens");
    let form = console.value_form_mut().expect("value form open");
    assert_eq!(form.candidate.picklist_option.as_deref(), Some("Hot"));
    form.candidate.score = 8.0;
    match console.save_value().await.expect("value saves") {
        Outcome::Accepted(_) => {}
        other => panic!("expected accepted value, got {other:?}"),
    }
    assert_eq!(gateway.values()[0].value_text, "Hot");

    console
        .handle(Intent::OpenValues { item_id: rating })
        .await
        .expect("values open");
    console.open_value_form(None).await.expect("value form opens");
    let form = console.value_form_mut().expect("value form open");
    assert_eq!(form.candidate.picklist_option.as_deref(), Some("Warm"));

    console.close_value_form();
    assert!(console.value_form_mut().is_none());
    assert!(console.value_panel().is_some());
}

#[tokio::test]
async fn item_validation_blocks_the_gateway() {
    let gateway = gateway();
    let (mut console, _) = console(&gateway);
    create_configuration(&mut console, "Q1 Leads").await;

    console.handle(Intent::NewItem).await.expect("item form opens");
    assert_eq!(console.navigation().title(), "New Field");
    assert!(console.navigation().back_available());
    match console.save_item().await.expect("no remote failure") {
        Outcome::Rejected(ValidationError::Item(ItemViolation::MissingField)) => {}
        other => panic!("expected missing field, got {other:?}"),
    }
    assert_eq!(gateway.call_count(GatewayCall::SaveItem), 0);
    assert_eq!(console.navigation().screen(), Screen::ItemDetail);
}

#[tokio::test]
async fn new_items_take_the_next_order_index() {
    let gateway = gateway();
    let (mut console, _) = console(&gateway);
    create_configuration(&mut console, "Q1 Leads").await;
    add_item(&mut console, "AnnualRevenue", 10.0).await;
    add_item(&mut console, "Rating", 8.0).await;

    let orders: Vec<u32> = console.items().iter().map(|item| item.order).collect();
    assert_eq!(orders, vec![1, 2]);

    gateway.fail_next(
        GatewayCall::NextOrderIndex,
        RemoteOperationError::without_message(),
    );
    console.handle(Intent::NewItem).await.expect("item form opens");
    assert_eq!(console.item_form().map(|draft| draft.order), Some(1));
}

#[tokio::test]
async fn editing_a_configuration_closes_after_save() {
    let gateway = gateway();
    let (mut console, _) = console(&gateway);
    let id = create_configuration(&mut console, "Q1 Leads").await;
    console.handle(Intent::Close).await.expect("console closes");
    console.take_events();

    console
        .handle(Intent::EditConfiguration { id: id.clone() })
        .await
        .expect("edit form opens");
    let form = console.configuration_form_mut().expect("form open");
    assert!(!form.is_new());
    form.record.name = "Q2 Leads".to_string();
    match console.save_configuration().await.expect("save succeeds") {
        Outcome::Accepted(saved) => assert_eq!(saved, id),
        other => panic!("expected accepted configuration, got {other:?}"),
    }

    assert!(console.navigation().is_closed());
    assert!(console.navigation().context().is_empty());
    assert_eq!(console.configurations()[0].name, "Q2 Leads");
    assert_eq!(gateway.configurations().len(), 1);
}

#[tokio::test]
async fn remote_failures_are_reported_verbatim_and_keep_navigation() {
    let gateway = gateway();
    let (mut console, notifier) = console(&gateway);
    create_configuration(&mut console, "Q1 Leads").await;
    console.handle(Intent::NewItem).await.expect("item form opens");
    console
        .select_catalog_field("AnnualRevenue")
        .expect("catalog field exists");

    gateway.fail_next(
        GatewayCall::SaveItem,
        RemoteOperationError::new("FIELD_CUSTOM_VALIDATION_EXCEPTION: cap too high"),
    );
    match console.save_item().await {
        Err(SessionError::Remote(_)) => {}
        other => panic!("expected remote failure, got {other:?}"),
    }
    let last = notifier.last().expect("failure notified");
    assert_eq!(last.level, NotificationLevel::Error);
    assert_eq!(
        last.message,
        "FIELD_CUSTOM_VALIDATION_EXCEPTION: cap too high"
    );
    assert_eq!(console.navigation().screen(), Screen::ItemDetail);
    assert!(console.item_form().is_some());

    gateway.fail_next(GatewayCall::SaveItem, RemoteOperationError::without_message());
    match console.save_item().await {
        Err(SessionError::Remote(_)) => {}
        other => panic!("expected remote failure, got {other:?}"),
    }
    assert_eq!(
        notifier.last().map(|notification| notification.message),
        Some(GENERIC_FAILURE_MESSAGE.to_string())
    );

    match console.save_item().await.expect("retry succeeds") {
        Outcome::Accepted(_) => {}
        other => panic!("expected accepted item, got {other:?}"),
    }
    assert_eq!(console.navigation().screen(), Screen::ItemList);
}

#[tokio::test]
async fn failed_refresh_after_save_does_not_duplicate_on_retry() {
    let gateway = gateway();
    let (mut console, _) = console(&gateway);
    create_configuration(&mut console, "Q1 Leads").await;
    console.handle(Intent::NewItem).await.expect("item form opens");
    console
        .select_catalog_field("Rating")
        .expect("catalog field exists");

    gateway.fail_next(
        GatewayCall::ListItems,
        RemoteOperationError::new("timeout"),
    );
    match console.save_item().await {
        Err(SessionError::Remote(_)) => {}
        other => panic!("expected refresh failure, got {other:?}"),
    }
    assert_eq!(console.navigation().screen(), Screen::ItemDetail);
    assert!(console
        .item_form()
        .and_then(|draft| draft.id.as_ref())
        .is_some());

    match console.save_item().await.expect("retry succeeds") {
        Outcome::Accepted(_) => {}
        other => panic!("expected accepted item, got {other:?}"),
    }
    assert_eq!(gateway.items().len(), 1);
}

#[tokio::test]
async fn stale_ids_report_not_found_and_stay_on_the_parent() {
    let gateway = gateway();
    let (mut console, notifier) = console(&gateway);
    create_configuration(&mut console, "Q1 Leads").await;
    let before = gateway.call_count(GatewayCall::ListItems);

    match console
        .handle(Intent::EditItem {
            id: ItemId("itm-999999".to_string()),
        })
        .await
    {
        Err(SessionError::NotFound { kind, id }) => {
            assert_eq!(kind, EntityKind::Item);
            assert_eq!(id, "itm-999999");
        }
        other => panic!("expected not found, got {other:?}"),
    }
    assert_eq!(console.navigation().screen(), Screen::ItemList);
    assert_eq!(gateway.call_count(GatewayCall::ListItems), before + 1);
    assert_eq!(
        notifier.last().map(|notification| notification.level),
        Some(NotificationLevel::Error)
    );

    console.handle(Intent::Close).await.expect("console closes");
    match console
        .handle(Intent::EditConfiguration {
            id: ConfigurationId("cfg-999999".to_string()),
        })
        .await
    {
        Err(SessionError::NotFound { kind, .. }) => assert_eq!(kind, EntityKind::Configuration),
        other => panic!("expected not found, got {other:?}"),
    }
    assert!(console.navigation().is_closed());
}

#[tokio::test]
async fn stale_value_id_reports_not_found_and_refetches_values() {
    let gateway = gateway();
    let (mut console, notifier) = console(&gateway);
    create_configuration(&mut console, "Q1 Leads").await;
    let rating = add_item(&mut console, "Rating", 8.0).await;
    console
        .handle(Intent::OpenValues { item_id: rating })
        .await
        .expect("values open");
    let listed = gateway.call_count(GatewayCall::ListValues);
    let errors = notifier.count(NotificationLevel::Error);

    match console
        .open_value_form(Some(ValueId("val-999999".to_string())))
        .await
    {
        Err(SessionError::NotFound { kind, id }) => {
            assert_eq!(kind, EntityKind::Value);
            assert_eq!(id, "val-999999");
        }
        other => panic!("expected not found, got {other:?}"),
    }
    assert_eq!(console.navigation().screen(), Screen::ValueList);
    assert!(console.value_form_mut().is_none());
    assert_eq!(gateway.call_count(GatewayCall::ListValues), listed + 1);
    assert_eq!(notifier.count(NotificationLevel::Error), errors + 1);
}

#[tokio::test]
async fn opening_values_of_an_item_deleted_elsewhere_refetches_items() {
    let gateway = gateway();
    let (mut console, notifier) = console(&gateway);
    create_configuration(&mut console, "Q1 Leads").await;
    let revenue = add_item(&mut console, "AnnualRevenue", 10.0).await;

    gateway.fail_next(
        GatewayCall::FieldAndOptions,
        RemoteOperationError::new("timeout"),
    );
    match console
        .handle(Intent::OpenValues {
            item_id: revenue.clone(),
        })
        .await
    {
        Err(SessionError::Remote(err)) => assert_eq!(err.user_message(), "timeout"),
        other => panic!("expected transient failure, got {other:?}"),
    }
    assert_eq!(console.items().len(), 1);

    gateway
        .delete_item(&revenue)
        .await
        .expect("another session deletes the item");
    let listed = gateway.call_count(GatewayCall::ListItems);
    match console
        .handle(Intent::OpenValues {
            item_id: revenue.clone(),
        })
        .await
    {
        Err(SessionError::NotFound { kind, id }) => {
            assert_eq!(kind, EntityKind::Item);
            assert_eq!(id, revenue.0);
        }
        other => panic!("expected not found, got {other:?}"),
    }
    assert_eq!(console.navigation().screen(), Screen::ItemList);
    assert_eq!(gateway.call_count(GatewayCall::ListItems), listed + 1);
    assert!(console.items().is_empty());
    assert_eq!(
        notifier.last().map(|notification| notification.title),
        Some("Not found".to_string())
    );
}

#[tokio::test]
async fn deleting_the_value_being_edited_closes_its_form() {
    let gateway = gateway();
    let (mut console, _) = console(&gateway);
    create_configuration(&mut console, "Q1 Leads").await;
    let rating = add_item(&mut console, "Rating", 8.0).await;
    console
        .handle(Intent::OpenValues {
            item_id: rating.clone(),
        })
        .await
        .expect("values open");
    console.open_value_form(None).await.expect("value form opens");
    console.value_form_mut().expect("value form open").candidate.score = 5.0;
    let hot = match console.save_value().await.expect("value saves") {
        Outcome::Accepted(id) => id,
        other => panic!("expected accepted value, got {other:?}"),
    };

    console
        .handle(Intent::OpenValues { item_id: rating })
        .await
        .expect("values reopen");
    console
        .open_value_form(Some(hot.clone()))
        .await
        .expect("existing value opens");
    console
        .request_delete(EntityTarget::Value(hot))
        .expect("delete requested from value list");
    console.confirm_delete().await.expect("delete succeeds");

    assert!(console.value_form_mut().is_none());
    assert!(console.values().is_empty());
    match console.save_value().await {
        Err(SessionError::NoOpenForm(EntityKind::Value)) => {}
        other => panic!("expected no open form, got {other:?}"),
    }
    assert!(gateway.values().is_empty());
}

#[tokio::test]
async fn saving_a_value_refetches_the_item_list_it_returns_to() {
    let gateway = gateway();
    let (mut console, _) = console(&gateway);
    create_configuration(&mut console, "Q1 Leads").await;
    let revenue = add_item(&mut console, "AnnualRevenue", 10.0).await;
    console
        .handle(Intent::OpenValues { item_id: revenue })
        .await
        .expect("values open");
    console.open_value_form(None).await.expect("value form opens");
    let form = console.value_form_mut().expect("value form open");
    form.candidate.value_text = "500000".to_string();
    form.candidate.score = 4.0;
    let listed = gateway.call_count(GatewayCall::ListItems);
    let generation = console.refresh().items().map(|list| list.generation());

    match console.save_value().await.expect("value saves") {
        Outcome::Accepted(_) => {}
        other => panic!("expected accepted value, got {other:?}"),
    }
    assert_eq!(console.navigation().screen(), Screen::ItemList);
    assert_eq!(gateway.call_count(GatewayCall::ListItems), listed + 1);
    assert_eq!(
        console.refresh().items().map(|list| list.generation()),
        generation.map(|value| value + 1)
    );
}

#[tokio::test]
async fn held_ticket_blocks_a_second_submission() {
    let gateway = gateway();
    let (mut console, _) = console(&gateway);
    console
        .handle(Intent::NewConfiguration)
        .await
        .expect("form opens");
    console
        .configuration_form_mut()
        .expect("form open")
        .record
        .name = "Q1 Leads".to_string();

    let guard = console.submission_guard();
    let ticket = guard.try_acquire().expect("guard starts free");
    assert!(guard.is_busy());
    match console.save_configuration().await {
        Err(SessionError::SubmissionInFlight) => {}
        other => panic!("expected in-flight refusal, got {other:?}"),
    }
    assert_eq!(gateway.call_count(GatewayCall::SaveConfiguration), 0);

    drop(ticket);
    match console.save_configuration().await.expect("save succeeds") {
        Outcome::Accepted(_) => {}
        other => panic!("expected accepted configuration, got {other:?}"),
    }
    assert!(!guard.is_busy());
}

#[tokio::test]
async fn delete_flow_confirms_and_refreshes_the_scope() {
    let gateway = gateway();
    let (mut console, _) = console(&gateway);
    create_configuration(&mut console, "Q1 Leads").await;
    let revenue = add_item(&mut console, "AnnualRevenue", 10.0).await;
    console.take_events();

    console
        .request_delete(EntityTarget::Item(revenue.clone()))
        .expect("delete requested from item list");
    let pending = console.pending_delete().expect("delete pending");
    assert_eq!(pending.label, "Annual Revenue");
    assert_eq!(
        console.take_events(),
        vec![PresentationEvent::DeleteRequested {
            target: EntityTarget::Item(revenue.clone()),
            label: "Annual Revenue".to_string(),
        }]
    );

    gateway.fail_next(
        GatewayCall::DeleteItem,
        RemoteOperationError::new("ENTITY_IS_LOCKED"),
    );
    match console.confirm_delete().await {
        Err(SessionError::Remote(err)) => assert_eq!(err.user_message(), "ENTITY_IS_LOCKED"),
        other => panic!("expected remote failure, got {other:?}"),
    }
    assert!(console.pending_delete().is_some());

    console.confirm_delete().await.expect("delete succeeds");
    assert!(console.pending_delete().is_none());
    assert!(console.items().is_empty());
    assert!(gateway.items().is_empty());
    assert_eq!(
        console.take_events(),
        vec![PresentationEvent::DeleteConfirmed {
            target: EntityTarget::Item(revenue),
        }]
    );

    match console.confirm_delete().await {
        Err(SessionError::NoPendingDelete) => {}
        other => panic!("expected no pending delete, got {other:?}"),
    }
}

#[tokio::test]
async fn delete_requests_are_scoped_to_their_list_view() {
    let gateway = gateway();
    let (mut console, _) = console(&gateway);
    let id = create_configuration(&mut console, "Q1 Leads").await;

    match console.request_delete(EntityTarget::Configuration(id.clone())) {
        Err(SessionError::Navigation(NavigationError::IntentNotAllowed { screen, .. })) => {
            assert_eq!(screen, "item_list")
        }
        other => panic!("expected scoped refusal, got {other:?}"),
    }

    console.handle(Intent::Close).await.expect("console closes");
    console
        .request_delete(EntityTarget::Configuration(id))
        .expect("configuration delete from the top list");
    console.cancel_delete();
    assert!(console.pending_delete().is_none());
}

#[tokio::test]
async fn configuration_delete_cascades_and_fans_out() {
    let gateway = gateway();
    let policy = FanOutPolicy {
        refresh_parent_on_child_delete: true,
    };
    let (mut console, _) = console_with(&gateway, policy);
    let id = create_configuration(&mut console, "Q1 Leads").await;
    let rating = add_item(&mut console, "Rating", 8.0).await;

    console
        .handle(Intent::OpenValues {
            item_id: rating.clone(),
        })
        .await
        .expect("values open");
    console.open_value_form(None).await.expect("value form opens");
    match console.save_value().await.expect("value saves") {
        Outcome::Accepted(_) => {}
        other => panic!("expected accepted value, got {other:?}"),
    }

    console
        .handle(Intent::OpenValues { item_id: rating })
        .await
        .expect("values open");
    let value_id = console.values()[0].id.clone().expect("saved value has id");
    console
        .request_delete(EntityTarget::Value(value_id))
        .expect("value delete from value list");
    assert_eq!(console.pending_delete().map(|p| p.label.as_str()), Some("Hot"));
    let listed = gateway.call_count(GatewayCall::ListConfigurations);
    console.confirm_delete().await.expect("value deleted");
    assert!(console.values().is_empty());
    assert_eq!(gateway.call_count(GatewayCall::ListConfigurations), listed + 1);

    console.handle(Intent::Close).await.expect("console closes");
    assert!(console.refresh().bound_configuration().is_none());
    console
        .request_delete(EntityTarget::Configuration(id))
        .expect("configuration delete requested");
    console.confirm_delete().await.expect("configuration deleted");
    assert!(console.configurations().is_empty());
    assert!(gateway.items().is_empty());
    assert!(gateway.values().is_empty());
}

#[tokio::test]
async fn back_from_values_pops_to_items_and_close_resets() {
    let gateway = gateway();
    let (mut console, _) = console(&gateway);
    create_configuration(&mut console, "Q1 Leads").await;
    let revenue = add_item(&mut console, "AnnualRevenue", 10.0).await;
    console.take_events();

    console
        .handle(Intent::OpenValues { item_id: revenue })
        .await
        .expect("values open");
    assert!(console.navigation().back_available());
    assert!(console.value_panel().is_some());

    console.handle(Intent::Back).await.expect("back succeeds");
    assert_eq!(console.navigation().screen(), Screen::ItemList);
    assert_eq!(console.navigation().context().item_id, None);
    assert!(console.value_panel().is_none());

    let listed = gateway.call_count(GatewayCall::ListConfigurations);
    console.handle(Intent::Back).await.expect("back closes");
    assert!(console.navigation().is_closed());
    assert!(console.navigation().context().is_empty());
    assert_eq!(gateway.call_count(GatewayCall::ListConfigurations), listed + 1);
    assert_eq!(
        console.take_events(),
        vec![
            PresentationEvent::NavigationCancelled,
            PresentationEvent::NavigationCancelled
        ]
    );

    match console.handle(Intent::NewItem).await {
        Err(SessionError::Navigation(NavigationError::IntentNotAllowed { .. })) => {}
        other => panic!("expected illegal intent, got {other:?}"),
    }
}
