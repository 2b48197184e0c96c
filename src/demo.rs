use std::collections::HashMap;
use std::sync::Arc;

use clap::Args;
use serde::Serialize;

use lead_scoring::error::AppError;
use lead_scoring::scoring::{
    shorten_label, ConfigurationOrchestrator, FanOutPolicy, FieldDataType, InMemoryScoringGateway,
    Intent, ItemId, LeadFieldDescriptor, Outcome, PicklistOption, PresentationEvent,
    TracingNotifier, ValidationError,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Pretty-print each JSON report instead of one line per step
    #[arg(long)]
    pub(crate) pretty: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct CatalogArgs {
    /// Only list fields that accept value rules
    #[arg(long)]
    pub(crate) valued_only: bool,
}

type DemoConsole = ConfigurationOrchestrator<InMemoryScoringGateway, TracingNotifier>;

#[derive(Debug, Serialize)]
struct StepReport<'a> {
    step: &'a str,
    screen: &'static str,
    title: &'static str,
    accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    rejection: Option<ValidationError>,
    events: Vec<PresentationEvent>,
}

struct Reporter {
    pretty: bool,
}

impl Reporter {
    fn emit<T>(
        &self,
        console: &mut DemoConsole,
        step: &str,
        outcome: &Outcome<T>,
    ) -> Result<(), AppError> {
        let report = StepReport {
            step,
            screen: console.navigation().screen().label(),
            title: console.navigation().title(),
            accepted: outcome.is_accepted(),
            rejection: outcome.rejection().cloned(),
            events: console.take_events(),
        };
        let rendered = if self.pretty {
            serde_json::to_string_pretty(&report)?
        } else {
            serde_json::to_string(&report)?
        };
        println!("{rendered}");
        Ok(())
    }
}

pub(crate) fn sample_catalog() -> (Vec<LeadFieldDescriptor>, HashMap<String, Vec<PicklistOption>>) {
    let field = |api_name: &str, label: &str, data_type| LeadFieldDescriptor {
        api_name: api_name.to_string(),
        label: label.to_string(),
        data_type,
    };
    let catalog = vec![
        field("AnnualRevenue", "Annual Revenue (USD)", FieldDataType::Number),
        field("NumberOfEmployees", "Employees", FieldDataType::Number),
        field("Rating", "Rating", FieldDataType::Picklist),
        field("Industry", "Industry", FieldDataType::Picklist),
        field("HasOptedOutOfEmail", "Email Opt Out", FieldDataType::Checkbox),
        field("Email", "Email", FieldDataType::Email),
        field("Phone", "Business Phone (Main)", FieldDataType::Phone),
        field("Website", "Website", FieldDataType::Text),
    ];

    let mut picklists = HashMap::new();
    picklists.insert(
        "Rating".to_string(),
        vec![
            PicklistOption::new("Hot", "Hot"),
            PicklistOption::new("Warm", "Warm"),
            PicklistOption::new("Cold", "Cold"),
        ],
    );
    picklists.insert(
        "Industry".to_string(),
        vec![
            PicklistOption::new("Banking", "Banking"),
            PicklistOption::new("Technology", "Technology"),
            PicklistOption::new("Retail", "Retail"),
        ],
    );
    (catalog, picklists)
}

pub(crate) fn run_catalog(args: CatalogArgs) -> Result<(), AppError> {
    let (catalog, _) = sample_catalog();
    for field in catalog {
        if args.valued_only && field.data_type.scores_on_presence() {
            continue;
        }
        let line = serde_json::json!({
            "api_name": field.api_name,
            "label": field.label,
            "item_label": shorten_label(&field.label),
            "data_type": field.data_type,
            "type_label": field.data_type.label(),
        });
        println!("{line}");
    }
    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs, policy: FanOutPolicy) -> Result<(), AppError> {
    let (catalog, picklists) = sample_catalog();
    let gateway = Arc::new(InMemoryScoringGateway::with_catalog(catalog, picklists));
    let mut console = ConfigurationOrchestrator::new(gateway, Arc::new(TracingNotifier), policy);
    let reporter = Reporter { pretty: args.pretty };

    console.load().await?;

    let outcome = console.handle(Intent::NewConfiguration).await?;
    reporter.emit(&mut console, "open new configuration", &outcome)?;
    if let Some(form) = console.configuration_form_mut() {
        form.record.name = "Q1 Leads".to_string();
        form.record.active = true;
    }
    let outcome = console.save_configuration().await?;
    reporter.emit(&mut console, "save configuration", &outcome)?;

    let revenue = add_item(&mut console, &reporter, "AnnualRevenue", 10.0).await?;
    let rating = add_item(&mut console, &reporter, "Rating", 8.0).await?;
    let opt_out = add_item(&mut console, &reporter, "HasOptedOutOfEmail", 5.0).await?;
    let email = add_item(&mut console, &reporter, "Email", 3.0).await?;

    open_values(&mut console, &reporter, &revenue).await?;
    console.open_value_form(None).await?;
    if let Some(form) = console.value_form_mut() {
        form.candidate.value_text = "1000000".to_string();
        form.candidate.score = 15.0;
    }
    let outcome = console.save_value().await?;
    reporter.emit(&mut console, "revenue value above cap", &outcome)?;
    if let Some(form) = console.value_form_mut() {
        form.candidate.score = 10.0;
    }
    let outcome = console.save_value().await?;
    reporter.emit(&mut console, "revenue value at cap", &outcome)?;

    open_values(&mut console, &reporter, &rating).await?;
    console.open_value_form(None).await?;
    if let Some(form) = console.value_form_mut() {
        form.candidate.score = 8.0;
    }
    let outcome = console.save_value().await?;
    reporter.emit(&mut console, "rating value", &outcome)?;

    open_values(&mut console, &reporter, &opt_out).await?;
    console.open_value_form(None).await?;
    if let Some(form) = console.value_form_mut() {
        form.candidate.score = 5.0;
    }
    let outcome = console.save_value().await?;
    reporter.emit(&mut console, "opt-out TRUE value", &outcome)?;

    open_values(&mut console, &reporter, &opt_out).await?;
    console.open_value_form(None).await?;
    if let Some(form) = console.value_form_mut() {
        form.candidate.value_text = "TRUE".to_string();
    }
    let outcome = console.save_value().await?;
    reporter.emit(&mut console, "duplicate opt-out TRUE value", &outcome)?;
    let outcome = console.handle(Intent::Back).await?;
    reporter.emit(&mut console, "back to fields", &outcome)?;

    let outcome = console
        .handle(Intent::OpenValues { item_id: email })
        .await?;
    reporter.emit(&mut console, "values for email field", &outcome)?;

    let outcome = console.handle(Intent::Close).await?;
    reporter.emit(&mut console, "close", &outcome)?;
    Ok(())
}

async fn add_item(
    console: &mut DemoConsole,
    reporter: &Reporter,
    api_name: &str,
    point_cap: f64,
) -> Result<ItemId, AppError> {
    let outcome = console.handle(Intent::NewItem).await?;
    reporter.emit(console, "open new field", &outcome)?;
    if console.select_catalog_field(api_name).is_none() {
        return Err(AppError::Rejected(format!("unknown catalog field {api_name}")));
    }
    if let Some(draft) = console.item_form_mut() {
        draft.point_cap = point_cap;
    }
    let outcome = console.save_item().await?;
    reporter.emit(console, &format!("save field {api_name}"), &outcome)?;
    match outcome {
        Outcome::Accepted(id) => Ok(id),
        Outcome::Rejected(violation) => Err(AppError::Rejected(violation.to_string())),
    }
}

async fn open_values(
    console: &mut DemoConsole,
    reporter: &Reporter,
    item_id: &ItemId,
) -> Result<(), AppError> {
    let outcome = console
        .handle(Intent::OpenValues {
            item_id: item_id.clone(),
        })
        .await?;
    reporter.emit(console, &format!("open values for {item_id}"), &outcome)
}
