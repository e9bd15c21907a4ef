use crate::cli::FilterArgs;
use crate::config::Config;
use crate::render::Table;
use anyhow::{bail, Context};
use contracts::domain::a001_equipment::Equipment;
use contracts::domain::a002_inventory::InventoryItem;
use contracts::domain::a003_project::Project;
use contracts::domain::a004_operation::Operation;
use contracts::domain::a005_production::Production;
use contracts::domain::a006_incident::Incident;
use contracts::domain::a007_risk_assessment::RiskAssessment;
use contracts::domain::a008_employee::Employee;
use contracts::domain::common::Resource;
use contracts::shared::record::ID_FIELD;
use frontend::shared::api::HttpRecordApi;
use frontend::shared::list_view::SortKey;
use frontend::ListController;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Command-line names of the collections
pub const RESOURCE_NAMES: &[&str] = &[
    "equipment",
    "inventory",
    "projects",
    "operations",
    "production",
    "incidents",
    "risk-assessments",
    "employees",
];

/// Runs `$body` with `$r` bound to the resource type named by `$name`
macro_rules! with_resource {
    ($name:expr, $r:ident => $body:expr) => {
        match $name {
            "equipment" => { type $r = Equipment; $body }
            "inventory" => { type $r = InventoryItem; $body }
            "projects" => { type $r = Project; $body }
            "operations" => { type $r = Operation; $body }
            "production" => { type $r = Production; $body }
            "incidents" => { type $r = Incident; $body }
            "risk-assessments" => { type $r = RiskAssessment; $body }
            "employees" => { type $r = Employee; $body }
            other => bail!(
                "unknown resource `{}`; expected one of: {}",
                other,
                RESOURCE_NAMES.join(", ")
            ),
        }
    };
}

pub struct ListOptions<'a> {
    pub filters: &'a FilterArgs,
    pub sort: Option<&'a str>,
    pub ascending: bool,
    pub pages: usize,
}

fn api(config: &Config) -> anyhow::Result<HttpRecordApi> {
    HttpRecordApi::new(config.api.base_url.clone(), config.api.timeout())
        .context("failed to set up the HTTP client")
}

/// Every field named on the command line must exist in the collection
fn check_fields<R: Resource>(filters: &FilterArgs, sort: Option<&str>) -> anyhow::Result<()> {
    let named = filters
        .exact
        .iter()
        .chain(&filters.min)
        .chain(&filters.max)
        .map(|(field, _)| field.as_str())
        .chain(sort);
    for field in named {
        if R::field(field).is_none() {
            let known: Vec<&str> = R::fields().iter().map(|f| f.name).collect();
            bail!(
                "{} has no field `{}`; fields: {}",
                R::collection_name(),
                field,
                known.join(", ")
            );
        }
    }
    Ok(())
}

async fn loaded<R: Resource>(
    config: &Config,
    filters: &FilterArgs,
) -> anyhow::Result<ListController<R, HttpRecordApi>> {
    let mut controller = ListController::<R, _>::new(api(config)?, config.list.page_step);
    let count = controller
        .load()
        .await
        .with_context(|| format!("failed to load {}", R::collection_name()))?;
    tracing::info!("Loaded {} {} records", count, R::collection_name());

    controller.set_filters(filters.to_state());
    if let Some(query) = &filters.search {
        controller.set_search(query.clone());
    }
    Ok(controller)
}

async fn list<R: Resource>(config: &Config, options: &ListOptions<'_>, out: &mut impl Write) -> anyhow::Result<()> {
    check_fields::<R>(options.filters, options.sort)?;
    let mut controller = loaded::<R>(config, options.filters).await?;

    let field = options.sort.unwrap_or(ID_FIELD);
    if options.sort.is_some() || options.ascending {
        controller.set_sort(SortKey::new(field, options.ascending));
    }
    for _ in 1..options.pages.max(1) {
        controller.load_more();
    }

    let rows = controller.visible();
    let totals = controller.totals();
    let table = Table {
        title: R::list_name(),
        fields: R::fields(),
        rows: &rows,
        sort: controller.sort_key(),
        filtered: controller.filtered().len(),
        totals: &totals,
    };
    table.write_to(out)?;
    if controller.has_more() {
        writeln!(out, "(more available, use --pages {})", options.pages.max(1) + 1)?;
    }
    Ok(())
}

async fn export<R: Resource>(config: &Config, filters: &FilterArgs, target: Option<&Path>) -> anyhow::Result<PathBuf> {
    check_fields::<R>(filters, None)?;
    let controller = loaded::<R>(config, filters).await?;
    let export = controller.export_csv()?;

    let path = target
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&export.filename));
    std::fs::write(&path, export.content.as_bytes())
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!("Exported {} to {}", R::collection_name(), path.display());
    Ok(path)
}

fn describe<R: Resource>(name: &str, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "{:<18} {} ({})", name, R::list_name(), R::endpoint())?;
    for field in R::fields() {
        let mut flags = Vec::new();
        if field.derived {
            flags.push("computed");
        }
        if !field.filterable {
            flags.push("not filterable");
        }
        let flags = if flags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", flags.join(", "))
        };
        writeln!(out, "    {:<20} {:<14}{}", field.name, field.kind.as_str(), flags)?;
    }
    Ok(())
}

pub async fn run_list(config: &Config, resource: &str, options: &ListOptions<'_>) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    with_resource!(resource, R => list::<R>(config, options, &mut out).await)
}

pub async fn run_export(
    config: &Config,
    resource: &str,
    filters: &FilterArgs,
    target: Option<&Path>,
) -> anyhow::Result<()> {
    let path = with_resource!(resource, R => export::<R>(config, filters, target).await)?;
    println!("Written {}", path.display());
    Ok(())
}

pub fn run_resources(out: &mut impl Write) -> anyhow::Result<()> {
    for name in RESOURCE_NAMES {
        with_resource!(*name, R => describe::<R>(name, out))?;
    }
    Ok(())
}
