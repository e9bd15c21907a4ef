use clap::{Args, Parser, Subcommand};
use contracts::shared::filter::FilterState;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "opsboard", bin_name = "opsboard", version)]
#[command(about = "Browse and export operations board collections", long_about = None)]
pub struct Cli {
    /// Path to config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a filtered, sorted page of a collection
    List {
        /// Collection name, see `opsboard resources`
        resource: String,

        #[command(flatten)]
        filters: FilterArgs,

        /// Sort column (default: id, newest first)
        #[arg(long)]
        sort: Option<String>,

        /// Sort ascending
        #[arg(long)]
        asc: bool,

        /// Number of pages to show
        #[arg(long, default_value_t = 1)]
        pages: usize,
    },

    /// Write the filtered collection as CSV
    Export {
        resource: String,

        #[command(flatten)]
        filters: FilterArgs,

        /// Output file (default: <collection>_list.csv)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// List the known collections and their fields
    Resources,
}

#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// Exact value: FIELD=VALUE (substring for text fields)
    #[arg(long = "eq", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
    pub exact: Vec<(String, String)>,

    /// Lower bound: FIELD=VALUE (alone it matches the value exactly)
    #[arg(long, value_name = "FIELD=VALUE", value_parser = parse_assignment)]
    pub min: Vec<(String, String)>,

    /// Upper bound: FIELD=VALUE
    #[arg(long, value_name = "FIELD=VALUE", value_parser = parse_assignment)]
    pub max: Vec<(String, String)>,

    /// Free-text search, at least 3 characters
    #[arg(long)]
    pub search: Option<String>,
}

impl FilterArgs {
    pub fn to_state(&self) -> FilterState {
        let mut state = FilterState::new();
        for (field, value) in &self.exact {
            state.set_exact(field.clone(), value.clone());
        }
        for (field, value) in &self.min {
            state.set_min(field.clone(), value.clone());
        }
        for (field, value) in &self.max {
            state.set_max(field.clone(), value.clone());
        }
        state
    }
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((field, value)) if !field.trim().is_empty() => {
            Ok((field.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected FIELD=VALUE, got `{}`", raw)),
    }
}
