mod cli;
mod commands;
mod config;
mod render;

use clap::Parser;
use cli::{Cli, Commands};
use commands::ListOptions;

fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = std::path::Path::new("target").join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("opsboard.log"))?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,reqwest=warn,hyper=warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Arc::new(log_file))
                .with_ansi(false),
        )
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing()?;

    match cli.command {
        Commands::Resources => {
            let stdout = std::io::stdout();
            commands::run_resources(&mut stdout.lock())
        }
        Commands::List {
            resource,
            filters,
            sort,
            asc,
            pages,
        } => {
            let config = config::load_config(cli.config.as_deref())?;
            let options = ListOptions {
                filters: &filters,
                sort: sort.as_deref(),
                ascending: asc,
                pages,
            };
            commands::run_list(&config, &resource, &options).await
        }
        Commands::Export {
            resource,
            filters,
            out,
        } => {
            let config = config::load_config(cli.config.as_deref())?;
            commands::run_export(&config, &resource, &filters, out.as_deref()).await
        }
    }
}
