use std::env;

use clap::Parser;
use taskview::cli::{self, Cli, PreviewArgs, Sub};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "taskview=debug,taskview_config=debug";

fn main() -> anyhow::Result<()> {
    let directives = env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_owned());
    let env_filter = EnvFilter::builder().parse_lossy(directives);
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter)
        .init();

    let cli = Cli::parse();

    info!("starting version {}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Sub::Validate { config } => cli::validate(config),
        Sub::Preview {
            config,
            size,
            scale,
            stage,
            workspace,
            live,
            json,
        } => {
            let config = cli::load_config(config)?;
            let args = PreviewArgs {
                size,
                scale,
                stage,
                workspace,
                live,
            };
            let reports = cli::preview(&config, &args)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                print!("{}", cli::format_table(&reports));
            }
            Ok(())
        }
    }
}
