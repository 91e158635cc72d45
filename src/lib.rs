pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod entities;
pub mod seed;
pub mod services;
pub mod state;

use clap::Parser;
use cli::{Cli, Commands};
pub use config::Config;
use tracing_subscriber::EnvFilter;

pub async fn run(config: Config) -> anyhow::Result<()> {
    let cli = Cli::parse();

    if matches!(cli.command, Some(Commands::Init)) {
        return cli::cmd_init();
    }

    config.validate()?;
    init_tracing(&config);

    match cli.command {
        Some(Commands::Seed { json }) => cli::cmd_seed(&config, json).await,
        Some(Commands::Serve) | None => cli::cmd_serve(config).await,
        Some(Commands::Init) => Ok(()),
    }
}

/// `RUST_LOG` wins over `general.log_level`.
fn init_tracing(config: &Config) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.general.log_format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
