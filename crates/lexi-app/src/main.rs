use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

mod article;
mod cli;
mod controller;
mod events;
mod host;
mod hover;
mod io;
mod page;
mod profile;
mod session;
mod state;

#[cfg(test)]
mod tests;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    // stdout is reserved for command output
    if atty::is(atty::Stream::Stderr) {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = cli::Cli::parse();

    profile::init_user_config()?;
    let config = profile::load_user_profile(&cli.profile)?
        .with_env_overrides(|key| std::env::var(key).ok());

    cli::run(cli, config).await
}
