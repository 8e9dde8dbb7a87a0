use anyhow::{Context, Result};
use clap::Parser;
use sunbeam::cli::Cli;
use sunbeam::config::build_provider;
use sunbeam::runtime::build_weather_agent;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let (config, policy, request) = cli.into_parts();
    let provider = build_provider(&config).context("failed to build gateway provider")?;
    let agent = build_weather_agent(provider, policy).context("failed to register tools")?;
    let result = agent
        .invoke(request)
        .await
        .context("agent invocation failed")?;

    println!("{result}");
    Ok(())
}
