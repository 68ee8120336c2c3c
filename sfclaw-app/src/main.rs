use anyhow::{Context, Result};
use sfclaw_app::cli::{tool_definition, Command, USAGE};
use sfclaw_app::config::Config;
use sfclaw_tools::{SalesforceTool, ToolRegistry, TOOL_NAME};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only the JSON result.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match Command::parse(&args)? {
        Command::Help => println!("{}", USAGE),
        Command::Schema => println!("{}", serde_json::to_string_pretty(&tool_definition())?),
        Command::Run(input) => run(input).await?,
    }
    Ok(())
}

async fn run(input: serde_json::Value) -> Result<()> {
    let config = Config::load()?;
    let credentials = config.credentials()?;
    info!(
        "Connecting to Salesforce ({}) as {}",
        credentials.domain, credentials.username
    );

    let tool = SalesforceTool::connect(credentials)
        .await
        .context("Failed to connect to Salesforce")?;

    let registry = ToolRegistry::new().with_tool(tool);
    let result = registry.call(TOOL_NAME, input).await?;
    if let Some(msg) = &result.error {
        error!("{}", msg);
    }
    let output = result.output.unwrap_or_default();
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
