use commute_calc::{CalculationEngine, Config};
use commute_calc_mcp::CommuteMcpHandler;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let log_env = commute_calc_mcp::log_level_with(|k| std::env::var(k).ok());

    // stdout carries the MCP stream, so logs go to stderr
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(commute_calc_mcp::log_filter(&log_env))
        .init();
    tracing::info!("commute_calc_mcp: log filter: {}", log_env);

    let config = Config::from_env()?;
    tracing::info!(
        "commute_calc_mcp: session starts at {} miles x {} trips ({})",
        config.distance_miles,
        config.trip_count,
        config.sex
    );
    let handler = CommuteMcpHandler::new(CalculationEngine::from_config(&config)?);

    tracing::info!(
        "commute_calc_mcp: registered {} tools and {} prompts",
        handler.tool_count(),
        handler.prompt_count()
    );

    tracing::info!("commute_calc_mcp: starting stdio MCP server...");

    let transport = (tokio::io::stdin(), tokio::io::stdout());
    let server = rmcp::serve_server(handler, transport).await?;

    tracing::info!("commute_calc_mcp: service initialized as server");

    server.waiting().await?;

    Ok(())
}
