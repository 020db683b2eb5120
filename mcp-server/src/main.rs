use anyhow::Result;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use lotto_check::DrawProvider;
use lotto_check_mcp::config;
use lotto_check_mcp::source;
use lotto_check_mcp::{DrawUseCase, MCPHandler, TicketUseCase, stdio};

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("Let's check some tickets.");

    let provider: Arc<dyn DrawProvider> = Arc::new(source::open(&config)?);

    let ticket_use_case = TicketUseCase::new(Arc::clone(&provider));

    let draw_use_case = DrawUseCase::new(Arc::clone(&provider), config.history_limit);

    let handler = MCPHandler::new(Arc::new(ticket_use_case), Arc::new(draw_use_case));

    let (reader, writer) = stdio();

    handler.serve(reader, writer).await.inspect_err(|e| {
        tracing::error!("serving error: {:?}", e);
    })?;

    Ok(())
}
