//! HTTP server for the financial chatbot
//! Serves the chat page, `POST /chat` and `GET /help` on plain tokio TCP

use anyhow::{Context, Result};
use clap::Parser;
use financial_chatbot::{logging, web, QueryResolver};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[derive(Parser)]
#[command(name = "server")]
#[command(about = "Web interface for the financial chatbot")]
struct Args {
    /// Address to listen on
    #[arg(short, long, default_value = "0.0.0.0:5000")]
    bind: String,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(&args.log_level);

    info!("Starting financial chatbot server on {}", args.bind);

    let resolver = Arc::new(QueryResolver::new());
    let listener = TcpListener::bind(&args.bind)
        .await
        .with_context(|| format!("Failed to bind {}", args.bind))?;

    web::serve(listener, resolver).await?;
    Ok(())
}
