use anyhow::Result;
use clap::Parser;
use financial_chatbot::console::{ConsoleSession, SessionEnd};
use financial_chatbot::{logging, QueryResolver};
use tokio::io::BufReader;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "financial-chatbot")]
#[command(about = "Answers predefined financial questions about Microsoft, Tesla and Apple")]
struct Args {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(&args.log_level);

    let runtime = tokio::runtime::Runtime::new()?;
    let outcome = runtime.block_on(run());
    // The stdin reader can still be parked in a blocking read after Ctrl-C
    runtime.shutdown_background();
    outcome
}

async fn run() -> Result<()> {
    let resolver = QueryResolver::new();
    let session = ConsoleSession::new(&resolver);

    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Could not listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    let mut stdout = tokio::io::stdout();
    let end: SessionEnd = session
        .run(BufReader::new(tokio::io::stdin()), &mut stdout, interrupt)
        .await?;

    info!("Console session ended: {:?}", end);
    Ok(())
}
