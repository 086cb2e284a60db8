use anyhow::Result;
use clap::Parser;
use financial_chatbot::{demo, logging, QueryResolver};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "demo")]
#[command(about = "Replay sample questions against the financial chatbot")]
struct Args {
    /// Pause after each answer, in milliseconds
    #[arg(long, default_value_t = 500)]
    delay_ms: u64,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(&args.log_level);

    let resolver = QueryResolver::new();
    let stdout = std::io::stdout();
    demo::run(&resolver, &mut stdout.lock(), Duration::from_millis(args.delay_ms))?;
    Ok(())
}
