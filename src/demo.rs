//! Scripted walkthrough that replays sample questions against the resolver.

use crate::resolver::QueryResolver;
use std::io::Write;
use std::thread;
use std::time::Duration;
use tracing::info;

/// Sample questions: the six predefined ones, two partial phrases, help, and an unknown query
pub const DEMO_QUERIES: [&str; 10] = [
    "What is the total revenue?",
    "Which company has the highest revenue?",
    "What is Tesla's growth rate?",
    "How has Microsoft's net income changed?",
    "Compare revenue across companies",
    "What is Apple's recent performance?",
    "Tesla growth",
    "Microsoft income",
    "help",
    "What is Google's revenue?",
];

pub fn run<W: Write>(resolver: &QueryResolver, out: &mut W, delay: Duration) -> std::io::Result<()> {
    let rule = "=".repeat(70);

    writeln!(out, "{}", rule)?;
    writeln!(out, "FINANCIAL ANALYSIS CHATBOT - AUTOMATED DEMO")?;
    writeln!(out, "{}", rule)?;
    writeln!(out, "Testing all predefined queries...\n")?;

    for (i, query) in DEMO_QUERIES.iter().enumerate() {
        writeln!(out, "Test {}: {}", i + 1, query)?;
        writeln!(out, "{}", "-".repeat(50))?;
        writeln!(out, "Response: {}", resolver.resolve(query))?;
        writeln!(out)?;
        out.flush()?;

        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }

    writeln!(out, "{}", rule)?;
    writeln!(out, "DEMO COMPLETED SUCCESSFULLY")?;
    writeln!(out, "{}", rule)?;
    writeln!(out, "All queries processed successfully!")?;
    writeln!(out, "The chatbot is ready for interactive use.")?;
    writeln!(out, "\nTo start interactive mode, run: financial-chatbot")?;
    writeln!(out, "To start web interface, run: server")?;
    out.flush()?;

    info!("Demo replayed {} queries", DEMO_QUERIES.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_covers_every_query() {
        let resolver = QueryResolver::new();
        let mut out = Vec::new();
        run(&resolver, &mut out, Duration::ZERO).unwrap();
        let text = String::from_utf8(out).unwrap();

        for (i, query) in DEMO_QUERIES.iter().enumerate() {
            assert!(text.contains(&format!("Test {}: {}\n", i + 1, query)));
        }
        assert!(text.contains("Response: Sorry, I can only provide information on predefined queries."));
        assert!(text.contains("DEMO COMPLETED SUCCESSFULLY"));
    }
}
