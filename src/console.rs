//! Interactive console loop
//!
//! Reads one question per line, prints the chatbot's answer, and stops on
//! `quit`/`exit`/`bye`, Ctrl-C, or end of input.

use crate::error::Result;
use crate::resolver::QueryResolver;
use std::future::Future;
use std::io::ErrorKind;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

const RULE: &str = "============================================================";
const PROMPT: &str = "\nYou: ";
const FAREWELL: &str = "Chatbot: Thank you for using the Financial Analysis Chatbot!";
const GOODBYE: &str = "\n\nChatbot: Goodbye!";
const EMPTY_INPUT: &str = "Chatbot: Please enter a query or type 'help' for available commands.";
const EXIT_WORDS: [&str; 3] = ["quit", "exit", "bye"];

/// Consecutive stream failures (other than undecodable lines) before input is treated as lost
const MAX_STREAM_FAILURES: usize = 3;

/// Outcome of a single input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Turn {
    Quit,
    Empty,
    Reply(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    Quit,
    Interrupted,
    EndOfInput,
    /// Input stream kept failing; every failure was reported inline
    InputLost,
}

pub struct ConsoleSession<'a> {
    resolver: &'a QueryResolver,
}

impl<'a> ConsoleSession<'a> {
    pub fn new(resolver: &'a QueryResolver) -> Self {
        Self { resolver }
    }

    /// Handle one line. Empty input and exit words never reach the resolver.
    pub fn respond(&self, line: &str) -> Turn {
        let input = line.trim();

        if EXIT_WORDS.contains(&input.to_lowercase().as_str()) {
            return Turn::Quit;
        }
        if input.is_empty() {
            return Turn::Empty;
        }
        Turn::Reply(self.resolver.resolve(input))
    }

    /// Run the loop until the user leaves, `interrupt` resolves, or input ends
    pub async fn run<R, W, F>(&self, reader: R, writer: &mut W, interrupt: F) -> Result<SessionEnd>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
        F: Future<Output = ()>,
    {
        let mut lines = reader.lines();
        tokio::pin!(interrupt);

        write_line(writer, &banner()).await?;

        let mut failures = 0;
        loop {
            writer.write_all(PROMPT.as_bytes()).await?;
            writer.flush().await?;

            let next = tokio::select! {
                biased;
                _ = &mut interrupt => {
                    write_line(writer, GOODBYE).await?;
                    return Ok(SessionEnd::Interrupted);
                }
                line = lines.next_line() => line,
            };

            match next {
                Ok(Some(line)) => {
                    failures = 0;
                    match self.respond(&line) {
                        Turn::Quit => {
                            write_line(writer, FAREWELL).await?;
                            return Ok(SessionEnd::Quit);
                        }
                        Turn::Empty => write_line(writer, EMPTY_INPUT).await?,
                        Turn::Reply(text) => {
                            write_line(writer, &format!("Chatbot: {}", text)).await?;
                        }
                    }
                }
                Ok(None) => {
                    debug!("Console input closed");
                    write_line(writer, GOODBYE).await?;
                    return Ok(SessionEnd::EndOfInput);
                }
                Err(e) => {
                    warn!("Failed to read console input: {}", e);
                    write_line(writer, &format!("Chatbot: An error occurred: {}", e)).await?;

                    // An undecodable line is already consumed, so the next read moves on
                    if e.kind() == ErrorKind::InvalidData {
                        continue;
                    }
                    failures += 1;
                    if failures >= MAX_STREAM_FAILURES {
                        write_line(writer, GOODBYE).await?;
                        return Ok(SessionEnd::InputLost);
                    }
                }
            }
        }
    }
}

pub fn banner() -> String {
    [
        RULE,
        "Financial Analysis Chatbot - Microsoft, Tesla & Apple",
        RULE,
        "Welcome! I can answer questions about financial data from these companies.",
        "Type 'help' to see available queries or 'quit' to exit.",
        RULE,
    ]
    .join("\n")
}

async fn write_line<W: AsyncWrite + Unpin>(writer: &mut W, text: &str) -> Result<()> {
    writer.write_all(text.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}
