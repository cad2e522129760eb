//! planact - interactive entry point.
//!
//! Reads one query per line from stdin and prints the agent's answer.

use std::sync::Arc;

use planact::{agent::Agent, config::Config};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging (stderr keeps the conversation on stdout readable)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "planact=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!(
        "Loaded configuration: model={}, database={}",
        config.llm.model,
        config.tools.sqlite_path.display()
    );

    let agent = Arc::new(Agent::new(&config)?);
    info!("Registered tools: {:?}", agent.tools().names());

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    stdout
        .write_all(b"planact agent (type 'exit' or 'quit' to leave)\n")
        .await?;

    loop {
        stdout.write_all(b"\n> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let query = line.trim();

        if is_exit_command(query) {
            stdout.write_all(b"Bye.\n").await?;
            break;
        }

        let outcome = report(agent.clone(), query.to_string()).await;
        stdout.write_all(outcome.as_bytes()).await?;
    }

    Ok(())
}

/// Answer one query and format the outcome for the terminal.
///
/// The query runs in its own task so a faulting tool only takes down this
/// invocation.
async fn report(agent: Arc<Agent>, query: String) -> String {
    let task = tokio::spawn(async move { agent.answer(&query).await });

    match task.await {
        Ok(Ok(answer)) => format!("\nAnswer:\n{}\n", answer),
        Ok(Err(e)) => format!("\nInvocation failed: {}\n", e),
        Err(e) => format!("\nInvocation failed: aborted ({})\n", e),
    }
}

/// `exit` and `quit` end the session, in any letter case.
fn is_exit_command(input: &str) -> bool {
    input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit")
}
