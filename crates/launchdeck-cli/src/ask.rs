//! One-shot question mode

use anyhow::Context;
use launchdeck_assistant::{AssistantEvent, OpenOutcome, SessionManager, SessionState, SubmitOutcome};
use std::io::Write;
use tokio::sync::broadcast::{self, error::RecvError};

/// Prime a session, stream one answer to stdout, and return
pub async fn run_ask(manager: &SessionManager, question: &str) -> anyhow::Result<()> {
    if question.trim().is_empty() {
        anyhow::bail!("question is empty");
    }
    if let OpenOutcome::Failed(kind) = manager.open().await {
        eprintln!("{}", manager.config().priming_apology);
        anyhow::bail!("assistant unavailable ({:?})", kind);
    }

    let events = manager.subscribe();
    let mut stdout = std::io::stdout();
    // A write failure drops the submit future, which stops the stream
    let (outcome, ()) = tokio::try_join!(
        async { Ok::<_, std::io::Error>(manager.submit(question).await) },
        print_reply(events, &mut stdout),
    )
    .context("failed to write reply")?;
    println!();

    match outcome {
        SubmitOutcome::Completed => Ok(()),
        SubmitOutcome::Failed(kind) => {
            eprintln!("{}", manager.config().reply_apology);
            anyhow::bail!("reply failed ({:?})", kind)
        }
        SubmitOutcome::Ignored(reason) => anyhow::bail!("question not sent: {:?}", reason),
    }
}

/// Write reply text as it grows until the session is ready again
async fn print_reply(
    mut events: broadcast::Receiver<AssistantEvent>,
    out: &mut impl Write,
) -> std::io::Result<()> {
    let mut printed = 0;
    loop {
        match events.recv().await {
            Ok(AssistantEvent::TurnUpdated { text, .. }) => {
                // Each update carries the full text so far
                if let Some(delta) = text.get(printed..) {
                    write!(out, "{}", delta)?;
                    out.flush()?;
                }
                printed = text.len();
            }
            Ok(AssistantEvent::StateChanged {
                to: SessionState::Ready,
                ..
            }) => return Ok(()),
            Ok(_) => {}
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Missed assistant events");
            }
            Err(RecvError::Closed) => return Ok(()),
        }
    }
}
