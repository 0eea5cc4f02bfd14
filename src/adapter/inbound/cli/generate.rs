//! Handler for the `generate` command.
//!
//! Runs one generation against a running server through its `/api/story`
//! and `/api/generate` endpoints, so the same orchestration that drives the
//! HTTP `/api/comic` endpoint also drives the terminal.

use std::sync::Arc;
use std::time::Duration;

use crate::adapter::inbound::cli::command::GenerateArgs;
use crate::adapter::inbound::cli::output;
use crate::adapter::outbound::api::ComicApiClient;
use crate::application::orchestrator::{Orchestrator, Outcome};
use crate::domain::GenerationState;
use crate::error::{Error, Result, PROMPT_REQUIRED};

const PROGRESS_INTERVAL: Duration = Duration::from_millis(100);

/// Execute the generate command.
pub async fn execute(args: &GenerateArgs) -> Result<()> {
    let client = Arc::new(ComicApiClient::new(&args.server).with_panel_count(args.panels));
    let orchestrator = Orchestrator::new(client.clone(), client);

    if args.prompt.trim().is_empty() {
        output::warning(PROMPT_REQUIRED);
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Server", &args.server);
    output::field("Prompt", &args.prompt);

    let pb = output::spinner("Writing the story...");
    let generation = orchestrator.generate(&args.prompt);
    tokio::pin!(generation);
    let mut ticker = tokio::time::interval(PROGRESS_INTERVAL);
    let result = loop {
        tokio::select! {
            result = &mut generation => break result,
            _ = ticker.tick() => {
                if let Some(message) = progress_message(&orchestrator.snapshot()) {
                    pb.set_message(message);
                }
            }
        }
    };

    match result {
        Ok(Outcome::Completed(panels)) => {
            output::spinner_success(&pb, &format!("{} panels ready", panels.len()));
            output::section("Comic");
            for (index, panel) in panels.iter().enumerate() {
                output::panel(index, panel);
            }
            Ok(())
        }
        Ok(Outcome::Ignored) => {
            pb.finish_and_clear();
            output::warning(PROMPT_REQUIRED);
            Ok(())
        }
        Ok(Outcome::Superseded) => {
            output::spinner_fail(&pb, "Generation was superseded");
            Err(Error::Superseded)
        }
        Err(err) => {
            output::spinner_fail(&pb, "Generation failed");
            Err(err)
        }
    }
}

/// Spinner text for an in-flight generation; `None` once it has settled.
fn progress_message(state: &GenerationState) -> Option<String> {
    if !state.is_loading() {
        return None;
    }
    let pending = state.panels();
    Some(if pending.is_empty() {
        "Writing the story...".to_string()
    } else {
        format!("Drawing {} panels...", pending.len())
    })
}
