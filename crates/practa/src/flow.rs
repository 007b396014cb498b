// SPDX-FileCopyrightText: 2026 Practa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `practa flow types | preset | run` command implementations.

use std::sync::Arc;

use async_trait::async_trait;
use practa_core::{
    FlowStatus, PractaContent, PractaContext, PractaError, PractaOutput, PractaStep, PractaType,
    StepResolution,
};
use practa_flow::{FlowEngine, FlowRunner, PractaRegistry, presets, search_catalog};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::Mutex;
use tracing::info;

use crate::output::{self, Mark};

/// Line input shared by every console step of one run.
pub type SharedInput = Arc<Mutex<Box<dyn AsyncBufRead + Send + Unpin>>>;

/// A step answered by typing one line. `/skip` skips, `/quit` ends the flow.
pub struct ConsoleStep {
    practa_type: PractaType,
    input: SharedInput,
}

impl ConsoleStep {
    pub fn new(practa_type: PractaType, input: SharedInput) -> Self {
        Self { practa_type, input }
    }
}

#[async_trait]
impl PractaStep for ConsoleStep {
    fn practa_type(&self) -> PractaType {
        self.practa_type
    }

    async fn run(&self, context: PractaContext) -> Result<StepResolution, PractaError> {
        let entry = practa_flow::catalog::entry(self.practa_type);
        println!();
        println!("  [{}] {}", context.practa_index + 1, entry.name);
        println!("  {}", entry.description);
        if let Some(previous) = &context.previous
            && let Some(PractaContent { value, .. }) = &previous.content
            && let Some(text) = value.as_str()
        {
            println!("  (after {}: \"{text}\")", previous.practa_type);
        }
        print!("  > ");
        let _ = std::io::Write::flush(&mut std::io::stdout());

        let mut line = String::new();
        let read = self
            .input
            .lock()
            .await
            .read_line(&mut line)
            .await
            .map_err(|e| PractaError::Step {
                practa_type: self.practa_type.to_string(),
                message: format!("failed to read input: {e}"),
            })?;
        if read == 0 {
            return Err(PractaError::Step {
                practa_type: self.practa_type.to_string(),
                message: "input closed".to_string(),
            });
        }

        match line.trim() {
            "/skip" => Ok(StepResolution::Skipped),
            "/quit" => Err(PractaError::Step {
                practa_type: self.practa_type.to_string(),
                message: "ended by user".to_string(),
            }),
            text => Ok(StepResolution::Completed(PractaOutput::with_content(
                PractaContent::text(text),
            ))),
        }
    }
}

/// Run the `practa flow types` command.
pub fn run_types(query: Option<&str>) -> Result<bool, PractaError> {
    let entries = search_catalog(query.unwrap_or_default());
    for entry in &entries {
        println!(
            "  {:<18} {:<18} {}",
            entry.practa_type.to_string(),
            entry.name,
            entry.description
        );
    }
    Ok(!entries.is_empty())
}

/// Run the `practa flow preset` command.
pub fn run_preset(key: Option<&str>, json: bool) -> Result<bool, PractaError> {
    let Some(key) = key else {
        for preset in presets() {
            let steps: Vec<String> = preset.practas.iter().map(ToString::to_string).collect();
            println!("  {:<18} {:<18} {}", preset.key, preset.name, steps.join(" -> "));
        }
        return Ok(true);
    };

    let flow = PractaRegistry::new()
        .create_preset(key)
        .ok_or_else(|| PractaError::Flow(format!("unknown preset '{key}'")))?;
    if json {
        output::print_json(&flow);
    } else {
        println!("  {} ({})", flow.name, flow.id);
        for (i, practa) in flow.practas.iter().enumerate() {
            println!("    {}. {} [{}]", i + 1, practa.name, practa.id);
        }
    }
    Ok(true)
}

/// Run the `practa flow run` command against stdin.
pub async fn run_preset_flow(key: &str, plain: bool) -> Result<bool, PractaError> {
    let reader: Box<dyn AsyncBufRead + Send + Unpin> =
        Box::new(tokio::io::BufReader::new(tokio::io::stdin()));
    let input: SharedInput = Arc::new(Mutex::new(reader));
    let use_color = output::use_color(plain);
    println!("  Type a response for each step, /skip to skip, /quit to stop.");

    match run_with_input(key, input).await {
        Ok(status) => {
            let mark = match status {
                FlowStatus::Completed => Mark::Ok,
                _ => Mark::Warn,
            };
            println!();
            output::print_line(mark, &format!("flow {status}"), use_color);
            Ok(status == FlowStatus::Completed)
        }
        Err(PractaError::Step { message, .. }) => {
            println!();
            output::print_line(Mark::Warn, &format!("flow aborted: {message}"), use_color);
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

/// Runs a preset with console steps reading from `input`.
pub async fn run_with_input(key: &str, input: SharedInput) -> Result<FlowStatus, PractaError> {
    let flow = PractaRegistry::new()
        .create_preset(key)
        .ok_or_else(|| PractaError::Flow(format!("unknown preset '{key}'")))?;

    let mut runner = FlowRunner::new();
    for practa in &flow.practas {
        runner.register(Arc::new(ConsoleStep::new(practa.practa_type, input.clone())));
    }

    let mut engine = FlowEngine::new();
    engine.on_flow_complete(|state| {
        info!(
            flow_id = %state.flow_id,
            steps = state.practa_outputs.len(),
            "flow completed"
        );
    });

    let state = runner.run(&mut engine, flow).await?;
    Ok(state.status)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(text: &'static str) -> SharedInput {
        let reader: Box<dyn AsyncBufRead + Send + Unpin> =
            Box::new(std::io::Cursor::new(text.as_bytes()));
        Arc::new(Mutex::new(reader))
    }

    #[tokio::test]
    async fn typed_lines_complete_the_flow() {
        let status = run_with_input("quick-reset", input("in 4 out 6\n/skip\n"))
            .await
            .unwrap();
        assert_eq!(status, FlowStatus::Completed);
    }

    #[tokio::test]
    async fn quit_aborts_the_flow() {
        let err = run_with_input("quick-reset", input("/quit\n")).await.unwrap_err();
        match err {
            PractaError::Step { practa_type, message } => {
                assert_eq!(practa_type, "breathwork");
                assert_eq!(message, "ended by user");
            }
            other => panic!("expected step error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn closed_input_aborts_the_flow() {
        let err = run_with_input("quick-reset", input("one line only\n"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("input closed"));
    }

    #[tokio::test]
    async fn unknown_preset_is_an_error() {
        let err = run_with_input("nope", input("")).await.unwrap_err();
        assert!(matches!(err, PractaError::Flow(_)));
    }

    #[test]
    fn preset_listing_and_lookup() {
        assert!(run_preset(None, false).unwrap());
        assert!(run_preset(Some("morning-start"), true).unwrap());
        assert!(run_preset(Some("missing"), false).is_err());
    }

    #[test]
    fn types_query_without_match_reports_failure() {
        assert!(run_types(None).unwrap());
        assert!(!run_types(Some("zzz-no-such-step")).unwrap());
    }
}
