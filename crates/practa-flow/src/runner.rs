// SPDX-FileCopyrightText: 2026 Practa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Drives a [`FlowEngine`] through registered [`PractaStep`] implementations.

use std::collections::HashMap;
use std::sync::Arc;

use practa_core::error::PractaError;
use practa_core::traits::{PractaStep, StepResolution};
use practa_core::types::{FlowDefinition, FlowExecutionState, PractaOutput, PractaType};
use tracing::{info, warn};

use crate::engine::FlowEngine;

/// Maps step kinds to their implementations.
#[derive(Default)]
pub struct FlowRunner {
    steps: HashMap<PractaType, Arc<dyn PractaStep>>,
}

impl FlowRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a step implementation, replacing any earlier one for the same kind.
    pub fn register(&mut self, step: Arc<dyn PractaStep>) {
        let practa_type = step.practa_type();
        if self.steps.insert(practa_type, step).is_some() {
            warn!(%practa_type, "replaced step implementation");
        }
    }

    /// Kinds with a registered implementation, sorted.
    pub fn registered(&self) -> Vec<PractaType> {
        let mut types: Vec<PractaType> = self.steps.keys().copied().collect();
        types.sort();
        types
    }

    /// Runs `definition` to a terminal state on `engine`.
    ///
    /// Every step kind must be registered before anything starts. A failing
    /// step aborts the flow and its error is returned.
    pub async fn run(
        &self,
        engine: &mut FlowEngine,
        definition: FlowDefinition,
    ) -> Result<FlowExecutionState, PractaError> {
        if let Some(missing) = definition
            .practas
            .iter()
            .find(|p| !self.steps.contains_key(&p.practa_type))
        {
            return Err(PractaError::Flow(format!(
                "no step implementation registered for '{}'",
                missing.practa_type
            )));
        }

        engine.start_flow(definition);

        while engine.is_running() {
            let Some(context) = engine.current_practa_context() else {
                break;
            };
            let Some(practa_type) = engine.current_practa().map(|p| p.practa_type) else {
                break;
            };
            let Some(step) = self.steps.get(&practa_type) else {
                engine.abort_flow();
                return Err(PractaError::Flow(format!(
                    "no step implementation registered for '{practa_type}'"
                )));
            };

            let output = match step.run(context).await {
                Ok(StepResolution::Completed(output)) => output,
                Ok(StepResolution::Skipped) => {
                    info!(%practa_type, "step skipped");
                    PractaOutput::default().with_metadata("skipped", serde_json::Value::Bool(true))
                }
                Err(e) => {
                    warn!(%practa_type, error = %e, "step failed, aborting flow");
                    engine.abort_flow();
                    return Err(match e {
                        PractaError::Step { .. } => e,
                        other => PractaError::Step {
                            practa_type: practa_type.to_string(),
                            message: other.to_string(),
                        },
                    });
                }
            };
            engine.complete_current_practa(output);
        }

        engine
            .state()
            .cloned()
            .ok_or_else(|| PractaError::Internal("flow state missing after run".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use practa_core::types::{FlowStatus, PractaContent, PractaContext};
    use std::sync::Mutex;

    use super::*;
    use crate::registry::{CreateFlowOptions, PractaRegistry};

    /// Echoes the previous step's text with a suffix and records every context it sees.
    struct EchoStep {
        practa_type: PractaType,
        seen: Mutex<Vec<PractaContext>>,
    }

    impl EchoStep {
        fn new(practa_type: PractaType) -> Arc<Self> {
            Arc::new(Self {
                practa_type,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl PractaStep for EchoStep {
        fn practa_type(&self) -> PractaType {
            self.practa_type
        }

        async fn run(&self, context: PractaContext) -> Result<StepResolution, PractaError> {
            let prior = context
                .previous
                .as_ref()
                .and_then(|p| p.content.as_ref())
                .and_then(|c| c.value.as_str())
                .unwrap_or("")
                .to_string();
            self.seen.lock().unwrap().push(context);
            Ok(StepResolution::Completed(PractaOutput::with_content(
                PractaContent::text(format!("{prior}+{}", self.practa_type)),
            )))
        }
    }

    struct SkipStep(PractaType);

    #[async_trait]
    impl PractaStep for SkipStep {
        fn practa_type(&self) -> PractaType {
            self.0
        }

        async fn run(&self, _context: PractaContext) -> Result<StepResolution, PractaError> {
            Ok(StepResolution::Skipped)
        }
    }

    struct FailStep(PractaType);

    #[async_trait]
    impl PractaStep for FailStep {
        fn practa_type(&self) -> PractaType {
            self.0
        }

        async fn run(&self, _context: PractaContext) -> Result<StepResolution, PractaError> {
            Err(PractaError::Internal("timer crashed".to_string()))
        }
    }

    fn flow(types: &[PractaType]) -> FlowDefinition {
        PractaRegistry::new().create_flow("runner", types, CreateFlowOptions::default())
    }

    #[tokio::test]
    async fn runs_every_step_and_threads_context() {
        let journal = EchoStep::new(PractaType::Journal);
        let meditation = EchoStep::new(PractaType::SilentMeditation);
        let mut runner = FlowRunner::new();
        runner.register(journal.clone());
        runner.register(meditation.clone());

        let mut engine = FlowEngine::new();
        let state = runner
            .run(
                &mut engine,
                flow(&[PractaType::Journal, PractaType::SilentMeditation]),
            )
            .await
            .unwrap();

        assert_eq!(state.status, FlowStatus::Completed);
        assert_eq!(state.practa_outputs.len(), 2);
        assert_eq!(
            state.practa_outputs[1].content.as_ref().unwrap().value,
            "+journal+silent-meditation"
        );

        let seen = meditation.seen.lock().unwrap();
        assert_eq!(seen[0].practa_index, 1);
        assert_eq!(seen[0].previous.as_ref().unwrap().practa_type, PractaType::Journal);
        assert!(journal.seen.lock().unwrap()[0].previous.is_none());
    }

    #[tokio::test]
    async fn skipped_step_records_marker() {
        let mut runner = FlowRunner::new();
        runner.register(Arc::new(SkipStep(PractaType::Breathwork)));
        runner.register(EchoStep::new(PractaType::Journal));

        let mut engine = FlowEngine::new();
        let state = runner
            .run(&mut engine, flow(&[PractaType::Breathwork, PractaType::Journal]))
            .await
            .unwrap();

        assert_eq!(state.status, FlowStatus::Completed);
        assert!(state.practa_outputs[0].content.is_none());
        assert_eq!(state.practa_outputs[0].metadata["skipped"], true);
    }

    #[tokio::test]
    async fn failing_step_aborts_flow() {
        let mut runner = FlowRunner::new();
        runner.register(EchoStep::new(PractaType::Journal));
        runner.register(Arc::new(FailStep(PractaType::BodyScan)));

        let mut engine = FlowEngine::new();
        let err = runner
            .run(&mut engine, flow(&[PractaType::Journal, PractaType::BodyScan]))
            .await
            .unwrap_err();

        match err {
            PractaError::Step {
                practa_type,
                message,
            } => {
                assert_eq!(practa_type, "body-scan");
                assert!(message.contains("timer crashed"));
            }
            other => panic!("expected Step error, got {other:?}"),
        }
        let state = engine.state().unwrap();
        assert_eq!(state.status, FlowStatus::Aborted);
        assert_eq!(state.practa_outputs.len(), 1);
    }

    #[tokio::test]
    async fn missing_implementation_is_rejected_before_start() {
        let mut runner = FlowRunner::new();
        runner.register(EchoStep::new(PractaType::Journal));

        let mut engine = FlowEngine::new();
        let err = runner
            .run(&mut engine, flow(&[PractaType::Journal, PractaType::Gratitude]))
            .await
            .unwrap_err();

        assert!(matches!(err, PractaError::Flow(ref m) if m.contains("gratitude")));
        assert!(engine.state().is_none());
    }

    #[test]
    fn registered_is_sorted_and_deduplicated() {
        let mut runner = FlowRunner::new();
        runner.register(EchoStep::new(PractaType::Reflection));
        runner.register(EchoStep::new(PractaType::Journal));
        runner.register(EchoStep::new(PractaType::Journal));
        assert_eq!(
            runner.registered(),
            vec![PractaType::Journal, PractaType::Reflection]
        );
    }
}
