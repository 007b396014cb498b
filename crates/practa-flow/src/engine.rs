// SPDX-FileCopyrightText: 2026 Practa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Single-flow execution engine.
//!
//! A flow goes through states: Running -> Completed | Aborted. Both terminal
//! states are final. The engine holds at most one flow; starting another
//! replaces it.
//!
//! Mutations never fail. Calls that do not apply to the current state leave
//! it untouched and report why through [`Transition::Ignored`].

use std::sync::Arc;

use chrono::Utc;
use practa_core::types::{
    FlowDefinition, FlowExecutionState, FlowStatus, PractaContext, PractaDefinition,
    PractaOutput, PreviousPracta,
};
use tracing::{debug, info};

/// Callback invoked once when a flow reaches `Completed`.
pub type CompletionHandler = Arc<dyn Fn(FlowExecutionState) + Send + Sync>;

/// Why a mutating call had no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredReason {
    /// No flow has been started on this engine.
    NotStarted,
    /// The flow already reached the given terminal status.
    AlreadyFinished(FlowStatus),
}

/// Outcome of a mutating engine call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The step was recorded and the flow moved on to `index`.
    Advanced { index: usize },
    /// The last step was recorded; the flow is completed.
    Completed,
    /// The flow was aborted.
    Aborted,
    /// Nothing changed.
    Ignored(IgnoredReason),
}

/// Owns the execution state of one flow at a time.
#[derive(Default)]
pub struct FlowEngine {
    state: Option<FlowExecutionState>,
    on_complete: Option<CompletionHandler>,
}

impl std::fmt::Debug for FlowEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlowEngine")
            .field("state", &self.state)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

impl FlowEngine {
    /// Creates an engine with no flow and no completion handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the handler fired when a flow completes.
    ///
    /// The handler runs on a separate task after the completing call has
    /// returned, so it may lock and re-enter the engine. Aborted flows do not
    /// fire it.
    pub fn on_flow_complete<F>(&mut self, handler: F)
    where
        F: Fn(FlowExecutionState) + Send + Sync + 'static,
    {
        self.on_complete = Some(Arc::new(handler));
    }

    /// Starts `definition`, replacing any flow already held. Returns the new flow id.
    ///
    /// A definition with no steps is completed on the spot.
    pub fn start_flow(&mut self, definition: FlowDefinition) -> String {
        let flow_id = uuid::Uuid::new_v4().to_string();

        if let Some(previous) = &self.state
            && previous.status == FlowStatus::Running
        {
            info!(flow_id = %previous.flow_id, "replacing in-flight flow");
        }

        let empty = definition.is_empty();
        self.state = Some(FlowExecutionState {
            flow_id: flow_id.clone(),
            flow_definition: definition,
            current_index: 0,
            practa_outputs: Vec::new(),
            status: FlowStatus::Running,
            started_at: Utc::now(),
            completed_at: None,
        });
        info!(flow_id = %flow_id, "flow started");

        if empty {
            self.finish(FlowStatus::Completed);
        }
        flow_id
    }

    /// Records the current step's output and advances.
    pub fn complete_current_practa(&mut self, output: PractaOutput) -> Transition {
        let state = match self.running_state() {
            Ok(state) => state,
            Err(reason) => {
                debug!(?reason, "complete_current_practa ignored");
                return Transition::Ignored(reason);
            }
        };

        state.practa_outputs.push(output);
        state.current_index += 1;
        let index = state.current_index;
        debug!(flow_id = %state.flow_id, index, "practa completed");

        if index >= state.flow_definition.len() {
            self.finish(FlowStatus::Completed);
            Transition::Completed
        } else {
            Transition::Advanced { index }
        }
    }

    /// Aborts the running flow. Repeated calls are no-ops.
    pub fn abort_flow(&mut self) -> Transition {
        match self.running_state() {
            Ok(_) => {
                self.finish(FlowStatus::Aborted);
                Transition::Aborted
            }
            Err(reason) => Transition::Ignored(reason),
        }
    }

    /// Context for the current step: its index and the immediately
    /// preceding step's result. `None` unless a flow is running.
    pub fn current_practa_context(&self) -> Option<PractaContext> {
        let state = self.state.as_ref()?;
        if state.status != FlowStatus::Running {
            return None;
        }

        let previous = state.current_index.checked_sub(1).and_then(|prev| {
            let definition = state.flow_definition.practas.get(prev)?;
            let output = state.practa_outputs.get(prev)?;
            Some(PreviousPracta {
                practa_id: definition.id.clone(),
                practa_type: definition.practa_type,
                content: output.content.clone(),
                metadata: output.metadata.clone(),
            })
        });

        Some(PractaContext {
            flow_id: state.flow_id.clone(),
            practa_index: state.current_index,
            previous,
        })
    }

    /// Definition of the step awaiting completion, if a flow is running.
    pub fn current_practa(&self) -> Option<&PractaDefinition> {
        let state = self.state.as_ref()?;
        if state.status != FlowStatus::Running {
            return None;
        }
        state.flow_definition.practas.get(state.current_index)
    }

    /// The held flow state, whatever its status.
    pub fn state(&self) -> Option<&FlowExecutionState> {
        self.state.as_ref()
    }

    /// Returns true if a flow is running.
    pub fn is_running(&self) -> bool {
        self.state
            .as_ref()
            .is_some_and(|s| s.status == FlowStatus::Running)
    }

    fn running_state(&mut self) -> Result<&mut FlowExecutionState, IgnoredReason> {
        match self.state.as_mut() {
            None => Err(IgnoredReason::NotStarted),
            Some(state) if state.status.is_terminal() => {
                Err(IgnoredReason::AlreadyFinished(state.status))
            }
            Some(state) => Ok(state),
        }
    }

    /// Moves a running flow to `status`. Must only be called while running.
    fn finish(&mut self, status: FlowStatus) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        state.status = status;
        state.completed_at = Some(Utc::now());
        info!(
            flow_id = %state.flow_id,
            status = %status,
            outputs = state.practa_outputs.len(),
            "flow finished"
        );

        if status == FlowStatus::Completed {
            let snapshot = state.clone();
            self.notify_completed(snapshot);
        }
    }

    /// Schedules the completion handler outside the current call stack.
    fn notify_completed(&self, snapshot: FlowExecutionState) {
        let Some(handler) = self.on_complete.clone() else {
            return;
        };
        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                runtime.spawn(async move { handler(snapshot) });
            }
            Err(_) => {
                std::thread::spawn(move || handler(snapshot));
            }
        }
    }
}
