// SPDX-FileCopyrightText: 2026 Practa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock step implementation with scripted outcomes.

use std::collections::VecDeque;

use async_trait::async_trait;
use practa_core::{
    PractaContent, PractaContext, PractaError, PractaOutput, PractaStep, PractaType,
    StepResolution,
};
use tokio::sync::Mutex;

enum Outcome {
    Text(String),
    Skip,
    Fail(String),
}

/// A step that plays back queued outcomes and records every context it sees.
///
/// With an empty queue it completes with the text `"{type} done"`.
pub struct MockStep {
    practa_type: PractaType,
    outcomes: Mutex<VecDeque<Outcome>>,
    contexts: Mutex<Vec<PractaContext>>,
}

impl MockStep {
    pub fn new(practa_type: PractaType) -> Self {
        Self {
            practa_type,
            outcomes: Mutex::new(VecDeque::new()),
            contexts: Mutex::new(Vec::new()),
        }
    }

    /// Queue a completion with text content.
    pub async fn push_text(&self, text: &str) {
        self.outcomes
            .lock()
            .await
            .push_back(Outcome::Text(text.to_string()));
    }

    /// Queue a skip.
    pub async fn push_skip(&self) {
        self.outcomes.lock().await.push_back(Outcome::Skip);
    }

    /// Queue a failure.
    pub async fn push_failure(&self, message: &str) {
        self.outcomes
            .lock()
            .await
            .push_back(Outcome::Fail(message.to_string()));
    }

    /// Contexts received so far, in call order.
    pub async fn contexts(&self) -> Vec<PractaContext> {
        self.contexts.lock().await.clone()
    }
}

#[async_trait]
impl PractaStep for MockStep {
    fn practa_type(&self) -> PractaType {
        self.practa_type
    }

    async fn run(&self, context: PractaContext) -> Result<StepResolution, PractaError> {
        self.contexts.lock().await.push(context);
        let outcome = self
            .outcomes
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Outcome::Text(format!("{} done", self.practa_type)));
        match outcome {
            Outcome::Text(text) => Ok(StepResolution::Completed(PractaOutput::with_content(
                PractaContent::text(text),
            ))),
            Outcome::Skip => Ok(StepResolution::Skipped),
            Outcome::Fail(message) => Err(PractaError::Step {
                practa_type: self.practa_type.to_string(),
                message,
            }),
        }
    }
}
