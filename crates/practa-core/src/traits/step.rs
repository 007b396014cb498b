// SPDX-FileCopyrightText: 2026 Practa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Runtime contract for a single interactive step.

use async_trait::async_trait;

use crate::error::PractaError;
use crate::types::{PractaContext, PractaOutput, PractaType};

/// How a step finished.
///
/// A step resolves to exactly one of these values, exactly once: the
/// signature of [`PractaStep::run`] leaves no way to complete twice or to
/// both complete and skip.
#[derive(Debug, Clone, PartialEq)]
pub enum StepResolution {
    /// The user finished the step and produced output.
    Completed(PractaOutput),
    /// The user skipped the step.
    Skipped,
}

/// An externally-owned step implementation (rendering, audio, input capture).
///
/// The flow runner hands each step the context of the step before it and
/// waits for its resolution.
#[async_trait]
pub trait PractaStep: Send + Sync {
    /// The step kind this implementation renders.
    fn practa_type(&self) -> PractaType;

    /// Runs the step to completion.
    async fn run(&self, context: PractaContext) -> Result<StepResolution, PractaError>;
}
