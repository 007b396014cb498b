// SPDX-FileCopyrightText: 2026 Practa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait definitions for pluggable step implementations.

pub mod step;

pub use step::{PractaStep, StepResolution};
