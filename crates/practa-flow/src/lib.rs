// SPDX-FileCopyrightText: 2026 Practa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Step catalog, flow builder, and the single-flow execution engine.
//!
//! The [`PractaRegistry`] turns step kinds into definitions, the
//! [`FlowEngine`] tracks one running flow, and the [`FlowRunner`] drives the
//! engine through registered step implementations.

pub mod catalog;
pub mod engine;
pub mod registry;
pub mod runner;

pub use catalog::{PractaEntry, Preset, builtin_catalog, presets, search_catalog};
pub use engine::{CompletionHandler, FlowEngine, IgnoredReason, Transition};
pub use registry::{CreateFlowOptions, PractaRegistry};
pub use runner::FlowRunner;
