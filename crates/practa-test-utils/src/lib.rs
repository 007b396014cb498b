// SPDX-FileCopyrightText: 2026 Practa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Practa integration tests.
//!
//! Provides mock collaborators and fixtures for fast, deterministic,
//! CI-runnable tests without network access.
//!
//! # Components
//!
//! - [`MockTransport`] - Submission transport that records calls
//! - [`MockUpstream`] - Upstream template source with settable head
//! - [`MockStep`] - Step implementation with scripted outcomes
//! - [`PluginFixture`] - Temporary plugin directory builder

pub mod fixture;
pub mod mock_step;
pub mod mock_transport;
pub mod mock_upstream;

pub use fixture::{PluginFixture, sample_metadata};
pub use mock_step::MockStep;
pub use mock_transport::MockTransport;
pub use mock_upstream::{MockUpstream, build_tarball};
