// SPDX-FileCopyrightText: 2026 Practa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock submission transport.
//!
//! `MockTransport` implements `SubmissionTransport` without a network,
//! recording every archive it receives so tests can assert on call counts.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use practa_core::PractaError;
use practa_package::{SubmissionReceipt, SubmissionTransport};
use tokio::sync::Mutex;

/// One recorded submission.
#[derive(Debug, Clone)]
pub struct RecordedSubmission {
    pub file_name: String,
    pub archive: Vec<u8>,
}

/// A transport that answers from a FIFO queue of `(status, body)` pairs.
///
/// When the queue is empty it answers `201` with an empty body. Non-2xx
/// statuses become `PractaError::Submission`, like the HTTP transport.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<(u16, String)>>,
    calls: AtomicUsize,
    recorded: Arc<Mutex<Vec<RecordedSubmission>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport pre-loaded with responses.
    pub fn with_responses(responses: Vec<(u16, String)>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::from(responses)),
            ..Self::default()
        }
    }

    /// Number of `submit` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Everything submitted so far.
    pub async fn recorded(&self) -> Vec<RecordedSubmission> {
        self.recorded.lock().await.clone()
    }
}

#[async_trait]
impl SubmissionTransport for MockTransport {
    async fn submit(
        &self,
        file_name: &str,
        archive: Vec<u8>,
    ) -> Result<SubmissionReceipt, PractaError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.recorded.lock().await.push(RecordedSubmission {
            file_name: file_name.to_string(),
            archive,
        });

        let (status, body) = self
            .responses
            .lock()
            .await
            .pop_front()
            .unwrap_or((201, String::new()));

        if (200..300).contains(&status) {
            Ok(SubmissionReceipt { status, body })
        } else {
            Err(PractaError::Submission {
                message: format!("marketplace returned {status}: {body}"),
                status: Some(status),
                body: Some(body),
            })
        }
    }
}
