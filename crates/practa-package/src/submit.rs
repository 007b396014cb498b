// SPDX-FileCopyrightText: 2026 Practa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Marketplace submission transport.
//!
//! [`SubmissionTransport`] is the seam between the packaging pipeline and the
//! network. [`HttpSubmissionTransport`] posts the archive as
//! `multipart/form-data` with a single `file` field.

use std::time::Duration;

use async_trait::async_trait;
use practa_config::model::MarketplaceConfig;
use practa_core::error::PractaError;
use reqwest::multipart::{Form, Part};
use tracing::{debug, info, warn};

/// What the marketplace answered to an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub status: u16,
    pub body: String,
}

/// Delivers a finished archive to the marketplace.
#[async_trait]
pub trait SubmissionTransport: Send + Sync {
    /// Sends `archive` under `file_name`. Non-2xx answers are errors.
    async fn submit(
        &self,
        file_name: &str,
        archive: Vec<u8>,
    ) -> Result<SubmissionReceipt, PractaError>;
}

/// Multipart HTTP transport.
#[derive(Debug, Clone)]
pub struct HttpSubmissionTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSubmissionTransport {
    /// Creates a transport posting to `endpoint`. No timeout unless given.
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self, PractaError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("practa/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| PractaError::Submission {
            message: format!("failed to build HTTP client: {e}"),
            status: None,
            body: None,
        })?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &MarketplaceConfig) -> Result<Self, PractaError> {
        Self::new(
            config.submit_url.clone(),
            config.timeout_secs.map(Duration::from_secs),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SubmissionTransport for HttpSubmissionTransport {
    async fn submit(
        &self,
        file_name: &str,
        archive: Vec<u8>,
    ) -> Result<SubmissionReceipt, PractaError> {
        let size = archive.len();
        let part = Part::bytes(archive)
            .file_name(file_name.to_string())
            .mime_str("application/zip")
            .map_err(|e| PractaError::Submission {
                message: format!("invalid archive MIME type: {e}"),
                status: None,
                body: None,
            })?;
        let form = Form::new().part("file", part);

        debug!(endpoint = %self.endpoint, file_name, size, "posting submission");
        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| PractaError::Submission {
                message: format!("HTTP request failed: {e}"),
                status: None,
                body: None,
            })?;

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(status = %status, error = %e, "failed to read marketplace response");
                return Err(PractaError::Submission {
                    message: format!(
                        "marketplace returned {status} but the response body could not be read: {e}"
                    ),
                    status: Some(status.as_u16()),
                    body: None,
                });
            }
        };

        if !status.is_success() {
            warn!(status = %status, "marketplace rejected submission");
            return Err(PractaError::Submission {
                message: format!("marketplace returned {status}: {body}"),
                status: Some(status.as_u16()),
                body: Some(body),
            });
        }

        info!(status = %status, file_name, "submission accepted");
        Ok(SubmissionReceipt {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use wiremock::matchers::{header_regex, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    /// Accepts one multipart upload, then answers with a body shorter than
    /// its declared length and hangs up.
    async fn truncating_server() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            while !request.ends_with(b"--\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            socket
                .write_all(b"HTTP/1.1 502 Bad Gateway\r\ncontent-length: 100\r\nconnection: close\r\n\r\nshort")
                .await
                .unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn posts_single_file_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/submissions"))
            .and(header_regex("content-type", "^multipart/form-data"))
            .respond_with(ResponseTemplate::new(201).set_body_string(r#"{"id":"sub_1"}"#))
            .expect(1)
            .mount(&server)
            .await;

        let transport =
            HttpSubmissionTransport::new(format!("{}/api/submissions", server.uri()), None)
                .unwrap();
        let receipt = transport
            .submit("calm-tide-1.0.0.zip", b"PK\x03\x04fake".to_vec())
            .await
            .unwrap();
        assert_eq!(receipt.status, 201);
        assert_eq!(receipt.body, r#"{"id":"sub_1"}"#);

        let requests = server.received_requests().await.unwrap();
        let body = String::from_utf8_lossy(&requests[0].body);
        assert!(body.contains(r#"name="file""#));
        assert!(body.contains(r#"filename="calm-tide-1.0.0.zip""#));
        assert_eq!(body.matches("form-data;").count(), 1);
    }

    #[tokio::test]
    async fn non_success_surfaces_status_and_body_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(422).set_body_string("version already exists"))
            .mount(&server)
            .await;

        let transport = HttpSubmissionTransport::new(server.uri(), None).unwrap();
        let err = transport.submit("x.zip", vec![1, 2, 3]).await.unwrap_err();
        match err {
            PractaError::Submission { status, body, .. } => {
                assert_eq!(status, Some(422));
                assert_eq!(body.as_deref(), Some("version already exists"));
            }
            other => panic!("expected Submission error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_an_error() {
        let transport = HttpSubmissionTransport::new(
            "http://127.0.0.1:1/submit",
            Some(Duration::from_secs(2)),
        )
        .unwrap();
        let err = transport.submit("x.zip", vec![]).await.unwrap_err();
        assert!(matches!(err, PractaError::Submission { status: None, .. }));
    }

    #[test]
    fn from_config_uses_submit_url() {
        let transport = HttpSubmissionTransport::from_config(&MarketplaceConfig::default()).unwrap();
        assert_eq!(
            transport.endpoint(),
            "https://marketplace.practa.app/api/submissions"
        );
    }

    #[tokio::test]
    async fn unreadable_response_body_is_reported() {
        let endpoint = truncating_server().await;
        let transport = HttpSubmissionTransport::new(endpoint, None).unwrap();
        let err = transport.submit("x.zip", vec![1, 2, 3]).await.unwrap_err();
        match err {
            PractaError::Submission {
                message,
                status,
                body,
            } => {
                assert_eq!(status, Some(502));
                assert!(body.is_none());
                assert!(message.contains("could not be read"), "{message}");
            }
            other => panic!("expected Submission error, got {other:?}"),
        }
    }
}
