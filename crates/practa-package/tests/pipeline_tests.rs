// SPDX-FileCopyrightText: 2026 Practa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for validation, asset audit, and the packaging pipeline.

use std::io::{Cursor, Read};
use std::sync::Arc;

use practa_core::{AssetValidationResult, PractaError};
use practa_package::metadata::{self, PluginLayout};
use practa_package::{AssetAuditor, PackagingPipeline};
use practa_test_utils::{MockTransport, PluginFixture, sample_metadata};

fn pipeline() -> (Arc<MockTransport>, PackagingPipeline) {
    let transport = Arc::new(MockTransport::new());
    (transport.clone(), PackagingPipeline::new(transport))
}

#[tokio::test]
async fn invalid_audit_makes_no_network_call() {
    let (_tmp, dir) = PluginFixture::new("calm-tide")
        .declare("chime", "assets/chime.mp3")
        .build();
    let audit = AssetAuditor::default().audit(&dir);
    assert!(!audit.valid);

    let (transport, pipeline) = pipeline();
    let err = pipeline
        .submit(&dir, &sample_metadata("calm-tide"), &audit)
        .await
        .unwrap_err();

    assert!(matches!(err, PractaError::AssetsInvalid { error_count: 1 }));
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn valid_plugin_is_submitted_once_as_zip() {
    let (_tmp, dir) = PluginFixture::new("calm-tide")
        .asset("wave", "assets/wave.mp3", 64)
        .build();
    let audit = AssetAuditor::default().audit(&dir);
    assert!(audit.valid, "{:?}", audit.errors);

    let (transport, pipeline) = pipeline();
    let receipt = pipeline
        .submit(&dir, &sample_metadata("calm-tide"), &audit)
        .await
        .unwrap();
    assert_eq!(receipt.status, 201);
    assert_eq!(transport.calls(), 1);

    let recorded = transport.recorded().await;
    assert_eq!(recorded[0].file_name, "calm-tide-1.0.0.zip");

    let mut zip = zip::ZipArchive::new(Cursor::new(recorded[0].archive.clone())).unwrap();
    let mut manifest = String::new();
    zip.by_name("manifest.json")
        .unwrap()
        .read_to_string(&mut manifest)
        .unwrap();
    let manifest: serde_json::Value = serde_json::from_str(&manifest).unwrap();
    assert_eq!(manifest["id"], "calm-tide");
    assert_eq!(manifest["category"], "wellbeing");
    assert!(zip.by_name("assets/wave.mp3").is_ok());
    assert!(zip.by_name("index.tsx").is_ok());
}

#[tokio::test]
async fn rejected_submission_surfaces_status_and_body() {
    let (_tmp, dir) = PluginFixture::new("calm-tide").build();
    let transport = Arc::new(MockTransport::with_responses(vec![(
        409,
        "duplicate version".to_string(),
    )]));
    let pipeline = PackagingPipeline::new(transport.clone());

    let err = pipeline
        .submit(
            &dir,
            &sample_metadata("calm-tide"),
            &AssetValidationResult::default(),
        )
        .await
        .unwrap_err();
    match err {
        PractaError::Submission { status, body, .. } => {
            assert_eq!(status, Some(409));
            assert_eq!(body.as_deref(), Some("duplicate version"));
        }
        other => panic!("expected Submission error, got {other:?}"),
    }
    assert_eq!(transport.calls(), 1);
}

#[test]
fn download_writes_archive_and_names_it() {
    let (_tmp, dir) = PluginFixture::new("calm-tide").build();
    let (_, pipeline) = pipeline();

    let mut buffer = Cursor::new(Vec::new());
    let name = pipeline
        .download(&dir, &sample_metadata("calm-tide"), &mut buffer)
        .unwrap();
    assert_eq!(name, "calm-tide-1.0.0.zip");

    let zip = zip::ZipArchive::new(Cursor::new(buffer.into_inner())).unwrap();
    assert!(zip.file_names().any(|n| n == "README.md"));
}

#[test]
fn total_size_ignores_declarations() {
    let (_tmp, dir) = PluginFixture::new("calm-tide")
        .asset("a", "assets/a.png", 100)
        .file("assets/undeclared/b.ogg", 250)
        .file("assets/c.txt", 7)
        .build();
    let audit = AssetAuditor::default().audit(&dir);
    assert_eq!(audit.total_size_bytes, 357);
    assert_eq!(audit.file_count, 3);
    assert!(audit.valid);
}

#[test]
fn layout_validation_reads_plugin_files() {
    let (_tmp, dir) = PluginFixture::new("calm-tide")
        .metadata_field("version", serde_json::json!("1.0"))
        .without_entry()
        .build();
    let report = PluginLayout::new(&dir).validate().unwrap();
    assert!(!report.is_valid);
    assert_eq!(report.errors.len(), 2);

    let typed = metadata::read(&dir.join("metadata.json")).unwrap();
    assert_eq!(typed.version, "1.0");
}
