// SPDX-FileCopyrightText: 2026 Practa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests driving preset flows through the runner.

use std::sync::Arc;

use practa_core::{FlowStatus, PractaError, PractaType};
use practa_flow::{FlowEngine, FlowRunner, PractaRegistry};
use practa_test_utils::MockStep;
use tokio::sync::mpsc;

fn runner_for(steps: &[Arc<MockStep>]) -> FlowRunner {
    let mut runner = FlowRunner::new();
    for step in steps {
        runner.register(step.clone());
    }
    runner
}

#[tokio::test]
async fn morning_preset_threads_each_output_forward() {
    let intention = Arc::new(MockStep::new(PractaType::IntentionSetting));
    let breath = Arc::new(MockStep::new(PractaType::Breathwork));
    let journal = Arc::new(MockStep::new(PractaType::Journal));
    intention.push_text("be patient").await;
    breath.push_skip().await;

    let runner = runner_for(&[intention.clone(), breath.clone(), journal.clone()]);
    let registry = PractaRegistry::new();
    let mut engine = FlowEngine::new();

    let (tx, mut rx) = mpsc::unbounded_channel();
    engine.on_flow_complete(move |state| {
        let _ = tx.send(state);
    });

    let state = runner
        .run(&mut engine, registry.create_preset("morning-start").unwrap())
        .await
        .unwrap();
    assert_eq!(state.status, FlowStatus::Completed);
    assert_eq!(state.practa_outputs.len(), 3);

    let seen = breath.contexts().await;
    let previous = seen[0].previous.as_ref().unwrap();
    assert_eq!(previous.practa_type, PractaType::IntentionSetting);
    assert_eq!(previous.content.as_ref().unwrap().value, "be patient");

    // The journal sees the skipped breathwork step, not the intention.
    let seen = journal.contexts().await;
    let previous = seen[0].previous.as_ref().unwrap();
    assert_eq!(previous.practa_type, PractaType::Breathwork);
    assert!(previous.content.is_none());
    assert_eq!(previous.metadata["skipped"], true);

    let notified = rx.recv().await.unwrap();
    assert_eq!(notified.flow_id, state.flow_id);
}

#[tokio::test]
async fn step_failure_aborts_without_notification() {
    let gratitude = Arc::new(MockStep::new(PractaType::Gratitude));
    let scan = Arc::new(MockStep::new(PractaType::BodyScan));
    let sit = Arc::new(MockStep::new(PractaType::SilentMeditation));
    scan.push_failure("audio device lost").await;

    let runner = runner_for(&[gratitude, scan, sit.clone()]);
    let mut engine = FlowEngine::new();
    let (tx, mut rx) = mpsc::unbounded_channel::<()>();
    engine.on_flow_complete(move |_| {
        let _ = tx.send(());
    });

    let err = runner
        .run(
            &mut engine,
            PractaRegistry::new().create_preset("evening-wind-down").unwrap(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, PractaError::Step { .. }));
    assert_eq!(engine.state().unwrap().status, FlowStatus::Aborted);
    assert!(sit.contexts().await.is_empty());

    drop(engine);
    assert!(rx.recv().await.is_none());
}
