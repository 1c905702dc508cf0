// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

//! End-to-end scenarios across stages
//!
//! Each scenario wires real workers to shared primitives with scripted
//! randomness and paused time, then checks ordering between stages.

use rf_core::{
    CompletionGate, GateName, ProgressCounter, RecordingObserver, ResourcePool, RobotId, RunFlag,
    ScriptedRandom, Stage, StageEvent, StdRandom,
};
use rf_engine::params::{
    AssemblyParams, ExtractorParams, FinalOperationParams, FirmwareParams,
};
use rf_engine::workers::{BasicAssembler, FinalOperator, FirmwareLoader, FuelExtractor};
use rf_engine::{
    Factory, FactoryParams, ShutdownSignal, StageOutcome, WorkerContext, ASSEMBLERS,
    FINAL_OPERATOR, FIRMWARE_LOADER, FUEL_EXTRACTOR,
};
use std::time::Duration;
use tokio::time::{sleep, Instant};

const FAULT: u32 = 1;
const OK: u32 = 100;

fn ctx(
    robot: RobotId,
    random: ScriptedRandom,
    observer: &RecordingObserver,
    shutdown: &ShutdownSignal,
) -> WorkerContext<ScriptedRandom, RecordingObserver> {
    WorkerContext::new(robot, random, observer.clone(), shutdown.clone())
}

/// Position of the first record matching `pred`
fn position(events: &[StageEvent], pred: impl Fn(&StageEvent) -> bool) -> Option<usize> {
    events.iter().position(pred)
}

fn is_gate(gate: GateName) -> impl Fn(&StageEvent) -> bool {
    move |e| matches!(e, StageEvent::GateOpened { gate: g, .. } if *g == gate)
}

fn is_work_of(robot: RobotId) -> impl Fn(&StageEvent) -> bool {
    move |e| {
        e.robot() == robot
            && matches!(
                e,
                StageEvent::Progress { .. } | StageEvent::Fault { .. } | StageEvent::Starved { .. }
            )
    }
}

// =============================================================================
// Scenario A: basic construction gates firmware loading
// =============================================================================

#[tokio::test(start_paused = true)]
async fn firmware_waits_for_basic_construction_threshold() {
    let observer = RecordingObserver::new();
    let shutdown = ShutdownSignal::new();
    let basic = ProgressCounter::new();
    let firmware = ProgressCounter::new();
    let basic_done = CompletionGate::new();
    let firmware_done = CompletionGate::new();

    let script = [15, 18, 12, 20, 10, 14, 16, 11, 19, 13];
    let assembly_random = ScriptedRandom::new(script);

    let loader = FirmwareLoader::new(
        ctx(FIRMWARE_LOADER, ScriptedRandom::new([30, OK, 30, OK, 30, OK, 30, OK]), &observer, &shutdown),
        FirmwareParams::default(),
        firmware.clone(),
        basic_done.clone(),
        firmware_done.clone(),
    );
    let loader = tokio::spawn(loader.run());

    let assemblers: Vec<_> = ASSEMBLERS
        .iter()
        .map(|robot| {
            let assembler = BasicAssembler::new(
                ctx(*robot, assembly_random.clone(), &observer, &shutdown),
                AssemblyParams::default(),
                basic.clone(),
                basic_done.clone(),
            );
            tokio::spawn(assembler.run())
        })
        .collect();

    for assembler in assemblers {
        assert_eq!(assembler.await.unwrap(), StageOutcome::Finished);
    }
    assert_eq!(loader.await.unwrap(), StageOutcome::Finished);

    // No lost updates: the counter is the exact sum of every drawn increment
    let consumed = script.len() - assembly_random.remaining();
    let drawn: u32 = script[..consumed].iter().sum();
    assert_eq!(basic.get(), i64::from(drawn));

    let events = observer.events();
    let gate_at = position(&events, is_gate(GateName::BasicConstruction)).unwrap();
    let first_firmware = position(&events, is_work_of(FIRMWARE_LOADER)).unwrap();
    assert!(gate_at < first_firmware);

    // The gate value is the running total at the first crossing
    let StageEvent::GateOpened { value, .. } = &events[gate_at] else {
        panic!("expected gate record");
    };
    let first_crossing = events
        .iter()
        .find_map(|e| match e {
            StageEvent::Progress {
                stage: Stage::BasicConstruction,
                value,
                ..
            } if *value >= 100 => Some(*value),
            _ => None,
        })
        .unwrap();
    assert!(*value >= 100);
    assert_eq!(*value, first_crossing);

    // Every basic construction record before the gate is below target
    for event in &events[..gate_at] {
        if let StageEvent::Progress { value, .. } = event {
            assert!(*value < 100 || *value == first_crossing);
        }
    }

    assert_eq!(firmware.get(), 120);
    assert!(firmware_done.is_signaled());
}

// =============================================================================
// Scenario B: firmware faults and the firmware gate
// =============================================================================

#[tokio::test(start_paused = true)]
async fn firmware_fault_discards_attempt_and_delays_final_operation() {
    let observer = RecordingObserver::new();
    let shutdown = ShutdownSignal::new();
    let firmware = ProgressCounter::new();
    let final_progress = ProgressCounter::new();
    let basic_done = CompletionGate::new();
    let firmware_done = CompletionGate::new();
    let pool = ResourcePool::with_balance(10_000);
    let run_flag = RunFlag::new();
    basic_done.signal();

    let loader = FirmwareLoader::new(
        ctx(
            FIRMWARE_LOADER,
            ScriptedRandom::new([30, OK, 35, FAULT, 25, OK, 25, OK, 30, OK]),
            &observer,
            &shutdown,
        ),
        FirmwareParams::default(),
        firmware.clone(),
        basic_done.clone(),
        firmware_done.clone(),
    );
    let operator = FinalOperator::new(
        ctx(FINAL_OPERATOR, ScriptedRandom::new([400; 10]), &observer, &shutdown),
        FinalOperationParams::default(),
        final_progress.clone(),
        pool.clone(),
        firmware_done.clone(),
        run_flag.clone(),
    );
    let loader = tokio::spawn(loader.run());
    let operator = tokio::spawn(operator.run());

    // Four attempts done, one of them faulted
    sleep(Duration::from_millis(3500)).await;
    assert_eq!(firmware.get(), 30 + 25 + 25);
    assert!(!firmware_done.is_signaled());
    assert_eq!(final_progress.get(), 0);

    assert_eq!(loader.await.unwrap(), StageOutcome::Finished);
    assert_eq!(firmware.get(), 30 + 25 + 25 + 30);
    assert_eq!(operator.await.unwrap(), StageOutcome::Finished);

    let events = observer.events();
    let faults: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, StageEvent::Fault { .. }))
        .collect();
    assert_eq!(faults.len(), 1);

    let gate_at = position(&events, is_gate(GateName::Firmware)).unwrap();
    let first_final = position(&events, is_work_of(FINAL_OPERATOR)).unwrap();
    assert!(gate_at < first_final);
    assert_eq!(
        events[gate_at],
        StageEvent::GateOpened {
            robot: FIRMWARE_LOADER,
            stage: Stage::FirmwareLoading,
            gate: GateName::Firmware,
            value: 110,
        }
    );
    assert_eq!(pool.balance(), 10_000 - 10 * 400);
}

// =============================================================================
// Scenario C: final operation blocks on fuel
// =============================================================================

#[tokio::test(start_paused = true)]
async fn final_operation_blocks_until_fuel_arrives() {
    let observer = RecordingObserver::new();
    let shutdown = ShutdownSignal::new();
    let progress = ProgressCounter::new();
    let pool = ResourcePool::with_balance(400);
    let firmware_done = CompletionGate::new();
    firmware_done.signal();

    let operator = FinalOperator::new(
        ctx(FINAL_OPERATOR, ScriptedRandom::new([600]), &observer, &shutdown),
        FinalOperationParams::default(),
        progress.clone(),
        pool.clone(),
        firmware_done,
        RunFlag::new(),
    );
    let operator = tokio::spawn(operator.run());

    sleep(Duration::from_secs(10)).await;
    assert_eq!(pool.balance(), 400);
    assert_eq!(progress.get(), 0);

    assert_eq!(pool.produce(300), 700);
    sleep(Duration::from_millis(1)).await;
    assert_eq!(pool.balance(), 100);
    assert_eq!(progress.get(), 10);

    shutdown.trigger();
    assert_eq!(operator.await.unwrap(), StageOutcome::Cancelled);
    assert_eq!(pool.balance(), 100);
}

// =============================================================================
// Scenario D: final operation stops fuel extraction
// =============================================================================

#[tokio::test(start_paused = true)]
async fn completed_final_operation_stops_extractor() {
    let observer = RecordingObserver::new();
    let shutdown = ShutdownSignal::new();
    let pool = ResourcePool::new();
    let run_flag = RunFlag::new();
    let firmware_done = CompletionGate::new();
    firmware_done.signal();

    let extractor = FuelExtractor::new(
        ctx(FUEL_EXTRACTOR, ScriptedRandom::new([700; 64]), &observer, &shutdown),
        ExtractorParams::default(),
        pool.clone(),
        run_flag.clone(),
    );
    let operator = FinalOperator::new(
        ctx(FINAL_OPERATOR, ScriptedRandom::new([600; 10]), &observer, &shutdown),
        FinalOperationParams::default(),
        ProgressCounter::new(),
        pool.clone(),
        firmware_done,
        run_flag.clone(),
    );
    let extractor = tokio::spawn(extractor.run());
    let operator = tokio::spawn(operator.run());

    assert_eq!(operator.await.unwrap(), StageOutcome::Finished);
    assert!(!run_flag.is_running());
    let stopped_at = Instant::now();

    assert_eq!(extractor.await.unwrap(), StageOutcome::Finished);
    assert!(stopped_at.elapsed() <= ExtractorParams::default().delay);

    let extractor_events = observer.events_for(FUEL_EXTRACTOR);
    let finished: Vec<_> = extractor_events
        .iter()
        .filter(|e| matches!(e, StageEvent::Finished { .. }))
        .collect();
    assert_eq!(finished.len(), 1);
    assert_eq!(
        extractor_events.last(),
        Some(&StageEvent::Finished {
            robot: FUEL_EXTRACTOR,
            stage: Stage::FuelExtraction,
        })
    );

    // No production after the finished record
    let productions = extractor_events
        .iter()
        .filter(|e| matches!(e, StageEvent::Progress { .. }))
        .count() as i64;
    assert_eq!(pool.balance(), 700 * productions - 10 * 600);
    let balance = pool.balance();
    sleep(Duration::from_secs(30)).await;
    assert_eq!(pool.balance(), balance);
}

// =============================================================================
// Whole pipeline
// =============================================================================

#[tokio::test(start_paused = true)]
async fn full_pipeline_respects_stage_order() {
    for seed in [3, 17, 99] {
        let observer = RecordingObserver::new();
        let factory = Factory::new(
            FactoryParams::default(),
            StdRandom::seeded(seed),
            observer.clone(),
        );
        let report = factory.start().join().await.unwrap();
        assert!(report.completed());

        let events = observer.events();
        let basic_gate = position(&events, is_gate(GateName::BasicConstruction)).unwrap();
        let firmware_gate = position(&events, is_gate(GateName::Firmware)).unwrap();
        let first_firmware = position(&events, is_work_of(FIRMWARE_LOADER)).unwrap();
        let first_final = position(&events, is_work_of(FINAL_OPERATOR)).unwrap();

        assert!(basic_gate < first_firmware, "seed {}", seed);
        assert!(firmware_gate < first_final, "seed {}", seed);

        // Fuel is never observed negative
        for event in &events {
            if let StageEvent::Progress {
                stage: Stage::FuelExtraction,
                value,
                ..
            } = event
            {
                assert!(*value >= 0);
            }
        }

        // The extractor's finished record is its last one
        let extractor_events = observer.events_for(FUEL_EXTRACTOR);
        assert!(matches!(
            extractor_events.last(),
            Some(StageEvent::Finished { .. })
        ));
    }
}
