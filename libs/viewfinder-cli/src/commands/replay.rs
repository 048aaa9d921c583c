// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Replay a scenario through a coordinator on a manual clock.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use serde::Serialize;
use viewfinder::sim::{ControllerCall, RecordingListener, SimulatedController};
use viewfinder::{
    AnalyzerPipelineConfig, CameraCoordinator, Clock, CoordinatorEvent, FreezePhase, ManualClock,
};

use crate::OutputFormat;
use crate::scenario::Scenario;

/// What one cycle (or one timer firing) did.
#[derive(Debug, Clone, Serialize)]
pub struct TimelineEntry {
    pub at_ms: u64,
    /// Event kind, or `timer` for a hide deadline firing between events.
    pub trigger: String,
    pub controller_calls: Vec<ControllerCall>,
    pub callbacks: Vec<String>,
}

/// State after the last step.
#[derive(Debug, Clone, Serialize)]
pub struct ReplaySummary {
    pub steps: usize,
    pub cycles: u64,
    pub is_streaming: bool,
    pub freeze_phase: FreezePhase,
    pub zoom_ratio: f32,
    pub analyzer_attached: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub name: Option<String>,
    pub timeline: Vec<TimelineEntry>,
    pub summary: ReplaySummary,
}

struct Replayer {
    coordinator: CameraCoordinator<SimulatedController, RecordingListener>,
    listener: RecordingListener,
    clock: ManualClock,
    timeline: Vec<TimelineEntry>,
}

impl Replayer {
    fn record(&mut self, trigger: &str) {
        let calls = self.coordinator.controller_mut().take_calls();
        let callbacks: Vec<String> = self.listener.take().iter().map(|c| c.to_string()).collect();
        if calls.is_empty() && callbacks.is_empty() && trigger == "timer" {
            return;
        }
        let at_ms = self.clock.now().as_millis() as u64;
        tracing::debug!(
            at_ms,
            trigger,
            calls = calls.len(),
            callbacks = callbacks.len(),
            "Cycle recorded"
        );
        self.timeline.push(TimelineEntry {
            at_ms,
            trigger: trigger.to_string(),
            controller_calls: calls,
            callbacks,
        });
    }

    /// Fire every hide deadline that falls at or before `until`, at its own time.
    fn run_timers_until(&mut self, until: Duration) {
        while let Some(deadline) = self.coordinator.next_deadline() {
            if deadline > until {
                break;
            }
            self.clock.set(deadline);
            self.coordinator.poll_timers(self.clock.now());
            self.record("timer");
        }
    }
}

/// Run `scenario` to completion and collect the timeline.
pub fn run_scenario(scenario: &Scenario) -> Result<ReplayReport> {
    let analyzer = AnalyzerPipelineConfig::new(|frame| {
        tracing::trace!(frame = frame.frame_number, "Analysis frame");
    });

    let listener = RecordingListener::new();
    let coordinator = CameraCoordinator::from_config(
        scenario.device.build_controller(),
        listener.clone(),
        &scenario.config,
        Some(analyzer),
    )?;

    let mut replayer = Replayer {
        coordinator,
        listener,
        clock: ManualClock::new(),
        timeline: Vec::new(),
    };
    replayer.coordinator.bind(viewfinder::LifecycleOwner::new("replay"));
    replayer.record("bind");

    for step in &scenario.steps {
        let at = Duration::from_millis(step.at_ms);
        replayer.run_timers_until(at);
        replayer.clock.set(at);

        if step.event == CoordinatorEvent::ControllerInitialized {
            replayer.coordinator.controller_mut().mark_initialized();
        }
        let trigger = step.event.kind();
        replayer
            .coordinator
            .handle(step.event.clone(), replayer.clock.now());
        replayer.record(trigger);
    }
    replayer.run_timers_until(Duration::MAX);

    let coordinator = &replayer.coordinator;
    let summary = ReplaySummary {
        steps: scenario.steps.len(),
        cycles: coordinator.cycles(),
        is_streaming: coordinator.is_streaming(),
        freeze_phase: coordinator.freeze_phase(),
        zoom_ratio: coordinator.configuration().zoom_ratio,
        analyzer_attached: coordinator.controller().attached_analyzer().is_some(),
    };

    Ok(ReplayReport {
        name: scenario.name.clone(),
        timeline: replayer.timeline,
        summary,
    })
}

pub fn run(path: &Path, format: OutputFormat) -> Result<()> {
    let scenario = Scenario::load(path)?;
    tracing::info!(
        scenario = scenario.name.as_deref().unwrap_or("unnamed"),
        steps = scenario.steps.len(),
        "Replaying scenario"
    );
    let report = run_scenario(&scenario)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Pretty => print_pretty(&report),
    }
    Ok(())
}

fn print_pretty(report: &ReplayReport) {
    if let Some(name) = &report.name {
        println!("Scenario: {}\n", name);
    }

    for entry in &report.timeline {
        println!("[{:>6} ms] {}", entry.at_ms, entry.trigger);
        for call in &entry.controller_calls {
            println!("              -> {}", call);
        }
        for callback in &entry.callbacks {
            println!("              <- {}", callback);
        }
    }

    let summary = &report.summary;
    println!();
    println!("Steps:        {}", summary.steps);
    println!("Cycles:       {}", summary.cycles);
    println!("Streaming:    {}", summary.is_streaming);
    println!("Freeze phase: {}", summary.freeze_phase);
    println!("Zoom ratio:   {}", summary.zoom_ratio);
    println!("Analyzer:     {}", if summary.analyzer_attached { "attached" } else { "detached" });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replay(yaml: &str) -> ReplayReport {
        run_scenario(&Scenario::from_yaml_str(yaml).unwrap()).unwrap()
    }

    #[test]
    fn test_switch_timeline_shows_overlay_sequence() {
        let report = replay(
            r#"
steps:
  - at_ms: 0
    event: { type: hardware_stream, value: streaming }
  - at_ms: 100
    event: { type: configuration_changed, value: { lens_selector: front } }
  - at_ms: 150
    event: { type: hardware_stream, value: not_streaming }
  - at_ms: 400
    event: { type: hardware_stream, value: streaming }
"#,
        );

        let idle = report
            .timeline
            .iter()
            .find(|e| e.at_ms == 150)
            .unwrap();
        assert_eq!(
            idle.callbacks,
            vec![
                "on_streaming_changed(false)",
                "on_switch_to_back(4x4 bitmap)",
                "on_preview_stream_changed()",
                "on_zoom_ratio_changed(1)",
            ]
        );
        assert_eq!(report.summary.freeze_phase, FreezePhase::Live);
        assert!(report.summary.is_streaming);
    }

    #[test]
    fn test_timer_fires_between_steps() {
        let report = replay(
            r#"
steps:
  - at_ms: 0
    event: { type: tap, value: { x: 120, y: 340 } }
  - at_ms: 5000
    event: { type: pinch, value: { scale_factor: 2.0 } }
"#,
        );

        let timer = report
            .timeline
            .iter()
            .find(|e| e.trigger == "timer")
            .unwrap();
        assert_eq!(timer.at_ms, 1000);
        assert_eq!(timer.callbacks, vec!["on_focus_indicator_changed(hidden)"]);
        assert_eq!(report.summary.zoom_ratio, 2.0);
    }

    #[test]
    fn test_pending_controller_drops_early_gestures() {
        let report = replay(
            r#"
device:
  initialized: false
steps:
  - at_ms: 0
    event: { type: pinch, value: { scale_factor: 3.0 } }
  - at_ms: 10
    event: { type: controller_initialized }
"#,
        );

        assert!(report.timeline[1].controller_calls.is_empty());
        assert!(!report.timeline[2].controller_calls.is_empty());
        assert_eq!(report.summary.zoom_ratio, 1.0);
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report = replay(
            r#"
name: json
steps:
  - at_ms: 0
    event: { type: controller_initialized }
"#,
        );
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["name"], "json");
        assert_eq!(json["summary"]["freeze_phase"], "Live");
        assert_eq!(json["timeline"][1]["controller_calls"][0]["call"], "scale_type");
    }
}
