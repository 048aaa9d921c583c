// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! End-to-end scenarios driving `CameraCoordinator` through its public event API
//! with the simulated controller and a manual clock.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use viewfinder::sim::{Callback, ControllerCall, RecordingListener, SimulatedController};
use viewfinder::{
    AnalysisFrame, AnalyzerPipelineConfig, BackpressureStrategy, Bitmap, CamSelector,
    CameraConfiguration, CameraCoordinator, Clock, CoordinatorEvent, FlashMode, FocusPoint,
    FreezePhase, HardwareStreamState, LifecycleEvent, ManualClock, Resolution, ViewfinderConfig,
};

/// Route coordinator logs to the test harness; `RUST_LOG=viewfinder=debug` shows cycles.
fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

struct Harness {
    coordinator: CameraCoordinator<SimulatedController, RecordingListener>,
    listener: RecordingListener,
    clock: ManualClock,
}

impl Harness {
    fn new(controller: SimulatedController, config: CameraConfiguration) -> Self {
        init_logging();
        let listener = RecordingListener::new();
        let coordinator = CameraCoordinator::new(controller, listener.clone(), config);
        Self {
            coordinator,
            listener,
            clock: ManualClock::new(),
        }
    }

    fn ready() -> Self {
        let mut harness = Self::new(SimulatedController::new(), CameraConfiguration::default());
        harness.send(CoordinatorEvent::ControllerInitialized);
        harness.send(CoordinatorEvent::HardwareStream(HardwareStreamState::Streaming));
        harness.listener.take();
        harness
    }

    fn send(&mut self, event: CoordinatorEvent) {
        self.coordinator.handle(event, self.clock.now());
    }

    fn at(&mut self, ms: u64) {
        self.clock.set(Duration::from_millis(ms));
        self.coordinator.poll_timers(self.clock.now());
    }

    fn select(&mut self, selector: CamSelector) {
        let config = self
            .coordinator
            .configuration()
            .clone()
            .with_lens_selector(selector);
        self.send(CoordinatorEvent::ConfigurationChanged(config));
    }

    fn stream(&mut self, state: HardwareStreamState) {
        self.send(CoordinatorEvent::HardwareStream(state));
    }

    fn slot_callbacks(&self) -> usize {
        self.listener
            .callbacks()
            .iter()
            .filter(|c| matches!(c, Callback::SwitchToFront(_) | Callback::SwitchToBack(_)))
            .count()
    }
}

fn simulated_frame() -> Bitmap {
    let (width, height) = (
        SimulatedController::FRAME_WIDTH,
        SimulatedController::FRAME_HEIGHT,
    );
    Bitmap::new(width, height, vec![0x80u8; (width * height * 4) as usize])
}

// =============================================================================
// Zoom
// =============================================================================

#[test]
fn test_pinch_within_bounds_rounds_exactly() {
    let mut h = Harness::ready();
    h.send(CoordinatorEvent::pinch(2.3));
    assert_eq!(h.coordinator.configuration().zoom_ratio, 2.3);
    assert_eq!(h.listener.take(), vec![Callback::ZoomRatioChanged(2.3)]);
}

#[test]
fn test_pinch_clamps_to_max() {
    let mut h = Harness::new(
        SimulatedController::new(),
        CameraConfiguration::default().with_zoom_ratio(9.0),
    );
    h.send(CoordinatorEvent::ControllerInitialized);
    h.send(CoordinatorEvent::pinch(2.0));
    assert_eq!(h.coordinator.configuration().zoom_ratio, 10.0);
    assert_eq!(h.coordinator.controller().zoom_ratio(), Some(10.0));
}

#[test]
fn test_pinch_at_limit_fires_nothing() {
    let mut h = Harness::new(
        SimulatedController::new(),
        CameraConfiguration::default().with_zoom_ratio(10.0),
    );
    h.send(CoordinatorEvent::ControllerInitialized);
    h.listener.take();
    h.send(CoordinatorEvent::pinch(1.5));
    assert!(h.listener.is_empty());
}

// =============================================================================
// Tap to focus
// =============================================================================

#[test]
fn test_tap_hides_at_delay_and_not_before() {
    let mut h = Harness::ready();
    h.send(CoordinatorEvent::Tap { x: 10.0, y: 20.0 });
    assert_eq!(h.coordinator.focus_indicator(), Some(FocusPoint::new(10.0, 20.0)));

    h.at(999);
    assert!(h.coordinator.focus_indicator().is_some());
    h.at(1000);
    assert!(h.coordinator.focus_indicator().is_none());
    assert_eq!(
        h.listener.take(),
        vec![
            Callback::FocusIndicatorChanged(Some(FocusPoint::new(10.0, 20.0))),
            Callback::FocusIndicatorChanged(None),
        ]
    );
}

#[test]
fn test_second_tap_restarts_hide_deadline() {
    let mut h = Harness::ready();
    h.send(CoordinatorEvent::Tap { x: 1.0, y: 1.0 });
    h.at(500);
    h.send(CoordinatorEvent::Tap { x: 2.0, y: 2.0 });
    assert_eq!(h.coordinator.next_deadline(), Some(Duration::from_millis(1500)));

    h.at(1000);
    assert_eq!(h.coordinator.focus_indicator(), Some(FocusPoint::new(2.0, 2.0)));
    h.at(1499);
    assert!(h.coordinator.focus_indicator().is_some());
    h.at(1500);
    assert!(h.coordinator.focus_indicator().is_none());

    let hides = h
        .listener
        .callbacks()
        .into_iter()
        .filter(|c| *c == Callback::FocusIndicatorChanged(None))
        .count();
    assert_eq!(hides, 1);
}

#[test]
fn test_tap_ignored_when_focus_on_tap_disabled() {
    let mut h = Harness::new(
        SimulatedController::new(),
        CameraConfiguration::default().with_focus_on_tap(false),
    );
    h.send(CoordinatorEvent::ControllerInitialized);
    h.send(CoordinatorEvent::Tap { x: 1.0, y: 1.0 });
    assert!(h.coordinator.focus_indicator().is_none());
    assert_eq!(h.coordinator.controller().tap_to_focus_enabled(), Some(false));
}

#[test]
fn test_switch_hides_pending_focus_indicator() {
    let mut h = Harness::ready();
    h.send(CoordinatorEvent::Tap { x: 120.0, y: 340.0 });
    h.at(300);
    h.select(CamSelector::Front);

    assert!(h.coordinator.focus_indicator().is_none());
    assert_eq!(h.coordinator.next_deadline(), None);
    assert_eq!(
        h.listener.callbacks().last(),
        Some(&Callback::FocusIndicatorChanged(None))
    );

    let before = h.listener.len();
    h.at(1000);
    assert_eq!(h.listener.len(), before);
}

// =============================================================================
// Lens switch freeze frame
// =============================================================================

#[test]
fn test_switch_with_frame_fires_overlay_once() {
    let mut h = Harness::ready();
    h.send(CoordinatorEvent::pinch(3.0));
    h.listener.take();

    h.select(CamSelector::Front);
    assert_eq!(h.coordinator.freeze_phase(), FreezePhase::FrameCaptured);
    assert!(h.listener.is_empty());

    h.stream(HardwareStreamState::NotStreaming);
    assert_eq!(h.coordinator.freeze_phase(), FreezePhase::Consumed);
    assert_eq!(
        h.listener.take(),
        vec![
            Callback::StreamingChanged(false),
            Callback::SwitchToBack(simulated_frame()),
            Callback::PreviewStreamChanged,
            Callback::ZoomRatioChanged(1.0),
        ]
    );
    assert_eq!(h.coordinator.configuration().zoom_ratio, 1.0);
    assert_eq!(h.coordinator.controller().zoom_ratio(), Some(1.0));
    assert_eq!(h.coordinator.controller().selector(), Some(CamSelector::Front));

    // Repeated idle signals must not replay the callbacks.
    h.stream(HardwareStreamState::NotStreaming);
    assert!(h.listener.is_empty());

    h.stream(HardwareStreamState::Streaming);
    assert_eq!(h.coordinator.freeze_phase(), FreezePhase::Live);
    assert_eq!(h.listener.take(), vec![Callback::StreamingChanged(true)]);
}

#[test]
fn test_switch_from_front_uses_front_slot() {
    let mut h = Harness::new(
        SimulatedController::new(),
        CameraConfiguration::default().with_lens_selector(CamSelector::Front),
    );
    h.send(CoordinatorEvent::ControllerInitialized);
    h.stream(HardwareStreamState::Streaming);
    h.select(CamSelector::Back);
    h.stream(HardwareStreamState::NotStreaming);

    let callbacks = h.listener.callbacks();
    assert!(callbacks.contains(&Callback::SwitchToFront(simulated_frame())));
    assert_eq!(h.slot_callbacks(), 1);
}

#[test]
fn test_switch_without_frame_shows_no_overlay() {
    let mut controller = SimulatedController::new();
    controller.set_frame(None);
    let mut h = Harness::new(controller, CameraConfiguration::default());
    h.send(CoordinatorEvent::ControllerInitialized);
    h.stream(HardwareStreamState::Streaming);

    h.select(CamSelector::Front);
    assert_eq!(h.coordinator.freeze_phase(), FreezePhase::Consumed);
    h.stream(HardwareStreamState::NotStreaming);
    h.stream(HardwareStreamState::Streaming);

    assert_eq!(h.slot_callbacks(), 0);
    assert!(!h.listener.callbacks().contains(&Callback::PreviewStreamChanged));
    assert_eq!(h.coordinator.freeze_phase(), FreezePhase::Live);
    assert!(h.coordinator.is_streaming());
}

#[test]
fn test_second_switch_supersedes_first() {
    let mut h = Harness::ready();
    h.select(CamSelector::Front);
    h.select(CamSelector::External);
    assert_eq!(h.coordinator.controller().capture_count(), 2);
    assert_eq!(h.coordinator.freeze_phase(), FreezePhase::FrameCaptured);

    h.stream(HardwareStreamState::NotStreaming);

    // The surviving frame came from the front lens, so it lands in the front slot.
    assert_eq!(h.slot_callbacks(), 1);
    assert!(h.listener.callbacks().contains(&Callback::SwitchToFront(simulated_frame())));
    let changed = h
        .listener
        .callbacks()
        .into_iter()
        .filter(|c| *c == Callback::PreviewStreamChanged)
        .count();
    assert_eq!(changed, 1);
}

// =============================================================================
// Lifecycle
// =============================================================================

#[test]
fn test_stop_forces_idle_and_discards_freeze() {
    let mut h = Harness::ready();
    h.select(CamSelector::Front);
    assert_eq!(h.coordinator.freeze_phase(), FreezePhase::FrameCaptured);

    h.send(CoordinatorEvent::Lifecycle(LifecycleEvent::OnStop));
    assert!(!h.coordinator.is_streaming());
    assert_eq!(h.coordinator.freeze_phase(), FreezePhase::Consumed);

    // Buffered hardware signal after the stop is not trusted.
    h.stream(HardwareStreamState::Streaming);
    assert!(!h.coordinator.is_streaming());

    assert_eq!(h.slot_callbacks(), 0);
    assert_eq!(h.listener.take(), vec![Callback::StreamingChanged(false)]);

    h.send(CoordinatorEvent::Lifecycle(LifecycleEvent::OnStart));
    assert!(!h.coordinator.is_streaming());
    h.stream(HardwareStreamState::Streaming);
    assert!(h.coordinator.is_streaming());
    assert_eq!(h.coordinator.freeze_phase(), FreezePhase::Live);
}

#[test]
fn test_stop_hides_focus_indicator() {
    let mut h = Harness::ready();
    h.send(CoordinatorEvent::Tap { x: 3.0, y: 4.0 });
    h.send(CoordinatorEvent::Lifecycle(LifecycleEvent::OnDestroy));
    assert!(h.coordinator.focus_indicator().is_none());
    assert_eq!(h.coordinator.next_deadline(), None);
}

#[test]
fn test_switch_while_stopped_shows_no_overlay() {
    let mut h = Harness::ready();
    h.send(CoordinatorEvent::Lifecycle(LifecycleEvent::OnStop));
    h.listener.take();

    h.select(CamSelector::Front);
    assert_eq!(h.coordinator.controller().capture_count(), 0);
    assert_eq!(h.coordinator.freeze_phase(), FreezePhase::Consumed);
    assert_eq!(h.coordinator.controller().selector(), Some(CamSelector::Front));
    assert!(h.listener.is_empty());

    h.send(CoordinatorEvent::Lifecycle(LifecycleEvent::OnStart));
    h.stream(HardwareStreamState::Streaming);
    assert_eq!(h.coordinator.freeze_phase(), FreezePhase::Live);
    assert_eq!(h.slot_callbacks(), 0);
    assert!(!h.listener.callbacks().contains(&Callback::PreviewStreamChanged));
}

#[test]
fn test_switch_zoom_reset_respects_device_minimum() {
    let mut controller = SimulatedController::new();
    controller.set_reported_zoom_range(Some(viewfinder::ZoomRange::new(2.0, 8.0).unwrap()));
    let mut h = Harness::new(controller, CameraConfiguration::default());
    h.send(CoordinatorEvent::ControllerInitialized);
    h.stream(HardwareStreamState::Streaming);
    h.send(CoordinatorEvent::pinch(2.0));
    assert_eq!(h.coordinator.configuration().zoom_ratio, 4.0);
    h.listener.take();

    h.select(CamSelector::Front);
    h.stream(HardwareStreamState::NotStreaming);
    assert!(h.listener.callbacks().contains(&Callback::ZoomRatioChanged(2.0)));
    assert_eq!(h.coordinator.configuration().zoom_ratio, 2.0);
    assert_eq!(h.coordinator.controller().zoom_ratio(), Some(2.0));
}

// =============================================================================
// Controller gating and deltas
// =============================================================================

#[test]
fn test_staged_configuration_applies_on_initialization() {
    let mut h = Harness::new(
        SimulatedController::pending_initialization(),
        CameraConfiguration::default(),
    );
    h.send(CoordinatorEvent::ConfigurationChanged(
        CameraConfiguration::default()
            .with_lens_selector(CamSelector::Front)
            .with_zoom_ratio(2.0),
    ));
    h.send(CoordinatorEvent::pinch(3.0));
    assert_eq!(h.coordinator.controller().write_count(), 0);

    h.coordinator.controller_mut().mark_initialized();
    h.send(CoordinatorEvent::ControllerInitialized);
    let controller = h.coordinator.controller();
    assert_eq!(controller.selector(), Some(CamSelector::Front));
    assert_eq!(controller.zoom_ratio(), Some(2.0));
    // Initial selector is not a switch.
    assert_eq!(controller.capture_count(), 0);
}

#[test]
fn test_deltas_follow_cycle_order() {
    let mut h = Harness::new(SimulatedController::new(), CameraConfiguration::default());
    h.send(CoordinatorEvent::ControllerInitialized);
    let calls = h.coordinator.controller_mut().take_calls();
    let names: Vec<_> = calls.iter().map(|c| c.to_string()).collect();
    assert_eq!(
        names,
        vec![
            "set_scale_type(FillCenter)",
            "set_implementation_mode(Performance)",
            "set_lens_selector(back)",
            "set_capture_mode(Image)",
            "set_flash(Off)",
            "set_torch(false)",
            "set_zoom_ratio(1)",
            "set_tap_to_focus_enabled(true)",
        ]
    );
}

#[test]
fn test_flash_coerced_on_lens_without_flash() {
    let mut controller = SimulatedController::new();
    controller.set_flash_unit_for(CamSelector::Front, false);
    let mut h = Harness::new(
        controller,
        CameraConfiguration::default()
            .with_flash_mode(FlashMode::On)
            .with_torch(true),
    );
    h.send(CoordinatorEvent::ControllerInitialized);
    assert_eq!(h.coordinator.controller().flash(), Some(FlashMode::On));

    h.select(CamSelector::Front);
    assert_eq!(h.coordinator.controller().flash(), Some(FlashMode::Off));
    assert_eq!(h.coordinator.controller().torch(), Some(false));
    // The request itself is kept.
    assert_eq!(h.coordinator.configuration().flash_mode, FlashMode::On);

    h.select(CamSelector::Back);
    assert_eq!(h.coordinator.controller().flash(), Some(FlashMode::On));
    assert_eq!(h.coordinator.controller().torch(), Some(true));
}

#[test]
fn test_bind_only_once() {
    let mut h = Harness::ready();
    h.coordinator.bind(viewfinder::LifecycleOwner::new("activity"));
    h.coordinator.bind(viewfinder::LifecycleOwner::new("activity"));
    assert_eq!(h.coordinator.controller().bind_count(), 1);
    assert_eq!(
        h.coordinator.controller().calls().last(),
        Some(&ControllerCall::Bind("activity".to_string()))
    );
}

// =============================================================================
// Analyzer
// =============================================================================

fn counting_pipeline() -> (AnalyzerPipelineConfig, Arc<AtomicUsize>) {
    let seen = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&seen);
    let mut pipeline = AnalyzerPipelineConfig::new(move |_frame: &AnalysisFrame| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    pipeline
        .configure(
            BackpressureStrategy::Blocking,
            Some(Resolution::new(640, 480).unwrap()),
            3,
        )
        .unwrap();
    (pipeline, seen)
}

fn analysis_frame(n: u64) -> AnalysisFrame {
    AnalysisFrame {
        frame_number: n,
        timestamp: Duration::from_millis(n * 33),
        image: simulated_frame(),
    }
}

#[test]
fn test_toggle_analysis_reproduces_snapshot() {
    let (pipeline, seen) = counting_pipeline();
    let listener = RecordingListener::new();
    let mut coordinator = CameraCoordinator::new(
        SimulatedController::new(),
        listener,
        CameraConfiguration::default().with_image_analysis(true),
    )
    .with_analyzer(pipeline);
    let now = Duration::ZERO;

    coordinator.handle(CoordinatorEvent::ControllerInitialized, now);
    let first = coordinator.controller().attached_analyzer().unwrap();
    assert!(first.analyze(&analysis_frame(1)));

    let off = coordinator.configuration().clone().with_image_analysis(false);
    coordinator.handle(CoordinatorEvent::ConfigurationChanged(off.clone()), now);
    assert!(coordinator.controller().attached_analyzer().is_none());
    assert!(!first.analyze(&analysis_frame(2)));
    assert_eq!(seen.load(Ordering::SeqCst), 1);

    let on = off.with_image_analysis(true);
    coordinator.handle(CoordinatorEvent::ConfigurationChanged(on), now);
    let second = coordinator.controller().attached_analyzer().unwrap();
    assert_eq!(second.id(), first.id());
    assert_eq!(second.config(), first.config());
    assert_eq!(second.config().queue_depth, 3);
}

#[test]
fn test_invalid_analyzer_event_keeps_snapshot() {
    let (pipeline, _) = counting_pipeline();
    let mut coordinator = CameraCoordinator::new(
        SimulatedController::new(),
        RecordingListener::new(),
        CameraConfiguration::default().with_image_analysis(true),
    )
    .with_analyzer(pipeline);
    coordinator.handle(CoordinatorEvent::ControllerInitialized, Duration::ZERO);
    let before = *coordinator.analyzer().unwrap().snapshot();

    let mut invalid = before;
    invalid.queue_depth = 0;
    coordinator.handle(CoordinatorEvent::ConfigureAnalyzer(invalid), Duration::ZERO);
    assert_eq!(*coordinator.analyzer().unwrap().snapshot(), before);
    assert_eq!(coordinator.controller().analyzer_attach_count(), 1);
}

#[test]
fn test_shutdown_detaches_analyzer() {
    let (pipeline, _) = counting_pipeline();
    let mut coordinator = CameraCoordinator::new(
        SimulatedController::new(),
        RecordingListener::new(),
        CameraConfiguration::default().with_image_analysis(true),
    )
    .with_analyzer(pipeline);
    coordinator.handle(CoordinatorEvent::ControllerInitialized, Duration::ZERO);
    coordinator.handle(CoordinatorEvent::Shutdown, Duration::ZERO);
    assert!(coordinator.controller().attached_analyzer().is_none());
    assert_eq!(coordinator.controller().analyzer_detach_count(), 1);
}

// =============================================================================
// Configuration file
// =============================================================================

#[test]
fn test_coordinator_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(ViewfinderConfig::FILE_NAME),
        r#"
camera:
  lens_selector: front
  is_image_analysis_enabled: true
analyzer:
  backpressure_strategy: keep_only_latest
  queue_depth: 2
focus:
  hide_delay_ms: 250
"#,
    )
    .unwrap();

    let config = ViewfinderConfig::load_or_default(dir.path());
    let pipeline = AnalyzerPipelineConfig::new(|_| {});
    let mut coordinator = CameraCoordinator::from_config(
        SimulatedController::new(),
        RecordingListener::new(),
        &config,
        Some(pipeline),
    )
    .unwrap();

    coordinator.handle(CoordinatorEvent::ControllerInitialized, Duration::ZERO);
    assert_eq!(coordinator.controller().selector(), Some(CamSelector::Front));
    assert_eq!(
        coordinator
            .controller()
            .attached_analyzer()
            .unwrap()
            .config()
            .queue_depth,
        2
    );

    coordinator.handle(CoordinatorEvent::Tap { x: 0.0, y: 0.0 }, Duration::ZERO);
    assert_eq!(coordinator.next_deadline(), Some(Duration::from_millis(250)));
}
