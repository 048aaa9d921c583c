// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! The update cycle.
//!
//! Every inbound event runs one cycle, in this order:
//!
//! 1. stream lifecycle tracker (hardware signal / lifecycle event)
//! 2. freeze-frame controller against the new streaming flag and selector
//! 3. configuration deltas pushed to the controller
//! 4. tap-focus indicator
//!
//! Steps 2 and 3 are skipped until the controller reports it is initialized, and
//! gestures received before then are dropped.

use std::time::Duration;

use super::CoordinatorEvent;
use crate::core::analysis::{AnalyzerConfig, AnalyzerPipelineConfig};
use crate::core::config::{CameraConfiguration, FlashMode, FocusSettings, ViewfinderConfig, ZoomRange};
use crate::core::controller::CameraController;
use crate::core::frames::FocusPoint;
use crate::core::gestures::{TapFocusScheduler, ZoomGestureInterpreter};
use crate::core::listener::PreviewListener;
use crate::core::streaming::{
    HardwareStreamState, LifecycleEvent, LifecycleOwner, StreamLifecycleTracker, StreamState,
};
use crate::core::switching::{FreezeEffect, FreezePhase, SwitchFreezeController};

pub struct CameraCoordinator<C, L> {
    controller: C,
    listener: L,
    config: CameraConfiguration,
    /// Effective values last pushed to the controller; `None` until the first push.
    applied: Option<CameraConfiguration>,
    tracker: StreamLifecycleTracker,
    freeze: SwitchFreezeController,
    focus: TapFocusScheduler,
    zoom: ZoomGestureInterpreter,
    analyzer: Option<AnalyzerPipelineConfig>,
    bound_to: Option<LifecycleOwner>,
    cycles: u64,
}

impl<C, L> CameraCoordinator<C, L>
where
    C: CameraController,
    L: PreviewListener,
{
    pub fn new(controller: C, listener: L, config: CameraConfiguration) -> Self {
        let zoom = ZoomGestureInterpreter::new(config.zoom_range);
        Self {
            controller,
            listener,
            config,
            applied: None,
            tracker: StreamLifecycleTracker::new(),
            freeze: SwitchFreezeController::new(),
            focus: TapFocusScheduler::default(),
            zoom,
            analyzer: None,
            bound_to: None,
            cycles: 0,
        }
    }

    /// Coordinator for a loaded `viewfinder.yaml`. An analyzer snapshot in the file
    /// is applied to `analyzer` if one is given.
    pub fn from_config(
        controller: C,
        listener: L,
        config: &ViewfinderConfig,
        analyzer: Option<AnalyzerPipelineConfig>,
    ) -> crate::core::Result<Self> {
        config.validate()?;
        let mut coordinator =
            Self::new(controller, listener, config.camera.clone()).with_focus_settings(config.focus);
        if let Some(mut pipeline) = analyzer {
            if let Some(snapshot) = config.analyzer {
                pipeline.apply_config(snapshot)?;
            }
            coordinator = coordinator.with_analyzer(pipeline);
        }
        Ok(coordinator)
    }

    pub fn with_focus_settings(mut self, settings: FocusSettings) -> Self {
        self.focus = TapFocusScheduler::from_settings(&settings);
        self
    }

    pub fn with_analyzer(mut self, analyzer: AnalyzerPipelineConfig) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    /// Bind the controller to the host lifecycle. Only the first call has an effect.
    pub fn bind(&mut self, owner: LifecycleOwner) {
        if let Some(existing) = &self.bound_to {
            tracing::debug!(owner = existing.name(), "Controller already bound, ignoring rebind");
            return;
        }
        tracing::info!(owner = owner.name(), "Binding camera controller to lifecycle");
        self.controller.bind_to_lifecycle(&owner);
        self.bound_to = Some(owner);
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn configuration(&self) -> &CameraConfiguration {
        &self.config
    }

    pub fn stream_state(&self) -> StreamState {
        self.tracker.state()
    }

    pub fn is_streaming(&self) -> bool {
        self.tracker.is_streaming()
    }

    pub fn freeze_phase(&self) -> FreezePhase {
        self.freeze.phase()
    }

    pub fn focus_indicator(&self) -> Option<FocusPoint> {
        self.focus.offset()
    }

    /// Next instant (on the coordinator's clock) at which `poll_timers` has work.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.focus.next_deadline()
    }

    pub fn analyzer(&self) -> Option<&AnalyzerPipelineConfig> {
        self.analyzer.as_ref()
    }

    pub fn controller(&self) -> &C {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut C {
        &mut self.controller
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn into_parts(self) -> (C, L) {
        (self.controller, self.listener)
    }

    // =========================================================================
    // Update cycle
    // =========================================================================

    /// Run one update cycle for `event` at clock reading `now`.
    pub fn handle(&mut self, event: CoordinatorEvent, now: Duration) {
        self.cycles += 1;
        let ready = self.controller.is_initialized();
        tracing::trace!(cycle = self.cycles, event = event.kind(), ready, "Update cycle");

        if !ready && event.is_gesture() {
            tracing::trace!(event = event.kind(), "Controller not initialized, dropping intent");
            self.poll_timers(now);
            return;
        }

        let mut tap: Option<FocusPoint> = None;
        let mut stopped = false;

        // Intake: stage the input. Gestures become configuration deltas or taps.
        match event {
            CoordinatorEvent::ConfigurationChanged(config) => {
                self.config = config;
            }
            CoordinatorEvent::Tap { x, y } => {
                if self.config.is_focus_on_tap_enabled {
                    tap = Some(FocusPoint::new(x, y));
                }
            }
            CoordinatorEvent::Pinch { scale_factor } => self.on_pinch(scale_factor),
            CoordinatorEvent::ConfigureAnalyzer(snapshot) => self.configure_analyzer(snapshot),
            CoordinatorEvent::Lifecycle(lifecycle) => {
                stopped = lifecycle.is_stop_class();
                self.resolve_stream(Some(lifecycle), None);
            }
            CoordinatorEvent::HardwareStream(signal) => {
                self.resolve_stream(None, Some(signal));
            }
            CoordinatorEvent::ControllerInitialized => {
                tracing::info!(ready, "Controller reported initialization");
            }
            CoordinatorEvent::Shutdown => {
                self.shutdown();
                return;
            }
        }

        let mut switched = false;
        if ready {
            switched = self.resolve_freeze(stopped);
            self.apply_deltas();
        }

        self.resolve_focus(tap, switched || stopped, now);
    }

    /// Fire any due timers. Call whenever the clock passes `next_deadline`.
    pub fn poll_timers(&mut self, now: Duration) {
        if self.focus.poll(now) {
            self.listener.on_focus_indicator_changed(None);
        }
    }

    /// Detach the analyzer and hide the indicator. The coordinator stays usable.
    pub fn shutdown(&mut self) {
        tracing::info!(cycles = self.cycles, "Coordinator shutting down");
        if let Some(analyzer) = self.analyzer.as_mut() {
            analyzer.detach(&mut self.controller);
        }
        if self.focus.reset() {
            self.listener.on_focus_indicator_changed(None);
        }
    }

    fn on_pinch(&mut self, scale_factor: f32) {
        if !self.config.is_pinch_to_zoom_enabled {
            tracing::trace!("Pinch-to-zoom disabled, ignoring pinch");
            return;
        }
        self.zoom.set_range(self.active_zoom_range());
        let next = self.zoom.on_pinch(self.config.zoom_ratio, scale_factor);
        if next != self.config.zoom_ratio {
            tracing::debug!(from = self.config.zoom_ratio, to = next, "Pinch zoom");
            self.config.zoom_ratio = next;
            self.listener.on_zoom_ratio_changed(next);
        }
    }

    fn configure_analyzer(&mut self, snapshot: AnalyzerConfig) {
        match self.analyzer.as_mut() {
            Some(analyzer) => {
                if let Err(e) = analyzer.apply_config(snapshot) {
                    tracing::warn!("Rejected analyzer configuration: {}", e);
                }
            }
            None => tracing::debug!("No analyzer installed, ignoring analyzer configuration"),
        }
    }

    // Step 1
    fn resolve_stream(
        &mut self,
        lifecycle: Option<LifecycleEvent>,
        signal: Option<HardwareStreamState>,
    ) {
        let mut changed = false;
        if let Some(lifecycle) = lifecycle {
            changed |= self.tracker.on_lifecycle_event(lifecycle);
        }
        if let Some(signal) = signal {
            changed |= self.tracker.on_hardware_signal(signal);
        }
        if changed {
            self.listener.on_streaming_changed(self.tracker.is_streaming());
        }
    }

    // Step 2. Returns `true` if a lens switch was detected in this cycle.
    fn resolve_freeze(&mut self, stopped: bool) -> bool {
        if stopped {
            self.freeze.on_stop();
        }

        let requested = self.config.lens_selector;
        let switched_from = self
            .applied
            .as_ref()
            .map(|applied| applied.lens_selector)
            .filter(|active| *active != requested);

        if let Some(active) = switched_from {
            tracing::info!(from = %active, to = %requested, "Lens switch requested");
            // A stopped host has nothing on screen to freeze.
            let halted = self.tracker.is_halted();
            if halted {
                tracing::debug!("Lens switch while stopped, skipping freeze capture");
            }
            let controller = &mut self.controller;
            self.freeze.on_selector_change(active, requested, || {
                if halted {
                    None
                } else {
                    controller.capture_current_frame()
                }
            });
        }

        for effect in self.freeze.resolve(self.tracker.is_streaming()) {
            match effect {
                FreezeEffect::ShowFront(bitmap) => self.listener.on_switch_to_front(&bitmap),
                FreezeEffect::ShowBack(bitmap) => self.listener.on_switch_to_back(&bitmap),
                FreezeEffect::PreviewStreamChanged => self.listener.on_preview_stream_changed(),
                FreezeEffect::ResetZoom => {
                    // 1.0, raised to the device minimum when the lens cannot go that wide.
                    let reset = self.active_zoom_range().clamp(1.0);
                    self.config.zoom_ratio = reset;
                    self.listener.on_zoom_ratio_changed(reset);
                }
            }
        }

        switched_from.is_some()
    }

    // Step 3
    fn apply_deltas(&mut self) {
        let range = self.active_zoom_range();
        self.zoom.set_range(range);
        let clamped = range.clamp(self.config.zoom_ratio);
        if clamped != self.config.zoom_ratio {
            tracing::debug!(requested = self.config.zoom_ratio, clamped, "Zoom ratio clamped");
            self.config.zoom_ratio = clamped;
        }

        let previous = self.applied.take();
        let prev = previous.as_ref();
        let wanted = &self.config;
        let controller = &mut self.controller;
        let mut effective = wanted.clone();

        if prev.map(|p| p.scale_type) != Some(wanted.scale_type) {
            controller.set_scale_type(wanted.scale_type);
        }
        if prev.map(|p| p.implementation_mode) != Some(wanted.implementation_mode) {
            controller.set_implementation_mode(wanted.implementation_mode);
        }
        if prev.map(|p| p.lens_selector) != Some(wanted.lens_selector) {
            controller.set_lens_selector(wanted.lens_selector);
        }
        if prev.map(|p| p.capture_mode) != Some(wanted.capture_mode) {
            controller.set_capture_mode(wanted.capture_mode);
        }

        // Queried after the selector push: flash availability is per lens.
        if !controller.has_flash_unit() {
            if wanted.flash_mode != FlashMode::Off || wanted.torch_enabled {
                tracing::debug!(
                    flash = ?wanted.flash_mode,
                    torch = wanted.torch_enabled,
                    "No flash unit, coercing flash and torch to defaults"
                );
            }
            effective.flash_mode = FlashMode::Off;
            effective.torch_enabled = false;
        }
        if prev.map(|p| p.flash_mode) != Some(effective.flash_mode) {
            controller.set_flash(effective.flash_mode);
        }
        if prev.map(|p| p.torch_enabled) != Some(effective.torch_enabled) {
            controller.set_torch(effective.torch_enabled);
        }
        if prev.map(|p| p.zoom_ratio) != Some(effective.zoom_ratio) {
            controller.set_zoom_ratio(effective.zoom_ratio);
        }
        if prev.map(|p| p.is_focus_on_tap_enabled) != Some(effective.is_focus_on_tap_enabled) {
            controller.set_tap_to_focus_enabled(effective.is_focus_on_tap_enabled);
        }

        if let Some(analyzer) = self.analyzer.as_mut() {
            analyzer.set_enabled(effective.is_image_analysis_enabled);
            analyzer.reconcile(controller);
        } else if effective.is_image_analysis_enabled && prev.is_none() {
            tracing::debug!("Image analysis enabled without an analyzer, nothing to attach");
        }

        self.applied = Some(effective);
    }

    // Step 4
    fn resolve_focus(&mut self, tap: Option<FocusPoint>, force_hide: bool, now: Duration) {
        if force_hide && self.focus.reset() {
            tracing::debug!("Focus indicator hidden by lens switch or stop");
            self.listener.on_focus_indicator_changed(None);
        }
        if let Some(point) = tap {
            self.focus.on_tap(point, now);
            self.listener.on_focus_indicator_changed(Some(point));
        }
        self.poll_timers(now);
    }

    fn active_zoom_range(&self) -> ZoomRange {
        self.controller.zoom_range().unwrap_or(self.config.zoom_range)
    }
}
