// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Dedicated coordination thread.
//!
//! All inbound events (UI gestures, host lifecycle, hardware stream
//! notifications from the controller's own context) are marshalled onto one
//! thread through a crossbeam channel. Timer deadlines become receive
//! deadlines, so a pending focus-indicator hide fires without a second thread.

use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};

use super::{CameraCoordinator, CoordinatorEvent};
use crate::core::analysis::AnalyzerConfig;
use crate::core::clocks::{Clock, SoftwareClock};
use crate::core::config::CameraConfiguration;
use crate::core::controller::CameraController;
use crate::core::error::{Result, ViewfinderError};
use crate::core::frames::FocusPoint;
use crate::core::listener::PreviewListener;
use crate::core::streaming::{HardwareStreamState, LifecycleEvent, LifecycleOwner};

/// Cloneable handle for posting events onto the coordination thread.
///
/// Every helper returns `false` once the loop has exited.
#[derive(Clone, Debug)]
pub struct EventSender {
    tx: Sender<CoordinatorEvent>,
}

impl EventSender {
    pub fn send(&self, event: CoordinatorEvent) -> bool {
        match self.tx.send(event) {
            Ok(()) => true,
            Err(e) => {
                tracing::trace!(event = e.0.kind(), "Coordination loop gone, event dropped");
                false
            }
        }
    }

    /// Hardware stream notification. Safe to call from any thread.
    pub fn stream_state(&self, state: HardwareStreamState) -> bool {
        self.send(CoordinatorEvent::HardwareStream(state))
    }

    pub fn lifecycle(&self, event: LifecycleEvent) -> bool {
        self.send(CoordinatorEvent::Lifecycle(event))
    }

    pub fn tap(&self, point: FocusPoint) -> bool {
        self.send(CoordinatorEvent::tap(point))
    }

    pub fn pinch(&self, scale_factor: f32) -> bool {
        self.send(CoordinatorEvent::pinch(scale_factor))
    }

    pub fn configure(&self, config: CameraConfiguration) -> bool {
        self.send(CoordinatorEvent::ConfigurationChanged(config))
    }

    pub fn configure_analyzer(&self, config: AnalyzerConfig) -> bool {
        self.send(CoordinatorEvent::ConfigureAnalyzer(config))
    }

    pub fn controller_initialized(&self) -> bool {
        self.send(CoordinatorEvent::ControllerInitialized)
    }

    pub fn shutdown(&self) -> bool {
        self.send(CoordinatorEvent::Shutdown)
    }
}

/// Running coordination thread. Joining returns the controller and listener.
pub struct CoordinationLoop<C, L> {
    sender: EventSender,
    handle: Option<JoinHandle<(C, L)>>,
}

impl<C, L> CoordinationLoop<C, L>
where
    C: CameraController + 'static,
    L: PreviewListener + 'static,
{
    /// Bind the coordinator to `owner` and start its thread.
    pub fn spawn(
        mut coordinator: CameraCoordinator<C, L>,
        owner: LifecycleOwner,
    ) -> Result<(Self, EventSender)> {
        let (tx, rx) = crossbeam_channel::unbounded();
        let sender = EventSender { tx };

        let handle = thread::Builder::new()
            .name("viewfinder-coordination".to_string())
            .spawn(move || {
                coordinator.bind(owner);
                run(&mut coordinator, &rx);
                coordinator.into_parts()
            })
            .map_err(|e| {
                ViewfinderError::Runtime(format!("Failed to spawn coordination thread: {}", e))
            })?;

        tracing::info!("Coordination loop started");
        Ok((
            Self {
                sender: sender.clone(),
                handle: Some(handle),
            },
            sender,
        ))
    }

    pub fn sender(&self) -> EventSender {
        self.sender.clone()
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Request shutdown and wait for the thread to finish.
    pub fn join(mut self) -> Result<(C, L)> {
        self.sender.shutdown();
        let handle = self
            .handle
            .take()
            .ok_or_else(|| ViewfinderError::Runtime("Coordination loop already joined".into()))?;
        handle
            .join()
            .map_err(|_| ViewfinderError::Runtime("Coordination thread panicked".into()))
    }
}

impl<C, L> Drop for CoordinationLoop<C, L> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = self.sender.tx.send(CoordinatorEvent::Shutdown);
            if handle.join().is_err() {
                tracing::error!("Coordination thread panicked during shutdown");
            }
        }
    }
}

fn run<C, L>(coordinator: &mut CameraCoordinator<C, L>, rx: &Receiver<CoordinatorEvent>)
where
    C: CameraController,
    L: PreviewListener,
{
    let clock = SoftwareClock::with_description("Coordination Clock".to_string());

    loop {
        let received = match coordinator.next_deadline() {
            Some(deadline) => rx.recv_deadline(clock.instant_at(deadline)),
            None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        match received {
            Ok(CoordinatorEvent::Shutdown) => {
                coordinator.handle(CoordinatorEvent::Shutdown, clock.now());
                break;
            }
            Ok(event) => coordinator.handle(event, clock.now()),
            Err(RecvTimeoutError::Timeout) => coordinator.poll_timers(clock.now()),
            Err(RecvTimeoutError::Disconnected) => {
                tracing::debug!("All senders dropped, stopping coordination loop");
                coordinator.shutdown();
                break;
            }
        }
    }

    tracing::info!(cycles = coordinator.cycles(), "Coordination loop stopped");
}
