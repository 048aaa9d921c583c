// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

mod freeze_controller;

pub use freeze_controller::{FreezeEffect, FreezeFrame, FreezePhase, SwitchFreezeController};
