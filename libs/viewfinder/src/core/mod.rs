// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

pub mod analysis;
pub mod clocks;
pub mod config;
pub mod controller;
pub mod coordinator;
pub mod error;
pub mod frames;
pub mod gestures;
pub mod listener;
pub mod prelude;
pub mod streaming;
pub mod switching;

pub use analysis::*;
pub use clocks::*;
pub use config::*;
pub use controller::*;
pub use coordinator::*;
pub use error::*;
pub use frames::*;
pub use gestures::*;
pub use listener::*;
pub use streaming::*;
pub use switching::*;
