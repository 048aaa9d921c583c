// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use thiserror::Error;

/// Errors surfaced at API and configuration boundaries.
///
/// Nothing inside the coordination cycle returns these: runtime conditions such as a
/// missing flash unit or an unavailable frame are absorbed with a fallback.
#[derive(Error, Debug)]
pub enum ViewfinderError {
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Runtime error: {0}")]
    Runtime(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ViewfinderError>;
