// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the sprintd front end.

use thiserror::Error;

/// All possible errors that can occur while serving a report.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] sp_core::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("chart rendering failed: {0}")]
    Chart(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for sprintd operations.
pub type Result<T> = std::result::Result<T, Error>;
