// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for sp-core operations.

use thiserror::Error;

/// All possible errors that can occur in sp-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid sprint code: '{0}'\n  hint: use YWW, one year digit plus a two-digit ISO week (e.g. '211' for 2012 week 11)")]
    InvalidSprintCode(String),

    #[error("sprint code '{0}' does not map to a valid calendar week")]
    DateOutOfRange(String),

    #[error("invalid status: '{0}'")]
    InvalidStatus(String),

    #[error("invalid status filter: '{0}'\n  hint: valid filters are: all, done, open")]
    InvalidStatusFilter(String),

    #[error("invalid rejected-effort policy: '{0}'\n  hint: valid policies are: zero, estimate")]
    InvalidPolicy(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupted data: {0}")]
    CorruptedData(String),
}

/// A specialized Result type for sp-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
