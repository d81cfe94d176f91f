// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Per-pipeline logging context.
//!
//! A [`Diagnostics`] value is handed to each stage explicitly. It only
//! carries the `log` target and a label; records go through whatever logger
//! the host installed (the `pixsteg` binary uses `env_logger`).

use crate::stego::error::StegoError;

/// Logging context threaded through a pipeline run.
#[derive(Debug, Clone)]
pub struct Diagnostics {
    target: String,
    label: String,
}

impl Diagnostics {
    /// Context logging under `pixsteg::<label>`.
    pub fn new(label: &str) -> Self {
        Self { target: format!("pixsteg::{label}"), label: label.to_string() }
    }

    /// Context for a child scope (e.g. `encode` → `encode.cipher`).
    pub fn scoped(&self, name: &str) -> Self {
        Self::new(&format!("{}.{}", self.label, name))
    }

    /// `log` target for records from this context.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Log `err` with its kind at error level. `StegoError`'s `Display`
    /// already includes the underlying cause.
    pub fn report(&self, err: &StegoError) {
        log::error!(target: self.target(), "{}: {err}", err.kind());
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new("pipeline")
    }
}
