// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Thalassa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thalassa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Asynchronous, last-load-wins file loading.
//!
//! Loading is the only genuinely asynchronous operation in the pipeline.
//! Every call claims a fresh generation; when a newer load starts before an
//! older one finishes, the older result is discarded instead of committed.
//! Nothing here touches committed state: the caller commits a returned
//! dataset into its [`FlowStore`](super::FlowStore), so a failed or
//! superseded load leaves the previous snapshot untouched.

use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::debug;

use crate::format::rows::rows_from_str;
use crate::geo::LocationLookup;
use crate::store::dataset::{Dataset, LoadError};

#[derive(Debug, Default)]
pub struct Loader {
    generation: Arc<AtomicU64>,
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads, parses and aggregates a rows file (JSON array or delimited
    /// text, sniffed by content).
    ///
    /// Returns `Ok(None)` when a newer `load_path` call claimed the loader
    /// while this one was still reading — the caller must simply drop the
    /// result. Errors report this load only and imply nothing about the
    /// committed state.
    pub async fn load_path(
        &self,
        path: impl Into<PathBuf>,
        lookup: &dyn LocationLookup,
    ) -> Result<Option<Dataset>, LoadError> {
        let path = path.into();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let read_path = path.clone();
        let text = tokio::task::spawn_blocking(move || std::fs::read_to_string(&read_path))
            .await
            .map_err(|join_error| LoadError::Io {
                path: path.clone(),
                source: io::Error::new(io::ErrorKind::Other, join_error),
            })?
            .map_err(|source| LoadError::Io {
                path: path.clone(),
                source,
            })?;

        let rows = rows_from_str(&text).map_err(|source| LoadError::Rows {
            path: path.clone(),
            source,
        })?;
        let dataset = Dataset::from_rows(rows, lookup)?;

        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(?path, "load superseded by a newer one, discarding result");
            return Ok(None);
        }
        Ok(Some(dataset))
    }
}
