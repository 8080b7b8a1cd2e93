// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Thalassa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thalassa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Dataset construction and ownership.
//!
//! `dataset` builds the committed raw-data snapshot, `flow_store` owns it
//! together with the live selection, and `loader` feeds new datasets in
//! asynchronously with last-load-wins semantics.

pub mod dataset;
pub mod flow_store;
pub mod loader;

pub use dataset::{
    Dataset, LoadError, COLUMN_SOURCE, COLUMN_TARGET, COLUMN_WEIGHT, COLUMN_YEAR,
};
pub use flow_store::FlowStore;
pub use loader::Loader;
