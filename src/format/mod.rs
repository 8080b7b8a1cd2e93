// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Thalassa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thalassa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Row input parsing.
//!
//! The pipeline consumes an ordered sequence of flat column→value rows; this
//! module produces that sequence from JSON or from a thin delimited-text
//! table. Anything smarter (encodings, quoting dialects, streaming) belongs
//! to an external parsing collaborator.

pub mod rows;

pub use rows::{rows_from_delimited, rows_from_json_str, rows_from_str, Row, RowParseError};
