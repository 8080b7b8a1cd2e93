// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Thalassa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thalassa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use smol_str::SmolStr;

/// A location code as it appears in the `source`/`target` columns.
///
/// Codes are typically short (ISO-2 country codes), so they are backed by
/// `SmolStr`. No particular format is enforced beyond being a non-empty
/// token: the pipeline never invents codes, it only carries what the input
/// table and the location table agree on. Surrounding whitespace is trimmed
/// on construction so `"NL "` and `"NL"` key the same node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocationCode {
    value: SmolStr,
}

impl LocationCode {
    pub fn new(value: impl AsRef<str>) -> Result<Self, CodeError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(CodeError::Empty);
        }
        Ok(Self {
            value: SmolStr::new(trimmed),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for LocationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl AsRef<str> for LocationCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for LocationCode {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for LocationCode {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for LocationCode {
    type Error = CodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeError {
    Empty,
}

impl fmt::Display for CodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("location code must not be empty"),
        }
    }
}

impl std::error::Error for CodeError {}
