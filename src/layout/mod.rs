// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Thalassa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thalassa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Geometry for the rendering collaborator.

pub mod route;

pub use route::{
    route_links, LinkAnchor, PathGeometry, Point, RoutedLink, SweepDirection, FAN_FACTOR,
};
