// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Thalassa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thalassa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Overlap-aware link routing.
//!
//! Links sharing the same unordered endpoint pair are fanned out onto
//! circular arcs on both sides of the straight connecting line so they stay
//! visually distinguishable. Pure geometry: the routing must be recomputed
//! whenever the visible link list changes, because group membership depends
//! on exactly which links are on screen.

use std::collections::BTreeMap;

use smallvec::SmallVec;

use crate::model::LocationCode;

/// How tightly arcs bundle around the straight line.
pub const FAN_FACTOR: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// One visible link with its projected endpoint coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkAnchor {
    source: LocationCode,
    target: LocationCode,
    source_point: Point,
    target_point: Point,
}

impl LinkAnchor {
    pub fn new(
        source: LocationCode,
        target: LocationCode,
        source_point: Point,
        target_point: Point,
    ) -> Self {
        Self {
            source,
            target,
            source_point,
            target_point,
        }
    }

    pub fn source(&self) -> &LocationCode {
        &self.source
    }

    pub fn target(&self) -> &LocationCode {
        &self.target
    }
}

/// SVG-style sweep: `flag() == 1` sweeps through positive angles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepDirection {
    CounterClockwise,
    Clockwise,
}

impl SweepDirection {
    pub fn flag(&self) -> u8 {
        match self {
            Self::CounterClockwise => 0,
            Self::Clockwise => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathGeometry {
    /// Drawn straight through the midpoint; used for the middle ordinal of
    /// an odd group, where an arc would degenerate.
    Line,
    /// A circular arc of the given radius between the endpoints.
    Arc { radius: f64, sweep: SweepDirection },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoutedLink {
    from: Point,
    to: Point,
    geometry: PathGeometry,
}

impl RoutedLink {
    pub fn from(&self) -> Point {
        self.from
    }

    pub fn to(&self) -> Point {
        self.to
    }

    pub fn geometry(&self) -> &PathGeometry {
        &self.geometry
    }

    pub fn is_straight(&self) -> bool {
        matches!(self.geometry, PathGeometry::Line)
    }

    /// The SVG path data the rendering collaborator hands to its canvas.
    pub fn path_data(&self) -> String {
        let (sx, sy) = (self.from.x, self.from.y);
        let (tx, ty) = (self.to.x, self.to.y);
        match &self.geometry {
            PathGeometry::Line => {
                let mx = (sx + tx) / 2.0;
                let my = (sy + ty) / 2.0;
                format!("M{sx},{sy}L{mx},{my} {tx},{ty}")
            }
            PathGeometry::Arc { radius, sweep } => {
                format!(
                    "M{sx},{sy}A{radius},{radius} 0 0,{} {tx},{ty}",
                    sweep.flag()
                )
            }
        }
    }
}

/// Routes every link, one output per input, in input order.
///
/// Within an overlap group of size `n` the links keep their input order as
/// ordinals `1..=n`. The lower half fans to one side, the upper half to the
/// other; a member running opposite to the group's first member has its
/// sweep mirrored so reciprocal links end up on opposite sides. Ordinals
/// closer to the middle get larger radii (flatter arcs), the outermost the
/// tightest.
pub fn route_links(anchors: &[LinkAnchor]) -> Vec<RoutedLink> {
    let mut groups: BTreeMap<(&str, &str), SmallVec<[usize; 2]>> = BTreeMap::new();
    for (index, anchor) in anchors.iter().enumerate() {
        let a = anchor.source.as_str();
        let b = anchor.target.as_str();
        let key = if a <= b { (a, b) } else { (b, a) };
        groups.entry(key).or_default().push(index);
    }

    let mut routed: Vec<Option<RoutedLink>> = vec![None; anchors.len()];
    for members in groups.values() {
        let total = members.len();
        let uneven = total % 2 == 1;
        let ceil_half = (total + 1) / 2;
        let reference = &anchors[members[0]];

        for (position, &index) in members.iter().enumerate() {
            let anchor = &anchors[index];
            let ordinal = position + 1;
            let lower_half = (ordinal as f64) <= (total as f64) / 2.0;
            let same_direction = anchor.source == reference.source;
            let middle = uneven && ordinal == ceil_half;

            let geometry = if middle {
                PathGeometry::Line
            } else {
                let corrected = if lower_half {
                    ordinal
                } else {
                    ordinal - ceil_half
                };
                let uneven_correction = if uneven { 0.0 } else { 0.5 };
                let distance = anchor.source_point.distance_to(anchor.target_point);
                let radius = FAN_FACTOR * distance / (corrected as f64 - uneven_correction);
                let sweep = match (lower_half, same_direction) {
                    (true, true) | (false, false) => SweepDirection::CounterClockwise,
                    (true, false) | (false, true) => SweepDirection::Clockwise,
                };
                PathGeometry::Arc { radius, sweep }
            };

            routed[index] = Some(RoutedLink {
                from: anchor.source_point,
                to: anchor.target_point,
                geometry,
            });
        }
    }

    routed
        .into_iter()
        .map(|link| link.expect("every anchor belongs to exactly one overlap group"))
        .collect()
}
