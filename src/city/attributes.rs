// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Semantic attributes kept on city objects

/// Attribute names recognized on city objects; anything else is dropped
pub const KNOWN_ATTRIBUTES: [&str; 18] = [
    "class",
    "function",
    "usage",
    "yearOfConstruction",
    "yearOfDemolition",
    "roofType",
    "measuredHeight",
    "storeysAboveGround",
    "storeysBelowGround",
    "storeyHeightsAboveGround",
    "storeyHeightsBelowGround",
    "isMovable",
    "averageHeight",
    "trunkDiameter",
    "crownDiameter",
    "species",
    "height",
    "name",
];

pub fn is_known_attribute(name: &str) -> bool {
    KNOWN_ATTRIBUTES.contains(&name)
}
