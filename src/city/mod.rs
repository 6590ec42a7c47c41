// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! City model - objects, their attributes and surface-typed polygons

mod attributes;
mod object;

pub use attributes::{is_known_attribute, KNOWN_ATTRIBUTES};
pub use object::{CityObject, RegenerationSummary};
