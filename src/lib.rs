// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! citymesh
//!
//! Turns CityGML boundary polygons, including non-planar, badly closed and holed
//! ones, into flat triangle and wireframe edge buffers ready for rendering, and
//! tracks the bounding box of everything loaded.

pub mod city;
pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod session;

pub use city::CityObject;
pub use config::MeshConfig;
pub use error::{GeometryError, TriangulationError};
pub use geometry::{tessellate_polygon, BoundingBox, Polygon, Ring, TriangleBuffer};
pub use io::{
    export_json, import_citygml_file, import_citygml_file_with, parse_citygml, ImportSummary,
};
pub use session::{Session, SessionStats};

use anyhow::Result;

/// Parse a CityGML document into a fresh session with geometry generated
pub fn load_str(xml: &str, config: MeshConfig) -> Result<Session> {
    let mut session = Session::with_config(config);
    for object in parse_citygml(xml)? {
        session.ingest(object);
    }
    session.regenerate_geometries();
    Ok(session)
}
