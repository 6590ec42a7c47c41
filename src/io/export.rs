// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! JSON export of a session's render buffers

use crate::city::CityObject;
use crate::geometry::{BoundingBox, EdgeBuffer, TriangleBuffer};
use crate::session::Session;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Snapshot of everything a renderer needs from a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionExport {
    pub bounds: Option<BoundingBox>,
    pub objects: Vec<ObjectExport>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectExport {
    pub id: String,
    #[serde(rename = "type")]
    pub object_type: String,
    pub attributes: BTreeMap<String, String>,
    /// Surface type to `x y z nx ny nz` floats, three vertices per triangle
    pub triangles: BTreeMap<String, TriangleBuffer>,
    /// `x0 y0 z0 x1 y1 z1` per edge
    pub edges: EdgeBuffer,
}

impl From<&CityObject> for ObjectExport {
    fn from(object: &CityObject) -> Self {
        Self {
            id: object.id.clone(),
            object_type: object.object_type.clone(),
            attributes: object.attributes().clone(),
            triangles: object.triangles().clone(),
            edges: object.edges().clone(),
        }
    }
}

impl From<&Session> for SessionExport {
    fn from(session: &Session) -> Self {
        Self {
            bounds: session.bounds(),
            objects: session.objects().iter().map(ObjectExport::from).collect(),
        }
    }
}

/// Write the session's buffers as pretty-printed JSON
pub fn export_json(session: &Session, path: impl AsRef<Path>) -> Result<()> {
    let export = SessionExport::from(session);
    let json = serde_json::to_string_pretty(&export).context("Failed to serialize session")?;
    std::fs::write(path.as_ref(), json)
        .with_context(|| format!("Failed to write JSON export: {}", path.as_ref().display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Polygon, Ring};
    use tempfile::tempdir;

    #[test]
    fn test_export_json() -> Result<()> {
        let mut object = CityObject::new("B1", "Building");
        object.set_attribute("function", "1000");
        object.add_polygon(
            "WallSurface",
            Polygon::from_exterior(Ring::from_coords(&[
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [1.0, 0.0, 1.0],
                [0.0, 0.0, 0.0],
            ])),
        );
        let mut session = Session::new();
        session.ingest(object);
        session.regenerate_geometries();

        let dir = tempdir()?;
        let path = dir.path().join("out.json");
        export_json(&session, &path)?;

        let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
        let object = &value["objects"][0];
        assert_eq!(object["id"], "B1");
        assert_eq!(object["type"], "Building");
        assert_eq!(object["attributes"]["function"], "1000");
        assert_eq!(object["triangles"]["WallSurface"].as_array().map(Vec::len), Some(18));
        assert_eq!(object["edges"].as_array().map(Vec::len), Some(18));
        Ok(())
    }
}
