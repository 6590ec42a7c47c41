// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CityGML file importer

use crate::city::{CityObject, RegenerationSummary};
use crate::session::Session;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::info;

/// Result of one file import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Objects added to the session
    pub objects: usize,
    /// Regeneration totals over the whole session
    pub regeneration: RegenerationSummary,
}

/// Read a CityGML file, add its objects to `session` and regenerate their geometry.
///
/// Returns the number of objects added.
pub fn import_citygml_file(path: impl AsRef<Path>, session: &mut Session) -> Result<usize> {
    Ok(import_citygml_file_with(path, session, |_, _| {})?.objects)
}

/// Same as [`import_citygml_file`], calling `on_ingest(object, total)` before
/// each parsed object enters the session.
pub fn import_citygml_file_with<F>(
    path: impl AsRef<Path>,
    session: &mut Session,
    mut on_ingest: F,
) -> Result<ImportSummary>
where
    F: FnMut(&CityObject, usize),
{
    let path = path.as_ref();
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read CityGML file: {}", path.display()))?;
    info!(path = %path.display(), bytes = source.len(), "loaded XML file");

    let objects = super::parse_citygml(&source)
        .with_context(|| format!("Failed to parse CityGML file: {}", path.display()))?;

    let count = objects.len();
    for object in objects {
        on_ingest(&object, count);
        session.ingest(object);
    }
    info!(objects = count, "parsed objects");
    if let Some(bounds) = session.bounds() {
        info!(
            min = ?[bounds.min.x, bounds.min.y, bounds.min.z],
            max = ?[bounds.max.x, bounds.max.y, bounds.max.z],
            "bounds"
        );
    }

    let regeneration = session.regenerate_geometries();
    Ok(ImportSummary {
        objects: count,
        regeneration,
    })
}
